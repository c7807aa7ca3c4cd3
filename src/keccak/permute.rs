//! Keccak-f[1600] permutation.
//!
//! Each of the 24 rounds applies, in order:
//! 1. theta - column parity diffusion
//! 2. rho - per-lane rotation
//! 3. pi - lane relocation `(x, y) -> (y, 2x + 3y)`
//! 4. chi - the only non-linear step, row-wise
//! 5. iota - round constant into lane (0, 0)

use super::{State, ROTATION_OFFSETS, ROUNDS, ROUND_CONSTANTS};

#[inline(always)]
const fn lane(x: usize, y: usize) -> usize {
    x + 5 * y
}

/// XOR each column's parity difference into its two neighbours.
pub fn theta(state: &mut State) {
    let mut parity = [0u64; 5];
    for x in 0..5 {
        parity[x] = state[lane(x, 0)]
            ^ state[lane(x, 1)]
            ^ state[lane(x, 2)]
            ^ state[lane(x, 3)]
            ^ state[lane(x, 4)];
    }

    for x in 0..5 {
        let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            state[lane(x, y)] ^= d;
        }
    }
}

/// Rotate every lane left by its fixed offset.
pub fn rho(state: &mut State) {
    for (value, &offset) in state.iter_mut().zip(ROTATION_OFFSETS.iter()) {
        *value = value.rotate_left(offset);
    }
}

/// Move lane `(x, y)` to `(y, 2x + 3y mod 5)`.
pub fn pi(state: &mut State) {
    let src = *state;
    for x in 0..5 {
        for y in 0..5 {
            state[lane(y, (2 * x + 3 * y) % 5)] = src[lane(x, y)];
        }
    }
}

/// `a[x] ^= !a[x + 1] & a[x + 2]` within each row.
pub fn chi(state: &mut State) {
    for y in 0..5 {
        let row = [
            state[lane(0, y)],
            state[lane(1, y)],
            state[lane(2, y)],
            state[lane(3, y)],
            state[lane(4, y)],
        ];
        for x in 0..5 {
            state[lane(x, y)] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
        }
    }
}

/// XOR the round constant into lane (0, 0).
#[inline]
pub fn iota(state: &mut State, round: usize) {
    state[0] ^= ROUND_CONSTANTS[round];
}

#[inline]
fn round(state: &mut State, index: usize) {
    theta(state);
    rho(state);
    pi(state);
    chi(state);
    iota(state, index);
}

/// Apply all 24 rounds of Keccak-f[1600] in place.
pub fn permute(state: &mut State) {
    for index in 0..ROUNDS {
        round(state, index);
    }
}

/// Keccak-f[1600] with trace output for debugging.
///
/// Returns (final_state, round_traces) where each trace entry contains
/// the state after that round.
pub fn permute_with_trace(state: &State) -> (State, Vec<State>) {
    let mut st = *state;
    let mut traces = Vec::with_capacity(ROUNDS);

    for index in 0..ROUNDS {
        round(&mut st, index);
        traces.push(st);
    }

    (st, traces)
}
