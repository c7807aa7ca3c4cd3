// Build script that generates the Keccak-f[1600] constant tables.
// Build scripts are not part of the hashing path, so we allow expect().
#![allow(clippy::expect_used)]
//
// Generates `$OUT_DIR/params_generated.rs` containing:
// - `ROUND_CONSTANTS` - the 24 iota constants, from the rc(t) LFSR
// - `ROTATION_OFFSETS` - the 25 rho offsets indexed by x + 5y

use std::env;
use std::fs;
use std::path::Path;

const ROUNDS: usize = 24;
const LANES: usize = 25;

/// One output bit of the degree-8 LFSR x^8 + x^6 + x^5 + x^4 + 1.
fn rc_bit(t: usize) -> u64 {
    let t = t % 255;
    if t == 0 {
        return 1;
    }
    let mut r: u16 = 1;
    for _ in 0..t {
        r <<= 1;
        if r & 0x100 != 0 {
            r ^= 0x171;
        }
    }
    u64::from(r & 1)
}

fn round_constants() -> [u64; ROUNDS] {
    let mut constants = [0u64; ROUNDS];
    for (round, constant) in constants.iter_mut().enumerate() {
        for j in 0..7 {
            *constant |= rc_bit(j + 7 * round) << ((1usize << j) - 1);
        }
    }
    constants
}

fn rotation_offsets() -> [u32; LANES] {
    let mut offsets = [0u32; LANES];
    let (mut x, mut y) = (1usize, 0usize);
    for t in 0..24u32 {
        offsets[x + 5 * y] = ((t + 1) * (t + 2) / 2) % 64;
        (x, y) = (y, (2 * x + 3 * y) % 5);
    }
    offsets
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir);

    let mut code = String::new();
    code.push_str(
        r#"// Keccak-f[1600] constant tables.
//
// DO NOT EDIT - This file is generated by build.rs

/// Iota round constants, indexed by round number.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
"#,
    );
    for constant in round_constants() {
        code.push_str(&format!("    {:#018x},\n", constant));
    }
    code.push_str(
        r#"];

/// Rho rotation offsets, indexed by lane position `x + 5 * y`.
pub const ROTATION_OFFSETS: [u32; LANES] = [
"#,
    );
    for offset in rotation_offsets() {
        code.push_str(&format!("    {},\n", offset));
    }
    code.push_str("];\n");

    fs::write(out_path.join("params_generated.rs"), code)
        .expect("Failed to write params_generated.rs");
}
