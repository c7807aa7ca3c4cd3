//! One-shot hashing and ABI selector derivation.
//!
//! Text inputs are hashed as their UTF-8 bytes: anything that is
//! `AsRef<[u8]>` works, so `&str`, `String`, `&[u8]` and `Vec<u8>` all go
//! through the same entry points. Calls are served by the process-wide
//! [`EnginePool`].

use crate::digest::{encode_hex, Digest, Selector};
use crate::pool::EnginePool;

/// Keccak-256 of `input`.
pub fn hash<T: AsRef<[u8]>>(input: T) -> Digest {
    EnginePool::global().hash(input.as_ref())
}

/// Lower-case hex Keccak-256 of `input`, optionally `0x`-prefixed.
pub fn hash_hex<T: AsRef<[u8]>>(input: T, with_prefix: bool) -> String {
    encode_hex(hash(input).as_bytes(), with_prefix)
}

/// The 4-byte selector of a canonical function signature such as
/// `transfer(address,uint256)`.
pub fn selector(signature: &str) -> Selector {
    hash(signature).selector()
}

/// Hex of the 4-byte selector, optionally `0x`-prefixed.
pub fn function_selector(signature: &str, with_prefix: bool) -> String {
    selector(signature).to_hex(with_prefix)
}

/// `0x`-prefixed hex of the 4-byte selector, e.g. `0xa9059cbb`.
pub fn function_selector_hex(signature: &str) -> String {
    function_selector(signature, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

    #[test]
    fn test_text_and_bytes_agree() {
        assert_eq!(hash("abc"), hash(b"abc"));
        assert_eq!(hash(String::from("abc")), hash(vec![b'a', b'b', b'c']));
    }

    #[test]
    fn test_empty() {
        assert_eq!(hash("").to_hex(false), EMPTY);
        assert_eq!(hash([0u8; 0]).to_hex(false), EMPTY);
    }

    #[test]
    fn test_hash_hex_prefix() {
        let plain = hash_hex("abc", false);
        assert_eq!(plain.len(), 64);
        assert!(plain.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_eq!(hash_hex("abc", true), format!("0x{}", plain));
    }

    #[test]
    fn test_transfer_selector() {
        assert_eq!(function_selector("transfer(address,uint256)", true), "0xa9059cbb");
        assert_eq!(function_selector("transfer(address,uint256)", false), "a9059cbb");
        assert_eq!(function_selector_hex("transfer(address,uint256)"), "0xa9059cbb");
        assert_eq!(selector("transfer(address,uint256)").to_string(), "0xa9059cbb");
        assert_eq!(
            selector("transfer(address,uint256)").as_bytes(),
            &[0xa9, 0x05, 0x9c, 0xbb]
        );
    }

    #[test]
    fn test_utf8_text() {
        let text = "h\u{e9}llo \u{1f980}";
        assert_eq!(hash(text), hash(text.as_bytes()));
    }
}
