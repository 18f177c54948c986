// File: src/core/hash.rs

const MULTIPLIER: u32 = 1_000_003;

/// A string hash that is identical across processes and platforms, unlike
/// `std::hash::DefaultHasher` which is randomly keyed per run.
///
/// The seed is the first code point shifted left by 7. Every code point
/// (including the first) is folded in with a wrapping multiply followed by
/// an xor, and the final value is xored with the symbol count.
pub fn stable_hash(input: &str) -> u32 {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    let mut value = (first as u32) << 7;
    let mut length: u32 = 0;
    for c in input.chars() {
        value = value.wrapping_mul(MULTIPLIER) ^ c as u32;
        length = length.wrapping_add(1);
    }
    value ^= length;

    // Unreachable for u32 arithmetic; kept so signed readers of the hash
    // never observe -1.
    if i64::from(value) == -1 {
        return (-2i64) as u32;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_hashes_to_zero() {
        assert_eq!(stable_hash(""), 0);
    }

    #[test]
    fn known_values() {
        assert_eq!(stable_hash("a"), 3_826_102_752);
        assert_eq!(stable_hash("th"), 714_805_302);
        assert_eq!(stable_hash("ff"), 628_535_766);
        assert_eq!(stable_hash(" r"), 197_187_600);
        assert_eq!(stable_hash("hello"), 3_027_671_037);
    }

    #[test]
    fn hashes_code_points_not_bytes() {
        assert_eq!(stable_hash("é"), 4_054_285_672);
    }

    #[test]
    fn deterministic() {
        assert_eq!(stable_hash("pitter patter"), stable_hash("pitter patter"));
    }
}
