// ABOUTME: GSM default alphabet septet packing (8 characters into 7 octets, little-endian bit order)
// ABOUTME: Includes the inverse unpacker used to check packed output

/// Pack one-byte-per-character default alphabet text into septets.
///
/// Character `i` contributes its bits above `i % 8` to octet `i`, and the next
/// character fills the remaining high bits. Every eighth character is fully
/// absorbed by its predecessor, so a multiple of 8 characters produces no
/// trailing fill octet. Only the low 7 bits of each input byte are used.
pub fn pack_septets(octets: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity((octets.len() * 7).div_ceil(8));

    for (i, &current) in octets.iter().enumerate() {
        let shift = i % 8;
        if shift == 7 {
            continue;
        }
        let next = octets.get(i + 1).copied().unwrap_or(0) & 0x7F;
        let current = current & 0x7F;
        packed.push((current >> shift) | (next << (7 - shift)));
    }

    packed
}

/// Recover `count` characters from packed septets
pub fn unpack_septets(packed: &[u8], count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| {
            let bit = i * 7;
            let (index, offset) = (bit / 8, bit % 8);
            let low = packed.get(index).copied().unwrap_or(0) >> offset;
            let high = if offset > 1 {
                packed.get(index + 1).copied().unwrap_or(0) << (8 - offset)
            } else {
                0
            };
            (low | high) & 0x7F
        })
        .collect()
}

/// Map text onto one byte per character for the default alphabet path.
///
/// Characters outside ASCII are replaced with `?`.
pub fn to_septet_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_hello() {
        // Well known vector: "hellohello" packs to E8329BFD4697D9EC37
        let packed = pack_septets(b"hellohello");
        assert_eq!(
            packed,
            vec![0xE8, 0x32, 0x9B, 0xFD, 0x46, 0x97, 0xD9, 0xEC, 0x37]
        );
    }

    #[test]
    fn test_pack_single_character() {
        assert_eq!(pack_septets(b"A"), vec![0x41]);
        assert_eq!(pack_septets(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_multiple_of_eight_has_no_fill_octet() {
        let packed = pack_septets(b"12345678");
        assert_eq!(packed.len(), 7);
        assert_eq!(unpack_septets(&packed, 8), b"12345678".to_vec());
    }

    #[test]
    fn test_seven_characters_fill_seven_octets() {
        assert_eq!(pack_septets(b"1234567").len(), 7);
        assert_eq!(pack_septets(b"123456789").len(), 8);
    }

    #[test]
    fn test_to_septet_bytes_replaces_non_ascii() {
        assert_eq!(to_septet_bytes("a€b"), b"a?b".to_vec());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_pack_roundtrip(chars in proptest::collection::vec(0u8..0x80, 0..400)) {
            let packed = pack_septets(&chars);
            prop_assert_eq!(packed.len(), (chars.len() * 7).div_ceil(8));
            prop_assert_eq!(unpack_septets(&packed, chars.len()), chars);
        }

        #[test]
        fn prop_eight_character_blocks_pack_exactly(blocks in 0usize..20) {
            let chars = vec![b'x'; blocks * 8];
            prop_assert_eq!(pack_septets(&chars).len(), blocks * 7);
        }
    }
}
