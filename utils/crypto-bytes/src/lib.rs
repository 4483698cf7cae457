//! Byte-order and keystream helpers shared by the cipher crates.
#![no_std]

/// Write a u32 into a 4-byte slice in little-endian order.
pub fn write_u32_le(dst: &mut [u8], input: u32) {
    assert!(dst.len() == 4);
    dst.copy_from_slice(&input.to_le_bytes());
}

/// Read a u32 from a 4-byte slice in little-endian order.
pub fn read_u32_le(input: &[u8]) -> u32 {
    assert!(input.len() == 4);
    let mut buf = [0u8; 4];
    buf.copy_from_slice(input);
    u32::from_le_bytes(buf)
}

/// Copy all of `src` into the front of `dst`. `dst` must be at least as
/// long as `src`.
pub fn copy_memory(src: &[u8], dst: &mut [u8]) {
    assert!(dst.len() >= src.len());
    dst[..src.len()].copy_from_slice(src);
}

/// XOR `plaintext` against the front of `keystream`, writing into `dst`.
/// `dst` and `plaintext` must have the same length; `keystream` must be at
/// least that long.
pub fn xor_keystream(dst: &mut [u8], plaintext: &[u8], keystream: &[u8]) {
    assert!(dst.len() == plaintext.len());
    assert!(plaintext.len() <= keystream.len());
    for (i, (&p, &k)) in plaintext.iter().zip(keystream.iter()).enumerate() {
        dst[i] = p ^ k;
    }
}

#[cfg(test)]
mod tests {
    use super::{read_u32_le, write_u32_le, copy_memory, xor_keystream};

    #[test]
    fn u32_le_round_trip() {
        let mut buf = [0u8; 4];
        write_u32_le(&mut buf, 0x61707865);
        assert_eq!(buf, [0x65, 0x78, 0x70, 0x61]);
        assert_eq!(read_u32_le(&buf), 0x61707865);
    }

    #[test]
    fn copy_into_longer_dst() {
        let mut dst = [0xffu8; 6];
        copy_memory(&[1, 2, 3, 4], &mut dst);
        assert_eq!(dst, [1, 2, 3, 4, 0xff, 0xff]);
    }

    #[test]
    fn xor_with_oversized_keystream() {
        let mut out = [0u8; 3];
        xor_keystream(&mut out, &[0x00, 0x0f, 0xf0], &[0xaa, 0xaa, 0xaa, 0xaa]);
        assert_eq!(out, [0xaa, 0xa5, 0x5a]);
    }

    #[test]
    fn xor_twice_restores_input() {
        let input = [0x12u8, 0x34, 0x56, 0x78];
        let keystream = [0x9au8, 0xbc, 0xde, 0xf0];
        let mut once = [0u8; 4];
        let mut twice = [0u8; 4];
        xor_keystream(&mut once, &input, &keystream);
        xor_keystream(&mut twice, &once, &keystream);
        assert_eq!(twice, input);
    }
}
