//! CryptoNote varints: little-endian base-128, high bit set on every byte but
//! the last.

use crate::errors::AddressError;

/// Longest encoding of a `u64`.
pub const MAX_VARINT_SIZE: usize = 10;

/// Appends the varint encoding of `n` to `out`.
pub fn write_varint(mut n: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_SIZE);
    write_varint(n, &mut out);
    out
}

/// Reads one varint from the front of `bytes`, returning the value and the
/// number of bytes consumed.
///
/// Rejects truncated input, values wider than 64 bits, and padded encodings
/// that end in a zero continuation byte, so each value has exactly one
/// accepted encoding.
pub fn read_varint(bytes: &[u8]) -> Result<(u64, usize), AddressError> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_VARINT_SIZE) {
        let shift = 7 * i as u32;
        let bits = u64::from(byte & 0x7f);
        if shift == 63 && bits > 1 {
            return Err(AddressError::InvalidVarint);
        }
        value |= bits << shift;

        if byte & 0x80 == 0 {
            if byte == 0 && i > 0 {
                return Err(AddressError::InvalidVarint);
            }
            return Ok((value, i + 1));
        }
    }
    Err(AddressError::InvalidVarint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_varint(0), [0x00]);
        assert_eq!(encode_varint(127), [0x7f]);
        assert_eq!(encode_varint(128), [0x80, 0x01]);
        assert_eq!(encode_varint(300), [0xac, 0x02]);
        assert_eq!(hex::encode(encode_varint(0x3bbb1d)), "9df6ee01");
        assert_eq!(encode_varint(u64::MAX).len(), MAX_VARINT_SIZE);
    }

    #[test]
    fn test_read_back() {
        for n in [0, 1, 127, 128, 16383, 16384, 0x3bbb1d, u64::MAX] {
            let mut bytes = encode_varint(n);
            let size = bytes.len();
            bytes.extend_from_slice(&[0xaa, 0xbb]);
            assert_eq!(read_varint(&bytes), Ok((n, size)));
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(read_varint(&[]), Err(AddressError::InvalidVarint));
        assert_eq!(read_varint(&[0x80]), Err(AddressError::InvalidVarint));
        assert_eq!(read_varint(&[0x80, 0x00]), Err(AddressError::InvalidVarint));

        // 2^64 does not fit.
        let mut too_wide = vec![0x80; 9];
        too_wide.push(0x02);
        assert_eq!(read_varint(&too_wide), Err(AddressError::InvalidVarint));

        let eleven = [0xff; 11];
        assert_eq!(read_varint(&eleven), Err(AddressError::InvalidVarint));
    }
}
