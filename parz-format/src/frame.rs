//! Frame-length prefix encoding
//!
//! A parz stream is `frame*` terminated by clean EOF, where each frame is a
//! little-endian `u32` length followed by exactly that many payload bytes.
//! A zero length is ill-formed; readers reject it rather than treating it
//! as a terminator.

use crate::constants::FRAME_LEN_SIZE;

/// Encode a frame length as its little-endian wire form.
pub fn encode_frame_len(len: u32) -> [u8; FRAME_LEN_SIZE] {
    len.to_le_bytes()
}

/// Decode a frame length from its little-endian wire form.
pub fn decode_frame_len(bytes: [u8; FRAME_LEN_SIZE]) -> u32 {
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn frame_len_wire_form_is_little_endian() {
        assert_eq!(encode_frame_len(1), [1, 0, 0, 0]);
        assert_eq!(encode_frame_len(0x0102_0304), [4, 3, 2, 1]);
    }

    proptest! {
        #[test]
        fn frame_len_round_trip(len in any::<u32>()) {
            prop_assert_eq!(decode_frame_len(encode_frame_len(len)), len);
        }
    }
}
