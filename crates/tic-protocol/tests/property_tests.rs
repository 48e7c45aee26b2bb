//! Property tests for Tic encode/decode invariants.

use proptest::prelude::*;
use tic_protocol::{
    ProtocolError, decode_i32_le, decode_u32_le, encode_i32_le, normalize_i32,
    set_target_position,
};

type TestResult = Result<(), ProtocolError>;

#[test]
fn test_position_round_trip_edges() -> TestResult {
    for position in [0, -1, 1, i32::MAX, i32::MIN] {
        let bytes = encode_i32_le(position);
        assert_eq!(decode_i32_le(&bytes)?, position);
    }
    Ok(())
}

#[test]
fn test_target_frame_args_decode_back() -> TestResult {
    let frame = set_target_position(-123_456);
    assert_eq!(decode_i32_le(frame.args())?, -123_456);
    Ok(())
}

#[test]
fn test_unsigned_at_sign_boundary() -> TestResult {
    let raw = decode_u32_le(&[0x00, 0x00, 0x00, 0x80])?;
    assert_eq!(raw, 1 << 31);
    assert_eq!(normalize_i32(raw), i32::MIN);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any signed position survives encode followed by decode.
    #[test]
    fn prop_position_round_trip(position in any::<i32>()) {
        let bytes = encode_i32_le(position);
        prop_assert_eq!(decode_i32_le(&bytes), Ok(position));
    }

    /// Values below 2^31 decode unchanged, values at or above wrap by 2^32.
    #[test]
    fn prop_sign_normalization(raw in any::<u32>()) {
        let decoded = i64::from(normalize_i32(raw));
        if raw >= 1 << 31 {
            prop_assert_eq!(decoded, i64::from(raw) - (1_i64 << 32));
        } else {
            prop_assert_eq!(decoded, i64::from(raw));
        }
    }

    /// Fewer than four bytes never decode.
    #[test]
    fn prop_short_input_rejected(bytes in proptest::collection::vec(any::<u8>(), 0..4)) {
        let expected = Err(ProtocolError::ShortResponse { expected: 4, actual: bytes.len() });
        prop_assert_eq!(decode_i32_le(&bytes), expected);
    }
}
