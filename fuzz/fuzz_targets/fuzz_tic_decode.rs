//! Fuzzes the Tic variable decoders and status checks.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_tic_decode
#![no_main]
use libfuzzer_sys::fuzz_target;
use tic_protocol::{
    decode_i32_le, decode_u8, decode_u32_le, homing_in_progress, movement_in_progress,
};

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes.
    let signed = decode_i32_le(data);
    let unsigned = decode_u32_le(data);
    assert_eq!(signed.is_ok(), unsigned.is_ok());
    if let (Ok(s), Ok(u)) = (signed, unsigned) {
        assert_eq!(s as u32, u);
    }
    if let Ok(b) = decode_u8(data) {
        let _ = homing_in_progress(b);
        let _ = movement_in_progress(b);
    }
});
