//! Fuzzes Tic command frame encoding against the variable decoder.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_tic_command
#![no_main]
use libfuzzer_sys::fuzz_target;
use tic_protocol::{
    MAX_FRAME_LEN, decode_i32_le, decode_u32_le, home, opcodes, set_max_speed,
    set_target_position,
};

fuzz_target!(|input: (i32, u32, u8)| {
    let (target, speed, direction) = input;

    let frame = set_target_position(target);
    assert_eq!(frame.opcode(), opcodes::SET_TARGET_POSITION);
    assert_eq!(frame.len(), MAX_FRAME_LEN);
    assert_eq!(decode_i32_le(frame.args()), Ok(target));

    let frame = set_max_speed(speed);
    assert_eq!(decode_u32_le(frame.args()), Ok(speed));

    assert_eq!(home(direction).as_bytes(), &[opcodes::GO_HOME, direction]);
});
