//! Tic stepper motor controller protocol: command frames and variable decoding.
//!
//! This crate is intentionally I/O-free and allocation-free. It provides pure
//! functions and types that can be tested and fuzzed without an I2C bus; the
//! `tic-i2c` crate puts the frames on the wire.
//!
//! # Key Features
//! - Command frames for energize, deenergize, homing, target position and speeds
//! - Little-endian 32-bit decode with two's-complement normalization
//! - Status byte checks used by the homing and movement waits

#![deny(static_mut_refs)]

pub mod command;
pub mod decode;
pub mod error;
pub mod ids;
pub mod status;
pub mod types;

pub use command::{
    CommandFrame, MAX_FRAME_LEN, deenergize, encode_i32_le, encode_u32_le, energize,
    get_variables, home, home_in, set_max_speed, set_starting_speed, set_target_position,
};
pub use decode::{decode_i32_le, decode_u8, decode_u32_le, normalize_i32};
pub use error::{ProtocolError, ProtocolResult};
pub use ids::{DEFAULT_ADDRESS, MAX_ADDRESS, opcodes, variables};
pub use status::{homing_in_progress, movement_in_progress};
pub use types::HomeDirection;
