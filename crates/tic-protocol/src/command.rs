//! Tic command frame encoding.
//!
//! A command frame is one opcode byte followed by zero to four argument
//! bytes. Multi-byte arguments are little-endian and are assembled with
//! explicit shifts so the result does not depend on host byte order:
//!
//! | Frame | Bytes |
//! |---|---|
//! | energize | `[0x85]` |
//! | deenergize | `[0x86]` |
//! | home | `[0x97, dir]` |
//! | set target position | `[0xE0, b0, b1, b2, b3]` (i32) |
//! | set starting speed | `[0xE5, b0, b1, b2, b3]` (u32) |
//! | set max speed | `[0xE6, b0, b1, b2, b3]` (u32) |
//! | get variable | `[0xA1, offset]` |

use crate::ids::opcodes;
use crate::types::HomeDirection;

/// Longest frame the protocol defines: opcode plus a 32-bit argument.
pub const MAX_FRAME_LEN: usize = 5;

/// A fixed-capacity command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    bytes: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl CommandFrame {
    fn opcode_only(opcode: u8) -> Self {
        Self {
            bytes: [opcode, 0, 0, 0, 0],
            len: 1,
        }
    }

    fn with_u8(opcode: u8, arg: u8) -> Self {
        Self {
            bytes: [opcode, arg, 0, 0, 0],
            len: 2,
        }
    }

    fn with_u32(opcode: u8, arg: u32) -> Self {
        let [b0, b1, b2, b3] = encode_u32_le(arg);
        Self {
            bytes: [opcode, b0, b1, b2, b3],
            len: MAX_FRAME_LEN,
        }
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    pub fn args(&self) -> &[u8] {
        self.as_bytes().get(1..).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; every frame carries at least its opcode.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Split a `u32` into little-endian bytes.
#[inline]
pub fn encode_u32_le(value: u32) -> [u8; 4] {
    [
        (value & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        ((value >> 16) & 0xFF) as u8,
        ((value >> 24) & 0xFF) as u8,
    ]
}

/// Split an `i32` into little-endian two's-complement bytes.
#[inline]
pub fn encode_i32_le(value: i32) -> [u8; 4] {
    // `as` reinterprets the bits; negative values land at 2^32 + value.
    encode_u32_le(value as u32)
}

pub fn energize() -> CommandFrame {
    CommandFrame::opcode_only(opcodes::ENERGIZE)
}

pub fn deenergize() -> CommandFrame {
    CommandFrame::opcode_only(opcodes::DEENERGIZE)
}

/// Absolute target position in steps.
pub fn set_target_position(target: i32) -> CommandFrame {
    CommandFrame::with_u32(opcodes::SET_TARGET_POSITION, target as u32)
}

/// Start homing. `direction` is forwarded as-is.
pub fn home(direction: u8) -> CommandFrame {
    CommandFrame::with_u8(opcodes::GO_HOME, direction)
}

pub fn home_in(direction: HomeDirection) -> CommandFrame {
    home(direction.to_u8())
}

/// Maximum speed in steps per 10,000 seconds.
pub fn set_max_speed(speed: u32) -> CommandFrame {
    CommandFrame::with_u32(opcodes::SET_MAX_SPEED, speed)
}

/// Starting speed in steps per 10,000 seconds.
pub fn set_starting_speed(speed: u32) -> CommandFrame {
    CommandFrame::with_u32(opcodes::SET_STARTING_SPEED, speed)
}

/// Write phase of a variable read. The caller reads the variable bytes in
/// the same bus transaction.
pub fn get_variables(offset: u8) -> CommandFrame {
    CommandFrame::with_u8(opcodes::GET_VARIABLE, offset)
}
