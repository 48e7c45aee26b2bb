//! Tic command opcodes and variable table offsets.

/// Factory-default 7-bit I2C address of a Tic controller.
pub const DEFAULT_ADDRESS: u8 = 14;

/// Highest address representable in 7-bit I2C addressing.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Command opcodes.
///
/// Every frame starts with one of these bytes.
pub mod opcodes {
    /// Restore drive current.
    pub const ENERGIZE: u8 = 0x85;
    /// Cut drive current.
    pub const DEENERGIZE: u8 = 0x86;
    /// Start the homing routine (1 direction byte).
    pub const GO_HOME: u8 = 0x97;
    /// Read a block of the variable table (offset byte, then a read phase).
    pub const GET_VARIABLE: u8 = 0xA1;
    /// Absolute target position (i32, little-endian).
    pub const SET_TARGET_POSITION: u8 = 0xE0;
    /// Starting speed in steps per 10,000 s (u32, little-endian).
    pub const SET_STARTING_SPEED: u8 = 0xE5;
    /// Maximum speed in steps per 10,000 s (u32, little-endian).
    pub const SET_MAX_SPEED: u8 = 0xE6;
}

/// Offsets into the variable table read with [`opcodes::GET_VARIABLE`].
pub mod variables {
    /// Miscellaneous status flags (1 byte). Bit 4 is "homing active".
    pub const MISC_FLAGS: u8 = 0x01;
    /// Motion planning mode (1 byte).
    pub const PLANNING_MODE: u8 = 0x09;
    /// Current position in steps (4 bytes, signed).
    pub const CURRENT_POSITION: u8 = 0x22;

    /// Size in bytes of the single-byte status variables.
    pub const STATUS_LEN: usize = 1;
    /// Size in bytes of the 32-bit variables.
    pub const WORD_LEN: usize = 4;
}
