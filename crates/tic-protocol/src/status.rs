//! Interpretation of the status bytes polled while waiting on the device.
//!
//! Both checks compare a shifted status byte against literal values rather
//! than masking a single flag bit. The comparisons are kept exactly as the
//! controller integration has always used them:
//!
//! - misc flags `>> 4 == 1` means homing is still running, so any other
//!   result (0, 2, 3, ...) counts as finished;
//! - planning mode `>> 1` of 1 or 2 means a move is still running.
//!
//! These have not been checked against the firmware's bit definitions on
//! hardware; do not "fix" them to a mask without doing so.

/// Shift applied to the misc-flags byte before comparison.
pub const HOMING_SHIFT: u32 = 4;

/// Shift applied to the planning-mode byte before comparison.
pub const PLANNING_SHIFT: u32 = 1;

/// `true` while the device reports that homing is still in progress.
#[inline]
pub fn homing_in_progress(misc_flags: u8) -> bool {
    (misc_flags >> HOMING_SHIFT) == 0x01
}

/// `true` while the device reports that a move is still in progress.
#[inline]
pub fn movement_in_progress(planning_mode: u8) -> bool {
    matches!(planning_mode >> PLANNING_SHIFT, 0x01 | 0x02)
}
