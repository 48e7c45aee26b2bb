//! Tic device handle: commands, variable reads, and status waits.

use tic_protocol::{self as proto, CommandFrame, HomeDirection, variables};
use tracing::{debug, trace};

use crate::config::{TicConfig, validate_address};
use crate::error::{TicError, TicResult};
use crate::poll::{CancelToken, PollPolicy, PollSummary, WaitKind, poll_until};
use crate::transport::I2cTransport;

/// A Tic controller at a fixed address on an I2C bus.
///
/// The handle keeps no device state: every accessor issues a fresh read.
/// Movement commands are not interlocked; callers should wait for a move
/// to finish (see [`wait_for_movement_complete`](Self::wait_for_movement_complete))
/// before sending the next target.
#[derive(Debug)]
pub struct TicI2c<T> {
    bus: T,
    address: u8,
    poll: PollPolicy,
}

impl<T: I2cTransport> TicI2c<T> {
    /// Bind to `address` with the default, unbounded polling policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`](crate::ConfigError::InvalidAddress)
    /// for addresses above 0x7F.
    pub fn new(bus: T, address: u8) -> TicResult<Self, T::Error> {
        validate_address(address)?;
        debug!("Created Tic handle at I2C address 0x{:02X}", address);
        Ok(Self {
            bus,
            address,
            poll: PollPolicy::default(),
        })
    }

    /// Bind using a validated [`TicConfig`].
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn with_config(bus: T, config: &TicConfig) -> TicResult<Self, T::Error> {
        config.validate()?;
        let mut tic = Self::new(bus, config.address)?;
        tic.poll = config.poll.to_policy();
        Ok(tic)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Policy used by [`wait_for_homing_complete`](Self::wait_for_homing_complete)
    /// and [`wait_for_movement_complete`](Self::wait_for_movement_complete).
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll
    }

    /// Give the bus handle back.
    pub fn release(self) -> T {
        self.bus
    }

    fn send(&mut self, frame: CommandFrame) -> TicResult<(), T::Error> {
        trace!("Tic 0x{:02X} <- {:02X?}", self.address, frame.as_bytes());
        self.bus
            .write(self.address, frame.as_bytes())
            .map_err(TicError::Transport)
    }

    /// Cut motor current. The device flags its position as uncertain once
    /// it is energized again.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn deenergize(&mut self) -> TicResult<(), T::Error> {
        debug!("Tic 0x{:02X}: deenergize", self.address);
        self.send(proto::deenergize())
    }

    /// Restore motor current. After a deenergize the position stays
    /// uncertain until the device is homed.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn energize(&mut self) -> TicResult<(), T::Error> {
        debug!("Tic 0x{:02X}: energize", self.address);
        self.send(proto::energize())
    }

    /// Move to an absolute position in steps.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn set_target_position(&mut self, target: i32) -> TicResult<(), T::Error> {
        debug!("Tic 0x{:02X}: target position {}", self.address, target);
        self.send(proto::set_target_position(target))
    }

    /// Start homing. The direction byte is sent unvalidated.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn home(&mut self, direction: u8) -> TicResult<(), T::Error> {
        debug!("Tic 0x{:02X}: home, direction {}", self.address, direction);
        self.send(proto::home(direction))
    }

    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn home_in(&mut self, direction: HomeDirection) -> TicResult<(), T::Error> {
        self.home(direction.to_u8())
    }

    /// Maximum speed in steps per 10,000 s. Held in RAM only; a device
    /// reset restores the stored setting.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn set_max_speed(&mut self, speed: u32) -> TicResult<(), T::Error> {
        debug!("Tic 0x{:02X}: max speed {}", self.address, speed);
        self.send(proto::set_max_speed(speed))
    }

    /// Starting speed in steps per 10,000 s. RAM only, like the max speed.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the write fails.
    pub fn set_starting_speed(&mut self, speed: u32) -> TicResult<(), T::Error> {
        debug!("Tic 0x{:02X}: starting speed {}", self.address, speed);
        self.send(proto::set_starting_speed(speed))
    }

    /// Read `length` raw bytes of the variable table starting at `offset`.
    ///
    /// The request byte pair and the read happen in one combined
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TicError::Transport`] if the transaction fails, or
    /// [`TicError::LengthMismatch`] if the transport returned a different
    /// number of bytes than requested.
    pub fn read_variables(&mut self, offset: u8, length: usize) -> TicResult<Vec<u8>, T::Error> {
        let request = proto::get_variables(offset);
        let data = self
            .bus
            .write_read(self.address, request.as_bytes(), length)
            .map_err(TicError::Transport)?;
        trace!(
            "Tic 0x{:02X} variable 0x{:02X} -> {:02X?}",
            self.address, offset, data
        );

        if data.len() != length {
            return Err(TicError::LengthMismatch {
                offset,
                expected: length,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn read_u8(&mut self, offset: u8) -> TicResult<u8, T::Error> {
        let data = self.read_variables(offset, variables::STATUS_LEN)?;
        Ok(proto::decode_u8(&data)?)
    }

    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn read_u32(&mut self, offset: u8) -> TicResult<u32, T::Error> {
        let data = self.read_variables(offset, variables::WORD_LEN)?;
        Ok(proto::decode_u32_le(&data)?)
    }

    /// Signed 32-bit variable with two's-complement normalization.
    ///
    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn read_i32(&mut self, offset: u8) -> TicResult<i32, T::Error> {
        let data = self.read_variables(offset, variables::WORD_LEN)?;
        Ok(proto::decode_i32_le(&data)?)
    }

    /// Current position in steps.
    ///
    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn current_position(&mut self) -> TicResult<i32, T::Error> {
        self.read_i32(variables::CURRENT_POSITION)
    }

    /// Raw misc-flags byte.
    ///
    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn misc_flags(&mut self) -> TicResult<u8, T::Error> {
        self.read_u8(variables::MISC_FLAGS)
    }

    /// Raw motion planning mode byte.
    ///
    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn planning_mode(&mut self) -> TicResult<u8, T::Error> {
        self.read_u8(variables::PLANNING_MODE)
    }

    /// One homing status poll: `true` while homing is still running.
    ///
    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn poll_homing(&mut self) -> TicResult<bool, T::Error> {
        self.misc_flags().map(proto::homing_in_progress)
    }

    /// One movement status poll: `true` while a move is still running.
    ///
    /// # Errors
    ///
    /// See [`read_variables`](Self::read_variables).
    pub fn poll_movement(&mut self) -> TicResult<bool, T::Error> {
        self.planning_mode().map(proto::movement_in_progress)
    }

    /// Block until homing finishes, using the handle's polling policy.
    ///
    /// With the default policy this never gives up.
    ///
    /// # Errors
    ///
    /// Returns the first failed poll's error, or a wait error if the
    /// handle's policy is bounded and runs out.
    pub fn wait_for_homing_complete(&mut self) -> TicResult<PollSummary, T::Error> {
        let policy = self.poll;
        self.wait_for_homing_complete_with(&policy, None)
    }

    /// Block until homing finishes or `policy`/`cancel` stops the wait.
    ///
    /// # Errors
    ///
    /// See [`poll_until`].
    pub fn wait_for_homing_complete_with(
        &mut self,
        policy: &PollPolicy,
        cancel: Option<&CancelToken>,
    ) -> TicResult<PollSummary, T::Error> {
        debug!("Tic 0x{:02X}: waiting for homing", self.address);
        poll_until(WaitKind::Homing, policy, cancel, || self.poll_homing())
    }

    /// Block until the current move finishes, using the handle's policy.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_homing_complete`](Self::wait_for_homing_complete).
    pub fn wait_for_movement_complete(&mut self) -> TicResult<PollSummary, T::Error> {
        let policy = self.poll;
        self.wait_for_movement_complete_with(&policy, None)
    }

    /// # Errors
    ///
    /// See [`poll_until`].
    pub fn wait_for_movement_complete_with(
        &mut self,
        policy: &PollPolicy,
        cancel: Option<&CancelToken>,
    ) -> TicResult<PollSummary, T::Error> {
        debug!("Tic 0x{:02X}: waiting for movement", self.address);
        poll_until(WaitKind::Movement, policy, cancel, || self.poll_movement())
    }
}
