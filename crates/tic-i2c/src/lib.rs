//! # tic-i2c
//!
//! Blocking I2C driver for Tic stepper motor controllers.
//!
//! A [`TicI2c`] handle pairs a bus transport with a 7-bit device address.
//! Commands are single writes; variable reads are one combined
//! write-then-read transaction. Homing and movement waits poll the device's
//! status bytes under a [`PollPolicy`], which is unbounded by default and can
//! be limited by attempts, a deadline, or a [`CancelToken`].
//!
//! ## Transports
//!
//! - Any type implementing [`I2cTransport`], or a `&mut` borrow of one
//! - [`SharedBus`] for several devices on one bus
//! - `hal::HalBus` for `embedded-hal` 1.0 buses (requires the `embedded-hal` feature)
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use tic_i2c::prelude::*;
//!
//! /// A bus where every device is idle at position 0.
//! struct IdleBus;
//!
//! impl I2cTransport for IdleBus {
//!     type Error = std::io::Error;
//!
//!     fn write(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     fn write_read(
//!         &mut self,
//!         _address: u8,
//!         _bytes: &[u8],
//!         read_len: usize,
//!     ) -> Result<Vec<u8>, Self::Error> {
//!         Ok(vec![0; read_len])
//!     }
//! }
//!
//! # fn main() -> Result<(), TicError<std::io::Error>> {
//! let mut bus = IdleBus;
//! let mut tic = TicI2c::new(&mut bus, 14)?;
//! tic.energize()?;
//! tic.set_target_position(-200)?;
//!
//! let policy = PollPolicy::default()
//!     .with_interval(Duration::ZERO)
//!     .with_max_attempts(10);
//! let summary = tic.wait_for_movement_complete_with(&policy, None)?;
//! assert_eq!(summary.attempts, 1);
//! assert_eq!(tic.current_position()?, 0);
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod driver;
pub mod error;
pub mod poll;
pub mod prelude;
pub mod transport;

#[cfg(feature = "embedded-hal")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-hal")))]
pub mod hal;

pub use config::{PollConfig, TicConfig};
pub use driver::TicI2c;
pub use error::{ConfigError, TicError, TicResult};
pub use poll::{CancelToken, DEFAULT_POLL_INTERVAL, PollPolicy, PollSummary, WaitKind, poll_until};
pub use tic_protocol::{self as protocol, HomeDirection};
pub use transport::{I2cTransport, SharedBus};
