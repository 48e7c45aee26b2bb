//! Prelude for tic-i2c.
//!
//! Re-exports the handle, its transports, and the wait types.

pub use crate::config::{PollConfig, TicConfig};
pub use crate::driver::TicI2c;
pub use crate::error::{ConfigError, TicError, TicResult};
pub use crate::poll::{CancelToken, PollPolicy, PollSummary, WaitKind};
pub use crate::transport::{I2cTransport, SharedBus};
pub use tic_protocol::HomeDirection;

#[cfg(feature = "embedded-hal")]
#[cfg_attr(docsrs, doc(cfg(feature = "embedded-hal")))]
pub use crate::hal::{HalBus, HalBusError};
