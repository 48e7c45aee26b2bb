//! Tic driver error types.
//!
//! [`TicError`] is generic over the transport's error type so that a failed
//! bus transaction reaches the caller exactly as the transport reported it.

use std::time::Duration;

use thiserror::Error;
use tic_protocol::ProtocolError;

use crate::poll::WaitKind;

/// Errors produced while building or validating a driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid I2C address 0x{0:02X}: 7-bit addresses end at 0x7F")]
    InvalidAddress(u8),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Poll attempt limit must be at least 1")]
    ZeroAttempts,
}

/// Errors returned by [`TicI2c`](crate::TicI2c) operations.
#[derive(Debug, Error)]
pub enum TicError<E> {
    /// The bus transaction itself failed (absent device, NACK, contention).
    #[error("Bus transaction failed: {0}")]
    Transport(#[source] E),

    /// A variable read returned a different byte count than requested.
    #[error("Variable 0x{offset:02X} read returned {actual} bytes, expected {expected}")]
    LengthMismatch {
        offset: u8,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The poll deadline passed before the device finished.
    #[error("Timed out waiting for {kind} after {attempts} polls ({elapsed:?})")]
    WaitTimedOut {
        kind: WaitKind,
        attempts: u32,
        elapsed: Duration,
    },

    /// The poll attempt limit was reached before the device finished.
    #[error("Gave up waiting for {kind} after {attempts} polls")]
    WaitExhausted { kind: WaitKind, attempts: u32 },

    /// The wait was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("Wait for {kind} cancelled after {attempts} polls")]
    WaitCancelled { kind: WaitKind, attempts: u32 },
}

impl<E> TicError<E> {
    /// Whether this error came from the bus rather than from the driver.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether this error ended a bounded or cancellable wait.
    pub fn is_wait_aborted(&self) -> bool {
        matches!(
            self,
            Self::WaitTimedOut { .. } | Self::WaitExhausted { .. } | Self::WaitCancelled { .. }
        )
    }

    /// The transport error, if this is one.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

pub type TicResult<T, E> = Result<T, TicError<E>>;
