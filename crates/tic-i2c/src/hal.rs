//! [`I2cTransport`] for any `embedded-hal` 1.0 blocking I2C bus.
//!
//! `write_read` maps onto `I2c::write_read`, which the HAL contract defines
//! as one transaction with a repeated start between the phases.

use std::fmt::Debug;

use embedded_hal::i2c::{Error as HalError, ErrorKind, I2c, SevenBitAddress};
use thiserror::Error;

use crate::transport::I2cTransport;

/// Error from the wrapped HAL bus, with its classified kind.
#[derive(Debug, Error)]
#[error("I2C bus error ({kind:?}): {cause:?}")]
pub struct HalBusError<E: Debug> {
    pub kind: ErrorKind,
    pub cause: E,
}

impl<E: HalError> HalBusError<E> {
    fn from_hal(cause: E) -> Self {
        Self {
            kind: cause.kind(),
            cause,
        }
    }
}

/// Adapter from an `embedded-hal` bus to [`I2cTransport`].
#[derive(Debug)]
pub struct HalBus<I> {
    i2c: I,
}

impl<I> HalBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I> I2cTransport for HalBus<I>
where
    I: I2c<SevenBitAddress>,
    I::Error: Send + Sync + 'static,
{
    type Error = HalBusError<I::Error>;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes).map_err(HalBusError::from_hal)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        let mut buffer = vec![0u8; read_len];
        self.i2c
            .write_read(address, bytes, &mut buffer)
            .map_err(HalBusError::from_hal)?;
        Ok(buffer)
    }
}
