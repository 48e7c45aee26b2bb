//! Bus transport abstraction and the shared-bus wrapper.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// A bus capable of addressed writes and combined write-then-read
/// transactions.
///
/// The driver only ever borrows a transport; opening and closing the bus is
/// up to the caller. Implementations own any low-level retry.
pub trait I2cTransport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// One addressed write transaction.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Write `bytes`, then read `read_len` bytes, as a single transaction.
    ///
    /// No other bus traffic may occur between the two phases: the device
    /// resets its read pointer at transaction boundaries.
    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, Self::Error>;
}

impl<T: I2cTransport + ?Sized> I2cTransport for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        (**self).write_read(address, bytes, read_len)
    }
}

/// A transport shared between several device handles.
///
/// Each transaction holds the lock for its full duration, so a combined
/// write-then-read from one handle can never interleave with traffic from
/// another. Clones refer to the same bus.
#[derive(Debug)]
pub struct SharedBus<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SharedBus<T> {
    pub fn new(bus: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bus)),
        }
    }

    /// Exclusive access for a sequence of raw transactions.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// Number of live handles to this bus.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Recover the bus once every other handle has been dropped.
    pub fn try_into_inner(self) -> Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for SharedBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: I2cTransport> I2cTransport for SharedBus<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.inner.lock().write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        self.inner.lock().write_read(address, bytes, read_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        log: Vec<(u8, Vec<u8>)>,
    }

    impl I2cTransport for Recorder {
        type Error = std::io::Error;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
            self.log.push((address, bytes.to_vec()));
            Ok(())
        }

        fn write_read(
            &mut self,
            address: u8,
            bytes: &[u8],
            read_len: usize,
        ) -> Result<Vec<u8>, Self::Error> {
            self.log.push((address, bytes.to_vec()));
            Ok(vec![0; read_len])
        }
    }

    fn energize_then_read<T: I2cTransport>(mut bus: T) -> Result<Vec<u8>, T::Error> {
        bus.write(0x0E, &[0x85])?;
        bus.write_read(0x0E, &[0xA1, 0x22], 4)
    }

    #[test]
    fn test_mut_ref_forwards() -> Result<(), std::io::Error> {
        let mut bus = Recorder::default();
        assert_eq!(energize_then_read(&mut bus)?.len(), 4);
        assert_eq!(bus.log.len(), 2);
        Ok(())
    }

    #[test]
    fn test_shared_bus_clones_share_state() -> Result<(), std::io::Error> {
        let shared = SharedBus::new(Recorder::default());
        let mut a = shared.clone();
        let mut b = shared.clone();
        a.write(0x0E, &[0x85])?;
        b.write(0x0F, &[0x86])?;
        assert_eq!(shared.handle_count(), 3);
        assert_eq!(shared.lock().log, vec![(0x0E, vec![0x85]), (0x0F, vec![0x86])]);
        Ok(())
    }

    #[test]
    fn test_try_into_inner_requires_sole_handle() {
        let shared = SharedBus::new(Recorder::default());
        let extra = shared.clone();
        let shared = shared.try_into_inner().err();
        assert!(shared.is_some());
        drop(extra);
        assert!(shared.and_then(|s| s.try_into_inner().ok()).is_some());
    }
}
