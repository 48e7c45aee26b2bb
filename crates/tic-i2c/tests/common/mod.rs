//! Scripted bus shared by the tic-i2c integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use tic_i2c::{I2cTransport, PollPolicy};

/// One transaction as the bus saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { address: u8, bytes: Vec<u8> },
    WriteRead { address: u8, bytes: Vec<u8>, read_len: usize },
}

/// Records every transaction and answers reads from a queue.
///
/// Once the queue is empty, reads are answered with `fallback` if set,
/// otherwise they fail with `UnexpectedEof`.
#[derive(Debug, Default)]
pub struct ScriptedBus {
    pub transactions: Vec<Transaction>,
    pub replies: VecDeque<Result<Vec<u8>, io::ErrorKind>>,
    pub fallback: Option<Vec<u8>>,
    pub fail_writes: Option<io::ErrorKind>,
}

impl ScriptedBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue single-byte status replies.
    pub fn with_status_bytes(bytes: &[u8]) -> Self {
        let mut bus = Self::new();
        for &b in bytes {
            bus.replies.push_back(Ok(vec![b]));
        }
        bus
    }

    pub fn push_reply(&mut self, bytes: &[u8]) {
        self.replies.push_back(Ok(bytes.to_vec()));
    }

    pub fn push_error(&mut self, kind: io::ErrorKind) {
        self.replies.push_back(Err(kind));
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { bytes, .. } => Some(bytes.clone()),
                Transaction::WriteRead { .. } => None,
            })
            .collect()
    }

    pub fn reads(&self) -> Vec<(Vec<u8>, usize)> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                Transaction::WriteRead {
                    bytes, read_len, ..
                } => Some((bytes.clone(), *read_len)),
                Transaction::Write { .. } => None,
            })
            .collect()
    }
}

impl I2cTransport for ScriptedBus {
    type Error = io::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if let Some(kind) = self.fail_writes {
            return Err(io::Error::new(kind, "scripted write failure"));
        }
        self.transactions.push(Transaction::Write {
            address,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        self.transactions.push(Transaction::WriteRead {
            address,
            bytes: bytes.to_vec(),
            read_len,
        });
        match self.replies.pop_front() {
            Some(Ok(data)) => Ok(data),
            Some(Err(kind)) => Err(io::Error::new(kind, "scripted read failure")),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")),
        }
    }
}

/// Unbounded policy without the inter-poll delay.
pub fn immediate() -> PollPolicy {
    PollPolicy::unbounded(Duration::ZERO)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init()
        .ok();
}
