//! Mock SPI implementation for testing

use crate::platform::{
    traits::{SpiConfig, SpiInterface},
    PlatformError, Result, SpiError,
};
use core::cell::RefCell;
use std::vec::Vec;

/// SPI transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiTransaction {
    /// Transfer (full-duplex)
    Transfer { write: Vec<u8>, read: Vec<u8> },
    /// Write only
    Write { data: Vec<u8> },
}

impl SpiTransaction {
    /// Bytes clocked out by the controller
    pub fn written(&self) -> &[u8] {
        match self {
            SpiTransaction::Transfer { write, .. } => write,
            SpiTransaction::Write { data } => data,
        }
    }
}

/// Mock SPI implementation
///
/// Records all transactions for test verification and allows
/// pre-programming read data and transfer failures.
///
/// With [`with_bank_select`](Self::with_bank_select) the mock also follows
/// the device's register bank: the last value written to that register is
/// the selected bank, and each logged transaction records the bank it was
/// issued under.
#[derive(Debug)]
pub struct MockSpi {
    config: SpiConfig,
    transactions: RefCell<Vec<SpiTransaction>>,
    read_data: RefCell<Vec<u8>>,
    failures: u32,
    bank_select: Option<u8>,
    bank: Option<u8>,
    transaction_banks: RefCell<Vec<Option<u8>>>,
}

impl MockSpi {
    /// Create a new mock SPI
    pub fn new(config: SpiConfig) -> Self {
        Self {
            config,
            transactions: RefCell::new(Vec::new()),
            read_data: RefCell::new(Vec::new()),
            failures: 0,
            bank_select: None,
            bank: None,
            transaction_banks: RefCell::new(Vec::new()),
        }
    }

    /// Track bank selection through writes to `register`
    pub fn with_bank_select(mut self, register: u8) -> Self {
        self.bank_select = Some(register);
        self
    }

    /// Last value written to the bank select register
    pub fn bank(&self) -> Option<u8> {
        self.bank
    }

    /// Bank select value in effect for each logged transaction
    pub fn transaction_banks(&self) -> Vec<Option<u8>> {
        self.transaction_banks.borrow().clone()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<SpiTransaction> {
        self.transactions.borrow().clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.borrow_mut().clear();
        self.transaction_banks.borrow_mut().clear();
    }

    /// Set data to return for read operations
    pub fn set_read_data(&mut self, data: &[u8]) {
        *self.read_data.borrow_mut() = data.to_vec();
    }

    /// Append data to return for read operations
    pub fn queue_read_data(&mut self, data: &[u8]) {
        self.read_data.borrow_mut().extend_from_slice(data);
    }

    /// Fail the next `count` operations with `SpiError::TransferFailed`
    pub fn fail_next(&mut self, count: u32) {
        self.failures = count;
    }

    /// Get the configuration the bus was opened with
    pub fn config(&self) -> SpiConfig {
        self.config
    }

    fn take_failure(&mut self) -> Result<()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        Ok(())
    }

    fn log(&mut self, transaction: SpiTransaction) {
        let frame = transaction.written();
        let value = match (self.bank_select, frame) {
            (Some(register), [first, value, ..]) if *first == register => Some(*value),
            _ => None,
        };

        self.transaction_banks.borrow_mut().push(self.bank);
        self.transactions.borrow_mut().push(transaction);
        if value.is_some() {
            self.bank = value;
        }
    }

    fn fill(&self, buffer: &mut [u8]) {
        let mut read_data = self.read_data.borrow_mut();
        let to_read = core::cmp::min(buffer.len(), read_data.len());
        buffer[..to_read].copy_from_slice(&read_data[..to_read]);
        read_data.drain(..to_read);
    }
}

impl SpiInterface for MockSpi {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        if write_buffer.len() != read_buffer.len() {
            return Err(PlatformError::Spi(SpiError::LengthMismatch));
        }
        self.take_failure()?;
        self.fill(read_buffer);

        self.log(SpiTransaction::Transfer {
            write: write_buffer.to_vec(),
            read: read_buffer.to_vec(),
        });
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.take_failure()?;
        self.log(SpiTransaction::Write {
            data: data.to_vec(),
        });
        Ok(())
    }
}
