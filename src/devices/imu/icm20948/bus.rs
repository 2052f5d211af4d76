//! Bank-switched SPI register access
//!
//! `SpiBus` frames raw register transactions; it is private to this module
//! so every access goes through [`BankedBus`], which selects the register's
//! bank first.
//!
//! Test and mock builds also follow the bank actually selected on the wire,
//! including writes made through the raw `spi_mut` handle. A register access
//! while the wire is on another bank panics.

use super::registers::{Register, RegisterBank, ADDRESS_MASK, READ_FLAG, REG_BANK_SEL};
use crate::platform::{Result, SpiInterface};

/// Raw register transactions
struct SpiBus<SPI> {
    spi: SPI,
    /// Bank last written to REG_BANK_SEL by any path
    #[cfg(any(test, feature = "mock"))]
    wire_bank: Option<RegisterBank>,
}

impl<SPI: SpiInterface> SpiBus<SPI> {
    /// Read `buffer.len()` bytes starting at `address`
    ///
    /// One full-duplex transfer of `len + 1` bytes; the byte clocked in while
    /// the address goes out is discarded.
    fn read_into(&mut self, address: u8, buffer: &mut [u8]) -> Result<()> {
        let mut frame = vec![0u8; buffer.len() + 1];
        frame[0] = (address & ADDRESS_MASK) | READ_FLAG;
        let mut response = vec![0u8; frame.len()];
        self.spi.transfer(&frame, &mut response)?;
        buffer.copy_from_slice(&response[1..]);
        Ok(())
    }

    /// Write `payload` starting at `address`; an empty payload is a no-op
    fn write(&mut self, address: u8, payload: &[u8]) -> Result<()> {
        if payload.is_empty() {
            return Ok(());
        }
        let mut frame = Vec::with_capacity(payload.len() + 1);
        frame.push(address & ADDRESS_MASK);
        frame.extend_from_slice(payload);
        if let Err(e) = self.spi.write(&frame) {
            #[cfg(any(test, feature = "mock"))]
            observe_bank_select(&mut self.wire_bank, &frame, false);
            return Err(e);
        }
        #[cfg(any(test, feature = "mock"))]
        observe_bank_select(&mut self.wire_bank, &frame, true);
        Ok(())
    }
}

/// Follow a frame that may write REG_BANK_SEL
///
/// A failed write leaves the wire bank unknown.
#[cfg(any(test, feature = "mock"))]
fn observe_bank_select(wire_bank: &mut Option<RegisterBank>, frame: &[u8], ok: bool) {
    if let [REG_BANK_SEL, value, ..] = frame {
        *wire_bank = if ok {
            Some(RegisterBank::from_index((value & 0x30) >> 4))
        } else {
            None
        };
    }
}

/// Raw bus handle returned by `BankedBus::spi_mut`
///
/// Dereferences to the underlying bus for test setup. Transactions issued
/// through it are watched for bank selection.
#[cfg(any(test, feature = "mock"))]
pub struct RawSpi<'a, SPI> {
    spi: &'a mut SPI,
    wire_bank: &'a mut Option<RegisterBank>,
}

#[cfg(any(test, feature = "mock"))]
impl<SPI: SpiInterface> SpiInterface for RawSpi<'_, SPI> {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        let result = self.spi.transfer(write_buffer, read_buffer);
        observe_bank_select(self.wire_bank, write_buffer, result.is_ok());
        result
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        let result = self.spi.write(data);
        observe_bank_select(self.wire_bank, data, result.is_ok());
        result
    }
}

#[cfg(any(test, feature = "mock"))]
impl<SPI> core::ops::Deref for RawSpi<'_, SPI> {
    type Target = SPI;

    fn deref(&self) -> &SPI {
        self.spi
    }
}

#[cfg(any(test, feature = "mock"))]
impl<SPI> core::ops::DerefMut for RawSpi<'_, SPI> {
    fn deref_mut(&mut self) -> &mut SPI {
        self.spi
    }
}

/// Register access with bank tracking
///
/// Holds the bank last written to REG_BANK_SEL. `None` means unknown (before
/// the first selection, or after a failed selection); the next access then
/// always selects.
pub struct BankedBus<SPI> {
    raw: SpiBus<SPI>,
    current_bank: Option<RegisterBank>,
}

impl<SPI: SpiInterface> BankedBus<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self {
            raw: SpiBus {
                spi,
                #[cfg(any(test, feature = "mock"))]
                wire_bank: None,
            },
            current_bank: None,
        }
    }

    pub fn current_bank(&self) -> Option<RegisterBank> {
        self.current_bank
    }

    /// Select `bank`, skipping the write if it is already selected
    pub fn select_bank(&mut self, bank: RegisterBank) -> Result<()> {
        if self.current_bank == Some(bank) {
            return Ok(());
        }
        match self.raw.write(REG_BANK_SEL, &[bank.select_value()]) {
            Ok(()) => {
                self.current_bank = Some(bank);
                Ok(())
            }
            Err(e) => {
                self.current_bank = None;
                Err(e)
            }
        }
    }

    /// Record that the device reset itself to bank 0
    pub fn mark_reset(&mut self) {
        self.current_bank = Some(RegisterBank::Bank0);
        #[cfg(any(test, feature = "mock"))]
        {
            self.raw.wire_bank = Some(RegisterBank::Bank0);
        }
    }

    /// Read `len` bytes starting at `register`
    pub fn read_register(&mut self, register: Register, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        self.read_into(register, &mut buffer)?;
        Ok(buffer)
    }

    /// Read one byte
    pub fn read_byte(&mut self, register: Register) -> Result<u8> {
        let mut buffer = [0u8; 1];
        self.read_into(register, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Fill `buffer` starting at `register`
    pub fn read_into(&mut self, register: Register, buffer: &mut [u8]) -> Result<()> {
        self.select_bank(register.bank())?;
        self.check_bank(register);
        self.raw.read_into(register.address(), buffer)
    }

    /// Write `data` starting at `register`; an empty payload touches nothing
    pub fn write_register(&mut self, register: Register, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.select_bank(register.bank())?;
        self.check_bank(register);
        self.raw.write(register.address(), data)
    }

    pub fn spi(&self) -> &SPI {
        &self.raw.spi
    }

    /// Raw bus access, bypassing bank selection
    #[cfg(any(test, feature = "mock"))]
    pub fn spi_mut(&mut self) -> RawSpi<'_, SPI> {
        RawSpi {
            spi: &mut self.raw.spi,
            wire_bank: &mut self.raw.wire_bank,
        }
    }

    #[cfg(any(test, feature = "mock"))]
    fn check_bank(&self, register: Register) {
        assert_eq!(
            self.raw.wire_bank,
            Some(register.bank()),
            "register {:#06x} accessed while the bus is on another bank (cached {:?})",
            register.id(),
            self.current_bank
        );
    }

    #[cfg(not(any(test, feature = "mock")))]
    fn check_bank(&self, _register: Register) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::imu::icm20948::registers::{
        ACCEL_CONFIG, ACCEL_SMPLRT_DIV_2, GYRO_CONFIG_1, PWR_MGMT_1, WHO_AM_I,
    };
    use crate::platform::mock::{MockSpi, SpiTransaction};
    use crate::platform::SpiConfig;

    fn bank_selects(spi: &MockSpi) -> usize {
        spi.transactions()
            .iter()
            .filter(|t| matches!(t, SpiTransaction::Write { data } if data[0] == REG_BANK_SEL))
            .count()
    }

    #[test]
    fn test_first_access_selects_bank() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        assert_eq!(bus.current_bank(), None);

        bus.write_register(PWR_MGMT_1, &[0x01]).unwrap();
        assert_eq!(bus.current_bank(), Some(RegisterBank::Bank0));
        assert_eq!(
            bus.spi().transactions(),
            vec![
                SpiTransaction::Write {
                    data: vec![0x7F, 0x00]
                },
                SpiTransaction::Write {
                    data: vec![0x06, 0x01]
                },
            ]
        );
    }

    #[test]
    fn test_same_bank_is_selected_once() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        bus.write_register(ACCEL_CONFIG, &[0x01]).unwrap();
        bus.write_register(GYRO_CONFIG_1, &[0x01]).unwrap();
        bus.select_bank(RegisterBank::Bank2).unwrap();
        assert_eq!(bank_selects(bus.spi()), 1);
    }

    #[test]
    fn test_bank_change_emits_one_select() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        bus.select_bank(RegisterBank::Bank0).unwrap();
        bus.spi_mut().clear_transactions();

        bus.select_bank(RegisterBank::Bank3).unwrap();
        assert_eq!(
            bus.spi().transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x7F, 0x30]
            }]
        );
    }

    #[test]
    fn test_read_frame_and_dummy_byte() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        bus.mark_reset();
        bus.spi_mut().set_read_data(&[0xFF, 0xEA]);

        let id = bus.read_byte(WHO_AM_I).unwrap();
        assert_eq!(id, 0xEA);
        assert_eq!(bus.spi().transactions()[0].written(), &[0x80, 0x00]);
    }

    #[test]
    fn test_read_multiple_bytes() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        bus.mark_reset();
        bus.spi_mut().set_read_data(&[0x00, 1, 2, 3]);

        let data = bus.read_register(PWR_MGMT_1, 3).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(bus.spi().transactions()[0].written(), &[0x86, 0, 0, 0]);
    }

    #[test]
    fn test_empty_write_is_noop() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        bus.write_register(ACCEL_CONFIG, &[]).unwrap();
        assert!(bus.spi().transactions().is_empty());
        assert_eq!(bus.current_bank(), None);
    }

    #[test]
    fn test_failed_select_forgets_bank() {
        let mut bus = BankedBus::new(MockSpi::new(SpiConfig::default()));
        bus.mark_reset();
        bus.spi_mut().fail_next(1);

        assert!(bus.write_register(ACCEL_CONFIG, &[0x01]).is_err());
        assert_eq!(bus.current_bank(), None);

        bus.write_register(ACCEL_CONFIG, &[0x01]).unwrap();
        assert_eq!(bus.current_bank(), Some(RegisterBank::Bank2));
    }

    const BANKS: [RegisterBank; 4] = [
        RegisterBank::Bank0,
        RegisterBank::Bank1,
        RegisterBank::Bank2,
        RegisterBank::Bank3,
    ];

    fn tracking_bus() -> BankedBus<MockSpi> {
        BankedBus::new(MockSpi::new(SpiConfig::default()).with_bank_select(REG_BANK_SEL))
    }

    #[test]
    fn test_select_writes_for_every_bank_pair() {
        for from in BANKS {
            for to in BANKS {
                let mut bus = tracking_bus();
                bus.select_bank(from).unwrap();
                bus.spi_mut().clear_transactions();

                bus.select_bank(to).unwrap();
                let expected = if from == to {
                    vec![]
                } else {
                    vec![SpiTransaction::Write {
                        data: vec![REG_BANK_SEL, to.select_value()],
                    }]
                };
                assert_eq!(bus.spi().transactions(), expected, "{:?} -> {:?}", from, to);
                assert_eq!(bus.spi().bank(), Some(to.select_value()));
                assert_eq!(bus.current_bank(), Some(to));
            }
        }
    }

    #[test]
    fn test_data_transactions_run_on_register_bank() {
        let mut bus = tracking_bus();
        let accesses = [ACCEL_CONFIG, WHO_AM_I, GYRO_CONFIG_1, PWR_MGMT_1, ACCEL_SMPLRT_DIV_2];
        for register in accesses {
            if register.bank() == RegisterBank::Bank0 {
                bus.read_byte(register).unwrap();
            } else {
                bus.write_register(register, &[0x00]).unwrap();
            }
        }

        let spi = bus.spi();
        let data_banks: Vec<Option<u8>> = spi
            .transactions()
            .iter()
            .zip(spi.transaction_banks())
            .filter(|(t, _)| t.written()[0] != REG_BANK_SEL)
            .map(|(_, bank)| bank)
            .collect();
        let expected: Vec<Option<u8>> = accesses
            .iter()
            .map(|r| Some(r.bank().select_value()))
            .collect();
        assert_eq!(data_banks, expected);
    }

    #[test]
    #[should_panic(expected = "accessed while the bus is on another bank")]
    fn test_raw_bank_switch_fails_next_access() {
        let mut bus = tracking_bus();
        bus.select_bank(RegisterBank::Bank0).unwrap();
        bus.spi_mut()
            .write(&[REG_BANK_SEL, RegisterBank::Bank3.select_value()])
            .unwrap();

        let _ = bus.read_byte(WHO_AM_I);
    }

    #[test]
    fn test_raw_data_write_keeps_bank() {
        let mut bus = tracking_bus();
        bus.select_bank(RegisterBank::Bank0).unwrap();
        bus.spi_mut().write(&[PWR_MGMT_1.address(), 0x01]).unwrap();

        assert!(bus.read_byte(WHO_AM_I).is_ok());
        assert_eq!(bus.spi().bank(), Some(RegisterBank::Bank0.select_value()));
    }
}
