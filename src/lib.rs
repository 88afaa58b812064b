//! I2C driver for the SEN54 environmental sensor node.
//!
//! The sensor reports particulate matter at four size cuts, relative
//! humidity, temperature and a VOC index. It speaks a fixed command set over
//! I2C at address `0x69`: each command is a 16-bit big-endian opcode, each
//! response word is 16 bits followed by a CRC-8, and every command requires a
//! settle delay before the sensor accepts the next one.
//!
//! The driver is generic over [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`], so it runs against any bus
//! implementation, hardware or mock. Operations take `&self` and may be
//! called from multiple threads; the session serializes commands internally
//! because the sensor cannot process more than one at a time.
//!
//! ```
//! # fn main() -> Result<(), sen54::Error<embedded_hal::i2c::ErrorKind>> {
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//! use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
//! use sen54::{Sen54, SENSOR_ADDR};
//!
//! let expectations = [Transaction::write(SENSOR_ADDR, vec![0x00, 0x21])];
//! let sensor = Sen54::new(I2cMock::new(&expectations), NoopDelay::new());
//! sensor.start_measurements()?;
//!
//! let (mut i2c, _) = sensor.release();
//! i2c.done();
//! # Ok(())
//! # }
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

mod command;
mod crc;
mod error;
mod frame;
mod types;

pub use error::Error;
pub use types::SensorReading;

use command::Command;
use frame::{split_fields, FIELD_BYTES};

/// The sensor's fixed 7-bit I2C address.
pub const SENSOR_ADDR: u8 = 0x69;

/// A session with one sensor on the bus.
///
/// Owns the bus handle and delay source for the lifetime of the session.
/// The sensor can't handle multiple commands at once, so all operations are
/// serialized through a lock scoped to this instance; callers on other
/// threads block until the in-flight command and its settle delay finish.
pub struct Sen54<I2C, D> {
    bus: Mutex<Bus<I2C, D>>,
}

struct Bus<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Sen54<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a session from an open bus handle and a delay source.
    ///
    /// The handle is not probed; a closed or unavailable bus surfaces as a
    /// [`Error::Transport`] on first use.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Sen54 {
            bus: Mutex::new(Bus { i2c, delay }),
        }
    }

    /// Switches the sensor into periodic measurement mode.
    pub fn start_measurements(&self) -> Result<(), Error<I2C::Error>> {
        self.lock().send(Command::StartMeasurement)
    }

    /// Returns the sensor to idle mode.
    pub fn stop_measurements(&self) -> Result<(), Error<I2C::Error>> {
        self.lock().send(Command::StopMeasurement)
    }

    /// Fetches and decodes the latest measurement sample.
    ///
    /// Every response field's checksum is validated before any value is
    /// scaled; a single mismatch discards the whole sample and returns
    /// [`Error::Checksum`].
    pub fn read_measurement(&self) -> Result<SensorReading, Error<I2C::Error>> {
        let mut bus = self.lock();
        let command = Command::ReadMeasurement;
        let raw = bus.read_raw(command)?;
        let fields =
            split_fields(&raw, command.response_len() / FIELD_BYTES).ok_or(Error::Framing {
                expected: command.response_len(),
                actual: raw.len(),
            })?;
        SensorReading::from_fields(&fields)
    }

    /// Consumes the session, handing back the bus and delay source.
    pub fn release(self) -> (I2C, D) {
        let bus = self
            .bus
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (bus.i2c, bus.delay)
    }

    fn lock(&self) -> MutexGuard<'_, Bus<I2C, D>> {
        // Commands are self-contained; a caller that panicked elsewhere
        // leaves the bus coherent, so the guard is recovered rather than
        // failing every later operation.
        self.bus.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I2C, D> Bus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Sends a command that returns no data, then lets the sensor settle.
    fn send(&mut self, command: Command) -> Result<(), Error<I2C::Error>> {
        debug!("sending {:#06x} ({})", command.opcode(), command.describe());
        self.i2c
            .write(SENSOR_ADDR, &command.opcode().to_be_bytes())
            .map_err(|cause| Error::Transport {
                operation: command.describe(),
                cause,
            })?;
        self.settle(command);
        Ok(())
    }

    /// Sends a command and captures its raw response, then lets the sensor
    /// settle. The combined write-then-read clocks out exactly the catalog's
    /// response length.
    fn read_raw(&mut self, command: Command) -> Result<Vec<u8>, Error<I2C::Error>> {
        debug!("sending {:#06x} ({})", command.opcode(), command.describe());
        let mut raw = vec![0u8; command.response_len()];
        self.i2c
            .write_read(SENSOR_ADDR, &command.opcode().to_be_bytes(), &mut raw)
            .map_err(|cause| Error::Transport {
                operation: command.describe(),
                cause,
            })?;
        self.settle(command);
        debug!("{} returned {:02x?}", command.describe(), raw);
        Ok(raw)
    }

    fn settle(&mut self, command: Command) {
        let ms = command.settle_ms();
        if ms > 0 {
            self.delay.delay_ms(ms);
        }
    }
}
