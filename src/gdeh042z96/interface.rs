//! Display interface using SPI
use crate::gdeh042z96::error::{DisplayError, Error};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Reset line hold time before and after the pulse
pub const RESET_DELAY_MS: u32 = 200;
/// Minimum LOW pulse on the reset line
pub const RESET_PULSE_MS: u32 = 2;
/// Sleep between two reads of the BUSY pin
pub const BUSY_POLL_INTERVAL_MS: u32 = 10;

/// The connection to the panel: SPI device plus control lines
///
/// Chip-select belongs to the [`SpiDevice`], which asserts it for each transaction. Every byte
/// is written as its own transaction, so CS is released between all command and data bytes.
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// High for busy, Wait until display is ready!
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider for reset timing and busy polling
    delay: DELAY,
    /// Give up waiting on BUSY after this many milliseconds, `None` waits forever
    busy_timeout_ms: Option<u32>,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// Create the interface, nothing is sent yet
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            busy_timeout_ms: None,
        }
    }

    /// Bound the busy wait, `None` restores the unbounded wait
    pub fn set_busy_timeout(&mut self, timeout_ms: Option<u32>) {
        self.busy_timeout_ms = timeout_ms;
    }

    /// Currently configured busy timeout
    pub fn busy_timeout(&self) -> Option<u32> {
        self.busy_timeout_ms
    }
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.data_iter(data.iter().copied())
    }

    /// Send every byte produced by `bytes` as data
    pub(crate) fn data_iter<I>(&mut self, bytes: I) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = u8>,
    {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        for byte in bytes {
            self.spi.write(&[byte]).map_err(|e| {
                log::error!("SPI write error for data byte 0x{:02X}: {:?}", byte, e);
                DisplayError::BusWriteError
            })?;
        }
        Ok(())
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    /// Used for setting one color for the whole frame
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: usize) -> Result<(), DisplayError> {
        self.data_iter(core::iter::repeat(val).take(repetitions))?;
        log::debug!("Completed sending {} bytes of 0x{:02X}", repetitions, val);
        Ok(())
    }

    /// Block until the BUSY pin reads LOW, polling every [`BUSY_POLL_INTERVAL_MS`]
    pub(crate) fn wait_until_idle(&mut self) -> Result<(), Error> {
        log::info!("e-Paper busy");

        let mut waited_ms = 0u32;
        while self.busy.is_high().map_err(|_| Error::BusyPin)? {
            if let Some(limit) = self.busy_timeout_ms {
                if waited_ms >= limit {
                    log::error!("e-Paper still busy after {} ms, giving up", waited_ms);
                    return Err(Error::BusyTimeout { waited_ms });
                }
            }
            self.delay.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms = waited_ms.saturating_add(BUSY_POLL_INTERVAL_MS);
        }

        log::info!("e-Paper busy release");
        Ok(())
    }

    /// Resets the device: HIGH, pulse LOW, HIGH again with settle time on both sides
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}
