//! GDEH042Z96 Display Driver Implementation
//!
//! This module contains the command sequences that take the panel from reset to a refreshed
//! image and back to deep sleep.
//!
//! ## Sequences
//!
//! - `init()` - Hardware reset, software reset, scan direction and full RAM window
//! - `clear()` - White black/white RAM, empty red RAM, full refresh
//! - `display()` - Both planes, full refresh
//! - `display_partial()` - Black plane only, fast refresh
//! - `sleep()` - Deep sleep mode 1
//!
//! ## Critical Implementation Details
//!
//! ### No LUT or voltage setup
//!
//! `init()` leaves booster, VCOM and LUT registers at their power-on defaults. The panel then
//! refreshes with its built-in waveform. Some refreshes flash more than with a tuned LUT.
//!
//! ### Display Update Value (0xF7 / 0xFF vs 0xC7)
//!
//! The datasheet suggests `0xC7` for Display Update Control 2. This panel is driven with `0xF7`
//! for full and `0xFF` for partial refreshes, stored in [`Flag`].
//!
//! ### Red Polarity
//!
//! Red RAM treats a cleared bit as red. Callers set a bit for red, so every red byte is
//! inverted on the way out. Do not pre-invert.
//!
//! ### BUSY Pin Wait
//!
//! After reset, software reset and `MASTER_ACTIVATE` the driver **must** wait for BUSY to
//! go LOW before sending anything else. By default that wait has no upper bound, see
//! [`Gdeh042z96::with_busy_timeout`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::gdeh042z96::error::{Error, Plane};
use crate::gdeh042z96::interface::DisplayInterface;
use crate::gdeh042z96::{cmd::Cmd, flag::Flag, BUFFER_LEN, HEIGHT, WIDTH};

/// GDEH042Z96 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication, owns chip-select
/// - `BSY` - BUSY input pin (HIGH when display is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Gdeh042z96<SPI, BSY, DC, RST, DELAY> {
    /// The display interface
    interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>,
}

impl<SPI, BSY, DC, RST, DELAY> Gdeh042z96<SPI, BSY, DC, RST, DELAY> {
    /// Create the driver. The panel is not touched until [`Gdeh042z96::init`].
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        Gdeh042z96 {
            interface: DisplayInterface::new(spi, busy, dc, rst, delay),
        }
    }

    /// Create a new instance from an existing interface without initialization
    pub fn from_interface(interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>) -> Self {
        Gdeh042z96 { interface }
    }

    /// Fail busy waits that last longer than `timeout_ms` instead of blocking forever
    pub fn with_busy_timeout(mut self, timeout_ms: u32) -> Self {
        self.interface.set_busy_timeout(Some(timeout_ms));
        self
    }

    /// Change the busy timeout, `None` waits forever
    pub fn set_busy_timeout(&mut self, timeout_ms: Option<u32>) {
        self.interface.set_busy_timeout(timeout_ms);
    }
}

impl<SPI, BSY, DC, RST, DELAY> Gdeh042z96<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Pulse the reset line: HIGH 200 ms, LOW 2 ms, HIGH 200 ms
    pub fn reset(&mut self) -> Result<(), Error> {
        self.interface.reset()?;
        Ok(())
    }

    /// Wait for BUSY pin to go LOW
    pub fn wait_busy(&mut self) -> Result<(), Error> {
        self.interface.wait_until_idle()
    }

    /// Bring the controller into a known state, ready for RAM writes
    ///
    /// Also the only way out of deep sleep.
    pub fn init(&mut self) -> Result<(), Error> {
        log::info!("Initializing GDEH042Z96");

        self.interface.reset()?;
        self.interface.wait_until_idle()?;

        self.interface.cmd(Cmd::SW_RESET)?;
        self.interface.wait_until_idle()?;

        self.interface
            .cmd_with_data(Cmd::DATA_ENTRY_MODE, &[Flag::DATA_ENTRY_INCRY_INCRX])?;

        self.use_full_frame()?;
        self.interface.wait_until_idle()?;

        log::info!("GDEH042Z96 init complete");
        Ok(())
    }

    /// Fill the black/white RAM with white and the red RAM with no red, then refresh
    pub fn clear(&mut self) -> Result<(), Error> {
        log::info!("Clearing display to white");

        self.interface.cmd(Cmd::WRITE_BW_DATA)?;
        self.interface.data_x_times(Flag::RAM_FILL_WHITE, BUFFER_LEN)?;

        self.interface.cmd(Cmd::WRITE_RED_DATA)?;
        self.interface.data_x_times(Flag::RAM_FILL_NO_RED, BUFFER_LEN)?;

        self.trigger_display_update(Flag::DISPLAY_UPDATE_FULL)?;

        log::info!("Clear complete");
        Ok(())
    }

    /// Write both planes and run a full refresh
    ///
    /// A missing black plane is sent as white, a missing red plane as no red.
    /// Buffers must be exactly [`BUFFER_LEN`] bytes; nothing is sent otherwise.
    pub fn display(&mut self, black: Option<&[u8]>, red: Option<&[u8]>) -> Result<(), Error> {
        check_len(Plane::Black, black)?;
        check_len(Plane::Red, red)?;
        log::info!(
            "Full refresh (black: {}, red: {})",
            black.is_some(),
            red.is_some()
        );

        self.write_black_plane(black)?;

        self.interface.cmd(Cmd::WRITE_RED_DATA)?;
        match red {
            Some(buffer) => self.interface.data_iter(buffer.iter().map(|b| !b))?,
            None => self
                .interface
                .data_x_times(Flag::RAM_FILL_NO_RED, BUFFER_LEN)?,
        }

        self.trigger_display_update(Flag::DISPLAY_UPDATE_FULL)?;

        log::info!("Full refresh complete");
        Ok(())
    }

    /// Write the black plane only and run the faster partial-style refresh
    ///
    /// Red RAM keeps what the last full refresh put there. The whole panel area is rewritten.
    pub fn display_partial(&mut self, black: Option<&[u8]>) -> Result<(), Error> {
        check_len(Plane::Black, black)?;
        log::info!("Partial refresh");

        self.interface
            .cmd_with_data(Cmd::BORDER_WAVEFORM_CONTROL, &[Flag::BORDER_WAVEFORM_PARTIAL])?;
        self.interface.cmd_with_data(
            Cmd::DISPLAY_UPDATE_CTRL1,
            &Flag::DISPLAY_UPDATE_CTRL1_PARTIAL,
        )?;

        self.use_full_frame()?;
        self.write_black_plane(black)?;

        self.trigger_display_update(Flag::DISPLAY_UPDATE_PARTIAL)?;

        log::info!("Partial refresh complete");
        Ok(())
    }

    /// Put device into deep sleep mode to save power
    ///
    /// The panel does not signal sleep entry on BUSY, so there is no wait. Call
    /// [`Gdeh042z96::init`] before sending anything else.
    pub fn sleep(&mut self) -> Result<(), Error> {
        log::info!("Putting display into deep sleep mode");
        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP_MODE, &[Flag::DEEP_SLEEP_MODE_1])?;
        Ok(())
    }

    /// Program the RAM window, X in pixels (sent as 8-pixel columns), Y in rows
    pub fn set_window(
        &mut self,
        start_x: u16,
        start_y: u16,
        end_x: u16,
        end_y: u16,
    ) -> Result<(), Error> {
        self.interface.cmd_with_data(
            Cmd::SET_RAMXPOS,
            &[(start_x >> 3) as u8, (end_x >> 3) as u8],
        )?;

        // 2 Databytes each: A[7:0] & 0..A[8]
        self.interface.cmd_with_data(
            Cmd::SET_RAMYPOS,
            &[
                start_y as u8,
                (start_y >> 8) as u8,
                end_y as u8,
                (end_y >> 8) as u8,
            ],
        )?;
        Ok(())
    }

    /// Move the RAM write pointer
    pub fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), Error> {
        // x is positioned in bytes, so the last 3 bits which show the position inside a byte
        // in the ram aren't relevant
        self.interface
            .cmd_with_data(Cmd::SET_RAMX_COUNTER, &[(x >> 3) as u8])?;
        self.interface
            .cmd_with_data(Cmd::SET_RAMY_COUNTER, &[y as u8, (y >> 8) as u8])?;
        Ok(())
    }

    /// Direct command access
    pub fn direct_cmd(&mut self, command: u8) -> Result<(), Error> {
        self.interface.cmd(command)?;
        Ok(())
    }

    /// Direct data access
    pub fn direct_data(&mut self, data: &[u8]) -> Result<(), Error> {
        self.interface.data(data)?;
        Ok(())
    }

    fn use_full_frame(&mut self) -> Result<(), Error> {
        // choose full frame/ram
        self.set_window(0, 0, WIDTH - 1, HEIGHT - 1)?;

        // start from the beginning
        self.set_cursor(0, 0)
    }

    fn write_black_plane(&mut self, black: Option<&[u8]>) -> Result<(), Error> {
        self.interface.cmd(Cmd::WRITE_BW_DATA)?;
        match black {
            Some(buffer) => self.interface.data(buffer)?,
            None => self
                .interface
                .data_x_times(Flag::RAM_FILL_WHITE, BUFFER_LEN)?,
        }
        Ok(())
    }

    /// Trigger display update with specified control value and wait for completion
    fn trigger_display_update(&mut self, ctrl2_value: u8) -> Result<(), Error> {
        self.interface
            .cmd_with_data(Cmd::DISPLAY_UPDATE_CTRL2, &[ctrl2_value])?;
        self.interface.cmd(Cmd::MASTER_ACTIVATE)?;
        self.interface.wait_until_idle()
    }
}

fn check_len(plane: Plane, buffer: Option<&[u8]>) -> Result<(), Error> {
    match buffer {
        Some(b) if b.len() != BUFFER_LEN => {
            log::error!(
                "{:?} plane is {} bytes, expected {}",
                plane,
                b.len(),
                BUFFER_LEN
            );
            Err(Error::BufferLength {
                plane,
                expected: BUFFER_LEN,
                actual: b.len(),
            })
        }
        _ => Ok(()),
    }
}
