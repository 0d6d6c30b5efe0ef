//! GDEH042Z96 ePaper Display Driver
//!
//! Used with the 4.2" 400x300 black/white/red panel from Good Display, which is driven by an
//! SSD1683-family controller.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers, trimmed down to the command
//! sequences this one panel needs.
//!
//! ### Usage
//! The driver does not own any frame buffer. To display something you:
//!
//! 1. draw onto a [`graphics::Display4in2`], preferably
//! with [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics).
//! 1. call [`driver::Gdeh042z96::init`] once after power-up or deep sleep
//! 1. send both planes with [`driver::Gdeh042z96::display`], or only the black plane with
//!    [`driver::Gdeh042z96::display_partial`] for a faster refresh
//! 1. put the panel to rest with [`driver::Gdeh042z96::sleep`]
//!
//! ### Buffer format
//! Each plane is row-major with one bit per pixel, most significant bit leftmost.
//! In the black plane a set bit is white. In the red plane a set bit is red; the driver
//! inverts the red plane on the wire because the controller RAM uses the opposite polarity.

pub mod cmd;
pub mod driver;
pub mod error;
pub mod flag;
pub mod graphics;
pub mod interface;

#[cfg(test)]
pub(crate) mod mock;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 400;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 300;

/// Bytes in one pixel row of a plane, one bit per pixel
pub const BYTES_PER_ROW: usize = (WIDTH as usize).div_ceil(8);

/// Length in bytes of one full color plane
pub const BUFFER_LEN: usize = BYTES_PER_ROW * HEIGHT as usize;
