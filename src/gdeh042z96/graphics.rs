//! Frame buffer for drawing with embedded-graphics
//!
//! [`Display4in2`] keeps the two planes in exactly the layout [`crate::Gdeh042z96::display`]
//! streams, so no conversion is needed before sending.

use embedded_graphics::prelude::*;
pub use epd_waveshare::color::TriColor;
pub use epd_waveshare::graphics::DisplayRotation;

use crate::gdeh042z96::{BUFFER_LEN, BYTES_PER_ROW, HEIGHT, WIDTH};

/// Two-plane frame buffer covering the whole 400x300 panel
///
/// - black plane: bit set = white, bit cleared = black
/// - red plane: bit set = red, bit cleared = no red
///
/// Red wins over black/white on the panel, chromatic pixels also set the white bit so they
/// look clean when only the black plane is refreshed.
pub struct Display4in2 {
    black: Vec<u8>,
    red: Vec<u8>,
    rotation: DisplayRotation,
}

impl Default for Display4in2 {
    fn default() -> Self {
        Self {
            black: vec![0xFF; BUFFER_LEN],
            red: vec![0x00; BUFFER_LEN],
            rotation: DisplayRotation::Rotate0,
        }
    }
}

impl Display4in2 {
    /// White frame, no rotation
    pub fn new() -> Self {
        Self::default()
    }

    /// get black/white plane to hand to the driver
    pub fn black_buffer(&self) -> &[u8] {
        &self.black
    }

    /// get red plane to hand to the driver
    pub fn red_buffer(&self) -> &[u8] {
        &self.red
    }

    /// Set the display rotation.
    ///
    /// This only concerns future drawing made to it. Anything aready drawn
    /// stays as it is in the buffer.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Get current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Fill the whole frame with one color
    pub fn clear_buffer(&mut self, color: TriColor) {
        let (black, red) = plane_bytes(color);
        self.black.fill(black);
        self.red.fill(red);
    }

    /// Set a specific pixel color, pixels outside the panel are ignored
    pub fn set_pixel(&mut self, pixel: Pixel<TriColor>) {
        let Pixel(point, color) = pixel;
        let width = i32::from(WIDTH);
        let height = i32::from(HEIGHT);

        let (x, y) = match self.rotation {
            DisplayRotation::Rotate0 => (point.x, point.y),
            DisplayRotation::Rotate90 => (width - 1 - point.y, point.x),
            DisplayRotation::Rotate180 => (width - 1 - point.x, height - 1 - point.y),
            DisplayRotation::Rotate270 => (point.y, height - 1 - point.x),
        };

        if x < 0 || x >= width || y < 0 || y >= height {
            return;
        }

        let index = y as usize * BYTES_PER_ROW + x as usize / 8;
        let mask = 0x80u8 >> (x as usize % 8);
        let (black, red) = plane_bytes(color);

        self.black[index] = (self.black[index] & !mask) | (black & mask);
        self.red[index] = (self.red[index] & !mask) | (red & mask);
    }
}

/// Byte patterns for a run of eight pixels of `color`, (black plane, red plane)
fn plane_bytes(color: TriColor) -> (u8, u8) {
    match color {
        TriColor::White => (0xFF, 0x00),
        TriColor::Black => (0x00, 0x00),
        TriColor::Chromatic => (0xFF, 0xFF),
    }
}

/// For use with embedded_grahics
impl DrawTarget for Display4in2 {
    type Color = TriColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_pixel(pixel);
        }
        Ok(())
    }
}

/// For use with embedded_grahics
impl OriginDimensions for Display4in2 {
    fn size(&self) -> Size {
        let (w, h) = (u32::from(WIDTH), u32::from(HEIGHT));
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => Size::new(w, h),
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => Size::new(h, w),
        }
    }
}
