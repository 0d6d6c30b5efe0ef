//! Driver for the GDEH042Z96 4.2" black/white/red e-paper panel
//!
//! See [`gdeh042z96`] for the protocol notes and usage.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod gdeh042z96;

pub use crate::gdeh042z96::cmd::Cmd;
pub use crate::gdeh042z96::flag::Flag;

pub use crate::gdeh042z96::driver::Gdeh042z96;
pub use crate::gdeh042z96::error::{DisplayError, Error, Plane};
pub use crate::gdeh042z96::interface::DisplayInterface;

pub use crate::gdeh042z96::graphics::{Display4in2, DisplayRotation, TriColor};
pub use crate::gdeh042z96::{BUFFER_LEN, BYTES_PER_ROW, HEIGHT, WIDTH};
