//! Errors returned by the driver sequences

use core::fmt;

pub use display_interface::DisplayError;

/// Which RAM plane a buffer was meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Black/white RAM (0x24)
    Black,
    /// Red RAM (0x26)
    Red,
}

/// Driver error
#[derive(Debug, Clone)]
pub enum Error {
    /// SPI or control pin failure reported by the interface
    Interface(DisplayError),
    /// The BUSY pin could not be read
    BusyPin,
    /// The BUSY pin stayed HIGH past the configured timeout
    BusyTimeout {
        /// Time spent polling before giving up
        waited_ms: u32,
    },
    /// A plane buffer does not cover the whole panel
    BufferLength {
        /// Plane the buffer was given for
        plane: Plane,
        /// Required length, [`crate::BUFFER_LEN`]
        expected: usize,
        /// Length that was passed in
        actual: usize,
    },
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Interface(e)
    }
}

// DisplayError only derives Clone and Debug, its variants carry no data so the
// discriminant is enough to compare them
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Interface(a), Error::Interface(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            (Error::BusyPin, Error::BusyPin) => true,
            (Error::BusyTimeout { waited_ms: a }, Error::BusyTimeout { waited_ms: b }) => a == b,
            (
                Error::BufferLength {
                    plane: pa,
                    expected: ea,
                    actual: aa,
                },
                Error::BufferLength {
                    plane: pb,
                    expected: eb,
                    actual: ab,
                },
            ) => pa == pb && ea == eb && aa == ab,
            _ => false,
        }
    }
}

impl Eq for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::BusyPin => write!(f, "could not read the BUSY pin"),
            Error::BusyTimeout { waited_ms } => {
                write!(f, "panel still busy after {} ms", waited_ms)
            }
            Error::BufferLength {
                plane,
                expected,
                actual,
            } => write!(
                f,
                "{:?} plane buffer is {} bytes, expected {}",
                plane, actual, expected
            ),
        }
    }
}

impl std::error::Error for Error {}
