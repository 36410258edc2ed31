// error.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
use std::collections::TryReserveError;
use std::fmt;
use std::io;

/// Errors encountered while quantizing or encoding
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// Buffer allocation failed.
    OutOfMemory(TryReserveError),
    /// More distinct colors than the palette can hold; the count reached.
    PaletteOverflow(usize),
    /// Palette capacity not a power of two between 2 and 256.
    InvalidPaletteSize(usize),
    /// Color depth not between 1 and 8 bits.
    InvalidDepth(u8),
    /// Raster color not found in [Palette](struct.Palette.html).
    MissingColor,
    /// HSV components out of range (hue, saturation, value).
    InvalidHsv(u16, u8, u8),
    /// Raster dimensions zero or larger than 65535.
    InvalidRasterDimensions,
    /// Frame size does not match the screen size.
    InvalidFrameDimensions,
    /// Stream finished with no steps and no screen size.
    EmptyStream,
}

/// Gifenc result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::OutOfMemory(err) => err.fmt(fmt),
            Error::InvalidHsv(h, s, v) => {
                write!(fmt, "HSV out of range: ({}, {}, {})", h, s, v)
            }
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::OutOfMemory(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::OutOfMemory(err)
    }
}
