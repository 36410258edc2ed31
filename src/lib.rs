// lib.rs      gifenc crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF89a encoder for indexed and true color animations.
//!
//! * [Quantizer] reduces a true color raster to a [Palette]
//! * [Encoder] writes animation [Step]s, each holding only the region which
//!   changed from the previous step
//! * [hsv] converts between RGB and a packed HSV form
//!
//! [Encoder]: struct.Encoder.html
//! [hsv]: hsv/index.html
//! [Palette]: struct.Palette.html
//! [Quantizer]: struct.Quantizer.html
//! [Step]: struct.Step.html
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod block;
mod encode;
mod error;
pub mod hsv;
mod lzw;
mod palette;
mod private;

pub use crate::encode::{BlockEnc, StepEnc};
pub use crate::error::{Error, Result};
pub use crate::palette::{
    rgb222_index, rgb332_index, Palette, Quantizer, MAX_ENTRIES,
};
pub use crate::private::{Encoder, Step};
