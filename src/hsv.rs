// hsv.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Conversion between RGB and HSV color spaces
//!
//! Hue is kept in whole degrees (0-360), saturation and value in whole
//! percent (0-100).  A [HsvPixel] packs all three into 3 bytes by borrowing
//! the high bit of saturation as the 9th bit of hue.
//!
//! [HsvPixel]: struct.HsvPixel.html
use crate::error::{Error, Result};
use pix::rgb::{Rgb, SRgb8};

/// Saturation bits of packed saturation byte
const SATURATION_MASK: u8 = 0b0111_1111;

/// Hue overflow bit of packed saturation byte
const HUE_OVERFLOW: u8 = 0b1000_0000;

/// Hue offset when overflow bit is set
const HUE_OVERFLOW_OFFSET: u16 = 255;

/// Maximum hue (degrees)
const HUE_MAX: u16 = 360;

/// Maximum saturation / value (percent)
const PERCENT_MAX: u8 = 100;

/// Hue, saturation and value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hsv {
    /// Hue in degrees
    hue: u16,
    /// Saturation in percent
    saturation: u8,
    /// Value in percent
    value: u8,
}

/// HSV color packed into 3 bytes
///
/// Byte 0 holds the low 8 bits of hue (after removing an overflow of 255),
/// byte 1 holds saturation with the hue overflow flag in bit 7, and byte 2
/// holds value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HsvPixel([u8; 3]);

impl Hsv {
    /// Create a new HSV color.
    ///
    /// Components are not checked; out of range colors are rejected by
    /// [hsv_to_rgb](fn.hsv_to_rgb.html).  Packing into an
    /// [HsvPixel](struct.HsvPixel.html) keeps only the low 7 bits of
    /// saturation, so check [is_valid](#method.is_valid) first when the
    /// components come from outside.
    pub fn new(hue: u16, saturation: u8, value: u8) -> Self {
        Hsv {
            hue,
            saturation,
            value,
        }
    }

    /// Get the hue (degrees)
    pub fn hue(self) -> u16 {
        self.hue
    }

    /// Get the saturation (percent)
    pub fn saturation(self) -> u8 {
        self.saturation
    }

    /// Get the value (percent)
    pub fn value(self) -> u8 {
        self.value
    }

    /// Check whether all components are in range
    pub fn is_valid(self) -> bool {
        self.hue <= HUE_MAX
            && self.saturation <= PERCENT_MAX
            && self.value <= PERCENT_MAX
    }
}

impl From<Hsv> for HsvPixel {
    fn from(hsv: Hsv) -> Self {
        // saturation needs 7 bits; the 8th carries hue overflow
        let saturation = hsv.saturation & SATURATION_MASK;
        if hsv.hue > HUE_OVERFLOW_OFFSET {
            let hue = (hsv.hue - HUE_OVERFLOW_OFFSET).min(255) as u8;
            HsvPixel([hue, saturation | HUE_OVERFLOW, hsv.value])
        } else {
            HsvPixel([hsv.hue as u8, saturation, hsv.value])
        }
    }
}

impl From<HsvPixel> for Hsv {
    fn from(pix: HsvPixel) -> Self {
        let [hue, saturation, value] = pix.0;
        let mut hue = u16::from(hue);
        if saturation & HUE_OVERFLOW != 0 {
            hue += HUE_OVERFLOW_OFFSET;
        }
        Hsv::new(hue, saturation & SATURATION_MASK, value)
    }
}

impl HsvPixel {
    /// Create a packed HSV pixel from raw bytes
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        HsvPixel(bytes)
    }

    /// Get the raw bytes
    pub fn to_bytes(self) -> [u8; 3] {
        self.0
    }

    /// Convert an RGB color to a packed HSV pixel
    pub fn from_rgb(clr: SRgb8) -> Self {
        rgb_to_hsv(clr).into()
    }

    /// Convert a packed HSV pixel to RGB
    pub fn to_rgb(self) -> Result<SRgb8> {
        hsv_to_rgb(self.into())
    }
}

/// Round half up, then truncate
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).trunc()
}

/// Get one channel of an RGB color, normalized to 0-1
fn normalized<C: Into<u8>>(c: C) -> f64 {
    f64::from(c.into()) / 255.0
}

/// Convert an RGB color to HSV
pub fn rgb_to_hsv(clr: SRgb8) -> Hsv {
    let r = normalized(Rgb::red(clr));
    let g = normalized(Rgb::green(clr));
    let b = normalized(Rgb::blue(clr));
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;
    let hue = if delta == 0.0 {
        0.0
    } else if cmax == r {
        (60.0 * ((g - b) / delta) + 360.0) % 360.0
    } else if cmax == g {
        (60.0 * ((b - r) / delta) + 120.0) % 360.0
    } else {
        (60.0 * ((r - g) / delta) + 240.0) % 360.0
    };
    let saturation = if cmax == 0.0 {
        0.0
    } else {
        delta / cmax * 100.0
    };
    let value = cmax * 100.0;
    Hsv::new(
        round_half_up(hue) as u16,
        round_half_up(saturation) as u8,
        round_half_up(value) as u8,
    )
}

/// Convert an HSV color to RGB
///
/// Hue must be within 0-360, saturation and value within 0-100.
pub fn hsv_to_rgb(hsv: Hsv) -> Result<SRgb8> {
    if !hsv.is_valid() {
        return Err(Error::InvalidHsv(hsv.hue, hsv.saturation, hsv.value));
    }
    let h = f64::from(hsv.hue);
    let s = f64::from(hsv.saturation) / 100.0;
    let v = f64::from(hsv.value) / 100.0;
    let c = s * v;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match hsv.hue {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let channel = |v: f64| round_half_up((v + m) * 255.0) as u8;
    Ok(SRgb8::new(channel(r), channel(g), channel(b)))
}
