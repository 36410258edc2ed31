// palette.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Color palettes and quantization
use crate::error::{Error, Result};
use pix::gray::Gray8;
use pix::rgb::{Rgb, SRgb8};
use pix::Raster;

/// Maximum number of palette entries
pub const MAX_ENTRIES: usize = 256;

/// VGA colors
const VGA: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0xAA, 0x00, 0x00],
    [0x00, 0xAA, 0x00],
    [0xAA, 0x55, 0x00],
    [0x00, 0x00, 0xAA],
    [0xAA, 0x00, 0xAA],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0xFF, 0x55, 0x55],
    [0x55, 0xFF, 0x55],
    [0xFF, 0xFF, 0x55],
    [0x55, 0x55, 0xFF],
    [0xFF, 0x55, 0xFF],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0xFF, 0xFF],
];

/// Color palette
///
/// Entries are kept in the order they were added.  Capacity is a power of
/// two between 2 and 256, as required for GIF color tables.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Color entries (only `len` are used)
    entries: [SRgb8; MAX_ENTRIES],
    /// Number of entries
    len: usize,
    /// Maximum number of entries
    capacity: usize,
}

/// Quantizer for true color rasters
///
/// Builds a [Palette] holding every distinct color of a raster.  When a
/// raster has too many colors, the low bits of every channel are cleared,
/// one bit at a time, until the colors fit.
///
/// ## Example
/// ```
/// use gifenc::Quantizer;
/// use pix::{rgb::SRgb8, Raster};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut raster = Raster::<SRgb8>::with_clear(4, 4);
/// *raster.pixel_mut(1, 2) = SRgb8::new(0x40, 0x80, 0xC0);
/// let (palette, indexed) = Quantizer::new(16)?.quantize(&raster)?;
/// assert_eq!(palette.len(), 2);
/// assert_eq!(indexed.width(), 4);
/// # Ok(())
/// # }
/// ```
///
/// [Palette]: struct.Palette.html
#[derive(Clone, Copy, Debug)]
pub struct Quantizer {
    /// Palette capacity
    capacity: usize,
}

/// Check a palette capacity
fn check_capacity(capacity: usize) -> Result<usize> {
    if capacity >= 2 && capacity <= MAX_ENTRIES && capacity.is_power_of_two()
    {
        Ok(capacity)
    } else {
        Err(Error::InvalidPaletteSize(capacity))
    }
}

/// Get red, green and blue channels
fn channels(clr: SRgb8) -> [u8; 3] {
    [
        u8::from(Rgb::red(clr)),
        u8::from(Rgb::green(clr)),
        u8::from(Rgb::blue(clr)),
    ]
}

impl Palette {
    /// Create a new empty palette.
    ///
    /// * `capacity` Maximum number of entries (power of two, 2 - 256).
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        Ok(Palette {
            entries: [SRgb8::default(); MAX_ENTRIES],
            len: 0,
            capacity,
        })
    }

    /// Create a palette with the default colors for a depth.
    ///
    /// The first 16 entries are the VGA colors.  Deeper palettes continue
    /// with a 6x6x6 color cube, then a 24 step gray ramp.
    pub fn with_default_colors(depth: u8) -> Result<Self> {
        if depth < 1 || depth > 8 {
            return Err(Error::InvalidDepth(depth));
        }
        let len = 1 << depth;
        let mut palette = Palette::new(len)?;
        let vga = VGA.iter().map(|[r, g, b]| SRgb8::new(*r, *g, *b));
        let cube = (0..6u8).flat_map(|r| {
            (0..6u8).flat_map(move |g| {
                (0..6u8).map(move |b| SRgb8::new(r * 51, g * 51, b * 51))
            })
        });
        let ramp = (1..=24u32).map(|i| {
            let v = (i * 0xFF / 25) as u8;
            SRgb8::new(v, v, v)
        });
        for clr in vga.chain(cube).chain(ramp).take(len) {
            palette.push(clr);
        }
        Ok(palette)
    }

    /// Create a palette for [rgb332_index](fn.rgb332_index.html).
    pub fn with_rgb332() -> Self {
        let mut palette = Palette {
            entries: [SRgb8::default(); MAX_ENTRIES],
            len: 0,
            capacity: 256,
        };
        for i in 0..256 {
            let r = (i >> 5) * 255 / 7;
            let g = ((i >> 2) & 0b111) * 255 / 7;
            let b = (i & 0b11) * 255 / 3;
            palette.push(SRgb8::new(r as u8, g as u8, b as u8));
        }
        palette
    }

    /// Create a palette for [rgb222_index](fn.rgb222_index.html).
    pub fn with_rgb222() -> Self {
        let mut palette = Palette {
            entries: [SRgb8::default(); MAX_ENTRIES],
            len: 0,
            capacity: 64,
        };
        for i in 0..64u8 {
            let r = (i >> 4) * 85;
            let g = ((i >> 2) & 0b11) * 85;
            let b = (i & 0b11) * 85;
            palette.push(SRgb8::new(r, g, b));
        }
        palette
    }

    /// Build a palette from every distinct color in a raster.
    ///
    /// Colors are added in raster order.  Returns
    /// [PaletteOverflow](enum.Error.html#variant.PaletteOverflow) when there
    /// are more distinct colors than `capacity`.
    pub fn build(raster: &Raster<SRgb8>, capacity: usize) -> Result<Self> {
        let mut palette = Palette::new(capacity)?;
        for clr in raster.pixels() {
            if palette.set_entry(*clr).is_none() {
                return Err(Error::PaletteOverflow(palette.len() + 1));
            }
        }
        Ok(palette)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the palette is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a slice of all colors
    pub fn colors(&self) -> &[SRgb8] {
        &self.entries[..self.len]
    }

    /// Get one entry
    pub fn entry(&self, i: usize) -> Option<SRgb8> {
        self.colors().get(i).copied()
    }

    /// Find the index of a color
    pub fn position(&self, clr: SRgb8) -> Option<usize> {
        self.colors().iter().position(|c| *c == clr)
    }

    /// Set an entry, adding it if not already present.
    ///
    /// Returns the entry index, or `None` if the palette is full.
    pub fn set_entry(&mut self, clr: SRgb8) -> Option<usize> {
        match self.position(clr) {
            Some(i) => Some(i),
            None if self.len < self.capacity => {
                self.push(clr);
                Some(self.len - 1)
            }
            None => None,
        }
    }

    /// Push an entry (duplicates allowed)
    fn push(&mut self, clr: SRgb8) {
        debug_assert!(self.len < self.capacity);
        self.entries[self.len] = clr;
        self.len += 1;
    }

    /// Get the color depth (bits per index) needed for all entries
    pub fn depth(&self) -> u8 {
        let mut depth = 1;
        while (1 << depth) < self.len {
            depth += 1;
        }
        depth
    }

    /// Get a color table of `3 << depth` bytes, padded with black
    pub fn table(&self, depth: u8) -> Vec<u8> {
        let len = 1 << depth;
        let mut table = Vec::with_capacity(len * 3);
        for clr in self.colors().iter().take(len) {
            table.extend_from_slice(&channels(*clr));
        }
        table.resize(len * 3, 0);
        table
    }

    /// Make an indexed raster from a true color raster.
    ///
    /// Every color must be an exact palette entry; the first match wins.
    pub fn index_raster(
        &self,
        raster: &Raster<SRgb8>,
    ) -> Result<Raster<Gray8>> {
        let mut indexed = Raster::with_clear(raster.width(), raster.height());
        for (idx, clr) in indexed.pixels_mut().iter_mut().zip(raster.pixels())
        {
            let i = self.position(*clr).ok_or(Error::MissingColor)?;
            *idx = Gray8::new(i as u8);
        }
        Ok(indexed)
    }
}

impl Quantizer {
    /// Create a new quantizer.
    ///
    /// * `capacity` Maximum palette entries (power of two, 2 - 256).
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = check_capacity(capacity)?;
        Ok(Quantizer { capacity })
    }

    /// Quantize a copy of a raster.
    ///
    /// Returns the palette and indexed raster; `raster` is not changed.
    pub fn quantize(
        &self,
        raster: &Raster<SRgb8>,
    ) -> Result<(Palette, Raster<Gray8>)> {
        let mut copy = Raster::with_raster(raster);
        self.quantize_in_place(&mut copy)
    }

    /// Quantize a raster in place.
    ///
    /// NOTE: when `raster` has too many colors, its pixels are modified:
    ///       the low bits of every channel are cleared.
    pub fn quantize_in_place(
        &self,
        raster: &mut Raster<SRgb8>,
    ) -> Result<(Palette, Raster<Gray8>)> {
        let mut mask = 0xFF;
        loop {
            match Palette::build(raster, self.capacity) {
                Ok(palette) => {
                    debug!("palette: {} colors, mask {:#04X}", palette.len(),
                        mask);
                    let indexed = palette.index_raster(raster)?;
                    return Ok((palette, indexed));
                }
                Err(Error::PaletteOverflow(n)) => {
                    // a zero mask leaves one color, which always fits
                    mask <<= 1;
                    info!("palette overflow: {} colors, mask {:#04X}", n,
                        mask);
                    mask_channels(raster, mask);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Mask channels of every pixel in a raster
fn mask_channels(raster: &mut Raster<SRgb8>, mask: u8) {
    for clr in raster.pixels_mut() {
        let [r, g, b] = channels(*clr);
        *clr = SRgb8::new(r & mask, g & mask, b & mask);
    }
}

/// Get a fixed 3-3-2 palette index for a color.
///
/// 3 bits of red, 3 of green and 2 of blue; see
/// [Palette::with_rgb332](struct.Palette.html#method.with_rgb332).
pub fn rgb332_index(clr: SRgb8) -> u8 {
    let [r, g, b] = channels(clr);
    (r >> 5) << 5 | (g >> 5) << 2 | b >> 6
}

/// Get a fixed 2-2-2 palette index for a color.
///
/// 2 bits each of red, green and blue; see
/// [Palette::with_rgb222](struct.Palette.html#method.with_rgb222).
pub fn rgb222_index(clr: SRgb8) -> u8 {
    let [r, g, b] = channels(clr);
    (r >> 6) << 4 | (g >> 6) << 2 | b >> 6
}
