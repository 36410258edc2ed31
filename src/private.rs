// private.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Private module for top-level items
use crate::block::GraphicControl;
use crate::encode::{BlockEnc, StepEnc};
use crate::error::Result;
use crate::palette::Palette;
use pix::gray::Gray8;
use pix::rgb::SRgb8;
use pix::Raster;
use std::io::{BufWriter, Write};

/// GIF file encoder
///
/// Can be converted to one of two encoders:
/// * [into_step_enc] for animation [Step]s
/// * [into_block_enc] for low-level [Block]s
///
/// ## Example: two step animation
/// ```
/// use gifenc::{Encoder, Palette, Step};
/// use pix::{gray::Gray8, rgb::SRgb8, Raster};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut palette = Palette::new(2)?;
/// palette.set_entry(SRgb8::new(0, 0, 0x80));
/// palette.set_entry(SRgb8::new(0xFF, 0xC0, 0));
/// let mut enc = Encoder::new(Vec::new())
///     .into_step_enc()
///     .with_palette(palette)
///     .with_loop_count(Some(0));
/// let mut raster = Raster::<Gray8>::with_clear(8, 8);
/// enc.encode_step(&Step::with_indexed(Raster::with_raster(&raster)))?;
/// *raster.pixel_mut(4, 3) = Gray8::new(1);
/// let step = Step::with_indexed(raster).with_delay_time_cs(Some(50));
/// // only the changed pixel is encoded
/// enc.encode_step(&step)?;
/// let gif = enc.finish()?.into_inner()?;
/// assert_eq!(&gif[..6], b"GIF89a");
/// # Ok(())
/// # }
/// ```
///
/// [Block]: block/enum.Block.html
/// [Step]: struct.Step.html
/// [into_block_enc]: struct.Encoder.html#method.into_block_enc
/// [into_step_enc]: struct.Encoder.html#method.into_step_enc
pub struct Encoder<W: Write> {
    /// Writer for output data
    writer: W,
}

impl<W: Write> Encoder<BufWriter<W>> {
    /// Create a new GIF encoder.
    pub fn new(writer: W) -> Self {
        Self::new_unbuffered(BufWriter::new(writer))
    }
}

impl<W: Write> Encoder<W> {
    /// Create a new unbuffered GIF encoder.
    pub fn new_unbuffered(writer: W) -> Self {
        Encoder { writer }
    }

    /// Convert into a block encoder.
    pub fn into_block_enc(self) -> BlockEnc<W> {
        BlockEnc::new(self.writer)
    }

    /// Convert into a step encoder.
    pub fn into_step_enc(self) -> StepEnc<W> {
        StepEnc::new(self.into_block_enc())
    }
}

/// One step of an animation
///
/// A step is an indexed raster (one palette index per pixel), with an
/// optional delay before the next step is shown.
pub struct Step {
    /// Indexed raster
    raster: Raster<Gray8>,
    /// Graphic control extension
    graphic_control_ext: Option<GraphicControl>,
}

impl Clone for Step {
    fn clone(&self) -> Self {
        Step {
            raster: Raster::with_raster(&self.raster),
            graphic_control_ext: self.graphic_control_ext,
        }
    }
}

impl Step {
    /// Create an animation step with an indexed raster
    pub fn with_indexed(raster: Raster<Gray8>) -> Self {
        Step {
            raster,
            graphic_control_ext: None,
        }
    }

    /// Create an animation step with a true color raster.
    ///
    /// Every color must be an entry of `palette`.
    pub fn with_true_color(
        raster: &Raster<SRgb8>,
        palette: &Palette,
    ) -> Result<Self> {
        Ok(Step::with_indexed(palette.index_raster(raster)?))
    }

    /// Adjust the delay time (centiseconds).
    ///
    /// A delay of `None` or zero omits the graphic control extension.
    pub fn with_delay_time_cs(mut self, delay: Option<u16>) -> Self {
        self.graphic_control_ext = match delay {
            Some(delay) if delay > 0 => {
                Some(GraphicControl::default().with_delay_time_cs(delay))
            }
            _ => None,
        };
        self
    }

    /// Get the delay time (centiseconds)
    pub fn delay_time_cs(&self) -> Option<u16> {
        self.graphic_control_ext.map(|c| c.delay_time_cs())
    }

    /// Get the indexed raster
    pub fn raster(&self) -> &Raster<Gray8> {
        &self.raster
    }

    pub(crate) fn graphic_control_ext(&self) -> Option<GraphicControl> {
        self.graphic_control_ext
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pix::gray::Gray;

    #[test]
    fn delay() {
        let step = Step::with_indexed(Raster::with_clear(2, 2));
        assert_eq!(step.delay_time_cs(), None);
        let step = step.with_delay_time_cs(Some(25));
        assert_eq!(step.delay_time_cs(), Some(25));
        assert_eq!(step.clone().delay_time_cs(), Some(25));
        let step = step.with_delay_time_cs(Some(0));
        assert_eq!(step.delay_time_cs(), None);
    }

    #[test]
    fn true_color() {
        let mut palette = Palette::new(4).unwrap();
        palette.set_entry(SRgb8::new(1, 2, 3));
        palette.set_entry(SRgb8::new(4, 5, 6));
        let pixels = vec![
            SRgb8::new(4, 5, 6),
            SRgb8::new(1, 2, 3),
            SRgb8::new(4, 5, 6),
        ];
        let raster = Raster::with_pixels(3, 1, pixels);
        let step = Step::with_true_color(&raster, &palette).unwrap();
        let pixels = step.raster().pixels();
        let idx: Vec<u8> =
            pixels.iter().map(|p| u8::from(Gray::value(*p))).collect();
        assert_eq!(idx, vec![1, 0, 1]);
        let raster = Raster::with_pixels(1, 1, vec![SRgb8::new(7, 7, 7)]);
        assert!(Step::with_true_color(&raster, &palette).is_err());
    }
}
