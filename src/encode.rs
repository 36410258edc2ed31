// encode.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF file encoding
use crate::block::*;
use crate::error::{Error, Result};
use crate::lzw::Compressor;
use crate::palette::Palette;
use crate::private::Step;
use pix::gray::Gray;
use std::convert::TryFrom;
use std::io::{self, Write};
use std::mem;

/// Maximum length of a data sub-block
const SUB_BLOCK_MAX: usize = 0xFF;

/// Block encoder
///
/// Writes [Block]s in the order given; the caller is responsible for
/// arranging them in a valid sequence.
///
/// [Block]: block/enum.Block.html
pub struct BlockEnc<W: Write> {
    /// Writer for output data
    writer: W,
}

/// Encoder for animation [Step]s.
///
/// The header, screen descriptor, global color table and looping extension
/// are written with the first step.  Each step after that only includes the
/// rectangle which changed from the previous step.
///
/// [Step]: struct.Step.html
pub struct StepEnc<W: Write> {
    /// Block encoder
    block_enc: BlockEnc<W>,
    /// Animation loop count
    loop_count: Option<u16>,
    /// Global color table palette
    palette: Option<Palette>,
    /// Depth of default color table (if no palette)
    depth: u8,
    /// Screen size given before first step
    screen_size: Option<(u16, u16)>,
    /// Screen state (after preamble)
    screen: Option<Screen>,
}

/// Screen state for an animation
struct Screen {
    /// Screen width
    width: u16,
    /// Screen height
    height: u16,
    /// Global color table depth
    depth: u8,
    /// Number of frames encoded
    n_frames: usize,
    /// Color indices of current frame
    frame: Vec<u8>,
    /// Color indices of previous frame
    back: Vec<u8>,
}

/// Writer for data sub-blocks
struct BlockWriter<'a, W: Write> {
    /// Wrapped writer
    writer: &'a mut W,
    /// Pending sub-block data
    buf: [u8; SUB_BLOCK_MAX],
    /// Length of pending data
    len: usize,
}

impl<'a, W: Write> BlockWriter<'a, W> {
    fn new(writer: &'a mut W) -> Self {
        BlockWriter {
            writer,
            buf: [0; SUB_BLOCK_MAX],
            len: 0,
        }
    }
}

impl<'a, W: Write> Write for BlockWriter<'a, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let consumed = (SUB_BLOCK_MAX - self.len).min(buf.len());
        self.buf[self.len..self.len + consumed]
            .copy_from_slice(&buf[..consumed]);
        self.len += consumed;
        if self.len == SUB_BLOCK_MAX {
            self.writer.write_all(&[SUB_BLOCK_MAX as u8])?;
            self.writer.write_all(&self.buf)?;
            self.len = 0;
        }
        Ok(consumed)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.len > 0 {
            self.writer.write_all(&[self.len as u8])?; // block size
            self.writer.write_all(&self.buf[..self.len])?;
            self.len = 0;
        }
        Ok(())
    }
}

impl<W: Write> BlockEnc<W> {
    /// Create a new block encoder
    pub(crate) fn new(writer: W) -> Self {
        BlockEnc { writer }
    }

    /// Encode one block
    pub fn encode<B: Into<Block>>(&mut self, block: B) -> Result<()> {
        let w = &mut self.writer;
        match block.into() {
            Block::Header(b) => b.format(w),
            Block::LogicalScreenDesc(b) => b.format(w),
            Block::GlobalColorTable(b) => b.format(w),
            Block::GraphicControl(b) => b.format(w),
            Block::Application(b) => b.format(w),
            Block::ImageDesc(b) => b.format(w),
            Block::ImageData(b) => b.format(w),
            Block::Trailer(b) => b.format(w),
        }
    }

    /// Flush and get the wrapped writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl Header {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(b"GIF")?;
        w.write_all(&self.version())?;
        Ok(())
    }
}

impl LogicalScreenDesc {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut buf = Vec::with_capacity(7);
        buf.extend_from_slice(&self.screen_width().to_le_bytes());
        buf.extend_from_slice(&self.screen_height().to_le_bytes());
        buf.push(self.flags());
        buf.push(0); // background color index
        buf.push(0); // pixel aspect ratio
        w.write_all(&buf)?;
        Ok(())
    }
}

impl GlobalColorTable {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(self.colors())?;
        Ok(())
    }
}

impl GraphicControl {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut buf = Vec::with_capacity(8);
        buf.push(EXTENSION_INTRODUCER);
        buf.push(GRAPHIC_CONTROL_LABEL);
        buf.push(4); // block size
        buf.push(self.flags());
        buf.extend_from_slice(&self.delay_time_cs().to_le_bytes());
        buf.push(0); // transparent color index
        buf.push(0); // block size
        w.write_all(&buf)?;
        Ok(())
    }
}

impl Application {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[EXTENSION_INTRODUCER, APPLICATION_LABEL])?;
        for c in self.sub_blocks() {
            debug_assert!(c.len() <= SUB_BLOCK_MAX);
            w.write_all(&[c.len() as u8])?; // block size
            w.write_all(c)?;
        }
        w.write_all(&[0])?; // block size
        Ok(())
    }
}

impl ImageDesc {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut buf = Vec::with_capacity(10);
        buf.push(IMAGE_SEPARATOR);
        buf.extend_from_slice(&self.left().to_le_bytes());
        buf.extend_from_slice(&self.top().to_le_bytes());
        buf.extend_from_slice(&self.width().to_le_bytes());
        buf.extend_from_slice(&self.height().to_le_bytes());
        buf.push(self.flags());
        w.write_all(&buf)?;
        Ok(())
    }
}

impl ImageData {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[self.min_code_size()])?;
        let mut bw = BlockWriter::new(w);
        let mut compressor = Compressor::new(self.min_code_size())?;
        compressor.compress(self.data(), &mut bw)?;
        bw.flush()?;
        w.write_all(&[0])?; // block size
        Ok(())
    }
}

impl Trailer {
    fn format<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[TRAILER])?;
        Ok(())
    }
}

impl Screen {
    /// Create screen state, allocating frame buffers
    fn new(width: u16, height: u16, depth: u8) -> Result<Self> {
        let len = usize::from(width) * usize::from(height);
        let mut frame = Vec::new();
        frame.try_reserve_exact(len)?;
        frame.resize(len, 0);
        let mut back = Vec::new();
        back.try_reserve_exact(len)?;
        back.resize(len, 0);
        Ok(Screen {
            width,
            height,
            depth,
            n_frames: 0,
            frame,
            back,
        })
    }

    /// Get the full screen region
    fn full_region(&self) -> ImageDesc {
        ImageDesc::default()
            .with_width(self.width)
            .with_height(self.height)
    }

    /// Get the region changed from previous frame
    fn changed_region(&self) -> Option<ImageDesc> {
        let width = usize::from(self.width);
        let mut left = width;
        let mut right = 0;
        let mut top = usize::from(self.height);
        let mut bottom = 0;
        let rows = self
            .frame
            .chunks_exact(width)
            .zip(self.back.chunks_exact(width));
        for (y, (row, prev)) in rows.enumerate() {
            for (x, (a, b)) in row.iter().zip(prev).enumerate() {
                if a != b {
                    left = left.min(x);
                    right = right.max(x);
                    top = top.min(y);
                    bottom = bottom.max(y);
                }
            }
        }
        if left < width {
            Some(
                ImageDesc::default()
                    .with_left(left as u16)
                    .with_top(top as u16)
                    .with_width((right - left + 1) as u16)
                    .with_height((bottom - top + 1) as u16),
            )
        } else {
            None
        }
    }

    /// Get the region to encode for the current frame
    fn frame_region(&self) -> ImageDesc {
        if self.n_frames == 0 {
            return self.full_region();
        }
        match self.changed_region() {
            Some(region) => region,
            None => {
                // nothing changed; one pixel still carries the delay
                warn!("frame {} unchanged", self.n_frames);
                ImageDesc::default().with_width(1).with_height(1)
            }
        }
    }

    /// Get image data for a region of the current frame
    fn image_data(&self, region: &ImageDesc) -> Result<ImageData> {
        let width = usize::from(self.width);
        let left = usize::from(region.left());
        let right = left + usize::from(region.width());
        let top = usize::from(region.top());
        let height = usize::from(region.height());
        let mut data = ImageData::new(region.image_sz(), self.depth)?;
        for row in self.frame.chunks_exact(width).skip(top).take(height) {
            data.add_data(&row[left..right]);
        }
        Ok(data)
    }

    /// Encode one animation step
    fn encode_step<W: Write>(
        &mut self,
        block_enc: &mut BlockEnc<W>,
        step: &Step,
    ) -> Result<()> {
        let raster = step.raster();
        if raster.width() != u32::from(self.width)
            || raster.height() != u32::from(self.height)
        {
            return Err(Error::InvalidFrameDimensions);
        }
        for (idx, p) in self.frame.iter_mut().zip(raster.pixels()) {
            *idx = u8::from(Gray::value(*p));
        }
        if let Some(control) = step.graphic_control_ext() {
            block_enc.encode(control)?;
        }
        let region = self.frame_region();
        debug!(
            "frame {}: {}x{} at {},{}",
            self.n_frames,
            region.width(),
            region.height(),
            region.left(),
            region.top()
        );
        let data = self.image_data(&region)?;
        block_enc.encode(region)?;
        block_enc.encode(data)?;
        self.n_frames += 1;
        mem::swap(&mut self.frame, &mut self.back);
        Ok(())
    }
}

impl<W: Write> StepEnc<W> {
    /// Create a new step encoder
    pub(crate) fn new(block_enc: BlockEnc<W>) -> Self {
        StepEnc {
            block_enc,
            loop_count: None,
            palette: None,
            depth: 8,
            screen_size: None,
            screen: None,
        }
    }

    /// Set the animation loop count.
    ///
    /// * `loop_count` Number of times to loop (zero means forever), or `None`
    ///   to not loop.
    pub fn with_loop_count(mut self, loop_count: Option<u16>) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Set the palette for the global color table.
    ///
    /// Color table depth is the smallest which holds every entry.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Set the depth of the default color table (1 - 8 bits).
    ///
    /// Only used when no palette is set.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Set the screen size.
    ///
    /// Without this, the first step sets the screen size.  It is needed to
    /// finish a stream which has no steps.
    pub fn with_screen_size(mut self, width: u16, height: u16) -> Self {
        self.screen_size = Some((width, height));
        self
    }

    /// Get the number of steps encoded
    pub fn n_steps(&self) -> usize {
        self.screen.as_ref().map_or(0, |s| s.n_frames)
    }

    /// Encode the preamble blocks
    fn encode_preamble(&mut self, width: u16, height: u16) -> Result<Screen> {
        let (palette, depth) = match &self.palette {
            Some(palette) => (palette.clone(), palette.depth()),
            None => (Palette::with_default_colors(self.depth)?, self.depth),
        };
        let screen = Screen::new(width, height, depth)?;
        debug!("screen: {}x{}, depth {}", width, height, depth);
        self.block_enc.encode(Header::default())?;
        self.block_enc.encode(
            LogicalScreenDesc::default()
                .with_screen_width(width)
                .with_screen_height(height)
                .with_color_table_depth(depth),
        )?;
        self.block_enc
            .encode(GlobalColorTable::with_palette(&palette, depth))?;
        if let Some(loop_count) = self.loop_count {
            self.block_enc
                .encode(Application::with_loop_count(loop_count))?;
        }
        Ok(screen)
    }

    /// Encode one animation step.
    ///
    /// Every step must have the same dimensions as the first one.
    pub fn encode_step(&mut self, step: &Step) -> Result<()> {
        if self.screen.is_none() {
            let (width, height) = match self.screen_size {
                Some(size) => size,
                None => {
                    let raster = step.raster();
                    let width = u16::try_from(raster.width())
                        .map_err(|_| Error::InvalidRasterDimensions)?;
                    let height = u16::try_from(raster.height())
                        .map_err(|_| Error::InvalidRasterDimensions)?;
                    (width, height)
                }
            };
            self.open_screen(width, height)?;
        }
        if let Some(screen) = &mut self.screen {
            screen.encode_step(&mut self.block_enc, step)?;
        }
        Ok(())
    }

    /// Write the preamble and set up screen state
    fn open_screen(&mut self, width: u16, height: u16) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidRasterDimensions);
        }
        self.screen = Some(self.encode_preamble(width, height)?);
        Ok(())
    }

    /// Finish encoding: write the trailer and flush.
    ///
    /// Returns the wrapped writer.  A stream with no steps is only valid
    /// when the screen size was set; otherwise `Error::EmptyStream` is
    /// returned and nothing is written.
    pub fn finish(mut self) -> Result<W> {
        if self.screen.is_none() {
            let (width, height) =
                self.screen_size.ok_or(Error::EmptyStream)?;
            warn!("no steps encoded");
            self.open_screen(width, height)?;
        }
        self.block_enc.encode(Trailer::default())?;
        self.block_enc.into_inner()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::private::Encoder;
    use pix::gray::Gray8;
    use pix::rgb::SRgb8;
    use pix::Raster;

    fn indexed(width: u32, height: u32, idx: &[u8]) -> Raster<Gray8> {
        let pixels = idx.iter().map(|i| Gray8::new(*i)).collect::<Vec<_>>();
        Raster::with_pixels(width, height, pixels)
    }

    fn step_enc() -> StepEnc<Vec<u8>> {
        Encoder::new_unbuffered(vec![]).into_step_enc()
    }

    fn region(frame: &gif::Frame) -> (u16, u16, u16, u16) {
        (frame.left, frame.top, frame.width, frame.height)
    }

    /// Split image data into sub-blocks (after code size byte)
    fn sub_blocks(mut data: &[u8]) -> (Vec<usize>, usize) {
        let mut lens = vec![];
        loop {
            let len = usize::from(data[0]);
            if len == 0 {
                return (lens, data.len() - 1);
            }
            lens.push(len);
            data = &data[1 + len..];
        }
    }

    #[test]
    fn block_writer() {
        let mut out = vec![];
        let mut bw = BlockWriter::new(&mut out);
        bw.write_all(&[7; 600]).unwrap();
        bw.flush().unwrap();
        assert_eq!(out.len(), 603);
        assert_eq!(out[0], 0xFF);
        assert_eq!(out[256], 0xFF);
        assert_eq!(out[512], 90);
    }

    #[test]
    fn blocks() {
        let mut enc = Encoder::new_unbuffered(vec![]).into_block_enc();
        enc.encode(Header::default()).unwrap();
        enc.encode(
            LogicalScreenDesc::default()
                .with_screen_width(0x102)
                .with_screen_height(3)
                .with_color_table_depth(2),
        )
        .unwrap();
        enc.encode(Application::with_loop_count(0)).unwrap();
        enc.encode(GraphicControl::default().with_delay_time_cs(0x1FF))
            .unwrap();
        enc.encode(
            ImageDesc::default()
                .with_left(1)
                .with_top(2)
                .with_width(3)
                .with_height(4),
        )
        .unwrap();
        enc.encode(Trailer::default()).unwrap();
        let out = enc.into_inner().unwrap();
        let mut expected = b"GIF89a".to_vec();
        expected.extend_from_slice(&[0x02, 0x01, 0x03, 0x00, 0xF1, 0, 0]);
        expected.extend_from_slice(&[0x21, 0xFF, 0x0B]);
        expected.extend_from_slice(b"NETSCAPE2.0");
        expected.extend_from_slice(&[0x03, 0x01, 0x00, 0x00, 0x00]);
        expected
            .extend_from_slice(&[0x21, 0xF9, 0x04, 0x04, 0xFF, 0x01, 0, 0]);
        expected.extend_from_slice(&[0x2C, 1, 0, 2, 0, 3, 0, 4, 0, 0]);
        expected.push(0x3B);
        assert_eq!(out, expected);
    }

    #[test]
    fn image_data_framing() {
        let mut data = ImageData::new(0, 1).unwrap();
        data.add_data(&[0, 0, 0, 0]);
        let mut enc = Encoder::new_unbuffered(vec![]).into_block_enc();
        enc.encode(data).unwrap();
        let out = enc.into_inner().unwrap();
        assert_eq!(out, vec![0x02, 0x02, 0x84, 0x51, 0x00]);
    }

    #[test]
    fn sub_block_lengths() {
        let mut seed = 7u32;
        let pixels: Vec<u8> = (0..20_000)
            .map(|_| {
                seed = seed.wrapping_mul(69069).wrapping_add(1);
                (seed >> 24) as u8
            })
            .collect();
        let mut data = ImageData::new(pixels.len(), 8).unwrap();
        data.add_data(&pixels);
        let mut enc = Encoder::new_unbuffered(vec![]).into_block_enc();
        enc.encode(data).unwrap();
        let out = enc.into_inner().unwrap();
        assert_eq!(out[0], 8);
        let (lens, rest) = sub_blocks(&out[1..]);
        assert!(lens.len() > 1);
        assert!(lens.iter().all(|len| *len <= 255));
        assert!(lens[..lens.len() - 1].iter().all(|len| *len == 255));
        assert_eq!(rest, 0);
    }

    #[test]
    fn changed_region() {
        let mut screen = Screen::new(8, 6, 2).unwrap();
        assert_eq!(screen.changed_region(), None);
        screen.frame[2 * 8 + 3] = 1;
        screen.frame[4 * 8 + 5] = 2;
        let region = screen.changed_region().unwrap();
        assert_eq!(
            region,
            ImageDesc::default()
                .with_left(3)
                .with_top(2)
                .with_width(3)
                .with_height(3)
        );
        let data = screen.image_data(&region).unwrap();
        assert_eq!(data.data(), &[1, 0, 0, 0, 0, 0, 0, 0, 2]);
        screen.frame[7] = 3;
        let region = screen.changed_region().unwrap();
        assert_eq!((region.left(), region.top()), (3, 0));
        assert_eq!((region.width(), region.height()), (5, 5));
    }

    #[test]
    fn first_frame_full() {
        let screen = Screen::new(4, 4, 2).unwrap();
        assert_eq!(screen.frame_region(), screen.full_region());
    }

    #[test]
    fn steps() {
        let mut enc = Encoder::new_unbuffered(vec![])
            .into_step_enc()
            .with_palette(Palette::with_default_colors(2).unwrap())
            .with_loop_count(Some(0));
        let a = indexed(4, 4, &[0; 16]);
        let mut idx = [0; 16];
        idx[5] = 1;
        idx[10] = 2;
        let b = indexed(4, 4, &idx);
        enc.encode_step(&Step::with_indexed(a)).unwrap();
        let step = Step::with_indexed(b).with_delay_time_cs(Some(10));
        enc.encode_step(&step).unwrap();
        enc.encode_step(&step).unwrap();
        assert_eq!(enc.n_steps(), 3);
        let out = enc.finish().unwrap();
        assert_eq!(&out[..6], b"GIF89a");
        assert_eq!(out[out.len() - 1], 0x3B);

        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::Indexed);
        let mut dec = opts.read_info(&out[..]).unwrap();
        let frame = dec.read_next_frame().unwrap().unwrap();
        assert_eq!(region(&frame), (0, 0, 4, 4));
        assert_eq!(frame.delay, 0);
        assert_eq!(&frame.buffer[..], &[0; 16][..]);
        let frame = dec.read_next_frame().unwrap().unwrap();
        assert_eq!(region(&frame), (1, 1, 2, 2));
        assert_eq!(frame.delay, 10);
        assert_eq!(&frame.buffer[..], &[1, 0, 0, 2][..]);
        let frame = dec.read_next_frame().unwrap().unwrap();
        assert_eq!(region(&frame), (0, 0, 1, 1));
        assert_eq!(&frame.buffer[..], &[0][..]);
        assert!(dec.read_next_frame().unwrap().is_none());
    }

    #[test]
    fn frame_dimensions() {
        let mut enc = step_enc();
        enc.encode_step(&Step::with_indexed(indexed(2, 2, &[0; 4])))
            .unwrap();
        let step = Step::with_indexed(indexed(3, 1, &[0; 3]));
        assert!(matches!(
            enc.encode_step(&step),
            Err(Error::InvalidFrameDimensions)
        ));
        let mut enc = step_enc().with_depth(9);
        let step = Step::with_indexed(indexed(2, 2, &[0; 4]));
        assert!(matches!(
            enc.encode_step(&step),
            Err(Error::InvalidDepth(9))
        ));
    }

    #[test]
    fn empty_stream() {
        assert!(matches!(step_enc().finish(), Err(Error::EmptyStream)));
        let out = step_enc()
            .with_palette(Palette::with_default_colors(1).unwrap())
            .with_screen_size(3, 2)
            .finish()
            .unwrap();
        let mut expected = b"GIF89a".to_vec();
        expected.extend_from_slice(&[3, 0, 2, 0, 0xF0, 0, 0]);
        expected.extend_from_slice(&[0, 0, 0, 0xAA, 0, 0]);
        expected.push(0x3B);
        assert_eq!(out, expected);
        assert!(matches!(
            step_enc().with_screen_size(0, 2).finish(),
            Err(Error::InvalidRasterDimensions)
        ));
    }

    #[test]
    fn screen_size() {
        let mut enc = step_enc().with_screen_size(2, 2);
        let step = Step::with_indexed(indexed(3, 1, &[0; 3]));
        assert!(matches!(
            enc.encode_step(&step),
            Err(Error::InvalidFrameDimensions)
        ));
        enc.encode_step(&Step::with_indexed(indexed(2, 2, &[1; 4])))
            .unwrap();
        assert_eq!(enc.n_steps(), 1);
    }

    #[test]
    fn default_table() {
        let mut enc = step_enc().with_depth(3);
        enc.encode_step(&Step::with_indexed(indexed(1, 1, &[5])))
            .unwrap();
        let out = enc.finish().unwrap();
        // screen flags, then 8 colors
        assert_eq!(out[10], 0xF2);
        assert_eq!(&out[13..16], &[0, 0, 0]);
        assert_eq!(&out[16..19], &[0xAA, 0, 0]);
        assert_eq!(out[13 + 24], 0x2C);
    }

    #[test]
    fn wedge() {
        let mut pixels = Vec::with_capacity(128 * 64);
        for i in 0..64i32 {
            for j in 0..128i32 {
                let (r, g, b) = (i + j, i - j, j - i);
                pixels.push(SRgb8::new(r as u8, g as u8, b as u8));
            }
        }
        let mut raster = Raster::<SRgb8>::with_pixels(128, 64, pixels);
        let quantizer = crate::palette::Quantizer::new(256).unwrap();
        let (palette, indices) =
            quantizer.quantize_in_place(&mut raster).unwrap();
        assert!(palette.len() <= 256);
        let mut enc = step_enc().with_palette(palette);
        enc.encode_step(&Step::with_indexed(indices)).unwrap();
        let out = enc.finish().unwrap();
        assert_eq!(&out[..6], b"GIF89a");
        assert_eq!(&out[6..10], &[0x80, 0x00, 0x40, 0x00]);
        assert_eq!(out[10] & 0xF8, 0xF0);
        assert_eq!(out[out.len() - 1], 0x3B);

        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::RGBA);
        let mut dec = opts.read_info(&out[..]).unwrap();
        let frame = dec.read_next_frame().unwrap().unwrap();
        assert_eq!((frame.width, frame.height), (128, 64));
        let rgb: Vec<SRgb8> = frame
            .buffer
            .chunks_exact(4)
            .map(|c| SRgb8::new(c[0], c[1], c[2]))
            .collect();
        assert_eq!(&rgb[..], raster.pixels());
    }
}
