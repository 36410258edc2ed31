// block.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF file blocks, in the order they are written
use crate::error::Result;
use crate::palette::Palette;

/// Image separator (`,`)
pub(crate) const IMAGE_SEPARATOR: u8 = 0x2C;

/// Extension introducer (`!`)
pub(crate) const EXTENSION_INTRODUCER: u8 = 0x21;

/// GIF trailer (`;`)
pub(crate) const TRAILER: u8 = 0x3B;

/// Graphic control extension label
pub(crate) const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;

/// Application extension label
pub(crate) const APPLICATION_LABEL: u8 = 0xFF;

/// Application identifier of looping extension
const NETSCAPE: &[u8; 11] = b"NETSCAPE2.0";

/// What a viewer does with a frame before showing the next one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisposalMethod {
    /// Unspecified
    NoAction,
    /// Leave the frame in place
    Keep,
    /// Clear frame area to background
    Background,
    /// Restore the previous frame
    Previous,
}

impl Default for DisposalMethod {
    fn default() -> Self {
        DisposalMethod::Keep
    }
}

impl DisposalMethod {
    /// Get the 3-bit code
    fn code(self) -> u8 {
        match self {
            DisposalMethod::NoAction => 0,
            DisposalMethod::Keep => 1,
            DisposalMethod::Background => 2,
            DisposalMethod::Previous => 3,
        }
    }
}

/// Header block (signature and version)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    version: [u8; 3],
}

impl Default for Header {
    fn default() -> Self {
        Header { version: *b"89a" }
    }
}

impl Header {
    /// Get the version
    pub fn version(self) -> [u8; 3] {
        self.version
    }
}

/// Logical screen descriptor block
///
/// Background color and pixel aspect ratio are always zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalScreenDesc {
    screen_width: u16,
    screen_height: u16,
    /// Global color table depth (bits)
    depth: Option<u8>,
}

impl LogicalScreenDesc {
    /// Global color table flag, plus 8-bit color resolution
    const TABLE_8_BIT: u8 = 0xF0;

    pub fn with_screen_width(mut self, screen_width: u16) -> Self {
        self.screen_width = screen_width;
        self
    }

    pub fn screen_width(&self) -> u16 {
        self.screen_width
    }

    pub fn with_screen_height(mut self, screen_height: u16) -> Self {
        self.screen_height = screen_height;
        self
    }

    pub fn screen_height(&self) -> u16 {
        self.screen_height
    }

    /// Declare a global color table of `2 ^ depth` entries (1 - 8)
    pub fn with_color_table_depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth.max(1).min(8));
        self
    }

    /// Get the packed flags byte
    pub fn flags(&self) -> u8 {
        self.depth.map_or(0, |d| Self::TABLE_8_BIT | (d - 1))
    }

    /// Get the global color table length (entries)
    pub fn color_table_len(&self) -> usize {
        self.depth.map_or(0, |d| 1 << d)
    }
}

/// Global color table block (RGB triples)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalColorTable {
    colors: Vec<u8>,
}

impl GlobalColorTable {
    /// Create a color table of `2 ^ depth` entries from a palette.
    ///
    /// Unused entries are black.
    pub fn with_palette(palette: &Palette, depth: u8) -> Self {
        GlobalColorTable {
            colors: palette.table(depth),
        }
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.colors.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}

/// Graphic control extension block
///
/// No transparent color is ever set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphicControl {
    disposal_method: DisposalMethod,
    /// Delay in centiseconds
    delay_time_cs: u16,
}

impl GraphicControl {
    /// Get the packed flags byte
    pub fn flags(&self) -> u8 {
        self.disposal_method.code() << 2
    }

    pub fn disposal_method(&self) -> DisposalMethod {
        self.disposal_method
    }

    pub fn with_disposal_method(mut self, method: DisposalMethod) -> Self {
        self.disposal_method = method;
        self
    }

    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    pub fn with_delay_time_cs(mut self, delay_time_cs: u16) -> Self {
        self.delay_time_cs = delay_time_cs;
        self
    }
}

/// Application extension block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Application {
    /// Data sub-blocks, starting with identifier + auth code
    sub_blocks: Vec<Vec<u8>>,
}

impl Application {
    /// Create a looping extension.
    ///
    /// * `loop_count` Number of times to loop animation (zero means forever).
    pub fn with_loop_count(loop_count: u16) -> Self {
        let [lo, hi] = loop_count.to_le_bytes();
        Application {
            sub_blocks: vec![NETSCAPE.to_vec(), vec![1, lo, hi]],
        }
    }

    /// Get the data sub-blocks
    pub fn sub_blocks(&self) -> &[Vec<u8>] {
        &self.sub_blocks
    }

    /// Get the loop count of a looping extension
    pub fn loop_count(&self) -> Option<u16> {
        match &self.sub_blocks[..] {
            [id, data] if id[..] == NETSCAPE[..] => match data[..] {
                [1, lo, hi] => Some(u16::from_le_bytes([lo, hi])),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Image descriptor block
///
/// There is never a local color table, and images are not interlaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageDesc {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
}

impl ImageDesc {
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    pub fn left(&self) -> u16 {
        self.left
    }

    pub fn with_top(mut self, top: u16) -> Self {
        self.top = top;
        self
    }

    pub fn top(&self) -> u16 {
        self.top
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the packed flags byte
    pub fn flags(&self) -> u8 {
        0
    }

    /// Get the number of pixels
    pub fn image_sz(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Image data block (color indices before compression)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    min_code_size: u8,
    data: Vec<u8>,
}

impl ImageData {
    /// Create image data with room for `image_sz` indices.
    ///
    /// * `min_code_size` LZW minimum code size (clamped to 2 - 8).
    pub fn new(image_sz: usize, min_code_size: u8) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(image_sz)?;
        Ok(ImageData {
            min_code_size: min_code_size.max(2).min(8),
            data,
        })
    }

    /// Append color indices
    pub fn add_data(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }

    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Trailer block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Trailer;

/// A block within a GIF file
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Header(Header),
    LogicalScreenDesc(LogicalScreenDesc),
    GlobalColorTable(GlobalColorTable),
    GraphicControl(GraphicControl),
    Application(Application),
    ImageDesc(ImageDesc),
    ImageData(ImageData),
    Trailer(Trailer),
}

macro_rules! block_from {
    ($($b:ident),*) => {
        $(
            impl From<$b> for Block {
                fn from(b: $b) -> Self {
                    Block::$b(b)
                }
            }
        )*
    };
}

block_from!(
    Header,
    LogicalScreenDesc,
    GlobalColorTable,
    GraphicControl,
    Application,
    ImageDesc,
    ImageData,
    Trailer
);
