// lzw.rs
//
// Copyright (c) 2020-2025  Douglas Lau
//
//! Lempel-Ziv-Welch compression for GIF
use crate::error::Result;
use std::io::Write;
use std::ops::AddAssign;

/// Code Bits
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bits(u8);

impl From<u8> for Bits {
    fn from(bits: u8) -> Self {
        Bits(bits.min(Self::MAX.0))
    }
}

impl From<Bits> for u8 {
    fn from(bits: Bits) -> Self {
        bits.0
    }
}

impl AddAssign<u8> for Bits {
    fn add_assign(&mut self, rhs: u8) {
        self.0 = (self.0 + rhs).min(Self::MAX.0)
    }
}

impl Bits {
    /// Maximum code bits allowed for GIF
    const MAX: Self = Bits(12);

    /// Get the number of entries
    fn entries(self) -> u16 {
        1 << (self.0 as u16)
    }
}

/// Code type
type Code = u16;

/// Code dictionary trie
///
/// Every node has one child slot for each pixel value.  Single pixel nodes
/// are implicit; their code is the pixel value.
struct Trie {
    /// Child codes, indexed by `code * radix + pixel` (zero for none)
    children: Vec<Code>,
    /// Minimum code bits (bits per pixel)
    min_code_bits: u8,
    /// Next available code
    next_code: Code,
}

/// LZW Data Compressor
pub struct Compressor {
    /// Code dictionary
    trie: Trie,
    /// Minimum code bits
    min_code_bits: u8,
    /// Current code bits
    code_bits: Bits,
    /// Current code
    code: u32,
    /// Number of bits in current code
    n_bits: u8,
}

impl Trie {
    /// Create a new code dictionary
    fn new(min_code_bits: u8) -> Result<Self> {
        let len = usize::from(Bits::MAX.entries()) << min_code_bits;
        let mut children = Vec::new();
        children.try_reserve_exact(len)?;
        children.resize(len, 0);
        let mut trie = Trie {
            children,
            min_code_bits,
            next_code: 0,
        };
        trie.next_code = trie.end_code() + 1;
        Ok(trie)
    }

    /// Get the clear code
    fn clear_code(&self) -> Code {
        1 << self.min_code_bits
    }

    /// Get the end code
    fn end_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Get the next available code
    fn next_code(&self) -> Code {
        self.next_code
    }

    /// Check if all codes are assigned
    fn is_full(&self) -> bool {
        self.next_code >= Bits::MAX.entries()
    }

    /// Get the child slot of a node
    fn slot(&self, code: Code, pixel: u8) -> usize {
        (usize::from(code) << self.min_code_bits) + usize::from(pixel)
    }

    /// Get the child of a node
    fn child(&self, code: Code, pixel: u8) -> Option<Code> {
        match self.children[self.slot(code, pixel)] {
            0 => None,
            child => Some(child),
        }
    }

    /// Insert a child node with the next available code
    fn insert(&mut self, code: Code, pixel: u8) {
        debug_assert!(!self.is_full());
        let slot = self.slot(code, pixel);
        self.children[slot] = self.next_code;
        self.next_code += 1;
    }
}

impl Compressor {
    /// Create a new compressor
    ///
    /// * `min_code_bits` LZW minimum code size (2 - 8).
    pub fn new(min_code_bits: u8) -> Result<Self> {
        debug_assert!(min_code_bits >= 2 && min_code_bits <= 8);
        let trie = Trie::new(min_code_bits)?;
        let code_bits = Bits::from(min_code_bits + 1);
        Ok(Compressor {
            trie,
            min_code_bits,
            code_bits,
            code: 0,
            n_bits: 0,
        })
    }

    /// Pack a code into a writer
    fn pack<W: Write>(&mut self, code: Code, w: &mut W) -> Result<()> {
        self.code |= u32::from(code) << self.n_bits;
        self.n_bits += u8::from(self.code_bits);
        while self.n_bits >= 8 {
            w.write_all(&[self.code as u8])?;
            self.code >>= 8;
            self.n_bits -= 8;
        }
        Ok(())
    }

    /// Flush a partial byte
    fn flush<W: Write>(&mut self, w: &mut W) -> Result<()> {
        if self.n_bits > 0 {
            w.write_all(&[self.code as u8])?;
            self.code = 0;
            self.n_bits = 0;
        }
        Ok(())
    }

    /// Compress a buffer of pixels (color indices)
    ///
    /// Pixels are masked to the minimum code bits.  Output starts with a
    /// clear code and ends with the end code, padded to a whole byte.
    pub fn compress<W: Write>(
        &mut self,
        pixels: &[u8],
        w: &mut W,
    ) -> Result<()> {
        let clear_code = self.trie.clear_code();
        let mask = (clear_code - 1) as u8;
        self.pack(clear_code, w)?;
        let mut code = None;
        for pixel in pixels.iter().map(|p| p & mask) {
            code = match code {
                Some(code) => match self.trie.child(code, pixel) {
                    Some(child) => Some(child),
                    None => {
                        self.extend(code, pixel, w)?;
                        Some(Code::from(pixel))
                    }
                },
                None => Some(Code::from(pixel)),
            };
        }
        if let Some(code) = code {
            self.pack(code, w)?;
        }
        self.pack(self.trie.end_code(), w)?;
        self.flush(w)
    }

    /// Emit a code and extend the dictionary with one more pixel
    fn extend<W: Write>(
        &mut self,
        code: Code,
        pixel: u8,
        w: &mut W,
    ) -> Result<()> {
        self.pack(code, w)?;
        if self.trie.is_full() {
            self.pack(self.trie.clear_code(), w)?;
            trace!("lzw dictionary full; clear");
            self.trie = Trie::new(self.min_code_bits)?;
            self.code_bits = Bits::from(self.min_code_bits + 1);
        } else {
            if self.trie.next_code() == self.code_bits.entries() {
                self.code_bits += 1;
            }
            self.trie.insert(code, pixel);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn compress(min_code_bits: u8, pixels: &[u8]) -> Vec<u8> {
        let mut buf = vec![];
        let mut enc = Compressor::new(min_code_bits).unwrap();
        enc.compress(pixels, &mut buf).unwrap();
        buf
    }

    fn decompress(min_code_bits: u8, data: &[u8]) -> Vec<u8> {
        let mut dec =
            weezl::decode::Decoder::new(weezl::BitOrder::Lsb, min_code_bits);
        dec.decode(data).unwrap()
    }

    /// Pseudo-random pixels (linear congruential)
    fn noise(len: usize, mask: u8) -> Vec<u8> {
        let mut seed = 0x1234_5678u32;
        (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                (seed >> 16) as u8 & mask
            })
            .collect()
    }

    #[test]
    fn bits() {
        let mut bits = Bits::from(11);
        assert_eq!(bits.entries(), 2048);
        bits += 1;
        assert_eq!(bits, Bits::MAX);
        bits += 1;
        assert_eq!(u8::from(bits), 12);
        assert_eq!(Bits::from(13), Bits::MAX);
    }

    #[test]
    fn trie() {
        let mut trie = Trie::new(2).unwrap();
        assert_eq!(trie.clear_code(), 4);
        assert_eq!(trie.end_code(), 5);
        assert_eq!(trie.next_code(), 6);
        assert_eq!(trie.child(1, 2), None);
        trie.insert(1, 2);
        assert_eq!(trie.child(1, 2), Some(6));
        assert_eq!(trie.child(2, 1), None);
        assert_eq!(trie.next_code(), 7);
        assert!(!trie.is_full());
    }

    #[test]
    fn codes() {
        // clear(4) 0 6 0 end(5), all 3 bits
        assert_eq!(compress(2, &[0, 0, 0, 0]), vec![0x84, 0x51]);
        // clear(4) end(5)
        assert_eq!(compress(2, &[]), vec![0x2C]);
    }

    #[test]
    fn round_trip() {
        let pixels = [0, 1, 1, 0, 2, 2, 2, 3, 3, 3, 3, 0];
        assert_eq!(decompress(2, &compress(2, &pixels)), pixels.to_vec());
        let pixels: Vec<u8> = (0..=255).collect();
        assert_eq!(decompress(8, &compress(8, &pixels)), pixels);
    }

    #[test]
    fn dictionary_reset() {
        // enough distinct sequences to fill the 4096 entry table
        let pixels = noise(100_000, 0xFF);
        assert_eq!(decompress(8, &compress(8, &pixels)), pixels);
        let pixels = noise(100_000, 0x03);
        assert_eq!(decompress(2, &compress(2, &pixels)), pixels);
    }

    #[test]
    fn deterministic() {
        let pixels = noise(10_000, 0x0F);
        assert_eq!(compress(4, &pixels), compress(4, &pixels));
    }

    #[test]
    fn masked() {
        assert_eq!(compress(2, &[4, 5, 6, 7]), compress(2, &[0, 1, 2, 3]));
    }
}
