//! Bit-level I/O utilities for the container format.
//!
//! All bit streams in huffpack are packed MSB first: the first bit written
//! lands in the highest bit of the first byte. Lengths are tracked in bits,
//! never inferred from the byte count, so trailing pad bits stay invisible.

use std::fmt;

/// An owned, MSB-first bit sequence with an exact bit length.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    /// Create an empty bit sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `bytes` holding `len` bits.
    ///
    /// Returns `None` if `bytes` is too short for `len` bits. Extra bytes are
    /// dropped and unused bits in the final byte are cleared, so two `Bits`
    /// with the same logical content always compare equal.
    pub fn from_bytes(mut bytes: Vec<u8>, len: usize) -> Option<Self> {
        let needed = len.div_ceil(8);
        if bytes.len() < needed {
            return None;
        }
        bytes.truncate(needed);
        let tail = len % 8;
        if tail != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFF << (8 - tail);
            }
        }
        Some(Self { bytes, len })
    }

    /// Parse a string of `'0'` and `'1'` characters.
    pub fn from_bit_str(s: &str) -> Option<Self> {
        let mut writer = BitWriter::with_capacity(s.len().div_ceil(8));
        for c in s.chars() {
            match c {
                '0' => writer.write_bit(false),
                '1' => writer.write_bit(true),
                _ => return None,
            }
        }
        Some(writer.finish())
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Backing bytes; the final byte is zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Bit at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }

    /// Reader positioned at the first bit.
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::with_len(&self.bytes, self.len)
    }

    /// Render as a `'0'`/`'1'` string.
    pub fn to_bit_string(&self) -> String {
        self.iter().map(|b| if b { '1' } else { '0' }).collect()
    }
}

impl fmt::Debug for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 64;
        let shown: String = self
            .iter()
            .take(PREVIEW)
            .map(|b| if b { '1' } else { '0' })
            .collect();
        let ellipsis = if self.len > PREVIEW { "..." } else { "" };
        write!(f, "Bits({}: {}{})", self.len, shown, ellipsis)
    }
}

/// A growable bit writer that packs bits MSB first and pads with zeros.
#[derive(Debug)]
pub struct BitWriter {
    buffer: Vec<u8>,
    current_byte: u8,
    bit_position: u8, // Counts from 8 down to 0
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new bit writer with specified byte capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            current_byte: 0,
            bit_position: 8,
            bit_len: 0,
        }
    }

    /// Write the low `num_bits` bits of `value`, most significant first.
    #[inline]
    pub fn write_bits(&mut self, value: u64, num_bits: u8) {
        debug_assert!(num_bits <= 64);

        let mut remaining = num_bits;
        while remaining > 0 {
            let to_write = remaining.min(self.bit_position);

            // Take the top `to_write` of the remaining bits
            let shift = remaining - to_write;
            let mask = (1u64 << to_write) - 1;
            let bits = ((value >> shift) & mask) as u8;

            self.bit_position -= to_write;
            self.current_byte |= bits << self.bit_position;
            remaining -= to_write;

            if self.bit_position == 0 {
                self.buffer.push(self.current_byte);
                self.current_byte = 0;
                self.bit_position = 8;
            }
        }
        self.bit_len += num_bits as usize;
    }

    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u64, 1);
    }

    /// Append every bit of `bits`.
    pub fn write_all(&mut self, bits: &Bits) {
        let full_bytes = bits.len() / 8;
        if self.bit_position == 8 {
            self.buffer.extend_from_slice(&bits.as_bytes()[..full_bytes]);
            self.bit_len += full_bytes * 8;
        } else {
            for &byte in &bits.as_bytes()[..full_bytes] {
                self.write_bits(byte as u64, 8);
            }
        }

        let tail = (bits.len() % 8) as u8;
        if tail > 0 {
            let last = bits.as_bytes()[full_bytes] >> (8 - tail);
            self.write_bits(last as u64, tail);
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Finish writing and return the exact bit sequence.
    #[must_use]
    pub fn finish(mut self) -> Bits {
        if self.bit_position < 8 {
            self.buffer.push(self.current_byte);
        }
        Bits {
            bytes: self.buffer,
            len: self.bit_len,
        }
    }

    /// Finish writing and return the bytes, zero-padded to a byte boundary.
    #[must_use]
    pub fn into_padded_bytes(self) -> Vec<u8> {
        self.finish().into_bytes()
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded MSB-first bit reader over a byte slice.
///
/// Reads return `None` instead of running past the end; callers translate
/// that into an error naming the field they were reading.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    start: usize,
    pos: usize,
    end: usize,
}

impl<'a> BitReader<'a> {
    /// Reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_len(data, data.len() * 8)
    }

    /// Reader over the first `len` bits of `data`.
    pub fn with_len(data: &'a [u8], len: usize) -> Self {
        debug_assert!(len <= data.len() * 8);
        Self {
            data,
            start: 0,
            pos: 0,
            end: len,
        }
    }

    /// Bits consumed since this reader's start.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos - self.start
    }

    /// Bits left before the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Total bits visible to this reader.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.end
    }

    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.end {
            return None;
        }
        let bit = (self.data[self.pos / 8] >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Some(bit == 1)
    }

    /// Read `n` bits (at most 64) MSB-first.
    pub fn read_bits(&mut self, n: u8) -> Option<u64> {
        debug_assert!(n <= 64);
        if self.remaining() < n as usize {
            return None;
        }

        let mut value = 0u64;
        let mut remaining = n;
        while remaining > 0 {
            let offset = (self.pos % 8) as u8;
            let available = 8 - offset;
            let take = remaining.min(available);

            let byte = self.data[self.pos / 8];
            let bits = (byte >> (available - take)) & ((1u16 << take) - 1) as u8;

            value = (value << take) | bits as u64;
            self.pos += take as usize;
            remaining -= take;
        }
        Some(value)
    }

    /// Copy the next `len` bits into an owned [`Bits`].
    pub fn read_into(&mut self, len: usize) -> Option<Bits> {
        if self.remaining() < len {
            return None;
        }

        if self.pos % 8 == 0 {
            let first = self.pos / 8;
            let bytes = self.data[first..first + len.div_ceil(8)].to_vec();
            self.pos += len;
            return Bits::from_bytes(bytes, len);
        }

        let mut writer = BitWriter::with_capacity(len.div_ceil(8));
        let mut left = len;
        while left >= 8 {
            writer.write_bits(self.read_bits(8)?, 8);
            left -= 8;
        }
        if left > 0 {
            writer.write_bits(self.read_bits(left as u8)?, left as u8);
        }
        Some(writer.finish())
    }

    /// Split off a reader over the next `len` bits and advance past them.
    pub fn split(&mut self, len: usize) -> Option<BitReader<'a>> {
        if self.remaining() < len {
            return None;
        }
        let sub = BitReader {
            data: self.data,
            start: self.pos,
            pos: self.pos,
            end: self.pos + len,
        };
        self.pos += len;
        Some(sub)
    }
}
