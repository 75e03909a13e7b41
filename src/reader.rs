use binread::io::Cursor;
use binread::BinReaderExt;

use crate::error::DecodeError;

/// Sequential little-endian reader over an in-memory byte slice.
///
/// The cursor only ever moves forward during decoding; `seek` exists so the
/// RLE decoder can skip the fixed-size header.
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
    len: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteReader {
            cursor: Cursor::new(bytes),
            len: bytes.len(),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.len.saturating_sub(self.position())
    }

    pub fn seek(&mut self, pos: usize) {
        self.cursor.set_position(pos as u64);
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let offset = self.position();
        self.cursor
            .read_le()
            .map_err(|_| DecodeError::TruncatedInput { offset })
    }

    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        let offset = self.position();
        self.cursor
            .read_le()
            .map_err(|_| DecodeError::TruncatedInput { offset })
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let offset = self.position();
        self.cursor
            .read_le()
            .map_err(|_| DecodeError::TruncatedInput { offset })
    }
}
