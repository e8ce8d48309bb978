//! Byte sources and sinks the codec reads from and writes to.

use alloc::vec::Vec;

use crate::error::BmpError;

/// Sequential, seekable byte input for [`crate::decode_from`].
///
/// Every short read is reported as [`BmpError::Truncated`].
pub trait ByteSource {
    /// Fill `buf` completely or fail.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BmpError>;

    /// Move to an absolute byte offset.
    fn seek_to(&mut self, pos: u64) -> Result<(), BmpError>;

    /// Total length of the source, if it can be determined.
    fn total_len(&mut self) -> Result<Option<u64>, BmpError> {
        Ok(None)
    }

    /// Discard the next `n` bytes.
    fn skip(&mut self, mut n: usize) -> Result<(), BmpError> {
        let mut scratch = [0u8; 32];
        while n > 0 {
            let chunk = n.min(scratch.len());
            self.read_exact(&mut scratch[..chunk])?;
            n -= chunk;
        }
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn read_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn read_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

/// Sequential byte output for [`crate::encode_to`].
pub trait ByteSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), BmpError>;

    fn flush(&mut self) -> Result<(), BmpError> {
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), BmpError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Cursor over an in-memory buffer.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        let end = self.pos.checked_add(buf.len()).ok_or(BmpError::Truncated)?;
        let src = self.data.get(self.pos..end).ok_or(BmpError::Truncated)?;
        buf.copy_from_slice(src);
        self.pos = end;
        Ok(())
    }

    fn seek_to(&mut self, pos: u64) -> Result<(), BmpError> {
        let pos = usize::try_from(pos).map_err(|_| BmpError::Truncated)?;
        if pos > self.data.len() {
            return Err(BmpError::Truncated);
        }
        self.pos = pos;
        Ok(())
    }

    fn total_len(&mut self) -> Result<Option<u64>, BmpError> {
        Ok(Some(self.data.len() as u64))
    }

    fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        let new_pos = self.pos.checked_add(n).ok_or(BmpError::Truncated)?;
        if new_pos > self.data.len() {
            return Err(BmpError::Truncated);
        }
        self.pos = new_pos;
        Ok(())
    }
}

/// Adapter for any [`std::io::Read`] + [`std::io::Seek`] stream.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> ByteSource for IoSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        std::io::Read::read_exact(&mut self.inner, buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => BmpError::Truncated,
            _ => BmpError::Io(e),
        })
    }

    fn seek_to(&mut self, pos: u64) -> Result<(), BmpError> {
        std::io::Seek::seek(&mut self.inner, std::io::SeekFrom::Start(pos))
            .map(|_| ())
            .map_err(BmpError::Io)
    }

    fn total_len(&mut self) -> Result<Option<u64>, BmpError> {
        use std::io::{Seek, SeekFrom};

        let here = self.inner.stream_position().map_err(BmpError::Io)?;
        let end = self.inner.seek(SeekFrom::End(0)).map_err(BmpError::Io)?;
        self.inner.seek(SeekFrom::Start(here)).map_err(BmpError::Io)?;
        Ok(Some(end))
    }
}

/// Adapter for any [`std::io::Write`] stream. Write errors become
/// [`BmpError::WriteFailed`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> ByteSink for IoSink<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), BmpError> {
        std::io::Write::write_all(&mut self.inner, bytes).map_err(BmpError::WriteFailed)
    }

    fn flush(&mut self) -> Result<(), BmpError> {
        std::io::Write::flush(&mut self.inner).map_err(BmpError::WriteFailed)
    }
}
