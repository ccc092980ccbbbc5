//! Output and input archive streams
//!
//! An archive starts with a single endianness marker byte. Objects are then
//! written either raw (`OArchive::write`) or inside a tagged envelope
//! (`OArchive::write_object`) made of the NUL-terminated type tag followed by
//! a `u32` version and the object payload.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::endian::Endianness;
use crate::error::{ArchiveError, Result};
use crate::types::{ArchiveLoad, ArchiveRead, ArchiveWrite, MAX_TAG_LEN, Tagged};

/// Archive writer
///
/// # Examples
///
/// ```
/// use rig_archive::{Endianness, OArchive};
///
/// let mut archive = OArchive::with_endianness(Vec::new(), Endianness::Little).unwrap();
/// archive.write_u32(0x0102_0304).unwrap();
/// assert_eq!(archive.into_inner(), [1, 4, 3, 2, 1]);
/// ```
#[derive(Debug)]
pub struct OArchive<W: Write> {
    writer: W,
    endianness: Endianness,
    bytes_written: u64,
}

impl<W: Write> OArchive<W> {
    /// Start a native-endian archive on `writer`
    pub fn new(writer: W) -> Result<Self> {
        Self::with_endianness(writer, Endianness::native())
    }

    /// Start an archive on `writer` using the given byte order
    pub fn with_endianness(writer: W, endianness: Endianness) -> Result<Self> {
        let mut archive = Self {
            writer,
            endianness,
            bytes_written: 0,
        };
        archive.write_u8(endianness.to_marker())?;
        Ok(archive)
    }

    /// Byte order used for every value written
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bytes written so far, endianness marker included
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_u8(value)?;
        self.bytes_written += 1;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        match self.endianness {
            Endianness::Little => self.writer.write_u16::<LittleEndian>(value)?,
            Endianness::Big => self.writer.write_u16::<BigEndian>(value)?,
        }
        self.bytes_written += 2;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        match self.endianness {
            Endianness::Little => self.writer.write_u32::<LittleEndian>(value)?,
            Endianness::Big => self.writer.write_u32::<BigEndian>(value)?,
        }
        self.bytes_written += 4;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        match self.endianness {
            Endianness::Little => self.writer.write_i32::<LittleEndian>(value)?,
            Endianness::Big => self.writer.write_i32::<BigEndian>(value)?,
        }
        self.bytes_written += 4;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        match self.endianness {
            Endianness::Little => self.writer.write_f32::<LittleEndian>(value)?,
            Endianness::Big => self.writer.write_f32::<BigEndian>(value)?,
        }
        self.bytes_written += 4;
        Ok(())
    }

    /// Write raw bytes, unaffected by endianness
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Write a value without any envelope
    pub fn write<T: ArchiveWrite + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.write_to(self)
    }

    /// Write every element of `values`, in order, without a count prefix
    pub fn write_slice<T: ArchiveWrite>(&mut self, values: &[T]) -> Result<()> {
        for value in values {
            value.write_to(self)?;
        }
        Ok(())
    }

    /// Write `value` inside its tag and version envelope
    pub fn write_object<T: ArchiveWrite + Tagged>(&mut self, value: &T) -> Result<()> {
        log::trace!("Writing '{}' version {}", T::TAG, T::VERSION);
        self.write_tag(T::TAG)?;
        self.write_u32(T::VERSION)?;
        value.write_to(self)
    }

    fn write_tag(&mut self, tag: &str) -> Result<()> {
        if tag.len() > MAX_TAG_LEN || tag.as_bytes().contains(&0) {
            return Err(ArchiveError::invalid_data(format!(
                "Tag '{}' is not a valid type tag",
                tag.escape_default()
            )));
        }
        self.write_bytes(tag.as_bytes())?;
        self.write_u8(0)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Archive reader
///
/// # Examples
///
/// ```
/// use rig_archive::IArchive;
///
/// let data = [0u8, 0x01, 0x02, 0x03, 0x04];
/// let mut archive = IArchive::new(&data[..]).unwrap();
/// assert_eq!(archive.read_u32().unwrap(), 0x0102_0304);
/// ```
#[derive(Debug)]
pub struct IArchive<R: Read> {
    reader: R,
    endianness: Endianness,
}

impl<R: Read> IArchive<R> {
    /// Open an archive, consuming its endianness marker
    pub fn new(mut reader: R) -> Result<Self> {
        let endianness = Endianness::from_marker(reader.read_u8()?)?;
        if !endianness.is_native() {
            log::debug!("Archive is {endianness}, swapping bytes on read");
        }
        Ok(Self { reader, endianness })
    }

    /// Byte order of the archive content
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.reader.read_u8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(match self.endianness {
            Endianness::Little => self.reader.read_u16::<LittleEndian>()?,
            Endianness::Big => self.reader.read_u16::<BigEndian>()?,
        })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(match self.endianness {
            Endianness::Little => self.reader.read_u32::<LittleEndian>()?,
            Endianness::Big => self.reader.read_u32::<BigEndian>()?,
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(match self.endianness {
            Endianness::Little => self.reader.read_i32::<LittleEndian>()?,
            Endianness::Big => self.reader.read_i32::<BigEndian>()?,
        })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(match self.endianness {
            Endianness::Little => self.reader.read_f32::<LittleEndian>()?,
            Endianness::Big => self.reader.read_f32::<BigEndian>()?,
        })
    }

    /// Read exactly `len` raw bytes
    ///
    /// The buffer grows with the data actually present, so a corrupted length
    /// fails with an I/O error instead of a huge up-front allocation.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, stream ended after {}", buf.len()),
            )
            .into());
        }
        Ok(buf)
    }

    /// Read a value written without an envelope
    pub fn read<T: ArchiveRead>(&mut self) -> Result<T> {
        T::read_from(self)
    }

    /// Read `count` consecutive values
    pub fn read_vec<T: ArchiveRead>(&mut self, count: usize) -> Result<Vec<T>> {
        let mut values = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            values.push(T::read_from(self)?);
        }
        Ok(values)
    }

    /// Read an object envelope for `T` and reload `target` from its payload
    ///
    /// Tag and version are checked before `target` is handed to
    /// `ArchiveLoad::load`, so a mismatch leaves `target` untouched.
    pub fn load_object<T: ArchiveLoad + Tagged>(&mut self, target: &mut T) -> Result<()> {
        let version = self.read_envelope::<T>()?;
        target.load(self, version)
    }

    /// Read an object envelope for `T` into a new value
    pub fn read_object<T: ArchiveLoad + Tagged + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.load_object(&mut value)?;
        Ok(value)
    }

    fn read_envelope<T: Tagged>(&mut self) -> Result<u32> {
        let tag = self.read_tag()?;
        if tag != T::TAG {
            return Err(ArchiveError::TagMismatch {
                expected: T::TAG.to_string(),
                found: tag,
            });
        }

        let version = self.read_u32()?;
        if !T::supports_version(version) {
            log::warn!(
                "Rejecting '{}' version {version}, this reader supports up to {}",
                T::TAG,
                T::VERSION
            );
            return Err(ArchiveError::unsupported_version(T::TAG, version, T::VERSION));
        }

        log::trace!("Reading '{}' version {version}", T::TAG);
        Ok(version)
    }

    fn read_tag(&mut self) -> Result<String> {
        let mut bytes = Vec::with_capacity(16);
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                break;
            }
            if bytes.len() == MAX_TAG_LEN {
                return Err(ArchiveError::invalid_data(format!(
                    "Type tag exceeds {MAX_TAG_LEN} bytes"
                )));
            }
            bytes.push(byte);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> IArchive<R> {
    /// Check whether the next object in the stream is a `T`, without consuming it
    pub fn test_tag<T: Tagged>(&mut self) -> Result<bool> {
        let start = self.reader.stream_position()?;
        let matches = match self.read_tag() {
            Ok(tag) => tag == T::TAG,
            Err(e) if e.is_unexpected_eof() => false,
            Err(ArchiveError::InvalidData(_)) => false,
            Err(e) => return Err(e),
        };
        self.reader.seek(SeekFrom::Start(start))?;
        Ok(matches)
    }
}
