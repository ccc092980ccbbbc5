use std::io::{Read, Write};

use crate::archive::{IArchive, OArchive};
use crate::error::Result;
use crate::types::{ArchiveRead, ArchiveWrite};

impl ArchiveRead for u8 {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        archive.read_u8()
    }
}
impl ArchiveWrite for u8 {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_u8(*self)
    }

    fn archive_size(&self) -> usize {
        1
    }
}

impl ArchiveRead for u16 {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        archive.read_u16()
    }
}
impl ArchiveWrite for u16 {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_u16(*self)
    }

    fn archive_size(&self) -> usize {
        2
    }
}

impl ArchiveRead for u32 {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        archive.read_u32()
    }
}
impl ArchiveWrite for u32 {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_u32(*self)
    }

    fn archive_size(&self) -> usize {
        4
    }
}

impl ArchiveRead for i32 {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        archive.read_i32()
    }
}
impl ArchiveWrite for i32 {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_i32(*self)
    }

    fn archive_size(&self) -> usize {
        4
    }
}

impl ArchiveRead for f32 {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        archive.read_f32()
    }
}
impl ArchiveWrite for f32 {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_f32(*self)
    }

    fn archive_size(&self) -> usize {
        4
    }
}

impl<T: ArchiveRead + Default + Copy, const N: usize> ArchiveRead for [T; N] {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self> {
        let mut values = [T::default(); N];
        for value in values.iter_mut() {
            *value = archive.read()?;
        }
        Ok(values)
    }
}
impl<T: ArchiveWrite, const N: usize> ArchiveWrite for [T; N] {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_slice(self)
    }

    fn archive_size(&self) -> usize {
        self.iter().map(ArchiveWrite::archive_size).sum()
    }
}

impl<T: ArchiveWrite> ArchiveWrite for [T] {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        archive.write_slice(self)
    }

    fn archive_size(&self) -> usize {
        self.iter().map(ArchiveWrite::archive_size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::Endianness;

    #[test]
    fn test_f32_array_read_write() {
        let values = [1.0f32, 2.0, -3.5, 0.25];
        let mut archive = OArchive::with_endianness(Vec::new(), Endianness::Little).unwrap();
        archive.write(&values).unwrap();
        assert_eq!(values.archive_size(), 16);

        let bytes = archive.into_inner();
        assert_eq!(bytes.len(), 17);
        assert_eq!(&bytes[1..5], &[0x00, 0x00, 0x80, 0x3F]);

        let mut archive = IArchive::new(bytes.as_slice()).unwrap();
        let decoded: [f32; 4] = archive.read().unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_slice_size() {
        let values: &[u16] = &[1, 2, 3];
        assert_eq!(values.archive_size(), 6);
    }

    #[test]
    fn test_read_vec() {
        let data = [0x01, 0x05, 0x00, 0x06, 0x00, 0x07, 0x00];
        let mut archive = IArchive::new(&data[..]).unwrap();
        let values: Vec<u16> = archive.read_vec(3).unwrap();
        assert_eq!(values, vec![5, 6, 7]);
    }
}
