//! Joint name storage
//!
//! All names live in one contiguous text buffer. A second table stores the
//! end offset of every name, so lookups by index are O(1) and a skeleton owns
//! exactly two allocations for its names regardless of joint count.
//!
//! In an archive, the names are stored as a block: a `u32` byte length
//! followed by every name terminated by a NUL byte.

use std::fmt;
use std::ops::{Index, Range};

use rig_archive::prelude::*;

#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) struct NameTable {
    text: Box<str>,
    ends: Box<[u32]>,
}

impl NameTable {
    /// Pack `names` into a table
    ///
    /// Fails with the index of the first name that contains a NUL byte, or
    /// that pushes the text buffer past `u32::MAX` bytes.
    pub(crate) fn from_names<'a, I>(names: I) -> std::result::Result<Self, usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut text = String::new();
        let mut ends = Vec::new();
        for (index, name) in names.into_iter().enumerate() {
            if name.contains('\0') {
                return Err(index);
            }
            text.push_str(name);
            ends.push(u32::try_from(text.len()).map_err(|_| index)?);
        }
        Ok(Self {
            text: text.into_boxed_str(),
            ends: ends.into_boxed_slice(),
        })
    }

    /// Parse a NUL-terminated name block holding exactly `count` names
    pub(crate) fn from_block(block: &[u8], count: usize) -> std::result::Result<Self, String> {
        if block.is_empty() {
            return if count == 0 {
                Ok(Self::default())
            } else {
                Err(format!("Name block is empty, expected {count} names"))
            };
        }

        let Some(body) = block.strip_suffix(b"\0") else {
            return Err("Name block is not NUL-terminated".to_string());
        };

        let mut text = String::with_capacity(body.len());
        let mut ends = Vec::with_capacity(count);
        for (index, piece) in body.split(|&b| b == 0).enumerate() {
            if index == count {
                return Err(format!("Name block holds more than {count} names"));
            }
            let name = std::str::from_utf8(piece)
                .map_err(|e| format!("Name of joint {index} is not valid UTF-8: {e}"))?;
            text.push_str(name);
            ends.push(text.len() as u32);
        }

        if ends.len() != count {
            return Err(format!(
                "Name block holds {} names, expected {count}",
                ends.len()
            ));
        }

        Ok(Self {
            text: text.into_boxed_str(),
            ends: ends.into_boxed_slice(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.ends.len()
    }

    /// Size of the archived block, terminators included
    pub(crate) fn block_size(&self) -> usize {
        self.text.len() + self.ends.len()
    }

    fn range(&self, index: usize) -> Range<usize> {
        let start = match index {
            0 => 0,
            _ => self.ends[index - 1] as usize,
        };
        start..self.ends[index] as usize
    }

    pub(crate) fn view(&self) -> JointNames<'_> {
        JointNames { table: self }
    }
}

impl fmt::Debug for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}

impl ArchiveWrite for NameTable {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()> {
        let size = u32::try_from(self.block_size())
            .map_err(|_| ArchiveError::invalid_data("Name block exceeds 4 GiB"))?;
        archive.write_u32(size)?;
        for name in self.view().iter() {
            archive.write_bytes(name.as_bytes())?;
            archive.write_u8(0)?;
        }
        Ok(())
    }

    fn archive_size(&self) -> usize {
        4 + self.block_size()
    }
}

/// Read-only view over the names of a skeleton's joints, index-aligned with
/// the joint arrays
#[derive(Clone, Copy)]
pub struct JointNames<'a> {
    table: &'a NameTable,
}

impl<'a> JointNames<'a> {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Name of joint `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<&'a str> {
        let table: &'a NameTable = self.table;
        (index < table.len()).then(|| &table.text[table.range(index)])
    }

    /// Names in joint order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a str> + ExactSizeIterator + 'a {
        let table: &'a NameTable = self.table;
        (0..table.len()).map(move |index| &table.text[table.range(index)])
    }

    /// Index of the first joint called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.iter().position(|candidate| candidate == name)
    }
}

impl Index<usize> for JointNames<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.table.text[self.table.range(index)]
    }
}

impl fmt::Debug for JointNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_lookup() {
        let table = NameTable::from_names(["root", "", "spine", "héad"]).unwrap();
        let names = table.view();

        assert_eq!(names.len(), 4);
        assert_eq!(names.get(0), Some("root"));
        assert_eq!(names.get(1), Some(""));
        assert_eq!(&names[3], "héad");
        assert_eq!(names.get(4), None);
        assert_eq!(names.position("spine"), Some(2));
        assert_eq!(names.position("tail"), None);
        assert_eq!(
            names.iter().rev().collect::<Vec<_>>(),
            vec!["héad", "spine", "", "root"]
        );
    }

    #[test]
    fn test_nul_rejected() {
        assert_eq!(NameTable::from_names(["ok", "bad\0name"]), Err(1));
    }

    #[test]
    fn test_block_round_trip() {
        let table = NameTable::from_names(["a", "bc", ""]).unwrap();
        assert_eq!(table.block_size(), 6);

        let mut archive = OArchive::new(Vec::new()).unwrap();
        archive.write(&table).unwrap();
        let bytes = archive.into_inner();
        assert_eq!(bytes.len(), 1 + table.archive_size());
        assert_eq!(&bytes[5..], b"a\0bc\0\0");

        assert_eq!(NameTable::from_block(&bytes[5..], 3).unwrap(), table);
    }

    #[test]
    fn test_empty_block() {
        let table = NameTable::from_block(&[], 0).unwrap();
        assert!(table.view().is_empty());
        assert_eq!(table.block_size(), 0);
    }

    #[test_case(b"" , 1 ; "empty block with names expected")]
    #[test_case(b"abc", 1 ; "missing terminator")]
    #[test_case(b"a\0b\0", 1 ; "too many names")]
    #[test_case(b"a\0", 2 ; "too few names")]
    #[test_case(b"\xFF\0", 1 ; "invalid utf8")]
    fn test_malformed_block(block: &[u8], count: usize) {
        assert!(NameTable::from_block(block, count).is_err());
    }

    #[test]
    fn test_debug_lists_names() {
        let table = NameTable::from_names(["hip", "knee"]).unwrap();
        assert_eq!(format!("{:?}", table.view()), r#"["hip", "knee"]"#);
    }
}
