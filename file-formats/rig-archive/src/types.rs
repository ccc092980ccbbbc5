use std::io::{Read, Write};

use crate::archive::{IArchive, OArchive};
use crate::error::Result;

/// A value that can be read back from an archive without version information
pub trait ArchiveRead: Sized {
    fn read_from<R: Read>(archive: &mut IArchive<R>) -> Result<Self>;
}

/// A value that can be written to an archive
pub trait ArchiveWrite {
    fn write_to<W: Write>(&self, archive: &mut OArchive<W>) -> Result<()>;

    /// Number of payload bytes `write_to` produces
    fn archive_size(&self) -> usize;
}

/// An object that is reloaded in place from a versioned archive payload
///
/// `version` is the number stored in the object envelope. Implementations
/// must reject versions they do not understand before modifying `self`.
pub trait ArchiveLoad {
    fn load<R: Read>(&mut self, archive: &mut IArchive<R>, version: u32) -> Result<()>;
}

/// On-disk identity of an archived object type
pub trait Tagged {
    /// Short symbolic tag written in front of every object of this type
    const TAG: &'static str;

    /// Current format version, written by `OArchive::write_object`
    const VERSION: u32;

    /// Whether a reader of this type can interpret `version`
    fn supports_version(version: u32) -> bool {
        (1..=Self::VERSION).contains(&version)
    }
}

/// Maximum length of a type tag, terminator excluded
pub const MAX_TAG_LEN: usize = 64;
