//! Binary archive streams for runtime animation data.
//!
//! An archive is a byte stream that starts with an endianness marker and then
//! holds objects written in a fixed field order. Top-level objects are wrapped
//! in an envelope made of a type tag and a format version, so readers can
//! detect foreign content and reject versions newer than they understand.
//!
//! ```
//! use rig_archive::prelude::*;
//!
//! let mut archive = OArchive::new(Vec::new()).unwrap();
//! archive.write(&[1.0f32, 2.0, 3.0, 4.0]).unwrap();
//! let bytes = archive.into_inner();
//!
//! let mut archive = IArchive::new(bytes.as_slice()).unwrap();
//! let values: [f32; 4] = archive.read().unwrap();
//! assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
//! ```

pub mod archive;
pub mod endian;
pub mod error;
pub mod std_impls;
pub mod types;

pub use archive::{IArchive, OArchive};
pub use endian::Endianness;
pub use error::{ArchiveError, Result};
pub use types::{ArchiveLoad, ArchiveRead, ArchiveWrite, MAX_TAG_LEN, Tagged};

pub mod prelude {
    pub use crate::archive::{IArchive, OArchive};
    pub use crate::endian::Endianness;
    pub use crate::error::{ArchiveError, Result};
    pub use crate::types::{ArchiveLoad, ArchiveRead, ArchiveWrite, Tagged};
    pub use std::io::{Read, Seek, Write};
}
