//! Byte order of an archive stream

use std::fmt;
use std::str::FromStr;

use crate::error::{ArchiveError, Result};

/// Byte order used for every multi-byte value of an archive
///
/// The order is recorded in the first byte of the stream, so archives written
/// on a big-endian host stay readable on a little-endian one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

impl Endianness {
    /// Byte order of the host
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }

    /// Marker byte stored at the start of a stream
    pub const fn to_marker(self) -> u8 {
        match self {
            Self::Big => 0,
            Self::Little => 1,
        }
    }

    /// Decode the marker byte stored at the start of a stream
    pub fn from_marker(marker: u8) -> Result<Self> {
        match marker {
            0 => Ok(Self::Big),
            1 => Ok(Self::Little),
            other => Err(ArchiveError::InvalidEndianMarker(other)),
        }
    }

    /// Whether values need swapping to be read on this host
    pub fn is_native(self) -> bool {
        self == Self::native()
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Big => write!(f, "big-endian"),
            Self::Little => write!(f, "little-endian"),
        }
    }
}

impl FromStr for Endianness {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "big" | "be" => Ok(Self::Big),
            "little" | "le" => Ok(Self::Little),
            "native" => Ok(Self::native()),
            _ => Err(ArchiveError::invalid_data(format!(
                "Unknown endianness: {s} (expected big, little or native)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Endianness::Big, 0)]
    #[test_case(Endianness::Little, 1)]
    fn test_marker_roundtrip(endianness: Endianness, marker: u8) {
        assert_eq!(endianness.to_marker(), marker);
        assert_eq!(Endianness::from_marker(marker).unwrap(), endianness);
    }

    #[test]
    fn test_invalid_marker() {
        assert!(matches!(
            Endianness::from_marker(2),
            Err(ArchiveError::InvalidEndianMarker(2))
        ));
    }

    #[test_case("big", Endianness::Big)]
    #[test_case("BE", Endianness::Big)]
    #[test_case("little", Endianness::Little)]
    #[test_case("le", Endianness::Little)]
    #[test_case("native", Endianness::native())]
    fn test_from_str(input: &str, expected: Endianness) {
        assert_eq!(input.parse::<Endianness>().unwrap(), expected);
    }

    #[test]
    fn test_native_is_native() {
        assert!(Endianness::native().is_native());
        assert_eq!(Endianness::default(), Endianness::native());
    }
}
