//! Constants and value types of the ZIP format (PKWARE APPNOTE 6.3.x).
//!
//! Every record this tool writes uses the same handful of fixed field values,
//! so they live here rather than scattered through the encoders.

use crate::error::{ConvertError, ConvertResult};
use crate::gzip::GzipTrailer;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// Local File Header (LFH) - 30 bytes plus the name
pub const LFH_SIGNATURE: &[u8; 4] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// Data descriptor without the optional signature - 12 bytes
pub const DATA_DESCRIPTOR_SIZE: usize = 12;

/// Central Directory File Header (CDFH) - 46 bytes plus the name
pub const CDFH_SIGNATURE: &[u8; 4] = b"PK\x01\x02";
pub const CDFH_MIN_SIZE: usize = 46;

/// End of Central Directory (EOCD) - 22 bytes without a comment
pub const EOCD_SIGNATURE: &[u8; 4] = b"PK\x05\x06";
pub const EOCD_SIZE: usize = 22;

/// 1.0: enough to extract a plain deflated file.
pub const VERSION_NEEDED_LOCAL: u16 = 10;
/// 2.0, MS-DOS host.
pub const VERSION_MADE_BY: u16 = 20;
pub const VERSION_NEEDED_CENTRAL: u16 = 20;

/// General purpose bit 3: CRC-32 and sizes follow the data in a descriptor.
pub const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// CRC-32 and sizes of the single entry.
///
/// The same value goes into the data descriptor and the central directory,
/// so the two always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZipDescriptor {
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
}

impl ZipDescriptor {
    /// What the local header carries when bit 3 defers the real values.
    pub const DEFERRED: ZipDescriptor = ZipDescriptor {
        crc32: 0,
        compressed_size: 0,
        uncompressed_size: 0,
    };

    /// Combine the gzip trailer with the measured payload length.
    pub fn new(trailer: GzipTrailer, compressed_size: u64) -> ConvertResult<Self> {
        Ok(Self {
            crc32: trailer.crc32,
            compressed_size: narrow_u32("compressed size", compressed_size)?,
            uncompressed_size: trailer.uncompressed_size,
        })
    }
}

/// Fit a byte count or offset into a 32-bit ZIP field.
pub(crate) fn narrow_u32(field: &'static str, value: u64) -> ConvertResult<u32> {
    u32::try_from(value).map_err(|_| ConvertError::TooLarge { field, value })
}
