use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{ConvertError, ConvertResult};

/// The eight bytes following the DEFLATE stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipTrailer {
    pub crc32: u32,
    /// ISIZE: uncompressed length modulo 2^32
    pub uncompressed_size: u32,
}

impl GzipTrailer {
    /// Read the trailer from a reader positioned right after the payload.
    ///
    /// The values are taken as written; nothing is checked against the payload.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> ConvertResult<Self> {
        let crc32 = read_field(reader, "crc read error")?;
        let uncompressed_size = read_field(reader, "size read error")?;
        Ok(GzipTrailer {
            crc32,
            uncompressed_size,
        })
    }
}

fn read_field<R: Read + ?Sized>(reader: &mut R, stage: &'static str) -> ConvertResult<u32> {
    let mut buf = [0u8; 4];
    let n = super::read_full(reader, &mut buf).map_err(|source| ConvertError::Io { stage, source })?;
    if n < buf.len() {
        return Err(ConvertError::ShortRead {
            stage,
            expected: buf.len() as u64,
            actual: n as u64,
        });
    }
    io::Cursor::new(buf)
        .read_u32::<LittleEndian>()
        .map_err(|source| ConvertError::Io { stage, source })
}
