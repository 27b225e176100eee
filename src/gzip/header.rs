use std::borrow::Cow;
use std::io::{BufRead, Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::error::{ConvertError, ConvertResult, GzipFeature, IoStage};

use super::*;

/// Entry name used when the gzip header carries no FNAME.
pub const DEFAULT_NAME: &[u8] = b"-";

/// A ZIP name holds at most 65535 bytes; one more leaves room for the terminator.
const MAX_NAME_FIELD: u64 = u16::MAX as u64 + 1;

/// The parts of a gzip header that survive into the ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GzipMember {
    /// Raw FNAME bytes, without the terminator, or `-` if absent.
    pub name: Vec<u8>,
    /// Offset of the first DEFLATE byte in the input.
    pub payload_offset: u64,
    /// MTIME as stored; informational only.
    pub mtime: u32,
    /// Originating OS byte; informational only.
    pub os: u8,
}

impl GzipMember {
    /// Parse and validate a gzip header from the start of `reader`.
    ///
    /// Consumes exactly the header (and filename, if any), leaving the
    /// reader at the first DEFLATE byte.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::MalformedHeader`] if fewer than 10 bytes are available
    /// - [`ConvertError::NotGzip`] on a bad magic number
    /// - [`ConvertError::UnsupportedMethod`] if the method isn't DEFLATE
    /// - [`ConvertError::InvalidFlags`] if a reserved flag bit is set
    /// - [`ConvertError::UnsupportedFeature`] for FEXTRA, FCOMMENT or FHCRC
    /// - [`ConvertError::NameTooLong`] if the filename can't fit in a ZIP header
    /// - [`ConvertError::ShortRead`] if the filename never terminates
    pub fn parse<R: BufRead>(reader: &mut R) -> ConvertResult<Self> {
        let mut header = [0u8; HEADER_SIZE];
        let n = read_full(reader, &mut header).stage("gzip header read error")?;
        if n < HEADER_SIZE {
            return Err(ConvertError::MalformedHeader);
        }

        if header[0..2] != GZIP_MAGIC {
            return Err(ConvertError::NotGzip);
        }
        if header[2] != METHOD_DEFLATE {
            return Err(ConvertError::UnsupportedMethod(header[2]));
        }

        let flags = header[3];
        if flags & FLAG_RESERVED != 0 {
            return Err(ConvertError::InvalidFlags(flags));
        }
        for feature in [
            GzipFeature::ExtraField,
            GzipFeature::Comment,
            GzipFeature::HeaderCrc,
        ] {
            if flags & feature.flag() != 0 {
                return Err(ConvertError::UnsupportedFeature(feature));
            }
        }

        let mut cursor = Cursor::new(&header[4..]);
        let mtime = cursor.read_u32::<LittleEndian>().stage("gzip header read error")?;
        let _xfl = cursor.read_u8().stage("gzip header read error")?;
        let os = cursor.read_u8().stage("gzip header read error")?;

        let mut payload_offset = HEADER_SIZE as u64;
        let name = if flags & FLAG_NAME != 0 {
            let mut name = Vec::new();
            let n = Read::take(&mut *reader, MAX_NAME_FIELD)
                .read_until(0, &mut name)
                .stage("read error")?;
            payload_offset += n as u64;
            if name.pop() != Some(0) {
                if n as u64 == MAX_NAME_FIELD {
                    return Err(ConvertError::NameTooLong(n));
                }
                return Err(ConvertError::ShortRead {
                    stage: "gzip file name",
                    expected: n as u64 + 1,
                    actual: n as u64,
                });
            }
            name
        } else {
            DEFAULT_NAME.to_vec()
        };

        let member = GzipMember {
            name,
            payload_offset,
            mtime,
            os,
        };
        debug!(
            "gzip header: name {:?}, mtime {}, os {}, payload at {}",
            member.display_name(),
            member.mtime,
            member.os,
            member.payload_offset
        );
        Ok(member)
    }

    /// Lossy UTF-8 view of the name, for messages.
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}
