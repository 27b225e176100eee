//! Encoders for the four records of a single-entry archive.
//!
//! Each record is built from values that are already known, so encoding is
//! pure: no I/O, no state. Field layouts follow APPNOTE section 4.3.

use byteorder::{ByteOrder, LittleEndian};

use super::structures::*;
use crate::error::{ConvertError, ConvertResult};

/// Appends little-endian fields to a record buffer.
struct RecordBuf(Vec<u8>);

impl RecordBuf {
    fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.0.extend_from_slice(bytes);
        self
    }

    fn u16(&mut self, value: u16) -> &mut Self {
        let mut field = [0u8; 2];
        LittleEndian::write_u16(&mut field, value);
        self.bytes(&field)
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        let mut field = [0u8; 4];
        LittleEndian::write_u32(&mut field, value);
        self.bytes(&field)
    }

    fn descriptor(&mut self, descriptor: &ZipDescriptor) -> &mut Self {
        self.u32(descriptor.crc32)
            .u32(descriptor.compressed_size)
            .u32(descriptor.uncompressed_size)
    }

    fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

fn name_len(name: &[u8]) -> ConvertResult<u16> {
    u16::try_from(name.len()).map_err(|_| ConvertError::NameTooLong(name.len()))
}

/// 4.3.7 Local file header
#[derive(Debug, Clone)]
pub struct LocalFileHeader<'a> {
    pub name: &'a [u8],
    /// Normally [`ZipDescriptor::DEFERRED`], since bit 3 is set.
    pub descriptor: ZipDescriptor,
}

impl LocalFileHeader<'_> {
    pub fn to_bytes(&self) -> ConvertResult<Vec<u8>> {
        let name_len = name_len(self.name)?;
        Ok(RecordBuf::with_capacity(LFH_SIZE + self.name.len())
            .bytes(LFH_SIGNATURE)
            .u16(VERSION_NEEDED_LOCAL)
            .u16(FLAG_DATA_DESCRIPTOR)
            .u16(CompressionMethod::Deflate.as_u16())
            // last mod file time, last mod file date
            .u16(0)
            .u16(0)
            .descriptor(&self.descriptor)
            .u16(name_len)
            // extra field length
            .u16(0)
            .bytes(self.name)
            .finish())
    }
}

/// 4.3.9 Data descriptor, written without its optional signature
#[derive(Debug, Clone, Copy)]
pub struct DataDescriptor(pub ZipDescriptor);

impl DataDescriptor {
    pub fn to_bytes(&self) -> Vec<u8> {
        RecordBuf::with_capacity(DATA_DESCRIPTOR_SIZE)
            .descriptor(&self.0)
            .finish()
    }
}

/// 4.3.12 Central directory header
#[derive(Debug, Clone)]
pub struct CentralDirectoryHeader<'a> {
    pub name: &'a [u8],
    pub descriptor: ZipDescriptor,
    pub local_header_offset: u64,
}

impl CentralDirectoryHeader<'_> {
    pub fn to_bytes(&self) -> ConvertResult<Vec<u8>> {
        let name_len = name_len(self.name)?;
        let offset = narrow_u32("local header offset", self.local_header_offset)?;
        Ok(RecordBuf::with_capacity(CDFH_MIN_SIZE + self.name.len())
            .bytes(CDFH_SIGNATURE)
            .u16(VERSION_MADE_BY)
            .u16(VERSION_NEEDED_CENTRAL)
            .u16(FLAG_DATA_DESCRIPTOR)
            .u16(CompressionMethod::Deflate.as_u16())
            .u16(0)
            .u16(0)
            .descriptor(&self.descriptor)
            .u16(name_len)
            // extra field length, file comment length, disk number start,
            // internal attributes
            .u16(0)
            .u16(0)
            .u16(0)
            .u16(0)
            // external attributes
            .u32(0)
            .u32(offset)
            .bytes(self.name)
            .finish())
    }
}

/// 4.3.16 End of central directory record, for a single disk with no comment
#[derive(Debug, Clone, Copy)]
pub struct EndOfCentralDirectory {
    pub entries: u16,
    pub central_directory_size: u64,
    pub central_directory_offset: u64,
}

impl EndOfCentralDirectory {
    pub fn to_bytes(&self) -> ConvertResult<Vec<u8>> {
        let size = narrow_u32("central directory size", self.central_directory_size)?;
        let offset = narrow_u32("central directory offset", self.central_directory_offset)?;
        Ok(RecordBuf::with_capacity(EOCD_SIZE)
            .bytes(EOCD_SIGNATURE)
            // number of this disk, disk with the central directory
            .u16(0)
            .u16(0)
            // entries on this disk, total entries
            .u16(self.entries)
            .u16(self.entries)
            .u32(size)
            .u32(offset)
            // comment length
            .u16(0)
            .finish())
    }
}
