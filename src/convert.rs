//! The conversion pipeline.
//!
//! Parses the gzip header, then writes the archive strictly front to back,
//! keeping a running count of bytes written so each record that points
//! backwards (the central directory and its end record) gets the right offset.

use std::io::{BufReader, SeekFrom};

use log::{debug, info};

use crate::error::{ConvertError, ConvertResult, IoStage};
use crate::gzip::{GzipMember, GzipTrailer, TRAILER_SIZE, verify_payload};
use crate::io::{Sink, Source, Transfer};
use crate::zip::{
    CentralDirectoryHeader, DataDescriptor, EndOfCentralDirectory, LocalFileHeader, ZipDescriptor,
    narrow_u32,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Inflate the payload and check it against the gzip trailer before writing anything.
    pub verify: bool,
}

/// Where each record landed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLayout {
    pub local_header_offset: u64,
    pub central_dir_offset: u64,
    pub end_offset: u64,
    /// Total bytes written
    pub archive_size: u64,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub member: GzipMember,
    pub descriptor: ZipDescriptor,
    pub layout: ArchiveLayout,
}

/// Turns a gzip member into a single-entry ZIP archive.
///
/// The payload is moved with whatever [`Transfer`] the converter was built
/// with; the rest of the pipeline doesn't care which one it is.
///
/// ## Example
///
/// ```no_run
/// use std::fs::File;
/// use gz2zip::{BufferedCopy, Converter};
///
/// let mut input = File::open("notes.txt.gz")?;
/// let mut output = File::create("notes.zip")?;
/// let conversion = Converter::new(BufferedCopy::new()).convert(&mut input, &mut output)?;
/// println!("wrote {} bytes", conversion.layout.archive_size);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Converter<T: Transfer> {
    transfer: T,
    options: ConvertOptions,
}

impl<T: Transfer> Converter<T> {
    pub fn new(transfer: T) -> Self {
        Self::with_options(transfer, ConvertOptions::default())
    }

    pub fn with_options(transfer: T, options: ConvertOptions) -> Self {
        Self { transfer, options }
    }

    /// Convert the whole of `source` and append the archive to `sink`.
    ///
    /// Input problems (bad header, unsupported flags, oversized fields, and
    /// a failed verification) are all detected before the first byte is
    /// written. Failures after that leave a truncated archive in the sink;
    /// the caller must treat the output as garbage.
    pub fn convert<S: Source, W: Sink>(
        &mut self,
        source: &mut S,
        sink: &mut W,
    ) -> ConvertResult<Conversion> {
        let total_size = source.size().map_err(ConvertError::Stat)?;

        source.seek(SeekFrom::Start(0)).stage("seek error")?;
        let member = GzipMember::parse(&mut BufReader::new(&mut *source))?;

        let needed = member.payload_offset + TRAILER_SIZE;
        if total_size < needed {
            return Err(ConvertError::Truncated {
                size: total_size,
                needed,
            });
        }
        let payload_len = total_size - needed;
        narrow_u32("compressed size", payload_len)?;

        if self.options.verify {
            verify_payload(source, member.payload_offset, payload_len)?;
        }

        let local_header = LocalFileHeader {
            name: &member.name,
            descriptor: ZipDescriptor::DEFERRED,
        }
        .to_bytes()?;

        let mut offset = 0u64;

        let local_header_offset = offset;
        offset += write_record(sink, &local_header, "local file header")?;

        let compressed_size =
            self.transfer
                .transfer(source, sink, member.payload_offset, payload_len)?;
        offset += compressed_size;

        let trailer = GzipTrailer::read(source)?;
        let descriptor = ZipDescriptor::new(trailer, compressed_size)?;
        offset += write_record(sink, &DataDescriptor(descriptor).to_bytes(), "data descriptor")?;

        let central_dir_offset = offset;
        let central_header = CentralDirectoryHeader {
            name: &member.name,
            descriptor,
            local_header_offset,
        }
        .to_bytes()?;
        offset += write_record(sink, &central_header, "central directory header")?;

        let end_offset = offset;
        let end = EndOfCentralDirectory {
            entries: 1,
            central_directory_size: end_offset - central_dir_offset,
            central_directory_offset: central_dir_offset,
        }
        .to_bytes()?;
        offset += write_record(sink, &end, "end of central directory")?;

        sink.flush().stage("write error")?;

        info!(
            "wrote {:?}: {} compressed bytes, {} uncompressed, crc {:08x}, {} byte archive",
            member.display_name(),
            descriptor.compressed_size,
            descriptor.uncompressed_size,
            descriptor.crc32,
            offset
        );

        Ok(Conversion {
            member,
            descriptor,
            layout: ArchiveLayout {
                local_header_offset,
                central_dir_offset,
                end_offset,
                archive_size: offset,
            },
        })
    }
}

fn write_record<W: Sink>(sink: &mut W, bytes: &[u8], record: &str) -> ConvertResult<u64> {
    sink.write_all(bytes).stage("write error")?;
    debug!("wrote {} ({} bytes)", record, bytes.len());
    Ok(bytes.len() as u64)
}
