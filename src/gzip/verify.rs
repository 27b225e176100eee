use std::io::{self, Read, SeekFrom};

use flate2::CrcReader;
use flate2::read::DeflateDecoder;
use log::info;

use crate::error::{ConvertError, ConvertResult, IoStage};
use crate::io::Source;

use super::GzipTrailer;

/// Inflate the payload and check it against the trailer.
///
/// `len` is the compressed length, i.e. everything between `payload_offset`
/// and the trailer. On success the source is left at `payload_offset`.
pub fn verify_payload<S: Source + ?Sized>(
    source: &mut S,
    payload_offset: u64,
    len: u64,
) -> ConvertResult<GzipTrailer> {
    source
        .seek(SeekFrom::Start(payload_offset))
        .stage("seek error")?;

    let (actual_crc, actual_size) = {
        let mut inflater = CrcReader::new(DeflateDecoder::new((&mut *source).take(len)));
        io::copy(&mut inflater, &mut io::sink()).stage("inflate error")?;
        (inflater.crc().sum(), inflater.crc().amount())
    };

    // The decoder may stop short of `len` if the stream ends early.
    source
        .seek(SeekFrom::Start(payload_offset + len))
        .stage("seek error")?;
    let trailer = GzipTrailer::read(&mut *source)?;
    if trailer.crc32 != actual_crc {
        return Err(ConvertError::ChecksumMismatch {
            expected: trailer.crc32,
            actual: actual_crc,
        });
    }
    if trailer.uncompressed_size != actual_size {
        return Err(ConvertError::SizeMismatch {
            expected: trailer.uncompressed_size,
            actual: actual_size,
        });
    }
    info!("verified payload: crc {:08x}, {} bytes", actual_crc, actual_size);

    source
        .seek(SeekFrom::Start(payload_offset))
        .stage("seek error")?;
    Ok(trailer)
}
