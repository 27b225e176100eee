//! gzip member parsing.
//!
//! A gzip member (RFC 1952) is a small header, a raw DEFLATE stream, and an
//! eight byte trailer. Only the header and trailer are decoded here; the
//! DEFLATE bytes in between are never touched unless verification is asked for.
//!
//! Accepted subset:
//!
//! - magic `1f 8b`, compression method 8
//! - FNAME is the only optional field allowed; FEXTRA, FCOMMENT and FHCRC
//!   are rejected rather than skipped

mod header;
mod trailer;
mod verify;

pub use header::GzipMember;
pub use trailer::GzipTrailer;
pub use verify::verify_payload;

use std::io::{self, Read};

/// gzip magic bytes (ID1, ID2)
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// CM value for DEFLATE
pub const METHOD_DEFLATE: u8 = 8;
/// Size of the fixed part of the header
pub const HEADER_SIZE: usize = 10;
/// CRC-32 plus ISIZE
pub const TRAILER_SIZE: u64 = 8;

/// FLG bits
pub const FLAG_HCRC: u8 = 0x02;
pub const FLAG_EXTRA: u8 = 0x04;
pub const FLAG_NAME: u8 = 0x08;
pub const FLAG_COMMENT: u8 = 0x10;
pub const FLAG_RESERVED: u8 = 0xe0;

/// Read until `buf` is full or the reader hits EOF, returning the count read.
///
/// Unlike [`Read::read_exact`], a short read is reported as a count so the
/// caller can pick the right error.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((b, rest)) if !buf.is_empty() => {
                    buf[0] = *b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn read_full_keeps_going_after_partial_reads() {
        let mut buf = [0u8; 4];
        assert_eq!(read_full(&mut Trickle(b"abcdef"), &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");

        let mut buf = [0u8; 4];
        assert_eq!(read_full(&mut Trickle(b"ab"), &mut buf).unwrap(), 2);
    }
}
