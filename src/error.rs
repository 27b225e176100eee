//! Error types and the related `Result<T>`

use std::fmt;
use std::io;

use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Optional gzip header fields this tool refuses to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GzipFeature {
    /// FHCRC, flag bit 1
    HeaderCrc,
    /// FEXTRA, flag bit 2
    ExtraField,
    /// FCOMMENT, flag bit 4
    Comment,
}

impl GzipFeature {
    /// The flag bit announcing this field in the gzip FLG byte.
    pub fn flag(self) -> u8 {
        match self {
            GzipFeature::HeaderCrc => 0x02,
            GzipFeature::ExtraField => 0x04,
            GzipFeature::Comment => 0x10,
        }
    }
}

impl fmt::Display for GzipFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GzipFeature::HeaderCrc => "header crc",
            GzipFeature::ExtraField => "extra field",
            GzipFeature::Comment => "comment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Fewer than the fixed 10 header bytes were available.
    #[error("gzip error: truncated header")]
    MalformedHeader,

    #[error("not gzip")]
    NotGzip,

    #[error("not deflate (compression method {0})")]
    UnsupportedMethod(u8),

    /// Reserved flag bits 5-7 were set.
    #[error("invalid flag 0x{0:02x}")]
    InvalidFlags(u8),

    #[error("{0} not implemented (flag 0x{flag:02x})", flag = .0.flag())]
    UnsupportedFeature(GzipFeature),

    /// An error from underlying I/O, tagged with the stage that failed
    #[error("{stage}")]
    Io {
        stage: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{stage}: expected {expected} bytes, got {actual}")]
    ShortRead {
        stage: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("short transfer: expected {expected} bytes, moved {actual}")]
    ShortTransfer { expected: u64, actual: u64 },

    #[error("stat error")]
    Stat(#[source] io::Error),

    /// The input can't hold its own header plus the 8 byte trailer.
    #[error("gzip error: {size} byte input is shorter than the {needed} bytes of header and trailer")]
    Truncated { size: u64, needed: u64 },

    #[error("file name of {0} bytes does not fit in a zip header")]
    NameTooLong(usize),

    /// A 32-bit ZIP field overflowed. ZIP64 isn't supported.
    #[error("{field} of {value} does not fit in a zip header")]
    TooLarge { field: &'static str, value: u64 },

    #[error("crc mismatch: trailer says {expected:08x}, payload is {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("size mismatch: trailer says {expected} bytes, payload inflates to {actual}")]
    SizeMismatch { expected: u32, actual: u32 },
}

/// Attach a stage label to a raw I/O result.
pub(crate) trait IoStage<T> {
    fn stage(self, stage: &'static str) -> ConvertResult<T>;
}

impl<T> IoStage<T> for io::Result<T> {
    fn stage(self, stage: &'static str) -> ConvertResult<T> {
        self.map_err(|source| ConvertError::Io { stage, source })
    }
}
