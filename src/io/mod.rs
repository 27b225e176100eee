//! Byte sources, sinks, and the strategies that move a payload between them.
//!
//! The converter never needs random access on the output side: everything is
//! appended in order. The input only needs to be seekable and to report its
//! size, much like a `pread`-style reader.

mod buffered;
mod local;
mod splice;

pub use buffered::BufferedCopy;
pub use splice::SpliceCopy;

use std::io::{self, Read, Seek, Write};
#[cfg(unix)]
use std::os::fd::RawFd;

use crate::error::ConvertResult;

/// A seekable input with a known total size.
pub trait Source: Read + Seek {
    /// Get the total size of the data source
    fn size(&self) -> io::Result<u64>;

    /// The underlying descriptor, if this is backed by one.
    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        None
    }
}

/// An append-only output.
pub trait Sink: Write {
    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        None
    }
}

/// Copies `len` payload bytes starting at `offset` in the source to the sink.
///
/// Implementations must leave the source positioned at `offset + len` and
/// return the number of bytes moved, failing with
/// [`ConvertError::ShortTransfer`](crate::ConvertError::ShortTransfer) if the
/// source runs dry first.
pub trait Transfer {
    fn transfer(
        &mut self,
        source: &mut dyn Source,
        sink: &mut dyn Sink,
        offset: u64,
        len: u64,
    ) -> ConvertResult<u64>;
}
