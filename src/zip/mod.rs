//! ZIP record construction.
//!
//! A single-entry archive, written front to back, is:
//!
//! 1. Local file header, with CRC-32 and sizes zeroed (general purpose bit 3)
//! 2. The DEFLATE data, copied verbatim
//! 3. Data descriptor carrying the real CRC-32 and sizes
//! 4. Central directory header pointing back at the local header
//! 5. End of central directory record
//!
//! Because bit 3 defers the CRC-32 and sizes, nothing ever has to be patched
//! after it is written, and the output can be a pipe.
//!
//! ## Limitations
//!
//! - One entry per archive
//! - No ZIP64; sizes and offsets must fit in 32 bits
//! - Timestamps are always zero

mod records;
mod structures;

pub use records::{CentralDirectoryHeader, DataDescriptor, EndOfCentralDirectory, LocalFileHeader};
pub use structures::*;
pub(crate) use structures::narrow_u32;
