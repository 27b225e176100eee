//! # gz2zip
//!
//! Repackage a gzip file as a ZIP archive without decompressing it.
//!
//! gzip and ZIP both store data as a raw DEFLATE stream, so the compressed
//! bytes can be lifted out of one container and dropped into the other
//! untouched. Only the framing around them (headers, CRC-32, sizes, and the
//! central directory) has to be rewritten.
//!
//! ## Features
//!
//! - Single pass, forward-only output: the archive can go straight into a pipe
//! - Zero-copy payload transfer with `splice(2)` on Linux, with a buffered fallback
//! - Optional verification of the payload against the gzip trailer
//!
//! ## Limitations
//!
//! - Single-member gzip files only
//! - The FEXTRA, FCOMMENT and FHCRC header fields are rejected
//! - No ZIP64: payloads and archives must stay under 4 GiB
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use gz2zip::{Converter, SpliceCopy};
//!
//! let mut input = File::open("hello.txt.gz")?;
//! let mut stdout = io::stdout().lock();
//! let conversion = Converter::new(SpliceCopy::new()).convert(&mut input, &mut stdout)?;
//! eprintln!("{} -> {} bytes", conversion.member.display_name(), conversion.layout.archive_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod convert;
pub mod error;
pub mod gzip;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use convert::{ArchiveLayout, Conversion, ConvertOptions, Converter};
pub use error::{ConvertError, ConvertResult, GzipFeature};
pub use gzip::{GzipMember, GzipTrailer};
pub use io::{BufferedCopy, Sink, Source, SpliceCopy, Transfer};
pub use zip::ZipDescriptor;
