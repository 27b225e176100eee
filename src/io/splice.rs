use log::debug;

use super::{BufferedCopy, Sink, Source, Transfer};
use crate::error::ConvertResult;

/// Zero-copy transfer with `splice(2)`, for when the output is a pipe.
///
/// The kernel moves pages from the input file straight into the pipe.
/// Whenever that isn't possible (no descriptor on one side, neither end is
/// a pipe, not Linux) this quietly degrades to a [`BufferedCopy`] with
/// identical output.
#[derive(Default)]
pub struct SpliceCopy {
    fallback: BufferedCopy,
}

impl SpliceCopy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transfer for SpliceCopy {
    #[cfg(target_os = "linux")]
    fn transfer(
        &mut self,
        source: &mut dyn Source,
        sink: &mut dyn Sink,
        offset: u64,
        len: u64,
    ) -> ConvertResult<u64> {
        let (Some(from_fd), Some(to_fd)) = (source.raw_fd(), sink.raw_fd()) else {
            debug!("no file descriptors to splice between; copying through a buffer");
            return self.fallback.transfer(source, sink, offset, len);
        };

        match linux::splice_range(source, sink, from_fd, to_fd, offset, len)? {
            Some(moved) => Ok(moved),
            None => {
                debug!("splice unsupported for this input/output pair; copying through a buffer");
                self.fallback.transfer(source, sink, offset, len)
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn transfer(
        &mut self,
        source: &mut dyn Source,
        sink: &mut dyn Sink,
        offset: u64,
        len: u64,
    ) -> ConvertResult<u64> {
        debug!("splice isn't available on this platform; copying through a buffer");
        self.fallback.transfer(source, sink, offset, len)
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use std::io::{self, SeekFrom};
    use std::os::fd::RawFd;
    use std::ptr;

    use log::debug;

    use crate::error::{ConvertError, ConvertResult, IoStage};
    use crate::io::{Sink, Source};

    /// Largest single request; the kernel caps a pipe write well below this anyway.
    const MAX_CHUNK: u64 = 1 << 30;

    /// Splice `len` bytes from `from_fd` at `offset` into `to_fd`.
    ///
    /// Returns `Ok(None)` if the kernel refuses before anything moved, so the
    /// caller can fall back.
    pub(super) fn splice_range(
        source: &mut dyn Source,
        sink: &mut dyn Sink,
        from_fd: RawFd,
        to_fd: RawFd,
        offset: u64,
        len: u64,
    ) -> ConvertResult<Option<u64>> {
        // Anything still sitting in the sink's buffer has to land before the payload.
        sink.flush().stage("write error")?;

        let mut from_offset: libc::loff_t =
            offset.try_into().map_err(|_| ConvertError::TooLarge {
                field: "payload offset",
                value: offset,
            })?;
        let mut moved = 0u64;
        while moved < len {
            let count = (len - moved).min(MAX_CHUNK) as usize;
            let rc = unsafe {
                libc::splice(
                    from_fd,
                    &mut from_offset,
                    to_fd,
                    ptr::null_mut(),
                    count,
                    0,
                )
            };
            if rc < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                if moved == 0 && is_unsupported(&err) {
                    debug!("splice refused: {}", err);
                    return Ok(None);
                }
                return Err(ConvertError::Io {
                    stage: "splice error",
                    source: err,
                });
            }
            if rc == 0 {
                break;
            }
            moved += rc as u64;
        }
        debug!("spliced {} of {} bytes", moved, len);

        // splice() advanced our private offset, not the file position.
        source
            .seek(SeekFrom::Start(offset + moved))
            .stage("seek error")?;

        if moved < len {
            return Err(ConvertError::ShortTransfer {
                expected: len,
                actual: moved,
            });
        }
        Ok(Some(moved))
    }

    fn is_unsupported(err: &io::Error) -> bool {
        matches!(
            err.raw_os_error(),
            Some(libc::EINVAL) | Some(libc::ENOSYS) | Some(libc::EOPNOTSUPP)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read, Seek, SeekFrom, Write};

    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn falls_back_without_descriptors() {
        let mut source = Cursor::new(b"..payload..".to_vec());
        let mut sink = Vec::new();
        let moved = SpliceCopy::new()
            .transfer(&mut source, &mut sink, 2, 7)
            .unwrap();
        assert_eq!(moved, 7);
        assert_eq!(sink, b"payload");
        assert_eq!(source.position(), 9);
    }

    #[test]
    fn file_to_file_matches_buffered() {
        let mut input = tempfile::tempfile().unwrap();
        input.write_all(b"0123456789abcdef").unwrap();

        // Neither end is a pipe, so on Linux the kernel refuses and we fall back.
        let mut output = tempfile::tempfile().unwrap();
        output.write_all(b">").unwrap();
        let moved = SpliceCopy::new()
            .transfer(&mut input, &mut output, 4, 8)
            .unwrap();
        assert_eq!(moved, 8);
        assert_eq!(input.stream_position().unwrap(), 12);

        let mut written = String::new();
        output.seek(SeekFrom::Start(0)).unwrap();
        output.read_to_string(&mut written).unwrap();
        assert_eq!(written, ">456789ab");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn splices_into_a_pipe() {
        let mut input = tempfile::tempfile().unwrap();
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        input.write_all(&data).unwrap();

        let (mut reader, mut writer) = std::io::pipe().unwrap();
        let drain = std::thread::spawn(move || {
            let mut out = Vec::new();
            reader.read_to_end(&mut out).unwrap();
            out
        });

        writer.write_all(b"head").unwrap();
        let moved = SpliceCopy::new()
            .transfer(&mut input, &mut writer, 100, 150_000)
            .unwrap();
        drop(writer);

        assert_eq!(moved, 150_000);
        assert_eq!(input.stream_position().unwrap(), 150_100);
        let out = drain.join().unwrap();
        assert_eq!(&out[..4], b"head");
        assert_eq!(&out[4..], &data[100..150_100]);
    }

    #[test]
    fn short_input() {
        let mut input = tempfile::tempfile().unwrap();
        input.write_all(b"abc").unwrap();
        let mut sink = Vec::new();
        assert!(matches!(
            SpliceCopy::new().transfer(&mut input, &mut sink, 1, 5),
            Err(ConvertError::ShortTransfer {
                expected: 5,
                actual: 2
            })
        ));
    }
}
