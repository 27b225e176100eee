use std::io::{self, SeekFrom};

use log::debug;

use super::{Sink, Source, Transfer};
use crate::error::{ConvertError, ConvertResult, IoStage};

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Plain read/write loop through a user-space buffer. Works for any source and sink.
pub struct BufferedCopy {
    buf: Box<[u8]>,
}

impl BufferedCopy {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// A zero capacity is bumped to one byte.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
        }
    }
}

impl Default for BufferedCopy {
    fn default() -> Self {
        Self::new()
    }
}

impl Transfer for BufferedCopy {
    fn transfer(
        &mut self,
        source: &mut dyn Source,
        sink: &mut dyn Sink,
        offset: u64,
        len: u64,
    ) -> ConvertResult<u64> {
        source.seek(SeekFrom::Start(offset)).stage("seek error")?;

        let mut remaining = len;
        while remaining > 0 {
            let want = remaining.min(self.buf.len() as u64) as usize;
            let n = match source.read(&mut self.buf[..want]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(ConvertError::Io {
                        stage: "read error",
                        source: e,
                    });
                }
            };
            sink.write_all(&self.buf[..n]).stage("write error")?;
            remaining -= n as u64;
        }

        let moved = len - remaining;
        debug!("buffered copy moved {} of {} bytes", moved, len);
        if moved < len {
            return Err(ConvertError::ShortTransfer {
                expected: len,
                actual: moved,
            });
        }
        Ok(moved)
    }
}
