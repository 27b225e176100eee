use std::fs::File;
use std::io::{self, Cursor, Stdout, StdoutLock};
#[cfg(unix)]
use std::os::fd::{AsRawFd, RawFd};

use super::{Sink, Source};

impl Source for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl<T: AsRef<[u8]>> Source for Cursor<T> {
    fn size(&self) -> io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl Sink for File {
    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl Sink for Stdout {
    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl Sink for StdoutLock<'_> {
    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl Sink for io::PipeWriter {
    #[cfg(unix)]
    fn raw_fd(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl Sink for Vec<u8> {}

impl<T> Sink for Cursor<T> where Cursor<T>: io::Write {}
