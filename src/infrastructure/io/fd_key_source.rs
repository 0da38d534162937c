use std::io;
use std::os::unix::io::RawFd;

use crate::domain::primitive::KeyCode;
use crate::interface_adapter::port::KeySource;
use crate::shared::error::KuiError;

/// `poll(2)`-based key source over a raw file descriptor.
///
/// Reads one byte per key with a bounded wait. End-of-file and the NUL byte
/// are both reported as idle: the read loop above treats "no key within the
/// window" and "stream ended" identically, and any partial prefix survives
/// in that stage's pushback buffer either way.
pub struct FdKeySource {
    fd: RawFd,
}

impl FdKeySource {
    pub fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl KeySource for FdKeySource {
    fn next_key(&mut self, timeout_ms: u32) -> Result<Option<KeyCode>, KuiError> {
        if !poll_readable(self.fd, timeout_ms).map_err(KuiError::Io)? {
            return Ok(None);
        }
        match read_byte(self.fd).map_err(KuiError::Io)? {
            None | Some(0) => Ok(None),
            Some(byte) => Ok(Some(KeyCode::from_byte(byte))),
        }
    }

    fn data_ready(&mut self, timeout_ms: u32) -> Result<bool, KuiError> {
        poll_readable(self.fd, timeout_ms).map_err(KuiError::Io)
    }
}

/// Wait until `fd` is readable or the timeout elapses. Retries on EINTR.
fn poll_readable(fd: RawFd, timeout_ms: u32) -> io::Result<bool> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let timeout = timeout_ms.min(i32::MAX as u32) as libc::c_int;
    loop {
        let rc = unsafe { libc::poll(&mut pollfd, 1, timeout) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        return Ok(rc > 0 && (pollfd.revents & libc::POLLIN) != 0);
    }
}

/// Read a single byte from `fd`; `None` on end-of-file. Retries on EINTR.
fn read_byte(fd: RawFd) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, 1) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        return Ok(if n == 0 { None } else { Some(buf[0]) });
    }
}

// =============================================================================
// Tests
// =============================================================================
