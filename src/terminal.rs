use std::{
    io,
    mem::MaybeUninit,
    os::fd::{AsRawFd, RawFd},
};

use log::{debug, error};

use crate::error::{Error, Result};

/// Keeps the terminal in unbuffered, silent mode until dropped.
pub struct RawMode {
    fd: RawFd,
    saved: libc::termios,
}

impl RawMode {
    pub fn enable(fd: &impl AsRawFd) -> Result<Self> {
        let fd = fd.as_raw_fd();
        let mut termios = MaybeUninit::uninit();

        let saved = unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                return Err(Error::Terminal {
                    call: "tcgetattr",
                    source: io::Error::last_os_error(),
                });
            }

            termios.assume_init()
        };

        let mut raw = saved;
        // Ctrl-C comes through as a key so the guard still gets dropped.
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        unsafe {
            if libc::tcsetattr(fd, libc::TCSANOW, &raw) != 0 {
                return Err(Error::Terminal {
                    call: "tcsetattr",
                    source: io::Error::last_os_error(),
                });
            }
        }

        debug!("raw mode on for fd {fd}");

        Ok(Self { fd, saved })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let restored = unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.saved) };

        if restored != 0 {
            error!(
                "could not restore terminal settings: {}",
                io::Error::last_os_error()
            );
        } else {
            debug!("terminal restored for fd {}", self.fd);
        }
    }
}
