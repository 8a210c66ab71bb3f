//! Single-key trigger for Unix terminals.
//!
//! [`CbreakGuard`] snapshots the terminal attributes, switches the
//! descriptor to cbreak mode (no line buffering, no echo, signals still
//! delivered) and writes the snapshot back on drop. Dropping happens on
//! normal exit and while unwinding from a panic, so the user's shell is
//! never left in cbreak mode by the hold loop.

use std::fs::File;
use std::io::Read;
use std::os::fd::{AsFd, BorrowedFd};

use figkeep_common::error::{FigkeepError, Result};
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};

use super::KeyTrigger;

/// Keeps a terminal in cbreak mode until dropped.
#[derive(Debug)]
pub struct CbreakGuard<F: AsFd> {
    fd: F,
    saved: Termios,
}

impl<F: AsFd> CbreakGuard<F> {
    /// Saves the current attributes of `fd` and enters cbreak mode.
    ///
    /// # Errors
    ///
    /// Returns [`FigkeepError::Unsupported`] if `fd` is not a terminal or its
    /// attributes cannot be changed. Nothing has been modified in that case.
    pub fn enter(fd: F) -> Result<Self> {
        let saved = termios::tcgetattr(fd.as_fd())
            .map_err(|e| FigkeepError::unsupported("cbreak mode", e))?;

        let mut cbreak = saved.clone();
        cbreak.local_flags.remove(LocalFlags::ECHO | LocalFlags::ICANON);
        cbreak.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        cbreak.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(fd.as_fd(), SetArg::TCSAFLUSH, &cbreak)
            .map_err(|e| FigkeepError::unsupported("cbreak mode", e))?;

        tracing::debug!("terminal switched to cbreak mode");
        Ok(Self { fd, saved })
    }

    /// The guarded descriptor.
    pub fn fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl<F: AsFd> Drop for CbreakGuard<F> {
    fn drop(&mut self) {
        match termios::tcsetattr(self.fd.as_fd(), SetArg::TCSADRAIN, &self.saved) {
            Ok(()) => tracing::debug!("terminal mode restored"),
            Err(e) => tracing::debug!(error = %e, "failed to restore terminal mode"),
        }
    }
}

/// Fires when one byte is readable on a terminal held in cbreak mode.
#[derive(Debug)]
pub struct CbreakTrigger<F: AsFd> {
    guard: CbreakGuard<F>,
}

impl<F: AsFd> CbreakTrigger<F> {
    /// Puts `fd` into cbreak mode and starts polling it.
    ///
    /// # Errors
    ///
    /// See [`CbreakGuard::enter`].
    pub fn new(fd: F) -> Result<Self> {
        Ok(Self {
            guard: CbreakGuard::enter(fd)?,
        })
    }
}

impl<F: AsFd> KeyTrigger for CbreakTrigger<F> {
    fn poll(&mut self) -> bool {
        let fd = self.guard.fd();
        let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
        match poll(&mut fds, PollTimeout::ZERO) {
            Ok(ready) if ready > 0 => {
                // EOF also counts: a hung-up terminal cannot deliver a key.
                if let Err(e) = read_one_byte(fd) {
                    tracing::debug!(error = %e, "key read failed");
                }
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!(error = %e, "input readiness check failed");
                false
            }
        }
    }
}

/// Reads exactly one byte, bypassing any userspace buffering.
fn read_one_byte(fd: BorrowedFd<'_>) -> std::io::Result<usize> {
    let mut file = File::from(fd.try_clone_to_owned()?);
    let mut byte = [0_u8; 1];
    file.read(&mut byte)
}
