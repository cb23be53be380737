//! Locates the `0xFA 0xA0` pair that opens a super-frame.

use crate::constants::{INDEX_BASE, SYNC_BYTE};
use crate::error::Result;
use crate::source::ByteSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SyncState {
    SeekSyncByte,
    SeekIndexByte,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both marker bytes were consumed. `offset` is the stream position of the sync byte.
    Synchronized { offset: u64 },
    /// The source ended before a marker pair was seen.
    Exhausted,
}

/// Two-state scanner for the super-frame marker pair.
///
/// The state survives an [`SyncOutcome::Exhausted`] result, so a marker split
/// across two reads is still found when the caller tries again.
#[derive(Debug)]
pub struct Synchronizer {
    state: SyncState,
    position: u64,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synchronizer {
    pub fn new() -> Self {
        Synchronizer {
            state: SyncState::SeekSyncByte,
            position: 0,
        }
    }

    /// Number of stream bytes accounted for so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Records bytes the caller consumed from the same source after a sync.
    pub(crate) fn advance(&mut self, n_bytes: usize) {
        self.position += n_bytes as u64;
    }

    pub fn synchronize<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<SyncOutcome> {
        loop {
            let byte = match source.read_byte()? {
                Some(byte) => byte,
                None => return Ok(SyncOutcome::Exhausted),
            };
            self.position += 1;
            if self.step(byte) {
                return Ok(SyncOutcome::Synchronized {
                    offset: self.position - 2,
                });
            }
        }
    }

    fn step(&mut self, byte: u8) -> bool {
        match self.state {
            SyncState::SeekSyncByte => {
                if byte == SYNC_BYTE {
                    self.state = SyncState::SeekIndexByte;
                }
                false
            }
            SyncState::SeekIndexByte if byte == INDEX_BASE => {
                self.state = SyncState::SeekSyncByte;
                true
            }
            SyncState::SeekIndexByte => {
                // The mismatched byte may itself open the next marker pair
                self.state = SyncState::SeekSyncByte;
                self.step(byte)
            }
        }
    }
}
