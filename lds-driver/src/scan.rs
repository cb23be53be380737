use crate::constants::{INDEX_BASE, N_SUBFRAMES, SUBFRAME_SIZE, SUPERFRAME_SIZE, SYNC_BYTE};
use crate::error::Result;
use crate::packet::{decode_subframe, DecodedSubFrame, SubFrame};
use crate::source::ByteSource;
use crate::sync::{SyncOutcome, Synchronizer};
use lds_data::{Scan, UnfilledSlot};

pub(crate) trait LdsScan {
    fn new(fill: UnfilledSlot) -> Scan;
    fn push_subframe(&mut self, subframe: &DecodedSubFrame);
}

impl LdsScan for Scan {
    fn new(fill: UnfilledSlot) -> Scan {
        Scan::filled(fill)
    }

    fn push_subframe(&mut self, subframe: &DecodedSubFrame) {
        for reading in subframe.readings.iter() {
            self.set(reading);
        }
        self.valid_subframes += 1;
    }
}

/// Speed fields are in tenths of an RPM. Zero valid sub-frames give `0.0`.
pub(crate) fn estimate_rpm(speed_sum: u32, n_valid: usize) -> f64 {
    if n_valid == 0 {
        return 0.;
    }
    f64::from(speed_sum) / (n_valid as f64) / 10.
}

/// Decodes a whole super-frame into a fresh scan.
///
/// Every sub-frame is decoded on its own; a rejected one leaves its six
/// angles at `fill` and does not count towards the speed estimate.
pub fn assemble_superframe(frame: &[u8; SUPERFRAME_SIZE], fill: UnfilledSlot) -> Scan {
    let mut scan = <Scan as LdsScan>::new(fill);
    let mut speed_sum: u32 = 0;
    for (sub_index, chunk) in frame.chunks_exact(SUBFRAME_SIZE).enumerate() {
        let Ok(block) = <&[u8; SUBFRAME_SIZE]>::try_from(chunk) else {
            continue;
        };
        if let SubFrame::Valid(subframe) = decode_subframe(block, sub_index) {
            speed_sum += u32::from(subframe.speed);
            scan.push_subframe(&subframe);
        }
    }
    scan.rpm = estimate_rpm(speed_sum, scan.valid_subframes);
    if scan.valid_subframes < N_SUBFRAMES {
        log::debug!(
            "{} of {} sub-frames rejected",
            N_SUBFRAMES - scan.valid_subframes,
            N_SUBFRAMES
        );
    }
    scan
}

/// Turns a byte stream into scans, one super-frame at a time.
#[derive(Debug, Default)]
pub struct ScanAssembler {
    synchronizer: Synchronizer,
    fill: UnfilledSlot,
}

impl ScanAssembler {
    pub fn new(fill: UnfilledSlot) -> Self {
        ScanAssembler {
            synchronizer: Synchronizer::new(),
            fill,
        }
    }

    /// Bytes consumed by completed synchronizations and super-frame reads.
    pub fn position(&self) -> u64 {
        self.synchronizer.position()
    }

    /// Returns `None` when the stream ends before a full super-frame arrives.
    /// Such a cycle never yields a partially filled scan.
    pub fn next_scan<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<Option<Scan>> {
        let offset = match self.synchronizer.synchronize(source)? {
            SyncOutcome::Synchronized { offset } => offset,
            SyncOutcome::Exhausted => return Ok(None),
        };
        let rest = match source.read_exact_bytes(SUPERFRAME_SIZE - 2)? {
            Some(rest) => rest,
            None => {
                log::debug!("Stream ended inside the super-frame starting at {}", offset);
                return Ok(None);
            }
        };
        self.synchronizer.advance(rest.len());

        let mut frame = [0u8; SUPERFRAME_SIZE];
        frame[0] = SYNC_BYTE;
        frame[1] = INDEX_BASE;
        frame[2..].copy_from_slice(&rest);

        let scan = assemble_superframe(&frame, self.fill);
        log::debug!(
            "Scan at {}: {:.1} rpm, {} valid sub-frames",
            offset,
            scan.rpm,
            scan.valid_subframes
        );
        Ok(Some(scan))
    }
}
