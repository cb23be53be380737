//! Sub-frame layout, 42 bytes:
//!
//! ```text
//! [0xFA] [0xA0 + index] [speed (u16 LE)] 6 x [intensity (u16 LE)] [distance mm (u16 LE)] [reserved (2)] [trailer (2)]
//! ```

use crate::constants::{
    INDEX_BASE, N_SUBFRAMES, READINGS_OFFSET, READINGS_PER_SUBFRAME, READING_SIZE, SPEED_OFFSET,
    SUBFRAME_SIZE, SYNC_BYTE,
};
use crate::numeric::{millimeters_to_meters, to_string, to_u16};
use lds_data::{Reading, SAMPLES_PER_SCAN};

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedSubFrame {
    pub sub_index: usize,
    /// Raw speed field, tenths of an RPM.
    pub speed: u16,
    pub readings: [Reading; READINGS_PER_SUBFRAME],
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubFrame {
    Valid(DecodedSubFrame),
    /// Header did not match the expected sync and index bytes. Nothing was decoded.
    Rejected { sub_index: usize, header: [u8; 2] },
}

pub(crate) fn is_subframe_header(block: &[u8; SUBFRAME_SIZE], sub_index: usize) -> bool {
    sub_index < N_SUBFRAMES
        && block[0] == SYNC_BYTE && usize::from(block[1]) == usize::from(INDEX_BASE) + sub_index
}

/// Devices report angles in descending order within a rotation.
pub(crate) fn angle_index(sub_index: usize, reading_offset: usize) -> usize {
    SAMPLES_PER_SCAN - 1 - (READINGS_PER_SUBFRAME * sub_index + reading_offset)
}

pub(crate) fn reading_index(reading_offset: usize) -> usize {
    READINGS_OFFSET + reading_offset * READING_SIZE
}

/// Decodes one 42-byte block found at position `sub_index` of a super-frame.
/// A `sub_index` past the last sub-frame is always rejected.
pub fn decode_subframe(block: &[u8; SUBFRAME_SIZE], sub_index: usize) -> SubFrame {
    if !is_subframe_header(block, sub_index) {
        log::debug!(
            "Rejected sub-frame {}: header {}",
            sub_index,
            to_string(&block[0..2])
        );
        return SubFrame::Rejected {
            sub_index,
            header: [block[0], block[1]],
        };
    }

    let speed = to_u16(&block[SPEED_OFFSET..SPEED_OFFSET + 2]);
    let readings = std::array::from_fn(|r| {
        let i = reading_index(r);
        Reading {
            angle_index: angle_index(sub_index, r),
            intensity: to_u16(&block[i..i + 2]),
            distance: millimeters_to_meters(to_u16(&block[i + 2..i + 4])),
        }
    });
    SubFrame::Valid(DecodedSubFrame {
        sub_index,
        speed,
        readings,
    })
}
