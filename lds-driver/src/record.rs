//! Scan record format: one little-endian IEEE-754 `f32` per angular sample,
//! no header, no footer, no length prefix. A record written by this crate is
//! 360 floats (1440 bytes); readers infer the resolution from the length.

use crate::constants::FLOAT_SIZE;
use crate::error::{LdsError, Result};
use crate::store::RecordSink;
use byteorder::{ByteOrder, LittleEndian};
use lds_data::Scan;

pub fn encode_distances(distances: &[f32]) -> Vec<u8> {
    let mut out = vec![0u8; distances.len() * FLOAT_SIZE];
    LittleEndian::write_f32_into(distances, &mut out);
    out
}

/// Appends the scan's distances to `sink` as a single record. Nothing already
/// in the sink is touched.
pub fn write_scan<K: RecordSink + ?Sized>(sink: &mut K, scan: &Scan) -> Result<()> {
    sink.append_record(&encode_distances(&scan.distances))
}

/// Reads a record of any resolution. Fails rather than dropping a partial trailing float.
pub fn decode_record(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % FLOAT_SIZE != 0 {
        return Err(LdsError::MalformedRecord { len: bytes.len() });
    }
    let mut distances = vec![0f32; bytes.len() / FLOAT_SIZE];
    LittleEndian::read_f32_into(bytes, &mut distances);
    Ok(distances)
}

/// Cuts an append-only log into records of `record_len` bytes.
///
/// A trailing record shorter than `record_len`, as left by a writer that is
/// still appending, is ignored.
pub fn split_log(bytes: &[u8], record_len: usize) -> impl Iterator<Item = &[u8]> {
    assert!(record_len > 0);
    let n_ignored = bytes.len() % record_len;
    if n_ignored != 0 {
        log::warn!("Ignoring {} trailing bytes of an incomplete record", n_ignored);
    }
    bytes.chunks_exact(record_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RECORD_SIZE;
    use lds_data::{UnfilledSlot, SAMPLES_PER_SCAN};

    fn make_scan() -> Scan {
        let mut scan = Scan::filled(UnfilledSlot::Zero);
        for (i, d) in scan.distances.iter_mut().enumerate() {
            *d = i as f32 * 0.01;
        }
        scan.distances[7] = f32::NAN;
        scan.distances[8] = -0.0;
        scan
    }

    #[test]
    fn test_encode_layout() {
        assert_eq!(encode_distances(&[1.0, -2.5]), [0, 0, 128, 63, 0, 0, 32, 192]);
    }

    #[test]
    fn test_write_scan_is_bit_exact() {
        let scan = make_scan();
        let mut sink: Vec<u8> = Vec::new();
        write_scan(&mut sink, &scan).unwrap();
        assert_eq!(sink.len(), RECORD_SIZE);
        assert_eq!(sink, encode_distances(&scan.distances));

        let decoded = decode_record(&sink).unwrap();
        assert_eq!(decoded.len(), SAMPLES_PER_SCAN);
        for (a, b) in decoded.iter().zip(scan.distances.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_write_scan_appends() {
        let scan = make_scan();
        let mut sink: Vec<u8> = vec![0xAB; 3];
        write_scan(&mut sink, &scan).unwrap();
        write_scan(&mut sink, &scan).unwrap();
        assert_eq!(sink.len(), 3 + 2 * RECORD_SIZE);
        assert_eq!(sink[..3], [0xAB; 3]);
    }

    #[test]
    fn test_write_scan_is_one_append() {
        struct CountingSink(Vec<usize>);

        impl RecordSink for CountingSink {
            fn append_record(&mut self, record: &[u8]) -> Result<()> {
                self.0.push(record.len());
                Ok(())
            }
        }

        let mut sink = CountingSink(Vec::new());
        write_scan(&mut sink, &make_scan()).unwrap();
        assert_eq!(sink.0, vec![RECORD_SIZE]);
    }

    #[test]
    fn test_decode_other_resolution() {
        let bytes = encode_distances(&[0.5; 180]);
        assert_eq!(decode_record(&bytes).unwrap(), vec![0.5; 180]);
        assert_eq!(decode_record(&[]).unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn test_decode_malformed() {
        let bytes = vec![0u8; RECORD_SIZE + 1];
        assert!(matches!(
            decode_record(&bytes),
            Err(LdsError::MalformedRecord { len: 1441 })
        ));
    }

    #[test]
    fn test_split_log() {
        let mut bytes = encode_distances(&[1.0; 720]);
        bytes.extend_from_slice(&[0u8; 100]);
        let records: Vec<&[u8]> = split_log(&bytes, RECORD_SIZE).collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.len() == RECORD_SIZE));
    }
}
