use std::sync::mpsc;

mod config;
mod constants;
mod driver_threads;
mod error;
mod map;
mod numeric;
mod packet;
mod polling;
mod record;
mod scan;
mod serial;
mod source;
mod store;
mod sync;
mod time;

pub use crate::config::DriverConfig;
pub use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT, RECORD_SIZE};
pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::{LdsError, Result};
pub use crate::map::{aggregate, MalformedPolicy, MapAggregator};
pub use crate::packet::{decode_subframe, DecodedSubFrame, SubFrame};
pub use crate::polling::{poll_and_save, Renderer};
pub use crate::record::{decode_record, encode_distances, split_log, write_scan};
pub use crate::scan::{assemble_superframe, ScanAssembler};
pub use crate::source::ByteSource;
pub use crate::store::{DirectoryStore, RecordFile, RecordSink};
pub use crate::sync::{SyncOutcome, Synchronizer};
pub use lds_data::{AveragedMap, MapPoint, Reading, Scan, UnfilledSlot};

use crate::driver_threads::read_device_signal;
use crate::serial::{flush, start_motor};
use crossbeam_channel::bounded;

/// Function to launch the LDS.
///
/// The receiver yields every decoded scan. An error from the port or the
/// record file is sent after the scans that preceded it and stops the
/// driver; the channel disconnects once the reader thread has exited.
///
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
/// * `config` - Port settings, fill policy and optional record file.
pub fn run_driver(
    port_name: &str,
    config: DriverConfig,
) -> Result<(DriverThreads, mpsc::Receiver<Result<Scan>>)> {
    let mut port = serial::open(port_name, &config)?;
    let records = match &config.record_path {
        Some(path) => Some(RecordFile::open(path)?),
        None => None,
    };

    if !cfg!(test) {
        // In testing, disable flushing to receive dummy signals
        flush(&mut port)?;
    }
    start_motor(&mut port)?;

    let (reader_terminator_tx, reader_terminator_rx) = bounded(10);
    let (scan_tx, scan_rx) = mpsc::sync_channel::<Result<Scan>>(10);

    let fill = config.fill;
    let reader_thread = Some(
        std::thread::Builder::new()
            .name("lds-reader".to_string())
            .spawn(move || {
                read_device_signal(&mut port, fill, records, scan_tx, reader_terminator_rx)
            })?,
    );
    log::info!("LDS driver started on {}", port_name);

    let driver_threads = DriverThreads {
        reader_terminator_tx,
        reader_thread,
    };

    Ok((driver_threads, scan_rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SUPERFRAME_SIZE;
    use crate::scan::tests::make_superframe;
    use crate::time::sleep_ms;
    use serialport::{SerialPort, TTYPort};
    use std::io::{Read, Write};
    use std::time::Duration;

    fn test_config() -> DriverConfig {
        DriverConfig::default().with_timeout(Duration::from_millis(100))
    }

    #[test]
    fn test_run_driver_normal_data() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (thread, scan_rx) = run_driver(&name, test_config()).unwrap();

        sleep_ms(10);
        let mut buf = [0u8; 1];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [b'b']);

        // noise, then a super-frame
        master.write_all(&[0x00, 0xFA, 0x13, 0xA0]).unwrap();
        master.write_all(&make_superframe()).unwrap();

        let scan = scan_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(scan.distances.len(), 360);
        assert_eq!(scan.valid_subframes, 60);
        assert_eq!(scan.distances[0], 0.359);
        let speed_sum: u32 = (0..60).map(|i| 3000 + i).sum();
        assert_eq!(scan.rpm, f64::from(speed_sum) / 60. / 10.);

        drop(thread);
    }

    #[test]
    fn test_run_driver_corrupted_subframe() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (thread, scan_rx) = run_driver(&name, test_config()).unwrap();

        let mut superframe = make_superframe();
        // sub-frame 59 carries the wrong index byte
        superframe[SUPERFRAME_SIZE - 41] = 0xA0;
        master.write_all(&superframe).unwrap();

        let scan = scan_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(scan.valid_subframes, 59);
        assert!(scan.distances[0..6].iter().all(|d| *d == 0.));

        drop(thread);
    }

    #[test]
    fn test_run_driver_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lidar_data.bin");

        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let config = test_config().with_record_path(&path);
        let (thread, scan_rx) = run_driver(&name, config).unwrap();

        master.write_all(&make_superframe()).unwrap();
        let scan = scan_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        drop(thread);

        let records = DirectoryStore::new(dir.path()).list_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), RECORD_SIZE);
        assert_eq!(decode_record(&records[0]).unwrap(), scan.distances);
    }

    #[test]
    fn test_drop_stops_motor() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        let (thread, _scan_rx) = run_driver(&name, test_config()).unwrap();
        drop(thread);

        sleep_ms(10);
        let mut buf = [0u8; 2];
        master.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [b'b', b'e']);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_run_driver_record_failure() {
        let (mut master, slave) = TTYPort::pair().expect("Unable to create ptty pair");
        let name = slave.name().unwrap();
        // every write to /dev/full fails with ENOSPC
        let config = test_config().with_record_path("/dev/full");
        let (mut thread, scan_rx) = run_driver(&name, config).unwrap();

        for _ in 0..3 {
            master.write_all(&make_superframe()).unwrap();
        }

        // the scan is delivered before its record is written
        let scan = scan_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap();
        assert_eq!(scan.valid_subframes, 60);

        let error = scan_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(error, Err(LdsError::IoError(_))));

        // the reader stopped after the error
        assert!(scan_rx.recv_timeout(Duration::from_secs(5)).is_err());
        assert!(join(&mut thread).is_ok());
    }
}
