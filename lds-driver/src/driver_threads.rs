use crate::error::{LdsError, Result};
use crate::polling::{poll_and_save, Renderer};
use crate::scan::ScanAssembler;
use crate::serial::stop_motor_and_flush;
use crate::store::RecordFile;
use crate::time::sleep_ms;
use crossbeam_channel::{Receiver, Sender};
use lds_data::{Scan, UnfilledSlot};
use serialport::SerialPort;
use std::sync::mpsc::{self, TrySendError};
use std::thread::JoinHandle;

/// Struct that contains the driver thread.
pub struct DriverThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<Result<()>>>,
}

/// Sends every rendered scan to the receiver returned by [`crate::run_driver`].
pub(crate) struct ScanForwarder {
    scan_tx: mpsc::SyncSender<Result<Scan>>,
    disconnected: bool,
}

impl ScanForwarder {
    pub(crate) fn new(scan_tx: mpsc::SyncSender<Result<Scan>>) -> Self {
        ScanForwarder {
            scan_tx,
            disconnected: false,
        }
    }
}

impl Renderer for ScanForwarder {
    fn render(&mut self, scan: &Scan) {
        log::debug!("{:.1} rpm", scan.rpm);
        match self.scan_tx.try_send(Ok(scan.clone())) {
            Ok(()) => (),
            Err(TrySendError::Full(_)) => log::warn!("Scan receiver is lagging, dropped a scan"),
            Err(TrySendError::Disconnected(_)) => self.disconnected = true,
        }
    }
}

/// Polls until terminated, the receiver is dropped, or an error occurs.
///
/// An error is delivered to the receiver and ends the loop. It is returned
/// instead if the thread is terminated before the receiver has room for it.
pub(crate) fn read_device_signal(
    port: &mut Box<dyn SerialPort>,
    fill: UnfilledSlot,
    mut records: Option<RecordFile>,
    scan_tx: mpsc::SyncSender<Result<Scan>>,
    reader_terminator_rx: Receiver<bool>,
) -> Result<()> {
    let mut assembler = ScanAssembler::new(fill);
    let mut forwarder = ScanForwarder::new(scan_tx);
    let mut result = Ok(());
    while !do_terminate(&reader_terminator_rx) {
        match poll_and_save(&mut assembler, port, &mut forwarder, &mut records) {
            // a timeout before a full super-frame yields None
            Ok(_) => (),
            Err(e) => {
                log::error!("{e}");
                result = forward_error(&forwarder.scan_tx, e, &reader_terminator_rx);
                break;
            }
        }
        if forwarder.disconnected {
            log::info!("Scan receiver dropped");
            break;
        }
    }

    if let Err(e) = stop_motor_and_flush(port) {
        log::error!("{e}");
    }
    result
}

fn forward_error(
    scan_tx: &mpsc::SyncSender<Result<Scan>>,
    error: LdsError,
    terminator_rx: &Receiver<bool>,
) -> Result<()> {
    let mut pending = Err(error);
    loop {
        match scan_tx.try_send(pending) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => return Ok(()),
            Err(TrySendError::Full(unsent)) => pending = unsent,
        }
        if do_terminate(terminator_rx) {
            return pending.map(|_| ());
        }
        sleep_ms(10);
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join the driver thread.
/// This function is automatically called when `driver_threads` is dropped.
///
/// Returns the error that stopped the thread if it could not be delivered
/// over the scan channel.
pub fn join(driver_threads: &mut DriverThreads) -> Result<()> {
    // The thread may already have stopped by itself and dropped its receiver
    let _ = driver_threads.reader_terminator_tx.send(true);

    let mut result = Ok(());
    if let Some(thread) = driver_threads.reader_thread.take() {
        match thread.join() {
            Ok(r) => result = r,
            Err(_) => log::error!("LDS reader thread panicked"),
        }
    }
    log::info!("LDS driver stopped");
    result
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        if let Err(e) = join(self) {
            log::error!("{e}");
        }
    }
}
