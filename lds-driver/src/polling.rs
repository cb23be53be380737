use crate::error::Result;
use crate::record::write_scan;
use crate::scan::ScanAssembler;
use crate::source::ByteSource;
use crate::store::RecordSink;
use lds_data::Scan;

/// Receives every completed scan, e.g. to plot it. `scan.rpm` carries the speed estimate.
pub trait Renderer {
    fn render(&mut self, scan: &Scan);
}

impl<F: FnMut(&Scan)> Renderer for F {
    fn render(&mut self, scan: &Scan) {
        self(scan)
    }
}

/// Discards records. Lets [`poll_and_save`] run without persistence.
impl<K: RecordSink> RecordSink for Option<K> {
    fn append_record(&mut self, record: &[u8]) -> Result<()> {
        match self {
            Some(sink) => sink.append_record(record),
            None => Ok(()),
        }
    }
}

/// Runs one cycle: assemble a scan, render it, then append its record.
///
/// Returns `None` when the source ran dry first; nothing is rendered or
/// stored in that case. Storage failures are returned after rendering.
pub fn poll_and_save<S, R, K>(
    assembler: &mut ScanAssembler,
    source: &mut S,
    renderer: &mut R,
    sink: &mut K,
) -> Result<Option<Scan>>
where
    S: ByteSource + ?Sized,
    R: Renderer + ?Sized,
    K: RecordSink + ?Sized,
{
    let scan = match assembler.next_scan(source)? {
        Some(scan) => scan,
        None => return Ok(None),
    };
    renderer.render(&scan);
    write_scan(sink, &scan)?;
    Ok(Some(scan))
}
