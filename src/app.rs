use std::error::Error as _;
use std::time::Instant;

use log::{error, info};

use crate::config::QueryConfig;
use crate::data::filter::matching_points;
use crate::data::loader::load_file;
use crate::error::Result;
use crate::sink::ResultSink;

// ---------------------------------------------------------------------------
// Query driver: reset → load → scan → emit
// ---------------------------------------------------------------------------

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct coordinate pairs in the dataset.
    pub loaded: usize,
    /// Points strictly inside the rectangle.
    pub matched: usize,
    /// Matches appended to the output.
    pub written: usize,
    /// Matches whose append failed.
    pub failed_writes: usize,
}

/// Run one query end to end.
///
/// Load failures are returned. Output trouble never stops the run: a
/// failed append is logged and the scan moves on to the next point.
pub fn run(config: &QueryConfig) -> Result<RunSummary> {
    let mut sink = ResultSink::create(&config.output);

    let started = Instant::now();
    let dataset = load_file(&config.input)?;
    info!("load took {:?}", started.elapsed());

    let started = Instant::now();
    let mut summary = RunSummary {
        loaded: dataset.len(),
        ..RunSummary::default()
    };
    for point in matching_points(&dataset, &config.rect) {
        summary.matched += 1;
        if let Err(e) = sink.emit(&point) {
            match e.source() {
                Some(cause) => error!("{e}: {cause}"),
                None => error!("{e}"),
            }
            summary.failed_writes += 1;
        }
    }
    summary.written = sink.written();
    info!(
        "{} of {} points inside {}; wrote {} to {} in {:?}",
        summary.matched,
        summary.loaded,
        config.rect,
        summary.written,
        sink.path().display(),
        started.elapsed()
    );

    Ok(summary)
}
