//! Merges recorded scans into one polar map by averaging each angle.
//!
//! A record of `n` samples spans the full circle in steps of `360 / n`
//! degrees. Samples are bucketed by their exact computed angle: records of the
//! same resolution share buckets, records of different resolutions produce
//! interleaved angles. Nothing is resampled.

use crate::error::{LdsError, Result};
use crate::record::decode_record;
use lds_data::{AveragedMap, MapPoint};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What to do with a record whose length is not a whole number of floats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MalformedPolicy {
    /// Stop and return [`LdsError::MalformedRecord`].
    #[default]
    FailFast,
    /// Log the record and leave it out of the map.
    Skip,
}

/// Averages every ingested record into per-angle buckets.
///
/// NaN samples count as missing whatever fill policy produced them: they are
/// left out of the mean instead of turning the whole bucket into NaN. A
/// bucket holding only NaN samples keeps its angle with a NaN distance and
/// `n_samples == 0`.
#[derive(Debug, Default)]
pub struct MapAggregator {
    policy: MalformedPolicy,
    // Angles are never negative, so their bit patterns sort like the angles themselves
    buckets: BTreeMap<u64, Vec<f32>>,
    n_records: usize,
    n_skipped: usize,
}

impl MapAggregator {
    pub fn new(policy: MalformedPolicy) -> Self {
        MapAggregator {
            policy,
            ..Default::default()
        }
    }

    pub fn n_records(&self) -> usize {
        self.n_records
    }

    pub fn n_skipped(&self) -> usize {
        self.n_skipped
    }

    pub fn ingest(&mut self, record: &[u8]) -> Result<()> {
        let distances = match decode_record(record) {
            Ok(distances) => distances,
            Err(e @ LdsError::MalformedRecord { .. }) if self.policy == MalformedPolicy::Skip => {
                log::warn!("Skipping record #{}: {}", self.n_records + self.n_skipped, e);
                self.n_skipped += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let step = 360. / distances.len() as f64;
        for (j, d) in distances.into_iter().enumerate() {
            let angle = j as f64 * step;
            self.buckets.entry(angle.to_bits()).or_default().push(d);
        }
        self.n_records += 1;
        Ok(())
    }

    /// NaN samples mark angles the sensor did not cover and are left out of
    /// the mean. A bucket holding nothing else averages to NaN.
    pub fn finish(self) -> AveragedMap {
        let points = self
            .buckets
            .into_iter()
            .map(|(bits, samples)| {
                let (sum, n_samples) = samples
                    .iter()
                    .filter(|d| !d.is_nan())
                    .fold((0f64, 0usize), |(sum, n), d| (sum + f64::from(*d), n + 1));
                MapPoint {
                    angle_degree: f64::from_bits(bits),
                    distance: if n_samples == 0 {
                        f64::NAN
                    } else {
                        sum / n_samples as f64
                    },
                    n_samples,
                }
            })
            .collect();
        AveragedMap { points }
    }
}

/// Averages `records` in the given order.
pub fn aggregate<I, B>(records: I, policy: MalformedPolicy) -> Result<AveragedMap>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut aggregator = MapAggregator::new(policy);
    for record in records {
        aggregator.ingest(record.as_ref())?;
    }
    log::info!(
        "Aggregated {} records ({} skipped)",
        aggregator.n_records(),
        aggregator.n_skipped()
    );
    Ok(aggregator.finish())
}
