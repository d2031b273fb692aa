//! Metric Aggregation

use std::num::NonZeroUsize;

use crate::error::InsufficientData;
use crate::model::MetricSample;

/// Number of daily samples averaged by the volatility tool
pub const VOLATILITY_WINDOW: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Unweighted mean of the first `window` samples
pub fn average(samples: &[f64], window: NonZeroUsize) -> Result<f64, InsufficientData> {
    let window = window.get();
    let head = samples.get(..window).ok_or(InsufficientData {
        needed: window,
        available: samples.len(),
    })?;

    Ok(head.iter().sum::<f64>() / window as f64)
}

/// Most recent value of a series ordered newest first
pub fn latest(samples: &[MetricSample]) -> Result<f64, InsufficientData> {
    samples
        .first()
        .map(|s| s.value)
        .ok_or(InsufficientData { needed: 1, available: 0 })
}
