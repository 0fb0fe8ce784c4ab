use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::TranscriptRecord;

/// Bin count used for renderer hand-off when none is configured.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("EmptyInput: no records with a positive view count")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Descriptive statistics over the records eligible for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_videos: usize,
    /// Saturates at `u64::MAX`.
    pub total_views: u64,
    pub views: Distribution,
    pub word_counts: Distribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSeries {
    /// One value per eligible record, in input order.
    pub values: Vec<f64>,
    pub mean: f64,
    pub quartiles: Quartiles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeViewRatios {
    pub raw: RatioSeries,
    /// Raw ratios divided by their mean; averages to 1.0.
    pub normalized: RatioSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Percentile of an ascending slice, interpolating linearly between the two
/// order statistics around rank `p * (n - 1)`. `p` is in `[0, 1]`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// Quartiles of an unsorted sequence.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    let sorted = sorted_copy(values);
    Some(Quartiles {
        q1: percentile(&sorted, 0.25)?,
        median: percentile(&sorted, 0.50)?,
        q3: percentile(&sorted, 0.75)?,
    })
}

fn mean_of_sorted(sorted: &[f64]) -> f64 {
    // summing the ascending copy keeps the result independent of input order
    sorted.iter().sum::<f64>() / sorted.len() as f64
}

/// Mean, population standard deviation, extremes and quartiles.
pub fn distribution(values: &[f64]) -> Option<Distribution> {
    let sorted = sorted_copy(values);
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mean = mean_of_sorted(&sorted);
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    Some(Distribution {
        mean,
        median: percentile(&sorted, 0.50)?,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        q1: percentile(&sorted, 0.25)?,
        q3: percentile(&sorted, 0.75)?,
    })
}

/// Summarize the records with a positive view count.
/// Returns `EmptyInput` when no record qualifies.
pub fn summarize(records: &[TranscriptRecord]) -> Result<StatsSummary, StatsError> {
    let eligible: Vec<&TranscriptRecord> = records.iter().filter(|r| r.is_valid_for_aggregation()).collect();
    if eligible.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let views: Vec<f64> = eligible.iter().map(|r| r.view_count() as f64).collect();
    let words: Vec<f64> = eligible.iter().map(|r| r.word_count() as f64).collect();
    let views = distribution(&views).ok_or(StatsError::EmptyInput)?;
    let word_counts = distribution(&words).ok_or(StatsError::EmptyInput)?;
    Ok(StatsSummary {
        total_videos: eligible.len(),
        total_views: eligible.iter().fold(0u64, |acc, r| acc.saturating_add(r.view_count())),
        views,
        word_counts,
    })
}

fn ratio_series(values: Vec<f64>) -> Result<RatioSeries, StatsError> {
    let sorted = sorted_copy(&values);
    if sorted.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let mean = mean_of_sorted(&sorted);
    let quartiles = quartiles(&sorted).ok_or(StatsError::EmptyInput)?;
    Ok(RatioSeries { values, mean, quartiles })
}

/// Like/view ratio for every record with views, raw and relative to the mean
/// ratio. When no record has any likes the mean is zero and every normalized
/// value is 1.0.
pub fn like_view_ratios(records: &[TranscriptRecord]) -> Result<LikeViewRatios, StatsError> {
    let raw_values: Vec<f64> = records
        .iter()
        .filter(|r| r.is_valid_for_aggregation())
        .map(|r| r.like_count() as f64 / r.view_count() as f64)
        .collect();
    let raw = ratio_series(raw_values)?;
    let normalized_values = if raw.mean > 0.0 {
        raw.values.iter().map(|v| v / raw.mean).collect()
    } else {
        vec![1.0; raw.values.len()]
    };
    let normalized = ratio_series(normalized_values)?;
    Ok(LikeViewRatios { raw, normalized })
}

/// Word counts of the records eligible for aggregation, in input order.
pub fn word_count_series(records: &[TranscriptRecord]) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.is_valid_for_aggregation())
        .map(|r| r.word_count() as f64)
        .collect()
}

/// Equal-width histogram over `[min, max]`; the last bin is closed on the right.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Histogram { edges: Vec::new(), counts: Vec::new() };
    }
    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Histogram { edges, counts }
}
