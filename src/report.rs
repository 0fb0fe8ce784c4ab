use serde::{Deserialize, Serialize};

use crate::record::TranscriptRecord;
use crate::stats::{histogram, like_view_ratios, quartiles, summarize, word_count_series, Histogram, Quartiles, StatsError, StatsSummary};

pub const SERIES_RATIO_NORMALIZED: &str = "like_view_ratio_normalized";
pub const SERIES_WORD_COUNT: &str = "word_count";
pub const SERIES_RATIO_RAW: &str = "like_view_ratio_raw";

/// One value sequence handed to the chart renderer, with its quartile markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub mean: f64,
    pub quartiles: Quartiles,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: StatsSummary,
    pub series: Vec<HistogramSeries>,
}

impl Report {
    pub fn series(&self, name: &str) -> Option<&HistogramSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Build the summary and the three renderer series:
/// normalized like/view ratio, word count, raw like/view ratio.
pub fn build_report(records: &[TranscriptRecord], bins: usize) -> Result<Report, StatsError> {
    let summary = summarize(records)?;
    let ratios = like_view_ratios(records)?;

    let words = word_count_series(records);
    let word_quartiles = quartiles(&words).ok_or(StatsError::EmptyInput)?;

    let series = vec![
        HistogramSeries {
            name: SERIES_RATIO_NORMALIZED.to_string(),
            histogram: histogram(&ratios.normalized.values, bins),
            mean: ratios.normalized.mean,
            quartiles: ratios.normalized.quartiles,
            values: ratios.normalized.values,
        },
        HistogramSeries {
            name: SERIES_WORD_COUNT.to_string(),
            histogram: histogram(&words, bins),
            mean: summary.word_counts.mean,
            quartiles: word_quartiles,
            values: words,
        },
        HistogramSeries {
            name: SERIES_RATIO_RAW.to_string(),
            histogram: histogram(&ratios.raw.values, bins),
            mean: ratios.raw.mean,
            quartiles: ratios.raw.quartiles,
            values: ratios.raw.values,
        },
    ];
    Ok(Report { summary, series })
}

/// Group digits of a rounded value with commas, e.g. 1234567.4 -> "1,234,567".
pub fn thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// Human-readable statistics block printed after an analysis run.
pub fn format_summary(summary: &StatsSummary) -> String {
    let rule = "=".repeat(60);
    let sub = "-".repeat(40);
    let v = &summary.views;
    let w = &summary.word_counts;
    let mut out = Vec::new();
    out.push(rule.clone());
    out.push("CHANNEL STATISTICS".to_string());
    out.push(rule);
    out.push(String::new());
    out.push("[*] VIEW STATISTICS".to_string());
    out.push(sub.clone());
    out.push(format!("  Total Videos:     {}", thousands(summary.total_videos as f64)));
    out.push(format!("  Total Views:      {}", thousands(summary.total_views as f64)));
    out.push(format!("  Average Views:    {}", thousands(v.mean)));
    out.push(format!("  Median Views:     {}", thousands(v.median)));
    out.push(format!("  Std Deviation:    {}", thousands(v.std_dev)));
    out.push(format!("  Min Views:        {}", thousands(v.min)));
    out.push(format!("  Max Views:        {}", thousands(v.max)));
    out.push(format!("  Q1 (25th %ile):   {}", thousands(v.q1)));
    out.push(format!("  Q3 (75th %ile):   {}", thousands(v.q3)));
    out.push(String::new());
    out.push("[*] WORD COUNT STATISTICS".to_string());
    out.push(sub);
    out.push(format!("  Average Words:    {}", thousands(w.mean)));
    out.push(format!("  Median Words:     {}", thousands(w.median)));
    out.push(format!("  Min Words:        {}", thousands(w.min)));
    out.push(format!("  Max Words:        {}", thousands(w.max)));
    out.push(format!("  Q1 (25th %ile):   {}", thousands(w.q1)));
    out.push(format!("  Q3 (75th %ile):   {}", thousands(w.q3)));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(1234567.4), "1,234,567");
        assert_eq!(thousands(-2500.0), "-2,500");
    }
}
