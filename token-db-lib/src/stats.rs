//! Popularity distribution report.
//!
//! Purely advisory: nothing here is written to the database file.

use std::collections::BTreeMap;

use token_db_core::NormalizedTokenRecord;

/// Percentile points reported, in order.
pub const PERCENTILE_POINTS: [u8; 7] = [10, 25, 50, 75, 90, 95, 99];

/// Rows kept in the frequency table.
pub const FREQUENCY_ROWS: usize = 30;

/// Size of the first suggested bracket.
pub const TOP_BRACKET_SIZE: usize = 50;

/// Brackets below the top one.
const LOWER_BRACKETS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Percentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Percentiles {
    /// `(point, value)` pairs in [`PERCENTILE_POINTS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> {
        PERCENTILE_POINTS.into_iter().zip([
            self.p10, self.p25, self.p50, self.p75, self.p90, self.p95, self.p99,
        ])
    }
}

/// One row of the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyRow {
    pub popularity: u32,
    pub count: usize,
    /// Records with this popularity or higher.
    pub cumulative: usize,
}

/// Suggested popularity cut-offs for UI tiers.
///
/// Bracket 1 is `popularity >= thresholds[0]`, bracket `i + 1` is
/// `thresholds[i] <= popularity < thresholds[i - 1]`, and the last bracket is
/// everything below the final threshold. `counts` has one entry per bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPlan {
    pub thresholds: Vec<u32>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopularityStats {
    pub total: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    /// Element at index `n / 2` of the descending popularities. Not averaged
    /// for even lengths.
    pub median: u32,
    pub percentiles: Percentiles,
    pub frequency: Vec<FrequencyRow>,
    /// `None` when there are fewer than [`TOP_BRACKET_SIZE`] records.
    pub brackets: Option<BracketPlan>,
}

impl PopularityStats {
    pub fn compute(tokens: &[NormalizedTokenRecord]) -> Self {
        let mut pops: Vec<u32> = tokens.iter().map(|t| t.popularity).collect();
        pops.sort_unstable_by(|a, b| b.cmp(a));

        let total = pops.len();
        let mean = if pops.is_empty() {
            0.0
        } else {
            pops.iter().map(|&p| f64::from(p)).sum::<f64>() / total as f64
        };

        Self {
            total,
            min: pops.last().copied().unwrap_or(0),
            max: pops.first().copied().unwrap_or(0),
            mean,
            median: pops.get(total / 2).copied().unwrap_or(0),
            percentiles: Percentiles {
                p10: percentile(&pops, 10),
                p25: percentile(&pops, 25),
                p50: percentile(&pops, 50),
                p75: percentile(&pops, 75),
                p90: percentile(&pops, 90),
                p95: percentile(&pops, 95),
                p99: percentile(&pops, 99),
            },
            frequency: frequency_table(&pops),
            brackets: suggest_brackets(&pops),
        }
    }
}

/// Linear-interpolated percentile over `data` in the order given.
///
/// `rank = (n - 1) * p / 100`, interpolated between the floor and ceiling
/// ranks. Callers pass popularities sorted descending.
pub fn percentile(data: &[u32], p: u8) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let last = data.len() - 1;
    let k = last as f64 * (f64::from(p) / 100.0);
    let f = k.floor() as usize;
    let c = if k < last as f64 { f + 1 } else { f };
    if f == c {
        return f64::from(data[f]);
    }
    f64::from(data[f]) * (c as f64 - k) + f64::from(data[c]) * (k - f as f64)
}

fn frequency_table(sorted_desc: &[u32]) -> Vec<FrequencyRow> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for &p in sorted_desc {
        *counts.entry(p).or_default() += 1;
    }

    let mut cumulative = 0;
    counts
        .into_iter()
        .rev()
        .take(FREQUENCY_ROWS)
        .map(|(popularity, count)| {
            cumulative += count;
            FrequencyRow {
                popularity,
                count,
                cumulative,
            }
        })
        .collect()
}

fn suggest_brackets(sorted_desc: &[u32]) -> Option<BracketPlan> {
    if sorted_desc.len() < TOP_BRACKET_SIZE {
        return None;
    }

    let mut thresholds = vec![sorted_desc[TOP_BRACKET_SIZE - 1]];
    let remaining = &sorted_desc[TOP_BRACKET_SIZE..];
    if !remaining.is_empty() {
        let chunk = remaining.len() / LOWER_BRACKETS;
        let last = remaining.len() - 1;
        thresholds.extend((1..LOWER_BRACKETS).map(|i| remaining[(chunk * i).min(last)]));
    }

    let counts = (0..=thresholds.len())
        .map(|bracket| {
            sorted_desc
                .iter()
                .filter(|&&p| {
                    let above_floor = thresholds.get(bracket).is_none_or(|&t| p >= t);
                    let below_ceiling = bracket == 0 || p < thresholds[bracket - 1];
                    above_floor && below_ceiling
                })
                .count()
        })
        .collect();

    Some(BracketPlan { thresholds, counts })
}

/// The `n` most popular records, ties broken by name.
pub fn top_tokens(tokens: &[NormalizedTokenRecord], n: usize) -> Vec<&NormalizedTokenRecord> {
    let mut ranked: Vec<&NormalizedTokenRecord> = tokens.iter().collect();
    ranked.sort_by(|a, b| {
        b.popularity
            .cmp(&a.popularity)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(n);
    ranked
}

/// Record count per colour code, colourless spelled out.
pub fn color_counts(tokens: &[NormalizedTokenRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.color_label().to_string()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
