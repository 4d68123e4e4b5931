//! Explainability for match results
//!
//! Output structures a dashboard can render without recomputing anything:
//! the match-rate distribution, per-group (TGV) averages, and plain-language
//! lines showing how each sub-score was reached.

use crate::config::EngineConfig;
use crate::criteria::ResolvedCriteria;
use crate::rank::RankedResult;
use serde::{Deserialize, Serialize};
use talentx_core::BenchmarkProfile;

/// One bin of the match-rate histogram, `[lower, upper)` except the last
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Average match rate of one talent group across the pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupAverage {
    pub group: String,
    pub avg_match_rate: f64,
}

/// Summary statistics for a matching run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    /// Number of candidates scored
    pub candidates_count: usize,
    pub avg_match_rate: f64,
    pub median_match_rate: f64,
    pub best_match_rate: f64,
    pub worst_match_rate: f64,
    /// Match-rate histogram over [0, 100]
    pub distribution: Vec<HistogramBin>,
    /// Best talent groups first
    pub group_averages: Vec<GroupAverage>,
    /// Dimension that contributed most to the best result
    pub top_contributing_dimension: Option<String>,
    /// Employee ids of the best candidates, in rank order
    pub top: Vec<String>,
}

impl MatchSummary {
    /// Compute stats from ranked results
    pub fn compute(results: &[RankedResult], config: &EngineConfig) -> Self {
        let rates: Vec<f64> = results.iter().map(RankedResult::match_rate).collect();
        let distribution = histogram(&rates, config.histogram_bins);

        if results.is_empty() {
            return Self {
                candidates_count: 0,
                avg_match_rate: 0.0,
                median_match_rate: 0.0,
                best_match_rate: 0.0,
                worst_match_rate: 0.0,
                distribution,
                group_averages: Vec::new(),
                top_contributing_dimension: None,
                top: Vec::new(),
            };
        }

        let avg_match_rate = rates.iter().sum::<f64>() / rates.len() as f64;
        // Results are sorted best first
        let best_match_rate = rates[0];
        let worst_match_rate = rates[rates.len() - 1];

        let top_contributing_dimension = results[0]
            .breakdown
            .top_contributor()
            .map(|d| d.dimension.clone());

        Self {
            candidates_count: results.len(),
            avg_match_rate,
            median_match_rate: median(&rates),
            best_match_rate,
            worst_match_rate,
            distribution,
            group_averages: group_averages(results, config.top_n),
            top_contributing_dimension,
            top: results
                .iter()
                .take(config.top_n)
                .map(|r| r.employee_id().to_string())
                .collect(),
        }
    }
}

/// Equal-width histogram of match rates over [0, 100]
pub fn histogram(rates: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let width = 100.0 / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: if i + 1 == bins { 100.0 } else { (i + 1) as f64 * width },
            count: 0,
        })
        .collect();

    for rate in rates {
        let index = ((rate.clamp(0.0, 100.0) / width) as usize).min(bins - 1);
        out[index].count += 1;
    }
    out
}

fn median(sorted_desc: &[f64]) -> f64 {
    let n = sorted_desc.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted_desc[n / 2]
    } else {
        (sorted_desc[n / 2 - 1] + sorted_desc[n / 2]) / 2.0
    }
}

fn group_averages(results: &[RankedResult], limit: usize) -> Vec<GroupAverage> {
    let mut totals: Vec<(String, f64, usize)> = Vec::new();
    for result in results {
        for group in &result.breakdown.groups {
            match totals.iter_mut().find(|t| t.0 == group.group) {
                Some(t) => {
                    t.1 += group.match_rate;
                    t.2 += 1;
                }
                None => totals.push((group.group.clone(), group.match_rate, 1)),
            }
        }
    }

    let mut averages: Vec<GroupAverage> = totals
        .into_iter()
        .map(|(group, sum, count)| GroupAverage {
            group,
            avg_match_rate: sum / count as f64,
        })
        .collect();
    averages.sort_by(|a, b| {
        b.avg_match_rate
            .total_cmp(&a.avg_match_rate)
            .then_with(|| a.group.cmp(&b.group))
    });
    averages.truncate(limit);
    averages
}

/// Plain-language lines explaining each sub-score of `result`
pub fn explain(
    result: &RankedResult,
    criteria: &ResolvedCriteria,
    benchmark: &BenchmarkProfile,
) -> Vec<String> {
    result
        .breakdown
        .dimensions
        .iter()
        .map(|d| {
            let name = criteria
                .get(&d.dimension)
                .map(|c| c.dimension.display_name.as_str())
                .unwrap_or(d.dimension.as_str());
            if d.missing {
                format!(
                    "{}: no data, penalty {:.1}% x weight {:.2} = {:.3}",
                    name,
                    d.sub_score * 100.0,
                    d.weight,
                    d.contribution
                )
            } else {
                let target = benchmark
                    .target(&d.dimension)
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "n/a".to_string());
                format!(
                    "{}: observed {}, target {}, fit {:.1}% x weight {:.2} = {:.3}",
                    name,
                    d.observed,
                    target,
                    d.sub_score * 100.0,
                    d.weight,
                    d.contribution
                )
            }
        })
        .collect()
}
