use super::views::{SalaryBracketEntry, SalarySummary};
use std::cmp::Ordering;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample (n - 1) standard deviation; undefined below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Quantile of ascending values using linear interpolation between the two
/// nearest ranks.
pub fn percentile(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&quantile) {
        return None;
    }

    let position = quantile * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub fn median(sorted: &[f64]) -> Option<f64> {
    percentile(sorted, 0.5)
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn share_pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl SalarySummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        Some(Self {
            count: sorted.len(),
            mean: mean(&sorted)?,
            median: median(&sorted)?,
            min: *sorted.first()?,
            max: *sorted.last()?,
        })
    }
}

/// Counts values into right-closed bins: `(-inf, e0]`, `(e0, e1]`, ...,
/// `(e_last, inf)`.
pub fn bracket_counts(values: &[f64], edges: &[f64]) -> Vec<SalaryBracketEntry> {
    let mut edges = edges.to_vec();
    edges.sort_by(f64::total_cmp);
    edges.dedup();

    let mut brackets: Vec<SalaryBracketEntry> = (0..=edges.len())
        .map(|index| {
            let lower = index.checked_sub(1).map(|previous| edges[previous]);
            let upper = edges.get(index).copied();
            SalaryBracketEntry {
                label: bracket_label(lower, upper),
                lower,
                upper,
                count: 0,
            }
        })
        .collect();

    for value in values {
        let index = edges
            .iter()
            .position(|edge| value.total_cmp(edge) != Ordering::Greater)
            .unwrap_or(edges.len());
        brackets[index].count += 1;
    }

    brackets
}

fn bracket_label(lower: Option<f64>, upper: Option<f64>) -> String {
    match (lower, upper) {
        (None, Some(upper)) => format!("< {}", short_amount(upper)),
        (Some(lower), None) => format!("> {}", short_amount(lower)),
        (Some(lower), Some(upper)) => {
            format!("{}-{}", short_amount(lower), short_amount(upper))
        }
        (None, None) => "All".to_string(),
    }
}

fn short_amount(amount: f64) -> String {
    if amount >= 1_000.0 && amount % 1_000.0 == 0.0 {
        format!("{}K", amount / 1_000.0)
    } else {
        amount.to_string()
    }
}
