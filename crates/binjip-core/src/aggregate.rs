//! Per-district counts and quantile bins for the choropleth

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{BinjipError, Result};
use crate::models::{district_code, Record};

/// Number of quantile bins, matching the 7-step colour scale
pub const BIN_COUNT: usize = 7;

/// Record count of one district in the filtered set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictAggregate {
    pub district: String,
    pub code: String,
    pub count: usize,
    pub bin: usize,
}

/// Bin edges over the count distribution.
///
/// Bin `i` covers `(edges[i], edges[i + 1]]`; bin 0 also includes `edges[0]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Binning {
    pub edges: Vec<f64>,
}

impl Binning {
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Lower and upper edge of a bin
    pub fn range(&self, bin: usize) -> Option<(f64, f64)> {
        Some((*self.edges.get(bin)?, *self.edges.get(bin + 1)?))
    }

    fn assign(&self, value: f64) -> usize {
        let last = self.bin_count().saturating_sub(1);
        (0..self.bin_count())
            .find(|&bin| value <= self.edges[bin + 1])
            .unwrap_or(last)
    }
}

/// District aggregates plus the binning used to colour them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    /// Ordered by count descending, then code ascending
    pub districts: Vec<DistrictAggregate>,
    pub binning: Binning,
}

impl Aggregation {
    /// Sum of all district counts
    pub fn total(&self) -> usize {
        self.districts.iter().map(|d| d.count).sum()
    }

    pub fn get(&self, code: &str) -> Option<&DistrictAggregate> {
        self.districts.iter().find(|d| d.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

/// Group records by district and assign each district a quantile bin.
///
/// Fails with `UnknownDistrict` when a record's district has no code.
pub fn aggregate(records: &[Record]) -> Result<Aggregation> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.district.as_str()).or_default() += 1;
    }

    let mut districts = counts
        .into_iter()
        .map(|(name, count)| {
            let code = district_code(name).ok_or_else(|| BinjipError::UnknownDistrict {
                name: name.to_string(),
            })?;
            Ok(DistrictAggregate {
                district: name.to_string(),
                code: code.to_string(),
                count,
                bin: 0,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    districts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

    let values: Vec<usize> = districts.iter().map(|d| d.count).collect();
    let (bins, binning) = quantile_bins(&values, BIN_COUNT);
    for (district, bin) in districts.iter_mut().zip(bins) {
        district.bin = bin;
    }

    tracing::debug!(
        districts = districts.len(),
        bins = binning.bin_count(),
        "Aggregated district counts"
    );

    Ok(Aggregation { districts, binning })
}

/// Quantile-cut `values` into at most `bins` bins.
///
/// Edges sit at evenly spaced quantiles (linear interpolation) and duplicate
/// edges are dropped, so fewer bins may come back. With fewer than two
/// distinct values every value lands in bin 0.
pub fn quantile_bins(values: &[usize], bins: usize) -> (Vec<usize>, Binning) {
    if values.is_empty() {
        return (Vec::new(), Binning::default());
    }

    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    if min == max || bins < 2 {
        let binning = Binning { edges: vec![min, max] };
        return (vec![0; values.len()], binning);
    }

    let mut edges: Vec<f64> =
        (0..=bins).map(|i| quantile(&sorted, i as f64 / bins as f64)).collect();
    edges.dedup();

    let binning = Binning { edges };
    let assigned = values.iter().map(|&v| binning.assign(v as f64)).collect();
    (assigned, binning)
}

/// Linear-interpolated quantile of an ascending slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
