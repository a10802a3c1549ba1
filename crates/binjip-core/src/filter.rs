//! Filter engine for district and housing type selections
//!
//! A record passes when its district matches any selected district AND its
//! housing type matches any selected housing type. An empty selection on an
//! axis leaves that axis unconstrained, as does the "all districts" entry.

use serde::{Deserialize, Serialize};

use crate::models::{Record, ALL_DISTRICTS_LABEL};

/// One entry of the district selector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistrictChoice {
    /// Every district, regardless of other entries
    All,
    Named(String),
}

impl DistrictChoice {
    /// Parse a selector value; the "all districts" label maps to `All`
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == ALL_DISTRICTS_LABEL {
            DistrictChoice::All
        } else {
            DistrictChoice::Named(raw.to_string())
        }
    }
}

/// The user's current selections on both axes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub districts: Vec<DistrictChoice>,
    pub housing_types: Vec<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw selector values, skipping blank entries
    pub fn from_raw<D, H>(districts: D, housing_types: H) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        Self {
            districts: districts
                .into_iter()
                .filter(|d| !d.as_ref().trim().is_empty())
                .map(|d| DistrictChoice::parse(d.as_ref()))
                .collect(),
            housing_types: housing_types
                .into_iter()
                .map(|h| h.as_ref().trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn with_district(mut self, choice: DistrictChoice) -> Self {
        self.districts.push(choice);
        self
    }

    pub fn with_housing_type(mut self, housing_type: impl Into<String>) -> Self {
        self.housing_types.push(housing_type.into());
        self
    }

    /// Whether the district axis applies no constraint
    pub fn all_districts(&self) -> bool {
        self.districts.is_empty() || self.districts.contains(&DistrictChoice::All)
    }

    /// Whether the housing type axis applies no constraint
    pub fn all_housing_types(&self) -> bool {
        self.housing_types.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        let district_ok = self.all_districts()
            || self.districts.iter().any(|choice| match choice {
                DistrictChoice::Named(name) => *name == record.district,
                DistrictChoice::All => true,
            });

        let housing_ok =
            self.all_housing_types() || self.housing_types.iter().any(|h| *h == record.housing_type);

        district_ok && housing_ok
    }
}

/// Apply a selection, preserving record order
pub fn apply_filter(records: &[Record], selection: &FilterSelection) -> Vec<Record> {
    let filtered: Vec<Record> =
        records.iter().filter(|record| selection.matches(record)).cloned().collect();

    tracing::debug!(
        input = records.len(),
        matched = filtered.len(),
        all_districts = selection.all_districts(),
        all_housing_types = selection.all_housing_types(),
        "Applied filter selection"
    );

    filtered
}

/// Distinct values offered by the two selectors, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub districts: Vec<String>,
    pub housing_types: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record]) -> Self {
        let mut options = Self::default();
        for record in records {
            if !options.districts.contains(&record.district) {
                options.districts.push(record.district.clone());
            }
            if !options.housing_types.contains(&record.housing_type) {
                options.housing_types.push(record.housing_type.clone());
            }
        }
        options
    }

    /// District selector entries with the "all districts" entry first
    pub fn district_choices(&self) -> Vec<String> {
        std::iter::once(ALL_DISTRICTS_LABEL.to_string())
            .chain(self.districts.iter().cloned())
            .collect()
    }
}
