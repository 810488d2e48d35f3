use crate::utils::error::RowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_FIELD: &str = "address";
pub const GOOGLE_MAPS_LINK_FIELD: &str = "google_maps_link";
pub const STREET_VIEW_LINK_FIELD: &str = "street_view_link";
pub const REVIEW_STATUS_FIELD: &str = "review_status";
pub const NOTES_FIELD: &str = "notes";

/// Columns appended to every output row, in output order.
pub const APPENDED_FIELDS: [&str; 5] = [
    ADDRESS_FIELD,
    GOOGLE_MAPS_LINK_FIELD,
    STREET_VIEW_LINK_FIELD,
    REVIEW_STATUS_FIELD,
    NOTES_FIELD,
];

/// One parsed input row, columns kept in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    columns: Vec<(String, String)>,
}

impl InputRecord {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    /// Value of `name`, treating an empty cell as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// First present value among `aliases`, probed in order.
    pub fn first_of(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| self.get(alias))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Pending,
    Error,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Error => "ERROR",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Error => "error",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ReviewStatus::Pending),
            "ERROR" => Ok(ReviewStatus::Error),
            "APPROVED" => Ok(ReviewStatus::Approved),
            "REJECTED" => Ok(ReviewStatus::Rejected),
            other => Err(format!("unknown review status: {}", other)),
        }
    }
}

/// An input row plus the five geocoding columns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub source: InputRecord,
    pub address: String,
    pub google_maps_link: String,
    pub street_view_link: String,
    pub review_status: ReviewStatus,
    pub notes: String,
}

impl EnrichedRecord {
    pub fn resolved(
        source: InputRecord,
        address: String,
        google_maps_link: String,
        street_view_link: String,
    ) -> Self {
        Self {
            source,
            address,
            google_maps_link,
            street_view_link,
            review_status: ReviewStatus::Pending,
            notes: String::new(),
        }
    }

    pub fn failed(source: InputRecord, error: &RowError) -> Self {
        let address = match error {
            RowError::MissingCoordinates => "Missing coordinates".to_string(),
            other => format!("Error: {}", other),
        };

        Self {
            source,
            address,
            google_maps_link: String::new(),
            street_view_link: String::new(),
            review_status: ReviewStatus::Error,
            notes: error.to_string(),
        }
    }

    /// Input columns merged with the appended fields. An input column that
    /// shares a name with an appended field is overwritten in place.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut merged = self.source.columns().to_vec();

        for name in APPENDED_FIELDS {
            let value = self.appended_value(name);
            match merged.iter_mut().find(|(key, _)| key == name) {
                Some(slot) => slot.1 = value,
                None => merged.push((name.to_string(), value)),
            }
        }

        merged
    }

    fn appended_value(&self, name: &str) -> String {
        match name {
            ADDRESS_FIELD => self.address.clone(),
            GOOGLE_MAPS_LINK_FIELD => self.google_maps_link.clone(),
            STREET_VIEW_LINK_FIELD => self.street_view_link.clone(),
            REVIEW_STATUS_FIELD => self.review_status.to_string(),
            NOTES_FIELD => self.notes.clone(),
            _ => String::new(),
        }
    }
}

/// Output of the transform phase, in input order.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentResult {
    pub records: Vec<EnrichedRecord>,
}

impl EnrichmentResult {
    pub fn count_with_status(&self, status: ReviewStatus) -> usize {
        self.records
            .iter()
            .filter(|r| r.review_status == status)
            .count()
    }
}

/// What the load phase wrote. Both paths are `None` when there were no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub table_path: Option<String>,
    pub review_path: Option<String>,
}
