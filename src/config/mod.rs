pub mod cli;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use crate::{core::ConfigProvider, utils::validation::validate_path};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_ZOOM: u8 = 18;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

const CSV_SUFFIX: &str = ".csv";
const GEOCODED_SUFFIX: &str = "_geocoded.csv";
const REVIEW_SUFFIX: &str = "_review.html";

/// Lookup settings. Fixed at build time; tests point `endpoint` at a mock server.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub zoom: u8,
    pub user_agent: String,
    pub delay: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            zoom: DEFAULT_ZOOM,
            user_agent: format!(
                "revgeo-etl/{} (CSV reverse geocoder)",
                env!("CARGO_PKG_VERSION")
            ),
            delay: DEFAULT_DELAY,
        }
    }
}

impl Validate for GeocoderConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_range("zoom", self.zoom, 0, 18)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}

/// `points.csv` -> `points_geocoded.csv`. Paths without `.csv` get the suffix appended.
pub fn default_output_path(input: &str) -> String {
    replace_csv_suffix(input, GEOCODED_SUFFIX)
}

/// `points_geocoded.csv` -> `points_geocoded_review.html`.
pub fn review_path_for(output: &str) -> String {
    replace_csv_suffix(output, REVIEW_SUFFIX)
}

fn replace_csv_suffix(path: &str, replacement: &str) -> String {
    if path.contains(CSV_SUFFIX) {
        path.replace(CSV_SUFFIX, replacement)
    } else {
        format!("{}{}", path, replacement)
    }
}

#[cfg(feature = "cli")]
pub const ALIAS_HELP: &str = "\
The CSV file should contain latitude and longitude columns.
Supported column names:
  - lat, latitude, Lat, Latitude, Y
  - lon, longitude, Long, Longitude, lng, X

Example:
  revgeo coordinates.csv
  revgeo coordinates.csv geocoded_results.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "revgeo")]
#[command(about = "Reverse geocode the coordinates of a CSV file with OpenStreetMap Nominatim")]
#[command(after_help = ALIAS_HELP)]
pub struct CliConfig {
    /// CSV file with latitude/longitude columns
    pub input: Option<String>,

    /// Output CSV (default: <input>_geocoded.csv)
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => default_output_path(self.input_path()),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = self.input.as_deref().ok_or_else(|| {
            crate::utils::error::EtlError::MissingConfigError {
                field: "input".to_string(),
            }
        })?;
        validate_path("input", input)?;
        validate_path("output", &self.output_path())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path("points.csv"), "points_geocoded.csv");
        assert_eq!(default_output_path("data/in.csv"), "data/in_geocoded.csv");
        assert_eq!(default_output_path("points.txt"), "points.txt_geocoded.csv");
    }

    #[test]
    fn test_review_path_for() {
        assert_eq!(review_path_for("points_geocoded.csv"), "points_geocoded_review.html");
        assert_eq!(review_path_for("out"), "out_review.html");
    }

    #[test]
    fn test_geocoder_config_defaults_validate() {
        let config = GeocoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint, "https://nominatim.openstreetmap.org/reverse");
        assert_eq!(config.zoom, 18);
        assert_eq!(config.delay, Duration::from_secs(1));
        assert!(config.user_agent.starts_with("revgeo-etl/"));
    }

    #[test]
    fn test_geocoder_config_rejects_empty_user_agent() {
        let config = GeocoderConfig {
            user_agent: String::new(),
            ..GeocoderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_paths() {
        use clap::Parser;

        let config = CliConfig::parse_from(["revgeo", "stops.csv"]);
        assert_eq!(config.input_path(), "stops.csv");
        assert_eq!(config.output_path(), "stops_geocoded.csv");
        assert_eq!(config.review_path(), "stops_geocoded_review.html");
        assert!(config.validate().is_ok());

        let config = CliConfig::parse_from(["revgeo", "stops.csv", "out.csv", "-v"]);
        assert_eq!(config.output_path(), "out.csv");
        assert_eq!(config.review_path(), "out_review.html");
        assert!(config.verbose);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_missing_input_fails_validation() {
        use clap::Parser;

        let config = CliConfig::parse_from(["revgeo"]);
        assert!(config.input.is_none());
        assert!(config.validate().is_err());
    }
}
