pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{nominatim::NominatimClient, pacing::FixedDelay};
pub use config::{cli::LocalStorage, GeocoderConfig};
pub use crate::core::{etl::EtlEngine, pipeline::GeocodePipeline};
pub use utils::error::{EtlError, Result, RowError};
