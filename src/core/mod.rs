pub mod address;
pub mod coordinates;
pub mod etl;
pub mod pipeline;
pub mod review;

pub use crate::domain::model::{EnrichedRecord, EnrichmentResult, InputRecord, LoadReport, ReviewStatus};
pub use crate::domain::ports::{ConfigProvider, Pacer, Pipeline, ReverseGeocoder, Storage};
pub use crate::utils::error::Result;
