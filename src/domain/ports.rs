use crate::core::coordinates::Coordinates;
use crate::domain::model::{EnrichmentResult, InputRecord, LoadReport};
use crate::utils::error::{Result, RowError};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> String;

    fn review_path(&self) -> String {
        crate::config::review_path_for(&self.output_path())
    }
}

/// A single coordinate-to-address lookup against a remote service.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> std::result::Result<String, RowError>;
}

/// Waits between consecutive lookups.
pub trait Pacer: Send + Sync {
    fn pause(&self) -> impl std::future::Future<Output = ()> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputRecord>>;
    async fn transform(&self, data: Vec<InputRecord>) -> Result<EnrichmentResult>;
    async fn load(&self, result: EnrichmentResult) -> Result<LoadReport>;
}
