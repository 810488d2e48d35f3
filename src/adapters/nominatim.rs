use crate::config::GeocoderConfig;
use crate::core::address::extract_address;
use crate::core::coordinates::{format_degrees, Coordinates};
use crate::domain::ports::ReverseGeocoder;
use crate::utils::error::{Result, RowError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Reverse geocoding over the Nominatim `/reverse` JSON API.
pub struct NominatimClient {
    client: Client,
    endpoint: String,
    zoom: String,
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        // Nominatim blocks clients that do not identify themselves
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            zoom: config.zoom.to_string(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> std::result::Result<String, RowError> {
        let lat = format_degrees(&coordinates.lat);
        let lon = format_degrees(&coordinates.lon);

        tracing::debug!("Making reverse geocoding request to: {} ({}, {})", self.endpoint, lat, lon);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", self.zoom.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        tracing::debug!("Geocoding response status: {}", response.status());

        match response.status() {
            StatusCode::OK => {
                let body: serde_json::Value = response.json().await?;
                Ok(extract_address(&body))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(RowError::RateLimited),
            status => Err(RowError::HttpError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }),
        }
    }
}
