use crate::core::coordinates::{extract_coordinates, Coordinates};
use crate::core::review::render_review_page;
use crate::core::{
    ConfigProvider, EnrichedRecord, EnrichmentResult, InputRecord, LoadReport, Pacer, Pipeline,
    ReverseGeocoder, Storage,
};
use crate::utils::error::{EtlError, Result, RowError};
use chrono::Local;
use std::collections::HashSet;

/// Reads a CSV of coordinates, reverse geocodes every row one at a time and
/// writes the annotated CSV plus an HTML review page.
pub struct GeocodePipeline<S, C, G, P>
where
    S: Storage,
    C: ConfigProvider,
    G: ReverseGeocoder,
    P: Pacer,
{
    storage: S,
    config: C,
    geocoder: G,
    pacer: P,
}

impl<S, C, G, P> GeocodePipeline<S, C, G, P>
where
    S: Storage,
    C: ConfigProvider,
    G: ReverseGeocoder,
    P: Pacer,
{
    pub fn new(storage: S, config: C, geocoder: G, pacer: P) -> Self {
        Self {
            storage,
            config,
            geocoder,
            pacer,
        }
    }

    /// Returns the enriched row and whether a lookup was attempted.
    async fn enrich(&self, row: usize, total: usize, record: InputRecord) -> (EnrichedRecord, bool) {
        let extracted = extract_coordinates(&record)
            .map(|raw| (Coordinates::parse(raw), format!("{}, {}", raw.lat, raw.lon)));

        let (coordinates, label) = match extracted {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    "⚠️ [{}/{}] Missing coordinates in row {:?}",
                    row,
                    total,
                    record.columns()
                );
                return (EnrichedRecord::failed(record, &e), false);
            }
        };

        let enriched = match self.lookup(coordinates).await {
            Ok(address) => {
                tracing::info!("[{}/{}] Processed: {} -> {}", row, total, label, address);
                EnrichedRecord::resolved(
                    record,
                    address,
                    coordinates.google_maps_link(),
                    coordinates.street_view_link(),
                )
            }
            Err(e) => {
                tracing::warn!("❌ [{}/{}] Error processing {}: {}", row, total, label, e);
                EnrichedRecord::failed(record, &e)
            }
        };

        (enriched, true)
    }

    async fn lookup(&self, coordinates: Coordinates) -> std::result::Result<String, RowError> {
        // out-of-range coordinates never reach the network
        coordinates.validate()?;
        self.geocoder.reverse_geocode(coordinates).await
    }
}

#[async_trait::async_trait]
impl<S, C, G, P> Pipeline for GeocodePipeline<S, C, G, P>
where
    S: Storage,
    C: ConfigProvider,
    G: ReverseGeocoder,
    P: Pacer,
{
    async fn extract(&self) -> Result<Vec<InputRecord>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading input CSV: {}", input_path);

        let data = self.storage.read_file(input_path).await?;
        let records = parse_records(&data)?;

        tracing::debug!("Parsed {} rows from {}", records.len(), input_path);
        Ok(records)
    }

    async fn transform(&self, data: Vec<InputRecord>) -> Result<EnrichmentResult> {
        let total = data.len();
        let mut records = Vec::with_capacity(total);

        // one request in flight at a time; results stay in memory until load
        for (index, record) in data.into_iter().enumerate() {
            let (enriched, looked_up) = self.enrich(index + 1, total, record).await;
            records.push(enriched);

            if looked_up {
                self.pacer.pause().await;
            }
        }

        Ok(EnrichmentResult { records })
    }

    async fn load(&self, result: EnrichmentResult) -> Result<LoadReport> {
        if result.records.is_empty() {
            return Ok(LoadReport::default());
        }

        let table_path = self.config.output_path();
        let review_path = self.config.review_path();

        let table = write_table(&result.records)?;
        tracing::debug!("Writing CSV ({} bytes) to {}", table.len(), table_path);
        self.storage.write_file(&table_path, &table).await?;

        let html = render_review_page(&result.records, Local::now());
        tracing::debug!("Writing review page ({} bytes) to {}", html.len(), review_path);
        self.storage.write_file(&review_path, html.as_bytes()).await?;

        Ok(LoadReport {
            rows: result.records.len(),
            table_path: Some(table_path),
            review_path: Some(review_path),
        })
    }
}

/// Every header name is kept once; cells missing from short rows become empty.
/// A repeated header name keeps the value of its first column.
pub fn parse_records(data: &[u8]) -> Result<Vec<InputRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let raw_headers = reader.headers()?.clone();
    let mut seen = HashSet::new();
    let headers: Vec<(usize, String)> = raw_headers
        .iter()
        .enumerate()
        .filter(|(_, name)| seen.insert(*name))
        .map(|(i, name)| (i, name.to_string()))
        .collect();
    if headers.len() < raw_headers.len() {
        tracing::warn!("Duplicate column names in input; keeping the first of each");
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let columns = headers
            .iter()
            .map(|(i, name)| (name.clone(), row.get(*i).unwrap_or_default().to_string()))
            .collect();
        records.push(InputRecord::new(columns));
    }

    Ok(records)
}

/// Header is the key set of the first record.
pub fn write_table(records: &[EnrichedRecord]) -> Result<Vec<u8>> {
    let rows: Vec<Vec<(String, String)>> = records.iter().map(EnrichedRecord::fields).collect();
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = first.iter().map(|(name, _)| name.as_str()).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for row in &rows {
        writer.write_record(header.iter().map(|name| {
            row.iter()
                .find(|(key, _)| key.as_str() == *name)
                .map(|(_, value)| value.as_str())
                .unwrap_or_default()
        }))?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
