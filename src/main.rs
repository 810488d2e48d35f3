use clap::{CommandFactory, Parser};
use revgeo_etl::core::ConfigProvider;
use revgeo_etl::utils::{logger, validation::Validate};
use revgeo_etl::{
    CliConfig, EtlEngine, EtlError, FixedDelay, GeocodePipeline, GeocoderConfig, LocalStorage,
    NominatimClient,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    if config.input.is_none() {
        CliConfig::command().print_help()?;
        std::process::exit(1);
    }

    tracing::info!("Starting revgeo");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 啟動前檢查輸入檔案，避免處理到一半才失敗
    if !Path::new(config.input_path()).exists() {
        exit_with(&EtlError::InputFileNotFound {
            path: config.input_path().to_string(),
        });
    }

    let geocoder_config = GeocoderConfig::default();
    if let Err(e) = geocoder_config.validate() {
        exit_with(&e);
    }

    let geocoder = match NominatimClient::new(&geocoder_config) {
        Ok(geocoder) => geocoder,
        Err(e) => exit_with(&e),
    };

    let pacer = FixedDelay::new(geocoder_config.delay);
    let pipeline = GeocodePipeline::new(LocalStorage::default(), config, geocoder, pacer);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => match (report.table_path, report.review_path) {
            (Some(table), Some(review)) => {
                println!("Geocoding complete! Results saved to: {}", table);
                println!("Review HTML generated: {}", review);
            }
            _ => println!("No rows found in input; nothing was written."),
        },
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &EtlError) -> ! {
    tracing::error!("❌ Geocoding run failed: {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
