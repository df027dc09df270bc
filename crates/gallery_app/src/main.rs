mod command;
mod config;
mod logging;
mod render;
mod shell;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use gallery_engine::{GallerySession, ReqwestFetcher};
use gallery_logging::gallery_info;

use crate::logging::LogDestination;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = config::load_config(Path::new(config::CONFIG_FILENAME));
    logging::initialize(if config.log_to_file {
        LogDestination::File
    } else {
        LogDestination::Terminal
    });
    source.log();
    gallery_info!("Starting gallery against {}", config.api_base);

    let fetcher = ReqwestFetcher::new(config.fetch_settings()).context("creating HTTP client")?;
    let session = GallerySession::new(Arc::new(fetcher), config.session_settings());

    shell::run(session).await
}
