//! Offline store-device metadata sync.
//!
//! Reads a JSON file of device records and upserts them into the
//! store_devices table, keyed by device_uid. Clients never write device
//! metadata; this job is the only writer.

use anyhow::{Context, Result};
use tracing::info;

use domain::models::device::StoreDeviceRecord;
use persistence::repositories::StoreDeviceRepository;
use storetrack_api::{config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);

    let path = std::env::args()
        .nth(1)
        .context("usage: device-sync <devices.json>")?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read device file {}", path))?;
    let records: Vec<StoreDeviceRecord> =
        serde_json::from_str(&raw).context("Device file is not a JSON array of device records")?;

    info!(count = records.len(), file = %path, "Syncing device metadata");

    let pool = persistence::db::create_pool(&config.database).await?;
    let repo = StoreDeviceRepository::new(pool);

    let mut synced = 0usize;
    for record in &records {
        repo.upsert_device(record)
            .await
            .with_context(|| format!("Failed to upsert device {}", record.device_uid))?;
        synced += 1;
    }

    info!(synced, "Device metadata sync complete");
    Ok(())
}
