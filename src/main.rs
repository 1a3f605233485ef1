use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use slotbook_store::{StoreConfig, open_store, summarize};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = StoreConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting slotbook");

    let store = open_store(&config).wrap_err("Failed to open the slot store")?;

    let summary = summarize(&store);
    info!(
        total = summary.total(),
        free = summary.free,
        busy = summary.busy,
        canceled = summary.canceled,
        "Slot table ready"
    );

    Ok(())
}
