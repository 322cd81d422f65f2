// ==========================================
// Customer Analytics - batch runner entry
// ==========================================

use customer_analytics::config::Settings;
use customer_analytics::{app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("Customer Analytics - dual-strategy KPI batch");
    tracing::info!("version: {}", customer_analytics::VERSION);
    tracing::info!("==================================================");

    let settings = Settings::from_env();
    tracing::info!(
        customers = %settings.customers_csv_path.display(),
        orders = %settings.orders_xml_path.display(),
        db = %settings.db_path.display(),
        "configuration loaded"
    );

    let outcome = app::run(&settings).await?;

    tracing::info!(
        customers_accepted = outcome.summary.customers_accepted,
        customers_rejected = outcome.summary.customers_rejected(),
        orders_accepted = outcome.summary.orders_accepted,
        orders_rejected = outcome.summary.orders_rejected(),
        "run complete"
    );

    if !outcome.divergences.is_empty() {
        tracing::error!(
            count = outcome.divergences.len(),
            "engines diverged; see run_summary.json"
        );
        std::process::exit(1);
    }

    Ok(())
}
