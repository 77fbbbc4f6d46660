use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use site_payroll::api::{AppState, create_router};
use site_payroll::config::ConfigLoader;
use site_payroll::repository::{Dataset, InMemoryStore};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        weekly_threshold_hours = %config.overtime_policy().weekly_threshold_hours,
        allow_overnight_shifts = config.allow_overnight_shifts(),
        "Loaded payroll configuration"
    );

    // In-memory store, optionally seeded from a JSON export of the data store
    let dataset = match env::var("PAYROLL_DATA_FILE") {
        Ok(path) => {
            let dataset = Dataset::from_json_file(&PathBuf::from(&path))?;
            info!(
                data_file = %path,
                attendance = dataset.attendance.len(),
                employees = dataset.employees.len(),
                rate_cards = dataset.rate_cards.len(),
                job_sites = dataset.job_sites.len(),
                "Seeded store from data file"
            );
            dataset
        }
        Err(_) => Dataset::default(),
    };
    let store = Arc::new(InMemoryStore::with_dataset(dataset));

    let state = AppState::new(config, store.clone(), store.clone(), store);
    let app = create_router(state);

    let addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Site payroll engine listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
