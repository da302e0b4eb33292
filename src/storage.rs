use crate::demo::demo_dashboard;
use crate::models::DashboardData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

pub async fn load_dashboard(path: Option<&Path>) -> DashboardData {
    let Some(path) = path else {
        return demo_dashboard();
    };

    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => {
                info!("dashboard data loaded from {}", path.display());
                data
            }
            Err(err) => {
                error!("failed to parse dashboard file: {err}");
                demo_dashboard()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("{} not found, serving demo dashboard", path.display());
            demo_dashboard()
        }
        Err(err) => {
            error!("failed to read dashboard file: {err}");
            demo_dashboard()
        }
    }
}
