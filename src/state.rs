use crate::models::DashboardData;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardData>,
    rotation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(dashboard: DashboardData) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            rotation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn next_rotation(&self) -> u64 {
        self.rotation.fetch_add(1, Ordering::Relaxed)
    }
}
