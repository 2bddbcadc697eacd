use std::sync::Arc;

use crate::sweep::Sweeper;

pub struct AppState {
    pub sweeper: Sweeper,
    pub cron_secret: Option<String>,
}

impl AppState {
    pub fn new(sweeper: Sweeper, cron_secret: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            sweeper,
            cron_secret,
        })
    }
}
