use crate::config::AppConfig;
use crate::services::workshop::WorkshopApi;

pub struct AppState {
    pub config: AppConfig,
    pub api: Box<dyn WorkshopApi>,
}
