//! Application state shared by all handlers

use shopdesk_core::Config;
use shopdesk_services::ProductService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub products: ProductService,
}

impl AppState {
    pub fn new(config: Config, products: ProductService) -> Self {
        Self { config, products }
    }
}
