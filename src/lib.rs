pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    generation_service::GenerationService, model_client::ModelClient, stats_service::StatsService,
};
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub generation_service: GenerationService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap();

        let model_client = ModelClient::new(
            config.api_keys(),
            config.openrouter_base_url.clone(),
            config.llm_model.clone(),
            http_client,
        );
        let generation_service = GenerationService::new(
            model_client,
            config.max_chunk_size,
            Duration::from_millis(config.retry_base_delay_ms),
        );

        Self {
            generation_service,
            stats_service: StatsService::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
