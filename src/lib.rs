pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::models::currency::CurrencyTable;
use crate::services::{
    dataset_service::DatasetService, filter_service::FilterService,
    format_service::FormatService, sort_service::SortService, stats_service::StatsService,
    table_service::TableService,
};

/// Wires the pipeline once: the currency table is built a single time and
/// handed to every service that needs it.
#[derive(Clone)]
pub struct AppState {
    pub currencies: CurrencyTable,
    pub dataset_service: DatasetService,
    pub table_service: TableService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new() -> Self {
        let currencies = CurrencyTable::new();

        let dataset_service = DatasetService::new();
        let format_service = FormatService::new();
        let filter_service = FilterService::new();
        let sort_service = SortService::new(currencies.clone());
        let table_service = TableService::new(format_service, filter_service, sort_service);
        let stats_service = StatsService::new(currencies.clone());

        Self {
            currencies,
            dataset_service,
            table_service,
            stats_service,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
