pub mod dataset_service;
pub mod export_service;
pub mod filter_service;
pub mod format_service;
pub mod sort_service;
pub mod stats_service;
pub mod table_service;
