pub mod csv_import;
pub mod portfolio_service;

pub use portfolio_service::PortfolioService;
