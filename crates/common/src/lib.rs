pub mod catalog;
pub mod observability;
pub mod provider;
pub mod types;
pub mod utils;
