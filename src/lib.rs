pub mod backfill;
pub mod clock;
pub mod config;
pub mod details;
pub mod error;
pub mod fixtures_fetch;
pub mod http_client;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod search;
