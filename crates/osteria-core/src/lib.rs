pub mod config;
pub mod record;
pub mod stats;
pub mod visitor;
