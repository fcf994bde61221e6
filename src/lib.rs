// Library for tests to access modules

pub mod aggregator;
pub mod assembler;
pub mod config;
pub mod history;
pub mod models;
pub mod probes;
pub mod rate_tracker;
pub mod report;
pub mod routes;
pub mod session;
pub mod version;
mod worker;
