pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod insights;
pub mod output;
pub mod parser;
pub mod records;
pub mod report;
pub mod stats;
pub mod timeslot;
