//! Application module

pub mod cli;
pub mod config;
pub mod report;
pub mod startup;
