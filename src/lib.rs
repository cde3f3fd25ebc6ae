#![forbid(unsafe_code)]

pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod formats;
pub mod logging;
pub mod report;
pub mod store;
pub mod titles;
