//! Configuration for the ordering pass.

mod print_config;

pub use print_config::PrintConfig;
