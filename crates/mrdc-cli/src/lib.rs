//! Library side of the `mrdc` command: configuration, logging and the
//! extract, clean and load pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
