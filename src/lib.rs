pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::DrdConfig, RunConfig};
pub use core::{etl::GenerationEngine, pipeline::WikiPipeline};
pub use domain::model::{Language, RunReport, SortOrder};
pub use utils::error::{DrdError, Result};
