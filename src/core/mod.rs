pub mod catalog;
pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod render;
pub mod wiki;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{Catalog, EntityRecord, LoadedInput, TranslationMap};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
