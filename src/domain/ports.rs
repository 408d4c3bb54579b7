use crate::domain::model::{Catalog, Language, LoadedInput, SortOrder};
use crate::config::toml_config::CategoryConfig;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    fn exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Replaces the whole file at `path`.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &Path;
    fn output_path(&self) -> PathBuf;
    fn language(&self) -> Language;
    fn types_file(&self) -> &Path;
    fn subtypes_file(&self) -> &Path;
    fn categories(&self) -> &[CategoryConfig];
    fn exclusions(&self) -> &[String];
    fn template_path(&self) -> Option<&Path>;
    fn sort_order(&self) -> SortOrder;
    fn page_title(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<LoadedInput>;
    fn transform(&self, data: LoadedInput) -> Result<Catalog>;
    /// Renders and writes the page, returning the path written.
    fn load(&self, catalog: &Catalog) -> Result<PathBuf>;
}
