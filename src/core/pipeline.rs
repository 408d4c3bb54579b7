use crate::core::catalog::{build_catalog, CatalogOptions};
use crate::core::loader::{load_records, load_translations};
use crate::core::render::PageRenderer;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Catalog, Language, LoadedInput, TranslationMap};
use crate::utils::error::{DrdError, Result};
use std::path::PathBuf;

pub struct WikiPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> WikiPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn renderer(&self) -> Result<PageRenderer> {
        match self.config.template_path() {
            Some(path) => {
                tracing::debug!("Using template {}", path.display());
                PageRenderer::from_file(&self.storage, path)
            }
            None => Ok(PageRenderer::builtin(self.config.language())),
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for WikiPipeline<S, C> {
    fn extract(&self) -> Result<LoadedInput> {
        let input = self.config.input_path();
        if !self.storage.exists(input) {
            return Err(DrdError::MissingFile {
                path: input.to_path_buf(),
            });
        }

        // 法文頁面需要翻譯檔，先檢查再解析輸入
        let translations = match self.config.language() {
            Language::English => TranslationMap::default(),
            Language::French => load_translations(
                &self.storage,
                self.config.types_file(),
                self.config.subtypes_file(),
            )?,
        };

        let (records, skipped) = load_records(&self.storage, input, self.config.language())?;

        Ok(LoadedInput {
            records,
            translations,
            skipped,
        })
    }

    fn transform(&self, data: LoadedInput) -> Result<Catalog> {
        let options = CatalogOptions {
            language: self.config.language(),
            categories: self.config.categories(),
            exclusions: self.config.exclusions(),
            sort: self.config.sort_order(),
        };

        let mut catalog = build_catalog(&data.records, &data.translations, &options);

        let mut skipped = data.skipped;
        skipped.append(&mut catalog.skipped);
        skipped.sort_by_key(|s| s.line);
        catalog.skipped = skipped;

        Ok(catalog)
    }

    fn load(&self, catalog: &Catalog) -> Result<PathBuf> {
        let renderer = self.renderer()?;
        let page = renderer.render(self.config.page_title(), self.config.language(), catalog)?;

        let output_path = self.config.output_path();
        tracing::debug!(
            "Writing {} entries ({} bytes) to {}",
            page.entries,
            page.text.len(),
            output_path.display()
        );
        self.storage.write_file(&output_path, page.text.as_bytes())?;

        Ok(output_path)
    }
}
