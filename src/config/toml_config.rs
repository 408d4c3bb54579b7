use crate::domain::model::SortOrder;
use crate::utils::error::{DrdError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TYPES_FILE: &str = "Entity Types-Grid view.csv";
pub const DEFAULT_SUBTYPES_FILE: &str = "Entity sub-type-Grid view.csv";
pub const DEFAULT_TITLE: &str = "Data Resource Directory";
pub const DEFAULT_TITLE_FR: &str = "Répertoire des ressources de données";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrdConfig {
    pub page: PageConfig,
    pub translations: TranslationConfig,
    pub render: RenderConfig,
    pub filter: FilterConfig,
    pub categories: Categories,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub title_fr: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            title_fr: DEFAULT_TITLE_FR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub types_file: PathBuf,
    pub subtypes_file: PathBuf,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            types_file: PathBuf::from(DEFAULT_TYPES_FILE),
            subtypes_file: PathBuf::from(DEFAULT_SUBTYPES_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub template: Option<PathBuf>,
    pub template_fr: Option<PathBuf>,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Entry titles or English labels kept off the page
    pub exclude: Vec<String>,
}

/// A page section and the English entity types it gathers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub title: String,
    pub title_fr: String,
    pub types: Vec<String>,
}

impl CategoryConfig {
    fn new(title: &str, title_fr: &str, types: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            title_fr: title_fr.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories(pub Vec<CategoryConfig>);

impl Default for Categories {
    fn default() -> Self {
        Self(vec![
            CategoryConfig::new(
                "Communities",
                "Communautés",
                &["Committees", "Communities", "Working Groups"],
            ),
            CategoryConfig::new(
                "Data Glossaries",
                "Glossaires de données",
                &["Data Glossaries", "Other", "Top-20 Data terms"],
            ),
            CategoryConfig::new(
                "Learning Resources",
                "Ressources d'apprentissage",
                &["Data Glossaries", "Documents", "Learning Resources"],
            ),
            CategoryConfig::new(
                "Organizations and Teams",
                "Organisations avec Équipes",
                &["Organizations", "Teams"],
            ),
            CategoryConfig::new(
                "Projects/Initiatives",
                "Projets / initiatives",
                &["Projects/Initiatives"],
            ),
            CategoryConfig::new(
                "Policy Instruments",
                "Instruments de politique",
                &["Policy Instruments"],
            ),
        ])
    }
}

impl DrdConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DrdError::Config {
            field: "config".to_string(),
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("page.title", &self.page.title)?;
        validate_non_empty_string("page.title_fr", &self.page.title_fr)?;

        validate_path("translations.types_file", &self.translations.types_file)?;
        validate_path("translations.subtypes_file", &self.translations.subtypes_file)?;

        if let Some(template) = &self.render.template {
            validate_path("render.template", template)?;
        }
        if let Some(template) = &self.render.template_fr {
            validate_path("render.template_fr", template)?;
        }

        validate_non_empty_list("categories", &self.categories.0)?;
        for (i, category) in self.categories.0.iter().enumerate() {
            validate_non_empty_string(&format!("categories[{}].title", i), &category.title)?;
            validate_non_empty_string(&format!("categories[{}].title_fr", i), &category.title_fr)?;
            validate_non_empty_list(&format!("categories[{}].types", i), &category.types)?;
        }

        Ok(())
    }
}

impl Validate for DrdConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
