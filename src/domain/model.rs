use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// 頁面語言，決定讀取哪些欄位與使用哪個模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Language {
    #[default]
    #[cfg_attr(feature = "cli", value(name = "en"))]
    #[serde(rename = "en")]
    English,
    #[cfg_attr(feature = "cli", value(name = "fr"))]
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// type, sub-type, title
    #[default]
    Alphabetical,
    Input,
}

/// One directory entry, with text already taken from the page language's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    /// 1-based line in the source CSV
    pub line: u64,
    pub title: String,
    /// English label, stable across both pages
    pub label: Option<String>,
    pub entity_type: String,
    pub subtypes: Vec<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Airtable `Not4DERD` checkbox
    pub hidden: bool,
}

impl EntityRecord {
    pub fn identifier(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.title)
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.title == name || self.label.as_deref() == Some(name)
    }
}

/// English -> French names for entity types and sub-types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    types: HashMap<String, String>,
    subtypes: HashMap<String, String>,
}

impl TranslationMap {
    pub fn new(types: HashMap<String, String>, subtypes: HashMap<String, String>) -> Self {
        Self { types, subtypes }
    }

    pub fn type_name(&self, english: &str) -> Option<&str> {
        self.types.get(english).map(String::as_str)
    }

    pub fn subtype_name(&self, english: &str) -> Option<&str> {
        self.subtypes.get(english).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.subtypes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.subtypes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub line: u64,
    pub reason: String,
}

/// Result of the extract stage.
#[derive(Debug, Clone, Default)]
pub struct LoadedInput {
    pub records: Vec<EntityRecord>,
    pub translations: TranslationMap,
    pub skipped: Vec<SkippedRecord>,
}

/// One (record, sub-type) pair in display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub url: Option<String>,
    pub desc: Option<String>,
    pub subtype: String,
    pub entity_type: String,
    /// English type, used for grouping
    #[serde(skip)]
    pub source_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

/// Result of the transform stage.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub sections: Vec<Section>,
    pub skipped: Vec<SkippedRecord>,
    pub excluded: Vec<String>,
}

impl Catalog {
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub text: String,
    pub entries: usize,
}

/// Summary returned by a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub entries: usize,
    pub skipped: Vec<SkippedRecord>,
    pub excluded: Vec<String>,
}
