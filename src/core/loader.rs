//! Input Loader: the Airtable entity export and the French translation grids.

use crate::core::Storage;
use crate::domain::model::{EntityRecord, Language, SkippedRecord, TranslationMap};
use crate::utils::error::{DrdError, Result};
use crate::utils::validation::validate_url;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use url::Url;

pub const LABEL: &str = "Label";
pub const FRENCH_NAME: &str = "French Entity Full Name";
pub const TYPE: &str = "Type";
pub const SUBTYPE: &str = "SubType";

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[\r\n]+\s*").expect("line break pattern is valid"));

#[derive(Debug, Deserialize)]
struct EntityRow {
    #[serde(rename = "Label", default)]
    label: Option<String>,
    #[serde(rename = "Type", default)]
    entity_type: Option<String>,
    #[serde(rename = "SubType", default)]
    subtype: Option<String>,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Not4DERD", default)]
    not_for_derd: Option<String>,
    #[serde(rename = "French Entity Full Name", default)]
    french_name: Option<String>,
    #[serde(rename = "French URL", default)]
    french_url: Option<String>,
    #[serde(rename = "French Description", default)]
    french_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeRow {
    #[serde(rename = "Entity Type Eng", default)]
    english: Option<String>,
    #[serde(rename = "Entity Type FR", default)]
    french: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubtypeRow {
    #[serde(rename = "Entity sub-type", default)]
    english: Option<String>,
    #[serde(rename = "Entity sub-type FR", default)]
    french: Option<String>,
}

/// Trimmed, non-empty text.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_description(value: Option<String>) -> Option<String> {
    clean(value).map(|v| LINE_BREAKS.replace_all(&v, " ").into_owned())
}

/// A usable link, or `None`. Whitespace would end the wiki link target early,
/// so such URLs are kept in their percent-encoded form.
fn clean_url(value: Option<String>, line: u64) -> Option<String> {
    let raw = clean(value)?;
    if let Err(e) = validate_url("URL", &raw) {
        tracing::warn!(line, "⚠️ Dropping link: {}", e);
        return None;
    }
    if !raw.contains(char::is_whitespace) {
        return Some(raw);
    }
    match Url::parse(&raw) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::warn!(line, "⚠️ Dropping link '{}': {}", raw, e);
            None
        }
    }
}

fn split_subtypes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data)
}

fn csv_reader(data: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(strip_bom(data))
}

impl EntityRow {
    fn into_record(self, line: u64, language: Language) -> Result<EntityRecord> {
        let malformed = |reason: &str| DrdError::MalformedRecord {
            line,
            reason: reason.to_string(),
        };

        let label = clean(self.label);
        let (title, url, description) = match language {
            Language::English => (label.clone(), self.url, self.description),
            Language::French => (
                clean(self.french_name),
                self.french_url,
                self.french_description,
            ),
        };

        let title = title.ok_or_else(|| malformed("missing title"))?;
        let entity_type = clean(self.entity_type).ok_or_else(|| malformed("missing type"))?;
        let subtypes = clean(self.subtype)
            .map(|s| split_subtypes(&s))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| malformed("missing sub-type"))?;

        let hidden = clean(self.not_for_derd)
            .map(|v| v.eq_ignore_ascii_case("checked"))
            .unwrap_or(false);

        Ok(EntityRecord {
            line,
            title,
            label,
            entity_type,
            subtypes,
            url: clean_url(url, line),
            description: clean_description(description),
            hidden,
        })
    }
}

/// Reads entity records in file order. Malformed rows are skipped and returned alongside.
pub fn load_records<S: Storage>(
    storage: &S,
    path: &Path,
    language: Language,
) -> Result<(Vec<EntityRecord>, Vec<SkippedRecord>)> {
    let data = storage.read_file(path)?;
    parse_records(&data, path, language)
}

pub fn parse_records(
    data: &[u8],
    path: &Path,
    language: Language,
) -> Result<(Vec<EntityRecord>, Vec<SkippedRecord>)> {
    let mut reader = csv_reader(data);

    let headers = reader.headers().map_err(|e| DrdError::MalformedInput {
        path: path.to_path_buf(),
        reason: format!("unreadable header row: {}", e),
    })?;
    let title_column = match language {
        Language::English => LABEL,
        Language::French => FRENCH_NAME,
    };
    let missing: Vec<&str> = [title_column, TYPE, SUBTYPE]
        .into_iter()
        .filter(|column| !headers.iter().any(|h| h.trim() == *column))
        .collect();
    if !missing.is_empty() {
        return Err(DrdError::MalformedInput {
            path: path.to_path_buf(),
            reason: format!("missing column(s): {}", missing.join(", ")),
        });
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    let headers = headers.clone();
    for (index, raw) in reader.records().enumerate() {
        // 表頭佔第一行；欄位內可能有換行，以 reader 的位置為準
        let fallback_line = index as u64 + 2;
        let result = match raw {
            Ok(raw) => {
                let line = raw.position().map(|p| p.line()).unwrap_or(fallback_line);
                raw.deserialize::<EntityRow>(Some(&headers))
                    .map_err(|e| DrdError::MalformedRecord {
                        line,
                        reason: e.to_string(),
                    })
                    .and_then(|row| row.into_record(line, language))
            }
            Err(e) => Err(DrdError::MalformedRecord {
                line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
                reason: e.to_string(),
            }),
        };

        match result {
            Ok(record) => records.push(record),
            Err(DrdError::MalformedRecord { line, reason }) => {
                tracing::warn!(line, "⚠️ Skipping record: {}", reason);
                skipped.push(SkippedRecord { line, reason });
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        "Parsed {} records from {} ({} skipped)",
        records.len(),
        path.display(),
        skipped.len()
    );
    Ok((records, skipped))
}

fn parse_pairs<I>(rows: I, path: &Path, kind: &str) -> Result<HashMap<String, String>>
where
    I: Iterator<Item = std::result::Result<(Option<String>, Option<String>), csv::Error>>,
{
    let mut map = HashMap::new();
    for (index, row) in rows.enumerate() {
        let (english, french) = row?;
        match (clean(english), clean(french)) {
            (Some(english), Some(french)) => {
                map.insert(english, french);
            }
            (english, _) => {
                tracing::warn!(
                    "⚠️ Ignoring incomplete {} translation on line {} of {}: {}",
                    kind,
                    index + 2,
                    path.display(),
                    english.unwrap_or_default()
                );
            }
        }
    }
    Ok(map)
}

fn read_translation_file<S: Storage>(storage: &S, path: &Path) -> Result<Vec<u8>> {
    if !storage.exists(path) {
        return Err(DrdError::MissingTranslationFile {
            path: path.to_path_buf(),
        });
    }
    storage.read_file(path).map_err(|e| match e {
        DrdError::MissingFile { path } => DrdError::MissingTranslationFile { path },
        other => other,
    })
}

/// Builds the English -> French type and sub-type map from the two Airtable grids.
pub fn load_translations<S: Storage>(
    storage: &S,
    types_file: &Path,
    subtypes_file: &Path,
) -> Result<TranslationMap> {
    // 兩個檔案都先確認存在，再開始解析
    let types_data = read_translation_file(storage, types_file)?;
    let subtypes_data = read_translation_file(storage, subtypes_file)?;

    let mut reader = csv_reader(&types_data);
    let types = parse_pairs(
        reader
            .deserialize::<TypeRow>()
            .map(|r| r.map(|r| (r.english, r.french))),
        types_file,
        "type",
    )?;

    let mut reader = csv_reader(&subtypes_data);
    let subtypes = parse_pairs(
        reader
            .deserialize::<SubtypeRow>()
            .map(|r| r.map(|r| (r.english, r.french))),
        subtypes_file,
        "sub-type",
    )?;

    tracing::debug!(
        "Loaded {} type and {} sub-type translations",
        types.len(),
        subtypes.len()
    );
    Ok(TranslationMap::new(types, subtypes))
}
