//! Turns loaded records into the ordered page sections.

use crate::config::toml_config::CategoryConfig;
use crate::domain::model::{
    Catalog, EntityRecord, Entry, Language, Section, SkippedRecord, SortOrder, TranslationMap,
};
use std::collections::HashSet;

pub struct CatalogOptions<'a> {
    pub language: Language,
    pub categories: &'a [CategoryConfig],
    pub exclusions: &'a [String],
    pub sort: SortOrder,
}

/// Entries for one record, one per sub-type, in display language.
fn expand(
    record: &EntityRecord,
    language: Language,
    translations: &TranslationMap,
) -> Result<Vec<Entry>, String> {
    let entity_type = match language {
        Language::English => record.entity_type.clone(),
        Language::French => translations
            .type_name(&record.entity_type)
            .map(str::to_string)
            .ok_or_else(|| format!("no French name for type '{}'", record.entity_type))?,
    };

    record
        .subtypes
        .iter()
        .map(|subtype| -> Result<Entry, String> {
            let subtype = match language {
                Language::English => subtype.clone(),
                Language::French => translations
                    .subtype_name(subtype)
                    .map(str::to_string)
                    .ok_or_else(|| format!("no French name for sub-type '{}'", subtype))?,
            };
            Ok(Entry {
                name: record.title.clone(),
                url: record.url.clone(),
                desc: record.description.clone(),
                subtype,
                entity_type: entity_type.clone(),
                source_type: record.entity_type.clone(),
            })
        })
        .collect()
}

pub fn build_catalog(
    records: &[EntityRecord],
    translations: &TranslationMap,
    options: &CatalogOptions<'_>,
) -> Catalog {
    let mut catalog = Catalog::default();
    let mut entries = Vec::new();
    let placed: HashSet<&str> = options
        .categories
        .iter()
        .flat_map(|c| c.types.iter().map(String::as_str))
        .collect();

    for record in records {
        if record.hidden {
            tracing::debug!("Not4DERD: leaving out '{}'", record.title);
            continue;
        }

        if options.exclusions.iter().any(|name| record.matches(name)) {
            tracing::info!("🚫 Excluding '{}' from the page", record.identifier());
            catalog.excluded.push(record.identifier().to_string());
            continue;
        }

        if !placed.contains(record.entity_type.as_str()) {
            let reason = format!("type '{}' has no page category", record.entity_type);
            tracing::warn!(
                line = record.line,
                "⚠️ Skipping record '{}': {}",
                record.title,
                reason
            );
            catalog.skipped.push(SkippedRecord {
                line: record.line,
                reason,
            });
            continue;
        }

        match expand(record, options.language, translations) {
            Ok(expanded) => entries.extend(expanded),
            Err(reason) => {
                tracing::warn!(
                    line = record.line,
                    "⚠️ Skipping record '{}': {}",
                    record.title,
                    reason
                );
                catalog.skipped.push(SkippedRecord {
                    line: record.line,
                    reason,
                });
            }
        }
    }

    if options.sort == SortOrder::Alphabetical {
        // stable: ties keep file order
        entries.sort_by(|a, b| {
            (&a.entity_type, &a.subtype, &a.name).cmp(&(&b.entity_type, &b.subtype, &b.name))
        });
    }

    for category in options.categories {
        let title = match options.language {
            Language::English => category.title.clone(),
            Language::French => category.title_fr.clone(),
        };
        let section_entries: Vec<Entry> = category
            .types
            .iter()
            .flat_map(|t| entries.iter().filter(move |e| &e.source_type == t))
            .cloned()
            .collect();

        tracing::debug!("Section '{}': {} entries", title, section_entries.len());
        catalog.sections.push(Section {
            title,
            entries: section_entries,
        });
    }

    catalog
}
