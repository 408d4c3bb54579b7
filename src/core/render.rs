//! Page Renderer: fills the page template with the catalog sections.

use crate::core::{wiki, Storage};
use crate::domain::model::{Catalog, Language, RenderedPage};
use crate::utils::error::{DrdError, Result};
use minijinja::{context, AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

const TEMPLATE_EN: &str = include_str!("../../templates/drd_two_col.j2");
const TEMPLATE_FR: &str = include_str!("../../templates/drd_two_col_FR.j2");

#[derive(Debug, Serialize)]
struct PageInfo<'a> {
    title: &'a str,
    language: &'static str,
}

pub struct PageRenderer {
    env: Environment<'static>,
    name: String,
    source: String,
}

impl PageRenderer {
    /// The page template shipped with the binary for `language`.
    pub fn builtin(language: Language) -> Self {
        match language {
            Language::English => Self::from_source("drd_two_col.j2", TEMPLATE_EN),
            Language::French => Self::from_source("drd_two_col_FR.j2", TEMPLATE_FR),
        }
    }

    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        let mut env = Environment::new();

        // wikitext 不是 HTML，不做跳脫
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_function("format_link_text", wiki::format_link_text);
        env.add_function("gen_url", wiki::gen_url);
        env.add_function("wiki_cell", wiki::wiki_cell);
        env.add_filter("format_link_text", wiki::format_link_text);
        env.add_filter("wiki_cell", wiki::wiki_cell);

        Self {
            env,
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn from_file<S: Storage>(storage: &S, path: &Path) -> Result<Self> {
        let data = storage.read_file(path).map_err(|e| DrdError::Config {
            field: "template".to_string(),
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        let source = String::from_utf8(data).map_err(|_| DrdError::Config {
            field: "template".to_string(),
            message: format!("{} is not valid UTF-8", path.display()),
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "template".to_string());
        Ok(Self::from_source(name, source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(
        &self,
        title: &str,
        language: Language,
        catalog: &Catalog,
    ) -> Result<RenderedPage> {
        let page = PageInfo {
            title,
            language: language.code(),
        };

        let text = self.env.render_named_str(
            &self.name,
            &self.source,
            context! {
                page => page,
                sections => &catalog.sections,
            },
        )?;

        Ok(RenderedPage {
            text,
            entries: catalog.entry_count(),
        })
    }
}
