pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{Language, SortOrder};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::path::{Path, PathBuf};
use toml_config::{CategoryConfig, DrdConfig};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "drd-wiki", version)]
#[command(
    about = "Generate Wikitext source for the Data Resource Directory GCpedia page."
)]
pub struct CliConfig {
    /// Input file containing entity data (Airtable CSV export)
    pub input: PathBuf,

    /// Destination file to write to [default: <input stem>.txt in the current directory]
    #[arg(short = 'o', value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Page language
    #[arg(short, long, value_enum, default_value = "en")]
    pub lang: Language,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Template overriding the built-in page template
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Leave an entry off the page (title or English label); repeatable
    #[arg(short = 'x', long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Render entries in file order instead of alphabetical order
    #[arg(long)]
    pub keep_input_order: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Settings for one run: command line merged over the optional config file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub language: Language,
    pub settings: DrdConfig,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, language: Language, settings: DrdConfig) -> Self {
        Self {
            input: input.into(),
            output: None,
            language,
            settings,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => DrdConfig::from_file(path)?,
            None => DrdConfig::default(),
        };

        // 命令列覆蓋配置檔
        if let Some(template) = &cli.template {
            match cli.lang {
                Language::English => settings.render.template = Some(template.clone()),
                Language::French => settings.render.template_fr = Some(template.clone()),
            }
        }
        if cli.keep_input_order {
            settings.render.sort = SortOrder::Input;
        }
        settings.filter.exclude.extend(cli.exclude.iter().cloned());

        Ok(Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            language: cli.lang,
            settings,
        })
    }
}

/// `<stem>.txt` (or `<stem>_FR.txt`) in the current directory, unless that is the input itself.
pub fn default_output_path(input: &Path, language: Language) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output_template".to_string());
    let suffix = match language {
        Language::English => "",
        Language::French => "_FR",
    };

    let candidate = PathBuf::from(format!("{}{}.txt", stem, suffix));
    if same_file(input, &candidate) {
        tracing::warn!(
            "Default output {} is the input file, writing {}{}.wiki.txt instead",
            candidate.display(),
            stem,
            suffix
        );
        return PathBuf::from(format!("{}{}.wiki.txt", stem, suffix));
    }
    candidate
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &Path {
        &self.input
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, self.language))
    }

    fn language(&self) -> Language {
        self.language
    }

    fn types_file(&self) -> &Path {
        &self.settings.translations.types_file
    }

    fn subtypes_file(&self) -> &Path {
        &self.settings.translations.subtypes_file
    }

    fn categories(&self) -> &[CategoryConfig] {
        &self.settings.categories.0
    }

    fn exclusions(&self) -> &[String] {
        &self.settings.filter.exclude
    }

    fn template_path(&self) -> Option<&Path> {
        match self.language {
            Language::English => self.settings.render.template.as_deref(),
            Language::French => self.settings.render.template_fr.as_deref(),
        }
    }

    fn sort_order(&self) -> SortOrder {
        self.settings.render.sort
    }

    fn page_title(&self) -> &str {
        match self.language {
            Language::English => &self.settings.page.title,
            Language::French => &self.settings.page.title_fr,
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        self.settings.validate()
    }
}
