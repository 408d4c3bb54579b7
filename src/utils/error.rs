use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrdError {
    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Translation file not found: {}", path.display())]
    MissingTranslationFile { path: PathBuf },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Cannot parse {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 可跳過的單筆記錄錯誤
    Low,
    /// 配置錯誤，修正後重跑
    Medium,
    /// 輸入或資料錯誤，本次執行中止
    High,
    /// 系統層級錯誤（寫入、IO）
    Critical,
}

impl DrdError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrdError::MissingFile { .. } | DrdError::MissingTranslationFile { .. } => {
                ErrorCategory::Input
            }
            DrdError::MalformedRecord { .. }
            | DrdError::MalformedInput { .. }
            | DrdError::Csv(_) => ErrorCategory::Data,
            DrdError::Config { .. }
            | DrdError::InvalidConfigValue { .. }
            | DrdError::Template(_) => ErrorCategory::Configuration,
            DrdError::Write { .. } => ErrorCategory::Output,
            DrdError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DrdError::MalformedRecord { .. } => ErrorSeverity::Low,
            DrdError::Config { .. }
            | DrdError::InvalidConfigValue { .. }
            | DrdError::Template(_) => ErrorSeverity::Medium,
            DrdError::MissingFile { .. }
            | DrdError::MissingTranslationFile { .. }
            | DrdError::MalformedInput { .. }
            | DrdError::Csv(_) => ErrorSeverity::High,
            DrdError::Write { .. } | DrdError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// 程序結束碼，0 保留給成功
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrdError::MissingFile { path } => {
                format!("The input file '{}' does not exist", path.display())
            }
            DrdError::MissingTranslationFile { path } => format!(
                "The translation file '{}' is required for the French page but was not found",
                path.display()
            ),
            DrdError::MalformedRecord { line, reason } => {
                format!("Record on line {} was skipped: {}", line, reason)
            }
            DrdError::MalformedInput { path, reason } => {
                format!("'{}' is not a usable entity export: {}", path.display(), reason)
            }
            DrdError::Write { path, source } => {
                format!("Could not write the page to '{}': {}", path.display(), source)
            }
            DrdError::Template(e) => format!("The page template could not be rendered: {}", e),
            DrdError::Csv(e) => format!("The CSV data could not be read: {}", e),
            DrdError::Io(e) => format!("A file operation failed: {}", e),
            DrdError::Config { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            DrdError::InvalidConfigValue {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrdError::MissingFile { .. } => {
                "Check the input path; it must point to the Airtable CSV export"
            }
            DrdError::MissingTranslationFile { .. } => {
                "Export the type and sub-type grids from Airtable into the working directory, or set [translations] in the config file"
            }
            DrdError::MalformedRecord { .. } => {
                "Fill in the name, type and sub-type of the entry in Airtable"
            }
            DrdError::MalformedInput { .. } | DrdError::Csv(_) => {
                "Re-export the table as CSV with its header row"
            }
            DrdError::Write { .. } => "Check that the output directory exists and is writable",
            DrdError::Template(_) => "Fix the template syntax or remove the template override",
            DrdError::Io(_) => "Check file permissions and free disk space",
            DrdError::Config { .. } | DrdError::InvalidConfigValue { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }
}

impl From<toml::de::Error> for DrdError {
    fn from(e: toml::de::Error) -> Self {
        DrdError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, DrdError>;
