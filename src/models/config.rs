use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Path prefix of the tape library
pub const TAPE_PREFIX: &str = "/mss/";
/// Disk cache that mirrors the tape library
pub const CACHE_PREFIX: &str = "/cache/";

const DEFAULT_RUN_DIGITS: usize = 6;
const DEFAULT_FILE_DIGITS: usize = 3;
const DEFAULT_FILE_NO_MIN: i64 = 0;
const DEFAULT_FILE_NO_MAX: i64 = 999;

/// Description of a family of Swif jobs, loaded from a JSON/YAML/TOML document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFamilyConfig {
    /// Collapse all files of one run/directory into a single job
    #[serde(default, alias = "jobPerDir")]
    pub job_per_run: bool,
    /// Input directory template, may contain `[runNo]` or `[dirNo]`
    #[serde(default)]
    pub input_dir: String,
    #[serde(default)]
    pub input_file_prefix: String,
    #[serde(default)]
    pub input_file_suffix: String,
    /// Path to a newline-separated list of run/directory tokens to visit
    #[serde(default, alias = "dirNoList", skip_serializing_if = "Option::is_none")]
    pub run_no_list: Option<PathBuf>,
    #[serde(
        default = "default_run_digits",
        alias = "dirNoDigits",
        deserialize_with = "deserialize_run_digits"
    )]
    pub run_no_digits: usize,
    #[serde(default, alias = "dirNoMin")]
    pub run_no_min: i64,
    #[serde(default, alias = "dirNoMax")]
    pub run_no_max: i64,
    #[serde(
        default = "default_file_digits",
        deserialize_with = "deserialize_file_digits"
    )]
    pub file_no_digits: usize,
    #[serde(default = "default_file_no_min")]
    pub file_no_min: i64,
    #[serde(default = "default_file_no_max")]
    pub file_no_max: i64,

    #[serde(default)]
    pub workflow: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phase: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub track: String,
    /// Job name template
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub cores: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub disk: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub ram: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub time: String,
    #[serde(default)]
    pub os: String,
    /// Extra input templates, each `<name> <scheme>:<path>`
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output templates, each `<name> <scheme>:<path>`
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub shell: String,
    /// Command template as written in the document
    #[serde(default)]
    pub command: String,

    /// Shell plus resolved command, filled in by `finalize`
    #[serde(skip)]
    pub full_command: String,
    /// Tokens read from `run_no_list`, filled in by the loader
    #[serde(skip)]
    pub allow_list: Option<Vec<String>>,
}

fn default_run_digits() -> usize {
    DEFAULT_RUN_DIGITS
}

fn default_file_digits() -> usize {
    DEFAULT_FILE_DIGITS
}

fn default_file_no_min() -> i64 {
    DEFAULT_FILE_NO_MIN
}

fn default_file_no_max() -> i64 {
    DEFAULT_FILE_NO_MAX
}

/// Scalars that older configs write either quoted or bare
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Text(s) => s,
    })
}

fn digits_or<'de, D>(deserializer: D, default: usize) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Scalar::deserialize(deserializer)? {
        Scalar::Integer(n) if n > 0 => Ok(n as usize),
        Scalar::Integer(_) => Ok(default),
        Scalar::Float(f) => Err(D::Error::custom(format!("invalid digit count: {}", f))),
        Scalar::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(default);
            }
            s.parse::<usize>()
                .map_err(|_| D::Error::custom(format!("invalid digit count: {:?}", s)))
        }
    }
}

fn deserialize_run_digits<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    digits_or(deserializer, DEFAULT_RUN_DIGITS)
}

fn deserialize_file_digits<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    digits_or(deserializer, DEFAULT_FILE_DIGITS)
}

/// Supported document formats, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl JobFamilyConfig {
    /// Load, parse and finalize a config document
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        let mut config = Self::parse(&contents, ConfigFormat::from_path(path))
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;
        let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
        config.finalize(config_dir);
        Ok(config)
    }

    /// Parse a document without finalizing it
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, String> {
        match format {
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        }
    }

    /// Backfill defaults and compute the full command line.
    /// Must be called exactly once, `config_dir` is the directory holding the document.
    pub fn finalize(&mut self, config_dir: &Path) {
        if self.file_no_min < 0 {
            self.file_no_min = DEFAULT_FILE_NO_MIN;
        }
        if self.file_no_max < 0 {
            self.file_no_max = DEFAULT_FILE_NO_MAX;
        }

        if self.shell.ends_with("/tcsh") || self.shell.ends_with("/csh") {
            self.shell.push_str(" -f");
        }

        let command = if self.command.starts_with("script.") {
            config_dir.join(&self.command).display().to_string()
        } else {
            self.command.clone()
        };

        self.full_command = if self.shell.is_empty() {
            command
        } else {
            format!("{} {}", self.shell, command)
        };
    }

    /// Check that the fields every `add-job` call needs are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workflow.is_empty() {
            return Err(ConfigError::MissingField("workflow"));
        }
        if self.project.is_empty() {
            return Err(ConfigError::MissingField("project"));
        }
        if self.track.is_empty() {
            return Err(ConfigError::MissingField("track"));
        }
        if self.command.is_empty() {
            return Err(ConfigError::MissingField("command"));
        }
        Ok(())
    }

    /// Whether inputs live in the tape library
    pub fn is_tape(&self) -> bool {
        self.input_dir.starts_with(TAPE_PREFIX)
    }

    /// Zero-padded run/directory token
    pub fn run_token(&self, run_no: i64) -> String {
        format!("{:0width$}", run_no, width = self.run_no_digits)
    }

    /// Zero-padded file token
    pub fn file_token(&self, file_no: i64) -> String {
        format!("{:0width$}", file_no, width = self.file_no_digits)
    }

    /// Whether the file at this position among matches is inside the window
    pub fn file_in_window(&self, position: i64) -> bool {
        position >= self.file_no_min && position <= self.file_no_max
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
