//! # Derivator configuration
//!
//! Settings of the demo driver read from a TOML document. Every key is optional:
//!
//! ```toml
//! input = "expr.txt"        # file with the expression
//! derivatives = 3           # how many derivatives go into the report
//! taylor_order = 7          # order of the Taylor expansion
//! variable = "x"            # differentiation variable, the first variable if absent
//! point = 0.0               # expansion point x0
//! report = "report.tex"     # LaTeX output
//! plots = false             # render PNG plots with gnuplot
//! plot_points = 1000        # samples per plotted curve
//! log_level = "info"        # off, error, warn, info, debug, trace
//! log_file = "derivator.log"
//! ```
//!
//! Unknown keys and values of the wrong type are errors.
use crate::Utils::logger::parse_level;
use itertools::Itertools;
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use toml::{Table, Value};

const KNOWN_KEYS: [&str; 10] = [
    "input",
    "derivatives",
    "taylor_order",
    "variable",
    "point",
    "report",
    "plots",
    "plot_points",
    "log_level",
    "log_file",
];

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Syntax(String),
    UnknownKeys(Vec<String>),
    WrongType { key: String, expected: &'static str },
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "cannot read configuration: {}", msg),
            ConfigError::Syntax(msg) => write!(f, "configuration is not valid TOML: {}", msg),
            ConfigError::UnknownKeys(keys) => {
                write!(f, "unknown configuration keys: {}", keys.iter().join(", "))
            }
            ConfigError::WrongType { key, expected } => {
                write!(f, "configuration key '{}' must be {}", key, expected)
            }
            ConfigError::InvalidValue { key, message } => {
                write!(f, "configuration key '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivatorConfig {
    pub input: PathBuf,
    pub derivatives: usize,
    pub taylor_order: usize,
    pub variable: Option<String>,
    pub point: f64,
    pub report: PathBuf,
    pub plots: bool,
    pub plot_points: usize,
    pub log_level: LevelFilter,
    pub log_file: Option<String>,
}

impl Default for DerivatorConfig {
    fn default() -> Self {
        DerivatorConfig {
            input: PathBuf::from("expr.txt"),
            derivatives: 3,
            taylor_order: 7,
            variable: None,
            point: 0.0,
            report: PathBuf::from("report.tex"),
            plots: false,
            plot_points: 1000,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl DerivatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        text.parse()
    }
}

impl FromStr for DerivatorConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, ConfigError> {
        let table: Table = text
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Syntax(e.to_string()))?;

        let unknown: Vec<String> = table
            .keys()
            .filter(|k| !KNOWN_KEYS.contains(&k.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ConfigError::UnknownKeys(unknown));
        }

        let mut config = DerivatorConfig::default();
        if let Some(v) = get_str(&table, "input")? {
            config.input = PathBuf::from(v);
        }
        if let Some(v) = get_count(&table, "derivatives")? {
            config.derivatives = v;
        }
        if let Some(v) = get_count(&table, "taylor_order")? {
            config.taylor_order = v;
        }
        config.variable = get_str(&table, "variable")?;
        if let Some(v) = get_float(&table, "point")? {
            config.point = v;
        }
        if let Some(v) = get_str(&table, "report")? {
            config.report = PathBuf::from(v);
        }
        if let Some(v) = table.get("plots") {
            config.plots = v.as_bool().ok_or_else(|| wrong_type("plots", "a boolean"))?;
        }
        if let Some(v) = get_count(&table, "plot_points")? {
            if v < 2 {
                return Err(ConfigError::InvalidValue {
                    key: "plot_points".to_string(),
                    message: "at least 2 points are needed".to_string(),
                });
            }
            config.plot_points = v;
        }
        if let Some(v) = get_str(&table, "log_level")? {
            config.log_level = parse_level(&v).ok_or_else(|| ConfigError::InvalidValue {
                key: "log_level".to_string(),
                message: format!("unknown level '{}'", v),
            })?;
        }
        config.log_file = get_str(&table, "log_file")?;
        Ok(config)
    }
}

fn wrong_type(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::WrongType {
        key: key.to_string(),
        expected,
    }
}

fn get_str(table: &Table, key: &str) -> Result<Option<String>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(key, "a string")),
    }
}

fn get_count(table: &Table, key: &str) -> Result<Option<usize>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Integer(i)) if *i >= 0 => Ok(Some(*i as usize)),
        Some(_) => Err(wrong_type(key, "a non-negative integer")),
    }
}

/// integers are accepted where a float is expected
fn get_float(table: &Table, key: &str) -> Result<Option<f64>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Float(x)) => Ok(Some(*x)),
        Some(Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(_) => Err(wrong_type(key, "a number")),
    }
}
