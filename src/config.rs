//! Configuration file (.perfr.conf) parsing and handling
//!
//! The .perfr.conf file uses INI format with a [DEFAULT] section supplying
//! defaults for options that can also be given on the command line. The file
//! is optional; command-line flags always win.

use crate::error::{Error, Result};
use crate::parser::CapturePolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".perfr.conf";

/// One INI section as written in the file, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSection {
    out_dir: Option<String>,
    capture: Option<String>,
    count: Option<String>,
}

/// Configuration loaded from .perfr.conf
#[derive(Debug, Clone, Default)]
pub struct PerfConfig {
    /// Directory that report, diff, arrange and capture files are written to
    pub out_dir: Option<String>,

    /// Default capture policy (none / ok / failed / both)
    pub capture: Option<CapturePolicy>,

    /// Number of entries in the ranked listing
    pub count: Option<usize>,
}

impl PerfConfig {
    /// Load configuration from a .perfr.conf file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", CONFIG_FILE_NAME, e)))?;

        Self::parse(&contents)
    }

    /// Load configuration from `dir` if a config file exists there.
    pub fn load_optional(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(PerfConfig::default())
        }
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, RawSection> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

        let default = ini.get("DEFAULT").ok_or_else(|| {
            Error::Config(format!("No [DEFAULT] section in {}", CONFIG_FILE_NAME))
        })?;

        let capture = match default.capture.as_deref() {
            None => None,
            Some("none") => Some(CapturePolicy::None),
            Some("ok") => Some(CapturePolicy::OkOnly),
            Some("failed") => Some(CapturePolicy::FailedOnly),
            Some("both") => Some(CapturePolicy::Both),
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid capture policy '{}' (expected none, ok, failed or both)",
                    other
                )))
            }
        };

        let count = match default.count.as_deref() {
            None => None,
            Some(value) => Some(value.parse().map_err(|_| {
                Error::Config(format!("Invalid count '{}' (expected an integer)", value))
            })?),
        };

        Ok(PerfConfig {
            out_dir: default.out_dir.clone(),
            capture,
            count,
        })
    }
}
