use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "HELIO_DATA_DIR";

/// Optional settings file inside the data directory
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Text-to-speech program; the utterance is written to its stdin
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            args: vec!["-v".to_string(), "pt-br".to_string(), "--stdin".to_string()],
        }
    }
}

/// Settings read from `config.json`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    speech: Option<SpeechConfig>,
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub speech: SpeechConfig,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            speech: SpeechConfig::default(),
        }
    }

    /// Resolve the data directory (explicit > env > platform default) and
    /// apply `config.json` from it when present.
    pub fn load(explicit_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = explicit_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let mut config = Self::new(data_dir);
        config.apply_file()?;
        Ok(config)
    }

    fn apply_file(&mut self) -> Result<()> {
        let path = self.data_dir.join(CONFIG_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        if let Some(speech) = file.speech {
            self.speech = speech;
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("helio"))
        .unwrap_or_else(|| PathBuf::from("helio_data"))
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}
