use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration file at ~/.config/vxa/config.toml. Every field is optional;
/// environment variables fill the gaps at resolution time.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub v2ex: V2exConfigEntry,

    #[serde(default)]
    pub openai: OpenAIConfigEntry,

    #[serde(default)]
    pub output: OutputConfigEntry,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct V2exConfigEntry {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OpenAIConfigEntry {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfigEntry {
    /// Directory for analysis markdown files
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Env-only operation is fine; the file is optional.
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("vxa").join("config.toml"))
    }
}
