use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present
/// here override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// dashscope:
///   api_key: "sk-..."
///   endpoint: "https://dashscope.aliyuncs.com/api/v1/services/audio/tts/customization"
///
/// transport:
///   timeout_seconds: 120
///   connect_timeout_seconds: 60
///
/// polling:
///   interval_seconds: 5
///   max_attempts: 60
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub dashscope: Option<DashScopeYaml>,
    pub transport: Option<TransportYaml>,
    pub polling: Option<PollingYaml>,
}

/// DashScope credentials and endpoint from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DashScopeYaml {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
}

/// HTTP transport settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TransportYaml {
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

/// Status polling settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PollingYaml {
    pub interval_seconds: Option<u64>,
    pub max_attempts: Option<u32>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config {}: {}", path.display(), e))?;

        Ok(config)
    }
}
