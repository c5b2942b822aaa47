use mpic_types::Perspective;
use serde::{Deserialize, Serialize};

fn default_http_client_timeout_secs() -> u64 {
    30
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// The coordinator's process-lifetime configuration (§6, §10.3). Loaded once
/// at startup from a TOML document; every field has a sane default except
/// `target_perspectives` and `hash_secret`, which a deployment must supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    pub target_perspectives: Vec<Perspective>,
    pub default_perspective_count: u32,
    #[serde(default)]
    pub global_max_attempts: Option<u32>,
    pub hash_secret: String,

    #[serde(default = "default_http_client_timeout_secs")]
    pub http_client_timeout_secs: u64,
    #[serde(default)]
    pub dns_nameservers: Vec<String>,
    #[serde(default)]
    pub dns_query_timeout_secs: Option<u64>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl CoordinatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn defaults_apply_when_optional_fields_are_absent() {
        let toml = r#"
            default_perspective_count = 3
            hash_secret = "s3cr3t"

            [[target_perspectives]]
            code = "us-east-1"
            rir = "arin"

            [[target_perspectives]]
            code = "eu-west-1"
            rir = "ripe"
        "#;
        let config = CoordinatorConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.http_client_timeout_secs, 30);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.target_perspectives.len(), 2);
        assert!(config.global_max_attempts.is_none());
    }
}
