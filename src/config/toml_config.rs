use crate::providers::glesys::DEFAULT_ENDPOINT as GLESYS_DEFAULT_ENDPOINT;
use crate::utils::error::{CloudError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: ProviderSection,
    pub http: Option<HttpConfig>,
    pub nova: Option<NovaConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    CloudStack,
    Nova,
    Glesys,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    pub api: ApiKind,
    pub endpoint: Option<String>,
    pub identity: Option<String>,
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub wire_log: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NovaConfig {
    /// zone id -> compute endpoint (`https://compute/v1.1/<tenant>`)
    pub zones: BTreeMap<String, String>,
}

impl ProviderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CloudError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GLESYS_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CloudError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn api(&self) -> ApiKind {
        self.provider.api
    }

    /// 取得 API 端點；GleSYS 可省略
    pub fn endpoint(&self) -> Result<String> {
        match (&self.provider.endpoint, self.provider.api) {
            (Some(endpoint), _) => Ok(endpoint.trim_end_matches('/').to_string()),
            (None, ApiKind::Glesys) => Ok(GLESYS_DEFAULT_ENDPOINT.to_string()),
            (None, _) => Err(CloudError::MissingConfigError {
                field: "provider.endpoint".to_string(),
            }),
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.provider.identity.as_deref()
    }

    pub fn credential(&self) -> Option<&str> {
        self.provider.credential.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        let seconds = self
            .http
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn user_agent(&self) -> String {
        self.http
            .as_ref()
            .and_then(|h| h.user_agent.clone())
            .unwrap_or_else(|| format!("cloud-apis/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn wire_log(&self) -> bool {
        self.http.as_ref().and_then(|h| h.wire_log).unwrap_or(false)
    }

    pub fn nova_zones(&self) -> BTreeMap<String, String> {
        self.nova
            .as_ref()
            .map(|n| n.zones.clone())
            .unwrap_or_default()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        match self.provider.api {
            ApiKind::CloudStack => {
                let endpoint =
                    validation::validate_required_field("provider.endpoint", &self.provider.endpoint)?;
                validation::validate_url("provider.endpoint", endpoint)?;
            }
            ApiKind::Nova => {
                let zones = self.nova_zones();
                if zones.is_empty() {
                    return Err(CloudError::MissingConfigError {
                        field: "nova.zones".to_string(),
                    });
                }
                for (zone, endpoint) in &zones {
                    validation::validate_url(&format!("nova.zones.{zone}"), endpoint)?;
                }
                let credential = validation::validate_required_field(
                    "provider.credential",
                    &self.provider.credential,
                )?;
                validation::validate_non_empty_string("provider.credential", credential)?;
            }
            ApiKind::Glesys => {
                validation::validate_url("provider.endpoint", &self.endpoint()?)?;
                for (field, value) in [
                    ("provider.identity", &self.provider.identity),
                    ("provider.credential", &self.provider.credential),
                ] {
                    let value = validation::validate_required_field(field, value)?;
                    validation::validate_non_empty_string(field, value)?;
                }
            }
        }

        if let Some(seconds) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validation::validate_range("http.timeout_seconds", seconds, 1, 3600)?;
        }

        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
