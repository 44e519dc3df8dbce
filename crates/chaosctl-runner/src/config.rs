use chaosctl_core::{Diagnostic, FieldPath};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".chaosctl.yaml";

/// Accounts and users known to the CLI, plus which pair is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChaosctlConfig {
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub current_account: String,
    #[serde(default)]
    pub current_user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub endpoint: String,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,
    pub token: String,
    /// Unix seconds after which the token is no longer accepted.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    pub username: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("config validation failed:\n{}", Diagnostic::render_list(.0))]
    Validation(Vec<Diagnostic>),
    #[error("cannot locate home directory for the default config; pass `--config <file>`")]
    NoHomeDirectory,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("current account `{0}` is not configured")]
    UnknownAccount(String),
    #[error("current user `{username}` is not configured for `{endpoint}`")]
    UnknownUser { endpoint: String, username: String },
    #[error("token for `{username}` expired at {expired_at}; log in again")]
    Expired { username: String, expired_at: u64 },
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or(ConfigError::NoHomeDirectory)
}

pub fn load_config(path: &Path) -> Result<ChaosctlConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(ConfigError::Parse)?;
    let config: ChaosctlConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| ConfigError::Parse(format!("json decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| ConfigError::Parse(format!("yaml decode error: {error}")))?,
    };

    let mut issues = validate_config(&config);
    Diagnostic::sort_stable(&mut issues);
    if !issues.is_empty() {
        return Err(ConfigError::Validation(issues));
    }
    Ok(config)
}

pub fn validate_config(config: &ChaosctlConfig) -> Vec<Diagnostic> {
    let mut issues = Vec::new();

    for (account_index, account) in config.accounts.iter().enumerate() {
        let account_path = FieldPath::root().key("accounts").index(account_index);
        if !is_supported_endpoint(account.endpoint.as_str()) {
            issues.push(Diagnostic::error(
                "config.account.endpoint",
                account_path.clone().key("endpoint"),
                format!("endpoint `{}` must be http(s)", account.endpoint),
            ));
        }
        for (user_index, user) in account.users.iter().enumerate() {
            if user.token.trim().is_empty() {
                issues.push(Diagnostic::error(
                    "config.user.token.empty",
                    account_path
                        .clone()
                        .key("users")
                        .index(user_index)
                        .key("token"),
                    format!("token for `{}` is empty", user.username),
                ));
            }
        }
    }

    if config.current_account.trim().is_empty() {
        issues.push(Diagnostic::error(
            "config.current_account.required",
            FieldPath::root().key("current-account"),
            "no current account selected",
        ));
    } else if find_account(config).is_none() {
        issues.push(Diagnostic::error(
            "config.current_account.unknown",
            FieldPath::root().key("current-account"),
            format!("current account `{}` is not listed", config.current_account),
        ));
    }

    if config.current_user.trim().is_empty() {
        issues.push(Diagnostic::error(
            "config.current_user.required",
            FieldPath::root().key("current-user"),
            "no current user selected",
        ));
    } else if let Some(account) = find_account(config) {
        if find_user(account, config.current_user.as_str()).is_none() {
            issues.push(Diagnostic::error(
                "config.current_user.unknown",
                FieldPath::root().key("current-user"),
                format!(
                    "current user `{}` has no entry under `{}`",
                    config.current_user, account.endpoint
                ),
            ));
        }
    }

    issues
}

/// Picks the active account and user. Tokens past `expires_in` are refused.
pub fn resolve_credentials(
    config: &ChaosctlConfig,
    now_unix: u64,
) -> Result<Credentials, CredentialsError> {
    let account = find_account(config)
        .ok_or_else(|| CredentialsError::UnknownAccount(config.current_account.clone()))?;
    let user = find_user(account, config.current_user.as_str()).ok_or_else(|| {
        CredentialsError::UnknownUser {
            endpoint: account.endpoint.clone(),
            username: config.current_user.clone(),
        }
    })?;
    if let Some(expires_at) = user.expires_in {
        if expires_at <= now_unix {
            return Err(CredentialsError::Expired {
                username: user.username.clone(),
                expired_at: expires_at,
            });
        }
    }
    Ok(Credentials {
        endpoint: account.endpoint.clone(),
        username: user.username.clone(),
        token: user.token.clone(),
    })
}

fn find_account(config: &ChaosctlConfig) -> Option<&AccountConfig> {
    config
        .accounts
        .iter()
        .find(|account| account.endpoint == config.current_account)
}

fn find_user<'a>(account: &'a AccountConfig, username: &str) -> Option<&'a UserConfig> {
    account.users.iter().find(|user| user.username == username)
}

fn is_supported_endpoint(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err("unterminated env placeholder `${...`".to_string());
        };
        let key = &after[..end];
        if key.is_empty() {
            return Err("empty env placeholder `${}`".to_string());
        }
        let value =
            std::env::var(key).map_err(|_| format!("missing env var for placeholder `${{{key}}}`"))?;
        out.push_str(value.as_str());
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
