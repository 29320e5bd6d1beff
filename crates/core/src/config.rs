use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

// ── Top-level config ──────────────────────────────────────────

/// Deployment-scope configuration: who we are naming resources for and
/// which AWS context the generated ARNs refer to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    pub naming: NamingConfig,
    pub aws: AwsContext,
}

impl DeployConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CRONBIND_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CRONBIND_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            naming: NamingConfig::from_env_profiled(p),
            aws: AwsContext::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() {
            "default"
        } else {
            &self.profile
        }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  naming: prefix={}, client={}, environment={}",
            self.naming.prefix,
            self.naming.client,
            self.naming.environment
        );
        tracing::info!(
            "  aws:    partition={}, region={}, account={}",
            self.aws.partition,
            self.aws.region,
            if self.aws.is_configured() {
                self.aws.account_id.as_str()
            } else {
                "(placeholder)"
            }
        );
    }

    /// Return a summary view for machine-readable output.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "naming": {
                "prefix": self.naming.prefix,
                "client": self.naming.client,
                "environment": self.naming.environment,
            },
            "aws": {
                "partition": self.aws.partition,
                "region": self.aws.region,
                "account_id": self.aws.account_id,
                "configured": self.aws.is_configured(),
            },
        })
    }
}

// ── Naming ────────────────────────────────────────────────────

/// Rule-name scheme inputs: `{prefix}-{client}-{environment}-{purpose}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    pub prefix: String,
    pub client: String,
    pub environment: String,
}

impl NamingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            prefix: profiled_env_or(p, "NAMING_PREFIX", "crb"),
            client: profiled_env_or(p, "NAMING_CLIENT", "acme"),
            environment: profiled_env_or(p, "NAMING_ENVIRONMENT", "dev"),
        }
    }
}

// ── AWS context ───────────────────────────────────────────────

/// AWS coordinates used to construct rule ARNs. Supplied externally; the
/// planner never talks to AWS itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsContext {
    pub partition: String,
    pub region: String,
    pub account_id: String,
}

impl AwsContext {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            partition: profiled_env_or(p, "AWS_PARTITION", "aws"),
            region: profiled_env_or(p, "AWS_REGION", "sa-east-1"),
            account_id: profiled_env_or(p, "AWS_ACCOUNT_ID", "000000000000"),
        }
    }

    /// Whether a real account id was provided (the default is a placeholder
    /// that yields syntactically valid but non-resolvable ARNs).
    pub fn is_configured(&self) -> bool {
        self.account_id != "000000000000"
    }
}
