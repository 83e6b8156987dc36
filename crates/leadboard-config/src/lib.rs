use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use leadboard_core::pipeline::DEFAULT_PAGE_SIZE;
use leadboard_core::{AliasTable, Field, IdRule, ViewerContext, WorkloadPolicy};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadboard";
const CONFIG_FILENAME: &str = "config.toml";

pub const MAX_PAGE_SIZE: usize = 500;
pub const DEFAULT_LEADS_ENDPOINT: &str = "/api/leads";
pub const DEFAULT_REQUIREMENTS_ENDPOINT: &str = "/api/requirements";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub page_size: usize,
    pub id_rule: IdRule,
    pub session: SessionConfig,
    pub workload: WorkloadConfig,
    pub sources: SourcesConfig,
    pub aliases: AliasTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub role: Role,
    pub agent_id: Option<String>,
}

impl SessionConfig {
    pub fn viewer_context(&self) -> ViewerContext {
        match (self.role, self.agent_id.as_deref()) {
            (Role::Agent, Some(agent)) => ViewerContext::Agent(agent.to_string()),
            _ => ViewerContext::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkloadConfig {
    pub policy: WorkloadPolicy,
    pub agents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesConfig {
    pub leads_path: Option<PathBuf>,
    pub requirements_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub leads_endpoint: String,
    pub requirements_endpoint: String,
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            leads_path: None,
            requirements_path: None,
            base_url: None,
            token: None,
            leads_endpoint: DEFAULT_LEADS_ENDPOINT.to_string(),
            requirements_endpoint: DEFAULT_REQUIREMENTS_ENDPOINT.to_string(),
            timeout_secs: 15,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            id_rule: IdRule::default(),
            session: SessionConfig::default(),
            workload: WorkloadConfig::default(),
            sources: SourcesConfig::default(),
            aliases: AliasTable::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid page_size value: {0}")]
    InvalidPageSize(usize),
    #[error("invalid dedupe_by value: {0} (expected id or phone)")]
    InvalidDedupeRule(String),
    #[error("session.agent_id is required when role = \"agent\"")]
    MissingAgentId,
    #[error("invalid workload setting: {0}")]
    InvalidWorkload(String),
    #[error("invalid workload agent name")]
    InvalidAgentName,
    #[error("invalid aliases.{field}: {reason}")]
    InvalidAlias { field: String, reason: String },
    #[error("invalid sources.{field}: {reason}")]
    InvalidSourceField { field: &'static str, reason: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    page_size: Option<usize>,
    dedupe_by: Option<String>,
    session: Option<SessionFile>,
    workload: Option<WorkloadFile>,
    sources: Option<SourcesFile>,
    aliases: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionFile {
    role: Option<Role>,
    agent_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkloadFile {
    overload_factor: Option<f64>,
    overload_min_clients: Option<usize>,
    underload_factor: Option<f64>,
    ideal_clients_per_agent: Option<usize>,
    agents: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourcesFile {
    #[serde(rename = "leads")]
    leads_path: Option<PathBuf>,
    #[serde(rename = "requirements")]
    requirements_path: Option<PathBuf>,
    base_url: Option<String>,
    token: Option<String>,
    leads_endpoint: Option<String>,
    requirements_endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(page_size) = parsed.page_size {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        config.page_size = page_size;
    }

    if let Some(rule) = parsed.dedupe_by {
        config.id_rule = match rule.trim().to_ascii_lowercase().as_str() {
            "id" => IdRule::ExplicitThenPhone,
            "phone" => IdRule::PhoneOnly,
            _ => return Err(ConfigError::InvalidDedupeRule(rule)),
        };
    }

    if let Some(session) = parsed.session {
        config.session = merge_session(session)?;
    }

    if let Some(workload) = parsed.workload {
        config.workload = merge_workload(workload)?;
    }

    if let Some(sources) = parsed.sources {
        config.sources = merge_sources(sources)?;
    }

    if let Some(aliases) = parsed.aliases {
        config.aliases = merge_aliases(aliases)?;
    }

    Ok(config)
}

fn merge_session(session: SessionFile) -> Result<SessionConfig> {
    let role = session.role.unwrap_or_default();
    let agent_id = normalize_optional(session.agent_id);
    if role == Role::Agent && agent_id.is_none() {
        return Err(ConfigError::MissingAgentId);
    }
    Ok(SessionConfig { role, agent_id })
}

fn merge_workload(workload: WorkloadFile) -> Result<WorkloadConfig> {
    let mut policy = WorkloadPolicy::default();
    if let Some(value) = workload.overload_factor {
        policy.overload_factor = value;
    }
    if let Some(value) = workload.overload_min_clients {
        policy.overload_min_clients = value;
    }
    if let Some(value) = workload.underload_factor {
        policy.underload_factor = value;
    }
    if let Some(value) = workload.ideal_clients_per_agent {
        policy.ideal_clients_per_agent = value;
    }
    policy
        .validate()
        .map_err(|err| ConfigError::InvalidWorkload(err.to_string()))?;

    let mut agents: Vec<String> = Vec::new();
    for raw in workload.agents.unwrap_or_default() {
        let agent = raw.trim();
        if agent.is_empty() {
            return Err(ConfigError::InvalidAgentName);
        }
        if !agents.iter().any(|existing| existing == agent) {
            agents.push(agent.to_string());
        }
    }

    Ok(WorkloadConfig { policy, agents })
}

fn merge_sources(sources: SourcesFile) -> Result<SourcesConfig> {
    let mut config = SourcesConfig {
        leads_path: sources.leads_path,
        requirements_path: sources.requirements_path,
        base_url: normalize_optional(sources.base_url),
        token: normalize_optional(sources.token),
        ..SourcesConfig::default()
    };

    if let Some(base_url) = config.base_url.as_deref() {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidSourceField {
                field: "base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
    }
    if let Some(endpoint) = sources.leads_endpoint {
        config.leads_endpoint = validate_endpoint("leads_endpoint", endpoint)?;
    }
    if let Some(endpoint) = sources.requirements_endpoint {
        config.requirements_endpoint = validate_endpoint("requirements_endpoint", endpoint)?;
    }
    if let Some(timeout) = sources.timeout_secs {
        if timeout == 0 {
            return Err(ConfigError::InvalidSourceField {
                field: "timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        config.timeout_secs = timeout;
    }

    Ok(config)
}

fn validate_endpoint(field: &'static str, endpoint: String) -> Result<String> {
    let trimmed = endpoint.trim();
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidSourceField {
            field,
            reason: "must start with /".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn merge_aliases(aliases: BTreeMap<String, Vec<String>>) -> Result<AliasTable> {
    let mut table = AliasTable::default();
    for (name, keys) in aliases {
        let field: Field = name.parse().map_err(|_| ConfigError::InvalidAlias {
            field: name.clone(),
            reason: "unknown field".to_string(),
        })?;
        table = table
            .with_override(field, keys)
            .map_err(|err| ConfigError::InvalidAlias {
                field: name.clone(),
                reason: err.to_string(),
            })?;
    }
    Ok(table)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, ConfigError, ConfigFile, Role, SessionFile, WorkloadFile,
    };
    use leadboard_core::{Field, IdRule, ViewerContext};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            page_size: Some(24),
            dedupe_by: Some("phone".to_string()),
            session: Some(SessionFile {
                role: Some(Role::Agent),
                agent_id: Some(" asha ".to_string()),
            }),
            workload: Some(WorkloadFile {
                overload_factor: Some(2.0),
                agents: Some(vec!["asha".to_string(), "ravi".to_string(), "asha".to_string()]),
                ..WorkloadFile::default()
            }),
            ..ConfigFile::default()
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.page_size, 24);
        assert_eq!(merged.id_rule, IdRule::PhoneOnly);
        assert_eq!(
            merged.session.viewer_context(),
            ViewerContext::Agent("asha".to_string())
        );
        assert_eq!(merged.workload.policy.overload_factor, 2.0);
        assert_eq!(merged.workload.policy.ideal_clients_per_agent, 3);
        assert_eq!(merged.workload.agents, vec!["asha", "ravi"]);
    }

    #[test]
    fn agent_role_requires_agent_id() {
        let parsed = ConfigFile {
            session: Some(SessionFile {
                role: Some(Role::Agent),
                agent_id: None,
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(merge_config(parsed), Err(ConfigError::MissingAgentId)));
    }

    #[test]
    fn rejects_zero_page_size() {
        let parsed = ConfigFile {
            page_size: Some(0),
            ..ConfigFile::default()
        };
        assert!(matches!(merge_config(parsed), Err(ConfigError::InvalidPageSize(0))));
    }

    #[test]
    fn rejects_bad_workload_policy() {
        let parsed = ConfigFile {
            workload: Some(WorkloadFile {
                underload_factor: Some(1.5),
                ..WorkloadFile::default()
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(merge_config(parsed), Err(ConfigError::InvalidWorkload(_))));
    }

    #[test]
    fn alias_overrides_replace_rows() {
        let mut aliases = BTreeMap::new();
        aliases.insert("phone".to_string(), vec!["contactNo".to_string()]);
        let parsed = ConfigFile {
            aliases: Some(aliases),
            ..ConfigFile::default()
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.aliases.candidates(Field::Phone), ["contactNo".to_string()]);
    }

    #[test]
    fn alias_overrides_reject_unknown_fields() {
        let mut aliases = BTreeMap::new();
        aliases.insert("shoe_size".to_string(), vec!["size".to_string()]);
        let parsed = ConfigFile {
            aliases: Some(aliases),
            ..ConfigFile::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(err.to_string().contains("aliases.shoe_size"));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "page_size = 6\n\
             [sources]\n\
             base_url = \"https://crm.example.com\"\n\
             token = \"secret\"\n\
             leads_endpoint = \"/v2/leads\"\n\
             [aliases]\n\
             project_name = [\"Project\", \"projectName\"]\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.page_size, 6);
        assert_eq!(config.sources.base_url.as_deref(), Some("https://crm.example.com"));
        assert_eq!(config.sources.leads_endpoint, "/v2/leads");
        assert_eq!(config.sources.requirements_endpoint, "/api/requirements");
        assert_eq!(config.aliases.candidates(Field::ProjectName)[0], "Project");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_sise = 6\n").expect("write config");
        restrict_permissions(&path);
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_group_readable_file() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_size = 6\n").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
