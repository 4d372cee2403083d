use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::capabilities::Context;
use crate::error::ConfigError;
use crate::notice::DEFAULT_NOTICE_TTL_SECS;
use crate::seed::DEFAULT_USER_NAME;

const APP_DIR: &str = "wellness_companion";
const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_LOG_FILTER: &str = "wellness_companion=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub user_name: String,
	/// Fixes the mock data between runs when set.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub seed: Option<u64>,
	pub log_filter: String,
	pub notice_ttl_secs: i64,
	pub backend: BackendConfig,
}

/// Hosted-backend settings. Parsed and shown, never connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
	pub project_id: String,
	pub api_key: String,
	pub auth_domain: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			user_name: DEFAULT_USER_NAME.to_string(),
			seed: None,
			log_filter: DEFAULT_LOG_FILTER.to_string(),
			notice_ttl_secs: DEFAULT_NOTICE_TTL_SECS,
			backend: BackendConfig::default(),
		}
	}
}

impl Default for BackendConfig {
	fn default() -> Self {
		Self {
			project_id: "wellness-demo".to_string(),
			api_key: "demo-api-key".to_string(),
			auth_domain: "wellness-demo.example.com".to_string(),
		}
	}
}

impl Config {
	pub fn context(&self) -> Context {
		Context::system()
			.with_user_name(self.user_name.clone())
			.with_notice_ttl(self.notice_ttl())
	}

	/// Out-of-range values fall back to the default TTL.
	pub fn notice_ttl(&self) -> chrono::Duration {
		chrono::Duration::try_seconds(self.notice_ttl_secs.max(0))
			.unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_NOTICE_TTL_SECS))
	}
}

pub fn resolve_config_path(cli_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
	if let Some(path) = cli_path {
		return Ok(absolutize(path));
	}

	if let Some(path) = env::var_os("WELLNESS_CONFIG") {
		let path = PathBuf::from(path);
		if !path.as_os_str().is_empty() {
			return Ok(absolutize(path));
		}
	}

	config_dir()
		.map(|dir| dir.join(CONFIG_FILE))
		.ok_or(ConfigError::NoConfigPath)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
	let raw = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			tracing::debug!(path = %path.display(), "no config file, using defaults");
			return Ok(Config::default());
		}
		Err(err) => return Err(ConfigError::Io(err)),
	};

	if raw.trim().is_empty() {
		return Ok(Config::default());
	}

	toml::from_str(&raw).map_err(ConfigError::TomlDecode)
}

pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent).map_err(ConfigError::Io)?;
		}
	}

	let raw = toml::to_string_pretty(config).map_err(ConfigError::TomlEncode)?;
	fs::write(path, raw).map_err(ConfigError::Io)
}

fn config_dir() -> Option<PathBuf> {
	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("APPDATA") {
			return Some(PathBuf::from(path).join(APP_DIR));
		}
	}

	if let Some(path) = env::var_os("XDG_CONFIG_HOME") {
		return Some(PathBuf::from(path).join(APP_DIR));
	}

	env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join(APP_DIR))
}

fn absolutize(path: PathBuf) -> PathBuf {
	let path = if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	};

	if path.exists() {
		fs::canonicalize(&path).unwrap_or(path)
	} else {
		path
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::PathBuf;

	use super::{Config, load_config, resolve_config_path, save_config};

	#[test]
	fn missing_file_yields_defaults() {
		let path = temp_file("wellness_missing_config.toml");
		let _ = fs::remove_file(&path);
		assert_eq!(load_config(&path).expect("defaults"), Config::default());
	}

	#[test]
	fn round_trips_through_toml() {
		let config = Config {
			user_name: "Robin Park".to_string(),
			seed: Some(99),
			notice_ttl_secs: 5,
			..Config::default()
		};

		let path = temp_file("wellness_roundtrip_config.toml");
		save_config(&path, &config).expect("save should succeed");
		let loaded = load_config(&path).expect("load should succeed");
		assert_eq!(loaded, config);
		let _ = fs::remove_file(path);
	}

	#[test]
	fn partial_files_fill_in_defaults() {
		let path = temp_file("wellness_partial_config.toml");
		fs::write(&path, "user_name = \"Kai\"\n[backend]\nproject_id = \"local\"\n").expect("write config");
		let loaded = load_config(&path).expect("load should succeed");
		assert_eq!(loaded.user_name, "Kai");
		assert_eq!(loaded.seed, None);
		assert_eq!(loaded.notice_ttl_secs, 3);
		assert_eq!(loaded.backend.project_id, "local");
		assert_eq!(loaded.backend.api_key, "demo-api-key");
		let _ = fs::remove_file(path);
	}

	#[test]
	fn malformed_files_are_reported() {
		let path = temp_file("wellness_bad_config.toml");
		fs::write(&path, "user_name = [").expect("write config");
		assert!(load_config(&path).is_err());
		let _ = fs::remove_file(path);
	}

	#[test]
	fn explicit_path_wins() {
		let path = temp_file("wellness_explicit.toml");
		assert_eq!(resolve_config_path(Some(path.clone())).expect("resolved"), path);
	}

	#[test]
	fn context_carries_user_settings() {
		let config = Config {
			user_name: "Robin Park".to_string(),
			notice_ttl_secs: 7,
			..Config::default()
		};
		let context = config.context();
		assert_eq!(context.user_name, "Robin Park");
		assert_eq!(context.notice_ttl, chrono::Duration::seconds(7));
	}

	#[test]
	fn oversized_notice_ttl_falls_back_to_default() {
		let config = Config {
			notice_ttl_secs: i64::MAX,
			..Config::default()
		};
		assert_eq!(config.notice_ttl(), chrono::Duration::seconds(3));
		assert_eq!(config.context().notice_ttl, chrono::Duration::seconds(3));

		let negative = Config {
			notice_ttl_secs: -5,
			..Config::default()
		};
		assert_eq!(negative.notice_ttl(), chrono::Duration::zero());
	}

	fn temp_file(name: &str) -> PathBuf {
		let mut path = std::env::temp_dir();
		path.push(format!("{}_{}", name, std::process::id()));
		path
	}
}
