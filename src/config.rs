use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{engines::ApiSettings, widget::SearchBoxSettings};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT: u64 = 10;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct Api {
    /// Storefront origin, `/api/products` is appended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Request timeout in seconds, 0 disables it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct Search {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_grace_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub search: Search,
}

impl Config {
    pub fn api_settings(&self) -> ApiSettings {
        let timeout = self.api.timeout.unwrap_or(DEFAULT_TIMEOUT);

        ApiSettings {
            base_url: self
                .api
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: self.api.token.clone(),
            timeout: (timeout > 0).then(|| Duration::from_secs(timeout)),
        }
    }

    pub fn search_box_settings(&self) -> SearchBoxSettings {
        let fallback = SearchBoxSettings::default();

        SearchBoxSettings {
            debounce: self
                .search
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(fallback.debounce),
            blur_grace: self
                .search
                .blur_grace_ms
                .map(Duration::from_millis)
                .unwrap_or(fallback.blur_grace),
            limit: self.search.limit.unwrap_or(fallback.limit),
        }
    }
}

fn defaults() -> serde_json::Value {
    let search = SearchBoxSettings::default();

    json!({
        "api": {
            "base_url": DEFAULT_BASE_URL,
            "timeout": DEFAULT_TIMEOUT,
        },
        "search": {
            "debounce_ms": search.debounce.as_millis() as u64,
            "blur_grace_ms": search.blur_grace.as_millis() as u64,
            "limit": search.limit,
        }
    })
}

/// Layers built-in defaults, the config file and `overrides` (from the CLI),
/// later layers winning. The default config file may be absent, an explicit
/// one may not.
pub(crate) fn load_config(config_path: Option<&str>, overrides: Config) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(defaults()));

    let path = PathBuf::from(config_path.unwrap_or(DEFAULT_CONFIG_PATH));

    if path.exists() {
        log::info!("Config file found: {}", path.display());
        figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file(&path)),
            Some("json") => figment.merge(Json::file(&path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(&path)),
            _ => bail!(
                "Cannot identify config file type of {}. Must be .toml, .json or .yaml",
                path.display()
            ),
        };
    } else if config_path.is_some() {
        bail!("Config file not found: {}", path.display());
    }

    let config: Config = figment
        .merge(Serialized::defaults(overrides))
        .extract()
        .context("Invalid configuration")?;

    log::debug!(
        "Loaded config: api {:?} (token {}), search {:?}",
        config.api.base_url,
        if config.api.token.is_some() { "set" } else { "unset" },
        config.search
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = load_config(None, Config::default()).unwrap();

            let api = config.api_settings();
            assert_eq!(api.base_url, "http://localhost:3000");
            assert_eq!(api.timeout, Some(Duration::from_secs(10)));
            assert!(api.token.is_none());

            let search = config.search_box_settings();
            assert_eq!(search.debounce, Duration::from_millis(350));
            assert_eq!(search.blur_grace, Duration::from_millis(200));
            assert_eq!(search.limit, 8);
            Ok(())
        });
    }

    #[test]
    fn test_layering_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "search.toml",
                r#"
                [api]
                base_url = "http://file.test"
                token = "from-file"

                [search]
                debounce_ms = 500
                limit = 4
                "#,
            )?;

            let overrides = Config {
                api: Api {
                    token: Some("from-cli".to_string()),
                    ..Default::default()
                },
                search: Search {
                    limit: Some(12),
                    ..Default::default()
                },
            };
            let config = load_config(Some("search.toml"), overrides).unwrap();

            assert_eq!(config.api.base_url.as_deref(), Some("http://file.test"));
            assert_eq!(config.api.token.as_deref(), Some("from-cli"));
            assert_eq!(config.search.debounce_ms, Some(500));
            assert_eq!(config.search.blur_grace_ms, Some(200));
            assert_eq!(config.search.limit, Some(12));
            Ok(())
        });
    }

    #[test]
    fn test_yaml_and_json_files() {
        Jail::expect_with(|jail| {
            jail.create_file("search.yml", "search:\n  blur_grace_ms: 50\n")?;
            jail.create_file("search.json", r#"{"api": {"timeout": 0}}"#)?;

            let yaml = load_config(Some("search.yml"), Config::default()).unwrap();
            assert_eq!(
                yaml.search_box_settings().blur_grace,
                Duration::from_millis(50)
            );

            let json = load_config(Some("search.json"), Config::default()).unwrap();
            assert_eq!(json.api_settings().timeout, None);
            Ok(())
        });
    }

    #[test]
    fn test_bad_files_are_errors() {
        Jail::expect_with(|jail| {
            jail.create_file("search.ini", "limit=3")?;
            jail.create_file("broken.toml", "[search]\nlimit = \"many\"\n")?;

            assert!(load_config(Some("missing.toml"), Config::default()).is_err());
            assert!(load_config(Some("search.ini"), Config::default()).is_err());
            assert!(load_config(Some("broken.toml"), Config::default()).is_err());
            Ok(())
        });
    }
}
