//! Application configuration.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};

use intern_portal_model::{MergeRules, PlaceholderIdentity};

use serde::{Deserialize, Serialize};

use anyhow::Error;

/// Full application configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// General server configuration.
    pub server: ServerConfig,
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Where portal data is fetched from.
    pub remote: RemoteConfig,
    /// How the viewer is matched against remote data.
    pub identity: IdentityConfig,
}

/// General server configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Whether to send the identity cookie with `Secure`.
    ///
    /// By default, this is `true` to avoid misconfiguration.
    pub secure_cookies: bool,
    /// The name of the cookie the viewer's display name is kept in.
    pub cookie_name: String,
    /// Key used to encrypt cookies.
    pub encryption_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            secure_cookies: true,
            cookie_name: "userName".into(),
            encryption_key: None,
        }
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HttpConfig {
    /// The port to listen on.
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig { port: 4000 }
    }
}

/// Remote data source configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// The endpoint returning the current user's summary.
    pub user_url: String,
    /// The endpoint returning every participant.
    pub leaderboard_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            user_url: "http://localhost:5000/api/user".into(),
            leaderboard_url: "https://she-can-backend-iz2g.vercel.app/api/leaderboard".into(),
        }
    }
}

/// Viewer identity configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// The names the data source lists the current user under.
    ///
    /// These are matched case-insensitively.
    pub placeholder_names: Vec<String>,
    /// What a viewer is credited with if they are missing from the
    /// leaderboard.
    pub default_donations: u64,
    /// Appended to referral codes derived from display names.
    pub referral_suffix: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        let rules = MergeRules::default();

        IdentityConfig {
            placeholder_names: rules.placeholder.spellings().to_vec(),
            default_donations: rules.default_donations,
            referral_suffix: "2025".into(),
        }
    }
}

impl IdentityConfig {
    /// The merge rules described by this config.
    pub fn merge_rules(&self) -> MergeRules {
        MergeRules {
            placeholder: PlaceholderIdentity::new(self.placeholder_names.iter().cloned()),
            default_donations: self.default_donations,
        }
    }
}

/// Reads the configuration.
pub fn read_config(config_file: impl AsRef<Path>) -> Result<Config, Error> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_file))
        .merge(Env::prefixed("INTERNPORTAL_").split("__"))
        .merge(Env::raw().filter_map(|k| match k.as_str() {
            "ENCRYPTION_KEY" => Some(Uncased::from("server.encryption_key")),
            "PORT" => Some(Uncased::from("http.port")),
            "USER_URL" => Some(Uncased::from("remote.user_url")),
            "LEADERBOARD_URL" => Some(Uncased::from("remote.leaderboard_url")),
            _ => None,
        }))
        .extract()
        .map_err(From::from)
}
