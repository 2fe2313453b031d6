use std::num::NonZeroU64;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::urls::{Network, UrlBuilder};

/// Listing page size used by ord's `/inscriptions/<page>`.
pub const DEFAULT_PAGE_SIZE: NonZeroU64 = NonZeroU64::new(100).unwrap();

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub network: Network,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub page_size: NonZeroU64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            network: Network::Mainnet,
            base_url: None,
            timeout_secs: 30,
            user_agent: default_user_agent(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `ORD_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("ORD"))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("network", "mainnet")?
            .set_default("timeout_secs", 30)?
            .set_default("user_agent", default_user_agent())?
            .set_default("page_size", DEFAULT_PAGE_SIZE.get() as i64)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn urls(&self) -> UrlBuilder {
        match &self.base_url {
            Some(base) => UrlBuilder::with_base(base),
            None => UrlBuilder::new(self.network),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_user_agent() -> String {
    format!("ord_explorer/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("ORD").source(Some(map))
    }

    #[test]
    fn defaults() {
        let s = Settings::from_environment(env(&[])).unwrap();
        assert_eq!(s.network, Network::Mainnet);
        assert_eq!(s.base_url, None);
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert_eq!(s.page_size.get(), 100);
        assert_eq!(s.urls().base(), "https://ordinals.com");
    }

    #[test]
    fn environment_overrides() {
        let s = Settings::from_environment(env(&[
            ("ORD_NETWORK", "testnet"),
            ("ORD_TIMEOUT_SECS", "5"),
            ("ORD_PAGE_SIZE", "25"),
        ]))
        .unwrap();
        assert_eq!(s.network, Network::Testnet);
        assert_eq!(s.timeout_secs, 5);
        assert_eq!(s.page_size.get(), 25);
        assert_eq!(s.urls().base(), "https://testnet.ordinals.com");
    }

    #[test]
    fn base_url_wins_over_network() {
        let s = Settings::from_environment(env(&[
            ("ORD_NETWORK", "testnet"),
            ("ORD_BASE_URL", "http://127.0.0.1:80/"),
        ]))
        .unwrap();
        assert_eq!(s.urls().base(), "http://127.0.0.1:80");
    }

    #[test]
    fn zero_page_size_rejected() {
        assert!(Settings::from_environment(env(&[("ORD_PAGE_SIZE", "0")])).is_err());
    }
}
