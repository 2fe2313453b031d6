use std::fmt;

use serde::Deserialize;

const MAINNET_URL: &str = "https://ordinals.com";
const TESTNET_URL: &str = "https://testnet.ordinals.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn base_url(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_URL,
            Network::Testnet => TESTNET_URL,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Every page the client knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    NodeHealth,
    BlockCount,
    Block(u64),
    Sat(&'a str),
    Inscription(&'a str),
    Content(&'a str),
    Preview(&'a str),
    InscriptionsPage(u64),
    Tx(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base: String,
}

impl UrlBuilder {
    pub fn new(network: Network) -> Self {
        Self::with_base(network.base_url())
    }

    /// Point at an explorer other than the public ones, e.g. a local `ord server`.
    pub fn with_base(base: &str) -> Self {
        UrlBuilder {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resolve(&self, resource: Resource<'_>) -> String {
        let base = &self.base;
        match resource {
            Resource::NodeHealth => format!("{base}/status"),
            Resource::BlockCount => format!("{base}/blockcount"),
            Resource::Block(height) => format!("{base}/block/{height}"),
            Resource::Sat(id) => format!("{base}/sat/{id}"),
            Resource::Inscription(id) => format!("{base}/inscription/{id}"),
            Resource::Content(id) => format!("{base}/content/{id}"),
            Resource::Preview(id) => format!("{base}/preview/{id}"),
            Resource::InscriptionsPage(page) => format!("{base}/inscriptions/{page}"),
            Resource::Tx(id) => format!("{base}/tx/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_hosts() {
        let main = UrlBuilder::new(Network::Mainnet);
        let test = UrlBuilder::new(Network::Testnet);
        assert_eq!(main.resolve(Resource::BlockCount), "https://ordinals.com/blockcount");
        assert_eq!(
            test.resolve(Resource::BlockCount),
            "https://testnet.ordinals.com/blockcount"
        );
    }

    #[test]
    fn network_names() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!(format!("{}", Network::Testnet), "testnet");
    }

    #[test]
    fn resource_paths() {
        let urls = UrlBuilder::with_base("http://localhost:8080/");
        let id = "3d91f7983bbb9ef05f05a874bb78d79fa15d2e38fddb9f2f866bcbb853b9460di0";
        assert_eq!(urls.resolve(Resource::NodeHealth), "http://localhost:8080/status");
        assert_eq!(urls.resolve(Resource::Block(775796)), "http://localhost:8080/block/775796");
        assert_eq!(urls.resolve(Resource::Sat("1283640386667641")), "http://localhost:8080/sat/1283640386667641");
        assert_eq!(urls.resolve(Resource::Inscription(id)), format!("http://localhost:8080/inscription/{id}"));
        assert_eq!(urls.resolve(Resource::Content(id)), format!("http://localhost:8080/content/{id}"));
        assert_eq!(urls.resolve(Resource::Preview(id)), format!("http://localhost:8080/preview/{id}"));
        assert_eq!(urls.resolve(Resource::InscriptionsPage(3)), "http://localhost:8080/inscriptions/3");
        assert_eq!(urls.resolve(Resource::Tx("abc")), "http://localhost:8080/tx/abc");
    }
}
