use std::num::NonZeroU64;

use tracing::{debug, warn};

use crate::config::{Settings, DEFAULT_PAGE_SIZE};
use crate::error::{ParseError, Result, TransportError};
use crate::models::{Block, Inscription, Sat, Tx};
use crate::paging::Inscriptions;
use crate::parser;
use crate::transport::{HttpTransport, Response, Transport};
use crate::urls::{Network, Resource, UrlBuilder};

/// Read-only client for an ord explorer. One blocking request per call.
pub struct PageClient<T = HttpTransport> {
    urls: UrlBuilder,
    transport: T,
    page_size: NonZeroU64,
}

impl PageClient<HttpTransport> {
    pub fn new(network: Network) -> Result<Self> {
        Self::from_settings(&Settings {
            network,
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings.timeout(), &settings.user_agent)?;
        Ok(PageClient::with_transport(settings.urls(), transport).with_page_size(settings.page_size))
    }
}

impl<T: Transport> PageClient<T> {
    pub fn with_transport(urls: UrlBuilder, transport: T) -> Self {
        PageClient {
            urls,
            transport,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Listing page size of the upstream explorer.
    pub fn with_page_size(mut self, page_size: NonZeroU64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Liveness probe: any failure means "not healthy", never an error.
    pub fn is_node_healthy(&self) -> bool {
        let url = self.urls.resolve(Resource::NodeHealth);
        match self.transport.get(&url) {
            Ok(response) => {
                debug!(%url, status = response.status, "health probe");
                response.is_success()
            }
            Err(e) => {
                warn!(%url, error = %e, "health probe failed");
                false
            }
        }
    }

    pub fn get_block_count(&self) -> Result<u64> {
        let body = self.fetch_text(Resource::BlockCount)?;
        let trimmed = body.trim();
        let count = trimmed
            .parse::<u64>()
            .map_err(|_| ParseError::NotAnInteger(trimmed.to_string()))?;
        Ok(count)
    }

    pub fn get_block(&self, height: u64) -> Result<Block> {
        parser::parse_block(&self.fetch_text(Resource::Block(height))?)
    }

    pub fn get_sat(&self, sat_id: &str) -> Result<Sat> {
        parser::parse_sat(&self.fetch_text(Resource::Sat(sat_id))?)
    }

    pub fn get_inscription(&self, inscription_id: &str) -> Result<Inscription> {
        parser::parse_inscription(&self.fetch_text(Resource::Inscription(inscription_id))?)
    }

    pub fn get_tx(&self, tx_id: &str) -> Result<Tx> {
        parser::parse_tx(&self.fetch_text(Resource::Tx(tx_id))?)
    }

    /// Raw inscription payload, byte for byte.
    pub fn get_content(&self, inscription_id: &str) -> Result<Vec<u8>> {
        let response = self.fetch(Resource::Content(inscription_id))?;
        debug!(
            content_type = response.content_type.as_deref().unwrap_or("-"),
            len = response.body.len(),
            "fetched content"
        );
        Ok(response.body)
    }

    /// Rendered preview document, verbatim.
    pub fn get_preview(&self, inscription_id: &str) -> Result<String> {
        self.fetch_text(Resource::Preview(inscription_id))
    }

    /// Lazily walk `(index, inscription id)` for `index` in `start..stop`,
    /// newest first.
    pub fn inscriptions(&self, start: u64, stop: u64) -> Inscriptions<'_, T> {
        Inscriptions::new(self, start, stop)
    }

    /// Identifiers on one physical listing page.
    pub fn inscription_page(&self, page: u64) -> Result<Vec<String>> {
        let html = self.fetch_text(Resource::InscriptionsPage(page))?;
        let ids = parser::listing::inscription_ids(&html)?;
        debug!(page, count = ids.len(), "parsed listing page");
        Ok(ids)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.get()
    }

    fn fetch(&self, resource: Resource<'_>) -> Result<Response> {
        let url = self.urls.resolve(resource);
        let response = self.transport.get(&url)?;
        debug!(%url, status = response.status, "GET");
        if !response.is_success() {
            return Err(TransportError::Status {
                url,
                status: response.status,
            }
            .into());
        }
        Ok(response)
    }

    fn fetch_text(&self, resource: Resource<'_>) -> Result<String> {
        let response = self.fetch(resource)?;
        Ok(String::from_utf8(response.body).map_err(|_| ParseError::NotUtf8)?)
    }
}
