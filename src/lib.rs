//! Read-only client for an ord block explorer.
//!
//! Pages are fetched over blocking HTTP and their attribute tables parsed
//! into [`Block`], [`Sat`], [`Inscription`] and [`Tx`] records.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod paging;
pub mod parser;
pub mod transport;
pub mod urls;

pub use client::PageClient;
pub use config::Settings;
pub use error::{Error, ParseError, Result, TransportError, ValidationError};
pub use models::{Block, Inscription, Sat, Tx};
pub use paging::Inscriptions;
pub use parser::fields::{FieldValue, Record};
pub use transport::{HttpTransport, Response, Transport};
pub use urls::{Network, Resource, UrlBuilder};
