use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;
use crate::parser::fields::{last_path_segment, FieldSpec, FieldValue, Fields, Record, Transform};

const TRAILING_SEGMENT: &[Transform] = &[last_path_segment];

/// Timestamps render as e.g. "2023-02-09 22:54:59 UTC".
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S UTC")
        .ok()
        .map(|t| t.and_utc())
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

/// `previous_block_hash` holds the bare hash even though the page links it as
/// `/block/<hash>`. Other link-valued fields such as [`Sat::block`] and
/// [`Inscription::sat`] keep their link path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub hash: String,
    pub previous_block_hash: String,
    pub size: u64,
    pub target: String,
    pub timestamp: String,
    pub weight: u64,
}

impl Block {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

impl Record for Block {
    const NAME: &'static str = "block";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("hash"),
        FieldSpec::new("previous_block_hash")
            .alias("previous blockhash")
            .transforms(TRAILING_SEGMENT),
        FieldSpec::new("size"),
        FieldSpec::new("target"),
        FieldSpec::new("timestamp"),
        FieldSpec::new("weight"),
    ];

    fn from_fields(mut f: Fields) -> Result<Self, ValidationError> {
        Ok(Block {
            hash: f.text("hash")?,
            previous_block_hash: f.text("previous_block_hash")?,
            size: f.unsigned("size")?,
            target: f.text("target")?,
            timestamp: f.text("timestamp")?,
            weight: f.unsigned("weight")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("hash", text(&self.hash)),
            ("previous_block_hash", text(&self.previous_block_hash)),
            ("size", FieldValue::Unsigned(self.size)),
            ("target", text(&self.target)),
            ("timestamp", text(&self.timestamp)),
            ("weight", FieldValue::Unsigned(self.weight)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sat {
    pub block: String,
    pub cycle: u64,
    pub decimal: String,
    pub degree: String,
    pub epoch: u64,
    pub inscription: String,
    pub name: String,
    pub offset: u64,
    pub percentile: String,
    pub period: u64,
    pub rarity: String,
    pub timestamp: String,
}

impl Sat {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

impl Record for Sat {
    const NAME: &'static str = "sat";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("block"),
        FieldSpec::new("cycle"),
        FieldSpec::new("decimal"),
        FieldSpec::new("degree"),
        FieldSpec::new("epoch"),
        FieldSpec::new("inscription"),
        FieldSpec::new("name"),
        FieldSpec::new("offset"),
        FieldSpec::new("percentile"),
        FieldSpec::new("period"),
        FieldSpec::new("rarity"),
        FieldSpec::new("timestamp"),
    ];

    fn from_fields(mut f: Fields) -> Result<Self, ValidationError> {
        Ok(Sat {
            block: f.text("block")?,
            cycle: f.unsigned("cycle")?,
            decimal: f.text("decimal")?,
            degree: f.text("degree")?,
            epoch: f.unsigned("epoch")?,
            inscription: f.text("inscription")?,
            name: f.text("name")?,
            offset: f.unsigned("offset")?,
            percentile: f.text("percentile")?,
            period: f.unsigned("period")?,
            rarity: f.text("rarity")?,
            timestamp: f.text("timestamp")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("block", text(&self.block)),
            ("cycle", FieldValue::Unsigned(self.cycle)),
            ("decimal", text(&self.decimal)),
            ("degree", text(&self.degree)),
            ("epoch", FieldValue::Unsigned(self.epoch)),
            ("inscription", text(&self.inscription)),
            ("name", text(&self.name)),
            ("offset", FieldValue::Unsigned(self.offset)),
            ("percentile", text(&self.percentile)),
            ("period", FieldValue::Unsigned(self.period)),
            ("rarity", text(&self.rarity)),
            ("timestamp", text(&self.timestamp)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inscription {
    pub id: String,
    pub address: String,
    pub content: String,
    pub content_length: String,
    pub content_type: String,
    pub genesis_fee: u64,
    pub genesis_height: u64,
    pub genesis_transaction: String,
    pub inscription_number: i64,
    pub location: String,
    pub offset: String,
    pub output: String,
    pub output_value: u64,
    pub preview: String,
    pub sat: String,
    pub timestamp: String,
    pub title: String,
}

impl Inscription {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

impl Record for Inscription {
    const NAME: &'static str = "inscription";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("id"),
        FieldSpec::new("address"),
        FieldSpec::new("content"),
        FieldSpec::new("content_length").alias("content length"),
        FieldSpec::new("content_type").alias("content type"),
        FieldSpec::new("genesis_fee").alias("genesis fee"),
        FieldSpec::new("genesis_height")
            .alias("genesis height")
            .transforms(TRAILING_SEGMENT),
        FieldSpec::new("genesis_transaction")
            .alias("genesis transaction")
            .transforms(TRAILING_SEGMENT),
        FieldSpec::new("inscription_number").alias("inscription number"),
        FieldSpec::new("location"),
        FieldSpec::new("offset"),
        FieldSpec::new("output"),
        FieldSpec::new("output_value").alias("output value"),
        FieldSpec::new("preview"),
        FieldSpec::new("sat"),
        FieldSpec::new("timestamp"),
        FieldSpec::new("title"),
    ];

    fn from_fields(mut f: Fields) -> Result<Self, ValidationError> {
        Ok(Inscription {
            id: f.text("id")?,
            address: f.text("address")?,
            content: f.text("content")?,
            content_length: f.text("content_length")?,
            content_type: f.text("content_type")?,
            genesis_fee: f.unsigned("genesis_fee")?,
            genesis_height: f.unsigned("genesis_height")?,
            genesis_transaction: f.text("genesis_transaction")?,
            inscription_number: f.signed("inscription_number")?,
            location: f.text("location")?,
            offset: f.text("offset")?,
            output: f.text("output")?,
            output_value: f.unsigned("output_value")?,
            preview: f.text("preview")?,
            sat: f.text("sat")?,
            timestamp: f.text("timestamp")?,
            title: f.text("title")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", text(&self.id)),
            ("address", text(&self.address)),
            ("content", text(&self.content)),
            ("content_length", text(&self.content_length)),
            ("content_type", text(&self.content_type)),
            ("genesis_fee", FieldValue::Unsigned(self.genesis_fee)),
            ("genesis_height", FieldValue::Unsigned(self.genesis_height)),
            ("genesis_transaction", text(&self.genesis_transaction)),
            ("inscription_number", FieldValue::Signed(self.inscription_number)),
            ("location", text(&self.location)),
            ("offset", text(&self.offset)),
            ("output", text(&self.output)),
            ("output_value", FieldValue::Unsigned(self.output_value)),
            ("preview", text(&self.preview)),
            ("sat", text(&self.sat)),
            ("timestamp", text(&self.timestamp)),
            ("title", text(&self.title)),
        ]
    }
}

/// First output of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tx {
    pub address: String,
    pub value: u64,
    /// Opcode rendering, e.g. "OP_PUSHNUM_1 OP_PUSHBYTES_32 88d2…".
    pub script_pubkey: String,
}

impl Record for Tx {
    const NAME: &'static str = "tx";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("address"),
        FieldSpec::new("value"),
        FieldSpec::new("script_pubkey").alias("script pubkey"),
    ];

    fn from_fields(mut f: Fields) -> Result<Self, ValidationError> {
        Ok(Tx {
            address: f.text("address")?,
            value: f.unsigned("value")?,
            script_pubkey: f.text("script_pubkey")?,
        })
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("address", text(&self.address)),
            ("value", FieldValue::Unsigned(self.value)),
            ("script_pubkey", text(&self.script_pubkey)),
        ]
    }
}
