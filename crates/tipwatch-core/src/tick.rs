//! Raw progress ticks and their strict parsed form.
//!
//! Tick sources report tip heights either as JSON numbers or as numeric
//! strings (decimal, or `0x`-prefixed hex). Parsing happens at the boundary
//! and fails with a [`TickError`] instead of coercing bad input.

use serde::{Deserialize, Serialize};

use crate::error::TickError;

/// A tip height as delivered by a tick source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TipNumber {
    Number(serde_json::Number),
    Text(String),
}

impl TipNumber {
    fn parse(&self, field: &'static str) -> Result<u64, TickError> {
        match self {
            TipNumber::Number(n) => parse_json_number(field, n),
            TipNumber::Text(text) => parse_height(field, text),
        }
    }
}

impl From<u64> for TipNumber {
    fn from(n: u64) -> Self {
        TipNumber::Text(n.to_string())
    }
}

impl From<&str> for TipNumber {
    fn from(text: &str) -> Self {
        TipNumber::Text(text.to_string())
    }
}

// Integers beyond u64 arrive as floats, so anything but u64 is rejected here.
fn parse_json_number(field: &'static str, n: &serde_json::Number) -> Result<u64, TickError> {
    if let Some(height) = n.as_u64() {
        return Ok(height);
    }
    let value = n.to_string();
    if n.as_f64().is_some_and(|f| f < 0.0) {
        Err(TickError::Negative { field, value })
    } else {
        Err(TickError::InvalidNumber { field, value })
    }
}

fn parse_height(field: &'static str, text: &str) -> Result<u64, TickError> {
    let trimmed = text.trim();
    let invalid = || TickError::InvalidNumber {
        field,
        value: text.to_string(),
    };

    if trimmed.starts_with('-') {
        return Err(TickError::Negative {
            field,
            value: trimmed.to_string(),
        });
    }

    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() => u64::from_str_radix(hex, 16).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
        None => trimmed.parse::<u64>().map_err(|_| invalid()),
    }
}

/// One progress tick as delivered by the tick source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTick {
    pub indexer_tip_number: TipNumber,
    pub cache_tip_number: TipNumber,
}

impl RawTick {
    /// Create a raw tick from any tip representation.
    pub fn new(indexer_tip: impl Into<TipNumber>, cache_tip: impl Into<TipNumber>) -> Self {
        Self {
            indexer_tip_number: indexer_tip.into(),
            cache_tip_number: cache_tip.into(),
        }
    }

    /// Decode a tick from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate both heights.
    pub fn parse(&self) -> Result<ProgressTick, TickError> {
        Ok(ProgressTick {
            indexer_tip: self.indexer_tip_number.parse("indexerTipNumber")?,
            cache_tip: self.cache_tip_number.parse("cacheTipNumber")?,
        })
    }
}

/// A validated progress tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTick {
    pub indexer_tip: u64,
    pub cache_tip: u64,
}

impl From<ProgressTick> for RawTick {
    fn from(tick: ProgressTick) -> Self {
        RawTick::new(tick.indexer_tip, tick.cache_tip)
    }
}
