use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use serde_json::Value;
use tkl_types::{Price, TicketSale, TypeError};

/// One sale as entered by the user. Missing text fields read as empty so the
/// ledger's own validation reports them.
#[derive(Clone, Debug, Deserialize)]
pub struct SaleEntry {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub buyer: String,
    #[serde(default)]
    pub seat: String,
    #[serde(default)]
    pub price: PriceEntry,
}

/// Prices may be entered as JSON numbers or as decimal strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceEntry {
    Number(f64),
    Text(String),
}

impl Default for PriceEntry {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl PriceEntry {
    pub fn to_price(&self) -> Result<Price, TypeError> {
        match self {
            Self::Number(n) => Price::from_f64(*n),
            Self::Text(s) => Price::parse(s),
        }
    }
}

impl SaleEntry {
    pub fn to_sale(&self) -> Result<TicketSale, TypeError> {
        Ok(TicketSale::new(
            self.event.clone(),
            self.buyer.clone(),
            self.seat.clone(),
            self.price.to_price()?,
        ))
    }
}

/// Split the input into its array elements. Elements are decoded one at a
/// time by [`decode_sale`], so a malformed entry does not sink the file.
pub fn parse_sales(source: &str) -> anyhow::Result<Vec<Value>> {
    serde_json::from_str(source).context("expected a JSON array of sales")
}

/// Decode one array element into a sale.
pub fn decode_sale(value: Value) -> anyhow::Result<TicketSale> {
    let entry: SaleEntry =
        serde_json::from_value(value).map_err(|e| anyhow!("malformed entry: {e}"))?;
    Ok(entry.to_sale()?)
}

pub fn read_sales(path: &Path) -> anyhow::Result<Vec<Value>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_sales(&source).with_context(|| format!("parsing {}", path.display()))
}
