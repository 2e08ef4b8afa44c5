// Trade row shapes: the persisted record, the wire shape of a batch edit,
// and the ad-hoc transaction row keyed by surrogate id.

use serde::{Deserialize, Deserializer, Serialize};

/// Composite identity of one trade leg.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeKey {
    pub tx_hash: String,
    pub evt_index: i64,
}

impl std::fmt::Display for TradeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.tx_hash, self.evt_index)
    }
}

/// One executed swap as persisted in the trades table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TradeRecord {
    pub tx_hash: String,
    pub evt_index: i64,
    pub blockchain: Option<String>,
    pub project: Option<String>,
    pub version: Option<String>,
    pub block_month: Option<String>,
    pub block_date: Option<String>,
    pub block_time: Option<String>,
    pub block_number: Option<i64>,
    pub token_bought_symbol: Option<String>,
    pub token_sold_symbol: Option<String>,
    pub token_pair: Option<String>,
    pub token_bought_amount: Option<f64>,
    pub token_sold_amount: Option<f64>,
    pub token_bought_amount_raw: Option<f64>,
    pub token_sold_amount_raw: Option<f64>,
    pub amount_usd: Option<f64>,
    pub token_bought_address: Option<String>,
    pub token_sold_address: Option<String>,
    pub taker: Option<String>,
    pub maker: Option<String>,
    pub project_contract_address: Option<String>,
    pub tx_from: Option<String>,
    pub tx_to: Option<String>,
}

impl TradeRecord {
    pub fn key(&self) -> TradeKey {
        TradeKey {
            tx_hash: self.tx_hash.clone(),
            evt_index: self.evt_index,
        }
    }
}

/// One element of a PUT /api/trades batch. The table editor sends cells as
/// whatever the grid held, so numeric fields arrive as numbers, numeric
/// strings, empty strings, or null; the deserializers below collapse the
/// last three cases per the tri-state convention. The key may be absent
/// entirely, which is caught by validation before any store call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeRowEdit {
    #[serde(default, deserialize_with = "loose_string")]
    pub tx_hash: Option<String>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub evt_index: Option<i64>,
    #[serde(default, rename = "isDeleted")]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "loose_string")]
    pub blockchain: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub block_month: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub block_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub block_time: Option<String>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub block_number: Option<i64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_bought_symbol: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_sold_symbol: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_pair: Option<String>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub token_bought_amount: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub token_sold_amount: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub token_bought_amount_raw: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub token_sold_amount_raw: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub amount_usd: Option<f64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_bought_address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_sold_address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub taker: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub maker: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub project_contract_address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub tx_from: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub tx_to: Option<String>,
}

impl TradeRowEdit {
    /// Builds the persistable record once the key has been validated.
    pub fn into_record(self, key: TradeKey) -> TradeRecord {
        TradeRecord {
            tx_hash: key.tx_hash,
            evt_index: key.evt_index,
            blockchain: self.blockchain,
            project: self.project,
            version: self.version,
            block_month: self.block_month,
            block_date: self.block_date,
            block_time: self.block_time,
            block_number: self.block_number,
            token_bought_symbol: self.token_bought_symbol,
            token_sold_symbol: self.token_sold_symbol,
            token_pair: self.token_pair,
            token_bought_amount: self.token_bought_amount,
            token_sold_amount: self.token_sold_amount,
            token_bought_amount_raw: self.token_bought_amount_raw,
            token_sold_amount_raw: self.token_sold_amount_raw,
            amount_usd: self.amount_usd,
            token_bought_address: self.token_bought_address,
            token_sold_address: self.token_sold_address,
            taker: self.taker,
            maker: self.maker,
            project_contract_address: self.project_contract_address,
            tx_from: self.tx_from,
            tx_to: self.tx_to,
        }
    }
}

/// Ad-hoc transaction row for the manual-entry table. Every column is
/// optional; the same shape serves as the partial body of
/// PUT /api/transactions/:id, where only present fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct ManualTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub blockchain: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub block_month: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub block_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub block_time: Option<String>,
    #[serde(default, deserialize_with = "loose_i64")]
    pub block_number: Option<i64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_bought_symbol: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub token_sold_symbol: Option<String>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub token_bought_amount: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub token_sold_amount: Option<f64>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub amount_usd: Option<f64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub tx_hash: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub taker: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub maker: Option<String>,
}

impl ManualTransaction {
    /// True when the body carried no usable field at all.
    pub fn is_empty_patch(&self) -> bool {
        self.blockchain.is_none()
            && self.project.is_none()
            && self.version.is_none()
            && self.block_month.is_none()
            && self.block_date.is_none()
            && self.block_time.is_none()
            && self.block_number.is_none()
            && self.token_bought_symbol.is_none()
            && self.token_sold_symbol.is_none()
            && self.token_bought_amount.is_none()
            && self.token_sold_amount.is_none()
            && self.amount_usd.is_none()
            && self.tx_hash.is_none()
            && self.taker.is_none()
            && self.maker.is_none()
    }
}

// Accepts a JSON string, number, or bool where the table stores text.
// The grid's CSV import types cells dynamically, so "2" and 2 both happen.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Num(f64),
        Bool(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Int(n)) => Some(n.to_string()),
        Some(Raw::Num(n)) => Some(n.to_string()),
        Some(Raw::Bool(b)) => Some(b.to_string()),
    })
}

// Tri-state numeric: null, "" and unparseable text all normalize to None.
fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
    })
}

fn loose_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Int(n)) => Some(n),
        Some(Raw::Num(n)) => Some(n as i64),
        Some(Raw::Text(s)) => s.trim().parse::<i64>().ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_numeric_normalizes_to_null() {
        let row: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"amount_usd":""}"#).unwrap();
        assert_eq!(row.amount_usd, None);
    }

    #[test]
    fn null_and_absent_numeric_normalize_to_null() {
        let explicit: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"amount_usd":null}"#).unwrap();
        let absent: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0}"#).unwrap();
        assert_eq!(explicit.amount_usd, None);
        assert_eq!(absent.amount_usd, None);
    }

    #[test]
    fn numeric_strings_parse() {
        let row: TradeRowEdit = serde_json::from_str(
            r#"{"tx_hash":"0xA","evt_index":"3","amount_usd":"100.5","block_number":"17000000"}"#,
        )
        .unwrap();
        assert_eq!(row.evt_index, Some(3));
        assert_eq!(row.amount_usd, Some(100.5));
        assert_eq!(row.block_number, Some(17_000_000));
    }

    #[test]
    fn unparseable_numeric_text_normalizes_to_null() {
        let row: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"amount_usd":"n/a"}"#).unwrap();
        assert_eq!(row.amount_usd, None);
    }

    #[test]
    fn block_date_accepts_a_bare_number() {
        // The grid seeds new rows with Date#getDate(), a number.
        let row: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"block_date":17}"#).unwrap();
        assert_eq!(row.block_date.as_deref(), Some("17"));
    }

    #[test]
    fn is_deleted_defaults_to_false() {
        let row: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0}"#).unwrap();
        assert!(!row.is_deleted);
        let deleted: TradeRowEdit =
            serde_json::from_str(r#"{"tx_hash":"0xA","evt_index":0,"isDeleted":true}"#).unwrap();
        assert!(deleted.is_deleted);
    }
}
