use thiserror::Error;

use crate::models::{TradeKey, TradeRowEdit};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty required field: {0}")]
    EmptyField(String),
}

/// Checks the batch-row precondition: a usable composite key. Rows failing
/// this must never reach the store.
pub fn require_trade_key(row: &TradeRowEdit) -> Result<TradeKey, ValidationError> {
    let tx_hash = match &row.tx_hash {
        None => return Err(ValidationError::MissingField("tx_hash".to_string())),
        Some(h) if h.trim().is_empty() => {
            return Err(ValidationError::EmptyField("tx_hash".to_string()))
        }
        Some(h) => h.clone(),
    };

    let evt_index = row
        .evt_index
        .ok_or_else(|| ValidationError::MissingField("evt_index".to_string()))?;

    Ok(TradeKey { tx_hash, evt_index })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_key() {
        let row = TradeRowEdit {
            tx_hash: Some("0xabc".to_string()),
            evt_index: Some(2),
            ..Default::default()
        };
        let key = require_trade_key(&row).unwrap();
        assert_eq!(key.tx_hash, "0xabc");
        assert_eq!(key.evt_index, 2);
    }

    #[test]
    fn rejects_missing_or_blank_tx_hash() {
        let missing = TradeRowEdit {
            evt_index: Some(0),
            ..Default::default()
        };
        assert!(require_trade_key(&missing).is_err());

        let blank = TradeRowEdit {
            tx_hash: Some("   ".to_string()),
            evt_index: Some(0),
            ..Default::default()
        };
        assert!(require_trade_key(&blank).is_err());
    }

    #[test]
    fn rejects_missing_evt_index() {
        let row = TradeRowEdit {
            tx_hash: Some("0xabc".to_string()),
            ..Default::default()
        };
        assert!(require_trade_key(&row).is_err());
    }
}
