use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{result_set::AccessError, sentinel::NoValueReason};

/// Every item value returned for one security, keyed by item code in request
/// order. Built once by the parser; read-only afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SecurityResult {
    identifier: String,
    as_of: Option<NaiveDate>,
    items: IndexMap<String, String>,
}

impl SecurityResult {
    pub(crate) fn new(identifier: String, as_of: Option<NaiveDate>) -> Self {
        Self {
            identifier,
            as_of,
            items: IndexMap::new(),
        }
    }

    pub(crate) fn push_item(&mut self, code: &str, value: String) {
        self.items.insert(code.to_string(), value);
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Returns the value stored for `code`, translating the provider's
    /// reserved sentinel codes into typed errors.
    ///
    /// Fails with [`AccessError::ItemNotRequested`] if `code` was not part of
    /// the originating query, and with [`AccessError::NotAvailable`] if the
    /// stored value is exactly one of the eight sentinels. Any other string,
    /// the empty string included, is returned unchanged.
    pub fn item(&self, code: &str) -> Result<&str, AccessError> {
        let value = self
            .items
            .get(code)
            .ok_or_else(|| AccessError::ItemNotRequested {
                code: code.to_string(),
            })?;

        if let Some(reason) = NoValueReason::from_sentinel(value) {
            return Err(AccessError::NotAvailable {
                identifier: self.identifier.clone(),
                code: code.to_string(),
                reason,
            });
        }

        Ok(value)
    }

    /// Raw passthrough lookup: no sentinel translation, `None` when the code
    /// was never requested. For bulk scanning where sentinels are data.
    pub fn raw_item(&self, code: &str) -> Option<&str> {
        self.items.get(code).map(String::as_str)
    }

    /// All stored cells, in item request order.
    pub fn items(&self) -> &IndexMap<String, String> {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(code: &str, value: &str) -> SecurityResult {
        let mut result = SecurityResult::new("17307GNX2".to_string(), None);
        result.push_item(code, value.to_string());
        result
    }

    #[test]
    fn literal_value_is_returned_unchanged() {
        let result = result_with("IEBID", "90.48611");
        assert_eq!(result.item("IEBID").unwrap(), "90.48611");
    }

    #[test]
    fn empty_value_is_data_not_an_error() {
        let result = result_with("IEBID", "");
        assert_eq!(result.item("IEBID").unwrap(), "");
    }

    #[test]
    fn sentinel_value_translates_to_typed_error() {
        let result = result_with("IEBID", "!NA");
        assert_eq!(
            result.item("IEBID").unwrap_err(),
            AccessError::NotAvailable {
                identifier: "17307GNX2".to_string(),
                code: "IEBID".to_string(),
                reason: NoValueReason::NotAvailable,
            }
        );
    }

    #[test]
    fn holiday_sentinel_maps_to_holiday_reason() {
        let result = result_with("PRC", "!NH");
        match result.item("PRC").unwrap_err() {
            AccessError::NotAvailable { reason, .. } => {
                assert_eq!(reason, NoValueReason::Holiday);
            }
            other => panic!("expected NotAvailable, got {other:?}"),
        }
    }

    #[test]
    fn unrequested_code_errors_regardless_of_content() {
        let result = result_with("IEBID", "90.48611");
        assert_eq!(
            result.item("IEASK").unwrap_err(),
            AccessError::ItemNotRequested {
                code: "IEASK".to_string()
            }
        );
    }

    #[test]
    fn raw_item_never_translates() {
        let result = result_with("IEBID", "!NA");
        assert_eq!(result.raw_item("IEBID"), Some("!NA"));
        assert_eq!(result.raw_item("IEASK"), None);
    }
}
