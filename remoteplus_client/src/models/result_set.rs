use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{security_result::SecurityResult, sentinel::NoValueReason};

/// Errors raised by the result accessors.
///
/// `UnknownIdentifier` and `ItemNotRequested` are caller misuse; the
/// `NotAvailable` variant is expected, data-driven, and carries the reason
/// the provider gave (one tagged variant per reserved sentinel code).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("no result for identifier [{identifier}]")]
    UnknownIdentifier { identifier: String },

    #[error("item [{code}] was not requested in the originating query")]
    ItemNotRequested { code: String },

    #[error("item [{code}] for [{identifier}] has no value: {reason}")]
    NotAvailable {
        identifier: String,
        code: String,
        reason: NoValueReason,
    },
}

/// The full decoded answer to one query: a [`SecurityResult`] per requested
/// identifier, keyed by identifier in request order.
///
/// Read-only once the parser has built it; safe to share freely for
/// concurrent reads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RemotePlusResponse {
    results: IndexMap<String, SecurityResult>,
}

impl RemotePlusResponse {
    pub(crate) fn insert(&mut self, result: SecurityResult) {
        self.results.insert(result.identifier().to_string(), result);
    }

    /// Looks up the result for one security.
    pub fn get_by_identifier(&self, identifier: &str) -> Result<&SecurityResult, AccessError> {
        self.results
            .get(identifier)
            .ok_or_else(|| AccessError::UnknownIdentifier {
                identifier: identifier.to_string(),
            })
    }

    /// Cross-section of one item across every security: identifier to raw
    /// stored value. No sentinel translation; `!NA` and friends come back as
    /// the literal strings the provider sent. `None` marks a code that was
    /// never requested.
    pub fn all_values_for_item(&self, code: &str) -> IndexMap<&str, Option<&str>> {
        self.results
            .values()
            .map(|result| (result.identifier(), result.raw_item(code)))
            .collect()
    }

    /// All per-security results in request order.
    pub fn results(&self) -> &IndexMap<String, SecurityResult> {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
