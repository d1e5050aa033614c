use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cusip;

/// Date formats accepted by [`RemotePlusQuery::with_as_of_date`].
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Errors raised while assembling a query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The as-of date string did not match any accepted format.
    #[error("could not parse the as-of date: [{input}]")]
    DateNotParsable { input: String },
}

/// One batch query against Remote Plus: which securities, which data items,
/// and the date the values should be as of.
///
/// Identifiers and items are ordered, deduplicated sequences. Order is
/// load-bearing: Remote Plus answers positionally, one response line per
/// identifier and one comma-separated value per item, so these are never
/// stored as unordered sets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RemotePlusQuery {
    identifiers: Vec<String>,
    items: Vec<String>,
    as_of: Option<NaiveDate>,
}

impl RemotePlusQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a security identifier (trimmed). Re-adding an identifier that
    /// is already present is a no-op, so the sequence stays duplicate-free
    /// without reordering.
    pub fn add_identifier(mut self, identifier: impl AsRef<str>) -> Self {
        let identifier = identifier.as_ref().trim();
        if !self.identifiers.iter().any(|existing| existing == identifier) {
            self.identifiers.push(identifier.to_string());
        }
        self
    }

    /// Appends each identifier in input order.
    pub fn add_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for identifier in identifiers {
            self = self.add_identifier(identifier);
        }
        self
    }

    /// Appends `cusip` only if it passes the CUSIP format and checksum test.
    /// An invalid CUSIP is silently dropped; this is a deliberate permissive
    /// no-op, not an error.
    pub fn add_cusip(self, cusip: impl AsRef<str>) -> Self {
        if cusip::is_cusip(cusip.as_ref()) {
            self.add_identifier(cusip)
        } else {
            self
        }
    }

    /// Applies [`Self::add_cusip`] to each element in input order.
    pub fn add_cusips<I, S>(mut self, cusips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for cusip in cusips {
            self = self.add_cusip(cusip);
        }
        self
    }

    /// Appends an item code unless already present.
    pub fn add_item(mut self, item: impl AsRef<str>) -> Self {
        let item = item.as_ref().trim();
        if !self.items.iter().any(|existing| existing == item) {
            self.items.push(item.to_string());
        }
        self
    }

    /// Appends each item code in input order.
    pub fn add_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self = self.add_item(item);
        }
        self
    }

    /// Sets the as-of date from a human-entered string. Most item codes
    /// require one; a few provider-defined items are dateless and the query
    /// may omit it.
    pub fn with_as_of_date(mut self, date: &str) -> Result<Self, QueryError> {
        self.as_of = Some(parse_as_of_date(date)?);
        Ok(self)
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// The date segment as Remote Plus expects it: `yyyymmdd`, or empty for
    /// a dateless query.
    pub fn wire_date(&self) -> String {
        self.as_of
            .map(|date| date.format("%Y%m%d").to_string())
            .unwrap_or_default()
    }
}

/// Parses a calendar date from any of the accepted formats.
fn parse_as_of_date(input: &str) -> Result<NaiveDate, QueryError> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| QueryError::DateNotParsable {
            input: input.to_string(),
        })
}
