use thiserror::Error;

use crate::models::{
    query::RemotePlusQuery, result_set::RemotePlusResponse, security_result::SecurityResult,
};

/// The response text violated the positional protocol contract.
///
/// Remote Plus aligns response lines with identifiers and values with items
/// purely by position, so a count mismatch means the whole payload can no
/// longer be trusted. Parsing is all-or-nothing; no partial result set is
/// ever produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} response records (one per identifier), found {actual}")]
    RecordCountMismatch { expected: usize, actual: usize },

    #[error("record for [{identifier}] carried {actual} values for {expected} requested items")]
    ValueCountMismatch {
        identifier: String,
        expected: usize,
        actual: usize,
    },
}

/// Decodes the raw response body into a [`RemotePlusResponse`].
///
/// Line `i` answers identifier `i` of the query; value `j` within a line
/// answers item `j`. The final non-empty line is the provider's CRC and is
/// dropped unconditionally.
pub fn parse_response(
    raw: &str,
    query: &RemotePlusQuery,
) -> Result<RemotePlusResponse, ParseError> {
    let mut records: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    // Trailing CRC line, never data.
    records.pop();

    if records.len() != query.identifiers().len() {
        return Err(ParseError::RecordCountMismatch {
            expected: query.identifiers().len(),
            actual: records.len(),
        });
    }

    let mut response = RemotePlusResponse::default();

    for (identifier, record) in query.identifiers().iter().zip(records) {
        let values: Vec<&str> = record.split(',').collect();
        if values.len() != query.items().len() {
            return Err(ParseError::ValueCountMismatch {
                identifier: identifier.clone(),
                expected: query.items().len(),
                actual: values.len(),
            });
        }

        let mut result = SecurityResult::new(identifier.clone(), query.as_of());
        for (code, raw_value) in query.items().iter().zip(values) {
            result.push_item(code, clean_value(raw_value));
        }
        response.insert(result);
    }

    Ok(response)
}

/// Strips surrounding whitespace, then at most one literal double quote from
/// each end. Remote Plus quotes string-typed items but not numeric ones.
fn clean_value(raw: &str) -> String {
    let value = raw.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(identifiers: &[&str], items: &[&str]) -> RemotePlusQuery {
        RemotePlusQuery::new()
            .add_identifiers(identifiers)
            .add_items(items)
            .with_as_of_date("2018-12-31")
            .unwrap()
    }

    #[test]
    fn round_trip_two_securities_one_item() {
        let query = query(&["17307GNX2", "22541QFF4"], &["IEBID"]);
        let response = parse_response("90.48611\n1.0\n8023\n", &query).unwrap();

        assert_eq!(response.len(), 2);
        assert_eq!(
            response
                .get_by_identifier("17307GNX2")
                .unwrap()
                .item("IEBID")
                .unwrap(),
            "90.48611"
        );
        assert_eq!(
            response
                .get_by_identifier("22541QFF4")
                .unwrap()
                .item("IEBID")
                .unwrap(),
            "1.0"
        );
    }

    #[test]
    fn values_align_with_items_positionally() {
        let query = query(&["17307GNX2"], &["IEBID", "IEASK", "PRC"]);
        let response = parse_response("90.48611,91.11,90.75\n8023\n", &query).unwrap();
        let result = response.get_by_identifier("17307GNX2").unwrap();

        assert_eq!(result.item("IEBID").unwrap(), "90.48611");
        assert_eq!(result.item("IEASK").unwrap(), "91.11");
        assert_eq!(result.item("PRC").unwrap(), "90.75");
    }

    #[test]
    fn quoted_and_padded_values_are_cleaned() {
        let query = query(&["17307GNX2"], &["IEBID", "CUR"]);
        let response = parse_response("  \"90.54675\" , \"USD\"  \n8023\n", &query).unwrap();
        let result = response.get_by_identifier("17307GNX2").unwrap();

        assert_eq!(result.item("IEBID").unwrap(), "90.54675");
        assert_eq!(result.item("CUR").unwrap(), "USD");
    }

    #[test]
    fn sentinels_are_stored_as_literal_strings() {
        let query = query(&["22541QFF4"], &["IEBID"]);
        let response = parse_response("!NA\n8023\n", &query).unwrap();

        assert_eq!(
            response.get_by_identifier("22541QFF4").unwrap().raw_item("IEBID"),
            Some("!NA")
        );
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let query = query(&["17307GNX2", "22541QFF4"], &["IEBID"]);
        let response = parse_response("90.48611\r\n\r\n1.0\r\n8023\r\n", &query).unwrap();
        assert_eq!(response.len(), 2);
    }

    #[test]
    fn record_count_mismatch_fails_the_whole_parse() {
        let query = query(&["17307GNX2", "22541QFF4"], &["IEBID"]);
        // One data line short: only one record survives the CRC drop.
        let err = parse_response("90.48611\n8023\n", &query).unwrap_err();
        assert_eq!(
            err,
            ParseError::RecordCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn value_count_mismatch_names_the_identifier() {
        let query = query(&["17307GNX2"], &["IEBID", "IEASK"]);
        let err = parse_response("90.48611\n8023\n", &query).unwrap_err();
        assert_eq!(
            err,
            ParseError::ValueCountMismatch {
                identifier: "17307GNX2".to_string(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn empty_body_fails_when_records_were_expected() {
        let query = query(&["17307GNX2"], &["IEBID"]);
        let err = parse_response("", &query).unwrap_err();
        assert_eq!(
            err,
            ParseError::RecordCountMismatch {
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn as_of_date_is_carried_onto_each_result() {
        let query = query(&["17307GNX2"], &["IEBID"]);
        let response = parse_response("90.48611\n8023\n", &query).unwrap();
        let result = response.get_by_identifier("17307GNX2").unwrap();
        assert_eq!(result.as_of(), query.as_of());
    }
}
