//! Client for the ICE / Interactive Data "Remote Plus" securities-pricing
//! feed.
//!
//! Remote Plus is reachable through a single HTTP endpoint that takes a
//! custom, delimited, form-encoded request and answers with delimited plain
//! text. This crate covers the whole round trip: assembling a batch query
//! (identifiers by item codes by as-of date), POSTing it with Basic auth,
//! and decoding the positional response into a queryable result set with the
//! provider's reserved non-value codes translated into typed errors.
//!
//! # Example
//!
//! ```no_run
//! use remoteplus_client::{RemotePlusClient, RemotePlusQuery};
//!
//! # async fn demo() -> Result<(), remoteplus_client::Error> {
//! let query = RemotePlusQuery::new()
//!     .add_cusip("17307GNX2")
//!     .add_item("IEBID")
//!     .with_as_of_date("2018-12-31")?;
//!
//! let client = RemotePlusClient::from_env()?;
//! let response = client.run(&query).await?;
//! let bid = response.get_by_identifier("17307GNX2")?.item("IEBID")?;
//! println!("bid: {bid}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod cusip;
pub mod errors;
pub mod models;

pub use client::{ClientInitError, RemotePlusClient, RemotePlusError, response::ParseError};
pub use errors::Error;
pub use models::{
    query::{QueryError, RemotePlusQuery},
    result_set::{AccessError, RemotePlusResponse},
    security_result::SecurityResult,
    sentinel::NoValueReason,
};
