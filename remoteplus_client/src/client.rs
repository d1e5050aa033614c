use reqwest::{Client, StatusCode, Version, header};
use secrecy::{ExposeSecret, SecretString};
use snafu::{Backtrace, ResultExt, Snafu, ensure};
use tracing::debug;

use crate::{
    client::{
        body::encode_body,
        response::{ParseError, parse_response},
    },
    config::{self, MissingEnvVarError},
    models::{query::RemotePlusQuery, result_set::RemotePlusResponse},
};

pub mod body;
pub mod response;

/// Production Remote Plus host.
const BASE_URL: &str = "http://rplus.interactivedata.com";

/// Resource that accepts the POSTed query.
const PAGE: &str = "/cgi/nph-rplus";

/// Errors that can occur while constructing a [`RemotePlusClient`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientInitError {
    /// Credential environment variable is not set.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// Failed to build the underlying HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors raised by one request/response cycle against Remote Plus.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RemotePlusError {
    /// The query cannot be sent as-is; Remote Plus would reject it.
    #[snafu(display("Invalid query: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// Connection-level failure: refused, timed out, or the body could not
    /// be read.
    #[snafu(display("Request to Remote Plus failed: {source}"))]
    Transport {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Remote Plus answered with a non-2xx status.
    #[snafu(display("Remote Plus returned HTTP {status}"))]
    Status {
        status: StatusCode,
        backtrace: Backtrace,
    },

    /// Remote Plus answered the whole request with an `!E`-prefixed error
    /// code instead of data lines.
    #[snafu(display("Remote Plus signalled error code {code}"))]
    Provider { code: String, backtrace: Backtrace },

    /// The response body broke the positional protocol contract.
    #[snafu(display("Malformed Remote Plus response: {source}"))]
    Malformed {
        source: ParseError,
        backtrace: Backtrace,
    },
}

/// Client for the Remote Plus pricing feed.
///
/// Holds only credentials and transport configuration; there is no state
/// between calls. Each [`Self::run`] performs exactly one POST, with no
/// retries and no interpretation beyond the protocol itself.
pub struct RemotePlusClient {
    http: Client,
    user: String,
    pass: SecretString,
    base_url: String,
}

impl RemotePlusClient {
    /// Creates a client for the given Interactive Data credentials.
    pub fn new(
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Result<Self, ClientInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        let pass: String = pass.into();
        Ok(Self {
            http,
            user: user.into(),
            pass: SecretString::new(pass.into()),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Creates a client from the `ICE_API_USER` / `ICE_API_PASS` environment
    /// variables.
    pub fn from_env() -> Result<Self, ClientInitError> {
        let user = config::get_env_var(config::USER_ENV_VAR).context(MissingEnvVarSnafu)?;
        let pass = config::get_env_var(config::PASS_ENV_VAR).context(MissingEnvVarSnafu)?;
        Self::new(user, pass)
    }

    /// Points the client at a different host. Test seam for local mock
    /// servers; production callers never need it.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Runs one full query cycle: serialize, POST, decode.
    ///
    /// The request goes out with HTTP/1.0 semantics, Basic authentication
    /// and the form-urlencoded content type Remote Plus requires. Transport
    /// failures, non-2xx statuses, `!E` provider codes and protocol
    /// violations each surface as their own [`RemotePlusError`] variant.
    pub async fn run(
        &self,
        query: &RemotePlusQuery,
    ) -> Result<RemotePlusResponse, RemotePlusError> {
        ensure!(
            !query.identifiers().is_empty(),
            ValidationSnafu {
                message: "at least one security identifier is required",
            }
        );
        ensure!(
            !query.items().is_empty(),
            ValidationSnafu {
                message: "at least one item code is required",
            }
        );

        let body = encode_body(query);
        debug!(
            identifiers = query.identifiers().len(),
            items = query.items().len(),
            date = %query.wire_date(),
            "sending Remote Plus query"
        );

        let response = self
            .http
            .post(format!("{}{}", self.base_url, PAGE))
            .version(Version::HTTP_10)
            .basic_auth(&self.user, Some(self.pass.expose_secret()))
            .body(body)
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        ensure!(status.is_success(), StatusSnafu { status });

        let text = response.text().await.context(TransportSnafu)?;
        debug!(bytes = text.len(), "received Remote Plus response");

        if let Some(code) = provider_error_code(&text) {
            return ProviderSnafu { code }.fail();
        }

        parse_response(&text, query).context(MalformedSnafu)
    }
}

/// Remote Plus reports request-level failures as a single `!Exxxx` code in
/// place of the data lines. Item-level sentinels all start with `!N` and are
/// handled during result access, not here.
fn provider_error_code(body: &str) -> Option<String> {
    let first = body.lines().map(str::trim).find(|line| !line.is_empty())?;
    if !first.starts_with("!E") {
        return None;
    }
    let code = first.split(',').next().unwrap_or(first).trim_matches('"');
    Some(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_detected_on_the_first_data_line() {
        assert_eq!(
            provider_error_code("\n  !E5004 \nrest\n"),
            Some("!E5004".to_string())
        );
    }

    #[test]
    fn data_lines_are_not_error_codes() {
        assert_eq!(provider_error_code("90.48611\n8023\n"), None);
        // Item-level sentinels are values, not request-level errors.
        assert_eq!(provider_error_code("!NA\n8023\n"), None);
        assert_eq!(provider_error_code(""), None);
    }
}
