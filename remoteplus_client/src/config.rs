use thiserror::Error;

/// Environment variable holding the username assigned by Interactive Data.
pub const USER_ENV_VAR: &str = "ICE_API_USER";

/// Environment variable holding the password for that username.
pub const PASS_ENV_VAR: &str = "ICE_API_PASS";

/// An environment variable required by the client is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// A thin wrapper around `std::env::var` so that a missing credential shows up
/// as a named, matchable error instead of a generic `VarError`.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_names_the_variable() {
        let err = get_env_var("REMOTEPLUS_DOES_NOT_EXIST").unwrap_err();
        assert_eq!(err.0, "REMOTEPLUS_DOES_NOT_EXIST");
    }
}
