//! Error types.

/// Result type with the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Any error the crate can produce.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required argument was missing or invalid. Always raised before any network call.
    #[error("Invalid parameter: {}", .0)]
    Parameter(#[from] ParameterError),
    /// Logging in failed or the session is unusable.
    #[error("Authentication error: {}", .0)]
    Authentication(#[from] AuthenticationError),
    /// Loading an inventory failed.
    #[error("Failed to fetch inventory: {}", .0)]
    Inventory(RequestError),
    /// Sending a trade offer failed.
    #[error("Failed to send trade offer: {}", .0)]
    TradeOffer(RequestError),
    /// The Steam Guard code store could not be read or written.
    #[error("Steam Guard code store error: {}", .0)]
    ChallengeStore(#[from] FileError),
    /// The HTTP client could not be built.
    #[error("Error building HTTP client: {}", .0)]
    Client(#[from] reqwest::Error),
}

/// A required argument was missing or invalid.
#[derive(thiserror::Error, Debug)]
pub enum ParameterError {
    #[error("Steam username and password must be provided")]
    MissingCredentials,
    #[error("Steam ID64 must be provided")]
    MissingSteamId,
    #[error("App ID must be provided")]
    MissingAppId,
    #[error("At least one item must be provided for the trade")]
    NoItems,
    #[error("{}", .0)]
    UrlParse(#[from] url::ParseError),
}

/// Errors from logging in. These are cloned out to every caller waiting on the session.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid Steam Guard code provided")]
    InvalidSteamGuardCode,
    #[error("Login error: {}", .0)]
    Connection(String),
    #[error("Connection to Steam closed")]
    ConnectionClosed,
}

impl From<ConnectionError> for AuthenticationError {
    fn from(error: ConnectionError) -> Self {
        Self::Connection(error.0)
    }
}

/// An error reported by a [`crate::SteamConnection`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .0)]
pub struct ConnectionError(pub String);

impl From<&str> for ConnectionError {
    fn from(message: &str) -> Self {
        Self(message.into())
    }
}

/// An error making a request to Steam's web endpoints.
#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Error {}", .0)]
    Http(reqwest::StatusCode),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("{}", .0)]
    Response(String),
    #[error("Response unsuccessful")]
    ResponseUnsuccessful,
}

impl RequestError {
    /// Whether the request failed before a usable response was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Reqwest(_) | Self::ReqwestMiddleware(_) | Self::Http(_),
        )
    }
}

impl From<reqwest_middleware::Error> for RequestError {
    fn from(error: reqwest_middleware::Error) -> RequestError {
        match error {
            reqwest_middleware::Error::Reqwest(e) => RequestError::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => RequestError::ReqwestMiddleware(e),
        }
    }
}

/// An error reading or writing a file.
#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error("Filesystem error: {}", .0)]
    FileSystem(#[from] std::io::Error),
    #[error("Path has no parent directory")]
    PathError,
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn formats_wrapped_request_errors() {
        let error = Error::Inventory(RequestError::Response("Private inventory".into()));
        
        assert_eq!(error.to_string(), "Failed to fetch inventory: Private inventory");
        
        let error = Error::TradeOffer(RequestError::Http(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        
        assert_eq!(error.to_string(), "Failed to send trade offer: Error 500 Internal Server Error");
    }
    
    #[test]
    fn classifies_transport_errors() {
        assert!(RequestError::Http(reqwest::StatusCode::BAD_GATEWAY).is_transport());
        assert!(!RequestError::ResponseUnsuccessful.is_transport());
    }
}
