use crate::error::ParameterError;
use std::fmt;

/// Account credentials. These cannot be changed once created.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    account_name: String,
    password: String,
    steam_guard_code: Option<String>,
}

impl Credentials {
    /// Creates credentials. Fails if either the account name or password is empty.
    pub fn new<A, P>(
        account_name: A,
        password: P,
    ) -> Result<Self, ParameterError>
    where
        A: Into<String>,
        P: Into<String>,
    {
        let account_name = account_name.into();
        let password = password.into();
        
        if account_name.trim().is_empty() || password.is_empty() {
            return Err(ParameterError::MissingCredentials);
        }
        
        Ok(Self {
            account_name,
            password,
            steam_guard_code: None,
        })
    }
    
    /// Adds a Steam Guard code to use when logging in. A blank code is ignored.
    pub fn steam_guard_code<T>(mut self, code: T) -> Self
    where
        T: Into<String>,
    {
        let code = code.into().trim().to_string();
        
        self.steam_guard_code = (!code.is_empty()).then_some(code);
        self
    }
    
    /// Reads credentials from the `STEAM_USERNAME`, `STEAM_PASSWORD` and (optionally)
    /// `STEAM_GUARD_CODE` environment variables.
    pub fn from_env() -> Result<Self, ParameterError> {
        let account_name = std::env::var("STEAM_USERNAME").unwrap_or_default();
        let password = std::env::var("STEAM_PASSWORD").unwrap_or_default();
        let credentials = Self::new(account_name, password)?;
        
        match std::env::var("STEAM_GUARD_CODE") {
            Ok(code) => Ok(credentials.steam_guard_code(code)),
            Err(_) => Ok(credentials),
        }
    }
    
    /// The account name.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }
    
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
    
    /// The Steam Guard code supplied with the credentials, if any.
    pub fn supplied_steam_guard_code(&self) -> Option<&str> {
        self.steam_guard_code.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_name", &self.account_name)
            .field("password", &"<redacted>")
            .field("steam_guard_code", &self.steam_guard_code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn requires_account_name_and_password() {
        for (account_name, password) in [("", "hunter2"), ("user", ""), ("  ", "hunter2"), ("", "")] {
            assert!(matches!(
                Credentials::new(account_name, password),
                Err(ParameterError::MissingCredentials),
            ));
        }
        
        assert!(Credentials::new("user", "hunter2").is_ok());
    }
    
    #[test]
    fn ignores_blank_steam_guard_code() {
        let credentials = Credentials::new("user", "hunter2").unwrap()
            .steam_guard_code(" \n");
        
        assert_eq!(credentials.supplied_steam_guard_code(), None);
        
        let credentials = credentials.steam_guard_code(" F4KE2\n");
        
        assert_eq!(credentials.supplied_steam_guard_code(), Some("F4KE2"));
    }
    
    #[test]
    fn redacts_secrets_in_debug_output() {
        let credentials = Credentials::new("user", "hunter2").unwrap()
            .steam_guard_code("F4KE2");
        let debug = format!("{credentials:?}");
        
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("F4KE2"));
    }
}
