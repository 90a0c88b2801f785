use crate::{Result, SipgError};

/// The API key a walk or account request runs with
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
}

impl Credentials {
    /// Credentials holding `api_key`; blank keys count as absent
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Credentials with no key
    #[must_use]
    pub const fn none() -> Self {
        Self { api_key: None }
    }

    /// Prefer `key` over the current one when it is set
    #[must_use]
    pub fn or_override(self, key: Option<String>) -> Self {
        let over = Self::new(key);
        if over.is_configured() {
            over
        } else {
            self
        }
    }

    /// The API key, if any
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The API key, or [`SipgError::NotConfigured`]
    pub fn require(&self) -> Result<&str> {
        self.api_key().ok_or(SipgError::NotConfigured)
    }

    /// Returns true if a key is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Never print the key itself.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .finish()
    }
}
