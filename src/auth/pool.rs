//! Credential pool
//!
//! An ordered list of credentials with a forward-only cursor. The cursor
//! never moves back while a parameter set is being collected; `reset`
//! rewinds it for the next one.

use super::types::Credential;
use crate::error::{Error, Result};

/// Ordered credentials rotated on failure
#[derive(Debug, Clone)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    cursor: usize,
}

impl CredentialPool {
    /// Create a pool; an empty list is a configuration error
    pub fn new(credentials: Vec<Credential>) -> Result<Self> {
        if credentials.is_empty() {
            return Err(Error::config("Credential pool is empty"));
        }
        Ok(Self {
            credentials,
            cursor: 0,
        })
    }

    /// Create a pool from raw tokens
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tokens.into_iter().map(Credential::new).collect())
    }

    /// Credential currently in use
    pub fn current(&self) -> &Credential {
        &self.credentials[self.cursor]
    }

    /// Position of the current credential
    pub fn index(&self) -> usize {
        self.cursor
    }

    /// Whether an unused credential remains after the current one
    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.credentials.len()
    }

    /// Move to the next credential. Returns false when the pool is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Rewind to the first credential
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of credentials
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
