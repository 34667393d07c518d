// Request parameter models for the lock API

use actix_web::web;

use mutex_common::MutexError;

/// Raw query pairs in request order. Parsing into pairs accepts repeated
/// names, so `?key=a&key=b` reaches the handler instead of failing extraction.
pub type LockQuery = web::Query<Vec<(String, String)>>;

const KEY_PARAM: &str = "key";

/// The `?key=<name>` parameter shared by every lock route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyParam {
    pub key: Option<String>,
}

impl KeyParam {
    /// Takes the first `key` value; later repeats are ignored
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let key = pairs
            .iter()
            .find(|(name, _)| name == KEY_PARAM)
            .map(|(_, value)| value.clone());
        Self { key }
    }

    /// The lock key, rejecting an absent or empty value
    pub fn require_key(&self) -> Result<&str, MutexError> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(MutexError::MissingKey),
        }
    }
}

impl From<LockQuery> for KeyParam {
    fn from(query: LockQuery) -> Self {
        Self::from_pairs(&query)
    }
}
