use std::fmt;

use uuid::Uuid;

/// Owner of every persisted document. Opaque to this service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Makes a user-supplied name safe to embed in a document id.
pub fn sanitize_key(key: &str) -> String {
    key.replace(' ', "_").replace('/', "-").trim().to_string()
}

/// First `len` hex characters of a fresh v4 uuid.
pub(crate) fn random_suffix(len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..len.min(hex.len())].to_string()
}
