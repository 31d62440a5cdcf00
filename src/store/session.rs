use log::warn;
use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{MetadataStore, StoreError};

/// Credentials and address of an object store
#[derive(Clone, Default)]
pub struct ConnectionSettings {
    /// Server host or snapshot location
    pub host: String,
    /// User name
    pub username: String,
    /// Password
    pub password: String,
}

impl ConnectionSettings {
    /// Create settings from their parts
    pub fn new(host: &str, username: &str, password: &str) -> Self {
        Self {
            host: host.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An open store connection that is closed when it goes out of scope.
///
/// Call [`Session::close`] to observe close errors; a session dropped without
/// it, including on early returns, is closed and failures are logged.
pub struct Session<S: MetadataStore> {
    store: S,
    closed: bool,
}

impl<S: MetadataStore> Session<S> {
    /// Take ownership of an open store
    pub fn new(store: S) -> Self {
        Self {
            store,
            closed: false,
        }
    }

    /// Close the store, reporting any failure
    pub fn close(mut self) -> Result<(), StoreError> {
        self.closed = true;
        self.store.close()
    }
}

impl<S: MetadataStore> Deref for Session<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.store
    }
}

impl<S: MetadataStore> DerefMut for Session<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: MetadataStore> Drop for Session<S> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.store.close() {
                warn!("Failed to close session: {}", e);
            }
        }
    }
}
