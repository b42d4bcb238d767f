//! Authorization session shared by every client built for a console.
//!
//! The token is set on login and cleared on logout or when the host decides
//! it has expired. There is no refresh logic here; an expired token simply
//! surfaces as a failed call.

use std::sync::{Arc, RwLock};

use tracing::info;

#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_token(token: impl Into<String>) -> Arc<Self> {
        let session = Self::default();
        session.login(token);
        Arc::new(session)
    }

    pub fn login(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
        info!("session token set");
    }

    pub fn logout(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            info!("session token cleared");
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Value for the `Authorization` header, if logged in.
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}
