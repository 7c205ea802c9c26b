//! Authentication state observed by client views.
//!
//! [`SessionStore`] holds the current [`SessionState`] in a `watch` channel.
//! Views call [`SessionStore::subscribe`] on mount and drop the returned
//! [`SessionSubscription`] on unmount; there is nothing else to release.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use pixmorph_core::types::UserId;
use serde::Deserialize;
use tokio::sync::watch;

use crate::error::ClientError;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
    /// Bearer token sent to the API.
    pub access_token: String,
}

#[derive(Deserialize)]
struct TokenClaims {
    sub: UserId,
    #[serde(default)]
    email: Option<String>,
}

impl Session {
    /// Build a session from an access token issued by the identity
    /// provider.
    ///
    /// Only the payload is decoded to learn the user id; the signature is
    /// checked by the server on every call.
    pub fn from_access_token(token: impl Into<String>) -> Result<Self, ClientError> {
        let token = token.into();
        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            return Err(ClientError::InvalidToken(format!(
                "expected three segments, got {}",
                segments.len()
            )));
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
        let claims: TokenClaims =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidToken(e.to_string()))?;

        Ok(Self {
            user_id: claims.sub,
            email: claims.email,
            access_token: token,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(session) => Some(session),
        }
    }
}

/// Shared, observable authentication state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Anonymous);
        Self { tx: Arc::new(tx) }
    }

    pub fn sign_in(&self, session: Session) {
        tracing::info!(user_id = %session.user_id, "Signed in");
        self.tx.send_replace(SessionState::Authenticated(session));
    }

    pub fn sign_out(&self) {
        if self.tx.send_replace(SessionState::Anonymous) != SessionState::Anonymous {
            tracing::info!("Signed out");
        }
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// The current session, if signed in.
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().session().cloned()
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live view on the session state. Dropping it unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: watch::Receiver<SessionState>,
}

impl SessionSubscription {
    pub fn current(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    /// Wait for the next change. `None` once every store handle is gone.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    fn token_with(payload: serde_json::Value) -> String {
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{body}.signature")
    }

    fn session() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: None,
            access_token: "t".into(),
        }
    }

    #[test]
    fn session_is_read_from_token_payload() {
        let user = Uuid::new_v4();
        let token = token_with(serde_json::json!({"sub": user, "email": "a@b.c"}));

        let session = Session::from_access_token(token.clone()).unwrap();
        assert_eq!(session.user_id, user);
        assert_eq!(session.email.as_deref(), Some("a@b.c"));
        assert_eq!(session.access_token, token);
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert_matches!(
            Session::from_access_token("not-a-jwt"),
            Err(ClientError::InvalidToken(_))
        );
        let payload = URL_SAFE_NO_PAD.encode(serde_json::json!({"sub": Uuid::new_v4()}).to_string());
        assert_matches!(
            Session::from_access_token(format!("header.{payload}")),
            Err(ClientError::InvalidToken(msg)) if msg.contains("got 2")
        );
        assert_matches!(
            Session::from_access_token(token_with(serde_json::json!({"sub": "nope"}))),
            Err(ClientError::InvalidToken(_))
        );
    }

    #[test]
    fn store_starts_anonymous() {
        let store = SessionStore::new();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_sign_in_and_out() {
        let store = SessionStore::new();
        let mut sub = store.subscribe();
        let s = session();

        store.sign_in(s.clone());
        assert_eq!(sub.changed().await, Some(SessionState::Authenticated(s.clone())));
        assert_eq!(store.current(), Some(s));

        store.sign_out();
        assert_eq!(sub.changed().await, Some(SessionState::Anonymous));
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = SessionStore::new();
        let sub = store.subscribe();
        let other = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        drop(sub);
        assert_eq!(store.subscriber_count(), 1);
        drop(other);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn changed_ends_when_store_is_gone() {
        let store = SessionStore::new();
        let mut sub = store.subscribe();
        drop(store);
        assert_eq!(sub.changed().await, None);
    }
}
