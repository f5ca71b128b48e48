use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use crate::{
    libs::{gen_id, headers::bearer},
    pages::place_order::PlaceOrder,
    token::{TokenSigner, TokenVerification},
    AdminError, AdminResult,
};

/// Who is logged in, created on login and dropped on logout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Upstream token, never sent to the dashboard
    #[serde(skip_serializing)]
    token: String,
    pub name: String,
    pub role: String,
    pub started_at: DateTime<Utc>,
}

/// A verified session, valid for the duration of one request
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sid: String,
    session: Session,
}

impl SessionHandle {
    pub fn sid(&self) -> &str {
        &self.sid
    }
    pub fn token(&self) -> &str {
        &self.session.token
    }
    pub fn session(&self) -> &Session {
        &self.session
    }
}

struct SessionEntry {
    session: Session,
    expires_at: i64,
    wizard: PlaceOrder,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    signer: TokenSigner,
}

impl SessionStore {
    pub fn new(signer: TokenSigner) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            signer,
        }
    }

    /// Starts a session and returns the token the dashboard presents from
    /// now on.
    pub fn init(&self, upstream_token: String, name: String, role: String) -> AdminResult<String> {
        let sid = gen_id(18);
        let now = Utc::now();
        let token = self.signer.sign(&sid, now.timestamp())?;
        let expires_at = self.signer.expiry(now.timestamp());
        let session = Session {
            token: upstream_token,
            name,
            role,
            started_at: now,
        };
        self.sessions.insert(
            sid,
            SessionEntry {
                session,
                expires_at,
                wizard: PlaceOrder::default(),
            },
        );
        Ok(token)
    }

    /// Ends the session named by the request, along with its draft order.
    /// Returns whether there was one.
    pub fn teardown(&self, headers: &HeaderMap) -> bool {
        let Some(token) = bearer(headers) else {
            return false;
        };
        match self.signer.verify(token, Utc::now().timestamp()) {
            TokenVerification::Ok(claims) | TokenVerification::Expired(claims) => {
                self.sessions.remove(&claims.sid).is_some()
            }
            TokenVerification::Error => false,
        }
    }

    pub fn require(&self, headers: &HeaderMap) -> AdminResult<SessionHandle> {
        let token = bearer(headers)
            .ok_or_else(|| AdminError::Unauthorized("Please log in first".to_owned()))?;
        match self.signer.verify(token, Utc::now().timestamp()) {
            TokenVerification::Ok(claims) => self
                .sessions
                .get(&claims.sid)
                .map(|entry| SessionHandle {
                    sid: claims.sid.clone(),
                    session: entry.session.clone(),
                })
                .ok_or_else(|| AdminError::Unauthorized("Session has ended, please log in again".to_owned())),
            TokenVerification::Expired(claims) => {
                self.sessions.remove(&claims.sid);
                Err(AdminError::Unauthorized("Session expired, please log in again".to_owned()))
            }
            TokenVerification::Error => Err(AdminError::Unauthorized("Invalid token".to_owned())),
        }
    }

    /// The session's draft order; empty when none is in progress
    pub fn wizard(&self, handle: &SessionHandle) -> PlaceOrder {
        self.sessions
            .get(handle.sid())
            .map(|entry| entry.wizard.clone())
            .unwrap_or_default()
    }

    pub fn save_wizard(&self, handle: &SessionHandle, wizard: PlaceOrder) {
        if let Some(mut entry) = self.sessions.get_mut(handle.sid()) {
            entry.wizard = wizard;
        }
    }

    pub fn reset_wizard(&self, handle: &SessionHandle) {
        self.save_wizard(handle, PlaceOrder::default());
    }

    /// Drops sessions whose token has expired; returns how many.
    pub fn prune(&self, now: i64) -> usize {
        let mut dropped = 0;
        self.sessions.retain(|_, entry| {
            let keep = entry.expires_at > now;
            dropped += usize::from(!keep);
            keep
        });
        dropped
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
