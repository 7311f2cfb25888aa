//! Cookie sessions on `tower-sessions`. The cookie carries an opaque session
//! id; the caller's [`Identity`] and pending notices live in the server-side
//! record.

use crate::api::models::{ApiError, Notice};
use crate::config::Config;
use crate::core::errors::MedviewError;
use crate::core::models::session::Identity;
use crate::infrastructure::session::SessionStore;
use axum::{extract::Request, middleware::Next, response::Response};
use time::Duration;
use tower_sessions::{Expiry, Session, SessionManagerLayer, cookie::SameSite};
use tracing::error;

pub const SESSION_COOKIE: &str = "medview_session";

const IDENTITY_KEY: &str = "identity";
const NOTICES_KEY: &str = "notices";

/// Issues and reads the `medview_session` cookie. Records expire after
/// `session_ttl_secs` without activity.
pub fn session_layer<S: SessionStore + Clone>(store: S, config: &Config) -> SessionManagerLayer<S> {
    let ttl = i64::try_from(config.session_ttl_secs).unwrap_or(i64::MAX);
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure_cookie)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(ttl)))
}

/// Binds `identity` to the session under a fresh session id.
pub async fn sign_in(session: &Session, identity: &Identity) -> Result<(), MedviewError> {
    session.cycle_id().await?;
    session.insert(IDENTITY_KEY, identity).await?;
    Ok(())
}

/// The identity bound to this session. Missing, expired and logged-out
/// sessions all come back as `Unauthenticated`.
pub async fn resolve_session(session: &Session) -> Result<Identity, MedviewError> {
    session
        .get::<Identity>(IDENTITY_KEY)
        .await?
        .ok_or(MedviewError::Unauthenticated)
}

/// Deletes the session record; the manager clears the cookie.
pub async fn sign_out(session: &Session) -> Result<(), MedviewError> {
    session.flush().await?;
    Ok(())
}

/// Queues a one-shot notice for the next page rendered in this session.
pub async fn push_notice(session: &Session, notice: String) -> Result<(), MedviewError> {
    let mut notices: Vec<String> = session.get(NOTICES_KEY).await?.unwrap_or_default();
    notices.push(notice);
    session.insert(NOTICES_KEY, notices).await?;
    Ok(())
}

/// Returns and clears all queued notices.
pub async fn take_notices(session: &Session) -> Result<Vec<String>, MedviewError> {
    Ok(session.remove::<Vec<String>>(NOTICES_KEY).await?.unwrap_or_default())
}

/// Middleware guarding every session-only route. Stores the caller's
/// [`Identity`] in request extensions, redirects anonymous callers to
/// `/login`, and moves any [`Notice`] on the response into the session.
pub async fn session_middleware(session: Session, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let identity = resolve_session(&session).await?;
    req.extensions_mut().insert(identity.clone());

    let mut response = next.run(req).await;
    if let Some(Notice(notice)) = response.extensions_mut().remove::<Notice>() {
        if let Err(e) = push_notice(&session, notice).await {
            error!(error = %e, user = %identity.username, "failed to store notice");
        }
    }
    Ok(response)
}
