// Authentication lifecycle
//
// Credential login runs the three-step SSO handshake (signin page for the
// CSRF token, signin form for the service ticket, ticket exchange for the
// OAuth2 bundle). Token login loads a previously persisted bundle instead
// and never falls back to credentials -- that decision belongs to the
// caller, which is why every stored-token failure maps to SessionInvalid.

use std::path::Path;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;
use crate::models::{Profile, SocialProfile, UserSettings};

/// File name of the serialized token bundle inside the token directory.
pub const TOKEN_FILE: &str = "oauth2_token.json";

/// Garmin account credentials. Ephemeral; never persisted by this crate.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Serialized OAuth2 session material.
///
/// Written by [`ConnectClient::persist`] and read back by
/// [`ConnectClient::resume`] so later runs can skip the credential
/// handshake entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBundle {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Unix timestamp (seconds) after which the access token is stale.
    pub expires_at: i64,
}

impl TokenBundle {
    /// Load a bundle from `<dir>/oauth2_token.json`.
    ///
    /// An absent or malformed file is a `SessionInvalid` error, matching
    /// how an upstream rejection of the token is reported.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(TOKEN_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|e| Error::SessionInvalid {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::SessionInvalid {
            message: format!("malformed token bundle at {}: {e}", path.display()),
        })
    }

    /// Write the bundle to `<dir>/oauth2_token.json`, creating `dir` if
    /// needed.
    pub fn save(&self, dir: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(dir).map_err(|e| Error::TokenStore {
            message: format!("cannot create {}: {e}", dir.display()),
        })?;
        let path = dir.join(TOKEN_FILE);
        let raw = serde_json::to_string_pretty(self).map_err(|e| Error::TokenStore {
            message: format!("cannot serialize token bundle: {e}"),
        })?;
        std::fs::write(&path, raw).map_err(|e| Error::TokenStore {
            message: format!("cannot write {}: {e}", path.display()),
        })
    }

    /// Whether the access token's lifetime has elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Shape of the ticket-exchange response.
#[derive(Deserialize)]
struct OAuthExchange {
    access_token: String,
    refresh_token: String,
    token_type: String,
    expires_in: i64,
}

impl From<OAuthExchange> for TokenBundle {
    fn from(raw: OAuthExchange) -> Self {
        Self {
            access_token: raw.access_token,
            refresh_token: raw.refresh_token,
            token_type: raw.token_type,
            expires_at: Utc::now().timestamp() + raw.expires_in,
        }
    }
}

impl ConnectClient {
    /// Authenticate with email and password.
    ///
    /// Runs the SSO handshake, then immediately issues the two profile
    /// sub-fetches (social profile, user settings). If either sub-fetch
    /// fails the login fails as a whole with `ProfileFetchFailed` -- the
    /// client never keeps a session with a half-populated profile.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&Profile, Error> {
        let token = self.sso_handshake(credentials).await?;
        self.set_token(token);

        if let Err(e) = self.install_profile().await {
            self.clear_session();
            return Err(Error::ProfileFetchFailed {
                message: e.to_string(),
            });
        }

        debug!("login complete");
        self.current_profile()
    }

    /// Resume a session from a persisted token bundle directory.
    ///
    /// Skips the credential exchange entirely. If the bundle is absent,
    /// malformed, locally expired, or rejected by the service, fails with
    /// `SessionInvalid`; no credential fallback is attempted here.
    pub async fn resume(&mut self, token_dir: &Path) -> Result<&Profile, Error> {
        let bundle = TokenBundle::load(token_dir)?;
        if bundle.is_expired() {
            return Err(Error::SessionInvalid {
                message: "stored token bundle has expired".into(),
            });
        }

        debug!("resuming session from {}", token_dir.display());
        self.set_token(bundle);

        if let Err(e) = self.install_profile().await {
            self.clear_session();
            return Err(match e {
                Error::SessionExpired => Error::SessionInvalid {
                    message: "service rejected the stored token".into(),
                },
                other => Error::ProfileFetchFailed {
                    message: other.to_string(),
                },
            });
        }

        debug!("session resumed");
        self.current_profile()
    }

    /// Serialize the current session's token material to `token_dir`.
    pub fn persist(&self, token_dir: &Path) -> Result<(), Error> {
        let token = self.token().ok_or(Error::NotAuthenticated)?;
        token.save(token_dir)?;
        debug!("token bundle persisted to {}", token_dir.display());
        Ok(())
    }

    /// Best-effort server-side session invalidation.
    ///
    /// Failures are logged, not raised. Local profile state is kept.
    pub async fn logout(&self) {
        let Some(token) = self.token() else {
            debug!("logout called with no active session");
            return;
        };

        let url = format!("{}{}", self.api_base(), paths::LOGOUT);
        debug!("logging out at {url}");

        let result = self
            .http()
            .get(&url)
            .header("Authorization", token.bearer())
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => debug!("logout complete"),
            Ok(resp) => warn!("logout rejected with HTTP {}", resp.status()),
            Err(e) => warn!("logout request failed: {e}"),
        }
    }

    // ── SSO handshake ────────────────────────────────────────────────

    async fn sso_handshake(&self, credentials: &Credentials) -> Result<TokenBundle, Error> {
        let signin_url = format!("{}/signin", self.sso_base());
        let service_params = [
            ("service", self.api_base().to_owned()),
            ("clientId", "GarminConnect".to_owned()),
            ("gauthHost", self.sso_base().to_owned()),
        ];

        // Step 1: fetch the signin page for the CSRF token (and cookies).
        debug!("fetching signin page");
        let page = self
            .http()
            .get(&signin_url)
            .query(&service_params)
            .send()
            .await
            .map_err(Error::Transport)?
            .error_for_status()
            .map_err(Error::Transport)?
            .text()
            .await
            .map_err(Error::Transport)?;

        let csrf = extract_csrf(&page).ok_or_else(|| Error::LoginFailed {
            message: "no CSRF token in signin page".into(),
        })?;

        // Step 2: submit credentials for a service ticket.
        debug!("submitting credentials");
        let form = [
            ("username", credentials.email.as_str()),
            ("password", credentials.password.expose_secret()),
            ("embed", "false"),
            ("_csrf", csrf.as_str()),
        ];
        let resp = self
            .http()
            .post(&signin_url)
            .query(&service_params)
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        if !status.is_success() {
            return Err(Error::LoginFailed {
                message: format!("signin rejected (HTTP {status}): {body}"),
            });
        }

        let ticket = extract_ticket(&body).ok_or_else(|| Error::LoginFailed {
            message: "no service ticket in signin response (wrong credentials or account locked)"
                .into(),
        })?;

        // Step 3: exchange the ticket for OAuth2 token material.
        debug!("exchanging service ticket");
        let exchange_url = format!(
            "{}/oauth-service/oauth/exchange/user/2.0",
            self.api_base()
        );
        let resp = self
            .http()
            .post(&exchange_url)
            .form(&[("ticket", ticket.as_str())])
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::LoginFailed {
                message: format!("ticket exchange rejected (HTTP {status}): {body}"),
            });
        }

        let raw: OAuthExchange = resp.json().await.map_err(Error::Transport)?;
        Ok(raw.into())
    }

    /// Run the two profile sub-fetches and install the combined profile.
    async fn install_profile(&mut self) -> Result<(), Error> {
        let social: SocialProfile = self.get_json(paths::SOCIAL_PROFILE, &[]).await?;
        let settings: UserSettings = self.get_json(paths::USER_SETTINGS, &[]).await?;

        self.set_profile(Profile {
            display_name: social.display_name,
            full_name: social.full_name,
            unit_system: settings.user_data.measurement_system,
        });
        Ok(())
    }
}

// ── Page scraping helpers ────────────────────────────────────────────

/// Extract the `_csrf` hidden-input value from the signin page.
fn extract_csrf(page: &str) -> Option<String> {
    let marker = "name=\"_csrf\"";
    let after = &page[page.find(marker)? + marker.len()..];
    let value_marker = "value=\"";
    let start = after.find(value_marker)? + value_marker.len();
    let rest = &after[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

/// Extract the service ticket (`ticket=ST-...`) from the signin response.
fn extract_ticket(body: &str) -> Option<String> {
    let marker = "ticket=";
    let start = body.find(marker)? + marker.len();
    let rest = &body[start..];
    let end = rest
        .find(|c: char| c == '"' || c == '\'' || c == '&' || c == '\\')
        .unwrap_or(rest.len());
    let ticket = &rest[..end];
    if ticket.is_empty() {
        None
    } else {
        Some(ticket.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_extraction() {
        let page = r#"<input type="hidden" name="_csrf" value="abc123XYZ" />"#;
        assert_eq!(extract_csrf(page).as_deref(), Some("abc123XYZ"));
    }

    #[test]
    fn csrf_extraction_missing() {
        assert_eq!(extract_csrf("<html><body>nope</body></html>"), None);
    }

    #[test]
    fn ticket_extraction() {
        let body = r#"var response_url = "https://sso.garmin.com/sso/embed?ticket=ST-012345-abcdef-cas";"#;
        assert_eq!(
            extract_ticket(body).as_deref(),
            Some("ST-012345-abcdef-cas")
        );
    }

    #[test]
    fn ticket_extraction_empty() {
        assert_eq!(extract_ticket(r#"embed?ticket=""#), None);
        assert_eq!(extract_ticket("no ticket here"), None);
    }

    #[test]
    fn token_bundle_expiry() {
        let fresh = TokenBundle {
            access_token: "a".into(),
            refresh_token: "r".into(),
            token_type: "Bearer".into(),
            expires_at: Utc::now().timestamp() + 3600,
        };
        assert!(!fresh.is_expired());

        let stale = TokenBundle {
            expires_at: Utc::now().timestamp() - 1,
            ..fresh
        };
        assert!(stale.is_expired());
    }

    #[test]
    fn token_bundle_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bundle = TokenBundle {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            token_type: "Bearer".into(),
            expires_at: 4_102_444_800,
        };
        bundle.save(dir.path()).expect("save");

        let loaded = TokenBundle::load(dir.path()).expect("load");
        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.refresh_token, "refresh");
        assert_eq!(loaded.expires_at, 4_102_444_800);
    }

    #[test]
    fn missing_bundle_is_session_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = TokenBundle::load(dir.path());
        assert!(matches!(result, Err(Error::SessionInvalid { .. })));
    }

    #[test]
    fn malformed_bundle_is_session_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(TOKEN_FILE), "{not json").expect("write");
        let result = TokenBundle::load(dir.path());
        assert!(matches!(result, Err(Error::SessionInvalid { .. })));
    }
}
