use thiserror::Error;

/// Top-level error type for the `gconnect-api` crate.
///
/// Covers every failure mode across the client: argument validation,
/// the authentication lifecycle, rate limiting, transport, and payload
/// decoding. Upstream error bodies are carried verbatim so callers can
/// diagnose what Garmin actually returned.
#[derive(Debug, Error)]
pub enum Error {
    // ── Validation ──────────────────────────────────────────────────
    /// Bad caller input, caught before any network call.
    #[error("Invalid argument: {message}")]
    Validation { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The SSO credential handshake was rejected.
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    /// A stored token bundle is absent, malformed, or rejected upstream.
    /// Credential login is never attempted automatically -- that fallback
    /// belongs to the caller.
    #[error("Stored session is invalid: {message}")]
    SessionInvalid { message: String },

    /// The session was valid once but the service now rejects it.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// Authentication succeeded but one of the profile sub-fetches
    /// failed. The client never keeps a half-populated profile.
    #[error("Profile fetch failed after login: {message}")]
    ProfileFetchFailed { message: String },

    /// The daily summary is privacy-protected for this profile.
    #[error("Requested data is privacy-protected")]
    PrivacyProtected,

    /// A request was issued before `login`/`resume` completed.
    #[error("Not logged in -- call login() or resume() first")]
    NotAuthenticated,

    // ── Rate limiting ───────────────────────────────────────────────
    /// HTTP 429 from Garmin Connect, with the Retry-After hint if sent.
    #[error("Rate limited by Garmin Connect")]
    RateLimited { retry_after_secs: Option<u64> },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Any other non-2xx response, with the raw body preserved.
    #[error("Garmin Connect API error (HTTP {status})")]
    Api { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Token store ─────────────────────────────────────────────────
    /// Reading or writing the on-disk token bundle failed.
    #[error("Token store error: {message}")]
    TokenStore { message: String },
}

impl Error {
    /// Returns `true` for the auth-lifecycle failures that a caller can
    /// resolve by falling back to credential login (the pattern the demo
    /// CLI uses: try `resume`, on auth error `login` + `persist`).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::LoginFailed { .. }
                | Self::SessionInvalid { .. }
                | Self::SessionExpired
                | Self::NotAuthenticated
        )
    }

    /// Returns `true` if this is a transient error worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }
}
