// Connect API HTTP client
//
// Wraps `reqwest::Client` with Garmin-specific URL construction, bearer
// auth, and status-to-error mapping. All endpoint wrappers (wellness,
// activities, devices, etc.) are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::TokenBundle;
use crate::endpoints::Region;
use crate::error::Error;
use crate::models::{Profile, UnitSystem};
use crate::transport::TransportConfig;

/// Authenticated client for the Garmin Connect web API.
///
/// Owns the session lifecycle (`login`, `resume`, `persist`, `logout` in
/// the `auth` module) and the single authenticated request channel every
/// endpoint wrapper goes through. Payloads are returned as parsed JSON
/// (`serde_json::Value`) unchanged; this client performs no computation
/// over the records it fetches.
///
/// `login`/`resume` take `&mut self` and must complete before the client
/// is shared; every endpoint method then takes `&self` and may be called
/// concurrently.
pub struct ConnectClient {
    http: reqwest::Client,
    region: Region,
    api_base: Url,
    sso_base: String,
    token: Option<TokenBundle>,
    profile: Option<Profile>,
}

impl ConnectClient {
    /// Create an unauthenticated client for the given region with the
    /// default transport settings.
    pub fn new(region: Region) -> Result<Self, Error> {
        Self::with_transport(region, &TransportConfig::default())
    }

    /// Create an unauthenticated client with explicit transport settings.
    pub fn with_transport(region: Region, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            region,
            api_base: Url::parse(region.api_base())?,
            sso_base: region.sso_base().to_owned(),
            token: None,
            profile: None,
        })
    }

    /// Create a client around an already-established session.
    ///
    /// Use this when you hold valid token material and profile fields
    /// from elsewhere (tests point this at a mock server).
    pub fn with_session(
        http: reqwest::Client,
        api_base: Url,
        token: TokenBundle,
        profile: Profile,
    ) -> Self {
        let sso_base = Region::default().sso_base().to_owned();
        Self {
            http,
            region: Region::default(),
            api_base,
            sso_base,
            token: Some(token),
            profile: Some(profile),
        }
    }

    /// The deployment region this client talks to.
    pub fn region(&self) -> Region {
        self.region
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The Connect API base URL, without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_base.as_str().trim_end_matches('/')
    }

    /// The SSO base URL, without a trailing slash.
    pub(crate) fn sso_base(&self) -> &str {
        &self.sso_base
    }

    // ── Session state ────────────────────────────────────────────────

    /// Profile fields fetched at login, if a session is established.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// The account's display name (also a URL segment on several endpoints).
    pub fn display_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.display_name.as_str())
    }

    /// The account's full name.
    pub fn full_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.full_name.as_str())
    }

    /// The account's measurement system.
    pub fn unit_system(&self) -> Option<UnitSystem> {
        self.profile.as_ref().map(|p| p.unit_system)
    }

    pub(crate) fn token(&self) -> Option<&TokenBundle> {
        self.token.as_ref()
    }

    pub(crate) fn set_token(&mut self, token: TokenBundle) {
        self.token = Some(token);
    }

    pub(crate) fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub(crate) fn clear_session(&mut self) {
        self.token = None;
        self.profile = None;
    }

    pub(crate) fn current_profile(&self) -> Result<&Profile, Error> {
        self.profile.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// The display name, or `NotAuthenticated` before login.
    pub(crate) fn require_display_name(&self) -> Result<&str, Error> {
        Ok(self.current_profile()?.display_name.as_str())
    }

    // ── URL building ─────────────────────────────────────────────────

    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.api_base.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");

        let mut builder = self.authed(self.http.get(url))?;
        if !params.is_empty() {
            builder = builder.query(params);
        }
        let resp = self.execute(builder).await?;
        Self::parse_json(resp).await
    }

    /// Send a GET request and return the raw body bytes.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Bytes, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url} (binary)");

        let builder = self.authed(self.http.get(url))?;
        let resp = self.execute(builder).await?;
        resp.bytes().await.map_err(Error::Transport)
    }

    /// Send a multipart POST (file upload) and parse the JSON body.
    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url} (multipart)");

        let builder = self.authed(self.http.post(url))?.multipart(form);
        let resp = self.execute(builder).await?;
        Self::parse_json_or_null(resp).await
    }

    /// Send a POST with an `x-http-method-override` header and no body.
    ///
    /// The gear-default toggle simulates PUT/DELETE this way.
    pub(crate) async fn post_with_override(
        &self,
        path: &str,
        method_override: &str,
    ) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url} (override {method_override})");

        let builder = self
            .authed(self.http.post(url))?
            .header("x-http-method-override", method_override);
        let resp = self.execute(builder).await?;
        Self::parse_json_or_null(resp).await
    }

    /// Repeatedly request a paged endpoint, accumulating elements until
    /// the service returns an empty (or absent) page.
    ///
    /// `start`/`limit` are appended to `base_params` on every request;
    /// the offset advances by `page_size` each round. Pages are fetched
    /// strictly sequentially and element order is preserved. No iteration
    /// cap is imposed -- termination relies on the upstream empty page,
    /// so callers needing a hard bound must wrap this call.
    pub(crate) async fn paged_get(
        &self,
        path: &str,
        base_params: &[(&str, String)],
        first_offset: usize,
        page_size: usize,
    ) -> Result<Vec<Value>, Error> {
        let mut results = Vec::new();
        let mut offset = first_offset;

        loop {
            let mut params = base_params.to_vec();
            params.push(("start", offset.to_string()));
            params.push(("limit", page_size.to_string()));

            debug!("requesting page at offset {offset}");
            let page: Option<Vec<Value>> = self.get_json(path, &params).await?;
            let page = page.unwrap_or_default();
            if page.is_empty() {
                break;
            }
            results.extend(page);
            offset += page_size;
        }

        Ok(results)
    }

    /// Attach the session's bearer token and Garmin's `NK` header.
    ///
    /// Fails with `NotAuthenticated` if no session has been established,
    /// so no endpoint wrapper can reach the network pre-login.
    fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let token = self.token.as_ref().ok_or(Error::NotAuthenticated)?;
        Ok(builder
            .header(header::AUTHORIZATION, token.bearer())
            .header("NK", "NT"))
    }

    /// Send the request and map upstream statuses to the error taxonomy:
    /// 401/403 -> `SessionExpired`, 429 -> `RateLimited`, any other
    /// non-2xx -> `Api` with the raw body preserved.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::SessionExpired);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(Error::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Like `parse_json`, but an empty body becomes `Value::Null`
    /// (the gear-default toggle replies with nothing on success).
    async fn parse_json_or_null(resp: reqwest::Response) -> Result<Value, Error> {
        let body = resp.text().await.map_err(Error::Transport)?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}

/// At most the first 200 bytes of `body`, cut back so the slice never
/// splits a multi-byte character.
fn body_preview(body: &str) -> &str {
    const PREVIEW_BYTES: usize = 200;
    let mut end = body.len().min(PREVIEW_BYTES);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
