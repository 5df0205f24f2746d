//! REST client for the Studyshare backend
//!
//! [`ApiClient`] is the only component that talks to the backend. Every
//! request is built by one private builder that takes the current session
//! as an explicit argument and applies [`auth_headers`], so the credential
//! policy holds for every call site:
//!
//! - session present: `Authorization: Bearer <token>`
//! - no session: no `Authorization` header
//!
//! Any transport failure or non-2xx status is returned as an error. The
//! client does not retry, back off, cache, or deduplicate.
//!
//! # Module Layout
//!
//! - [`forms`] -- multipart bodies for profile pictures and upload files

pub mod forms;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Result, StudyshareError};
use crate::models::{
    Confirmation, Credentials, NewUpload, ProfileUpdate, Registration, Session, Upload,
    UploadEdit,
};

/// Headers that carry the session credential.
///
/// Returns an empty map when `session` is `None`.
///
/// # Errors
///
/// Returns [`StudyshareError::InvalidSession`] if the token is empty or
/// cannot be sent as a header value.
///
/// # Examples
///
/// ```
/// use studyshare::api::auth_headers;
/// use studyshare::models::Session;
///
/// let session = Session {
///     id: "u1".to_string(),
///     display_name: String::new(),
///     group: String::new(),
///     year: String::new(),
///     profile_pic_url: None,
///     token: "t1".to_string(),
/// };
///
/// let headers = auth_headers(Some(&session)).unwrap();
/// assert_eq!(headers["authorization"], "Bearer t1");
/// assert!(auth_headers(None).unwrap().is_empty());
/// ```
pub fn auth_headers(session: Option<&Session>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(session) = session {
        session.validate()?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", session.token)).map_err(|_| {
            StudyshareError::InvalidSession(
                "token contains characters that are not allowed in a header".to_string(),
            )
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// HTTP gateway to the backend, rooted at a fixed base address.
///
/// Cloning is cheap and clones share one connection pool. Concurrent calls
/// are independent of each other.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Construct a client for `config.base_url`.
    ///
    /// No network I/O is performed at construction time.
    ///
    /// # Errors
    ///
    /// Returns [`StudyshareError::Config`] if the base URL cannot be parsed
    /// or cannot carry a path, or if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            StudyshareError::Config(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StudyshareError::Config(format!(
                "API base URL '{}' cannot carry a path",
                config.base_url
            ))
            .into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| StudyshareError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// `POST /auth/register`
    pub async fn register(
        &self,
        session: Option<&Session>,
        registration: &Registration,
    ) -> Result<Session> {
        let req = self
            .request(Method::POST, &["auth", "register"], session)?
            .json(registration);
        let created: Session = self.send_json(req, "register").await?;
        created.validate()?;
        Ok(created)
    }

    /// `POST /auth/login`
    pub async fn login(
        &self,
        session: Option<&Session>,
        credentials: &Credentials,
    ) -> Result<Session> {
        let req = self
            .request(Method::POST, &["auth", "login"], session)?
            .json(credentials);
        let created: Session = self.send_json(req, "login").await?;
        created.validate()?;
        Ok(created)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// `PUT /users/profile`
    ///
    /// Sends JSON, or multipart when a profile picture is attached. Returns
    /// the replacement session.
    pub async fn update_profile(
        &self,
        session: Option<&Session>,
        update: &ProfileUpdate,
    ) -> Result<Session> {
        let req = self.request(Method::PUT, &["users", "profile"], session)?;
        let req = if update.profile_pic.is_some() {
            req.multipart(forms::profile_form(update).await?)
        } else {
            req.json(update)
        };
        let updated: Session = self.send_json(req, "update profile").await?;
        updated.validate()?;
        Ok(updated)
    }

    /// `GET /users/my-uploads`
    pub async fn my_uploads(&self, session: Option<&Session>) -> Result<Vec<Upload>> {
        let req = self.request(Method::GET, &["users", "my-uploads"], session)?;
        self.send_json(req, "list my uploads").await
    }

    /// `POST /users/save/:id`
    pub async fn save_upload(&self, session: Option<&Session>, id: &str) -> Result<Confirmation> {
        let req = self.request(Method::POST, &["users", "save", id], session)?;
        self.send_confirmation(req, "save upload").await
    }

    /// `DELETE /users/save/:id`
    pub async fn unsave_upload(&self, session: Option<&Session>, id: &str) -> Result<Confirmation> {
        let req = self.request(Method::DELETE, &["users", "save", id], session)?;
        self.send_confirmation(req, "unsave upload").await
    }

    /// `GET /users/saved`
    pub async fn saved_uploads(&self, session: Option<&Session>) -> Result<Vec<Upload>> {
        let req = self.request(Method::GET, &["users", "saved"], session)?;
        self.send_json(req, "list saved uploads").await
    }

    // -----------------------------------------------------------------------
    // Uploads
    // -----------------------------------------------------------------------

    /// `GET /uploads`
    pub async fn list_uploads(&self, session: Option<&Session>) -> Result<Vec<Upload>> {
        let req = self.request(Method::GET, &["uploads"], session)?;
        self.send_json(req, "list uploads").await
    }

    /// `POST /uploads` (multipart, file in the `file` part)
    pub async fn create_upload(
        &self,
        session: Option<&Session>,
        upload: &NewUpload,
    ) -> Result<Upload> {
        let form = forms::upload_form(upload).await?;
        let req = self.request(Method::POST, &["uploads"], session)?.multipart(form);
        self.send_json(req, "create upload").await
    }

    /// `GET /uploads/:id`
    pub async fn get_upload(&self, session: Option<&Session>, id: &str) -> Result<Upload> {
        let req = self.request(Method::GET, &["uploads", id], session)?;
        self.send_json(req, "get upload").await
    }

    /// `PUT /uploads/:id`
    ///
    /// The body is exactly the four mutable fields of [`UploadEdit`].
    pub async fn update_upload(
        &self,
        session: Option<&Session>,
        id: &str,
        edit: &UploadEdit,
    ) -> Result<Upload> {
        let req = self.request(Method::PUT, &["uploads", id], session)?.json(edit);
        self.send_json(req, "update upload").await
    }

    /// `DELETE /uploads/:id`
    pub async fn delete_upload(&self, session: Option<&Session>, id: &str) -> Result<Confirmation> {
        let req = self.request(Method::DELETE, &["uploads", id], session)?;
        self.send_confirmation(req, "delete upload").await
    }

    /// `POST /uploads/:id/download`
    pub async fn track_download(
        &self,
        session: Option<&Session>,
        id: &str,
    ) -> Result<Confirmation> {
        let req = self.request(Method::POST, &["uploads", id, "download"], session)?;
        self.send_confirmation(req, "track download").await
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    /// Resolve `segments` against the base URL. Each segment is
    /// percent-encoded, so ids cannot escape their path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StudyshareError::Config("API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// The single request builder. All operations go through here.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        session: Option<&Session>,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(
            method = %method,
            url = %url,
            authenticated = session.is_some(),
            "Sending request"
        );
        Ok(self.http.request(method, url).headers(auth_headers(session)?))
    }

    /// Send and return the status and body text of a successful response.
    async fn execute(&self, req: RequestBuilder, what: &str) -> Result<String> {
        let response = req.send().await.map_err(|e| {
            tracing::debug!("{} request failed: {}", what, e);
            StudyshareError::Transport(format!("{} request failed: {}", what, e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            StudyshareError::Transport(format!("failed to read {} response body: {}", what, e))
        })?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::debug!("{} returned {}: {}", what, status, message);
            return Err(StudyshareError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::debug!("{} succeeded with {}", what, status);
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T> {
        let body = self.execute(req, what).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Failed to parse {} response: {}", what, e);
            anyhow::Error::new(StudyshareError::Serialization(e))
                .context(format!("unexpected {} response from server", what))
        })
    }

    async fn send_confirmation(&self, req: RequestBuilder, what: &str) -> Result<Confirmation> {
        let body = self.execute(req, what).await?;
        Ok(parse_confirmation(&body))
    }
}

/// Confirmation from a success body: empty, JSON with `message`, or plain text.
fn parse_confirmation(body: &str) -> Confirmation {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Confirmation::default();
    }
    match serde_json::from_str::<Confirmation>(trimmed) {
        Ok(confirmation) => confirmation,
        Err(_) => Confirmation {
            message: Some(trimmed.to_string()),
        },
    }
}

/// Human-readable message for a non-success response.
///
/// Prefers a JSON `message` or `error` string, then the raw body, then the
/// status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
