//! Wire types shared by the API client, the session store, and the commands
//!
//! The backend speaks camelCase JSON and names identifiers `_id`; both the
//! canonical and the backend spelling are accepted on input, also when a
//! document carries both. Inbound documents go through private `*Wire`
//! structs that resolve such duplicates before the public type is built.

use crate::error::{Result, StudyshareError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// The authenticated user's identity and bearer credential.
///
/// # Examples
///
/// ```
/// use studyshare::models::Session;
///
/// let session: Session = serde_json::from_str(
///     r#"{"_id":"u1","displayName":"Asha","group":"CSE","year":"2nd","token":"t1"}"#,
/// )
/// .unwrap();
/// assert_eq!(session.id, "u1");
/// assert!(session.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionWire")]
pub struct Session {
    pub id: String,
    pub display_name: String,
    pub group: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
    pub token: String,
}

/// Inbound session document. `id` wins over `_id`, `profilePicUrl` over
/// `profilePic`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    group: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    profile_pic_url: Option<String>,
    #[serde(default)]
    profile_pic: Option<String>,
    token: String,
}

impl TryFrom<SessionWire> for Session {
    type Error = String;

    fn try_from(wire: SessionWire) -> std::result::Result<Self, Self::Error> {
        let id = wire
            .id
            .or(wire.mongo_id)
            .ok_or_else(|| "missing field `id` or `_id`".to_string())?;
        Ok(Self {
            id,
            display_name: wire.display_name,
            group: wire.group,
            year: wire.year,
            profile_pic_url: wire.profile_pic_url.or(wire.profile_pic),
            token: wire.token,
        })
    }
}

impl Session {
    /// Checks the non-empty token invariant.
    ///
    /// # Errors
    ///
    /// Returns [`StudyshareError::InvalidSession`] when the token is empty
    /// or only whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(StudyshareError::InvalidSession(format!(
                "session for user '{}' has an empty token",
                self.id
            ))
            .into());
        }
        Ok(())
    }
}

// The token never reaches logs through Debug.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("group", &self.group)
            .field("year", &self.year)
            .field("profile_pic_url", &self.profile_pic_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A shared course file with its descriptive metadata.
///
/// Fields the client does not model are preserved in `extra` so that a
/// fetched upload can be shown in full, but they are never sent back.
///
/// The owner may arrive as an id string or as a populated user document;
/// a document is kept in `extra["owner"]` and its id lands in `owner_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UploadWire")]
pub struct Upload {
    pub id: String,
    pub subject: String,
    pub group: String,
    pub year: String,
    pub semester: String,
    pub file_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_by_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Inbound upload document.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    group: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    semester: String,
    #[serde(default)]
    file_ref: Option<String>,
    #[serde(default)]
    file_url: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    owner_id: Option<String>,
    #[serde(default)]
    owner: Option<Value>,
    #[serde(default)]
    saved_by_count: Option<u64>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<UploadWire> for Upload {
    type Error = String;

    fn try_from(wire: UploadWire) -> std::result::Result<Self, Self::Error> {
        let id = wire
            .id
            .or(wire.mongo_id)
            .ok_or_else(|| "missing field `id` or `_id`".to_string())?;

        let mut extra = wire.extra;
        let owner_from_field = match wire.owner {
            Some(Value::String(owner)) => Some(owner),
            Some(owner) => {
                let nested = ["_id", "id"]
                    .iter()
                    .find_map(|key| owner.get(key).and_then(Value::as_str))
                    .map(str::to_string);
                extra.insert("owner".to_string(), owner);
                nested
            }
            None => None,
        };

        Ok(Self {
            id,
            subject: wire.subject,
            group: wire.group,
            year: wire.year,
            semester: wire.semester,
            file_ref: wire
                .file_ref
                .or(wire.file_url)
                .or(wire.image_url)
                .unwrap_or_default(),
            owner_id: wire.owner_id.or(owner_from_field),
            saved_by_count: wire.saved_by_count,
            created_at: wire.created_at,
            extra,
        })
    }
}

impl Upload {
    /// Case-insensitive match of `term` against subject, group, year, and semester.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.subject, &self.group, &self.year, &self.semester]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// The mutable subset of an [`Upload`]. Edits submit exactly these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEdit {
    pub subject: String,
    pub group: String,
    pub year: String,
    pub semester: String,
}

impl From<&Upload> for UploadEdit {
    fn from(upload: &Upload) -> Self {
        Self {
            subject: upload.subject.clone(),
            group: upload.group.clone(),
            year: upload.year.clone(),
            semester: upload.semester.clone(),
        }
    }
}

/// A new upload: descriptive fields plus the file to attach.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub subject: String,
    pub group: String,
    pub year: String,
    pub semester: String,
    pub file: PathBuf,
}

/// Login credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credentials plus the initial profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub display_name: String,
    pub group: String,
    pub year: String,
}

/// Profile fields sent to `PUT /users/profile`.
///
/// Sent as JSON, or as multipart when a picture is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: String,
    pub group: String,
    pub year: String,
    #[serde(skip)]
    pub profile_pic: Option<PathBuf>,
}

/// Body of a success response that carries no entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub message: Option<String>,
}

/// Academic year accepted by the profile and upload forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Year {
    #[default]
    #[value(name = "1st")]
    First,
    #[value(name = "2nd")]
    Second,
    #[value(name = "3rd")]
    Third,
}

impl Year {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_session() -> Session {
        Session {
            id: "u1".to_string(),
            display_name: "Asha".to_string(),
            group: "CSE".to_string(),
            year: "2nd".to_string(),
            profile_pic_url: Some("https://cdn.example.edu/u1.png".to_string()),
            token: "t1".to_string(),
        }
    }

    #[test]
    fn test_session_accepts_backend_field_names() {
        let session: Session = serde_json::from_value(json!({
            "_id": "u1",
            "displayName": "Asha",
            "group": "CSE",
            "year": "2nd",
            "profilePic": "https://cdn.example.edu/u1.png",
            "token": "t1"
        }))
        .unwrap();
        assert_eq!(session, sample_session());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let value = serde_json::to_value(sample_session()).unwrap();
        assert_eq!(value["displayName"], "Asha");
        assert_eq!(value["profilePicUrl"], "https://cdn.example.edu/u1.png");
        assert!(value.get("display_name").is_none());
    }

    #[test]
    fn test_session_validate_rejects_blank_token() {
        let mut session = sample_session();
        session.token = "   ".to_string();
        let err = session.validate().unwrap_err();
        assert!(err.to_string().contains("empty token"));
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let rendered = format!("{:?}", sample_session());
        assert!(!rendered.contains("t1\""));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_upload_keeps_unknown_fields() {
        let upload: Upload = serde_json::from_value(json!({
            "_id": "x1",
            "subject": "Physics",
            "group": "MPC",
            "year": "1st",
            "semester": "2",
            "imageUrl": "https://cdn.example.edu/x1.jpg",
            "downloads": 7,
            "createdAt": "2024-02-01T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(upload.id, "x1");
        assert_eq!(upload.file_ref, "https://cdn.example.edu/x1.jpg");
        assert_eq!(upload.extra.get("downloads"), Some(&json!(7)));
        assert!(upload.created_at.is_some());
    }

    #[test]
    fn test_session_accepts_both_id_spellings_at_once() {
        let session: Session = serde_json::from_value(json!({
            "_id": "u1",
            "id": "u1",
            "profilePic": "https://cdn.example.edu/old.png",
            "profilePicUrl": "https://cdn.example.edu/u1.png",
            "token": "t1"
        }))
        .unwrap();
        assert_eq!(session.id, "u1");
        assert_eq!(
            session.profile_pic_url.as_deref(),
            Some("https://cdn.example.edu/u1.png")
        );
    }

    #[test]
    fn test_session_without_any_id_is_rejected() {
        let result = serde_json::from_value::<Session>(json!({"token": "t1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_session_round_trips_through_its_own_blob() {
        let blob = serde_json::to_string(&sample_session()).unwrap();
        let back: Session = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, sample_session());
    }

    #[test]
    fn test_upload_with_virtual_id_and_populated_owner() {
        let upload: Upload = serde_json::from_value(json!({
            "_id": "x1",
            "id": "x1",
            "subject": "Physics",
            "fileUrl": "https://cdn.example.edu/x1.pdf",
            "imageUrl": "https://cdn.example.edu/x1.jpg",
            "owner": {"_id": "u1", "displayName": "Asha"}
        }))
        .unwrap();
        assert_eq!(upload.id, "x1");
        assert_eq!(upload.file_ref, "https://cdn.example.edu/x1.pdf");
        assert_eq!(upload.owner_id.as_deref(), Some("u1"));
        assert_eq!(upload.extra["owner"]["displayName"], "Asha");
    }

    #[test]
    fn test_upload_owner_as_plain_id() {
        let upload: Upload =
            serde_json::from_value(json!({"_id": "x1", "owner": "u7"})).unwrap();
        assert_eq!(upload.owner_id.as_deref(), Some("u7"));
        assert!(upload.extra.get("owner").is_none());
    }

    #[test]
    fn test_upload_edit_takes_only_mutable_fields() {
        let mut upload: Upload = serde_json::from_value(json!({
            "_id": "x1", "subject": "Physics", "group": "MPC", "year": "1st",
            "semester": "2", "fileRef": "f", "ownerId": "u9", "savedByCount": 3
        }))
        .unwrap();
        upload.extra.insert("likes".to_string(), json!(12));

        let value = serde_json::to_value(UploadEdit::from(&upload)).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(
            value,
            json!({"subject": "Physics", "group": "MPC", "year": "1st", "semester": "2"})
        );
    }

    #[test]
    fn test_upload_matches_search_term() {
        let upload: Upload = serde_json::from_value(json!({
            "_id": "x1", "subject": "Organic Chemistry", "group": "BiPC",
            "year": "2nd", "semester": "3"
        }))
        .unwrap();
        assert!(upload.matches("chem"));
        assert!(upload.matches("bipc"));
        assert!(upload.matches(""));
        assert!(!upload.matches("physics"));
    }

    #[test]
    fn test_registration_flattens_credentials() {
        let registration = Registration {
            credentials: Credentials {
                email: "asha@example.edu".to_string(),
                password: "hunter2".to_string(),
            },
            display_name: "Asha".to_string(),
            group: "CSE".to_string(),
            year: Year::Second.to_string(),
        };
        let value = serde_json::to_value(&registration).unwrap();
        assert_eq!(value["email"], "asha@example.edu");
        assert_eq!(value["displayName"], "Asha");
        assert_eq!(value["year"], "2nd");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            email: "asha@example.edu".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }

    #[test]
    fn test_profile_update_json_skips_picture() {
        let update = ProfileUpdate {
            display_name: "Asha".to_string(),
            group: "CSE".to_string(),
            year: "3rd".to_string(),
            profile_pic: Some(PathBuf::from("/tmp/me.png")),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({"displayName": "Asha", "group": "CSE", "year": "3rd"})
        );
    }
}
