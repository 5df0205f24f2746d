//! Multipart bodies for the two endpoints that accept files
//!
//! Profile pictures go in the `profilePic` part and upload attachments in
//! the `file` part; every other field is a text part with the backend's
//! camelCase name.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::{Result, StudyshareError};
use crate::models::{NewUpload, ProfileUpdate};

/// Multipart form for `PUT /users/profile`.
///
/// The picture part is added only when `update.profile_pic` is set.
pub async fn profile_form(update: &ProfileUpdate) -> Result<Form> {
    let mut form = Form::new()
        .text("displayName", update.display_name.clone())
        .text("group", update.group.clone())
        .text("year", update.year.clone());

    if let Some(path) = &update.profile_pic {
        form = form.part("profilePic", file_part(path).await?);
    }
    Ok(form)
}

/// Multipart form for `POST /uploads`.
pub async fn upload_form(upload: &NewUpload) -> Result<Form> {
    Ok(Form::new()
        .text("subject", upload.subject.clone())
        .text("group", upload.group.clone())
        .text("year", upload.year.clone())
        .text("semester", upload.semester.clone())
        .part("file", file_part(&upload.file).await?))
}

async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        StudyshareError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    tracing::debug!("Attaching {} ({} bytes)", file_name, bytes.len());
    let part = Part::bytes(bytes).file_name(file_name);
    match mime_for(path) {
        Some(mime) => Ok(part.mime_str(mime)?),
        None => Ok(part),
    }
}

/// Content type for common course-material extensions.
fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for(Path::new("notes/week1.PDF")), Some("application/pdf"));
        assert_eq!(mime_for(Path::new("board.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("archive.zip")), None);
        assert_eq!(mime_for(Path::new("README")), None);
    }

    #[tokio::test]
    async fn test_upload_form_missing_file_is_invalid_input() {
        let upload = NewUpload {
            subject: "Physics".to_string(),
            group: "MPC".to_string(),
            year: "1st".to_string(),
            semester: "1".to_string(),
            file: PathBuf::from("/definitely/not/here.png"),
        };
        let err = upload_form(&upload).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyshareError>(),
            Some(StudyshareError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_profile_form_without_picture_needs_no_file() {
        let update = ProfileUpdate {
            display_name: "Asha".to_string(),
            group: "CSE".to_string(),
            year: "2nd".to_string(),
            profile_pic: None,
        };
        assert!(profile_form(&update).await.is_ok());
    }
}
