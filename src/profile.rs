//! Transient profile edits
//!
//! A [`ProfileDraft`] mirrors the editable part of the session while the
//! user changes it. It is turned into a [`ProfileUpdate`] on save and then
//! dropped; the server's response becomes the new session.

use std::path::PathBuf;

use crate::error::{Result, StudyshareError};
use crate::models::{ProfileUpdate, Session, Year};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub display_name: String,
    pub group: String,
    pub year: String,
    pub profile_pic: Option<PathBuf>,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            group: String::new(),
            year: Year::default().to_string(),
            profile_pic: None,
        }
    }
}

impl ProfileDraft {
    /// Start a draft from the current session, or blank when there is none.
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => Self {
                display_name: session.display_name.clone(),
                group: session.group.clone(),
                year: if session.year.is_empty() {
                    Year::default().to_string()
                } else {
                    session.year.clone()
                },
                profile_pic: None,
            },
            None => Self::default(),
        }
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        if let Some(value) = display_name {
            self.display_name = value;
        }
        self
    }

    pub fn with_group(mut self, group: Option<String>) -> Self {
        if let Some(value) = group {
            self.group = value;
        }
        self
    }

    pub fn with_year(mut self, year: Option<Year>) -> Self {
        if let Some(value) = year {
            self.year = value.to_string();
        }
        self
    }

    pub fn with_picture(mut self, picture: Option<PathBuf>) -> Self {
        if picture.is_some() {
            self.profile_pic = picture;
        }
        self
    }

    /// Whether saving the draft would change anything.
    pub fn differs_from(&self, session: &Session) -> bool {
        self.profile_pic.is_some()
            || self.display_name != session.display_name
            || self.group != session.group
            || self.year != session.year
    }

    /// Consume the draft into the request body.
    ///
    /// # Errors
    ///
    /// Display name and group are required, as in the web forms.
    pub fn into_update(self) -> Result<ProfileUpdate> {
        if self.display_name.trim().is_empty() {
            return Err(StudyshareError::InvalidInput("display name is required".into()).into());
        }
        if self.group.trim().is_empty() {
            return Err(StudyshareError::InvalidInput("group is required".into()).into());
        }
        Ok(ProfileUpdate {
            display_name: self.display_name.trim().to_string(),
            group: self.group.trim().to_string(),
            year: self.year,
            profile_pic: self.profile_pic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            id: "u1".to_string(),
            display_name: "Asha".to_string(),
            group: "CSE".to_string(),
            year: "2nd".to_string(),
            profile_pic_url: None,
            token: "t1".to_string(),
        }
    }

    #[test]
    fn test_blank_draft_defaults_to_first_year() {
        let draft = ProfileDraft::from_session(None);
        assert_eq!(draft.year, "1st");
        assert!(draft.display_name.is_empty());
    }

    #[test]
    fn test_draft_mirrors_session() {
        let draft = ProfileDraft::from_session(Some(&session()));
        assert_eq!(draft.display_name, "Asha");
        assert_eq!(draft.group, "CSE");
        assert_eq!(draft.year, "2nd");
        assert!(!draft.differs_from(&session()));
    }

    #[test]
    fn test_overrides_only_apply_when_given() {
        let draft = ProfileDraft::from_session(Some(&session()))
            .with_display_name(None)
            .with_group(Some("ECE".to_string()))
            .with_year(Some(Year::Third));
        assert_eq!(draft.display_name, "Asha");
        assert_eq!(draft.group, "ECE");
        assert_eq!(draft.year, "3rd");
        assert!(draft.differs_from(&session()));
    }

    #[test]
    fn test_into_update_requires_name_and_group() {
        let err = ProfileDraft::default()
            .with_group(Some("CSE".to_string()))
            .into_update()
            .unwrap_err();
        assert!(err.to_string().contains("display name is required"));

        let err = ProfileDraft::default()
            .with_display_name(Some("Asha".to_string()))
            .into_update()
            .unwrap_err();
        assert!(err.to_string().contains("group is required"));
    }

    #[test]
    fn test_into_update_carries_picture() {
        let update = ProfileDraft::from_session(Some(&session()))
            .with_picture(Some(PathBuf::from("me.png")))
            .into_update()
            .unwrap();
        assert_eq!(update.profile_pic, Some(PathBuf::from("me.png")));
        assert_eq!(update.display_name, "Asha");
    }
}
