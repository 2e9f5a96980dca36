use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single post as served by `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// Display name only, not a user id.
    #[serde(default)]
    pub author: String,
    #[serde(rename = "img", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// True once the post has been updated after creation.
    pub fn was_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Sort posts by `created_at`, newest first.
///
/// The sort is stable: posts sharing a timestamp keep the order the server
/// returned them in.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Input validation failures caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and content are required")]
    MissingTitleOrContent,

    #[error("Nothing to update")]
    EmptyPatch,

    #[error("Please fill in all fields")]
    MissingCredentials,
}

/// New post form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Local file uploaded as the `img` multipart field.
    pub image: Option<PathBuf>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ValidationError::MissingTitleOrContent);
        }
        Ok(())
    }
}

/// Partial update sent as `PATCH /posts/:id`. Only title and content are
/// editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_none() && self.content.is_none() {
            return Err(ValidationError::EmptyPatch);
        }
        let blank = |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
        if blank(&self.title) || blank(&self.content) {
            return Err(ValidationError::MissingTitleOrContent);
        }
        Ok(())
    }
}
