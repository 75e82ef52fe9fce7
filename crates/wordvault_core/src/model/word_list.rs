//! Word lists and tags, the per-user grouping records.
//!
//! # Responsibility
//! - Define the list and tag records plus their field validators.
//! - Normalize optional list descriptions on the write path.
//!
//! # Invariants
//! - List titles are unique per owner; tag names are unique per owner.
//! - Both records die with their owning user.

use crate::model::user::UserId;
use crate::model::{validate_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a word list.
pub type WordListId = Uuid;

/// Stable identifier for a tag.
pub type TagId = Uuid;

const TITLE_MAX_CHARS: usize = 120;
const TAG_NAME_MAX_CHARS: usize = 20;
const DESCRIPTION_MAX_CHARS: usize = 2048;

/// Named collection of words owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub id: WordListId,
    pub user_id: UserId,
    /// Unique per owner.
    pub title: String,
    pub description: Option<String>,
    /// Epoch ms creation timestamp.
    pub date_created: i64,
    /// Epoch ms timestamp of the last metadata change.
    pub date_updated: i64,
    /// Epoch ms timestamp of the last open, `None` until first opened.
    pub date_last_opened: Option<i64>,
}

/// Free-form label owned by one user, attachable to many words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub user_id: UserId,
    /// Unique per owner.
    pub name: String,
}

/// Validated list input before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWordList {
    pub title: String,
    pub description: Option<String>,
}

impl NewWordList {
    /// Validates the title and normalizes a blank description to `None`.
    pub fn parse(title: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        validate_text("title", title, TITLE_MAX_CHARS)?;
        let description = match description.map(str::trim) {
            None | Some("") => None,
            Some(text) => {
                validate_text("description", text, DESCRIPTION_MAX_CHARS)?;
                Some(text.to_string())
            }
        };
        Ok(Self {
            title: title.trim().to_string(),
            description,
        })
    }
}

/// Checks and trims a tag name.
pub fn parse_tag_name(name: &str) -> Result<String, ValidationError> {
    validate_text("tag name", name, TAG_NAME_MAX_CHARS)?;
    Ok(name.trim().to_string())
}
