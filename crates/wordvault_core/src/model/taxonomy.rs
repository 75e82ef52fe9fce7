//! Shared vocabulary taxonomy.
//!
//! # Responsibility
//! - Define the part-of-speech and knowledge-level reference records.
//! - Validate taxonomy fields on the write path.
//!
//! # Invariants
//! - Taxonomy rows are shared across all users; nothing here is per-user.
//! - Deleting a taxonomy row detaches it from words instead of deleting them.

use crate::model::{validate_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a part of speech.
pub type PartOfSpeechId = Uuid;

/// Stable identifier for a knowledge level.
pub type KnowledgeLevelId = Uuid;

const SHORT_NAME_MAX_CHARS: usize = 10;
const NAME_MAX_CHARS: usize = 20;
const DESCRIPTION_MAX_CHARS: usize = 2048;

/// Grammatical category a word can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartOfSpeech {
    pub id: PartOfSpeechId,
    /// Abbreviation shown inline, e.g. `n.` or `v.`, unique store-wide.
    pub short_name: String,
    /// Full label, unique store-wide.
    pub name: String,
    pub description: String,
}

/// Self-assessed familiarity bucket for a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeLevel {
    pub id: KnowledgeLevelId,
    /// Label, unique store-wide.
    pub name: String,
    pub description: String,
}

/// Validated part-of-speech input before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPartOfSpeech {
    pub short_name: String,
    pub name: String,
    pub description: String,
}

impl NewPartOfSpeech {
    pub fn parse(
        short_name: &str,
        name: &str,
        description: &str,
    ) -> Result<Self, ValidationError> {
        validate_text("short name", short_name, SHORT_NAME_MAX_CHARS)?;
        validate_text("name", name, NAME_MAX_CHARS)?;
        validate_text("description", description, DESCRIPTION_MAX_CHARS)?;
        Ok(Self {
            short_name: short_name.trim().to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        })
    }
}

/// Validated knowledge-level input before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKnowledgeLevel {
    pub name: String,
    pub description: String,
}

impl NewKnowledgeLevel {
    pub fn parse(name: &str, description: &str) -> Result<Self, ValidationError> {
        validate_text("name", name, NAME_MAX_CHARS)?;
        validate_text("description", description, DESCRIPTION_MAX_CHARS)?;
        Ok(Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        })
    }
}
