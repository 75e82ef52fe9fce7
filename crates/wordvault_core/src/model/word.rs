//! Words and their owned children.
//!
//! # Responsibility
//! - Define the word, translation, definition and example records.
//! - Validate text fields on the write path.
//! - Render the one-line word summary used by listings.
//!
//! # Invariants
//! - Word text is unique across the whole store.
//! - Children are unique by text within their parent and die with it.

use crate::model::taxonomy::{KnowledgeLevelId, PartOfSpeechId};
use crate::model::user::UserId;
use crate::model::{validate_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a word.
pub type WordId = Uuid;

/// Stable identifier for a translation.
pub type TranslationId = Uuid;

/// Stable identifier for a definition.
pub type DefinitionId = Uuid;

/// Stable identifier for an example sentence.
pub type ExampleId = Uuid;

const WORD_TEXT_MAX_CHARS: usize = 255;
const TRANSCRIPTION_MAX_CHARS: usize = 255;
const CHILD_TEXT_MAX_CHARS: usize = 255;
const EXAMPLE_TEXT_MAX_CHARS: usize = 2048;

/// Vocabulary entry owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub user_id: UserId,
    /// Detached (not deleted) when the taxonomy row goes away.
    pub part_of_speech_id: Option<PartOfSpeechId>,
    pub knowledge_level_id: Option<KnowledgeLevelId>,
    /// Unique across the whole store.
    pub text: String,
    /// Optional phonetic transcription.
    pub transcription: Option<String>,
    /// Epoch ms creation timestamp.
    pub date_added: i64,
    /// Epoch ms timestamp of the last change to the word row.
    pub date_updated: i64,
}

/// Target-language rendering of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: TranslationId,
    pub word_id: WordId,
    pub text: String,
    /// Epoch ms creation timestamp.
    pub date_added: i64,
}

/// Meaning of a word, parent of example sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub id: DefinitionId,
    pub word_id: WordId,
    pub text: String,
    /// Epoch ms creation timestamp.
    pub date_added: i64,
}

/// Usage sentence attached to one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: ExampleId,
    pub definition_id: DefinitionId,
    pub text: String,
    /// Epoch ms creation timestamp.
    pub date_added: i64,
}

/// Validated word input before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWord {
    pub text: String,
    pub transcription: Option<String>,
}

impl NewWord {
    /// Validates the word text and normalizes a blank transcription to `None`.
    pub fn parse(text: &str, transcription: Option<&str>) -> Result<Self, ValidationError> {
        validate_text("word text", text, WORD_TEXT_MAX_CHARS)?;
        let transcription = match transcription.map(str::trim) {
            None | Some("") => None,
            Some(value) => {
                validate_text("transcription", value, TRANSCRIPTION_MAX_CHARS)?;
                Some(value.to_string())
            }
        };
        Ok(Self {
            text: text.trim().to_string(),
            transcription,
        })
    }
}

/// Checks and trims a translation or definition text.
pub fn parse_child_text(field: &'static str, text: &str) -> Result<String, ValidationError> {
    validate_text(field, text, CHILD_TEXT_MAX_CHARS)?;
    Ok(text.trim().to_string())
}

/// Checks and trims an example sentence.
pub fn parse_example_text(text: &str) -> Result<String, ValidationError> {
    validate_text("example text", text, EXAMPLE_TEXT_MAX_CHARS)?;
    Ok(text.trim().to_string())
}

/// One-line listing row for a word.
///
/// Renders as `(pos) text /transcription/ - translation`, substituting
/// `n/a` for missing pieces and appending ` (+N)` when more translations
/// exist beyond the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSummary {
    pub id: WordId,
    pub text: String,
    pub transcription: Option<String>,
    /// Short name of the attached part of speech, if any.
    pub part_of_speech: Option<String>,
    /// Earliest-added translation, if any.
    pub first_translation: Option<String>,
    pub translation_count: u64,
}

impl Display for WordSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pos = self.part_of_speech.as_deref().unwrap_or("n/a");
        let transcription = self.transcription.as_deref().unwrap_or("n/a");
        let translation = self.first_translation.as_deref().unwrap_or("n/a");
        write!(f, "({pos}) {} /{transcription}/ - {translation}", self.text)?;
        if self.translation_count > 1 {
            write!(f, " (+{})", self.translation_count - 1)?;
        }
        Ok(())
    }
}
