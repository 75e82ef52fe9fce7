//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from service orchestration.
//! - Map SQLite uniqueness failures to semantic conflict errors.
//!
//! # Invariants
//! - Every user-scoped query binds the owner id; no read or write path
//!   can reach another user's rows.
//! - Missing and foreign rows are both reported as `NotFound`.

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod account_repo;
pub mod taxonomy_repo;
pub mod word_list_repo;
pub mod word_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Uniqueness rule behind a constraint conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueRule {
    /// `users.username` is taken.
    Username,
    /// `users.email` is taken.
    Email,
    /// The user already has a profile.
    ProfileExists,
    PartOfSpeechShortName,
    PartOfSpeechName,
    PartOfSpeechDescription,
    KnowledgeLevelName,
    KnowledgeLevelDescription,
    /// List title already used by the same owner.
    WordListTitle,
    /// Tag name already used by the same owner.
    TagName,
    /// Word text already exists somewhere in the store, any owner.
    WordTextGlobal,
    /// Same owner already has this text under the same part of speech.
    WordPerUserText,
    /// The word is already a member of the list.
    ListMembership,
    /// The tag is already attached to the word.
    WordTagged,
    /// The word already carries this translation text.
    TranslationText,
    /// The word already carries this definition text.
    DefinitionText,
    /// The definition already carries this example text.
    ExampleText,
}

impl UniqueRule {
    /// Maps a SQLite `UNIQUE constraint failed` message to the schema rule
    /// it came from. Column lists match the migration DDL verbatim.
    fn from_sqlite_message(message: &str) -> Option<Self> {
        let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
        let rule = match columns {
            "users.username" => Self::Username,
            "users.email" => Self::Email,
            "profiles.user_id" => Self::ProfileExists,
            "parts_of_speech.short_name" => Self::PartOfSpeechShortName,
            "parts_of_speech.name" => Self::PartOfSpeechName,
            "parts_of_speech.description" => Self::PartOfSpeechDescription,
            "knowledge_levels.name" => Self::KnowledgeLevelName,
            "knowledge_levels.description" => Self::KnowledgeLevelDescription,
            "word_lists.title, word_lists.user_id" => Self::WordListTitle,
            "tags.name, tags.user_id" => Self::TagName,
            "words.text" => Self::WordTextGlobal,
            "words.part_of_speech_id, words.text, words.user_id" => Self::WordPerUserText,
            "word_word_lists.word_id, word_word_lists.word_list_id" => Self::ListMembership,
            "word_tags.word_id, word_tags.tag_id" => Self::WordTagged,
            "translations.word_id, translations.text" => Self::TranslationText,
            "definitions.word_id, definitions.text" => Self::DefinitionText,
            "examples.definition_id, examples.text" => Self::ExampleText,
            _ => return None,
        };
        Some(rule)
    }
}

impl Display for UniqueRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Username => "username is already taken",
            Self::Email => "email is already registered",
            Self::ProfileExists => "user already has a profile",
            Self::PartOfSpeechShortName => "part-of-speech short name already exists",
            Self::PartOfSpeechName => "part-of-speech name already exists",
            Self::PartOfSpeechDescription => "part-of-speech description already exists",
            Self::KnowledgeLevelName => "knowledge-level name already exists",
            Self::KnowledgeLevelDescription => "knowledge-level description already exists",
            Self::WordListTitle => "list title already used by this user",
            Self::TagName => "tag name already used by this user",
            Self::WordTextGlobal => "word text already exists in the store",
            Self::WordPerUserText => "user already has this word under that part of speech",
            Self::ListMembership => "word is already in the list",
            Self::WordTagged => "tag is already attached to the word",
            Self::TranslationText => "word already has this translation",
            Self::DefinitionText => "word already has this definition",
            Self::ExampleText => "definition already has this example",
        };
        f.write_str(text)
    }
}

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A uniqueness rule rejected the write.
    Conflict(UniqueRule),
    /// The row is absent, or belongs to another user.
    NotFound { entity: &'static str, id: Uuid },
    /// Persisted state violates model expectations.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(rule) => write!(f, "{rule}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Conflict(_) | Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &value {
            if failure.code == ErrorCode::ConstraintViolation {
                if let Some(rule) = UniqueRule::from_sqlite_message(message) {
                    return Self::Conflict(rule);
                }
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Builds a `LIKE ... ESCAPE '\'` pattern matching `needle` anywhere,
/// treating `%`, `_` and `\` in the needle as literal characters.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn parse_uuid(column: &'static str, value: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

#[cfg(test)]
mod tests {
    use super::{contains_pattern, UniqueRule};

    #[test]
    fn constraint_messages_map_to_schema_rules() {
        assert_eq!(
            UniqueRule::from_sqlite_message("UNIQUE constraint failed: users.username"),
            Some(UniqueRule::Username)
        );
        assert_eq!(
            UniqueRule::from_sqlite_message("UNIQUE constraint failed: words.text"),
            Some(UniqueRule::WordTextGlobal)
        );
        assert_eq!(
            UniqueRule::from_sqlite_message(
                "UNIQUE constraint failed: words.part_of_speech_id, words.text, words.user_id"
            ),
            Some(UniqueRule::WordPerUserText)
        );
        assert_eq!(
            UniqueRule::from_sqlite_message("NOT NULL constraint failed: words.text"),
            None
        );
    }

    #[test]
    fn contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("cat"), "%cat%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
