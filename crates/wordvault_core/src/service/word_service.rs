//! Word use-case service.
//!
//! # Responsibility
//! - Provide word, child, tag-link and list-membership entry points.
//! - Normalize blank search filters before they reach SQL.
//! - Expose the per-user landing overview counters.
//!
//! # Invariants
//! - Every operation is scoped to the calling user, list membership
//!   queries included.
//! - Word listings are sorted by `date_added ASC, id ASC`.

use crate::model::taxonomy::{KnowledgeLevelId, PartOfSpeechId};
use crate::model::user::UserId;
use crate::model::word::{
    parse_child_text, parse_example_text, Definition, DefinitionId, Example, ExampleId, NewWord,
    Translation, TranslationId, Word, WordId, WordSummary,
};
use crate::model::word_list::{Tag, TagId, WordListId};
use crate::model::ValidationError;
use crate::repo::word_repo::{VocabularyOverview, WordQuery, WordRepository};
use crate::repo::RepoError;
use crate::service::{normalize_filter, now_epoch_ms};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for word use-cases.
#[derive(Debug)]
pub enum WordError {
    /// Field-level input failure.
    Validation(ValidationError),
    /// Persistence-layer failure, including uniqueness conflicts.
    Repo(RepoError),
}

impl Display for WordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for WordError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for WordError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Word service facade over the repository.
pub struct WordService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> WordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_word(
        &self,
        user_id: UserId,
        text: &str,
        transcription: Option<&str>,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> Result<Word, WordError> {
        let input = NewWord::parse(text, transcription)?;
        Ok(self
            .repo
            .create_word(user_id, &input, part_of_speech_id, knowledge_level_id)?)
    }

    pub fn get_word(&self, user_id: UserId, id: WordId) -> Result<Option<Word>, WordError> {
        Ok(self.repo.get_word(user_id, id)?)
    }

    /// Replaces all mutable fields on an owned word.
    pub fn update_word(
        &self,
        user_id: UserId,
        id: WordId,
        text: &str,
        transcription: Option<&str>,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> Result<Word, WordError> {
        let input = NewWord::parse(text, transcription)?;
        Ok(self
            .repo
            .update_word(user_id, id, &input, part_of_speech_id, knowledge_level_id)?)
    }

    /// Removes an owned word with its children and join rows.
    pub fn delete_word(&self, user_id: UserId, id: WordId) -> Result<(), WordError> {
        Ok(self.repo.delete_word(user_id, id)?)
    }

    /// Lists the user's words, optionally filtered by a case-insensitive
    /// text substring.
    pub fn list_words(
        &self,
        user_id: UserId,
        text_filter: Option<&str>,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<Vec<WordSummary>, WordError> {
        let query = WordQuery {
            text_filter: normalize_filter(text_filter),
            limit,
            offset,
        };
        Ok(self.repo.list_words(user_id, &query)?)
    }

    /// Lists the members of one owned list, same filter semantics.
    pub fn list_words_in_list(
        &self,
        user_id: UserId,
        word_list_id: WordListId,
        text_filter: Option<&str>,
    ) -> Result<Vec<WordSummary>, WordError> {
        let query = WordQuery {
            text_filter: normalize_filter(text_filter),
            ..WordQuery::default()
        };
        Ok(self.repo.list_words_in_list(user_id, word_list_id, &query)?)
    }

    pub fn add_translation(
        &self,
        user_id: UserId,
        word_id: WordId,
        text: &str,
    ) -> Result<Translation, WordError> {
        let text = parse_child_text("translation text", text)?;
        Ok(self.repo.add_translation(user_id, word_id, &text)?)
    }

    pub fn list_translations(
        &self,
        user_id: UserId,
        word_id: WordId,
    ) -> Result<Vec<Translation>, WordError> {
        Ok(self.repo.list_translations(user_id, word_id)?)
    }

    pub fn remove_translation(
        &self,
        user_id: UserId,
        id: TranslationId,
    ) -> Result<(), WordError> {
        Ok(self.repo.remove_translation(user_id, id)?)
    }

    pub fn add_definition(
        &self,
        user_id: UserId,
        word_id: WordId,
        text: &str,
    ) -> Result<Definition, WordError> {
        let text = parse_child_text("definition text", text)?;
        Ok(self.repo.add_definition(user_id, word_id, &text)?)
    }

    pub fn list_definitions(
        &self,
        user_id: UserId,
        word_id: WordId,
    ) -> Result<Vec<Definition>, WordError> {
        Ok(self.repo.list_definitions(user_id, word_id)?)
    }

    pub fn remove_definition(&self, user_id: UserId, id: DefinitionId) -> Result<(), WordError> {
        Ok(self.repo.remove_definition(user_id, id)?)
    }

    pub fn add_example(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
        text: &str,
    ) -> Result<Example, WordError> {
        let text = parse_example_text(text)?;
        Ok(self.repo.add_example(user_id, definition_id, &text)?)
    }

    pub fn list_examples(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> Result<Vec<Example>, WordError> {
        Ok(self.repo.list_examples(user_id, definition_id)?)
    }

    pub fn remove_example(&self, user_id: UserId, id: ExampleId) -> Result<(), WordError> {
        Ok(self.repo.remove_example(user_id, id)?)
    }

    /// Attaches an owned tag to an owned word.
    pub fn tag_word(
        &self,
        user_id: UserId,
        word_id: WordId,
        tag_id: TagId,
    ) -> Result<(), WordError> {
        Ok(self.repo.tag_word(user_id, word_id, tag_id)?)
    }

    pub fn untag_word(
        &self,
        user_id: UserId,
        word_id: WordId,
        tag_id: TagId,
    ) -> Result<(), WordError> {
        Ok(self.repo.untag_word(user_id, word_id, tag_id)?)
    }

    pub fn list_word_tags(
        &self,
        user_id: UserId,
        word_id: WordId,
    ) -> Result<Vec<Tag>, WordError> {
        Ok(self.repo.list_word_tags(user_id, word_id)?)
    }

    /// Adds an owned word to an owned list.
    pub fn add_word_to_list(
        &self,
        user_id: UserId,
        word_id: WordId,
        word_list_id: WordListId,
    ) -> Result<(), WordError> {
        Ok(self.repo.add_word_to_list(user_id, word_id, word_list_id)?)
    }

    pub fn remove_word_from_list(
        &self,
        user_id: UserId,
        word_id: WordId,
        word_list_id: WordListId,
    ) -> Result<(), WordError> {
        Ok(self
            .repo
            .remove_word_from_list(user_id, word_id, word_list_id)?)
    }

    /// Computes the landing counters for the user at the current time.
    pub fn vocabulary_overview(&self, user_id: UserId) -> Result<VocabularyOverview, WordError> {
        Ok(self.repo.overview(user_id, now_epoch_ms())?)
    }
}
