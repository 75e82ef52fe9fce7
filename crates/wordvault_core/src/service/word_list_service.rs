//! Word-list and tag use-case service.
//!
//! # Responsibility
//! - Provide list/tag create, query, update and delete entry points.
//! - Normalize blank search filters before they reach SQL.
//!
//! # Invariants
//! - Every operation is scoped to the calling user.
//! - List queries are sorted by title, then id.

use crate::model::user::UserId;
use crate::model::word_list::{parse_tag_name, NewWordList, Tag, TagId, WordList, WordListId};
use crate::model::ValidationError;
use crate::repo::word_list_repo::WordListRepository;
use crate::repo::RepoError;
use crate::service::normalize_filter;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for word-list and tag use-cases.
#[derive(Debug)]
pub enum WordListError {
    /// Field-level input failure.
    Validation(ValidationError),
    /// Persistence-layer failure, including uniqueness conflicts.
    Repo(RepoError),
}

impl Display for WordListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WordListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for WordListError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for WordListError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Word-list service facade over the repository.
pub struct WordListService<R: WordListRepository> {
    repo: R,
}

impl<R: WordListRepository> WordListService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_word_list(
        &self,
        user_id: UserId,
        title: &str,
        description: Option<&str>,
    ) -> Result<WordList, WordListError> {
        let input = NewWordList::parse(title, description)?;
        Ok(self.repo.create_word_list(user_id, &input)?)
    }

    /// Lists the user's word lists, optionally filtered by a
    /// case-insensitive title substring.
    pub fn list_word_lists(
        &self,
        user_id: UserId,
        title_filter: Option<&str>,
    ) -> Result<Vec<WordList>, WordListError> {
        let filter = normalize_filter(title_filter);
        Ok(self.repo.list_word_lists(user_id, filter.as_deref())?)
    }

    pub fn get_word_list(
        &self,
        user_id: UserId,
        id: WordListId,
    ) -> Result<Option<WordList>, WordListError> {
        Ok(self.repo.get_word_list(user_id, id)?)
    }

    /// Replaces title and description on an owned list.
    pub fn update_word_list(
        &self,
        user_id: UserId,
        id: WordListId,
        title: &str,
        description: Option<&str>,
    ) -> Result<WordList, WordListError> {
        let input = NewWordList::parse(title, description)?;
        Ok(self.repo.update_word_list(user_id, id, &input)?)
    }

    /// Records that the user opened the list.
    pub fn mark_word_list_opened(
        &self,
        user_id: UserId,
        id: WordListId,
    ) -> Result<(), WordListError> {
        Ok(self.repo.mark_word_list_opened(user_id, id)?)
    }

    /// Removes an owned list. Member words survive.
    pub fn delete_word_list(&self, user_id: UserId, id: WordListId) -> Result<(), WordListError> {
        Ok(self.repo.delete_word_list(user_id, id)?)
    }

    pub fn create_tag(&self, user_id: UserId, name: &str) -> Result<Tag, WordListError> {
        let name = parse_tag_name(name)?;
        Ok(self.repo.create_tag(user_id, &name)?)
    }

    pub fn list_tags(&self, user_id: UserId) -> Result<Vec<Tag>, WordListError> {
        Ok(self.repo.list_tags(user_id)?)
    }

    pub fn delete_tag(&self, user_id: UserId, id: TagId) -> Result<(), WordListError> {
        Ok(self.repo.delete_tag(user_id, id)?)
    }
}
