//! Core domain logic for WordVault.
//! This crate is the single source of truth for vocabulary-store invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_store, open_store_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::user::{Gender, NewUser, Profile, Session, SessionToken, User, UserId};
pub use model::word::{Word, WordId, WordSummary};
pub use model::word_list::{Tag, TagId, WordList, WordListId};
pub use model::ValidationError;
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::taxonomy_repo::{SqliteTaxonomyRepository, TaxonomyRepository};
pub use repo::word_list_repo::{SqliteWordListRepository, WordListRepository};
pub use repo::word_repo::{
    SqliteWordRepository, VocabularyOverview, WordQuery, WordRepository,
};
pub use repo::{RepoError, RepoResult, UniqueRule};
pub use service::account_service::{AccountError, AccountService, SessionPolicy};
pub use service::word_list_service::{WordListError, WordListService};
pub use service::word_service::{WordError, WordService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
