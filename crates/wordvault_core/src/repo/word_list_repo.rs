//! Word-list and tag repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the per-user grouping records: word lists and tags.
//! - Apply the case-insensitive title filter inside SQL.
//!
//! # Invariants
//! - Every query binds the owner id; another user's lists and tags are
//!   indistinguishable from absent rows.
//! - Deleting a list removes its membership join rows, never the words.

use crate::model::user::UserId;
use crate::model::word_list::{NewWordList, Tag, TagId, WordList, WordListId};
use crate::repo::{contains_pattern, parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const WORD_LIST_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    description,
    date_created,
    date_updated,
    date_last_opened
FROM word_lists";

/// Repository interface for word lists and tags.
pub trait WordListRepository {
    /// Inserts a new list and returns the stored record.
    fn create_word_list(&self, user_id: UserId, input: &NewWordList) -> RepoResult<WordList>;
    fn get_word_list(&self, user_id: UserId, id: WordListId) -> RepoResult<Option<WordList>>;
    /// Lists the user's lists ordered by title, optional substring filter.
    fn list_word_lists(
        &self,
        user_id: UserId,
        title_filter: Option<&str>,
    ) -> RepoResult<Vec<WordList>>;
    /// Replaces title and description, bumping `date_updated`.
    fn update_word_list(
        &self,
        user_id: UserId,
        id: WordListId,
        input: &NewWordList,
    ) -> RepoResult<WordList>;
    /// Stamps `date_last_opened` with the current time.
    fn mark_word_list_opened(&self, user_id: UserId, id: WordListId) -> RepoResult<()>;
    fn delete_word_list(&self, user_id: UserId, id: WordListId) -> RepoResult<()>;
    fn create_tag(&self, user_id: UserId, name: &str) -> RepoResult<Tag>;
    /// Lists the user's tags ordered by name.
    fn list_tags(&self, user_id: UserId) -> RepoResult<Vec<Tag>>;
    fn delete_tag(&self, user_id: UserId, id: TagId) -> RepoResult<()>;
}

/// SQLite-backed word-list/tag repository.
pub struct SqliteWordListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordListRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn get_word_list_required(&self, user_id: UserId, id: WordListId) -> RepoResult<WordList> {
        self.get_word_list(user_id, id)?.ok_or(RepoError::NotFound {
            entity: "word list",
            id,
        })
    }
}

impl WordListRepository for SqliteWordListRepository<'_> {
    fn create_word_list(&self, user_id: UserId, input: &NewWordList) -> RepoResult<WordList> {
        let id: WordListId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO word_lists (id, user_id, title, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                user_id.to_string(),
                input.title.as_str(),
                input.description.as_deref(),
            ],
        )?;

        self.get_word_list_required(user_id, id)
    }

    fn get_word_list(&self, user_id: UserId, id: WordListId) -> RepoResult<Option<WordList>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WORD_LIST_SELECT_SQL} WHERE id = ?1 AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_word_list_row(row)?));
        }

        Ok(None)
    }

    fn list_word_lists(
        &self,
        user_id: UserId,
        title_filter: Option<&str>,
    ) -> RepoResult<Vec<WordList>> {
        let mut sql = format!("{WORD_LIST_SELECT_SQL} WHERE user_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(user_id.to_string())];

        if let Some(needle) = title_filter {
            sql.push_str(" AND title LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(contains_pattern(needle)));
        }

        sql.push_str(" ORDER BY title ASC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_word_list_row(row)?);
        }

        Ok(lists)
    }

    fn update_word_list(
        &self,
        user_id: UserId,
        id: WordListId,
        input: &NewWordList,
    ) -> RepoResult<WordList> {
        let changed = self.conn.execute(
            "UPDATE word_lists
             SET
                title = ?1,
                description = ?2,
                date_updated = (strftime('%s', 'now') * 1000)
             WHERE id = ?3
               AND user_id = ?4;",
            params![
                input.title.as_str(),
                input.description.as_deref(),
                id.to_string(),
                user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word list",
                id,
            });
        }

        self.get_word_list_required(user_id, id)
    }

    fn mark_word_list_opened(&self, user_id: UserId, id: WordListId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE word_lists
             SET date_last_opened = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word list",
                id,
            });
        }

        Ok(())
    }

    fn delete_word_list(&self, user_id: UserId, id: WordListId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM word_lists WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word list",
                id,
            });
        }

        Ok(())
    }

    fn create_tag(&self, user_id: UserId, name: &str) -> RepoResult<Tag> {
        let id: TagId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO tags (id, user_id, name) VALUES (?1, ?2, ?3);",
            params![id.to_string(), user_id.to_string(), name],
        )?;

        Ok(Tag {
            id,
            user_id,
            name: name.to_string(),
        })
    }

    fn list_tags(&self, user_id: UserId) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name
             FROM tags
             WHERE user_id = ?1
             ORDER BY name ASC, id ASC;",
        )?;

        let mut rows = stmt.query([user_id.to_string()])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let user_id_text: String = row.get("user_id")?;
            tags.push(Tag {
                id: parse_uuid("tags.id", &id_text)?,
                user_id: parse_uuid("tags.user_id", &user_id_text)?,
                name: row.get("name")?,
            });
        }

        Ok(tags)
    }

    fn delete_tag(&self, user_id: UserId, id: TagId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tags WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "tag",
                id,
            });
        }

        Ok(())
    }
}

fn parse_word_list_row(row: &Row<'_>) -> RepoResult<WordList> {
    let id_text: String = row.get("id")?;
    let user_id_text: String = row.get("user_id")?;
    Ok(WordList {
        id: parse_uuid("word_lists.id", &id_text)?,
        user_id: parse_uuid("word_lists.user_id", &user_id_text)?,
        title: row.get("title")?,
        description: row.get("description")?,
        date_created: row.get("date_created")?,
        date_updated: row.get("date_updated")?,
        date_last_opened: row.get("date_last_opened")?,
    })
}
