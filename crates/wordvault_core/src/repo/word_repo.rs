//! Word repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist words, their owned children and their join-table links.
//! - Produce the one-line summary rows used by word listings.
//! - Apply case-insensitive text filters inside SQL.
//!
//! # Invariants
//! - Every operation binds the owner id; foreign words, lists and tags
//!   surface as `NotFound`.
//! - Child and join writes never touch rows whose parent chain is not
//!   owned by the caller.

use crate::model::taxonomy::{KnowledgeLevelId, PartOfSpeechId};
use crate::model::user::UserId;
use crate::model::word::{
    Definition, DefinitionId, Example, ExampleId, NewWord, Translation, TranslationId, Word,
    WordId, WordSummary,
};
use crate::model::word_list::{Tag, TagId, WordListId};
use crate::repo::{contains_pattern, parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

const WORD_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    part_of_speech_id,
    knowledge_level_id,
    text,
    transcription,
    date_added,
    date_updated
FROM words";

const SUMMARY_SELECT_SQL: &str = "SELECT
    w.id,
    w.text,
    w.transcription,
    p.short_name AS part_of_speech,
    (SELECT t.text
     FROM translations t
     WHERE t.word_id = w.id
     ORDER BY t.date_added ASC, t.id ASC
     LIMIT 1) AS first_translation,
    (SELECT COUNT(*)
     FROM translations t
     WHERE t.word_id = w.id) AS translation_count
FROM words w
LEFT JOIN parts_of_speech p ON p.id = w.part_of_speech_id";

/// Query options for word listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordQuery {
    /// Optional case-insensitive substring filter on word text.
    pub text_filter: Option<String>,
    /// Maximum rows to return. `None` returns everything.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Per-user counters behind the landing overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VocabularyOverview {
    pub words_total: u64,
    pub word_lists_total: u64,
    /// Words whose `date_added` falls within the trailing seven days.
    pub words_added_last_week: u64,
}

/// Repository interface for words, children and links.
pub trait WordRepository {
    /// Inserts a new word and returns the stored record.
    fn create_word(
        &self,
        user_id: UserId,
        input: &NewWord,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> RepoResult<Word>;
    fn get_word(&self, user_id: UserId, id: WordId) -> RepoResult<Option<Word>>;
    /// Replaces all mutable word fields, bumping `date_updated`.
    fn update_word(
        &self,
        user_id: UserId,
        id: WordId,
        input: &NewWord,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> RepoResult<Word>;
    fn delete_word(&self, user_id: UserId, id: WordId) -> RepoResult<()>;
    /// Lists the user's words ordered by `date_added`, oldest first.
    fn list_words(&self, user_id: UserId, query: &WordQuery) -> RepoResult<Vec<WordSummary>>;
    /// Lists the members of one owned list, same ordering and filters.
    fn list_words_in_list(
        &self,
        user_id: UserId,
        word_list_id: WordListId,
        query: &WordQuery,
    ) -> RepoResult<Vec<WordSummary>>;
    fn add_translation(
        &self,
        user_id: UserId,
        word_id: WordId,
        text: &str,
    ) -> RepoResult<Translation>;
    fn list_translations(&self, user_id: UserId, word_id: WordId) -> RepoResult<Vec<Translation>>;
    fn remove_translation(&self, user_id: UserId, id: TranslationId) -> RepoResult<()>;
    fn add_definition(
        &self,
        user_id: UserId,
        word_id: WordId,
        text: &str,
    ) -> RepoResult<Definition>;
    fn list_definitions(&self, user_id: UserId, word_id: WordId) -> RepoResult<Vec<Definition>>;
    fn remove_definition(&self, user_id: UserId, id: DefinitionId) -> RepoResult<()>;
    fn add_example(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
        text: &str,
    ) -> RepoResult<Example>;
    fn list_examples(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Vec<Example>>;
    fn remove_example(&self, user_id: UserId, id: ExampleId) -> RepoResult<()>;
    /// Attaches an owned tag to an owned word.
    fn tag_word(&self, user_id: UserId, word_id: WordId, tag_id: TagId) -> RepoResult<()>;
    fn untag_word(&self, user_id: UserId, word_id: WordId, tag_id: TagId) -> RepoResult<()>;
    fn list_word_tags(&self, user_id: UserId, word_id: WordId) -> RepoResult<Vec<Tag>>;
    /// Adds an owned word to an owned list.
    fn add_word_to_list(
        &self,
        user_id: UserId,
        word_id: WordId,
        word_list_id: WordListId,
    ) -> RepoResult<()>;
    fn remove_word_from_list(
        &self,
        user_id: UserId,
        word_id: WordId,
        word_list_id: WordListId,
    ) -> RepoResult<()>;
    /// Computes the landing counters at `now` (epoch ms).
    fn overview(&self, user_id: UserId, now: i64) -> RepoResult<VocabularyOverview>;
}

/// SQLite-backed word repository.
pub struct SqliteWordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn get_word_required(&self, user_id: UserId, id: WordId) -> RepoResult<Word> {
        self.get_word(user_id, id)?.ok_or(RepoError::NotFound {
            entity: "word",
            id,
        })
    }

    fn ensure_word_owned(&self, user_id: UserId, word_id: WordId) -> RepoResult<()> {
        if !self.row_exists(
            "SELECT EXISTS(SELECT 1 FROM words WHERE id = ?1 AND user_id = ?2);",
            word_id,
            user_id,
        )? {
            return Err(RepoError::NotFound {
                entity: "word",
                id: word_id,
            });
        }
        Ok(())
    }

    fn ensure_list_owned(&self, user_id: UserId, word_list_id: WordListId) -> RepoResult<()> {
        if !self.row_exists(
            "SELECT EXISTS(SELECT 1 FROM word_lists WHERE id = ?1 AND user_id = ?2);",
            word_list_id,
            user_id,
        )? {
            return Err(RepoError::NotFound {
                entity: "word list",
                id: word_list_id,
            });
        }
        Ok(())
    }

    fn ensure_tag_owned(&self, user_id: UserId, tag_id: TagId) -> RepoResult<()> {
        if !self.row_exists(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?1 AND user_id = ?2);",
            tag_id,
            user_id,
        )? {
            return Err(RepoError::NotFound {
                entity: "tag",
                id: tag_id,
            });
        }
        Ok(())
    }

    fn ensure_definition_owned(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<()> {
        if !self.row_exists(
            "SELECT EXISTS(
                SELECT 1
                FROM definitions d
                INNER JOIN words w ON w.id = d.word_id
                WHERE d.id = ?1
                  AND w.user_id = ?2
            );",
            definition_id,
            user_id,
        )? {
            return Err(RepoError::NotFound {
                entity: "definition",
                id: definition_id,
            });
        }
        Ok(())
    }

    fn ensure_taxonomy_refs_exist(
        &self,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> RepoResult<()> {
        if let Some(id) = part_of_speech_id {
            let exists: i64 = self.conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM parts_of_speech WHERE id = ?1);",
                [id.to_string()],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(RepoError::NotFound {
                    entity: "part of speech",
                    id,
                });
            }
        }
        if let Some(id) = knowledge_level_id {
            let exists: i64 = self.conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM knowledge_levels WHERE id = ?1);",
                [id.to_string()],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(RepoError::NotFound {
                    entity: "knowledge level",
                    id,
                });
            }
        }
        Ok(())
    }

    fn row_exists(&self, sql: &str, id: Uuid, user_id: UserId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            sql,
            params![id.to_string(), user_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn query_summaries(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<WordSummary>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(parse_summary_row(row)?);
        }
        Ok(summaries)
    }
}

impl WordRepository for SqliteWordRepository<'_> {
    fn create_word(
        &self,
        user_id: UserId,
        input: &NewWord,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> RepoResult<Word> {
        self.ensure_taxonomy_refs_exist(part_of_speech_id, knowledge_level_id)?;

        let id: WordId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO words (
                id,
                user_id,
                part_of_speech_id,
                knowledge_level_id,
                text,
                transcription
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                user_id.to_string(),
                part_of_speech_id.map(|value| value.to_string()),
                knowledge_level_id.map(|value| value.to_string()),
                input.text.as_str(),
                input.transcription.as_deref(),
            ],
        )?;

        self.get_word_required(user_id, id)
    }

    fn get_word(&self, user_id: UserId, id: WordId) -> RepoResult<Option<Word>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORD_SELECT_SQL} WHERE id = ?1 AND user_id = ?2;"))?;

        let mut rows = stmt.query(params![id.to_string(), user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_word_row(row)?));
        }

        Ok(None)
    }

    fn update_word(
        &self,
        user_id: UserId,
        id: WordId,
        input: &NewWord,
        part_of_speech_id: Option<PartOfSpeechId>,
        knowledge_level_id: Option<KnowledgeLevelId>,
    ) -> RepoResult<Word> {
        self.ensure_taxonomy_refs_exist(part_of_speech_id, knowledge_level_id)?;

        let changed = self.conn.execute(
            "UPDATE words
             SET
                part_of_speech_id = ?1,
                knowledge_level_id = ?2,
                text = ?3,
                transcription = ?4,
                date_updated = (strftime('%s', 'now') * 1000)
             WHERE id = ?5
               AND user_id = ?6;",
            params![
                part_of_speech_id.map(|value| value.to_string()),
                knowledge_level_id.map(|value| value.to_string()),
                input.text.as_str(),
                input.transcription.as_deref(),
                id.to_string(),
                user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word",
                id,
            });
        }

        self.get_word_required(user_id, id)
    }

    fn delete_word(&self, user_id: UserId, id: WordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM words WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word",
                id,
            });
        }

        Ok(())
    }

    fn list_words(&self, user_id: UserId, query: &WordQuery) -> RepoResult<Vec<WordSummary>> {
        let mut sql = format!("{SUMMARY_SELECT_SQL} WHERE w.user_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(user_id.to_string())];

        push_text_filter(&mut sql, &mut bind_values, query.text_filter.as_deref());
        sql.push_str(" ORDER BY w.date_added ASC, w.id ASC");
        push_pagination(&mut sql, &mut bind_values, query);

        self.query_summaries(&sql, bind_values)
    }

    fn list_words_in_list(
        &self,
        user_id: UserId,
        word_list_id: WordListId,
        query: &WordQuery,
    ) -> RepoResult<Vec<WordSummary>> {
        self.ensure_list_owned(user_id, word_list_id)?;

        let mut sql = format!(
            "{SUMMARY_SELECT_SQL}
             INNER JOIN word_word_lists m ON m.word_id = w.id
             WHERE w.user_id = ?
               AND m.word_list_id = ?"
        );
        let mut bind_values: Vec<Value> = vec![
            Value::Text(user_id.to_string()),
            Value::Text(word_list_id.to_string()),
        ];

        push_text_filter(&mut sql, &mut bind_values, query.text_filter.as_deref());
        sql.push_str(" ORDER BY w.date_added ASC, w.id ASC");
        push_pagination(&mut sql, &mut bind_values, query);

        self.query_summaries(&sql, bind_values)
    }

    fn add_translation(
        &self,
        user_id: UserId,
        word_id: WordId,
        text: &str,
    ) -> RepoResult<Translation> {
        let id: TranslationId = Uuid::new_v4();
        let changed = self.conn.execute(
            "INSERT INTO translations (id, word_id, text)
             SELECT ?1, w.id, ?2
             FROM words w
             WHERE w.id = ?3
               AND w.user_id = ?4;",
            params![
                id.to_string(),
                text,
                word_id.to_string(),
                user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word",
                id: word_id,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, word_id, text, date_added FROM translations WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_translation_row(row),
            None => Err(RepoError::NotFound {
                entity: "translation",
                id,
            }),
        }
    }

    fn list_translations(&self, user_id: UserId, word_id: WordId) -> RepoResult<Vec<Translation>> {
        self.ensure_word_owned(user_id, word_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, word_id, text, date_added
             FROM translations
             WHERE word_id = ?1
             ORDER BY date_added ASC, id ASC;",
        )?;

        let mut rows = stmt.query([word_id.to_string()])?;
        let mut translations = Vec::new();
        while let Some(row) = rows.next()? {
            translations.push(parse_translation_row(row)?);
        }

        Ok(translations)
    }

    fn remove_translation(&self, user_id: UserId, id: TranslationId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM translations
             WHERE id = ?1
               AND word_id IN (SELECT id FROM words WHERE user_id = ?2);",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "translation",
                id,
            });
        }

        Ok(())
    }

    fn add_definition(
        &self,
        user_id: UserId,
        word_id: WordId,
        text: &str,
    ) -> RepoResult<Definition> {
        let id: DefinitionId = Uuid::new_v4();
        let changed = self.conn.execute(
            "INSERT INTO definitions (id, word_id, text)
             SELECT ?1, w.id, ?2
             FROM words w
             WHERE w.id = ?3
               AND w.user_id = ?4;",
            params![
                id.to_string(),
                text,
                word_id.to_string(),
                user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word",
                id: word_id,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, word_id, text, date_added FROM definitions WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_definition_row(row),
            None => Err(RepoError::NotFound {
                entity: "definition",
                id,
            }),
        }
    }

    fn list_definitions(&self, user_id: UserId, word_id: WordId) -> RepoResult<Vec<Definition>> {
        self.ensure_word_owned(user_id, word_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, word_id, text, date_added
             FROM definitions
             WHERE word_id = ?1
             ORDER BY date_added ASC, id ASC;",
        )?;

        let mut rows = stmt.query([word_id.to_string()])?;
        let mut definitions = Vec::new();
        while let Some(row) = rows.next()? {
            definitions.push(parse_definition_row(row)?);
        }

        Ok(definitions)
    }

    fn remove_definition(&self, user_id: UserId, id: DefinitionId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM definitions
             WHERE id = ?1
               AND word_id IN (SELECT id FROM words WHERE user_id = ?2);",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "definition",
                id,
            });
        }

        Ok(())
    }

    fn add_example(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
        text: &str,
    ) -> RepoResult<Example> {
        let id: ExampleId = Uuid::new_v4();
        let changed = self.conn.execute(
            "INSERT INTO examples (id, definition_id, text)
             SELECT ?1, d.id, ?2
             FROM definitions d
             INNER JOIN words w ON w.id = d.word_id
             WHERE d.id = ?3
               AND w.user_id = ?4;",
            params![
                id.to_string(),
                text,
                definition_id.to_string(),
                user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "definition",
                id: definition_id,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, definition_id, text, date_added FROM examples WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_example_row(row),
            None => Err(RepoError::NotFound {
                entity: "example",
                id,
            }),
        }
    }

    fn list_examples(
        &self,
        user_id: UserId,
        definition_id: DefinitionId,
    ) -> RepoResult<Vec<Example>> {
        self.ensure_definition_owned(user_id, definition_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, definition_id, text, date_added
             FROM examples
             WHERE definition_id = ?1
             ORDER BY date_added ASC, id ASC;",
        )?;

        let mut rows = stmt.query([definition_id.to_string()])?;
        let mut examples = Vec::new();
        while let Some(row) = rows.next()? {
            examples.push(parse_example_row(row)?);
        }

        Ok(examples)
    }

    fn remove_example(&self, user_id: UserId, id: ExampleId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM examples
             WHERE id = ?1
               AND definition_id IN (
                   SELECT d.id
                   FROM definitions d
                   INNER JOIN words w ON w.id = d.word_id
                   WHERE w.user_id = ?2
               );",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "example",
                id,
            });
        }

        Ok(())
    }

    fn tag_word(&self, user_id: UserId, word_id: WordId, tag_id: TagId) -> RepoResult<()> {
        self.ensure_word_owned(user_id, word_id)?;
        self.ensure_tag_owned(user_id, tag_id)?;

        self.conn.execute(
            "INSERT INTO word_tags (word_id, tag_id) VALUES (?1, ?2);",
            params![word_id.to_string(), tag_id.to_string()],
        )?;

        Ok(())
    }

    fn untag_word(&self, user_id: UserId, word_id: WordId, tag_id: TagId) -> RepoResult<()> {
        self.ensure_word_owned(user_id, word_id)?;

        let changed = self.conn.execute(
            "DELETE FROM word_tags
             WHERE word_id = ?1
               AND tag_id IN (SELECT id FROM tags WHERE id = ?2 AND user_id = ?3);",
            params![word_id.to_string(), tag_id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "word tag",
                id: tag_id,
            });
        }

        Ok(())
    }

    fn list_word_tags(&self, user_id: UserId, word_id: WordId) -> RepoResult<Vec<Tag>> {
        self.ensure_word_owned(user_id, word_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.user_id, t.name
             FROM word_tags wt
             INNER JOIN tags t ON t.id = wt.tag_id
             WHERE wt.word_id = ?1
             ORDER BY t.name ASC, t.id ASC;",
        )?;

        let mut rows = stmt.query([word_id.to_string()])?;
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

    fn add_word_to_list(
        &self,
        user_id: UserId,
        word_id: WordId,
        word_list_id: WordListId,
    ) -> RepoResult<()> {
        self.ensure_word_owned(user_id, word_id)?;
        self.ensure_list_owned(user_id, word_list_id)?;

        self.conn.execute(
            "INSERT INTO word_word_lists (word_id, word_list_id) VALUES (?1, ?2);",
            params![word_id.to_string(), word_list_id.to_string()],
        )?;

        Ok(())
    }

    fn remove_word_from_list(
        &self,
        user_id: UserId,
        word_id: WordId,
        word_list_id: WordListId,
    ) -> RepoResult<()> {
        self.ensure_word_owned(user_id, word_id)?;

        let changed = self.conn.execute(
            "DELETE FROM word_word_lists
             WHERE word_id = ?1
               AND word_list_id IN (
                   SELECT id FROM word_lists WHERE id = ?2 AND user_id = ?3
               );",
            params![
                word_id.to_string(),
                word_list_id.to_string(),
                user_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "list membership",
                id: word_list_id,
            });
        }

        Ok(())
    }

    fn overview(&self, user_id: UserId, now: i64) -> RepoResult<VocabularyOverview> {
        let week_ago = now - WEEK_MS;
        let (words_total, words_added_last_week, word_lists_total): (i64, i64, i64) =
            self.conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM words WHERE user_id = ?1),
                    (SELECT COUNT(*) FROM words WHERE user_id = ?1 AND date_added >= ?2),
                    (SELECT COUNT(*) FROM word_lists WHERE user_id = ?1);",
                params![user_id.to_string(), week_ago],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        Ok(VocabularyOverview {
            words_total: words_total as u64,
            word_lists_total: word_lists_total as u64,
            words_added_last_week: words_added_last_week as u64,
        })
    }
}

fn push_text_filter(sql: &mut String, bind_values: &mut Vec<Value>, filter: Option<&str>) {
    if let Some(needle) = filter {
        sql.push_str(" AND w.text LIKE ? ESCAPE '\\'");
        bind_values.push(Value::Text(contains_pattern(needle)));
    }
}

fn push_pagination(sql: &mut String, bind_values: &mut Vec<Value>, query: &WordQuery) {
    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if query.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }
    } else if query.offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(query.offset)));
    }
}

fn parse_word_row(row: &Row<'_>) -> RepoResult<Word> {
    let id_text: String = row.get("id")?;
    let user_id_text: String = row.get("user_id")?;
    let part_of_speech_id = match row.get::<_, Option<String>>("part_of_speech_id")? {
        Some(value) => Some(parse_uuid("words.part_of_speech_id", &value)?),
        None => None,
    };
    let knowledge_level_id = match row.get::<_, Option<String>>("knowledge_level_id")? {
        Some(value) => Some(parse_uuid("words.knowledge_level_id", &value)?),
        None => None,
    };

    Ok(Word {
        id: parse_uuid("words.id", &id_text)?,
        user_id: parse_uuid("words.user_id", &user_id_text)?,
        part_of_speech_id,
        knowledge_level_id,
        text: row.get("text")?,
        transcription: row.get("transcription")?,
        date_added: row.get("date_added")?,
        date_updated: row.get("date_updated")?,
    })
}

fn parse_summary_row(row: &Row<'_>) -> RepoResult<WordSummary> {
    let id_text: String = row.get("id")?;
    let translation_count: i64 = row.get("translation_count")?;

    Ok(WordSummary {
        id: parse_uuid("words.id", &id_text)?,
        text: row.get("text")?,
        transcription: row.get("transcription")?,
        part_of_speech: row.get("part_of_speech")?,
        first_translation: row.get("first_translation")?,
        translation_count: translation_count as u64,
    })
}

fn parse_translation_row(row: &Row<'_>) -> RepoResult<Translation> {
    let id_text: String = row.get("id")?;
    let word_id_text: String = row.get("word_id")?;
    Ok(Translation {
        id: parse_uuid("translations.id", &id_text)?,
        word_id: parse_uuid("translations.word_id", &word_id_text)?,
        text: row.get("text")?,
        date_added: row.get("date_added")?,
    })
}

fn parse_definition_row(row: &Row<'_>) -> RepoResult<Definition> {
    let id_text: String = row.get("id")?;
    let word_id_text: String = row.get("word_id")?;
    Ok(Definition {
        id: parse_uuid("definitions.id", &id_text)?,
        word_id: parse_uuid("definitions.word_id", &word_id_text)?,
        text: row.get("text")?,
        date_added: row.get("date_added")?,
    })
}

fn parse_example_row(row: &Row<'_>) -> RepoResult<Example> {
    let id_text: String = row.get("id")?;
    let definition_id_text: String = row.get("definition_id")?;
    Ok(Example {
        id: parse_uuid("examples.id", &id_text)?,
        definition_id: parse_uuid("examples.definition_id", &definition_id_text)?,
        text: row.get("text")?,
        date_added: row.get("date_added")?,
    })
}
