//! Taxonomy repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the shared part-of-speech and knowledge-level catalogs.
//!
//! # Invariants
//! - Deleting a taxonomy row detaches words (`ON DELETE SET NULL`),
//!   never deletes them.

use crate::model::taxonomy::{
    KnowledgeLevel, KnowledgeLevelId, NewKnowledgeLevel, NewPartOfSpeech, PartOfSpeech,
    PartOfSpeechId,
};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Repository interface for the shared taxonomy catalogs.
pub trait TaxonomyRepository {
    fn create_part_of_speech(&self, input: &NewPartOfSpeech) -> RepoResult<PartOfSpeech>;
    /// Lists every part of speech in insertion order.
    fn list_parts_of_speech(&self) -> RepoResult<Vec<PartOfSpeech>>;
    fn get_part_of_speech(&self, id: PartOfSpeechId) -> RepoResult<Option<PartOfSpeech>>;
    fn delete_part_of_speech(&self, id: PartOfSpeechId) -> RepoResult<()>;
    fn create_knowledge_level(&self, input: &NewKnowledgeLevel) -> RepoResult<KnowledgeLevel>;
    /// Lists every knowledge level ordered by name.
    fn list_knowledge_levels(&self) -> RepoResult<Vec<KnowledgeLevel>>;
    fn get_knowledge_level(&self, id: KnowledgeLevelId) -> RepoResult<Option<KnowledgeLevel>>;
    fn delete_knowledge_level(&self, id: KnowledgeLevelId) -> RepoResult<()>;
}

/// SQLite-backed taxonomy repository.
pub struct SqliteTaxonomyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaxonomyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaxonomyRepository for SqliteTaxonomyRepository<'_> {
    fn create_part_of_speech(&self, input: &NewPartOfSpeech) -> RepoResult<PartOfSpeech> {
        let id: PartOfSpeechId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO parts_of_speech (id, short_name, name, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                input.short_name.as_str(),
                input.name.as_str(),
                input.description.as_str(),
            ],
        )?;

        Ok(PartOfSpeech {
            id,
            short_name: input.short_name.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
        })
    }

    fn list_parts_of_speech(&self) -> RepoResult<Vec<PartOfSpeech>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, short_name, name, description
             FROM parts_of_speech
             ORDER BY rowid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut catalog = Vec::new();
        while let Some(row) = rows.next()? {
            catalog.push(parse_part_of_speech_row(row)?);
        }

        Ok(catalog)
    }

    fn get_part_of_speech(&self, id: PartOfSpeechId) -> RepoResult<Option<PartOfSpeech>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, short_name, name, description
             FROM parts_of_speech
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_part_of_speech_row(row)?));
        }

        Ok(None)
    }

    fn delete_part_of_speech(&self, id: PartOfSpeechId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM parts_of_speech WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "part of speech",
                id,
            });
        }

        Ok(())
    }

    fn create_knowledge_level(&self, input: &NewKnowledgeLevel) -> RepoResult<KnowledgeLevel> {
        let id: KnowledgeLevelId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO knowledge_levels (id, name, description)
             VALUES (?1, ?2, ?3);",
            params![
                id.to_string(),
                input.name.as_str(),
                input.description.as_str(),
            ],
        )?;

        Ok(KnowledgeLevel {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
        })
    }

    fn list_knowledge_levels(&self) -> RepoResult<Vec<KnowledgeLevel>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description
             FROM knowledge_levels
             ORDER BY name ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut catalog = Vec::new();
        while let Some(row) = rows.next()? {
            catalog.push(parse_knowledge_level_row(row)?);
        }

        Ok(catalog)
    }

    fn get_knowledge_level(&self, id: KnowledgeLevelId) -> RepoResult<Option<KnowledgeLevel>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description
             FROM knowledge_levels
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_knowledge_level_row(row)?));
        }

        Ok(None)
    }

    fn delete_knowledge_level(&self, id: KnowledgeLevelId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM knowledge_levels WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "knowledge level",
                id,
            });
        }

        Ok(())
    }
}

fn parse_part_of_speech_row(row: &Row<'_>) -> RepoResult<PartOfSpeech> {
    let id_text: String = row.get("id")?;
    Ok(PartOfSpeech {
        id: parse_uuid("parts_of_speech.id", &id_text)?,
        short_name: row.get("short_name")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

fn parse_knowledge_level_row(row: &Row<'_>) -> RepoResult<KnowledgeLevel> {
    let id_text: String = row.get("id")?;
    Ok(KnowledgeLevel {
        id: parse_uuid("knowledge_levels.id", &id_text)?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
