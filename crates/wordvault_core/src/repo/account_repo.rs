//! Account repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist users, profiles and sessions.
//! - Keep credential material (password hashes) out of the `User` record.
//!
//! # Invariants
//! - `users.is_active` flips to 1 only through `activate_user`.
//! - Deleting a user cascades to profile, sessions and vocabulary rows.

use crate::model::user::{Gender, NewUser, Profile, Session, SessionToken, User, UserId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    first_name,
    last_name,
    is_active,
    date_joined
FROM users";

/// Account row joined with its stored credential hash, for login checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRow {
    pub user: User,
    pub password_hash: String,
}

/// Repository interface for identity persistence.
pub trait AccountRepository {
    /// Inserts a new inactive user and returns the stored record.
    fn create_user(&self, new_user: &NewUser, password_hash: &str) -> RepoResult<User>;
    /// Looks up the login row for an email, hash included.
    fn find_login_by_email(&self, email: &str) -> RepoResult<Option<LoginRow>>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Marks the account active.
    fn activate_user(&self, id: UserId) -> RepoResult<()>;
    /// Removes the user; the schema cascades to everything they own.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
    fn create_profile(&self, profile: &Profile) -> RepoResult<()>;
    fn get_profile(&self, user_id: UserId) -> RepoResult<Option<Profile>>;
    fn create_session(&self, session: &Session) -> RepoResult<()>;
    fn get_session(&self, token: SessionToken) -> RepoResult<Option<Session>>;
    /// Removes a session. Unknown tokens are a no-op.
    fn delete_session(&self, token: SessionToken) -> RepoResult<()>;
    /// Removes every session expired at `now` (epoch ms). Returns the count.
    fn purge_expired_sessions(&self, now: i64) -> RepoResult<usize>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn get_user_required(&self, id: UserId) -> RepoResult<User> {
        self.get_user(id)?.ok_or(RepoError::NotFound {
            entity: "user",
            id,
        })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_user(&self, new_user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let id: UserId = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO users (
                id,
                username,
                email,
                first_name,
                last_name,
                password_hash
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                new_user.username.as_str(),
                new_user.email.as_str(),
                new_user.first_name.as_str(),
                new_user.last_name.as_str(),
                password_hash,
            ],
        )?;

        self.get_user_required(id)
    }

    fn find_login_by_email(&self, email: &str) -> RepoResult<Option<LoginRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                username,
                email,
                first_name,
                last_name,
                is_active,
                date_joined,
                password_hash
             FROM users
             WHERE email = ?1;",
        )?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            let user = parse_user_row(row)?;
            let password_hash: String = row.get("password_hash")?;
            return Ok(Some(LoginRow {
                user,
                password_hash,
            }));
        }

        Ok(None)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn activate_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET is_active = 1 WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "user",
                id,
            });
        }

        Ok(())
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "user",
                id,
            });
        }

        Ok(())
    }

    fn create_profile(&self, profile: &Profile) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO profiles (user_id, gender, avatar, date_of_birth)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                profile.user_id.to_string(),
                gender_to_db(profile.gender),
                profile.avatar.as_deref(),
                profile.date_of_birth.to_string(),
            ],
        )?;

        Ok(())
    }

    fn get_profile(&self, user_id: UserId) -> RepoResult<Option<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, gender, avatar, date_of_birth
             FROM profiles
             WHERE user_id = ?1;",
        )?;

        let mut rows = stmt.query([user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn create_session(&self, session: &Session) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                session.token.to_string(),
                session.user_id.to_string(),
                session.created_at,
                session.expires_at,
            ],
        )?;

        Ok(())
    }

    fn get_session(&self, token: SessionToken) -> RepoResult<Option<Session>> {
        let mut stmt = self.conn.prepare(
            "SELECT token, user_id, created_at, expires_at
             FROM sessions
             WHERE token = ?1;",
        )?;

        let mut rows = stmt.query([token.to_string()])?;
        if let Some(row) = rows.next()? {
            let token_text: String = row.get("token")?;
            let user_id_text: String = row.get("user_id")?;
            return Ok(Some(Session {
                token: parse_uuid("sessions.token", &token_text)?,
                user_id: parse_uuid("sessions.user_id", &user_id_text)?,
                created_at: row.get("created_at")?,
                expires_at: row.get("expires_at")?,
            }));
        }

        Ok(None)
    }

    fn delete_session(&self, token: SessionToken) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM sessions WHERE token = ?1;",
            [token.to_string()],
        )?;

        Ok(())
    }

    fn purge_expired_sessions(&self, now: i64) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM sessions
             WHERE expires_at IS NOT NULL
               AND expires_at <= ?1;",
            [now],
        )?;

        Ok(changed)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    let is_active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in users.is_active"
            )));
        }
    };

    Ok(User {
        id: parse_uuid("users.id", &id_text)?,
        username: row.get("username")?,
        email: row.get("email")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        is_active,
        date_joined: row.get("date_joined")?,
    })
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<Profile> {
    let user_id_text: String = row.get("user_id")?;
    let gender_text: String = row.get("gender")?;
    let gender = parse_gender(&gender_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid gender value `{gender_text}` in profiles.gender"
        ))
    })?;
    let birth_text: String = row.get("date_of_birth")?;
    let date_of_birth = NaiveDate::parse_from_str(&birth_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{birth_text}` in profiles.date_of_birth"
        ))
    })?;

    Ok(Profile {
        user_id: parse_uuid("profiles.user_id", &user_id_text)?,
        gender,
        avatar: row.get("avatar")?,
        date_of_birth,
    })
}

fn gender_to_db(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "M",
        Gender::Female => "F",
    }
}

fn parse_gender(value: &str) -> Option<Gender> {
    match value {
        "M" => Some(Gender::Male),
        "F" => Some(Gender::Female),
        _ => None,
    }
}
