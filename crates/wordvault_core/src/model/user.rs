//! Identity domain model.
//!
//! # Responsibility
//! - Define User, Profile and Session records plus their field validators.
//! - Own name capitalization applied on every account save.
//!
//! # Invariants
//! - `username` and `email` are unique across the whole store.
//! - A user has at most one profile; the profile dies with the user.
//! - Accounts start inactive; profile creation activates them.

use crate::model::ValidationError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an account.
pub type UserId = Uuid;

/// Opaque bearer token identifying one authenticated session.
pub type SessionToken = Uuid;

const USERNAME_MAX_CHARS: usize = 64;
const EMAIL_MAX_CHARS: usize = 255;
const MIN_PASSWORD_CHARS: usize = 8;
const MAX_PLAUSIBLE_AGE_YEARS: u32 = 120;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._-]{2,63}$").expect("valid username regex"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}[\p{L}'-]{0,63}$").expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Registered account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display handle, unique store-wide.
    pub username: String,
    /// Login identity, unique store-wide.
    pub email: String,
    /// Stored capitalized (first char upper, rest lower).
    pub first_name: String,
    pub last_name: String,
    /// False until a profile is attached.
    pub is_active: bool,
    /// Epoch ms registration timestamp.
    pub date_joined: i64,
}

/// Profile gender choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// One-to-one companion record for a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub gender: Gender,
    /// Optional avatar URL.
    pub avatar: Option<String>,
    pub date_of_birth: NaiveDate,
}

/// Authenticated session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Absolute epoch ms expiry for remember-me sessions.
    /// `None` means client-scoped: the transport layer ends the session.
    pub expires_at: Option<i64>,
}

impl Session {
    /// Returns whether this session is still usable at `now` (epoch ms).
    pub fn is_live_at(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}

/// Validated registration input before hashing and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    /// Validates raw registration fields and applies name capitalization.
    pub fn parse(
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, ValidationError> {
        validate_username(username)?;
        validate_email(email)?;
        validate_name("first name", first_name)?;
        validate_name("last name", last_name)?;
        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
            first_name: capitalize_name(first_name),
            last_name: capitalize_name(last_name),
        })
    }
}

/// Checks the account username pattern: an ASCII letter followed by
/// letters, digits, `.`, `_` or `-`, 3 to 64 characters total.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > USERNAME_MAX_CHARS || !USERNAME_RE.is_match(value) {
        return Err(ValidationError::Username {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Checks the login email shape and length.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > EMAIL_MAX_CHARS || !EMAIL_RE.is_match(value) {
        return Err(ValidationError::Email {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Checks a person-name field: letters plus `'`/`-`, up to 64 characters.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if !NAME_RE.is_match(value) {
        return Err(ValidationError::Name {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Checks the minimum password length before hashing.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_CHARS,
        });
    }
    Ok(())
}

/// Checks birth-date plausibility against today's calendar date.
///
/// Rejects dates in the future and ages above 120 years.
pub fn validate_birth_date(date: NaiveDate) -> Result<(), ValidationError> {
    plausible_birth_date(date, chrono::Utc::now().date_naive())
}

fn plausible_birth_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    let Some(age_years) = today.years_since(date) else {
        return Err(ValidationError::BirthDateInFuture { date });
    };
    if age_years > MAX_PLAUSIBLE_AGE_YEARS {
        return Err(ValidationError::BirthDateImplausible { date });
    }
    Ok(())
}

/// Capitalizes a name: first character upper-cased, remainder lower-cased.
pub fn capitalize_name(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
