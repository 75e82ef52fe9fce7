//! Identity use-case service.
//!
//! # Responsibility
//! - Provide register/login/session/profile entry points for core callers.
//! - Own credential checks and session expiry policy.
//!
//! # Invariants
//! - Unknown email and wrong password are indistinguishable to the caller.
//! - Accounts start inactive; profile creation activates them.
//! - Plaintext passwords are hashed before they reach the repository.

use crate::auth::{hash_password, verify_password, PasswordError};
use crate::model::user::{
    validate_birth_date, validate_password, Gender, NewUser, Profile, Session, SessionToken, User,
    UserId,
};
use crate::model::ValidationError;
use crate::repo::account_repo::AccountRepository;
use crate::repo::RepoError;
use crate::service::now_epoch_ms;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DEFAULT_REMEMBER_MAX_AGE_MS: i64 = 14 * 24 * 60 * 60 * 1000;

/// Session lifetime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime granted to remember-me sessions, in milliseconds.
    pub remember_max_age_ms: i64,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            remember_max_age_ms: DEFAULT_REMEMBER_MAX_AGE_MS,
        }
    }
}

/// Service error for identity use-cases.
#[derive(Debug)]
pub enum AccountError {
    /// Field-level input failure.
    Validation(ValidationError),
    /// Hashing or stored-hash failure.
    Password(PasswordError),
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// Missing, unknown or expired session token.
    Unauthenticated,
    /// Persistence-layer failure, including uniqueness conflicts.
    Repo(RepoError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Password(err) => write!(f, "{err}"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Unauthenticated => write!(f, "not authenticated"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Password(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidCredentials | Self::Unauthenticated => None,
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PasswordError> for AccountError {
    fn from(value: PasswordError) -> Self {
        Self::Password(value)
    }
}

impl From<RepoError> for AccountError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Identity service facade over the account repository.
pub struct AccountService<R: AccountRepository> {
    repo: R,
    policy: SessionPolicy,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a service with the default session policy.
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, SessionPolicy::default())
    }

    pub fn with_policy(repo: R, policy: SessionPolicy) -> Self {
        Self { repo, policy }
    }

    /// Registers a new inactive account.
    ///
    /// Validates every field, capitalizes names and hashes the password
    /// before anything is persisted.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        validate_password(password)?;
        let new_user = NewUser::parse(username, email, first_name, last_name)?;
        let password_hash = hash_password(password)?;
        let user = self.repo.create_user(&new_user, &password_hash)?;
        info!(
            "event=register module=account status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Checks credentials and opens a session.
    ///
    /// `remember = true` grants the configured long lifetime; `false`
    /// leaves expiry to the transport layer. Inactive accounts may log
    /// in; the caller routes them to profile creation.
    pub fn authenticate(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<Session, AccountError> {
        let Some(login) = self.repo.find_login_by_email(email)? else {
            info!("event=login module=account status=denied");
            return Err(AccountError::InvalidCredentials);
        };
        if !verify_password(password, &login.password_hash)? {
            info!("event=login module=account status=denied");
            return Err(AccountError::InvalidCredentials);
        }

        let now = now_epoch_ms();
        let session = Session {
            token: Uuid::new_v4(),
            user_id: login.user.id,
            created_at: now,
            expires_at: remember.then(|| now + self.policy.remember_max_age_ms),
        };
        self.repo.create_session(&session)?;
        info!(
            "event=login module=account status=ok user_id={} remember={remember}",
            login.user.id
        );
        Ok(session)
    }

    /// Resolves a session token to its account.
    ///
    /// Expired sessions are removed on sight.
    pub fn current_user(&self, token: SessionToken) -> Result<User, AccountError> {
        let Some(session) = self.repo.get_session(token)? else {
            return Err(AccountError::Unauthenticated);
        };
        if !session.is_live_at(now_epoch_ms()) {
            self.repo.delete_session(token)?;
            return Err(AccountError::Unauthenticated);
        }

        match self.repo.get_user(session.user_id)? {
            Some(user) => Ok(user),
            None => Err(AccountError::Unauthenticated),
        }
    }

    /// Ends a session. Unknown tokens are a no-op.
    pub fn logout(&self, token: SessionToken) -> Result<(), AccountError> {
        self.repo.delete_session(token)?;
        Ok(())
    }

    /// Attaches a profile and activates the account.
    ///
    /// A second call is a no-op returning the existing profile.
    pub fn create_profile(
        &self,
        user_id: UserId,
        gender: Gender,
        date_of_birth: NaiveDate,
        avatar: Option<&str>,
    ) -> Result<Profile, AccountError> {
        if let Some(existing) = self.repo.get_profile(user_id)? {
            return Ok(existing);
        }

        validate_birth_date(date_of_birth)?;
        let avatar = match avatar.map(str::trim) {
            None | Some("") => None,
            Some(url) => Some(url.to_string()),
        };
        let profile = Profile {
            user_id,
            gender,
            avatar,
            date_of_birth,
        };
        self.repo.create_profile(&profile)?;
        self.repo.activate_user(user_id)?;
        info!("event=profile_create module=account status=ok user_id={user_id}");
        Ok(profile)
    }

    pub fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, AccountError> {
        Ok(self.repo.get_profile(user_id)?)
    }

    /// Removes the account and everything it owns.
    pub fn delete_account(&self, user_id: UserId) -> Result<(), AccountError> {
        self.repo.delete_user(user_id)?;
        info!("event=account_delete module=account status=ok user_id={user_id}");
        Ok(())
    }

    /// Removes sessions already expired at the current time.
    pub fn purge_expired_sessions(&self) -> Result<usize, AccountError> {
        Ok(self.repo.purge_expired_sessions(now_epoch_ms())?)
    }
}
