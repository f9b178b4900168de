//! # Membership Store
//!
//! Owns the user records. Identity checks for borrow requests and the
//! delete-with-active-loans policy live in the circulation desk; this store
//! only knows names, emails and ids.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use libris_core::validation::{validate_email, validate_text};
use libris_core::{CoreError, CoreResult, NewUser, User};

/// In-memory store for library members, keyed by user id.
#[derive(Debug, Default)]
pub struct Membership {
    users: BTreeMap<String, User>,
}

impl Membership {
    /// Creates an empty membership register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user.
    ///
    /// ## Errors
    /// `ValidationError` if the name is empty or the email is empty or not
    /// syntactically an email address. Nothing is stored on failure.
    pub(crate) fn add(&mut self, new: NewUser) -> CoreResult<User> {
        validate_text("name", &new.name)?;
        validate_email(&new.email)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            email: new.email.trim().to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %user.id, name = %user.name, "Adding user");

        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Removes a user record.
    pub(crate) fn remove(&mut self, id: &str) -> CoreResult<User> {
        let user = self
            .users
            .remove(id)
            .ok_or_else(|| CoreError::UserNotFound(id.to_string()))?;

        debug!(id = %user.id, name = %user.name, "Removed user");
        Ok(user)
    }

    /// Gets a user by id.
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Lists all users in id order.
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
