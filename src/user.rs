//! The signed-in user and how the controllers read them from session storage.

use std::{cell::RefCell, collections::HashMap};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The session storage key that holds the signed-in user as JSON.
pub const SESSION_USER_KEY: &str = "user";

/// The role of a user of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// An employee who submits bills.
    Employee,
    /// An admin who reviews bills.
    Admin,
}

/// A user of the application, as stored in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's email, used to tag uploaded receipts.
    pub email: String,
    /// The user's role.
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl User {
    /// Create a new employee.
    pub fn employee(email: &str) -> Self {
        Self {
            email: email.to_owned(),
            user_type: UserType::Employee,
        }
    }
}

/// Synchronous string key-value storage, such as a browser's local storage.
pub trait KeyValueStorage {
    /// Get the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str);
}

/// A [KeyValueStorage] that lives in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

/// Gives controllers access to the signed-in user.
pub trait SessionAccessor {
    /// Get the signed-in user.
    ///
    /// # Errors
    /// Returns [Error::MissingSession] if nobody is signed in, or
    /// [Error::InvalidSession] if the stored user could not be read.
    fn current_user(&self) -> Result<User, Error>;
}

impl<T: SessionAccessor + ?Sized> SessionAccessor for &T {
    fn current_user(&self) -> Result<User, Error> {
        (**self).current_user()
    }
}

/// A fixed session, handy when the user is already known.
impl SessionAccessor for User {
    fn current_user(&self) -> Result<User, Error> {
        Ok(self.clone())
    }
}

/// Reads the user from [KeyValueStorage] under [SESSION_USER_KEY] on every call.
#[derive(Debug)]
pub struct LocalStorageSession<S> {
    storage: S,
}

impl<S: KeyValueStorage> LocalStorageSession<S> {
    /// Create a session backed by `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Store `user` as the signed-in user.
    ///
    /// # Errors
    /// Returns [Error::JSONSerializationError] if the user could not be serialized.
    pub fn sign_in(&self, user: &User) -> Result<(), Error> {
        let json = serde_json::to_string(user)?;
        self.storage.set_item(SESSION_USER_KEY, &json);

        Ok(())
    }
}

impl<S: KeyValueStorage> SessionAccessor for LocalStorageSession<S> {
    fn current_user(&self) -> Result<User, Error> {
        let json = self
            .storage
            .get_item(SESSION_USER_KEY)
            .ok_or(Error::MissingSession)?;

        serde_json::from_str(&json).map_err(|error| {
            tracing::warn!("could not parse session user {json:?}: {error}");
            Error::InvalidSession(error.to_string())
        })
    }
}
