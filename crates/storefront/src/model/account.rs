use super::UserId;
use serde::Serialize;
use std::fmt;

/// Credentials held by the local auth provider.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub password: String,
}

#[derive(Clone)]
pub struct AccountCreate {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Compared case-insensitively.
    pub email: Option<String>,
}

// Passwords stay out of logs.

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AccountCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCreate")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("email", &self.email)
            .field("password_changed", &self.password.is_some())
            .finish()
    }
}
