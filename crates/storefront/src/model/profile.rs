use super::{ProfileId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shoppers and sellers.
    #[default]
    User,
    /// Couriers.
    Delivery,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Delivery => "delivery",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "delivery" => Ok(Role::Delivery),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user: UserId,
    pub role: Role,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// For couriers, the district they serve.
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub user: UserId,
    pub role: Role,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub role: Option<Role>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    /// Any of these users; `None` means every user.
    pub users: Option<Vec<UserId>>,
    pub role: Option<Role>,
}

impl ProfileFilter {
    pub fn of_users(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            users: Some(users.into_iter().collect()),
            role: None,
        }
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        self.users
            .as_ref()
            .is_none_or(|users| users.contains(&profile.user))
            && self.role.is_none_or(|role| role == profile.role)
    }
}
