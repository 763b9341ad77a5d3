//! Sign up, sign in and profile maintenance.

use super::auth::{AuthError, AuthProvider, Session};
use crate::clients::{ProfileClient, StorageClient, WalletClient};
use crate::model::{Profile, ProfileCreate, ProfileUpdate, Role, Upload, UserId, AVATARS};
use crate::profile_actor::ProfileError;
use crate::storage_actor::StorageError;
use crate::wallet_actor::WalletError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};
use validator::Validate;

pub const MIN_PASSWORD: usize = 6;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("{0}")]
    Invalid(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Incorrect current password")]
    WrongPassword,

    #[error("No profile for user {0}")]
    NoProfile(UserId),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Runs the derived checks and reports the first failure, taking fields in
/// form order.
fn check_form<T: Validate>(form: &T, order: &[&str]) -> Result<(), IdentityError> {
    let Err(errors) = form.validate() else {
        return Ok(());
    };
    let fields = errors.field_errors();
    let message = order
        .iter()
        .filter_map(|field| fields.get(*field))
        .chain(fields.values())
        .flat_map(|failures| failures.iter())
        .next()
        .map(|failure| failure.message.as_ref().unwrap_or(&failure.code).to_string())
        .unwrap_or_else(|| errors.to_string());
    Err(IdentityError::Invalid(message))
}

#[derive(Clone, Validate)]
pub struct SignUp {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

/// The profile form. Every field is required except the avatar and the
/// password change.
#[derive(Debug, Clone, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Phone number must be at least 6 characters"))]
    pub phone: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,
    pub avatar: Option<Upload>,
    pub password: Option<PasswordChange>,
}

impl ProfileForm {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            ..self
        }
    }

    fn check(&self) -> Result<(), IdentityError> {
        check_form(self, &["name", "email", "phone", "address"])
    }
}

/// The signed-in user as pages see them.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub session: Session,
    pub profile: Profile,
}

impl CurrentUser {
    pub fn user(&self) -> UserId {
        self.session.user
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }
}

#[derive(Clone)]
pub struct IdentityService {
    auth: Arc<dyn AuthProvider>,
    profiles: ProfileClient,
    wallets: WalletClient,
    storage: StorageClient,
}

impl IdentityService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        profiles: ProfileClient,
        wallets: WalletClient,
        storage: StorageClient,
    ) -> Self {
        Self {
            auth,
            profiles,
            wallets,
            storage,
        }
    }

    /// Creates the account, a `user` profile and an empty wallet.
    #[instrument(skip(self))]
    pub async fn sign_up(&self, form: SignUp) -> Result<UserId, IdentityError> {
        let form = SignUp {
            email: form.email.trim().to_string(),
            ..form
        };
        check_form(&form, &["email", "password"])?;
        if form.password != form.confirm_password {
            return Err(IdentityError::PasswordMismatch);
        }

        let user = self.auth.sign_up(&form.email, &form.password).await?;
        self.profiles
            .create_profile(ProfileCreate {
                user,
                role: Role::User,
                email: form.email,
            })
            .await?;
        self.wallets.open_wallet(user).await?;

        info!(%user, "Signed up");
        Ok(user)
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, IdentityError> {
        let session = self.auth.sign_in(email.trim(), password).await?;
        let profile = self.profile(session.user).await?;
        Ok(CurrentUser { session, profile })
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), IdentityError> {
        Ok(self.auth.sign_out(token).await?)
    }

    /// The session behind `token`, with the user's role.
    pub async fn current(&self, token: &str) -> Result<Option<CurrentUser>, IdentityError> {
        let Some(session) = self.auth.session(token).await? else {
            return Ok(None);
        };
        let profile = self.profile(session.user).await?;
        Ok(Some(CurrentUser { session, profile }))
    }

    pub async fn profile(&self, user: UserId) -> Result<Profile, IdentityError> {
        self.profiles
            .profile_of(user)
            .await?
            .ok_or(IdentityError::NoProfile(user))
    }

    #[instrument(skip(self))]
    pub async fn assign_role(&self, user: UserId, role: Role) -> Result<Profile, IdentityError> {
        let profile = self.profile(user).await?;
        let update = ProfileUpdate {
            role: Some(role),
            ..ProfileUpdate::default()
        };
        Ok(self.profiles.update_profile(profile.id, update).await?)
    }

    /// Saves the profile form. The password is checked before anything is
    /// written; the avatar replaces `{user}/avatar` in the avatars bucket.
    #[instrument(skip(self, form), fields(avatar = form.avatar.is_some(), password = form.password.is_some()))]
    pub async fn update_profile(
        &self,
        user: UserId,
        form: ProfileForm,
    ) -> Result<Profile, IdentityError> {
        let form = form.trimmed();
        form.check()?;
        let profile = self.profile(user).await?;

        if let Some(change) = &form.password {
            if change.current.is_empty() {
                return Err(IdentityError::Invalid(
                    "Current password is required to change password".into(),
                ));
            }
            if change.new.chars().count() < MIN_PASSWORD {
                return Err(IdentityError::Invalid(
                    "Password must be at least 6 characters".into(),
                ));
            }
            if change.new != change.confirm {
                return Err(IdentityError::PasswordMismatch);
            }
            if !self.auth.verify_password(user, &change.current).await? {
                return Err(IdentityError::WrongPassword);
            }
        }

        let avatar_url = match form.avatar {
            Some(upload) => {
                let path = format!("{user}/avatar");
                self.storage
                    .upload(AVATARS, &path, &upload.content_type, upload.bytes, true)
                    .await?;
                Some(self.storage.public_url(AVATARS, &path))
            }
            None => None,
        };

        let email = form.email;
        if email != profile.email {
            self.auth.change_email(user, &email).await?;
        }
        if let Some(change) = form.password {
            self.auth.change_password(user, &change.new).await?;
            info!(%user, "Password changed");
        }

        let update = ProfileUpdate {
            role: None,
            name: Some(form.name),
            email: Some(email),
            phone: Some(form.phone),
            address: Some(form.address),
            avatar_url,
        };
        Ok(self.profiles.update_profile(profile.id, update).await?)
    }
}
