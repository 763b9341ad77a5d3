use super::record_error;
use crate::model::{Profile, ProfileCreate, ProfileFilter, ProfileId, ProfileUpdate, UserId};
use crate::profile_actor::ProfileError;
use async_trait::async_trait;
use record_store::{Query, RecordClient, StoreError, TableClient};
use std::collections::HashMap;
use tracing::instrument;

#[derive(Clone)]
pub struct ProfileClient {
    inner: TableClient<Profile>,
}

#[async_trait]
impl RecordClient<Profile> for ProfileClient {
    type Error = ProfileError;

    fn inner(&self) -> &TableClient<Profile> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        record_error(e)
    }
}

impl ProfileClient {
    pub fn new(inner: TableClient<Profile>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_profile(&self, params: ProfileCreate) -> Result<ProfileId, ProfileError> {
        self.inner.create(params).await.map_err(record_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: ProfileId,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        self.inner.update(id, update).await.map_err(record_error)
    }

    pub async fn profile_of(&self, user: UserId) -> Result<Option<Profile>, ProfileError> {
        let page = self
            .list(Query::new(ProfileFilter::of_users([user])).limit(1))
            .await?;
        Ok(page.items.into_iter().next())
    }

    /// Profiles of several users in one lookup, keyed by user.
    pub async fn profiles_of(
        &self,
        users: impl IntoIterator<Item = UserId>,
    ) -> Result<HashMap<UserId, Profile>, ProfileError> {
        let mut users: Vec<UserId> = users.into_iter().collect();
        users.sort();
        users.dedup();
        if users.is_empty() {
            return Ok(HashMap::new());
        }
        let page = self.list(Query::new(ProfileFilter::of_users(users))).await?;
        Ok(page
            .items
            .into_iter()
            .map(|profile| (profile.user, profile))
            .collect())
    }
}
