// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! In-memory grant store
//!
//! Backs the standalone server and the round-trip tests. A user becomes
//! known on their first successful grant (or through [`InMemoryProvider::register_user`])
//! and stays known after their last grant is revoked.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ProviderError;
use crate::provider::PermissionsProvider;
use crate::types::{PermissionName, UserId};

#[derive(Debug, Default)]
pub struct InMemoryProvider {
    grants: RwLock<HashMap<UserId, BTreeSet<PermissionName>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `user_id` known without granting anything
    pub async fn register_user(&self, user_id: UserId) {
        let mut grants = self.grants.write().await;
        grants.entry(user_id).or_default();
        debug!(user_id = %user_id, "Registered user");
    }

    pub async fn user_count(&self) -> usize {
        self.grants.read().await.len()
    }
}

#[async_trait]
impl PermissionsProvider for InMemoryProvider {
    async fn add_permission(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ProviderError> {
        let mut grants = self.grants.write().await;
        let held = grants.entry(user_id).or_default();

        if !held.insert(permission.clone()) {
            return Err(ProviderError::PermissionExists);
        }
        Ok(true)
    }

    async fn remove_permission(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ProviderError> {
        let mut grants = self.grants.write().await;
        let held = grants.get_mut(&user_id).ok_or(ProviderError::UserNotFound)?;

        if !held.remove(permission) {
            return Err(ProviderError::PermissionNotFound);
        }
        Ok(true)
    }

    async fn check_permission(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ProviderError> {
        let grants = self.grants.read().await;
        let held = grants.get(&user_id).ok_or(ProviderError::UserNotFound)?;

        Ok(held.contains(permission))
    }

    async fn list_permissions(&self, user_id: UserId) -> Result<Vec<PermissionName>, ProviderError> {
        let grants = self.grants.read().await;
        let held = grants.get(&user_id).ok_or(ProviderError::UserNotFound)?;

        Ok(held.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(raw: i64) -> UserId {
        UserId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let provider = InMemoryProvider::new();
        let read = PermissionName::new("read");

        assert_eq!(provider.check_permission(user(1), &read).await, Err(ProviderError::UserNotFound));
        assert_eq!(provider.remove_permission(user(1), &read).await, Err(ProviderError::UserNotFound));
        assert_eq!(provider.list_permissions(user(1)).await, Err(ProviderError::UserNotFound));
    }

    #[tokio::test]
    async fn test_registered_user_has_no_grants() {
        let provider = InMemoryProvider::new();
        provider.register_user(user(5)).await;

        assert_eq!(provider.check_permission(user(5), &PermissionName::new("read")).await, Ok(false));
        assert_eq!(provider.list_permissions(user(5)).await, Ok(vec![]));
        assert_eq!(provider.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_add_reports_exists() {
        let provider = InMemoryProvider::new();
        let write = PermissionName::new("write");

        assert_eq!(provider.add_permission(user(2), &write).await, Ok(true));
        assert_eq!(provider.add_permission(user(2), &write).await, Err(ProviderError::PermissionExists));
    }

    #[tokio::test]
    async fn test_remove_missing_grant() {
        let provider = InMemoryProvider::new();
        provider.add_permission(user(2), &PermissionName::new("read")).await.unwrap();

        assert_eq!(
            provider.remove_permission(user(2), &PermissionName::new("write")).await,
            Err(ProviderError::PermissionNotFound)
        );
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_user_survives_last_revoke() {
        let provider = InMemoryProvider::new();
        for name in ["write", "delete", "read"] {
            provider.add_permission(user(4), &PermissionName::new(name)).await.unwrap();
        }

        let listed: Vec<String> = provider.list_permissions(user(4)).await.unwrap().into_iter().map(String::from).collect();
        assert_eq!(listed, vec!["delete", "read", "write"]);

        for name in ["write", "delete", "read"] {
            provider.remove_permission(user(4), &PermissionName::new(name)).await.unwrap();
        }
        assert_eq!(provider.check_permission(user(4), &PermissionName::new("read")).await, Ok(false));
    }
}
