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

//! Contract a persistence backend implements to store permission grants

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{PermissionName, UserId};

/// Durable store of (user, permission) grants.
///
/// Whether a duplicate add succeeds or reports `PermissionExists`, and
/// whether listing an unknown user yields an empty set or `UserNotFound`,
/// is left to the implementation.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PermissionsProvider: Send + Sync {
    async fn add_permission(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ProviderError>;

    async fn remove_permission(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ProviderError>;

    async fn check_permission(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ProviderError>;

    async fn list_permissions(&self, user_id: UserId) -> Result<Vec<PermissionName>, ProviderError>;
}
