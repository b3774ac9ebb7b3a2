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

//! Permission authorization service
//!
//! Orchestrates provider calls, folds provider failures into [`ServiceError`]
//! and emits the audit trail: one "attempting" event before the provider is
//! consulted and one outcome event after it answers, all inside a span that
//! carries the operation tag, the user and the permission.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::{ProviderError, ServiceError};
use crate::provider::PermissionsProvider;
use crate::types::{PermissionName, UserId};

pub const ADD_OP: &str = "permissions.AddPerm";
pub const REMOVE_OP: &str = "permissions.RemovePerm";
pub const CHECK_OP: &str = "permissions.CheckPerm";
pub const LIST_OP: &str = "permissions.ListPerm";

pub struct PermissionService {
    provider: Arc<dyn PermissionsProvider>,
}

impl PermissionService {
    pub fn new(provider: Arc<dyn PermissionsProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip_all, fields(op = ADD_OP, user_id = %user_id, permission = %permission))]
    pub async fn add_perm(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ServiceError> {
        info!("attempting to add permission");

        match self.provider.add_permission(user_id, permission).await {
            Ok(added) => {
                info!("permission added successfully");
                Ok(added)
            }
            Err(cause) => {
                let fault = match cause {
                    ProviderError::UserNotFound => Some(ServiceError::UserNotFound { op: ADD_OP }),
                    ProviderError::PermissionExists => Some(ServiceError::PermissionExists { op: ADD_OP }),
                    ProviderError::InvalidPermission => Some(ServiceError::InvalidPermissions { op: ADD_OP }),
                    _ => None,
                };
                Err(normalize(cause, fault, "failed to add permission"))
            }
        }
    }

    #[instrument(skip_all, fields(op = REMOVE_OP, user_id = %user_id, permission = %permission))]
    pub async fn remove_perm(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ServiceError> {
        info!("attempting to remove permission");

        match self.provider.remove_permission(user_id, permission).await {
            Ok(removed) => {
                info!("permission removed successfully");
                Ok(removed)
            }
            Err(cause) => {
                let fault = match cause {
                    ProviderError::UserNotFound => Some(ServiceError::UserNotFound { op: REMOVE_OP }),
                    ProviderError::PermissionNotFound => Some(ServiceError::PermissionNotFound { op: REMOVE_OP }),
                    ProviderError::InvalidPermission => Some(ServiceError::InvalidPermissions { op: REMOVE_OP }),
                    _ => None,
                };
                Err(normalize(cause, fault, "failed to remove permission"))
            }
        }
    }

    #[instrument(skip_all, fields(op = CHECK_OP, user_id = %user_id, permission = %permission))]
    pub async fn check_perm(&self, user_id: UserId, permission: &PermissionName) -> Result<bool, ServiceError> {
        info!("attempting to check permission");

        match self.provider.check_permission(user_id, permission).await {
            Ok(granted) => {
                info!("permission checked successfully");
                if granted {
                    info!("user has permission");
                } else {
                    info!("user does not have permission");
                }
                Ok(granted)
            }
            Err(cause) => {
                let fault = match cause {
                    ProviderError::UserNotFound => Some(ServiceError::UserNotFound { op: CHECK_OP }),
                    ProviderError::InvalidPermission => Some(ServiceError::InvalidPermissions { op: CHECK_OP }),
                    _ => None,
                };
                Err(normalize(cause, fault, "failed to check permission"))
            }
        }
    }

    /// Lists the grants the provider holds for `user_id`; provider errors pass through unmodified
    #[instrument(skip_all, fields(op = LIST_OP, user_id = %user_id))]
    pub async fn list_perm(&self, user_id: UserId) -> Result<Vec<PermissionName>, ServiceError> {
        info!("attempting to list permissions");

        let permissions = self.provider.list_permissions(user_id).await.map_err(|cause| normalize(cause, None, "failed to list permissions"))?;

        info!(count = permissions.len(), "permissions listed successfully");
        Ok(permissions)
    }
}

/// Logs `cause` at the severity its tier calls for and picks the error to return
fn normalize(cause: ProviderError, fault: Option<ServiceError>, failure: &str) -> ServiceError {
    match fault {
        Some(fault) => {
            warn!(error = %cause, "{}", cause);
            fault
        }
        None => {
            error!(error = %cause, "{}", failure);
            ServiceError::Provider(cause)
        }
    }
}
