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

//! Error taxonomy shared by the provider contract and the service layer

use thiserror::Error;

/// Outcome signals a persistence backend may report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("user not found")]
    UserNotFound,
    #[error("permission already exists")]
    PermissionExists,
    #[error("permission not found")]
    PermissionNotFound,
    #[error("invalid permission")]
    InvalidPermission,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by [`PermissionService`](crate::PermissionService).
///
/// Domain faults carry the tag of the operation that produced them. Anything
/// the operation does not recognise is returned as `Provider` unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{op}: user not found")]
    UserNotFound { op: &'static str },

    #[error("{op}: permission already exists")]
    PermissionExists { op: &'static str },

    #[error("{op}: permission not found")]
    PermissionNotFound { op: &'static str },

    #[error("{op}: invalid permissions")]
    InvalidPermissions { op: &'static str },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ServiceError {
    /// Whether this is a business-meaningful failure rather than an infrastructure fault
    pub fn is_domain_fault(&self) -> bool {
        !matches!(self, ServiceError::Provider(_))
    }

    /// Operation tag for domain faults
    pub fn op(&self) -> Option<&'static str> {
        match self {
            ServiceError::UserNotFound { op }
            | ServiceError::PermissionExists { op }
            | ServiceError::PermissionNotFound { op }
            | ServiceError::InvalidPermissions { op } => Some(*op),
            ServiceError::Provider(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_fault_display_carries_op() {
        let err = ServiceError::UserNotFound { op: "permissions.AddPerm" };

        assert_eq!(err.to_string(), "permissions.AddPerm: user not found");
        assert_eq!(err.op(), Some("permissions.AddPerm"));
        assert!(err.is_domain_fault());
    }

    #[test]
    fn test_provider_fault_is_transparent() {
        let err = ServiceError::from(ProviderError::Unavailable("connection refused".to_string()));

        assert_eq!(err.to_string(), "storage unavailable: connection refused");
        assert_eq!(err.op(), None);
        assert!(!err.is_domain_fault());
    }
}
