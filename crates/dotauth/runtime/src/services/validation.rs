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

//! Request validation for the permissions API
//!
//! Checks run in a fixed order and stop at the first failure: user id, then
//! presence of the permission, then vocabulary membership.

use dotauth_core::{PermissionName, PermissionVocabulary, UserId};
use thiserror::Error;
use tonic::Status;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user_id is required")]
    MissingUserId,
    #[error("permission is required")]
    MissingPermission,
    #[error("invalid permission")]
    InvalidPermission,
}

impl From<ValidationError> for Status {
    fn from(err: ValidationError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

pub fn validate_user_id(raw: i64) -> Result<UserId, ValidationError> {
    UserId::new(raw).ok_or(ValidationError::MissingUserId)
}

pub fn validate_grant(raw_user_id: i64, permission: &str, vocabulary: &PermissionVocabulary) -> Result<(UserId, PermissionName), ValidationError> {
    let user_id = validate_user_id(raw_user_id)?;

    if permission.is_empty() {
        return Err(ValidationError::MissingPermission);
    }

    let permission = vocabulary.resolve(permission).ok_or(ValidationError::InvalidPermission)?;

    Ok((user_id, permission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_error_precedence() {
        let vocabulary = PermissionVocabulary::default();

        assert_eq!(validate_grant(0, "", &vocabulary), Err(ValidationError::MissingUserId));
        assert_eq!(validate_grant(0, "execute", &vocabulary), Err(ValidationError::MissingUserId));
        assert_eq!(validate_grant(7, "", &vocabulary), Err(ValidationError::MissingPermission));
        assert_eq!(validate_grant(7, "execute", &vocabulary), Err(ValidationError::InvalidPermission));
        assert_eq!(validate_grant(7, " read", &vocabulary), Err(ValidationError::InvalidPermission));
    }

    #[test]
    fn test_valid_grant() {
        let (user_id, permission) = validate_grant(7, "write", &PermissionVocabulary::default()).unwrap();

        assert_eq!(user_id.get(), 7);
        assert_eq!(permission.as_str(), "write");
    }

    #[test]
    fn test_alternate_vocabulary() {
        let vocabulary: PermissionVocabulary = "deploy,audit".parse().unwrap();

        assert!(validate_grant(7, "deploy", &vocabulary).is_ok());
        assert_eq!(validate_grant(7, "read", &vocabulary), Err(ValidationError::InvalidPermission));
    }

    #[test]
    fn test_status_conversion() {
        let status = Status::from(ValidationError::MissingPermission);

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "permission is required");
    }
}
