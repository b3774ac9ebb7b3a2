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

//! Closed set of permission names accepted by the API

use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

use crate::types::PermissionName;

/// Names granted out of the box
pub const DEFAULT_PERMISSIONS: [&str; 4] = ["read", "write", "delete", "update"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("permission vocabulary cannot be empty")]
    Empty,
    #[error("permission names cannot be blank")]
    BlankName,
}

/// Immutable set of allowed permission names.
///
/// Built once from configuration and handed to whoever validates requests;
/// extending it is a deployment change, not a runtime operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionVocabulary {
    names: BTreeSet<PermissionName>,
}

impl PermissionVocabulary {
    pub fn new<I, S>(names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(VocabularyError::BlankName);
            }
            set.insert(PermissionName::new(name));
        }

        if set.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self { names: set })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Looks up `name` and returns the typed permission if it is allowed
    pub fn resolve(&self, name: &str) -> Option<PermissionName> {
        self.names.get(name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PermissionName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for PermissionVocabulary {
    fn default() -> Self {
        Self {
            names: DEFAULT_PERMISSIONS.iter().map(|name| PermissionName::new(*name)).collect(),
        }
    }
}

impl FromStr for PermissionVocabulary {
    type Err = VocabularyError;

    /// Parses a comma-separated list such as `"read, write"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(',').map(str::trim).filter(|segment| !segment.is_empty()))
    }
}
