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

//! Permission authorization core
//!
//! Holds the value types shared with the gRPC runtime, the contract a
//! persistence backend must satisfy, and the service that normalizes backend
//! failures into a closed error taxonomy while emitting audit events.
//!
//! ```text
//! PermissionsApi (runtime) -> PermissionService -> dyn PermissionsProvider
//! ```

pub mod error;
pub mod memory;
pub mod provider;
pub mod service;
pub mod types;
pub mod vocabulary;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{ProviderError, ServiceError};
pub use memory::InMemoryProvider;
pub use provider::PermissionsProvider;
pub use service::PermissionService;
pub use types::{PermissionName, UserId};
pub use vocabulary::{PermissionVocabulary, VocabularyError};

#[cfg(any(test, feature = "testing"))]
pub use provider::MockPermissionsProvider;
