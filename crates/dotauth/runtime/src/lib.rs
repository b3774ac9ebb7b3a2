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

//! gRPC runtime for the permission authorization service
//!
//! Exposes [`PermissionsApi`](services::PermissionsApi) over tonic, together
//! with the configuration, logging and request tracing it needs to run as a
//! standalone server.

pub mod config;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod services;

pub mod proto {
    tonic::include_proto!("permissions");

    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("permissions_descriptor");
}

pub use config::{ConfigError, LogFormat, RuntimeConfig};
pub use server::{ServerError, serve};
pub use services::PermissionsApi;
