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

//! Server assembly

use dotauth_core::{PermissionService, PermissionsProvider};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tonic::transport::Server;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::middleware::TracingInterceptor;
use crate::proto::{self, permissions_server::PermissionsServer};
use crate::services::PermissionsApi;

pub const SERVICE_NAME: &str = "permissions.Permissions";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("reflection setup failed: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Wires `provider` behind the permissions API and serves until `shutdown` resolves
pub async fn serve<F>(config: RuntimeConfig, provider: Arc<dyn PermissionsProvider>, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    let service = Arc::new(PermissionService::new(provider));
    let api = PermissionsApi::new(service, config.vocabulary.clone());

    let reflection = if config.enable_reflection {
        Some(
            tonic_reflection::server::Builder::configure()
                .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
                .build()?,
        )
    } else {
        None
    };

    let permissions: Vec<&str> = config.vocabulary.iter().map(|name| name.as_str()).collect();
    info!(
        bind_address = %config.bind_address,
        reflection = config.enable_reflection,
        permissions = ?permissions,
        "Starting permissions server"
    );

    Server::builder()
        .add_optional_service(reflection)
        .add_service(PermissionsServer::with_interceptor(api, TracingInterceptor::new(SERVICE_NAME)))
        .serve_with_shutdown(config.bind_address, shutdown)
        .await?;

    info!("Permissions server stopped");
    Ok(())
}
