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

//! Request tracing interceptor for gRPC services

use std::time::Instant;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::debug;
use uuid::Uuid;

/// Metadata key a caller may use to supply its own correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every inbound request with a correlation id.
///
/// The id ends up in [`RequestMetadata`] inside the request extensions, where
/// handlers pick it up for their `grpc_request` span.
#[derive(Debug, Clone)]
pub struct TracingInterceptor {
    service_name: String,
}

impl TracingInterceptor {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }
}

impl Interceptor for TracingInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let request_id = request
            .metadata()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let user_agent = request.metadata().get("user-agent").and_then(|v| v.to_str().ok()).unwrap_or("unknown").to_string();

        debug!(
            service = %self.service_name,
            request_id = %request_id,
            user_agent = %user_agent,
            "gRPC request started"
        );

        request.extensions_mut().insert(RequestMetadata {
            request_id,
            user_agent,
            received_at: Instant::now(),
        });

        Ok(request)
    }
}

/// Request metadata for tracing
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub request_id: String,
    pub user_agent: String,
    pub received_at: Instant,
}
