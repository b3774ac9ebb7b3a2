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

//! Permissions service implementation
//!
//! Validates inbound requests before any business logic runs and folds every
//! service failure into a generic `INTERNAL` status. Only the audit log can
//! tell a missing user apart from a storage outage.

use dotauth_core::{PermissionService, PermissionVocabulary, ServiceError};
use std::sync::Arc;
use tonic::{Request, Response, Result as TonicResult, Status};
use tracing::{Instrument, Span, debug, info_span, warn};

use crate::middleware::tracing::RequestMetadata;
use crate::proto::permissions_server::Permissions;
use crate::proto::{
    AddPermissionRequest, AddPermissionResponse, CheckPermissionRequest, CheckPermissionResponse, ListPermissionsRequest, ListPermissionsResponse, RemovePermissionRequest,
    RemovePermissionResponse,
};

use super::validation::{ValidationError, validate_grant, validate_user_id};

const INTERNAL_MESSAGE: &str = "internal error";

/// gRPC front of [`PermissionService`]
pub struct PermissionsApi {
    service: Arc<PermissionService>,
    vocabulary: PermissionVocabulary,
}

impl PermissionsApi {
    pub fn new(service: Arc<PermissionService>, vocabulary: PermissionVocabulary) -> Self {
        Self { service, vocabulary }
    }

    pub fn vocabulary(&self) -> &PermissionVocabulary {
        &self.vocabulary
    }

    async fn check(&self, req: CheckPermissionRequest) -> Result<CheckPermissionResponse, Status> {
        let (user_id, permission) = validate_grant(req.user_id, &req.permission, &self.vocabulary).map_err(rejected)?;

        let has_permission = self.service.check_perm(user_id, &permission).await.map_err(internal)?;

        Ok(CheckPermissionResponse { has_permission })
    }

    async fn add(&self, req: AddPermissionRequest) -> Result<AddPermissionResponse, Status> {
        let (user_id, permission) = validate_grant(req.user_id, &req.permission, &self.vocabulary).map_err(rejected)?;

        let success = self.service.add_perm(user_id, &permission).await.map_err(internal)?;

        Ok(AddPermissionResponse { success })
    }

    async fn remove(&self, req: RemovePermissionRequest) -> Result<RemovePermissionResponse, Status> {
        let (user_id, permission) = validate_grant(req.user_id, &req.permission, &self.vocabulary).map_err(rejected)?;

        let success = self.service.remove_perm(user_id, &permission).await.map_err(internal)?;

        Ok(RemovePermissionResponse { success })
    }

    async fn list(&self, req: ListPermissionsRequest) -> Result<ListPermissionsResponse, Status> {
        let user_id = validate_user_id(req.user_id).map_err(rejected)?;

        let permissions = self.service.list_perm(user_id).await.map_err(internal)?;

        Ok(ListPermissionsResponse {
            permissions: permissions.into_iter().map(String::from).collect(),
        })
    }
}

#[tonic::async_trait]
impl Permissions for PermissionsApi {
    async fn check_permission(&self, request: Request<CheckPermissionRequest>) -> TonicResult<Response<CheckPermissionResponse>> {
        let span = request_span("CheckPermission", &request);
        self.check(request.into_inner()).instrument(span).await.map(Response::new)
    }

    async fn add_permission(&self, request: Request<AddPermissionRequest>) -> TonicResult<Response<AddPermissionResponse>> {
        let span = request_span("AddPermission", &request);
        self.add(request.into_inner()).instrument(span).await.map(Response::new)
    }

    async fn remove_permission(&self, request: Request<RemovePermissionRequest>) -> TonicResult<Response<RemovePermissionResponse>> {
        let span = request_span("RemovePermission", &request);
        self.remove(request.into_inner()).instrument(span).await.map(Response::new)
    }

    async fn list_permissions(&self, request: Request<ListPermissionsRequest>) -> TonicResult<Response<ListPermissionsResponse>> {
        let span = request_span("ListPermissions", &request);
        self.list(request.into_inner()).instrument(span).await.map(Response::new)
    }
}

fn request_span<T>(method: &'static str, request: &Request<T>) -> Span {
    let request_id = request.extensions().get::<RequestMetadata>().map(|metadata| metadata.request_id.as_str()).unwrap_or("unassigned");

    info_span!("grpc_request", method, request_id = %request_id)
}

fn rejected(err: ValidationError) -> Status {
    warn!(reason = %err, "Rejected invalid request");
    err.into()
}

/// Domain and infrastructure faults both leave as `INTERNAL`; the cause is never sent to the caller
fn internal(err: ServiceError) -> Status {
    match &err {
        ServiceError::UserNotFound { .. } | ServiceError::PermissionExists { .. } | ServiceError::PermissionNotFound { .. } | ServiceError::InvalidPermissions { .. } => {
            debug!(error = %err, "Domain fault reported as internal error");
        }
        ServiceError::Provider(_) => {
            debug!(error = %err, "Provider fault reported as internal error");
        }
    }
    Status::internal(INTERNAL_MESSAGE)
}
