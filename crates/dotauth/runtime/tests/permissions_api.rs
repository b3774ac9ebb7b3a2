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

//! End-to-end behaviour of the permissions gRPC handlers
//!
//! Handlers are driven directly through the generated service trait, so no
//! socket is opened.

use dotauth_core::testing::AuditCapture;
use dotauth_core::{InMemoryProvider, MockPermissionsProvider, PermissionName, PermissionService, PermissionVocabulary, PermissionsProvider, ProviderError};
use dotauth_runtime::PermissionsApi;
use dotauth_runtime::proto::permissions_server::Permissions;
use dotauth_runtime::proto::{AddPermissionRequest, CheckPermissionRequest, ListPermissionsRequest, RemovePermissionRequest};
use std::sync::Arc;
use tonic::{Code, Request, Status};
use tracing::Level;

fn api_with(provider: Arc<dyn PermissionsProvider>) -> PermissionsApi {
    PermissionsApi::new(Arc::new(PermissionService::new(provider)), PermissionVocabulary::default())
}

fn in_memory_api() -> PermissionsApi {
    api_with(Arc::new(InMemoryProvider::new()))
}

fn assert_status(status: Status, code: Code, message: &str) {
    assert_eq!(status.code(), code);
    assert_eq!(status.message(), message);
}

fn check(user_id: i64, permission: &str) -> Request<CheckPermissionRequest> {
    Request::new(CheckPermissionRequest {
        user_id,
        permission: permission.to_string(),
    })
}

fn add(user_id: i64, permission: &str) -> Request<AddPermissionRequest> {
    Request::new(AddPermissionRequest {
        user_id,
        permission: permission.to_string(),
    })
}

fn remove(user_id: i64, permission: &str) -> Request<RemovePermissionRequest> {
    Request::new(RemovePermissionRequest {
        user_id,
        permission: permission.to_string(),
    })
}

fn list(user_id: i64) -> Request<ListPermissionsRequest> {
    Request::new(ListPermissionsRequest { user_id })
}

#[tokio::test]
async fn test_check_without_user_id() {
    // A mock without expectations panics if the provider is reached
    let api = api_with(Arc::new(MockPermissionsProvider::new()));

    let status = api.check_permission(check(0, "read")).await.unwrap_err();

    assert_status(status, Code::InvalidArgument, "user_id is required");
}

#[tokio::test]
async fn test_add_without_permission() {
    let api = api_with(Arc::new(MockPermissionsProvider::new()));

    let status = api.add_permission(add(7, "")).await.unwrap_err();

    assert_status(status, Code::InvalidArgument, "permission is required");
}

#[tokio::test]
async fn test_remove_unknown_permission() {
    let api = api_with(Arc::new(MockPermissionsProvider::new()));

    let status = api.remove_permission(remove(7, "execute")).await.unwrap_err();

    assert_status(status, Code::InvalidArgument, "invalid permission");
}

#[tokio::test]
async fn test_list_without_user_id() {
    let api = api_with(Arc::new(MockPermissionsProvider::new()));

    let status = api.list_permissions(list(0)).await.unwrap_err();

    assert_status(status, Code::InvalidArgument, "user_id is required");
}

#[tokio::test]
async fn test_add_success_emits_two_audit_lines() {
    let capture = AuditCapture::new();
    let _guard = capture.install();

    let mut mock = MockPermissionsProvider::new();
    mock.expect_add_permission()
        .withf(|user_id, permission| user_id.get() == 7 && permission.as_str() == "write")
        .times(1)
        .returning(|_, _| Ok(true));
    let api = api_with(Arc::new(mock));

    let response = api.add_permission(add(7, "write")).await.unwrap().into_inner();

    assert!(response.success);
    assert_eq!(
        capture.messages_from("dotauth_core::service"),
        vec![
            (Level::INFO, "attempting to add permission".to_string()),
            (Level::INFO, "permission added successfully".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_list_returns_provider_permissions() {
    let mut mock = MockPermissionsProvider::new();
    mock.expect_list_permissions()
        .withf(|user_id| user_id.get() == 7)
        .returning(|_| Ok(vec![PermissionName::new("read"), PermissionName::new("write")]));
    let api = api_with(Arc::new(mock));

    let response = api.list_permissions(list(7)).await.unwrap().into_inner();

    assert_eq!(response.permissions, vec!["read".to_string(), "write".to_string()]);
}

#[tokio::test]
async fn test_service_failures_become_opaque_internal_errors() {
    let causes = [
        ProviderError::UserNotFound,
        ProviderError::PermissionExists,
        ProviderError::PermissionNotFound,
        ProviderError::InvalidPermission,
        ProviderError::Unavailable("connection reset by peer".to_string()),
    ];

    for cause in causes {
        let mut mock = MockPermissionsProvider::new();
        let (add_cause, remove_cause, check_cause, list_cause) = (cause.clone(), cause.clone(), cause.clone(), cause.clone());
        mock.expect_add_permission().returning(move |_, _| Err(add_cause.clone()));
        mock.expect_remove_permission().returning(move |_, _| Err(remove_cause.clone()));
        mock.expect_check_permission().returning(move |_, _| Err(check_cause.clone()));
        mock.expect_list_permissions().returning(move |_| Err(list_cause.clone()));
        let api = api_with(Arc::new(mock));

        assert_status(api.add_permission(add(7, "read")).await.unwrap_err(), Code::Internal, "internal error");
        assert_status(api.remove_permission(remove(7, "read")).await.unwrap_err(), Code::Internal, "internal error");
        assert_status(api.check_permission(check(7, "read")).await.unwrap_err(), Code::Internal, "internal error");
        assert_status(api.list_permissions(list(7)).await.unwrap_err(), Code::Internal, "internal error");
    }
}

#[tokio::test]
async fn test_grant_lifecycle() {
    let api = in_memory_api();

    assert!(api.add_permission(add(7, "write")).await.unwrap().into_inner().success);
    assert!(api.check_permission(check(7, "write")).await.unwrap().into_inner().has_permission);
    assert!(!api.check_permission(check(7, "read")).await.unwrap().into_inner().has_permission);

    assert!(api.add_permission(add(7, "read")).await.unwrap().into_inner().success);
    let listed = api.list_permissions(list(7)).await.unwrap().into_inner().permissions;
    assert_eq!(listed, vec!["read".to_string(), "write".to_string()]);

    assert!(api.remove_permission(remove(7, "write")).await.unwrap().into_inner().success);
    assert!(!api.check_permission(check(7, "write")).await.unwrap().into_inner().has_permission);
}

#[tokio::test]
async fn test_domain_faults_do_not_leak_through_the_wire() {
    let api = in_memory_api();

    // Unknown user
    assert_status(api.check_permission(check(99, "read")).await.unwrap_err(), Code::Internal, "internal error");

    // Duplicate grant
    api.add_permission(add(99, "read")).await.unwrap();
    assert_status(api.add_permission(add(99, "read")).await.unwrap_err(), Code::Internal, "internal error");
}

#[tokio::test]
async fn test_alternate_vocabulary() {
    let vocabulary: PermissionVocabulary = "deploy,audit".parse().unwrap();
    let provider: Arc<dyn PermissionsProvider> = Arc::new(InMemoryProvider::new());
    let api = PermissionsApi::new(Arc::new(PermissionService::new(provider)), vocabulary);

    assert!(api.add_permission(add(3, "deploy")).await.unwrap().into_inner().success);
    assert_status(api.add_permission(add(3, "read")).await.unwrap_err(), Code::InvalidArgument, "invalid permission");
    assert_eq!(api.vocabulary().len(), 2);
}
