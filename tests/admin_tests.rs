//! Admin API: authentication first, then the admin role gate.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::*;
use contentgate::db::Role;

fn set_active(uri: &str, token: &str, active: bool) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "active": active }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_admin_accounts_requires_auth() {
    let (app, _db, _jwt) = create_test_app().await;

    let response = send(&app, get("/api/admin/accounts")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Authentication required");
}

#[tokio::test]
async fn test_admin_accounts_requires_admin_role() {
    let (app, db, jwt) = create_test_app().await;
    let id = create_account(&db, "alice", Role::User, true).await;

    let response = send(&app, get_with_bearer("/api/admin/accounts", &token_for(&jwt, &id))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "message": "Access denied. Admin only" })
    );
}

#[tokio::test]
async fn test_role_comes_from_store_not_token() {
    let (app, db, jwt) = create_test_app().await;
    let id = create_account(&db, "alice", Role::Admin, true).await;
    let token = token_for(&jwt, &id);

    sqlx::query("UPDATE accounts SET role = 'user' WHERE id = ?")
        .bind(&id)
        .execute(db.pool())
        .await
        .unwrap();

    let response = send(&app, get_with_bearer("/api/admin/accounts", &token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deactivated_admin_is_403_before_role_check() {
    let (app, db, jwt) = create_test_app().await;
    let id = create_account(&db, "root", Role::Admin, false).await;

    let response = send(&app, get_with_bearer("/api/admin/accounts", &token_for(&jwt, &id))).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["message"], "Account is deactivated");
}

#[tokio::test]
async fn test_admin_accounts_succeeds_for_admin() {
    let (app, db, jwt) = create_test_app().await;
    let admin_id = create_account(&db, "root", Role::Admin, true).await;
    create_account(&db, "alice", Role::User, false).await;

    let response = send(&app, get_with_bearer("/api/admin/accounts", &token_for(&jwt, &admin_id))).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let accounts = json.as_array().expect("Response should be an array");
    assert_eq!(accounts.len(), 2);

    for account in accounts {
        assert!(account.get("id").is_some(), "Should have id");
        assert!(account.get("username").is_some(), "Should have username");
        assert!(account.get("email").is_some(), "Should have email");
        assert!(account.get("role").is_some(), "Should have role");
        assert!(account.get("active").is_some(), "Should have active");
        assert!(
            account.get("password_hash").is_none(),
            "Should NOT expose password hash"
        );
    }

    let alice = accounts
        .iter()
        .find(|a| a["username"] == "alice")
        .expect("alice should be listed");
    assert_eq!(alice["active"], false);
    assert_eq!(alice["role"], "user");
}

#[tokio::test]
async fn test_admin_can_deactivate_and_reactivate() {
    let (app, db, jwt) = create_test_app().await;
    let admin_id = create_account(&db, "root", Role::Admin, true).await;
    let user_id = create_account(&db, "alice", Role::User, true).await;
    let admin_token = token_for(&jwt, &admin_id);
    let user_token = token_for(&jwt, &user_id);

    let uri = format!("/api/admin/accounts/{}/active", user_id);

    let response = send(&app, set_active(&uri, &admin_token, false)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get_with_bearer("/api/auth/me", &user_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, set_active(&uri, &admin_token, true)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get_with_bearer("/api/auth/me", &user_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let (app, db, jwt) = create_test_app().await;
    let admin_id = create_account(&db, "root", Role::Admin, true).await;

    let uri = format!("/api/admin/accounts/{}/active", admin_id);
    let response = send(&app, set_active(&uri, &token_for(&jwt, &admin_id), false)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(db.accounts().get_by_id(&admin_id).await.unwrap().unwrap().active);
}

#[tokio::test]
async fn test_set_active_unknown_account_is_404() {
    let (app, db, jwt) = create_test_app().await;
    let admin_id = create_account(&db, "root", Role::Admin, true).await;

    let response = send(
        &app,
        set_active(
            "/api/admin/accounts/does-not-exist/active",
            &token_for(&jwt, &admin_id),
            false,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Account not found");
}

#[tokio::test]
async fn test_non_admin_cannot_change_accounts() {
    let (app, db, jwt) = create_test_app().await;
    let user_id = create_account(&db, "alice", Role::User, true).await;
    let other_id = create_account(&db, "bob", Role::User, true).await;

    let uri = format!("/api/admin/accounts/{}/active", other_id);
    let response = send(&app, set_active(&uri, &token_for(&jwt, &user_id), false)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(db.accounts().get_by_id(&other_id).await.unwrap().unwrap().active);
}
