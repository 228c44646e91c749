//! Page and form flows of `ForumClient`

use crate::common::*;
use forum_client::client::{ApiError, ClientError, Config, ForumClient, Notification};
use forum_client::shared::config::AppConfig;
use forum_client::shared::forum::{LoginRequest, NewThread, RegisterRequest};
use forum_client::shared::SharedError;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn client(api: &Arc<FakeForumApi>) -> ForumClient {
    ForumClient::with_api(api.clone(), Config::new())
}

fn signed_in(api: &Arc<FakeForumApi>) -> ForumClient {
    let mut config = Config::new();
    config.set_token(Some("token-1".to_string()));
    ForumClient::with_api(api.clone(), config)
}

#[tokio::test]
async fn test_load_threads_fills_slice() {
    let api = FakeForumApi::new().with_threads(vec![
        thread("thread-1", "react", votes(&[], &[])),
        thread("thread-2", "redux", votes(&[], &[])),
    ]);
    let client = client(&api);

    let threads = assert_ok!(client.load_threads().await);

    assert_eq!(threads.len(), 2);
    let state = client.state().threads;
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.categories(), vec!["react", "redux"]);
}

#[tokio::test]
async fn test_load_threads_error_uses_server_message() {
    let api = FakeForumApi::new();
    api.fail_next("list_threads", ApiError::Status {
        status: 500,
        message: "server sedang sibuk".to_string(),
    });
    let client = client(&api);

    assert_err!(client.load_threads().await, ClientError::Api(_));
    assert_eq!(client.state().threads.error.as_deref(), Some("server sedang sibuk"));
}

#[tokio::test]
async fn test_load_threads_error_falls_back_to_generic_message() {
    let api = FakeForumApi::new();
    api.fail_next("list_threads", ApiError::Network("connection refused".to_string()));
    let client = client(&api);

    assert_err!(client.load_threads().await);
    assert_eq!(
        client.state().threads.error.as_deref(),
        Some("Terjadi kesalahan saat mengambil data thread")
    );
}

#[tokio::test]
async fn test_create_thread_prepends_and_notifies() {
    let api = FakeForumApi::new()
        .with_threads(vec![thread("thread-1", "react", votes(&[], &[]))]);
    let client = signed_in(&api);
    client.load_threads().await.unwrap();
    let mut toasts = client.notifier().subscribe();

    let created = assert_ok!(
        client
            .create_thread(NewThread::new("Judul baru", "Isi thread baru").with_category("  "))
            .await
    );

    assert_eq!(created.title, "Judul baru");
    assert_eq!(created.category, "General");
    let ids: Vec<String> =
        client.state().threads.threads.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["thread-new", "thread-1"]);
    assert_eq!(toasts.try_recv().unwrap(), Notification::success("Thread berhasil dibuat!"));
}

#[tokio::test]
async fn test_invalid_thread_is_not_sent() {
    let api = FakeForumApi::new();
    let client = signed_in(&api);

    let result = client.create_thread(NewThread::new("Hi", "Isi thread baru")).await;

    match result {
        Err(ClientError::Validation(SharedError::ValidationError { field, message })) => {
            assert_eq!(field, "title");
            assert_eq!(message, "Judul thread minimal 3 karakter.");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_create_thread_failure_notifies() {
    let api = FakeForumApi::new();
    api.fail_next("create_thread", ApiError::Status {
        status: 401,
        message: "Missing authentication".to_string(),
    });
    let client = client(&api);
    let mut toasts = client.notifier().subscribe();

    assert_err!(client.create_thread(NewThread::new("Judul", "Isi thread")).await);
    assert_eq!(toasts.try_recv().unwrap(), Notification::error("Gagal membuat thread"));
    let threads = client.state().threads;
    assert!(threads.threads.is_empty());
    assert_eq!(threads.error.as_deref(), Some("Missing authentication"));

    api.fail_next("create_thread", ApiError::Network("connection reset".to_string()));
    assert_err!(client.create_thread(NewThread::new("Judul", "Isi thread")).await);
    assert_eq!(
        client.state().threads.error.as_deref(),
        Some("Terjadi kesalahan saat membuat thread")
    );
}

#[tokio::test]
async fn test_create_comment_failure_sets_detail_error() {
    let api = FakeForumApi::new().with_detail(thread_detail("thread-1", votes(&[], &[]), vec![]));
    let client = signed_in(&api);
    client.load_thread_detail("thread-1").await.unwrap();
    let mut toasts = client.notifier().subscribe();

    api.fail_next("create_comment", ApiError::Network("connection reset".to_string()));
    assert_err!(client.create_comment("thread-1", "Komentar yang cukup panjang").await);

    assert_eq!(toasts.try_recv().unwrap(), Notification::error("Gagal menambahkan komentar"));
    let detail = client.state().thread_detail;
    assert_eq!(detail.error.as_deref(), Some("Terjadi kesalahan saat menambahkan komentar"));
    assert!(detail.detail.unwrap().comments.is_empty());
}

#[tokio::test]
async fn test_thread_detail_and_comment() {
    let api = FakeForumApi::new().with_detail(thread_detail(
        "thread-1",
        votes(&[], &[]),
        vec![comment("comment-1", votes(&[], &[]))],
    ));
    let client = signed_in(&api);
    client.load_thread_detail("thread-1").await.unwrap();
    let mut toasts = client.notifier().subscribe();

    let created =
        assert_ok!(client.create_comment("thread-1", "Komentar yang cukup panjang").await);

    assert_eq!(created.content, "Komentar yang cukup panjang");
    let detail = client.state().thread_detail.detail.unwrap();
    let ids: Vec<&str> = detail.comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["comment-1", "comment-new"]);
    assert_eq!(
        toasts.try_recv().unwrap(),
        Notification::success("Komentar berhasil ditambahkan!")
    );
}

#[tokio::test]
async fn test_short_comment_is_not_sent() {
    let api = FakeForumApi::new();
    let client = signed_in(&api);

    let result = client.create_comment("thread-1", "oke").await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Komentar minimal 5 karakter."
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_missing_thread_detail_reports_error() {
    let api = FakeForumApi::new();
    let client = client(&api);

    assert_err!(client.load_thread_detail("thread-x").await);

    let detail = client.state().thread_detail;
    assert!(detail.detail.is_none());
    assert_eq!(detail.error.as_deref(), Some("thread tidak ditemukan"));
}

#[tokio::test]
async fn test_detail_arriving_after_leaving_is_dropped() {
    let api = FakeForumApi::new().with_detail(thread_detail("thread-1", votes(&[], &[]), vec![]));
    let client = client(&api);
    let release = api.gate_next_detail();

    let load = {
        let client = client.clone();
        tokio::spawn(async move { client.load_thread_detail("thread-1").await })
    };
    tokio::task::yield_now().await;
    client.leave_thread_detail();
    release.send(()).unwrap();

    assert_ok!(load.await.unwrap());
    assert!(client.state().thread_detail.detail.is_none());
    assert!(!client.state().thread_detail.is_loading);
}

#[tokio::test]
async fn test_leaderboards() {
    let api = FakeForumApi::new().with_leaderboards(vec![
        leaderboard_entry("user-1", 25),
        leaderboard_entry("user-2", 10),
    ]);
    let client = client(&api);

    client.load_leaderboards().await.unwrap();

    let board = client.state().leaderboards;
    assert_eq!(board.entries.len(), 2);
    assert_eq!(board.entries[0].score, 25);

    api.fail_next("leaderboards", ApiError::Network("down".to_string()));
    assert_err!(client.load_leaderboards().await);
    let board = client.state().leaderboards;
    assert_eq!(
        board.error.as_deref(),
        Some("Terjadi kesalahan saat mengambil daya leaderboard")
    );
    assert_eq!(board.entries.len(), 2);
}

#[tokio::test]
async fn test_login_sets_token_and_loads_profile() {
    let api = FakeForumApi::new().with_profile(user("user-1"));
    let client = client(&api);
    let mut toasts = client.notifier().subscribe();

    let user = assert_ok!(
        client
            .login(LoginRequest {
                email: "user-1@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
    );

    assert_eq!(user.id, "user-1");
    assert_eq!(api.token().as_deref(), Some("token-for-user-1@example.com"));
    let auth = client.state().auth;
    assert!(auth.is_success);
    assert_eq!(auth.token.as_deref(), Some("token-for-user-1@example.com"));
    assert_eq!(client.current_user_id().as_deref(), Some("user-1"));
    assert_eq!(toasts.try_recv().unwrap(), Notification::success("Berhasil masuk"));
    assert_eq!(api.calls(), vec!["POST /login", "GET /users/me"]);
}

#[tokio::test]
async fn test_login_failure_keeps_server_message() {
    let api = FakeForumApi::new();
    api.fail_next("login", ApiError::Status {
        status: 401,
        message: "email or password is wrong".to_string(),
    });
    let client = client(&api);
    let mut toasts = client.notifier().subscribe();

    let result = client
        .login(LoginRequest {
            email: "john@example.com".to_string(),
            password: "wrongpass".to_string(),
        })
        .await;

    assert_err!(result, ClientError::Api(ApiError::Status { status: 401, .. }));
    let auth = client.state().auth;
    assert_eq!(auth.error.as_deref(), Some("email or password is wrong"));
    assert!(auth.token.is_none());
    assert_eq!(toasts.try_recv().unwrap(), Notification::error("Gagal masuk"));
}

#[tokio::test]
async fn test_invalid_login_is_not_sent() {
    let api = FakeForumApi::new();
    let client = client(&api);

    let result = client
        .login(LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
        })
        .await;

    assert_contains!(result.unwrap_err().to_string(), "alamat email yang valid");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_register_does_not_sign_in() {
    let api = FakeForumApi::new();
    let client = client(&api);
    let mut toasts = client.notifier().subscribe();

    let user = assert_ok!(
        client
            .register(RegisterRequest {
                name: "John".to_string(),
                email: "john@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
    );

    assert_eq!(user.name, "John");
    let auth = client.state().auth;
    assert!(auth.is_success);
    assert!(auth.user.is_none());
    assert!(auth.token.is_none());
    assert_eq!(toasts.try_recv().unwrap(), Notification::success("Berhasil mendaftar!"));

    client.reset_auth_status();
    assert!(!client.state().auth.is_success);
}

#[tokio::test]
async fn test_profile_failure_clears_session() {
    let api = FakeForumApi::new();
    let client = signed_in(&api);
    assert_eq!(api.token().as_deref(), Some("token-1"));

    assert_err!(client.load_own_profile().await);

    let auth = client.state().auth;
    assert!(auth.token.is_none());
    assert!(auth.user.is_none());
    assert!(api.token().is_none());
}

#[tokio::test]
async fn test_profile_without_token() {
    let api = FakeForumApi::new().with_profile(user("user-1"));
    let client = client(&api);

    assert_err!(client.load_own_profile().await, ClientError::Unauthenticated);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_logout() {
    let api = FakeForumApi::new().with_profile(user("user-1"));
    let client = signed_in(&api);
    client.load_own_profile().await.unwrap();

    client.logout();

    assert!(client.current_user_id().is_none());
    assert!(client.state().auth.token.is_none());
    assert!(api.token().is_none());
}

#[tokio::test]
async fn test_session_token_follows_login_and_logout() {
    let api = FakeForumApi::new().with_profile(user("user-1"));
    let client = signed_in(&api);
    assert_eq!(client.state().auth.token.as_deref(), Some("token-1"));

    client
        .login(LoginRequest {
            email: "user-1@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        client.state().auth.token.as_deref(),
        Some("token-for-user-1@example.com")
    );

    client.logout();
    assert!(client.state().auth.token.is_none());
    assert_eq!(client.config(), &AppConfig::default());
}

#[tokio::test]
async fn test_subscribers_see_loads() {
    let api = FakeForumApi::new().with_threads(vec![thread("thread-1", "react", votes(&[], &[]))]);
    let client = client(&api);
    let mut rx = client.subscribe();
    rx.mark_unchanged();

    client.load_threads().await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().threads.threads.len(), 1);
}
