use super::*;

fn client_for(base_url: &str) -> ApiClient {
    let settings = Settings {
        base_url: base_url.to_string(),
        ..Settings::default()
    };
    ApiClient::new(&settings, SessionStore::in_memory()).unwrap()
}

// -- check_response --

#[test]
fn success_body_is_parsed() {
    let value = check_response(StatusCode::OK, r#"{"ranking": [1]}"#).unwrap();
    assert_eq!(value, serde_json::json!({"ranking": [1]}));
}

#[test]
fn empty_success_body_is_null() {
    assert_eq!(check_response(StatusCode::NO_CONTENT, "").unwrap(), Value::Null);
    assert_eq!(check_response(StatusCode::OK, "  \n").unwrap(), Value::Null);
}

#[test]
fn invalid_success_body_is_api_error() {
    let err = check_response(StatusCode::OK, "<html>oops</html>").unwrap_err();
    match err {
        ClientError::Api(msg) => assert!(msg.contains("<html>oops</html>")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn detail_string_becomes_message() {
    let err = check_response(StatusCode::NOT_FOUND, r#"{"detail": "Jogo não encontrado"}"#)
        .unwrap_err();
    match err {
        ClientError::NotFound(msg) => assert_eq!(msg, "Jogo não encontrado"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn validation_detail_messages_are_joined() {
    let body = r#"{"detail": [
        {"loc": ["body", "nota"], "msg": "field required", "type": "missing"},
        {"loc": ["body", "comentario"], "msg": "too long", "type": "value_error"}
    ]}"#;
    let err = check_response(StatusCode::UNPROCESSABLE_ENTITY, body).unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "field required; too long");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[test]
fn auth_statuses_are_unauthorized() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        let err = check_response(status, r#"{"detail": "Could not validate credentials"}"#)
            .unwrap_err();
        assert!(err.is_auth(), "{status} should be an auth error");
    }
}

#[test]
fn duplicate_game_is_conflict() {
    let err = check_response(StatusCode::CONFLICT, r#"{"detail": "Jogo já está na watchlist"}"#)
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[test]
fn plain_text_error_body_is_truncated() {
    let body = "x".repeat(1000);
    let err = check_response(StatusCode::INTERNAL_SERVER_ERROR, &body).unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.chars().count(), ERROR_PREVIEW_CHARS);
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[test]
fn truncation_respects_char_boundaries() {
    let body = "ã".repeat(300);
    let err = check_response(StatusCode::BAD_GATEWAY, &body).unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 502, .. }));
}

#[test]
fn empty_error_body() {
    let err = check_response(StatusCode::INTERNAL_SERVER_ERROR, "").unwrap_err();
    assert_eq!(err.to_string(), "Server error (HTTP 500): no details");
}

// -- construction and URLs --

#[test]
fn invalid_base_url_is_config_error() {
    let settings = Settings {
        base_url: "not a url".to_string(),
        ..Settings::default()
    };
    let err = ApiClient::new(&settings, SessionStore::in_memory()).err().unwrap();
    assert!(matches!(err, ClientError::Config(_)));
}

#[test]
fn page_limit_is_clamped() {
    let settings = Settings {
        page_limit: 500,
        ..Settings::default()
    };
    let client = ApiClient::new(&settings, SessionStore::in_memory()).unwrap();
    assert_eq!(client.page_limit(), MAX_PAGE_LIMIT);

    let settings = Settings {
        page_limit: 0,
        ..Settings::default()
    };
    let client = ApiClient::new(&settings, SessionStore::in_memory()).unwrap();
    assert_eq!(client.page_limit(), 1);
}

#[test]
fn endpoint_joins_segments() {
    let client = client_for("http://localhost:8000");
    let url = client.endpoint(&["watchlists", "ranking", "top-melhores"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/watchlists/ranking/top-melhores");
}

#[test]
fn endpoint_keeps_base_path() {
    let client = client_for("https://example.com/api/");
    let url = client.endpoint(&["users", "me"]).unwrap();
    assert_eq!(url.as_str(), "https://example.com/api/users/me");
}

#[test]
fn endpoint_trailing_slash() {
    let client = client_for("http://localhost:8000");
    let url = client.endpoint(&["users", ""]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/users/");
}

#[test]
fn endpoint_encodes_genre_names() {
    let client = client_for("http://localhost:8000");
    let url = client
        .endpoint(&["watchlists", "games", "por-genero", "Role-playing (RPG)"])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/watchlists/games/por-genero/Role-playing%20(RPG)"
    );
}

#[test]
fn page_params_never_go_below_one() {
    let client = client_for("http://localhost:8000");
    let params = client.page_params(0);
    assert_eq!(params[0], ("page", "1".to_string()));
    assert_eq!(params[1], ("limit", "20".to_string()));
}

// -- requests that fail before reaching the network --

#[tokio::test]
async fn authenticated_calls_need_a_session() {
    let client = client_for("http://127.0.0.1:9");
    assert!(!client.is_logged_in().await);
    assert!(matches!(client.me().await, Err(ClientError::NotLoggedIn)));
    assert!(matches!(client.my_watchlists().await, Err(ClientError::NotLoggedIn)));
    assert!(matches!(client.delete_watchlist(3).await, Err(ClientError::NotLoggedIn)));
    assert!(matches!(client.refresh().await, Err(ClientError::NotLoggedIn)));
}

#[tokio::test]
async fn blank_search_skips_the_request() {
    let client = client_for("http://127.0.0.1:9");
    assert!(client.search_games("   ", 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_review_is_rejected_locally() {
    let client = client_for("http://127.0.0.1:9");
    let err = client.add_review(1, 11.0, "great").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    let err = client.add_review(1, 8.0, "  ").await.unwrap_err();
    assert_eq!(err.to_string(), "Review text cannot be empty");
}

#[tokio::test]
async fn empty_user_update_is_rejected() {
    let client = client_for("http://127.0.0.1:9");
    let err = client.update_user(1, &UserUpdate::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn session_is_restored_and_cleared() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::at(tmp.path().join("session.toml"));
    store
        .save(&Session {
            access_token: Some("tok".to_string()),
            username: Some("ana".to_string()),
            ..Default::default()
        })
        .unwrap();

    let client = ApiClient::new(&Settings::default(), store.clone()).unwrap();
    assert!(client.is_logged_in().await);
    assert_eq!(client.session().await.username.as_deref(), Some("ana"));

    client.logout().await.unwrap();
    assert!(!client.is_logged_in().await);
    assert!(!store.load().is_logged_in());
}
