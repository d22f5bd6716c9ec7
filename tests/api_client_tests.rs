mod common;

use std::time::Duration;

use common::mocks::Harness;
use folio_ui::api::Method;
use folio_ui::error::{ApiError, GENERIC_ERROR};
use folio_ui::storage;
use folio_ui::types::{ArticleInput, ChatRequest, ConversationTarget, ProjectInput};
use futures::executor::block_on;
use rstest::rstest;
use serde_json::json;

// ============= Auth handling =============

#[rstest]
#[case("/admin")]
#[case("/articles/3")]
#[case("/")]
fn test_unauthorized_clears_token_and_redirects(#[case] path: &str) {
    let h = Harness::logged_in(path, "stale-token");
    h.transport.respond(401, json!({"error": "token expired"}));

    let err = block_on(h.client.list_projects()).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "token expired");
    assert!(h.client.tokens().get().is_none());
    assert_eq!(h.navigator.redirects(), vec!["/admin".to_string()]);
}

#[test]
fn test_unauthorized_on_chat_does_not_redirect() {
    let h = Harness::logged_in("/chat", "stale-token");
    h.transport.respond(401, json!({"error": "unauthorized"}));

    let err = block_on(h.client.list_characters()).unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.client.tokens().get().is_none());
    assert!(h.navigator.redirects().is_empty());
}

#[test]
fn test_bearer_token_attached_when_present() {
    let h = Harness::logged_in("/admin", "abc123");
    h.transport.respond(200, json!({"projects": []}));

    block_on(h.client.list_projects()).unwrap();

    let req = h.transport.last_request();
    assert_eq!(req.header("Authorization"), Some("Bearer abc123"));
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn test_no_authorization_header_without_token() {
    let h = Harness::at("/");
    h.transport.respond(200, json!({"projects": []}));

    block_on(h.client.featured_projects()).unwrap();

    let req = h.transport.last_request();
    assert!(req.header("Authorization").is_none());
    assert_eq!(req.url, "/api/v1/projects/featured");
}

#[test]
fn test_login_stores_token() {
    let h = Harness::at("/admin");
    h.transport.respond(200, json!({"token": "fresh"}));

    let token = block_on(h.client.login("admin", "secret")).unwrap();

    assert_eq!(token, "fresh");
    assert_eq!(h.client.tokens().get().as_deref(), Some("fresh"));
    let req = h.transport.last_request();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "/api/v1/auth/login");
    assert_eq!(h.transport.last_body(), json!({"username": "admin", "password": "secret"}));
}

#[test]
fn test_failed_login_keeps_no_token() {
    let h = Harness::at("/admin");
    h.transport.respond(400, json!({"error": "invalid credentials"}));

    let err = block_on(h.client.login("admin", "wrong")).unwrap_err();

    assert_eq!(err.to_string(), "invalid credentials");
    assert_eq!(err.status(), Some(400));
    assert!(!h.client.tokens().is_present());
}

#[test]
fn test_logout_clears_token() {
    let h = Harness::logged_in("/admin", "abc");
    h.client.logout();
    assert!(h.client.tokens().get().is_none());
    assert!(h.store.is_empty());
}

// ============= Error normalization =============

#[test]
fn test_error_message_falls_back_to_status_text() {
    let h = Harness::at("/");
    h.transport.respond_raw(500, "<html>oops</html>");

    let err = block_on(h.client.get_article(1)).unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
    assert!(h.navigator.redirects().is_empty());
}

#[test]
fn test_transport_failure_surfaces_message() {
    let h = Harness::at("/");
    h.transport.fail(ApiError::network("connection refused"));

    let err = block_on(h.client.list_articles(1, 10)).unwrap_err();
    assert_eq!(err, ApiError::Network("connection refused".to_string()));

    h.transport.fail(ApiError::network(""));
    let err = block_on(h.client.list_articles(1, 10)).unwrap_err();
    assert_eq!(err.to_string(), GENERIC_ERROR);
}

#[test]
fn test_timeout_is_passed_and_reported() {
    let h = Harness::at("/");
    h.transport.fail(ApiError::Timeout(60));

    let err = block_on(h.client.list_projects()).unwrap_err();

    assert_eq!(err.to_string(), "Request timed out after 60 seconds");
    assert_eq!(h.transport.timeouts(), vec![Duration::from_secs(60)]);
}

#[test]
fn test_malformed_success_body_is_decode_error() {
    let h = Harness::at("/");
    h.transport.respond_raw(200, "not json");

    let err = block_on(h.client.get_article(2)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn test_empty_success_body_is_accepted() {
    let h = Harness::logged_in("/admin", "t");
    h.transport.respond_raw(200, "");

    let ack = block_on(h.client.delete_article(4)).unwrap();
    assert!(ack.message.is_none());
    let req = h.transport.last_request();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "/api/v1/articles/4");
}

#[test]
fn test_each_call_sent_once() {
    let h = Harness::at("/");
    h.transport.respond(500, json!({"error": "boom"}));

    let _ = block_on(h.client.list_projects());
    assert_eq!(h.transport.requests().len(), 1);
}

// ============= Endpoints =============

#[test]
fn test_article_list_query_and_empty_page() {
    let h = Harness::at("/articles");
    h.transport
        .respond(200, json!({"articles": [], "total": 0, "page": 1, "page_size": 10}));

    let page = block_on(h.client.list_articles(0, 10)).unwrap();

    assert!(page.articles.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(h.transport.last_request().url, "/api/v1/articles?page=1&page_size=10");
}

#[test]
fn test_article_mutations() {
    let h = Harness::logged_in("/admin", "t");
    let input = ArticleInput {
        title: "Hello".to_string(),
        content: "Body".to_string(),
        tags: vec!["rust".to_string()],
        is_published: true,
        ..ArticleInput::default()
    };
    let article = json!({"id": 5, "title": "Hello", "tags": ["rust"], "is_published": true});

    h.transport.respond(201, article.clone());
    let created = block_on(h.client.create_article(&input)).unwrap();
    assert_eq!(created.id, 5);
    assert_eq!(h.transport.last_request().url, "/api/v1/articles");
    assert_eq!(h.transport.last_body()["tags"], json!(["rust"]));

    h.transport.respond(200, article);
    block_on(h.client.update_article(5, &input)).unwrap();
    let req = h.transport.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, "/api/v1/articles/5");
}

#[test]
fn test_project_mutations() {
    let h = Harness::logged_in("/admin", "t");
    let input = ProjectInput {
        name: "folio".to_string(),
        technologies: vec!["Rust".to_string(), "Leptos".to_string()],
        featured: true,
        ..ProjectInput::default()
    };

    h.transport.respond(201, json!({"id": 1, "name": "folio"}));
    block_on(h.client.create_project(&input)).unwrap();
    assert_eq!(h.transport.last_body()["technologies"], json!(["Rust", "Leptos"]));

    h.transport.respond(200, json!({"message": "deleted"}));
    let ack = block_on(h.client.delete_project(1)).unwrap();
    assert_eq!(ack.message.as_deref(), Some("deleted"));
    assert_eq!(h.transport.last_request().url, "/api/v1/projects/1");
}

#[rstest]
#[case(ConversationTarget::New, 0)]
#[case(ConversationTarget::Existing(12), 12)]
fn test_chat_request_body(#[case] target: ConversationTarget, #[case] wire: u64) {
    let h = Harness::at("/chat");
    h.transport.respond(
        200,
        json!({
            "reply": "hi there",
            "session_id": "session_1_abc",
            "conversation_id": 12,
            "model": "deepseek-chat",
            "token_usage": {"prompt": 3, "completion": 2, "total": 5}
        }),
    );

    let request = ChatRequest {
        message: "hello".to_string(),
        character_id: 1,
        provider: "deepseek".to_string(),
        session_id: "session_1_abc".to_string(),
        conversation_id: target,
    };
    let resp = block_on(h.client.send_chat(&request)).unwrap();

    assert_eq!(resp.reply, "hi there");
    assert_eq!(resp.token_usage.total, 5);
    assert_eq!(h.transport.last_request().url, "/api/v1/ai/chat");
    assert_eq!(
        h.transport.last_body(),
        json!({
            "message": "hello",
            "character_id": 1,
            "provider": "deepseek",
            "session_id": "session_1_abc",
            "conversation_id": wire
        })
    );
}

#[test]
fn test_session_id_is_escaped_in_query() {
    let h = Harness::at("/chat");
    h.transport.respond(200, json!({"conversations": []}));

    block_on(h.client.list_conversations("a b&c#d")).unwrap();

    assert_eq!(
        h.transport.last_request().url,
        "/api/v1/conversations?session_id=a%20b%26c%23d"
    );
}

#[test]
fn test_conversation_endpoints() {
    let h = Harness::at("/chat");

    h.transport.respond(
        200,
        json!({"conversations": [{"id": 3, "session_id": "s", "title": "First"}]}),
    );
    let list = block_on(h.client.list_conversations("s")).unwrap();
    assert_eq!(list[0].title, "First");
    assert_eq!(h.transport.last_request().url, "/api/v1/conversations?session_id=s");

    h.transport.respond(
        200,
        json!({
            "conversation": {"id": 3, "title": "First"},
            "messages": [
                {"message_type": "user", "content": "hi"},
                {"message_type": "assistant", "content": "hello"}
            ]
        }),
    );
    let detail = block_on(h.client.get_conversation(3)).unwrap();
    assert_eq!(detail.messages.len(), 2);

    h.transport.respond(200, json!({"message": "ok"}));
    block_on(h.client.rename_conversation(3, "Renamed")).unwrap();
    assert_eq!(h.transport.last_request().method, Method::Put);
    assert_eq!(h.transport.last_body(), json!({"title": "Renamed"}));

    h.transport.respond(200, json!({"message": "ok"}));
    block_on(h.client.delete_conversation(3)).unwrap();
    assert_eq!(h.transport.last_request().url, "/api/v1/conversations/3");
}

#[test]
fn test_characters_and_models() {
    let h = Harness::at("/chat");
    h.transport.respond(
        200,
        json!({"characters": [{"id": 1, "name": "Mono", "greeting_message": "hey$you"}]}),
    );
    h.transport.respond(
        200,
        json!({"models": [{"name": "deepseek", "model": "deepseek-chat", "display_name": "DeepSeek"}]}),
    );

    let characters = block_on(h.client.list_characters()).unwrap();
    let models = block_on(h.client.list_models()).unwrap();

    assert_eq!(characters[0].greeting(), "hey you");
    assert!(characters[0].is_active);
    assert_eq!(models[0].label(), "DeepSeek");
}

// ============= Session id =============

#[test]
fn test_session_id_is_shared_with_client_store() {
    let h = Harness::at("/chat");
    let config = h.client.config().clone();

    let first = storage::session_id(h.client.store(), &config);
    let second = storage::session_id(&h.store, &config);

    assert_eq!(first, second);
    assert!(first.starts_with("session_"));
    assert_eq!(h.store.len(), 1);
}
