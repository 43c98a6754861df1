//! API integration tests
//!
//! Each test spawns its own server over the in-memory store, so no external
//! services are needed:
//!
//! ```bash
//! cargo test -p integration-tests
//! ```
//!
//! `test_postgres_backend_toggle` also runs against PostgreSQL when
//! DATABASE_URL is set, and is a no-op otherwise.

use futures::future::join_all;
use integration_tests::*;
use reqwest::StatusCode;

const API: &str = "/api/v1";

// ============================================================================
// Helpers
// ============================================================================

struct Session {
    server: TestServer,
    author_token: String,
    author_id: String,
}

impl Session {
    async fn start() -> Self {
        let server = TestServer::start().await.expect("server should start");
        let author = unique_user();
        let author_token = server.token_for(author).unwrap();
        Self {
            server,
            author_token,
            author_id: author.to_string(),
        }
    }

    async fn create_post(&self, content: &str) -> PostResponse {
        let response = self
            .server
            .post_auth(
                &format!("{API}/posts"),
                &self.author_token,
                &CreatePostRequest::text(content),
            )
            .await
            .unwrap();
        assert_json(response, StatusCode::CREATED).await.unwrap()
    }

    fn new_user(&self) -> (String, String) {
        let user = unique_user();
        (user.to_string(), self.server.token_for(user).unwrap())
    }

    async fn toggle(&self, post_id: &str, token: &str, reaction_type: &str) -> ReactionStateResponse {
        let response = self
            .server
            .put_auth(&format!("{API}/posts/{post_id}/reactions/{reaction_type}"), token)
            .await
            .unwrap();
        assert_json(response, StatusCode::OK).await.unwrap()
    }

    async fn author_feed(&self) -> NotificationPage {
        let response = self
            .server
            .get_auth(&format!("{API}/users/@me/notifications"), &self.author_token)
            .await
            .unwrap();
        assert_json(response, StatusCode::OK).await.unwrap()
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await.unwrap();

    let health: serde_json::Value = assert_json(server.get("/health").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");

    let ready: serde_json::Value =
        assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["checks"]["store"], "healthy");
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_create_and_get_post() {
    let s = Session::start().await;

    let post = s.create_post("hello lonkind").await;
    assert_eq!(post.author_id, s.author_id);
    assert_eq!(post.content, "hello lonkind");
    assert!(post.media_urls.is_empty());
    assert_eq!(post.reaction_counts, Counts::default());

    let response = s
        .server
        .get_auth(&format!("{API}/posts/{}", post.id), &s.author_token)
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, post.id);
}

#[tokio::test]
async fn test_empty_post_is_rejected() {
    let s = Session::start().await;

    let response = s
        .server
        .post_auth(&format!("{API}/posts"), &s.author_token, &CreatePostRequest::text(""))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMPTY_POST");
}

#[tokio::test]
async fn test_unknown_post_is_404() {
    let s = Session::start().await;
    let (_, token) = s.new_user();

    let response = s
        .server
        .put_auth(&format!("{API}/posts/987654321/reactions/like"), &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_toggle_scenario_across_two_users() {
    let s = Session::start().await;
    let post = s.create_post("react to me").await;
    let (_, token_a) = s.new_user();
    let (user_b, token_b) = s.new_user();

    let state = s.toggle(&post.id, &token_a, "like").await;
    assert!(state.active);
    assert_eq!(state.reaction_type.as_deref(), Some("like"));
    assert_eq!(state.counts, Counts::new(1, 0, 0, 0));

    let state = s.toggle(&post.id, &token_a, "like").await;
    assert!(!state.active);
    assert!(state.reaction_type.is_none());
    assert_eq!(state.counts, Counts::new(0, 0, 0, 0));

    let state = s.toggle(&post.id, &token_b, "love").await;
    assert_eq!(state.counts, Counts::new(0, 1, 0, 0));

    let state = s.toggle(&post.id, &token_b, "sad").await;
    assert_eq!(state.reaction_type.as_deref(), Some("sad"));
    assert_eq!(state.counts, Counts::new(0, 0, 0, 1));

    let feed = s.author_feed().await;
    assert_eq!(feed.data.len(), 2);
    let from_b: Vec<_> = feed.data.iter().filter(|n| n.from_user == user_b).collect();
    assert_eq!(from_b.len(), 1);
    assert_eq!(from_b[0].kind, "new_reaction");
    assert_eq!(from_b[0].reaction_type.as_deref(), Some("love"));
    assert_eq!(from_b[0].post_id.as_deref(), Some(post.id.as_str()));
    assert!(!from_b[0].read);

    let response = s
        .server
        .get_auth(&format!("{API}/posts/{}", post.id), &s.author_token)
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.reaction_counts, Counts::new(0, 0, 0, 1));
}

#[tokio::test]
async fn test_own_reaction_and_reactor_list() {
    let s = Session::start().await;
    let post = s.create_post("who reacted").await;
    let (user_a, token_a) = s.new_user();
    let (user_b, token_b) = s.new_user();

    s.toggle(&post.id, &token_a, "laugh").await;
    s.toggle(&post.id, &token_b, "love").await;

    let response = s
        .server
        .get_auth(&format!("{API}/posts/{}/reactions/@me", post.id), &token_a)
        .await
        .unwrap();
    let own: ReactionStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(own.active);
    assert_eq!(own.reaction_type.as_deref(), Some("laugh"));
    assert_eq!(own.counts, Counts::new(0, 1, 1, 0));

    let response = s
        .server
        .get_auth(&format!("{API}/posts/{}/reactions", post.id), &token_a)
        .await
        .unwrap();
    let all: Vec<ReactorResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let mut users: Vec<_> = all.iter().map(|r| r.user_id.clone()).collect();
    users.sort();
    let mut expected = vec![user_a, user_b.clone()];
    expected.sort();
    assert_eq!(users, expected);

    let response = s
        .server
        .get_auth(&format!("{API}/posts/{}/reactions?type=love", post.id), &token_a)
        .await
        .unwrap();
    let loves: Vec<ReactorResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(loves.len(), 1);
    assert_eq!(loves[0].user_id, user_b);
    assert_eq!(loves[0].reaction_type, "love");
}

#[tokio::test]
async fn test_self_reaction_is_400_and_changes_nothing() {
    let s = Session::start().await;
    let post = s.create_post("my own post").await;

    let response = s
        .server
        .put_auth(&format!("{API}/posts/{}/reactions/like", post.id), &s.author_token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "SELF_REACTION");

    assert!(s.author_feed().await.data.is_empty());
}

#[tokio::test]
async fn test_invalid_reaction_type_is_400() {
    let s = Session::start().await;
    let post = s.create_post("typed").await;
    let (_, token) = s.new_user();

    let response = s
        .server
        .put_auth(&format!("{API}/posts/{}/reactions/angry", post.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_toggles_keep_counts_consistent() {
    let s = Session::start().await;
    let post = s.create_post("popular").await;
    let types = ["like", "love", "laugh", "sad"];

    let tokens: Vec<String> = (0..12).map(|_| s.new_user().1).collect();
    let paths: Vec<String> = (0..tokens.len())
        .map(|i| format!("{API}/posts/{}/reactions/{}", post.id, types[i % 4]))
        .collect();
    let requests = tokens
        .iter()
        .zip(paths.iter())
        .map(|(token, path)| s.server.put_auth(path, token));
    for response in join_all(requests).await {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = s
        .server
        .get_auth(&format!("{API}/posts/{}", post.id), &s.author_token)
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.reaction_counts, Counts::new(3, 3, 3, 3));
    assert_eq!(s.author_feed().await.data.len(), 12);
}

// ============================================================================
// Notifications
// ============================================================================

#[tokio::test]
async fn test_notification_feed_paginates_newest_first() {
    let s = Session::start().await;
    let post = s.create_post("feed").await;

    let mut reactors = Vec::new();
    for _ in 0..3 {
        let (user, token) = s.new_user();
        s.toggle(&post.id, &token, "like").await;
        reactors.push(user);
    }

    let response = s
        .server
        .get_auth(&format!("{API}/users/@me/notifications?limit=2"), &s.author_token)
        .await
        .unwrap();
    let first: NotificationPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.data.len(), 2);
    assert!(first.pagination.has_more);
    assert_eq!(first.pagination.limit, 2);
    assert_eq!(first.data[0].from_user, reactors[2]);
    assert_eq!(first.data[1].from_user, reactors[1]);

    let cursor = first.pagination.before.expect("cursor on a full page");
    let response = s
        .server
        .get_auth(
            &format!("{API}/users/@me/notifications?limit=2&before={cursor}"),
            &s.author_token,
        )
        .await
        .unwrap();
    let second: NotificationPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.data.len(), 1);
    assert!(!second.pagination.has_more);
    assert_eq!(second.data[0].from_user, reactors[0]);
}

#[tokio::test]
async fn test_unread_count_and_mark_read() {
    let s = Session::start().await;
    let post = s.create_post("read me").await;
    let (_, token_a) = s.new_user();
    let (_, token_b) = s.new_user();
    s.toggle(&post.id, &token_a, "love").await;
    s.toggle(&post.id, &token_b, "sad").await;

    let unread_path = format!("{API}/users/@me/notifications/unread-count");
    let unread: UnreadCount = assert_json(
        s.server.get_auth(&unread_path, &s.author_token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(unread.count, 2);

    let notification_id = s.author_feed().await.data[0].id.clone();

    // Only the recipient may mark it read
    let response = s
        .server
        .post_empty_auth(
            &format!("{API}/users/@me/notifications/{notification_id}/read"),
            &token_a,
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_NOTIFICATION");

    let response = s
        .server
        .post_empty_auth(
            &format!("{API}/users/@me/notifications/{notification_id}/read"),
            &s.author_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let unread: UnreadCount = assert_json(
        s.server.get_auth(&unread_path, &s.author_token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(unread.count, 1);

    let feed = s.author_feed().await;
    let marked = feed.data.iter().find(|n| n.id == notification_id).unwrap();
    assert!(marked.read);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_requests_without_token_are_401() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get(&format!("{API}/users/@me/notifications"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server
        .get_auth(&format!("{API}/users/@me/notifications"), "not-a-jwt")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// PostgreSQL backend
// ============================================================================

#[tokio::test]
async fn test_postgres_backend_toggle() {
    let Some(server) = TestServer::start_postgres().await.unwrap() else {
        eprintln!("Skipping: DATABASE_URL not set");
        return;
    };
    let author = unique_user();
    let author_token = server.token_for(author).unwrap();
    let reactor_token = server.token_for(unique_user()).unwrap();

    let response = server
        .post_auth(&format!("{API}/posts"), &author_token, &CreatePostRequest::text("pg"))
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_auth(&format!("{API}/posts/{}/reactions/love", post.id), &reactor_token)
        .await
        .unwrap();
    let state: ReactionStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.counts, Counts::new(0, 1, 0, 0));
    assert_eq!(state.post_id, post.id);
}
