//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use postboard::api::ApiClient;
use postboard::config::{ApiConfig, Config};
use postboard::model::User;
use postboard::posts::PostStore;
use postboard::session::{SecureString, Session};
use postboard::sync::PostSync;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Create a temporary config file pointing at `api_url`.
pub fn temp_config(api_url: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");

    let content = format!(
        r#"[api]
base_url = "{}"
timeout_seconds = 5
connect_timeout_seconds = 2

[proxy]
bind_addr = "127.0.0.1:0"
"#,
        api_url
    );

    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

// -- API helpers --------------------------------------------------------------

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(&api_config(base_url)).expect("Failed to build API client")
}

/// `PostSync` over a fresh, empty store.
pub fn post_sync(base_url: &str) -> PostSync {
    PostSync::new(api_client(base_url), PostStore::new())
}

/// Relay config forwarding `/api/*` to `target`.
pub fn relay_config(target: &str) -> Config {
    let mut config = Config::default();
    config.api = api_config(target);
    config.proxy.bind_addr = "127.0.0.1:0".to_string();
    config
}

// -- Fixtures -----------------------------------------------------------------

pub fn user(id: &str, is_admin: bool) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@school.dev", id),
        is_admin,
        posts: vec![],
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

pub fn teacher_session() -> Session {
    Session::authenticated(SecureString::new("teacher-token"), user("t1", true))
}

pub fn student_session() -> Session {
    Session::authenticated(SecureString::new("student-token"), user("s1", false))
}

/// JSON for one post in the API's wire shape.
pub fn post_json(id: &str, created_at: &str) -> String {
    format!(
        r#"{{"_id":"{id}","title":"Post {id}","content":"Body of {id}","author":"Prof. Lima","createdAt":"{created_at}","updatedAt":"{created_at}"}}"#
    )
}

/// JSON array of posts from `(id, createdAt)` pairs, in the given order.
pub fn posts_json(posts: &[(&str, &str)]) -> String {
    let items: Vec<String> = posts
        .iter()
        .map(|(id, created_at)| post_json(id, created_at))
        .collect();
    format!("[{}]", items.join(","))
}

/// Body of a successful `POST /users/login`.
pub fn login_json(token: &str, user_id: &str, is_admin: bool) -> String {
    format!(
        r#"{{"token":"{token}","user":{{"_id":"{user_id}","name":"User {user_id}","email":"{user_id}@school.dev","isAdmin":{is_admin},"posts":[],"createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}}}}"#
    )
}
