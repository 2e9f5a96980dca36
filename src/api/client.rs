use std::path::Path;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::error::{extract_message, ApiError};
use crate::config::ApiConfig;
use crate::model::{Credentials, LoginResponse, Post, PostDraft, PostPatch};
use crate::session::SecureString;

const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Typed client for the remote posts API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /posts`, in server order.
    pub async fn list_posts(&self, token: Option<&SecureString>) -> Result<Vec<Post>, ApiError> {
        let endpoint = "GET /posts";
        let mut req = self.client.get(self.url("/posts"));
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, token.bearer());
        }
        let resp = self.send(endpoint, req).await?;
        decode(endpoint, resp).await
    }

    /// `GET /posts/:id`
    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let path = post_path(id)?;
        let endpoint = format!("GET {}", path);
        let resp = self.send(&endpoint, self.client.get(self.url(&path))).await?;
        decode(&endpoint, resp).await
    }

    /// `POST /posts` as multipart form: `title`, `content` and an optional
    /// `img` file part.
    pub async fn create_post(&self, token: &SecureString, draft: &PostDraft) -> Result<(), ApiError> {
        let endpoint = "POST /posts";
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("content", draft.content.clone());

        if let Some(image) = &draft.image {
            form = form.part("img", image_part(endpoint, image).await?);
        }

        let req = self
            .client
            .post(self.url("/posts"))
            .header(AUTHORIZATION, token.bearer())
            .multipart(form);
        self.send(endpoint, req).await?;
        Ok(())
    }

    /// `PATCH /posts/:id` with a JSON body of the changed fields.
    pub async fn update_post(
        &self,
        token: &SecureString,
        id: &str,
        patch: &PostPatch,
    ) -> Result<(), ApiError> {
        let path = post_path(id)?;
        let endpoint = format!("PATCH {}", path);
        let req = self
            .client
            .patch(self.url(&path))
            .header(AUTHORIZATION, token.bearer())
            .json(patch);
        self.send(&endpoint, req).await?;
        Ok(())
    }

    /// `DELETE /posts/:id`
    pub async fn delete_post(&self, token: &SecureString, id: &str) -> Result<(), ApiError> {
        let path = post_path(id)?;
        let endpoint = format!("DELETE {}", path);
        let req = self
            .client
            .delete(self.url(&path))
            .header(AUTHORIZATION, token.bearer());
        self.send(&endpoint, req).await?;
        Ok(())
    }

    /// `POST /users/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let endpoint = "POST /users/login";
        let req = self.client.post(self.url("/users/login")).json(credentials);
        let resp = self.send(endpoint, req).await?;
        decode(endpoint, resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `req` and map any non-2xx status to [`ApiError::Status`].
    async fn send(&self, endpoint: &str, req: RequestBuilder) -> Result<Response, ApiError> {
        tracing::debug!(endpoint, "Sending API request");

        let resp = req
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(endpoint, status = status.as_u16(), "API request succeeded");
            return Ok(resp);
        }

        let body = resp.bytes().await.unwrap_or_default();
        let message = extract_message(&body);
        tracing::warn!(
            endpoint,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "API request rejected"
        );
        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, ApiError> {
    let body = resp.bytes().await.map_err(|e| ApiError::Transport {
        endpoint: endpoint.to_string(),
        source: e,
    })?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

fn post_path(id: &str) -> Result<String, ApiError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ApiError::InvalidId(id.to_string()));
    }
    Ok(format!("/posts/{}", id))
}

/// MIME type for an upload: the guessed `image/*` type, or JPEG.
fn image_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_IMAGE_MIME.to_string())
}

async fn image_part(endpoint: &str, path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::Image {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.jpg".to_string());

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&image_mime(path))
        .map_err(|e| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        })
}
