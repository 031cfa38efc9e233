use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{extract_message, ApiError};
use crate::types::{AuthRequest, AuthResponse, Todo, TodoPayload};

const TODOS_PATH: &str = "/api/todos";
const AUTH_PATH: &str = "/api/auth";

/// Authenticated gateway to the task and auth services.
///
/// Cheap to clone; a clone shares the connection pool and carries the
/// token it had at clone time, which is what background work wants.
#[derive(Debug, Clone)]
pub struct TodoClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidUrl(path.to_string()))
    }

    /// Send a request with the bearer token attached when present, and
    /// classify the response. 401/403 become [`ApiError::Unauthorized`]
    /// before any body inspection; other failures carry the message
    /// extracted from the structured error body.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message: extract_message(&body, status.as_u16()),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn send_without_body(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = self.send(request).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    /// GET /api/todos — the full list in canonical order.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.get_json(self.client.get(self.endpoint(TODOS_PATH)?))
            .await
    }

    /// POST /api/todos — returns the created task with its assigned id.
    pub async fn create_todo(
        &self,
        title: &str,
        due_date: Option<&str>,
    ) -> Result<Todo, ApiError> {
        self.get_json(
            self.client
                .post(self.endpoint(TODOS_PATH)?)
                .json(&TodoPayload { title, due_date }),
        )
        .await
    }

    /// PUT /api/todos/{id} — flips the completed flag server-side and
    /// returns the authoritative task.
    pub async fn toggle_todo(&self, id: i64) -> Result<Todo, ApiError> {
        self.get_json(
            self.client
                .put(self.endpoint(&format!("{TODOS_PATH}/{id}"))?),
        )
        .await
    }

    /// PUT /api/todos/{id}/title — rename and/or reschedule.
    pub async fn rename_todo(
        &self,
        id: i64,
        title: &str,
        due_date: Option<&str>,
    ) -> Result<Todo, ApiError> {
        self.get_json(
            self.client
                .put(self.endpoint(&format!("{TODOS_PATH}/{id}/title"))?)
                .json(&TodoPayload { title, due_date }),
        )
        .await
    }

    /// DELETE /api/todos/{id}
    pub async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        self.send_without_body(
            self.client
                .delete(self.endpoint(&format!("{TODOS_PATH}/{id}"))?),
        )
        .await
    }

    /// PUT /api/todos/reorder — persists the full id sequence in the
    /// desired display order. The response body is ignored.
    pub async fn reorder(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.send_without_body(
            self.client
                .put(self.endpoint(&format!("{TODOS_PATH}/reorder"))?)
                .json(&ids),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.authenticate("login", email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.authenticate("register", email, password).await
    }

    async fn authenticate(
        &self,
        variant: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let response: AuthResponse = self
            .get_json(
                self.client
                    .post(self.endpoint(&format!("{AUTH_PATH}/{variant}"))?)
                    .json(&AuthRequest { email, password }),
            )
            .await?;
        Ok(response.token)
    }
}
