// src/infrastructure/graphql.rs
//! Client for the hosted GraphQL note directory.

use crate::application::NoteDirectory;
use crate::constants::LIST_PAGE_LIMIT;
use crate::domain::{DomainError, NewNote, Note, NoteId};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument};

pub const LIST_TODOS: &str = r#"query ListTodos($limit: Int, $nextToken: String) {
  listTodos(limit: $limit, nextToken: $nextToken) {
    items {
      id
      name
      description
      image
    }
    nextToken
  }
}"#;

pub const CREATE_TODO: &str = r#"mutation CreateTodo($input: CreateTodoInput!) {
  createTodo(input: $input) {
    id
    name
    description
    image
  }
}"#;

pub const DELETE_TODO: &str = r#"mutation DeleteTodo($input: DeleteTodoInput!) {
  deleteTodo(input: $input) {
    id
  }
}"#;

// ── Wire types ──────────────────────────────────────

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default, rename = "errorType")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTodosData {
    list_todos: NotePage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotePage {
    #[serde(default)]
    items: Vec<Option<Note>>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTodoData {
    create_todo: Note,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteTodoData {
    delete_todo: DeletedTodo,
}

#[derive(Debug, Deserialize)]
struct DeletedTodo {
    id: NoteId,
}

/// Unwrap a GraphQL response body, turning `errors` into a directory error
fn into_data<T: DeserializeOwned>(operation: &str, body: &str) -> Result<T, DomainError> {
    let response: GraphQlResponse<T> = serde_json::from_str(body).map_err(|e| {
        DomainError::Directory(format!("{}: malformed response: {}", operation, e))
    })?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response
            .errors
            .iter()
            .map(|error| match &error.error_type {
                Some(error_type) => format!("{} ({})", error.message, error_type),
                None => error.message.clone(),
            })
            .collect();
        return Err(DomainError::Directory(format!(
            "{}: {}",
            operation,
            messages.join("; ")
        )));
    }

    response
        .data
        .ok_or_else(|| DomainError::Directory(format!("{}: response has no data", operation)))
}

// ── Client impl ─────────────────────────────────────

pub struct GraphQlNoteDirectory {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
    auth_token: Option<String>,
}

impl GraphQlNoteDirectory {
    pub fn new(endpoint: &str) -> Result<Self, DomainError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            DomainError::Config(format!("invalid api endpoint {:?}: {}", endpoint, e))
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: None,
            auth_token: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_auth_token(mut self, auth_token: Option<String>) -> Self {
        self.auth_token = auth_token;
        self
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, DomainError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables });
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }
        if let Some(token) = &self.auth_token {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Directory(format!("{} request failed: {}", operation, e)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Directory(format!("{} read failed: {}", operation, e)))?;
        debug!(operation, %status, bytes = body.len(), "GraphQL response");

        // Errors are usually reported in the body even on non-2xx statuses
        match into_data(operation, &body) {
            Err(DomainError::Directory(message)) if !status.is_success() => Err(
                DomainError::Directory(format!("HTTP {}: {}", status, message)),
            ),
            result => result,
        }
    }
}

#[async_trait]
impl NoteDirectory for GraphQlNoteDirectory {
    /// Follows `nextToken` until the directory reports no further pages
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let mut notes = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let data: ListTodosData = self
                .execute(
                    "listTodos",
                    LIST_TODOS,
                    json!({ "limit": LIST_PAGE_LIMIT, "nextToken": next_token }),
                )
                .await?;
            let page = data.list_todos;
            notes.extend(page.items.into_iter().flatten());
            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, input: &NewNote) -> Result<Note, DomainError> {
        let data: CreateTodoData = self
            .execute("createTodo", CREATE_TODO, json!({ "input": input }))
            .await?;
        Ok(data.create_todo)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &NoteId) -> Result<NoteId, DomainError> {
        let data: DeleteTodoData = self
            .execute("deleteTodo", DELETE_TODO, json!({ "input": { "id": id } }))
            .await?;
        Ok(data.delete_todo.id)
    }
}
