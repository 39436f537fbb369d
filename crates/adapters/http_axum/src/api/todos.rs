//! JSON REST handlers for todos.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use todo_app::ports::TodoStore;
use todo_domain::id::TodoId;
use todo_domain::todo::{NewTodo, Todo, TodoPatch};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Request body for creating a todo. Any `id` field is ignored and absent
/// fields take their zero value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// Request body for replacing a todo.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    pub description: String,
    pub is_completed: bool,
}

/// Request body for partially updating a todo. Absent or `null` fields keep
/// their stored value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchTodoRequest {
    pub id: TodoId,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

/// Response body of the create endpoint.
#[derive(Serialize)]
pub struct CreatedTodo {
    pub id: TodoId,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Ok(Json<CreatedTodo>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Todo>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Todo>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update, patch and delete endpoints.
pub enum WriteResponse {
    NoContent,
}

impl IntoResponse for WriteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    TodoId::from_str(raw).map_err(ApiError::InvalidId)
}

/// `POST /todo`
pub async fn create<S>(
    State(state): State<AppState<S>>,
    JsonBody(req): JsonBody<CreateTodoRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: TodoStore + Send + Sync + 'static,
{
    let todo = NewTodo::new(req.description).completed(req.is_completed);
    let id = state.todo_service.create_todo(todo).await?;
    Ok(CreateResponse::Ok(Json(CreatedTodo { id })))
}

/// `GET /todo/{id}`
pub async fn get<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: TodoStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let todo = state.todo_service.get_todo(id).await?;
    Ok(GetResponse::Ok(Json(todo)))
}

/// `GET /todo`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: TodoStore + Send + Sync + 'static,
{
    let todos = state.todo_service.list_todos().await?;
    Ok(ListResponse::Ok(Json(todos)))
}

/// `PUT /todo` — full replace; unknown ids are a no-op.
pub async fn update<S>(
    State(state): State<AppState<S>>,
    JsonBody(req): JsonBody<UpdateTodoRequest>,
) -> Result<WriteResponse, ApiError>
where
    S: TodoStore + Send + Sync + 'static,
{
    let todo = Todo {
        id: req.id,
        description: req.description,
        is_completed: req.is_completed,
    };
    state.todo_service.update_todo(todo).await?;
    Ok(WriteResponse::NoContent)
}

/// `PATCH /todo` — partial update; unknown ids are a no-op.
pub async fn patch<S>(
    State(state): State<AppState<S>>,
    JsonBody(req): JsonBody<PatchTodoRequest>,
) -> Result<WriteResponse, ApiError>
where
    S: TodoStore + Send + Sync + 'static,
{
    let patch = TodoPatch {
        id: req.id,
        description: req.description,
        is_completed: req.is_completed,
    };
    state.todo_service.patch_todo(patch).await?;
    Ok(WriteResponse::NoContent)
}

/// `DELETE /todo/{id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<WriteResponse, ApiError>
where
    S: TodoStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    state.todo_service.delete_todo(id).await?;
    Ok(WriteResponse::NoContent)
}
