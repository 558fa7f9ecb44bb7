//! Todo handlers. All routes run behind the JWT middleware.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Extension, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedPath};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateTodo, Todo, UpdateTodo};
use crate::errors::AppResult;

/// New todo payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl From<CreateTodoRequest> for CreateTodo {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            is_completed: req.is_completed,
        }
    }
}

/// Todo update payload; `isCompleted` is mandatory
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_completed: bool,
}

impl From<UpdateTodoRequest> for UpdateTodo {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            is_completed: req.is_completed,
        }
    }
}

/// Create todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).put(create_todo))
        .route("/:id", patch(update_todo).delete(delete_todo))
}

/// List the caller's todos
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Todo>>> {
    let todos = state.todo_service.list_todos(user.id).await?;
    Ok(Json(todos))
}

/// Create a todo owned by the caller
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let todo = state
        .todo_service
        .create_todo(user.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update one of the caller's todos
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> AppResult<Json<Todo>> {
    let todo = state
        .todo_service
        .update_todo(id, user.id, payload.into())
        .await?;

    Ok(Json(todo))
}

/// Delete one of the caller's todos and return it
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<Todo>> {
    let todo = state.todo_service.delete_todo(id, user.id).await?;
    Ok(Json(todo))
}
