use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use object_list::FormFields;

use crate::Controller;

#[derive(Clone)]
pub struct WebState {
    pub controller: Arc<Controller>,
}

pub fn app(state: WebState) -> Router {
    Router::new()
        .route("/", get(|| async { Html(web_ui::app_html()) }))
        .route("/api/view", get(web_view))
        .route("/api/refresh", post(web_refresh))
        .route("/api/form/new", post(web_form_new))
        .route("/api/form/edit/{id}", post(web_form_edit))
        .route("/api/form/submit", post(web_form_submit))
        .route("/api/objects/{id}", delete(web_delete))
        .route(
            "/api/ping",
            get(|| async {
                Json(serde_json::json!({
                    "ok": true,
                    "service": "object-browser-web"
                }))
            }),
        )
        .with_state(state)
}

fn view_response(state: &WebState) -> Response {
    (StatusCode::OK, Json(state.controller.snapshot())).into_response()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

async fn web_view(State(state): State<WebState>) -> Response {
    view_response(&state)
}

async fn web_refresh(State(state): State<WebState>) -> Response {
    match state.controller.list().await {
        Ok(_) => view_response(&state),
        Err(err) => error_response(StatusCode::BAD_GATEWAY, format!("{err:#}")),
    }
}

async fn web_form_new(State(state): State<WebState>) -> Response {
    state.controller.begin_create();
    view_response(&state)
}

async fn web_form_edit(State(state): State<WebState>, Path(id): Path<String>) -> Response {
    match state.controller.begin_edit_by_id(&id) {
        Ok(()) => view_response(&state),
        Err(err) => error_response(StatusCode::NOT_FOUND, err.to_string()),
    }
}

async fn web_form_submit(
    State(state): State<WebState>,
    Json(fields): Json<FormFields>,
) -> Response {
    state
        .controller
        .with_view(|view| view.set_form_fields(fields));

    match state.controller.submit().await {
        Ok(saved) => match saved.refresh {
            Ok(_) => view_response(&state),
            Err(err) => error_response(
                StatusCode::BAD_GATEWAY,
                format!("saved id={} but refresh failed: {err:#}", saved.object.id),
            ),
        },
        Err(err) => error_response(StatusCode::BAD_GATEWAY, format!("{err:#}")),
    }
}

async fn web_delete(State(state): State<WebState>, Path(id): Path<String>) -> Response {
    match state.controller.delete(&id).await {
        Ok(()) => view_response(&state),
        Err(err) => error_response(StatusCode::BAD_GATEWAY, format!("{err:#}")),
    }
}
