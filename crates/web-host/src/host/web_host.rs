// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use terrarium_common::auth::TokenAuthority;
use terrarium_common::model::{
    AccountRepository, ObjectRepository, WorldRepository, WorldStoreError,
};
use tracing::error;

/// Shared state for every request handler: the repositories, the token
/// authority, and the handful of host policies. Wired up once in `main`;
/// repositories arrive as trait objects, so the handlers never know which
/// storage backend is underneath.
#[derive(Clone)]
pub struct WebHost {
    pub(crate) worlds: Arc<dyn WorldRepository>,
    pub(crate) objects: Arc<dyn ObjectRepository>,
    pub(crate) accounts: Arc<dyn AccountRepository>,
    pub(crate) auth: Arc<TokenAuthority>,
    pub(crate) enforce_world_bounds: bool,
}

impl WebHost {
    pub fn new(
        worlds: Arc<dyn WorldRepository>,
        objects: Arc<dyn ObjectRepository>,
        accounts: Arc<dyn AccountRepository>,
        auth: Arc<TokenAuthority>,
        enforce_world_bounds: bool,
    ) -> Self {
        Self {
            worlds,
            objects,
            accounts,
            auth,
            enforce_world_bounds,
        }
    }
}

pub async fn health_handler() -> &'static str {
    concat!("terrarium-web-host ", env!("CARGO_PKG_VERSION"), " is up")
}

/// Every failure path returns the same envelope: a short machine-readable
/// kind plus a human-readable message.
pub(crate) fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({ "error": kind, "message": message }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    let body = match serde_json::to_string(value) {
        Ok(body) => body,
        Err(e) => {
            error!("Unable to serialize response body: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal error",
            );
        }
    };
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub(crate) fn store_error_response(e: WorldStoreError) -> Response {
    match &e {
        WorldStoreError::WorldNotFound(_) | WorldStoreError::ObjectNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "not_found", &e.to_string())
        }
        WorldStoreError::DuplicateWorldName(_)
        | WorldStoreError::WorldQuotaExceeded(_)
        | WorldStoreError::DuplicateEmail(_) => {
            error_response(StatusCode::CONFLICT, "conflict", &e.to_string())
        }
        WorldStoreError::DatabaseError(_) => {
            error!("Storage failure: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal error",
            )
        }
    }
}

pub(crate) fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
