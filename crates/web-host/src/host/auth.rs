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

//! Account registration, login, and caller-identity resolution.

use crate::host::{
    WebHost,
    web_host::{error_response, json_response, store_error_response},
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde_derive::Deserialize;
use terrarium_common::auth::{AuthToken, SessionClaims, hash_password, verify_password};
use terrarium_common::model::{Account, Role, UserId};
use tracing::{debug, warn};

pub const AUTH_TOKEN_HEADER: &str = "X-Terrarium-Auth-Token";

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn register_handler(
    State(host): State<WebHost>,
    Json(RegisterRequest { email, password }): Json<RegisterRequest>,
) -> Response {
    let email = email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation",
            "a valid email address is required",
        );
    }
    if password.len() < 8 {
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation",
            "password must be at least 8 characters",
        );
    }

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(error = ?e, "Unable to hash password");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal error",
            );
        }
    };

    let account = Account {
        id: UserId::new(),
        email,
        password_hash,
        role: Role::User,
    };
    match host.accounts.create_account(account) {
        Ok(created) => {
            debug!(user_id = %created.id, "Account registered");
            json_response(
                StatusCode::CREATED,
                &serde_json::json!({ "message": "account created" }),
            )
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn login_handler(
    State(host): State<WebHost>,
    Json(LoginRequest { email, password }): Json<LoginRequest>,
) -> Response {
    let account = match host.accounts.account_by_email(email.trim()) {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!("Login rejected for unknown email");
            return error_response(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "invalid credentials",
            );
        }
        Err(e) => return store_error_response(e),
    };

    if !verify_password(&account.password_hash, &password) {
        warn!(user_id = %account.id, "Login rejected, bad password");
        return error_response(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid credentials",
        );
    }

    let token = host.auth.make_auth_token(account.id, account.role);
    json_response(StatusCode::OK, &serde_json::json!({ "token": token.0 }))
}

/// Resolve the caller identity for a request, or produce the 401 that ends
/// it. Every authenticated handler starts here; this is the one place the
/// token header is interpreted.
pub(crate) fn current_session(
    host: &WebHost,
    header_map: &HeaderMap,
) -> Result<SessionClaims, Response> {
    let Some(token) = header_map.get(AUTH_TOKEN_HEADER) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "no auth token provided",
        ));
    };
    let Ok(token) = token.to_str() else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "malformed auth token",
        ));
    };

    host.auth
        .validate_auth_token(&AuthToken(token.to_string()))
        .map_err(|e| {
            warn!(error = ?e, "Rejected auth token");
            error_response(StatusCode::UNAUTHORIZED, "unauthorized", &e.to_string())
        })
}
