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

//! World endpoints. Reads are owner-or-admin scoped; a world that exists but
//! belongs to someone else answers exactly like one that does not exist, so
//! world ids do not leak across tenants. Mutations are owner-only.

use crate::host::{
    WebHost,
    auth::current_session,
    web_host::{error_response, json_response, no_content, store_error_response},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use serde_derive::Deserialize;
use terrarium_common::auth::SessionClaims;
use terrarium_common::model::{Role, World, WorldId};
use tracing::info;
use uuid::Uuid;

/// Client-supplied world fields; everything else is stamped by the server.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRequest {
    name: String,
    #[serde(default)]
    max_height: Option<u32>,
    #[serde(default)]
    max_width: Option<u32>,
}

fn validate_world_request(request: &WorldRequest) -> Option<Response> {
    if request.name.trim().is_empty() {
        return Some(error_response(
            StatusCode::BAD_REQUEST,
            "validation",
            "world name must not be empty",
        ));
    }
    if request.max_height == Some(0) || request.max_width == Some(0) {
        return Some(error_response(
            StatusCode::BAD_REQUEST,
            "validation",
            "world bounds must be positive",
        ));
    }
    None
}

fn readable_by(world: &World, session: &SessionClaims) -> bool {
    world.owner_user_id == session.user_id || session.role == Role::Admin
}

/// Fetch a world for the caller, folding "absent" and "not yours" into the
/// same 404.
fn world_for_caller(
    host: &WebHost,
    session: &SessionClaims,
    id: WorldId,
) -> Result<World, Response> {
    match host.worlds.world(id) {
        Ok(Some(world)) if readable_by(&world, session) => Ok(world),
        Ok(_) => Err(error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            "no world found with this id",
        )),
        Err(e) => Err(store_error_response(e)),
    }
}

pub async fn create_world_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Json(request): Json<WorldRequest>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };
    if let Some(response) = validate_world_request(&request) {
        return response;
    }

    let world = World {
        id: WorldId::new(),
        name: request.name.trim().to_string(),
        max_height: request.max_height,
        max_width: request.max_width,
        owner_user_id: session.user_id,
    };
    match host.worlds.create_world(world) {
        Ok(created) => {
            info!(world_id = %created.id, owner = %session.user_id, "World created");
            json_response(StatusCode::CREATED, &created)
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn list_worlds_handler(State(host): State<WebHost>, header_map: HeaderMap) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };

    // Admins see the whole store; everyone else sees their own worlds.
    let result = match session.role {
        Role::Admin => host.worlds.all_worlds(),
        Role::User => host.worlds.worlds_for_owner(session.user_id),
    };
    match result {
        Ok(worlds) => json_response(StatusCode::OK, &worlds),
        Err(e) => store_error_response(e),
    }
}

pub async fn get_world_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };
    match world_for_caller(&host, &session, WorldId(id)) {
        Ok(world) => json_response(StatusCode::OK, &world),
        Err(response) => response,
    }
}

pub async fn update_world_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<WorldRequest>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };

    // Mutation is owner-only; admin read access does not extend to editing.
    let existing = match host.worlds.world(WorldId(id)) {
        Ok(Some(world)) if world.owner_user_id == session.user_id => world,
        Ok(_) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                "no world found with this id",
            );
        }
        Err(e) => return store_error_response(e),
    };
    if let Some(response) = validate_world_request(&request) {
        return response;
    }

    let updated = World {
        id: existing.id,
        name: request.name.trim().to_string(),
        max_height: request.max_height,
        max_width: request.max_width,
        owner_user_id: existing.owner_user_id,
    };
    match host.worlds.update_world(&updated) {
        Ok(()) => no_content(),
        Err(e) => store_error_response(e),
    }
}

pub async fn delete_world_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match host.worlds.world(WorldId(id)) {
        Ok(Some(world)) if world.owner_user_id == session.user_id => {}
        Ok(_) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                "no world found with this id",
            );
        }
        Err(e) => return store_error_response(e),
    }

    match host.worlds.delete_world(WorldId(id)) {
        Ok(()) => {
            info!(world_id = %id, owner = %session.user_id, "World deleted");
            no_content()
        }
        Err(e) => store_error_response(e),
    }
}

pub async fn list_world_objects_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let world = match world_for_caller(&host, &session, WorldId(id)) {
        Ok(world) => world,
        Err(response) => return response,
    };

    match host.objects.objects_in_world(world.id) {
        Ok(objects) => json_response(StatusCode::OK, &objects),
        Err(e) => store_error_response(e),
    }
}
