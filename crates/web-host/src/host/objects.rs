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

//! Placed-object endpoints.

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
use terrarium_common::model::{ObjectId, PlacedObject, World, WorldId};
use tracing::info;
use uuid::Uuid;

/// Client-supplied object fields; `id` and `userId` are stamped by the
/// server.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRequest {
    environment_id: WorldId,
    prefab_id: String,
    position_x: f32,
    position_y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation_z: f32,
    sorting_layer: i32,
}

/// Whether a position sits inside the world's declared bounds. A missing
/// bound leaves that axis unconstrained.
pub(crate) fn within_bounds(world: &World, x: f32, y: f32) -> bool {
    let width_ok = world.max_width.is_none_or(|w| x >= 0.0 && x <= w as f32);
    let height_ok = world.max_height.is_none_or(|h| y >= 0.0 && y <= h as f32);
    width_ok && height_ok
}

/// Bounds enforcement is opt-in per host configuration; when off, the world
/// only needs to exist.
fn check_placement(host: &WebHost, request: &ObjectRequest) -> Option<Response> {
    let world = match host.worlds.world(request.environment_id) {
        Ok(Some(world)) => world,
        Ok(None) => {
            return Some(error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                "no world found with this id",
            ));
        }
        Err(e) => return Some(store_error_response(e)),
    };
    if host.enforce_world_bounds && !within_bounds(&world, request.position_x, request.position_y)
    {
        return Some(error_response(
            StatusCode::BAD_REQUEST,
            "validation",
            "object position is outside the world bounds",
        ));
    }
    None
}

pub async fn create_object_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Json(request): Json<ObjectRequest>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };
    if request.prefab_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "validation",
            "prefabId must not be empty",
        );
    }
    if let Some(response) = check_placement(&host, &request) {
        return response;
    }

    let object = PlacedObject {
        id: ObjectId::new(),
        environment_id: request.environment_id,
        prefab_id: request.prefab_id,
        position_x: request.position_x,
        position_y: request.position_y,
        scale_x: request.scale_x,
        scale_y: request.scale_y,
        rotation_z: request.rotation_z,
        sorting_layer: request.sorting_layer,
        user_id: session.user_id,
    };
    match host.objects.create_object(object) {
        Ok(created) => json_response(StatusCode::CREATED, &created),
        Err(e) => store_error_response(e),
    }
}

pub async fn update_object_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<ObjectRequest>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let existing = match host.objects.object(ObjectId(id)) {
        Ok(Some(object)) => object,
        Ok(None) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                "no object found with this id",
            );
        }
        Err(e) => return store_error_response(e),
    };
    if existing.user_id != session.user_id {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "object belongs to another account",
        );
    }
    if let Some(response) = check_placement(&host, &request) {
        return response;
    }

    let updated = PlacedObject {
        id: existing.id,
        environment_id: request.environment_id,
        prefab_id: request.prefab_id,
        position_x: request.position_x,
        position_y: request.position_y,
        scale_x: request.scale_x,
        scale_y: request.scale_y,
        rotation_z: request.rotation_z,
        sorting_layer: request.sorting_layer,
        user_id: existing.user_id,
    };
    match host.objects.update_object(&updated) {
        Ok(()) => no_content(),
        Err(e) => store_error_response(e),
    }
}

pub async fn delete_object_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };

    // Absent and not-yours both land on 404; the store only reports whether
    // an owned row went away.
    match host.objects.delete_object(ObjectId(id), Some(session.user_id)) {
        Ok(true) => {
            info!(object_id = %id, owner = %session.user_id, "Object deleted");
            no_content()
        }
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            "no object found with this id",
        ),
        Err(e) => store_error_response(e),
    }
}

pub async fn list_owner_objects_handler(
    State(host): State<WebHost>,
    header_map: HeaderMap,
    Path(world_id): Path<Uuid>,
) -> Response {
    let session = match current_session(&host, &header_map) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let objects = host
        .objects
        .objects_for_owner_in_world(session.user_id, WorldId(world_id));
    if objects.is_empty() {
        return error_response(StatusCode::NOT_FOUND, "not_found", "no objects found");
    }
    json_response(StatusCode::OK, &objects)
}

#[cfg(test)]
mod tests {
    use super::within_bounds;
    use terrarium_common::model::{UserId, World, WorldId};

    fn bounded(max_width: Option<u32>, max_height: Option<u32>) -> World {
        World {
            id: WorldId::new(),
            name: "test".to_string(),
            max_height,
            max_width,
            owner_user_id: UserId::new(),
        }
    }

    #[test]
    fn test_within_bounds() {
        let world = bounded(Some(100), Some(50));
        assert!(within_bounds(&world, 0.0, 0.0));
        assert!(within_bounds(&world, 100.0, 50.0));
        assert!(!within_bounds(&world, 100.5, 0.0));
        assert!(!within_bounds(&world, 0.0, 50.5));
        assert!(!within_bounds(&world, -1.0, 0.0));
    }

    #[test]
    fn test_unbounded_axes() {
        assert!(within_bounds(&bounded(None, None), -1000.0, 1000.0));
        let width_only = bounded(Some(10), None);
        assert!(within_bounds(&width_only, 5.0, 99999.0));
        assert!(!within_bounds(&width_only, 11.0, 0.0));
    }
}
