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

use crate::model::{ObjectId, UserId, WorldId, WorldStoreError};
use serde_derive::{Deserialize, Serialize};

/// A placed prefab instance: a template reference plus transform data,
/// owned by one account and living inside exactly one world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedObject {
    pub id: ObjectId,
    /// The world this object is placed in. Must reference an existing world.
    pub environment_id: WorldId,
    /// Identifier of the prefab/asset template this object instantiates.
    pub prefab_id: String,
    pub position_x: f32,
    pub position_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation_z: f32,
    /// Draw-order hint for the client renderer.
    pub sorting_layer: i32,
    /// Stamped by the server from the caller identity.
    pub user_id: UserId,
}

/// Storage contract for placed objects.
pub trait ObjectRepository: Send + Sync {
    /// Persist a new object. The caller has already assigned `id` and
    /// `user_id`; the referenced world must exist.
    fn create_object(&self, object: PlacedObject) -> Result<PlacedObject, WorldStoreError>;

    fn object(&self, id: ObjectId) -> Result<Option<PlacedObject>, WorldStoreError>;

    fn objects_in_world(&self, world: WorldId) -> Result<Vec<PlacedObject>, WorldStoreError>;

    /// Objects placed by `owner` in `world`. This read fails soft: a backend
    /// error is logged and surfaced as an empty list, since callers of this
    /// one path cannot act differently on error vs. no-results.
    fn objects_for_owner_in_world(&self, owner: UserId, world: WorldId) -> Vec<PlacedObject>;

    /// Full-row update by `id`. The stored `user_id` is preserved; moving the
    /// object to another world re-validates that the target world exists.
    fn update_object(&self, object: &PlacedObject) -> Result<(), WorldStoreError>;

    /// Delete by id. With `owner` set, deletes only when the stored `user_id`
    /// matches. Returns whether a row went away; absent and not-owned are
    /// indistinguishable to the caller.
    fn delete_object(&self, id: ObjectId, owner: Option<UserId>) -> Result<bool, WorldStoreError>;
}
