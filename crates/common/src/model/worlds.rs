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

use crate::model::{UserId, WorldId, WorldStoreError};
use serde_derive::{Deserialize, Serialize};

/// A bounded 2D container owned by one account, holding placed objects.
///
/// Wire field names follow the client's JSON convention (`maxHeight`,
/// `ownerUserId`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    pub id: WorldId,
    pub name: String,
    /// Optional vertical bound for object placement. `None` means unbounded.
    pub max_height: Option<u32>,
    /// Optional horizontal bound for object placement. `None` means unbounded.
    pub max_width: Option<u32>,
    /// Stamped by the server from the caller identity, never from client
    /// input.
    pub owner_user_id: UserId,
}

/// Storage contract for worlds. Implementations must enforce the two
/// per-owner invariants atomically at create/rename time: no duplicate name,
/// and no more worlds than the configured quota.
pub trait WorldRepository: Send + Sync {
    /// Persist a new world. The caller has already assigned `id` and
    /// `owner_user_id`.
    fn create_world(&self, world: World) -> Result<World, WorldStoreError>;

    fn world(&self, id: WorldId) -> Result<Option<World>, WorldStoreError>;

    fn worlds_for_owner(&self, owner: UserId) -> Result<Vec<World>, WorldStoreError>;

    /// Every world in the store, regardless of owner. Administrative use.
    fn all_worlds(&self) -> Result<Vec<World>, WorldStoreError>;

    /// Full-row update by `id`. The stored `owner_user_id` is preserved; a
    /// rename re-checks name uniqueness for the owner.
    fn update_world(&self, world: &World) -> Result<(), WorldStoreError>;

    /// Delete the world and every object placed in it, atomically.
    fn delete_world(&self, id: WorldId) -> Result<(), WorldStoreError>;
}
