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

//! The entities of the world-builder model, the repository contracts the
//! storage layer implements, and the error taxonomy shared by every layer.

pub use crate::model::accounts::{Account, AccountRepository, Role};
pub use crate::model::ids::{ObjectId, UserId, WorldId};
pub use crate::model::objects::{ObjectRepository, PlacedObject};
pub use crate::model::worlds::{World, WorldRepository};
use thiserror::Error;

mod accounts;
mod ids;
mod objects;
mod worlds;

/// Everything that can go wrong inside the storage layer, as seen by its
/// callers. The web layer maps these onto HTTP statuses; nothing below the
/// controllers knows about HTTP.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldStoreError {
    #[error("World not found: {0}")]
    WorldNotFound(WorldId),
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("World name already in use: {0}")]
    DuplicateWorldName(String),
    #[error("World quota exceeded (limit {0})")]
    WorldQuotaExceeded(usize),
    #[error("An account already exists for email: {0}")]
    DuplicateEmail(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}
