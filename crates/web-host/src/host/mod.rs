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

pub mod auth;
pub mod objects;
pub mod web_host;
pub mod worlds;

pub use auth::{login_handler, register_handler};
pub use objects::{
    create_object_handler, delete_object_handler, list_owner_objects_handler,
    update_object_handler,
};
pub use web_host::{WebHost, health_handler};
pub use worlds::{
    create_world_handler, delete_world_handler, get_world_handler, list_world_objects_handler,
    list_worlds_handler, update_world_handler,
};
