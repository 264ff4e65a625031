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

//! The storage layer: an embedded fjall keyspace behind the repository
//! traits from `terrarium-common`.
//!
//! Every multi-key mutation runs inside a single write transaction, so the
//! per-owner invariants (name uniqueness, world quota) and the world-to-objects
//! cascade hold even under concurrent requests: the transaction keyspace
//! serializes writers. Records are stored as JSON; secondary-index
//! partitions hold composite keys for the by-owner and by-world scans.

pub use world_db::{DbConfig, WorldDb};

mod accounts;
mod keys;
mod objects;
mod world_db;
mod world_db_tests;
mod worlds;
