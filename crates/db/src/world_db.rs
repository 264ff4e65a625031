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

use fjall::{Config, PartitionCreateOptions, TxKeyspace, TxPartitionHandle};
use std::path::Path;
use strum::IntoEnumIterator;
use tempfile::TempDir;
use terrarium_common::model::WorldStoreError;
use tracing::info;

/// One partition per table. The `*_by_*` partitions are secondary indexes
/// keyed by composite byte keys; `world_names` and `account_emails` are the
/// storage-level unique constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Table {
    Worlds,
    WorldsByOwner,
    WorldNames,
    Objects,
    ObjectsByWorld,
    Accounts,
    AccountEmails,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Maximum number of worlds one account may own concurrently.
    pub max_worlds_per_owner: usize,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_worlds_per_owner: 5,
        }
    }
}

/// The world-builder store. Shared by reference across request handlers;
/// all repository traits are implemented on this one type, so a single
/// handle owns every partition and cross-table mutations can be one
/// transaction.
pub struct WorldDb {
    pub(crate) keyspace: TxKeyspace,
    partitions: Vec<TxPartitionHandle>,
    pub(crate) config: DbConfig,

    /// If this is a temporary database, this will be Some(TempDir) that will
    /// be cleaned up when the database is dropped.
    _tmpdir: Option<TempDir>,
}

impl WorldDb {
    /// Open (or create) the store at `path`. With no path, opens a temporary
    /// database that lives only as long as this handle.
    pub fn open(path: Option<&Path>, config: DbConfig) -> Result<Self, WorldStoreError> {
        let tmpdir = if path.is_none() {
            Some(TempDir::new().map_err(|e| WorldStoreError::DatabaseError(e.to_string()))?)
        } else {
            None
        };
        let path = path.unwrap_or_else(|| tmpdir.as_ref().unwrap().path());

        let keyspace = Config::new(path).open_transactional().map_err(db_err)?;
        let mut partitions = Vec::new();
        for table in Table::iter() {
            let partition = keyspace
                .open_partition(&table.to_string(), PartitionCreateOptions::default())
                .map_err(db_err)?;
            partitions.push(partition);
        }
        info!("World database open at {}", path.display());

        Ok(Self {
            keyspace,
            partitions,
            config,
            _tmpdir: tmpdir,
        })
    }

    pub(crate) fn partition(&self, table: Table) -> &TxPartitionHandle {
        &self.partitions[table as usize]
    }
}

pub(crate) fn db_err(e: fjall::Error) -> WorldStoreError {
    WorldStoreError::DatabaseError(e.to_string())
}
