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

use crate::keys::{composite, decode, encode};
use crate::world_db::{Table, WorldDb, db_err};
use terrarium_common::model::{UserId, World, WorldId, WorldRepository, WorldStoreError};
use tracing::warn;

impl WorldRepository for WorldDb {
    fn create_world(&self, world: World) -> Result<World, WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        // Name uniqueness and quota are checked inside the same transaction
        // that inserts, so two concurrent creates for one owner serialize
        // rather than both passing the checks.
        let name_key = composite(world.owner_user_id.as_bytes(), world.name.as_bytes());
        if tx
            .get(self.partition(Table::WorldNames), &name_key)
            .map_err(db_err)?
            .is_some()
        {
            return Err(WorldStoreError::DuplicateWorldName(world.name.clone()));
        }

        let mut owned = 0usize;
        for entry in tx.prefix(
            self.partition(Table::WorldsByOwner),
            world.owner_user_id.as_bytes(),
        ) {
            entry.map_err(db_err)?;
            owned += 1;
        }
        if owned >= self.config.max_worlds_per_owner {
            return Err(WorldStoreError::WorldQuotaExceeded(
                self.config.max_worlds_per_owner,
            ));
        }

        tx.insert(
            self.partition(Table::Worlds),
            world.id.as_bytes(),
            encode(&world)?,
        );
        tx.insert(
            self.partition(Table::WorldsByOwner),
            composite(world.owner_user_id.as_bytes(), world.id.as_bytes()),
            Vec::<u8>::new(),
        );
        tx.insert(
            self.partition(Table::WorldNames),
            name_key,
            world.id.as_bytes(),
        );
        tx.commit().map_err(db_err)?;

        Ok(world)
    }

    fn world(&self, id: WorldId) -> Result<Option<World>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let Some(bytes) = tx
            .get(self.partition(Table::Worlds), id.as_bytes())
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(Some(decode(&bytes)?))
    }

    fn worlds_for_owner(&self, owner: UserId) -> Result<Vec<World>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let mut worlds = Vec::new();
        for entry in tx.prefix(self.partition(Table::WorldsByOwner), owner.as_bytes()) {
            let (key, _) = entry.map_err(db_err)?;
            let world_id = &key[16..];
            let Some(bytes) = tx
                .get(self.partition(Table::Worlds), world_id)
                .map_err(db_err)?
            else {
                warn!("Dangling owner-index entry for world {:?}", world_id);
                continue;
            };
            worlds.push(decode(&bytes)?);
        }
        Ok(worlds)
    }

    fn all_worlds(&self) -> Result<Vec<World>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let mut worlds = Vec::new();
        for entry in tx.iter(self.partition(Table::Worlds)) {
            let (_, bytes) = entry.map_err(db_err)?;
            worlds.push(decode(&bytes)?);
        }
        Ok(worlds)
    }

    fn update_world(&self, world: &World) -> Result<(), WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        let Some(bytes) = tx
            .get(self.partition(Table::Worlds), world.id.as_bytes())
            .map_err(db_err)?
        else {
            return Err(WorldStoreError::WorldNotFound(world.id));
        };
        let existing: World = decode(&bytes)?;

        let mut updated = world.clone();
        updated.id = existing.id;
        // Ownership never moves on update, whatever the caller passed in.
        updated.owner_user_id = existing.owner_user_id;

        if updated.name != existing.name {
            let new_name_key = composite(existing.owner_user_id.as_bytes(), updated.name.as_bytes());
            if tx
                .get(self.partition(Table::WorldNames), &new_name_key)
                .map_err(db_err)?
                .is_some()
            {
                return Err(WorldStoreError::DuplicateWorldName(updated.name.clone()));
            }
            tx.remove(
                self.partition(Table::WorldNames),
                composite(existing.owner_user_id.as_bytes(), existing.name.as_bytes()),
            );
            tx.insert(
                self.partition(Table::WorldNames),
                new_name_key,
                updated.id.as_bytes(),
            );
        }

        tx.insert(
            self.partition(Table::Worlds),
            updated.id.as_bytes(),
            encode(&updated)?,
        );
        tx.commit().map_err(db_err)?;

        Ok(())
    }

    fn delete_world(&self, id: WorldId) -> Result<(), WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        let Some(bytes) = tx
            .get(self.partition(Table::Worlds), id.as_bytes())
            .map_err(db_err)?
        else {
            return Err(WorldStoreError::WorldNotFound(id));
        };
        let world: World = decode(&bytes)?;

        // Objects go first, world rows second; either the whole transaction
        // lands or none of it does, so no orphaned objects survive a failure
        // partway through.
        let mut object_keys = Vec::new();
        for entry in tx.prefix(self.partition(Table::ObjectsByWorld), id.as_bytes()) {
            let (key, _) = entry.map_err(db_err)?;
            object_keys.push(key);
        }
        for key in object_keys {
            tx.remove(self.partition(Table::Objects), &key[16..]);
            tx.remove(self.partition(Table::ObjectsByWorld), &key[..]);
        }

        tx.remove(
            self.partition(Table::WorldNames),
            composite(world.owner_user_id.as_bytes(), world.name.as_bytes()),
        );
        tx.remove(
            self.partition(Table::WorldsByOwner),
            composite(world.owner_user_id.as_bytes(), id.as_bytes()),
        );
        tx.remove(self.partition(Table::Worlds), id.as_bytes());
        tx.commit().map_err(db_err)?;

        Ok(())
    }
}
