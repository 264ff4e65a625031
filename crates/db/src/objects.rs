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
use terrarium_common::model::{
    ObjectId, ObjectRepository, PlacedObject, UserId, WorldId, WorldStoreError,
};
use tracing::warn;

impl ObjectRepository for WorldDb {
    fn create_object(&self, object: PlacedObject) -> Result<PlacedObject, WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        if tx
            .get(
                self.partition(Table::Worlds),
                object.environment_id.as_bytes(),
            )
            .map_err(db_err)?
            .is_none()
        {
            return Err(WorldStoreError::WorldNotFound(object.environment_id));
        }

        tx.insert(
            self.partition(Table::Objects),
            object.id.as_bytes(),
            encode(&object)?,
        );
        tx.insert(
            self.partition(Table::ObjectsByWorld),
            composite(object.environment_id.as_bytes(), object.id.as_bytes()),
            Vec::<u8>::new(),
        );
        tx.commit().map_err(db_err)?;

        Ok(object)
    }

    fn object(&self, id: ObjectId) -> Result<Option<PlacedObject>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let Some(bytes) = tx
            .get(self.partition(Table::Objects), id.as_bytes())
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(Some(decode(&bytes)?))
    }

    fn objects_in_world(&self, world: WorldId) -> Result<Vec<PlacedObject>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let mut objects = Vec::new();
        for entry in tx.prefix(self.partition(Table::ObjectsByWorld), world.as_bytes()) {
            let (key, _) = entry.map_err(db_err)?;
            let object_id = &key[16..];
            let Some(bytes) = tx
                .get(self.partition(Table::Objects), object_id)
                .map_err(db_err)?
            else {
                warn!("Dangling world-index entry for object {:?}", object_id);
                continue;
            };
            objects.push(decode(&bytes)?);
        }
        Ok(objects)
    }

    fn objects_for_owner_in_world(&self, owner: UserId, world: WorldId) -> Vec<PlacedObject> {
        // Fail soft: the caller treats a backend failure the same as an empty
        // world, so log and return nothing rather than propagating.
        match self.objects_in_world(world) {
            Ok(objects) => objects
                .into_iter()
                .filter(|o| o.user_id == owner)
                .collect(),
            Err(e) => {
                warn!(error = ?e, "Objects query failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn update_object(&self, object: &PlacedObject) -> Result<(), WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        let Some(bytes) = tx
            .get(self.partition(Table::Objects), object.id.as_bytes())
            .map_err(db_err)?
        else {
            return Err(WorldStoreError::ObjectNotFound(object.id));
        };
        let existing: PlacedObject = decode(&bytes)?;

        let mut updated = object.clone();
        updated.id = existing.id;
        // Ownership never moves on update, whatever the caller passed in.
        updated.user_id = existing.user_id;

        if updated.environment_id != existing.environment_id {
            if tx
                .get(
                    self.partition(Table::Worlds),
                    updated.environment_id.as_bytes(),
                )
                .map_err(db_err)?
                .is_none()
            {
                return Err(WorldStoreError::WorldNotFound(updated.environment_id));
            }
            tx.remove(
                self.partition(Table::ObjectsByWorld),
                composite(existing.environment_id.as_bytes(), existing.id.as_bytes()),
            );
            tx.insert(
                self.partition(Table::ObjectsByWorld),
                composite(updated.environment_id.as_bytes(), updated.id.as_bytes()),
                Vec::<u8>::new(),
            );
        }

        tx.insert(
            self.partition(Table::Objects),
            updated.id.as_bytes(),
            encode(&updated)?,
        );
        tx.commit().map_err(db_err)?;

        Ok(())
    }

    fn delete_object(&self, id: ObjectId, owner: Option<UserId>) -> Result<bool, WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        let Some(bytes) = tx
            .get(self.partition(Table::Objects), id.as_bytes())
            .map_err(db_err)?
        else {
            return Ok(false);
        };
        let object: PlacedObject = decode(&bytes)?;

        if let Some(owner) = owner
            && object.user_id != owner
        {
            return Ok(false);
        }

        tx.remove(self.partition(Table::Objects), id.as_bytes());
        tx.remove(
            self.partition(Table::ObjectsByWorld),
            composite(object.environment_id.as_bytes(), id.as_bytes()),
        );
        tx.commit().map_err(db_err)?;

        Ok(true)
    }
}
