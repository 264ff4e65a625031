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

#[cfg(test)]
mod tests {
    use crate::{DbConfig, WorldDb};
    use terrarium_common::model::{
        Account, AccountRepository, ObjectId, ObjectRepository, PlacedObject, Role, UserId, World,
        WorldId, WorldRepository, WorldStoreError,
    };

    fn test_db() -> WorldDb {
        WorldDb::open(None, DbConfig::default()).unwrap()
    }

    fn world_named(owner: UserId, name: &str) -> World {
        World {
            id: WorldId::new(),
            name: name.to_string(),
            max_height: Some(100),
            max_width: Some(100),
            owner_user_id: owner,
        }
    }

    fn tree_at(world: WorldId, owner: UserId, x: f32, y: f32) -> PlacedObject {
        PlacedObject {
            id: ObjectId::new(),
            environment_id: world,
            prefab_id: "tree".to_string(),
            position_x: x,
            position_y: y,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_z: 0.0,
            sorting_layer: 0,
            user_id: owner,
        }
    }

    #[test]
    fn test_world_roundtrip() {
        let db = test_db();
        let owner = UserId::new();
        let created = db.create_world(world_named(owner, "Alpha")).unwrap();

        let fetched = db.world(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.owner_user_id, owner);

        assert_eq!(db.world(WorldId::new()).unwrap(), None);
    }

    #[test]
    fn test_duplicate_name_same_owner_rejected() {
        let db = test_db();
        let owner = UserId::new();
        db.create_world(world_named(owner, "Alpha")).unwrap();

        let result = db.create_world(world_named(owner, "Alpha"));
        assert_eq!(
            result,
            Err(WorldStoreError::DuplicateWorldName("Alpha".to_string()))
        );

        // Same name under a different owner is fine.
        let other = UserId::new();
        db.create_world(world_named(other, "Alpha")).unwrap();
    }

    #[test]
    fn test_world_quota() {
        let db = test_db();
        let owner = UserId::new();
        for i in 0..5 {
            db.create_world(world_named(owner, &format!("world-{i}")))
                .unwrap();
        }

        let result = db.create_world(world_named(owner, "one-too-many"));
        assert_eq!(result, Err(WorldStoreError::WorldQuotaExceeded(5)));

        // Another owner's quota is unaffected.
        let other = UserId::new();
        db.create_world(world_named(other, "world-0")).unwrap();

        // Deleting frees a slot.
        let worlds = db.worlds_for_owner(owner).unwrap();
        db.delete_world(worlds[0].id).unwrap();
        db.create_world(world_named(owner, "one-too-many")).unwrap();
    }

    #[test]
    fn test_worlds_for_owner_scoped() {
        let db = test_db();
        let alice = UserId::new();
        let bob = UserId::new();
        db.create_world(world_named(alice, "A1")).unwrap();
        db.create_world(world_named(alice, "A2")).unwrap();
        db.create_world(world_named(bob, "B1")).unwrap();

        let mut names: Vec<String> = db
            .worlds_for_owner(alice)
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["A1", "A2"]);

        assert_eq!(db.all_worlds().unwrap().len(), 3);
    }

    #[test]
    fn test_update_world_preserves_owner() {
        let db = test_db();
        let owner = UserId::new();
        let created = db.create_world(world_named(owner, "Alpha")).unwrap();

        let mut update = created.clone();
        update.name = "Beta".to_string();
        update.max_height = Some(200);
        // A forged owner in the update payload must not stick.
        update.owner_user_id = UserId::new();
        db.update_world(&update).unwrap();

        let fetched = db.world(created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Beta");
        assert_eq!(fetched.max_height, Some(200));
        assert_eq!(fetched.owner_user_id, owner);

        // The old name is free again, the new one is taken.
        db.create_world(world_named(owner, "Alpha")).unwrap();
        assert_eq!(
            db.create_world(world_named(owner, "Beta")),
            Err(WorldStoreError::DuplicateWorldName("Beta".to_string()))
        );
    }

    #[test]
    fn test_update_missing_world() {
        let db = test_db();
        let ghost = world_named(UserId::new(), "Ghost");
        assert_eq!(
            db.update_world(&ghost),
            Err(WorldStoreError::WorldNotFound(ghost.id))
        );
    }

    #[test]
    fn test_delete_world_cascades_to_objects() {
        let db = test_db();
        let owner = UserId::new();
        let world = db.create_world(world_named(owner, "Alpha")).unwrap();
        let kept_world = db.create_world(world_named(owner, "Beta")).unwrap();

        let doomed = db.create_object(tree_at(world.id, owner, 1.0, 2.0)).unwrap();
        db.create_object(tree_at(world.id, owner, 3.0, 4.0)).unwrap();
        let kept = db
            .create_object(tree_at(kept_world.id, owner, 5.0, 6.0))
            .unwrap();

        db.delete_world(world.id).unwrap();

        assert_eq!(db.world(world.id).unwrap(), None);
        assert_eq!(db.object(doomed.id).unwrap(), None);
        assert!(db.objects_in_world(world.id).unwrap().is_empty());

        // The neighbouring world and its object are untouched.
        assert_eq!(db.object(kept.id).unwrap(), Some(kept));
    }

    #[test]
    fn test_object_roundtrip() {
        let db = test_db();
        let owner = UserId::new();
        let world = db.create_world(world_named(owner, "Alpha")).unwrap();

        let created = db
            .create_object(tree_at(world.id, owner, 1.0, 2.0))
            .unwrap();
        let fetched = db.object(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.user_id, owner);
    }

    #[test]
    fn test_object_requires_existing_world() {
        let db = test_db();
        let ghost = WorldId::new();
        let result = db.create_object(tree_at(ghost, UserId::new(), 0.0, 0.0));
        assert_eq!(result, Err(WorldStoreError::WorldNotFound(ghost)));
    }

    #[test]
    fn test_owner_checked_delete() {
        let db = test_db();
        let owner = UserId::new();
        let world = db.create_world(world_named(owner, "Alpha")).unwrap();
        let object = db
            .create_object(tree_at(world.id, owner, 1.0, 2.0))
            .unwrap();

        // Wrong owner: nothing deleted, object unchanged.
        assert_eq!(db.delete_object(object.id, Some(UserId::new())), Ok(false));
        assert_eq!(db.object(object.id).unwrap(), Some(object.clone()));

        // Right owner: gone, and a second delete reports nothing deleted.
        assert_eq!(db.delete_object(object.id, Some(owner)), Ok(true));
        assert_eq!(db.object(object.id).unwrap(), None);
        assert_eq!(db.delete_object(object.id, Some(owner)), Ok(false));
    }

    #[test]
    fn test_unchecked_delete() {
        let db = test_db();
        let owner = UserId::new();
        let world = db.create_world(world_named(owner, "Alpha")).unwrap();
        let object = db
            .create_object(tree_at(world.id, owner, 1.0, 2.0))
            .unwrap();

        assert_eq!(db.delete_object(object.id, None), Ok(true));
        assert_eq!(db.object(object.id).unwrap(), None);
    }

    #[test]
    fn test_update_object_preserves_owner() {
        let db = test_db();
        let owner = UserId::new();
        let world = db.create_world(world_named(owner, "Alpha")).unwrap();
        let object = db
            .create_object(tree_at(world.id, owner, 1.0, 2.0))
            .unwrap();

        let mut update = object.clone();
        update.position_x = 9.0;
        update.user_id = UserId::new();
        db.update_object(&update).unwrap();

        let fetched = db.object(object.id).unwrap().unwrap();
        assert_eq!(fetched.position_x, 9.0);
        assert_eq!(fetched.user_id, owner);
    }

    #[test]
    fn test_update_object_moves_between_worlds() {
        let db = test_db();
        let owner = UserId::new();
        let from = db.create_world(world_named(owner, "From")).unwrap();
        let to = db.create_world(world_named(owner, "To")).unwrap();
        let object = db.create_object(tree_at(from.id, owner, 1.0, 2.0)).unwrap();

        let mut update = object.clone();
        update.environment_id = to.id;
        db.update_object(&update).unwrap();

        assert!(db.objects_in_world(from.id).unwrap().is_empty());
        let in_to = db.objects_in_world(to.id).unwrap();
        assert_eq!(in_to.len(), 1);
        assert_eq!(in_to[0].id, object.id);

        // Moving to a world that does not exist is rejected.
        let ghost = WorldId::new();
        update.environment_id = ghost;
        assert_eq!(
            db.update_object(&update),
            Err(WorldStoreError::WorldNotFound(ghost))
        );
    }

    #[test]
    fn test_objects_for_owner_in_world_filters() {
        let db = test_db();
        let alice = UserId::new();
        let bob = UserId::new();
        let world = db.create_world(world_named(alice, "Shared")).unwrap();

        db.create_object(tree_at(world.id, alice, 1.0, 1.0)).unwrap();
        db.create_object(tree_at(world.id, alice, 2.0, 2.0)).unwrap();
        db.create_object(tree_at(world.id, bob, 3.0, 3.0)).unwrap();

        assert_eq!(db.objects_for_owner_in_world(alice, world.id).len(), 2);
        assert_eq!(db.objects_for_owner_in_world(bob, world.id).len(), 1);
        // Unknown world fails soft as an empty listing.
        assert!(db
            .objects_for_owner_in_world(alice, WorldId::new())
            .is_empty());
    }

    #[test]
    fn test_account_email_unique() {
        let db = test_db();
        let account = Account {
            id: UserId::new(),
            email: "Builder@Example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
        };
        db.create_account(account.clone()).unwrap();

        // Same email, different casing: still a duplicate.
        let clash = Account {
            id: UserId::new(),
            email: "builder@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
        };
        assert_eq!(
            db.create_account(clash),
            Err(WorldStoreError::DuplicateEmail(
                "builder@example.com".to_string()
            ))
        );

        let fetched = db.account_by_email("BUILDER@EXAMPLE.COM").unwrap().unwrap();
        assert_eq!(fetched.id, account.id);
        assert_eq!(db.account(account.id).unwrap(), Some(fetched));
        assert_eq!(db.account_by_email("nobody@example.com").unwrap(), None);
    }

    #[test]
    fn test_reopen_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let owner = UserId::new();
        let world_id = {
            let db = WorldDb::open(Some(dir.path()), DbConfig::default()).unwrap();
            db.create_world(world_named(owner, "Durable")).unwrap().id
        };

        let db = WorldDb::open(Some(dir.path()), DbConfig::default()).unwrap();
        let fetched = db.world(world_id).unwrap().unwrap();
        assert_eq!(fetched.name, "Durable");
        assert_eq!(fetched.owner_user_id, owner);
    }
}
