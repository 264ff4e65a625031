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

use crate::keys::{decode, encode};
use crate::world_db::{Table, WorldDb, db_err};
use terrarium_common::model::{Account, AccountRepository, UserId, WorldStoreError};

// Emails are matched case-insensitively; the index key is the lowercased
// form, the stored record keeps whatever casing was registered.
fn email_key(email: &str) -> Vec<u8> {
    email.to_lowercase().into_bytes()
}

impl AccountRepository for WorldDb {
    fn create_account(&self, account: Account) -> Result<Account, WorldStoreError> {
        let mut tx = self.keyspace.write_tx();

        let key = email_key(&account.email);
        if tx
            .get(self.partition(Table::AccountEmails), &key)
            .map_err(db_err)?
            .is_some()
        {
            return Err(WorldStoreError::DuplicateEmail(account.email.clone()));
        }

        tx.insert(
            self.partition(Table::Accounts),
            account.id.as_bytes(),
            encode(&account)?,
        );
        tx.insert(self.partition(Table::AccountEmails), key, account.id.as_bytes());
        tx.commit().map_err(db_err)?;

        Ok(account)
    }

    fn account(&self, id: UserId) -> Result<Option<Account>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let Some(bytes) = tx
            .get(self.partition(Table::Accounts), id.as_bytes())
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(Some(decode(&bytes)?))
    }

    fn account_by_email(&self, email: &str) -> Result<Option<Account>, WorldStoreError> {
        let tx = self.keyspace.read_tx();
        let Some(id_bytes) = tx
            .get(self.partition(Table::AccountEmails), email_key(email))
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let Some(bytes) = tx
            .get(self.partition(Table::Accounts), &id_bytes[..])
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        Ok(Some(decode(&bytes)?))
    }
}
