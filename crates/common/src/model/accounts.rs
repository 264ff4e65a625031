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

use crate::model::{UserId, WorldStoreError};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A registered account. Never serialized onto the wire whole; the
/// `password_hash` is an argon2id PHC string and stays inside the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    /// Login name. Unique, matched case-insensitively.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Storage contract for accounts.
pub trait AccountRepository: Send + Sync {
    /// Persist a new account. Fails with `DuplicateEmail` if the email is
    /// already registered.
    fn create_account(&self, account: Account) -> Result<Account, WorldStoreError>;

    fn account(&self, id: UserId) -> Result<Option<Account>, WorldStoreError>;

    fn account_by_email(&self, email: &str) -> Result<Option<Account>, WorldStoreError>;
}
