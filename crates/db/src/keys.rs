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

use serde::Serialize;
use serde::de::DeserializeOwned;
use terrarium_common::model::WorldStoreError;

/// Composite index key: fixed-width prefix (a 16-byte uuid) followed by the
/// rest. Prefix scans over the first component give the by-owner/by-world
/// listings.
pub(crate) fn composite(prefix: &[u8], rest: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + rest.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(rest);
    key
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, WorldStoreError> {
    serde_json::to_vec(value).map_err(|e| WorldStoreError::DatabaseError(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WorldStoreError> {
    serde_json::from_slice(bytes).map_err(|e| WorldStoreError::DatabaseError(e.to_string()))
}
