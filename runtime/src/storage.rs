// Trial Registry
// Copyright (C) 2026 Trial Registry developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Key-value state storage with SCALE-typed access.
//!
//! Keys are namespaced byte strings built by the module owning them, see
//! [crate::registry::store]. Clients read the same keys through the backend
//! fetch interface and decode the values themselves.

use std::collections::BTreeMap;

use codec::{Decode, Encode};

/// The ledger state as a sorted key-value map.
#[derive(Clone, Debug, Default)]
pub struct Storage {
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the value stored under `key`.
    ///
    /// Panics when the stored bytes do not decode as `T`. Values are only
    /// ever written by the runtime modules, so a decoding failure is a bug,
    /// not an input error.
    pub fn get<T: Decode>(&self, key: &[u8]) -> Option<T> {
        self.map.get(key).map(|bytes| {
            T::decode(&mut &bytes[..]).expect("stored value decodes as its storage type")
        })
    }

    pub fn put<T: Encode>(&mut self, key: Vec<u8>, value: &T) {
        self.map.insert(key, value.encode());
    }

    pub fn get_raw(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.get(key).cloned()
    }

    /// All keys starting with `prefix`, in byte order.
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.map
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_returns_what_put_stored() {
        let mut storage = Storage::new();
        storage.put(b"answer".to_vec(), &42u64);
        assert_eq!(storage.get::<u64>(b"answer"), Some(42));
        assert_eq!(storage.get::<u64>(b"question"), None);
    }

    #[test]
    fn keys_with_prefix_is_sorted_and_bounded() {
        let mut storage = Storage::new();
        storage.put(b"a:2".to_vec(), &());
        storage.put(b"a:1".to_vec(), &());
        storage.put(b"b:1".to_vec(), &());
        assert_eq!(
            storage.keys_with_prefix(b"a:"),
            vec![b"a:1".to_vec(), b"a:2".to_vec()]
        );
        assert!(storage.keys_with_prefix(b"c:").is_empty());
    }
}
