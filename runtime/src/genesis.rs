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

use trial_registry_core::{ed25519, AccountId};

/// The initial state of a chain.
///
/// Determines the genesis hash: two ledgers created from the same config
/// accept each other's transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisConfig {
    /// Accounts authorized as researchers at genesis.
    pub authorized_researchers: Vec<AccountId>,
    /// Accounts known to the chain from genesis, listed by account
    /// enumeration before they ever transact.
    pub accounts: Vec<AccountId>,
}

/// Key pairs of the well-known development accounts, in enumeration order.
pub fn dev_account_pairs() -> Vec<ed25519::Pair> {
    ["//Alice", "//Bob", "//Charlie", "//Dave", "//Eve", "//Ferdie"]
        .iter()
        .map(|phrase| {
            ed25519::Pair::from_string(phrase).expect("dev phrases are well formed")
        })
        .collect()
}

impl GenesisConfig {
    /// The development chain: the well-known dev accounts exist and
    /// `//Alice` is the authorized genesis researcher.
    pub fn dev() -> Self {
        let accounts: Vec<AccountId> = dev_account_pairs()
            .iter()
            .map(|pair| pair.public())
            .collect();
        GenesisConfig {
            authorized_researchers: vec![accounts[0]],
            accounts,
        }
    }
}
