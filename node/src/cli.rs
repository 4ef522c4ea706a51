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

//! Command line options of the node binary.

use structopt::StructOpt;

#[derive(StructOpt, Clone, Debug)]
#[structopt(name = "trial-registry-node", max_term_width = 80)]
pub struct Options {
    /// IP address to bind the JSON-RPC server to.
    #[structopt(long, default_value = "127.0.0.1", value_name = "address")]
    pub bind: std::net::IpAddr,

    /// Port to serve JSON-RPC on.
    #[structopt(long, default_value = "9933", value_name = "port")]
    pub port: u16,

    /// Seal a block every so many milliseconds from the transaction pool
    /// instead of sealing a block for every submitted transaction.
    #[structopt(long, value_name = "milliseconds")]
    pub block_time: Option<u64>,
}
