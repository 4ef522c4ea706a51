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

//! Trial registry development node binary.

use std::net::SocketAddr;
use std::time::Duration;

use structopt::StructOpt as _;

use trial_registry_node::{Node, NodeConfig};
use trial_registry_runtime::GenesisConfig;

mod cli;
mod logger;

#[tokio::main]
async fn main() {
    logger::init();
    let options = cli::Options::from_args();
    if let Err(error) = run(options).await {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

async fn run(options: cli::Options) -> Result<(), std::io::Error> {
    let config = NodeConfig {
        bind: SocketAddr::new(options.bind, options.port),
        block_time: options.block_time.map(Duration::from_millis),
        genesis: GenesisConfig::dev(),
    };
    let node = Node::start(config).await?;

    log::info!("development chain {}", node.genesis_hash());
    log::info!("listening on {}", node.url());
    match options.block_time {
        Some(block_time) => log::info!("sealing a block every {}ms", block_time),
        None => log::info!("sealing a block for every submitted transaction"),
    }

    tokio::signal::ctrl_c().await?;
    log::info!("shutting down");
    Ok(())
}
