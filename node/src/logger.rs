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

//! Provides [init] to initialize our custom logger.
use std::io::Write as _;

/// Initializes [env_logger] with our custom formatter, logging at info level
/// unless the `RUST_LOG` environment variable says otherwise.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(format_record)
        .target(env_logger::Target::Stdout)
        .init();
}

fn format_record(
    formatter: &mut env_logger::fmt::Formatter,
    record: &log::Record,
) -> std::io::Result<()> {
    writeln!(
        formatter,
        "{time} {level:<5} {target}  {msg}",
        time = formatter.timestamp_millis(),
        level = record.level(),
        target = record.target(),
        msg = record.args()
    )
}
