// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 psx-core contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimal CLI entry point for the core: loads a BIOS image and wires up a
//! [`Bus`], then exits. There is no CPU, scheduler, or UI here — those are
//! the external collaborators named in the crate's top-level docs. This
//! binary exists so the core's loaders and bus can be exercised end-to-end
//! from the command line.

use clap::Parser;
use psx_core::core::bios::Bios;
use psx_core::core::bus::Bus;
use psx_core::core::device::Device;
use psx_core::core::ram::Ram;

/// Load a BIOS image into the system bus and report readiness.
#[derive(Debug, Parser)]
#[command(name = "psrx-core-cli", version, about)]
struct Args {
    /// Path to a 512 KiB raw BIOS image.
    bios: String,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let bios = match Bios::load_from_file(&args.bios) {
        Ok(bios) => bios,
        Err(err) => {
            log::error!("failed to load BIOS from {}: {}", args.bios, err);
            std::process::exit(1);
        }
    };

    let bus = Bus::new(bios, Ram::new());
    log::info!(
        "BIOS loaded from {}; bus ready (GP1 status 0x{:08X})",
        args.bios,
        bus.gpu().read32(4)
    );
}
