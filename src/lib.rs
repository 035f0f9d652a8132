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

//! psx-core: core emulation primitives for a PS1-class system
//!
//! This crate provides the hardest, bit-exact parts of emulating a
//! late-1990s MIPS R3000-based home console: the system bus and address
//! decoding, the GPU display-list command decoder, the Geometry
//! Transformation Engine (coprocessor 2), and the BIOS/RAM/disc/executable
//! loaders that feed them. The MIPS instruction interpreter, debugger UI,
//! disassembler, and scheduler loop are external collaborators that consume
//! this crate through [`core::bus::Bus`] and [`core::gte::Gte`] — they are
//! not implemented here.
//!
//! # Example
//!
//! ```no_run
//! use psx_core::core::bios::Bios;
//! use psx_core::core::ram::Ram;
//! use psx_core::core::bus::Bus;
//!
//! let bios = Bios::load_from_file("SCPH1001.BIN")?;
//! let mut bus = Bus::new(bios, Ram::new());
//! bus.store32(0x0000_1000, 0xDEAD_BEEF);
//! assert_eq!(bus.load32(0x0000_1000), 0xDEAD_BEEF);
//! # Ok::<(), psx_core::core::error::EmulatorError>(())
//! ```

pub mod core;

pub use core::error::{EmulatorError, Result};
