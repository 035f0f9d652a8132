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

//! PSX executable (PS-EXE) loader
//!
//! Parses the fixed 2048-byte header and reads the program payload that
//! follows. On any failure — missing file, short header, short payload —
//! the executable is left entirely zeroed rather than partially populated.

use std::fs::File;
use std::io::Read as _;

pub const HEADER_SIZE: usize = 2048;

const INITIAL_PC_OFFSET: usize = 0x10;
const INITIAL_GP_OFFSET: usize = 0x14;
const RAM_DESTINATION_OFFSET: usize = 0x18;
const EXE_SIZE_OFFSET: usize = 0x1C;
const INITIAL_SP_BASE_OFFSET: usize = 0x30;
const INITIAL_SP_OFFSET_OFFSET: usize = 0x34;

#[derive(Debug, Default, Clone)]
pub struct PsxExecutable {
    pub initial_pc: u32,
    pub initial_gp: u32,
    pub ram_destination: u32,
    pub exe_size: u32,
    pub initial_sp_base: u32,
    pub initial_sp_offset: u32,
    pub data: Vec<u8>,
}

impl PsxExecutable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a PS-EXE from `path`.
    ///
    /// Returns `true` on success. On any failure (absent file, short header,
    /// short payload) returns `false` and leaves `self` entirely zeroed —
    /// matching the source implementation's fail-before-mutate ordering.
    pub fn load(&mut self, path: &str) -> bool {
        *self = Self::default();

        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("PsxExecutable: could not open {}: {}", path, e);
                return false;
            }
        };

        let mut header = [0u8; HEADER_SIZE];
        if file.read_exact(&mut header).is_err() {
            log::warn!("PsxExecutable: short header read from {}", path);
            return false;
        }

        let initial_pc = read_u32_le(&header, INITIAL_PC_OFFSET);
        let initial_gp = read_u32_le(&header, INITIAL_GP_OFFSET);
        let ram_destination = read_u32_le(&header, RAM_DESTINATION_OFFSET);
        let exe_size = read_u32_le(&header, EXE_SIZE_OFFSET);
        let initial_sp_base = read_u32_le(&header, INITIAL_SP_BASE_OFFSET);
        let initial_sp_offset = read_u32_le(&header, INITIAL_SP_OFFSET_OFFSET);

        let mut data = vec![0u8; exe_size as usize];
        if file.read_exact(&mut data).is_err() {
            log::warn!("PsxExecutable: short payload read from {}", path);
            return false;
        }

        self.initial_pc = initial_pc;
        self.initial_gp = initial_gp;
        self.ram_destination = ram_destination;
        self.exe_size = exe_size;
        self.initial_sp_base = initial_sp_base;
        self.initial_sp_offset = initial_sp_offset;
        self.data = data;
        true
    }
}

fn read_u32_le(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}
