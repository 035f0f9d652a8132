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

//! GPU command/status ports (GP0 at +0, GP1 at +4)

pub mod command;

use self::command::GpuCommand;
use crate::core::device::Device;

/// Idle status word: ready-to-receive-command and ready-to-send-VRAM bits
/// set, display disabled. Matches the value real BIOS polls for after reset.
const IDLE_STATUS: u32 = 0x1C00_0000;

/// Wraps the GP0 command decoder and a GP1 status shadow register behind the
/// `Device` contract so the Bus can dispatch the 8-byte GPU window to it.
pub struct GpuPort {
    gp0: GpuCommand,
    status: u32,
}

impl GpuPort {
    pub fn new() -> Self {
        Self {
            gp0: GpuCommand::new(),
            status: IDLE_STATUS,
        }
    }

    pub fn command(&self) -> &GpuCommand {
        &self.gp0
    }

    fn feed_gp0(&mut self, word: u32) {
        let expected = self.gp0.expected_params();
        let have = self.gp0.params().len() as i32;
        let awaiting_more = expected < 0 || have < expected;

        if matches!(self.gp0.command_type(), command::GpuCommandType::None) || !awaiting_more {
            self.gp0.set(word);
        } else {
            self.gp0.add_param(word);
        }
    }
}

impl Default for GpuPort {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for GpuPort {
    fn read8(&self, offset: u32) -> u8 {
        log::warn!("GPU: unhandled read8 at offset 0x{:X}", offset);
        0
    }

    fn read16(&self, offset: u32) -> u16 {
        log::warn!("GPU: unhandled read16 at offset 0x{:X}", offset);
        0
    }

    fn read32(&self, offset: u32) -> u32 {
        match offset {
            0 => 0,
            4 => self.status,
            _ => {
                log::warn!("GPU: read32 out of range at offset 0x{:X}", offset);
                0
            }
        }
    }

    fn write8(&mut self, offset: u32, value: u8) {
        log::warn!(
            "GPU: unhandled write8 at offset 0x{:X} = 0x{:02X}",
            offset,
            value
        );
    }

    fn write16(&mut self, offset: u32, value: u16) {
        log::warn!(
            "GPU: unhandled write16 at offset 0x{:X} = 0x{:04X}",
            offset,
            value
        );
    }

    fn write32(&mut self, offset: u32, value: u32) {
        match offset {
            0 => self.feed_gp0(value),
            4 => {
                log::debug!("GPU: GP1 control write 0x{:08X}", value);
                self.status = value;
            }
            _ => log::warn!(
                "GPU: write32 out of range at offset 0x{:X} = 0x{:08X}",
                offset,
                value
            ),
        }
    }
}
