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

//! BIOS ROM: an immutable 512 KiB image loaded from a host file.

use std::fs::File;
use std::io::Read as _;

use crate::core::device::Device;
use crate::core::error::{EmulatorError, Result};

/// Boot ROM image.
///
/// `Bios::new` yields a zeroed image so the Bus can be wired up before a real
/// BIOS is loaded; `load_from_file` is the only way to populate it, and it
/// fails closed (leaves the image zeroed) on any I/O problem.
pub struct Bios {
    data: Vec<u8>,
}

impl Bios {
    pub const SIZE: usize = 512 * 1024;

    pub fn new() -> Self {
        Self {
            data: vec![0u8; Self::SIZE],
        }
    }

    /// Load a BIOS image from `path`.
    ///
    /// Fails if the file is absent, unreadable, or not exactly
    /// [`Bios::SIZE`] bytes — matching the PS1's fixed 512 KiB boot ROM.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let mut file =
            File::open(path).map_err(|_| EmulatorError::BiosNotFound(path.to_string()))?;

        let metadata = file.metadata()?;
        if metadata.len() != Self::SIZE as u64 {
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::SIZE,
                got: metadata.len() as usize,
            });
        }

        let mut data = vec![0u8; Self::SIZE];
        file.read_exact(&mut data)?;
        Ok(Self { data })
    }
}

impl Default for Bios {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Bios {
    fn read8(&self, offset: u32) -> u8 {
        self.data[offset as usize]
    }

    fn read16(&self, offset: u32) -> u16 {
        let o = offset as usize;
        u16::from_le_bytes([self.data[o], self.data[o + 1]])
    }

    fn read32(&self, offset: u32) -> u32 {
        let o = offset as usize;
        u32::from_le_bytes([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    fn write8(&mut self, offset: u32, value: u8) {
        log::trace!("BIOS: ignored write8 at offset 0x{:X} = 0x{:02X}", offset, value);
    }

    fn write16(&mut self, offset: u32, value: u16) {
        log::trace!("BIOS: ignored write16 at offset 0x{:X} = 0x{:04X}", offset, value);
    }

    fn write32(&mut self, offset: u32, value: u32) {
        log::trace!("BIOS: ignored write32 at offset 0x{:X} = 0x{:08X}", offset, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn zeroed_bios_reads_zero() {
        let bios = Bios::new();
        assert_eq!(bios.read32(0), 0);
        assert_eq!(bios.read8(Bios::SIZE as u32 - 1), 0);
    }

    #[test]
    fn load_rejects_wrong_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 100]).unwrap();
        let result = Bios::load_from_file(file.path().to_str().unwrap());
        assert!(matches!(result, Err(EmulatorError::InvalidBiosSize { .. })));
    }

    #[test]
    fn load_rejects_missing_file() {
        let result = Bios::load_from_file("/nonexistent/path/to/bios.bin");
        assert!(matches!(result, Err(EmulatorError::BiosNotFound(_))));
    }

    #[test]
    fn load_exact_size_succeeds_and_reads_little_endian() {
        let mut data = vec![0u8; Bios::SIZE];
        data[0] = 0xDD;
        data[1] = 0xCC;
        data[2] = 0xBB;
        data[3] = 0xAA;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let bios = Bios::load_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(bios.read32(0), 0xAABBCCDD);
        assert_eq!(bios.read8(0), 0xDD);
        assert_eq!(bios.read8(3), 0xAA);
    }
}
