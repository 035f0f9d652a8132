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

//! System bus: address canonicalization and device dispatch
//!
//! The CPU only ever sees virtual addresses; the Bus strips the KSEG0/KSEG1
//! segment markers down to a physical address before routing to a device.

use crate::core::address_map::{
    AddressRange, BIOS_RANGE, CACHE_CONTROL_RANGE, CDROM_RANGE, DMA_RANGE, GPU_RANGE,
    MEMORY_CONTROL_1_RANGE, MEMORY_CONTROL_2_RANGE, RAM_RANGE,
};
use crate::core::bios::Bios;
use crate::core::cache_control::CacheControl;
use crate::core::cdrom_stub::CdromStub;
use crate::core::device::Device;
use crate::core::dma::Dma;
use crate::core::gpu::GpuPort;
use crate::core::memory_control::{MemoryControl1, MemoryControl2};
use crate::core::ram::Ram;

/// Canonicalize a CPU virtual address to a physical bus address.
///
/// KUSEG (`0x00000000..0x80000000`) and KSEG2 (`0xC0000000..`) pass through
/// unchanged; KSEG0/KSEG1 (`0x80000000..0xC0000000`) mask off the top 3
/// address bits.
pub fn canonicalize(vaddr: u32) -> u32 {
    if vaddr >= 0x8000_0000 && vaddr < 0xC000_0000 {
        vaddr & 0x1FFF_FFFF
    } else {
        vaddr
    }
}

pub struct Bus {
    bios: Bios,
    ram: Ram,
    memory_control_1: MemoryControl1,
    memory_control_2: MemoryControl2,
    cache_control: CacheControl,
    dma: Dma,
    gpu: GpuPort,
    cdrom: CdromStub,
}

impl Bus {
    pub fn new(bios: Bios, ram: Ram) -> Self {
        Self {
            bios,
            ram,
            memory_control_1: MemoryControl1::new(),
            memory_control_2: MemoryControl2::new(),
            cache_control: CacheControl::new(),
            dma: Dma::new(),
            gpu: GpuPort::new(),
            cdrom: CdromStub::new(),
        }
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    pub fn gpu(&self) -> &GpuPort {
        &self.gpu
    }

    fn dispatch(&self, paddr: u32) -> Option<(&dyn Device, u32)> {
        self.ranges_and_devices()
            .into_iter()
            .find(|(range, _)| range.contains(paddr))
            .map(|(range, device)| (device, range.offset_of(paddr)))
    }

    fn dispatch_mut(&mut self, paddr: u32) -> Option<(&mut dyn Device, u32)> {
        let ranges = [
            (BIOS_RANGE, 0u8),
            (RAM_RANGE, 1),
            (MEMORY_CONTROL_1_RANGE, 2),
            (MEMORY_CONTROL_2_RANGE, 3),
            (CACHE_CONTROL_RANGE, 4),
            (DMA_RANGE, 5),
            (GPU_RANGE, 6),
            (CDROM_RANGE, 7),
        ];
        let (range, tag) = ranges.into_iter().find(|(range, _)| range.contains(paddr))?;
        let offset = range.offset_of(paddr);
        let device: &mut dyn Device = match tag {
            0 => &mut self.bios,
            1 => &mut self.ram,
            2 => &mut self.memory_control_1,
            3 => &mut self.memory_control_2,
            4 => &mut self.cache_control,
            5 => &mut self.dma,
            6 => &mut self.gpu,
            7 => &mut self.cdrom,
            _ => unreachable!("tag set matches the ranges array above"),
        };
        Some((device, offset))
    }

    fn ranges_and_devices(&self) -> [(AddressRange, &dyn Device); 8] {
        [
            (BIOS_RANGE, &self.bios as &dyn Device),
            (RAM_RANGE, &self.ram as &dyn Device),
            (MEMORY_CONTROL_1_RANGE, &self.memory_control_1 as &dyn Device),
            (MEMORY_CONTROL_2_RANGE, &self.memory_control_2 as &dyn Device),
            (CACHE_CONTROL_RANGE, &self.cache_control as &dyn Device),
            (DMA_RANGE, &self.dma as &dyn Device),
            (GPU_RANGE, &self.gpu as &dyn Device),
            (CDROM_RANGE, &self.cdrom as &dyn Device),
        ]
    }

    /// Load a byte. An address outside every declared range reads as 0.
    ///
    /// The core never faults on a bus access — out-of-range offsets are
    /// value-encoded as 0 with a `log::warn!` diagnostic, matching the
    /// "unhandled access" behavior of every device underneath.
    pub fn load8(&self, vaddr: u32) -> u8 {
        let paddr = canonicalize(vaddr);
        match self.dispatch(paddr) {
            Some((device, offset)) => device.read8(offset),
            None => {
                log::warn!("bus: read8 at unmapped address 0x{:08X}", paddr);
                0
            }
        }
    }

    pub fn load16(&self, vaddr: u32) -> u16 {
        let paddr = canonicalize(vaddr);
        match self.dispatch(paddr) {
            Some((device, offset)) => device.read16(offset),
            None => {
                log::warn!("bus: read16 at unmapped address 0x{:08X}", paddr);
                0
            }
        }
    }

    pub fn load32(&self, vaddr: u32) -> u32 {
        let paddr = canonicalize(vaddr);
        match self.dispatch(paddr) {
            Some((device, offset)) => device.read32(offset),
            None => {
                log::warn!("bus: read32 at unmapped address 0x{:08X}", paddr);
                0
            }
        }
    }

    /// Store a byte. An address outside every declared range drops the write.
    pub fn store8(&mut self, vaddr: u32, value: u8) {
        let paddr = canonicalize(vaddr);
        match self.dispatch_mut(paddr) {
            Some((device, offset)) => device.write8(offset, value),
            None => log::warn!("bus: write8 at unmapped address 0x{:08X}", paddr),
        }
    }

    pub fn store16(&mut self, vaddr: u32, value: u16) {
        let paddr = canonicalize(vaddr);
        match self.dispatch_mut(paddr) {
            Some((device, offset)) => device.write16(offset, value),
            None => log::warn!("bus: write16 at unmapped address 0x{:08X}", paddr),
        }
    }

    pub fn store32(&mut self, vaddr: u32, value: u32) {
        let paddr = canonicalize(vaddr);
        match self.dispatch_mut(paddr) {
            Some((device, offset)) => device.write32(offset, value),
            None => log::warn!("bus: write32 at unmapped address 0x{:08X}", paddr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bus() -> Bus {
        Bus::new(Bios::new(), Ram::new())
    }

    #[test]
    fn canonicalization_boundaries() {
        assert_eq!(canonicalize(0), 0);
        assert_eq!(canonicalize(0x7FFF_FFFF), 0x7FFF_FFFF);
        assert_eq!(canonicalize(0x8000_0000), 0);
        assert_eq!(canonicalize(0x9FFF_FFFF), 0x1FFF_FFFF);
        assert_eq!(canonicalize(0xA000_0000), 0);
        assert_eq!(canonicalize(0xBFFF_FFFF), 0x1FFF_FFFF);
        assert_eq!(canonicalize(0xC000_0000), 0xC000_0000);
        assert_eq!(canonicalize(0xFFFF_FFFF), 0xFFFF_FFFF);
    }

    #[test]
    fn ram_accessible_from_all_three_segments() {
        let mut bus = test_bus();
        bus.store32(0x0000_1000, 0xCAFEBABE);
        assert_eq!(bus.load32(0x0000_1000), 0xCAFEBABE);
        assert_eq!(bus.load32(0x8000_1000), 0xCAFEBABE);
        assert_eq!(bus.load32(0xA000_1000), 0xCAFEBABE);
    }

    #[test]
    fn cache_control_reachable_only_at_its_kseg2_address() {
        let mut bus = test_bus();
        bus.store32(0xFFFE_0130, 0x1234_5678);
        assert_eq!(bus.load32(0xFFFE_0130), 0x1234_5678);
    }

    #[test]
    fn out_of_range_read_yields_zero() {
        let bus = test_bus();
        assert_eq!(bus.load32(0x1F00_0000), 0);
    }

    #[test]
    fn out_of_range_write_is_dropped() {
        let mut bus = test_bus();
        bus.store32(0x1F00_0000, 0xFFFF_FFFF);
        assert_eq!(bus.load32(0x1F00_0000), 0);
    }

    #[test]
    fn dma_dpcr_reachable_through_bus() {
        let bus = test_bus();
        assert_eq!(bus.load32(0x1F80_10F0), 0x0765_4321);
    }

    proptest::proptest! {
        #[test]
        fn canonicalize_never_sets_bits_above_kseg1_window(vaddr: u32) {
            let paddr = canonicalize(vaddr);
            if vaddr >= 0x8000_0000 && vaddr < 0xC000_0000 {
                proptest::prop_assert_eq!(paddr, vaddr & 0x1FFF_FFFF);
            } else {
                proptest::prop_assert_eq!(paddr, vaddr);
            }
        }
    }
}
