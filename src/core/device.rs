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

//! The uniform device access contract
//!
//! Every memory-mapped peripheral the [`Bus`](crate::core::bus::Bus) dispatches
//! to implements [`Device`]. The address passed to each method is already the
//! physical offset inside the device's own range with the range base
//! subtracted off — devices never see a bus address, let alone a virtual one.
//!
//! Devices never fault: an unsupported width or an offset past the device's
//! own bookkeeping reads as 0 and drops writes silently (with a `log::warn!`
//! diagnostic left to the implementation), per the "unhandled access" design
//! used throughout this hardware generation.

/// Six-operation memory-mapped I/O contract.
///
/// Implementations own their state exclusively; they never reach across to
/// another device. The Bus is the only caller.
pub trait Device {
    fn read8(&self, offset: u32) -> u8;
    fn read16(&self, offset: u32) -> u16;
    fn read32(&self, offset: u32) -> u32;

    fn write8(&mut self, offset: u32, value: u8);
    fn write16(&mut self, offset: u32, value: u16);
    fn write32(&mut self, offset: u32, value: u32);
}
