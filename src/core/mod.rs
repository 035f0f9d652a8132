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

//! Core emulation primitives
//!
//! Leaf modules first: [`address_map`] names the device windows,
//! [`device`] is the uniform access contract they all implement, and
//! [`bios`]/[`ram`]/[`memory_control`]/[`cache_control`]/[`dma`]/[`gpu`]
//! implement it. [`bus`] ties them together behind address canonicalization
//! and dispatch. [`gte`] is the coprocessor-2 instruction set, driven
//! directly rather than through the bus. [`disc`] and [`psx_executable`] are
//! on-demand loaders that feed [`ram`]/[`bus`] but aren't devices themselves.

pub mod address_map;
pub mod bios;
pub mod bus;
pub mod cache_control;
pub mod cdrom_stub;
pub mod device;
pub mod disc;
pub mod dma;
pub mod error;
pub mod gpu;
pub mod gte;
pub mod memory_control;
pub mod psx_executable;
pub mod ram;
