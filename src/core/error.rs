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

//! Error types shared across the core
//!
//! Only host I/O failures surface as `Err`. Unsupported device widths,
//! out-of-range register offsets, and out-of-range bus addresses are all
//! locally suppressed (value-encoded as 0 / no-op) and merely logged, per the
//! error handling design: the core never unwinds for a hardware quirk.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Errors that can escape the core's public API.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// The BIOS image could not be opened at all.
    #[error("BIOS file not found: {0}")]
    BiosNotFound(String),

    /// The BIOS image was opened but is not exactly 512 KiB.
    #[error("invalid BIOS size: expected {expected} bytes, got {got}")]
    InvalidBiosSize { expected: usize, got: usize },

    /// A disc image or executable file could not be read.
    #[error("loader error: {0}")]
    LoaderError(String),

    /// Wraps the underlying I/O failure from loading a host file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
