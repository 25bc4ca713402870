// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod profile;
pub mod todo;

pub use profile::ProfileInfo;
pub use todo::TodoItem;
