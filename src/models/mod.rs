// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the connector.

pub mod record;
pub mod state;
pub mod stream;

pub use record::{Catalog, Message, Record};
pub use state::SyncState;
pub use stream::StreamDescriptor;
