// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), inventory (inspect, crawl), bundle
//! ```

pub mod bundle;
pub mod config;
pub mod inventory;
