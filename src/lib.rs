// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          inspect / crawl / bundle
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             inventory     world    bundle
//!          crawl/archive   JSON save  assemble
//!                 |           |        ^
//!                 +-----+-----+        |
//!                       v              |
//!                    resolve ----------+
//!                       |
//!                       v
//!                    version
//!               ranges, ordering
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod bundle;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod resolve;
pub mod utility;
pub mod version;
pub mod world;
