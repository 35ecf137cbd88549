// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  sorted_walk(), parallel_walk_with_callback(), WalkOptions
//!   copy:  copy_file_into(), ensure_dir()
//! ```

pub mod fs;
