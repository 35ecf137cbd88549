// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities.
//!
//! ```text
//! walk:  sorted_walk()                  ignore::Walk, sorted per directory
//!        parallel_walk_with_callback()  ignore::WalkParallel (multi-core)
//!        WalkOptions                    hidden, gitignore, links, threads
//! copy:  copy_file_into()               keep file name, create target dir
//!        ensure_dir()
//! ```

pub mod copy;
pub mod walk;
