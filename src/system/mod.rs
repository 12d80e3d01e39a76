//! # System Interaction Layer
//!
//! This module is the boundary between the option-processing core and the
//! operating system. Everything platform-shaped lives here, so the core can
//! stay deterministic and snapshot-driven.
//!
//! ## Modules
//!
//! - **`engine`**: Locates the build engine (via `BZL_ENGINE` or as a
//!   sibling binary) and runs it to completion, forwarding its exit code.
//! - **`paths`**: Normalizes paths and `PATH`-style lists before they cross
//!   the client/engine boundary.
//! - **`terminal`**: Captures tty, width and Emacs facts once per
//!   invocation for the assembled client defaults.

pub mod engine;
pub mod paths;
pub mod terminal;
