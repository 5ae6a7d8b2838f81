//! # Core Application Logic
//!
//! Everything that knows about text components and commands. Nothing in here
//! touches the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • text / serializer    │
//!                    │  • command builders     │
//!                    │  • App + update()       │
//!                    │                         │
//!                    │  Pure, except config    │
//!                    │  and history files.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴───────────┐
//!                   ▼                        ▼
//!            ┌────────────┐           ┌────────────┐
//!            │    CLI     │           │    TUI     │
//!            │  (clap)    │           │ (ratatui)  │
//!            └────────────┘           └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`text`]: `TextSegment` and its click/hover events
//! - [`serializer`]: segments → JSON text component string
//! - [`version`]: `VersionTier` and semantic version mapping
//! - [`legacy`]: `§`/`&` formatting codes
//! - [`selector`]: command targets
//! - [`command`]: tellraw / title / sign / book builders
//! - [`state`]: the `App` struct, the editor session
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: `~/.mccmd/config.toml`
//! - [`history`]: `~/.mccmd/history.json`

pub mod action;
pub mod command;
pub mod config;
pub mod history;
pub mod legacy;
pub mod selector;
pub mod serializer;
pub mod state;
pub mod text;
pub mod version;
