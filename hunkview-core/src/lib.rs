//! Expansion state for a foldable git status tree.
//!
//! The tree has a fixed shape: sections contain files, files contain hunks, and
//! a flat set of commits sits beside them. This crate tracks which of those are
//! open and resolves which one a cursor line targets. It performs no I/O and
//! renders nothing.
//!
//! - [`state`]: the `State` value and its read-only queries
//! - [`command`]: the `Command` enum and its constructors
//! - [`reducer`]: `apply(&State, &Command) -> State`
//! - [`scope`]: cursor position → `Scope`
//! - [`level`]: the visibility level and what each level means per entity
//! - [`expansion`]: per-file and per-section records

pub mod command;
pub mod expansion;
pub mod level;
pub mod reducer;
pub mod scope;
pub mod state;

pub use command::{Command, LevelContext};
pub use expansion::{FileExpanded, FileExpansion, FileSnapshot, HunkFlags, SectionExpansion};
pub use level::VisibilityLevel;
pub use reducer::apply;
pub use scope::{file_key, find_parent_section, resolve, LineEntry, LineMap, Scope, SectionLine, SectionLines};
pub use state::State;
