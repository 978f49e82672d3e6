//! Git integration for hunkview.
//!
//! A dedicated `std::thread` owns the `git2::Repository` for its lifetime
//! (Repository is !Send) and answers `StatusRequest`s with `StatusSnapshot`s.
pub mod types;
pub mod worker;
