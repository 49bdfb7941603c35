//! # Wallgal
//!
//! A self-publishing wallpaper gallery. Point it at a directory of images and
//! it keeps a static `index.html` gallery page in sync with the directory's
//! contents, committing and pushing each change to a git remote.
//!
//! # Architecture: Watch-Triggered Pipeline
//!
//! ```text
//! watch session -> classify -> gallery (scan + render) -> artifact -> publish
//! ```
//!
//! Every qualifying creation event runs the whole pipeline end to end: the
//! directory is listed fresh, the full document is rebuilt, the artifact is
//! replaced atomically, and the result is staged, committed, and pushed.
//! There is no incremental state. The page is always a pure function of the
//! directory, which makes regeneration idempotent and trivially recoverable:
//! a failed run leaves nothing behind for the next run to trip over.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Extension allow-list deciding what counts as a gallery image |
//! | [`gallery`] | Directory scan + maud rendering of the full gallery document |
//! | [`artifact`] | Delete-then-atomic-replace of the output page |
//! | [`publish`] | git stage/commit/push behind the [`publish::Vcs`] trait |
//! | [`pipeline`] | Composition of the above; the unit of error recovery |
//! | [`watch`] | Filesystem observer session and serialized event dispatch |
//!
//! # Design Decisions
//!
//! ## Shelling Out to git
//!
//! Publishing drives the `git` CLI rather than a bound library. The tool
//! lives inside an already-configured working repository and only needs three
//! verbs judged by exit status; the user's existing credentials, hooks, and
//! remote config all apply unchanged. The executor hides behind
//! [`publish::Vcs`] so the failure-tolerance rules are tested against a mock.
//!
//! ## Asymmetric Failure Tolerance
//!
//! Staging and committing must succeed (local state has to be consistent
//! before any sync is attempted), with one carve-out: committing an unchanged
//! gallery is routine, so git's "nothing to commit" is logged and tolerated.
//! Pushing is best-effort. Network failures get a warning and the run still
//! counts as successful, because a later push will carry the commit out.
//!
//! ## Serialized Regeneration
//!
//! The notify callback only forwards events into a channel; one loop thread
//! does all filtering and pipeline work. Two regenerations can never race on
//! the output file, and a hung git invocation stalls a single run without
//! deadlocking the watcher.
//!
//! ## Maud Over Template Engines
//!
//! The page is rendered with compile-time maud templates: malformed HTML is a
//! build error, interpolation is auto-escaped, and there is no template file
//! to drift out of sync with the binary.

pub mod artifact;
pub mod classify;
pub mod gallery;
pub mod pipeline;
pub mod publish;
pub mod watch;
