//! Directory operations and integrity checks shared by every front end.
//!
//! Both the REST server and the interactive menu drive the same
//! [`Directory`], so validation, guard checks and error mapping happen in
//! exactly one place.
//!
//! - [`guard`]: read-only referential-integrity checks
//! - [`directory`]: the list/add/update/delete verbs

pub mod directory;
pub mod guard;

pub use directory::Directory;
pub use guard::{GuardDecision, IntegrityGuard};
