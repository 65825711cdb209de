//! Rule subsystem.
//!
//! # Data Flow
//! ```text
//! rule file (YAML)
//!     → record.rs (RestrictionRecord, strict deserialization)
//!     → restriction.rs (compile patterns and header specifiers)
//!     → table.rs (RuleTable keyed by endpoint path)
//!     → shared via Arc with both inspectors, never mutated
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once at startup, never in the request path
//! - A pattern that fails to compile never matches; it does not disable
//!   the rest of its list
//! - Paths are matched exactly; absent paths are unrestricted

pub mod header_spec;
pub mod pattern;
pub mod record;
pub mod restriction;
pub mod table;

pub use header_spec::HeaderSpec;
pub use pattern::Pattern;
pub use record::RestrictionRecord;
pub use restriction::Restriction;
pub use table::RuleTable;
