//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (linear scan in registration order)
//!     → matcher.rs (evaluate exact method + path conditions)
//!     → Return: matched Route or None
//!
//! Route Table construction (at startup):
//!     register(method, path, handler) ...
//!     → Freeze behind Arc, shared by all requests
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - Exact equality only: no prefixes, wildcards or path parameters
//! - First match wins; duplicate registrations are unreachable, not rejected
//! - Explicit `None` rather than a silent default route

pub mod matcher;
pub mod router;

pub use matcher::{AndMatcher, Matcher, MethodMatcher, PathMatcher};
pub use router::{Handler, Route, RouteTable};
