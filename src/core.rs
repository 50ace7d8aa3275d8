//! Reactive core: signals, subscriptions and derivation combinators.
//!
//! Re-exports `seraph-core`. Nothing here touches the DOM, so it can be used
//! for plain state management on any target.
//!
//! # Examples
//!
//! ```rust,ignore
//! use seraph::core::reactive::{Signal, memo};
//!
//! let user = Signal::new(("ada".to_string(), 36));
//! let name = memo(user.clone(), |(name, _)| name.clone());
//! ```

pub use seraph_core::*;
