//! Client-side routing
//!
//! - [`path`]: route path compilation and matching (`:param`, `*`, `**`)
//! - [`History`]: observable navigation history
//! - [`Router`]: `href` / `path` / `search` signals and navigation
//! - [`provider`]: route table to outlet signals
//! - [`Link`], [`Redirect`], [`RouterOutlet`]: navigation components
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::router::{Route, Router, RouterOutlet, Routes};
//! use seraph_pages::component::Component;
//!
//! let router = Router::browser()?;
//! let provider = router.provider(
//!     Routes::new()
//!         .route("/", |_| home())
//!         .add(Route::typed("/users/:id", |id: u64| user(id)))
//!         .not_found(not_found),
//! );
//!
//! let app = div()
//!     .child(nav().child(router.link("/", "Home").render()))
//!     .child(RouterOutlet::new(&provider).render())
//!     .build();
//! ```

mod components;
mod core;
mod error;
mod history;
mod params;
pub mod path;

pub use components::{Link, Redirect, RouterOutlet};
pub use self::core::{Provider, Route, Router, Routes, Selected, provider};
pub use error::{PathError, RouterError};
pub use history::{DEFAULT_URL, History, Location};
pub use params::{FromPath, Params, PathParams};
pub use path::{MatchResult, Path, PathComponent, compile, match_path};
