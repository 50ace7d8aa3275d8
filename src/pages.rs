//! DOM binding, element builder, router and SSR props.
//!
//! Re-exports `seraph-pages`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seraph::pages::prelude::*;
//! use seraph::pages::router::{Router, Routes, RouterOutlet};
//!
//! let router = Router::browser()?;
//! let provider = router.provider(
//!     Routes::new()
//!         .route("/", |_| p().text("home").build())
//!         .route("/users/:id", |params| {
//!             p().text(format!("user {}", params.get("id").unwrap_or("?"))).build()
//!         }),
//! );
//!
//! let app = div()
//!     .child(router.link("/", "Home").render())
//!     .child(RouterOutlet::new(&provider).render())
//!     .build();
//! mount(&app, &document().body()?);
//! ```

pub use seraph_pages::*;
