//! # Seraph Pages
//!
//! Browser-facing half of Seraph: binds signals from `seraph-core` to DOM
//! elements and layers a small client-side router on top.
//!
//! ## Architecture
//!
//! - [`dom`]: element handles, mount points and the in-memory document used
//!   off the browser
//! - [`binding`]: [`Props`] and the facet binder that keeps class, style,
//!   children and attributes in sync with signals
//! - [`builder`]: element factories (`div()`, `button()`, ...) and
//!   [`create`](builder::html::create) for any tag
//! - [`component`]: the [`Component`] trait
//! - [`router`]: path matching, reactive history, links, redirects and the
//!   outlet
//! - [`ssr`]: loading server-rendered props and hydrating mount points
//! - [`spawn`]: deferred tasks
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::prelude::*;
//!
//! fn counter() -> Element {
//!     let count = Signal::new(0);
//!     let label = count.clone().map(|n| format!("Count: {n}"));
//!
//!     div()
//!         .class("counter")
//!         .child(p().text(label))
//!         .child(button().text("+1").on_click(move |_| count.update(|n| *n += 1)))
//!         .build()
//! }
//!
//! mount(&counter(), &document().body()?);
//! ```

#![warn(missing_docs)]

pub mod binding;
pub mod builder;
pub mod component;
pub mod dom;
pub mod router;
pub mod spawn;
pub mod ssr;

pub use binding::{Classes, Props, StyleMap, apply};
pub use builder::ElementBuilder;
pub use builder::html::{create, create_with, try_create};
pub use component::Component;
pub use dom::{
	AttrValue, Children, Document, DomError, Element, Event, Facet, Node, document, mount, render,
	unmount,
};
pub use router::{
	History, Link, Location, Params, Provider, Redirect, Route, Router, RouterError, RouterOutlet,
	Routes,
};
pub use seraph_core::{debug_log, error_log, info_log, warn_log};
pub use spawn::{spawn_deferred, spawn_transition};
pub use ssr::{SsrError, hydrate, load, resource};

/// Installs browser-side hooks.
///
/// With the `console_error_panic_hook` feature, Rust panics are printed to
/// the developer console with their message and location. Safe to call more
/// than once.
pub fn init() {
	#[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))]
	console_error_panic_hook::set_once();
}

/// Commonly used items in one import.
pub mod prelude {
	pub use crate::binding::{Classes, Props, StyleMap};
	pub use crate::builder::ElementBuilder;
	pub use crate::builder::html::*;
	pub use crate::component::Component;
	pub use crate::dom::{Element, Event, Node, document, mount, render, unmount};
	pub use crate::router::{Link, Redirect, Route, Router, RouterOutlet, Routes};
	pub use seraph_core::prelude::*;
}
