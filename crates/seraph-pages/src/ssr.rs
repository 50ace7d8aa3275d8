//! Server-rendered props and hydration
//!
//! A server renders a mount point with its initial props serialized into an
//! `sr-props` attribute:
//!
//! ```html
//! <div id="app" sr-props="{&quot;count&quot;:3}"></div>
//! ```
//!
//! On the client, [`load`] turns that attribute into a signal and [`hydrate`]
//! renders a component with it into the mount point.
//!
//! ## Example
//!
//! ```ignore
//! use seraph_pages::ssr::hydrate;
//!
//! #[derive(Clone, Deserialize)]
//! struct CounterProps { count: i32 }
//!
//! hydrate("app", |props: Signal<CounterProps>| counter(props))?;
//! ```

use thiserror::Error;

mod hydrate;
mod props;

pub use hydrate::{hydrate, hydrate_with};
pub use props::{PROPS_ATTRIBUTE, load, load_with, props_attribute, resource, resource_with};

/// Errors raised while loading server-rendered data.
#[derive(Debug, Error)]
pub enum SsrError {
	/// No element has the requested id.
	#[error("no element with id {0:?}")]
	ElementNotFound(String),
	/// The element's data is not valid JSON for the target type.
	#[error("invalid JSON in #{id}: {source}")]
	Json {
		/// Id of the element the data came from.
		id: String,
		/// The decoding error.
		#[source]
		source: serde_json::Error,
	},
	/// A custom parser rejected the element's data.
	#[error("cannot parse data of #{id}: {message}")]
	Parse {
		/// Id of the element the data came from.
		id: String,
		/// The parser's message.
		message: String,
	},
	/// Props could not be serialized.
	#[error("cannot serialize props: {0}")]
	Serialize(#[from] serde_json::Error),
}
