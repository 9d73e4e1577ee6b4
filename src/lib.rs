//! # spark-query
//!
//! Reactive URL query-string state for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: the current query collection lives in a signal,
//! bindings decode typed values out of it and write typed values back, and
//! effects anywhere in the program re-run when the collection changes.
//!
//! ## Architecture
//!
//! State flows through small, separately testable layers:
//!
//! ```text
//! read:  "?size=5&page=2" → QueryMap → store signal → read_param → decode → typed value
//! write: typed value → encode → write_param → store push → "?size=5&page=3"
//! ```
//!
//! A binding declares its parameter once (name, kind, default) and then
//! behaves like local state: reads are derived from the collection, writes
//! navigate with push semantics so the back button walks filter history,
//! and a missing parameter is seeded with its default exactly once so
//! shared links are self-describing.
//!
//! ## Modules
//!
//! - [`types`] - Parameter kinds, values, descriptors, error types
//! - [`collection`] - `QueryMap`, the ordered multi-map behind the `?`
//! - [`codec`] - Typed value ⇄ raw entries conversion
//! - [`adapter`] - Single-parameter read/write over a collection
//! - [`store`] - Shared reactive store with back/forward history
//! - [`sync`] - `ParamBinding` and the typed binding fronts
//! - [`debounce`] - Single-slot cancellable deferred writes
//! - [`pagination`] - Client-side page windows for `page`/`size` params
//!
//! ## Example
//!
//! ```ignore
//! use spark_query::{bind_array, bind_number, QueryMap, QueryStore};
//!
//! // The URL the page loaded with
//! let store = QueryStore::from_map(QueryMap::parse("?size=5&page=2"));
//!
//! let page = bind_number(&store, "page", 1.0);
//! let status = bind_array(&store, "status", vec![]);
//!
//! page.set(3.0);
//! status.set(vec!["SENT", "QUOTED"]);
//!
//! assert_eq!(
//!     store.peek().to_query_string(),
//!     "size=5&page=3&status=SENT&status=QUOTED"
//! );
//! store.back(); // status filter cleared, page=3 still set
//! ```

pub mod adapter;
pub mod codec;
pub mod collection;
pub mod debounce;
pub mod pagination;
pub mod store;
pub mod sync;
pub mod types;

// Re-export commonly used items
pub use types::{DecodeError, Descriptor, DescriptorError, ParamKind, ParamValue};

pub use collection::QueryMap;

pub use adapter::{read_param, write_param};

pub use store::{global_store, reset_global_store, HistoryMode, QueryStore};

pub use sync::{
    bind_array, bind_number, bind_param, bind_string, ArrayParam, NumberParam, ParamBinding,
    ParamSetter, StringParam,
};

pub use debounce::Debouncer;

pub use pagination::{paginate, Page};
