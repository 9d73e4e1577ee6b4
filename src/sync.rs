//! Synchronization Bindings - `[value, set value]` over the query string
//!
//! A [`ParamBinding`] ties one declared parameter to a [`QueryStore`]:
//! reading decodes the latest collection through the codec, writing encodes
//! and routes through the store's functional updater with push history
//! semantics. Binding is the mount point of the crate:
//!
//! - On creation, an effect observes the collection and seeds the declared
//!   default into the URL exactly once if the parameter is absent (and the
//!   default is non-empty), so shared links are self-describing.
//! - A direct write ([`ParamBinding::set`], [`ParamBinding::replace`], a
//!   `setter()` closure) cancels any pending debounced write, so a stale
//!   deferred value never lands after a newer one.
//! - On [`ParamBinding::unbind`] or drop, the effect is stopped and any
//!   pending debounced write is cancelled.
//!
//! [`bind_string`], [`bind_number`] and [`bind_array`] wrap the dynamic
//! binding with typed getters and setters for the common case.
//!
//! # Example
//!
//! ```ignore
//! use spark_query::{bind_number, QueryMap, QueryStore};
//!
//! let store = QueryStore::from_map(QueryMap::parse("size=5&page=2"));
//! let page = bind_number(&store, "page", 1.0);
//!
//! assert_eq!(page.get(), 2.0);
//! page.set(3.0); // store now holds size=5&page=3, back button returns to page=2
//! ```

use std::rc::Rc;
use std::time::Duration;

use spark_signals::{effect, flush_sync};

use crate::adapter;
use crate::codec;
use crate::debounce::Debouncer;
use crate::store::{HistoryMode, QueryStore};
use crate::types::{Descriptor, ParamValue};

/// Cloneable setter closure, for capture in callbacks.
pub type ParamSetter = Rc<dyn Fn(ParamValue)>;

// =============================================================================
// PARAM BINDING
// =============================================================================

/// Live binding between one declared parameter and a store.
///
/// Holds the seeding effect's stop handle and the optional debounced
/// writer; both are released on [`ParamBinding::unbind`] or drop.
pub struct ParamBinding {
    store: QueryStore,
    descriptor: Rc<Descriptor>,
    debouncer: Option<Debouncer>,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

/// Bind a declared parameter to a store.
///
/// Seeding runs before this returns: if the parameter is absent from the
/// collection and the declared default is non-empty, the default is written
/// through the ordinary push path. A parameter already present is never
/// overwritten, and an empty default never writes anything.
pub fn bind_param(store: &QueryStore, descriptor: Descriptor) -> ParamBinding {
    let descriptor = Rc::new(descriptor);

    let store_for_effect = store.clone();
    let descriptor_for_effect = descriptor.clone();
    let mut seeded = false;
    let stop_fn = effect(move || {
        // Tracked read keeps the binding subscribed for its lifetime
        let map = store_for_effect.current();
        if seeded {
            return;
        }
        seeded = true;

        let descriptor = &descriptor_for_effect;
        if map.contains(descriptor.name()) || descriptor.default().is_empty() {
            return;
        }

        let raws = codec::encode(descriptor.default());
        let name = descriptor.name().to_string();
        store_for_effect.apply(HistoryMode::Push, |latest| {
            // Re-check against the latest snapshot: an existing value is
            // never overwritten by a seed
            if latest.contains(&name) {
                latest.clone()
            } else {
                adapter::write_param(latest, &name, &raws)
            }
        });
    });
    // Make sure the seed has landed before the caller reads
    flush_sync();

    ParamBinding {
        store: store.clone(),
        descriptor,
        debouncer: None,
        stop_effect: Some(Box::new(stop_fn)),
    }
}

impl ParamBinding {
    /// Attach a debounced writer with the given delay.
    ///
    /// Afterwards [`ParamBinding::set_debounced`] defers writes; the host
    /// event loop drives them via the [`ParamBinding::debouncer`] handle.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Some(Debouncer::new(delay));
        self
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Decode the current value for this parameter.
    ///
    /// This is a derived read, recomputed from the collection on every call
    /// rather than cached. Inside an effect or derived it subscribes to the
    /// store, so the effect re-runs whenever the collection changes.
    pub fn get(&self) -> ParamValue {
        let map = self.store.current();
        let raws = adapter::read_param(&map, self.descriptor.name(), self.descriptor.kind());
        codec::decode(&raws, &self.descriptor)
    }

    // =========================================================================
    // Write
    // =========================================================================

    /// Encode and write the value, creating a new history entry.
    ///
    /// The write transforms the latest committed collection, never a stale
    /// snapshot, and fully replaces all prior entries under this name. Any
    /// pending debounced write on this binding is cancelled first.
    pub fn set(&self, value: impl Into<ParamValue>) {
        self.write_with(HistoryMode::Push, value.into());
    }

    /// Encode and write the value, overwriting the current history entry.
    pub fn replace(&self, value: impl Into<ParamValue>) {
        self.write_with(HistoryMode::Replace, value.into());
    }

    /// Defer the write until the debounce delay elapses.
    ///
    /// Each call replaces the previously pending write, so only the last
    /// value lands. Without an attached debouncer this writes immediately.
    pub fn set_debounced(&self, value: impl Into<ParamValue>) {
        let value = value.into();
        match &self.debouncer {
            Some(debouncer) => {
                let store = self.store.clone();
                let descriptor = self.descriptor.clone();
                debouncer.schedule(move || {
                    let raws = codec::encode(&value);
                    store.apply(HistoryMode::Push, |latest| {
                        adapter::write_param(latest, descriptor.name(), &raws)
                    });
                });
            }
            None => self.set(value),
        }
    }

    /// Cloneable push-mode setter for capture in callbacks.
    ///
    /// Carries the debouncer attached at creation time, so calls through the
    /// closure supersede pending debounced writes the same way [`set`] does.
    ///
    /// [`set`]: ParamBinding::set
    pub fn setter(&self) -> ParamSetter {
        let store = self.store.clone();
        let descriptor = self.descriptor.clone();
        let debouncer = self.debouncer.clone();
        Rc::new(move |value: ParamValue| {
            if let Some(debouncer) = &debouncer {
                debouncer.cancel();
            }
            let raws = codec::encode(&value);
            store.apply(HistoryMode::Push, |latest| {
                adapter::write_param(latest, descriptor.name(), &raws)
            });
        })
    }

    fn write_with(&self, mode: HistoryMode, value: ParamValue) {
        // A direct write supersedes any deferred one still waiting
        if let Some(debouncer) = &self.debouncer {
            debouncer.cancel();
        }
        let raws = codec::encode(&value);
        self.store.apply(mode, |latest| {
            adapter::write_param(latest, self.descriptor.name(), &raws)
        });
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The parameter declaration this binding was created with.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The query key this binding reads and writes.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Handle to the debounced writer, if one is attached.
    ///
    /// The host event loop polls this to flush due writes; see
    /// [`Debouncer::poll`].
    pub fn debouncer(&self) -> Option<Debouncer> {
        self.debouncer.clone()
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stop the seeding effect and cancel any pending debounced write.
    pub fn unbind(mut self) {
        if let Some(debouncer) = self.debouncer.take() {
            debouncer.cancel();
        }
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for ParamBinding {
    fn drop(&mut self) {
        if let Some(debouncer) = self.debouncer.take() {
            debouncer.cancel();
        }
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

// =============================================================================
// TYPED BINDINGS
// =============================================================================

/// String parameter with `String` getters and setters.
pub struct StringParam {
    inner: ParamBinding,
}

/// Number parameter with `f64` getters and setters.
pub struct NumberParam {
    inner: ParamBinding,
}

/// Array parameter with `Vec<String>` getters and setters.
pub struct ArrayParam {
    inner: ParamBinding,
}

/// Bind a string parameter. See [`bind_param`] for seeding rules.
pub fn bind_string(store: &QueryStore, name: &str, default: impl Into<String>) -> StringParam {
    StringParam {
        inner: bind_param(store, Descriptor::string(name, default)),
    }
}

/// Bind a number parameter. See [`bind_param`] for seeding rules.
pub fn bind_number(store: &QueryStore, name: &str, default: f64) -> NumberParam {
    NumberParam {
        inner: bind_param(store, Descriptor::number(name, default)),
    }
}

/// Bind an array parameter. See [`bind_param`] for seeding rules.
pub fn bind_array(store: &QueryStore, name: &str, default: Vec<String>) -> ArrayParam {
    ArrayParam {
        inner: bind_param(store, Descriptor::array(name, default)),
    }
}

impl StringParam {
    /// Attach a debounced writer. See [`ParamBinding::with_debounce`].
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.inner = self.inner.with_debounce(delay);
        self
    }

    /// Current value, or the default when absent. Tracked read.
    pub fn get(&self) -> String {
        self.inner.get().into_string().unwrap_or_default()
    }

    /// Write with push history semantics.
    pub fn set(&self, value: impl Into<String>) {
        self.inner.set(ParamValue::String(value.into()));
    }

    /// Write without creating a history entry.
    pub fn replace(&self, value: impl Into<String>) {
        self.inner.replace(ParamValue::String(value.into()));
    }

    /// Deferred write through the attached debouncer.
    pub fn set_debounced(&self, value: impl Into<String>) {
        self.inner.set_debounced(ParamValue::String(value.into()));
    }

    /// Cloneable typed setter.
    pub fn setter(&self) -> Rc<dyn Fn(String)> {
        let set = self.inner.setter();
        Rc::new(move |value: String| set(ParamValue::String(value)))
    }

    /// Handle to the debounced writer, if attached.
    pub fn debouncer(&self) -> Option<Debouncer> {
        self.inner.debouncer()
    }

    /// Stop the binding and cancel pending writes.
    pub fn unbind(self) {
        self.inner.unbind();
    }
}

impl NumberParam {
    /// Attach a debounced writer. See [`ParamBinding::with_debounce`].
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.inner = self.inner.with_debounce(delay);
        self
    }

    /// Current value, or the default when absent. Tracked read.
    pub fn get(&self) -> f64 {
        self.inner.get().as_number().unwrap_or_default()
    }

    /// Write with push history semantics.
    pub fn set(&self, value: f64) {
        self.inner.set(ParamValue::Number(value));
    }

    /// Write without creating a history entry.
    pub fn replace(&self, value: f64) {
        self.inner.replace(ParamValue::Number(value));
    }

    /// Deferred write through the attached debouncer.
    pub fn set_debounced(&self, value: f64) {
        self.inner.set_debounced(ParamValue::Number(value));
    }

    /// Cloneable typed setter.
    pub fn setter(&self) -> Rc<dyn Fn(f64)> {
        let set = self.inner.setter();
        Rc::new(move |value: f64| set(ParamValue::Number(value)))
    }

    /// Handle to the debounced writer, if attached.
    pub fn debouncer(&self) -> Option<Debouncer> {
        self.inner.debouncer()
    }

    /// Stop the binding and cancel pending writes.
    pub fn unbind(self) {
        self.inner.unbind();
    }
}

impl ArrayParam {
    /// Attach a debounced writer. See [`ParamBinding::with_debounce`].
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.inner = self.inner.with_debounce(delay);
        self
    }

    /// Current elements, or the default when absent. Tracked read.
    pub fn get(&self) -> Vec<String> {
        self.inner.get().into_array().unwrap_or_default()
    }

    /// Write with push history semantics.
    pub fn set<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.inner.set(ParamValue::Array(
            values.into_iter().map(Into::into).collect(),
        ));
    }

    /// Write without creating a history entry.
    pub fn replace<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.inner.replace(ParamValue::Array(
            values.into_iter().map(Into::into).collect(),
        ));
    }

    /// Deferred write through the attached debouncer.
    pub fn set_debounced<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.inner.set_debounced(ParamValue::Array(
            values.into_iter().map(Into::into).collect(),
        ));
    }

    /// Cloneable typed setter.
    pub fn setter(&self) -> Rc<dyn Fn(Vec<String>)> {
        let set = self.inner.setter();
        Rc::new(move |values: Vec<String>| set(ParamValue::Array(values)))
    }

    /// Handle to the debounced writer, if attached.
    pub fn debouncer(&self) -> Option<Debouncer> {
        self.inner.debouncer()
    }

    /// Stop the binding and cancel pending writes.
    pub fn unbind(self) {
        self.inner.unbind();
    }
}

// =============================================================================
// TESTS
// =============================================================================
