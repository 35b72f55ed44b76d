//! External page-index binding
//!
//! Owned cursor with an optional external mirror: the carousel physics
//! always owns the canonical page; the binding is a secondary sink
//! updated after every transition, never the source of truth during a
//! drag. The host may write it; writes are picked up on the carousel's
//! next frame (last-writer-wins, all writers share one event-loop turn).
//!
//! # Example
//!
//! ```rust
//! use glide_carousel::binding::PageBinding;
//!
//! let binding = PageBinding::with_initial(2);
//! binding.on_change(|page| println!("page is now {page}"));
//!
//! // Host-side navigation, applied on the carousel's next frame:
//! binding.set(4);
//! ```

use std::sync::{Arc, Mutex};

use smallvec::SmallVec;

type Observer = Box<dyn FnMut(usize) + Send>;

#[derive(Default)]
struct BindingInner {
    page: usize,
    pending: Option<usize>,
    observers: SmallVec<[Observer; 2]>,
}

/// Shared, observable mirror of the carousel's page index
#[derive(Clone, Default)]
pub struct PageBinding {
    inner: Arc<Mutex<BindingInner>>,
}

impl PageBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binding seeded with an initial page; the carousel adopts
    /// it when bound
    pub fn with_initial(page: usize) -> Self {
        let binding = Self::new();
        {
            let mut inner = binding.inner.lock().unwrap();
            inner.page = page;
            inner.pending = Some(page);
        }
        binding
    }

    /// Current mirrored page index
    pub fn get(&self) -> usize {
        self.inner.lock().unwrap().page
    }

    /// Host-side write; the carousel applies it (clamped) on its next frame
    pub fn set(&self, page: usize) {
        self.inner.lock().unwrap().pending = Some(page);
    }

    /// Register an observer invoked whenever the mirrored index changes
    pub fn on_change<F>(&self, observer: F)
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.inner
            .lock()
            .unwrap()
            .observers
            .push(Box::new(observer));
    }

    /// Update the mirror and notify observers if the value changed
    pub(crate) fn publish(&self, page: usize) {
        let mut inner = self.inner.lock().unwrap();
        if inner.page == page {
            return;
        }
        inner.page = page;

        // Observers run outside the lock so they may read the binding
        let mut observers = std::mem::take(&mut inner.observers);
        drop(inner);
        for observer in observers.iter_mut() {
            observer(page);
        }

        let mut inner = self.inner.lock().unwrap();
        // Observers registered during notification land behind the originals
        let added = std::mem::take(&mut inner.observers);
        observers.extend(added);
        inner.observers = observers;
    }

    /// Take a pending host write, if any
    pub(crate) fn take_pending(&self) -> Option<usize> {
        self.inner.lock().unwrap().pending.take()
    }
}
