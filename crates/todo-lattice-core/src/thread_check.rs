//! UI-thread affinity checks.
//!
//! The store is `Send + Sync` so listeners can hold it through an `Arc`, but
//! it is meant to be mutated only from the UI thread that created it.
//! [`ThreadAffinity`] records that thread and lets mutators verify they run
//! on it.
//!
//! Two levels of checking are provided:
//!
//! - [`ThreadAffinity::assert_same_thread`] is always active.
//! - [`ThreadAffinity::debug_assert_same_thread`] only runs in debug builds
//!   and only while checks are enabled (see [`set_thread_checks_enabled`]).
//!
//! # Example
//!
//! ```
//! use todo_lattice_core::thread_check::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_same_thread());
//! affinity.assert_same_thread();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

/// Flag to enable/disable debug thread checks globally.
static THREAD_CHECKS_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Enable or disable debug thread checks.
///
/// Enabled by default in debug builds. Has no effect on
/// [`ThreadAffinity::assert_same_thread`], which always checks.
pub fn set_thread_checks_enabled(enabled: bool) {
    THREAD_CHECKS_ENABLED.store(enabled, Ordering::SeqCst);
    crate::todo_debug!(enabled, "thread checks toggled");
}

/// Whether debug thread checks are currently enabled.
#[inline]
pub fn are_thread_checks_enabled() -> bool {
    THREAD_CHECKS_ENABLED.load(Ordering::Relaxed)
}

/// Records the thread an object belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The bound thread.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Whether the current thread is the bound thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panic unless called from the bound thread.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("store accessed from a thread other than its UI thread")
    }

    /// Panic with `msg` unless called from the bound thread.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only, flag-gated variant of [`assert_same_thread`](Self::assert_same_thread).
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        if cfg!(debug_assertions) && are_thread_checks_enabled() {
            self.assert_same_thread();
        }
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");

        panic!(
            "thread affinity violation: {msg} (bound to {:?}, called from \"{current_name}\" {:?})",
            self.thread_id,
            current.id()
        )
    }
}
