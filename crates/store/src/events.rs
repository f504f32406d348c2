//! Change notifications.
//!
//! Store mutations emit events so header badges and account widgets can
//! re-render without polling storage. Hooks run synchronously on the
//! mutating call, after the write has been persisted.

/// A state change other surfaces may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The active session changed: login, logout, or a forced logout.
    AuthChanged,
    /// The active cart changed. Carries the new total item count across all
    /// lines, for badge rendering.
    CartUpdated { count: u32 },
}

/// Callback invoked after a state change.
pub type EventHook = Box<dyn Fn(&StoreEvent) + Send + Sync>;
