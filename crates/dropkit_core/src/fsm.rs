//! Event-driven state machines
//!
//! Widget states are plain `Copy` enums. Each state decides for itself which
//! events it reacts to, returning the next state or `None` when the event is
//! ignored. Events are `u32` constants grouped per widget in an `*_events`
//! module so hosts and controllers share one vocabulary.
//!
//! ```rust
//! use dropkit_core::StateTransitions;
//!
//! mod switch_events {
//!     pub const FLIP: u32 = 1;
//! }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Switch {
//!     Off,
//!     On,
//! }
//!
//! impl StateTransitions for Switch {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Switch::Off, switch_events::FLIP) => Some(Switch::On),
//!             (Switch::On, switch_events::FLIP) => Some(Switch::Off),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = Switch::Off;
//! assert!(state.apply(switch_events::FLIP));
//! assert_eq!(state, Switch::On);
//! ```

use std::hash::Hash;

/// Trait for enum states that transition on `u32` events
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place. Returns true if the state changed.
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                tracing::trace!(from = ?*self, to = ?next, event, "state transition");
                *self = next;
                true
            }
            _ => false,
        }
    }
}
