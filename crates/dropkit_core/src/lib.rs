//! Dropkit Core
//!
//! Rendering-agnostic primitives shared by the Dropkit crates:
//!
//! - **Key Events**: Platform key codes consumed by keyboard handlers
//! - **Geometry**: Points, sizes and rectangles in logical pixels
//! - **Clocks**: Injectable millisecond time sources (system and manual)
//! - **Timers**: A restartable trailing debouncer driven by the host's loop
//! - **State Machines**: Event-driven enum transitions for widget states
//!
//! # Example
//!
//! ```rust
//! use dropkit_core::{Clock, Debouncer, ManualClock};
//!
//! let clock = ManualClock::new(0);
//! let mut debounce = Debouncer::new(150);
//!
//! debounce.schedule("ca".to_string(), clock.now_ms());
//! clock.advance(100);
//! debounce.schedule("can".to_string(), clock.now_ms());
//! clock.advance(100);
//! assert_eq!(debounce.poll(clock.now_ms()), None);
//!
//! clock.advance(50);
//! assert_eq!(debounce.poll(clock.now_ms()), Some("can".to_string()));
//! ```

pub mod clock;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod timer;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use events::KeyCode;
pub use fsm::StateTransitions;
pub use geometry::{Point, Rect, Size};
pub use timer::Debouncer;
