//! # Dropkit Component Controllers (dropkit_cn)
//!
//! Headless controllers for interactive components. A controller owns the
//! interaction state and the rules that change it; the host toolkit owns
//! rendering and forwards its input events.
//!
//! ## Example
//!
//! ```
//! use dropkit_cn::prelude::*;
//!
//! let mut languages = cn::dropdown()
//!     .multi_select(true)
//!     .option("rs", "Rust")
//!     .option("go", "Go")
//!     .option("zig", "Zig")
//!     .selected_values(["rs"])
//!     .on_multi_change(|values| println!("Now selected: {:?}", values))
//!     .build();
//!
//! languages.toggle_dropdown();
//! languages.select("zig");
//! assert_eq!(languages.selected_values(), vec!["rs", "zig"]);
//! assert!(languages.is_open());
//! ```
//!
//! ## Components
//!
//! - **Dropdown** - searchable single/multi select with keyboard navigation
//!   and floating list placement

pub mod components;
pub mod error;
pub mod settings;


pub use components::*;
pub use error::ConfigError;
pub use settings::DropdownSettings;

/// Convenience module for accessing components with `cn::` prefix
pub mod cn {
    pub use crate::components::dropdown::dropdown;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::dropdown::{
        DropdownBuilder, DropdownController, DropdownState, DropdownView,
    };
    pub use crate::components::select_option::DropdownOption;
    pub use crate::settings::DropdownSettings;
    // Re-export commonly needed primitives
    pub use dropkit_core::{KeyCode, Point, Rect};
    pub use dropkit_layout::{Placement, PlacementSide};
}
