//! Stable unique key generation for component instances.
//!
//! Keys double as DOM-style element ids for accessibility wiring, so they
//! only contain ASCII letters, digits, `-` and `_`.
//!
//! # Example
//!
//! ```
//! use dropkit_layout::InstanceKey;
//!
//! // Generated: unique per instance, stable for the instance's lifetime
//! let key = InstanceKey::new("dropdown");
//! assert!(key.get().starts_with("dropdown-"));
//! assert_eq!(key.get(), key.get());
//!
//! // Explicit key for deterministic ids
//! let key = InstanceKey::explicit("country");
//! assert_eq!(key.derive("listbox"), "country-listbox");
//! ```

use std::cell::OnceCell;
use uuid::Uuid;

/// Generates a stable unique key for component instances.
///
/// Key format: `{prefix}-{uuid}` where uuid is the simple (hyphenless) form.
/// The call site that created the key is kept for debugging.
///
/// The key is lazily generated on first access and cached for the key's lifetime.
pub struct InstanceKey {
    key: OnceCell<String>,
    prefix: &'static str,
    file: &'static str,
    line: u32,
    column: u32,
}

impl InstanceKey {
    /// Create from track_caller location with auto-generated UUID.
    #[track_caller]
    pub fn new(prefix: &'static str) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            key: OnceCell::new(),
            prefix,
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }

    /// Create with explicit user-provided key (for deterministic keys).
    pub fn explicit(key: impl Into<String>) -> Self {
        let instance = Self {
            key: OnceCell::new(),
            prefix: "",
            file: "",
            line: 0,
            column: 0,
        };
        let _ = instance.key.set(key.into());
        instance
    }

    /// Use `explicit` when provided, otherwise generate one with `prefix`.
    #[track_caller]
    pub fn explicit_or_new(explicit: Option<String>, prefix: &'static str) -> Self {
        match explicit {
            Some(key) => Self::explicit(key),
            None => Self::new(prefix),
        }
    }

    /// Get or generate the unique key.
    pub fn get(&self) -> &str {
        self.key
            .get_or_init(|| format!("{}-{}", self.prefix, Uuid::new_v4().as_simple()))
    }

    /// Create a derived key for sub-elements, e.g. `key.derive("listbox")`.
    pub fn derive(&self, suffix: &str) -> String {
        format!("{}-{}", self.get(), suffix)
    }

    /// Get the source location info for debugging.
    pub fn location(&self) -> (&'static str, u32, u32) {
        (self.file, self.line, self.column)
    }
}

impl std::fmt::Debug for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceKey({})", self.get())
    }
}

impl Clone for InstanceKey {
    fn clone(&self) -> Self {
        // Clones share the same key
        Self::explicit(self.get())
    }
}
