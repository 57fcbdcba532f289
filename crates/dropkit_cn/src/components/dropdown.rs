//! Dropdown controller - searchable single/multi select without rendering
//!
//! The controller owns the interaction state of a dropdown: whether it is
//! open, the search terms, which options survive the filter, which one is
//! highlighted, what is selected and where the floating list goes. The host
//! owns everything visual. It forwards input to the controller and renders
//! from [`DropdownController::view`].
//!
//! # Example
//!
//! ```
//! use dropkit_cn::prelude::*;
//!
//! let mut dropdown = cn::dropdown()
//!     .id("country")
//!     .option("us", "United States")
//!     .option("de", "Germany")
//!     .value("de")
//!     .on_change(|value| println!("Selected: {:?}", value))
//!     .build();
//!
//! assert!(dropdown.handle_trigger_key(KeyCode::DOWN));
//! assert!(dropdown.is_open());
//! assert_eq!(dropdown.highlighted_index(), Some(1));
//! assert_eq!(dropdown.active_descendant_id().as_deref(), Some("country-option-1"));
//!
//! dropdown.handle_list_key(KeyCode::DOWN);
//! dropdown.handle_list_key(KeyCode::ENTER);
//! assert!(!dropdown.is_open());
//! assert_eq!(dropdown.value(), Some("us"));
//! ```
//!
//! # Host wiring
//!
//! | Host event                         | Controller call                      |
//! |------------------------------------|--------------------------------------|
//! | trigger clicked                    | [`toggle_dropdown`]                  |
//! | key down on trigger                | [`handle_trigger_key`]               |
//! | key down in search input / list    | [`handle_list_key`]                  |
//! | search input changed               | [`set_search_term`]                  |
//! | pointer down anywhere              | [`handle_pointer_down`]              |
//! | window resize / scroll (capture)   | [`handle_viewport_change`]           |
//! | every frame / event loop turn      | [`tick`]                             |
//!
//! [`toggle_dropdown`]: DropdownController::toggle_dropdown
//! [`handle_trigger_key`]: DropdownController::handle_trigger_key
//! [`handle_list_key`]: DropdownController::handle_list_key
//! [`set_search_term`]: DropdownController::set_search_term
//! [`handle_pointer_down`]: DropdownController::handle_pointer_down
//! [`handle_viewport_change`]: DropdownController::handle_viewport_change
//! [`tick`]: DropdownController::tick

use std::sync::Arc;

use dropkit_core::{KeyCode, Point, Rect, SharedClock, StateTransitions, SystemClock};
use dropkit_layout::{is_outside, place, InstanceKey, Placement, PlacementSide};
use indexmap::IndexSet;

use super::search::SearchFilter;
use super::select_option::DropdownOption;
use crate::settings::DropdownSettings;

// =============================================================================
// Dropdown Event Types
// =============================================================================

/// Event types for the dropdown state machine
pub mod dropdown_events {
    /// Open explicitly (Closed -> Open)
    pub const OPEN: u32 = 30001;
    /// Close explicitly (Open -> Closed)
    pub const CLOSE: u32 = 30002;
    /// Trigger toggled
    pub const TOGGLE: u32 = 30003;
    /// Escape key pressed
    pub const ESCAPE: u32 = 30004;
    /// Pointer went down outside the trigger and the list
    pub const OUTSIDE_CLICK: u32 = 30005;
    /// A single-select choice or a clear was committed
    pub const COMMIT: u32 = 30006;
}

// =============================================================================
// DropdownState
// =============================================================================

/// Open/closed state of a dropdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    pub fn is_open(&self) -> bool {
        matches!(self, DropdownState::Open)
    }
}

impl StateTransitions for DropdownState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use dropdown_events::*;
        use DropdownState::*;

        match (self, event) {
            (Closed, OPEN) | (Closed, TOGGLE) => Some(Open),
            (Open, CLOSE) | (Open, TOGGLE) | (Open, ESCAPE) | (Open, OUTSIDE_CLICK)
            | (Open, COMMIT) => Some(Closed),
            _ => None,
        }
    }
}

// =============================================================================
// Callbacks
// =============================================================================

/// Single-select callback. `None` means the selection was cleared.
pub type ChangeFn = Arc<dyn Fn(Option<&str>) + Send + Sync>;
/// Explicit clear callback
pub type ClearFn = Arc<dyn Fn() + Send + Sync>;
/// Multi-select callback receiving the full new selection in order
pub type MultiChangeFn = Arc<dyn Fn(&[String]) + Send + Sync>;

// =============================================================================
// DropdownView
// =============================================================================

/// Everything a host needs to render one frame of a dropdown
#[derive(Clone, Debug)]
pub struct DropdownView<'a> {
    pub is_open: bool,
    pub search_term: &'a str,
    pub filtered_options: Vec<&'a DropdownOption>,
    pub highlighted_index: Option<usize>,
    pub selected_option: Option<&'a DropdownOption>,
    pub selected_options: Vec<&'a DropdownOption>,
    pub position: Option<Placement>,
    pub listbox_id: &'a str,
    pub active_descendant_id: Option<String>,
    pub disabled: bool,
    pub allow_clear: bool,
    pub allow_search: bool,
    pub multi_select: bool,
}

// =============================================================================
// DropdownController
// =============================================================================

/// Interaction state for one dropdown instance
pub struct DropdownController {
    key: InstanceKey,
    listbox_id: String,
    settings: DropdownSettings,
    clock: SharedClock,

    options: Vec<DropdownOption>,
    value: Option<String>,
    values: IndexSet<String>,

    disabled: bool,
    allow_clear: bool,
    allow_search: bool,
    multi_select: bool,

    state: DropdownState,
    search: SearchFilter,
    /// Indices into `options` that pass the applied search term
    filtered: Vec<usize>,
    /// Index into `filtered`
    highlighted: Option<usize>,

    anchor: Option<Rect>,
    viewport: Option<Rect>,
    position: Option<Placement>,

    on_change: Option<ChangeFn>,
    on_clear: Option<ClearFn>,
    on_multi_change: Option<MultiChangeFn>,
}

impl std::fmt::Debug for DropdownController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownController")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("options", &self.options.len())
            .field("filtered", &self.filtered.len())
            .field("highlighted", &self.highlighted)
            .field("value", &self.value)
            .field("values", &self.values)
            .field("search", &self.search.raw())
            .finish()
    }
}

impl DropdownController {
    fn from_config(key: InstanceKey, config: DropdownConfig) -> Self {
        let listbox_id = key.derive("listbox");
        let search = SearchFilter::new(config.settings.debounce_ms);
        let mut controller = Self {
            key,
            listbox_id,
            settings: config.settings,
            clock: config.clock.unwrap_or_else(SystemClock::shared),
            options: config.options,
            value: config.value,
            values: config.values,
            disabled: config.disabled,
            allow_clear: config.allow_clear,
            allow_search: config.allow_search,
            multi_select: config.multi_select,
            state: DropdownState::Closed,
            search,
            filtered: Vec::new(),
            highlighted: None,
            anchor: None,
            viewport: None,
            position: None,
            on_change: config.on_change,
            on_clear: config.on_clear,
            on_multi_change: config.on_multi_change,
        };
        controller.refilter();
        controller
    }

    // ── State ────────────────────────────────────────────────────────────

    pub fn state(&self) -> DropdownState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// The instance id (caller-supplied or generated)
    pub fn id(&self) -> &str {
        self.key.get()
    }

    /// Open the list. No-op when disabled or already open.
    pub fn open(&mut self) -> bool {
        if self.disabled {
            tracing::trace!(id = self.key.get(), "open ignored: disabled");
            return false;
        }
        self.transition(dropdown_events::OPEN)
    }

    /// Close the list. No-op when already closed.
    pub fn close(&mut self) -> bool {
        self.transition(dropdown_events::CLOSE)
    }

    /// Flip between open and closed. No-op when disabled.
    pub fn toggle_dropdown(&mut self) -> bool {
        if self.disabled {
            tracing::trace!(id = self.key.get(), "toggle ignored: disabled");
            return false;
        }
        self.transition(dropdown_events::TOGGLE)
    }

    /// Enable or disable the dropdown. Disabling an open dropdown closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    fn transition(&mut self, event: u32) -> bool {
        let was_open = self.state.is_open();
        if !self.state.apply(event) {
            return false;
        }
        match (was_open, self.state.is_open()) {
            (false, true) => self.on_enter_open(),
            (true, false) => self.on_exit_open(),
            _ => {}
        }
        true
    }

    fn on_enter_open(&mut self) {
        if self.search.reset() {
            self.refilter();
        }
        self.highlighted = self.initial_highlight();
        self.recompute_position();
        tracing::debug!(
            id = self.key.get(),
            highlighted = ?self.highlighted,
            options = self.filtered.len(),
            "dropdown opened"
        );
    }

    fn on_exit_open(&mut self) {
        if self.search.reset() {
            self.refilter();
        }
        self.highlighted = None;
        self.position = None;
        tracing::debug!(id = self.key.get(), "dropdown closed");
    }

    // ── Options ──────────────────────────────────────────────────────────

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    /// Replace the option list. Counts as a filter change.
    pub fn set_options(&mut self, options: Vec<DropdownOption>) {
        self.options = options;
        self.refilter();
        self.reset_highlight_after_filter();
    }

    // ── Search ───────────────────────────────────────────────────────────

    /// The search term as typed
    pub fn search_term(&self) -> &str {
        self.search.raw()
    }

    /// The search term the filter currently applies
    pub fn debounced_search_term(&self) -> &str {
        self.search.applied()
    }

    /// Record a keystroke in the search input.
    ///
    /// The raw term updates immediately; filtering follows once typing pauses
    /// for the debounce window and the host calls [`tick`](Self::tick).
    /// Ignored when search is not allowed.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if !self.allow_search {
            return;
        }
        let now = self.clock.now_ms();
        self.search.set_raw(term, now);
    }

    /// Whether a search update is waiting for its debounce window
    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// Advance timers. Returns true when the filtered list changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self.search.tick(now) {
            return false;
        }
        self.refilter();
        self.reset_highlight_after_filter();
        true
    }

    fn refilter(&mut self) {
        self.filtered = self.search.filter(&self.options);
    }

    fn reset_highlight_after_filter(&mut self) {
        if self.is_open() {
            self.highlighted = self.initial_highlight();
        }
    }

    /// Options passing the current filter, in list order
    pub fn filtered_options(&self) -> Vec<&DropdownOption> {
        self.filtered.iter().map(|&i| &self.options[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    // ── Highlight ────────────────────────────────────────────────────────

    /// Index into [`filtered_options`](Self::filtered_options), if any
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// Set the highlight (e.g. on pointer hover). Out-of-range clears it.
    pub fn set_highlighted_index(&mut self, index: Option<usize>) {
        self.highlighted = index.filter(|&i| i < self.filtered.len());
    }

    pub fn highlighted_option(&self) -> Option<&DropdownOption> {
        self.highlighted
            .and_then(|i| self.filtered.get(i))
            .map(|&i| &self.options[i])
    }

    /// Position of the first selected option in the filtered list, else 0,
    /// else nothing when the list is empty
    fn initial_highlight(&self) -> Option<usize> {
        if self.filtered.is_empty() {
            return None;
        }
        let selected = self
            .filtered
            .iter()
            .position(|&i| self.is_selected(&self.options[i].value));
        Some(selected.unwrap_or(0))
    }

    fn move_highlight(&mut self, forward: bool) {
        let n = self.filtered.len();
        if n == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
            (None, true) => 0,
            (None, false) => n - 1,
        });
        tracing::trace!(highlighted = ?self.highlighted, "highlight moved");
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Current single-select value
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Sync the single-select value from the host
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Current multi-select values in selection order
    pub fn selected_values(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }

    /// Sync the multi-select values from the host
    pub fn set_selected_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
    }

    /// Whether `value` is currently selected in the active mode
    pub fn is_selected(&self, value: &str) -> bool {
        if self.multi_select {
            self.values.contains(value)
        } else {
            self.value.as_deref() == Some(value)
        }
    }

    /// The option matching the single-select value, if any
    pub fn selected_option(&self) -> Option<&DropdownOption> {
        let value = self.value.as_deref()?;
        self.options.iter().find(|opt| opt.value == value)
    }

    /// Options matching the multi-select values, in selection order.
    /// Values without a matching option are skipped.
    pub fn selected_options(&self) -> Vec<&DropdownOption> {
        self.values
            .iter()
            .filter_map(|v| self.options.iter().find(|opt| &opt.value == v))
            .collect()
    }

    /// Select the option with the given value.
    ///
    /// Single-select reports the value and closes. Multi-select toggles the
    /// value in the selection, reports the new selection and stays open.
    /// Unknown and disabled options are ignored.
    pub fn select(&mut self, value: &str) -> bool {
        let Some(option) = self.options.iter().find(|opt| opt.value == value) else {
            tracing::debug!(id = self.key.get(), value, "select ignored: unknown option");
            return false;
        };
        if option.disabled {
            tracing::trace!(value, "select ignored: option disabled");
            return false;
        }
        let value = option.value.clone();

        if self.multi_select {
            if !self.values.shift_remove(&value) {
                self.values.insert(value);
            }
            let selection = self.selected_values();
            tracing::debug!(id = self.key.get(), ?selection, "multi selection changed");
            if let Some(ref cb) = self.on_multi_change {
                cb(&selection);
            }
        } else {
            tracing::debug!(id = self.key.get(), value = %value, "option selected");
            self.value = Some(value);
            if let Some(ref cb) = self.on_change {
                cb(self.value.as_deref());
            }
            self.transition(dropdown_events::COMMIT);
        }
        true
    }

    /// Select the option at `index` in the filtered list
    pub fn select_filtered(&mut self, index: usize) -> bool {
        match self.filtered.get(index) {
            Some(&i) => {
                let value = self.options[i].value.clone();
                self.select(&value)
            }
            None => false,
        }
    }

    /// Clear the selection and close.
    ///
    /// Multi-select empties the selection. Single-select only clears when
    /// `allow_clear` is set, preferring the explicit clear callback and
    /// otherwise reporting `None` through the change callback.
    pub fn clear(&mut self) {
        if self.multi_select {
            self.values.clear();
            tracing::debug!(id = self.key.get(), "multi selection cleared");
            if let Some(ref cb) = self.on_multi_change {
                cb(&[]);
            }
        } else if self.allow_clear {
            self.value = None;
            tracing::debug!(id = self.key.get(), "selection cleared");
            if let Some(ref cb) = self.on_clear {
                cb();
            } else if let Some(ref cb) = self.on_change {
                cb(None);
            }
        }
        self.transition(dropdown_events::COMMIT);
    }

    // ── Keyboard ─────────────────────────────────────────────────────────

    /// Key down on the trigger element. Returns true when the key was used.
    pub fn handle_trigger_key(&mut self, key: KeyCode) -> bool {
        if self.disabled {
            return false;
        }
        tracing::trace!(?key, open = self.is_open(), "trigger key");
        match key {
            KeyCode::DOWN | KeyCode::UP => {
                if self.is_open() {
                    self.move_highlight(key == KeyCode::DOWN);
                } else {
                    self.open();
                }
                true
            }
            KeyCode::ENTER | KeyCode::SPACE => {
                self.toggle_dropdown();
                true
            }
            KeyCode::ESCAPE => self.transition(dropdown_events::ESCAPE),
            _ => false,
        }
    }

    /// Key down inside the open list or its search input. Returns true when
    /// the key was used.
    pub fn handle_list_key(&mut self, key: KeyCode) -> bool {
        if self.disabled || !self.is_open() {
            return false;
        }
        tracing::trace!(?key, "list key");
        match key {
            KeyCode::DOWN | KeyCode::UP => {
                self.move_highlight(key == KeyCode::DOWN);
                true
            }
            KeyCode::ENTER => match self.highlighted {
                Some(i) => self.select_filtered(i),
                None => false,
            },
            KeyCode::ESCAPE => self.transition(dropdown_events::ESCAPE),
            _ => false,
        }
    }

    // ── Pointer & positioning ────────────────────────────────────────────

    /// Pointer went down at `point`. Closes the list when the point is
    /// outside both the trigger and the list.
    ///
    /// `list_bounds` is the rendered list's rectangle; when the host does not
    /// know it, the computed placement is used instead.
    pub fn handle_pointer_down(&mut self, point: Point, list_bounds: Option<Rect>) -> bool {
        if !self.is_open() {
            return false;
        }
        let list = list_bounds.or_else(|| {
            self.position
                .map(|p| Rect::new(p.left, p.top, p.width, p.max_height))
        });
        let regions: Vec<Rect> = self.anchor.into_iter().chain(list).collect();
        if is_outside(point, &regions) {
            self.transition(dropdown_events::OUTSIDE_CLICK)
        } else {
            false
        }
    }

    /// Record the trigger's bounds. Used by the next placement pass.
    pub fn set_anchor_bounds(&mut self, anchor: Rect) {
        self.anchor = Some(anchor);
    }

    /// Record the visible viewport. Used by the next placement pass.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    /// Resize or scroll happened: store fresh bounds and, while open,
    /// recompute the list position
    pub fn handle_viewport_change(&mut self, anchor: Rect, viewport: Rect) {
        self.anchor = Some(anchor);
        self.viewport = Some(viewport);
        if self.is_open() {
            self.recompute_position();
        }
    }

    /// Where the floating list goes while open
    pub fn position(&self) -> Option<Placement> {
        self.position
    }

    fn recompute_position(&mut self) {
        let Some(anchor) = self.anchor else {
            self.position = None;
            return;
        };
        let rows = self.filtered.len().max(1) + usize::from(self.allow_search);
        let content_height = rows as f32 * self.settings.item_height;
        let options = &self.settings.placement;

        self.position = Some(match self.viewport {
            Some(viewport) => place(anchor, viewport, content_height, options),
            None => Placement {
                top: anchor.bottom() + options.offset,
                left: anchor.x,
                width: anchor.width.max(options.min_width),
                max_height: content_height.min(options.max_height),
                side: PlacementSide::Below,
            },
        });
    }

    // ── Accessibility ────────────────────────────────────────────────────

    /// Id for the list element (`aria-controls` on the trigger)
    pub fn listbox_id(&self) -> &str {
        &self.listbox_id
    }

    /// Id of the highlighted option (`aria-activedescendant`)
    pub fn active_descendant_id(&self) -> Option<String> {
        self.highlighted
            .map(|i| self.key.derive(&format!("option-{}", i)))
    }

    /// Id for the option at `index` in the filtered list
    pub fn option_id(&self, index: usize) -> String {
        self.key.derive(&format!("option-{}", index))
    }

    // ── Render snapshot ──────────────────────────────────────────────────

    pub fn view(&self) -> DropdownView<'_> {
        DropdownView {
            is_open: self.is_open(),
            search_term: self.search.raw(),
            filtered_options: self.filtered_options(),
            highlighted_index: self.highlighted,
            selected_option: self.selected_option(),
            selected_options: self.selected_options(),
            position: self.position,
            listbox_id: &self.listbox_id,
            active_descendant_id: self.active_descendant_id(),
            disabled: self.disabled,
            allow_clear: self.allow_clear,
            allow_search: self.allow_search,
            multi_select: self.multi_select,
        }
    }
}

impl Drop for DropdownController {
    fn drop(&mut self) {
        if self.search.is_pending() {
            tracing::trace!(id = self.key.get(), "dropping pending search update");
        }
        self.search.reset();
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Internal configuration for building a DropdownController
#[derive(Clone)]
struct DropdownConfig {
    id: Option<String>,
    options: Vec<DropdownOption>,
    value: Option<String>,
    values: IndexSet<String>,
    disabled: bool,
    allow_clear: bool,
    allow_search: bool,
    multi_select: bool,
    settings: DropdownSettings,
    clock: Option<SharedClock>,
    on_change: Option<ChangeFn>,
    on_clear: Option<ClearFn>,
    on_multi_change: Option<MultiChangeFn>,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            id: None,
            options: Vec::new(),
            value: None,
            values: IndexSet::new(),
            disabled: false,
            allow_clear: false,
            allow_search: true,
            multi_select: false,
            settings: DropdownSettings::default(),
            clock: None,
            on_change: None,
            on_clear: None,
            on_multi_change: None,
        }
    }
}

/// Builder for creating DropdownController instances with a fluent API
pub struct DropdownBuilder {
    config: DropdownConfig,
}

impl Default for DropdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DropdownBuilder {
    pub fn new() -> Self {
        Self {
            config: DropdownConfig::default(),
        }
    }

    /// Use an explicit id instead of a generated one
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.config.id = Some(id.into());
        self
    }

    /// Add an option with value and label
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.config.options.push(DropdownOption::new(value, label));
        self
    }

    /// Add multiple options
    pub fn options(mut self, options: impl IntoIterator<Item = DropdownOption>) -> Self {
        self.config.options.extend(options);
        self
    }

    /// Initial single-select value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.config.value = Some(value.into());
        self
    }

    /// Initial multi-select values
    pub fn selected_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn allow_clear(mut self, allow: bool) -> Self {
        self.config.allow_clear = allow;
        self
    }

    pub fn allow_search(mut self, allow: bool) -> Self {
        self.config.allow_search = allow;
        self
    }

    pub fn multi_select(mut self, multi: bool) -> Self {
        self.config.multi_select = multi;
        self
    }

    pub fn settings(mut self, settings: DropdownSettings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Time source for the search debounce (system clock by default)
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.config.clock = Some(clock);
        self
    }

    /// Single-select callback. Receives `None` when cleared without an
    /// explicit clear callback.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.config.on_change = Some(Arc::new(callback));
        self
    }

    pub fn on_clear<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.config.on_clear = Some(Arc::new(callback));
        self
    }

    pub fn on_multi_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.config.on_multi_change = Some(Arc::new(callback));
        self
    }

    /// Build the controller.
    ///
    /// Without an explicit id, a unique one is generated from the call site.
    #[track_caller]
    pub fn build(self) -> DropdownController {
        let key = InstanceKey::explicit_or_new(self.config.id.clone(), "dropdown");
        DropdownController::from_config(key, self.config)
    }
}

/// Create a dropdown controller builder
///
/// ```
/// use dropkit_cn::cn;
///
/// let dropdown = cn::dropdown()
///     .option("sm", "Small")
///     .option("lg", "Large")
///     .allow_clear(true)
///     .build();
/// assert!(dropdown.listbox_id().ends_with("-listbox"));
/// ```
pub fn dropdown() -> DropdownBuilder {
    DropdownBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropkit_core::ManualClock;
    use std::sync::Mutex;

    fn fruit() -> Vec<DropdownOption> {
        vec![
            DropdownOption::new("apple", "Apple"),
            DropdownOption::new("banana", "Banana"),
            DropdownOption::new("cherry", "Cherry"),
            DropdownOption::new("date", "Date"),
        ]
    }

    #[test]
    fn test_state_transitions() {
        use dropdown_events::*;
        assert_eq!(DropdownState::Closed.on_event(OPEN), Some(DropdownState::Open));
        assert_eq!(DropdownState::Closed.on_event(TOGGLE), Some(DropdownState::Open));
        assert_eq!(DropdownState::Closed.on_event(ESCAPE), None);
        assert_eq!(DropdownState::Closed.on_event(COMMIT), None);
        assert_eq!(DropdownState::Open.on_event(OPEN), None);
        for event in [CLOSE, TOGGLE, ESCAPE, OUTSIDE_CLICK, COMMIT] {
            assert_eq!(DropdownState::Open.on_event(event), Some(DropdownState::Closed));
        }
    }

    #[test]
    fn test_open_highlights_first_without_selection() {
        let mut d = dropdown().options(fruit()).build();
        assert!(d.open());
        assert_eq!(d.highlighted_index(), Some(0));
        // Opening twice is a no-op
        assert!(!d.open());
    }

    #[test]
    fn test_open_empty_list_has_no_highlight() {
        let mut d = dropdown().build();
        d.open();
        assert!(d.is_open());
        assert_eq!(d.highlighted_index(), None);
        assert_eq!(d.active_descendant_id(), None);
        // Navigation on an empty list is a no-op
        assert!(d.handle_list_key(KeyCode::DOWN));
        assert_eq!(d.highlighted_index(), None);
        assert!(!d.handle_list_key(KeyCode::ENTER));
        assert!(d.is_open());
    }

    #[test]
    fn test_stale_value_highlights_first() {
        let mut d = dropdown().options(fruit()).value("kiwi").build();
        d.open();
        assert_eq!(d.highlighted_index(), Some(0));
        assert!(d.selected_option().is_none());
    }

    #[test]
    fn test_close_resets_search_and_highlight() {
        let clock = ManualClock::shared(0);
        let mut d = dropdown().options(fruit()).clock(clock.clone()).build();
        d.open();
        d.set_search_term("ch");
        clock.advance(150);
        assert!(d.tick());
        assert_eq!(d.filtered_len(), 1);

        assert!(d.close());
        assert_eq!(d.search_term(), "");
        assert_eq!(d.debounced_search_term(), "");
        assert_eq!(d.highlighted_index(), None);
        assert_eq!(d.filtered_len(), 4);
        assert!(!d.close());
    }

    #[test]
    fn test_trigger_keys() {
        let mut d = dropdown().options(fruit()).build();

        assert!(d.handle_trigger_key(KeyCode::UP));
        assert!(d.is_open());
        assert_eq!(d.highlighted_index(), Some(0));

        // Open: arrows move with wraparound
        d.handle_trigger_key(KeyCode::UP);
        assert_eq!(d.highlighted_index(), Some(3));
        d.handle_trigger_key(KeyCode::DOWN);
        assert_eq!(d.highlighted_index(), Some(0));

        assert!(d.handle_trigger_key(KeyCode::ESCAPE));
        assert!(!d.is_open());
        // Escape when closed is not consumed
        assert!(!d.handle_trigger_key(KeyCode::ESCAPE));

        assert!(d.handle_trigger_key(KeyCode::SPACE));
        assert!(d.is_open());
        assert!(d.handle_trigger_key(KeyCode::ENTER));
        assert!(!d.is_open());

        assert!(!d.handle_trigger_key(KeyCode::TAB));
    }

    #[test]
    fn test_list_keys_require_open() {
        let mut d = dropdown().options(fruit()).build();
        assert!(!d.handle_list_key(KeyCode::DOWN));
        assert_eq!(d.highlighted_index(), None);
    }

    #[test]
    fn test_list_enter_selects_highlighted() {
        let picked = Arc::new(Mutex::new(Vec::new()));
        let sink = picked.clone();
        let mut d = dropdown()
            .options(fruit())
            .on_change(move |v| sink.lock().unwrap().push(v.map(str::to_string)))
            .build();

        d.open();
        d.handle_list_key(KeyCode::DOWN);
        d.handle_list_key(KeyCode::DOWN);
        assert!(d.handle_list_key(KeyCode::ENTER));

        assert_eq!(*picked.lock().unwrap(), vec![Some("cherry".to_string())]);
        assert_eq!(d.value(), Some("cherry"));
        assert!(!d.is_open());
    }

    #[test]
    fn test_list_escape_closes() {
        let mut d = dropdown().options(fruit()).build();
        d.open();
        assert!(d.handle_list_key(KeyCode::ESCAPE));
        assert!(!d.is_open());
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut d = dropdown().options(fruit()).disabled(true).build();
        assert!(!d.toggle_dropdown());
        assert!(!d.open());
        assert!(!d.handle_trigger_key(KeyCode::DOWN));
        assert!(!d.handle_trigger_key(KeyCode::ENTER));
        assert!(!d.is_open());
    }

    #[test]
    fn test_disabling_closes() {
        let mut d = dropdown().options(fruit()).build();
        d.open();
        d.set_disabled(true);
        assert!(!d.is_open());
        d.set_disabled(false);
        assert!(d.toggle_dropdown());
    }

    #[test]
    fn test_select_unknown_or_disabled_option() {
        let mut d = dropdown()
            .option("a", "A")
            .options([DropdownOption::new("x", "Unavailable").disabled()])
            .build();
        d.open();
        assert!(!d.select("missing"));
        assert!(!d.select("x"));
        assert!(d.is_open());
        assert_eq!(d.value(), None);
    }

    #[test]
    fn test_clear_single_prefers_clear_callback() {
        let cleared = Arc::new(Mutex::new(0));
        let changes = Arc::new(Mutex::new(Vec::new()));
        let c = cleared.clone();
        let ch = changes.clone();
        let mut d = dropdown()
            .options(fruit())
            .value("apple")
            .allow_clear(true)
            .on_clear(move || *c.lock().unwrap() += 1)
            .on_change(move |v| ch.lock().unwrap().push(v.map(str::to_string)))
            .build();

        d.open();
        d.clear();
        assert_eq!(*cleared.lock().unwrap(), 1);
        assert!(changes.lock().unwrap().is_empty());
        assert_eq!(d.value(), None);
        assert!(!d.is_open());
    }

    #[test]
    fn test_clear_single_falls_back_to_change_none() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let ch = changes.clone();
        let mut d = dropdown()
            .options(fruit())
            .value("apple")
            .allow_clear(true)
            .on_change(move |v| ch.lock().unwrap().push(v.map(str::to_string)))
            .build();

        d.clear();
        assert_eq!(*changes.lock().unwrap(), vec![None]);
    }

    #[test]
    fn test_clear_without_allow_clear_only_closes() {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let ch = changes.clone();
        let mut d = dropdown()
            .options(fruit())
            .value("apple")
            .on_change(move |v| ch.lock().unwrap().push(v.map(str::to_string)))
            .build();

        d.open();
        d.clear();
        assert!(changes.lock().unwrap().is_empty());
        assert_eq!(d.value(), Some("apple"));
        assert!(!d.is_open());
    }

    #[test]
    fn test_clear_multi_empties_selection() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let mut d = dropdown()
            .options(fruit())
            .multi_select(true)
            .selected_values(["apple", "date"])
            .on_multi_change(move |v| s.lock().unwrap().push(v.to_vec()))
            .build();

        d.open();
        d.clear();
        assert_eq!(*seen.lock().unwrap(), vec![Vec::<String>::new()]);
        assert!(d.selected_values().is_empty());
        assert!(!d.is_open());
    }

    #[test]
    fn test_selected_options_skip_stale_values() {
        let d = dropdown()
            .options(fruit())
            .multi_select(true)
            .selected_values(["date", "gone", "apple"])
            .build();
        let labels: Vec<_> = d.selected_options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Date", "Apple"]);
    }

    #[test]
    fn test_multi_open_highlights_first_selected_in_list_order() {
        let mut d = dropdown()
            .options(fruit())
            .multi_select(true)
            .selected_values(["date", "banana"])
            .build();
        d.open();
        assert_eq!(d.highlighted_index(), Some(1));
    }

    #[test]
    fn test_search_ignored_when_not_allowed() {
        let mut d = dropdown().options(fruit()).allow_search(false).build();
        d.open();
        d.set_search_term("ban");
        assert_eq!(d.search_term(), "");
        assert!(!d.has_pending_search());
    }

    #[test]
    fn test_set_highlighted_index_bounds() {
        let mut d = dropdown().options(fruit()).build();
        d.open();
        d.set_highlighted_index(Some(2));
        assert_eq!(d.highlighted_option().map(|o| o.value.as_str()), Some("cherry"));
        d.set_highlighted_index(Some(9));
        assert_eq!(d.highlighted_index(), None);
    }

    #[test]
    fn test_set_options_while_open_resets_highlight() {
        let mut d = dropdown().options(fruit()).value("date").build();
        d.open();
        assert_eq!(d.highlighted_index(), Some(3));
        d.set_options(vec![DropdownOption::new("date", "Date")]);
        assert_eq!(d.highlighted_index(), Some(0));
        d.set_options(Vec::new());
        assert_eq!(d.highlighted_index(), None);
    }

    #[test]
    fn test_accessibility_ids() {
        let mut d = dropdown().id("fruit").options(fruit()).build();
        assert_eq!(d.id(), "fruit");
        assert_eq!(d.listbox_id(), "fruit-listbox");
        assert_eq!(d.active_descendant_id(), None);
        d.open();
        d.handle_list_key(KeyCode::DOWN);
        assert_eq!(d.active_descendant_id().as_deref(), Some("fruit-option-1"));
        assert_eq!(d.option_id(3), "fruit-option-3");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = dropdown().build();
        let b = dropdown().build();
        assert_ne!(a.listbox_id(), b.listbox_id());
        assert!(a.id().starts_with("dropdown-"));
    }

    #[test]
    fn test_position_on_open_and_discard_on_close() {
        let mut d = dropdown().options(fruit()).build();
        d.set_anchor_bounds(Rect::new(100.0, 50.0, 200.0, 40.0));
        d.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(d.position(), None);

        d.open();
        let p = d.position().unwrap();
        assert_eq!(p.side, PlacementSide::Below);
        assert_eq!(p.top, 94.0);
        assert_eq!(p.left, 100.0);
        assert_eq!(p.width, 200.0);
        // 4 options + search row at 36px each
        assert_eq!(p.max_height, 180.0);

        d.close();
        assert_eq!(d.position(), None);
    }

    #[test]
    fn test_position_without_viewport() {
        let mut d = dropdown().options(fruit()).allow_search(false).build();
        d.set_anchor_bounds(Rect::new(10.0, 10.0, 120.0, 30.0));
        d.open();
        let p = d.position().unwrap();
        assert_eq!(p.top, 44.0);
        assert_eq!(p.left, 10.0);
        assert_eq!(p.max_height, 144.0);
    }

    #[test]
    fn test_viewport_change_repositions_only_while_open() {
        let mut d = dropdown().options(fruit()).build();
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        d.handle_viewport_change(Rect::new(0.0, 0.0, 100.0, 40.0), viewport);
        assert_eq!(d.position(), None);

        d.open();
        assert_eq!(d.position().unwrap().top, 44.0);

        // Scrolled so the anchor sits near the bottom: flips above
        d.handle_viewport_change(Rect::new(0.0, 540.0, 100.0, 40.0), viewport);
        let p = d.position().unwrap();
        assert_eq!(p.side, PlacementSide::Above);
        assert!(d.is_open());
    }

    #[test]
    fn test_pointer_down_outside_closes() {
        let mut d = dropdown().options(fruit()).build();
        d.set_anchor_bounds(Rect::new(0.0, 0.0, 100.0, 40.0));
        d.open();

        // Inside the trigger
        assert!(!d.handle_pointer_down(Point::new(10.0, 10.0), None));
        // Inside the computed list area
        assert!(!d.handle_pointer_down(Point::new(10.0, 60.0), None));
        assert!(d.is_open());

        // Host-provided list bounds take precedence
        let list = Rect::new(0.0, 44.0, 100.0, 20.0);
        assert!(d.handle_pointer_down(Point::new(10.0, 100.0), Some(list)));
        assert!(!d.is_open());

        // Closed: nothing to do
        assert!(!d.handle_pointer_down(Point::new(500.0, 500.0), None));
    }

    #[test]
    fn test_view_snapshot() {
        let mut d = dropdown()
            .id("v")
            .options(fruit())
            .value("banana")
            .allow_clear(true)
            .build();
        d.open();
        let view = d.view();
        assert!(view.is_open);
        assert_eq!(view.filtered_options.len(), 4);
        assert_eq!(view.highlighted_index, Some(1));
        assert_eq!(view.selected_option.map(|o| o.label.as_str()), Some("Banana"));
        assert_eq!(view.listbox_id, "v-listbox");
        assert_eq!(view.active_descendant_id.as_deref(), Some("v-option-1"));
        assert!(view.allow_clear);
        assert!(view.allow_search);
        assert!(!view.multi_select);
    }
}
