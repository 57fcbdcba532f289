//! Debounced search filtering for option lists
//!
//! Keeps two terms: the raw term the input shows (updated on every keystroke)
//! and the applied term the filter actually uses (updated once typing pauses
//! for the debounce window).

use dropkit_core::Debouncer;

use super::select_option::DropdownOption;

/// Raw and debounced search state
#[derive(Debug)]
pub struct SearchFilter {
    raw: String,
    applied: String,
    debounce: Debouncer<String>,
}

impl SearchFilter {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            raw: String::new(),
            applied: String::new(),
            debounce: Debouncer::new(debounce_ms),
        }
    }

    /// The term as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The term the filter currently uses
    pub fn applied(&self) -> &str {
        &self.applied
    }

    /// Whether a debounced update is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Record a keystroke and (re)start the debounce window
    pub fn set_raw(&mut self, term: impl Into<String>, now_ms: u64) {
        self.raw = term.into();
        self.debounce.schedule(self.raw.clone(), now_ms);
    }

    /// Apply the pending term if its window elapsed. Returns true when the
    /// applied term changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.debounce.poll(now_ms) {
            Some(term) if term != self.applied => {
                tracing::trace!(term = %term, "search term applied");
                self.applied = term;
                true
            }
            _ => false,
        }
    }

    /// Clear both terms and cancel any pending update. Returns true when the
    /// applied term changed.
    pub fn reset(&mut self) -> bool {
        self.debounce.cancel();
        self.raw.clear();
        if self.applied.is_empty() {
            false
        } else {
            self.applied.clear();
            true
        }
    }

    /// Indices of the options matching the applied term, in list order
    pub fn filter(&self, options: &[DropdownOption]) -> Vec<usize> {
        let query = self.applied.to_lowercase();
        options
            .iter()
            .enumerate()
            .filter(|(_, opt)| opt.matches_lowercase(&query))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<DropdownOption> {
        vec![
            DropdownOption::new("1", "Apple").description("Red fruit"),
            DropdownOption::new("2", "Banana"),
            DropdownOption::new("3", "Cherry").search_text("stone fruit"),
        ]
    }

    #[test]
    fn test_raw_updates_immediately_applied_after_window() {
        let mut search = SearchFilter::new(150);
        search.set_raw("fruit", 0);
        assert_eq!(search.raw(), "fruit");
        assert_eq!(search.applied(), "");
        assert!(search.is_pending());

        assert!(!search.tick(149));
        assert!(search.tick(150));
        assert_eq!(search.applied(), "fruit");
    }

    #[test]
    fn test_filter_uses_applied_term() {
        let mut search = SearchFilter::new(150);
        let opts = options();
        assert_eq!(search.filter(&opts), vec![0, 1, 2]);

        search.set_raw("FRUIT", 0);
        // Not applied yet
        assert_eq!(search.filter(&opts), vec![0, 1, 2]);

        search.tick(150);
        assert_eq!(search.filter(&opts), vec![0, 2]);
    }

    #[test]
    fn test_same_term_does_not_report_change() {
        let mut search = SearchFilter::new(10);
        search.set_raw("a", 0);
        assert!(search.tick(10));
        search.set_raw("a", 20);
        assert!(!search.tick(30));
    }

    #[test]
    fn test_reset_cancels_pending() {
        let mut search = SearchFilter::new(150);
        search.set_raw("ban", 0);
        assert!(!search.reset());
        assert_eq!(search.raw(), "");
        assert!(!search.tick(1_000));
        assert_eq!(search.applied(), "");
    }

    #[test]
    fn test_reset_clears_applied() {
        let mut search = SearchFilter::new(0);
        search.set_raw("ban", 0);
        search.tick(0);
        assert!(search.reset());
        assert_eq!(search.applied(), "");
    }
}
