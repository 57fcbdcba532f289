//! Country picker demo
//!
//! Loads a country list through the reference cache, then drives a
//! searchable dropdown with a scripted sequence of keys and search input,
//! printing what a renderer would draw after each step.
//!
//! Run with: RUST_LOG=debug cargo run -p dropkit_cn --example country_picker

use std::sync::Arc;

use anyhow::Result;
use dropkit_cache::{CacheConfig, MemoryStorage, ReferenceCache};
use dropkit_cn::prelude::*;
use dropkit_core::ManualClock;
use tracing_subscriber::EnvFilter;

const COUNTRIES_JSON: &str = r#"[
    { "value": "ca", "label": "Canada", "description": "North America" },
    { "value": "fr", "label": "France", "description": "Europe" },
    { "value": "de", "label": "Germany", "description": "Europe", "search_text": "Deutschland" },
    { "value": "jp", "label": "Japan", "description": "Asia", "search_text": "Nippon" },
    { "value": "mx", "label": "Mexico", "description": "North America" },
    { "value": "ch", "label": "Switzerland", "description": "Europe", "disabled": true },
    { "value": "us", "label": "United States", "description": "North America", "search_text": "USA" }
]"#;

async fn fetch_countries() -> Result<Vec<DropdownOption>> {
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    Ok(serde_json::from_str(COUNTRIES_JSON)?)
}

fn render(step: &str, dropdown: &DropdownController) {
    let view = dropdown.view();
    println!("== {}", step);
    println!(
        "   open={} search={:?} active={:?}",
        view.is_open, view.search_term, view.active_descendant_id
    );
    if let Some(position) = view.position {
        println!(
            "   list at ({:.0}, {:.0}) {:.0}px wide, {:?}",
            position.left, position.top, position.width, position.side
        );
    }
    for (i, option) in view.filtered_options.iter().enumerate() {
        let marker = if view.highlighted_index == Some(i) { ">" } else { " " };
        let check = if dropdown.is_selected(&option.value) { "x" } else { " " };
        println!("   {} [{}] {}", marker, check, option.label);
    }
    let selected: Vec<&str> = view
        .selected_options
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    println!("   selected: {:?}", selected);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let storage = Arc::new(MemoryStorage::new());
    let cache: Arc<ReferenceCache<Vec<DropdownOption>>> = Arc::new(
        ReferenceCache::new(CacheConfig::default()).with_storage(storage.clone()),
    );

    // Two views asking at once share one request
    let (first, second) = tokio::join!(
        cache.get_or_fetch("countries", fetch_countries),
        cache.get_or_fetch("countries", fetch_countries),
    );
    let countries = first?;
    debug_assert!(Arc::ptr_eq(&countries, &second?));
    println!("loaded {} countries ({} stored)", countries.len(), storage.len());

    let clock = ManualClock::shared(0);
    let settings = DropdownSettings::from_toml_str(
        r#"
        debounce_ms = 150

        [placement]
        max_height = 180.0
        "#,
    )?;

    let mut dropdown = cn::dropdown()
        .id("country")
        .options(countries.iter().cloned())
        .multi_select(true)
        .selected_values(["fr"])
        .settings(settings)
        .clock(clock.clone())
        .on_multi_change(|values| println!("   -> on_multi_change {:?}", values))
        .build();

    dropdown.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
    dropdown.set_anchor_bounds(Rect::new(40.0, 520.0, 260.0, 36.0));

    dropdown.handle_trigger_key(KeyCode::DOWN);
    render("open with ArrowDown", &dropdown);

    dropdown.set_search_term("north");
    clock.advance(100);
    dropdown.tick();
    render("typed 'north', still debouncing", &dropdown);

    clock.advance(50);
    dropdown.tick();
    render("debounce elapsed", &dropdown);

    dropdown.handle_list_key(KeyCode::DOWN);
    dropdown.handle_list_key(KeyCode::ENTER);
    render("picked with Enter", &dropdown);

    dropdown.set_search_term("");
    clock.advance(150);
    dropdown.tick();
    dropdown.handle_list_key(KeyCode::ESCAPE);
    render("closed with Escape", &dropdown);

    Ok(())
}
