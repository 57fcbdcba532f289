//! Component controllers

pub mod dropdown;
pub mod search;
pub mod select_option;

pub use dropdown::{
    dropdown, dropdown_events, DropdownBuilder, DropdownController, DropdownState, DropdownView,
};
pub use search::SearchFilter;
pub use select_option::DropdownOption;
