//! Reusable widget components.

pub mod filter;

pub use filter::CategorySidebar;
