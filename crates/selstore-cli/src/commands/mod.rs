//! Command implementations.

mod list;

pub use list::list;
