pub mod aggregate;
pub mod catalog;

pub use aggregate::{Category, CategoryFilters, CategorySortBy, SortOrder};
