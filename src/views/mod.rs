//! View state behind the pages, kept free of DOM types so it can be driven
//! directly against any [`PavilionStore`](crate::store::PavilionStore).
pub mod catalog;
pub mod detail;
