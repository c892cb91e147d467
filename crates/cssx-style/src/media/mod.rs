//! Media queries and their evaluation against the viewport.

mod query;

pub use query::{MediaFeature, MediaQuery, Orientation};
