//! CSS custom properties (variables).
//!
//! Values may reference variables with `var(--name, fallback)`. References
//! resolve against the [`VariableStore`]: runtime values first, then
//! defaults, then the literal fallback.

mod store;
mod substitute;

pub use store::VariableStore;
pub use substitute::{
    UNRESOLVED_VARIABLE, VarReference, collect_variable_names, find_references, has_variables,
    substitute, substitute_text,
};
