//! Logging facilities for cssx.
//!
//! cssx uses the `tracing` crate for instrumentation. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("cssx_style::cache=trace")
//!     .init();
//! ```

/// Span names used throughout cssx for tracing.
pub mod span_names {
    /// A full style resolution.
    pub const RESOLVE: &str = "cssx::resolve";
    /// A cached style resolution.
    pub const RESOLVE_CACHED: &str = "cssx::resolve_cached";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Cascade and engine target.
    pub const RESOLVE: &str = "cssx_style::resolve";
    /// Style cache target.
    pub const CACHE: &str = "cssx_style::cache";
    /// Variable substitution target.
    pub const VARIABLES: &str = "cssx_style::variables";
    /// Media query evaluation target.
    pub const MEDIA: &str = "cssx_style::media";
    /// Environment (dimensions, platform) target.
    pub const ENVIRONMENT: &str = "cssx_style::environment";
    /// Read tracking target.
    pub const TRACKING: &str = "cssx_core::observe";
}

/// A guard that keeps a resolution span entered until it is dropped.
#[derive(Debug)]
pub struct ResolveSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl ResolveSpan {
    /// Enter a span for `operation` (one of [`span_names`]).
    pub fn new(operation: &'static str, classes: &str) -> Self {
        let span = tracing::debug_span!(target: "cssx_style::resolve", "resolve", operation, classes);
        Self {
            span: span.entered(),
        }
    }
}
