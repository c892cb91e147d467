//! Media query types.
//!
//! A [`MediaQuery`] is the structured form of one `@media` prelude: a list
//! of features that must all hold. Separate `@media` blocks become separate
//! queries on separate rules.

use std::fmt;
use std::hash::{Hash, Hasher};

use cssx_core::logging::targets;

use crate::environment::Dimensions;

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Width greater than height.
    Landscape,
    /// Height greater than or equal to width.
    Portrait,
}

impl Orientation {
    /// Orientation of the given dimensions.
    pub fn of(dimensions: &Dimensions) -> Self {
        if dimensions.width > dimensions.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// A single media feature test.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaFeature {
    /// `(min-width: Npx)`
    MinWidth(f64),
    /// `(max-width: Npx)`
    MaxWidth(f64),
    /// `(min-height: Npx)`
    MinHeight(f64),
    /// `(max-height: Npx)`
    MaxHeight(f64),
    /// `(orientation: landscape | portrait)`
    Orientation(Orientation),
    /// `(aspect-ratio: w/h)`
    AspectRatio(f64),
    /// `(min-aspect-ratio: w/h)`
    MinAspectRatio(f64),
    /// `(max-aspect-ratio: w/h)`
    MaxAspectRatio(f64),
    /// A media type such as `screen` or `all`.
    MediaType(String),
    /// Anything this evaluator does not understand. Never matches.
    Unknown(String),
}

const ASPECT_EPSILON: f64 = 1e-6;

impl MediaFeature {
    /// Evaluate the feature against the viewport.
    pub fn matches(&self, dimensions: &Dimensions) -> bool {
        let aspect = dimensions.aspect_ratio();
        match self {
            MediaFeature::MinWidth(w) => dimensions.width >= *w,
            MediaFeature::MaxWidth(w) => dimensions.width <= *w,
            MediaFeature::MinHeight(h) => dimensions.height >= *h,
            MediaFeature::MaxHeight(h) => dimensions.height <= *h,
            MediaFeature::Orientation(o) => Orientation::of(dimensions) == *o,
            MediaFeature::AspectRatio(r) => (aspect - r).abs() < ASPECT_EPSILON,
            MediaFeature::MinAspectRatio(r) => aspect >= *r,
            MediaFeature::MaxAspectRatio(r) => aspect <= *r,
            MediaFeature::MediaType(t) => matches!(t.as_str(), "screen" | "all"),
            MediaFeature::Unknown(raw) => {
                tracing::debug!(target: targets::MEDIA, feature = %raw, "unknown media feature; not matching");
                false
            }
        }
    }
}

impl Hash for MediaFeature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            MediaFeature::MinWidth(v)
            | MediaFeature::MaxWidth(v)
            | MediaFeature::MinHeight(v)
            | MediaFeature::MaxHeight(v)
            | MediaFeature::AspectRatio(v)
            | MediaFeature::MinAspectRatio(v)
            | MediaFeature::MaxAspectRatio(v) => v.to_bits().hash(state),
            MediaFeature::Orientation(o) => o.hash(state),
            MediaFeature::MediaType(s) | MediaFeature::Unknown(s) => s.hash(state),
        }
    }
}

impl fmt::Display for MediaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaFeature::MinWidth(v) => write!(f, "(min-width: {}px)", v),
            MediaFeature::MaxWidth(v) => write!(f, "(max-width: {}px)", v),
            MediaFeature::MinHeight(v) => write!(f, "(min-height: {}px)", v),
            MediaFeature::MaxHeight(v) => write!(f, "(max-height: {}px)", v),
            MediaFeature::Orientation(Orientation::Landscape) => f.write_str("(orientation: landscape)"),
            MediaFeature::Orientation(Orientation::Portrait) => f.write_str("(orientation: portrait)"),
            MediaFeature::AspectRatio(v) => write!(f, "(aspect-ratio: {})", v),
            MediaFeature::MinAspectRatio(v) => write!(f, "(min-aspect-ratio: {})", v),
            MediaFeature::MaxAspectRatio(v) => write!(f, "(max-aspect-ratio: {})", v),
            MediaFeature::MediaType(t) => f.write_str(t),
            MediaFeature::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// A conjunction of media features.
#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct MediaQuery {
    features: Vec<MediaFeature>,
}

impl MediaQuery {
    /// Create a query from its features.
    pub fn new(features: Vec<MediaFeature>) -> Self {
        Self { features }
    }

    /// `(min-width: Npx)` shorthand.
    pub fn min_width(width: f64) -> Self {
        Self::new(vec![MediaFeature::MinWidth(width)])
    }

    /// `(max-width: Npx)` shorthand.
    pub fn max_width(width: f64) -> Self {
        Self::new(vec![MediaFeature::MaxWidth(width)])
    }

    /// Add another feature to the conjunction.
    pub fn and(mut self, feature: MediaFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// The features of the query.
    pub fn features(&self) -> &[MediaFeature] {
        &self.features
    }

    /// Whether every feature holds for `dimensions`.
    ///
    /// An empty query always matches.
    pub fn matches(&self, dimensions: &Dimensions) -> bool {
        self.features.iter().all(|f| f.matches(dimensions))
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{}", feature)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP: Dimensions = Dimensions::new(1024.0, 768.0);
    const TABLET: Dimensions = Dimensions::new(800.0, 600.0);
    const PHONE: Dimensions = Dimensions::new(375.0, 812.0);

    #[test]
    fn width_bounds() {
        let query = MediaQuery::min_width(768.0);
        assert!(query.matches(&DESKTOP));
        assert!(query.matches(&TABLET));
        assert!(!query.matches(&PHONE));

        assert!(MediaQuery::min_width(1024.0).matches(&DESKTOP));
        assert!(!MediaQuery::max_width(1023.0).matches(&DESKTOP));
    }

    #[test]
    fn features_combine_with_and() {
        let query = MediaQuery::min_width(600.0).and(MediaFeature::MaxWidth(900.0));
        assert!(query.matches(&TABLET));
        assert!(!query.matches(&DESKTOP));
        assert_eq!(query.to_string(), "(min-width: 600px) and (max-width: 900px)");
    }

    #[test]
    fn orientation_and_aspect_ratio() {
        let landscape = MediaQuery::new(vec![MediaFeature::Orientation(Orientation::Landscape)]);
        assert!(landscape.matches(&DESKTOP));
        assert!(!landscape.matches(&PHONE));

        assert!(MediaQuery::new(vec![MediaFeature::AspectRatio(4.0 / 3.0)]).matches(&DESKTOP));
        assert!(MediaQuery::new(vec![MediaFeature::MaxAspectRatio(1.0)]).matches(&PHONE));
        assert!(!MediaQuery::new(vec![MediaFeature::MinAspectRatio(1.0)]).matches(&PHONE));
    }

    #[test]
    fn unknown_features_fail_closed() {
        let query = MediaQuery::new(vec![MediaFeature::Unknown("(hover: hover)".into())]);
        assert!(!query.matches(&DESKTOP));

        let query = MediaQuery::new(vec![MediaFeature::MediaType("print".into())]);
        assert!(!query.matches(&DESKTOP));

        let query = MediaQuery::new(vec![MediaFeature::MediaType("screen".into())]);
        assert!(query.matches(&DESKTOP));
    }

    #[test]
    fn empty_query_matches() {
        assert!(MediaQuery::default().matches(&PHONE));
    }
}
