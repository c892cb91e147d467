//! Dynamic inputs a resolution depends on.
//!
//! Dependencies are derived from the rules whose classes match (whatever
//! their media outcome) and the inline overrides. They only change when the
//! class string, the layers or the inline overrides change, so they are
//! stored with a cache entry. The fingerprint is recomputed on every lookup
//! from the current values of the dependencies.

use std::collections::BTreeSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use cssx_core::{ObservedKey, ReadTracker};

use crate::environment::StyleEnvironment;
use crate::normalize::has_viewport_units;
use crate::selector::LayerMatch;
use crate::types::{InlineStyles, PropertyMap, PropertyValue};
use crate::variables::collect_variable_names;

/// The dynamic inputs of one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Whether the result can change with the viewport size.
    pub viewport: bool,
    /// Referenced variable names, sorted and deduplicated.
    pub variables: Vec<String>,
}

impl Dependencies {
    /// Collect dependencies from layer candidates and inline overrides.
    pub fn collect(matches: &[LayerMatch<'_>], inline: &InlineStyles) -> Self {
        let mut viewport = false;
        let mut names = BTreeSet::new();

        let mut scan = |properties: &PropertyMap| {
            let mut uses_viewport = false;
            for value in properties.values() {
                uses_viewport |= value.any_text(has_viewport_units);
                collect_variable_names(value, &mut names);
            }
            uses_viewport
        };

        for layer in matches {
            for rule in &layer.candidates {
                viewport |= scan(&rule.properties) || rule.media.is_some();
            }
        }
        for (_, style) in inline.iter() {
            viewport |= scan(&style.flatten());
        }

        Self {
            viewport,
            variables: names.into_iter().collect(),
        }
    }

    /// Whether the result depends on nothing dynamic.
    pub fn is_static(&self) -> bool {
        !self.viewport && self.variables.is_empty()
    }

    /// Hash the current values of the dependencies, recording each read on
    /// `tracker`.
    ///
    /// Variable values are followed transitively: a variable whose value
    /// references another variable depends on that one too, and a value
    /// using viewport units makes the viewport a dependency.
    pub fn fingerprint(&self, env: &StyleEnvironment, tracker: &dyn ReadTracker) -> u64 {
        let mut hasher = DefaultHasher::new();
        let mut visited = BTreeSet::new();
        let mut pending: Vec<String> = self.variables.iter().rev().cloned().collect();
        let mut viewport = self.viewport;

        while let Some(name) = pending.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            tracker.record_read(&ObservedKey::variable(name.as_str()));

            let value = env.variables().get(&name);
            name.hash(&mut hasher);
            value.hash(&mut hasher);

            if let Some(value) = value {
                viewport |= has_viewport_units(&value);
                let mut nested = BTreeSet::new();
                collect_variable_names(&PropertyValue::Text(value), &mut nested);
                pending.extend(nested.into_iter().rev().filter(|n| !visited.contains(n)));
            }
        }

        if viewport {
            tracker.record_read(&ObservedKey::Viewport);
            env.dimensions().hash(&mut hasher);
        }

        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Dimensions, Platform};
    use crate::media::MediaQuery;
    use crate::rules::{LayerOrigin, StyleLayer};
    use crate::selector::{ActiveClasses, ClassSelector, SelectorMatcher};
    use crate::types::props;
    use cssx_core::{NoopTracker, RecordingTracker};

    fn collect(layer: &StyleLayer, classes: &str, dims: Dimensions) -> Dependencies {
        let matched = SelectorMatcher::match_layer(layer, &ActiveClasses::parse(classes), &dims);
        Dependencies::collect(&[matched], &InlineStyles::new())
    }

    #[test]
    fn media_candidates_count_even_when_not_matching() {
        let layer = StyleLayer::builder(LayerOrigin::File)
            .media_rule(
                MediaQuery::max_width(600.0),
                ClassSelector::class("root"),
                props([("color", PropertyValue::from("red"))]),
            )
            .build();

        let deps = collect(&layer, "root", Dimensions::new(1024.0, 768.0));
        assert!(deps.viewport);

        let deps = collect(&layer, "other", Dimensions::new(1024.0, 768.0));
        assert!(deps.is_static());
    }

    #[test]
    fn variables_from_rules_and_inline() {
        let layer = StyleLayer::builder(LayerOrigin::File)
            .rule(
                ClassSelector::class("root"),
                props([("color", PropertyValue::from("var(--b, var(--a))"))]),
            )
            .rule(
                ClassSelector::class("hidden"),
                props([("color", PropertyValue::from("var(--unused)"))]),
            )
            .build();
        let matched = SelectorMatcher::match_layer(&layer, &ActiveClasses::parse("root"), &Dimensions::default());
        let inline = InlineStyles::new().with("style", props([("margin", PropertyValue::from("var(--c)"))]));

        let deps = Dependencies::collect(&[matched], &inline);
        assert!(!deps.viewport);
        assert_eq!(deps.variables, vec!["--a", "--b", "--c"]);
    }

    #[test]
    fn viewport_units_are_a_viewport_dependency() {
        let layer = StyleLayer::builder(LayerOrigin::File)
            .rule(ClassSelector::class("root"), props([("width", PropertyValue::from("50vw"))]))
            .build();
        assert!(collect(&layer, "root", Dimensions::default()).viewport);
    }

    #[test]
    fn fingerprint_tracks_values() {
        let env = StyleEnvironment::new(Dimensions::new(1024.0, 768.0), Platform::Native);
        let deps = Dependencies {
            viewport: false,
            variables: vec!["--color".into()],
        };

        let before = deps.fingerprint(&env, &NoopTracker);
        env.set_dimensions(Dimensions::new(800.0, 600.0));
        assert_eq!(deps.fingerprint(&env, &NoopTracker), before);

        env.variables().set("--color", "#0f0");
        assert_ne!(deps.fingerprint(&env, &NoopTracker), before);
    }

    #[test]
    fn fingerprint_records_minimal_reads() {
        let env = StyleEnvironment::default();
        let tracker = RecordingTracker::new();

        Dependencies::default().fingerprint(&env, &tracker);
        assert!(tracker.is_empty());

        let deps = Dependencies {
            viewport: true,
            variables: vec!["--a".into()],
        };
        deps.fingerprint(&env, &tracker);
        assert_eq!(
            tracker.take(),
            vec![ObservedKey::variable("--a"), ObservedKey::Viewport]
        );
    }

    #[test]
    fn fingerprint_follows_nested_variables() {
        let env = StyleEnvironment::default();
        env.variables().set("--outer", "var(--inner, 1px)");
        let deps = Dependencies {
            viewport: false,
            variables: vec!["--outer".into()],
        };
        let tracker = RecordingTracker::new();

        let before = deps.fingerprint(&env, &tracker);
        assert!(tracker.has_read(&ObservedKey::variable("--inner")));

        env.variables().set("--inner", "10vw");
        let after = deps.fingerprint(&env, &tracker);
        assert_ne!(before, after);
        assert!(tracker.has_read(&ObservedKey::Viewport));

        env.set_dimensions(Dimensions::new(320.0, 480.0));
        assert_ne!(deps.fingerprint(&env, &NoopTracker), after);
    }
}
