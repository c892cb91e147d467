//! Selector type definitions.

use std::collections::BTreeSet;
use std::fmt;

/// A compound class selector, optionally scoped to a named part.
///
/// `.root.active::part(header)` requires both `root` and `active` to be
/// active and contributes only to the `header` part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClassSelector {
    /// Required classes, sorted and de-duplicated.
    classes: Vec<String>,
    /// Target part; `None` targets the root part.
    part: Option<String>,
}

impl ClassSelector {
    /// Create a selector requiring the given classes.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self {
            classes,
            part: None,
        }
    }

    /// Create a single-class selector.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new([name.into()])
    }

    /// Add a required class.
    pub fn with_class(self, name: impl Into<String>) -> Self {
        let part = self.part;
        let mut classes = self.classes;
        classes.push(name.into());
        Self {
            part,
            ..Self::new(classes)
        }
    }

    /// Scope the selector to a named part (`::part(name)`).
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        let part = part.into();
        self.part = if part.is_empty() { None } else { Some(part) };
        self
    }

    /// The required classes, sorted.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The target part name; `""` for the root part.
    pub fn part(&self) -> &str {
        self.part.as_deref().unwrap_or("")
    }

    /// Whether this selector targets a named part.
    pub fn is_part(&self) -> bool {
        self.part.is_some()
    }
}

impl fmt::Display for ClassSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        if let Some(part) = &self.part {
            write!(f, "::part({})", part)?;
        }
        Ok(())
    }
}

/// The set of currently active class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ActiveClasses {
    classes: BTreeSet<String>,
}

impl ActiveClasses {
    /// Parse a whitespace-separated class string (`"root active"`).
    pub fn parse(class_names: &str) -> Self {
        Self {
            classes: class_names.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Whether `class` is active.
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Whether every class required by `selector` is active.
    pub fn satisfies(&self, selector: &ClassSelector) -> bool {
        selector.classes().iter().all(|c| self.contains(c))
    }

    /// Iterate over active classes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Number of active classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is active.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
