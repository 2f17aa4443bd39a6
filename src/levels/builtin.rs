//! Built-in level catalog, used when no level files can be loaded

use super::LevelDefinition;
use super::parse::{RawEntry, sanitize};
use crate::catalog::Catalog;

type Pattern = (&'static [&'static str], i64);

const LEVEL_1: &[Pattern] = &[
    (&["spike"], 280),
    (&["cube"], 260),
    (&["portal_low"], 190),
    (&["spike"], 260),
    (&["cube"], 260),
    (&["mini_spike"], 170),
    (&["spike", "mini_spike"], 190),
    (&["cube", "spike"], 220),
    (&["portal_normal"], 190),
    (&["long_spike"], 260),
    (&["cube"], 220),
    (&["spike"], 220),
    (&["portal_high"], 180),
    (&["mini_spike", "spike"], 190),
    (&["cube"], 200),
    (&["long_spike"], 260),
];

const LEVEL_2: &[Pattern] = &[
    (&["spike"], 220),
    (&["cube"], 210),
    (&["mini_spike", "mini_spike"], 160),
    (&["portal_low"], 170),
    (&["cube", "spike"], 170),
    (&["long_spike"], 220),
    (&["cube"], 180),
    (&["portal_high"], 170),
    (&["spike", "mini_spike"], 150),
    (&["cube", "spike"], 180),
    (&["portal_normal"], 170),
    (&["long_spike"], 200),
    (&["cube"], 180),
    (&["spike", "cube"], 150),
    (&["mini_spike"], 140),
    (&["portal_low"], 150),
    (&["cube", "mini_spike"], 150),
    (&["long_spike"], 190),
    (&["portal_high"], 160),
    (&["spike"], 170),
];

const LEVEL_3: &[Pattern] = &[
    (&["mini_spike", "spike"], 130),
    (&["cube"], 140),
    (&["portal_high"], 150),
    (&["spike", "mini_spike", "spike"], 120),
    (&["cube", "cube"], 120),
    (&["portal_low"], 140),
    (&["long_spike"], 170),
    (&["cube", "spike"], 120),
    (&["portal_normal"], 130),
    (&["mini_spike", "mini_spike", "spike"], 110),
    (&["cube"], 130),
    (&["portal_high"], 140),
    (&["long_spike"], 150),
    (&["spike", "cube", "mini_spike"], 110),
    (&["portal_low"], 130),
    (&["long_spike"], 160),
    (&["cube", "spike"], 110),
    (&["portal_normal"], 130),
    (&["mini_spike", "spike"], 120),
    (&["long_spike"], 160),
    (&["cube"], 130),
    (&["spike", "spike"], 130),
];

const LEVELS: &[(&str, &[Pattern])] = &[
    ("Level 1 - Discovery", LEVEL_1),
    ("Level 2 - Cadence", LEVEL_2),
    ("Level 3 - Pressure", LEVEL_3),
];

/// The built-in levels, resolved against the built-in catalog so they are never empty
pub fn default_levels() -> Vec<LevelDefinition> {
    LEVELS
        .iter()
        .map(|(name, patterns)| {
            let raw = patterns
                .iter()
                .map(|(items, spacing)| RawEntry {
                    items: items.iter().map(|s| s.to_string()).collect(),
                    spacing: Some(*spacing),
                })
                .collect();
            LevelDefinition {
                name: name.to_string(),
                patterns: sanitize(raw, Catalog::builtin()),
            }
        })
        .collect()
}
