//! Level source parsing
//!
//! Two encodings describe the same schema:
//!
//! Structured (JSON):
//! ```json
//! { "name": "Warmup", "patterns": [ {"items": ["spike"], "spacing": 280}, [["cube"], 200] ] }
//! ```
//!
//! Line text:
//! ```text
//! # comment
//! name: Warmup
//! spike|280
//! cube,spike|200
//! mini_spike
//! ```
//!
//! Both produce [`RawEntry`] values that go through [`sanitize`], the only place where
//! item names are resolved and spacing is coerced.

use serde_json::{Value, json};

use super::{LevelDefinition, PatternEntry};
use crate::catalog::Catalog;
use crate::consts::DEFAULT_SPACING;
use crate::error::LevelLoadError;

/// An unvalidated pattern entry as read from a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub items: Vec<String>,
    /// `None` when the spacing was missing or could not be read as an integer
    pub spacing: Option<i64>,
}

/// Resolve item names and coerce spacing; drops entries left without items
pub fn sanitize(raw: Vec<RawEntry>, catalog: &Catalog) -> Vec<PatternEntry> {
    raw.into_iter()
        .filter_map(|entry| {
            let items: Vec<_> = entry
                .items
                .iter()
                .filter_map(|name| catalog.resolve_kind(name))
                .collect();
            if items.is_empty() {
                return None;
            }
            let spacing = entry
                .spacing
                .unwrap_or(DEFAULT_SPACING as i64)
                .clamp(0, u32::MAX as i64) as u32;
            Some(PatternEntry { items, spacing })
        })
        .collect()
}

/// Parse the structured (JSON) encoding. `stem` names the level when the source omits a name.
pub fn parse_json(stem: &str, text: &str, catalog: &Catalog) -> Result<LevelDefinition, LevelLoadError> {
    let data: Value = serde_json::from_str(text)?;

    let name = match data.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => stem.to_string(),
    };

    let raw = data
        .get("patterns")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(raw_entry_from_json).collect())
        .unwrap_or_default();

    finish(name, raw, catalog)
}

/// Parse the line-oriented text encoding
pub fn parse_text(stem: &str, text: &str, catalog: &Catalog) -> Result<LevelDefinition, LevelLoadError> {
    let mut name = stem.to_string();
    let mut raw = Vec::new();

    for line in text.lines() {
        let clean = line.trim();
        if clean.is_empty() || clean.starts_with('#') {
            continue;
        }
        if let Some(value) = header_value(clean, "name") {
            if !value.is_empty() {
                name = value.to_string();
            }
            continue;
        }

        let (left, spacing) = match clean.split_once('|') {
            Some((left, right)) => (left, right.trim().parse::<i64>().ok()),
            None => (clean, Some(DEFAULT_SPACING as i64)),
        };
        let items = left
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        raw.push(RawEntry { items, spacing });
    }

    finish(name, raw, catalog)
}

/// Serialize to the line text encoding (inverse of [`parse_text`])
pub fn to_text(level: &LevelDefinition) -> String {
    let mut out = format!("name: {}\n", level.name);
    for entry in &level.patterns {
        let items: Vec<_> = entry.items.iter().map(|item| item.name()).collect();
        out.push_str(&format!("{}|{}\n", items.join(","), entry.spacing));
    }
    out
}

/// Serialize to the structured encoding (inverse of [`parse_json`])
pub fn to_json(level: &LevelDefinition) -> Value {
    let patterns: Vec<Value> = level
        .patterns
        .iter()
        .map(|entry| {
            let items: Vec<_> = entry.items.iter().map(|item| item.name()).collect();
            json!({ "items": items, "spacing": entry.spacing })
        })
        .collect();
    json!({ "name": level.name, "patterns": patterns })
}

fn finish(name: String, raw: Vec<RawEntry>, catalog: &Catalog) -> Result<LevelDefinition, LevelLoadError> {
    let patterns = sanitize(raw, catalog);
    if patterns.is_empty() {
        return Err(LevelLoadError::Empty(name));
    }
    Ok(LevelDefinition { name, patterns })
}

/// `key: value` header match, case-insensitive on the key
fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let (head, value) = line.split_once(':')?;
    if head.eq_ignore_ascii_case(key) {
        Some(value.trim())
    } else {
        None
    }
}

/// Accepts `{"items": [...], "spacing": n}` or `[[...], n]`; anything else is skipped
fn raw_entry_from_json(entry: &Value) -> Option<RawEntry> {
    let (items, spacing) = match entry {
        Value::Object(map) => (map.get("items"), map.get("spacing")),
        Value::Array(pair) if pair.len() == 2 => (Some(&pair[0]), Some(&pair[1])),
        _ => return None,
    };

    let items = match items {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        // A missing item list is an empty one; a non-list is rejected.
        None => Vec::new(),
        Some(_) => return None,
    };

    let spacing = match spacing {
        None => Some(DEFAULT_SPACING as i64),
        Some(value) => spacing_from_json(value),
    };

    Some(RawEntry { items, spacing })
}

fn spacing_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemKind, ObstacleKind, ZoneKind};
    use proptest::prelude::*;

    fn raw(items: &[&str], spacing: Option<i64>) -> RawEntry {
        RawEntry {
            items: items.iter().map(|s| s.to_string()).collect(),
            spacing,
        }
    }

    #[test]
    fn test_sanitize_drops_unknown_and_empty() {
        let catalog = Catalog::default();
        let entries = sanitize(
            vec![
                raw(&["spike", "laser", "portal_low"], Some(150)),
                raw(&["laser", "portal_sideways"], Some(100)),
                raw(&[], Some(100)),
            ],
            &catalog,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].items,
            vec![
                ItemKind::Obstacle(ObstacleKind::Spike),
                ItemKind::Zone(ZoneKind::Low)
            ]
        );
        assert_eq!(entries[0].spacing, 150);
    }

    #[test]
    fn test_sanitize_spacing_defaults() {
        let catalog = Catalog::default();
        let entries = sanitize(vec![raw(&["cube"], None), raw(&["cube"], Some(-40))], &catalog);
        assert_eq!(entries[0].spacing, 200);
        assert_eq!(entries[1].spacing, 0);
    }

    #[test]
    fn test_parse_json_object_and_pair_entries() {
        let text = r#"{
            "name": "Mixed",
            "patterns": [
                {"items": ["spike"], "spacing": 280},
                [["cube", "mini_spike"], "150"],
                {"items": ["long_spike"]},
                {"items": "spike", "spacing": 10},
                {"items": ["cube"], "spacing": 99.9},
                {"items": ["cube"], "spacing": "wide"},
                {"items": ["portal_high", 7], "spacing": null},
                42
            ]
        }"#;
        let level = parse_json("fallback", text, &Catalog::default()).unwrap();
        assert_eq!(level.name, "Mixed");
        let spacings: Vec<_> = level.patterns.iter().map(|p| p.spacing).collect();
        assert_eq!(spacings, vec![280, 150, 200, 99, 200, 200]);
        assert_eq!(level.patterns[1].items.len(), 2);
        assert_eq!(level.patterns[5].items, vec![ItemKind::Zone(ZoneKind::High)]);
    }

    #[test]
    fn test_parse_json_name_falls_back_to_stem() {
        let catalog = Catalog::default();
        let level = parse_json("03_pressure", r#"{"patterns": [{"items": ["spike"]}]}"#, &catalog).unwrap();
        assert_eq!(level.name, "03_pressure");
        let level = parse_json("x", r#"{"name": "", "patterns": [{"items": ["spike"]}]}"#, &catalog).unwrap();
        assert_eq!(level.name, "x");
    }

    #[test]
    fn test_parse_json_errors() {
        let catalog = Catalog::default();
        assert!(matches!(
            parse_json("bad", "{ not json", &catalog),
            Err(LevelLoadError::Json(_))
        ));
        assert!(matches!(
            parse_json("empty", r#"{"name": "E", "patterns": [{"items": ["nope"]}]}"#, &catalog),
            Err(LevelLoadError::Empty(name)) if name == "E"
        ));
        assert!(matches!(
            parse_json("list", "[1, 2]", &catalog),
            Err(LevelLoadError::Empty(_))
        ));
    }

    #[test]
    fn test_parse_text() {
        let text = "\
# warmup level
NAME: Warmup
spike|280

cube , spike | 120
mini_spike
portal_low|abc
laser|50
name:
";
        let level = parse_text("stem", text, &Catalog::default()).unwrap();
        assert_eq!(level.name, "Warmup");
        assert_eq!(level.patterns.len(), 4);
        assert_eq!(level.patterns[0].spacing, 280);
        assert_eq!(level.patterns[1].items.len(), 2);
        assert_eq!(level.patterns[1].spacing, 120);
        assert_eq!(level.patterns[2].spacing, 200);
        assert_eq!(level.patterns[3].spacing, 200);
    }

    #[test]
    fn test_parse_text_empty_is_error() {
        let result = parse_text("blank", "# nothing\nname: Blank\n", &Catalog::default());
        assert!(matches!(result, Err(LevelLoadError::Empty(name)) if name == "Blank"));
    }

    #[test]
    fn test_text_json_round_trip() {
        let catalog = Catalog::default();
        let text = "name: Trip\nspike,portal_high|90\ncube|0\nlong_spike,mini_spike,cube|310\n";
        let from_text = parse_text("t", text, &catalog).unwrap();
        let json = to_json(&from_text).to_string();
        let from_json = parse_json("j", &json, &catalog).unwrap();
        assert_eq!(from_text, from_json);
        let back = parse_text("t2", &to_text(&from_json), &catalog).unwrap();
        assert_eq!(back, from_text);
    }

    fn item_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("spike".to_string()),
            Just("cube".to_string()),
            Just("long_spike".to_string()),
            Just("mini_spike".to_string()),
            Just("portal_low".to_string()),
            Just("portal_high".to_string()),
            Just("portal_normal".to_string()),
            "[a-z]{1,8}",
        ]
    }

    proptest! {
        #[test]
        fn prop_spacing_never_negative(spacing in -100_000i64..100_000) {
            let entries = sanitize(vec![raw(&["spike"], Some(spacing))], &Catalog::default());
            prop_assert_eq!(entries[0].spacing as i64, spacing.max(0));
        }

        #[test]
        fn prop_unknown_only_entries_dropped(names in prop::collection::vec("zz[a-z]{0,6}", 1..5)) {
            let entry = RawEntry { items: names, spacing: Some(100) };
            prop_assert!(sanitize(vec![entry], &Catalog::default()).is_empty());
        }

        #[test]
        fn prop_round_trip_through_both_encodings(
            entries in prop::collection::vec(
                (prop::collection::vec(item_name(), 1..4), -50i64..600),
                1..8,
            )
        ) {
            let catalog = Catalog::default();
            let raw_entries: Vec<_> = entries
                .into_iter()
                .map(|(items, spacing)| RawEntry { items, spacing: Some(spacing) })
                .collect();
            let patterns = sanitize(raw_entries, &catalog);
            prop_assume!(!patterns.is_empty());
            let level = LevelDefinition { name: "Prop".to_string(), patterns };

            let via_json = parse_json("j", &to_json(&level).to_string(), &catalog).unwrap();
            let via_text = parse_text("t", &to_text(&level), &catalog).unwrap();
            prop_assert_eq!(&via_json, &level);
            prop_assert_eq!(&via_text, &level);
        }
    }
}
