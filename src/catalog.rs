//! Content catalog: obstacle and gravity zone kinds
//!
//! Level data names its items with strings (`"spike"`, `"portal_low"`, ...). Those names
//! resolve once, at ingestion, into the closed enums below; everything downstream looks up
//! dimensions, collision profile and gravity effect in the capability tables by enum key.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Prefix that marks a gravity zone in level data (`portal_low`, `portal_high`, ...)
pub const ZONE_PREFIX: &str = "portal_";

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Spike,
    /// Solid block the player may stand on
    Cube,
    LongSpike,
    MiniSpike,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Spike,
        ObstacleKind::Cube,
        ObstacleKind::LongSpike,
        ObstacleKind::MiniSpike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Cube => "cube",
            ObstacleKind::LongSpike => "long_spike",
            ObstacleKind::MiniSpike => "mini_spike",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "spike" => Some(ObstacleKind::Spike),
            "cube" => Some(ObstacleKind::Cube),
            "long_spike" => Some(ObstacleKind::LongSpike),
            "mini_spike" => Some(ObstacleKind::MiniSpike),
            _ => None,
        }
    }
}

/// Gravity zone kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Low,
    High,
    Normal,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 3] = [ZoneKind::Low, ZoneKind::High, ZoneKind::Normal];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Low => "low",
            ZoneKind::High => "high",
            ZoneKind::Normal => "normal",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "low" => Some(ZoneKind::Low),
            "high" => Some(ZoneKind::High),
            "normal" => Some(ZoneKind::Normal),
            _ => None,
        }
    }
}

/// A resolved level item: either a solid/hazard obstacle or a gravity zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Obstacle(ObstacleKind),
    Zone(ZoneKind),
}

impl ItemKind {
    /// Name as written in level data
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Obstacle(kind) => kind.as_str(),
            ItemKind::Zone(ZoneKind::Low) => "portal_low",
            ItemKind::Zone(ZoneKind::High) => "portal_high",
            ItemKind::Zone(ZoneKind::Normal) => "portal_normal",
        }
    }
}

/// Hitbox shrink applied to a hazard's drawn footprint (makes spikes forgiving)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitboxInset {
    pub left: f32,
    pub top: f32,
    pub right: f32,
}

impl HitboxInset {
    pub const fn new(left: f32, top: f32, right: f32) -> Self {
        Self { left, top, right }
    }
}

/// How an obstacle interacts with the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollisionProfile {
    /// Supports landing; only fatal on deep penetration
    Platform,
    /// Any overlap with the (inset) hitbox is fatal
    Hazard {
        #[serde(default)]
        inset: HitboxInset,
    },
}

impl CollisionProfile {
    pub fn is_platform(&self) -> bool {
        matches!(self, CollisionProfile::Platform)
    }
}

/// Capability table entry for an obstacle kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleKindSpec {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    pub profile: CollisionProfile,
}

/// Capability table entry for a gravity zone kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityZoneKindSpec {
    pub kind: ZoneKind,
    /// Gravity multiplier applied on activation (must be > 0)
    pub multiplier: f32,
    /// Effect label shown while the zone's gravity is active
    pub label: String,
}

/// Obstacle and gravity zone tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub obstacles: Vec<ObstacleKindSpec>,
    pub zones: Vec<GravityZoneKindSpec>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            obstacles: vec![
                ObstacleKindSpec {
                    kind: ObstacleKind::Spike,
                    width: 40.0,
                    height: 40.0,
                    profile: CollisionProfile::Hazard {
                        inset: HitboxInset::new(10.0, 15.0, 10.0),
                    },
                },
                ObstacleKindSpec {
                    kind: ObstacleKind::Cube,
                    width: 40.0,
                    height: 40.0,
                    profile: CollisionProfile::Platform,
                },
                ObstacleKindSpec {
                    kind: ObstacleKind::LongSpike,
                    width: 80.0,
                    height: 40.0,
                    profile: CollisionProfile::Hazard {
                        inset: HitboxInset::new(15.0, 10.0, 15.0),
                    },
                },
                ObstacleKindSpec {
                    kind: ObstacleKind::MiniSpike,
                    width: 20.0,
                    height: 30.0,
                    profile: CollisionProfile::Hazard {
                        inset: HitboxInset::new(5.0, 10.0, 5.0),
                    },
                },
            ],
            zones: vec![
                GravityZoneKindSpec {
                    kind: ZoneKind::Low,
                    multiplier: 0.5,
                    label: "LOW GRAVITY".to_string(),
                },
                GravityZoneKindSpec {
                    kind: ZoneKind::High,
                    multiplier: 2.0,
                    label: "HIGH GRAVITY".to_string(),
                },
                GravityZoneKindSpec {
                    kind: ZoneKind::Normal,
                    multiplier: 1.0,
                    label: "NORMAL".to_string(),
                },
            ],
        }
    }
}

impl Catalog {
    /// Shared built-in tables
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(Catalog::default)
    }

    pub fn obstacle(&self, kind: ObstacleKind) -> Option<&ObstacleKindSpec> {
        self.obstacles.iter().find(|spec| spec.kind == kind)
    }

    pub fn zone(&self, kind: ZoneKind) -> Option<&GravityZoneKindSpec> {
        self.zones.iter().find(|spec| spec.kind == kind)
    }

    /// Obstacle spec for `kind`, falling back to the built-in table when this catalog lacks it
    pub fn obstacle_spec(&self, kind: ObstacleKind) -> &ObstacleKindSpec {
        match self.obstacle(kind) {
            Some(spec) => spec,
            None => Self::builtin()
                .obstacle(kind)
                .unwrap_or(&Self::builtin().obstacles[0]),
        }
    }

    /// Zone spec for `kind`, falling back to the built-in table when this catalog lacks it
    pub fn zone_spec(&self, kind: ZoneKind) -> &GravityZoneKindSpec {
        match self.zone(kind) {
            Some(spec) => spec,
            None => Self::builtin()
                .zone(kind)
                .unwrap_or(&Self::builtin().zones[0]),
        }
    }

    /// Resolve a level-data item name against this catalog.
    ///
    /// Returns `None` for unknown names and for kinds missing from the tables.
    pub fn resolve_kind(&self, name: &str) -> Option<ItemKind> {
        if let Some(key) = name.strip_prefix(ZONE_PREFIX) {
            let kind = ZoneKind::from_name(key)?;
            return self.zone(kind).map(|_| ItemKind::Zone(kind));
        }
        let kind = ObstacleKind::from_name(name)?;
        self.obstacle(kind).map(|_| ItemKind::Obstacle(kind))
    }

    /// Drop table entries that break catalog invariants.
    ///
    /// Zone multipliers must be finite and positive, obstacle dimensions positive, and each
    /// kind appears at most once (first entry wins).
    pub fn sanitized(mut self) -> Self {
        let mut seen_obstacles = Vec::new();
        self.obstacles.retain(|spec| {
            let valid = spec.width > 0.0 && spec.height > 0.0 && !seen_obstacles.contains(&spec.kind);
            if valid {
                seen_obstacles.push(spec.kind);
            } else {
                log::warn!("Dropping invalid obstacle spec {:?}", spec.kind);
            }
            valid
        });

        let mut seen_zones = Vec::new();
        self.zones.retain(|spec| {
            let valid = spec.multiplier.is_finite()
                && spec.multiplier > 0.0
                && !seen_zones.contains(&spec.kind);
            if valid {
                seen_zones.push(spec.kind);
            } else {
                log::warn!("Dropping invalid gravity zone spec {:?}", spec.kind);
            }
            valid
        });
        self
    }
}
