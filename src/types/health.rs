//! Component health types: Component, Trend, ComponentHealth, ComponentHealthSet,
//! and the deterministic PenaltyHealthReport.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Physical component scored by the ML-blended health model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    MainBearing,
    Gearbox,
    Generator,
    PowerElectronics,
    BladeSystem,
    ControlSystem,
}

impl Component {
    /// Every component, in the default table order.
    pub const ALL: [Component; 6] = [
        Component::MainBearing,
        Component::Gearbox,
        Component::Generator,
        Component::PowerElectronics,
        Component::BladeSystem,
        Component::ControlSystem,
    ];

    /// Operator-facing name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Component::MainBearing => "Main Bearing",
            Component::Gearbox => "Gearbox",
            Component::Generator => "Generator",
            Component::PowerElectronics => "Power Electronics",
            Component::BladeSystem => "Blade System",
            Component::ControlSystem => "Control System",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Direction of a component's score since the previous cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    Stable,
    Improving,
    Declining,
}

impl Trend {
    /// Classify a score delta. Anything inside the dead band is stable.
    pub fn from_delta(delta: f64, dead_band: f64) -> Self {
        if delta.abs() < dead_band {
            Trend::Stable
        } else if delta > 0.0 {
            Trend::Improving
        } else {
            Trend::Declining
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Stable => write!(f, "stable"),
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
        }
    }
}

/// Health of one component for the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub component: Component,
    /// 0-100
    pub score: u8,
    pub trend: Trend,
}

/// Health of every scored component, in component-table order.
///
/// Serializes as an ordered JSON object keyed by display name:
/// `{"Main Bearing": {"score": 95, "trend": "stable"}, ...}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentHealthSet {
    entries: Vec<ComponentHealth>,
}

impl ComponentHealthSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ComponentHealth) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentHealth> {
        self.entries.iter()
    }

    pub fn get(&self, component: Component) -> Option<&ComponentHealth> {
        self.entries.iter().find(|e| e.component == component)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean score, or `None` for an empty set.
    pub fn average_score(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: f64 = self.entries.iter().map(|e| f64::from(e.score)).sum();
        Some(total / self.entries.len() as f64)
    }
}

impl FromIterator<ComponentHealth> for ComponentHealthSet {
    fn from_iter<I: IntoIterator<Item = ComponentHealth>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ComponentHealthSet {
    type Item = &'a ComponentHealth;
    type IntoIter = std::slice::Iter<'a, ComponentHealth>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Serialize)]
struct HealthEntryView {
    score: u8,
    trend: Trend,
}

impl Serialize for ComponentHealthSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(
                e.component.display_name(),
                &HealthEntryView {
                    score: e.score,
                    trend: e.trend,
                },
            )?;
        }
        map.end()
    }
}

/// Output of the deterministic threshold-penalty health model.
///
/// Each component starts at 100 and loses fixed points per breached limit;
/// `overall` is the mean of the four component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyHealthReport {
    pub gearbox: f64,
    pub generator: f64,
    pub blades: f64,
    pub nacelle: f64,
    pub overall: f64,
}

impl PenaltyHealthReport {
    /// Component scores keyed the way RUL baselines are keyed (excludes `overall`).
    pub fn component_scores(&self) -> [(&'static str, f64); 4] {
        [
            ("gearbox", self.gearbox),
            ("generator", self.generator),
            ("blades", self.blades),
            ("nacelle", self.nacelle),
        ]
    }
}
