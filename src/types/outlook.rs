//! Component outlook types - per-component status predictions shown on the
//! maintenance dashboard.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Subsystem covered by the component outlook.
///
/// This set is wider than [`super::Component`]: it follows the dashboard's
/// prediction panel rather than the health-score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlookTarget {
    Gearbox,
    Bearings,
    Generator,
    Rotors,
    Blades,
    TemperatureSensors,
}

impl OutlookTarget {
    pub const ALL: [OutlookTarget; 6] = [
        OutlookTarget::Gearbox,
        OutlookTarget::Bearings,
        OutlookTarget::Generator,
        OutlookTarget::Rotors,
        OutlookTarget::Blades,
        OutlookTarget::TemperatureSensors,
    ];

    pub const fn display_name(self) -> &'static str {
        match self {
            OutlookTarget::Gearbox => "Gearbox",
            OutlookTarget::Bearings => "Bearings",
            OutlookTarget::Generator => "Generator",
            OutlookTarget::Rotors => "Rotors",
            OutlookTarget::Blades => "Blades",
            OutlookTarget::TemperatureSensors => "Temperature Sensors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlookStatus {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPrediction {
    pub status: OutlookStatus,
    pub message: String,
    /// Percentage string, e.g. "76%"
    pub confidence: String,
    /// Data-period label, e.g. "30 days of logs"
    pub based_on: String,
}

/// Predictions for every outlook target, in [`OutlookTarget::ALL`] order.
///
/// Serializes as an ordered object keyed by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentOutlook {
    entries: Vec<(OutlookTarget, ComponentPrediction)>,
}

impl ComponentOutlook {
    pub fn push(&mut self, target: OutlookTarget, prediction: ComponentPrediction) {
        self.entries.push((target, prediction));
    }

    pub fn get(&self, target: OutlookTarget) -> Option<&ComponentPrediction> {
        self.entries
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(OutlookTarget, ComponentPrediction)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ComponentOutlook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (target, prediction) in &self.entries {
            map.serialize_entry(target.display_name(), prediction)?;
        }
        map.end()
    }
}
