//! SensorReading and the SensorField selector used by config tables.

use serde::{Deserialize, Serialize};

/// One snapshot of turbine sensor measurements.
///
/// Constructed per request and never mutated afterwards. Units follow the
/// SCADA export: speeds in m/s, power in kW, temperatures in °C, angles in
/// degrees, voltages in V, currents in A, oil pressure in bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub wind_speed: f64,
    pub power_output: f64,
    pub rotor_rpm: f64,
    pub nacelle_temp: f64,
    pub gear_oil_temp: f64,
    pub generator_temp: f64,
    pub blade_pitch: f64,
    pub yaw_angle: f64,
    pub voltage_l1: f64,
    pub voltage_l2: f64,
    pub voltage_l3: f64,
    pub current_l1: f64,
    pub current_l2: f64,
    pub current_l3: f64,
    pub gear_oil_pressure: f64,
    pub ambient_temp: f64,
    pub humidity: f64,
    pub wind_direction: f64,
    /// Acquisition time as reported by the source (free-form, usually RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SensorReading {
    /// Read a single measurement by field selector.
    pub fn get(&self, field: SensorField) -> f64 {
        field.value(self)
    }
}

/// Named measurement of a [`SensorReading`].
///
/// Used wherever configuration needs to point at a reading field
/// (health factor tables, outlook factors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorField {
    WindSpeed,
    PowerOutput,
    RotorRpm,
    NacelleTemp,
    GearOilTemp,
    GeneratorTemp,
    BladePitch,
    YawAngle,
    VoltageL1,
    VoltageL2,
    VoltageL3,
    CurrentL1,
    CurrentL2,
    CurrentL3,
    GearOilPressure,
    AmbientTemp,
    Humidity,
    WindDirection,
}

impl SensorField {
    pub fn value(self, r: &SensorReading) -> f64 {
        match self {
            Self::WindSpeed => r.wind_speed,
            Self::PowerOutput => r.power_output,
            Self::RotorRpm => r.rotor_rpm,
            Self::NacelleTemp => r.nacelle_temp,
            Self::GearOilTemp => r.gear_oil_temp,
            Self::GeneratorTemp => r.generator_temp,
            Self::BladePitch => r.blade_pitch,
            Self::YawAngle => r.yaw_angle,
            Self::VoltageL1 => r.voltage_l1,
            Self::VoltageL2 => r.voltage_l2,
            Self::VoltageL3 => r.voltage_l3,
            Self::CurrentL1 => r.current_l1,
            Self::CurrentL2 => r.current_l2,
            Self::CurrentL3 => r.current_l3,
            Self::GearOilPressure => r.gear_oil_pressure,
            Self::AmbientTemp => r.ambient_temp,
            Self::Humidity => r.humidity,
            Self::WindDirection => r.wind_direction,
        }
    }
}
