//! Empirical NPK estimates from topsoil properties.
//!
//! These are rough heuristics, not agronomy. The arithmetic is kept exactly
//! as the dashboard has always shown it:
//! - nitrogen   = round(ocd * 50) mg/kg
//! - phosphorus = round(30 + (pH - 5.5) * 15) mg/kg
//! - potassium  = round(cec * 390 * (0.05 if clay > 35 else 0.03)) mg/kg
//!
//! `round` breaks ties toward positive infinity. A missing reading only
//! blanks the values computed from it; a missing clay reading compares as
//! "not above 35" and selects the 0.03 factor.

use serde::Serialize;

use crate::types::{SoilProperty, SoilResponse, SoilTexture};

/// Shown in place of a value that could not be derived
pub const UNAVAILABLE: &str = "unavailable";

const SANDY_ABOVE_PCT: f64 = 70.0;
const CLAY_ABOVE_PCT: f64 = 35.0;

/// Topsoil readings at the 0-5cm band, already divided into conventional units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoilReadings {
    pub ph: Option<f64>,
    pub organic_carbon_density: Option<f64>,
    pub cec: Option<f64>,
    pub sand: Option<f64>,
    pub clay: Option<f64>,
}

impl SoilReadings {
    pub fn from_response(response: &SoilResponse) -> Self {
        let readings = Self {
            ph: response.property(SoilProperty::Ph),
            organic_carbon_density: response.property(SoilProperty::OrganicCarbonDensity),
            cec: response.property(SoilProperty::Cec),
            sand: response.property(SoilProperty::Sand),
            clay: response.property(SoilProperty::Clay),
        };
        for property in SoilProperty::ALL {
            if readings.get(property).is_none() {
                tracing::warn!("Soil property {} unavailable at 0-5cm", property.layer_name());
            }
        }
        readings
    }

    pub fn get(&self, property: SoilProperty) -> Option<f64> {
        match property {
            SoilProperty::Ph => self.ph,
            SoilProperty::OrganicCarbonDensity => self.organic_carbon_density,
            SoilProperty::Cec => self.cec,
            SoilProperty::Sand => self.sand,
            SoilProperty::Clay => self.clay,
        }
    }
}

/// Display-ready soil estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutrientEstimate {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub ph: String,
    pub texture: SoilTexture,
}

pub fn nitrogen_mg_per_kg(organic_carbon_density: Option<f64>) -> Option<i64> {
    organic_carbon_density.map(|ocd| round_half_up(ocd * 50.0) as i64)
}

pub fn phosphorus_mg_per_kg(ph: Option<f64>) -> Option<i64> {
    ph.map(|ph| round_half_up(30.0 + (ph - 5.5) * 15.0) as i64)
}

pub fn potassium_mg_per_kg(cec: Option<f64>, clay: Option<f64>) -> Option<i64> {
    let factor = if above(clay, CLAY_ABOVE_PCT) { 0.05 } else { 0.03 };
    cec.map(|cec| round_half_up(cec * 390.0 * factor) as i64)
}

/// First match wins: sandy, then clay, then loamy
pub fn classify_texture(sand: Option<f64>, clay: Option<f64>) -> SoilTexture {
    if above(sand, SANDY_ABOVE_PCT) {
        SoilTexture::Sandy
    } else if above(clay, CLAY_ABOVE_PCT) {
        SoilTexture::Clay
    } else {
        SoilTexture::Loamy
    }
}

/// Derive the full estimate; each field degrades independently
pub fn estimate(readings: &SoilReadings) -> NutrientEstimate {
    NutrientEstimate {
        nitrogen: mg_per_kg(nitrogen_mg_per_kg(readings.organic_carbon_density)),
        phosphorus: mg_per_kg(phosphorus_mg_per_kg(readings.ph)),
        potassium: mg_per_kg(potassium_mg_per_kg(readings.cec, readings.clay)),
        ph: readings
            .ph
            .map(format_one_decimal)
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        texture: classify_texture(readings.sand, readings.clay),
    }
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn mg_per_kg(value: Option<i64>) -> String {
    match value {
        Some(v) => format!("{} mg/kg", v),
        None => UNAVAILABLE.to_string(),
    }
}

/// Nearest integer, ties toward positive infinity
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// One decimal place; exact ties round away from zero
fn format_one_decimal(x: f64) -> String {
    if x == 0.0 {
        return "0.0".to_string();
    }
    // Only .25 / .75 fractions are exact ties at one decimal in binary
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let tenths = (x.abs() * 10.0 + 0.5).floor() as i64;
        let sign = if x < 0.0 { "-" } else { "" };
        return format!("{}{}.{}", sign, tenths / 10, tenths % 10);
    }
    format!("{:.1}", x)
}
