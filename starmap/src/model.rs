use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Effective temperature of the Sun, Kelvin.
pub const SUN_TEMPERATURE_K: f64 = 5778.0;
/// Reference radius for size comparisons, in Earth radii.
pub const EARTH_RADIUS: f64 = 1.0;
/// Sun radius in Earth radii.
pub const SUN_RADIUS_EARTHS: f64 = 109.0;

pub const CENTRAL_NAME: &str = "Solar System";

/// One star/planet row of the dataset.
///
/// Field names follow the dataset columns. Numeric columns accept JSON numbers
/// or numeric strings; anything else (missing, `null`, garbage) is `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "pl_name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub host_star: Option<String>,
    #[serde(rename = "st_spectype", default, deserialize_with = "lenient_string")]
    pub spectral_type: Option<String>,
    #[serde(rename = "pl_orbital_period", default, deserialize_with = "lenient_f64")]
    pub orbital_period_days: Option<f64>,
    #[serde(rename = "pl_radius", default, deserialize_with = "lenient_f64")]
    pub radius_earths: Option<f64>,
    #[serde(rename = "pl_mass", default, deserialize_with = "lenient_f64")]
    pub mass_earths: Option<f64>,
    #[serde(rename = "to_star_distance", default, deserialize_with = "lenient_f64")]
    pub distance_ly: Option<f64>,
    #[serde(rename = "equilibrium_temperature_pl", default, deserialize_with = "lenient_f64")]
    pub equilibrium_temp_k: Option<f64>,
    #[serde(rename = "star_effective_temperature", default, deserialize_with = "lenient_f64")]
    pub star_temp_k: Option<f64>,
    #[serde(rename = "st_mass", default, deserialize_with = "lenient_f64")]
    pub star_mass_suns: Option<f64>,
}

impl EntityRecord {
    /// The fixed reference body drawn at the origin. Never part of the dataset.
    pub fn central_body() -> Self {
        Self {
            name: Some(CENTRAL_NAME.to_string()),
            host_star: Some("Sun".to_string()),
            spectral_type: Some("G2 V".to_string()),
            orbital_period_days: Some(365.25),
            radius_earths: Some(SUN_RADIUS_EARTHS),
            mass_earths: Some(333_000.0),
            distance_ly: Some(0.0),
            equilibrium_temp_k: Some(SUN_TEMPERATURE_K),
            star_temp_k: Some(SUN_TEMPERATURE_K),
            star_mass_suns: Some(1.0),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }

    pub fn host_name(&self) -> &str {
        self.host_star.as_deref().unwrap_or("Unknown")
    }
}

/// Identifies a pickable body: the central body or an index into the placed list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityId {
    Central,
    Placed(usize),
}

fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
