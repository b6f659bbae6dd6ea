use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Edition of the ASHRAE climate design data tables to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AshraeVersion {
    V2009,
    V2013,
    V2017,
    #[default]
    V2021,
}

impl AshraeVersion {
    /// Value sent as the `ashrae_version` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            AshraeVersion::V2009 => "2009",
            AshraeVersion::V2013 => "2013",
            AshraeVersion::V2017 => "2017",
            AshraeVersion::V2021 => "2021",
        }
    }

    pub const fn all() -> &'static [AshraeVersion] {
        &[
            AshraeVersion::V2009,
            AshraeVersion::V2013,
            AshraeVersion::V2017,
            AshraeVersion::V2021,
        ]
    }
}

impl fmt::Display for AshraeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AshraeVersion {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        match digits {
            "2009" => Ok(AshraeVersion::V2009),
            "2013" => Ok(AshraeVersion::V2013),
            "2017" => Ok(AshraeVersion::V2017),
            "2021" => Ok(AshraeVersion::V2021),
            _ => Err(anyhow::anyhow!(
                "Unknown ASHRAE version '{value}'. Supported versions: 2009, 2013, 2017, 2021."
            )),
        }
    }
}

impl FromStr for AshraeVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AshraeVersion::try_from(s)
    }
}

/// Unit system requested from the service through the `si_ip` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Si,
    Ip,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Si => "SI",
            UnitSystem::Ip => "IP",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Si, UnitSystem::Ip]
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "SI" => Ok(UnitSystem::Si),
            "IP" => Ok(UnitSystem::Ip),
            _ => Err(anyhow::anyhow!("Unknown unit system '{value}'. Supported: SI, IP.")),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::try_from(s)
    }
}

/// Latitude/longitude in degrees. Range checking is left to the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A station entry from a `meteo_stations` list.
///
/// Only the WMO identifier is typed; all other upstream fields are kept
/// as-is in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeteoStation {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub wmo: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MeteoStation {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// True when the service returned `{}` for this station.
    pub fn is_empty(&self) -> bool {
        self.wmo.is_none() && self.fields.is_empty()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number for wmo, got {other}"
        ))),
    }
}

/// Heating and cooling design dry-bulb temperatures for one station, in the
/// unit system that was requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignData {
    /// 99.6% heating design dry-bulb.
    #[serde(rename = "heating_DB_99.6")]
    pub heating_db_99_6: f64,

    /// 0.4% cooling design dry-bulb (with mean coincident wet-bulb).
    #[serde(rename = "cooling_DB_0.4")]
    pub cooling_db_0_4: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_as_str_roundtrip() {
        for v in AshraeVersion::all() {
            let parsed = AshraeVersion::try_from(v.as_str()).expect("roundtrip should succeed");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn version_wire_values_are_exact() {
        let values: Vec<_> = AshraeVersion::all().iter().map(|v| v.as_str()).collect();
        assert_eq!(values, ["2009", "2013", "2017", "2021"]);
    }

    #[test]
    fn version_accepts_v_prefix() {
        assert_eq!("v2017".parse::<AshraeVersion>().unwrap(), AshraeVersion::V2017);
        assert_eq!(AshraeVersion::default(), AshraeVersion::V2021);
    }

    #[test]
    fn unknown_version_error() {
        let err = AshraeVersion::try_from("2005").unwrap_err();
        assert!(err.to_string().contains("Unknown ASHRAE version"));
    }

    #[test]
    fn unit_system_parsing_is_case_insensitive() {
        assert_eq!("si".parse::<UnitSystem>().unwrap(), UnitSystem::Si);
        assert_eq!("IP".parse::<UnitSystem>().unwrap(), UnitSystem::Ip);
        assert!("metric".parse::<UnitSystem>().is_err());

        for u in UnitSystem::all() {
            assert_eq!(u.as_str().parse::<UnitSystem>().unwrap(), *u);
        }
    }

    #[test]
    fn station_keeps_extra_fields() {
        let station: MeteoStation =
            serde_json::from_str(r#"{"wmo":"071812","place":"PARIS","elev":"75"}"#).unwrap();

        assert_eq!(station.wmo.as_deref(), Some("071812"));
        assert_eq!(station.field("place"), Some(&Value::from("PARIS")));
        assert!(!station.is_empty());
    }

    #[test]
    fn station_numeric_wmo_becomes_string() {
        let station: MeteoStation = serde_json::from_str(r#"{"wmo":123456}"#).unwrap();
        assert_eq!(station.wmo.as_deref(), Some("123456"));
    }

    #[test]
    fn empty_station_object() {
        let station: MeteoStation = serde_json::from_str("{}").unwrap();
        assert!(station.is_empty());
        assert!(station.wmo.is_none());
    }

    #[test]
    fn design_data_serialises_with_upstream_style_keys() {
        let data = DesignData { heating_db_99_6: -10.5, cooling_db_0_4: 29.3 };
        let json = serde_json::to_value(data).unwrap();

        assert_eq!(json, serde_json::json!({"heating_DB_99.6": -10.5, "cooling_DB_0.4": 29.3}));
    }
}
