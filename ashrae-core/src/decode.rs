//! Response body decoding shared by both lookups.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{DecodeError, FetchError},
    model::{DesignData, MeteoStation},
};

const BOM: char = '\u{feff}';

pub const HEATING_FIELD: &str = "heating_DB_99.6";
pub const COOLING_FIELD: &str = "cooling_DB_MCWB_0.4_DB";

/// Drop a single leading byte-order mark, if there is one.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

#[derive(Debug, Deserialize)]
struct StationsEnvelope {
    #[serde(default)]
    meteo_stations: Option<Value>,
}

/// Parse the `meteo_stations` list out of a response body.
///
/// A missing or `null` list, or an empty object in its place, decodes as
/// empty. `null` entries decode as `T::default()`.
pub fn decode_stations<T>(body: &str) -> Result<Vec<T>, DecodeError>
where
    T: DeserializeOwned + Default,
{
    let decode_err = |e: serde_json::Error| DecodeError {
        message: e.to_string(),
        body: body.to_string(),
    };

    let envelope: StationsEnvelope = serde_json::from_str(strip_bom(body)).map_err(decode_err)?;

    let list = match envelope.meteo_stations {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) if map.is_empty() => return Ok(Vec::new()),
        Some(list) => list,
    };

    let stations: Vec<Option<T>> = serde_json::from_value(list).map_err(decode_err)?;
    Ok(stations.into_iter().map(Option::unwrap_or_default).collect())
}

/// Read both design temperatures from a design-parameters station record.
pub fn extract_design_data(station: &MeteoStation) -> Result<DesignData, FetchError> {
    Ok(DesignData {
        heating_db_99_6: number_field(station, HEATING_FIELD)?,
        cooling_db_0_4: number_field(station, COOLING_FIELD)?,
    })
}

fn number_field(station: &MeteoStation, field: &'static str) -> Result<f64, FetchError> {
    match station.field(field) {
        None | Some(Value::Null) => Err(FetchError::MissingField { field }),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| FetchError::InvalidNumber { field, value: n.to_string() }),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::InvalidNumber { field, value: s.clone() }),
        Some(other) => Err(FetchError::InvalidNumber { field, value: other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(json: &str) -> MeteoStation {
        serde_json::from_str(json).expect("test station JSON must parse")
    }

    #[test]
    fn strip_bom_removes_leading_mark() {
        assert_eq!(strip_bom("\u{feff}{}"), "{}");
    }

    #[test]
    fn strip_bom_is_idempotent() {
        let once = strip_bom("\u{feff}{\"a\":1}");
        assert_eq!(strip_bom(once), once);
    }

    #[test]
    fn strip_bom_leaves_plain_text_alone() {
        assert_eq!(strip_bom("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_bom(""), "");
    }

    #[test]
    fn decode_stations_handles_bom_prefixed_body() {
        let stations: Vec<MeteoStation> =
            decode_stations("\u{feff}{\"meteo_stations\":[{\"wmo\":\"123456\"}]}").unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].wmo.as_deref(), Some("123456"));
    }

    #[test]
    fn decode_stations_missing_or_null_list_is_empty() {
        let missing: Vec<MeteoStation> = decode_stations("{}").unwrap();
        let null: Vec<MeteoStation> = decode_stations("{\"meteo_stations\":null}").unwrap();

        assert!(missing.is_empty());
        assert!(null.is_empty());
    }

    #[test]
    fn decode_stations_empty_object_is_empty() {
        let stations: Vec<MeteoStation> = decode_stations("{\"meteo_stations\":{}}").unwrap();
        assert!(stations.is_empty());
    }

    #[test]
    fn decode_stations_null_entry_is_default_station() {
        let stations: Vec<MeteoStation> =
            decode_stations("{\"meteo_stations\":[null,{\"wmo\":\"1\"}]}").unwrap();

        assert_eq!(stations.len(), 2);
        assert!(stations[0].is_empty());
        assert_eq!(stations[1].wmo.as_deref(), Some("1"));
    }

    #[test]
    fn decode_stations_rejects_non_empty_object() {
        let err =
            decode_stations::<MeteoStation>("{\"meteo_stations\":{\"0\":{\"wmo\":\"1\"}}}")
                .unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn decode_stations_rejects_html() {
        let err = decode_stations::<MeteoStation>("<html>oops</html>").unwrap_err();

        assert_eq!(err.body, "<html>oops</html>");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn extract_reads_numeric_strings() {
        let s = station(r#"{"heating_DB_99.6":"-10.5","cooling_DB_MCWB_0.4_DB":" 29.3 "}"#);
        let data = extract_design_data(&s).unwrap();

        assert_eq!(data.heating_db_99_6, -10.5);
        assert_eq!(data.cooling_db_0_4, 29.3);
    }

    #[test]
    fn extract_reads_json_numbers() {
        let s = station(r#"{"heating_DB_99.6":-3,"cooling_DB_MCWB_0.4_DB":31.25}"#);
        let data = extract_design_data(&s).unwrap();

        assert_eq!(data.heating_db_99_6, -3.0);
        assert_eq!(data.cooling_db_0_4, 31.25);
    }

    #[test]
    fn extract_reports_missing_heating_field() {
        let s = station(r#"{"cooling_DB_MCWB_0.4_DB":"29.3"}"#);
        let err = extract_design_data(&s).unwrap_err();

        assert!(matches!(err, FetchError::MissingField { field: HEATING_FIELD }));
    }

    #[test]
    fn extract_reports_unparseable_value() {
        let s = station(r#"{"heating_DB_99.6":"n/a","cooling_DB_MCWB_0.4_DB":"29.3"}"#);
        let err = extract_design_data(&s).unwrap_err();

        match err {
            FetchError::InvalidNumber { field, value } => {
                assert_eq!(field, HEATING_FIELD);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
