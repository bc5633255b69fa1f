//! SDMX-JSON observation payload -> `SeriesRecord`.
//!
//! Only the narrow shape served with `dimensionAtObservation=AllDimensions`
//! is handled:
//!
//! ```text
//! data.structure.dimensions.observation[] = { id, values: [{ id }, ...] }
//! data.dataSets[0].observations = { "0:0:0:0:3": [11127.9, ...], ... }
//! ```
//!
//! Each observation key is a colon-joined list of indices, one per
//! observation dimension. The time dimension index resolves to a `YYYY-MM`
//! label. Any structural anomaly is reported as a `SourceError` so the caller
//! can substitute the manual series; nothing here panics on bad input.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::data::source::SourceError;
use crate::domain::{ObservationPoint, Period, SeriesRecord, SourceTag};

#[derive(Debug, Deserialize)]
struct Message {
    data: Option<MessageData>,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    structure: Option<Structure>,
    /// SDMX-JSON 2.0 nests the structure in an array.
    #[serde(default)]
    structures: Vec<Structure>,
    #[serde(default, rename = "dataSets")]
    data_sets: Vec<DataSet>,
}

#[derive(Debug, Deserialize)]
struct Structure {
    #[serde(default)]
    dimensions: Dimensions,
}

#[derive(Debug, Default, Deserialize)]
struct Dimensions {
    #[serde(default)]
    observation: Vec<Dimension>,
}

#[derive(Debug, Deserialize)]
struct Dimension {
    #[serde(default)]
    id: String,
    #[serde(default)]
    values: Vec<DimensionValue>,
}

#[derive(Debug, Deserialize)]
struct DimensionValue {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DataSet {
    #[serde(default)]
    observations: BTreeMap<String, Value>,
}

/// Parse a response body.
pub fn normalize(body: &str) -> Result<SeriesRecord, SourceError> {
    let message: Message = serde_json::from_str(body)
        .map_err(|e| SourceError::MalformedPayload(format!("invalid SDMX-JSON: {e}")))?;
    normalize_message(message)
}

/// Parse an already-decoded JSON document.
pub fn normalize_value(payload: Value) -> Result<SeriesRecord, SourceError> {
    let message: Message = serde_json::from_value(payload)
        .map_err(|e| SourceError::MalformedPayload(format!("invalid SDMX-JSON: {e}")))?;
    normalize_message(message)
}

fn normalize_message(message: Message) -> Result<SeriesRecord, SourceError> {
    let data = message
        .data
        .ok_or_else(|| SourceError::MalformedPayload("missing `data`".to_string()))?;

    let structure = data
        .structure
        .or_else(|| data.structures.into_iter().next())
        .ok_or_else(|| SourceError::MalformedPayload("missing `data.structure`".to_string()))?;
    let dimensions = structure.dimensions.observation;

    let time_idx = dimensions
        .iter()
        .position(|d| d.id.to_uppercase().contains("TIME"))
        .ok_or_else(|| SourceError::MalformedPayload("no time dimension".to_string()))?;
    let time_values = &dimensions[time_idx].values;

    let data_set = data
        .data_sets
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::MalformedPayload("no data sets".to_string()))?;
    if data_set.observations.is_empty() {
        return Err(SourceError::EmptyResult);
    }

    // (series key without the time index, period, value)
    let mut parsed: Vec<(Vec<usize>, Period, f64)> = Vec::with_capacity(data_set.observations.len());
    for (key, raw) in &data_set.observations {
        let indices = parse_coordinate(key)?;
        let Some(&time_code) = indices.get(time_idx) else {
            return Err(malformed_key(key, "missing time index"));
        };
        let label = time_values
            .get(time_code)
            .ok_or_else(|| malformed_key(key, "time index out of range"))?;
        let period: Period = label
            .id
            .parse()
            .map_err(|e| SourceError::MalformedPayload(format!("{e} at '{key}'")))?;

        let Some(value) = observation_value(raw).ok_or_else(|| malformed_key(key, "non-numeric value"))? else {
            continue;
        };

        let mut series_key = indices;
        series_key.remove(time_idx);
        parsed.push((series_key, period, value));
    }

    // Several measures may share the time axis; keep the first series.
    let Some(selected) = parsed.iter().map(|(k, _, _)| k.clone()).min() else {
        return Err(SourceError::EmptyResult);
    };
    let total = parsed.len();
    let points: Vec<ObservationPoint> = parsed
        .into_iter()
        .filter(|(k, _, _)| *k == selected)
        .map(|(_, period, value)| ObservationPoint { period, value })
        .collect();
    if points.len() < total {
        debug!(
            kept = points.len(),
            dropped = total - points.len(),
            series = ?selected,
            "payload carries several series; using the first"
        );
    }

    SeriesRecord::new(points, SourceTag::Api).map_err(|e| SourceError::MalformedPayload(e.to_string()))
}

fn parse_coordinate(key: &str) -> Result<Vec<usize>, SourceError> {
    key.split(':')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| malformed_key(key, "non-numeric index"))
}

fn malformed_key(key: &str, reason: &str) -> SourceError {
    SourceError::MalformedPayload(format!("malformed coordinate '{key}': {reason}"))
}

/// `Some(None)` for a null observation, `None` when the value is unusable.
fn observation_value(raw: &Value) -> Option<Option<f64>> {
    let scalar = match raw {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    };
    match scalar {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(Some),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).map(Some),
        _ => None,
    }
}
