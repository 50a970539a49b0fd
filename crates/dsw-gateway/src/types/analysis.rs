//! Statistics types (`/api/analyze/stats`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/analyze/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRequest {
    pub table_name: String,
    pub column: String,
    /// Analysis wire name: `distribution`, `missing`, `outlier` or `dupes`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl StatsRequest {
    pub fn new(
        table_name: impl Into<String>,
        column: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column: column.into(),
            kind: kind.into(),
        }
    }
}

/// How the payload should be charted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Histogram,
    Heatmap,
    Scalar,
    #[default]
    #[serde(other)]
    None,
}

/// One data series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Summary statistics for the probed column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    pub count: u64,
    pub missing: u64,
    pub mean: f64,
    pub std: f64,
    /// Column minimum; numeric or text depending on the column.
    pub min: Value,
    pub max: Value,
}

/// Axis and series arrays of a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsData {
    #[serde(rename = "xAxis")]
    pub x_axis: Vec<Value>,
    #[serde(rename = "yAxis", skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Vec<Value>>,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StatsSummary>,
}

/// A labelled value of the first series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: Option<f64>,
}

/// Response of `POST /api/analyze/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub title: String,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub data: StatsData,
}

impl StatsResponse {
    /// Pair every x-axis label with the matching value of the first series.
    pub fn points(&self) -> Vec<ChartPoint> {
        let values = self.data.series.first().map(|s| s.data.as_slice()).unwrap_or_default();
        self.data
            .x_axis
            .iter()
            .enumerate()
            .map(|(idx, label)| ChartPoint {
                label: label_text(label),
                value: values.get(idx).and_then(Value::as_f64),
            })
            .collect()
    }

    pub fn is_heatmap(&self) -> bool {
        self.chart_type == ChartType::Heatmap
    }

    pub fn summary(&self) -> Option<&StatsSummary> {
        self.data.summary.as_ref()
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
