use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::snapshot::IndicatorValue;

/// Backend time series: decimal millisecond timestamp string → value.
///
/// Key order carries no meaning; the adapter imposes timestamp order.
/// Values may be `null` where the backend had no sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTimeSeries(pub HashMap<String, Option<f64>>);

impl RawTimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<f64>)> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RawTimeSeries {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), Some(v))).collect())
    }
}

/// A single (timestamp, value) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Unix milliseconds
    pub timestamp: i64,
    pub value: f64,
}

/// Timestamp-ordered samples. Timestamps are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointSeries(Vec<DataPoint>);

impl PointSeries {
    /// Caller guarantees strictly increasing timestamps.
    pub(crate) fn from_sorted(points: Vec<DataPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self(points)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn timestamps(&self) -> Vec<i64> {
        self.0.iter().map(|p| p.timestamp).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.value).collect()
    }
}

/// The fixed palette the builders draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    CornflowerBlue,
    Orange,
    SeaGreen,
    Green,
    DarkGreen,
    DarkOrange,
    Red,
}

impl NamedColor {
    /// CSS color name, as understood by most chart renderers.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedColor::CornflowerBlue => "cornflowerblue",
            NamedColor::Orange => "orange",
            NamedColor::SeaGreen => "seagreen",
            NamedColor::Green => "green",
            NamedColor::DarkGreen => "darkgreen",
            NamedColor::DarkOrange => "darkorange",
            NamedColor::Red => "red",
        }
    }
}

impl std::fmt::Display for NamedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a series is colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    /// One color for the whole series.
    Uniform(NamedColor),
    /// One color per data point, index-aligned with the series data.
    PerPoint(Vec<NamedColor>),
    /// Leave it to the renderer's default palette.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: SeriesColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
    Pie,
    Indicator,
    MarkerOverlay,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Line => write!(f, "Line"),
            SeriesKind::Bar => write!(f, "Bar"),
            SeriesKind::Pie => write!(f, "Pie"),
            SeriesKind::Indicator => write!(f, "Indicator"),
            SeriesKind::MarkerOverlay => write!(f, "Marker overlay"),
        }
    }
}

/// One labeled slice of a pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub label: String,
    pub size: f64,
}

/// A discrete marker on a price timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPoint {
    /// Unix milliseconds
    pub timestamp: i64,
    pub value: f64,
    /// Hover / annotation text
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SeriesData {
    Points(PointSeries),
    Categories(Vec<CategorySlice>),
    Indicator(IndicatorValue),
    Markers(Vec<MarkerPoint>),
}

/// A named, styled series ready for a chart renderer.
///
/// Only the builders in `services` create these; everything else reads them.
/// Serialize-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    kind: SeriesKind,
    name: String,
    data: SeriesData,
    style: SeriesStyle,
}

impl ChartSeries {
    pub(crate) fn new(
        kind: SeriesKind,
        name: impl Into<String>,
        data: SeriesData,
        color: SeriesColor,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            data,
            style: SeriesStyle { color },
        }
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    pub fn style(&self) -> &SeriesStyle {
        &self.style
    }

    /// The point data for line/bar series.
    pub fn points(&self) -> Option<&PointSeries> {
        match &self.data {
            SeriesData::Points(p) => Some(p),
            _ => None,
        }
    }

    /// The slices of a pie series.
    pub fn categories(&self) -> Option<&[CategorySlice]> {
        match &self.data {
            SeriesData::Categories(c) => Some(c),
            _ => None,
        }
    }

    /// The markers of an overlay series.
    pub fn markers(&self) -> Option<&[MarkerPoint]> {
        match &self.data {
            SeriesData::Markers(m) => Some(m),
            _ => None,
        }
    }

    /// Number of plotted elements (points, slices, markers; 1 for an indicator).
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Points(p) => p.len(),
            SeriesData::Categories(c) => c.len(),
            SeriesData::Indicator(_) => 1,
            SeriesData::Markers(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
