use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Daily climate records for a single point, index-aligned across the three arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClimateSeries {
    pub dates: Vec<String>,
    pub temperatures: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
}

impl RawClimateSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainfallTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl RainfallTrend {
    pub fn label(self) -> &'static str {
        match self {
            RainfallTrend::Increasing => "increasing",
            RainfallTrend::Decreasing => "decreasing",
            RainfallTrend::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSignals {
    pub temperature_trend: f64,
    pub hot_days_count: u32,
    pub rainfall_trend: RainfallTrend,
    pub avg_temp_current: f64,
    pub avg_temp_future: f64,
    pub avg_rainfall_current: f64,
    pub avg_rainfall_future: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Heat,
    Water,
    Energy,
    Lifestyle,
    Community,
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Category::Heat => "heat",
            Category::Water => "water",
            Category::Energy => "energy",
            Category::Lifestyle => "lifestyle",
            Category::Community => "community",
        }
    }

    /// Heading used when rendering a category group.
    pub fn heading(self) -> &'static str {
        match self {
            Category::Heat => "Heat protection",
            Category::Water => "Water",
            Category::Energy => "Energy",
            Category::Lifestyle => "Lifestyle",
            Category::Community => "Community",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub category: Category,
    pub icon: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionGroup {
    pub category: Category,
    pub actions: Vec<Action>,
}

/// Actions bucketed by category, buckets in first-appearance order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategorizedActions {
    pub groups: Vec<ActionGroup>,
}

impl CategorizedActions {
    pub fn get(&self, category: Category) -> Option<&[Action]> {
        self.groups
            .iter()
            .find(|group| group.category == category)
            .map(|group| group.actions.as_slice())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.groups.iter().map(|group| group.category).collect()
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.actions.len()).sum()
    }
}

// Serialized as a JSON object keyed by category, keys in bucket order.
impl Serialize for CategorizedActions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.category.key(), &group.actions)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureDisplay {
    pub current: String,
    pub future: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotDaysDisplay {
    pub count: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallDisplay {
    pub trend: RainfallTrend,
    pub current: String,
    pub future: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSignals {
    pub temperature: TemperatureDisplay,
    pub hot_days: HotDaysDisplay,
    pub rainfall: RainfallDisplay,
}
