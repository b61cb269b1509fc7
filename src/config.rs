use anyhow::Result;
use serde::Deserialize;

/// Display settings for the dashboard report.
///
/// Stored as a JSON object on disk; every key is optional:
/// ```json
/// {
///   "trend_years": 3,
///   "top_stations": 10,
///   "top_routes": 10,
///   "preview_rows": 100
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    /// Most recent years shown in monthly trends when no year is selected.
    #[serde(default = "DashboardConfig::default_trend_years")]
    pub trend_years: usize,
    /// Rows in the busiest-stations table.
    #[serde(default = "DashboardConfig::default_top_stations")]
    pub top_stations: usize,
    /// Rows in route and fare rankings of the text report.
    #[serde(default = "DashboardConfig::default_top_routes")]
    pub top_routes: usize,
    /// Records in the data preview.
    #[serde(default = "DashboardConfig::default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            trend_years: Self::default_trend_years(),
            top_stations: Self::default_top_stations(),
            top_routes: Self::default_top_routes(),
            preview_rows: Self::default_preview_rows(),
        }
    }
}

impl DashboardConfig {
    fn default_trend_years() -> usize {
        3
    }
    fn default_top_stations() -> usize {
        10
    }
    fn default_top_routes() -> usize {
        10
    }
    fn default_preview_rows() -> usize {
        100
    }

    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.trend_years, 3);
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_json(r#"{"trend_years": 5}"#).unwrap();
        assert_eq!(config.trend_years, 5);
        assert_eq!(config.preview_rows, 100);
    }

    #[test]
    fn test_invalid_json() {
        assert!(DashboardConfig::from_json("{trend_years: }").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(DashboardConfig::load("/nonexistent/ridership_config.json").is_err());
    }
}
