//! Forecast types shared by the live fetcher and the synthetic generator

use serde::{Deserialize, Serialize};

/// Every destination carries exactly three forecast days (today + 2),
/// regardless of whether the data is live or synthetic.
pub type DailyForecast = [ForecastDay; 3];

/// One day of forecast data for a destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Short weekday label, e.g. "Mon"
    pub day: String,
    /// Temperature in Celsius, rounded to the nearest degree
    pub temp_c: i32,
    /// Clear-sky bucket (provider condition code >= 800)
    pub sunny: bool,
    /// Condition group, e.g. "Clear", "Clouds"
    pub condition: String,
    /// Provider icon identifier, e.g. "01d"
    pub icon: String,
    /// Set on the first synthetic day only; describes why live data
    /// was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ForecastDay {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temp_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature() {
        let day = ForecastDay {
            day: "Mon".to_string(),
            temp_c: 24,
            sunny: true,
            condition: "Clear".to_string(),
            icon: "01d".to_string(),
            error_message: None,
        };
        assert_eq!(day.format_temperature(), "24°C");
    }
}
