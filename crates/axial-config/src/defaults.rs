//! Default values.

use crate::schema::*;

impl Default for Config {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            reference: ReferenceConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 12 x 8 inch figure at 100 dpi
        Self {
            width: 1200,
            height: 800,
            background_color: "#ffffff".to_string(),
            right_eye_color: "#1f77b4".to_string(),
            left_eye_color: "#2ca02c".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 28,
            label_font_size: 20,
            legend_font_size: 16,
            show_grid: true,
            show_legend: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            pretty: false,
            spans: false,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_chart_matches_figure_size() {
        let chart = ChartConfig::default();
        assert_eq!((chart.width, chart.height), (1200, 800));
        assert_ne!(chart.right_eye_color, chart.left_eye_color);
    }

    #[test]
    fn test_logging_settings_reach_subscriber_config() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            pretty: true,
            spans: true,
            ..LoggingSettings::default()
        };
        let logging = settings.to_logging_config();
        assert_eq!(logging.level, "debug");
        assert!(logging.pretty_format);
        assert!(logging.include_spans);
        assert!(!logging.json_format);

        let defaults = LoggingSettings::default().to_logging_config();
        assert!(!defaults.pretty_format && !defaults.include_spans);
    }

    #[test]
    fn test_default_reference_uses_builtin_tables() {
        let reference = ReferenceConfig::default();
        assert!(reference.male_table.is_none());
        assert!(reference.female_table.is_none());
    }
}
