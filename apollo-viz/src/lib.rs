pub mod chart;
pub mod template;

pub use chart::{render_forecast_chart, render_forecast_table, series_color};
pub use template::{HtmlDocument, PanelPosition, Theme};
