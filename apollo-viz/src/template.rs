//! HTML document template engine for Apollo visualizations.
//!
//! Generates self-contained HTML documents: inline CSS, HUD overlay
//! panels, Canvas 2D chart elements, and procedurally generated chart
//! JavaScript. No external assets.

use std::fmt::Write;

/// Position anchor for HUD panels.
#[derive(Debug, Clone)]
pub enum PanelPosition {
    TopLeft,
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl PanelPosition {
    fn css(&self) -> &'static str {
        match self {
            Self::TopLeft => "top: 10px; left: 10px;",
            Self::TopRight => "top: 10px; right: 10px;",
            Self::TopCenter => "top: 10px; left: 50%; transform: translateX(-50%);",
            Self::BottomLeft => "bottom: 10px; left: 10px;",
            Self::BottomRight => "bottom: 10px; right: 10px;",
            Self::BottomCenter => "bottom: 10px; left: 50%; transform: translateX(-50%);",
        }
    }
}

/// A HUD overlay panel rendered on top of the page.
#[derive(Debug, Clone)]
pub struct HudPanel {
    pub id: String,
    pub position: PanelPosition,
    pub content_html: String,
    pub width: Option<String>,
}

/// A 2D canvas element for chart rendering.
#[derive(Debug, Clone)]
pub struct ChartCanvas {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// Theme configuration for the visualization.
#[derive(Debug, Clone)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn bg_color(&self) -> &'static str {
        match self {
            Self::Dark => "#0a0a0f",
            Self::Light => "#f0f0f5",
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            Self::Dark => "#e0e0e0",
            Self::Light => "#1a1a2e",
        }
    }

    pub fn panel_bg(&self) -> &'static str {
        match self {
            Self::Dark => "rgba(10, 10, 20, 0.85)",
            Self::Light => "rgba(240, 240, 245, 0.9)",
        }
    }

    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::Dark => "#00e5ff",
            Self::Light => "#0066cc",
        }
    }
}

/// Builder for self-contained HTML visualization documents.
pub struct HtmlDocument {
    title: String,
    theme: Theme,
    panels: Vec<HudPanel>,
    charts: Vec<ChartCanvas>,
    chart_js: String,
    extra_css: String,
}

impl HtmlDocument {
    pub fn new(title: &str, theme: Theme) -> Self {
        Self {
            title: title.to_string(),
            theme,
            panels: Vec::new(),
            charts: Vec::new(),
            chart_js: String::new(),
            extra_css: String::new(),
        }
    }

    pub fn add_panel(&mut self, id: &str, position: PanelPosition, content: &str) {
        self.panels.push(HudPanel {
            id: id.to_string(),
            position,
            content_html: content.to_string(),
            width: None,
        });
    }

    pub fn add_panel_with_width(&mut self, id: &str, position: PanelPosition, content: &str, width: &str) {
        self.panels.push(HudPanel {
            id: id.to_string(),
            position,
            content_html: content.to_string(),
            width: Some(width.to_string()),
        });
    }

    pub fn add_chart(&mut self, id: &str, width: u32, height: u32) {
        self.charts.push(ChartCanvas {
            id: id.to_string(),
            width,
            height,
        });
    }

    pub fn set_chart_js(&mut self, js: &str) {
        self.chart_js = js.to_string();
    }

    pub fn set_extra_css(&mut self, css: &str) {
        self.extra_css = css.to_string();
    }

    /// Render the complete self-contained HTML document.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(16384);

        // DOCTYPE and head
        let _ = write!(html, r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
"#, title = self.title);

        // CSS
        let _ = write!(html, r#"<style>
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{
    background: {bg};
    color: {text};
    font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
    overflow: hidden;
}}
.hud-panel {{
    position: absolute;
    background: {panel_bg};
    border: 1px solid {accent}44;
    border-radius: 8px;
    padding: 12px 16px;
    backdrop-filter: blur(12px);
    -webkit-backdrop-filter: blur(12px);
    font-size: 13px;
    line-height: 1.5;
    z-index: 10;
    box-shadow: 0 4px 24px rgba(0, 0, 0, 0.4);
}}
.hud-panel h3 {{
    color: {accent};
    font-size: 11px;
    text-transform: uppercase;
    letter-spacing: 1.5px;
    margin-bottom: 6px;
    font-weight: 600;
}}
.stat-row {{
    display: flex;
    justify-content: space-between;
    gap: 12px;
    padding: 2px 0;
}}
.stat-row .key {{ color: {text}88; }}
.stat-row .val {{ color: {accent}; font-weight: 600; font-variant-numeric: tabular-nums; }}
.data-table {{
    border-collapse: collapse;
    font-size: 12px;
    font-variant-numeric: tabular-nums;
}}
.data-table th {{
    color: {accent};
    text-transform: uppercase;
    font-size: 10px;
    letter-spacing: 1px;
    padding: 3px 10px;
    border-bottom: 1px solid {accent}44;
    text-align: right;
}}
.data-table td {{
    padding: 2px 10px;
    text-align: right;
    color: {text};
    border-bottom: 1px solid {text}11;
}}
{extra_css}
</style>
"#,
            bg = self.theme.bg_color(),
            text = self.theme.text_color(),
            panel_bg = self.theme.panel_bg(),
            accent = self.theme.accent_color(),
            extra_css = self.extra_css,
        );

        html.push_str("</head>\n<body>\n");

        // HUD panels
        for panel in &self.panels {
            let width_css = panel.width.as_deref().map(|w| format!("width: {};", w)).unwrap_or_default();
            let _ = write!(html, r#"<div id="{id}" class="hud-panel" style="{pos} {width}">
{content}
</div>
"#,
                id = panel.id,
                pos = panel.position.css(),
                width = width_css,
                content = panel.content_html,
            );
        }

        // Chart canvases
        for chart in &self.charts {
            let _ = write!(html, r#"<canvas id="{id}" width="{w}" height="{h}" style="display:block;"></canvas>
"#,
                id = chart.id,
                w = chart.width,
                h = chart.height,
            );
        }

        // JavaScript
        if !self.chart_js.is_empty() {
            html.push_str("<script>\n// === Chart Initialization ===\n");
            html.push_str(&self.chart_js);
            html.push_str("</script>\n");
        }

        html.push_str("</body>\n</html>");
        html
    }
}
