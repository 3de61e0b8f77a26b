// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Apollo-Proprietary
// See LICENSE in the repository root for full license terms.

//! Forecast Chart Renderer
//!
//! Procedurally generates the observed-vs-predicted chart page: one
//! Canvas 2D line chart with solid strokes for the observed series and
//! dashed strokes for the forecast, a stats panel, and a scrollable
//! forecast table panel.

use std::fmt::Write;

use apollo_engine::TimeSeries;

use crate::template::{HtmlDocument, PanelPosition, Theme};

/// Per-column stroke colors, cycled when a series has more columns.
pub const SERIES_COLORS: [&str; 6] = [
    "#00e5ff", "#ff6600", "#00ff88", "#ff00ff", "#ffd700", "#ff4444",
];

/// Stroke color for column `idx`.
pub fn series_color(idx: usize) -> &'static str {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

/// Minimal HTML escaping for user-supplied column names.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for inclusion inside a single-quoted JS literal.
fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render the full chart document for an observed series and its forecast.
///
/// Observed columns are drawn as solid polylines, predicted columns as
/// dashed polylines in the same color, with a vertical marker at the
/// forecast boundary, axis labels, and a legend.
pub fn render_forecast_chart(
    observed: &TimeSeries,
    predicted: &TimeSeries,
    theme: Theme,
) -> String {
    let boundary = observed.times()[observed.len() - 1];
    let t_min = observed.times()[0];
    let t_max = predicted.times()[predicted.len() - 1];

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &v in observed.values().iter().chain(predicted.values()) {
        if v.is_finite() {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    // Guard degenerate ranges so the scale functions stay finite
    let (mut t_min, mut t_max) = (t_min, t_max);
    if !(t_max > t_min) {
        t_min -= 0.5;
        t_max += 0.5;
    }
    if !(y_max > y_min) {
        let center = if y_min.is_finite() { y_min } else { 0.0 };
        y_min = center - 1.0;
        y_max = center + 1.0;
    }
    let y_pad = (y_max - y_min) * 0.05;
    y_min -= y_pad;
    y_max += y_pad;

    // Build the chart JS procedurally
    let mut chart_js = String::new();
    let _ = write!(chart_js, r#"
// Forecast Chart
{{
    const canvas = document.getElementById('forecast-chart');
    if (canvas) {{
        const ctx = canvas.getContext('2d');
        const w = canvas.width, h = canvas.height;
        const pad = {{ top: 34, right: 24, bottom: 48, left: 66 }};
        const plotW = w - pad.left - pad.right;
        const plotH = h - pad.top - pad.bottom;
        const tMin = {t_min}, tMax = {t_max};
        const yMin = {y_min}, yMax = {y_max};
        const sx = t => pad.left + (t - tMin) / (tMax - tMin) * plotW;
        const sy = v => pad.top + (1 - (v - yMin) / (yMax - yMin)) * plotH;

        // Background
        ctx.fillStyle = '{bg}';
        ctx.fillRect(0, 0, w, h);

        // Grid
        ctx.strokeStyle = '{text}15';
        ctx.lineWidth = 1;
        for (let i = 0; i <= 5; i++) {{
            const y = pad.top + (plotH / 5) * i;
            ctx.beginPath();
            ctx.moveTo(pad.left, y);
            ctx.lineTo(w - pad.right, y);
            ctx.stroke();
        }}

        // Forecast boundary marker
        {{
            const x = sx({boundary});
            ctx.beginPath();
            ctx.moveTo(x, pad.top);
            ctx.lineTo(x, pad.top + plotH);
            ctx.strokeStyle = '{text}44';
            ctx.setLineDash([4, 4]);
            ctx.stroke();
            ctx.setLineDash([]);
            ctx.fillStyle = '{text}88';
            ctx.font = '10px monospace';
            ctx.textAlign = 'center';
            ctx.fillText('forecast', x, pad.top - 6);
        }}

        function drawSeries(ts, ys, color, dashed) {{
            ctx.strokeStyle = color;
            ctx.lineWidth = 2;
            ctx.setLineDash(dashed ? [6, 4] : []);
            ctx.beginPath();
            for (let i = 0; i < ts.length; i++) {{
                const x = sx(ts[i]), y = sy(ys[i]);
                if (i === 0) ctx.moveTo(x, y);
                else ctx.lineTo(x, y);
            }}
            ctx.stroke();
            ctx.setLineDash([]);
        }}
"#,
        t_min = t_min,
        t_max = t_max,
        y_min = y_min,
        y_max = y_max,
        boundary = boundary,
        bg = theme.panel_bg(),
        text = theme.text_color(),
    );

    // One solid observed and one dashed predicted polyline per column
    for j in 0..observed.num_dims() {
        let color = series_color(j);
        let _ = write!(chart_js, "\n        // Series: {}\n", escape_js(&observed.names()[j]));
        let _ = write!(
            chart_js,
            "        drawSeries({:?}, {:?}, '{color}', false);\n",
            observed.times(),
            observed.column(j),
        );
        let _ = write!(
            chart_js,
            "        drawSeries({:?}, {:?}, '{color}', true);\n",
            predicted.times(),
            predicted.column(j),
        );
    }

    // Axis labels and legend
    let mut legend_js = String::new();
    for (j, name) in observed.names().iter().enumerate() {
        let _ = write!(legend_js, r#"
        ctx.fillStyle = '{color}';
        ctx.fillText('{label}  (-- predicted)', pad.left + 5 + {j} * 170, h - 8);
"#,
            color = series_color(j),
            label = escape_js(name),
            j = j,
        );
    }

    let _ = write!(chart_js, r#"
        // Axes
        ctx.fillStyle = '{text}88';
        ctx.font = '10px monospace';
        ctx.textAlign = 'right';
        for (let i = 0; i <= 5; i++) {{
            const y = pad.top + (plotH / 5) * i;
            const v = yMax - (yMax - yMin) * i / 5;
            ctx.fillText(v.toFixed(3), pad.left - 6, y + 4);
        }}
        ctx.textAlign = 'center';
        ctx.fillText(tMin.toFixed(2), pad.left, h - pad.bottom + 16);
        ctx.fillText(tMax.toFixed(2), pad.left + plotW, h - pad.bottom + 16);
        ctx.fillText('time', pad.left + plotW / 2, h - pad.bottom + 16);

        // Legend
        ctx.textAlign = 'left';
        ctx.font = '11px monospace';
{legend}
        // Title
        ctx.fillStyle = '{accent}';
        ctx.font = 'bold 12px monospace';
        ctx.fillText('Time Series Prediction', pad.left, 18);
    }}
}}
"#,
        text = theme.text_color(),
        accent = theme.accent_color(),
        legend = legend_js,
    );

    // Stats panel
    let mut stats_html = String::new();
    let _ = write!(stats_html, "<h3>Forecast</h3>");
    let _ = write!(stats_html, r#"<div class="stat-row"><span class="key">Samples</span><span class="val">{}</span></div>"#, observed.len());
    let _ = write!(stats_html, r#"<div class="stat-row"><span class="key">Columns</span><span class="val">{}</span></div>"#, observed.num_dims());
    let _ = write!(stats_html, r#"<div class="stat-row"><span class="key">Horizon</span><span class="val">{}</span></div>"#, predicted.len());
    let _ = write!(stats_html, r#"<div class="stat-row"><span class="key">From</span><span class="val">{:.2}</span></div>"#, predicted.times()[0]);

    let mut doc = HtmlDocument::new("Apollo - Time Series Prediction", theme);
    doc.add_panel_with_width("stats-panel", PanelPosition::TopRight, &stats_html, "180px");
    doc.add_panel("table-panel", PanelPosition::BottomCenter, &render_forecast_table(predicted));
    doc.add_chart("forecast-chart", 900, 440);

    doc.set_extra_css(r#"
#forecast-chart {
    position: absolute;
    top: 42%;
    left: 50%;
    transform: translate(-50%, -50%);
    border: 1px solid #00e5ff33;
    border-radius: 8px;
}
#table-panel {
    max-height: 170px;
    overflow-y: auto;
}
"#);

    doc.set_chart_js(&chart_js);
    doc.render()
}

/// Render the forecast rows as an HTML table (time + one column per
/// series name).
pub fn render_forecast_table(predicted: &TimeSeries) -> String {
    let mut html = String::from("<h3>Predicted Values</h3>\n<table class=\"data-table\">\n<tr><th>time</th>");
    for name in predicted.names() {
        let _ = write!(html, "<th>{}</th>", escape_html(name));
    }
    html.push_str("</tr>\n");

    for i in 0..predicted.len() {
        let _ = write!(html, "<tr><td>{:.4}</td>", predicted.times()[i]);
        for &v in predicted.row(i) {
            let _ = write!(html, "<td>{v:.5}</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_engine::TimeSeries;

    fn sample_pair() -> (TimeSeries, TimeSeries) {
        let observed = TimeSeries::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec!["value".into()],
        )
        .unwrap();
        let predicted = TimeSeries::new(
            vec![4.0, 5.0],
            vec![0.4, 0.6],
            vec!["value".into()],
        )
        .unwrap();
        (observed, predicted)
    }

    #[test]
    fn test_chart_contains_solid_and_dashed_series() {
        let (observed, predicted) = sample_pair();
        let html = render_forecast_chart(&observed, &predicted, Theme::Dark);

        assert!(html.contains("id=\"forecast-chart\""));
        // One solid and one dashed polyline for the single column
        assert!(html.contains("'#00e5ff', false)"));
        assert!(html.contains("'#00e5ff', true)"));
        assert!(html.contains("setLineDash"));
        assert!(html.contains("Time Series Prediction"));
    }

    #[test]
    fn test_chart_embeds_data_and_table() {
        let (observed, predicted) = sample_pair();
        let html = render_forecast_chart(&observed, &predicted, Theme::Dark);

        assert!(html.contains("[4.0, 5.0]"));
        assert!(html.contains("Predicted Values"));
        assert!(html.contains("<td>4.0000</td>"));
        assert!(html.contains("<td>5.0000</td>"));
    }

    #[test]
    fn test_multi_column_gets_distinct_colors() {
        let observed = TimeSeries::new(
            vec![0.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0],
            vec!["a".into(), "b".into()],
        )
        .unwrap();
        let predicted = TimeSeries::new(
            vec![2.0],
            vec![5.0, 6.0],
            vec!["a".into(), "b".into()],
        )
        .unwrap();

        let html = render_forecast_chart(&observed, &predicted, Theme::Dark);
        assert!(html.contains(series_color(0)));
        assert!(html.contains(series_color(1)));
    }

    #[test]
    fn test_table_escapes_names() {
        let predicted = TimeSeries::new(
            vec![0.0],
            vec![1.0],
            vec!["<script>".into()],
        )
        .unwrap();
        let table = render_forecast_table(&predicted);
        assert!(table.contains("&lt;script&gt;"));
        assert!(!table.contains("<script>"));
    }

    #[test]
    fn test_color_cycle_wraps() {
        assert_eq!(series_color(0), series_color(SERIES_COLORS.len()));
    }

    #[test]
    fn test_flat_series_still_renders() {
        // Degenerate y-range must not divide by zero in the scale setup
        let observed = TimeSeries::new(
            vec![0.0, 1.0],
            vec![2.0, 2.0],
            vec!["flat".into()],
        )
        .unwrap();
        let predicted =
            TimeSeries::new(vec![2.0], vec![2.0], vec!["flat".into()]).unwrap();
        let html = render_forecast_chart(&observed, &predicted, Theme::Dark);
        assert!(!html.contains("Infinity"));
        assert!(!html.contains("NaN"));
    }
}
