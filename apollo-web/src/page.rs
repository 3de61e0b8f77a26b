//! The single-screen forecasting page.
//!
//! Self-contained HTML: a file picker (read client-side with FileReader),
//! a data preview table, the three forecast parameters — steps to
//! predict, reservoir dimensionality, and a log-scale regularization
//! slider rendered as 10ⁿ — and a Predict button that posts to `/chart`
//! and shows the returned document in an inline frame.

/// Build the complete page document.
pub fn build_page() -> String {
    let mut html = String::with_capacity(16384);
    html.push_str(PAGE_HEAD);
    html.push_str(PAGE_BODY);
    html.push_str(&format!(
        "<footer>apollo-web v{}</footer>\n",
        env!("CARGO_PKG_VERSION")
    ));
    html.push_str(PAGE_SCRIPT);
    html
}

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Apollo - Time Series Prediction</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    background: #0a0a0f;
    color: #e0e0e0;
    font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
    max-width: 980px;
    margin: 0 auto;
    padding: 24px 16px;
}
h1 { font-size: 26px; margin-bottom: 2px; }
.subtitle { color: #e0e0e088; font-size: 13px; margin-bottom: 20px; }
.panel {
    background: rgba(10, 10, 20, 0.85);
    border: 1px solid #00e5ff44;
    border-radius: 8px;
    padding: 14px 18px;
    margin-bottom: 14px;
}
.panel h3 {
    color: #00e5ff;
    font-size: 11px;
    text-transform: uppercase;
    letter-spacing: 1.5px;
    margin-bottom: 8px;
    font-weight: 600;
}
.params { display: flex; gap: 14px; flex-wrap: wrap; }
.params .panel { flex: 1; min-width: 220px; margin-bottom: 0; }
.params label { display: block; font-size: 12px; color: #e0e0e0aa; margin-bottom: 6px; }
.params input[type="number"], .params input[type="range"] {
    width: 100%;
    accent-color: #00e5ff;
}
.params input[type="number"] {
    background: #0a0a0f;
    border: 1px solid #00e5ff44;
    border-radius: 4px;
    color: #e0e0e0;
    padding: 6px 8px;
    font-size: 14px;
}
.reg-value { color: #00e5ff; font-weight: 600; font-size: 15px; }
button {
    background: #00e5ff;
    color: #0a0a0f;
    border: none;
    border-radius: 6px;
    padding: 10px 28px;
    font-size: 15px;
    font-weight: 700;
    cursor: pointer;
    margin: 10px 0 14px;
}
button:disabled { background: #00e5ff33; color: #e0e0e055; cursor: not-allowed; }
.data-table { border-collapse: collapse; font-size: 12px; font-variant-numeric: tabular-nums; }
.data-table th {
    color: #00e5ff;
    text-transform: uppercase;
    font-size: 10px;
    letter-spacing: 1px;
    padding: 3px 10px;
    border-bottom: 1px solid #00e5ff44;
    text-align: right;
}
.data-table td {
    padding: 2px 10px;
    text-align: right;
    border-bottom: 1px solid #e0e0e011;
}
#error {
    background: #ff444422;
    border: 1px solid #ff4444;
    border-radius: 6px;
    color: #ff9999;
    padding: 10px 14px;
    margin-bottom: 14px;
    font-size: 13px;
}
#result { width: 100%; height: 700px; border: none; border-radius: 8px; }
footer { color: #e0e0e044; font-size: 11px; text-align: right; padding: 8px 0; }
</style>
</head>
<body>
"##;

const PAGE_BODY: &str = r##"<h1>Apollo &#128301; &#129302;</h1>
<div class="subtitle">Time series prediction</div>

<div class="panel">
    <h3>Upload your CSV file</h3>
    <input type="file" id="csv-file" accept=".csv,text/csv">
    <div id="preview" style="margin-top: 10px; overflow-x: auto;"></div>
</div>

<div class="params">
    <div class="panel">
        <label for="steps">Number of steps to predict</label>
        <input type="number" id="steps" min="1" value="10">
    </div>
    <div class="panel">
        <label for="reservoir">Dimensionality of reservoir</label>
        <input type="number" id="reservoir" min="1" value="100">
    </div>
    <div class="panel">
        <label for="regularization">Regularization parameter
            <span class="reg-value" id="reg-label"></span></label>
        <input type="range" id="regularization" min="-10" max="-2" step="1" value="-6">
    </div>
</div>

<button id="predict" disabled>Predict</button>
<div id="error" hidden></div>
<iframe id="result" hidden></iframe>
"##;

const PAGE_SCRIPT: &str = r##"<script>
const SUPERSCRIPTS = {
    '0': '⁰', '1': '¹', '2': '²', '3': '³', '4': '⁴',
    '5': '⁵', '6': '⁶', '7': '⁷', '8': '⁸', '9': '⁹',
    '-': '⁻',
};

function powerLabel(power) {
    return '10' + String(power).split('').map(c => SUPERSCRIPTS[c] || c).join('');
}

function esc(s) {
    return s.replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;');
}

let csvText = null;

const fileInput = document.getElementById('csv-file');
const predictButton = document.getElementById('predict');
const slider = document.getElementById('regularization');
const regLabel = document.getElementById('reg-label');
const errorBanner = document.getElementById('error');

regLabel.textContent = powerLabel(slider.value);
slider.addEventListener('input', () => {
    regLabel.textContent = powerLabel(slider.value);
});

fileInput.addEventListener('change', () => {
    const file = fileInput.files[0];
    if (!file) return;
    const reader = new FileReader();
    reader.onload = () => {
        csvText = reader.result;
        renderPreview(csvText);
        predictButton.disabled = false;
    };
    reader.readAsText(file);
});

// First ten data rows plus the header
function renderPreview(text) {
    const lines = text.trim().split(/\r?\n/).slice(0, 11);
    let html = '<table class="data-table">';
    lines.forEach((line, i) => {
        const tag = i === 0 ? 'th' : 'td';
        const cells = line.split(',')
            .map(c => '<' + tag + '>' + esc(c) + '</' + tag + '>')
            .join('');
        html += '<tr>' + cells + '</tr>';
    });
    html += '</table>';
    document.getElementById('preview').innerHTML = html;
}

function showError(message) {
    errorBanner.textContent = message;
    errorBanner.hidden = false;
}

predictButton.addEventListener('click', async () => {
    errorBanner.hidden = true;
    const body = {
        csv: csvText,
        horizon: Number(document.getElementById('steps').value),
        reservoir_dimensionality: Number(document.getElementById('reservoir').value),
        regularization_exponent: Number(slider.value),
    };

    predictButton.disabled = true;
    try {
        const resp = await fetch('/chart', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body),
        });
        if (!resp.ok) {
            const payload = await resp.json().catch(() => null);
            showError(payload && payload.error ? payload.error : 'Forecast failed');
            return;
        }
        const frame = document.getElementById('result');
        frame.srcdoc = await resp.text();
        frame.hidden = false;
    } catch (e) {
        showError('Request failed: ' + e);
    } finally {
        predictButton.disabled = false;
    }
});
</script>
</body>
</html>
"##;
