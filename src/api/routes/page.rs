//! Dashboard Page
//!
//! - GET / - HTML layout: upload control, chart kind dropdown, chart area
//!   and data table
//!
//! The page only wires events to the session API. Drawing the chart from its
//! description is up to whatever script the deployment adds; until then the
//! description is shown as JSON.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::chart::ChartKind;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Dashboard</title>
</head>
<body>
<h1>Dashboard</h1>

<label id="data-upload">
  Drag and Drop or <a>Select a CSV File</a>
  <input type="file" accept=".csv,text/csv" hidden>
</label>

<select id="chart-type">
{{OPTIONS}}
</select>

<pre id="chart"></pre>

<h2>Data Table</h2>
<table id="data-table"></table>

<script>
const api = "/api/v1/sessions";
let sessionId = null;

async function call(method, path, body) {
  const res = await fetch(api + path, {
    method,
    headers: {"Content-Type": "application/json"},
    body: body === undefined ? undefined : JSON.stringify(body),
  });
  return res.json();
}

const empty = {table: {columns: [], data: []}, chart: null};

function show(snapshot) {
  if (!snapshot || !snapshot.table) snapshot = empty;
  document.getElementById("chart").textContent =
    snapshot.chart ? JSON.stringify(snapshot.chart, null, 2) : "";
  const table = document.getElementById("data-table");
  table.replaceChildren();
  const head = table.insertRow();
  for (const col of snapshot.table.columns) {
    head.insertCell().textContent = col.name;
  }
  for (const row of snapshot.table.data) {
    const tr = table.insertRow();
    for (const col of snapshot.table.columns) {
      const v = row[col.id];
      tr.insertCell().textContent = v === null ? "" : v;
    }
  }
}

document.querySelector("#data-upload input").addEventListener("change", (e) => {
  const file = e.target.files[0];
  if (!file) {
    call("POST", `/${sessionId}/upload`, {contents: null}).then(show);
    return;
  }
  const reader = new FileReader();
  reader.onload = () => call("POST", `/${sessionId}/upload`,
    {contents: reader.result, filename: file.name}).then(show);
  reader.readAsDataURL(file);
});

document.getElementById("chart-type").addEventListener("change", (e) => {
  call("PUT", `/${sessionId}/kind`, {kind: e.target.value}).then(show);
});

call("POST", "").then((snapshot) => {
  sessionId = snapshot.session_id || null;
  show(snapshot);
});

window.addEventListener("pagehide", () => {
  if (sessionId) fetch(`${api}/${sessionId}`, {method: "DELETE", keepalive: true});
});
</script>
</body>
</html>
"##;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.dashboard.config().default_kind))
}

/// Fill the page template with dropdown options
pub fn render_page(selected: &str) -> String {
    let options: Vec<String> = ChartKind::all()
        .iter()
        .map(|kind| {
            let marker = if kind.as_str() == selected {
                " selected"
            } else {
                ""
            };
            format!(
                "  <option value=\"{}\"{}>{}</option>",
                kind.as_str(),
                marker,
                kind.title()
            )
        })
        .collect();

    PAGE_TEMPLATE.replace("{{OPTIONS}}", &options.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lists_every_kind() {
        let page = render_page("bar");
        for kind in ChartKind::all() {
            assert!(page.contains(&format!("value=\"{}\"", kind.as_str())));
            assert!(page.contains(kind.title()));
        }
        assert!(page.contains("<option value=\"bar\" selected>Bar Chart</option>"));
        assert!(page.contains("<h2>Data Table</h2>"));
    }

    #[test]
    fn test_page_selects_configured_kind() {
        let page = render_page("pie");
        assert!(page.contains("<option value=\"pie\" selected>Pie Chart</option>"));
        assert!(!page.contains("<option value=\"bar\" selected>"));
    }

    #[test]
    fn test_page_script_is_complete() {
        let page = render_page("bar");
        assert!(page.contains(r##"document.querySelector("#data-upload input")"##));
        assert!(page.contains("\"pagehide\""));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
