//! Server-rendered dashboard page.
//!
//! The page lists every report in a table. Each row carries its filterable
//! values as `data-*` attributes so the filter selects can hide rows without
//! another request. Details and statistics are fetched from the JSON
//! endpoints by the inline script.

use journal_core::types::{ReportField, ReportRecord};
use journal_service::ReportListing;

/// Columns shown in the report table.
const TABLE_COLUMNS: [ReportField; 7] = [
    ReportField::Date,
    ReportField::Region,
    ReportField::District,
    ReportField::FarmName,
    ReportField::ActivityType,
    ReportField::WorkType,
    ReportField::Executor,
];

/// Filter select id, `data-*` attribute, label, field.
const FILTERS: [(&str, &str, &str, ReportField); 4] = [
    ("filter-date", "date", "Date", ReportField::Date),
    ("filter-region", "region", "Region", ReportField::Region),
    ("filter-activity", "activity-type", "Activity type", ReportField::ActivityType),
    ("filter-work", "work-type", "Work type", ReportField::WorkType),
];

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; color: #222; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
tbody tr { cursor: pointer; }
tbody tr:hover { background: #f3f7f0; }
.filters, .statistics { display: flex; gap: 1rem; margin-bottom: 1rem; align-items: end; }
#report-detail img { max-width: 240px; margin: 0.25rem; }
#report-detail dl { display: grid; grid-template-columns: max-content 1fr; gap: 0.2rem 1rem; }
"#;

const SCRIPT: &str = r#"
const selects = document.querySelectorAll('.filters select');
function applyFilters() {
  document.querySelectorAll('#reports tbody tr').forEach(row => {
    let visible = true;
    selects.forEach(s => {
      if (s.value && row.dataset[s.dataset.key] !== s.value) visible = false;
    });
    row.hidden = !visible;
  });
}
selects.forEach(s => s.addEventListener('change', applyFilters));

function text(value) {
  const span = document.createElement('span');
  span.textContent = value;
  return span.innerHTML;
}

document.querySelectorAll('#reports tbody tr').forEach(row => {
  row.addEventListener('click', async () => {
    const target = document.getElementById('report-detail');
    const response = await fetch('/get_report/' + encodeURIComponent(row.dataset.id));
    const report = await response.json();
    if (!response.ok) { target.innerHTML = '<p>' + text(report.error) + '</p>'; return; }
    let html = '<h2>' + text(report.id) + '</h2><dl>';
    for (const [key, value] of Object.entries(report)) {
      if (key === 'id' || key === 'photos' || key === 'dynamic_fields') continue;
      html += '<dt>' + text(key) + '</dt><dd>' + text(value) + '</dd>';
    }
    for (const [key, value] of Object.entries(report.dynamic_fields)) {
      html += '<dt>' + text(key) + '</dt><dd>' + text(value) + '</dd>';
    }
    html += '</dl>';
    for (const photo of report.photos) html += '<img src="' + photo + '" alt="">';
    target.innerHTML = html;
  });
});

document.getElementById('statistics-form').addEventListener('submit', async event => {
  event.preventDefault();
  const body = {
    start_date: document.getElementById('start-date').value,
    end_date: document.getElementById('end-date').value,
  };
  const response = await fetch('/get_statistics', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const result = await response.json();
  const target = document.getElementById('statistics-result');
  if (!response.ok) { target.innerHTML = '<p>' + text(result.error) + '</p>'; return; }
  const rows = Object.entries(result)
    .map(([date, count]) => '<tr><td>' + text(date) + '</td><td>' + count + '</td></tr>')
    .join('');
  target.innerHTML = rows ? '<table><tr><th>Date</th><th>Reports</th></tr>' + rows + '</table>' : '<p>No reports</p>';
});
"#;

/// Render the dashboard page.
pub fn render_dashboard(listing: &ReportListing) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str("  <title>Field Journal</title>\n");
    html.push_str(&format!("  <style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str("  <h1>Field Journal</h1>\n");

    html.push_str(&render_filters(listing));
    html.push_str(&render_statistics_form());
    html.push_str(&render_table(&listing.records));

    html.push_str("  <section id=\"report-detail\"></section>\n");
    html.push_str(&format!("  <script>{SCRIPT}</script>\n"));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_filters(listing: &ReportListing) -> String {
    let dates: Vec<String> = listing
        .filters
        .dates
        .iter()
        .map(|d| d.format(journal_core::types::DATE_FORMAT).to_string())
        .collect();

    let mut html = String::from("  <form class=\"filters\">\n");
    for (id, key, label, field) in FILTERS {
        let values: &[String] = match field {
            ReportField::Date => &dates,
            ReportField::Region => &listing.filters.regions,
            ReportField::ActivityType => &listing.filters.activity_types,
            _ => &listing.filters.work_types,
        };

        html.push_str(&format!(
            "    <label>{label}<br><select id=\"{id}\" data-key=\"{}\">\n",
            dataset_key(key)
        ));
        html.push_str("      <option value=\"\">All</option>\n");
        for value in values {
            let value = html_escape(value);
            html.push_str(&format!("      <option value=\"{value}\">{value}</option>\n"));
        }
        html.push_str("    </select></label>\n");
    }
    html.push_str("  </form>\n");
    html
}

fn render_statistics_form() -> String {
    let mut html = String::from("  <form id=\"statistics-form\" class=\"statistics\">\n");
    html.push_str("    <label>From<br><input type=\"date\" id=\"start-date\"></label>\n");
    html.push_str("    <label>To<br><input type=\"date\" id=\"end-date\"></label>\n");
    html.push_str("    <button type=\"submit\">Count reports</button>\n");
    html.push_str("  </form>\n");
    html.push_str("  <section id=\"statistics-result\"></section>\n");
    html
}

fn render_table(records: &[ReportRecord]) -> String {
    let mut html = String::from("  <table id=\"reports\">\n    <thead><tr><th>Report</th>");
    for field in TABLE_COLUMNS {
        html.push_str(&format!("<th>{}</th>", column_title(field)));
    }
    html.push_str("</tr></thead>\n    <tbody>\n");

    for record in records {
        html.push_str(&format!("      <tr data-id=\"{}\"", html_escape(&record.id)));
        for (_, key, _, field) in FILTERS {
            html.push_str(&format!(
                " data-{key}=\"{}\"",
                html_escape(&record.display(field))
            ));
        }
        html.push_str(&format!("><td>{}</td>", html_escape(&record.id)));
        for field in TABLE_COLUMNS {
            html.push_str(&format!("<td>{}</td>", html_escape(&record.display(field))));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("    </tbody>\n  </table>\n");
    html
}

fn column_title(field: ReportField) -> &'static str {
    match field {
        ReportField::Date => "Date",
        ReportField::Region => "Region",
        ReportField::District => "District",
        ReportField::FarmName => "Farm",
        ReportField::ActivityType => "Activity type",
        ReportField::WorkType => "Work type",
        ReportField::Executor => "Executor",
        _ => field.element(),
    }
}

/// `data-activity-type` is read as `dataset.activityType` in the browser.
fn dataset_key(attribute: &str) -> String {
    let mut key = String::with_capacity(attribute.len());
    let mut upper = false;
    for c in attribute.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            key.extend(c.to_uppercase());
            upper = false;
        } else {
            key.push(c);
        }
    }
    key
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
