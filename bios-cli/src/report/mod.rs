//! Static HTML report of rows already accepted by the API
//!
//! One read-back query per category; categories whose response is missing,
//! malformed, or empty are skipped without aborting the others. The page
//! is fully regenerated each run and written next to a .nojekyll marker so
//! static hosting serves it untouched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::api::BiosClient;
use crate::config::{Category, Config};

/// Rows fetched back for one category
#[derive(Debug, Clone)]
pub struct CategoryRows {
    pub category: Category,
    pub rows: Vec<serde_json::Value>,
}

/// Query every category with a read-back endpoint, skipping failures
pub async fn collect(config: &Config, client: &BiosClient) -> Vec<CategoryRows> {
    let mut sections = Vec::new();

    for category in &config.categories {
        let Some(endpoint) = &category.read_endpoint else {
            continue;
        };

        match client.fetch_accepted(endpoint).await {
            Ok(rows) if rows.is_empty() => {
                log::info!("{}: no accepted rows, skipping in report", category.category);
            }
            Ok(rows) => {
                log::info!("{}: fetched {} accepted rows", category.category, rows.len());
                sections.push(CategoryRows {
                    category: category.category,
                    rows,
                });
            }
            Err(e) => {
                log::warn!("{}: read-back failed, skipping in report: {:#}", category.category, e);
            }
        }
    }

    sections
}

/// Render all fetched categories into one static page
pub fn render(sections: &[CategoryRows], generated_at: DateTime<Local>) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Laporan Sinkronisasi BIOS</title>\n<style>\n\
         body { font-family: sans-serif; margin: 2rem; }\n\
         table { border-collapse: collapse; margin-bottom: 2rem; }\n\
         th, td { border: 1px solid #999; padding: 0.3rem 0.6rem; text-align: left; }\n\
         th { background: #eee; }\n\
         .generated { color: #666; font-size: 0.85rem; }\n\
         </style>\n</head>\n<body>\n<h1>Laporan Sinkronisasi BIOS</h1>\n",
    );

    if sections.is_empty() {
        html.push_str("<p>Tidak ada data yang tersedia.</p>\n");
    }

    for section in sections {
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(section.category.label())));
        html.push_str(&render_table(&section.rows));
    }

    html.push_str(&format!(
        "<p class=\"generated\">Dibuat {}</p>\n</body>\n</html>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    html
}

fn render_table(rows: &[serde_json::Value]) -> String {
    let columns = match rows.first().and_then(|row| row.as_object()) {
        Some(first) => first.keys().cloned().collect::<Vec<_>>(),
        None => return "<p>Data tidak dapat dibaca.</p>\n".to_string(),
    };

    let mut table = String::from("<table>\n<tr>");
    for column in &columns {
        table.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    table.push_str("</tr>\n");

    for row in rows {
        table.push_str("<tr>");
        for column in &columns {
            let text = row
                .get(column)
                .map(cell_text)
                .unwrap_or_default();
            table.push_str(&format!("<td>{}</td>", escape_html(&text)));
        }
        table.push_str("</tr>\n");
    }

    table.push_str("</table>\n");
    table
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write index.html plus the .nojekyll marker into the output directory
pub fn write_report(dir: &Path, html: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let index = dir.join("index.html");
    std::fs::write(&index, html)
        .with_context(|| format!("Failed to write {}", index.display()))?;

    let marker = dir.join(".nojekyll");
    std::fs::write(&marker, "")
        .with_context(|| format!("Failed to write {}", marker.display()))?;

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_render_lists_each_category_as_a_table() {
        let sections = vec![CategoryRows {
            category: Category::Penerimaan,
            rows: vec![
                json!({"tgl_transaksi": "2024-02-01", "jumlah": 1500000.0}),
                json!({"tgl_transaksi": "2024-02-02", "jumlah": 250000.0}),
            ],
        }];

        let html = render(&sections, generated_at());
        assert!(html.contains("<h2>Penerimaan</h2>"));
        assert!(html.contains("<th>jumlah</th>"));
        assert!(html.contains("<td>2024-02-01</td>"));
        assert!(html.contains("<td>1500000.0</td>"));
    }

    #[test]
    fn test_render_ends_with_generation_timestamp() {
        let html = render(&[], generated_at());
        assert!(html.contains("Dibuat 2024-06-15 10:30:00"));
        assert!(html.contains("Tidak ada data"));
    }

    #[test]
    fn test_cell_values_are_escaped() {
        let sections = vec![CategoryRows {
            category: Category::Pengeluaran,
            rows: vec![json!({"uraian": "<script>alert(1)</script>"})],
        }];

        let html = render(&sections, generated_at());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_non_object_rows_do_not_panic() {
        let sections = vec![CategoryRows {
            category: Category::JumlahDosen,
            rows: vec![json!("not an object")],
        }];

        let html = render(&sections, generated_at());
        assert!(html.contains("Data tidak dapat dibaca"));
    }
}
