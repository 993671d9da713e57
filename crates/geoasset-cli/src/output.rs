//! Output formatting for geoasset-cli (table, json, csv)

use clap::ValueEnum;
use colored::Colorize;
use geoasset_client::{Asset, StoreEvent};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print data in the configured format
    ///
    /// `empty` is shown instead of an empty table.
    pub fn print<T: Tabled + Serialize>(&self, data: &[T], empty: &str) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    self.info(empty);
                } else {
                    let table = Table::new(data).to_string();
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Csv => {
                print!("{}", to_csv(data));
            }
        }
    }
}

/// Render rows as CSV, header first
fn to_csv<T: Serialize>(data: &[T]) -> String {
    let mut out = String::new();
    let Some(first) = data.first() else {
        return out;
    };

    // Get field names from the first item
    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(first) {
        let headers: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
        out.push_str(&headers.join(","));
        out.push('\n');

        for item in data {
            if let Ok(serde_json::Value::Object(row)) = serde_json::to_value(item) {
                let values: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        row.get(*h)
                            .map(|v| match v {
                                serde_json::Value::String(s) => escape_csv(s),
                                other => escape_csv(&other.to_string()),
                            })
                            .unwrap_or_default()
                    })
                    .collect();
                out.push_str(&values.join(","));
                out.push('\n');
            }
        }
    }

    out
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// Display types
// =============================================================================

/// Asset display for list command
#[derive(Debug, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRow {
    #[tabled(rename = "Address")]
    pub address: String,
    #[tabled(rename = "Latitude")]
    pub latitude: f64,
    #[tabled(rename = "Longitude")]
    pub longitude: f64,
    #[tabled(rename = "Company")]
    pub company_id: String,
}

impl From<Asset> for AssetRow {
    fn from(asset: Asset) -> Self {
        Self {
            address: asset.address,
            latitude: asset.latitude,
            longitude: asset.longitude,
            company_id: asset.company_id,
        }
    }
}

/// One line of `watch` output
pub fn event_line(event: &StoreEvent, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => match event {
            StoreEvent::AssetsReplaced { company_id, count } => format!(
                "[{}] assets replaced ({} asset{})",
                company_id,
                count,
                if *count == 1 { "" } else { "s" }
            ),
        },
        OutputFormat::Json => serde_json::to_string(event).unwrap_or_default(),
        OutputFormat::Csv => match event {
            StoreEvent::AssetsReplaced { company_id, count } => {
                format!("{},{},{}", event.name(), escape_csv(company_id), count)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(address: &str) -> AssetRow {
        AssetRow {
            address: address.into(),
            latitude: 40.5,
            longitude: -73.0,
            company_id: "acme".into(),
        }
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("1 Main St, Springfield"), "\"1 Main St, Springfield\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_asset_csv() {
        let csv = to_csv(&[asset("1 Main St"), asset("2 Side Rd, Apt 3")]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        let mut headers: Vec<&str> = lines[0].split(',').collect();
        let address_col = headers.iter().position(|h| *h == "address").unwrap();
        headers.sort_unstable();
        assert_eq!(headers, vec!["address", "companyId", "latitude", "longitude"]);

        assert_eq!(lines[1].split(',').nth(address_col), Some("1 Main St"));
        assert!(lines[2].contains("\"2 Side Rd, Apt 3\""));
        assert!(lines[2].contains("-73.0"));
    }

    #[test]
    fn test_empty_csv() {
        assert_eq!(to_csv::<AssetRow>(&[]), "");
    }

    #[test]
    fn test_asset_row_json_matches_wire_names() {
        let value = serde_json::to_value(asset("x")).unwrap();
        assert_eq!(value["companyId"], "acme");
        assert!(value.get("company_id").is_none());
    }

    #[test]
    fn test_event_lines() {
        let one = StoreEvent::AssetsReplaced {
            company_id: "acme".into(),
            count: 1,
        };
        let many = StoreEvent::AssetsReplaced {
            company_id: "a,b".into(),
            count: 3,
        };

        assert_eq!(
            event_line(&one, OutputFormat::Table),
            "[acme] assets replaced (1 asset)"
        );
        assert_eq!(
            event_line(&many, OutputFormat::Table),
            "[a,b] assets replaced (3 assets)"
        );
        assert_eq!(
            event_line(&many, OutputFormat::Csv),
            "assets-replaced,\"a,b\",3"
        );
        assert_eq!(
            event_line(&one, OutputFormat::Json),
            r#"{"type":"assets-replaced","companyId":"acme","count":1}"#
        );
    }
}
