use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use super::OutputFormat;

/// Print data in the specified format
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(data) {
            Ok(json) => println!("{}", json),
            Err(e) => print_error(&format!("Failed to serialize output: {}", e)),
        },
        OutputFormat::Table => {
            let table = Table::new(data).to_string();
            println!("{}", table);
        }
        OutputFormat::Plain => {
            let Ok(json) = serde_json::to_value(data) else {
                return;
            };
            if let Some(arr) = json.as_array() {
                for item in arr {
                    if let Some(obj) = item.as_object() {
                        let values: Vec<String> = obj
                            .values()
                            .map(|v| match v {
                                serde_json::Value::String(s) => s.clone(),
                                serde_json::Value::Null => "".to_string(),
                                other => other.to_string(),
                            })
                            .collect();
                        println!("{}", values.join("|"));
                    }
                }
            }
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}
