//! Output formatting for the CLI.

use console::style;
use swag_commerce::catalog::{ProductStatus, StockLevel};
use swag_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a line as-is.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Left-align `text` in `width` columns, counting chars rather than bytes.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Status badge for product states.
pub fn status_badge(status: ProductStatus) -> String {
    match status {
        ProductStatus::Active => style(format!("✓ {}", status.label())).green().to_string(),
        ProductStatus::Pending => style(format!("⏳ {}", status.label())).yellow().to_string(),
        ProductStatus::Inactive => style(format!("✗ {}", status.label())).red().to_string(),
    }
}

/// Stock badge: red when out, yellow when low.
pub fn stock_badge(level: StockLevel) -> String {
    let label = level.label();
    match level {
        StockLevel::OutOfStock => style(label).red().to_string(),
        StockLevel::Low(_) => style(label).yellow().to_string(),
        StockLevel::InStock(_) => label,
    }
}

/// Price in es-CL format, bold.
pub fn money(amount: Money) -> String {
    style(amount.display()).bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("Lápiz", 7), "Lápiz  ");
        assert_eq!(pad("Polerón", 3), "Polerón");
    }
}
