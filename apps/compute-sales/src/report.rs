//! # Report Rendering
//!
//! Turns a [`RunSummary`] into the text receipt or the JSON document.
//!
//! ## Text Layout
//! ```text
//! === SALES REPORT: sales.json ===
//! Generated: 2026-01-02 03:04:05 UTC
//! Catalog: 2 entries, 0 warnings
//!
//! Sale #0
//! Product                               Qty         Unit       Subtotal
//! ----------------------------------------------------------------------
//! A                                    3.00        10.00          30.00
//! X                                    1.00            -              -
//! ----------------------------------------------------------------------
//!                                                  TOTAL          30.00
//!   ! unknown product X in record 0
//!
//! ======================================================================
//!                                            GRAND TOTAL          30.00
//!
//! Elapsed time (s): 0.000120
//! 1 warning(s) detected.
//! ```
//!
//! Amounts and quantities are rounded to `precision` digits here and nowhere
//! else.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sales_core::{CatalogWarning, LineResult, Money, RunSummary, SaleResult, SaleWarning};

use crate::config::ReportFormat;
use crate::error::AppResult;

// =============================================================================
// Column Layout
// =============================================================================

const PRODUCT_WIDTH: usize = 30;
const QTY_WIDTH: usize = 10;
const UNIT_WIDTH: usize = 12;
const SUBTOTAL_WIDTH: usize = 14;
const LABEL_WIDTH: usize = PRODUCT_WIDTH + QTY_WIDTH + UNIT_WIDTH + 2;
const RULE_WIDTH: usize = 70;

/// Placeholder for a value that did not resolve.
const MISSING: &str = "-";

// =============================================================================
// Report Context
// =============================================================================

/// Everything a report shows besides the summary itself.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Display name of the sales input.
    pub input_name: &'a str,
    /// Number of products in the catalog index.
    pub catalog_entries: usize,
    /// Warnings raised while building the catalog.
    pub catalog_warnings: &'a [CatalogWarning],
    /// Fractional digits for amounts and quantities.
    pub precision: u32,
    pub generated_at: DateTime<Utc>,
}

impl ReportContext<'_> {
    fn warning_total(&self, summary: &RunSummary) -> usize {
        self.catalog_warnings.len() + summary.warning_count()
    }
}

/// Renders a report in the requested format.
pub fn render(format: ReportFormat, ctx: &ReportContext<'_>, summary: &RunSummary) -> AppResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(ctx, summary)),
        ReportFormat::Json => render_json(ctx, summary),
    }
}

// =============================================================================
// Text
// =============================================================================

/// Renders the fixed-width text receipt.
pub fn render_text(ctx: &ReportContext<'_>, summary: &RunSummary) -> String {
    let dp = ctx.precision;
    let mut out: Vec<String> = Vec::new();

    out.push(format!("=== SALES REPORT: {} ===", ctx.input_name));
    out.push(format!(
        "Generated: {}",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push(format!(
        "Catalog: {} entries, {} warnings",
        ctx.catalog_entries,
        ctx.catalog_warnings.len()
    ));
    for warning in ctx.catalog_warnings {
        out.push(format!("  ! {}", warning));
    }

    if summary.results.is_empty() {
        out.push(String::new());
        out.push("No sale records.".to_string());
    }

    for sale in &summary.results {
        out.push(String::new());
        push_sale(&mut out, sale, dp);
    }

    out.push(String::new());
    out.push("=".repeat(RULE_WIDTH));
    out.push(format!(
        "{:>LABEL_WIDTH$} {:>SUBTOTAL_WIDTH$}",
        "GRAND TOTAL",
        summary.grand_total.format_fixed(dp)
    ));
    out.push(String::new());
    out.push(format!(
        "Elapsed time (s): {:.6}",
        summary.elapsed.as_secs_f64()
    ));

    match ctx.warning_total(summary) {
        0 => out.push("No errors detected.".to_string()),
        n => out.push(format!("{} warning(s) detected.", n)),
    }

    out.join("\n") + "\n"
}

fn push_sale(out: &mut Vec<String>, sale: &SaleResult, dp: u32) {
    out.push(format!("Sale #{}", sale.record_index));

    if sale.lines.is_empty() {
        out.push("No valid sales lines.".to_string());
    } else {
        out.push(format!(
            "{:<PRODUCT_WIDTH$} {:>QTY_WIDTH$} {:>UNIT_WIDTH$} {:>SUBTOTAL_WIDTH$}",
            "Product", "Qty", "Unit", "Subtotal"
        ));
        out.push("-".repeat(RULE_WIDTH));
        for line in &sale.lines {
            out.push(line_row(line, dp));
        }
        out.push("-".repeat(RULE_WIDTH));
    }

    out.push(format!(
        "{:>LABEL_WIDTH$} {:>SUBTOTAL_WIDTH$}",
        "TOTAL",
        sale.total_cost.format_fixed(dp)
    ));
    for warning in &sale.warnings {
        out.push(format!("  ! {}", warning));
    }
}

fn line_row(line: &LineResult, dp: u32) -> String {
    let product: String = line.product_id.chars().take(PRODUCT_WIDTH).collect();
    let qty = line
        .quantity
        .map_or_else(|| MISSING.to_string(), |q| q.format_fixed(dp));
    let unit = amount_or_missing(line.unit_price, dp);
    let subtotal = amount_or_missing(line.subtotal, dp);

    format!(
        "{:<PRODUCT_WIDTH$} {:>QTY_WIDTH$} {:>UNIT_WIDTH$} {:>SUBTOTAL_WIDTH$}",
        product, qty, unit, subtotal
    )
}

fn amount_or_missing(amount: Option<Money>, dp: u32) -> String {
    amount.map_or_else(|| MISSING.to_string(), |m| m.format_fixed(dp))
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a str,
    generated_at: DateTime<Utc>,
    precision: u32,
    catalog: JsonCatalog<'a>,
    sales: Vec<JsonSale<'a>>,
    grand_total: String,
    elapsed_secs: f64,
    warning_count: usize,
}

#[derive(Serialize)]
struct JsonCatalog<'a> {
    entries: usize,
    warnings: Vec<JsonWarning<'a, CatalogWarning>>,
}

#[derive(Serialize)]
struct JsonSale<'a> {
    record_index: usize,
    lines: &'a [LineResult],
    total_cost: String,
    warnings: Vec<JsonWarning<'a, SaleWarning>>,
}

/// A warning's tagged fields plus its rendered message.
#[derive(Serialize)]
struct JsonWarning<'a, W: Serialize> {
    #[serde(flatten)]
    detail: &'a W,
    message: String,
}

fn json_warnings<W: Serialize + std::fmt::Display>(warnings: &[W]) -> Vec<JsonWarning<'_, W>> {
    warnings
        .iter()
        .map(|w| JsonWarning {
            detail: w,
            message: w.to_string(),
        })
        .collect()
}

/// Renders the pretty-printed JSON report.
pub fn render_json(ctx: &ReportContext<'_>, summary: &RunSummary) -> AppResult<String> {
    let dp = ctx.precision;
    let report = JsonReport {
        input: ctx.input_name,
        generated_at: ctx.generated_at,
        precision: dp,
        catalog: JsonCatalog {
            entries: ctx.catalog_entries,
            warnings: json_warnings(ctx.catalog_warnings),
        },
        sales: summary
            .results
            .iter()
            .map(|sale| JsonSale {
                record_index: sale.record_index,
                lines: &sale.lines,
                total_cost: sale.total_cost.format_fixed(dp),
                warnings: json_warnings(&sale.warnings),
            })
            .collect(),
        grand_total: summary.grand_total.format_fixed(dp),
        elapsed_secs: summary.elapsed.as_secs_f64(),
        warning_count: ctx.warning_total(summary),
    };

    let mut rendered = serde_json::to_string_pretty(&report)?;
    rendered.push('\n');
    Ok(rendered)
}

// =============================================================================
// Unit Tests
// =============================================================================
