use serde::Serialize;

use crate::data::aggregate::{aggregate, AggregationResult};
use crate::data::filter::{filter, Selection};
use crate::data::model::{Column, EngagementTable};
use crate::error::EmptyResultWarning;

pub const SUPPLIER_CHART_TITLE: &str = "Engagements by Supplier";
pub const COMPANY_CHART_TITLE: &str = "Engagements by Company";
pub const VALUE_AXIS_LABEL: &str = "Engagements";

// ---------------------------------------------------------------------------
// ChartSpec – one bar chart, ready to draw
// ---------------------------------------------------------------------------

/// Categorical bar chart: one bar per label, height from `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub total: usize,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest bar value, 0 for an empty chart.
    pub fn max_value(&self) -> usize {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Map an aggregation onto a chart.
pub fn present(result: &AggregationResult, title: &str) -> ChartSpec {
    let (labels, values) = result.groups.iter().cloned().unzip();
    ChartSpec {
        title: title.to_string(),
        x_label: result.column.header().to_string(),
        y_label: VALUE_AXIS_LABEL.to_string(),
        labels,
        values,
        total: result.total(),
    }
}

// ---------------------------------------------------------------------------
// Dashboard – everything shown after a successful search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Number of rows passing the selection.
    pub total_engagements: usize,
    pub by_supplier: ChartSpec,
    pub by_company: ChartSpec,
    /// Table indices of the matching rows.
    #[serde(skip)]
    pub row_indices: Vec<usize>,
}

impl Dashboard {
    pub fn kpi_text(&self) -> String {
        format_count(self.total_engagements)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Run filter → aggregate → present for the current selection.
pub fn build_dashboard(
    table: &EngagementTable,
    selection: &Selection,
) -> Result<Dashboard, EmptyResultWarning> {
    let filtered = filter(table, selection);
    if filtered.is_empty() {
        log::warn!("Selection matched none of {} rows", table.len());
        return Err(EmptyResultWarning);
    }

    let by_supplier = present(&aggregate(&filtered, Column::Supplier), SUPPLIER_CHART_TITLE);
    let by_company = present(&aggregate(&filtered, Column::Company), COMPANY_CHART_TITLE);
    log::debug!(
        "{} rows matched: {} suppliers, {} companies",
        filtered.len(),
        by_supplier.labels.len(),
        by_company.labels.len()
    );

    Ok(Dashboard {
        total_engagements: filtered.len(),
        by_supplier,
        by_company,
        row_indices: filtered.into_indices(),
    })
}

/// Format a count with thousands separators, e.g. `12,345`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
