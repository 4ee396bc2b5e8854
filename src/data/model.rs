use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column – the three fixed columns of an engagement table
// ---------------------------------------------------------------------------

/// One of the three named columns every engagement table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Supplier,
    Company,
    Product,
}

impl Column {
    /// All columns in source order (spreadsheet columns A, B, C).
    pub const ALL: [Column; 3] = [Column::Supplier, Column::Company, Column::Product];

    /// Header text expected in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Supplier => "Supplier Name",
            Column::Company => "Company Name",
            Column::Product => "Product Name",
        }
    }

    /// Short label used by the filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            Column::Supplier => "Supplier",
            Column::Company => "Company",
            Column::Product => "Product",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Column::Supplier => 0,
            Column::Company => 1,
            Column::Product => 2,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Engagement – one row of the table
// ---------------------------------------------------------------------------

/// A single supplier–company–product record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Engagement {
    pub supplier: String,
    pub company: String,
    pub product: String,
}

impl Engagement {
    pub fn new(
        supplier: impl Into<String>,
        company: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            supplier: supplier.into(),
            company: company.into(),
            product: product.into(),
        }
    }

    /// Value of the given column for this row.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Supplier => &self.supplier,
            Column::Company => &self.company,
            Column::Product => &self.product,
        }
    }
}

// ---------------------------------------------------------------------------
// EngagementTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded table with the per-column option lists pre-computed.
///
/// Never mutated after construction; the application shares it behind an
/// `Arc` and replaces it wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementTable {
    rows: Vec<Engagement>,
    /// Distinct values per column, in order of first occurrence.
    unique_values: [Vec<String>; 3],
}

impl EngagementTable {
    /// Build the option lists from the loaded rows.
    pub fn from_rows(rows: Vec<Engagement>) -> Self {
        let mut unique_values: [Vec<String>; 3] = Default::default();
        for column in Column::ALL {
            let mut seen: HashSet<&str> = HashSet::new();
            let values = &mut unique_values[column.index()];
            for row in &rows {
                let value = row.get(column);
                if seen.insert(value) {
                    values.push(value.to_string());
                }
            }
        }
        EngagementTable {
            rows,
            unique_values,
        }
    }

    pub fn rows(&self) -> &[Engagement] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Engagement> {
        self.rows.get(index)
    }

    /// Distinct values of `column` across the whole table.
    pub fn unique_values(&self, column: Column) -> &[String] {
        &self.unique_values[column.index()]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
