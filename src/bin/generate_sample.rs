use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_xlsxwriter::Workbook;

/// Sheet name the dashboard reads by default.
const SHEET_NAME: &str = "m16j_supplier_analytics (2).csv";

const HEADERS: [&str; 4] = ["Supplier Name", "Company Name", "Product Name", "Engagement Date"];

const SUPPLIERS: [&str; 6] = [
    "Northwind Traders",
    "Contoso Supply",
    "Fabrikam Parts",
    "Litware Logistics",
    "Tailspin Components",
    "Adventure Works",
];

const COMPANIES: [&str; 5] = [
    "Globex",
    "Initech",
    "Umbrella Corp",
    "Stark Industries",
    "Wayne Enterprises",
];

const PRODUCTS: [&str; 7] = [
    "Steel Brackets",
    "Copper Wire",
    "Circuit Boards",
    "Packaging Film",
    "Hydraulic Pumps",
    "Fasteners",
    "Safety Gloves",
];

#[derive(Parser)]
#[command(about = "Write a sample supplier engagement workbook")]
struct Args {
    #[arg(long, default_value = "supplier_engagement.xlsx", help = "Output workbook")]
    output: PathBuf,
    #[arg(long, default_value_t = 2_000, help = "Number of engagement rows")]
    rows: u32,
    #[arg(long, default_value_t = 42, help = "Random seed")]
    seed: u64,
}

/// Minimal deterministic PRNG (splitmix64).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Index into a slice of `len` items, skewed towards the front so the
    /// charts show uneven bars.
    fn skewed_index(&mut self, len: usize) -> usize {
        let a = (self.next_u64() % len as u64) as usize;
        let b = (self.next_u64() % len as u64) as usize;
        a.min(b)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for row in 1..=args.rows {
        let supplier = SUPPLIERS[rng.skewed_index(SUPPLIERS.len())];
        let company = COMPANIES[rng.skewed_index(COMPANIES.len())];
        let product = PRODUCTS[(rng.next_u64() % PRODUCTS.len() as u64) as usize];
        let month = 1 + rng.next_u64() % 12;
        let day = 1 + rng.next_u64() % 28;

        worksheet.write_string(row, 0, supplier)?;
        worksheet.write_string(row, 1, company)?;
        worksheet.write_string(row, 2, product)?;
        worksheet.write_string(row, 3, format!("2024-{month:02}-{day:02}"))?;
    }

    worksheet.autofit();

    workbook
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} engagements to {} (sheet \"{SHEET_NAME}\")",
        args.rows,
        args.output.display()
    );
    Ok(())
}
