use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use super::{models::Property, Catalog};

/// Column order of the catalog file.
const NAME: usize = 0;
const COLOR: usize = 1;
const CODE: usize = 2;
const COST: usize = 3;
const RENT: usize = 4;
const HOUSE_COST: usize = 5;

/// Reads a property catalog from a CSV file with a single header row.
///
/// Columns are `name, color, code, cost, rent, house cost`, where `rent` is a
/// whitespace-separated list of integers. Numeric fields that fail to parse
/// become zero rather than aborting the load.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the catalog at `path`, preserving file order.
    pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("could not open properties file {}", path.display()))?;
        let catalog = Self::from_reader(file)
            .with_context(|| format!("could not read csv {}", path.display()))?;
        info!(path = %path.display(), properties = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse catalog rows from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Catalog> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut properties = Vec::new();
        for (index, record) in csv.records().enumerate() {
            let record = record.with_context(|| format!("malformed catalog row {}", index + 2))?;
            properties.push(parse_row(&record));
        }

        Ok(Catalog::new(properties))
    }
}

fn parse_row(record: &StringRecord) -> Property {
    let text = |column: usize| record.get(column).unwrap_or_default().to_string();
    let code = text(CODE);
    let rent = record
        .get(RENT)
        .unwrap_or_default()
        .split_whitespace()
        .map(|raw| lenient_int(&code, "rent", raw))
        .collect();

    Property::new(
        text(NAME),
        text(COLOR),
        code.clone(),
        lenient_int(&code, "cost", record.get(COST).unwrap_or_default()),
        rent,
        lenient_int(&code, "house cost", record.get(HOUSE_COST).unwrap_or_default()),
    )
}

fn lenient_int(code: &str, field: &str, raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(code, field, raw, "Unparseable catalog number, using 0");
            0
        }
    }
}
