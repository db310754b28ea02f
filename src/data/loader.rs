//! CSV price table → [`Dataset`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::StringRecord;

use crate::config::DATA;
use crate::domain::Observation;
use crate::models::Dataset;
use crate::utils::parse_date;

const DATE_HEADERS: &[&str] = &["date"];
const COMMODITY_HEADERS: &[&str] = &["commodity"];
// The source table spells it `Unitprice`
const PRICE_HEADERS: &[&str] = &["unit_price", "unitprice", "price"];

/// Positions of the columns we read. Everything else in the file is ignored.
struct Columns {
    date: usize,
    commodity: usize,
    price: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.contains(&h.trim().to_ascii_lowercase().as_str()))
        };

        let missing = |what: &str| {
            anyhow::anyhow!(
                "Missing '{}' column (found: {})",
                what,
                headers.iter().collect::<Vec<_>>().join(", ")
            )
        };

        Ok(Self {
            date: find(DATE_HEADERS).ok_or_else(|| missing("date"))?,
            commodity: find(COMMODITY_HEADERS).ok_or_else(|| missing("commodity"))?,
            price: find(PRICE_HEADERS).ok_or_else(|| missing("unit_price"))?,
        })
    }
}

/// Load a price table from disk. The dataset is named after the file stem.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| DATA.dataset_name.to_string());

    load_dataset_from_reader(&name, BufReader::new(file))
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Parse a price table from any reader.
///
/// Rows whose first field starts with `#` (HXL tag rows) and blank rows are skipped. Row numbers
/// in errors are 1-based and count the header.
pub fn load_dataset_from_reader<R: Read>(name: &str, reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read header row")?.clone();
    let columns = Columns::locate(&headers)?;

    let mut observations = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in rdr.records().enumerate() {
        let row = i + 2;
        let record = record.with_context(|| format!("Row {}: malformed record", row))?;

        if record.get(0).is_some_and(|f| f.starts_with('#')) || record.iter().all(str::is_empty) {
            skipped += 1;
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let raw_date = field(columns.date);
        let Some(date) = parse_date(raw_date) else {
            bail!("Row {}: unrecognised date '{}'", row, raw_date);
        };

        let commodity = field(columns.commodity);
        if commodity.is_empty() {
            bail!("Row {}: empty commodity", row);
        }

        let raw_price = field(columns.price);
        let unit_price: f64 = raw_price
            .parse()
            .with_context(|| format!("Row {}: unit price '{}' is not a number", row, raw_price))?;
        if !unit_price.is_finite() || unit_price < 0.0 {
            bail!("Row {}: unit price {} must be finite and non-negative", row, unit_price);
        }

        observations.push(Observation::new(date, commodity, unit_price));
    }

    let dataset = Dataset::new(name, observations);
    log::info!(
        "Loaded {} observations of {} commodities from {} ({} rows skipped)",
        dataset.len(),
        dataset.commodities().len(),
        name,
        skipped
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_header_aliases_and_tag_rows() {
        let csv = "\
Date,Market,Commodity,Unit,Unitprice
#date,#loc+market,#item+name,#item+unit,#value
2020-01-15,Nairobi,Maize,KG,45.5
15/02/2020,Nairobi,Beans,KG,90
";
        let dataset = load_dataset_from_reader("food", csv.as_bytes()).unwrap();
        assert_eq!(dataset.name, "food");
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.observations[0].commodity, "Maize");
        assert_eq!(dataset.observations[0].unit_price, 45.5);
        assert_eq!(
            dataset.observations[1].date,
            NaiveDate::from_ymd_opt(2020, 2, 15).unwrap()
        );
        assert_eq!(dataset.commodities(), vec!["Beans".to_string(), "Maize".to_string()]);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let csv = "date,commodity,unit_price\n2020-01-01,Maize,10\n2020-02-01,Maize,-3\n";
        let err = load_dataset_from_reader("food", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 3"), "{}", err);
    }

    #[test]
    fn test_bad_date_and_missing_column() {
        let csv = "date,commodity,unit_price\nyesterday,Maize,10\n";
        let err = load_dataset_from_reader("food", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unrecognised date"));

        let csv = "date,item,unit_price\n2020-01-01,Maize,10\n";
        let err = load_dataset_from_reader("food", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("commodity"));
    }
}
