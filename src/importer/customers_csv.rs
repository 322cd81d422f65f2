// ==========================================
// Customer Analytics - customers CSV parser
// ==========================================
// Reads the tabular customer source into raw records. Schema-on-read:
// every value stays a string until the canonicalizer runs.
// ==========================================

use crate::domain::customer::RawCustomerRecord;
use crate::importer::error::{IngestError, IngestResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Parses a customers CSV file into raw records.
///
/// Header matching is tolerant: headers are folded (trimmed, lowercased,
/// spaces to underscores) and looked up through a small alias table, so
/// `Customer ID`, `customer_id` and `id` all map to the same field.
/// Fully blank rows are skipped; everything else is kept for the
/// canonicalizer to judge.
pub fn parse_customers_csv(path: &Path) -> IngestResult<Vec<RawCustomerRecord>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate ragged rows
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(fold_header).collect();

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;

        let mut fields = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    fields.insert(header.clone(), trimmed.to_string());
                }
            }
        }

        if fields.is_empty() {
            continue;
        }

        // Row 1 is the first data row; the header line is not counted.
        records.push(map_customer_fields(fields, row_idx + 1));
    }

    Ok(records)
}

/// Trimmed, lowercased, inner whitespace as single underscores.
fn fold_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn map_customer_fields(mut fields: HashMap<String, String>, row_number: usize) -> RawCustomerRecord {
    RawCustomerRecord {
        customer_id: take_first(&mut fields, &["customer_id", "customerid", "cust_id", "id"]),
        name: take_first(&mut fields, &["name", "customer_name", "full_name"]),
        mobile_number: take_first(
            &mut fields,
            &["mobile_number", "mobile", "phone_number", "phone", "contact"],
        ),
        region: take_first(&mut fields, &["region", "zone", "area"]),
        created_at: take_first(
            &mut fields,
            &["created_at", "signup_date", "registration_date", "created"],
        ),
        row_number,
    }
}

fn take_first(fields: &mut HashMap<String, String>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| fields.remove(*alias))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_with_aliased_headers() {
        let file = write_csv(
            "Customer ID,Name,Mobile,Region,Signup Date\n\
             1, Amit Sharma ,9876543210,North,2023-11-02\n",
        );

        let records = parse_customers_csv(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer_id.as_deref(), Some("1"));
        assert_eq!(records[0].name.as_deref(), Some("Amit Sharma"));
        assert_eq!(records[0].mobile_number.as_deref(), Some("9876543210"));
        assert_eq!(records[0].created_at.as_deref(), Some("2023-11-02"));
        assert_eq!(records[0].row_number, 1);
    }

    #[test]
    fn test_blank_rows_and_missing_cells() {
        let file = write_csv(
            "customer_id,name,mobile_number,region\n\
             ,,,\n\
             2,Beena,,South\n",
        );

        let records = parse_customers_csv(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer_id.as_deref(), Some("2"));
        assert!(records[0].mobile_number.is_none());
        // row numbering counts the skipped blank row
        assert_eq!(records[0].row_number, 2);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_customers_csv(Path::new("/nonexistent/customers.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound(_)));
    }
}
