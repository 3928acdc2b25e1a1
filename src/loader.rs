//! Dataset loading. Rows arrive either as a JSON array of objects (the shape
//! a hosted table export produces) or as CSV with headers unknown in advance;
//! both become the same schemaless `RawRow` maps the builder consumes.

use std::error::Error;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value;

use crate::types::RawRow;

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parse_errors: usize,
}

pub fn load_rows(path: &str) -> Result<(Vec<RawRow>, LoadReport), Box<dyn Error>> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));
    if is_json {
        load_json(path)
    } else {
        load_csv(path)
    }
}

fn load_json(path: &str) -> Result<(Vec<RawRow>, LoadReport), Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let Value::Array(items) = value else {
        return Err(format!("{path}: expected a top-level JSON array of records").into());
    };
    let total_rows = items.len();
    let mut rows = Vec::with_capacity(total_rows);
    let mut parse_errors = 0usize;
    for item in items {
        match item {
            Value::Object(map) => rows.push(map),
            _ => parse_errors += 1,
        }
    }
    Ok((rows, LoadReport { total_rows, parse_errors }))
}

fn load_csv(path: &str) -> Result<(Vec<RawRow>, LoadReport), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    for result in rdr.records() {
        total_rows += 1;
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                parse_errors += 1;
                continue;
            }
        };
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let cell = cell.trim();
            let value = if cell.is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            row.insert(header.to_string(), value);
        }
        rows.push(row);
    }
    Ok((rows, LoadReport { total_rows, parse_errors }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn json_array_of_objects() {
        let path = temp_file(
            "pegawai_report_rows.json",
            r#"[{"kategori": "PNS", "usia": 45}, {"kategori": "KI"}, 17]"#,
        );
        let (rows, report) = load_rows(&path).unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.parse_errors, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("usia"), Some(&serde_json::json!(45)));
    }

    #[test]
    fn json_non_array_is_an_error() {
        let path = temp_file("pegawai_report_scalar.json", r#"{"kategori": "PNS"}"#);
        assert!(load_rows(&path).is_err());
    }

    #[test]
    fn csv_headers_become_keys_and_blanks_become_null() {
        let path = temp_file(
            "pegawai_report_rows.csv",
            "Jenis_Kelamin,Kategori,Usia\nL,PNS,45\nP,,\n",
        );
        let (rows, report) = load_rows(&path).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.parse_errors, 0);
        assert_eq!(rows[0].get("Kategori"), Some(&serde_json::json!("PNS")));
        assert_eq!(rows[1].get("Kategori"), Some(&serde_json::Value::Null));
    }
}
