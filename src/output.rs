use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

use crate::types::EmployeeStats;

/// File names produced by [`export_stats`], in write order.
pub const EXPORT_FILES: [&str; 6] = [
    "stats.json",
    "stats_age_by_status.csv",
    "stats_education_by_status.csv",
    "stats_position_by_gender.csv",
    "stats_department_by_gender.csv",
    "stats_gender_by_age.csv",
];

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print up to `max_rows` rows as a Markdown table.
pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Write the whole report: the JSON document the charts read, plus one CSV
/// per matrix table.
pub fn export_stats(stats: &EmployeeStats) -> Result<(), Box<dyn Error>> {
    write_json(EXPORT_FILES[0], stats)?;
    write_csv(EXPORT_FILES[1], &stats.age_data)?;
    write_csv(EXPORT_FILES[2], &stats.education_data)?;
    write_csv(EXPORT_FILES[3], &stats.position_data)?;
    write_csv(EXPORT_FILES[4], &stats.department_data)?;
    write_csv(EXPORT_FILES[5], &stats.gender_age_data)?;
    Ok(())
}
