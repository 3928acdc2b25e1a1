//! The aggregation pass: one traversal over the raw rows builds every table
//! of the report. A record contributes to a matrix cell only when all of the
//! cell's dimensions resolved; unresolvable fields narrow the contribution
//! silently instead of failing the build.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;

use crate::age::normalize_age_bucket;
use crate::fields::{self, pick_field, FieldOverrides};
use crate::normalize::{
    normalize_education, normalize_gender, normalize_label, normalize_position_group,
    normalize_status,
};
use crate::types::{
    AgeBucket, AgeRow, CategoryRow, DepartmentRow, EducationLevel, EducationRow, EmployeeStats,
    Gender, GenderAgeRow, PositionGroup, PositionRow, RawRow, StatusCounts, StatusKey, Summary,
};

pub const CATEGORY_PALETTE: [&str; 8] = [
    "#3b82f6", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#06b6d4", "#14b8a6", "#f97316",
];
pub const MALE_LABEL: &str = "Laki-laki";
pub const FEMALE_LABEL: &str = "Perempuan";
pub const MALE_COLOR: &str = "#3b82f6";
pub const FEMALE_COLOR: &str = "#ec4899";

/// Everything the builder needs beyond the rows themselves. `today` anchors
/// the age-from-birth-date computation; tests pin it for determinism.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub overrides: FieldOverrides,
    pub today: NaiveDate,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            overrides: FieldOverrides::default(),
            today: Local::now().date_naive(),
        }
    }
}

impl BuildOptions {
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            overrides: FieldOverrides::default(),
            today,
        }
    }
}

/// Build the full aggregate report from raw rows.
///
/// Pure and total: never fails, never mutates its input, and returns a
/// well-formed report (all zeros included) for any input.
pub fn build_stats(rows: &[RawRow], opts: &BuildOptions) -> EmployeeStats {
    let ov = &opts.overrides;

    let mut status_counts = StatusCounts::default();
    let mut age_rows: Vec<AgeRow> = AgeBucket::ALL.iter().map(|b| AgeRow::new(b.label())).collect();
    let mut education_rows: Vec<EducationRow> = EducationLevel::ALL
        .iter()
        .map(|l| EducationRow::new(l.label()))
        .collect();
    let mut gender_age_rows: Vec<GenderAgeRow> = AgeBucket::ALL
        .iter()
        .map(|b| GenderAgeRow::new(b.label()))
        .collect();
    // (male, female) cells per canonical group; the fixed array guarantees
    // all five groups appear in the output even at zero.
    let mut position_cells = [(0usize, 0usize); 5];
    // Keyed by lowercased label; the stored row keeps first-seen casing.
    let mut departments: HashMap<String, DepartmentRow> = HashMap::new();
    let mut male_employees = 0usize;
    let mut female_employees = 0usize;

    for row in rows {
        let status =
            pick_field(row, fields::STATUS_FIELDS, ov.status.as_deref()).and_then(normalize_status);
        if let Some(status) = status {
            status_counts.bump(status);
        }

        let gender =
            pick_field(row, fields::GENDER_FIELDS, ov.gender.as_deref()).and_then(normalize_gender);
        match gender {
            Some(Gender::Male) => male_employees += 1,
            Some(Gender::Female) => female_employees += 1,
            None => {}
        }

        let age_bucket = pick_field(row, fields::AGE_FIELDS, ov.age.as_deref())
            .and_then(|v| normalize_age_bucket(v, opts.today))
            .or_else(|| {
                pick_field(row, fields::BIRTH_DATE_FIELDS, ov.birth_date.as_deref())
                    .and_then(|v| normalize_age_bucket(v, opts.today))
            });

        if let (Some(bucket), Some(gender)) = (age_bucket, gender) {
            let cell = &mut gender_age_rows[bucket.index()];
            match gender {
                Gender::Male => cell.male += 1,
                Gender::Female => cell.female += 1,
            }
        }

        if let (Some(bucket), Some(status)) = (age_bucket, status) {
            age_rows[bucket.index()].add(status);
        }

        let education = pick_field(row, fields::EDUCATION_FIELDS, ov.education.as_deref())
            .and_then(normalize_education);
        if let (Some(level), Some(status)) = (education, status) {
            education_rows[level.index()].add(status);
        }

        // Position and department are gender breakdowns; without a resolved
        // gender the record has nothing to contribute to either.
        if let Some(gender) = gender {
            let position = pick_field(row, fields::POSITION_FIELDS, ov.position.as_deref());
            let eselon = pick_field(row, fields::ESELON_FIELDS, ov.eselon.as_deref());
            let group = normalize_position_group(position, eselon);
            let cell = &mut position_cells[group.index()];
            match gender {
                Gender::Male => cell.0 += 1,
                Gender::Female => cell.1 += 1,
            }

            let department = pick_field(row, fields::DEPARTMENT_FIELDS, ov.department.as_deref())
                .and_then(normalize_label);
            if let Some(label) = department {
                let entry = departments
                    .entry(label.to_lowercase())
                    .or_insert_with(|| DepartmentRow::new(label));
                match gender {
                    Gender::Male => entry.male += 1,
                    Gender::Female => entry.female += 1,
                }
            }
        }
    }

    let age_category_data = StatusKey::ORDER
        .iter()
        .copied()
        .filter(|s| *s != StatusKey::Ppnpn)
        .map(|s| CategoryRow {
            name: s.label().to_string(),
            value: status_counts.get(s),
            color: s.color(),
        })
        .collect();

    let education_chart = EducationLevel::ALL
        .iter()
        .map(|l| CategoryRow {
            name: l.label().to_string(),
            value: education_rows[l.index()].total,
            color: l.color(),
        })
        .collect();

    let position_data: Vec<PositionRow> = PositionGroup::ALL
        .iter()
        .map(|g| PositionRow {
            position: g.label().to_string(),
            male: position_cells[g.index()].0,
            female: position_cells[g.index()].1,
        })
        .collect();
    let position_category = palette_categories(position_data.iter().map(|r| (r.position.clone(), r.male + r.female)));

    let mut department_data: Vec<DepartmentRow> = departments.into_values().collect();
    // Case-insensitive label order, original casing as tie-break.
    department_data.sort_by(|a, b| {
        a.dept
            .to_lowercase()
            .cmp(&b.dept.to_lowercase())
            .then_with(|| a.dept.cmp(&b.dept))
    });
    let department_category = palette_categories(department_data.iter().map(|r| (r.dept.clone(), r.male + r.female)));

    let gender_category = vec![
        CategoryRow {
            name: MALE_LABEL.to_string(),
            value: male_employees,
            color: MALE_COLOR,
        },
        CategoryRow {
            name: FEMALE_LABEL.to_string(),
            value: female_employees,
            color: FEMALE_COLOR,
        },
    ];

    // Raw row count wins whenever rows exist, even when some statuses went
    // unrecognized; the summed counts only stand in when no rows were given.
    let total_employees = if rows.is_empty() {
        status_counts.sum()
    } else {
        rows.len()
    };

    EmployeeStats {
        summary: Summary {
            total_employees,
            male_employees,
            female_employees,
            status_counts,
        },
        age_data: age_rows,
        age_category_data,
        education_data: education_rows,
        education_chart,
        position_data,
        position_category,
        department_data,
        department_category,
        gender_age_data: gender_age_rows,
        gender_category,
    }
}

/// Pie slices colored by cycling the shared palette.
fn palette_categories<I>(items: I) -> Vec<CategoryRow>
where
    I: Iterator<Item = (String, usize)>,
{
    items
        .enumerate()
        .map(|(i, (name, value))| CategoryRow {
            name,
            value,
            color: CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()],
        })
        .collect()
}

/// Literal placeholder report shown before any data has loaded. Not derived
/// from rows; callers opt into it explicitly.
pub static FALLBACK_STATS: Lazy<EmployeeStats> = Lazy::new(|| {
    let age_data = vec![
        AgeRow { range: "20-30".into(), pns: 5, cpns: 8, pppk: 12, ki: 45, total: 70 },
        AgeRow { range: "31-40".into(), pns: 17, cpns: 2, pppk: 11, ki: 32, total: 62 },
        AgeRow { range: "41-50".into(), pns: 15, cpns: 0, pppk: 0, ki: 7, total: 22 },
        AgeRow { range: "51+".into(), pns: 4, cpns: 2, pppk: 0, ki: 21, total: 27 },
    ];
    let age_category_data = vec![
        CategoryRow { name: "PNS".into(), value: 41, color: StatusKey::Pns.color() },
        CategoryRow { name: "CPNS".into(), value: 12, color: StatusKey::Cpns.color() },
        CategoryRow { name: "PPPK".into(), value: 23, color: StatusKey::Pppk.color() },
        CategoryRow { name: "KI".into(), value: 105, color: StatusKey::Ki.color() },
    ];
    let education_data = vec![
        EducationRow { level: "SLTA".into(), pns: 5, cpns: 1, pppk: 8, ki: 9, total: 23 },
        EducationRow { level: "D1-D3".into(), pns: 8, cpns: 2, pppk: 4, ki: 18, total: 32 },
        EducationRow { level: "S1-D4".into(), pns: 20, cpns: 8, pppk: 8, ki: 65, total: 101 },
        EducationRow { level: "S2".into(), pns: 8, cpns: 1, pppk: 3, ki: 10, total: 22 },
        EducationRow { level: "S3".into(), pns: 0, cpns: 0, pppk: 0, ki: 3, total: 3 },
    ];
    let education_chart = EducationLevel::ALL
        .iter()
        .zip([23, 32, 101, 22, 3])
        .map(|(l, value)| CategoryRow {
            name: l.label().to_string(),
            value,
            color: l.color(),
        })
        .collect();
    let position_data = vec![
        PositionRow { position: "Eselon II".into(), male: 0, female: 1 },
        PositionRow { position: "Eselon III".into(), male: 2, female: 2 },
        PositionRow { position: "Eselon IV".into(), male: 0, female: 0 },
        PositionRow { position: "JFT".into(), male: 54, female: 2 },
        PositionRow { position: "JFU".into(), male: 13, female: 2 },
    ];
    let position_category = vec![
        CategoryRow { name: "JFT".into(), value: 56, color: CATEGORY_PALETTE[0] },
        CategoryRow { name: "JFU".into(), value: 15, color: CATEGORY_PALETTE[1] },
        CategoryRow { name: "Eselon III".into(), value: 4, color: CATEGORY_PALETTE[2] },
        CategoryRow { name: "Eselon II".into(), value: 1, color: CATEGORY_PALETTE[3] },
    ];
    let department_data = vec![
        DepartmentRow { dept: "III".into(), male: 2, female: 0 },
        DepartmentRow { dept: "III/a".into(), male: 18, female: 6 },
        DepartmentRow { dept: "III/b".into(), male: 6, female: 2 },
        DepartmentRow { dept: "III/c".into(), male: 8, female: 2 },
        DepartmentRow { dept: "III/d".into(), male: 4, female: 2 },
        DepartmentRow { dept: "IV/a".into(), male: 3, female: 0 },
        DepartmentRow { dept: "IV/b".into(), male: 3, female: 0 },
        DepartmentRow { dept: "IV/c".into(), male: 22, female: 5 },
        DepartmentRow { dept: "V".into(), male: 21, female: 8 },
        DepartmentRow { dept: "V/a".into(), male: 6, female: 1 },
        DepartmentRow { dept: "V/b".into(), male: 3, female: 0 },
        DepartmentRow { dept: "VI".into(), male: 7, female: 7 },
    ];
    let department_category =
        palette_categories(department_data.iter().map(|r| (r.dept.clone(), r.male + r.female)));
    let gender_age_data = vec![
        GenderAgeRow { age: "20-30".into(), male: 45, female: 25 },
        GenderAgeRow { age: "31-40".into(), male: 48, female: 14 },
        GenderAgeRow { age: "41-50".into(), male: 20, female: 2 },
        GenderAgeRow { age: "51+".into(), male: 15, female: 12 },
    ];
    let gender_category = vec![
        CategoryRow { name: MALE_LABEL.into(), value: 128, color: MALE_COLOR },
        CategoryRow { name: FEMALE_LABEL.into(), value: 53, color: FEMALE_COLOR },
    ];
    EmployeeStats {
        summary: Summary {
            total_employees: 181,
            male_employees: 128,
            female_employees: 53,
            status_counts: StatusCounts { pns: 41, cpns: 12, pppk: 23, ppnpn: 0, ki: 105 },
        },
        age_data,
        age_category_data,
        education_data,
        education_chart,
        position_data,
        position_category,
        department_data,
        department_category,
        gender_age_data,
        gender_category,
    }
});
