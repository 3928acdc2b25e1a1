//! Field resolution over schemaless records.
//!
//! Each logical field role (status, gender, age, ...) carries an ordered list
//! of accepted key spellings. An explicit override key, when configured, is
//! checked before the alias list and short-circuits it.

use serde_json::Value;

use crate::types::RawRow;

pub const STATUS_FIELDS: &[&str] = &[
    "status",
    "status_pegawai",
    "statuspegawai",
    "status_kepegawaian",
    "statuskepegawaian",
    "status_kepeg",
    "employee_status",
    "employment_status",
    "kategori",
    "kategori_pegawai",
    "kategoripegawai",
    "jenis_pegawai",
    "jenispegawai",
];

pub const GENDER_FIELDS: &[&str] = &[
    "gender",
    "jenis_kelamin",
    "jeniskelamin",
    "kelamin",
    "sex",
    "jk",
];

pub const AGE_FIELDS: &[&str] = &[
    "age",
    "umur",
    "usia",
    "age_years",
    "ageyears",
    "usia_tahun",
    "umur_tahun",
    "usia_pegawai",
    "umur_pegawai",
];

pub const BIRTH_DATE_FIELDS: &[&str] = &[
    "tanggal_lahir",
    "tanggallahir",
    "tgl_lahir",
    "tgllahir",
    "birth_date",
    "birthdate",
    "date_of_birth",
    "dob",
];

pub const EDUCATION_FIELDS: &[&str] = &[
    "education",
    "pendidikan",
    "pendidikan_terakhir",
    "pendidikanterakhir",
    "pendidikan_akhir",
    "pendidikanakhir",
    "pendidikan_tertinggi",
    "education_level",
    "tingkat_pendidikan",
    "tingkatpendidikan",
];

pub const POSITION_FIELDS: &[&str] = &[
    "position",
    "jabatan",
    "job_title",
    "jobtitle",
    "jabatan_name",
    "jabatanname",
    "position_name",
    "jabatan_akhir",
    "jabatanakhir",
];

pub const DEPARTMENT_FIELDS: &[&str] = &[
    "department",
    "golongan",
    "grade",
    "rank",
    "golongan_ruang",
    "golonganruang",
    "gol_ruang",
];

pub const ESELON_FIELDS: &[&str] = &["eselon"];

/// Per-role key-name overrides, typically sourced from the environment at the
/// binary edge. Kept as an explicit value so tests can inject their own
/// without touching process state.
#[derive(Debug, Clone, Default)]
pub struct FieldOverrides {
    pub status: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub birth_date: Option<String>,
    pub education: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub eselon: Option<String>,
}

impl FieldOverrides {
    /// Read `EMPLOYEE_FIELD_*` variables. Empty or whitespace-only values are
    /// treated as unset.
    pub fn from_env() -> Self {
        fn read(name: &str) -> Option<String> {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            status: read("EMPLOYEE_FIELD_STATUS"),
            gender: read("EMPLOYEE_FIELD_GENDER"),
            age: read("EMPLOYEE_FIELD_AGE"),
            birth_date: read("EMPLOYEE_FIELD_BIRTHDATE"),
            education: read("EMPLOYEE_FIELD_EDUCATION"),
            position: read("EMPLOYEE_FIELD_POSITION"),
            department: read("EMPLOYEE_FIELD_DEPARTMENT"),
            eselon: read("EMPLOYEE_FIELD_ESELON"),
        }
    }
}

/// Resolve a field role against one record.
///
/// The override key, if present in the record (case-insensitively), wins. If
/// the override is configured but absent from the record, the alias scan
/// still runs. Keys are walked in record insertion order and the first alias
/// hit is returned; a record without any matching key yields `None`, which
/// downstream simply narrows that record's contribution to the aggregates.
pub fn pick_field<'a>(row: &'a RawRow, aliases: &[&str], override_key: Option<&str>) -> Option<&'a Value> {
    if let Some(name) = override_key {
        if let Some((_, value)) = row.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            return Some(value);
        }
    }
    row.iter()
        .find(|(k, _)| aliases.iter().any(|a| k.eq_ignore_ascii_case(a)))
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> RawRow {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn picks_first_alias_in_record_order() {
        let r = row(json!({"nama": "Budi", "kelamin": "L", "gender": "P"}));
        // "kelamin" appears before "gender" in the record, so it wins even
        // though "gender" is listed first among the aliases.
        assert_eq!(pick_field(&r, GENDER_FIELDS, None), Some(&json!("L")));
    }

    #[test]
    fn alias_match_is_case_insensitive() {
        let r = row(json!({"Jenis_Kelamin": "P"}));
        assert_eq!(pick_field(&r, GENDER_FIELDS, None), Some(&json!("P")));
    }

    #[test]
    fn override_key_beats_aliases() {
        let r = row(json!({"kategori": "PNS", "Kolom_Khusus": "PPPK"}));
        assert_eq!(
            pick_field(&r, STATUS_FIELDS, Some("kolom_khusus")),
            Some(&json!("PPPK"))
        );
    }

    #[test]
    fn missing_override_falls_back_to_aliases() {
        let r = row(json!({"kategori": "PNS"}));
        assert_eq!(
            pick_field(&r, STATUS_FIELDS, Some("kolom_khusus")),
            Some(&json!("PNS"))
        );
    }

    #[test]
    fn unresolvable_field_is_none() {
        let r = row(json!({"nama": "Budi"}));
        assert_eq!(pick_field(&r, STATUS_FIELDS, None), None);
        assert_eq!(pick_field(&r, STATUS_FIELDS, Some("kolom_khusus")), None);
    }
}
