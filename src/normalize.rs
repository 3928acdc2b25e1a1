//! Value normalizers: fold inconsistent free-text conventions into the closed
//! enumerations of the report.
//!
//! These are best-effort heuristics. A title the keyword lists do not cover
//! classifies as JFU; that is a known limitation of free-text matching, not a
//! data-integrity failure.

use serde_json::Value;

use crate::types::{EducationLevel, Gender, PositionGroup, StatusKey};
use crate::util::{compact_text, contains_word, squash_text, value_text};

/// Free-text spellings accepted for each status category, lowercase and
/// punctuation-free (they are matched against squashed text).
pub fn status_aliases(key: StatusKey) -> &'static [&'static str] {
    match key {
        StatusKey::Pns => &["pns", "pegawai negeri sipil"],
        StatusKey::Cpns => &["cpns", "calon pegawai negeri sipil"],
        StatusKey::Pppk => &["pppk", "pegawai pemerintah dengan perjanjian kerja"],
        StatusKey::Ppnpn => &[
            "ppnpn",
            "ppn pn",
            "pegawai pemerintah non pns",
            "pegawai pemerintah non pegawai negara",
        ],
        StatusKey::Ki => &[
            "ki",
            "karyawan insidental",
            "karyawan insidentil",
            "karyawan incidental",
        ],
    }
}

/// Short aliases need a whole-word hit so "pns" cannot fire inside "cpns";
/// longer aliases match by containment.
fn match_alias(squashed: &str, alias: &str) -> bool {
    if alias.len() <= 4 {
        squashed == alias || contains_word(squashed, alias)
    } else {
        squashed == alias || squashed.contains(alias)
    }
}

pub fn normalize_status(value: &Value) -> Option<StatusKey> {
    let raw = value_text(value)?;
    let squashed = squash_text(raw.trim());
    if squashed.is_empty() {
        return None;
    }
    // Exact alias pass first: "pegawai pemerintah non pns" is a registered
    // PPnPN spelling and must not be claimed by PNS through the word rule.
    for key in StatusKey::ORDER {
        if status_aliases(key).iter().any(|a| squashed == *a) {
            return Some(key);
        }
    }
    for key in StatusKey::ORDER {
        if status_aliases(key).iter().any(|a| match_alias(&squashed, a)) {
            return Some(key);
        }
    }
    None
}

const MALE_CODES: &[&str] = &["l", "lk", "m", "male", "pria", "laki", "laki-laki"];
const FEMALE_CODES: &[&str] = &["p", "pr", "f", "female", "wanita", "perempuan"];

pub fn normalize_gender(value: &Value) -> Option<Gender> {
    let raw = value_text(value)?;
    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        return None;
    }
    if MALE_CODES.contains(&raw.as_str()) {
        return Some(Gender::Male);
    }
    if FEMALE_CODES.contains(&raw.as_str()) {
        return Some(Gender::Female);
    }
    if raw.contains("laki") {
        return Some(Gender::Male);
    }
    if raw.contains("perempuan") || raw.contains("wanita") {
        return Some(Gender::Female);
    }
    None
}

/// The rules run in strict priority order, highest level first, so "S1
/// Informatika" lands on S1-D4 before the broader diploma rule can see it.
pub fn normalize_education(value: &Value) -> Option<EducationLevel> {
    let raw = value_text(value)?;
    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        return None;
    }
    let compact = compact_text(&raw);
    let words = squash_text(&raw);
    if compact.contains("s3") || raw.contains("doktor") || raw.contains("phd") {
        return Some(EducationLevel::S3);
    }
    if compact.contains("s2") || raw.contains("magister") || raw.contains("master") {
        return Some(EducationLevel::S2);
    }
    if compact.contains("s1")
        || compact.contains("d4")
        || has_d_roman(&words, &["iv"])
        || raw.contains("sarjana")
    {
        return Some(EducationLevel::S1D4);
    }
    if compact.contains("d1")
        || compact.contains("d2")
        || compact.contains("d3")
        || has_d_roman(&words, &["i", "ii", "iii"])
        || raw.contains("diploma")
    {
        return Some(EducationLevel::D1D3);
    }
    if raw.contains("slta") || raw.contains("sma") || raw.contains("smk") || raw.contains("ma") {
        return Some(EducationLevel::Slta);
    }
    None
}

/// Detect roman-numeral diploma spellings over squashed text: "d iv" split
/// across tokens, or fused forms like "div" / "diii" left by punctuation
/// removal ("D-IV", "D.III").
fn has_d_roman(words: &str, numerals: &[&str]) -> bool {
    let tokens: Vec<&str> = words.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        if *token == "d" {
            if let Some(next) = tokens.get(i + 1) {
                if numerals.contains(next) {
                    return true;
                }
            }
        }
        if let Some(rest) = token.strip_prefix('d') {
            if !rest.is_empty() && numerals.contains(&rest) {
                return true;
            }
        }
    }
    false
}

/// Department/rank labels pass through untouched apart from trimming; the
/// aggregation keys them case-insensitively but displays first-seen casing.
pub fn normalize_label(value: &Value) -> Option<String> {
    let raw = value_text(value)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

const JFT_KEYWORDS: &[&str] = &[
    "jft",
    "fungsional tertentu",
    "ahli",
    "pranata",
    "arsiparis",
    "analis",
    "guru",
    "dosen",
    "dokter",
    "perawat",
    "bidan",
    "apoteker",
    "penyuluh",
    "pengawas",
    "auditor",
    "pustakawan",
    "widyaiswara",
    "statistisi",
    "assesor",
];

/// Classify a record into one of the five position groups.
///
/// An explicit non-empty eselon field wins over any title inference. The
/// numeral checks go exact-first and then longest-first: "III/b" must not
/// read as Eselon II, and "IV.a" must not fall through to title keywords.
pub fn normalize_position_group(position: Option<&Value>, eselon: Option<&Value>) -> PositionGroup {
    if let Some(raw) = eselon.and_then(value_text) {
        let tag = raw.trim().to_uppercase();
        match tag.as_str() {
            "" => {}
            "II" => return PositionGroup::EselonII,
            "III" => return PositionGroup::EselonIII,
            "IV" => return PositionGroup::EselonIV,
            _ => {
                if tag.contains("III") {
                    return PositionGroup::EselonIII;
                }
                if tag.contains("IV") {
                    return PositionGroup::EselonIV;
                }
                if tag.contains("II") {
                    return PositionGroup::EselonII;
                }
                // Unrecognized tag (e.g. "V"): fall through to the title.
            }
        }
    }

    let text = match position.and_then(value_text) {
        Some(t) => t.trim().to_lowercase(),
        None => return PositionGroup::Jfu,
    };
    if text.is_empty() {
        return PositionGroup::Jfu;
    }

    // "eselon iii" contains "eselon ii", so the longer form is tested first.
    if text.contains("eselon iii") {
        return PositionGroup::EselonIII;
    }
    if text.contains("eselon iv") {
        return PositionGroup::EselonIV;
    }
    if text.contains("eselon ii") {
        return PositionGroup::EselonII;
    }

    if JFT_KEYWORDS.iter().any(|k| text.contains(k)) {
        return PositionGroup::Jft;
    }
    PositionGroup::Jfu
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_status_alias_resolves_to_its_own_category() {
        for key in StatusKey::ORDER {
            for alias in status_aliases(key) {
                assert_eq!(
                    normalize_status(&json!(alias)),
                    Some(key),
                    "alias {alias:?}"
                );
                assert_eq!(
                    normalize_status(&json!(alias.to_uppercase())),
                    Some(key),
                    "alias {alias:?} (uppercase)"
                );
            }
        }
    }

    #[test]
    fn short_aliases_need_word_boundaries() {
        assert_eq!(normalize_status(&json!("CPNS")), Some(StatusKey::Cpns));
        assert_eq!(
            normalize_status(&json!("Status: PNS (aktif)")),
            Some(StatusKey::Pns)
        );
        assert_eq!(normalize_status(&json!("pegawai harian")), None);
    }

    #[test]
    fn status_rejects_blank_and_non_text() {
        assert_eq!(normalize_status(&json!("")), None);
        assert_eq!(normalize_status(&json!("   ")), None);
        assert_eq!(normalize_status(&json!(null)), None);
    }

    #[test]
    fn gender_exact_codes() {
        assert_eq!(normalize_gender(&json!("L")), Some(Gender::Male));
        assert_eq!(normalize_gender(&json!("lk")), Some(Gender::Male));
        assert_eq!(normalize_gender(&json!("Pria")), Some(Gender::Male));
        assert_eq!(normalize_gender(&json!("Laki-laki")), Some(Gender::Male));
        assert_eq!(normalize_gender(&json!("P")), Some(Gender::Female));
        assert_eq!(normalize_gender(&json!("PEREMPUAN")), Some(Gender::Female));
        assert_eq!(normalize_gender(&json!("wanita")), Some(Gender::Female));
    }

    #[test]
    fn gender_substring_fallback() {
        assert_eq!(normalize_gender(&json!("laki2")), Some(Gender::Male));
        assert_eq!(
            normalize_gender(&json!("jenis kelamin wanita")),
            Some(Gender::Female)
        );
        assert_eq!(normalize_gender(&json!("lainnya")), None);
        assert_eq!(normalize_gender(&json!(null)), None);
    }

    #[test]
    fn education_priority_order() {
        assert_eq!(
            normalize_education(&json!("S1 Informatika")),
            Some(EducationLevel::S1D4)
        );
        assert_eq!(
            normalize_education(&json!("Magister Manajemen")),
            Some(EducationLevel::S2)
        );
        assert_eq!(normalize_education(&json!("Doktor")), Some(EducationLevel::S3));
        assert_eq!(normalize_education(&json!("PhD")), Some(EducationLevel::S3));
        assert_eq!(
            normalize_education(&json!("Sarjana Ekonomi")),
            Some(EducationLevel::S1D4)
        );
    }

    #[test]
    fn education_diploma_spellings() {
        assert_eq!(normalize_education(&json!("D-III")), Some(EducationLevel::D1D3));
        assert_eq!(
            normalize_education(&json!("D3 Akuntansi")),
            Some(EducationLevel::D1D3)
        );
        assert_eq!(
            normalize_education(&json!("Diploma Kebidanan")),
            Some(EducationLevel::D1D3)
        );
        assert_eq!(normalize_education(&json!("D IV Pertanahan")), Some(EducationLevel::S1D4));
        assert_eq!(normalize_education(&json!("D-4")), Some(EducationLevel::S1D4));
    }

    #[test]
    fn education_school_level_and_unknowns() {
        assert_eq!(
            normalize_education(&json!("SMA Negeri 1")),
            Some(EducationLevel::Slta)
        );
        assert_eq!(normalize_education(&json!("SMK")), Some(EducationLevel::Slta));
        assert_eq!(normalize_education(&json!("SD")), None);
        assert_eq!(normalize_education(&json!("")), None);
    }

    #[test]
    fn eselon_field_wins_over_title() {
        assert_eq!(
            normalize_position_group(Some(&json!("Kepala Bidang")), Some(&json!("IV.a"))),
            PositionGroup::EselonIV
        );
        assert_eq!(
            normalize_position_group(None, Some(&json!("III/b"))),
            PositionGroup::EselonIII
        );
        assert_eq!(
            normalize_position_group(None, Some(&json!("ii"))),
            PositionGroup::EselonII
        );
    }

    #[test]
    fn unrecognized_eselon_falls_through_to_title() {
        assert_eq!(
            normalize_position_group(Some(&json!("Pranata Komputer")), Some(&json!("V"))),
            PositionGroup::Jft
        );
    }

    #[test]
    fn title_eselon_substrings_longest_first() {
        assert_eq!(
            normalize_position_group(Some(&json!("Pejabat Eselon III")), None),
            PositionGroup::EselonIII
        );
        assert_eq!(
            normalize_position_group(Some(&json!("pejabat eselon iv")), None),
            PositionGroup::EselonIV
        );
        assert_eq!(
            normalize_position_group(Some(&json!("Sekretaris (Eselon II)")), None),
            PositionGroup::EselonII
        );
    }

    #[test]
    fn title_keywords_classify_as_jft() {
        for title in ["Arsiparis Muda", "Dokter Gigi", "Penyuluh Pertanian", "Guru SD"] {
            assert_eq!(
                normalize_position_group(Some(&json!(title)), None),
                PositionGroup::Jft,
                "title {title:?}"
            );
        }
    }

    #[test]
    fn unmatched_titles_default_to_jfu() {
        assert_eq!(
            normalize_position_group(Some(&json!("Staf Administrasi")), None),
            PositionGroup::Jfu
        );
        assert_eq!(normalize_position_group(None, None), PositionGroup::Jfu);
        assert_eq!(
            normalize_position_group(Some(&json!("")), Some(&json!(""))),
            PositionGroup::Jfu
        );
    }

    #[test]
    fn label_trims_and_rejects_blank() {
        assert_eq!(normalize_label(&json!("  III/a ")), Some("III/a".to_string()));
        assert_eq!(normalize_label(&json!("   ")), None);
        assert_eq!(normalize_label(&json!(null)), None);
        assert_eq!(normalize_label(&json!(4)), Some("4".to_string()));
    }
}
