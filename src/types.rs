use serde::Serialize;
use tabled::Tabled;

/// One raw employee record as delivered by the data source.
///
/// The schema is not known in advance: the same logical field can arrive under
/// many key spellings ("jenis_kelamin", "JK", "gender", ...). We keep it as an
/// ordered string-to-JSON-value map (`preserve_order` is enabled on
/// `serde_json`) because field resolution scans keys in insertion order.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Employment status categories. Closed enumeration; anything that does not
/// match an alias of one of these is simply not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    Pns,
    Cpns,
    Pppk,
    Ppnpn,
    Ki,
}

impl StatusKey {
    /// Matching preference and chart ordering. PPnPN is matched last so that
    /// the more specific categories get first claim on ambiguous text.
    pub const ORDER: [StatusKey; 5] = [
        StatusKey::Pns,
        StatusKey::Cpns,
        StatusKey::Pppk,
        StatusKey::Ki,
        StatusKey::Ppnpn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusKey::Pns => "PNS",
            StatusKey::Cpns => "CPNS",
            StatusKey::Pppk => "PPPK",
            StatusKey::Ppnpn => "PPnPN",
            StatusKey::Ki => "KI",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StatusKey::Pns => "#10b981",
            StatusKey::Cpns => "#a855f7",
            StatusKey::Pppk => "#f59e0b",
            StatusKey::Ppnpn => "#ec4899",
            StatusKey::Ki => "#06b6d4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// Age brackets used by every age-based breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    From20To30,
    From31To40,
    From41To50,
    Over50,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 4] = [
        AgeBucket::From20To30,
        AgeBucket::From31To40,
        AgeBucket::From41To50,
        AgeBucket::Over50,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::From20To30 => "20-30",
            AgeBucket::From31To40 => "31-40",
            AgeBucket::From41To50 => "41-50",
            AgeBucket::Over50 => "51+",
        }
    }

    pub fn index(self) -> usize {
        match self {
            AgeBucket::From20To30 => 0,
            AgeBucket::From31To40 => 1,
            AgeBucket::From41To50 => 2,
            AgeBucket::Over50 => 3,
        }
    }
}

/// Final-education levels. Free-text values are folded into these five by
/// keyword heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationLevel {
    Slta,
    D1D3,
    S1D4,
    S2,
    S3,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 5] = [
        EducationLevel::Slta,
        EducationLevel::D1D3,
        EducationLevel::S1D4,
        EducationLevel::S2,
        EducationLevel::S3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::Slta => "SLTA",
            EducationLevel::D1D3 => "D1-D3",
            EducationLevel::S1D4 => "S1-D4",
            EducationLevel::S2 => "S2",
            EducationLevel::S3 => "S3",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            EducationLevel::Slta => "#3b82f6",
            EducationLevel::D1D3 => "#8b5cf6",
            EducationLevel::S1D4 => "#ec4899",
            EducationLevel::S2 => "#f59e0b",
            EducationLevel::S3 => "#10b981",
        }
    }

    pub fn index(self) -> usize {
        match self {
            EducationLevel::Slta => 0,
            EducationLevel::D1D3 => 1,
            EducationLevel::S1D4 => 2,
            EducationLevel::S2 => 3,
            EducationLevel::S3 => 4,
        }
    }
}

/// Structural position groups. Every chart shows all five, even at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionGroup {
    EselonII,
    EselonIII,
    EselonIV,
    Jft,
    Jfu,
}

impl PositionGroup {
    pub const ALL: [PositionGroup; 5] = [
        PositionGroup::EselonII,
        PositionGroup::EselonIII,
        PositionGroup::EselonIV,
        PositionGroup::Jft,
        PositionGroup::Jfu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PositionGroup::EselonII => "Eselon II",
            PositionGroup::EselonIII => "Eselon III",
            PositionGroup::EselonIV => "Eselon IV",
            PositionGroup::Jft => "JFT",
            PositionGroup::Jfu => "JFU",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PositionGroup::EselonII => 0,
            PositionGroup::EselonIII => 1,
            PositionGroup::EselonIV => 2,
            PositionGroup::Jft => 3,
            PositionGroup::Jfu => 4,
        }
    }
}

/// Per-status headcounts. Serialized field names match the report layout
/// consumed by the charts.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    #[serde(rename = "PNS")]
    pub pns: usize,
    #[serde(rename = "CPNS")]
    pub cpns: usize,
    #[serde(rename = "PPPK")]
    pub pppk: usize,
    #[serde(rename = "PPnPN")]
    pub ppnpn: usize,
    #[serde(rename = "KI")]
    pub ki: usize,
}

impl StatusCounts {
    pub fn bump(&mut self, status: StatusKey) {
        match status {
            StatusKey::Pns => self.pns += 1,
            StatusKey::Cpns => self.cpns += 1,
            StatusKey::Pppk => self.pppk += 1,
            StatusKey::Ppnpn => self.ppnpn += 1,
            StatusKey::Ki => self.ki += 1,
        }
    }

    pub fn get(self, status: StatusKey) -> usize {
        match status {
            StatusKey::Pns => self.pns,
            StatusKey::Cpns => self.cpns,
            StatusKey::Pppk => self.pppk,
            StatusKey::Ppnpn => self.ppnpn,
            StatusKey::Ki => self.ki,
        }
    }

    pub fn sum(self) -> usize {
        self.pns + self.cpns + self.pppk + self.ppnpn + self.ki
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_employees: usize,
    pub male_employees: usize,
    pub female_employees: usize,
    pub status_counts: StatusCounts,
}

/// Age x status matrix row. PPnPN deliberately has no column here; those
/// records count toward the summary only.
#[derive(Debug, Clone, Default, Serialize, Tabled, PartialEq, Eq)]
pub struct AgeRow {
    #[tabled(rename = "Range")]
    pub range: String,
    #[tabled(rename = "PNS")]
    pub pns: usize,
    #[tabled(rename = "CPNS")]
    pub cpns: usize,
    #[tabled(rename = "PPPK")]
    pub pppk: usize,
    #[tabled(rename = "KI")]
    pub ki: usize,
    #[tabled(rename = "Total")]
    pub total: usize,
}

impl AgeRow {
    pub fn new(range: &str) -> Self {
        Self {
            range: range.to_string(),
            ..Self::default()
        }
    }

    /// Count one employee toward this row. PPnPN is a no-op: the matrix has
    /// no column for it and the row total must stay in step with the columns.
    pub fn add(&mut self, status: StatusKey) {
        let slot = match status {
            StatusKey::Pns => &mut self.pns,
            StatusKey::Cpns => &mut self.cpns,
            StatusKey::Pppk => &mut self.pppk,
            StatusKey::Ki => &mut self.ki,
            StatusKey::Ppnpn => return,
        };
        *slot += 1;
        self.total += 1;
    }
}

/// Education x status matrix row. Same column layout as [`AgeRow`].
#[derive(Debug, Clone, Default, Serialize, Tabled, PartialEq, Eq)]
pub struct EducationRow {
    #[tabled(rename = "Level")]
    pub level: String,
    #[tabled(rename = "PNS")]
    pub pns: usize,
    #[tabled(rename = "CPNS")]
    pub cpns: usize,
    #[tabled(rename = "PPPK")]
    pub pppk: usize,
    #[tabled(rename = "KI")]
    pub ki: usize,
    #[tabled(rename = "Total")]
    pub total: usize,
}

impl EducationRow {
    pub fn new(level: &str) -> Self {
        Self {
            level: level.to_string(),
            ..Self::default()
        }
    }

    pub fn add(&mut self, status: StatusKey) {
        let slot = match status {
            StatusKey::Pns => &mut self.pns,
            StatusKey::Cpns => &mut self.cpns,
            StatusKey::Pppk => &mut self.pppk,
            StatusKey::Ki => &mut self.ki,
            StatusKey::Ppnpn => return,
        };
        *slot += 1;
        self.total += 1;
    }
}

#[derive(Debug, Clone, Serialize, Tabled, PartialEq, Eq)]
pub struct PositionRow {
    #[tabled(rename = "Position")]
    pub position: String,
    #[tabled(rename = "Male")]
    pub male: usize,
    #[tabled(rename = "Female")]
    pub female: usize,
}

#[derive(Debug, Clone, Serialize, Tabled, PartialEq, Eq)]
pub struct DepartmentRow {
    #[tabled(rename = "Dept")]
    pub dept: String,
    #[tabled(rename = "Male")]
    pub male: usize,
    #[tabled(rename = "Female")]
    pub female: usize,
}

impl DepartmentRow {
    pub fn new(dept: String) -> Self {
        Self {
            dept,
            male: 0,
            female: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled, PartialEq, Eq)]
pub struct GenderAgeRow {
    #[tabled(rename = "Age")]
    pub age: String,
    #[tabled(rename = "Male")]
    pub male: usize,
    #[tabled(rename = "Female")]
    pub female: usize,
}

impl GenderAgeRow {
    pub fn new(age: &str) -> Self {
        Self {
            age: age.to_string(),
            male: 0,
            female: 0,
        }
    }
}

/// One slice of a pie chart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryRow {
    pub name: String,
    pub value: usize,
    pub color: &'static str,
}

/// The complete aggregate report. Recomputed from scratch on every dataset
/// snapshot; serializes to the exact JSON layout the dashboard charts read.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStats {
    pub summary: Summary,
    pub age_data: Vec<AgeRow>,
    pub age_category_data: Vec<CategoryRow>,
    pub education_data: Vec<EducationRow>,
    pub education_chart: Vec<CategoryRow>,
    pub position_data: Vec<PositionRow>,
    pub position_category: Vec<CategoryRow>,
    pub department_data: Vec<DepartmentRow>,
    pub department_category: Vec<CategoryRow>,
    pub gender_age_data: Vec<GenderAgeRow>,
    pub gender_category: Vec<CategoryRow>,
}
