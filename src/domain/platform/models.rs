use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Similarity scores above this value are flagged on the mentor dashboard.
pub const HIGH_RISK_SIMILARITY: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Mentor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Mentor => write!(f, "Mentor"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Project status
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown project status {0:?}")]
pub struct UnknownStatus(pub String);

/// Review state of a submitted project.
///
/// The server is not consistent about spelling (`"approved"`, `"Not Approved"`,
/// `"rejected"`, ...), so every status string goes through [`FromStr`] when it
/// enters the client. `"not approved"` is an unreviewed project and maps to
/// [`ProjectStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ProjectStatus::Pending)
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "not approved" => Ok(ProjectStatus::Pending),
            "approved" => Ok(ProjectStatus::Approved),
            "rejected" => Ok(ProjectStatus::Rejected),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mentor's verdict on a pending project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target(&self) -> ProjectStatus {
        match self {
            Decision::Approve => ProjectStatus::Approved,
            Decision::Reject => ProjectStatus::Rejected,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Grading
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKey {
    Phase1,
    Phase2,
    Phase3,
}

impl PhaseKey {
    pub const ALL: [PhaseKey; 3] = [PhaseKey::Phase1, PhaseKey::Phase2, PhaseKey::Phase3];

    pub fn key(&self) -> &'static str {
        match self {
            PhaseKey::Phase1 => "phase1",
            PhaseKey::Phase2 => "phase2",
            PhaseKey::Phase3 => "phase3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseKey::Phase1 => "Phase 1",
            PhaseKey::Phase2 => "Phase 2",
            PhaseKey::Phase3 => "FINAL PHASE",
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PhaseKey::Phase1),
            2 => Some(PhaseKey::Phase2),
            3 => Some(PhaseKey::Phase3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeField {
    Marks,
    Remarks,
}

/// Marks and remarks of one grading phase, held as the text the mentor edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseGrade {
    pub marks: String,
    pub remarks: String,
}

impl PhaseGrade {
    pub fn new(marks: Option<i64>, remarks: Option<String>) -> Self {
        Self {
            marks: marks.map(|m| m.to_string()).unwrap_or_default(),
            remarks: remarks.unwrap_or_default(),
        }
    }

    /// Marks as an integer, `None` when blank or not a number.
    pub fn marks_value(&self) -> Option<i64> {
        parse_marks(&self.marks)
    }

    /// Remarks for the wire, `None` when empty.
    pub fn remarks_value(&self) -> Option<String> {
        if self.remarks.is_empty() {
            None
        } else {
            Some(self.remarks.clone())
        }
    }

    pub fn set(&mut self, field: GradeField, value: String) {
        match field {
            GradeField::Marks => self.marks = value,
            GradeField::Remarks => self.remarks = value,
        }
    }
}

/// Reads the leading integer of a marks field, ignoring surrounding blanks
/// and anything after the digits ("85 pts" is 85).
pub fn parse_marks(input: &str) -> Option<i64> {
    let input = input.trim();
    let (sign, digits) = match input.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, input.strip_prefix('+').unwrap_or(input)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradingPhases {
    pub phase1: PhaseGrade,
    pub phase2: PhaseGrade,
    pub phase3: PhaseGrade,
}

impl GradingPhases {
    /// Phases created locally when a project is approved: zero marks, empty remarks.
    pub fn initial() -> Self {
        let blank = PhaseGrade::new(Some(0), Some(String::new()));
        Self {
            phase1: blank.clone(),
            phase2: blank.clone(),
            phase3: blank,
        }
    }

    pub fn get(&self, key: PhaseKey) -> &PhaseGrade {
        match key {
            PhaseKey::Phase1 => &self.phase1,
            PhaseKey::Phase2 => &self.phase2,
            PhaseKey::Phase3 => &self.phase3,
        }
    }

    pub fn get_mut(&mut self, key: PhaseKey) -> &mut PhaseGrade {
        match key {
            PhaseKey::Phase1 => &mut self.phase1,
            PhaseKey::Phase2 => &mut self.phase2,
            PhaseKey::Phase3 => &mut self.phase3,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Teams and projects
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub usn: String,
    pub email: String,
    pub dept: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamDetails {
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub team_size: Option<i64>,
    pub team_members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
    pub match_name: String,
    pub similarity_note: String,
}

/// Server-computed overlap report for a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityReport {
    pub analysis: Option<String>,
    pub comparison: Vec<SimilarityMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedProject {
    pub id: String,
    pub title: Option<String>,
}

/// A project as seen by its mentor.
#[derive(Debug, Clone, PartialEq)]
pub struct MentoredProject {
    pub id: ProjectId,
    pub title: String,
    pub synopsis: String,
    pub status: ProjectStatus,
    pub similarity_score: Option<f64>,
    pub matches: Vec<MatchedProject>,
    pub similarity_report: Option<SimilarityReport>,
    pub team: TeamDetails,
    pub phases: Option<GradingPhases>,
}

impl MentoredProject {
    pub fn is_high_risk(&self) -> bool {
        self.similarity_score
            .is_some_and(|score| score > HIGH_RISK_SIMILARITY)
    }
}

/// Entry of the flat list of every submitted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: Option<i64>,
    pub title: String,
    pub synopsis: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Users
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentProfile {
    pub name: String,
    pub email: String,
    pub usn: Option<String>,
    pub dept: Option<String>,
    pub year: Option<i64>,
    pub sem: Option<i64>,
    pub team_members: Vec<TeamMember>,
    pub mentor_name: Option<String>,
    pub project_title: Option<String>,
    pub project_status: Option<ProjectStatus>,
    pub project_phases: Option<GradingPhases>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorProfile {
    pub name: String,
    pub email: String,
    pub dept: Option<String>,
    pub mentored_projects: Vec<MentoredProject>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum User {
    Student(StudentProfile),
    Mentor(MentorProfile),
}

impl User {
    pub fn role(&self) -> Role {
        match self {
            User::Student(_) => Role::Student,
            User::Mentor(_) => Role::Mentor,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            User::Student(student) => &student.email,
            User::Mentor(mentor) => &mentor.email,
        }
    }
}
