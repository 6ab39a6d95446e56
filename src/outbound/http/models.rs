use crate::domain::platform::{
    CreateTeamParams, CreateTeamResult, GradingPhases, LoginResult, MatchedProject,
    MentorProfile, MentoredProject, PhaseGrade, ProjectId, ProjectStatus, ProjectSummary,
    RegisterResult, SimilarityMatch, SimilarityReport, StudentProfile, TeamDetails, TeamMember,
    UnknownStatus, UpdateProjectPhasesParams, UpdateProjectPhasesResult, UpdateProjectStatusParams,
    UpdateProjectStatusResult, User,
};
use crate::outbound::http::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Requests
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct StudentRegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub usn: &'a str,
    pub dept: &'a str,
    pub year: i64,
    pub sem: i64,
}

#[derive(Serialize)]
pub struct TeacherRegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub dept: &'a str,
}

#[derive(Serialize)]
pub struct CreateTeamBody {
    pub team_name: String,
    pub team_size: usize,
    pub team_members: Vec<MemberRow>,
    pub project_title: String,
    pub project_synopsis: String,
}

impl From<CreateTeamParams> for CreateTeamBody {
    fn from(value: CreateTeamParams) -> Self {
        Self {
            team_name: value.team_name,
            team_size: value.team_size,
            team_members: value.team_members.into_iter().map(MemberRow::from).collect(),
            project_title: value.project_title,
            project_synopsis: value.project_synopsis,
        }
    }
}

#[derive(Serialize)]
pub struct ProjectStatusBody {
    pub submitted_project_id: i64,
    pub status: &'static str,
}

impl From<&UpdateProjectStatusParams> for ProjectStatusBody {
    fn from(value: &UpdateProjectStatusParams) -> Self {
        Self {
            submitted_project_id: value.project_id.0,
            status: value.status.as_str(),
        }
    }
}

#[derive(Serialize)]
pub struct ProjectPhasesBody {
    pub submitted_project_id: i64,
    pub phase1_marks: Option<i64>,
    pub phase1_remarks: Option<String>,
    pub phase2_marks: Option<i64>,
    pub phase2_remarks: Option<String>,
    pub phase3_marks: Option<i64>,
    pub phase3_remarks: Option<String>,
}

impl From<UpdateProjectPhasesParams> for ProjectPhasesBody {
    fn from(value: UpdateProjectPhasesParams) -> Self {
        Self {
            submitted_project_id: value.project_id.0,
            phase1_marks: value.phase1_marks,
            phase1_remarks: value.phase1_remarks,
            phase2_marks: value.phase2_marks,
            phase2_remarks: value.phase2_remarks,
            phase3_marks: value.phase3_marks,
            phase3_remarks: value.phase3_remarks,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Responses
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Error body. FastAPI sends `detail` as a string for handled errors and as
/// a list of objects for validation failures.
#[derive(Deserialize, Default)]
pub struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        match self.detail? {
            Value::String(message) => Some(message),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub message: Option<String>,
    pub user_id: Option<i64>,
    pub name: Option<String>,
}

impl From<LoginResponse> for LoginResult {
    fn from(value: LoginResponse) -> Self {
        Self {
            message: value.message,
            user_id: value.user_id,
            name: value.name,
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterResponse {
    pub message: Option<String>,
    pub id: Option<i64>,
    pub email: Option<String>,
}

impl From<RegisterResponse> for RegisterResult {
    fn from(value: RegisterResponse) -> Self {
        Self {
            message: value.message,
            id: value.id,
            email: value.email,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateTeamResponse {
    pub message: Option<String>,
    pub team_id: Option<i64>,
    pub project_id: Option<i64>,
    pub mentor: Option<String>,
    pub similarity_score: Option<f64>,
}

impl From<CreateTeamResponse> for CreateTeamResult {
    fn from(value: CreateTeamResponse) -> Self {
        Self {
            message: value.message,
            team_id: value.team_id,
            project_id: value.project_id,
            mentor: value.mentor,
            similarity_score: value.similarity_score,
        }
    }
}

#[derive(Deserialize)]
pub struct MessageResponse {
    pub message: Option<String>,
}

impl From<MessageResponse> for UpdateProjectStatusResult {
    fn from(value: MessageResponse) -> Self {
        Self {
            message: value.message,
        }
    }
}

impl From<MessageResponse> for UpdateProjectPhasesResult {
    fn from(value: MessageResponse) -> Self {
        Self {
            message: value.message,
        }
    }
}

#[derive(Deserialize)]
pub struct ProjectSummaryRow {
    pub project_id: Option<i64>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
}

impl From<ProjectSummaryRow> for ProjectSummary {
    fn from(value: ProjectSummaryRow) -> Self {
        Self {
            id: value.project_id,
            title: value.title.unwrap_or_default(),
            synopsis: value.synopsis.unwrap_or_default(),
        }
    }
}

pub struct ProjectSummaryRowList(pub Vec<ProjectSummaryRow>);

impl From<ProjectSummaryRowList> for Vec<ProjectSummary> {
    fn from(value: ProjectSummaryRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// User records
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Serialize, Default)]
pub struct MemberRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub usn: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dept: String,
}

impl From<MemberRow> for TeamMember {
    fn from(value: MemberRow) -> Self {
        Self {
            name: value.name,
            usn: value.usn,
            email: value.email,
            dept: value.dept,
        }
    }
}

impl From<TeamMember> for MemberRow {
    fn from(value: TeamMember) -> Self {
        Self {
            name: value.name,
            usn: value.usn,
            email: value.email,
            dept: value.dept,
        }
    }
}

fn members(rows: Option<Vec<MemberRow>>) -> Vec<TeamMember> {
    rows.unwrap_or_default()
        .into_iter()
        .map(TeamMember::from)
        .collect()
}

#[derive(Deserialize)]
pub struct PhaseRow {
    pub marks: Option<i64>,
    pub remarks: Option<String>,
}

#[derive(Deserialize)]
pub struct PhasesRow {
    pub phase1: Option<PhaseRow>,
    pub phase2: Option<PhaseRow>,
    pub phase3: Option<PhaseRow>,
}

fn phase(row: Option<PhaseRow>) -> PhaseGrade {
    row.map(|row| PhaseGrade::new(row.marks, row.remarks))
        .unwrap_or_default()
}

impl From<PhasesRow> for GradingPhases {
    fn from(value: PhasesRow) -> Self {
        Self {
            phase1: phase(value.phase1),
            phase2: phase(value.phase2),
            phase3: phase(value.phase3),
        }
    }
}

fn status(value: &str) -> Result<ProjectStatus, Error> {
    value
        .parse()
        .map_err(|e: UnknownStatus| Error::MalformedResponse(e.to_string()))
}

#[derive(Deserialize)]
pub struct StudentRow {
    pub name: String,
    pub email: String,
    pub usn: Option<String>,
    pub dept: Option<String>,
    pub year: Option<i64>,
    pub sem: Option<i64>,
    pub team_members: Option<Vec<MemberRow>>,
    pub mentor_name: Option<String>,
    pub project_title: Option<String>,
    pub project_status: Option<String>,
    pub project_phases: Option<PhasesRow>,
}

impl TryFrom<StudentRow> for StudentProfile {
    type Error = Error;

    fn try_from(value: StudentRow) -> Result<Self, Self::Error> {
        let project_status = value.project_status.as_deref().map(status).transpose()?;

        Ok(Self {
            name: value.name,
            email: value.email,
            usn: value.usn,
            dept: value.dept,
            year: value.year,
            sem: value.sem,
            team_members: members(value.team_members),
            mentor_name: value.mentor_name,
            project_title: value.project_title,
            project_status,
            project_phases: value.project_phases.map(GradingPhases::from),
        })
    }
}

#[derive(Deserialize)]
pub struct SimilarityComparisonRow {
    pub match_name: Option<String>,
    pub similarity_note: Option<String>,
}

#[derive(Deserialize)]
pub struct SimilarityReportRow {
    pub analysis: Option<String>,
    #[serde(default)]
    pub comparison: Vec<SimilarityComparisonRow>,
}

impl From<SimilarityReportRow> for SimilarityReport {
    fn from(value: SimilarityReportRow) -> Self {
        Self {
            analysis: value.analysis,
            comparison: value
                .comparison
                .into_iter()
                .map(|row| SimilarityMatch {
                    match_name: row.match_name.unwrap_or_default(),
                    similarity_note: row.similarity_note.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// The report arrives either as an object or as a JSON document inside a
/// string. Text that is not JSON is kept as the analysis.
pub fn similarity_report(value: Option<Value>) -> Option<SimilarityReport> {
    let report = match value? {
        Value::Null => return None,
        Value::String(text) if text.trim().is_empty() => return None,
        Value::String(text) => match serde_json::from_str::<SimilarityReportRow>(&text) {
            Ok(row) => row.into(),
            Err(e) => {
                tracing::debug!(error = %e, "similarity description is not json");
                SimilarityReport {
                    analysis: Some(text),
                    comparison: vec![],
                }
            }
        },
        other => match serde_json::from_value::<SimilarityReportRow>(other) {
            Ok(row) => row.into(),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed similarity description");
                return None;
            }
        },
    };

    Some(report)
}

fn matched_id(value: Value) -> String {
    match value {
        Value::String(id) => id,
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
pub struct TeamDetailsRow {
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub team_size: Option<i64>,
    pub team_members: Option<Vec<MemberRow>>,
}

impl From<TeamDetailsRow> for TeamDetails {
    fn from(value: TeamDetailsRow) -> Self {
        Self {
            team_id: value.team_id,
            team_name: value.team_name,
            team_size: value.team_size,
            team_members: members(value.team_members),
        }
    }
}

#[derive(Deserialize)]
pub struct MentoredProjectRow {
    pub submitted_project_id: i64,
    pub project_title: Option<String>,
    pub project_synopsis: Option<String>,
    pub status: String,
    pub similarity_score: Option<f64>,
    pub similar_projects_id: Option<Vec<Value>>,
    pub similar_project_titles: Option<Vec<Option<String>>>,
    pub similarity_description: Option<Value>,
    pub team_details: Option<TeamDetailsRow>,
    pub project_phases: Option<PhasesRow>,
}

impl TryFrom<MentoredProjectRow> for MentoredProject {
    type Error = Error;

    fn try_from(value: MentoredProjectRow) -> Result<Self, Self::Error> {
        let titles = value.similar_project_titles.unwrap_or_default();
        let matches = value
            .similar_projects_id
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, id)| MatchedProject {
                id: matched_id(id),
                title: titles.get(index).cloned().flatten(),
            })
            .collect();

        Ok(Self {
            id: ProjectId(value.submitted_project_id),
            title: value.project_title.unwrap_or_default(),
            synopsis: value.project_synopsis.unwrap_or_default(),
            status: status(&value.status)?,
            similarity_score: value.similarity_score,
            matches,
            similarity_report: similarity_report(value.similarity_description),
            team: value.team_details.map(TeamDetails::from).unwrap_or_default(),
            phases: value.project_phases.map(GradingPhases::from),
        })
    }
}

#[derive(Deserialize)]
pub struct MentorRow {
    pub name: String,
    pub email: String,
    pub dept: Option<String>,
    pub mentored_projects: Option<Vec<MentoredProjectRow>>,
}

impl TryFrom<MentorRow> for MentorProfile {
    type Error = Error;

    fn try_from(value: MentorRow) -> Result<Self, Self::Error> {
        let mentored_projects = value
            .mentored_projects
            .unwrap_or_default()
            .into_iter()
            .map(MentoredProject::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: value.name,
            email: value.email,
            dept: value.dept,
            mentored_projects,
        })
    }
}

/// `/user/{email}` answers with one of two shapes, told apart by `role`.
/// Mentors are called teachers on the wire.
#[derive(Deserialize)]
#[serde(tag = "role")]
pub enum UserRow {
    #[serde(rename = "student")]
    Student(StudentRow),
    #[serde(rename = "teacher", alias = "mentor")]
    Mentor(MentorRow),
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        match value {
            UserRow::Student(row) => Ok(User::Student(row.try_into()?)),
            UserRow::Mentor(row) => Ok(User::Mentor(row.try_into()?)),
        }
    }
}
