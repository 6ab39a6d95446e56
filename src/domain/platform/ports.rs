use crate::domain::platform::{
    GradingPhases, ProjectId, ProjectStatus, ProjectSummary, Role, TeamMember, User,
};
use crate::outbound::http::error::Error as GatewayError;
use async_trait::async_trait;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Gateway
////////////////////////////////////////////////////////////////////////////////////////////////////

/// One method per remote endpoint. Every call is a single request/response
/// exchange: no retries, no caching.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait GatewayPort: Send + Sync + 'static {
    async fn login(&self, params: LoginParams) -> Result<LoginResult, GatewayError>;
    async fn register_student(
        &self,
        params: RegisterStudentParams,
    ) -> Result<RegisterResult, GatewayError>;
    async fn register_mentor(
        &self,
        params: RegisterMentorParams,
    ) -> Result<RegisterResult, GatewayError>;
    async fn fetch_user(&self, params: FetchUserParams) -> Result<User, GatewayError>;
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, GatewayError>;
    async fn create_team(&self, params: CreateTeamParams)
    -> Result<CreateTeamResult, GatewayError>;
    async fn update_project_status(
        &self,
        params: UpdateProjectStatusParams,
    ) -> Result<UpdateProjectStatusResult, GatewayError>;
    async fn update_project_phases(
        &self,
        params: UpdateProjectPhasesParams,
    ) -> Result<UpdateProjectPhasesResult, GatewayError>;
}

//------------------------------------------------------------------------------
// Login
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoginParams {
    pub role: Role,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginResult {
    pub message: Option<String>,
    pub user_id: Option<i64>,
    pub name: Option<String>,
}

//------------------------------------------------------------------------------
// Register
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RegisterStudentParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub usn: String,
    pub dept: String,
    pub year: i64,
    pub sem: i64,
}

#[derive(Debug, Clone)]
pub struct RegisterMentorParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub dept: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterResult {
    pub message: Option<String>,
    pub id: Option<i64>,
    pub email: Option<String>,
}

//------------------------------------------------------------------------------
// Fetch User
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FetchUserParams {
    pub email: String,
}

//------------------------------------------------------------------------------
// Create Team
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTeamParams {
    pub team_name: String,
    pub team_size: usize,
    pub team_members: Vec<TeamMember>,
    pub project_title: String,
    pub project_synopsis: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTeamResult {
    pub message: Option<String>,
    pub team_id: Option<i64>,
    pub project_id: Option<i64>,
    pub mentor: Option<String>,
    pub similarity_score: Option<f64>,
}

//------------------------------------------------------------------------------
// Update Project Status
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProjectStatusParams {
    pub project_id: ProjectId,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProjectStatusResult {
    pub message: Option<String>,
}

//------------------------------------------------------------------------------
// Update Project Phases
//------------------------------------------------------------------------------

/// Grading payload. Marks travel as integers and blanks as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProjectPhasesParams {
    pub project_id: ProjectId,
    pub phase1_marks: Option<i64>,
    pub phase1_remarks: Option<String>,
    pub phase2_marks: Option<i64>,
    pub phase2_remarks: Option<String>,
    pub phase3_marks: Option<i64>,
    pub phase3_remarks: Option<String>,
}

impl UpdateProjectPhasesParams {
    pub fn from_phases(project_id: ProjectId, phases: &GradingPhases) -> Self {
        Self {
            project_id,
            phase1_marks: phases.phase1.marks_value(),
            phase1_remarks: phases.phase1.remarks_value(),
            phase2_marks: phases.phase2.marks_value(),
            phase2_remarks: phases.phase2.remarks_value(),
            phase3_marks: phases.phase3.marks_value(),
            phase3_remarks: phases.phase3.remarks_value(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProjectPhasesResult {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::platform::PhaseGrade;

    #[test]
    fn test_phases_params_from_phases() {
        let phases = GradingPhases {
            phase1: PhaseGrade {
                marks: "85".to_string(),
                remarks: "Good".to_string(),
            },
            phase2: PhaseGrade {
                marks: "".to_string(),
                remarks: "".to_string(),
            },
            phase3: PhaseGrade {
                marks: "n/a".to_string(),
                remarks: "Pending demo".to_string(),
            },
        };

        let params = UpdateProjectPhasesParams::from_phases(ProjectId(7), &phases);

        assert_eq!(ProjectId(7), params.project_id);
        assert_eq!(Some(85), params.phase1_marks);
        assert_eq!(Some("Good".to_string()), params.phase1_remarks);
        assert_eq!(None, params.phase2_marks);
        assert_eq!(None, params.phase2_remarks);
        assert_eq!(None, params.phase3_marks);
        assert_eq!(Some("Pending demo".to_string()), params.phase3_remarks);
    }
}
