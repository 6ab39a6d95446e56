use crate::core::application::ApplicationServices;
use crate::domain::auth::AuthService;
use crate::domain::platform::{Decision, GradeField, PhaseKey, ProjectId};
use crate::domain::views::{CommandOutcome, MentorDashboard, StudentDashboard};
use crate::errors::ClientError;
use crate::inbound::cli::render;

#[derive(Debug, Clone)]
pub struct GradeArgs {
    pub project_id: ProjectId,
    pub phase: PhaseKey,
    pub marks: Option<String>,
    pub remarks: Option<String>,
}

async fn mounted_mentor_dashboard<S: ApplicationServices>(
    state: &S,
) -> Result<MentorDashboard<S::GATEWAY>, ClientError> {
    let session = state.auth_service().current_session().await?;
    let mut dashboard = MentorDashboard::new(state.gateway(), session);

    dashboard.mount().await;
    if let Some(err) = dashboard.take_error() {
        return Err(err);
    }

    Ok(dashboard)
}

pub async fn student<S: ApplicationServices>(state: &S) -> Result<String, ClientError> {
    let session = state.auth_service().current_session().await?;
    let mut dashboard = StudentDashboard::new(state.gateway(), session);

    dashboard.mount().await;
    if let Some(err) = dashboard.take_error() {
        return Err(err);
    }

    Ok(dashboard
        .state()
        .success()
        .map(render::student_dashboard)
        .unwrap_or_default())
}

pub async fn mentor<S: ApplicationServices>(
    state: &S,
    expand: Option<ProjectId>,
) -> Result<String, ClientError> {
    let mut dashboard = mounted_mentor_dashboard(state).await?;

    if let Some(project_id) = expand {
        if dashboard.project(project_id).is_none() {
            return Err(ClientError::ProjectNotFound(project_id));
        }
        dashboard.toggle_row(project_id);
    }

    Ok(dashboard
        .state()
        .success()
        .map(|profile| render::mentor_dashboard(profile, dashboard.expanded_row()))
        .unwrap_or_default())
}

pub async fn decide<S: ApplicationServices>(
    state: &S,
    project_id: ProjectId,
    decision: Decision,
) -> Result<String, ClientError> {
    let mut dashboard = mounted_mentor_dashboard(state).await?;

    match dashboard.change_status(project_id, decision).await? {
        CommandOutcome::Confirmed => Ok(format!(
            "Project {} successfully.",
            decision.target().as_str().to_uppercase()
        )),
        CommandOutcome::RolledBack(err) => Err(err),
    }
}

/// Applies the given fields to one phase, then saves all three phases.
pub async fn grade<S: ApplicationServices>(
    state: &S,
    args: GradeArgs,
) -> Result<String, ClientError> {
    let mut dashboard = mounted_mentor_dashboard(state).await?;

    if let Some(marks) = args.marks {
        dashboard.edit_grade(args.project_id, args.phase, GradeField::Marks, marks)?;
    }
    if let Some(remarks) = args.remarks {
        dashboard.edit_grade(args.project_id, args.phase, GradeField::Remarks, remarks)?;
    }

    dashboard.save_marks(args.project_id).await
}
