use crate::domain::auth::AuthService;
use crate::domain::platform::{
    Decision, GatewayPort, GradeField, MentorProfile, MentoredProject, PhaseKey, ProjectId,
    ProjectStatus, Role, UpdateProjectPhasesParams, UpdateProjectStatusParams, User,
};
use crate::domain::session::Session;
use crate::domain::views::{CommandOutcome, LoadState, StatusChange, load_user};
use crate::errors::{ClientError, access_denied, request_failed};
use std::sync::Arc;

pub struct MentorDashboard<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    gateway: Arc<G>,
    session: Session,
    state: LoadState<MentorProfile>,
    expanded: Option<ProjectId>,
}

impl<G> MentorDashboard<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: LoadState::Loading,
            expanded: None,
        }
    }

    pub async fn mount(&mut self) -> &LoadState<MentorProfile> {
        let result = load_user(
            self.gateway.as_ref(),
            &self.session,
            Role::Mentor,
            "Failed to fetch mentor details",
        )
        .await
        .and_then(|user| match user {
            User::Mentor(profile) => Ok(profile),
            other => Err(access_denied(Role::Mentor, other.role())),
        });

        self.state = LoadState::from_result(result);
        &self.state
    }

    pub fn state(&self) -> &LoadState<MentorProfile> {
        &self.state
    }

    pub fn take_error(&mut self) -> Option<ClientError> {
        self.state.take_error()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn projects(&self) -> &[MentoredProject] {
        self.state
            .success()
            .map(|profile| profile.mentored_projects.as_slice())
            .unwrap_or_default()
    }

    pub fn project(&self, project_id: ProjectId) -> Option<&MentoredProject> {
        self.projects().iter().find(|project| project.id == project_id)
    }

    fn projects_mut(&mut self) -> &mut [MentoredProject] {
        match self.state.success_mut() {
            Some(profile) => profile.mentored_projects.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Opens the detail panel of `project_id`, closing any other. Toggling the
    /// open row closes it.
    pub fn toggle_row(&mut self, project_id: ProjectId) {
        self.expanded = match self.expanded {
            Some(open) if open == project_id => None,
            _ => Some(project_id),
        };
    }

    pub fn expanded_row(&self) -> Option<ProjectId> {
        self.expanded
    }

    pub fn stage_status_change(
        &mut self,
        project_id: ProjectId,
        decision: Decision,
    ) -> Result<StatusChange, ClientError> {
        StatusChange::stage(self.projects_mut(), project_id, decision)
    }

    pub fn settle(&mut self, change: StatusChange, result: Result<(), ClientError>) -> CommandOutcome {
        change.settle(self.projects_mut(), result)
    }

    /// Applies the decision locally, sends it, and keeps or reverts the local
    /// change depending on the answer.
    pub async fn change_status(
        &mut self,
        project_id: ProjectId,
        decision: Decision,
    ) -> Result<CommandOutcome, ClientError> {
        let change = self.stage_status_change(project_id, decision)?;

        let result = self
            .gateway
            .update_project_status(UpdateProjectStatusParams {
                project_id,
                status: change.target,
            })
            .await
            .map(|_| ())
            .map_err(|err| request_failed(err, "Failed to update status"));

        Ok(self.settle(change, result))
    }

    /// Local edit of one grading field. Nothing is sent until `save_marks`.
    pub fn edit_grade(
        &mut self,
        project_id: ProjectId,
        phase: PhaseKey,
        field: GradeField,
        value: impl Into<String>,
    ) -> Result<(), ClientError> {
        let project = self
            .projects_mut()
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or(ClientError::ProjectNotFound(project_id))?;

        match (&project.status, project.phases.as_mut()) {
            (ProjectStatus::Approved, Some(phases)) => {
                phases.get_mut(phase).set(field, value.into());
                Ok(())
            }
            _ => Err(ClientError::GradingLocked(project_id)),
        }
    }

    /// Sends the project's three phases. Local fields stay as they are
    /// whatever the outcome.
    pub async fn save_marks(&self, project_id: ProjectId) -> Result<String, ClientError> {
        let project = self
            .project(project_id)
            .ok_or(ClientError::ProjectNotFound(project_id))?;
        let phases = match (&project.status, project.phases.as_ref()) {
            (ProjectStatus::Approved, Some(phases)) => phases,
            _ => return Err(ClientError::GradingLocked(project_id)),
        };

        let result = self
            .gateway
            .update_project_phases(UpdateProjectPhasesParams::from_phases(project_id, phases))
            .await
            .map_err(|err| request_failed(err, "Failed to save marks"))?;

        Ok(result
            .message
            .unwrap_or("Marks and Remarks saved successfully!".to_string()))
    }

    pub async fn sign_out<A>(&mut self, auth: &A) -> Result<(), ClientError>
    where
        A: AuthService + ?Sized,
    {
        auth.logout().await?;

        self.session = Session::anonymous();
        self.state = LoadState::Loading;
        self.expanded = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::MockAuthService;
    use crate::domain::platform::{
        GradingPhases, MockGatewayPort, PhaseGrade, StudentProfile, UpdateProjectPhasesResult,
        UpdateProjectStatusResult,
    };
    use crate::domain::views::command::tests::project;
    use crate::outbound::http::error::Error as GatewayError;
    use mockall::predicate::eq;
    use std::future;

    fn mentor(projects: Vec<MentoredProject>) -> User {
        User::Mentor(MentorProfile {
            name: "Kavita Patil".to_string(),
            email: "kavita.patil@rvce.edu.in".to_string(),
            dept: Some("CSE".to_string()),
            mentored_projects: projects,
        })
    }

    fn gateway_returning(user: User) -> MockGatewayPort {
        let mut gateway = MockGatewayPort::new();
        gateway
            .expect_fetch_user()
            .withf(|params| params.email == "kavita.patil@rvce.edu.in")
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(user))));
        gateway
    }

    async fn mounted(gateway: MockGatewayPort) -> MentorDashboard<MockGatewayPort> {
        let mut dashboard = MentorDashboard::new(
            Arc::new(gateway),
            Session::for_user("kavita.patil@rvce.edu.in"),
        );
        dashboard.mount().await;
        dashboard
    }

    #[tokio::test]
    async fn test_mount() {
        let gateway = gateway_returning(mentor(vec![project(1, ProjectStatus::Pending)]));

        let dashboard = mounted(gateway).await;

        assert_eq!(
            "Kavita Patil",
            dashboard.state().success().unwrap().name.as_str()
        );
        assert_eq!(1, dashboard.projects().len());
    }

    #[tokio::test]
    async fn test_mount_student_record_denied() {
        let gateway = gateway_returning(User::Student(StudentProfile {
            name: "Rahul".to_string(),
            email: "kavita.patil@rvce.edu.in".to_string(),
            ..Default::default()
        }));

        let dashboard = mounted(gateway).await;

        assert_eq!(true, dashboard.state().success().is_none());
        assert_eq!(
            "Access Denied: User is not a Mentor.",
            dashboard.state().error().unwrap().to_string()
        );
    }

    #[tokio::test]
    async fn test_mount_without_session() {
        let mut gateway = MockGatewayPort::new();
        gateway.expect_fetch_user().never();

        let mut dashboard = MentorDashboard::new(Arc::new(gateway), Session::anonymous());
        dashboard.mount().await;

        assert!(matches!(
            dashboard.state().error(),
            Some(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_mount_fetch_failure() {
        let mut gateway = MockGatewayPort::new();
        gateway.expect_fetch_user().times(1).return_once(|_| {
            Box::pin(future::ready(Err(GatewayError::Rejected {
                status: 404,
                detail: None,
            })))
        });

        let dashboard = mounted(gateway).await;

        assert_eq!(
            "Failed to fetch mentor details",
            dashboard.state().error().unwrap().to_string()
        );
    }

    #[tokio::test]
    async fn test_toggle_row() {
        let gateway = gateway_returning(mentor(vec![
            project(1, ProjectStatus::Pending),
            project(2, ProjectStatus::Pending),
        ]));
        let mut dashboard = mounted(gateway).await;

        dashboard.toggle_row(ProjectId(1));
        assert_eq!(Some(ProjectId(1)), dashboard.expanded_row());

        dashboard.toggle_row(ProjectId(2));
        assert_eq!(Some(ProjectId(2)), dashboard.expanded_row());

        dashboard.toggle_row(ProjectId(2));
        assert_eq!(None, dashboard.expanded_row());
    }

    #[tokio::test]
    async fn test_approve_initializes_phases_before_confirmation() {
        let mut gateway = gateway_returning(mentor(vec![project(1, ProjectStatus::Pending)]));
        gateway.expect_update_project_status().never();
        let mut dashboard = mounted(gateway).await;

        let change = dashboard
            .stage_status_change(ProjectId(1), Decision::Approve)
            .unwrap();

        let staged = dashboard.project(ProjectId(1)).unwrap();
        assert_eq!(ProjectStatus::Approved, staged.status);
        let phases = staged.phases.as_ref().unwrap();
        for key in PhaseKey::ALL {
            assert_eq!("0", phases.get(key).marks);
            assert_eq!("", phases.get(key).remarks);
        }

        assert_eq!(true, dashboard.settle(change, Ok(())).is_confirmed());
    }

    #[tokio::test]
    async fn test_change_status_confirmed() {
        let mut gateway = gateway_returning(mentor(vec![project(1, ProjectStatus::Pending)]));
        gateway
            .expect_update_project_status()
            .with(eq(UpdateProjectStatusParams {
                project_id: ProjectId(1),
                status: ProjectStatus::Approved,
            }))
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(UpdateProjectStatusResult::default()))));
        let mut dashboard = mounted(gateway).await;

        let outcome = dashboard
            .change_status(ProjectId(1), Decision::Approve)
            .await
            .unwrap();

        assert_eq!(true, outcome.is_confirmed());
        assert_eq!(
            Some(GradingPhases::initial()),
            dashboard.project(ProjectId(1)).unwrap().phases
        );
    }

    #[tokio::test]
    async fn test_change_status_rolls_back() {
        let mut gateway = gateway_returning(mentor(vec![project(1, ProjectStatus::Pending)]));
        gateway.expect_update_project_status().times(1).return_once(|_| {
            Box::pin(future::ready(Err(GatewayError::Rejected {
                status: 400,
                detail: Some("Project already reviewed".to_string()),
            })))
        });
        let mut dashboard = mounted(gateway).await;

        let outcome = dashboard
            .change_status(ProjectId(1), Decision::Approve)
            .await
            .unwrap();

        match outcome {
            CommandOutcome::RolledBack(err) => {
                assert_eq!("Project already reviewed", err.to_string())
            }
            CommandOutcome::Confirmed => panic!("expected rollback"),
        }
        let project = dashboard.project(ProjectId(1)).unwrap();
        assert_eq!(ProjectStatus::Pending, project.status);
        assert_eq!(None, project.phases);
    }

    #[tokio::test]
    async fn test_change_status_not_pending() {
        let mut gateway = gateway_returning(mentor(vec![project(1, ProjectStatus::Rejected)]));
        gateway.expect_update_project_status().never();
        let mut dashboard = mounted(gateway).await;

        let result = dashboard.change_status(ProjectId(1), Decision::Approve).await;

        assert!(matches!(result, Err(ClientError::InvalidTransition(..))));
    }

    #[tokio::test]
    async fn test_edit_grade_locked_unless_approved() {
        let gateway = gateway_returning(mentor(vec![project(1, ProjectStatus::Pending)]));
        let mut dashboard = mounted(gateway).await;

        let result = dashboard.edit_grade(ProjectId(1), PhaseKey::Phase1, GradeField::Marks, "85");

        assert!(matches!(result, Err(ClientError::GradingLocked(ProjectId(1)))));
    }

    #[tokio::test]
    async fn test_save_marks_sends_integers() {
        let mut approved = project(1, ProjectStatus::Approved);
        approved.phases = Some(GradingPhases::initial());

        let mut gateway = gateway_returning(mentor(vec![approved]));
        gateway
            .expect_update_project_phases()
            .with(eq(UpdateProjectPhasesParams {
                project_id: ProjectId(1),
                phase1_marks: Some(85),
                phase1_remarks: Some("Good".to_string()),
                phase2_marks: None,
                phase2_remarks: None,
                phase3_marks: Some(0),
                phase3_remarks: None,
            }))
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(UpdateProjectPhasesResult::default()))));
        let mut dashboard = mounted(gateway).await;

        dashboard
            .edit_grade(ProjectId(1), PhaseKey::Phase1, GradeField::Marks, "85")
            .unwrap();
        dashboard
            .edit_grade(ProjectId(1), PhaseKey::Phase1, GradeField::Remarks, "Good")
            .unwrap();
        dashboard
            .edit_grade(ProjectId(1), PhaseKey::Phase2, GradeField::Marks, "")
            .unwrap();

        let message = dashboard.save_marks(ProjectId(1)).await.unwrap();

        assert_eq!("Marks and Remarks saved successfully!", message);
    }

    #[tokio::test]
    async fn test_save_marks_failure_keeps_local_fields() {
        let mut approved = project(1, ProjectStatus::Approved);
        approved.phases = Some(GradingPhases {
            phase1: PhaseGrade::new(Some(70), Some("ok".to_string())),
            ..GradingPhases::initial()
        });

        let mut gateway = gateway_returning(mentor(vec![approved]));
        gateway.expect_update_project_phases().times(1).return_once(|_| {
            Box::pin(future::ready(Err(GatewayError::Rejected {
                status: 500,
                detail: None,
            })))
        });
        let dashboard = mounted(gateway).await;

        let result = dashboard.save_marks(ProjectId(1)).await;

        assert_eq!("Failed to save marks", result.unwrap_err().to_string());
        let phases = dashboard.project(ProjectId(1)).unwrap().phases.as_ref().unwrap();
        assert_eq!("70", phases.phase1.marks);
        assert_eq!("ok", phases.phase1.remarks);
    }

    #[tokio::test]
    async fn test_save_marks_locked_on_rejected_project() {
        let mut rejected = project(1, ProjectStatus::Rejected);
        rejected.phases = Some(GradingPhases::initial());

        let mut gateway = gateway_returning(mentor(vec![rejected]));
        gateway.expect_update_project_phases().never();
        let dashboard = mounted(gateway).await;

        let result = dashboard.save_marks(ProjectId(1)).await;

        assert!(matches!(result, Err(ClientError::GradingLocked(ProjectId(1)))));
    }

    #[tokio::test]
    async fn test_sign_out_then_mount_not_authenticated() {
        let gateway = gateway_returning(mentor(vec![]));
        let mut dashboard = mounted(gateway).await;

        let mut auth = MockAuthService::new();
        auth.expect_logout()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(()))));

        dashboard.sign_out(&auth).await.unwrap();
        assert_eq!(None, dashboard.session().identifier());

        dashboard.mount().await;
        assert!(matches!(
            dashboard.state().error(),
            Some(ClientError::NotAuthenticated)
        ));
    }
}
