use crate::domain::platform::{Decision, GradingPhases, MentoredProject, ProjectId, ProjectStatus};
use crate::errors::ClientError;

#[derive(Debug)]
pub enum CommandOutcome {
    Confirmed,
    RolledBack(ClientError),
}

impl CommandOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, CommandOutcome::Confirmed)
    }
}

/// A status change applied to the local list ahead of the server's answer.
/// Holds what the project looked like before so it can be put back.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct StatusChange {
    pub project_id: ProjectId,
    pub target: ProjectStatus,
    previous_status: ProjectStatus,
    previous_phases: Option<GradingPhases>,
}

fn find(
    projects: &mut [MentoredProject],
    project_id: ProjectId,
) -> Result<&mut MentoredProject, ClientError> {
    projects
        .iter_mut()
        .find(|project| project.id == project_id)
        .ok_or(ClientError::ProjectNotFound(project_id))
}

impl StatusChange {
    /// Only pending projects move. Approving a project without phases gives
    /// it three blank ones straight away.
    pub fn stage(
        projects: &mut [MentoredProject],
        project_id: ProjectId,
        decision: Decision,
    ) -> Result<Self, ClientError> {
        let project = find(projects, project_id)?;

        if !project.status.is_pending() {
            return Err(ClientError::InvalidTransition(project_id, project.status));
        }

        let change = Self {
            project_id,
            target: decision.target(),
            previous_status: project.status,
            previous_phases: project.phases.clone(),
        };

        project.status = change.target;
        if change.target == ProjectStatus::Approved && project.phases.is_none() {
            project.phases = Some(GradingPhases::initial());
        }

        tracing::debug!(%project_id, status = %change.target, "staged status change");
        Ok(change)
    }

    pub fn settle(
        self,
        projects: &mut [MentoredProject],
        result: Result<(), ClientError>,
    ) -> CommandOutcome {
        match result {
            Ok(()) => CommandOutcome::Confirmed,
            Err(err) => {
                if let Ok(project) = find(projects, self.project_id) {
                    project.status = self.previous_status;
                    project.phases = self.previous_phases;
                }
                tracing::debug!(project_id = %self.project_id, "rolled back status change");
                CommandOutcome::RolledBack(err)
            }
        }
    }
}
