use crate::domain::platform::{CreateTeamParams, CreateTeamResult, GatewayPort, TeamMember};
use crate::errors::{ClientError, request_failed};
use std::sync::Arc;

/// The member currently being typed in, before it joins the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub usn: String,
    pub email: String,
    pub dept: String,
}

impl MemberDraft {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.usn.is_empty()
    }
}

impl From<MemberDraft> for TeamMember {
    fn from(value: MemberDraft) -> Self {
        Self {
            name: value.name,
            usn: value.usn,
            email: value.email,
            dept: value.dept,
        }
    }
}

pub struct TeamForm<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    gateway: Arc<G>,
    pub team_name: String,
    pub project_title: String,
    pub synopsis: String,
    pub current_member: MemberDraft,
    members: Vec<TeamMember>,
}

impl<G> TeamForm<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            team_name: String::new(),
            project_title: String::new(),
            synopsis: String::new(),
            current_member: MemberDraft::default(),
            members: vec![],
        }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Moves the current draft onto the roster. Duplicates are allowed.
    pub fn add_member(&mut self) -> Result<(), ClientError> {
        if !self.current_member.is_complete() {
            return Err(ClientError::InvalidMember);
        }

        let member = std::mem::take(&mut self.current_member);
        tracing::debug!(usn = %member.usn, "adding team member");
        self.members.push(member.into());

        Ok(())
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_member(&mut self, index: usize) -> Option<TeamMember> {
        if index < self.members.len() {
            Some(self.members.remove(index))
        } else {
            None
        }
    }

    pub fn payload(&self) -> CreateTeamParams {
        CreateTeamParams {
            team_name: self.team_name.clone(),
            team_size: self.members.len(),
            team_members: self.members.clone(),
            project_title: self.project_title.clone(),
            project_synopsis: self.synopsis.clone(),
        }
    }

    /// One gateway call. Fields are cleared only when the server accepts.
    pub async fn submit(&mut self) -> Result<CreateTeamResult, ClientError> {
        let result = self
            .gateway
            .create_team(self.payload())
            .await
            .map_err(|err| request_failed(err, "Failed to connect to the server."))?;

        tracing::debug!(team_id = ?result.team_id, project_id = ?result.project_id, "team created");
        self.team_name.clear();
        self.project_title.clear();
        self.synopsis.clear();
        self.current_member = MemberDraft::default();
        self.members.clear();

        Ok(result)
    }
}
