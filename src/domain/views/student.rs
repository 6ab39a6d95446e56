use crate::domain::auth::AuthService;
use crate::domain::platform::{GatewayPort, PhaseKey, Role, StudentProfile, User};
use crate::domain::session::Session;
use crate::domain::views::{LoadState, load_user};
use crate::errors::{ClientError, access_denied};
use std::sync::Arc;

pub const NO_MENTOR: &str = "No mentor assigned yet.";

/// One row of the student's marks table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseView {
    pub label: String,
    pub marks: i64,
    pub remarks: String,
}

pub struct StudentDashboard<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    gateway: Arc<G>,
    session: Session,
    state: LoadState<StudentProfile>,
}

impl<G> StudentDashboard<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: LoadState::Loading,
        }
    }

    pub async fn mount(&mut self) -> &LoadState<StudentProfile> {
        let result = load_user(
            self.gateway.as_ref(),
            &self.session,
            Role::Student,
            "Failed to fetch user details",
        )
        .await
        .and_then(|user| match user {
            User::Student(profile) => Ok(profile),
            other => Err(access_denied(Role::Student, other.role())),
        });

        self.state = LoadState::from_result(result);
        &self.state
    }

    pub fn state(&self) -> &LoadState<StudentProfile> {
        &self.state
    }

    pub fn take_error(&mut self) -> Option<ClientError> {
        self.state.take_error()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn sign_out<A>(&mut self, auth: &A) -> Result<(), ClientError>
    where
        A: AuthService + ?Sized,
    {
        auth.logout().await?;

        self.session = Session::anonymous();
        self.state = LoadState::Loading;

        Ok(())
    }
}

pub fn mentor_label(profile: &StudentProfile) -> &str {
    profile
        .mentor_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(NO_MENTOR)
}

/// Marks table for the student. Phases the server has not sent show as
/// zero marks and a `-` remark.
pub fn phase_rows(profile: &StudentProfile) -> Vec<PhaseView> {
    PhaseKey::ALL
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let label = format!("Phase {}", index + 1);
            match &profile.project_phases {
                Some(phases) => {
                    let phase = phases.get(*key);
                    PhaseView {
                        label,
                        marks: phase.marks_value().unwrap_or(0),
                        remarks: phase.remarks_value().unwrap_or("-".to_string()),
                    }
                }
                None => PhaseView {
                    label,
                    marks: 0,
                    remarks: "-".to_string(),
                },
            }
        })
        .collect()
}
