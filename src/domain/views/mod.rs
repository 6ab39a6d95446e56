mod command;
mod mentor;
mod project_list;
mod state;
mod student;
mod team_form;

pub use command::{CommandOutcome, StatusChange};
pub use mentor::MentorDashboard;
pub use project_list::{ProjectList, filter_projects};
pub(crate) use state::load_user;
pub use state::LoadState;
pub use student::{NO_MENTOR, PhaseView, StudentDashboard, mentor_label, phase_rows};
pub use team_form::{MemberDraft, TeamForm};
