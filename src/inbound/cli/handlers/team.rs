use crate::core::application::ApplicationServices;
use crate::domain::views::{MemberDraft, TeamForm};
use crate::errors::ClientError;
use crate::inbound::cli::render;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct TeamFileMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub usn: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dept: String,
}

/// Team registration read from a TOML file:
///
/// ```toml
/// team_name = "Team Alpha"
/// project_title = "Smart Irrigation"
/// synopsis = "Soil moisture driven watering"
///
/// [[members]]
/// name = "Asha"
/// usn = "1RV22CS001"
/// ```
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct TeamFile {
    pub team_name: String,
    pub project_title: String,
    pub synopsis: String,
    #[serde(default)]
    pub members: Vec<TeamFileMember>,
}

impl TeamFile {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Fills the form the way a user would, one member at a time, then submits.
pub async fn create_team<S: ApplicationServices>(
    state: &S,
    team: TeamFile,
) -> Result<String, ClientError> {
    let mut form = TeamForm::new(state.gateway());
    form.team_name = team.team_name;
    form.project_title = team.project_title;
    form.synopsis = team.synopsis;

    for member in team.members {
        form.current_member = MemberDraft {
            name: member.name,
            usn: member.usn,
            email: member.email,
            dept: member.dept,
        };
        form.add_member()?;
    }

    let result = form.submit().await?;

    Ok(render::team_created(&result))
}
