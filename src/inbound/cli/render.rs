use crate::domain::platform::{
    CreateTeamResult, MentorProfile, MentoredProject, PhaseKey, ProjectId, ProjectSummary,
    SimilarityReport, StudentProfile, TeamMember,
};
use crate::domain::views::{mentor_label, phase_rows};
use crate::errors::ClientError;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const NO_ANALYSIS: &str = "No detailed analysis available.";
const NO_MATCHES: &str = "No direct matches found.";
const UNKNOWN_TITLE: &str = "Title Not Available";

pub fn error(err: &ClientError) -> String {
    format!("Error: {err}")
}

fn score(project: &MentoredProject) -> String {
    match project.similarity_score {
        Some(value) if project.is_high_risk() => format!("{value}% HIGH RISK"),
        Some(value) => format!("{value}%"),
        None => "-".to_string(),
    }
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::psql()).to_string()
}

fn indent(text: &str, prefix: &str) -> Vec<String> {
    text.lines().map(|line| format!("{prefix}{line}")).collect()
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Rows
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "USN")]
    usn: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Dept")]
    dept: String,
}

impl From<&TeamMember> for MemberRow {
    fn from(member: &TeamMember) -> Self {
        Self {
            name: member.name.clone(),
            usn: member.usn.clone(),
            email: member.email.clone(),
            dept: member.dept.clone(),
        }
    }
}

#[derive(Tabled)]
struct PhaseRow {
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Marks")]
    marks: String,
    #[tabled(rename = "Remarks")]
    remarks: String,
}

#[derive(Tabled)]
struct MentoredRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: ProjectId,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Similarity")]
    similarity: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Synopsis")]
    synopsis: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Student
////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn student_dashboard(profile: &StudentProfile) -> String {
    let mut lines = vec![
        "Student Dashboard".to_string(),
        format!("Name: {}", profile.name),
        format!("USN: {}", profile.usn.as_deref().unwrap_or("-")),
        format!("Email: {}", profile.email),
        String::new(),
        "Team Details".to_string(),
    ];

    if profile.team_members.is_empty() {
        lines.push("  You have not joined a team yet. Use create-team to register.".to_string());
    } else {
        let rows = profile.team_members.iter().map(MemberRow::from).collect();
        lines.extend(indent(&table(rows), "  "));
    }
    lines.push(String::new());

    lines.push("Mentor Details".to_string());
    lines.push(format!("  {}", mentor_label(profile)));
    lines.push(String::new());

    lines.push("Project Details".to_string());
    match &profile.project_title {
        Some(title) => {
            let status = profile
                .project_status
                .map(|status| status.to_string())
                .unwrap_or("-".to_string());
            lines.push(format!("  Title: {title}"));
            lines.push(format!("  Status: {status}"));
        }
        None => lines.push("  No project submitted.".to_string()),
    }
    lines.push(String::new());

    lines.push("Phase-wise Marks & Remarks".to_string());
    let rows = phase_rows(profile)
        .into_iter()
        .map(|row| PhaseRow {
            phase: row.label,
            marks: if row.marks == 0 {
                "Pending".to_string()
            } else {
                row.marks.to_string()
            },
            remarks: row.remarks,
        })
        .collect();
    lines.extend(indent(&table(rows), "  "));

    finish(lines)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Mentor
////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn mentor_dashboard(profile: &MentorProfile, expanded: Option<ProjectId>) -> String {
    let mut lines = vec![
        "Mentor Dashboard".to_string(),
        format!("Name: {}", profile.name),
        format!("Dept: {}", profile.dept.as_deref().unwrap_or("-")),
        format!("Email: {}", profile.email),
        String::new(),
        "Assigned Teams & Projects".to_string(),
    ];

    if profile.mentored_projects.is_empty() {
        lines.push("  No teams assigned yet.".to_string());
        return finish(lines);
    }

    let rows = profile
        .mentored_projects
        .iter()
        .enumerate()
        .map(|(index, project)| MentoredRow {
            index: index + 1,
            id: project.id,
            team: project.team.team_name.clone().unwrap_or("-".to_string()),
            title: project.title.clone(),
            similarity: score(project),
            status: project.status.to_string(),
        })
        .collect();
    lines.extend(indent(&table(rows), "  "));

    if let Some(project) = expanded.and_then(|id| {
        profile
            .mentored_projects
            .iter()
            .find(|project| project.id == id)
    }) {
        lines.push(String::new());
        lines.extend(project_details(project));
    }

    finish(lines)
}

fn project_details(project: &MentoredProject) -> Vec<String> {
    let mut lines = vec![format!("Project {}: {}", project.id, project.title)];

    lines.push("  Team Members".to_string());
    let rows = project
        .team
        .team_members
        .iter()
        .map(MemberRow::from)
        .collect();
    lines.extend(indent(&table(rows), "    "));

    lines.push(format!("  Similarity Score: {}", score(project)));
    lines.push("  Matched Projects:".to_string());
    if project.matches.is_empty() {
        lines.push(format!("    {NO_MATCHES}"));
    }
    for matched in &project.matches {
        lines.push(format!(
            "    ID {}: {}",
            matched.id,
            matched.title.as_deref().unwrap_or(UNKNOWN_TITLE)
        ));
    }

    lines.push("  Project Synopsis".to_string());
    lines.push(format!("    {}", project.synopsis));

    lines.push("  Similarity Analysis Report".to_string());
    lines.extend(indent(
        &similarity_report(project.similarity_report.as_ref()),
        "    ",
    ));

    lines.push(format!("  Project Status: {}", project.status));
    if project.status.is_pending() {
        lines.push(format!("    approve {0} | reject {0}", project.id));
    }
    if let Some(phases) = &project.phases {
        let rows = PhaseKey::ALL
            .into_iter()
            .map(|key| {
                let phase = phases.get(key);
                PhaseRow {
                    phase: key.label().to_string(),
                    marks: phase.marks.clone(),
                    remarks: phase.remarks.clone(),
                }
            })
            .collect();
        lines.extend(indent(&table(rows), "    "));
    }

    lines
}

pub fn similarity_report(report: Option<&SimilarityReport>) -> String {
    let Some(report) = report else {
        return NO_ANALYSIS.to_string();
    };

    let mut lines = Vec::new();
    if let Some(analysis) = &report.analysis {
        lines.push("Core Analysis".to_string());
        lines.push(analysis.clone());
    }
    if !report.comparison.is_empty() {
        lines.push("Similar Projects Found".to_string());
        for (index, item) in report.comparison.iter().enumerate() {
            lines.push(format!("Match #{}: {}", index + 1, item.match_name));
            lines.push(format!("  \"{}\"", item.similarity_note));
        }
    }
    if lines.is_empty() {
        return NO_ANALYSIS.to_string();
    }

    finish(lines)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Projects and teams
////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn project_list(projects: &[&ProjectSummary]) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }

    let rows = projects
        .iter()
        .map(|project| SummaryRow {
            id: project
                .id
                .map(|id| id.to_string())
                .unwrap_or("-".to_string()),
            title: project.title.clone(),
            synopsis: project.synopsis.clone(),
        })
        .collect();

    finish(vec![table(rows)])
}

pub fn team_created(result: &CreateTeamResult) -> String {
    let team_id = result
        .team_id
        .map(|id| id.to_string())
        .unwrap_or("-".to_string());

    let mut lines = vec![format!("Success! Team ID: {team_id}")];
    if let Some(project_id) = result.project_id {
        lines.push(format!("Project ID: {project_id}"));
    }
    if let Some(mentor) = &result.mentor {
        lines.push(format!("Mentor: {mentor}"));
    }
    if let Some(score) = result.similarity_score {
        lines.push(format!("Similarity Score: {score}%"));
    }

    finish(lines)
}
