use crate::domain::platform::{GatewayPort, ProjectSummary};
use crate::domain::views::LoadState;
use crate::errors::{ClientError, request_failed};
use std::sync::Arc;

pub struct ProjectList<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    gateway: Arc<G>,
    state: LoadState<Vec<ProjectSummary>>,
}

impl<G> ProjectList<G>
where
    G: GatewayPort + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: LoadState::Loading,
        }
    }

    pub async fn mount(&mut self) -> &LoadState<Vec<ProjectSummary>> {
        let result = self
            .gateway
            .list_projects()
            .await
            .map_err(|err| request_failed(err, "Failed to fetch projects"));

        self.state = LoadState::from_result(result);
        &self.state
    }

    pub fn state(&self) -> &LoadState<Vec<ProjectSummary>> {
        &self.state
    }

    pub fn take_error(&mut self) -> Option<ClientError> {
        self.state.take_error()
    }

    pub fn filter(&self, term: &str) -> Vec<&ProjectSummary> {
        match self.state.success() {
            Some(projects) => filter_projects(projects, term),
            None => vec![],
        }
    }
}

/// Projects whose title or synopsis contains `term`, ignoring case.
pub fn filter_projects<'a>(projects: &'a [ProjectSummary], term: &str) -> Vec<&'a ProjectSummary> {
    let term = term.to_lowercase();
    projects
        .iter()
        .filter(|project| {
            project.title.to_lowercase().contains(&term)
                || project.synopsis.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::platform::MockGatewayPort;
    use crate::outbound::http::error::Error as GatewayError;
    use std::future;

    fn summary(id: i64, title: &str, synopsis: &str) -> ProjectSummary {
        ProjectSummary {
            id: Some(id),
            title: title.to_string(),
            synopsis: synopsis.to_string(),
        }
    }

    fn catalogue() -> Vec<ProjectSummary> {
        vec![
            summary(1, "Smart Irrigation", "Soil moisture sensors drive the pumps"),
            summary(2, "Library Portal", "Book lending with SMART cards"),
            summary(3, "Traffic Analytics", "Camera feeds and counting"),
        ]
    }

    #[test]
    fn test_filter_title_and_synopsis() {
        let projects = catalogue();

        let found = filter_projects(&projects, "smart");

        assert_eq!(vec![&projects[0], &projects[1]], found);
    }

    #[test]
    fn test_filter_empty_term() {
        let projects = catalogue();

        assert_eq!(3, filter_projects(&projects, "").len());
    }

    #[test]
    fn test_filter_is_subset() {
        let projects = catalogue();

        for term in ["a", "CAMERA", "zzz", "lending"] {
            let found = filter_projects(&projects, term);
            assert_eq!(true, found.len() <= projects.len());
            for project in found {
                assert_eq!(true, projects.contains(project));
                let term = term.to_lowercase();
                assert_eq!(
                    true,
                    project.title.to_lowercase().contains(&term)
                        || project.synopsis.to_lowercase().contains(&term)
                );
            }
        }
    }

    #[tokio::test]
    async fn test_mount_and_filter() {
        let mut gateway = MockGatewayPort::new();
        gateway
            .expect_list_projects()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(catalogue()))));

        let mut list = ProjectList::new(Arc::new(gateway));
        list.mount().await;

        assert_eq!(1, list.filter("traffic").len());
    }

    #[tokio::test]
    async fn test_mount_failure() {
        let mut gateway = MockGatewayPort::new();
        gateway.expect_list_projects().times(1).return_once(|| {
            Box::pin(future::ready(Err(GatewayError::Rejected {
                status: 502,
                detail: None,
            })))
        });

        let mut list = ProjectList::new(Arc::new(gateway));
        list.mount().await;

        assert_eq!(
            "Failed to fetch projects",
            list.state().error().unwrap().to_string()
        );
        assert_eq!(0, list.filter("").len());
    }
}
