use crate::core::application::ApplicationServices;
use crate::domain::views::ProjectList;
use crate::errors::ClientError;
use crate::inbound::cli::render;

pub async fn projects<S: ApplicationServices>(
    state: &S,
    search: Option<String>,
) -> Result<String, ClientError> {
    let mut list = ProjectList::new(state.gateway());

    list.mount().await;
    if let Some(err) = list.take_error() {
        return Err(err);
    }

    let term = search.unwrap_or_default();
    let found = list.filter(&term);
    tracing::debug!(term = %term, found = found.len(), "filtered projects");

    Ok(render::project_list(&found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::domain::auth::MockAuthService;
    use crate::domain::platform::{MockGatewayPort, ProjectSummary};
    use std::future;

    fn app_with_projects() -> Application<MockGatewayPort, MockAuthService> {
        let mut gateway = MockGatewayPort::new();
        gateway.expect_list_projects().times(1).return_once(|| {
            Box::pin(future::ready(Ok(vec![
                ProjectSummary {
                    id: Some(1),
                    title: "Smart Irrigation".to_string(),
                    synopsis: "Soil sensors".to_string(),
                },
                ProjectSummary {
                    id: Some(2),
                    title: "Library Portal".to_string(),
                    synopsis: "Book lending".to_string(),
                },
            ])))
        });

        Application::<MockGatewayPort, MockAuthService>::mock_instance(MockAppInstanceParameters {
            gateway: Some(gateway),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_projects_search() {
        let app = app_with_projects();

        let text = projects(&app, Some("BOOK".to_string())).await.unwrap();

        assert_eq!(true, text.contains(" Library Portal "));
        assert_eq!(true, text.contains(" Book lending"));
        assert_eq!(false, text.contains("Smart Irrigation"));
    }

    #[tokio::test]
    async fn test_projects_no_match() {
        let app = app_with_projects();

        let text = projects(&app, Some("drone".to_string())).await.unwrap();

        assert_eq!("No projects found.\n", text);
    }
}
