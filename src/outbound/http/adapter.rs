use crate::domain::platform::{
    CreateTeamParams, CreateTeamResult, FetchUserParams, GatewayPort, LoginParams, LoginResult,
    ProjectSummary, RegisterMentorParams, RegisterResult, RegisterStudentParams, Role,
    UpdateProjectPhasesParams, UpdateProjectPhasesResult, UpdateProjectStatusParams,
    UpdateProjectStatusResult, User,
};
use crate::outbound::http::error::Error;
use crate::outbound::http::models::{
    CreateTeamBody, CreateTeamResponse, ErrorBody, LoginBody, LoginResponse, MessageResponse,
    ProjectPhasesBody, ProjectStatusBody, ProjectSummaryRow, ProjectSummaryRowList,
    RegisterResponse, StudentRegisterBody, TeacherRegisterBody, UserRow,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: reqwest::Client,
    base_url: Url,
}

pub struct NewHttpGatewayParams {
    pub base_url: String,
    pub user_agent: Option<String>,
}

impl HttpGateway {
    pub fn new(params: NewHttpGatewayParams) -> Result<Self, Error> {
        tracing::debug!(base_url = %params.base_url, "creating http gateway");
        let base_url = Url::parse(&params.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseURL);
        }

        let mut builder = reqwest::ClientBuilder::new();
        if let Some(user_agent) = params.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Appends percent-encoded path segments to the base url, keeping any
    /// path prefix the base url already has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseURL)?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.endpoint(segments)?;
        self.exchange(self.http_client.request(Method::GET, url))
            .await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.endpoint(segments)?;
        self.exchange(self.http_client.request(method, url).json(body))
            .await
    }

    async fn exchange<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "received response");
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(ErrorBody::message);
            debug!(status = status.as_u16(), detail = ?detail, "request rejected");

            return Err(Error::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GatewayPort for HttpGateway {
    async fn login(&self, params: LoginParams) -> Result<LoginResult, Error> {
        let path = match params.role {
            Role::Student => "student",
            Role::Mentor => "teacher",
        };
        let response: LoginResponse = self
            .send_json(
                Method::POST,
                &["login", path],
                &LoginBody {
                    email: &params.email,
                    password: &params.password,
                },
            )
            .await?;

        Ok(response.into())
    }

    async fn register_student(
        &self,
        params: RegisterStudentParams,
    ) -> Result<RegisterResult, Error> {
        let response: RegisterResponse = self
            .send_json(
                Method::POST,
                &["register", "student"],
                &StudentRegisterBody {
                    name: &params.name,
                    email: &params.email,
                    password: &params.password,
                    usn: &params.usn,
                    dept: &params.dept,
                    year: params.year,
                    sem: params.sem,
                },
            )
            .await?;

        Ok(response.into())
    }

    async fn register_mentor(&self, params: RegisterMentorParams) -> Result<RegisterResult, Error> {
        let response: RegisterResponse = self
            .send_json(
                Method::POST,
                &["register", "teacher"],
                &TeacherRegisterBody {
                    name: &params.name,
                    email: &params.email,
                    password: &params.password,
                    dept: &params.dept,
                },
            )
            .await?;

        Ok(response.into())
    }

    async fn fetch_user(&self, params: FetchUserParams) -> Result<User, Error> {
        let row: UserRow = self.get_json(&["user", params.email.as_str()]).await?;

        row.try_into()
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, Error> {
        let rows: Vec<ProjectSummaryRow> = self.get_json(&["projects"]).await?;

        Ok(ProjectSummaryRowList(rows).into())
    }

    async fn create_team(&self, params: CreateTeamParams) -> Result<CreateTeamResult, Error> {
        let response: CreateTeamResponse = self
            .send_json(
                Method::POST,
                &["create-team"],
                &CreateTeamBody::from(params),
            )
            .await?;

        Ok(response.into())
    }

    async fn update_project_status(
        &self,
        params: UpdateProjectStatusParams,
    ) -> Result<UpdateProjectStatusResult, Error> {
        let response: MessageResponse = self
            .send_json(
                Method::PUT,
                &["update-project-status"],
                &ProjectStatusBody::from(&params),
            )
            .await?;

        Ok(response.into())
    }

    async fn update_project_phases(
        &self,
        params: UpdateProjectPhasesParams,
    ) -> Result<UpdateProjectPhasesResult, Error> {
        let response: MessageResponse = self
            .send_json(
                Method::PUT,
                &["update-project-phases"],
                &ProjectPhasesBody::from(params),
            )
            .await?;

        Ok(response.into())
    }
}
