use crate::domain::auth::{
    AuthService, ServiceLoginParams, ServiceLoginResult, ServiceRegisterParams,
    ServiceRegisterResult,
};
use crate::domain::platform::{
    GatewayPort, LoginParams, RegisterMentorParams, RegisterStudentParams, Role,
};
use crate::domain::session::{Session, SessionPort};
use crate::errors::{ClientError, request_failed};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug)]
pub struct Service<GATEWAY, SESSION>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    SESSION: SessionPort + Send + Sync + 'static,
{
    gateway: Arc<GATEWAY>,
    session_store: Arc<SESSION>,
    dev_fallback_email: Option<String>,
}

impl<GATEWAY, SESSION> Service<GATEWAY, SESSION>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    SESSION: SessionPort + Send + Sync + 'static,
{
    pub fn new(
        gateway: Arc<GATEWAY>,
        session_store: SESSION,
        dev_fallback_email: Option<String>,
    ) -> Self {
        Self {
            gateway,
            session_store: Arc::new(session_store),
            dev_fallback_email,
        }
    }
}

#[async_trait]
impl<GATEWAY, SESSION> AuthService for Service<GATEWAY, SESSION>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    SESSION: SessionPort + Send + Sync + 'static,
{
    async fn login(&self, params: ServiceLoginParams) -> Result<ServiceLoginResult, ClientError> {
        let result = self
            .gateway
            .login(LoginParams {
                role: params.role,
                email: params.email.clone(),
                password: params.password,
            })
            .await
            .map_err(|err| request_failed(err, "Login failed"))?;

        tracing::debug!(email = %params.email, role = %params.role, "writing session");
        self.session_store.set(params.email.clone()).await?;

        Ok(ServiceLoginResult {
            email: params.email,
            role: params.role,
            name: result.name,
        })
    }

    async fn register(
        &self,
        params: ServiceRegisterParams,
    ) -> Result<ServiceRegisterResult, ClientError> {
        let role = params.role();
        let result = match params {
            ServiceRegisterParams::Student {
                name,
                email,
                password,
                usn,
                dept,
                year,
                sem,
            } => {
                self.gateway
                    .register_student(RegisterStudentParams {
                        name,
                        email,
                        password,
                        usn,
                        dept,
                        year,
                        sem,
                    })
                    .await
            }
            ServiceRegisterParams::Mentor {
                name,
                email,
                password,
                dept,
            } => {
                self.gateway
                    .register_mentor(RegisterMentorParams {
                        name,
                        email,
                        password,
                        dept,
                    })
                    .await
            }
        }
        .map_err(|err| request_failed(err, "Registration failed"))?;

        let message = result.message.unwrap_or_else(|| match role {
            Role::Student => "Student registered successfully!".to_string(),
            Role::Mentor => "Mentor registered successfully!".to_string(),
        });

        Ok(ServiceRegisterResult { role, message })
    }

    async fn logout(&self) -> Result<(), ClientError> {
        tracing::debug!("clearing session");
        self.session_store.clear().await?;

        Ok(())
    }

    async fn current_session(&self) -> Result<Session, ClientError> {
        let session =
            Session::resolve(self.session_store.as_ref(), self.dev_fallback_email.as_deref())
                .await?;

        Ok(session)
    }
}
