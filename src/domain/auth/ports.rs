use crate::domain::platform::Role;
use crate::domain::session::Session;
use crate::errors::ClientError;
use async_trait::async_trait;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    async fn login(&self, params: ServiceLoginParams) -> Result<ServiceLoginResult, ClientError>;
    async fn register(
        &self,
        params: ServiceRegisterParams,
    ) -> Result<ServiceRegisterResult, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn current_session(&self) -> Result<Session, ClientError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Results
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceLoginResult {
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRegisterResult {
    pub role: Role,
    pub message: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct ServiceLoginParams {
    pub role: Role,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub enum ServiceRegisterParams {
    Student {
        name: String,
        email: String,
        password: String,
        usn: String,
        dept: String,
        year: i64,
        sem: i64,
    },
    Mentor {
        name: String,
        email: String,
        password: String,
        dept: String,
    },
}

impl ServiceRegisterParams {
    pub fn role(&self) -> Role {
        match self {
            ServiceRegisterParams::Student { .. } => Role::Student,
            ServiceRegisterParams::Mentor { .. } => Role::Mentor,
        }
    }
}
