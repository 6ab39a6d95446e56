use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceLoginParams, ServiceRegisterParams};
use crate::domain::platform::Role;
use crate::errors::ClientError;

pub async fn login<S: ApplicationServices>(
    state: &S,
    role: Role,
    email: String,
    password: String,
) -> Result<String, ClientError> {
    let result = state
        .auth_service()
        .login(ServiceLoginParams {
            role,
            email,
            password,
        })
        .await?;

    let dashboard = match result.role {
        Role::Student => "student",
        Role::Mentor => "mentor",
    };
    let greeting = result.name.unwrap_or(result.email);

    Ok(format!(
        "Logged in as {greeting} ({}). Run `projdesk {dashboard}` to open the dashboard.",
        result.role
    ))
}

pub async fn register<S: ApplicationServices>(
    state: &S,
    params: ServiceRegisterParams,
) -> Result<String, ClientError> {
    let result = state.auth_service().register(params).await?;

    Ok(result.message)
}

pub async fn logout<S: ApplicationServices>(state: &S) -> Result<String, ClientError> {
    state.auth_service().logout().await?;

    Ok("Signed out.".to_string())
}
