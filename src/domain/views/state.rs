use crate::domain::platform::{FetchUserParams, GatewayPort, Role, User};
use crate::domain::session::Session;
use crate::errors::{ClientError, access_denied, request_failed};

/// Lifecycle shared by every screen: `Loading` until the first answer, then
/// `Success` or `Failure`.
#[derive(Debug)]
pub enum LoadState<T> {
    Loading,
    Success(T),
    Failure(ClientError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => LoadState::Success(value),
            Err(err) => LoadState::Failure(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn success_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            LoadState::Failure(err) => Some(err),
            _ => None,
        }
    }

    /// Moves a failure out, leaving `Loading` behind. Other states are kept.
    pub fn take_error(&mut self) -> Option<ClientError> {
        match std::mem::take(self) {
            LoadState::Failure(err) => Some(err),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Resolves the session, fetches the user record and checks its role.
pub(crate) async fn load_user<G>(
    gateway: &G,
    session: &Session,
    expected: Role,
    fetch_failed: &str,
) -> Result<User, ClientError>
where
    G: GatewayPort + ?Sized,
{
    let email = session.require()?;

    tracing::debug!(email, role = %expected, "fetching user");
    let user = gateway
        .fetch_user(FetchUserParams {
            email: email.to_string(),
        })
        .await
        .map_err(|err| request_failed(err, fetch_failed))?;

    if user.role() != expected {
        return Err(access_denied(expected, user.role()));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state() {
        let state: LoadState<i32> = LoadState::default();
        assert_eq!(true, state.is_loading());

        let state = LoadState::from_result(Ok(3));
        assert_eq!(Some(&3), state.success());
        assert_eq!(true, state.error().is_none());

        let state: LoadState<i32> = LoadState::from_result(Err(ClientError::NotAuthenticated));
        assert_eq!(None, state.success());
        assert!(matches!(state.error(), Some(ClientError::NotAuthenticated)));
    }

    #[test]
    fn test_take_error() {
        let mut state: LoadState<i32> = LoadState::Failure(ClientError::InvalidMember);
        assert!(matches!(state.take_error(), Some(ClientError::InvalidMember)));
        assert_eq!(true, state.is_loading());

        let mut state = LoadState::Success(1);
        assert_eq!(true, state.take_error().is_none());
        assert_eq!(Some(&1), state.success());
    }
}
