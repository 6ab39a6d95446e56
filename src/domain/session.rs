use crate::errors::ClientError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("error writing session")]
    WriteSessionError,

    #[error("error reading session")]
    ReadSessionError,

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJSONError(#[from] serde_json::Error),
}

/// The persisted slot holding the logged-in user's identifier.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    async fn set(&self, identifier: String) -> Result<(), SessionError>;
    async fn get(&self) -> Result<Option<String>, SessionError>;
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Who the screens act for. Handed to every view-model when it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identifier: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { identifier: None }
    }

    pub fn for_user(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
        }
    }

    /// Reads the persisted slot. `fallback` is only used when the slot is
    /// empty and must be configured explicitly.
    pub async fn resolve<S>(store: &S, fallback: Option<&str>) -> Result<Self, SessionError>
    where
        S: SessionPort + ?Sized,
    {
        if let Some(identifier) = store.get().await? {
            return Ok(Self::for_user(identifier));
        }

        match fallback {
            Some(identifier) => {
                tracing::warn!(identifier, "no session, using development fallback identifier");
                Ok(Self::for_user(identifier))
            }
            None => Ok(Self::anonymous()),
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn require(&self) -> Result<&str, ClientError> {
        self.identifier().ok_or(ClientError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.identifier.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;

    #[tokio::test]
    async fn test_resolve_from_store() {
        let mut store = MockSessionPort::new();
        store
            .expect_get()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(Some("rahul@x".to_string())))));

        let session = Session::resolve(&store, Some("fallback@x")).await.unwrap();

        assert_eq!(Some("rahul@x"), session.identifier());
    }

    #[tokio::test]
    async fn test_resolve_empty_without_fallback() {
        let mut store = MockSessionPort::new();
        store
            .expect_get()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(None))));

        let session = Session::resolve(&store, None).await.unwrap();

        assert_eq!(false, session.is_authenticated());
        assert!(matches!(session.require(), Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_resolve_empty_with_fallback() {
        let mut store = MockSessionPort::new();
        store
            .expect_get()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(None))));

        let session = Session::resolve(&store, Some("kavita.patil@rvce.edu.in"))
            .await
            .unwrap();

        assert_eq!(Some("kavita.patil@rvce.edu.in"), session.identifier());
    }

    #[tokio::test]
    async fn test_resolve_error() {
        let mut store = MockSessionPort::new();
        store
            .expect_get()
            .times(1)
            .return_once(|| Box::pin(future::ready(Err(SessionError::ReadSessionError))));

        let result = Session::resolve(&store, None).await;

        assert_eq!(true, result.is_err());
    }
}
