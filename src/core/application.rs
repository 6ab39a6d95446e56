use crate::core::config::Config;
use crate::domain::auth::AuthService;
use crate::domain::platform::GatewayPort;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type GATEWAY: GatewayPort + Send;
    type AUTH: AuthService + Send;

    fn config(&self) -> Config;

    fn gateway(&self) -> Arc<Self::GATEWAY>;

    fn auth_service(&self) -> Arc<Self::AUTH>;
}

pub struct Application<GATEWAY, AUTH>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    AUTH: AuthService + Send + Sync + 'static,
{
    config: Config,
    gateway: Arc<GATEWAY>,
    auth_service: Arc<AUTH>,
}

impl<GATEWAY, AUTH> Application<GATEWAY, AUTH>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    AUTH: AuthService + Send + Sync + 'static,
{
    /// The gateway is shared with the auth service, hence the `Arc`.
    pub fn new(config: Config, gateway: Arc<GATEWAY>, auth_service: AUTH) -> Self {
        Self {
            config,
            gateway,
            auth_service: Arc::new(auth_service),
        }
    }
}

impl<GATEWAY, AUTH> Clone for Application<GATEWAY, AUTH>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    AUTH: AuthService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            gateway: self.gateway.clone(),
            auth_service: self.auth_service.clone(),
        }
    }
}

impl<GATEWAY, AUTH> ApplicationServices for Application<GATEWAY, AUTH>
where
    GATEWAY: GatewayPort + Send + Sync + 'static,
    AUTH: AuthService + Send + Sync + 'static,
{
    type GATEWAY = GATEWAY;
    type AUTH = AUTH;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn gateway(&self) -> Arc<Self::GATEWAY> {
        self.gateway.clone()
    }

    fn auth_service(&self) -> Arc<Self::AUTH> {
        self.auth_service.clone()
    }
}
