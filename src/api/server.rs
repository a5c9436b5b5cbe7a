use crate::api::routes;
use crate::config::SharedConfig;
use crate::provider::ProviderClient;
use crate::resolver::DynHostResolver;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub provider: Arc<ProviderClient>,
    pub resolver: DynHostResolver,
}

pub fn new(
    config: SharedConfig,
    provider: Arc<ProviderClient>,
    resolver: DynHostResolver,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr).serve(
        routes::new(AppState {
            config,
            provider,
            resolver,
        })
        .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
