use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::post,
};
use gatehouse_adapters::AllowedOrigins;
use gatehouse_application::AccountLifecycle;
use gatehouse_core::IdentityProvider;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::routes;
use crate::trace::{make_span_with_request_id, on_request, on_response};

/// Identity service exposing the four account lifecycle routes.
pub struct IdentityService {
    router: Router,
}

impl IdentityService {
    /// Assemble the router over a lifecycle controller.
    ///
    /// The lifecycle is shared behind an `Arc`; it holds no per-request
    /// state, so a single instance serves every concurrent operation.
    pub fn new<P>(lifecycle: AccountLifecycle<P>) -> Self
    where
        P: IdentityProvider + 'static,
    {
        let state = Arc::new(lifecycle);

        let router = Router::new()
            .route("/identity/register", post(routes::register::<P>))
            .route("/identity/login", post(routes::login::<P>))
            .route("/identity/reset-password", post(routes::reset_password::<P>))
            .route(
                "/identity/resend-confirmation",
                post(routes::resend_confirmation::<P>),
            )
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a plain Router, optionally restricted to the given
    /// CORS origins, ready for standalone serving or nesting.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .is_ok_and(|origin| allowed_origins.contains(origin))
                    },
                ));
            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the identity service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Identity service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
