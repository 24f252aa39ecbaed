//! Terminal demo of the waypoint navigation stack.

mod app;
mod logging;
mod routes;

use std::sync::Arc;

use tracing::info;
use waypoint::{Environment, Router, RouterKey, SharedRouter};

use crate::app::App;
use crate::routes::{Auth, Guest, HomeRoute, SignedIn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = logging::setup_logging()?;

    let auth: Arc<dyn Auth> = match std::env::var("USER") {
        Ok(user) => Arc::new(SignedIn(user)),
        Err(_) => Arc::new(Guest),
    };
    let router = Router::builder()
        .route(HomeRoute { auth: Arc::clone(&auth) })
        .on_change(|event, routes| info!(?event, depth = routes.len(), "navigation"))
        .build();
    let env = Environment::new().with::<RouterKey>(SharedRouter::new(router));

    App::new(&env, auth).run().await
}
