use axum::{
    Router, Server,
    http::{HeaderValue, Method, header},
    middleware::from_fn,
};
use std::sync::Arc;
use teamboard_backend::{
    AppState, config::Config, db, init_tracing, live::LivePublisher, middleware::logger::logger,
    routes,
};
use tower_http::cors::{Any, CorsLayer};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(allowed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let pool = db::build_pool(&config.database())?;

    let live = match &config.redis_url {
        Some(url) => LivePublisher::new(Some(redis::Client::open(url.as_str())?)),
        None => {
            tracing::warn!("REDIS_URL not set, live updates disabled");
            LivePublisher::disabled()
        }
    };

    let cors = cors_layer(&config.cors_origins);
    let addr = config.server_address();
    let state = Arc::new(AppState::new(pool, live, config));

    let app = Router::new()
        .merge(routes::create_router(state))
        .layer(cors)
        .layer(from_fn(logger));

    tracing::info!(address = %addr, "Server listening");
    Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
