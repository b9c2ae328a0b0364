//! Courtpass server binary.
//!
//! Reads `COURTPASS__*` configuration, wires adapters to ports and serves
//! the HTTP API. Without `database`/`redis` sections the server runs on
//! in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courtpass::adapters::catalog::StaticPriceCatalog;
use courtpass::adapters::http::{api_router, AppState};
use courtpass::adapters::memory::{InMemoryCartStore, InMemoryRegistrationStore};
use courtpass::adapters::notification::{LogNotifier, WebhookNotifier};
use courtpass::adapters::postgres::PostgresRegistrationStore;
use courtpass::adapters::redis::RedisCartStore;
use courtpass::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use courtpass::application::handlers::checkout::CheckoutUrls;
use courtpass::application::NotificationDispatcher;
use courtpass::config::{AppConfig, CartConfig, DatabaseConfig, RedisConfig, ServerConfig};
use courtpass::ports::{CartStore, Notifier, RegistrationStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let registration_store = registration_store(config.database.as_ref()).await?;
    let cart_store = cart_store(config.redis.as_ref(), &config.cart).await?;

    let payment_provider = Arc::new(StripePaymentAdapter::new(
        StripeConfig::new(
            config.payment.stripe_api_key.clone(),
            config.payment.stripe_webhook_secret.clone(),
        )
        .with_require_livemode(config.payment.is_live_mode()),
    ));
    if config.payment.is_test_mode() {
        tracing::warn!("Stripe is in test mode");
    }

    let price_catalog = Arc::new(
        StaticPriceCatalog::new(config.payment.price_map()?)
            .with_passthrough(config.payment.price_passthrough),
    );
    tracing::info!(
        prices = price_catalog.len(),
        passthrough = config.payment.price_passthrough,
        "Price catalog loaded"
    );

    let notifier: Arc<dyn Notifier> = match &config.notification.webhook_url {
        Some(url) => Arc::new(WebhookNotifier::new(
            SecretString::new(url.clone()),
            config.notification.timeout(),
        )?),
        None => {
            tracing::info!("No notification webhook configured, registrations are only logged");
            Arc::new(LogNotifier::new())
        }
    };

    let state = AppState {
        cart_store,
        registration_store,
        payment_provider,
        price_catalog,
        checkout_urls: CheckoutUrls {
            success_url: config.payment.success_url.clone(),
            cancel_url: config.payment.cancel_url.clone(),
        },
        dispatcher: NotificationDispatcher::new(
            notifier,
            config.notification.channel.clone(),
            config.notification.timeout(),
        ),
    };

    let app = api_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Courtpass listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn registration_store(
    database: Option<&DatabaseConfig>,
) -> Result<Arc<dyn RegistrationStore>, BoxError> {
    let Some(database) = database else {
        tracing::warn!("No database configured, using in-memory registration store");
        return Ok(Arc::new(InMemoryRegistrationStore::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(Some(database.idle_timeout()))
        .max_lifetime(Some(database.max_lifetime()))
        .connect(&database.url)
        .await?;
    tracing::info!("PostgreSQL connected");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    Ok(Arc::new(PostgresRegistrationStore::new(pool)))
}

async fn cart_store(
    redis_config: Option<&RedisConfig>,
    cart: &CartConfig,
) -> Result<Arc<dyn CartStore>, BoxError> {
    let Some(redis_config) = redis_config else {
        tracing::warn!("No Redis configured, carts are kept in memory");
        return Ok(Arc::new(InMemoryCartStore::new()));
    };

    let client = redis::Client::open(redis_config.url.as_str())?;
    let conn = tokio::time::timeout(
        redis_config.timeout(),
        client.get_multiplexed_tokio_connection(),
    )
    .await??;
    tracing::info!("Redis connected");

    Ok(Arc::new(
        RedisCartStore::new(conn, cart.ttl_secs).with_key_prefix(cart.key_prefix.clone()),
    ))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-cart-session"),
        ])
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
