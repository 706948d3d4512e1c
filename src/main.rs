use car_rental_ledger::{
    adapters::mock::{
        CarCatalog as MockCarCatalog, NotificationService as MockNotificationService,
        UserDirectory as MockUserDirectory, seed::parse_seed,
    },
    adapters::postgres::{
        PostgresBillStore, PostgresDamageStore, PostgresPaymentStore, PostgresRentalStore,
    },
    api::{handlers::AppState, router::create_router},
    application::rental::ServiceDependencies,
    domain::{CarId, OfferId, Role, UserId},
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Runtime settings read from the environment
struct Config {
    database_url: String,
    max_connections: u32,
    port: u16,
    /// `uuid:rate` entries for the in-memory car catalog
    seed_cars: Vec<(uuid::Uuid, Decimal)>,
    /// `uuid:percent` entries for the in-memory offers
    seed_offers: Vec<(uuid::Uuid, Decimal)>,
    /// `uuid:role` entries for the in-memory user directory
    seed_users: Vec<(uuid::Uuid, Role)>,
}

impl Config {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/car_rental".into());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".into())
            .parse()?;
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()?;
        let seed_cars = parse_seed(&std::env::var("SEED_CARS").unwrap_or_default())?;
        let seed_offers = parse_seed(&std::env::var("SEED_OFFERS").unwrap_or_default())?;
        let seed_users = parse_seed(&std::env::var("SEED_USERS").unwrap_or_default())?;

        Ok(Self {
            database_url,
            max_connections,
            port,
            seed_cars,
            seed_offers,
            seed_users,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_rental_ledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Initialize adapters
    // Fleet and identity live in other systems; the in-memory adapters stand in
    // for them and start with the SEED_CARS, SEED_OFFERS and SEED_USERS entries.
    let rental_store = Arc::new(PostgresRentalStore::new(pool.clone()));
    let bill_store = Arc::new(PostgresBillStore::new(pool.clone()));
    let damage_store = Arc::new(PostgresDamageStore::new(pool.clone()));
    let payment_store = Arc::new(PostgresPaymentStore::new(pool.clone()));
    let car_catalog = Arc::new(MockCarCatalog::new());
    let user_directory = Arc::new(MockUserDirectory::new());
    let notification_service = Arc::new(MockNotificationService::new());

    tracing::info!(
        cars = config.seed_cars.len(),
        offers = config.seed_offers.len(),
        users = config.seed_users.len(),
        "Seeding in-memory catalog and directory"
    );
    for (id, rate) in config.seed_cars {
        car_catalog.add_car(CarId::from_uuid(id), rate);
    }
    for (id, discount) in config.seed_offers {
        car_catalog.add_offer(OfferId::from_uuid(id), discount);
    }
    for (id, role) in config.seed_users {
        user_directory.add_user(UserId::from_uuid(id), role);
    }

    // Create service dependencies
    let service_deps = ServiceDependencies {
        rental_store,
        bill_store,
        damage_store,
        payment_store,
        car_catalog,
        user_directory,
        notification_service,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
