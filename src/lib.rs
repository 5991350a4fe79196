pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::rental_service::RentalService;
use infrastructure::feed_hub::{FeedHub, PgBookingFeed};
use infrastructure::rental_store::DieselRentalStore;

pub use db::{create_pool, DbPool};

/// The service type handlers extract from app data; concrete store client
/// injected here, everything below it only sees the `RentalStore` port.
pub type AppService = RentalService<DieselRentalStore>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::bookings::create_booking,
        handlers::bookings::get_booking,
        handlers::bookings::upcoming_bookings,
        handlers::bookings::booking_commission,
        handlers::webhooks::stripe_webhook,
    ),
    components(schemas(
        handlers::products::CreateProductRequest,
        handlers::products::CreateProductResponse,
        handlers::products::ProductResponse,
        handlers::bookings::CreateBookingItemRequest,
        handlers::bookings::CreateBookingRequest,
        handlers::bookings::CreateBookingResponse,
        handlers::bookings::BookingItemResponse,
        handlers::bookings::BookingResponse,
        handlers::bookings::UpcomingBookingsResponse,
        handlers::bookings::CommissionResponse,
    )),
    tags(
        (name = "products", description = "Rental catalog"),
        (name = "bookings", description = "Bookings and commissions"),
        (name = "webhooks", description = "Inbound payment events"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let hub = FeedHub::new();
    let store = DieselRentalStore::new(pool.clone(), hub.clone());
    let service = RentalService::new(store);
    let feed = PgBookingFeed::new(pool, hub);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(feed.clone()))
            .wrap(Logger::default())
            .route("/", web::get().to(handlers::pages::landing))
            .service(
                web::scope("/products")
                    .route("", web::post().to(handlers::products::create_product))
                    .route("", web::get().to(handlers::products::list_products)),
            )
            .service(
                web::scope("/bookings")
                    .route("", web::post().to(handlers::bookings::create_booking))
                    .route("/upcoming", web::get().to(handlers::bookings::upcoming_bookings))
                    .route("/feed", web::get().to(handlers::feed::booking_feed))
                    .route("/{id}", web::get().to(handlers::bookings::get_booking))
                    .route(
                        "/{id}/commission",
                        web::get().to(handlers::bookings::booking_commission),
                    ),
            )
            .service(
                web::scope("/webhooks")
                    .route("/stripe", web::post().to(handlers::webhooks::stripe_webhook)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
