pub mod feed_hub;
pub mod models;
pub mod rental_store;
