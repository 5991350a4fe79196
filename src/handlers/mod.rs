pub mod bookings;
pub mod feed;
pub mod pages;
pub mod products;
pub mod webhooks;
