pub mod feed;
pub mod rental_service;
