//! Repository layer: one zero-sized struct per table, each exposing async
//! functions that take a pool (or a transaction connection) and return
//! `sqlx::Error`.

pub mod amenity_repo;
pub mod booking_repo;
pub mod feedback_repo;
pub mod sale_repo;

pub use amenity_repo::AmenityRepo;
pub use booking_repo::BookingRepo;
pub use feedback_repo::FeedbackRepo;
pub use sale_repo::SaleRepo;
