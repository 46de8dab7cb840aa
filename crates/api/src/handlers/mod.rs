pub mod amenity;
pub mod booking;
pub mod dashboard;
pub mod feedback;
pub mod owner_amenity;
pub mod sales;
