pub mod bookings;
pub mod drivers;
pub mod places;
pub mod quotes;
pub mod riders;
