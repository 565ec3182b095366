mod booking;
mod driver;
mod location;
mod place;
mod ride;
mod rider;

pub use booking::{Booking, BookingRequest};
pub use driver::{Driver, DriverRegistration};
pub use location::Coordinates;
pub use place::Place;
pub use ride::{new_ride_id, ride_id_timestamp, Ride};
pub use rider::{Rider, RiderRegistration};
