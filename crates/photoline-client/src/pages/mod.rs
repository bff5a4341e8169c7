//! Page components.

mod day;
mod home;
mod not_found;

pub use day::DayPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
