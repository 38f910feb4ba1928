pub mod agency;
pub mod auth;
pub mod booking;
pub mod trivia;
