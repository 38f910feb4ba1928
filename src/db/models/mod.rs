pub mod agency;
pub mod artist;
pub mod show;
pub mod trivia;
pub mod venue;

pub use agency::{Actor, Movie};
pub use artist::Artist;
pub use show::Show;
pub use trivia::{Category, Question};
pub use venue::Venue;
