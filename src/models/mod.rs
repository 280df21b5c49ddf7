pub mod hall;
pub mod seat;
pub mod showtime;
pub mod ticket;

pub use hall::Hall;
pub use seat::{Seat, SeatLabel};
pub use showtime::Showtime;
pub use ticket::Ticket;
