mod details;
mod movie;

pub use details::{Cast, Credits, CrewMember, Genre, MovieDetails, MovieDetailsCore, Video};
pub use movie::Movie;
