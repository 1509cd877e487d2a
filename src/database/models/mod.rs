pub mod movie;
pub mod user;

pub use movie::{Director, Genre, Movie, MovieRow};
pub use user::{NewUser, User};
