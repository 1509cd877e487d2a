// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and account creation.

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;

/// GET / - plain-text greeting
pub async fn root() -> &'static str {
    "Welcome to MoviesInfo!"
}
