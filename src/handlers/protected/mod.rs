// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`; a request that reaches
// a handler has already presented a valid bearer token.

pub mod movies;
pub mod users;
