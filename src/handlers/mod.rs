// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer JWT verified by middleware)
pub mod protected; // Movies and user account management
pub mod public; // Welcome, login, registration
