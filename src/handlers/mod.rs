// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (cookie token + ownership check)
pub mod public;    // Service descriptor and health (/, /health)
pub mod protected; // Authenticated document operations (/api/*)
