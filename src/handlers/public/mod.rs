// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Route Prefix: No /api prefix (/, /health)

pub mod system;

pub use system::{health, root};
