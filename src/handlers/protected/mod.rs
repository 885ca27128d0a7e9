// handlers/protected/mod.rs - Protected handlers (authentication required)
//
// Security Level: `auth_token` cookie verified by the injected TokenVerifier,
// followed by an ownership-scoped lookup of the target document.
// Route Prefix: /api/*
//
// Authentication runs inside the handler rather than as a router layer: a
// request without a document id must be answered with 400 before any
// credential is examined.

pub mod documents;
