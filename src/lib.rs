// ============================================================================
// CIVIC PORTALS - admin dashboard and citizen reporting portal (Yew + WASM)
// ============================================================================
// Layers, bottom to top:
// - Models / Stores: wire types, session token and toast storage
// - Services: HTTP transport, API clients, query cache
// - State: pure UI state machines (guards, drawers, pickers, editors)
// - Hooks / Components / Views: Yew rendering
// - App: one root component per portal, mounted by the binaries in src/bin
// ============================================================================

pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod hooks;
pub mod maps;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod views;

#[cfg(test)]
mod testing;
