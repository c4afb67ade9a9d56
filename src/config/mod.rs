/// Main configuration module.
/// 
/// Re-exports submodules for gameplay and server configuration.
pub mod game;
pub mod server;
