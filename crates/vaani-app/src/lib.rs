pub mod app;
pub mod components;
pub mod net;
pub mod orchestrator;
pub mod speech;
pub mod state;
