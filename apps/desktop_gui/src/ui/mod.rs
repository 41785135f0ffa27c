//! UI layer: the viewer shell and the egui input adapter.

pub mod app;
pub mod input;

pub use app::PortfolioApp;
