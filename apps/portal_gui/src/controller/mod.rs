//! Controller layer: egui input mapping and dispatch into the portal core.

pub mod events;
pub mod orchestration;
