//! Interaction core for the infinite-canvas editing surface.
//!
//! This crate owns everything about the canvas view that can be decided
//! without a browser or a network: translating raw input events into element
//! mutations, maintaining the pan/zoom viewport, hit-testing elements, and
//! deriving the scene to draw. The host forwards input events to the
//! [`controller::Controller`] and carries out the [`controller::Action`]s it
//! returns, mirroring the durable ones to the element service.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Interaction state machine and its side-effect actions |
//! | [`doc`] | Element types and the ordered in-memory store |
//! | [`viewport`] | Pan/zoom state and screen/canvas conversions |
//! | [`input`] | Input events, tools, modifiers and interaction state |
//! | [`hit`] | Hit-testing against elements |
//! | [`render`] | Scene derivation for the host renderer |
//! | [`consts`] | Shared numeric constants (zoom limits, default sizes, etc.) |

pub mod consts;
pub mod controller;
pub mod doc;
pub mod hit;
pub mod input;
pub mod render;
pub mod viewport;
