//! Powerpath — assisted session bounded context.
//!
//! The free-text session variant: exchanges are proxied to a remote
//! conversational model through the collaborator port, structured
//! replies are decoded with graceful degradation, and safety-critical
//! turns are flagged before they reach the renderer.

pub mod briefing;
pub mod http;
pub mod reply;
pub mod session;
