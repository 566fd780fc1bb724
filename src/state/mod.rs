/// State management module
///
/// This module handles all application state, including:
/// - The photo model and manifest parsing (data.rs)
/// - The full and filtered photo lists (store.rs)
/// - The lightbox state machine (lightbox.rs)
/// - The auto-advancing carousel (carousel.rs)
/// - Gallery geometry used for scroll tracking (layout.rs)
/// - Clock and timers (scheduler.rs)
/// - The session tying them together (session.rs)

pub mod carousel;
pub mod data;
pub mod layout;
pub mod lightbox;
pub mod scheduler;
pub mod session;
pub mod store;
