//! Signaling and lobby relay for doctor/patient video consultations.
//!
//! Doctors join a room, patients check in to that room's lobby, and the server
//! forwards WebRTC offers, answers and ICE candidates between them. Media never
//! passes through this process.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
