//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `gateway` owns every call to the generative-AI service. `router`, `admin`
//! and `chat` own the three views and their persisted state, so route
//! handlers stay focused on protocol translation.

pub mod admin;
pub mod chat;
pub mod gateway;
pub mod router;
