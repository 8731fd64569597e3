//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Health check endpoint
//! - `form` - The single-page generation form
//! - `speak` - Text-to-speech generation endpoint
//! - `voices` - Voice catalog endpoint

pub mod api;
pub mod form;
pub mod speak;
pub mod voices;
