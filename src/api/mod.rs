//! CRPT API Module
//!
//! Document types and the rate-limited HTTP client for the CRPT
//! document-creation endpoint.

pub mod client;
pub mod document;
pub mod error;

pub use client::{CrptClient, DocumentResponse, DEFAULT_API_URL};
pub use document::{GoodsIntroductionDocument, Product};
pub use error::ApiError;
