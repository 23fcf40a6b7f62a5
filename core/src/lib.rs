//! Core library for courier: HTTP execution over a string-only boundary.
//!
//! # Overview
//! A caller that can only exchange strings (a serialized message channel,
//! a C ABI, a JSON envelope) hands over a method, a URL, header pairs and
//! an optional base64 body; `Courier::execute` performs the single HTTP
//! round trip and hands back status, base64 body and header pairs.
//!
//! # Design
//! - The codec and the executor are separate leaf modules; the codec is
//!   pure and synchronous, the executor owns the one asynchronous step.
//! - `HttpRequest` / `HttpResponse` are owned plain-data values, so they
//!   serialize across any channel without lifetime concerns.
//! - No retries, no caching, no timeout: one call, one round trip, with
//!   failures propagated to the caller untouched.

pub mod client;
pub mod codec;
pub mod error;
pub mod http;

pub use client::Courier;
pub use error::CourierError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
