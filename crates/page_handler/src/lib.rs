//! Page handler: fetching, loading and driving a single page.
//!
//! This crate ties the pipeline together. A [`Page`] fetches a document through a
//! shared [`Session`], parses it, collects stylesheets, runs scripts through a
//! [`js::ScriptRuntime`], reflows, and turns clicks, key presses and scrolling into
//! DOM changes and navigations.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod config;
pub mod network;
pub mod page;
pub mod resources;
pub mod telemetry;

pub use config::PageConfig;
pub use network::{CookieJar, HttpTransport, Method, NetError, Request, Response, Session, Transport};
pub use page::{Page, RenderOutput, form_body};
