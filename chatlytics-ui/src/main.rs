//! Chatlytics Dashboard
//!
//! Conversation analytics dashboard built with Leptos (WASM).
//!
//! # Pages
//!
//! - Login and signup
//! - Dashboard with aggregate stats and recent conversations
//! - Conversation insights for a single conversation
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Session gating, form handling and data loading live in the
//! `chatlytics` crate; this crate provides the browser storage, router
//! navigation and gloo-net HTTP client they run on.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
