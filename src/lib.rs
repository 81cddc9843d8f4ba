//! Trade Compass - AI-Assisted Export Market Research Backend
//!
//! This crate turns free-form AI research replies into typed results for
//! exporters: market analyses, freight estimates, trade scores, buyer and
//! creator lists, plus a persistent report cart for pinned findings.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
