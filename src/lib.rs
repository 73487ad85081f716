//! News Curation Client
//!
//! This library provides a typed async client for the news-curation backend.
//! It triggers long-running server jobs (content scraping, summary
//! generation), polls their completion flags with a bounded cancellable
//! poller, and covers the comment and category surface of the API.

pub mod config;
pub mod controller;
pub mod models;
pub mod services;
pub mod view;
