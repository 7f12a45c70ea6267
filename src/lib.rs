//! Study Gateway: an HTTP service that turns uploaded study materials into
//! quizzes, summaries, study plans, and coaching replies by prompting a
//! generative model and validating the JSON it returns.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod gateway_util;
pub mod model;
pub mod observability;
pub mod output;
pub mod pdf;
pub mod prompts;
pub mod providers;
pub mod routes;
