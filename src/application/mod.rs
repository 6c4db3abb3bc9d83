// Application layer - Generators, chart builders and the dashboard server
pub mod chart_builders;
pub mod dashboard_service;
pub mod error;
pub mod generators;
pub mod random_source;
pub mod scheduler;
