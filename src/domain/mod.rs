// Domain layer - Plain data types with no I/O
pub mod chart;
pub mod dashboard;
pub mod traffic;
