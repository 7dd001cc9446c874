//! Backend API client and wire types

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    ExecutionReport, ExecutionRequest, HintRequest, HintResponse, LeaderboardEntry,
    RegistrationRequest, TestResult, TimeFilter,
};
