//! Heartbeat Core
//!
//! Core types for the dbt Cloud job run monitor.
//!
//! This crate contains:
//! - Domain types: job runs, job metadata and their classification
//! - DTOs: the response envelope the dbt Cloud API wraps every payload in

pub mod domain;
pub mod dto;
