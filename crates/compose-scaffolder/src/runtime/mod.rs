//! Container runtime detection
//!
//! This module provides:
//! - Docker engine detection
//! - Compose command detection (`docker compose` plugin or legacy `docker-compose`)

pub mod check;

pub use check::{
    check_compose, check_container_runtime, check_docker, compose_command, RuntimeInfo,
};
