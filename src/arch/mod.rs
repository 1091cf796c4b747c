//! # Architecture Abstraction Layer
//!
//! The hardware time base. Only the Cortex-M4 port exists; everything
//! above it sees a [`Clock`](crate::time::Clock).

pub mod cortex_m4;
