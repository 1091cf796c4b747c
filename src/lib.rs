//! # PressWatch: Button Press Monitor
//!
//! A non-preemptive, bare-metal task scheduler and three cooperating
//! periodic tasks that debounce a push button, time each press, drive LED
//! feedback and report press statistics over a serial console.
//!
//! ## Overview
//!
//! | Task | Period | Responsibility |
//! |------|--------|----------------|
//! | 1 · [`button`] | 10 ms | Debounce, press timing, green/red indicator |
//! | 2 · [`stats`] | 50 ms | Counters, yellow blink sequence |
//! | 3 · [`report`] | 10 s | Console report, window reset |
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │       Application Tasks (button.rs · stats.rs ·        │
//! │                report.rs)                              │
//! ├────────────────────────────────────────────────────────┤
//! │          Kernel wiring (kernel.rs)                     │
//! │     Shared · task_table() · init() · run()             │
//! ├──────────────┬────────────────────┬───────────────────┤
//! │  Scheduler   │   Task model       │  Handoff          │
//! │  scheduler.rs│   task.rs          │  sync.rs          │
//! │  ─ select()  │   ─ Task trait     │  ─ Mailbox        │
//! │  ─ tick()    │   ─ TaskDescriptor │                   │
//! ├──────────────┴────────────────────┴───────────────────┤
//! │   Time (time.rs) · embedded-hal digital pins           │
//! ├────────────────────────────────────────────────────────┤
//! │   Arch Port (arch/cortex_m4.rs): SysTick ms clock      │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data flow
//!
//! ```text
//!  Task 1 ──publish──► Mailbox<PressEvent> ──take──► Task 2
//!                                                     │ record
//!                                                     ▼
//!                      console ◄──write── Task 3 ◄── Counters (take + reset)
//! ```
//!
//! ## Execution Model
//!
//! - **One task per tick**: the most overdue due task runs to completion
//! - **No preemption, no locks**: shared state is lent by `&mut` to the
//!   running task only
//! - **Absolute deadlines**: polled against a millisecond clock, so
//!   periods do not drift
//! - **No heap**: everything is statically sized
//!
//! ## Crate features
//!
//! - `defmt`: structured logging through `defmt`
//! - `firmware`: the Cortex-M4 port and the STM32F411 binary (implies
//!   `defmt`)

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod time;
pub mod task;
pub mod scheduler;
pub mod sync;
pub mod button;
pub mod stats;
pub mod report;
pub mod kernel;
pub mod sim;
#[cfg(feature = "firmware")]
pub mod arch;

pub use error::Error;
pub use time::{Clock, Millis};
