//! Background services
//!
//! - **Warm-up**: prefetch every post and provider detail at startup

pub mod warmup;

pub use warmup::{spawn_warmup_task, warm_cache, WarmupReport, WARMUP_CONCURRENCY};
