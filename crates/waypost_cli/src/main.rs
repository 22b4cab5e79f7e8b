//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `waypost_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("waypost_core ping={}", waypost_core::ping());
    println!("waypost_core version={}", waypost_core::core_version());
}
