//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wordvault_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use wordvault_core::db::migrations::latest_version;

fn main() {
    println!("wordvault_core version={}", wordvault_core::core_version());
    match wordvault_core::open_store_in_memory() {
        Ok(_) => println!("wordvault_core store=ok schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("wordvault_core store=error error={err}");
            std::process::exit(1);
        }
    }
}
