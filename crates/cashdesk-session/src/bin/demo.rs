//! # Register Demo
//!
//! Plays a short scripted session against a configured register.
//!
//! ## Usage
//! ```bash
//! # Defaults (10% discount, notices on stdout)
//! cargo run -p cashdesk-session --bin demo
//!
//! # Load settings from a file; CASHDESK_* variables still override it
//! cargo run -p cashdesk-session --bin demo -- --config ./cashdesk.toml
//! ```

use std::env;

use cashdesk_session::{init_tracing, DiscountSetting, RegisterConfig};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config = RegisterConfig {
        initial_discount: DiscountSetting::Percent(10),
        ..RegisterConfig::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config = RegisterConfig::load(&args[i + 1])?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cashdesk register demo");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  TOML config file");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }
    config.apply_env_overrides();

    init_tracing(&config.log_filter)?;
    info!(?config, "Starting register demo");

    let register = config.build_state();

    register.add_item_text("eggs", "0.98", "")?;
    register.add_item_text("tomato", "1.76", "3")?;
    register.add_item_text("Lucky Charms", "4.5", "")?;
    register.apply_discount();

    register.void_last_transaction();
    register.void_last_transaction();

    println!("{}", serde_json::to_string_pretty(&register.summary())?);
    register.with_ledger(|ledger| {
        for record in ledger.previous_transactions() {
            println!(
                "  {} × {} @ {} = {}",
                record.quantity, record.item, record.price, record.subtotal
            );
        }
    });

    Ok(())
}
