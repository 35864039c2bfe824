#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use focus_overlay::{app, logging, OverlayConfig, Variant};
use tracing::error;

fn main() -> anyhow::Result<()> {
    logging::init(cfg!(debug_assertions));

    let variant = Variant::from_env().map_err(|e| {
        error!("{}", e);
        e
    })?;
    let config = OverlayConfig::for_variant(variant);

    if let Err(e) = app::run(config) {
        error!("Overlay failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
