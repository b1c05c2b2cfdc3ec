//! Button watcher task
//!
//! One instance per button. Waits for pin edges and records the logical
//! level into the button's latch; presses wake the dispatch task.

use defmt::*;
use embassy_rp::gpio::Input;

use clepsydra_core::config::PinConfig;
use clepsydra_core::state::Button;
use clepsydra_hal_rp2040::ButtonLatch;

use crate::channels::BUTTON_EDGE;

#[embassy_executor::task(pool_size = 3)]
pub async fn button_task(
    button: Button,
    mut input: Input<'static>,
    cfg: PinConfig,
    latch: &'static ButtonLatch,
) {
    info!("Button watcher started: {} on gpio{}", button, cfg.pin);

    // A button held at boot is not a press
    latch.record(cfg.logical(input.is_high()));
    latch.clear_edge();

    loop {
        input.wait_for_any_edge().await;

        if latch.record(cfg.logical(input.is_high())) {
            trace!("{} pressed", button);
            BUTTON_EDGE.signal(());
        }
    }
}
