//! Dispatch task
//!
//! Plays the role of the device's single interrupt handler: every 40ms
//! time base tick, and every button press in between, runs one
//! [`InputDispatcher::service`] against the time keeper.
//!
//! Debounce and settle delays block the executor, as they would block an
//! interrupt handler. Ticks that fall due meanwhile are delivered back to
//! back by the ticker.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Delay, Duration, Ticker};

use clepsydra_core::input::{Dispatch, InputDispatcher, TICKS_PER_SECOND};
use clepsydra_core::state::{Mode, TimeKeeper};
use clepsydra_drivers::alarm::GpioAlarm;
use clepsydra_drivers::lcd::Hd44780;
use clepsydra_hal_rp2040::{LatchedButton, RpOutput};

use crate::channels::BUTTON_EDGE;

/// Time base period
pub const TICK_INTERVAL_US: u64 = 1_000_000 / TICKS_PER_SECOND as u64;

pub type Display = Hd44780<RpOutput, Delay>;
pub type Keeper = TimeKeeper<Display, GpioAlarm<RpOutput>>;
pub type Dispatcher = InputDispatcher<LatchedButton, Delay>;

#[embassy_executor::task]
pub async fn dispatch_task(mut dispatcher: Dispatcher, mut keeper: Keeper) {
    info!("Dispatch task started");

    let mut ticker = Ticker::every(Duration::from_micros(TICK_INTERVAL_US));

    loop {
        let timer_elapsed = match select(ticker.next(), BUTTON_EDGE.wait()).await {
            Either::First(()) => true,
            Either::Second(()) => false,
        };

        let before = keeper.mode();
        let report = dispatcher.service(timer_elapsed, &mut keeper);
        log_dispatch(before, &keeper, &report);
    }
}

fn log_dispatch(before: Mode, keeper: &Keeper, report: &Dispatch) {
    if let Some(event) = report.serviced {
        debug!("Serviced {}", event);
    }

    if !report.deferred.is_empty() {
        warn!("Deferred {}", report.deferred.as_slice());
    }

    if report.second_elapsed {
        trace!("Tick: {}s shown", keeper.state().display_seconds());
    }

    let after = keeper.mode();
    if after != before {
        info!("Mode {} -> {}", before, after);
    }
}
