//! Simulated GPIO bus for host-side testing
//!
//! A [`SimBus`] stands in for the pin registers of the microcontroller.
//! Pins and delays handed out by the bus share its state, and every write,
//! direction change and delay is appended to an ordered log so tests can
//! check wire protocols and timing margins deterministically.
//!
//! ```
//! use clepsydra_hal::sim::{BusEvent, SimBus};
//! use clepsydra_hal::{DelayNs, OutputPin};
//!
//! let bus = SimBus::new();
//! let mut led = bus.pin(3);
//! let mut delay = bus.delay();
//!
//! led.set_high();
//! delay.delay_us(5);
//!
//! assert!(bus.level(3));
//! assert_eq!(
//!     bus.events(),
//!     vec![BusEvent::Write { pin: 3, high: true }, BusEvent::Delay { ns: 5_000 }]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::gpio::{ConfigurablePin, EdgeLatchedInput, InputPin, OutputPin, PinDirection};

/// Number of pins on the simulated bus
pub const MAX_PINS: usize = 32;

/// One recorded bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// Output level driven on a pin
    Write { pin: u8, high: bool },
    /// Pin direction changed
    Direction { pin: u8, direction: PinDirection },
    /// Blocking delay
    Delay { ns: u32 },
}

struct BusState {
    levels: [bool; MAX_PINS],
    directions: [PinDirection; MAX_PINS],
    edges: [bool; MAX_PINS],
    log: Vec<BusEvent>,
    elapsed_ns: u64,
}

impl Default for BusState {
    fn default() -> Self {
        Self {
            levels: [false; MAX_PINS],
            directions: [PinDirection::Input; MAX_PINS],
            edges: [false; MAX_PINS],
            log: Vec::new(),
            elapsed_ns: 0,
        }
    }
}

/// Shared simulated GPIO bus
#[derive(Clone, Default)]
pub struct SimBus {
    state: Rc<RefCell<BusState>>,
}

impl SimBus {
    /// Create a bus with every pin low, configured as input
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle to pin `id`
    ///
    /// Several handles to the same pin may coexist; they all see the same level.
    pub fn pin(&self, id: u8) -> SimPin {
        assert!((id as usize) < MAX_PINS, "sim pin {} out of range", id);
        SimPin {
            id,
            bus: self.clone(),
        }
    }

    /// Get a delay provider that records into this bus
    pub fn delay(&self) -> SimDelay {
        SimDelay { bus: self.clone() }
    }

    /// Current level of a pin
    pub fn level(&self, id: u8) -> bool {
        self.state.borrow().levels[id as usize]
    }

    /// Current direction of a pin
    pub fn direction(&self, id: u8) -> PinDirection {
        self.state.borrow().directions[id as usize]
    }

    /// Drive an input line high and latch a press edge, as a button would
    pub fn press(&self, id: u8) {
        let mut state = self.state.borrow_mut();
        if !state.levels[id as usize] {
            state.edges[id as usize] = true;
        }
        state.levels[id as usize] = true;
    }

    /// Return an input line to low without latching anything
    pub fn release(&self, id: u8) {
        self.state.borrow_mut().levels[id as usize] = false;
    }

    /// Press and immediately release: the edge stays latched, the level is low
    pub fn tap(&self, id: u8) {
        self.press(id);
        self.release(id);
    }

    /// Check whether an edge is latched on a pin
    pub fn edge_pending(&self, id: u8) -> bool {
        self.state.borrow().edges[id as usize]
    }

    /// Snapshot of the recorded log
    pub fn events(&self) -> Vec<BusEvent> {
        self.state.borrow().log.clone()
    }

    /// Drop all recorded events (levels and latches are kept)
    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    /// Total simulated time spent in delays, in nanoseconds
    pub fn elapsed_ns(&self) -> u64 {
        self.state.borrow().elapsed_ns
    }

    fn record(&self, event: BusEvent) {
        self.state.borrow_mut().log.push(event);
    }
}

/// Pin on a [`SimBus`]
#[derive(Clone)]
pub struct SimPin {
    id: u8,
    bus: SimBus,
}

impl SimPin {
    /// Pin number on the bus
    pub fn id(&self) -> u8 {
        self.id
    }

    fn drive(&mut self, high: bool) {
        self.bus.state.borrow_mut().levels[self.id as usize] = high;
        self.bus.record(BusEvent::Write { pin: self.id, high });
    }
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn toggle(&mut self) {
        let high = self.is_set_high();
        self.drive(!high);
    }

    fn is_set_high(&self) -> bool {
        self.bus.level(self.id)
    }
}

impl InputPin for SimPin {
    fn is_high(&self) -> bool {
        self.bus.level(self.id)
    }
}

impl ConfigurablePin for SimPin {
    fn set_direction(&mut self, direction: PinDirection) {
        self.bus.state.borrow_mut().directions[self.id as usize] = direction;
        self.bus.record(BusEvent::Direction {
            pin: self.id,
            direction,
        });
    }
}

impl EdgeLatchedInput for SimPin {
    fn edge_pending(&self) -> bool {
        self.bus.edge_pending(self.id)
    }

    fn clear_edge(&mut self) {
        self.bus.state.borrow_mut().edges[self.id as usize] = false;
    }
}

/// Delay provider on a [`SimBus`]
///
/// Returns immediately; the requested duration is logged and added to the
/// bus clock.
#[derive(Clone)]
pub struct SimDelay {
    bus: SimBus,
}

// One log entry per call, whatever the unit
impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.state.borrow_mut().elapsed_ns += u64::from(ns);
        self.bus.record(BusEvent::Delay { ns });
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_ns(ms.saturating_mul(1_000_000));
    }
}
