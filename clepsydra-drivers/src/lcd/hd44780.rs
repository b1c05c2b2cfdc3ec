//! HD44780 character LCD driver (4-bit bus)
//!
//! Driver for 16x1 HD44780-compatible modules wired with RS, E and D4-D7.
//!
//! # Bus protocol
//!
//! Every command or character byte is sent as two nibbles, high nibble
//! first. For each nibble the data lines are set, then E is pulsed:
//!
//! ```text
//!        ┌─────┐
//! E  ────┘ 1µs └──────────── ≥100µs ──▶ next nibble
//!    ▲ 1µs setup
//! ```
//!
//! # Split row
//!
//! A 16x1 module is internally two 8-character rows. Columns 0-7 live at
//! DDRAM 0x00-0x07 and columns 8-15 at 0x40-0x47, so the driver re-addresses
//! the controller when the cursor crosses column 8.

use clepsydra_core::traits::display::DISPLAY_COLS;
use clepsydra_core::traits::CharDisplay;
use clepsydra_hal::{ConfigurablePin, DelayNs, OutputPin, PinDirection};

/// HD44780 commands
#[allow(dead_code)]
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Command flag bits
#[allow(dead_code)]
pub mod flags {
    // Entry mode
    pub const ENTRY_RIGHT: u8 = 0x00;
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;
    pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

    // Display on/off control
    pub const DISPLAY_ON: u8 = 0x04;
    pub const DISPLAY_OFF: u8 = 0x00;
    pub const CURSOR_ON: u8 = 0x02;
    pub const CURSOR_OFF: u8 = 0x00;
    pub const BLINK_ON: u8 = 0x01;
    pub const BLINK_OFF: u8 = 0x00;

    // Function set
    pub const EIGHT_BIT_MODE: u8 = 0x10;
    pub const FOUR_BIT_MODE: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const ONE_LINE: u8 = 0x00;
    pub const FONT_5X10: u8 = 0x04;
    pub const FONT_5X8: u8 = 0x00;
}

/// 4-bit bus, both internal rows, 5x8 font
pub const FUNCTION_CONFIG: u8 = flags::FOUR_BIT_MODE | flags::TWO_LINE | flags::FONT_5X8;

/// Display on, no cursor, no blink
pub const DISPLAY_CONFIG: u8 = flags::DISPLAY_ON | flags::CURSOR_OFF | flags::BLINK_OFF;

/// Left to right, no display shift
pub const ENTRY_CONFIG: u8 = flags::ENTRY_LEFT | flags::ENTRY_SHIFT_DECREMENT;

/// DDRAM address of the second internal row
pub const ROW_OFFSET: u8 = 0x40;

/// Logical column where the second internal row starts
pub const COL_CUTOFF: u8 = 8;

/// Power-on settle time (datasheet minimum 40ms)
pub const POWER_ON_DELAY_MS: u32 = 50;

/// Waits after the three wake-up nibbles (minimums 4.1ms, 100µs, 100µs)
pub const WAKE_DELAYS_US: [u32; 3] = [5_000, 5_000, 150];

/// Data-to-enable setup time
pub const ENABLE_SETUP_US: u32 = 1;

/// Enable high time
pub const ENABLE_HIGH_US: u32 = 1;

/// Command execution time after each nibble
pub const SETTLE_US: u32 = 100;

/// Execution time of clear and home (datasheet 1.52ms)
pub const CLEAR_DELAY_MS: u32 = 2;

/// Map a logical column to its DDRAM address
///
/// Columns past the last one are clamped to it.
pub fn ddram_address(col: u8) -> u8 {
    let col = col.min(DISPLAY_COLS - 1);
    if col >= COL_CUTOFF {
        col + (ROW_OFFSET - COL_CUTOFF)
    } else {
        col
    }
}

/// The six bus lines
pub struct Hd44780Pins<P> {
    pub rs: P,
    pub enable: P,
    pub d4: P,
    pub d5: P,
    pub d6: P,
    pub d7: P,
}

/// HD44780 driver over a 4-bit bus
pub struct Hd44780<P, D> {
    pins: Hd44780Pins<P>,
    delay: D,
    /// Logical column of the next character
    cursor: u8,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin + ConfigurablePin,
    D: DelayNs,
{
    /// Create a driver; the bus is untouched until [`initialize`](Self::initialize)
    pub fn new(pins: Hd44780Pins<P>, delay: D) -> Self {
        Self {
            pins,
            delay,
            cursor: 0,
        }
    }

    /// Bring the controller up in 4-bit mode
    ///
    /// Uses the wake-up handshake that works whatever mode the controller
    /// was left in, then configures it and clears the screen.
    pub fn initialize(&mut self) {
        for pin in self.bus_mut() {
            pin.set_direction(PinDirection::Output);
        }

        self.delay.delay_ms(POWER_ON_DELAY_MS);

        self.pins.rs.set_low();
        self.pins.enable.set_low();

        // Three "8-bit mode" wake-ups, then switch to 4-bit
        for wait_us in WAKE_DELAYS_US {
            self.write_nibble(0x03);
            self.delay.delay_us(wait_us);
        }
        self.write_nibble(0x02);

        self.command(cmd::FUNCTION_SET | FUNCTION_CONFIG);
        self.command(cmd::DISPLAY_CONTROL | DISPLAY_CONFIG);
        self.clear();
        self.command(cmd::ENTRY_MODE_SET | ENTRY_CONFIG);
    }

    /// Release the bus lines and delay
    pub fn release(self) -> (Hd44780Pins<P>, D) {
        (self.pins, self.delay)
    }

    fn bus_mut(&mut self) -> [&mut P; 6] {
        let p = &mut self.pins;
        [
            &mut p.rs,
            &mut p.enable,
            &mut p.d4,
            &mut p.d5,
            &mut p.d6,
            &mut p.d7,
        ]
    }

    fn command(&mut self, byte: u8) {
        self.write_byte(byte, false);
    }

    fn write_byte(&mut self, byte: u8, is_data: bool) {
        self.pins.rs.set_state(is_data);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn write_nibble(&mut self, nibble: u8) {
        self.pins.d4.set_state(nibble & 0b0001 != 0);
        self.pins.d5.set_state(nibble & 0b0010 != 0);
        self.pins.d6.set_state(nibble & 0b0100 != 0);
        self.pins.d7.set_state(nibble & 0b1000 != 0);

        self.pulse_enable();
    }

    fn pulse_enable(&mut self) {
        self.pins.enable.set_low();
        self.delay.delay_us(ENABLE_SETUP_US);
        self.pins.enable.set_high();
        self.delay.delay_us(ENABLE_HIGH_US);
        self.pins.enable.set_low();
        self.delay.delay_us(SETTLE_US);
    }
}

impl<P, D> CharDisplay for Hd44780<P, D>
where
    P: OutputPin + ConfigurablePin,
    D: DelayNs,
{
    fn set_cursor(&mut self, col: u8) {
        let col = col.min(DISPLAY_COLS - 1);
        self.cursor = col;
        self.command(cmd::SET_DDRAM_ADDR | ddram_address(col));
    }

    fn clear(&mut self) {
        self.command(cmd::CLEAR_DISPLAY);
        self.delay.delay_ms(CLEAR_DELAY_MS);
        self.cursor = 0;
    }

    fn home(&mut self) {
        self.command(cmd::RETURN_HOME);
        self.delay.delay_ms(CLEAR_DELAY_MS);
        self.cursor = 0;
    }

    fn write_char(&mut self, ch: u8) {
        // Jump to the second internal row
        if self.cursor == COL_CUTOFF {
            self.set_cursor(COL_CUTOFF);
        }

        self.write_byte(ch, true);
        self.cursor = self.cursor.saturating_add(1);
    }

    fn cursor(&self) -> u8 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clepsydra_hal::sim::{BusEvent, SimBus, SimDelay, SimPin};
    use proptest::prelude::*;

    const RS: u8 = 10;
    const EN: u8 = 11;
    const D4: u8 = 12;

    /// Nibble as seen by the controller on the falling edge of E
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nibble {
        rs: bool,
        value: u8,
    }

    fn lcd(bus: &SimBus) -> Hd44780<SimPin, SimDelay> {
        let pins = Hd44780Pins {
            rs: bus.pin(RS),
            enable: bus.pin(EN),
            d4: bus.pin(D4),
            d5: bus.pin(D4 + 1),
            d6: bus.pin(D4 + 2),
            d7: bus.pin(D4 + 3),
        };
        Hd44780::new(pins, bus.delay())
    }

    /// Replay the bus log and latch a nibble on each falling edge of E
    fn nibbles(events: &[BusEvent]) -> Vec<Nibble> {
        let mut levels = [false; 32];
        let mut out = Vec::new();

        for event in events {
            if let BusEvent::Write { pin, high } = *event {
                let was_high = levels[pin as usize];
                levels[pin as usize] = high;

                if pin == EN && was_high && !high {
                    let value = (0..4).fold(0u8, |acc, bit| {
                        acc | ((levels[(D4 + bit) as usize] as u8) << bit)
                    });
                    out.push(Nibble {
                        rs: levels[RS as usize],
                        value,
                    });
                }
            }
        }

        out
    }

    /// Pair nibbles into (rs, byte) transactions
    fn bytes(nibbles: &[Nibble]) -> Vec<(bool, u8)> {
        nibbles
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0].rs, pair[1].rs, "RS changed mid-byte");
                (pair[0].rs, (pair[0].value << 4) | pair[1].value)
            })
            .collect()
    }

    fn delay_ns(event: &BusEvent) -> Option<u32> {
        match event {
            BusEvent::Delay { ns } => Some(*ns),
            _ => None,
        }
    }

    #[test]
    fn test_address_mapping() {
        assert_eq!(ddram_address(0), 0x00);
        assert_eq!(ddram_address(7), 0x07);
        assert_eq!(ddram_address(8), 0x40);
        assert_eq!(ddram_address(15), 0x47);
        assert_eq!(ddram_address(16), 0x47);
        assert_eq!(ddram_address(255), 0x47);
    }

    #[test]
    fn test_initialize_sequence() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();

        for pin in RS..=D4 + 3 {
            assert_eq!(bus.direction(pin), PinDirection::Output);
        }

        let events = bus.events();

        // Power-on wait happens before anything is driven
        let first_write = events
            .iter()
            .position(|e| matches!(e, BusEvent::Write { .. }))
            .unwrap();
        let waited: u32 = events[..first_write].iter().filter_map(delay_ns).sum();
        assert!(waited >= 40_000_000);

        let nibbles = nibbles(&events);
        let wake: Vec<u8> = nibbles[..4].iter().map(|n| n.value).collect();
        assert_eq!(wake, [0x3, 0x3, 0x3, 0x2]);
        assert!(nibbles[..4].iter().all(|n| !n.rs));

        assert_eq!(
            bytes(&nibbles[4..]),
            [
                (false, 0x28), // function set: 4-bit, 2 rows, 5x8
                (false, 0x0C), // display on, cursor off, blink off
                (false, 0x01), // clear
                (false, 0x06), // entry mode: left to right
            ]
        );
        assert_eq!(lcd.cursor(), 0);
    }

    #[test]
    fn test_wake_up_waits() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();
        let events = bus.events();

        // Time between consecutive wake-up nibble latches
        let mut latch_times = Vec::new();
        let mut elapsed: u64 = 0;
        let mut en_high = false;
        for event in &events {
            match *event {
                BusEvent::Delay { ns } => elapsed += ns as u64,
                BusEvent::Write { pin: EN, high } => {
                    if en_high && !high {
                        latch_times.push(elapsed);
                    }
                    en_high = high;
                }
                _ => {}
            }
        }

        let gaps: Vec<u64> = latch_times[..4].windows(2).map(|w| w[1] - w[0]).collect();
        assert!(gaps[0] >= 4_100_000);
        assert!(gaps[1] >= 100_000);
        assert!(gaps[2] >= 100_000);
    }

    #[test]
    fn test_enable_pulse_timing() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();
        bus.clear_log();

        lcd.write_char(b'A');
        let events = bus.events();

        let rising: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, BusEvent::Write { pin: EN, high: true }))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(rising.len(), 2);

        for i in rising {
            assert!(delay_ns(&events[i - 1]).unwrap() >= 1_000, "setup");
            assert!(delay_ns(&events[i + 1]).unwrap() >= 1_000, "hold");
            assert_eq!(events[i + 2], BusEvent::Write { pin: EN, high: false });
            assert!(delay_ns(&events[i + 3]).unwrap() >= 100_000, "cycle");
        }
    }

    #[test]
    fn test_high_nibble_first_with_rs_data() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();
        bus.clear_log();

        lcd.write_char(b'7');
        assert_eq!(
            nibbles(&bus.events()),
            [
                Nibble { rs: true, value: 0x3 },
                Nibble { rs: true, value: 0x7 }
            ]
        );
        assert_eq!(lcd.cursor(), 1);
    }

    #[test]
    fn test_set_cursor_addresses() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();

        for (col, addr) in [(7u8, 0x07u8), (8, 0x40), (15, 0x47), (42, 0x47)] {
            bus.clear_log();
            lcd.set_cursor(col);
            assert_eq!(bytes(&nibbles(&bus.events())), [(false, 0x80 | addr)]);
            assert_eq!(lcd.cursor(), col.min(15));
        }
    }

    #[test]
    fn test_row_switch_at_cutoff() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();
        lcd.set_cursor(6);
        bus.clear_log();

        lcd.add_text("abc");
        assert_eq!(
            bytes(&nibbles(&bus.events())),
            [
                (true, b'a'),
                (true, b'b'),
                (false, 0x80 | 0x40), // re-address to the second internal row
                (true, b'c'),
            ]
        );
        assert_eq!(lcd.cursor(), 9);
    }

    #[test]
    fn test_clear_and_home_wait_and_reset_cursor() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();

        for (op, code) in [(0, cmd::CLEAR_DISPLAY), (1, cmd::RETURN_HOME)] {
            lcd.set_cursor(5);
            bus.clear_log();

            if op == 0 {
                lcd.clear();
            } else {
                lcd.home();
            }

            let events = bus.events();
            assert_eq!(bytes(&nibbles(&events)), [(false, code)]);
            assert_eq!(events.last(), Some(&BusEvent::Delay { ns: 2_000_000 }));
            assert_eq!(lcd.cursor(), 0);
        }
    }

    #[test]
    fn test_set_text_clears_first() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();
        lcd.set_cursor(3);
        bus.clear_log();

        lcd.set_text("Hi");
        assert_eq!(
            bytes(&nibbles(&bus.events())),
            [(false, cmd::CLEAR_DISPLAY), (true, b'H'), (true, b'i')]
        );
        assert_eq!(lcd.cursor(), 2);
    }

    #[test]
    fn test_full_row_text() {
        let bus = SimBus::new();
        let mut lcd = lcd(&bus);
        lcd.initialize();
        bus.clear_log();

        lcd.set_text("0123456789ABCDEF");
        let data: Vec<u8> = bytes(&nibbles(&bus.events()))
            .into_iter()
            .filter(|(rs, _)| *rs)
            .map(|(_, b)| b)
            .collect();
        assert_eq!(data, b"0123456789ABCDEF");
        assert_eq!(lcd.cursor(), 16);
    }

    proptest! {
        #[test]
        fn prop_address_in_controller_range(col: u8) {
            let addr = ddram_address(col);
            prop_assert!(addr <= 0x07 || (0x40..=0x47).contains(&addr));
            if col < COL_CUTOFF {
                prop_assert_eq!(addr, col);
            } else {
                prop_assert_eq!(addr, col.min(15) - COL_CUTOFF + ROW_OFFSET);
            }
        }
    }
}
