//! Behavioural model of an HD44780 controller fed from a SimBus log

#![allow(dead_code)]

use clepsydra_hal::sim::BusEvent;

pub const RS: u8 = 10;
pub const EN: u8 = 11;
pub const D4: u8 = 12;
pub const ALARM: u8 = 20;

/// Controller state rebuilt from the wire
pub struct LcdModel {
    levels: [bool; 32],
    four_bit: bool,
    pending: Option<u8>,
    pub ddram: [u8; 128],
    pub address: u8,
    pub display_on: bool,
    pub two_line: bool,
    /// Every (rs, byte) transaction after the switch to 4-bit mode
    pub transactions: Vec<(bool, u8)>,
}

impl LcdModel {
    pub fn new() -> Self {
        Self {
            levels: [false; 32],
            four_bit: false,
            pending: None,
            ddram: [b' '; 128],
            address: 0,
            display_on: false,
            two_line: false,
            transactions: Vec::new(),
        }
    }

    /// Build a model by replaying a whole log
    pub fn from_events(events: &[BusEvent]) -> Self {
        let mut model = Self::new();
        model.feed(events);
        model
    }

    pub fn feed(&mut self, events: &[BusEvent]) {
        for event in events {
            if let BusEvent::Write { pin, high } = *event {
                let falling = pin == EN && self.levels[pin as usize] && !high;
                self.levels[pin as usize] = high;
                if falling {
                    self.latch();
                }
            }
        }
    }

    /// The 16 visible cells: two internal rows of eight
    pub fn text(&self) -> String {
        let cells: Vec<u8> = self.ddram[0x00..0x08]
            .iter()
            .chain(&self.ddram[0x40..0x48])
            .copied()
            .collect();
        String::from_utf8(cells).unwrap()
    }

    fn latch(&mut self) {
        let nibble = (0..4).fold(0u8, |acc, bit| {
            acc | ((self.levels[(D4 + bit) as usize] as u8) << bit)
        });
        let rs = self.levels[RS as usize];

        if !self.four_bit {
            // 8-bit mode: only the upper data lines are wired
            self.execute(rs, nibble << 4);
            return;
        }

        match self.pending.take() {
            None => self.pending = Some(nibble),
            Some(high) => {
                let byte = (high << 4) | nibble;
                self.transactions.push((rs, byte));
                self.execute(rs, byte);
            }
        }
    }

    fn execute(&mut self, rs: bool, byte: u8) {
        if rs {
            self.ddram[(self.address & 0x7F) as usize] = byte;
            self.address = self.address.wrapping_add(1) & 0x7F;
            return;
        }

        if byte & 0x80 != 0 {
            self.address = byte & 0x7F;
        } else if byte & 0x20 != 0 {
            // Function set: DL bit selects the bus width
            self.four_bit = byte & 0x10 == 0;
            self.two_line = byte & 0x08 != 0;
        } else if byte & 0x08 != 0 {
            self.display_on = byte & 0x04 != 0;
        } else if byte == 0x01 {
            self.ddram = [b' '; 128];
            self.address = 0;
        } else if byte & 0xFE == 0x02 {
            self.address = 0;
        }
    }
}
