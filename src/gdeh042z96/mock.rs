//! Recording embedded-hal mocks for the driver tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{
    ErrorKind as PinErrorKind, ErrorType as PinErrorType, InputPin, OutputPin,
};
use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType, Operation, SpiDevice};

use crate::gdeh042z96::driver::Gdeh042z96;
use crate::gdeh042z96::interface::DisplayInterface;

/// One observable action on the panel's bus or control lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Command(u8),
    Data(u8),
    Reset(bool),
    BusyPoll(bool),
    DelayMs(u32),
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    dc_high: bool,
    transactions: Vec<usize>,
    busy_script: VecDeque<bool>,
    spi_fails: bool,
    dc_fails: bool,
    rst_fails: bool,
    busy_fails: bool,
}

pub(crate) type MockInterface = DisplayInterface<MockSpi, MockBusy, MockDc, MockRst, MockDelay>;
pub(crate) type MockDriver = Gdeh042z96<MockSpi, MockBusy, MockDc, MockRst, MockDelay>;

/// Shared log behind every mock handed to the driver
#[derive(Clone, Default)]
pub(crate) struct Bus(Rc<RefCell<State>>);

impl Bus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn interface(&self) -> MockInterface {
        DisplayInterface::new(
            MockSpi(self.clone()),
            MockBusy(self.clone()),
            MockDc(self.clone()),
            MockRst(self.clone()),
            MockDelay(self.clone()),
        )
    }

    pub(crate) fn driver(&self) -> MockDriver {
        Gdeh042z96::new(
            MockSpi(self.clone()),
            MockBusy(self.clone()),
            MockDc(self.clone()),
            MockRst(self.clone()),
            MockDelay(self.clone()),
        )
    }

    /// Levels returned by successive BUSY reads; LOW once the script runs out
    pub(crate) fn script_busy(&self, levels: &[bool]) {
        self.0.borrow_mut().busy_script.extend(levels.iter().copied());
    }

    pub(crate) fn fail_spi(&self) {
        self.0.borrow_mut().spi_fails = true;
    }

    pub(crate) fn fail_dc(&self) {
        self.0.borrow_mut().dc_fails = true;
    }

    pub(crate) fn fail_rst(&self) {
        self.0.borrow_mut().rst_fails = true;
    }

    pub(crate) fn fail_busy(&self) {
        self.0.borrow_mut().busy_fails = true;
    }

    pub(crate) fn forget(&self) {
        let mut state = self.0.borrow_mut();
        state.events.clear();
        state.transactions.clear();
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Bytes written per SPI transaction, i.e. per chip-select assertion
    pub(crate) fn transaction_sizes(&self) -> Vec<usize> {
        self.0.borrow().transactions.clone()
    }

    pub(crate) fn commands(&self) -> Vec<u8> {
        self.0
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Data bytes following the first `command` up to the next command
    pub(crate) fn data_after(&self, command: u8) -> Vec<u8> {
        self.0
            .borrow()
            .events
            .iter()
            .skip_while(|e| **e != Event::Command(command))
            .skip(1)
            .take_while(|e| !matches!(e, Event::Command(_)))
            .filter_map(|e| match e {
                Event::Data(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Only the bytes that went over SPI, commands and data alike
    pub(crate) fn wire(&self) -> Vec<Event> {
        self.0
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .cloned()
            .collect()
    }

    pub(crate) fn busy_polls(&self) -> usize {
        self.0
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, Event::BusyPoll(_)))
            .count()
    }
}

pub(crate) struct MockSpi(Bus);

impl SpiErrorType for MockSpi {
    type Error = ErrorKind;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut state = self.0 .0.borrow_mut();
        if state.spi_fails {
            return Err(ErrorKind::Other);
        }
        let mut written = 0;
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                for &b in bytes.iter() {
                    let event = if state.dc_high {
                        Event::Data(b)
                    } else {
                        Event::Command(b)
                    };
                    state.events.push(event);
                }
                written += bytes.len();
            }
        }
        state.transactions.push(written);
        Ok(())
    }
}

pub(crate) struct MockDc(Bus);

impl MockDc {
    fn drive(&mut self, high: bool) -> Result<(), PinErrorKind> {
        let mut state = self.0 .0.borrow_mut();
        if state.dc_fails {
            return Err(PinErrorKind::Other);
        }
        state.dc_high = high;
        Ok(())
    }
}

impl PinErrorType for MockDc {
    type Error = PinErrorKind;
}

impl OutputPin for MockDc {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

pub(crate) struct MockRst(Bus);

impl MockRst {
    fn drive(&mut self, high: bool) -> Result<(), PinErrorKind> {
        let mut state = self.0 .0.borrow_mut();
        if state.rst_fails {
            return Err(PinErrorKind::Other);
        }
        state.events.push(Event::Reset(high));
        Ok(())
    }
}

impl PinErrorType for MockRst {
    type Error = PinErrorKind;
}

impl OutputPin for MockRst {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

pub(crate) struct MockBusy(Bus);

impl PinErrorType for MockBusy {
    type Error = PinErrorKind;
}

impl InputPin for MockBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.0 .0.borrow_mut();
        if state.busy_fails {
            return Err(PinErrorKind::Other);
        }
        let level = state.busy_script.pop_front().unwrap_or(false);
        state.events.push(Event::BusyPoll(level));
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub(crate) struct MockDelay(Bus);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0 .0.borrow_mut().events.push(Event::DelayMs(ms));
    }
}
