use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// The card's single UI thread.
///
/// The loop owns the input driver and is the only caller of `poll` and
/// `read`. Each iteration first calls the handler with `None` (an idle tick,
/// where timers fire and the frame is drawn) and then drains every event
/// already queued, so a fast stream of mouse motion never lets drawing fall
/// behind the pointer.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs until the handler returns `ControlFlow::Quit`.
    ///
    /// The handler is called with:
    /// - `None` once per iteration, before waiting for input.
    /// - `Some(event)` for every input event.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Replays a fixed list of events, then reports an idle terminal.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
    mouse_capture: Option<bool>,
}

impl ScriptedDriver {
    pub fn new<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Self {
            events: events.into_iter().collect(),
            mouse_capture: None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    pub fn mouse_capture(&self) -> Option<bool> {
        self.mouse_capture
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = Some(enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drains_queued_events_between_ticks() {
        let driver = ScriptedDriver::new([key('a'), key('b'), key('c')]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        let mut seen = Vec::new();
        let mut ticks = 0;
        event_loop
            .run(|_, event| {
                match event {
                    Some(Event::Key(k)) => seen.push(k.code),
                    Some(_) => {}
                    None => {
                        ticks += 1;
                        if ticks == 2 {
                            return Ok(ControlFlow::Quit);
                        }
                    }
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('c')]
        );
        assert_eq!(ticks, 2);
    }

    #[test]
    fn quit_from_event_stops_immediately() {
        let driver = ScriptedDriver::new([key('q'), key('x')]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        event_loop
            .run(|_, event| {
                Ok(if event.is_some() {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(event_loop.driver().remaining(), 1);
    }
}
