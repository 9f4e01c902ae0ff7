use std::io;
use std::time::{Duration, Instant};

use crate::app::CardApp;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `app` until it asks to quit. Idle ticks fire due timers and redraw;
/// input events are routed to the app as they arrive.
pub fn run_card<D, O>(
    driver: D,
    output: &mut O,
    app: &mut CardApp,
    poll_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_, event| {
        let now = Instant::now();
        match event {
            Some(evt) => app.handle_event(&evt, now),
            None => {
                app.tick(now);
                output.draw(|mut frame| app.render(&mut frame, now))?;
            }
        }
        Ok(if app.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CardOptions;
    use crate::config::CardConfig;
    use crate::event_loop::ScriptedDriver;
    use crate::pages::QUESTION_PAGE;
    use crate::ui::UiFrame;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    struct HeadlessOutput {
        terminal: Terminal<TestBackend>,
        frames: usize,
    }

    impl OutputDriver for HeadlessOutput {
        fn enter(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn draw<F>(&mut self, f: F) -> io::Result<()>
        where
            F: FnOnce(UiFrame<'_>),
        {
            self.frames += 1;
            self.terminal
                .draw(move |frame| f(UiFrame::new(frame)))
                .map(|_| ())
                .map_err(|err| io::Error::other(err.to_string()))
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn runs_script_until_quit() {
        let mut output = HeadlessOutput {
            terminal: Terminal::new(TestBackend::new(100, 40)).unwrap(),
            frames: 0,
        };
        let mut app = CardApp::new(
            CardConfig::default(),
            CardOptions {
                seed: Some(3),
                ..CardOptions::default()
            },
            Instant::now(),
        );
        let mut driver = ScriptedDriver::new([key(KeyCode::Enter), key(KeyCode::Char('q'))]);

        run_card(&mut driver, &mut output, &mut app, Duration::ZERO).unwrap();

        assert!(app.should_quit());
        assert!(app.pages().is_visible(QUESTION_PAGE));
        assert_eq!(driver.mouse_capture(), Some(true));
        assert_eq!(driver.remaining(), 0);
        assert_eq!(output.frames, 1);
        assert_eq!(app.viewport().width, 100);
    }
}
