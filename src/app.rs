use crate::keyboard::{map_key_event, Command};
use crate::theme::Theme;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::layout::Position;
use ratatui::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tapgesture::dispatch::{DispatchHost, NativeDispatch};
use tapgesture::gesture::{ExclusiveDispatcher, ReleaseSource, TapAdapter, UnifiedTapHandler};
use tapgesture::input::map_mouse_event;
use tapgesture::timer::{Clock, SystemClock, TimerQueue};
use tapgesture::{Config, TapEvent, TapKind, TargetId};

/// The tap pad: the one target the playground binds
pub const PAD: TargetId = TargetId(1);

/// Upper bound on how long the loop sleeps without a pending timer
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Log entries are capped so a long session stays cheap to draw
const MAX_LOG: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Tap,
    DblTap,
    Action,
    Notice,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: Duration,
    pub kind: LogKind,
    pub text: String,
}

pub type EventLog = Rc<RefCell<Vec<LogEntry>>>;

fn push_log(log: &EventLog, at: Duration, kind: LogKind, text: String) {
    let mut log = log.borrow_mut();
    log.push(LogEntry { at, kind, text });
    if log.len() > MAX_LOG {
        let excess = log.len() - MAX_LOG;
        log.drain(..excess);
    }
}

/// Host side of synthetic event dispatch: collects events for the loop
#[derive(Clone, Default)]
struct Mailbox(Rc<RefCell<Vec<TapEvent>>>);

impl DispatchHost for Mailbox {
    fn dispatch_event(&mut self, event: &TapEvent) -> bool {
        self.0.borrow_mut().push(event.clone());
        true
    }
}

/// The main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// The color theme
    pub theme: Theme,
    /// Loaded configuration
    pub config: Config,
    /// Last known pad area for mouse hit detection
    pub pad_area: Option<Rect>,
    /// Gesture and action history
    pub log: EventLog,
    clock: Rc<dyn Clock>,
    timers: Rc<TimerQueue>,
    taps: UnifiedTapHandler,
    mailbox: Mailbox,
    actions: ExclusiveDispatcher<TapEvent>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let clock: Rc<dyn Clock> = Rc::new(SystemClock::new());
        let timers = Rc::new(TimerQueue::new(clock.clone()));
        let mailbox = Mailbox::default();
        let log = EventLog::default();

        let taps = UnifiedTapHandler::new(
            config.thresholds(),
            clock.clone(),
            Box::new(NativeDispatch::new(mailbox.clone())),
        )
        .with_release(ReleaseSource::Up);

        let actions = ExclusiveDispatcher::new(timers.clone())
            .on(action(&log, &clock, "select"))
            .on(action(&log, &clock, "open"))
            .on(action(&log, &clock, "inspect"))
            .with_speed(config.xor_speed());

        Self {
            should_quit: false,
            theme: Theme::default(),
            config,
            pad_area: None,
            log,
            clock,
            timers,
            taps,
            mailbox,
            actions,
        }
    }

    /// Whether a lower click count is waiting out its window
    pub fn has_pending_action(&self) -> bool {
        self.actions.has_pending()
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut ratatui::Terminal<impl Backend>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            // Wake up in time for the next deadline
            let timeout = self
                .timers
                .time_until_next()
                .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));

            if event::poll(timeout)? {
                let event = event::read()?;
                self.handle_event(event)?;
            }

            self.timers.run_due();
        }

        self.actions.dispose();
        self.taps.dispose();
        Ok(())
    }

    /// Handle an input event
    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                if let Some(command) = map_key_event(key) {
                    self.execute(command);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => {}
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::KillPending => {
                let had_pending = self.actions.has_pending();
                self.actions.kill();
                if had_pending {
                    self.notice("pending action killed".to_string());
                }
            }
            Command::ClearLog => self.log.borrow_mut().clear(),
            Command::ResetSeries => {
                self.taps.reset();
                self.notice("tap series reset".to_string());
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: event::MouseEvent) {
        let Some(area) = self.pad_area else {
            return;
        };
        if !area.contains(Position::new(mouse.column, mouse.row)) {
            return;
        }

        let Some(mut pointer) = map_mouse_event(mouse, PAD) else {
            return;
        };
        // Pad-relative coordinates
        pointer.client.x -= f64::from(area.x);
        pointer.client.y -= f64::from(area.y);

        if self.taps.handle(&mut pointer).is_none() {
            return;
        }

        let delivered: Vec<TapEvent> = self.mailbox.0.borrow_mut().drain(..).collect();
        for tap in delivered {
            self.record_tap(&tap);
            if tap.kind == TapKind::Tap {
                self.actions.xor(PAD, &tap);
            }
        }
    }

    fn record_tap(&self, tap: &TapEvent) {
        let kind = match tap.kind {
            TapKind::Tap => LogKind::Tap,
            TapKind::DblTap => LogKind::DblTap,
        };
        let text = format!(
            "{} #{} at {},{}{}",
            tap.kind,
            tap.detail,
            tap.client.x,
            tap.client.y,
            if tap.modifiers.any() { " (mod)" } else { "" }
        );
        push_log(&self.log, self.now(), kind, text);
    }

    fn notice(&self, text: String) {
        push_log(&self.log, self.now(), LogKind::Notice, text);
    }
}

/// Build an action that logs its name when it runs
fn action(
    log: &EventLog,
    clock: &Rc<dyn Clock>,
    name: &'static str,
) -> impl Fn(TargetId, &TapEvent) + 'static {
    let entries = log.clone();
    let clock = clock.clone();
    move |target: TargetId, tap: &TapEvent| {
        log::info!("action {} on target {}", name, target.0);
        push_log(
            &entries,
            clock.now(),
            LogKind::Action,
            format!("{} (click {} at {},{})", name, tap.detail, tap.client.x, tap.client.y),
        );
    }
}
