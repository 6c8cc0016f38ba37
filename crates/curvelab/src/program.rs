//! Program lifecycle and event loop.
//!
//! A [`Program`] owns the terminal and a [`Model`]. Everything runs on one
//! thread: the loop waits for terminal input no longer than the time left
//! until the pending tick, delivers [`Msg`]s to the model, and redraws
//! when the view changes.
//!
//! Timers follow the requeue pattern: a model that wants periodic ticks
//! returns [`Cmd::Tick`] from every tick it handles. At most one tick is
//! pending at a time, and [`Cmd::CancelTick`] clears it.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, trace};

use crate::key::{Key, from_crossterm_key};

/// Errors that can occur while running a program.
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`Io`](Error::Io) | Check terminal availability |
/// | [`RawModeFailure`](Error::RawModeFailure) | Run in an interactive terminal |
/// | [`AltScreenFailure`](Error::AltScreenFailure) | Retry with `--no-alt-screen` |
/// | [`EventPoll`](Error::EventPoll) | Terminal may be disconnected |
/// | [`Render`](Error::Render) | Output stream closed |
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error during terminal operations.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable or disable raw mode.
    #[error("failed to {action} raw mode: {source}")]
    RawModeFailure {
        /// Whether we were trying to enable or disable raw mode.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to enter or exit the alternate screen.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreenFailure {
        /// Whether we were trying to enter or exit the alt screen.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to poll for terminal events.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Failed to write the view to the terminal.
    #[error("failed to render view: {0}")]
    Render(io::Error),
}

/// A specialized [`Result`] type for program operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Messages delivered to [`Model::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    Key(Key),
    /// The terminal was resized.
    Resize {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
    /// The pending tick fired.
    Tick,
}

/// Side effects a model asks the program to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Stop the program and return the model.
    Quit,
    /// Deliver [`Msg::Tick`] after the given delay, replacing any pending tick.
    Tick(Duration),
    /// Drop the pending tick, if any.
    CancelTick,
    /// Run several commands in order.
    Batch(Vec<Cmd>),
}

/// Combines optional commands into one.
pub fn batch(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let mut cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(Cmd::Batch(cmds)),
    }
}

/// The Model trait for the application.
///
/// # Example
///
/// ```rust
/// use curvelab::program::{Cmd, Model, Msg};
///
/// struct Ticks { count: u32 }
///
/// impl Model for Ticks {
///     fn init(&mut self) -> Option<Cmd> { None }
///
///     fn update(&mut self, msg: Msg) -> Option<Cmd> {
///         if msg == Msg::Tick {
///             self.count += 1;
///         }
///         None
///     }
///
///     fn view(&self) -> String {
///         format!("ticks: {}", self.count)
///     }
/// }
/// ```
pub trait Model {
    /// Called once before the first frame.
    fn init(&mut self) -> Option<Cmd>;

    /// Processes one message.
    fn update(&mut self, msg: Msg) -> Option<Cmd>;

    /// Renders the current state, one terminal row per line.
    fn view(&self) -> String;
}

/// What the loop should do after applying a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The single pending tick.
///
/// Holding a deadline is the scheduled callback; clearing it is the
/// cancellation.
#[derive(Debug, Default)]
struct TickSlot {
    deadline: Option<Instant>,
}

impl TickSlot {
    fn apply(&mut self, cmd: Cmd, now: Instant) -> Flow {
        match cmd {
            Cmd::Quit => Flow::Quit,
            Cmd::Tick(delay) => {
                self.deadline = Some(now + delay);
                Flow::Continue
            }
            Cmd::CancelTick => {
                self.deadline = None;
                Flow::Continue
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    if self.apply(cmd, now) == Flow::Quit {
                        return Flow::Quit;
                    }
                }
                Flow::Continue
            }
        }
    }

    fn timeout(&self, now: Instant, frame: Duration) -> Duration {
        self.deadline
            .map_or(frame, |d| d.saturating_duration_since(now).min(frame))
    }

    fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Program options.
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Upper bound on input polling latency, in frames per second.
    pub fps: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            fps: 60,
        }
    }
}

/// A terminal program driving a [`Model`].
pub struct Program<M: Model> {
    model: M,
    options: ProgramOptions,
}

impl<M: Model> Program<M> {
    /// Creates a program with default options.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ProgramOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: ProgramOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the program on stdout and returns the final model.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, polled or drawn to.
    pub fn run(self) -> Result<M> {
        let stdout = io::stdout();
        self.run_with_writer(stdout)
    }

    /// Runs the program with a custom writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up, polled or drawn to.
    pub fn run_with_writer<W: Write>(self, mut writer: W) -> Result<M> {
        let options = self.options.clone();

        enable_raw_mode().map_err(|source| Error::RawModeFailure {
            action: "enable",
            source,
        })?;

        if options.alt_screen {
            if let Err(source) = execute!(writer, EnterAlternateScreen) {
                let _ = disable_raw_mode();
                return Err(Error::AltScreenFailure {
                    action: "enter",
                    source,
                });
            }
        }

        let _ = execute!(writer, Hide);
        debug!(alt_screen = options.alt_screen, fps = options.fps, "terminal ready");

        let result = self.event_loop(&mut writer);

        let _ = execute!(writer, Show);
        if options.alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();
        debug!("terminal restored");

        result
    }

    fn event_loop<W: Write>(mut self, writer: &mut W) -> Result<M> {
        let mut slot = TickSlot::default();
        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.options.fps.max(1)));

        if let Ok((width, height)) = terminal::size() {
            if let Some(cmd) = self.model.update(Msg::Resize { width, height }) {
                if slot.apply(cmd, Instant::now()) == Flow::Quit {
                    return Ok(self.model);
                }
            }
        }

        if let Some(cmd) = self.model.init() {
            if slot.apply(cmd, Instant::now()) == Flow::Quit {
                return Ok(self.model);
            }
        }

        let mut last_view = String::new();
        self.render(writer, &mut last_view)?;

        loop {
            let mut inbox = Vec::new();

            let timeout = slot.timeout(Instant::now(), frame_duration);
            if event::poll(timeout).map_err(Error::EventPoll)? {
                match event::read().map_err(Error::EventPoll)? {
                    Event::Key(key_event) => {
                        if key_event.kind == KeyEventKind::Press {
                            if let Some(key) =
                                from_crossterm_key(key_event.code, key_event.modifiers)
                            {
                                inbox.push(Msg::Key(key));
                            }
                        }
                    }
                    Event::Resize(width, height) => {
                        // Force a full redraw at the new size.
                        last_view.clear();
                        inbox.push(Msg::Resize { width, height });
                    }
                    _ => {}
                }
            }

            if slot.take_due(Instant::now()) {
                trace!("tick due");
                inbox.push(Msg::Tick);
            }

            if inbox.is_empty() {
                continue;
            }

            for msg in inbox {
                if let Some(cmd) = self.model.update(msg) {
                    if slot.apply(cmd, Instant::now()) == Flow::Quit {
                        return Ok(self.model);
                    }
                }
            }

            self.render(writer, &mut last_view)?;
        }
    }

    fn render<W: Write>(&self, writer: &mut W, last_view: &mut String) -> Result<()> {
        let view = self.model.view();

        if view == *last_view {
            return Ok(());
        }

        let mut rows = 0u16;
        for (row, line) in view.lines().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(
                writer,
                MoveTo(0, row),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )
            .map_err(Error::Render)?;
            rows = row.saturating_add(1);
        }
        queue!(writer, MoveTo(0, rows), Clear(ClearType::FromCursorDown)).map_err(Error::Render)?;
        writer.flush().map_err(Error::Render)?;

        *last_view = view;
        Ok(())
    }
}

/// Drives a [`Model`] without a terminal.
///
/// Ticks do not fire on their own: the pending delay is recorded and
/// [`Simulator::fire_tick`] delivers it, which makes animation
/// deterministic in tests and headless export.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use curvelab::program::{Cmd, Model, Msg, Simulator};
///
/// struct Blink { on: bool }
///
/// impl Model for Blink {
///     fn init(&mut self) -> Option<Cmd> { Some(Cmd::Tick(Duration::from_millis(10))) }
///     fn update(&mut self, msg: Msg) -> Option<Cmd> {
///         if msg == Msg::Tick {
///             self.on = !self.on;
///             return Some(Cmd::Tick(Duration::from_millis(10)));
///         }
///         None
///     }
///     fn view(&self) -> String { if self.on { "on".into() } else { "off".into() } }
/// }
///
/// let mut sim = Simulator::new(Blink { on: false });
/// sim.init();
/// assert!(sim.fire_tick());
/// assert_eq!(sim.view(), "on");
/// ```
pub struct Simulator<M: Model> {
    model: M,
    pending_tick: Option<Duration>,
    initialized: bool,
    quit: bool,
    updates: usize,
}

impl<M: Model> Simulator<M> {
    /// Wraps a model.
    pub const fn new(model: M) -> Self {
        Self {
            model,
            pending_tick: None,
            initialized: false,
            quit: false,
            updates: 0,
        }
    }

    /// Calls [`Model::init`] once.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.apply(cmd);
    }

    /// Delivers one message, initializing first if needed.
    ///
    /// Messages sent after a quit are dropped.
    pub fn send(&mut self, msg: Msg) {
        self.init();
        if self.quit {
            return;
        }
        self.updates += 1;
        let cmd = self.model.update(msg);
        self.apply(cmd);
    }

    /// Delivers a key press.
    pub fn press(&mut self, key: Key) {
        self.send(Msg::Key(key));
    }

    /// Types each character of `text` as a key press.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(Key::Char(c));
        }
    }

    /// Fires the pending tick. Returns false when none was scheduled.
    pub fn fire_tick(&mut self) -> bool {
        if self.pending_tick.take().is_none() {
            return false;
        }
        self.send(Msg::Tick);
        true
    }

    /// The delay of the pending tick, if one is scheduled.
    pub const fn pending_tick(&self) -> Option<Duration> {
        self.pending_tick
    }

    /// Whether the model asked to quit.
    pub const fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Number of messages delivered to `update`.
    pub const fn update_count(&self) -> usize {
        self.updates
    }

    /// Current view.
    pub fn view(&self) -> String {
        self.model.view()
    }

    /// The wrapped model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// The wrapped model, mutably.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    fn apply(&mut self, cmd: Option<Cmd>) {
        let Some(cmd) = cmd else { return };
        match cmd {
            Cmd::Quit => self.quit = true,
            Cmd::Tick(delay) => self.pending_tick = Some(delay),
            Cmd::CancelTick => self.pending_tick = None,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.apply(Some(cmd));
                }
            }
        }
    }
}
