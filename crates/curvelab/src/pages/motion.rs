//! Parametric motion tab.
//!
//! A point moves along an ellipse or a parabola-like path. Its velocity and
//! acceleration are drawn as arrows from the point, scaled only for
//! display. `s` starts the clock, `x` stops it; each tick advances `t` by
//! the step in the `dt` field and asks for the next tick.

use conics::{
    Clock, DEFAULT_DT, Kinematics, MotionParams, PATH_SAMPLES, PathKind, SampleRange,
    effective_dt, tick_interval,
};
use tracing::{debug, info, trace, warn};

use super::{Banner, Outcome, Status, cycle_focus, section, split_view, status_row};
use crate::config::MotionConfig;
use crate::error::RenderError;
use crate::form::{NumberField, choice_row};
use crate::key::Key;
use crate::plot::{Figure, LineStyle};
use crate::program::Cmd;
use crate::theme::{Ink, Theme, layout, pad_to};

/// Plot title.
pub const TITLE: &str = "Parametric Motion (Position, Velocity, Acceleration)";

/// Title of the error banner.
pub const ERROR_TITLE: &str = "Motion Render Error";

/// Half-width of the fixed square view.
pub const VIEW_LIMIT: f64 = 7.0;

/// Focusable panel rows, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Path shape.
    Path,
    /// Horizontal center.
    H,
    /// Vertical center.
    K,
    /// Horizontal radius.
    A,
    /// Vertical radius.
    B,
    /// Angular speed.
    Omega,
    /// Parabola curvature.
    P,
    /// Parabola speed.
    Speed,
    /// Velocity arrow scale.
    VScale,
    /// Acceleration arrow scale.
    AScale,
    /// Time step.
    Dt,
}

impl Field {
    /// Panel order.
    pub const ALL: [Self; 11] = [
        Self::Path,
        Self::H,
        Self::K,
        Self::A,
        Self::B,
        Self::Omega,
        Self::P,
        Self::Speed,
        Self::VScale,
        Self::AScale,
        Self::Dt,
    ];
}

/// The readout line under the panel.
///
/// ```rust
/// use curvelab::pages::motion::readout;
///
/// assert_eq!(readout(0.0, 2.0), "t=0.00   speed=2.000");
/// ```
pub fn readout(t: f64, speed: f64) -> String {
    format!("t={t:.2}   speed={speed:.3}")
}

/// Builds the figure at time `t`.
///
/// # Errors
///
/// Never fails for finite inputs; the view is validated like any other.
pub fn motion_figure(
    params: &MotionParams,
    t: f64,
    v_scale: f64,
    a_scale: f64,
) -> Result<(Figure, Kinematics), RenderError> {
    let view = SampleRange::new(-VIEW_LIMIT, VIEW_LIMIT)?;
    let label = match params.kind {
        PathKind::Ellipse => "path (ellipse)",
        PathKind::Parabola => "path (parabola-like)",
    };
    let k = params.kinematics(t);
    let figure = Figure::new(TITLE, view, view)
        .line(label, LineStyle::Solid, Ink::Accent, params.path(PATH_SAMPLES))
        .arrow("velocity", Ink::Velocity, k.position, k.velocity * v_scale)
        .arrow("acceleration", Ink::Acceleration, k.position, k.acceleration * a_scale)
        .marker("moving point", Ink::Marker, k.position);
    Ok((figure, k))
}

/// Everything one motion render reads from the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionInputs {
    /// Path coefficients.
    pub params: MotionParams,
    /// Velocity arrow scale.
    pub v_scale: f64,
    /// Acceleration arrow scale.
    pub a_scale: f64,
}

/// State of the motion tab.
#[derive(Debug, Clone)]
pub struct MotionPage {
    kind: PathKind,
    h: NumberField,
    k: NumberField,
    a: NumberField,
    b: NumberField,
    omega: NumberField,
    p: NumberField,
    speed: NumberField,
    v_scale: NumberField,
    a_scale: NumberField,
    dt: NumberField,
    clock: Clock,
    focus: usize,
    figure: Option<Figure>,
    kinematics: Option<Kinematics>,
    status: Status,
}

impl Default for MotionPage {
    fn default() -> Self {
        Self::new(&MotionConfig::default())
    }
}

impl MotionPage {
    /// Creates the tab with initial field values and an idle clock at `t = 0`.
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            kind: config.path,
            h: NumberField::slider("h", config.h, -5.0, 5.0, 0.1),
            k: NumberField::slider("k", config.k, -5.0, 5.0, 0.1),
            a: NumberField::slider("a", config.a, 0.5, 6.0, 0.1),
            b: NumberField::slider("b", config.b, 0.5, 6.0, 0.1),
            omega: NumberField::slider("omega", config.omega, 0.2, 5.0, 0.1),
            p: NumberField::slider("p", config.p, 0.05, 2.0, 0.05),
            speed: NumberField::slider("speed", config.speed, 0.2, 3.0, 0.1),
            v_scale: NumberField::slider("v_scale", config.v_scale, 0.1, 5.0, 0.1),
            a_scale: NumberField::slider("a_scale", config.a_scale, 0.05, 2.0, 0.05),
            dt: NumberField::entry("dt", config.dt, 0.01),
            clock: Clock::new(),
            focus: 0,
            figure: None,
            kinematics: None,
            status: Status::Ready,
        }
    }

    /// The focused row.
    pub const fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    /// Moves focus to a row.
    pub fn focus(&mut self, field: Field) {
        self.focus = Field::ALL.iter().position(|f| *f == field).unwrap_or(0);
    }

    /// The figure on display.
    pub const fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Kinematics at the displayed time.
    pub const fn kinematics(&self) -> Option<Kinematics> {
        self.kinematics
    }

    /// Status line.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Selected path.
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    /// The animation clock.
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current animation time.
    pub const fn t(&self) -> f64 {
        self.clock.t()
    }

    /// Whether the clock is running.
    pub const fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    /// The readout for the displayed frame.
    pub fn readout(&self) -> String {
        let speed = self.kinematics.map_or(0.0, |k| k.speed());
        readout(self.clock.t(), speed)
    }

    /// A numeric field, or `None` for the path row.
    pub const fn number(&self, field: Field) -> Option<&NumberField> {
        match field {
            Field::H => Some(&self.h),
            Field::K => Some(&self.k),
            Field::A => Some(&self.a),
            Field::B => Some(&self.b),
            Field::Omega => Some(&self.omega),
            Field::P => Some(&self.p),
            Field::Speed => Some(&self.speed),
            Field::VScale => Some(&self.v_scale),
            Field::AScale => Some(&self.a_scale),
            Field::Dt => Some(&self.dt),
            Field::Path => None,
        }
    }

    fn number_mut(&mut self, field: Field) -> Option<&mut NumberField> {
        match field {
            Field::H => Some(&mut self.h),
            Field::K => Some(&mut self.k),
            Field::A => Some(&mut self.a),
            Field::B => Some(&mut self.b),
            Field::Omega => Some(&mut self.omega),
            Field::P => Some(&mut self.p),
            Field::Speed => Some(&mut self.speed),
            Field::VScale => Some(&mut self.v_scale),
            Field::AScale => Some(&mut self.a_scale),
            Field::Dt => Some(&mut self.dt),
            Field::Path => None,
        }
    }

    /// The step the clock advances by.
    ///
    /// Text that does not parse, and non-positive values, give the default
    /// step rather than an error.
    pub fn step(&self) -> f64 {
        match self.dt.value() {
            Ok(dt) => effective_dt(dt),
            Err(_) => {
                debug!(input = self.dt.text(), "dt not a number, using default step");
                DEFAULT_DT
            }
        }
    }

    /// Reads the panel.
    ///
    /// Only the fields the selected path uses are parsed.
    ///
    /// # Errors
    ///
    /// Fails when a used field is not a number.
    pub fn read(&self) -> Result<MotionInputs, RenderError> {
        let mut params = MotionParams::new(self.kind).with_center(self.h.value()?, self.k.value()?);
        params = match self.kind {
            PathKind::Ellipse => {
                params.with_ellipse(self.a.value()?, self.b.value()?, self.omega.value()?)
            }
            PathKind::Parabola => params.with_parabola(self.p.value()?, self.speed.value()?),
        };
        Ok(MotionInputs {
            params,
            v_scale: self.v_scale.value()?,
            a_scale: self.a_scale.value()?,
        })
    }

    fn draw(&mut self, inputs: &MotionInputs) -> Result<(), RenderError> {
        let (figure, k) =
            motion_figure(&inputs.params, self.clock.t(), inputs.v_scale, inputs.a_scale)?;
        self.figure = Some(figure);
        self.kinematics = Some(k);
        Ok(())
    }

    /// Redraws at the current time without advancing the clock.
    ///
    /// # Errors
    ///
    /// Returns the validation error after setting the status to `Error.`.
    pub fn render_motion(&mut self) -> Result<(), RenderError> {
        let result = self.read().and_then(|inputs| self.draw(&inputs));
        match &result {
            Ok(()) => {
                if !self.clock.is_running() {
                    self.status = Status::Rendered;
                }
                debug!(path = %self.kind, t = self.clock.t(), "motion rendered");
            }
            Err(err) => {
                self.status = Status::Error;
                warn!(%err, "motion render failed");
            }
        }
        result
    }

    fn rerender(&mut self) -> Outcome {
        let result = self.render_motion();
        Outcome::from_render(result, ERROR_TITLE)
    }

    /// Idle → running, then advances once right away.
    ///
    /// Starting a running clock does nothing.
    pub fn start(&mut self) -> Outcome {
        if !self.clock.start() {
            return Outcome::Handled;
        }
        self.status = Status::Animating;
        info!(t = self.clock.t(), dt = self.step(), "animation started");
        self.advance()
    }

    /// Running → idle, dropping the pending tick.
    pub fn stop(&mut self) -> Outcome {
        if self.clock.stop() {
            info!(t = self.clock.t(), "animation stopped");
        }
        self.status = Status::Stopped;
        Outcome::Command(Cmd::CancelTick)
    }

    /// Handles the pending tick. Ticks while idle do nothing.
    pub fn on_tick(&mut self) -> Outcome {
        if !self.clock.is_running() {
            trace!("tick while idle ignored");
            return Outcome::Handled;
        }
        self.advance()
    }

    fn advance(&mut self) -> Outcome {
        let dt = self.step();
        let inputs = match self.read() {
            Ok(inputs) => inputs,
            Err(err) => return self.halt(&err),
        };
        let t = self.clock.tick(dt, inputs.params.wrap_rule());
        trace!(?t, dt, "tick");
        if let Err(err) = self.draw(&inputs) {
            return self.halt(&err);
        }
        Outcome::Command(Cmd::Tick(tick_interval(dt)))
    }

    fn halt(&mut self, err: &RenderError) -> Outcome {
        self.clock.stop();
        self.status = Status::Error;
        warn!(%err, "animation halted");
        Outcome::Failed(Banner::new(ERROR_TITLE, err))
    }

    /// Moves the clock back to `t = 0` and redraws.
    pub fn rewind(&mut self) -> Outcome {
        self.clock.reset();
        self.rerender()
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        let field = self.focused();
        match key {
            Key::Up => {
                self.focus = cycle_focus(self.focus, Field::ALL.len(), false);
                Outcome::Handled
            }
            Key::Down => {
                self.focus = cycle_focus(self.focus, Field::ALL.len(), true);
                Outcome::Handled
            }
            Key::Left | Key::Right | Key::PageUp | Key::PageDown => {
                let forward = matches!(key, Key::Right | Key::PageUp);
                let steps = match key {
                    Key::PageUp | Key::PageDown => 10,
                    _ => 1,
                };
                match field {
                    Field::Path => self.kind = self.kind.toggle(),
                    // The step only matters to the next tick.
                    Field::Dt => {
                        self.dt.nudge(if forward { steps } else { -steps });
                        return Outcome::Handled;
                    }
                    _ => {
                        if let Some(number) = self.number_mut(field) {
                            number.nudge(if forward { steps } else { -steps });
                        }
                    }
                }
                self.rerender()
            }
            Key::Enter | Key::Char('r') => self.rerender(),
            Key::Char('s') => self.start(),
            Key::Char('x') => self.stop(),
            Key::Home => self.rewind(),
            Key::Char(c) => match self.number_mut(field) {
                Some(number) => {
                    if number.push_char(c) {
                        Outcome::Handled
                    } else {
                        Outcome::Ignored
                    }
                }
                None => Outcome::Ignored,
            },
            Key::Backspace => match self.number_mut(field) {
                Some(number) => {
                    number.backspace();
                    Outcome::Handled
                }
                None => Outcome::Ignored,
            },
            Key::Delete | Key::CtrlU => match self.number_mut(field) {
                Some(number) => {
                    number.clear();
                    Outcome::Handled
                }
                None => Outcome::Ignored,
            },
            _ => Outcome::Ignored,
        }
    }

    fn panel(&self, theme: &Theme) -> Vec<String> {
        let w = layout::PANEL_WIDTH;
        let focused = self.focused();
        let number = |field: Field| {
            self.number(field)
                .map(|n| n.render(focused == field, theme, w))
                .unwrap_or_default()
        };

        vec![
            section("Motion Path", theme),
            choice_row("path", self.kind.name(), focused == Field::Path, theme, w),
            section("Center (h, k)", theme),
            number(Field::H),
            number(Field::K),
            section("Ellipse/Circle", theme),
            number(Field::A),
            number(Field::B),
            number(Field::Omega),
            section("Parabola p & speed", theme),
            number(Field::P),
            number(Field::Speed),
            section("Vector display scale", theme),
            number(Field::VScale),
            number(Field::AScale),
            section("Time step", theme),
            number(Field::Dt),
            String::new(),
            status_row(self.status, theme),
            pad_to(&self.readout(), w),
        ]
    }

    /// Renders the tab into `height` lines of `width` columns.
    pub fn view(&self, width: usize, height: usize, theme: &Theme) -> Vec<String> {
        split_view(self.panel(theme), self.figure.as_ref(), width, height, theme)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;
    use std::time::Duration;

    use super::*;

    fn type_into(page: &mut MotionPage, field: Field, text: &str) {
        page.focus(field);
        page.handle_key(Key::CtrlU);
        for c in text.chars() {
            page.handle_key(Key::Char(c));
        }
    }

    #[test]
    fn readout_format() {
        assert_eq!(readout(1.234, 2.5), "t=1.23   speed=2.500");
        assert_eq!(readout(-3.0, 1.0), "t=-3.00   speed=1.000");
    }

    #[test]
    fn figure_contents() {
        let params = MotionParams::new(PathKind::Ellipse);
        let (figure, k) = motion_figure(&params, 0.0, 2.0, 0.5).unwrap();
        assert_eq!(figure.title, TITLE);
        assert_eq!((figure.x_limits.min(), figure.x_limits.max()), (-7.0, 7.0));
        assert_eq!(figure.series[0].label, "path (ellipse)");
        assert_eq!(figure.series[0].points.len(), 800);
        assert_eq!(figure.markers[0].at, k.position);
        assert_eq!(figure.arrows[0].vector, k.velocity * 2.0);
        assert_eq!(figure.arrows[1].vector, k.acceleration * 0.5);
    }

    #[test]
    fn initial_render_reads_zero_time() {
        let mut page = MotionPage::default();
        page.render_motion().unwrap();
        assert_eq!(page.status(), Status::Rendered);
        assert_eq!(page.readout(), "t=0.00   speed=2.000");
    }

    #[test]
    fn start_advances_and_schedules() {
        let mut page = MotionPage::default();
        let outcome = page.handle_key(Key::Char('s'));
        assert_eq!(outcome, Outcome::Command(Cmd::Tick(Duration::from_millis(30))));
        assert!(page.is_animating());
        assert_eq!(page.status(), Status::Animating);
        assert!((page.t() - 0.03).abs() < 1e-12);
    }

    #[test]
    fn second_start_is_a_no_op() {
        let mut page = MotionPage::default();
        page.start();
        let t = page.t();
        assert_eq!(page.start(), Outcome::Handled);
        assert_eq!(page.t(), t);
    }

    #[test]
    fn stop_cancels_and_freezes() {
        let mut page = MotionPage::default();
        page.start();
        assert_eq!(page.handle_key(Key::Char('x')), Outcome::Command(Cmd::CancelTick));
        assert_eq!(page.status(), Status::Stopped);
        let t = page.t();
        assert_eq!(page.on_tick(), Outcome::Handled);
        assert_eq!(page.t(), t);
    }

    #[test]
    fn bad_dt_falls_back_to_default() {
        let mut page = MotionPage::default();
        type_into(&mut page, Field::Dt, "abc");
        assert_eq!(page.step(), DEFAULT_DT);
        type_into(&mut page, Field::Dt, "-0.5");
        assert_eq!(page.step(), DEFAULT_DT);
        let outcome = page.start();
        assert!(matches!(
            outcome,
            Outcome::Command(Cmd::Tick(d)) if d == Duration::from_millis(30)
        ));
    }

    #[test]
    fn larger_dt_slows_the_timer() {
        let mut page = MotionPage::default();
        type_into(&mut page, Field::Dt, "0.1");
        assert_eq!(page.start(), Outcome::Command(Cmd::Tick(Duration::from_millis(100))));
    }

    #[test]
    fn ellipse_time_wraps_by_period() {
        let mut page = MotionPage::default();
        type_into(&mut page, Field::Dt, "0.5");
        page.start();
        for _ in 0..20 {
            page.on_tick();
        }
        assert!(page.t() >= 0.0 && page.t() <= TAU, "t={}", page.t());
    }

    #[test]
    fn parabola_time_resets_past_three() {
        let mut page = MotionPage::new(&MotionConfig {
            path: PathKind::Parabola,
            dt: 1.0,
            ..MotionConfig::default()
        });
        page.start();
        page.on_tick();
        page.on_tick();
        assert_eq!(page.t(), 3.0);
        page.on_tick();
        assert_eq!(page.t(), -3.0);
    }

    #[test]
    fn failure_during_animation_stops_clock() {
        let mut page = MotionPage::default();
        page.start();
        type_into(&mut page, Field::Omega, "?");
        let Outcome::Failed(banner) = page.on_tick() else {
            panic!("expected failure");
        };
        assert_eq!(banner.title, ERROR_TITLE);
        assert!(!page.is_animating());
        assert_eq!(page.status(), Status::Error);
        assert!(page.figure().is_some());
    }

    #[test]
    fn unused_fields_are_not_parsed() {
        let mut page = MotionPage::default();
        type_into(&mut page, Field::P, "oops");
        assert!(page.render_motion().is_ok());
    }

    #[test]
    fn path_toggle_renders() {
        let mut page = MotionPage::default();
        page.focus(Field::Path);
        assert_eq!(page.handle_key(Key::Right), Outcome::Handled);
        assert_eq!(page.kind(), PathKind::Parabola);
        assert_eq!(page.figure().unwrap().series[0].label, "path (parabola-like)");
    }

    #[test]
    fn typed_characters_reach_the_field() {
        let mut page = MotionPage::default();
        page.focus(Field::Omega);
        page.handle_key(Key::CtrlU);
        assert_eq!(page.handle_key(Key::Char('2')), Outcome::Handled);
        assert_eq!(page.handle_key(Key::Char('.')), Outcome::Handled);
        assert_eq!(page.handle_key(Key::Char('5')), Outcome::Handled);
        assert_eq!(page.handle_key(Key::Char('w')), Outcome::Ignored);
        assert_eq!(page.number(Field::Omega).unwrap().text(), "2.5");
        assert!(!page.is_animating());
    }

    #[test]
    fn rewind_resets_time() {
        let mut page = MotionPage::default();
        page.start();
        page.stop();
        assert!(page.t() > 0.0);
        assert_eq!(page.handle_key(Key::Home), Outcome::Handled);
        assert_eq!(page.t(), 0.0);
    }

    #[test]
    fn view_lists_every_control() {
        let mut page = MotionPage::default();
        page.render_motion().unwrap();
        let text = page.view(110, 34, &Theme::plain()).join("\n");
        for label in ["omega", "v_scale", "a_scale", "dt", "Ellipse/Circle"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("t=0.00   speed=2.000"));
        assert!(text.contains("● moving point"));
    }
}
