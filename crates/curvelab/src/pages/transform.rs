//! Curve transformations tab.
//!
//! Draws the centered curve dashed and the translated curve solid, so the
//! effect of `h`, `k`, `a` and `b` is visible at a glance.

use conics::{Branch, CurveKind, CurveParams, SampleRange};
use tracing::{debug, warn};

use super::{Outcome, Status, cycle_focus, section, split_view, status_row};
use crate::config::TransformConfig;
use crate::error::RenderError;
use crate::form::{NumberField, choice_row};
use crate::key::Key;
use crate::plot::{Figure, LineStyle};
use crate::theme::{Ink, Theme, layout};

/// Plot title.
pub const TITLE: &str = "Curve Transformations (Translation + Stretching)";

/// Title of the error banner.
pub const ERROR_TITLE: &str = "Transform Render Error";

/// Focusable panel rows, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Curve family.
    Curve,
    /// Horizontal shift.
    H,
    /// Vertical shift.
    K,
    /// Horizontal stretch.
    A,
    /// Vertical stretch.
    B,
    /// Hyperbola branch.
    Branch,
    /// Lower plot bound.
    RangeMin,
    /// Upper plot bound.
    RangeMax,
}

impl Field {
    /// Panel order.
    pub const ALL: [Self; 8] = [
        Self::Curve,
        Self::H,
        Self::K,
        Self::A,
        Self::B,
        Self::Branch,
        Self::RangeMin,
        Self::RangeMax,
    ];
}

/// Builds the figure for a curve and a square view.
///
/// The parabola's reference curve is `y = a·t²`; the other references are
/// the same curve with `h = k = 0`.
pub fn transform_figure(params: &CurveParams, view: SampleRange) -> Figure {
    let original = params.centered().sample(view);
    let transformed = params.sample(view);
    Figure::new(TITLE, view, view)
        .line("original (centered)", LineStyle::Dashed, Ink::Muted, original)
        .line("transformed", LineStyle::Solid, Ink::Accent, transformed)
}

/// State of the transform tab.
#[derive(Debug, Clone)]
pub struct TransformPage {
    kind: CurveKind,
    branch: Branch,
    h: NumberField,
    k: NumberField,
    a: NumberField,
    b: NumberField,
    range_min: NumberField,
    range_max: NumberField,
    focus: usize,
    figure: Option<Figure>,
    status: Status,
}

impl Default for TransformPage {
    fn default() -> Self {
        Self::new(&TransformConfig::default())
    }
}

impl TransformPage {
    /// Creates the tab with initial field values.
    pub fn new(config: &TransformConfig) -> Self {
        Self {
            kind: config.curve,
            branch: config.branch,
            h: NumberField::slider("h", config.h, -5.0, 5.0, 0.1),
            k: NumberField::slider("k", config.k, -5.0, 5.0, 0.1),
            a: NumberField::slider("a", config.a, 0.5, 6.0, 0.1),
            b: NumberField::slider("b", config.b, 0.5, 6.0, 0.1),
            range_min: NumberField::entry("range min", config.range_min, 0.5),
            range_max: NumberField::entry("range max", config.range_max, 0.5),
            focus: 0,
            figure: None,
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

    /// Status line.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Selected curve.
    pub const fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Selected branch.
    pub const fn branch(&self) -> Branch {
        self.branch
    }

    /// A numeric field, or `None` for choice rows.
    pub const fn number(&self, field: Field) -> Option<&NumberField> {
        match field {
            Field::H => Some(&self.h),
            Field::K => Some(&self.k),
            Field::A => Some(&self.a),
            Field::B => Some(&self.b),
            Field::RangeMin => Some(&self.range_min),
            Field::RangeMax => Some(&self.range_max),
            Field::Curve | Field::Branch => None,
        }
    }

    fn number_mut(&mut self, field: Field) -> Option<&mut NumberField> {
        match field {
            Field::H => Some(&mut self.h),
            Field::K => Some(&mut self.k),
            Field::A => Some(&mut self.a),
            Field::B => Some(&mut self.b),
            Field::RangeMin => Some(&mut self.range_min),
            Field::RangeMax => Some(&mut self.range_max),
            Field::Curve | Field::Branch => None,
        }
    }

    /// Reads the panel into curve parameters and a view range.
    ///
    /// # Errors
    ///
    /// Fails when a field is not a number or the range is empty.
    pub fn read(&self) -> Result<(CurveParams, SampleRange), RenderError> {
        let params = CurveParams::new(self.kind)
            .with_center(self.h.value()?, self.k.value()?)
            .with_axes(self.a.value()?, self.b.value()?)
            .with_branch(self.branch);
        let view = SampleRange::new(self.range_min.value()?, self.range_max.value()?)?;
        Ok((params, view))
    }

    /// Redraws from the current fields.
    ///
    /// On failure the previous figure stays on screen.
    ///
    /// # Errors
    ///
    /// Returns the validation error after setting the status to `Error.`.
    pub fn render_transform(&mut self) -> Result<(), RenderError> {
        match self.read() {
            Ok((params, view)) => {
                self.figure = Some(transform_figure(&params, view));
                self.status = Status::Rendered;
                debug!(
                    curve = %params.kind,
                    a = params.a,
                    b = params.b,
                    h = params.h,
                    k = params.k,
                    "transform rendered"
                );
                Ok(())
            }
            Err(err) => {
                self.status = Status::Error;
                warn!(%err, "transform render failed");
                Err(err)
            }
        }
    }

    fn rerender(&mut self) -> Outcome {
        let result = self.render_transform();
        Outcome::from_render(result, ERROR_TITLE)
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
                    Field::Curve => {
                        self.kind = if forward { self.kind.next() } else { self.kind.prev() };
                    }
                    Field::Branch => self.branch = self.branch.flip(),
                    _ => {
                        if let Some(number) = self.number_mut(field) {
                            number.nudge(if forward { steps } else { -steps });
                        }
                    }
                }
                self.rerender()
            }
            Key::Enter | Key::Char('r') => self.rerender(),
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
            section("Curve Type", theme),
            choice_row("curve", self.kind.name(), focused == Field::Curve, theme, w),
            String::new(),
            section("Translation (h, k)", theme),
            number(Field::H),
            number(Field::K),
            String::new(),
            section("Stretching / Parameters", theme),
            number(Field::A),
            number(Field::B),
            String::new(),
            section("Hyperbola Branch", theme),
            choice_row("branch", self.branch.label(), focused == Field::Branch, theme, w),
            String::new(),
            section("Plot Range", theme),
            number(Field::RangeMin),
            number(Field::RangeMax),
            String::new(),
            status_row(self.status, theme),
        ]
    }

    /// Renders the tab into `height` lines of `width` columns.
    pub fn view(&self, width: usize, height: usize, theme: &Theme) -> Vec<String> {
        split_view(self.panel(theme), self.figure.as_ref(), width, height, theme)
    }
}
