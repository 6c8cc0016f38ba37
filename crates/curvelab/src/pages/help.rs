//! User guide tab.

use crate::key::Key;
use crate::theme::{Ink, Theme, pad_to};

use super::Outcome;

const GUIDE: &str = "\
Curved Motion Visualizer
========================

Two plotting tabs and this guide. Switch tabs with Tab / Shift+Tab,
jump here with ?, quit with q or Ctrl+C.

Controls on the plotting tabs
-----------------------------
  Up / Down        move between panel rows
  Left / Right     nudge a value (PgUp / PgDn nudge ten steps),
                   or cycle a choice
  0-9 . - e        type into the focused number
  Backspace        delete one character, Ctrl+U clears the field
  Enter or r       render with the typed values

Slider nudges and choice changes redraw at once. Typed text is only
read when you render. If a value cannot be used, an error box appears,
the previous plot stays up, and the next key closes the box.

1) Transform Curves
-------------------
What you see:
  - Dashed curve: the original curve, centered at the origin.
  - Solid curve: the curve after your changes.

Controls:
  curve      Parabola, Ellipse or Hyperbola
  h, k       translation. +h moves right, -h left; +k up, -k down.
  a, b       stretching.
               Ellipse: a is the horizontal radius, b the vertical one.
               Hyperbola: a and b set how wide and tall the branch opens.
               Parabola: a sets how steep the parabola is.
  branch     Right (+) or Left (-) hyperbola branch
  range      plot limits on both axes. Hyperbolas grow fast, so a wider
             range helps. Range min must be less than range max.

How to read it:
  - Translation moves the curve without changing its shape.
  - Stretching changes width, height or steepness.

Test cases:
  - Ellipse translation: a=4, b=2, h=3, k=-2, range -8 to 8
  - Ellipse stretching: h=0, k=0; try a=5, b=1 then a=2, b=5
  - Parabola steepness: h=-2, k=1; try a=0.25 then a=2
  - Hyperbola branch flip: a=2, b=1, h=2, k=0; switch the branch

2) Parametric Motion
--------------------
What you see:
  - The path the point travels along.
  - The moving point.
  - Two arrows from the point: velocity (direction of motion right now)
    and acceleration (how the velocity is changing right now).
  - A readout with the time t and the speed, the length of the
    velocity vector.

Controls:
  path              Ellipse/Circle or Parabola-like
  h, k              center of the path
  a, b, omega       ellipse radii and angular speed (bigger omega is faster)
  p, speed          parabola curvature and how fast x increases
  v_scale, a_scale  arrow lengths only, to make them easier to see
  dt                time step per frame, also the frame delay in seconds
  s / x             start / stop the animation
  Home              move back to t = 0
  Enter or r        redraw once at the current time

How to read it:
  - The velocity arrow is tangent to the path.
  - The acceleration arrow shows how the velocity is changing.
  - The speed rises and falls as the point moves along an ellipse.

Test cases:
  - Circle (constant speed): a=3, b=3, omega=1, h=0, k=0
  - Ellipse (speed changes): a=5, b=2, omega=1
  - Faster motion: same as above with omega=2.5
  - Parabola-like motion: p=0.25, speed=1

Tips:
  - Arrows too small? Raise v_scale or a_scale.
  - Curve off screen? Adjust the parameters, or the range on the
    Transform tab.

Notes
-----
This tool is for building intuition about curve graphs, transformations
and parametric motion. It is not a precise physics model.";

/// Scrollable guide text.
#[derive(Debug, Clone, Default)]
pub struct HelpPage {
    scroll: usize,
}

impl HelpPage {
    /// Creates the page scrolled to the top.
    pub const fn new() -> Self {
        Self { scroll: 0 }
    }

    /// The guide, one entry per line.
    pub fn lines() -> Vec<&'static str> {
        GUIDE.lines().collect()
    }

    /// First visible line.
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(height: usize) -> usize {
        Self::lines().len().saturating_sub(height.max(1))
    }

    /// Handles a scroll key. `height` is the number of visible lines.
    pub fn handle_key(&mut self, key: Key, height: usize) -> Outcome {
        let page = height.saturating_sub(1).max(1);
        let max = Self::max_scroll(height);
        let next = match key {
            Key::Up | Key::Char('k') => self.scroll.saturating_sub(1),
            Key::Down | Key::Char('j') => self.scroll + 1,
            Key::PageUp => self.scroll.saturating_sub(page),
            Key::PageDown | Key::Char(' ') => self.scroll + page,
            Key::Home | Key::Char('g') => 0,
            Key::End | Key::Char('G') => max,
            _ => return Outcome::Ignored,
        };
        self.scroll = next.min(max);
        Outcome::Handled
    }

    /// Renders the visible part of the guide.
    pub fn view(&self, width: usize, height: usize, theme: &Theme) -> Vec<String> {
        let lines = Self::lines();
        let scroll = self.scroll.min(Self::max_scroll(height));
        let mut out: Vec<String> = lines
            .iter()
            .skip(scroll)
            .take(height)
            .map(|line| {
                let is_heading = line.starts_with("==") || line.starts_with("--");
                let ink = if is_heading { Ink::Muted } else { Ink::Text };
                pad_to(&theme.paint(line, ink), width)
            })
            .collect();
        out.resize_with(height, || " ".repeat(width));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_mentions_both_tabs_and_test_cases() {
        let text = HelpPage::lines().join("\n");
        assert!(text.contains("1) Transform Curves"));
        assert!(text.contains("2) Parametric Motion"));
        assert!(text.contains("Hyperbola branch flip"));
        assert!(text.contains("omega=2.5"));
    }

    #[test]
    fn scrolling_is_bounded() {
        let mut page = HelpPage::new();
        assert_eq!(page.handle_key(Key::Up, 10), Outcome::Handled);
        assert_eq!(page.scroll(), 0);

        page.handle_key(Key::End, 10);
        let max = HelpPage::lines().len() - 10;
        assert_eq!(page.scroll(), max);
        page.handle_key(Key::Down, 10);
        assert_eq!(page.scroll(), max);

        page.handle_key(Key::Home, 10);
        page.handle_key(Key::PageDown, 10);
        assert_eq!(page.scroll(), 9);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut page = HelpPage::new();
        assert_eq!(page.handle_key(Key::Char('z'), 10), Outcome::Ignored);
    }

    #[test]
    fn view_fills_area() {
        let page = HelpPage::new();
        let lines = page.view(80, 5, &Theme::plain());
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Curved Motion Visualizer"));

        let tall = page.view(80, 500, &Theme::plain());
        assert_eq!(tall.len(), 500);
    }
}
