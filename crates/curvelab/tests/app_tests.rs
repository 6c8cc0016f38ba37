//! Integration tests driving the whole app through the [`Simulator`].

use std::f64::consts::TAU;
use std::time::Duration;

use conics::PathKind;
use curvelab::app::App;
use curvelab::config::Config;
use curvelab::key::Key;
use curvelab::pages::{Page, Status, motion, transform};
use curvelab::program::Simulator;
use curvelab::theme::{Theme, strip_ansi};

fn sim_with(config: &Config) -> Simulator<App> {
    let mut sim = Simulator::new(App::new(config, Theme::plain()));
    sim.init();
    sim
}

fn sim() -> Simulator<App> {
    sim_with(&Config::default())
}

/// Moves focus down `rows` rows, clears the field and types `text`.
fn set_field(sim: &mut Simulator<App>, rows: usize, text: &str) {
    for _ in 0..rows {
        sim.press(Key::Down);
    }
    sim.press(Key::CtrlU);
    sim.type_text(text);
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Transform tab
// =============================================================================

mod transform_tab {
    use super::*;

    #[test]
    fn default_range_sets_square_limits() {
        let sim = sim();
        let figure = sim.model().transform().figure().unwrap();
        assert_eq!(figure.x_limits.min(), -6.0);
        assert_eq!(figure.x_limits.max(), 6.0);
        assert_eq!(figure.y_limits.min(), -6.0);
        assert_eq!(figure.y_limits.max(), 6.0);
        assert_eq!(sim.model().transform().status(), Status::Rendered);
    }

    #[test]
    fn ellipse_translation_case() {
        let mut sim = sim();
        set_field(&mut sim, 1, "3");
        set_field(&mut sim, 1, "-2");
        set_field(&mut sim, 1, "4");
        set_field(&mut sim, 1, "2");
        set_field(&mut sim, 2, "-8");
        set_field(&mut sim, 1, "8");
        sim.press(Key::Enter);

        assert!(sim.model().banner().is_none());
        let figure = sim.model().transform().figure().unwrap();
        assert_eq!(figure.x_limits.min(), -8.0);
        let transformed = &figure.series[1];
        assert_eq!(transformed.label, "transformed");
        for p in &transformed.points {
            let u = (p.x - 3.0) / 4.0;
            let v = (p.y + 2.0) / 2.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-9, "{p:?} is off the ellipse");
        }
    }

    #[test]
    fn empty_range_keeps_previous_figure() {
        let mut sim = sim();
        let before = sim.model().transform().figure().cloned();

        set_field(&mut sim, 6, "5");
        set_field(&mut sim, 1, "2");
        sim.press(Key::Enter);

        let banner = sim.model().banner().expect("error box open");
        assert_eq!(banner.title, transform::ERROR_TITLE);
        assert!(banner.message.contains("range min must be less than range max"));
        assert_eq!(sim.model().transform().figure().cloned(), before);
        assert_eq!(sim.model().transform().status(), Status::Error);

        let view = strip_ansi(&sim.view());
        assert!(view.contains("Transform Render Error"));

        // Dismissing consumes the key.
        sim.press(Key::Enter);
        assert!(sim.model().banner().is_none());
        assert_eq!(sim.model().transform().status(), Status::Error);
        assert!(strip_ansi(&sim.view()).contains("Status: Error."));
    }

    #[test]
    fn not_a_number_is_reported() {
        let mut sim = sim();
        set_field(&mut sim, 3, "-");
        sim.press(Key::Char('r'));
        let banner = sim.model().banner().unwrap();
        assert!(banner.message.contains("must be a number"), "{}", banner.message);
    }
}

// =============================================================================
// Motion tab
// =============================================================================

mod motion_tab {
    use super::*;

    fn on_motion(config: &Config) -> Simulator<App> {
        let mut sim = sim_with(config);
        sim.press(Key::Tab);
        assert_eq!(sim.model().page(), Page::Motion);
        sim
    }

    #[test]
    fn start_schedules_ticks_until_stopped() {
        let mut sim = on_motion(&Config::default());
        assert_eq!(sim.pending_tick(), None);

        sim.press(Key::Char('s'));
        assert_eq!(sim.pending_tick(), Some(Duration::from_millis(30)));
        assert!(approx(sim.model().motion().t(), 0.03));

        for _ in 0..9 {
            assert!(sim.fire_tick());
        }
        assert!((sim.model().motion().t() - 0.30).abs() < 1e-9);
        assert!(strip_ansi(&sim.view()).contains("t=0.30"));

        sim.press(Key::Char('x'));
        assert_eq!(sim.pending_tick(), None);
        assert!(!sim.fire_tick());
        assert_eq!(sim.model().motion().status(), Status::Stopped);
    }

    #[test]
    fn double_start_keeps_one_tick_chain() {
        let mut sim = on_motion(&Config::default());
        sim.press(Key::Char('s'));
        let t = sim.model().motion().t();
        sim.press(Key::Char('s'));
        assert_eq!(sim.model().motion().t(), t);
        assert!(sim.pending_tick().is_some());
    }

    #[test]
    fn ellipse_time_wraps_at_period() {
        let mut config = Config::default();
        config.motion.dt = 1.0;
        let mut sim = on_motion(&config);

        sim.press(Key::Char('s'));
        for _ in 0..6 {
            sim.fire_tick();
        }
        let t = sim.model().motion().t();
        assert!(t < TAU);
        assert!((t - (7.0 - TAU)).abs() < 1e-9, "t = {t}");
    }

    #[test]
    fn parabola_time_restarts() {
        let mut config = Config::default();
        config.motion.path = PathKind::Parabola;
        config.motion.dt = 1.0;
        let mut sim = on_motion(&config);

        sim.press(Key::Char('s'));
        let mut seen = vec![sim.model().motion().t()];
        for _ in 0..3 {
            sim.fire_tick();
            seen.push(sim.model().motion().t());
        }
        assert_eq!(seen, vec![1.0, 2.0, 3.0, -3.0]);
    }

    #[test]
    fn bad_input_while_animating_halts() {
        let mut sim = on_motion(&Config::default());
        sim.press(Key::Char('s'));
        set_field(&mut sim, 5, "e");
        assert!(sim.fire_tick());

        let banner = sim.model().banner().unwrap();
        assert_eq!(banner.title, motion::ERROR_TITLE);
        assert!(!sim.model().motion().is_animating());
        assert_eq!(sim.pending_tick(), None);
    }

    #[test]
    fn animation_continues_on_other_tabs() {
        let mut sim = on_motion(&Config::default());
        sim.press(Key::Char('s'));
        sim.press(Key::Tab);
        assert_eq!(sim.model().page(), Page::Help);
        assert!(sim.fire_tick());
        assert!(approx(sim.model().motion().t(), 0.06));
    }

    #[test]
    fn home_rewinds() {
        let mut sim = on_motion(&Config::default());
        sim.press(Key::Char('s'));
        sim.fire_tick();
        sim.press(Key::Char('x'));
        sim.press(Key::Home);
        assert_eq!(sim.model().motion().t(), 0.0);
        assert!(strip_ansi(&sim.view()).contains("t=0.00   speed=2.000"));
    }
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn every_tab_fills_the_terminal() {
    let mut sim = sim();
    sim.send(curvelab::program::Msg::Resize {
        width: 120,
        height: 40,
    });
    for _ in Page::ALL {
        let view = sim.view();
        assert_eq!(view.lines().count(), 40);
        sim.press(Key::Tab);
    }
}
