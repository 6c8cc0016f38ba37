//! The application model.
//!
//! [`App`] owns the three tabs, routes keys to the active one, forwards
//! ticks to the motion tab and draws the header, footer and error box.

use tracing::{debug, info};

use crate::config::Config;
use crate::key::Key;
use crate::pages::{Banner, HelpPage, MotionPage, Outcome, Page, TransformPage, motion, transform};
use crate::program::{Cmd, Model, Msg};
use crate::theme::{Ink, Theme, layout, pad_to, visible_width};

/// Window title shown in the header.
pub const APP_TITLE: &str = "Curved Motion Visualizer";

const TRANSFORM_HINTS: &str = "↑↓ field  ←→ adjust  enter render  tab page  ? help  q quit";
const MOTION_HINTS: &str =
    "s start  x stop  home rewind  ↑↓ field  ←→ adjust  enter render  q quit";
const HELP_HINTS: &str = "↑↓ scroll  pgup/pgdn page  tab page  q quit";

/// Size assumed until the terminal reports one.
const DEFAULT_SIZE: (u16, u16) = (100, 32);

/// The visualizer.
#[derive(Debug, Clone)]
pub struct App {
    page: Page,
    transform: TransformPage,
    motion: MotionPage,
    help: HelpPage,
    banner: Option<Banner>,
    theme: Theme,
    width: u16,
    height: u16,
}

impl App {
    /// Builds the tabs from a resolved configuration.
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            page: config.ui.page,
            transform: TransformPage::new(&config.transform),
            motion: MotionPage::new(&config.motion),
            help: HelpPage::new(),
            banner: None,
            theme,
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
        }
    }

    /// Active tab.
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Switches tabs.
    pub fn set_page(&mut self, page: Page) {
        debug!(?page, "page switched");
        self.page = page;
    }

    /// The transform tab.
    pub const fn transform(&self) -> &TransformPage {
        &self.transform
    }

    /// The motion tab.
    pub const fn motion(&self) -> &MotionPage {
        &self.motion
    }

    /// The help tab.
    pub const fn help(&self) -> &HelpPage {
        &self.help
    }

    /// The error box, if one is open.
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Terminal size in use.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn body_height(&self) -> usize {
        usize::from(self.height).saturating_sub(layout::HEADER_HEIGHT + layout::FOOTER_HEIGHT)
    }

    fn settle(&mut self, outcome: Outcome) -> Option<Cmd> {
        match outcome {
            Outcome::Ignored | Outcome::Handled => None,
            Outcome::Command(cmd) => Some(cmd),
            Outcome::Failed(banner) => {
                self.banner = Some(banner);
                None
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Cmd> {
        if key == Key::CtrlC {
            return Some(Cmd::Quit);
        }
        // The key that closes the error box does nothing else.
        if self.banner.take().is_some() {
            return None;
        }

        match key {
            Key::Char('q') => return Some(Cmd::Quit),
            Key::Tab => {
                self.set_page(self.page.next());
                return None;
            }
            Key::BackTab => {
                self.set_page(self.page.prev());
                return None;
            }
            Key::Char('?') => {
                self.set_page(Page::Help);
                return None;
            }
            _ => {}
        }

        let outcome = match self.page {
            Page::Transform => self.transform.handle_key(key),
            Page::Motion => self.motion.handle_key(key),
            Page::Help => {
                let height = self.body_height();
                self.help.handle_key(key, height)
            }
        };
        self.settle(outcome)
    }

    fn header(&self, width: usize) -> Vec<String> {
        let title = self.theme.strong(APP_TITLE, Ink::Accent);
        let tabs: Vec<String> = Page::ALL
            .iter()
            .map(|&page| {
                let label = format!(" {} ", page.title());
                if page == self.page {
                    self.theme.highlight(&label)
                } else {
                    self.theme.paint(&label, Ink::Muted)
                }
            })
            .collect();
        vec![
            pad_to(&format!(" {title}"), width),
            pad_to(&tabs.join("│"), width),
        ]
    }

    fn footer(&self, width: usize) -> String {
        let hints = match self.page {
            Page::Transform => TRANSFORM_HINTS,
            Page::Motion => MOTION_HINTS,
            Page::Help => HELP_HINTS,
        };
        pad_to(&self.theme.paint(hints, Ink::Muted), width)
    }

    fn overlay_banner(&self, body: &mut [String], width: usize) {
        let Some(banner) = &self.banner else { return };
        let hint = "press any key to continue";
        let inner = [banner.title.len() + 4, visible_width(&banner.message) + 2, hint.len() + 2, 30]
            .into_iter()
            .max()
            .unwrap_or(30)
            .min(width.saturating_sub(4));
        if inner < 10 || body.len() < 6 {
            return;
        }

        let title = format!("─ {} ", banner.title);
        let fill = inner.saturating_sub(title.chars().count());
        let top = format!("┌{title}{}┐", "─".repeat(fill));
        let row = |text: &str| format!("│{}│", pad_to(&format!(" {text}"), inner));
        let boxed = [
            self.theme.strong(&top, Ink::Error),
            row(&self.theme.paint(&banner.message, Ink::Error)),
            row(""),
            row(&self.theme.paint(hint, Ink::Muted)),
            self.theme.strong(&format!("└{}┘", "─".repeat(inner)), Ink::Error),
        ];

        let left = (width.saturating_sub(inner + 2)) / 2;
        let start = (body.len() - boxed.len()) / 2;
        for (offset, line) in boxed.iter().enumerate() {
            body[start + offset] = pad_to(&format!("{}{line}", " ".repeat(left)), width);
        }
    }
}

impl Model for App {
    fn init(&mut self) -> Option<Cmd> {
        info!(page = ?self.page, "visualizer starting");
        if let Err(err) = self.transform.render_transform() {
            self.banner = Some(Banner::new(transform::ERROR_TITLE, &err));
        }
        if let Err(err) = self.motion.render_motion() {
            self.banner = Some(Banner::new(motion::ERROR_TITLE, &err));
        }
        None
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::Resize { width, height } => {
                self.width = width;
                self.height = height;
                None
            }
            Msg::Tick => {
                let outcome = self.motion.on_tick();
                self.settle(outcome)
            }
            Msg::Key(key) => self.on_key(key),
        }
    }

    fn view(&self) -> String {
        let width = usize::from(self.width);
        let height = self.body_height();

        let mut body = match self.page {
            Page::Transform => self.transform.view(width, height, &self.theme),
            Page::Motion => self.motion.view(width, height, &self.theme),
            Page::Help => self.help.view(width, height, &self.theme),
        };
        self.overlay_banner(&mut body, width);

        let mut lines = self.header(width);
        lines.extend(body);
        lines.push(self.footer(width));
        lines.join("\n")
    }
}
