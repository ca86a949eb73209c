//! The view controller bridging user intents and the slide state machine.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! navigates. `AppState` owns the loaded outline, the one live [`Slide`] and the presentation
//! flags derived from it. Intents arrive one at a time; each either replaces the slide and
//! re-projects it, or leaves everything as it was.
//!
//! ```text
//! key ─► Intent ─► on_next / on_prev / on_up / ... ─► Slide::next ... ─► Slide::show
//!                  on_jump(path)                   ─► Slide::jump    ─► Slide::show
//! click ─► Expander ─► on_expand / on_collapse     ─► Presentation (lists only)
//! ```

use crate::error::SlideResult;
use crate::outline::Outline;
use crate::path::SectionPath;
use crate::presentation::{Expander, Presentation};
use crate::section::NodeId;
use crate::slide::Slide;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// The focused slide.
    Slides,
    /// Section number prompt opened by the jump key.
    Jump,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Closed set of things the user can ask for from the slide view.
pub enum Intent {
    /// Reveal the next list item, or advance depth-first.
    Next,
    /// Step back to the previous sibling or the parent.
    Prev,
    /// Go to the parent section.
    Up,
    /// Go to the first child section.
    Down,
    /// Go to the previous sibling.
    Left,
    /// Go to the next sibling.
    Right,
    /// Open the jump prompt.
    Jump,
    /// Present the next document.
    NextDocument,
    /// Present the previous document.
    PrevDocument,
    /// Leave the presenter.
    Quit,
}

impl Intent {
    #[must_use]
    /// Maps a key press in the slide view to an intent.
    pub fn from_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Self> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(code, KeyCode::Char('c')).then_some(Self::Quit);
        }
        match code {
            KeyCode::Char('n' | ' ') | KeyCode::Enter | KeyCode::PageDown => Some(Self::Next),
            KeyCode::Char('p') | KeyCode::Backspace | KeyCode::PageUp => Some(Self::Prev),
            KeyCode::Up | KeyCode::Char('k') => Some(Self::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::Down),
            KeyCode::Left | KeyCode::Char('h') => Some(Self::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Self::Right),
            KeyCode::Char('s' | 'g') => Some(Self::Jump),
            KeyCode::Tab => Some(Self::NextDocument),
            KeyCode::BackTab => Some(Self::PrevDocument),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Screen cell range where an expander was drawn, used to resolve mouse clicks.
pub struct ClickTarget {
    /// Terminal row.
    pub row: u16,
    /// First column covered.
    pub col_start: u16,
    /// Column just past the target.
    pub col_end: u16,
    /// Expander drawn there.
    pub expander: Expander,
}

#[derive(Serialize)]
/// Final position printed when the presenter exits.
pub struct SessionReport {
    /// Document being presented.
    pub file: String,
    /// Section number of the focused slide, absent at the document root.
    pub section: Option<SectionPath>,
    /// Heading of the focused slide.
    pub title: String,
    /// Depth of the focused slide.
    pub level: usize,
}

/// Owns the live slide and everything drawn from it.
pub struct AppState {
    /// Documents given on the command line.
    pub files: Vec<PathBuf>,
    /// Document currently presented.
    pub current_file_index: usize,
    /// Tree of the current document.
    pub outline: Outline,
    /// The one live slide. Replaced on every successful move, never mutated.
    pub slide: Slide,
    /// Visibility flags derived from `slide`.
    pub presentation: Presentation,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Section number typed into the jump prompt.
    pub jump_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Whether the document title banner is still up.
    pub title_visible: bool,
    /// Maximum line width for slide text.
    pub wrap_width: usize,
    /// Expanders drawn in the last frame.
    pub click_targets: Vec<ClickTarget>,
    /// Revealed list content that can be folded back, drawn in the last frame.
    pub collapse_targets: Vec<ClickTarget>,
}

impl AppState {
    #[must_use]
    /// Starts presenting `outline`, the document at `files[0]`, from its root.
    pub fn new(files: Vec<PathBuf>, outline: Outline, wrap_width: usize) -> Self {
        let slide = Slide::root(&outline);
        let mut presentation = Presentation::new(&outline);
        slide.show(&outline, &mut presentation);

        Self {
            files,
            current_file_index: 0,
            outline,
            slide,
            presentation,
            current_view: View::Slides,
            jump_buffer: String::new(),
            message: None,
            title_visible: true,
            wrap_width,
            click_targets: Vec::new(),
            collapse_targets: Vec::new(),
        }
    }

    /// Swaps in another document and restarts from its root.
    pub fn open_document(&mut self, index: usize, outline: Outline) {
        self.current_file_index = index;
        self.slide = Slide::root(&outline);
        self.presentation = Presentation::new(&outline);
        self.outline = outline;
        self.slide.show(&self.outline, &mut self.presentation);
        self.title_visible = true;
        self.message = None;
        self.click_targets.clear();
        self.collapse_targets.clear();
    }

    /// Replaces the slide with the outcome of `movement`, or stays put if it fails.
    fn apply<F>(&mut self, movement: F) -> bool
    where
        F: FnOnce(&Slide, &Outline) -> SlideResult<Slide>,
    {
        match movement(&self.slide, &self.outline) {
            Ok(slide) => {
                self.slide = slide;
                self.slide.show(&self.outline, &mut self.presentation);
                self.message = None;
                true
            }
            Err(e) => {
                log::debug!("staying on {}: {e}", self.slide.current());
                false
            }
        }
    }

    /// Reveals the first pending list item of the slide, or advances depth-first.
    pub fn on_next(&mut self) -> bool {
        self.title_visible = false;

        if let Some(expander) = self
            .presentation
            .first_expander(&self.outline, self.slide.current())
        {
            return self.presentation.expand(&self.outline, expander);
        }

        self.apply(|slide, outline| slide.next(outline))
    }

    /// Steps back to the previous sibling or the parent.
    pub fn on_prev(&mut self) -> bool {
        self.apply(|slide, outline| slide.prev(outline))
    }

    /// Moves to the parent section.
    pub fn on_up(&mut self) -> bool {
        self.apply(|slide, outline| slide.up(outline))
    }

    /// Moves to the first child section.
    pub fn on_down(&mut self) -> bool {
        self.apply(|slide, outline| slide.down(outline))
    }

    /// Moves to the previous sibling.
    pub fn on_left(&mut self) -> bool {
        self.apply(|slide, outline| slide.left(outline))
    }

    /// Moves to the next sibling.
    pub fn on_right(&mut self) -> bool {
        self.apply(|slide, outline| slide.right(outline))
    }

    /// Jumps to the section numbered by `input`. Failures are reported in the status bar and
    /// leave the current slide in place.
    pub fn on_jump(&mut self, input: &str) -> bool {
        match Slide::jump(&self.outline, input) {
            Ok(slide) => {
                self.slide = slide;
                self.slide.show(&self.outline, &mut self.presentation);
                self.message = None;
                true
            }
            Err(e) => {
                log::info!("jump to {input:?} failed: {e}");
                self.message = Some(e.to_string());
                false
            }
        }
    }

    /// Triggers an expander drawn on the current slide. Never moves the slide.
    pub fn on_expand(&mut self, expander: Expander) -> bool {
        if !self.owns(expander) {
            return false;
        }
        self.presentation.expand(&self.outline, expander)
    }

    /// Folds back what an expander revealed on the current slide. Never moves the slide.
    pub fn on_collapse(&mut self, expander: Expander) -> bool {
        if !self.owns(expander) {
            return false;
        }
        self.presentation.collapse(&self.outline, expander)
    }

    fn owns(&self, expander: Expander) -> bool {
        self.outline
            .item(expander.item)
            .is_some_and(|item| item.node == self.slide.current())
    }

    #[must_use]
    /// Expander drawn at a terminal cell in the last frame.
    pub fn expander_at(&self, column: u16, row: u16) -> Option<Expander> {
        hit(&self.click_targets, column, row)
    }

    #[must_use]
    /// Foldable list content drawn at a terminal cell in the last frame.
    pub fn collapser_at(&self, column: u16, row: u16) -> Option<Expander> {
        hit(&self.collapse_targets, column, row)
    }

    /// Opens the jump prompt.
    pub fn start_jump(&mut self) {
        self.current_view = View::Jump;
        self.jump_buffer.clear();
        self.message = None;
    }

    /// Closes the jump prompt without moving.
    pub fn cancel_jump(&mut self) {
        self.current_view = View::Slides;
        self.jump_buffer.clear();
    }

    /// Closes the jump prompt and jumps to the typed section.
    pub fn submit_jump(&mut self) -> bool {
        let input = std::mem::take(&mut self.jump_buffer);
        self.current_view = View::Slides;
        self.on_jump(&input)
    }

    /// Handles a key press while the jump prompt is open. Returns `true` when the key asks to
    /// quit the presenter.
    pub fn on_prompt_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(code, KeyCode::Char('c'));
        }
        match code {
            KeyCode::Char(c) => self.jump_buffer.push(c),
            KeyCode::Backspace => {
                self.jump_buffer.pop();
            }
            KeyCode::Enter => {
                self.submit_jump();
            }
            KeyCode::Esc => self.cancel_jump(),
            _ => {}
        }
        false
    }

    /// Dispatches a slide-view intent. Document switching and quitting are left to the caller,
    /// which owns file loading and the terminal.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Next => {
                self.on_next();
            }
            Intent::Prev => {
                self.on_prev();
            }
            Intent::Up => {
                self.on_up();
            }
            Intent::Down => {
                self.on_down();
            }
            Intent::Left => {
                self.on_left();
            }
            Intent::Right => {
                self.on_right();
            }
            Intent::Jump => self.start_jump(),
            Intent::NextDocument | Intent::PrevDocument | Intent::Quit => {}
        }
    }

    #[must_use]
    /// Index of the adjacent document, wrapping around; `None` with a single file.
    pub fn neighbour_document(&self, forward: bool) -> Option<usize> {
        let count = self.files.len();
        if count < 2 {
            return None;
        }
        Some(if forward {
            (self.current_file_index + 1) % count
        } else {
            (self.current_file_index + count - 1) % count
        })
    }

    #[must_use]
    /// Headings from the root down to the focused slide.
    pub fn breadcrumb(&self) -> Vec<(NodeId, String)> {
        self.slide
            .chain(&self.outline)
            .into_iter()
            .filter_map(|id| self.outline.get(id).map(|s| (id, s.title.clone())))
            .collect()
    }

    #[must_use]
    /// Snapshot of the current position for the exit report.
    pub fn report(&self) -> SessionReport {
        let title = self
            .outline
            .get(self.slide.current())
            .map(|s| s.title.clone())
            .unwrap_or_default();

        SessionReport {
            file: self
                .files
                .get(self.current_file_index)
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            section: self.slide.path(&self.outline),
            title,
            level: self.slide.level(),
        }
    }
}

fn hit(targets: &[ClickTarget], column: u16, row: u16) -> Option<Expander> {
    targets
        .iter()
        .find(|t| t.row == row && (t.col_start..t.col_end).contains(&column))
        .map(|t| t.expander)
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
