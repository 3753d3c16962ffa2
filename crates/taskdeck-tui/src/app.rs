//! Picker state and event loop.
//!
//! The ranked result list is recomputed from the engine on every
//! keystroke; the picker itself holds only the query text and the
//! selection index.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use taskdeck_core::constants::RECOMMENDATIONS_COUNT;
use taskdeck_core::task::Task;
use taskdeck_engine::TaskService;

/// Run the full-screen picker and return the chosen task, if any.
pub fn pick(service: &TaskService, invoked_from: &str) -> std::io::Result<Option<Task>> {
    let mut terminal = ratatui::init();
    let result = App::new(service, invoked_from).run(&mut terminal);
    ratatui::restore();
    result
}

/// What a key press decided.
enum Flow {
    Continue,
    Cancel,
    Accept(Task),
}

pub(crate) struct App<'a> {
    service: &'a TaskService,
    invoked_from: String,
    pub(crate) query: String,
    pub(crate) selected: usize,
}

impl<'a> App<'a> {
    pub(crate) fn new(service: &'a TaskService, invoked_from: &str) -> Self {
        Self {
            service,
            invoked_from: invoked_from.to_string(),
            query: String::new(),
            selected: 0,
        }
    }

    /// Ranked results for the current query.
    pub(crate) fn results(&self) -> Vec<&'a Task> {
        self.service.search(&self.query)
    }

    /// Tasks recently run from the invoking directory.
    pub(crate) fn recommendations(&self) -> Vec<&'a Task> {
        self.service
            .recommendations(&self.invoked_from, RECOMMENDATIONS_COUNT)
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> std::io::Result<Option<Task>> {
        loop {
            let results = self.results();
            self.clamp_selection(results.len());
            terminal.draw(|frame| crate::ui::draw(frame, &self, &results))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.handle_key(key, &results) {
                    Flow::Continue => {}
                    Flow::Cancel => return Ok(None),
                    Flow::Accept(task) => return Ok(Some(task)),
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, results: &[&Task]) -> Flow {
        match key.code {
            KeyCode::Esc => Flow::Cancel,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Cancel,
            KeyCode::Enter => match results.get(self.selected) {
                Some(task) => Flow::Accept((*task).clone()),
                None => Flow::Continue,
            },
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Flow::Continue
            }
            KeyCode::Down => {
                if self.selected + 1 < results.len() {
                    self.selected += 1;
                }
                Flow::Continue
            }
            KeyCode::Backspace => {
                let _ = self.query.pop();
                self.selected = 0;
                Flow::Continue
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.selected = 0;
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
