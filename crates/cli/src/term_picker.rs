//! Terminal quick-pick built on ratatui.
//!
//! Renders the formatter entries as a selectable list: Enter picks, Esc
//! cancels, `e` reveals the contributing extension without closing the list.

use std::io;

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{prelude::*, widgets::*};
use sqltools_formatters::{PickItem, PickOutcome, QuickPick, RevealExtension};
use tracing::{info, warn};

const HINT: &str = "enter: format   e: reveal extension   esc: cancel";

/// Quick-pick that takes over the terminal for the duration of the pick.
pub struct TerminalQuickPick {
    title: String,
}

impl TerminalQuickPick {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

#[async_trait]
impl QuickPick for TerminalQuickPick {
    async fn pick(&self, items: Vec<PickItem>, reveal: &dyn RevealExtension) -> PickOutcome {
        if items.is_empty() {
            return PickOutcome::Cancelled;
        }
        match run_loop(&items, reveal, &self.title) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(error = %error, "terminal picker failed; treating as cancellation");
                PickOutcome::Cancelled
            }
        }
    }
}

fn run_loop(items: &[PickItem], reveal: &dyn RevealExtension, title: &str) -> io::Result<PickOutcome> {
    let mut terminal = ratatui::init();
    let mut state = ListState::default();
    state.select(Some(0));
    let mut footer = HINT.to_string();

    let outcome = loop {
        terminal.draw(|frame| render(frame, items, &mut state, title, &footer))?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => break PickOutcome::Cancelled,
            KeyCode::Enter => {
                if let Some(selected) = state.selected() {
                    break PickOutcome::Picked(items[selected].index);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = state.selected().unwrap_or(0);
                state.select(Some(selected.saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let selected = state.selected().unwrap_or(0);
                state.select(Some((selected + 1).min(items.len() - 1)));
            }
            KeyCode::Char('e') => {
                if let Some(selected) = state.selected() {
                    let extension_id = &items[selected].extension_id;
                    reveal.reveal(extension_id);
                    footer = format!("contributed by: {extension_id}");
                }
            }
            _ => {}
        }
    };

    ratatui::restore();
    Ok(outcome)
}

fn render(frame: &mut Frame, items: &[PickItem], state: &mut ListState, title: &str, footer: &str) {
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let entries: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let label = if item.label.is_empty() {
                item.extension_id.as_str()
            } else {
                item.label.as_str()
            };
            match &item.detail {
                Some(detail) => ListItem::new(format!("{label}  ({detail})")),
                None => ListItem::new(label.to_string()),
            }
        })
        .collect();
    let list = List::new(entries)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, state);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

/// Reveal sink for the terminal host: records the request in the log stream.
#[derive(Debug, Default)]
pub struct LogReveal;

impl RevealExtension for LogReveal {
    fn reveal(&self, extension_id: &str) {
        info!(extension_id, "formatter contributed by extension");
    }
}
