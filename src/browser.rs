use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    DefaultTerminal, Frame,
};

use crate::error::Result;
use crate::exporter::write_export;
use crate::importer::load_display_file;
use crate::table::DisplayTable;
use crate::tui::{self, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE, WARNING_STYLE};
use crate::validator::validate;

const PAGE_SIZE: usize = 20;

enum BrowseMode {
    Normal,
    Search,
    ImportPath(String),
    ExportPath(String),
    ConfirmExit,
    /// Full validation summary in a scrollable popup.
    Issues { text: String, scroll: u16 },
}

#[derive(Debug, PartialEq)]
pub enum BrowseAction {
    Continue,
    Close,
    Validate,
    Import(PathBuf),
    Export(PathBuf),
}

/// Interactive view over one display table with live search.
pub struct TableBrowser<'a> {
    table: &'a mut DisplayTable,
    search_enabled: bool,
    query: String,
    offset: usize,
    visible_count: usize,
    selected: usize,
    mode: BrowseMode,
    status_message: Option<String>,
    table_state: TableState,
}

impl<'a> TableBrowser<'a> {
    pub fn new(table: &'a mut DisplayTable, search_enabled: bool) -> Self {
        Self {
            table,
            search_enabled,
            query: String::new(),
            offset: 0,
            visible_count: PAGE_SIZE,
            selected: 0,
            mode: BrowseMode::Normal,
            status_message: None,
            table_state: TableState::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        tui::with_terminal(|terminal| self.event_loop(terminal))
    }

    fn visible(&self) -> Vec<usize> {
        self.table.visible_rows()
    }

    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Fill(1),   // table
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(frame.area());
        let (title_area, table_area, status_area, keys_area) = (areas[0], areas[1], areas[2], areas[3]);

        frame.render_widget(
            Paragraph::new(self.table.kind().label()).style(HEADER_STYLE),
            title_area,
        );

        let header_overhead = 2u16;
        let available = table_area.height.saturating_sub(header_overhead) as usize;
        self.visible_count = available.max(1);

        let visible = self.visible();
        let rendered: Vec<Row> = visible
            .iter()
            .skip(self.offset)
            .take(self.visible_count)
            .map(|&idx| {
                let cells: Vec<Cell> = (0..self.table.column_count())
                    .map(|col| Cell::from(self.table.cell(idx, col).unwrap_or("").to_string()))
                    .collect();
                Row::new(cells)
            })
            .collect();

        let widths: Vec<Constraint> = self
            .table
            .headers()
            .iter()
            .map(|_| Constraint::Fill(1))
            .collect();
        self.table_state.select(Some(self.selected));
        let widget = Table::new(rendered, widths)
            .header(Row::new(self.table.headers().to_vec()).style(HEADER_STYLE).bottom_margin(1))
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(widget, table_area, &mut self.table_state);

        let shown_from = if visible.is_empty() { 0 } else { self.offset + 1 };
        let shown_to = (self.offset + self.visible_count).min(visible.len());
        let mut status = format!(
            "Rows {shown_from}-{shown_to} of {} ({} total)",
            visible.len(),
            self.table.row_count()
        );
        if !self.query.is_empty() {
            status.push_str(&format!(" | search: {}", self.query));
        }
        if let Some(ref msg) = self.status_message {
            status.push_str(&format!(" | {msg}"));
        }
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        let keys_widget = match &self.mode {
            BrowseMode::Normal => Paragraph::new(
                "\u{2191}/\u{2193}:select  n/p:page  /:search  v:validate  i:import  x:export  q:quit",
            )
            .style(FOOTER_STYLE),
            BrowseMode::Search => Paragraph::new(format!("Search: {}\u{2588}", self.query)),
            BrowseMode::ImportPath(input) => Paragraph::new(format!("Import file: {input}\u{2588}")),
            BrowseMode::ExportPath(input) => {
                Paragraph::new(format!("Export to (.xlsx/.csv): {input}\u{2588}"))
            }
            BrowseMode::ConfirmExit => {
                Paragraph::new("Are you sure you want to exit? (y/n)").style(WARNING_STYLE)
            }
            BrowseMode::Issues { .. } => {
                Paragraph::new("\u{2191}/\u{2193}:scroll  Esc/Enter:close").style(FOOTER_STYLE)
            }
        };
        frame.render_widget(keys_widget, keys_area);

        if let BrowseMode::Issues { text, scroll } = &self.mode {
            let area = frame.area();
            let width = area.width.saturating_sub(8).max(20).min(area.width);
            let height = area.height.saturating_sub(6).max(5).min(area.height);
            let popup = Rect::new(
                area.x + (area.width - width) / 2,
                area.y + (area.height - height) / 2,
                width,
                height,
            );
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(WARNING_STYLE)
                .title(" Validation ");
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(text.as_str()).block(block).scroll((*scroll, 0)),
                popup,
            );
        }
    }

    /// Handle a key event. Returns a BrowseAction indicating what the caller should do.
    pub fn handle_key_event(&mut self, code: KeyCode) -> BrowseAction {
        match &mut self.mode {
            BrowseMode::Normal => {
                self.status_message = None;
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.mode = BrowseMode::ConfirmExit,
                    KeyCode::Down => self.select_down(),
                    KeyCode::Up => self.select_up(),
                    KeyCode::Char('n') | KeyCode::PageDown => {
                        self.scroll_down();
                        self.selected = 0;
                    }
                    KeyCode::Char('p') | KeyCode::PageUp => {
                        self.offset = self.offset.saturating_sub(self.visible_count);
                        self.selected = 0;
                    }
                    KeyCode::Home => {
                        self.offset = 0;
                        self.selected = 0;
                    }
                    KeyCode::Char('/') => {
                        if self.search_enabled {
                            self.mode = BrowseMode::Search;
                        } else {
                            self.status_message = Some("Search is disabled in settings".to_string());
                        }
                    }
                    KeyCode::Char('v') => return BrowseAction::Validate,
                    KeyCode::Char('i') => self.mode = BrowseMode::ImportPath(String::new()),
                    KeyCode::Char('x') => self.mode = BrowseMode::ExportPath(String::new()),
                    _ => {}
                }
            }
            BrowseMode::Search => match code {
                KeyCode::Esc => {
                    self.mode = BrowseMode::Normal;
                    self.set_query(String::new());
                }
                KeyCode::Enter => self.mode = BrowseMode::Normal,
                KeyCode::Backspace => {
                    let mut q = self.query.clone();
                    q.pop();
                    self.set_query(q);
                }
                KeyCode::Char(c) => {
                    let q = format!("{}{c}", self.query);
                    self.set_query(q);
                }
                _ => {}
            },
            BrowseMode::ImportPath(input) | BrowseMode::ExportPath(input) => match code {
                KeyCode::Esc => self.mode = BrowseMode::Normal,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                KeyCode::Enter => {
                    let path = PathBuf::from(input.trim());
                    let mode = std::mem::replace(&mut self.mode, BrowseMode::Normal);
                    if path.as_os_str().is_empty() {
                        return BrowseAction::Continue;
                    }
                    return match mode {
                        BrowseMode::ImportPath(_) => BrowseAction::Import(path),
                        _ => BrowseAction::Export(path),
                    };
                }
                _ => {}
            },
            BrowseMode::Issues { text, scroll } => match code {
                KeyCode::Down => {
                    let last = text.lines().count().saturating_sub(1) as u16;
                    *scroll = (*scroll + 1).min(last);
                }
                KeyCode::Up => *scroll = scroll.saturating_sub(1),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.mode = BrowseMode::Normal,
                _ => {}
            },
            BrowseMode::ConfirmExit => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return BrowseAction::Close,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = BrowseMode::Normal
                }
                _ => {}
            },
        }
        BrowseAction::Continue
    }

    /// Update the search query and re-filter the whole table.
    fn set_query(&mut self, query: String) {
        self.table.apply_filter(&query);
        self.query = query;
        self.offset = 0;
        self.selected = 0;
    }

    fn select_down(&mut self) {
        let len = self.visible().len();
        if self.selected + 1 < self.visible_count.min(len.saturating_sub(self.offset)) {
            self.selected += 1;
        } else if self.offset + self.visible_count < len {
            self.offset += 1;
        }
    }

    fn select_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else if self.offset > 0 {
            self.offset -= 1;
        }
    }

    fn scroll_down(&mut self) {
        let new_offset = self.offset + self.visible_count;
        if new_offset < self.visible().len() {
            self.offset = new_offset;
        }
    }

    /// Carry out an action that touches the table or the filesystem. Failures
    /// land in the status line; the browser keeps running.
    pub fn perform(&mut self, action: &BrowseAction) {
        let message = match action {
            BrowseAction::Validate => {
                let report = validate(&*self.table);
                if report.is_clean() {
                    report.summary()
                } else {
                    self.mode = BrowseMode::Issues {
                        text: report.summary(),
                        scroll: 0,
                    };
                    format!("{} issue(s) found", report.issues.len())
                }
            }
            BrowseAction::Import(path) => match load_display_file(self.table, path) {
                Ok(count) => {
                    let q = self.query.clone();
                    self.set_query(q);
                    format!("Imported {count} rows from {}", path.display())
                }
                Err(e) => format!("Import failed: {e}"),
            },
            BrowseAction::Export(path) => match write_export(&*self.table, path) {
                Ok(count) => format!("Exported {count} rows to {}", path.display()),
                Err(e) => format!("Export failed: {e}"),
            },
            BrowseAction::Continue | BrowseAction::Close => return,
        };
        self.status_message = Some(message);
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw_frame(frame))?;

            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            {
                if kind != KeyEventKind::Press {
                    continue;
                }
                if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                    break;
                }
                match self.handle_key_event(code) {
                    BrowseAction::Close => break,
                    BrowseAction::Continue => {}
                    action => self.perform(&action),
                }
            }
        }
        Ok(())
    }
}
