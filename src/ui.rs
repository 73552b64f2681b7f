use derive_setters::Setters;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState},
};
use tracing::trace;

use crate::model::Model;
use crate::table::{FilteredTable, TableRow};

pub const SEARCHBAR_HEIGHT: usize = 1;
pub const HEADER_LABEL_HEIGHT: usize = 1;
pub const TABLE_HEADER_HEIGHT: usize = 1;
pub const STATUSLINE_HEIGHT: usize = 1;
const SEARCHBAR_PROMPT: &str = "|>";

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct Styles {
    pub label: Style,
    pub header: Style,
    pub cell: Style,
    pub section: Style,
    pub highlight: Style,
    pub searchbar: Style,
    pub statusline: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            label: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            cell: Style::new().fg(Color::LightBlue),
            section: Style::new().fg(Color::White).add_modifier(Modifier::ITALIC),
            highlight: Style::new().add_modifier(Modifier::REVERSED),
            searchbar: Style::new().fg(Color::Yellow),
            statusline: Style::new().fg(Color::DarkGray),
        }
    }
}

impl Styles {
    pub fn monochrome() -> Self {
        Self::default()
            .with_label(Style::new().add_modifier(Modifier::BOLD))
            .with_header(Style::new().add_modifier(Modifier::BOLD))
            .with_cell(Style::new())
            .with_section(Style::new().add_modifier(Modifier::ITALIC))
            .with_searchbar(Style::new())
            .with_statusline(Style::new())
    }
}

#[derive(Debug, Default)]
pub struct TableUI {
    styles: Styles,
}

impl TableUI {
    pub fn new(styles: Styles) -> Self {
        Self { styles }
    }

    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let screen = model.screen();
        let mut constraints = Vec::with_capacity(4);
        if screen.search_visible {
            constraints.push(Constraint::Length(SEARCHBAR_HEIGHT as u16));
        }
        constraints.push(Constraint::Length(HEADER_LABEL_HEIGHT as u16));
        constraints.push(Constraint::Min(TABLE_HEADER_HEIGHT as u16));
        constraints.push(Constraint::Length(STATUSLINE_HEIGHT as u16));
        let areas = Layout::vertical(constraints).split(frame.area());

        let mut next = 0;
        if screen.search_visible {
            self.draw_searchbar(screen.search.get(), screen.search.curser_pos(), areas[0], frame);
            next = 1;
        }
        self.draw_label(&screen.table, areas[next], frame);
        self.draw_table(&screen.table, areas[next + 1], frame);
        self.draw_statusline(model.status_message(), areas[next + 2], frame);

        if model.show_help() {
            self.draw_help(model.help_text(), frame);
        }
    }

    fn draw_searchbar(&self, text: &str, curser_pos: usize, area: Rect, frame: &mut Frame) {
        let line = Line::from(vec![
            Span::styled(SEARCHBAR_PROMPT, self.styles.searchbar),
            Span::raw(text),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        let x = area.x + (SEARCHBAR_PROMPT.len() + curser_pos) as u16;
        frame.set_cursor_position((std::cmp::min(x, area.right().saturating_sub(1)), area.y));
    }

    fn draw_label(&self, table: &FilteredTable, area: Rect, frame: &mut Frame) {
        let label = Line::from(table.label()).style(self.styles.label).centered();
        frame.render_widget(Paragraph::new(label), area);
    }

    fn draw_table(&self, table: &FilteredTable, area: Rect, frame: &mut Frame) {
        let header = Row::new(table.headers().iter().map(|h| Cell::from(h.as_str())))
            .style(self.styles.header);

        let (rows, selected) = table.viewport();
        trace!("Draw {} rows, selected {:?}", rows.len(), selected);
        let rows = rows.iter().map(|row| match row {
            TableRow::Section(label) => {
                Row::new(vec![Cell::from(label.as_str())]).style(self.styles.section)
            }
            TableRow::Data(fields) => {
                Row::new(fields.iter().map(|f| Cell::from(f.as_str()))).style(self.styles.cell)
            }
        });

        let widths = vec![Constraint::Fill(1); table.headers().len()];
        let widget = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(self.styles.highlight);
        let mut state = TableState::default().with_selected(selected);
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_statusline(&self, message: &str, area: Rect, frame: &mut Frame) {
        let line = Line::from(format!(" {message}")).style(self.styles.statusline);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help(&self, text: &str, frame: &mut Frame) {
        let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
        let height = text.lines().count() + 2;
        let area = popup_area(frame.area(), width as u16, height as u16);
        let popup = Paragraph::new(text).block(Block::bordered().title(" Help "));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}
