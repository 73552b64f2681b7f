use tracing::{debug, info, trace};

use crate::domain::{HELP_TEXT, Message};
use crate::inputter::Inputter;
use crate::store::{RecordStore, Row};
use crate::table::{FilteredTable, RowGroup};
use crate::ui::{HEADER_LABEL_HEIGHT, SEARCHBAR_HEIGHT, STATUSLINE_HEIGHT, TABLE_HEADER_HEIGHT};

const KEY_COLUMN: usize = 0;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenKind {
    Secrets,
    Versions { secret: String },
}

/// One navigable state: a header label, a table and an optional search bar.
#[derive(Debug)]
pub struct Screen {
    pub kind: ScreenKind,
    pub table: FilteredTable,
    pub search_visible: bool,
    pub search: Inputter,
}

impl Screen {
    fn new(kind: ScreenKind, table: FilteredTable) -> Self {
        Self {
            kind,
            table,
            search_visible: false,
            search: Inputter::default(),
        }
    }

    fn open_search(&mut self) {
        self.search.clear();
        self.table.apply_filter("");
        self.search_visible = true;
    }

    fn close_search(&mut self) {
        self.search_visible = false;
    }

    fn cancel_search(&mut self) {
        self.search.clear();
        self.table.apply_filter("");
        self.close_search();
    }

    fn commit_search(&mut self) {
        self.table.apply_filter(self.search.get());
        self.close_search();
    }
}

/// Navigator over the secrets list and at most one version screen.
pub struct Model {
    pub status: Status,
    store: Box<dyn RecordStore>,
    screens: Vec<Screen>,
    show_help: bool,
    table_height: usize,
    status_message: String,
}

impl Model {
    pub fn init(store: Box<dyn RecordStore>, ui_height: usize) -> Self {
        let records = store.list_records();
        info!("Loaded {} secrets", records.rows.len());
        let table = FilteredTable::new(
            "SECRETS",
            records.headers,
            vec![RowGroup::unlabeled(records.rows)],
            KEY_COLUMN,
        );
        let mut model = Self {
            status: Status::READY,
            store,
            screens: vec![Screen::new(ScreenKind::Secrets, table)],
            show_help: false,
            table_height: 0,
            status_message: "Press ? for help".to_string(),
        };
        model.ui_resize(ui_height);
        model
    }

    pub fn screen(&self) -> &Screen {
        // The secrets screen is never popped
        &self.screens[self.screens.len() - 1]
    }

    fn screen_mut(&mut self) -> &mut Screen {
        let idx = self.screens.len() - 1;
        &mut self.screens[idx]
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn help_text(&self) -> &'static str {
        HELP_TEXT
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Key events go straight to the search bar while it has focus.
    pub fn raw_keyevents(&self) -> bool {
        self.screen().search_visible && !self.show_help
    }

    pub fn update(&mut self, message: Option<Message>) {
        let Some(msg) = message else {
            return;
        };
        trace!("Update: {:?}", msg);
        if let Message::Resize(_, height) = msg {
            self.ui_resize(height);
        } else if self.show_help {
            match msg {
                Message::Quit => self.quit(),
                Message::Help | Message::Cancel | Message::Back => self.show_help = false,
                _ => (),
            }
        } else if self.screen().search_visible {
            match msg {
                Message::Quit => self.quit(),
                Message::ToggleSearch => self.toggle_search(),
                Message::Cancel => self.cancel_search(),
                Message::Enter => self.commit_search(),
                Message::RawKey(key) => self.search_input(key),
                _ => (),
            }
        } else {
            match msg {
                Message::Quit => self.quit(),
                Message::MoveUp => self.screen_mut().table.move_up(1),
                Message::MoveDown => self.screen_mut().table.move_down(1),
                Message::MovePageUp => {
                    let size = self.screen().table.page_size();
                    self.screen_mut().table.move_up(size)
                }
                Message::MovePageDown => {
                    let size = self.screen().table.page_size();
                    self.screen_mut().table.move_down(size)
                }
                Message::MoveBeginning => self.screen_mut().table.move_beginning(),
                Message::MoveEnd => self.screen_mut().table.move_end(),
                Message::ToggleSearch => self.toggle_search(),
                Message::Cancel => self.clear_filter(),
                Message::Enter => self.enter(),
                Message::Back => self.back(),
                Message::Help => self.show_help = true,
                Message::Resize(..) | Message::RawKey(_) => (),
            }
        }
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    fn ui_resize(&mut self, height: usize) {
        // Reserve the search bar line, the viewport has to fit with the bar open
        self.table_height = height
            .saturating_sub(SEARCHBAR_HEIGHT + HEADER_LABEL_HEIGHT + TABLE_HEADER_HEIGHT)
            .saturating_sub(STATUSLINE_HEIGHT);
        trace!("UI was resized, table height {}", self.table_height);
        let table_height = self.table_height;
        for screen in self.screens.iter_mut() {
            screen.table.set_height(table_height);
        }
    }

    // -------------------- Control handling functions ---------------------- //

    fn toggle_search(&mut self) {
        let screen = self.screen_mut();
        if screen.search_visible {
            screen.close_search();
        } else {
            screen.open_search();
        }
        debug!("Search bar visible: {}", self.screen().search_visible);
    }

    fn cancel_search(&mut self) {
        self.screen_mut().cancel_search();
        self.set_status_message("Filter cleared");
    }

    fn commit_search(&mut self) {
        self.screen_mut().commit_search();
        let table = &self.screen().table;
        let message = format!("Showing {} rows matching \"{}\"", table.visible_count(), table.filter());
        self.set_status_message(message);
    }

    fn search_input(&mut self, key: ratatui::crossterm::event::KeyEvent) {
        let screen = self.screen_mut();
        if screen.search.read(key) {
            let text = screen.search.get().to_string();
            screen.table.apply_filter(&text);
        }
    }

    fn clear_filter(&mut self) {
        let screen = self.screen_mut();
        screen.search.clear();
        screen.table.apply_filter("");
        self.set_status_message("Filter cleared");
    }

    fn enter(&mut self) {
        if self.screen().kind != ScreenKind::Secrets {
            return;
        }
        if let Some(row) = self.screen().table.activate() {
            self.open_versions(row);
        }
    }

    fn open_versions(&mut self, row: Row) {
        let Some(name) = row.get(KEY_COLUMN).cloned() else {
            return;
        };
        let Some(history) = self.store.list_versions(&name) else {
            self.set_status_message(format!("No versions for {name}"));
            return;
        };
        let older = history.older.len();
        let mut table = FilteredTable::new(
            "VERSIONS",
            history.headers,
            vec![
                RowGroup::labeled("CURRENT VERSION", vec![history.current]),
                RowGroup::labeled("OLDER VERSIONS", history.older),
            ],
            KEY_COLUMN,
        );
        table.set_height(self.table_height);
        info!("Open versions of {name} ({older} older)");
        self.screens
            .push(Screen::new(ScreenKind::Versions { secret: name.clone() }, table));
        self.set_status_message(format!("Versions of {name}"));
    }

    fn back(&mut self) {
        if self.screens.len() < 2 {
            return;
        }
        if let Some(Screen {
            kind: ScreenKind::Versions { secret },
            ..
        }) = self.screens.pop()
        {
            debug!("Closed versions of {secret}");
            self.set_status_message(format!("Back from {secret}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleStore;
    use crate::table::TableRow;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn model() -> Model {
        Model::init(Box::new(SampleStore), 40)
    }

    fn type_str(model: &mut Model, s: &str) {
        for c in s.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            model.update(Some(Message::RawKey(key)));
        }
    }

    fn keys(model: &Model) -> Vec<String> {
        model
            .screen()
            .table
            .rows()
            .iter()
            .filter_map(|r| match r {
                TableRow::Data(row) => Some(row[0].clone()),
                TableRow::Section(_) => None,
            })
            .collect()
    }

    #[test]
    fn live_filter_while_typing() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        assert!(model.raw_keyevents());
        type_str(&mut model, "te");
        assert_eq!(keys(&model), vec!["test1", "test2"]);
        assert_eq!(model.screen().table.label(), "SECRETS[2]_<te>");

        type_str(&mut model, "zzz");
        assert_eq!(model.screen().table.visible_count(), 0);
    }

    #[test]
    fn commit_keeps_filter_and_hides_search() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "dev");
        model.update(Some(Message::Enter));
        assert!(!model.screen().search_visible);
        assert!(!model.raw_keyevents());
        assert_eq!(keys(&model), vec!["dev"]);
        // Enter now activates the row instead of committing again
        model.update(Some(Message::Enter));
        assert_eq!(model.depth(), 2);
    }

    #[test]
    fn cancel_clears_filter() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "test2");
        model.update(Some(Message::Cancel));
        assert!(!model.screen().search_visible);
        assert_eq!(model.screen().search.get(), "");
        assert_eq!(model.screen().table.visible_count(), 3);
    }

    #[test]
    fn double_toggle_returns_to_unfiltered_list() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "dev");
        model.update(Some(Message::Enter));
        assert_eq!(model.screen().table.visible_count(), 1);

        model.update(Some(Message::ToggleSearch));
        model.update(Some(Message::ToggleSearch));
        assert!(!model.screen().search_visible);
        assert_eq!(model.screen().table.filter(), "");
        assert_eq!(keys(&model), vec!["test1", "test2", "dev"]);
    }

    #[test]
    fn escape_clears_filter_without_search_bar() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "te");
        model.update(Some(Message::ToggleSearch));
        assert_eq!(model.screen().table.visible_count(), 2);

        model.update(Some(Message::Cancel));
        assert_eq!(model.screen().table.visible_count(), 3);
        assert_eq!(model.status_message(), "Filter cleared");
    }

    #[test]
    fn activation_pushes_version_screen() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "te");
        model.update(Some(Message::Enter));
        model.update(Some(Message::Enter));

        assert_eq!(model.depth(), 2);
        let screen = model.screen();
        assert_eq!(
            screen.kind,
            ScreenKind::Versions {
                secret: "test1".to_string()
            }
        );
        assert_eq!(screen.table.headers()[0], "VERSION");
        assert_eq!(screen.table.headers().len(), 6);
        assert_eq!(screen.table.filter(), "");
        assert!(!screen.search_visible);
        assert_eq!(keys(&model), vec!["cddcssd", "xxxxadsx", "sdfdscdsc", "fadcdcsa"]);
        assert_eq!(
            model.screen().table.rows()[0],
            TableRow::Section("CURRENT VERSION".to_string())
        );
    }

    #[test]
    fn version_screen_filters_on_its_own() {
        let mut model = model();
        model.update(Some(Message::MoveDown));
        model.update(Some(Message::Enter));
        assert_eq!(
            model.screen().kind,
            ScreenKind::Versions {
                secret: "test2".to_string()
            }
        );

        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "xxxxadsx");
        model.update(Some(Message::Enter));
        assert_eq!(keys(&model), vec!["xxxxadsx"]);
        assert_eq!(model.screen().table.label(), "VERSIONS[1]_<xxxxadsx>");

        // No further drill down
        model.update(Some(Message::Enter));
        assert_eq!(model.depth(), 2);
    }

    #[test]
    fn back_restores_list_state() {
        let mut model = model();
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "test");
        model.update(Some(Message::Enter));
        model.update(Some(Message::MoveDown));
        model.update(Some(Message::Enter));
        model.update(Some(Message::ToggleSearch));
        type_str(&mut model, "zzz");
        model.update(Some(Message::Enter));

        model.update(Some(Message::Back));
        assert_eq!(model.depth(), 1);
        assert_eq!(model.screen().kind, ScreenKind::Secrets);
        assert_eq!(model.screen().table.filter(), "test");
        assert_eq!(model.screen().search.get(), "test");
        assert_eq!(model.screen().table.activate().unwrap()[0], "test2");

        // Back on the root screen does nothing
        model.update(Some(Message::Back));
        assert_eq!(model.depth(), 1);
    }

    #[test]
    fn help_popup_captures_keys() {
        let mut model = model();
        model.update(Some(Message::Help));
        assert!(model.show_help());
        model.update(Some(Message::MoveDown));
        model.update(Some(Message::Enter));
        assert_eq!(model.depth(), 1);
        model.update(Some(Message::Cancel));
        assert!(!model.show_help());
        model.update(Some(Message::Quit));
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn resize_sets_table_height() {
        let mut model = model();
        model.update(Some(Message::Resize(80, 6)));
        assert_eq!(model.screen().table.page_size(), 2);
        model.update(Some(Message::MovePageDown));
        assert_eq!(model.screen().table.activate().unwrap()[0], "dev");
        model.update(Some(Message::MovePageUp));
        assert_eq!(model.screen().table.activate().unwrap()[0], "test1");
    }
}
