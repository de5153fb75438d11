//! Input handling for the demo list.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use rowpool::VirtualizationController;
use rowpool_dom::{Dom, FocusEvent};

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::source::{DemoDrag, DemoSource};

pub type DemoController = VirtualizationController<Dom, DemoSource, DemoDrag>;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;

/// Viewport height for a terminal `height` rows tall (the last row is the status line).
pub fn viewport_for(height: u16) -> f64 {
    f64::from(height.saturating_sub(1))
}

pub struct App {
    controller: DemoController,
    running: bool,
}

impl App {
    pub fn new(config: &DemoConfig, height: u16) -> Result<Self, DemoError> {
        let mut controller = VirtualizationController::new(
            config.recycler.clone(),
            Dom::new(),
            DemoSource::new(config.rows),
            DemoDrag::default(),
        )?;
        controller.resize(viewport_for(height));
        Ok(Self {
            controller,
            running: true,
        })
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn controller(&self) -> &DemoController {
        &self.controller
    }

    pub fn status(&self) -> String {
        let c = &self.controller;
        let first = c.first_visible_index();
        let focused = c
            .focused_index()
            .map_or_else(|| "-".to_string(), |i| i.to_string());
        let held = c
            .drag()
            .held()
            .map_or_else(|| "-".to_string(), |(i, slot)| format!("{i} ({slot})"));
        format!(
            " rows {}..{} of {} | focus {} | held {} | pool {} idle / {} made | q quit",
            first,
            first + c.visible_item_count(),
            c.source().count(),
            focused,
            held,
            c.pool_idle_count(),
            c.created_count()
        )
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, height) => self.controller.resize(viewport_for(height)),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let row = f64::from(self.controller.config().row_height);
        let page = self.controller.viewport_height();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Up => self.scroll_by(-row),
            KeyCode::Down => self.scroll_by(row),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.controller.on_scroll(0.0),
            KeyCode::End => self.controller.scroll_to_end(),
            KeyCode::Tab => self.tab(false),
            KeyCode::BackTab => self.tab(true),
            KeyCode::Char('r') => self.replace_focused(),
            KeyCode::Char('d') => self.toggle_drag(),
            KeyCode::Char('x') => {
                let count = self.controller.source().count() / 2;
                self.set_count(count);
            }
            KeyCode::Char('a') => {
                let count = self.controller.source().count().saturating_mul(2).max(1);
                self.set_count(count);
            }
            KeyCode::Char('R') => self.controller.refresh(true),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let wheel = WHEEL_ROWS * f64::from(self.controller.config().row_height);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-wheel),
            MouseEventKind::ScrollDown => self.scroll_by(wheel),
            MouseEventKind::Down(MouseButton::Left) => self.click(f64::from(mouse.row)),
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: f64) {
        let offset = self.controller.scroll_offset() + delta;
        self.controller.on_scroll(offset);
    }

    /// Forward surface focus changes to the controller.
    fn route(&mut self, events: Vec<FocusEvent>) {
        for event in events {
            match event {
                FocusEvent::Focus { target } => self.controller.on_focus(target),
                FocusEvent::Blur { new_target, .. } => self.controller.on_blur(new_target),
            }
        }
    }

    fn tab(&mut self, backwards: bool) {
        let events = self.controller.surface_mut().tab(backwards);
        self.route(events);
        if let Some(index) = self.controller.focused_index() {
            self.controller.scroll_to_item(index);
        }
    }

    /// Focus the button of the row under viewport-relative `y`.
    fn click(&mut self, y: f64) {
        if y >= self.controller.viewport_height() {
            return;
        }
        let Some(index) = self.controller.index_at_offset(y) else {
            return;
        };
        let window = self.controller.active_window();
        let Some(visual) = window
            .position_of_index(index)
            .and_then(|pos| window.get(pos))
            .map(|item| item.visual())
        else {
            return;
        };
        let Some(button) = self.controller.surface().children(visual).get(1).copied() else {
            return;
        };
        let events = self.controller.surface_mut().set_focus(button);
        self.route(events);
    }

    fn replace_focused(&mut self) {
        let Some(index) = self.controller.focused_index() else {
            return;
        };
        if !self.controller.replace_active_item(index) {
            log::debug!("[demo] focused index {} is not in the window", index);
        }
    }

    fn toggle_drag(&mut self) {
        if self.controller.drag_mut().stop() {
            // Let the slots held back by the drag catch up.
            let offset = self.controller.scroll_offset();
            self.controller.on_scroll(offset);
            return;
        }
        let Some(index) = self.controller.focused_index() else {
            return;
        };
        let window = self.controller.active_window();
        let Some(slot) = window
            .position_of_index(index)
            .and_then(|pos| window.get(pos))
            .map(|item| item.slot())
        else {
            return;
        };
        self.controller.drag_mut().start(index, slot);
    }

    fn set_count(&mut self, count: usize) {
        self.controller.source_mut().set_count(count);
        self.controller.refresh(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(rows: usize, height: u16) -> App {
        let config = DemoConfig {
            rows,
            ..Default::default()
        };
        App::new(&config, height).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn click(app: &mut App, row: u16) {
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    #[test]
    fn test_window_follows_terminal_height() {
        let mut app = app(1_000, 11);
        assert_eq!(app.controller().active_window().len(), 12);

        app.handle_event(Event::Resize(80, 6));
        assert_eq!(app.controller().active_window().len(), 7);
        assert_eq!(app.controller().viewport_height(), 5.0);
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app(1_000, 11);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller().first_visible_index(), 1);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.controller().first_visible_index(), 11);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.controller().first_visible_index(), 10);
        press(&mut app, KeyCode::End);
        assert_eq!(app.controller().first_visible_index(), 990);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.controller().first_visible_index(), 0);
    }

    #[test]
    fn test_quit() {
        let mut app = app(10, 11);
        assert!(app.running());
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running());
    }

    #[test]
    fn test_tab_scrolls_focused_row_into_view() {
        let mut app = app(1_000, 6);

        for _ in 0..6 {
            press(&mut app, KeyCode::Tab);
        }

        assert_eq!(app.controller().focused_index(), Some(5));
        assert_eq!(app.controller().first_visible_index(), 1);
    }

    #[test]
    fn test_click_focuses_row() {
        let mut app = app(1_000, 11);
        app.controller.on_scroll(40.0);

        click(&mut app, 3);
        assert_eq!(app.controller().focused_index(), Some(43));

        // Status line is not part of the viewport
        click(&mut app, 10);
        assert_eq!(app.controller().focused_index(), Some(43));
    }

    #[test]
    fn test_replace_focused_row() {
        let mut app = app(1_000, 11);
        click(&mut app, 2);
        let created = app.controller().created_count();

        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.controller().created_count(), created + 1);
        assert_eq!(app.controller().focused_index(), Some(2));
        assert!(app.controller().surface().focused().is_some());
    }

    #[test]
    fn test_drag_toggle_holds_slot() {
        let mut app = app(1_000, 11);
        click(&mut app, 0);

        press(&mut app, KeyCode::Char('d'));
        let held = app.controller().drag().held();
        assert!(matches!(held, Some((0, _))));

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.controller().drag().held(), None);
    }

    #[test]
    fn test_shrink_and_grow() {
        let mut app = app(8, 11);
        app.controller.on_scroll(0.0);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.controller().source().count(), 4);
        assert_eq!(app.controller().visible_item_count(), 4);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.controller().source().count(), 16);
        assert_eq!(app.controller().visible_item_count(), 12);
    }

    #[test]
    fn test_rebuild_keeps_window_size() {
        let mut app = app(1_000, 11);

        press(&mut app, KeyCode::Char('R'));

        assert_eq!(app.controller().active_window().len(), 12);
        assert_eq!(app.controller().created_count(), 24);
    }
}
