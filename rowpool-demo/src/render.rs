//! Flattens the surface into terminal lines.

use crossterm::style::Color;
use rowpool::ALT_ROW_CLASS;
use rowpool_dom::{Dom, NodeId};

use crate::app::DemoController;

const BG: Color = Color::Rgb { r: 18, g: 18, b: 24 };
const BG_ALT: Color = Color::Rgb { r: 34, g: 34, b: 46 };
const BG_STATUS: Color = Color::Rgb { r: 40, g: 60, b: 110 };
const FG: Color = Color::Rgb { r: 200, g: 200, b: 210 };
const FG_FOCUS: Color = Color::Rgb { r: 255, g: 210, b: 90 };
const FG_HELD: Color = Color::Rgb { r: 120, g: 220, b: 140 };

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            text: String::new(),
            fg: FG,
            bg: BG,
            bold: false,
        }
    }
}

fn background(dom: &Dom, row: NodeId) -> Color {
    if dom.has_class(row, ALT_ROW_CLASS) {
        BG_ALT
    } else {
        BG
    }
}

fn child_text(dom: &Dom, row: NodeId, position: usize) -> &str {
    dom.children(row)
        .get(position)
        .and_then(|child| dom.text(*child))
        .unwrap_or_default()
}

/// Fill the lines covered by `[top, top + height)`; `text` goes on the first.
fn paint(lines: &mut [Line], top: f64, height: f64, template: Line) {
    let start = top.round() as i64;
    let end = (top + height).round() as i64;
    for y in start.max(0)..end.min(lines.len() as i64) {
        let Some(line) = lines.get_mut(y as usize) else {
            continue;
        };
        *line = Line {
            text: if y == start {
                template.text.clone()
            } else {
                String::new()
            },
            ..template.clone()
        };
    }
}

/// Render `height` terminal lines: the viewport, then `status` on the last line.
pub fn frame(controller: &DemoController, status: &str, height: u16) -> Vec<Line> {
    let mut lines = vec![Line::default(); height.saturating_sub(1) as usize];
    let dom = controller.surface();
    let window = controller.active_window();
    let row_height = f64::from(controller.config().row_height);
    let held = controller.drag().held().map(|(_, slot)| slot);
    let mut top = controller.first_row_offset();

    for row in dom.displayed_rows() {
        let focused = dom.focused().is_some_and(|f| dom.is_within(f, row));
        let slot = window
            .position_of_visual(row)
            .and_then(|pos| window.get(pos))
            .map(|item| item.slot());
        let is_held = held.is_some() && slot == held;

        let (marker, fg) = if focused {
            ('>', FG_FOCUS)
        } else if is_held {
            ('=', FG_HELD)
        } else {
            (' ', FG)
        };
        let template = Line {
            text: format!(
                "{} {}  [{}]",
                marker,
                child_text(dom, row, 0),
                child_text(dom, row, 1)
            ),
            fg,
            bg: background(dom, row),
            bold: focused,
        };
        paint(&mut lines, top, row_height, template);
        top += row_height;
    }

    for row in dom.displayed_filler_rows() {
        let height = dom.height(row).map_or(row_height, f64::from);
        let template = Line {
            bg: background(dom, row),
            ..Line::default()
        };
        paint(&mut lines, top, height, template);
        top += height;
    }

    if height > 0 {
        lines.push(Line {
            text: status.to_string(),
            fg: Color::White,
            bg: BG_STATUS,
            bold: false,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::DemoConfig;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn app(rows: usize, height: u16) -> App {
        let config = DemoConfig {
            rows,
            ..Default::default()
        };
        App::new(&config, height).unwrap()
    }

    #[test]
    fn test_frame_has_one_line_per_terminal_row() {
        let app = app(100, 6);
        let lines = frame(app.controller(), "status", 6);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5].text, "status");
        assert!(lines[0].text.contains(" 0  slot-0"));
        assert!(lines[4].text.contains(" 4  slot-4"));
    }

    #[test]
    fn test_alternating_backgrounds() {
        let app = app(100, 6);
        let lines = frame(app.controller(), "", 6);

        assert_eq!(lines[0].bg, BG);
        assert_eq!(lines[1].bg, BG_ALT);
        assert_eq!(lines[2].bg, BG);
    }

    #[test]
    fn test_filler_continues_parity() {
        let app = app(2, 6);
        let lines = frame(app.controller(), "", 6);

        assert!(lines[1].text.contains("[open]"));
        assert_eq!(lines[1].bg, BG_ALT);
        // Filler rows below the last item
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[2].bg, BG);
        assert_eq!(lines[3].bg, BG_ALT);
        assert_eq!(lines[4].bg, BG);
    }

    #[test]
    fn test_partial_scroll_offsets_rows() {
        let mut app = app(100, 6);
        for _ in 0..3 {
            app.handle_event(Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        }
        let lines = frame(app.controller(), "", 6);

        assert!(lines[0].text.contains(" 3  "));
    }
}
