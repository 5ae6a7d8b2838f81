use crate::Tool;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{HistoryBrowser, Inspector, Preview, SegmentList, TitleBar};
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

const CURSOR_HELP: &str = "↑↓ select  n/d add/del  b i u s o style  c color  e/h click/hover  Enter/E/H edit  v version  t tool  a array  g target  y save  x clear  ^O history  q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};

    let command = app.command();
    let mut preview = Preview::new(&command, app.array_format);
    let preview_height = preview
        .height(frame.area().width)
        .min(frame.area().height / 3)
        .max(3);
    let bottom_height = match tui.input_mode {
        InputMode::Input => 3,
        InputMode::Cursor => 2,
    };

    let layout = Layout::vertical([Length(1), Min(0), Length(preview_height), Length(bottom_height)]);
    let [title_area, main_area, preview_area, bottom_area] = layout.areas(frame.area());

    let target = match app.tool {
        // Signs have no target; books carry their own
        Tool::Sign | Tool::Book => None,
        _ => Some(app.target.clone()),
    };
    TitleBar::new(app.tool, app.version, target, app.status_message.clone())
        .render(frame, title_area);

    let [list_area, inspector_area] =
        Layout::horizontal([Percentage(40), Percentage(60)]).areas(main_area);
    let dimmed = matches!(tui.input_mode, InputMode::Input);
    SegmentList::new(&app.segments, app.selected, dimmed).render(frame, list_area);
    Inspector::new(
        app.selected_segment(),
        app.event_segment(),
        app.selected,
        app.segments.len(),
    )
    .render(frame, inspector_area);

    preview.render(frame, preview_area);

    match (&mut tui.input_box, tui.input_mode) {
        (Some(input_box), InputMode::Input) => input_box.render(frame, bottom_area),
        _ => {
            let help = Paragraph::new(Line::from(Span::styled(
                CURSOR_HELP,
                Style::default().fg(Color::DarkGray),
            )))
            .wrap(Wrap { trim: true });
            frame.render_widget(help, bottom_area);
        }
    }

    // Overlay last so it covers everything
    if let Some(ref mut history) = tui.history_browser {
        HistoryBrowser::new(history).render(frame, frame.area());
    }
}
