use crate::app::{App, LogKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

/// Draw the most recent gestures and actions, newest at the bottom
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" events ")
        .border_style(Style::default().fg(app.theme.border));

    let visible = block.inner(area).height as usize;
    let log = app.log.borrow();
    let start = log.len().saturating_sub(visible);

    let items: Vec<ListItem> = log[start..]
        .iter()
        .map(|entry| {
            let color = match entry.kind {
                LogKind::Tap => app.theme.tap,
                LogKind::DblTap => app.theme.dbltap,
                LogKind::Action => app.theme.action,
                LogKind::Notice => app.theme.notice,
            };
            let stamp = format!("{:>8.3}s ", entry.at.as_secs_f64());
            ListItem::new(Line::from(vec![
                Span::styled(stamp, Style::default().fg(app.theme.notice)),
                Span::styled(entry.text.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
