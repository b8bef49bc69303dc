//! UI rendering for the front panel.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style, Modifier},
};
use crate::logic::segments::segment_lit;
use super::app::FrontPanelApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &FrontPanelApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());
    
    draw_digits(frame, chunks[0], app);
    draw_signals(frame, chunks[1], app);
    draw_status(frame, chunks[2], app);
    draw_help(frame, chunks[3]);
}

/// Render one digit pattern as three text rows.
fn glyph(pattern: u8) -> [String; 3] {
    let seg = |s: u8, on: char| if segment_lit(pattern, s) { on } else { ' ' };
    [
        format!(" {} ", seg(0, '_')),
        format!("{}{}{}", seg(5, '|'), seg(6, '_'), seg(1, '|')),
        format!("{}{}{}", seg(4, '|'), seg(3, '_'), seg(2, '|')),
    ]
}

/// Draw the six digits as seen with persistence of vision.
fn draw_digits(frame: &mut Frame, area: Rect, app: &FrontPanelApp) {
    let polarity = app.clock.config().segment_polarity;
    let active = app.clock.frame().index;
    let frames = app.persisted_frames();
    
    let mut rows: [Vec<Span>; 3] = Default::default();
    for (pos, digit) in frames.iter().enumerate() {
        let style = if digit.index == active {
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        
        let lines = glyph(digit.segments_logical(polarity));
        for (row, text) in rows.iter_mut().zip(lines) {
            row.push(Span::styled(text, style));
            // Colons between hours, minutes and seconds.
            let sep = if pos == 1 || pos == 3 { " . " } else { " " };
            row.push(Span::raw(sep));
        }
    }
    
    let content: Vec<Line> = rows.into_iter().map(Line::from).collect();
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(Block::default()
            .title(" Display ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));
    
    frame.render_widget(paragraph, area);
}

/// Draw pad levels and internal counters.
fn draw_signals(frame: &mut Frame, area: Rect, app: &FrontPanelApp) {
    let clock = &app.clock;
    let pads = clock.frame();
    let tick = clock.tick_generator();
    
    let content = vec![
        Line::from(vec![
            Span::raw("cs[5:0]:      "),
            Span::styled(format!("{:06b}", pads.cs), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  ({:?})", clock.config().cs_polarity)),
        ]),
        Line::from(vec![
            Span::raw("abcdefg[6:0]: "),
            Span::styled(format!("{:07b}", pads.segments), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  ({:?}) digit {} = {}", clock.config().segment_polarity, pads.index, pads.value)),
        ]),
        Line::from(vec![
            Span::raw("Time: "),
            Span::styled(clock.time().to_string(), Style::default().fg(Color::White)),
            Span::raw(format!("   Tick: {}/{}", tick.counter(), tick.period())),
        ]),
        Line::from(vec![
            Span::raw("Cycles: "),
            Span::styled(format!("{}", clock.cycles()), Style::default().fg(Color::Cyan)),
            Span::raw(format!("   Presses: {}", app.presses)),
        ]),
        Line::from(vec![
            Span::raw("Speed: "),
            Span::styled(format!("x{}", app.speed), Style::default().fg(Color::Magenta)),
            Span::raw("   State: "),
            Span::styled(
                if app.running { "Running" } else { "Paused" },
                if app.running {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                },
            ),
        ]),
    ];
    
    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Signals ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));
    
    frame.render_widget(paragraph, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &FrontPanelApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));
    
    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("m: Minute button  h: Hour button  space: Pause"),
        Line::from("+/-: Speed  x: Reset  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));
    
    frame.render_widget(help, area);
}
