use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use crate::fit::FitResult;
use crate::sample::Sample;

/// Opens the chart view in the terminal alternate screen: the empirical
/// frequency bar chart of the sample plus one subplot per fitted family,
/// and blocks until the view is dismissed with q or Esc.
pub fn show(sample : &Sample, fits : &[FitResult]) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = run(&mut terminal, sample, fits);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run(
    terminal : &mut Terminal<CrosstermBackend<io::Stdout>>,
    sample : &Sample,
    fits : &[FitResult]
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, sample, fits))?;
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        _ => {}
                    }
                }
            }
        }
    }
    Ok(())
}

fn render(frame : &mut Frame, sample : &Sample, fits : &[FitResult]) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    frame.render_widget(
        Paragraph::new("Fitted discrete distributions")
            .style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0]
    );
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_counts(frame, sample, top[0]);
    let cells = [top[1], bottom[0], bottom[1]];
    for (fit, cell) in fits.iter().zip(cells.iter()) {
        render_family(frame, sample, fit, *cell);
    }
    frame.render_widget(Paragraph::new("q: quit"), chunks[2]);
}

/// One bar per distinct value at position = value, height = count. Bars are
/// labeled with the integer values themselves, so both axes only ever show
/// integer ticks.
fn render_counts(frame : &mut Frame, sample : &Sample, area : Rect) {
    let counts = sample.counts();
    let bars : Vec<Bar> = counts.iter()
        .map(|(value, count)| Bar::default().value(*count).label(Line::from(value.to_string())))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Input data"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Yellow));
    frame.render_widget(chart, area);
}

/// Observed counts with the fitted expected counts overlaid, or the failure
/// diagnostic when the family did not converge within its bounds.
fn render_family(frame : &mut Frame, sample : &Sample, fit : &FitResult, area : Rect) {
    if !fit.success() {
        let msg = format!("Failed to fit the {} distribution.\nCheck the bounds!", fit.family());
        frame.render_widget(
            Paragraph::new(msg)
                .block(Block::default().borders(Borders::ALL).title(fit.family().name())),
            area
        );
        return;
    }
    let n = sample.len() as f64;
    let observed : Vec<(f64, f64)> = sample.counts().iter()
        .map(|(value, count)| (*value as f64, *count as f64))
        .collect();
    let min = sample.min().unwrap_or(0);
    let max = sample.max().unwrap_or(0);
    let expected : Vec<(f64, f64)> = (min..=max)
        .map(|x| (x as f64, n * fit.pmf(x)))
        .collect();
    let y_max = observed.iter().chain(expected.iter())
        .map(|(_, y)| *y)
        .fold(1., f64::max)
        .ceil();
    let datasets = vec![
        Dataset::default()
            .name("observed")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&observed),
        Dataset::default()
            .name("fitted")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&expected)
    ];
    let title = format!("{} (nll {:.2})", fit.family(), fit.nllf());
    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(Axis::default()
            .title("data")
            .bounds([min as f64 - 1., max as f64 + 1.])
            .labels(int_labels(min - 1, max + 1)))
        .y_axis(Axis::default()
            .title("frequency")
            .bounds([0., y_max])
            .labels(int_labels(0, y_max as i64)));
    frame.render_widget(chart, area);
}

// non integer ticks are useless here
fn int_labels(lo : i64, hi : i64) -> Vec<Span<'static>> {
    let mid = lo + (hi - lo) / 2;
    vec![
        Span::raw(lo.to_string()),
        Span::raw(mid.to_string()),
        Span::raw(hi.to_string())
    ]
}
