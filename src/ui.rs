use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use sales_analytics::{EnrichedTransaction, RunSummary};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Regions,
    TopProducts,
    Customers,
    DailyTrend,
    Ledger,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Regions,
        Page::TopProducts,
        Page::Customers,
        Page::DailyTrend,
        Page::Ledger,
    ];

    fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Regions => "Regions",
            Page::TopProducts => "Top Products",
            Page::Customers => "Customers",
            Page::DailyTrend => "Daily Trend",
            Page::Ledger => "Enriched Ledger",
        }
    }
}

pub struct App {
    pub summary: RunSummary,
    pub enriched: Vec<EnrichedTransaction>,
    pub current_page: Page,
    pub state: TableState,
}

impl App {
    pub fn new(summary: RunSummary, enriched: Vec<EnrichedTransaction>) -> Self {
        let mut app = Self {
            summary,
            enriched,
            current_page: Page::Regions,
            state: TableState::default(),
        };
        app.reset_selection();
        app
    }

    /// Rows on the current page
    pub fn row_count(&self) -> usize {
        let report = &self.summary.report;
        match self.current_page {
            Page::Regions => report.region_sales.len(),
            Page::TopProducts => report.top_products.len(),
            Page::Customers => report.customers.len(),
            Page::DailyTrend => report.daily_trend.len(),
            Page::Ledger => self.enriched.len(),
        }
    }

    fn reset_selection(&mut self) {
        let selected = if self.row_count() > 0 { Some(0) } else { None };
        self.state.select(selected);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.reset_selection();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.reset_selection();
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = self.state.selected().map(|i| (i + 20).min(len - 1)).unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.row_count() == 0 {
            return;
        }
        let i = self.state.selected().map(|i| i.saturating_sub(20)).unwrap_or(0);
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => {
                    if app.row_count() > 0 {
                        app.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    let len = app.row_count();
                    if len > 0 {
                        app.state.select(Some(len - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let (headers, widths, rows) = page_rows(app);
    render_table(f, chunks[1], app, headers, &widths, rows);

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    let summary = &app.summary;
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Revenue: {:.2}", summary.report.total_revenue),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("✓ {}", summary.validation.final_count),
        Style::default().fg(Color::Green),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        format!("✗ {}", summary.validation.invalid),
        Style::default().fg(Color::Red),
    ));
    if let Some(peak) = &summary.report.peak_day {
        tab_spans.push(Span::raw("  "));
        tab_spans.push(Span::styled(
            format!("Peak: {}", peak.date),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

type PageRows = (Vec<&'static str>, Vec<Constraint>, Vec<Row<'static>>);

fn page_rows(app: &App) -> PageRows {
    let report = &app.summary.report;

    match app.current_page {
        Page::Regions => (
            vec!["Region", "Sales", "Transactions", "Share %"],
            vec![Constraint::Length(20), Constraint::Length(16), Constraint::Length(14), Constraint::Length(10)],
            report
                .region_sales
                .iter()
                .map(|r| {
                    Row::new(vec![
                        Cell::from(r.region.clone()),
                        Cell::from(format!("{:.2}", r.total_sales)),
                        Cell::from(r.transaction_count.to_string()),
                        Cell::from(format!("{:.2}", r.percentage)),
                    ])
                })
                .collect(),
        ),
        Page::TopProducts => (
            vec!["Product", "Quantity", "Revenue", ""],
            vec![Constraint::Length(32), Constraint::Length(10), Constraint::Length(16), Constraint::Length(8)],
            report
                .top_products
                .iter()
                .map(|p| {
                    let low = report.low_performers.iter().any(|l| l.product_name == p.product_name);
                    Row::new(vec![
                        Cell::from(truncate(&p.product_name, 30)),
                        Cell::from(p.quantity.to_string()),
                        Cell::from(format!("{:.2}", p.revenue)),
                        Cell::from(if low { "low" } else { "" }).style(Style::default().fg(Color::Red)),
                    ])
                })
                .collect(),
        ),
        Page::Customers => (
            vec!["Customer", "Spent", "Purchases", "Avg Order", "Products"],
            vec![
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Min(10),
            ],
            report
                .customers
                .iter()
                .map(|c| {
                    let mut products: Vec<&str> = c.products_bought.iter().map(String::as_str).collect();
                    products.sort_unstable();
                    Row::new(vec![
                        Cell::from(c.customer_id.clone()),
                        Cell::from(format!("{:.2}", c.total_spent)),
                        Cell::from(c.purchase_count.to_string()),
                        Cell::from(format!("{:.2}", c.avg_order_value)),
                        Cell::from(truncate(&products.join(", "), 60)),
                    ])
                })
                .collect(),
        ),
        Page::DailyTrend => (
            vec!["Date", "Revenue", "Transactions", "Customers"],
            vec![Constraint::Length(14), Constraint::Length(16), Constraint::Length(14), Constraint::Length(10)],
            report
                .daily_trend
                .iter()
                .map(|d| {
                    let is_peak = report.peak_day.as_ref().map(|p| p.date == d.date).unwrap_or(false);
                    let style = if is_peak {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Row::new(vec![
                        Cell::from(d.date.clone()),
                        Cell::from(format!("{:.2}", d.revenue)),
                        Cell::from(d.transaction_count.to_string()),
                        Cell::from(d.unique_customers.to_string()),
                    ])
                    .style(style)
                })
                .collect(),
        ),
        Page::Ledger => (
            vec!["ID", "Date", "Product", "Amount", "Region", "Category", "Match"],
            vec![
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(24),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(6),
            ],
            app.enriched
                .iter()
                .map(|e| {
                    let color = if e.api_match { Color::Green } else { Color::DarkGray };
                    Row::new(vec![
                        Cell::from(e.transaction.transaction_id.clone()),
                        Cell::from(e.transaction.date.clone()),
                        Cell::from(truncate(&e.transaction.product_name, 22)),
                        Cell::from(format!("{:.2}", e.transaction.line_amount())),
                        Cell::from(e.transaction.region.clone()),
                        Cell::from(e.api_category.clone().unwrap_or_default()),
                        Cell::from(if e.api_match { "yes" } else { "no" }).style(Style::default().fg(color)),
                    ])
                })
                .collect(),
        ),
    }
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    app: &mut App,
    headers: Vec<&'static str>,
    widths: &[Constraint],
    rows: Vec<Row<'static>>,
) {
    let header_cells = headers.into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let table = Table::new(rows, widths.to_vec())
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", app.current_page.title())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, app.row_count()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(app.summary.enrichment.summary(), Style::default().fg(Color::Green)),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" Fast | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_analytics::{
        EnrichmentStats, FilterCriteria, SalesReport, Transaction, ValidationSummary,
    };
    use std::path::PathBuf;

    fn create_app() -> App {
        let kept: Vec<Transaction> = (1..=3)
            .map(|i| Transaction {
                transaction_id: format!("T{}", i),
                date: format!("2024-12-0{}", i),
                product_id: format!("P{}", i),
                product_name: format!("Product {}", i),
                quantity: i,
                unit_price: 10.0,
                customer_id: "C1".to_string(),
                region: "North".to_string(),
            })
            .collect();

        let enriched: Vec<EnrichedTransaction> = kept
            .iter()
            .cloned()
            .map(EnrichedTransaction::unmatched)
            .collect();

        let summary = RunSummary {
            generated_at: chrono::Utc::now(),
            input_path: PathBuf::from("in.txt"),
            output_path: PathBuf::from("out.txt"),
            lines_read: 3,
            parsed: 3,
            filters: FilterCriteria::none(),
            validation: ValidationSummary { total_input: 3, invalid: 0, final_count: 3 },
            enrichment: EnrichmentStats::from_enriched(&enriched),
            rows_written: 3,
            report: SalesReport::build(&kept, 5, 10),
        };

        App::new(summary, enriched)
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Regions.next(), Page::TopProducts);
        assert_eq!(Page::Ledger.next(), Page::Regions);
        assert_eq!(Page::Regions.previous(), Page::Ledger);
    }

    #[test]
    fn test_selection_wraps_and_resets_per_page() {
        let mut app = create_app();

        // One region
        assert_eq!(app.row_count(), 1);
        assert_eq!(app.state.selected(), Some(0));

        app.previous_page();
        assert_eq!(app.current_page, Page::Ledger);
        assert_eq!(app.row_count(), 3);

        app.previous();
        assert_eq!(app.state.selected(), Some(2));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
        app.page_down();
        assert_eq!(app.state.selected(), Some(2));
        app.page_up();
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product name", 10), "a very ...");
    }
}
