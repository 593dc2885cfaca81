//! TUI rendering logic for the browser.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};
use reelscout_api::tmdb::TmdbApi;
use reelscout_db::TrendingStore;

use super::state::{ActivePane, BrowserState, InputMode};
use crate::detail::error_text;
use crate::fetch_state::FetchState;
use crate::format::{DetailView, MovieCard};
use crate::router::Route;

/// Text shown for a successful search without results.
pub const EMPTY_LISTING_TEXT: &str = "No movies found.";

/// Draws the browser UI. Returns the main content area height for page size calculation.
#[allow(clippy::indexing_slicing)]
pub fn draw<A, S>(frame: &mut Frame, state: &mut BrowserState<A, S>) -> u16
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    match state.router.current() {
        Route::Home => draw_home(frame, chunks[0], state),
        Route::Movie(_) => draw_detail(frame, chunks[0], state),
    }
    draw_footer(frame, chunks[1], state);

    chunks[0].height
}

/// Draws the home route: search box, trending rail and listing.
#[allow(clippy::indexing_slicing)]
fn draw_home<A, S>(frame: &mut Frame, area: Rect, state: &mut BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let trending_rows = u16::try_from(state.trending.records().len()).unwrap_or(u16::MAX);
    let trending_height = if trending_rows == 0 {
        0
    } else {
        trending_rows.saturating_add(3)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // search box
            Constraint::Length(trending_height), // trending rail
            Constraint::Min(3),                  // listing
        ])
        .split(area);

    draw_search_box(frame, chunks[0], state);
    if trending_height > 0 {
        draw_trending(frame, chunks[1], state);
    }
    draw_listing(frame, chunks[2], state);
}

/// Draws the search input.
fn draw_search_box<A, S>(frame: &mut Frame, area: Rect, state: &BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let style = if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let title = if state.has_pending_input() {
        " Search: / (waiting...) "
    } else {
        " Search: / "
    };

    let search = Paragraph::new(state.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(search, area);
}

/// Border style for a home pane.
fn pane_border<A, S>(state: &BrowserState<A, S>, pane: ActivePane) -> Style {
    if state.input_mode == InputMode::Normal && state.active_pane == pane {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Draws the trending rail.
fn draw_trending<A, S>(frame: &mut Frame, area: Rect, state: &mut BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let header = Row::new(vec!["#", "Movie", "Searches"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .trending
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                i.saturating_add(1).to_string(),
                r.movie_title.clone(),
                r.count.to_string(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Trending Movies ")
                .border_style(pane_border(state, ActivePane::Trending)),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.trending_table_state);
}

/// Draws the listing: spinner, error text, empty state or movie table.
fn draw_listing<A, S>(frame: &mut Frame, area: Rect, state: &mut BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" All Movies ")
        .border_style(pane_border(state, ActivePane::Listing));

    let message = match state.search.state() {
        FetchState::Idle => Some(Paragraph::new("")),
        FetchState::Loading => Some(Paragraph::new("Loading...")),
        FetchState::Error(message) => {
            Some(Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)))
        }
        FetchState::Success(movies) if movies.is_empty() => {
            Some(Paragraph::new(EMPTY_LISTING_TEXT))
        }
        FetchState::Success(_) => None,
    };
    if let Some(paragraph) = message {
        frame.render_widget(paragraph.block(block), area);
        return;
    }

    let header = Row::new(vec!["Title", "Rating", "Lang", "Year"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .search
        .movies()
        .iter()
        .map(|m| {
            let card = MovieCard::from(m);
            Row::new(vec![card.title, card.rating, card.language, card.year])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.listing_table_state);
}

/// Draws the detail route.
fn draw_detail<A, S>(frame: &mut Frame, area: Rect, state: &BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let block = Block::default().borders(Borders::ALL).title(" Movie ");

    let paragraph = match state.detail.state() {
        FetchState::Idle => Paragraph::new(""),
        FetchState::Loading => Paragraph::new("Loading...").alignment(Alignment::Center),
        FetchState::Error(message) => Paragraph::new(vec![
            Line::styled(error_text(message), Style::default().fg(Color::Red)),
            Line::from(""),
            Line::from("[ Go Back ]  (Enter / Esc)"),
        ])
        .alignment(Alignment::Center),
        FetchState::Success(movie) => Paragraph::new(detail_lines(&DetailView::from(movie)))
            .wrap(Wrap { trim: false }),
    };

    frame.render_widget(paragraph.block(block), area);
}

/// Detail page lines.
fn detail_lines(view: &DetailView) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let field = |name: &'static str, text: &str| {
        vec![
            Line::styled(name, label),
            Line::styled(text.to_owned(), value),
            Line::from(""),
        ]
    };

    let mut lines = vec![
        Line::styled(
            view.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::styled(format!("{} \u{2022} {}", view.year, view.runtime), label),
            Span::raw("  "),
            Span::styled(format!("\u{2605} {}", view.rating), value),
            Span::raw(" "),
            Span::styled(view.votes.clone(), label),
        ]),
        Line::from(""),
    ];
    lines.extend(field("Overview", &view.overview));
    lines.extend(field("Genres", &view.genres));
    lines.extend(field("Budget", &view.budget));
    lines.extend(field("Revenue", &view.revenue));
    lines.extend(field("Production Companies", &view.companies));
    if let Some(poster) = &view.poster_url {
        lines.extend(field("Poster", poster));
    }
    lines.extend(field("TMDB", &view.page_url));
    lines
}

/// Draws the footer with key hints.
fn draw_footer<A, S>(frame: &mut Frame, area: Rect, state: &BrowserState<A, S>)
where
    A: TmdbApi + Sync,
    S: TrendingStore + Sync,
{
    let help_text = match (state.router.current(), state.input_mode) {
        (Route::Movie(_), _) => Line::from("Esc/b: go back  o: open in browser  q: quit"),
        (Route::Home, InputMode::Editing) => {
            Line::from("Type to search | Enter: search now | Ctrl-U: clear | Esc: browse results")
        }
        (Route::Home, InputMode::Normal) => Line::from(vec![
            Span::raw("\u{2191}\u{2193}/j/k: move  PgUp/PgDn: page  Tab: pane  "),
            Span::raw("Enter: details  /: search  o: open  q: quit"),
        ]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
