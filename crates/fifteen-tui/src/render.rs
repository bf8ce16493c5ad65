use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    queue!(stdout, Hide, Clear(ClearType::All))?;

    render_board(stdout, app, term_width)?;
    render_status(stdout, app, term_width)?;

    if app.screen_state == ScreenState::Won {
        render_win_overlay(stdout, app, term_width, term_height)?;
    }

    queue!(stdout, Show)?;
    stdout.flush()
}

/// Character width of one tile cell, wide enough for the largest number.
fn cell_width(size: usize) -> usize {
    let digits = (size * size - 1).to_string().len();
    digits + 2
}

fn render_board(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let board = app.game.board();
    let size = board.size();
    let cw = cell_width(size);
    let grid_width = (size * (cw + 1) + 1) as u16;
    let start_x = term_width.saturating_sub(grid_width) / 2;
    let start_y = 2u16;

    // The hint names a direction; the tile it would slide sits next to the
    // blank on the opposite side.
    let hint_cell = app.hint.and_then(|dir| {
        let blank = board.blank_pos();
        let (dr, dc) = dir.tile_offset();
        let row = blank.row.checked_add_signed(dr)?;
        let col = blank.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some((row, col))
    });

    queue!(stdout, SetForegroundColor(app.theme.border))?;
    for row in 0..size {
        let y = start_y + (row * 2) as u16;
        queue!(
            stdout,
            MoveTo(start_x, y),
            SetForegroundColor(app.theme.border),
            Print(horizontal_rule(size, cw, row == 0))
        )?;
        let cell_y = y + 1;
        queue!(stdout, MoveTo(start_x, cell_y), Print("│"))?;
        for col in 0..size {
            let value = board.get(row, col);
            let text = if app.game.is_paused() {
                format!("{:^width$}", "·", width = cw)
            } else if value == 0 {
                " ".repeat(cw)
            } else {
                format!("{:^width$}", value, width = cw)
            };
            let fg = if board.is_tile_correct(row, col) {
                app.theme.tile_home
            } else {
                app.theme.tile
            };
            if hint_cell == Some((row, col)) && !app.game.is_paused() {
                queue!(stdout, SetBackgroundColor(app.theme.hint_bg))?;
            }
            queue!(stdout, SetForegroundColor(fg), Print(text), ResetColor)?;
            queue!(stdout, SetForegroundColor(app.theme.border), Print("│"))?;
        }
    }
    let bottom_y = start_y + (size * 2) as u16;
    queue!(
        stdout,
        MoveTo(start_x, bottom_y),
        Print(bottom_rule(size, cw))
    )?;
    Ok(())
}

fn horizontal_rule(size: usize, cw: usize, top: bool) -> String {
    let (left, mid, right) = if top {
        ("┌", "┬", "┐")
    } else {
        ("├", "┼", "┤")
    };
    let bar = "─".repeat(cw);
    let mut line = String::from(left);
    for col in 0..size {
        line.push_str(&bar);
        line.push_str(if col + 1 == size { right } else { mid });
    }
    line
}

fn bottom_rule(size: usize, cw: usize) -> String {
    let bar = "─".repeat(cw);
    let mut line = String::from("└");
    for col in 0..size {
        line.push_str(&bar);
        line.push_str(if col + 1 == size { "┘" } else { "┴" });
    }
    line
}

pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn render_status(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let board_height = (app.game.size() * 2 + 1) as u16;
    let y = 2 + board_height + 1;

    let status = format!(
        "moves {}   time {}{}",
        app.game.moves(),
        format_time(app.game.elapsed().as_secs()),
        if app.game.is_paused() { "   PAUSED" } else { "" }
    );
    let x = term_width.saturating_sub(status.len() as u16) / 2;
    queue!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(app.theme.info),
        Print(&status)
    )?;

    let controls = "←↑↓→ slide   h hint   a auto-solve   p pause   n new   q quit";
    let x = term_width.saturating_sub(controls.chars().count() as u16) / 2;
    queue!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(app.theme.key),
        Print(controls)
    )?;

    if let Some(msg) = &app.message {
        let x = term_width.saturating_sub(msg.len() as u16) / 2;
        queue!(
            stdout,
            MoveTo(x, y + 4),
            SetForegroundColor(app.theme.fg),
            Print(msg)
        )?;
    }
    queue!(stdout, ResetColor)?;
    Ok(())
}

fn render_win_overlay(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let mut lines = vec![
        format!(
            "Solved in {} moves — {}",
            app.game.moves(),
            format_time(app.game.elapsed().as_secs())
        ),
        match app.last_rank {
            Some(rank) => format!("High score #{}", rank),
            None => String::from("Not a high score this time"),
        },
        String::new(),
    ];
    for (i, entry) in app.scores.for_size(app.game.size()).iter().take(5).enumerate() {
        lines.push(format!(
            "{}. {:>4} moves  {:>6}",
            i + 1,
            entry.moves,
            format_time(entry.time_secs)
        ));
    }
    lines.push(String::new());
    lines.push(String::from("n new game   q quit"));

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let x = term_width.saturating_sub(width as u16) / 2;
    let y0 = term_height.saturating_sub(lines.len() as u16 + 2) / 2;

    queue!(
        stdout,
        SetBackgroundColor(Color::Rgb { r: 20, g: 22, b: 30 }),
        SetForegroundColor(app.theme.success)
    )?;
    queue!(
        stdout,
        MoveTo(x, y0),
        Print(format!("╔{}╗", "═".repeat(width - 2)))
    )?;
    for (i, line) in lines.iter().enumerate() {
        let padded = format!("║ {:<width$} ║", line, width = width - 4);
        queue!(stdout, MoveTo(x, y0 + 1 + i as u16), Print(padded))?;
    }
    queue!(
        stdout,
        MoveTo(x, y0 + 1 + lines.len() as u16),
        Print(format!("╚{}╝", "═".repeat(width - 2))),
        ResetColor
    )?;
    Ok(())
}
