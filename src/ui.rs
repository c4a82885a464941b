use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use crossterm::{queue, Result};
use crossterm::{terminal, cursor, style};
use crossterm::event::{Event, KeyCode, MouseEventKind, MouseEvent, MouseButton, read, poll, EnableMouseCapture, DisableMouseCapture, KeyModifiers};
use crossterm::style::{Color, Stylize};
use log::info;
use rand::rngs::ThreadRng;

use msweeper_field::{Cell, Coord, Field, Reveal, State, MINE};
use crate::clock::Stopwatch;
use crate::options::{IconSet, Theme};

const HEADER_ROWS: u16 = 1;
// each cell is drawn as its icon followed by a space
const CELL_WIDTH: u16 = 2;
const TICK: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

fn glyph(field: &Field, point: Coord, theme: &Theme, icons: &IconSet) -> Glyph {
    let plain = |ch, fg, bg| Glyph { ch, fg, bg, bold: false };
    let Some(cell) = field.get(point) else {
        return plain(' ', theme.bg_void, theme.bg_void);
    };
    let state = field.state();
    match cell {
        Cell::Revealed(MINE) => {
            let bg = if state == State::Lost(point) { theme.bg_detonated } else { theme.bg_exposed };
            plain(icons.mine, theme.mine, bg)
        },
        Cell::Revealed(0) => plain(icons.empty, theme.bg_exposed, theme.bg_exposed),
        Cell::Revealed(n) => Glyph { ch: char::from(b'0' + n), fg: theme.num(n), bg: theme.bg_exposed, bold: true },
        Cell::Hidden(flagged) => match (state, flagged, field.is_mine(point)) {
            (State::Lost(_), true, false) => plain(icons.wrong_flag, theme.mine, theme.bg_hidden),
            (State::Lost(_), false, true) => plain(icons.mine, theme.mine, theme.bg_hidden),
            (State::Won, _, true) | (_, true, _) => plain(icons.flag, theme.flag, theme.bg_hidden),
            _ => plain(icons.hidden, Color::Reset, theme.bg_hidden),
        },
    }
}

fn status_message(state: State) -> &'static str {
    match state {
        State::Won => "YOU WIN! (press r to restart)",
        State::Lost(_) => "YOU LOSE (press r to restart)",
        State::Ready | State::Playing => "",
    }
}

/// Flag counter on the left, timer on the right, and the outcome in between.
fn header(field: &Field, seconds: u64, width: usize) -> String {
    let left = format!(" {:03}", field.flags_left());
    let right = format!("{:03} ", seconds);
    let room = width.saturating_sub(left.len() + right.len());
    let msg = status_message(field.state());
    let msg = if msg.len() <= room { msg } else { "" };
    let before = (room - msg.len()) / 2;
    let after = room - msg.len() - before;
    format!("{}{}{}{}{}", left, " ".repeat(before), msg, " ".repeat(after), right)
}

struct Camera {
    field: Field,
    clock: Stopwatch,
    rng: ThreadRng,
    theme: Theme,
    icons: IconSet,
    w: u16,
    h: u16,
    x: isize,
    y: isize,
}

impl Camera {
    fn new(field: Field, (w, h): (u16, u16), theme: Theme, icons: IconSet) -> Self {
        let mut cam = Self { field, clock: Stopwatch::new(), rng: rand::thread_rng(), theme, icons, w, h, x: 0, y: 0 };
        cam.center();
        cam
    }

    fn cols(&self) -> isize {
        (self.w / CELL_WIDTH) as isize
    }

    fn rows(&self) -> isize {
        self.h.saturating_sub(HEADER_ROWS) as isize
    }

    fn center(&mut self) {
        self.x = (self.field.width() as isize - self.cols()) / 2;
        self.y = (self.field.height() as isize - self.rows()) / 2;
    }

    /// The board position under a terminal cell, if it isn't on the header.
    fn to_board(&self, col: u16, row: u16) -> Option<Coord> {
        (row >= HEADER_ROWS).then(|| (self.x + (col / CELL_WIDTH) as isize, self.y + (row - HEADER_ROWS) as isize))
    }

    fn move_by(&mut self, dx: isize, dy: isize) {
        let (cols, rows) = (self.cols().max(1), self.rows().max(1));
        self.x = (self.x + dx).clamp(1 - cols, self.field.width() as isize - 1);
        self.y = (self.y + dy).clamp(1 - rows, self.field.height() as isize - 1);
    }

    fn draw_header(&self) -> Result<()> {
        let line = header(&self.field, self.clock.seconds(Instant::now()), self.w as usize);
        queue!(
            stdout(),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(line.with(Color::White).on(self.theme.header).bold()),
        )
    }

    fn draw_entire_board(&self) -> Result<()> {
        queue!(stdout(), cursor::MoveTo(0, HEADER_ROWS))?;
        for y in self.y..self.y+self.rows() {
            for x in self.x..self.x+self.cols() {
                let g = glyph(&self.field, (x, y), &self.theme, &self.icons);
                let text = format!("{} ", g.ch).with(g.fg).on(g.bg);
                queue!(stdout(), style::PrintStyledContent(if g.bold { text.bold() } else { text }))?;
            }
            if self.w % CELL_WIDTH != 0 {
                queue!(stdout(), style::PrintStyledContent(" ".on(self.theme.bg_void)))?;
            }
            queue!(stdout(), cursor::MoveToNextLine(1))?;
        }
        Ok(())
    }

    fn draw(&self) -> Result<()> {
        self.draw_header()?;
        self.draw_entire_board()
    }

    fn click(&mut self, col: u16, row: u16) -> Result<()> {
        let Some(pos) = self.to_board(col, row) else { return Ok(()) };
        match self.field.reveal(pos, &mut self.rng) {
            Reveal::Ignored => return Ok(()),
            Reveal::Exploded => info!("lost after {}s", self.clock.seconds(Instant::now())),
            Reveal::Exposed(_) => if self.field.state() == State::Won {
                info!("won after {}s", self.clock.seconds(Instant::now()));
            },
        }
        self.clock.sync(self.field.state(), Instant::now());
        self.draw()
    }

    fn flag(&mut self, col: u16, row: u16) -> Result<()> {
        let Some(pos) = self.to_board(col, row) else { return Ok(()) };
        if self.field.toggle_flag(pos) {
            self.draw()?;
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        info!("restarting");
        self.field.clear();
        self.clock.reset();
        self.draw()
    }

    fn pan(&mut self, dx: isize, dy: isize) -> Result<()> {
        self.move_by(dx, dy);
        self.draw_entire_board()
    }

    fn resize(&mut self, w: u16, h: u16) -> Result<()> {
        self.w = w;
        self.h = h;
        self.center();
        queue!(stdout(), terminal::Clear(terminal::ClearType::All))?;
        self.draw()
    }
}

fn event_loop(cam: &mut Camera) -> Result<()> {
    let mut hold: Option<(u16, u16)> = None;
    let mut click_active = false;

    loop {
        stdout().flush()?;
        if !poll(TICK)? {
            // keep the timer moving
            cam.draw_header()?;
            continue;
        }
        let mut ev;
        // read off buffered drag events instead of doing them all for smoothnesss
        loop {
            ev = read()?;
            if matches!(ev, Event::Mouse(MouseEvent { kind: MouseEventKind::Drag(_), .. })) && poll(Duration::from_secs(0))? {
                continue;
            }
            break;
        }
        match ev {
            Event::Key(event) => match event.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('r') => cam.restart()?,
                KeyCode::Char('w') | KeyCode::Up => cam.pan(0, -1)?,
                KeyCode::Char('a') | KeyCode::Left => cam.pan(-1, 0)?,
                KeyCode::Char('s') | KeyCode::Down => cam.pan(0, 1)?,
                KeyCode::Char('d') | KeyCode::Right => cam.pan(1, 0)?,
                _ => {},
            },
            Event::Resize(w, h) => cam.resize(w, h)?,
            Event::Mouse(event) => match event.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    hold = Some((event.column, event.row));
                    click_active = true;
                },
                MouseEventKind::Drag(MouseButton::Left) => if let Some((col, row)) = hold {
                    let dx = (col as isize - event.column as isize) / CELL_WIDTH as isize;
                    let dy = row as isize - event.row as isize;
                    if dx != 0 || dy != 0 {
                        cam.pan(dx, dy)?;
                        hold = Some(((col as isize - dx * CELL_WIDTH as isize) as u16, event.row));
                        click_active = false;
                    }
                },
                MouseEventKind::Up(MouseButton::Left) => {
                    hold = None;
                    if click_active {
                        cam.click(event.column, event.row)?;
                        click_active = false;
                    }
                },
                MouseEventKind::Down(MouseButton::Right) => cam.flag(event.column, event.row)?,
                _ => {},
            },
        }
    }

    Ok(())
}

pub fn game_loop(field: Field, theme: Theme, icons: IconSet) -> Result<()> {
    terminal::enable_raw_mode()?;
    queue!(stdout(), terminal::EnterAlternateScreen, terminal::DisableLineWrap, cursor::Hide, EnableMouseCapture)?;

    let mut cam = Camera::new(field, terminal::size()?, theme, icons);
    let result = cam.draw().and_then(|()| event_loop(&mut cam));

    queue!(stdout(), cursor::Show, terminal::EnableLineWrap, terminal::LeaveAlternateScreen, DisableMouseCapture)?;
    stdout().flush()?;
    terminal::disable_raw_mode()?;
    result
}
