//! inkwash - terminal viewer and CLI for watercolor polygon generation
//!
//! Usage:
//!   inkwash [view] [options]        Launch the viewer (click to regenerate)
//!   inkwash render -o out.png       Render one run headlessly
//!   inkwash benchmark               Time complete runs
//!   inkwash config                  Print the effective configuration

mod cli;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use ratatui_image::{picker::{Picker, ProtocolType}, protocol::StatefulProtocol, StatefulImage};

use inkwash::{Animator, FrameQueue, Phase, PixmapSurface};

use cli::{BenchmarkArgs, RenderArgs, SettingsArgs, cmd_benchmark, cmd_render, init_logging, surface_to_image};

// Terminal cell size assumed when sizing the surface from the terminal
const CELL_WIDTH: u32 = 8;
const CELL_HEIGHT: u32 = 16;

// One display refresh
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "inkwash", version)]
#[command(about = "Layered watercolor-style polygon generation", long_about = None)]
struct Cli {
    /// Log progress to stderr (headless commands only)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive viewer: click, space or enter regenerates
    View(ViewArgs),
    /// Render one complete run to PNG (and optionally SVG)
    Render(RenderArgs),
    /// Time complete runs
    Benchmark(BenchmarkArgs),
    /// Print the effective configuration as YAML
    Config(SettingsArgs),
}

#[derive(Args, Debug, Default)]
struct ViewArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Surface width in pixels (default: terminal width)
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels (default: terminal height)
    #[arg(long)]
    height: Option<u32>,

    /// Refresh the preview every N frames
    #[arg(long, default_value_t = 4)]
    redraw_every: u32,

    /// Directory for snapshots saved with `s`
    #[arg(long, default_value = ".")]
    snapshot_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Render(args)) => {
            init_logging(cli.verbose);
            cmd_render(&args)
        }
        Some(Command::Benchmark(args)) => {
            init_logging(cli.verbose);
            cmd_benchmark(&args)
        }
        Some(Command::Config(args)) => cmd_config(&args),
        Some(Command::View(args)) => run_tui(&args),
        None => run_tui(&ViewArgs {
            redraw_every: 4,
            snapshot_dir: PathBuf::from("."),
            ..ViewArgs::default()
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn cmd_config(args: &SettingsArgs) -> Result<()> {
    let config = args.load()?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

// ============ Viewer ============

/// Application state for the viewer
struct App {
    /// Driver owning the raster surface and frame queue
    animator: Animator<PixmapSurface>,
    /// Image picker for terminal protocol detection
    picker: Picker,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    /// Flag to indicate image needs re-rendering
    needs_image_update: bool,
    /// Frames since the preview was last refreshed
    frames_since_redraw: u32,
    redraw_every: u32,
    /// Time spent in the last frame
    frame_ms: f64,
    snapshot_dir: PathBuf,
    /// Last status message (snapshot path or error)
    status: String,
    /// Should exit
    should_quit: bool,
}

impl App {
    fn new(args: &ViewArgs) -> Result<Self> {
        let config = args.settings.load()?;

        let (cols, rows) = crossterm::terminal::size().context("reading terminal size")?;
        let width = args.width.unwrap_or(cols as u32 * CELL_WIDTH);
        let height = args.height.unwrap_or(rows as u32 * CELL_HEIGHT);
        let surface = PixmapSurface::new(width, height).context("creating viewer surface")?;

        // Initialize image picker - force Sixel protocol
        let mut picker = Picker::from_termios()
            .unwrap_or_else(|_| Picker::new((CELL_WIDTH as u16, CELL_HEIGHT as u16)));
        picker.protocol_type = ProtocolType::Sixel;

        let mut app = App {
            animator: Animator::new(config, surface, FrameQueue::new()),
            picker,
            image_state: None,
            needs_image_update: true,
            frames_since_redraw: 0,
            redraw_every: args.redraw_every.max(1),
            frame_ms: 0.0,
            snapshot_dir: args.snapshot_dir.clone(),
            status: String::new(),
            should_quit: false,
        };

        app.regenerate();
        Ok(app)
    }

    fn regenerate(&mut self) {
        self.animator.generate();
        self.frames_since_redraw = 0;
        self.needs_image_update = true;
    }

    /// Run the frame due at this refresh, if any.
    fn step(&mut self) {
        let start = Instant::now();
        if !self.animator.tick() {
            return;
        }
        self.frame_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.frames_since_redraw += 1;

        let finished = self.animator.phase() == Phase::Idle;
        if finished || self.frames_since_redraw >= self.redraw_every {
            self.frames_since_redraw = 0;
            self.needs_image_update = true;
        }
    }

    fn update_image(&mut self) {
        if !self.needs_image_update {
            return;
        }
        match surface_to_image(self.animator.surface()) {
            Ok(img) => self.image_state = Some(self.picker.new_resize_protocol(img)),
            Err(e) => self.status = format!("preview failed: {}", e),
        }
        self.needs_image_update = false;
    }

    fn save_snapshot(&mut self) {
        let name = format!("inkwash-{}.png", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.snapshot_dir.join(name);
        self.status = match self.animator.surface().save_png(&path) {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => format!("save failed: {}", e),
        };
    }
}

fn run_tui(args: &ViewArgs) -> Result<()> {
    // Initialize terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app, then run; restore the terminal either way
    let result = App::new(args).and_then(|mut app| run_app(&mut terminal, &mut app));

    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.step();
        app.update_image();

        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('g') => {
                        app.regenerate();
                    }
                    KeyCode::Char('s') => {
                        app.save_snapshot();
                    }
                    _ => {}
                },
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.regenerate();
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let running = app.animator.phase() == Phase::Running;
    let state = app.animator.state();
    let total = app.animator.config().total;

    let title = if running {
        format!(" Painting {}/{} ", state.iterations, total)
    } else {
        format!(" Run {} done ", app.animator.runs())
    };
    let border_color = if running { Color::Yellow } else { Color::Green };

    // Create inner area for image (accounting for border)
    let image_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = image_block.inner(main_layout[0]);
    frame.render_widget(image_block, main_layout[0]);

    if let Some(ref mut image_state) = app.image_state {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }

    let surface = app.animator.surface();
    let footer = format!(
        "{}x{}  frame {:.1}ms  {}   click/space regenerate  s save  q quit",
        surface.pixmap().width(),
        surface.pixmap().height(),
        app.frame_ms,
        app.status,
    );
    let help = Paragraph::new(footer)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, main_layout[1]);
}
