//! Detective Quest: the Mansion Mystery
//!
//! Explore the mansion, collect clues and name the culprit.

use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use detective_quest::console::{self, Transcript};
use detective_quest::tui::App;
use detective_quest::{Result, Session};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use tracing_subscriber::EnvFilter;

/// Mansion mystery text adventure
#[derive(Parser, Debug)]
#[command(name = "detective-quest")]
#[command(author, version, about = "Detective Quest - find the culprit!", long_about = None)]
struct Args {
    /// Line-based console instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// Log filter, e.g. "info" or "detective_quest=debug" (RUST_LOG wins)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the session transcript when the game ends
    #[arg(long, value_enum)]
    transcript: Option<TranscriptFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TranscriptFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let session = if args.plain {
        let mut session = Session::new();
        console::play(&mut session, io::stdin().lock(), stdout())?;
        session
    } else {
        run_tui()?
    };

    match args.transcript {
        Some(TranscriptFormat::Json) => println!("{}", Transcript::of(&session).to_json()?),
        Some(TranscriptFormat::Text) => print!("{}", Transcript::of(&session).to_text()),
        None => {}
    }

    Ok(())
}

fn run_tui() -> Result<Session> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = main_loop(&mut terminal, &mut app);

    // Cleanup, even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing Detective Quest!                   ║");
    println!("║                                                        ║");
    println!("║  The mansion keeps its secrets until next time.        ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(app.session)
}

fn main_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while app.running {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
