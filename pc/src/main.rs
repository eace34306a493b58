use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use companion::cli::{Cli, Command, OutputFormat};
use companion::clipboard::{Clipboard, ClipboardChain, Osc52Clipboard, SystemClipboard};
use companion::config::Config;
use companion::export::{DirDownloader, Downloader};
use companion::presentation::Resources;
use companion::session::{Direction, MASTER_MARKER, NavEntry, NavOutcome, Session, SlideView, save_intake};
use companion::storage::{FileStore, StorageKeys};
use companion::LearnerProfile;

const NOTHING_TO_EXPORT: &str = "Click some prompts or add notes first, then download!";
const DOWNLOADED: &str = "Downloaded! Open in any LLM to continue learning.";

fn setup_logging(verbose: bool) -> Result<()> {
    // Log to a file so command output stays clean
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("companion")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("companion.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(site) = cli.site {
        config.site_dir = site;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    info!("companion starting");

    let resources = Resources::load(&config.site_dir).context("Failed to load presentation resources")?;
    let mut store = FileStore::open(&config.data_dir).context("Failed to open session store")?;

    if let Command::Intake {
        name,
        profession,
        curiosity,
    } = &cli.command
    {
        let keys = StorageKeys::new(resources.config.storage_prefix.clone());
        let profile = LearnerProfile::new(name.clone(), profession.clone(), curiosity.clone());
        save_intake(&mut store, &keys, &profile).context("Failed to save intake")?;
        println!("{} Welcome to {}", "✓".green(), resources.config.title.cyan());
        return Ok(());
    }

    let mut session = match Session::open(resources, store) {
        Ok(session) => session,
        Err(e) if e.needs_intake() => {
            return Err(e).context("Run `pc intake --profession <role> --curiosity <topic>` first");
        }
        Err(e) => return Err(e).context("Failed to open session"),
    };

    match cli.command {
        Command::Intake { .. } => unreachable!("handled above"),
        Command::Show { format } => cmd_show(&session, format)?,
        Command::Goto { slide } => {
            if session.go_to(slide)? {
                print_slide(&session.slide_view());
            } else {
                println!(
                    "{} Slide {} is not in this deck (1-{})",
                    "!".yellow(),
                    slide,
                    session.config().total_slides
                );
            }
        }
        Command::Next => cmd_step(&mut session, Direction::Next)?,
        Command::Prev => cmd_step(&mut session, Direction::Prev)?,
        Command::Collect { prompt, slide } => {
            let slide = slide.unwrap_or_else(|| session.current_slide());
            let label = select_label(&session, slide, &prompt);
            let activation = session.activate(slide, &label)?;

            let mut clipboard = clipboard_chain(&config);
            println!("{}", activation.text);
            println!("{} {}", "✓".green(), clipboard.copy_prompt(&activation.text));
            if !activation.inserted {
                println!("  (already in your collection)");
            }
            println!("  Collected prompts: {}", activation.collected_count.to_string().cyan());
        }
        Command::Note { text, clear, slide } => {
            let slide = slide.unwrap_or_else(|| session.current_slide());
            let text = match (clear, text) {
                (true, _) => String::new(),
                (false, Some(text)) => text,
                (false, None) => eyre::bail!("Give the note text, or --clear to remove it"),
            };
            if session.set_note(slide, &text)? {
                println!("{} Saved note for slide {}", "✓".green(), slide);
            } else {
                println!("{} Cleared note for slide {}", "✓".green(), slide);
            }
        }
        Command::List { format } => cmd_list(&session, format)?,
        Command::Nav => {
            for entry in session.nav_menu() {
                match &entry {
                    NavEntry::Section { label } => println!("{}", label.bold().yellow()),
                    NavEntry::Slide { active: true, .. } => println!("{} {}", ">".cyan(), entry.to_string().cyan()),
                    NavEntry::Slide { .. } => println!("  {}", entry),
                }
            }
        }
        Command::Export { out, stdout } => {
            let today = chrono::Local::now().date_naive();
            match session.export(today) {
                None => println!("{} {}", "!".yellow(), NOTHING_TO_EXPORT),
                Some(artifact) if stdout => print!("{}", artifact.body),
                Some(artifact) => {
                    let mut downloader = DirDownloader::new(out.unwrap_or_else(|| config.export_dir.clone()));
                    let path = downloader.deliver(&artifact).context("Download failed")?;
                    println!("{} {}", "✓".green(), DOWNLOADED);
                    println!("  {}", path.display());
                }
            }
        }
        Command::Reset => {
            session.reset()?;
            println!("{} Session cleared", "✓".green());
        }
    }

    Ok(())
}

fn clipboard_chain(config: &Config) -> ClipboardChain {
    let primary: Option<Box<dyn Clipboard>> = if config.clipboard {
        Some(Box::new(SystemClipboard))
    } else {
        None
    };
    ClipboardChain::new(primary, Box::new(Osc52Clipboard::new(std::io::stderr())))
}

/// Map a prompt selector to a label: an exact label, `0`/`*`/`★` for the
/// master prompt, or the number shown next to a specialized prompt
fn select_label(session: &Session<FileStore>, slide: u32, selector: &str) -> String {
    let on_slide = move || session.prompts().iter().filter(move |p| p.slide == slide);

    if on_slide().any(|p| p.label == selector) {
        return selector.to_string();
    }
    if (matches!(selector, "0" | "*") || selector == MASTER_MARKER)
        && let Some(master) = on_slide().find(|p| p.is_master())
    {
        return master.label.clone();
    }
    if let Ok(n) = selector.parse::<usize>()
        && n > 0
        && let Some(p) = on_slide().filter(|p| !p.is_master()).nth(n - 1)
    {
        return p.label.clone();
    }
    selector.to_string()
}

fn cmd_show(session: &Session<FileStore>, format: OutputFormat) -> Result<()> {
    let view = session.slide_view();
    match format {
        OutputFormat::Text => print_slide(&view),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn cmd_step(session: &mut Session<FileStore>, direction: Direction) -> Result<()> {
    match session.step(direction)? {
        NavOutcome::Moved(_) => print_slide(&session.slide_view()),
        NavOutcome::LeaveToIntro => println!("{} Start of the deck: back to the intro", "←".cyan()),
        NavOutcome::LeaveToHelp => {
            println!("{} End of the deck", "→".cyan());
            println!("  Run `pc export` to download your prompts, then open the file in any LLM.");
        }
    }
    Ok(())
}

fn cmd_list(session: &Session<FileStore>, format: OutputFormat) -> Result<()> {
    let collection = session.collection();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(collection)?),
        OutputFormat::Text if collection.is_empty() => println!("No prompts collected yet"),
        OutputFormat::Text => {
            for (i, p) in collection.iter().enumerate() {
                println!(
                    "{}. {} {}",
                    i + 1,
                    format!("[Slide {}: {}]", p.slide, p.title).dimmed(),
                    p.label.bold()
                );
                println!("   {}", p.prompt);
            }
        }
    }
    Ok(())
}

fn print_slide(view: &SlideView) {
    println!(
        "{} {}",
        format!("Slide {}/{}:", view.number, view.total).cyan(),
        view.title.bold()
    );
    for p in view.prompts() {
        let collected = if p.collected { " ✓".green().to_string() } else { String::new() };
        println!("  {} {}{}", p.marker.yellow(), p.label, collected);
        println!("      {}", p.text.dimmed());
    }
    if let Some(note) = &view.note {
        println!("  {} {}", "Note:".bold(), note);
    }
}
