use clap::{Parser, Subcommand};
use dashboard_core::config::{parse_base_url, ClientConfig};
use dashboard_core::protocol::{ItemId, LaunchItem, Note};
use dashboard_core::view_state::{Collection, DashboardSnapshot, DeleteOutcome, ViewState};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard_cli")]
struct Args {
    /// Service address; overrides DASHBOARD_API_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request bound in milliseconds; overrides DASHBOARD_HTTP_TIMEOUT_MS.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Print the dashboard snapshot as JSON instead of plain text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load both collections and print everything.
    Show,
    Launchers,
    Notes,
    AddLauncher {
        #[arg(long)]
        name: String,
        #[arg(long)]
        path: String,
    },
    Launch {
        id: ItemId,
    },
    AddNote {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Replace a note's title and content.
    UpdateNote {
        id: ItemId,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        content: String,
    },
    DeleteNote {
        id: ItemId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.base_url.as_deref() {
        config.base_url = parse_base_url(url)?;
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    let mut view = ViewState::from_config(&config);
    view.load().await;
    for collection in view.degraded() {
        eprintln!("warning: {} unavailable, showing none", collection_label(*collection));
    }

    match args.command {
        Command::Show => print_snapshot(&view.snapshot(), args.json)?,
        Command::Launchers => print_launch_items(view.launch_items(), args.json)?,
        Command::Notes => print_notes(view.notes(), args.json)?,
        Command::AddLauncher { name, path } => {
            if view.add_launcher(&name, &path).await.is_ok() {
                print_launch_items(view.launch_items(), args.json)?;
            }
        }
        Command::Launch { id } => {
            if view.launch(&id).await.is_ok() {
                eprintln!("launch requested for {id}");
            }
        }
        Command::AddNote { title, content } => {
            if view.add_note(&title, &content).await.is_ok() {
                print_notes(view.notes(), args.json)?;
            }
        }
        Command::UpdateNote { id, title, content } => {
            view.note_store().update(&id, &title, &content).await?;
            view.reload().await;
            print_notes(view.notes(), args.json)?;
        }
        Command::DeleteNote { id } => {
            let outcome = view.delete_note(&id).await;
            if let DeleteOutcome::Stale { .. } = outcome {
                eprintln!("warning: notes below may be out of date");
            }
            print_notes(view.notes(), args.json)?;
        }
    }

    if let Some(err) = view.error() {
        anyhow::bail!("{err}");
    }
    Ok(())
}

fn collection_label(collection: Collection) -> &'static str {
    match collection {
        Collection::LaunchItems => "launch items",
        Collection::Notes => "notes",
    }
}

fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }
    println!("Launchers");
    print_launch_items(&snapshot.launch_items, false)?;
    println!();
    println!("Notes");
    print_notes(&snapshot.notes, false)
}

fn print_launch_items(items: &[LaunchItem], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  [{}] {}  {}", item.id, item.name, item.path);
    }
    Ok(())
}

fn print_notes(notes: &[Note], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }
    if notes.is_empty() {
        println!("  (none)");
    }
    for note in notes {
        let title = if note.title.is_empty() { "(untitled)" } else { &note.title };
        println!("  [{}] {}", note.id, title);
        for line in note.content.lines() {
            println!("      {line}");
        }
    }
    Ok(())
}
