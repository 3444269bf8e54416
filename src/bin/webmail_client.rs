use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};

use webmail_client::api::http::HttpBackend;
use webmail_client::auth::token_store;
use webmail_client::compose::{ComposeForm, SubmitOutcome};
use webmail_client::config::{Config, load_config, log_path};
use webmail_client::domain::email::Priority;
use webmail_client::folders::FolderStore;
use webmail_client::terminal::run_tui;
use webmail_client::terminal::state::{Account, AppState, Section};

#[derive(Parser)]
#[command(name = "webmail_client")]
#[command(about = "Terminal client for a webmail REST backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the TUI
    Tui {
        /// Page shown on start
        #[arg(long, value_enum, default_value_t = StartPage::Inbox)]
        view: StartPage,
    },

    /// Send one email without opening the TUI
    Send {
        #[arg(long, required = true)]
        to: Vec<String>,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        body: String,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        /// File to attach (repeatable)
        #[arg(long)]
        attach: Vec<PathBuf>,

        /// Save as draft instead of sending
        #[arg(long)]
        draft: bool,
    },

    /// Store the backend API key in keyring
    SetApiKey,
}

#[derive(Clone, Copy, ValueEnum)]
enum StartPage {
    Inbox,
    Sent,
    Folders,
    Compose,
}

impl From<StartPage> for Section {
    fn from(p: StartPage) -> Self {
        match p {
            StartPage::Inbox => Section::Inbox,
            StartPage::Sent => Section::Sent,
            StartPage::Folders => Section::Folders,
            StartPage::Compose => Section::Compose,
        }
    }
}

fn backend_for(cfg: &Config) -> Result<HttpBackend> {
    let address = cfg.email_address()?;
    let api_key = token_store::resolve_api_key(address)?;
    HttpBackend::new(cfg.backend_url(), api_key)
}

// The TUI draws on the terminal, so its log records go to a file.
fn init_logger(cmd: &Command) -> Result<()> {
    if !matches!(cmd, Command::Tui { .. }) {
        env_logger::init();
        return Ok(());
    }
    let path = log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.cmd)?;

    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;

    match cli.cmd {
        Command::SetApiKey => {
            let address = cfg.email_address()?;
            eprintln!("Paste API key (end with Ctrl-D):");
            let mut key = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut key)?;
            token_store::save_api_key(address, key.trim())?;
            println!("Saved API key for {}", address);
            Ok(())
        }

        Command::Tui { view } => {
            let backend = backend_for(&cfg)?;
            let account = Account {
                address: cfg.email_address()?.to_string(),
                display_name: cfg.display_name().to_string(),
            };
            let state = AppState::new(account, FolderStore::new(cfg.folders.clone()));
            run_tui(state, &backend, view.into())
        }

        Command::Send {
            to,
            subject,
            body,
            priority,
            attach,
            draft,
        } => {
            let backend = backend_for(&cfg)?;
            let mut form = ComposeForm::new();
            for addr in to {
                form.receiver_email = addr;
                form.add_recipient();
            }
            form.subject = subject;
            form.body = body;
            form.set_priority(priority);
            for path in &attach {
                form.attach_file(path)?;
            }

            match form.submit(&backend, cfg.email_address()?, draft) {
                SubmitOutcome::Delivered => {
                    println!("{}", if draft { "Draft saved" } else { "Email sent" });
                    Ok(())
                }
                SubmitOutcome::Failed { alert } => Err(anyhow!(alert)),
                SubmitOutcome::Incomplete(msg) => Err(anyhow!(msg)),
            }
        }
    }
}
