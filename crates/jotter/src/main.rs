//! `jot` - CLI for jotter
//!
//! This binary is the presentation layer: it renders note and checkout state
//! and forwards input to the library.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use clap::Parser;

use jotter::checkout::{Checkout, Field, SubmitOutcome};
use jotter::cli::{
    CheckoutCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    NewCommand, ShowCommand,
};
use jotter::{
    format_relative, init_logging, Clock, CommonMarkRenderer, Config, NoteStore, SqliteStore,
    SystemClock,
};

type Notes = NoteStore<SqliteStore, SystemClock>;

/// Longest preview line shown in listings.
const PREVIEW_CHARS: usize = 60;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::New(cmd) => handle_new(&config, cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Plans(cmd) => handle_plans(cmd.json),
        Command::Checkout(cmd) => handle_checkout(&config, cmd).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_notes(config: &Config) -> anyhow::Result<Notes> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("opening note database at {}", path.display()))?;
    Ok(NoteStore::open_with_key(
        store,
        SystemClock,
        config.storage.notes_key.clone(),
    )?)
}

fn select_existing(notes: &mut Notes, id: &str) -> anyhow::Result<()> {
    if !notes.select(id) {
        bail!("no note with id {id}");
    }
    Ok(())
}

fn handle_new(config: &Config, cmd: NewCommand) -> anyhow::Result<()> {
    let mut notes = open_notes(config)?;
    let note = notes.create()?;

    if cmd.title.is_some() || cmd.content.is_some() {
        let title = cmd.title.unwrap_or(note.title);
        let content = cmd.content.unwrap_or(note.content);
        notes.update(&note.id, &title, &content)?;
    }

    println!("{}", note.id);
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let notes = open_notes(config)?;
    let query = cmd.query.as_deref().unwrap_or_default();
    let found = notes.search(query);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("{}", Notes::empty_message(query));
        return Ok(());
    }

    let now = SystemClock.now_millis();
    for note in found {
        println!(
            "{}  {:<12} {}",
            note.id,
            format_relative(note.updated_at, now),
            note.display_title()
        );
        println!("    {}", preview_line(note.preview()));
    }
    Ok(())
}

fn preview_line(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default();
    if first.chars().count() > PREVIEW_CHARS {
        let cut: String = first.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let mut notes = open_notes(config)?;
    select_existing(&mut notes, &cmd.id)?;

    if cmd.html {
        print!("{}", notes.preview_html(&CommonMarkRenderer::with_extensions()));
        return Ok(());
    }

    if let Some(note) = notes.selected() {
        let now = SystemClock.now_millis();
        println!("# {}", note.display_title());
        println!(
            "(created {}, updated {})",
            format_relative(note.created_at, now),
            format_relative(note.updated_at, now)
        );
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

fn handle_edit(config: &Config, cmd: EditCommand) -> anyhow::Result<()> {
    let mut notes = open_notes(config)?;
    select_existing(&mut notes, &cmd.id)?;

    if let Some(title) = cmd.title {
        notes.edit_title(&title)?;
    }
    if let Some(content) = cmd.content {
        notes.edit_content(&content)?;
    }
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut notes = open_notes(config)?;
    notes.request_delete(&cmd.id);

    let Some(note) = notes.pending_delete() else {
        bail!("no note with id {}", cmd.id);
    };

    if !cmd.yes && !confirm(&format!(
        "Delete \"{}\"? This cannot be undone.",
        note.display_title()
    ))? {
        notes.cancel_delete();
        println!("Kept.");
        return Ok(());
    }

    notes.confirm_delete()?;
    println!("Deleted.");
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn handle_plans(json: bool) -> anyhow::Result<()> {
    let plans = Checkout::plans();
    if json {
        println!("{}", serde_json::to_string_pretty(plans)?);
        return Ok(());
    }

    for plan in plans {
        let badge = if plan.popular { "  (Most Popular)" } else { "" };
        println!(
            "{:<11} {:<11} ${}/{}{badge}",
            plan.id, plan.name, plan.price, plan.interval
        );
        for feature in plan.features {
            println!("    - {feature}");
        }
    }
    Ok(())
}

async fn handle_checkout(config: &Config, cmd: CheckoutCommand) -> anyhow::Result<()> {
    let mut checkout = Checkout::with_default_plan(&config.checkout.default_plan)?
        .with_processing_delay(config.processing_delay());
    if let Some(plan) = &cmd.plan {
        checkout.select_plan(plan)?;
    }

    checkout.set_field(Field::Email, &cmd.email);
    checkout.set_field(Field::CardNumber, &cmd.card);
    checkout.set_field(Field::Expiry, &cmd.expiry);
    checkout.set_field(Field::Cvc, &cmd.cvc);
    checkout.set_field(Field::Name, &cmd.name);
    if let Some(country) = &cmd.country {
        checkout.set_field(Field::Country, country);
    }

    let summary = checkout.order_summary();
    println!("Order Summary");
    println!("  {} plan (per {})", summary.plan.name, summary.plan.interval);
    for feature in summary.highlights {
        println!("    - {feature}");
    }
    println!("  Subtotal         ${}", summary.subtotal);
    println!("  Tax              ${}", summary.tax);
    println!("  Total due today  ${}", summary.total);
    println!();

    let outcome = checkout
        .submit_with(|c| println!("{}", c.submit_label()))
        .await;

    match outcome {
        SubmitOutcome::Succeeded(_) => {
            if let Some(notification) = checkout.take_notification() {
                println!("{}", notification.message());
            }
            if let Some(confirmation) = checkout.confirmation() {
                println!("{confirmation}");
            }
            Ok(())
        }
        SubmitOutcome::Rejected => {
            for (field, message) in checkout.errors().iter() {
                eprintln!("  {field}: {message}");
            }
            let message = checkout
                .take_notification()
                .map_or("Please fix the errors in the form", |n| n.message());
            bail!("{message}");
        }
        other => bail!("checkout did not complete: {other:?}"),
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Notes key:          {}", config.storage.notes_key);
                println!();
                println!("[Checkout]");
                println!("  Default plan:       {}", config.checkout.default_plan);
                println!(
                    "  Processing delay:   {} ms",
                    config.checkout.processing_delay_ms
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
