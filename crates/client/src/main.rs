//! seminar CLI entry point.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seminar_client::admin::AdminSession;
use seminar_client::cli::admin::{AdminAction, AdminCommand, SaveArgs};
use seminar_client::cli::export::IcsArgs;
use seminar_client::cli::schedule::{NextArgs, ScheduleArgs, ValidateArgs};
use seminar_client::cli::submit::SubmitArgs;
use seminar_client::cli::{Cli, Commands, OutputFormat};
use seminar_client::output::{format_output, json as json_output, pretty};
use seminar_client::{
    load_settings, Config, FormRelayClient, GitHubClient, SubmissionForm, SubmitOutcome,
};
use seminar_core::calendar::{event_link, generate_ics, google_calendar_url};
use seminar_core::document::DocumentStore;
use seminar_core::event::{
    find_event, next_upcoming, parse_schedule, render, DisplayZone, EventRecord, ScheduleCriteria,
    ScheduleError,
};
use seminar_core::settings::SiteSettings;
use seminar_core::submission::{
    relay_fields, validate_draft, AbstractStats, RelayMetadata, SubmissionDraft,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seminar=info,seminar_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let settings = load_settings(&cli.settings);

    match cli.command {
        Commands::Schedule(args) => run_schedule(args, cli.format, &settings)?,
        Commands::Next(args) => run_next(args, cli.format, &settings)?,
        Commands::Validate(args) => run_validate(args, cli.format, cli.quiet)?,
        Commands::Ics(args) => run_ics(args, cli.format, &config, &settings)?,
        Commands::Submit(args) => {
            run_submit(args, cli.format, cli.quiet, &config, &settings).await?
        }
        Commands::Admin(cmd) => run_admin(cmd, cli.format, cli.quiet, &config, settings).await?,
    }

    Ok(())
}

fn read_schedule(path: &Path) -> Result<Vec<EventRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_schedule(&text).with_context(|| format!("Invalid schedule in {}", path.display()))
}

fn display_zone(local_time: bool, settings: &SiteSettings) -> DisplayZone {
    if local_time {
        DisplayZone::Local
    } else {
        settings.home_zone()
    }
}

fn run_schedule(args: ScheduleArgs, format: OutputFormat, settings: &SiteSettings) -> Result<()> {
    let events = read_schedule(&args.file)?;
    let mut criteria = ScheduleCriteria::new()
        .with_query(args.query)
        .with_topic(args.topic);
    if let Some(level) = args.level {
        criteria = criteria.with_level(level);
    }

    let view = render(&events, &criteria, args.now.unwrap_or_else(Utc::now));
    match format {
        OutputFormat::Json => println!("{}", json_output::format_schedule(&view)),
        OutputFormat::Pretty => println!(
            "{}",
            pretty::format_schedule(&view, display_zone(args.local_time, settings), settings)
        ),
    }
    Ok(())
}

fn run_next(args: NextArgs, format: OutputFormat, settings: &SiteSettings) -> Result<()> {
    let events = read_schedule(&args.file)?;
    let next = next_upcoming(&events, args.now.unwrap_or_else(Utc::now));
    match (format, next) {
        (OutputFormat::Json, _) => println!("{}", format_output(&next, format)),
        (OutputFormat::Pretty, Some(event)) => println!(
            "{}",
            pretty::format_event(event, display_zone(args.local_time, settings), settings)
        ),
        (OutputFormat::Pretty, None) => println!("No upcoming talks."),
    }
    Ok(())
}

fn run_validate(args: ValidateArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    match parse_schedule(&text) {
        Ok(events) => {
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(&json!({ "valid": true, "events": events.len() }), format)
                ),
                OutputFormat::Pretty if !quiet => {
                    println!("{}: {} valid events", args.file.display(), events.len())
                }
                OutputFormat::Pretty => {}
            }
            Ok(())
        }
        Err(ScheduleError::InvalidRecords(records)) => {
            match format {
                OutputFormat::Json => {
                    let errors: Vec<String> = records.iter().map(ToString::to_string).collect();
                    println!(
                        "{}",
                        format_output(&json!({ "valid": false, "errors": errors }), format)
                    );
                }
                OutputFormat::Pretty => println!("{}", pretty::format_record_errors(&records)),
            }
            bail!("{} has {} invalid event(s)", args.file.display(), records.len())
        }
        Err(error) => {
            Err(error).with_context(|| format!("Invalid schedule in {}", args.file.display()))
        }
    }
}

fn run_ics(
    args: IcsArgs,
    format: OutputFormat,
    config: &Config,
    settings: &SiteSettings,
) -> Result<()> {
    let events = read_schedule(&args.file)?;
    let Some(event) = find_event(&events, &args.id) else {
        bail!("No event with id '{}'", args.id);
    };

    let output = args.output_path(event);
    std::fs::write(&output, generate_ics(event, settings))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    let google = google_calendar_url(event, settings)?;
    let link = (!config.site_url.is_empty()).then(|| event_link(&config.site_url, &event.id));

    match format {
        OutputFormat::Json => println!(
            "{}",
            format_output(
                &json!({
                    "file": output.display().to_string(),
                    "google_calendar_url": google.as_str(),
                    "link": link,
                }),
                format
            )
        ),
        OutputFormat::Pretty => {
            println!("Wrote {}", output.display());
            println!("Google Calendar: {}", google);
            if let Some(link) = link {
                println!("Link: {}", link);
            }
        }
    }
    Ok(())
}

fn build_draft(args: &SubmitArgs) -> Result<SubmissionDraft> {
    let mut draft = match &args.draft {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid draft in {}", path.display()))?
        }
        None => SubmissionDraft::default(),
    };

    let fields = [
        (&args.title, &mut draft.title),
        (&args.speakers, &mut draft.speakers),
        (&args.email, &mut draft.email),
        (&args.affiliation, &mut draft.affiliation),
    ];
    for (flag, field) in fields {
        if let Some(value) = flag {
            *field = value.trim().to_string();
        }
    }
    if let Some(path) = &args.abstract_file {
        draft.abstract_text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .trim()
            .to_string();
    }
    if !args.references.is_empty() {
        draft.references = args.references.join("\n");
    }
    if args.notes.is_some() {
        draft.notes = args.notes.clone();
    }
    Ok(draft)
}

async fn run_submit(
    args: SubmitArgs,
    format: OutputFormat,
    quiet: bool,
    config: &Config,
    settings: &SiteSettings,
) -> Result<()> {
    let draft = build_draft(&args)?;
    let meta = RelayMetadata::from_settings(settings, &config.site_url);
    let stats = AbstractStats::of(&draft.abstract_text);

    if args.dry_run {
        let report = validate_draft(&draft);
        match format {
            OutputFormat::Json => {
                let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
                let warnings: Vec<String> =
                    report.warnings.iter().map(ToString::to_string).collect();
                let fields: serde_json::Map<String, serde_json::Value> = relay_fields(&draft, &meta)
                    .into_iter()
                    .map(|(k, v)| (k, v.into()))
                    .collect();
                println!(
                    "{}",
                    format_output(
                        &json!({ "errors": errors, "warnings": warnings, "fields": fields }),
                        format
                    )
                );
            }
            OutputFormat::Pretty => {
                println!("{}", pretty::format_report(&report, stats));
                if report.is_submittable() && !quiet {
                    for (name, value) in relay_fields(&draft, &meta) {
                        println!("{name}: {value}");
                    }
                }
            }
        }
        return Ok(());
    }

    let relay = FormRelayClient::new(config.relay_endpoint(settings));
    let mut form = SubmissionForm::new(relay, meta);
    form.set_draft(draft);

    match form.submit().await? {
        SubmitOutcome::Blocked(report) => {
            println!("{}", pretty::format_report(&report, stats));
            bail!("Proposal not submitted, fix the errors above")
        }
        SubmitOutcome::Sent(report) => {
            match format {
                OutputFormat::Json => {
                    println!("{}", format_output(&json!({ "submitted": true }), format))
                }
                OutputFormat::Pretty => {
                    if !quiet {
                        println!("{}", pretty::format_report(&report, stats));
                    }
                    println!("Proposal submitted successfully!");
                }
            }
            Ok(())
        }
    }
}

async fn run_admin(
    cmd: AdminCommand,
    format: OutputFormat,
    quiet: bool,
    config: &Config,
    settings: SiteSettings,
) -> Result<()> {
    let store = GitHubClient::new(&config.github_api_url);
    let mut session = AdminSession::new(store, config, settings);
    let cache = session.credentials_mut();
    cache.set_token(&cmd.auth.token);
    cache.set_owner(&cmd.auth.owner);
    cache.set_repo(&cmd.auth.repo);

    // Ctrl-C cancels whichever remote call is in flight.
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let path = cmd.path.unwrap_or_else(|| config.schedule_path.clone());
    session.connect_with(&cancel).await?;
    session.load_with(&path, &cancel).await?;

    match &cmd.action {
        AdminAction::Show => {
            if let Some(document) = session.document() {
                match format {
                    OutputFormat::Json => println!(
                        "{}",
                        format_output(
                            &json!({ "document": document, "content": session.buffer() }),
                            format
                        )
                    ),
                    OutputFormat::Pretty => {
                        if !quiet {
                            println!("{}\n", pretty::format_document(document));
                        }
                        println!("{}", session.buffer());
                    }
                }
            }
        }
        AdminAction::Validate => {
            let check = session.validate()?;
            match check.schedule {
                Some(Err(error)) => {
                    if !error.records().is_empty() {
                        println!("{}", pretty::format_record_errors(error.records()));
                    }
                    bail!("{path}: {error}");
                }
                Some(Ok(count)) => println!("{path}: {count} valid events"),
                None => println!("{path}: valid JSON"),
            }
        }
        AdminAction::Format { .. } => {
            session.format()?;
        }
        AdminAction::Sort { .. } => {
            session.sort()?;
        }
        AdminAction::AddEvent { .. } => {
            session.add_event_template(Utc::now())?;
        }
        AdminAction::Restore { from, .. } => {
            let text = std::fs::read_to_string(from)
                .with_context(|| format!("Failed to read {}", from.display()))?;
            session.restore(text)?;
        }
        AdminAction::Backup { dir } => {
            let backup = session.backup(Local::now().date_naive())?;
            let target = dir.join(&backup.file_name);
            std::fs::write(&target, &backup.content)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(&json!({ "file": target.display().to_string() }), format)
                ),
                OutputFormat::Pretty => println!("Backup written to {}", target.display()),
            }
        }
    }

    if let Some(save) = cmd.action.save_args() {
        finish_edit(&mut session, save, format, &cancel).await?;
    }
    Ok(())
}

/// Saves the edited buffer when asked, otherwise prints it for review.
async fn finish_edit<S: DocumentStore>(
    session: &mut AdminSession<S>,
    save: &SaveArgs,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    if !save.save {
        println!("{}", session.buffer());
        return Ok(());
    }

    let receipt = session.save_with(save.message.as_deref(), cancel).await?;
    match format {
        OutputFormat::Json => println!("{}", format_output(&receipt, format)),
        OutputFormat::Pretty => println!("Saved (version {})", receipt.version.as_str()),
    }
    Ok(())
}
