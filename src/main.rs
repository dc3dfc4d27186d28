//! inventory-tui binary - drives the enhancement layer over a sample page.
//!
//! The real embedder would receive pages from the inventory backend; this
//! binary builds one representative page (lookup form, item form with an
//! attachment field, an items table, stat cards) and runs the event loop
//! against it. Submissions and navigations are logged and acknowledged with
//! a notice instead of hitting a server.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inventory_tui::enhance::notify::Severity;
use inventory_tui::page::{
    ActionLink, Field, FieldKind, FileState, Form, NavMenu, Page, ServerMessage, StatCard,
    SubmitButton, Table, FINALIZE_ACTION, LOOKUP_FIELD,
};
use inventory_tui::timer::Throttle;
use inventory_tui::{compose, hit_map, poll_event, Config, Enhancer, Outbound, Screen};

/// Terminal input enhancement layer for a barcode-driven inventory client.
#[derive(Debug, Parser)]
#[command(name = "inventory-tui", version, about)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "INVENTORY_TUI_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path. Raw mode owns the terminal, so logs go to a file.
    #[arg(long, default_value = "inventory-tui.log")]
    log_file: PathBuf,

    /// Log filter, e.g. "debug" or "inventory_tui=trace".
    #[arg(long, env = "INVENTORY_TUI_LOG", default_value = "info")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot open log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!(config = ?args.config, "starting");

    let mut size = crossterm::terminal::size()?;
    let mut enhancer = Enhancer::new(sample_page(), config.clone(), size, Instant::now());
    let mut screen = Screen::new()?;
    let mut redraw = Throttle::new();

    while enhancer.running() {
        let now = Instant::now();
        let timeout = enhancer
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(Duration::from_millis(100))
            .min(Duration::from_millis(100));

        if let Some(event) = poll_event(timeout)? {
            if let inventory_tui::InputEvent::Resize(w, h) = event {
                size = (w, h);
            }
            enhancer.handle_event(event, Instant::now());
        }

        let now = Instant::now();
        enhancer.tick(now);

        for outbound in enhancer.take_outbox() {
            match outbound {
                Outbound::Submit(submission) => {
                    info!(form = %submission.form, action = %submission.action,
                        values = ?submission.values, "would submit");
                    enhancer.notify(
                        now,
                        format!("Submitted \"{}\" to {}", submission.form, submission.action),
                        Severity::Success,
                    );
                }
                Outbound::Navigate(target) => {
                    info!(%target, "would navigate");
                    enhancer.notify(now, format!("Navigating to {}", target), Severity::Info);
                }
            }
        }

        if redraw.allow(now, Duration::from_millis(33)) {
            let lines = compose(
                &enhancer.page,
                enhancer.notifier.notices(),
                enhancer.confirm.as_ref(),
                enhancer.focus,
                &config.ui,
            );
            screen.draw(&lines, enhancer.scroll_y, size)?;
            enhancer.set_hit_map(hit_map(&lines, enhancer.scroll_y, size.1));
        }
    }

    info!("shutting down");
    Ok(())
}

/// One page covering every enhanced widget kind.
fn sample_page() -> Page {
    let mut lookup = Form::new("Patrimony lookup", "/buscar");
    lookup.fields.push(
        Field::new(LOOKUP_FIELD, "Patrimony code", FieldKind::Search)
            .with_title("Scan a barcode or type the code"),
    );
    lookup.submit = Some(SubmitButton::new("Search"));

    let mut item = Form::new("Item registration", "/item/salvar");
    item.fields
        .push(Field::new("descricao", "Description", FieldKind::Text).required());
    item.fields
        .push(Field::new("localizacao", "Location", FieldKind::Text).required());
    item.fields
        .push(Field::new("obs", "Notes", FieldKind::TextArea).with_max_length(200));
    item.fields.push(Field::new(
        "foto",
        "Photo (path)",
        FieldKind::File(FileState::default()),
    ));
    item.submit = Some(SubmitButton::new("Save"));
    item.links.push(ActionLink::new("Back", "/itens"));
    item.links.push(ActionLink::new("New item", "/item/novo"));
    item.links
        .push(ActionLink::new("Delete", "/item/excluir/7"));
    item.links
        .push(ActionLink::new("Finalize conference", FINALIZE_ACTION));

    let mut table = Table::new(
        "Registered items",
        vec!["Code".into(), "Description".into(), "Location".into()],
    );
    table.rows.push(vec![
        "2023001".into(),
        "Monitor Dell 24\"".into(),
        "Room 101".into(),
    ]);
    table.rows.push(vec![
        "2023002".into(),
        "Mechanical keyboard".into(),
        "Room 101".into(),
    ]);
    table.rows.push(vec![
        "2023003".into(),
        "Projector Epson".into(),
        "Auditorium".into(),
    ]);

    Page {
        nav: Some(NavMenu::new(vec![
            "Home".into(),
            "Items".into(),
            "Conferences".into(),
            "Reports".into(),
        ])),
        forms: vec![lookup, item],
        tables: vec![table],
        stat_cards: vec![
            StatCard::new("Total items", "250"),
            StatCard::new("Conferences", "12"),
            StatCard::new("Pending", "3"),
        ],
        server_messages: vec![ServerMessage {
            text: "Signed in successfully".into(),
            severity: Severity::Success,
        }],
    }
}
