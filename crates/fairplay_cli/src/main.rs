//! `fairplay` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the database.
//! - Build the card, game and settings stores over one shared storage handle
//!   and run a single command against them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fairplay_core::model::card::Card;
use fairplay_core::store::selectors::{
    cards_by_holder, deck_stats, partner_load, partner_profile, unassigned_minutes,
};
use fairplay_core::{
    init_logging, open_db, AppConfig, CardStatus, CardStore, GameStore, Locale, PartnerId,
    ResetOptions, SessionRepository, SettingsStore, SqliteKeyValueStorage,
    SqliteSessionRepository,
};
use log::info;
use std::path::PathBuf;

/// Fair Play - split household responsibilities as a card game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database path (overrides FAIRPLAY_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides FAIRPLAY_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute log directory (overrides FAIRPLAY_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deck totals and per-partner load
    Stats,
    /// List cards in deck order
    List {
        /// partnerA, partnerB or none (unassigned)
        #[arg(long)]
        holder: Option<String>,
    },
    /// Give a card to a partner
    Assign { card: String, partner: PartnerId },
    /// Return a card to the shared deck
    Release { card: String },
    /// Set a card's status without changing its holder
    Status { card: String, status: CardStatus },
    /// Pause a card, or resume it when already paused
    Pause { card: String },
    /// Shuffle the deck order
    Shuffle,
    /// Deal unassigned cards so both partners carry similar minutes
    Deal,
    /// Restore the starting deck
    Reset {
        /// Overwrite the saved deck instead of deleting it
        #[arg(long)]
        keep_storage: bool,
    },
    /// Add points to the current game
    Score { value: Option<u32> },
    /// Record the current game in the session log and start over
    Finish,
    /// Show recently finished games
    Sessions {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show, set (en|he) or toggle the interface language
    Locale { value: Option<String> },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(dir) = args.log_dir {
        config.log_dir = dir;
    }

    init_logging(&config.log_level, &config.log_dir).context("failed to start logging")?;
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let storage = SqliteKeyValueStorage::try_new(&conn)?;
    let sessions = SqliteSessionRepository::try_new(&conn)?;

    let mut cards = CardStore::new(&storage);
    let mut game = GameStore::new(&storage);
    let mut settings = SettingsStore::new(&storage);
    let locale = settings.locale();
    info!(
        "event=cli_command module=cli status=start command={:?}",
        args.command
    );

    match args.command {
        Command::Stats => {
            let deck = cards.state();
            let stats = deck_stats(deck);
            println!(
                "cards={} unassigned={} assigned={} paused={} minutes={} unassigned_minutes={}",
                stats.total,
                stats.unassigned,
                stats.assigned,
                stats.paused,
                stats.time_estimate,
                unassigned_minutes(deck)
            );
            for partner in PartnerId::ALL {
                let load = partner_load(deck, partner);
                println!(
                    "{} ({}) minutes={} active={} paused={}",
                    partner_profile(deck, partner).name,
                    partner,
                    load.total_minutes,
                    load.active,
                    load.paused
                );
            }
        }
        Command::List { holder } => {
            let deck = cards.state();
            let listed: Vec<&Card> = match holder.as_deref() {
                None => deck.ordered_cards().collect(),
                Some("none") => cards_by_holder(deck, None),
                Some(value) => cards_by_holder(deck, Some(value.parse()?)),
            };
            for card in listed {
                print_card(card, locale);
            }
        }
        Command::Assign { card, partner } => {
            cards.assign_card(&card, partner)?;
            println!("{card} -> {partner}");
        }
        Command::Release { card } => {
            cards.release_card(&card)?;
            println!("{card} released");
        }
        Command::Status { card, status } => {
            cards.set_card_status(&card, status)?;
            println!("{card} is {status}");
        }
        Command::Pause { card } => {
            let status = cards.toggle_pause(&card)?;
            println!("{card} is {status}");
        }
        Command::Shuffle => {
            cards.shuffle_deck();
            for card in cards.state().ordered_cards() {
                print_card(card, locale);
            }
        }
        Command::Deal => {
            let dealt = cards.deal_evenly();
            println!("dealt {dealt} card(s)");
        }
        Command::Reset { keep_storage } => {
            cards.reset(ResetOptions {
                clear_storage: !keep_storage,
            });
            println!("deck restored");
        }
        Command::Score { value } => {
            match value {
                Some(value) => game.increment_score(value),
                None => game.increment_score_by_one(),
            }
            let state = game.state();
            println!(
                "score={} level={} streak={}",
                state.score, state.level, state.streak
            );
        }
        Command::Finish => match game.finish_session(&sessions) {
            Some(id) => println!("session {id} recorded"),
            None => println!("nothing to record"),
        },
        Command::Sessions { limit } => {
            for session in sessions.load_recent_sessions(limit)? {
                println!(
                    "#{} {} score={} level={}",
                    session.id,
                    session.created_at.to_rfc3339(),
                    session.score,
                    session.level
                );
            }
        }
        Command::Locale { value } => {
            match value.as_deref() {
                None => {}
                Some("toggle") => {
                    settings.toggle_locale();
                }
                Some(code) => settings.set_locale(code.parse()?),
            }
            println!("{}", settings.locale());
        }
    }

    Ok(())
}

fn print_card(card: &Card, locale: Locale) {
    let holder = card.holder.map_or("-", PartnerId::as_str);
    println!(
        "{:<24} {:<14} {:<8} {:>4}m  {}",
        card.id,
        card.status.as_str(),
        holder,
        card.time_estimate(),
        card.title.get(locale)
    );
}
