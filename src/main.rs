//! CodeQuest - Entry Point
//!
//! Interactive command loop against the CodeQuest backend: browse the quest
//! catalog, submit solutions, track XP and level progress, check the
//! leaderboard. Works degraded when the backend is unreachable.

use codequest::api::{
    ApiClient, ExecutionRequest, HintRequest, RegistrationRequest, TimeFilter,
};
use codequest::catalog::QuestCatalog;
use codequest::core::config::AppConfig;
use codequest::core::error::{QuestError, Result};
use codequest::identity::{Identity, IdentitySession};
use codequest::progress::{
    self, GuestStorage, ProgressEvent, ProgressSnapshot, ProgressStore,
};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(name = "codequest", about = "CodeQuest learning platform client")]
struct Args {
    /// Backend service URL (overrides config and environment)
    #[arg(long)]
    backend_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bearer token for a registered identity
    #[arg(long)]
    token: Option<String>,

    /// Display name to use with --token
    #[arg(long, default_value = "Adventurer")]
    username: String,

    /// Opaque account id issued by the auth provider (derived from the
    /// username when omitted)
    #[arg(long)]
    user_id: Option<String>,

    /// Start an anonymous guest session immediately
    #[arg(long)]
    guest: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("codequest=info")
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env(),
    };
    if let Some(url) = args.backend_url {
        config.backend_url = url;
    }
    config.validate().map_err(QuestError::InvalidArgument)?;

    tracing::info!("CodeQuest client starting against {}", config.backend_url);

    let rt = Runtime::new()?;
    let api = ApiClient::from_config(&config)?;
    let store = ProgressStore::new(
        ApiClient::from_config(&config)?,
        GuestStorage::new(&config.guest_storage_dir),
    );

    if !rt.block_on(api.health()) {
        tracing::warn!("backend unreachable - catalog and progress will run degraded");
    }

    let catalog = rt.block_on(QuestCatalog::load(&api));
    if catalog.is_fallback() {
        println!("(offline mode: showing the built-in quest list)");
    }

    let mut session = IdentitySession::new();
    let mut snapshot = ProgressSnapshot::default();

    if args.guest {
        session.start_guest();
        println!("Started a guest session. Progress stays on this machine.");
    } else if let Some(token) = args.token {
        let id = external_id_for(args.user_id.as_deref(), &args.username);
        session.sign_in(Identity::registered(id, args.username.clone()), token);
        snapshot = reload_progress(&rt, &store, &session);
    }

    println!("\n=== CODEQUEST ===");
    println!("Learn Python through gamified quests");
    println!();
    println!("Commands:");
    println!("  quests                    - List the quest catalog");
    println!("  quest <id>                - Show a quest's instructions and template");
    println!("  submit <id> <file>        - Run a solution file and record completion");
    println!("  hint <id> <file>          - Ask for a hint on your current code");
    println!("  profile                   - Show level, XP and achievements");
    println!("  leaderboard [time] [cat]  - Show rankings (all-time/daily/weekly/monthly)");
    println!("  guest                     - Start a guest session");
    println!("  login <token> [name] [id] - Sign in with an auth provider token");
    println!("  register <email> <name>   - Create a backend profile (needs login)");
    println!("  logout                    - End the current session");
    println!("  quit                      - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        match command {
            "quests" => list_quests(&catalog, &session, &snapshot),
            "quest" => match rest.first() {
                Some(id) => show_quest(&rt, &api, id),
                None => println!("Usage: quest <id>"),
            },
            "submit" => match (rest.first(), rest.get(1)) {
                (Some(id), Some(file)) => submit_quest(
                    &rt, &api, &store, &catalog, &session, &mut snapshot, id, file,
                ),
                _ => println!("Usage: submit <id> <file>"),
            },
            "hint" => match (rest.first(), rest.get(1)) {
                (Some(id), Some(file)) => show_hint(&rt, &api, &snapshot, id, file),
                _ => println!("Usage: hint <id> <file>"),
            },
            "profile" => show_profile(&session, &snapshot),
            "leaderboard" => show_leaderboard(&rt, &api, &rest),
            "guest" => {
                session.start_guest();
                snapshot = reload_progress(&rt, &store, &session);
                println!("Started a guest session. Progress stays on this machine.");
            }
            "login" => match rest.first() {
                Some(token) => {
                    let name = rest.get(1).copied().unwrap_or("Adventurer");
                    let id = external_id_for(rest.get(2).copied(), name);
                    session.sign_in(Identity::registered(id, name), *token);
                    snapshot = reload_progress(&rt, &store, &session);
                    println!("Signed in as {}.", name);
                }
                None => println!("Usage: login <token> [name] [id]"),
            },
            "register" => match (rest.first(), rest.get(1)) {
                (Some(email), Some(name)) => register(&rt, &api, &session, email, name),
                _ => println!("Usage: register <email> <name>"),
            },
            "logout" => {
                session.sign_out();
                snapshot = ProgressSnapshot::default();
                println!("Signed out.");
            }
            _ => println!("Unknown command. Type 'quests', 'profile' or 'quit'."),
        }
    }

    println!(
        "\nGoodbye! Level {}, {} XP, {} quests completed.",
        snapshot.level,
        snapshot.xp,
        snapshot.completed_count()
    );
    Ok(())
}

/// Opaque account id for a registered sign-in
///
/// Uses the auth provider's subject id when given, otherwise derives one
/// from the display name. The backend keys profiles by this id, so it is
/// never the display name verbatim.
fn external_id_for(explicit: Option<&str>, name: &str) -> String {
    match explicit {
        Some(id) => id.to_string(),
        None => format!("ext-{}", name.to_lowercase().replace(char::is_whitespace, "-")),
    }
}

/// Load progress for the active identity, degrading to a default snapshot
///
/// The identity cannot change while this runs; `IdentitySession` carries
/// the generation counter for callers that overlap a load with a sign-out.
fn reload_progress<T: progress::ProgressTransport>(
    rt: &Runtime,
    store: &ProgressStore<T>,
    session: &IdentitySession,
) -> ProgressSnapshot {
    let (loaded, degraded) = rt.block_on(store.load_or_default(session));
    if let Some(e) = degraded {
        println!(
            "Note: {}. Starting from a fresh snapshot; progress is kept locally.",
            e
        );
    }
    loaded
}

fn list_quests(catalog: &QuestCatalog, session: &IdentitySession, snapshot: &ProgressSnapshot) {
    println!();
    println!("--- Quest Catalog ({} quests) ---", catalog.len());
    for quest in catalog.iter() {
        let marker = if progress::is_quest_completed(snapshot, &quest.id) {
            "[done]"
        } else if progress::is_quest_unlocked(snapshot, quest, session.is_active()) {
            "      "
        } else {
            "[lock]"
        };
        println!(
            "  {} {:10} {:30} {}  +{} XP  ({})",
            marker,
            quest.id,
            quest.title,
            quest.difficulty.label(),
            quest.xp_reward,
            quest.estimated_time
        );
    }
    if !session.is_active() {
        println!("  Sign in (or type 'guest') to unlock quests beyond beginner.");
    }
    println!();
}

fn show_quest(rt: &Runtime, api: &ApiClient, id: &str) {
    match rt.block_on(api.fetch_quest(id)) {
        Ok(detail) => {
            println!();
            println!("{} - {}", detail.quest.id, detail.quest.title);
            println!("{}", detail.quest.description);
            if !detail.instructions.is_empty() {
                println!("\nInstructions:");
                for step in &detail.instructions {
                    println!("  - {}", step);
                }
            }
            if !detail.code_template.is_empty() {
                println!("\nTemplate:\n{}", detail.code_template);
            }
            println!();
        }
        Err(QuestError::NotFound(id)) => println!("Quest '{}' does not exist.", id),
        Err(e) => println!("Could not fetch quest: {}", e),
    }
}

#[allow(clippy::too_many_arguments)]
fn submit_quest<T: progress::ProgressTransport>(
    rt: &Runtime,
    api: &ApiClient,
    store: &ProgressStore<T>,
    catalog: &QuestCatalog,
    session: &IdentitySession,
    snapshot: &mut ProgressSnapshot,
    id: &str,
    file: &str,
) {
    if !session.is_active() {
        println!("Sign in or start a guest session before submitting a quest.");
        return;
    }

    let quest = match catalog.get(id) {
        Ok(quest) => quest,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let code = match std::fs::read_to_string(file) {
        Ok(code) => code,
        Err(e) => {
            println!("Could not read {}: {}", file, e);
            return;
        }
    };

    let request = ExecutionRequest {
        code,
        quest_id: quest.id.clone(),
    };
    let report = match rt.block_on(api.execute_code(&request)) {
        Ok(report) => report,
        Err(e) => {
            println!("Code execution failed: {}", e);
            return;
        }
    };

    println!("\nOutput:\n{}", report.output);
    for result in &report.test_results {
        let mark = if result.passed { "PASS" } else { "FAIL" };
        println!("  [{}] {} ({} pts)", mark, result.description, result.points);
    }

    if !report.success {
        println!("Some tests failed. Keep trying!");
        return;
    }

    let completion = match progress::apply_quest_completion(snapshot, quest) {
        Ok(completion) => completion,
        Err(e) => {
            println!("Could not record completion: {}", e);
            return;
        }
    };

    // Apply locally first; the save below reconciles best-effort
    *snapshot = completion.snapshot;
    for event in &completion.events {
        match event {
            ProgressEvent::QuestCompleted { id } => println!("Quest '{}' completed!", id),
            ProgressEvent::LeveledUp { new_level } => {
                println!("Level up! You are now level {}!", new_level)
            }
        }
    }
    if completion.events.is_empty() {
        println!("Quest '{}' was already completed; no XP awarded.", quest.id);
    }

    if let Err(e) = rt.block_on(store.save(session, snapshot)) {
        println!("Note: {}. Your progress is kept for this session.", e);
    }
}

fn show_hint(rt: &Runtime, api: &ApiClient, snapshot: &ProgressSnapshot, id: &str, file: &str) {
    let code = match std::fs::read_to_string(file) {
        Ok(code) => code,
        Err(e) => {
            println!("Could not read {}: {}", file, e);
            return;
        }
    };

    let request = HintRequest {
        quest_id: id.to_string(),
        code,
        progress: snapshot.clone(),
    };
    match rt.block_on(api.request_hint(&request)) {
        Ok(response) => println!("\nHint: {}\n", response.hint),
        Err(e) => println!("No hint available right now: {}", e),
    }
}

fn show_profile(session: &IdentitySession, snapshot: &ProgressSnapshot) {
    let name = session
        .identity()
        .map(|i| i.display_name.as_str())
        .unwrap_or("(not signed in)");

    println!();
    println!("--- {} ---", name);
    println!("  Level {} | {} XP", snapshot.level, snapshot.xp);

    let filled = (progress::xp_progress_fraction(snapshot) * 20.0) as usize;
    println!("  [{}{}]", "#".repeat(filled), "-".repeat(20 - filled));
    println!("  {} XP to next level", progress::xp_to_next_level(snapshot));
    println!("  {} quests completed", snapshot.completed_count());
    if !snapshot.achievements.is_empty() {
        println!("  Achievements:");
        for achievement in &snapshot.achievements {
            println!("    - {}", achievement);
        }
    }
    println!();
}

fn show_leaderboard(rt: &Runtime, api: &ApiClient, args: &[&str]) {
    let time = match args.first() {
        Some(raw) => match raw.parse::<TimeFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                println!("{}", e);
                return;
            }
        },
        None => TimeFilter::default(),
    };
    let category = args.get(1).copied();

    match rt.block_on(api.fetch_leaderboard(time, category)) {
        Ok(entries) => {
            println!();
            println!(
                "--- Leaderboard ({}, {}) ---",
                time,
                category.unwrap_or("all")
            );
            for (rank, entry) in entries.iter().enumerate() {
                println!(
                    "  #{:<3} {:20} Level {:3} | {:6} XP | {} quests",
                    rank + 1,
                    entry.username,
                    entry.level,
                    entry.xp,
                    entry.completed_quests
                );
            }
            println!();
        }
        Err(e) => println!("Leaderboard unavailable: {}", e),
    }
}

fn register(rt: &Runtime, api: &ApiClient, session: &IdentitySession, email: &str, name: &str) {
    let Some(token) = session.bearer_token() else {
        println!("Registration needs a signed-in identity (use 'login <token>' first).");
        return;
    };
    let Some(identity) = session.identity() else {
        println!("No active session.");
        return;
    };

    let request = RegistrationRequest {
        external_id: identity.id.clone(),
        email: email.to_string(),
        username: name.to_string(),
    };
    match rt.block_on(api.register(token, &request)) {
        Ok(()) => println!("Profile created for {}.", name),
        Err(e) => println!("Registration failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_id_prefers_explicit_subject() {
        assert_eq!(external_id_for(Some("auth0|12345"), "Ada"), "auth0|12345");
    }

    #[test]
    fn test_external_id_derived_is_distinct_from_name() {
        let id = external_id_for(None, "Ada Lovelace");
        assert_eq!(id, "ext-ada-lovelace");
        assert_ne!(id, "Ada Lovelace");
    }
}
