use clap::Parser;
use dialoguer::{Input, Select};
use portal_scout::{
    BrowserSession, DEFAULT_BASE_URL, FetchEvent, Gender, Query, RickAndMortyCatalog, ViewState,
};
use std::process;

/// Browse the Rick and Morty character catalog from the terminal.
///
/// Without filter arguments the browser starts an interactive session:
/// search by name, gender and species, then page through the results.
/// With filter arguments (or --json) it performs a single search and exits.
#[derive(Debug, Parser)]
#[command(name = "portal_scout", version, about)]
struct Cli {
    /// Base URL of the character catalog API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Filter by character name (substring match)
    #[arg(long)]
    name: Option<String>,

    /// Filter by gender: female, male, genderless or unknown
    #[arg(long)]
    gender: Option<Gender>,

    /// Filter by species, e.g. Human
    #[arg(long)]
    species: Option<String>,

    /// Print the first result page as JSON and exit
    #[arg(long)]
    json: bool,
}

/// Prints fetch progress to stdout.
fn print_fetch_event(event: FetchEvent) {
    match event {
        FetchEvent::FetchStarted { url } => {
            println!("Fetching {url} ...");
        }
        FetchEvent::PageLoaded {
            character_count,
            total,
        } => match total {
            Some(total) => println!("Loaded {character_count} of {total} character(s).\n"),
            None => println!("Loaded {character_count} character(s).\n"),
        },
        FetchEvent::NoMatches => {
            println!("No characters match.\n");
        }
        FetchEvent::FetchFailed { message } => {
            eprintln!("Fetch failed: {message}\n");
        }
    }
}

/// Renders the status line, character cards and pagination footer.
fn render(state: &ViewState) {
    if let Some(error) = &state.error {
        println!("Error: {error}");
    } else if let Some(info) = &state.info {
        println!("Found {} characters", info.count);
    } else if state.characters.is_empty() {
        println!("No results");
    }
    println!();

    for enriched in &state.characters {
        let character = &enriched.character;
        println!("  {}", character.name);
        println!(
            "    Gender: {} | Species: {}",
            character.gender, character.species
        );
        println!("    Location: {}", character.location.name);
        println!("    First seen in: {}", enriched.first_episode_name);
        println!();
    }

    if let Some(info) = &state.info {
        let prev = if info.prev.is_some() { "available" } else { "-" };
        let next = if info.next.is_some() { "available" } else { "-" };
        println!(
            "  {} page(s) total | previous: {prev} | next: {next}",
            info.pages
        );
        println!();
    }
}

/// Prompts for a full filter set: name, gender and species.
fn prompt_query(current: &Query) -> dialoguer::Result<Query> {
    let name: String = Input::new()
        .with_prompt("Name (empty for any)")
        .with_initial_text(current.name.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let genders = ["Any", "Female", "Male", "Genderless", "Unknown"];
    let gender_choice = Select::new()
        .with_prompt("Gender")
        .items(&genders)
        .default(0)
        .interact()?;
    let gender = match genders[gender_choice] {
        "Female" => Some(Gender::Female),
        "Male" => Some(Gender::Male),
        "Genderless" => Some(Gender::Genderless),
        "Unknown" => Some(Gender::Unknown),
        _ => None,
    };

    let species_choices = ["Any", "Human", "Humanoid", "Cronenberg", "Other..."];
    let species_choice = Select::new()
        .with_prompt("Species")
        .items(&species_choices)
        .default(0)
        .interact()?;
    let species = match species_choices[species_choice] {
        "Any" => None,
        "Other..." => {
            let custom: String = Input::new()
                .with_prompt("Species")
                .allow_empty(true)
                .interact_text()?;
            if custom.is_empty() { None } else { Some(custom) }
        }
        chosen => Some(chosen.to_string()),
    };

    Ok(Query {
        name: if name.trim().is_empty() { None } else { Some(name) },
        gender,
        species,
    })
}

/// The interactive browse loop: render, offer actions, run the chosen one.
fn run_interactive(session: &mut BrowserSession<RickAndMortyCatalog>) -> dialoguer::Result<()> {
    println!("Rick & Morty Characters\n");
    session.load_initial(print_fetch_event);

    loop {
        render(session.state());

        let mut actions = vec!["Search", "Clear filters"];
        let state = session.state();
        if !state.loading {
            if state.info.as_ref().is_some_and(|i| i.prev.is_some()) {
                actions.push("Previous page");
            }
            if state.info.as_ref().is_some_and(|i| i.next.is_some()) {
                actions.push("Next page");
            }
        }
        actions.push("Quit");

        let choice = Select::new()
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()?;

        match actions[choice] {
            "Search" => {
                let query = prompt_query(session.query())?;
                session.search(query, print_fetch_event);
            }
            "Clear filters" => session.clear_filters(print_fetch_event),
            "Previous page" => {
                session.prev_page(print_fetch_event);
            }
            "Next page" => {
                session.next_page(print_fetch_event);
            }
            _ => return Ok(()),
        }
    }
}

/// Runs a single filtered fetch and prints the result, as text or JSON.
fn run_once(session: &mut BrowserSession<RickAndMortyCatalog>, query: Query, json: bool) {
    if json {
        session.search(query, |_| {});
        match serde_json::to_string_pretty(session.state()) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("Error: failed to serialize results: {e}");
                process::exit(1);
            }
        }
    } else {
        session.search(query, print_fetch_event);
        render(session.state());
    }

    if session.state().error.is_some() {
        process::exit(1);
    }
}

fn main() {
    let cli = Cli::parse();

    let catalog = RickAndMortyCatalog::with_base_url(cli.base_url);
    let mut session = BrowserSession::new(catalog);

    let one_shot =
        cli.json || cli.name.is_some() || cli.gender.is_some() || cli.species.is_some();

    if one_shot {
        let query = Query {
            name: cli.name,
            gender: cli.gender,
            species: cli.species,
        };
        run_once(&mut session, query, cli.json);
        return;
    }

    if let Err(e) = run_interactive(&mut session) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
