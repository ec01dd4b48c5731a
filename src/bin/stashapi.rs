//! Stash API CLI binary.
//!
//! A command-line interface for interacting with the Stash API.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

use stashapi::cli::{Cli, Command, Entity};
use stashapi::output::PrettyPrint;
use stashapi::{
    AssignmentUpdateParams, Create, Delete, Get, List, MarkerPage, NewAssignment, StashClient,
    StoragePolicy, StoragePolicyAssignment, Update,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let client = match StashClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set STASH_API_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &StashClient, cli: Cli) -> stashapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            limit,
            marker,
        } => handle_list(client, entity, limit, marker.as_deref(), cli.json).await,
        Command::Resolve {
            target_type,
            target_id,
        } => {
            let assignment = StoragePolicyAssignment::for_target(
                client,
                target_type.into(),
                &target_id,
            )
            .await?;
            output_single(&assignment, cli.json)
        }
        Command::Create { policy, target } => {
            let assignment =
                StoragePolicyAssignment::create(client, NewAssignment::user(&policy, &target))
                    .await?;
            output_single(&assignment, cli.json)
        }
        Command::Update { id, policy } => {
            let assignment =
                StoragePolicyAssignment::update(client, id, AssignmentUpdateParams::policy(&policy))
                    .await?;
            output_single(&assignment, cli.json)
        }
        Command::Delete { id } => {
            StoragePolicyAssignment::delete(client, id.clone()).await?;
            println!("Deleted assignment {id}");
            Ok(())
        }
        Command::Assign { policy, target } => {
            let assignment = StoragePolicyAssignment::assign(client, &policy, &target).await?;
            output_single(&assignment, cli.json)
        }
    }
}

async fn handle_get(
    client: &StashClient,
    entity: Entity,
    id: String,
    json: bool,
) -> stashapi::Result<()> {
    match entity {
        Entity::Policy => {
            let policy = StoragePolicy::get(client, id).await?;
            output_single(&policy, json)
        }
        Entity::Assignment => {
            let assignment = StoragePolicyAssignment::get(client, id).await?;
            output_single(&assignment, json)
        }
    }
}

async fn handle_list(
    client: &StashClient,
    entity: Entity,
    limit: Option<u32>,
    marker: Option<&str>,
    json: bool,
) -> stashapi::Result<()> {
    let limit = limit.unwrap_or(stashapi::DEFAULT_PAGE_SIZE);

    match entity {
        Entity::Policy => {
            let page = StoragePolicy::list_page(client, &Default::default(), marker, limit).await?;
            output_page(&page, json, |p| PolicyRow::from(p))
        }
        Entity::Assignment => {
            eprintln!("Error: Assignments must be resolved for a specific target");
            eprintln!("Hint: Use 'stashapi resolve --target-id <id>'");
            Err(stashapi::StashError::ConfigMissing(
                "target required for listing assignments".to_string(),
            ))
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> stashapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &MarkerPage<T>, json: bool, to_row: F) -> stashapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.entries)?);
    } else {
        let rows: Vec<R> = page.entries.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        match &page.next_marker {
            Some(marker) if page.has_more() => {
                println!("\nMore available (pass --marker {marker})");
            }
            _ => println!("\n(end)"),
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct PolicyRow {
    id: String,
    name: String,
}

impl From<&StoragePolicy> for PolicyRow {
    fn from(p: &StoragePolicy) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone().unwrap_or_default(),
        }
    }
}
