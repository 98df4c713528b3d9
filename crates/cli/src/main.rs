//! StoreTrack text client.
//!
//! A REPL over the issue-tracking API: quick/full login, then the
//! REPORT/UPDATE/EDIT/VIEW/SEARCH/REMOVE/PRINT menu.

use std::time::Duration;

use anyhow::Result;

mod api;
mod cache;
mod commands;
mod config;
mod input;
mod render;

use api::{ApiClient, QuickLoginOutcome};
use cache::StoreCache;
use input::{prompt, prompt_nonempty};

/// How long the store directory stays cached before it is refetched.
const STORE_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Runs quick login when a username is remembered, falling back to the
/// full login form when the server demands it. Returns the username that
/// logged in.
async fn login(client: &ApiClient) -> Result<String> {
    if let Some(saved) = config::load_last_username() {
        println!("Quick login for {} (leave password blank to switch user).", saved);
        let password = prompt("Password: ")?;

        if !password.is_empty() {
            match client.quick_login(&saved, &password).await {
                Ok(QuickLoginOutcome::Success) => {
                    println!("Quick login successful.");
                    return Ok(saved);
                }
                Ok(QuickLoginOutcome::Rejected {
                    require_full,
                    message,
                }) => {
                    println!("{}", message);
                    if require_full {
                        println!("Please log in with your full credentials.");
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
    }

    loop {
        println!("\n***** Log in *****");
        let email = prompt_nonempty("Email: ")?;
        let username = prompt_nonempty("Username: ")?;
        let password = prompt_nonempty("Password: ")?;
        let pin = prompt_nonempty("PIN: ")?;

        match client.full_login(&email, &username, &password, &pin).await {
            Ok(()) => {
                println!("Login successful.");
                return Ok(username);
            }
            Err(e) => println!("Login failed: {}", e),
        }
    }
}

fn print_menu() {
    println!("\nPlease select one of the following options:");
    println!("\nREPORT: Report a new issue");
    println!("UPDATE: Update the status of an existing issue");
    println!("EDIT:   Edit any attribute of an existing issue");
    println!("VIEW:   View all current issues or all issues for one store");
    println!("SEARCH: Search for an issue by store, category, status, device, or name");
    println!("REMOVE: Delete an issue");
    println!("PRINT:  Export a list of all known issues to a text file");
    println!("EXIT:   Exit the program");
}

#[tokio::main]
async fn main() -> Result<()> {
    let api_base = config::load_api_base();
    let client = ApiClient::new(api_base);

    println!("WELCOME TO THE STORETRACK ISSUE TRACKER");
    println!("Server: {}", client.base_url());

    let username = login(&client).await?;
    config::save_last_username(&username);

    let mut cache = StoreCache::new(Some(STORE_CACHE_TTL));

    loop {
        print_menu();
        let choice = prompt("\n: ")?.to_uppercase();

        let result = match choice.as_str() {
            "REPORT" => commands::report(&client, &mut cache).await,
            "UPDATE" => commands::update_status(&client, &mut cache).await,
            "EDIT" => commands::edit(&client, &mut cache).await,
            "VIEW" => commands::view(&client, &mut cache).await,
            "SEARCH" => commands::search(&client).await,
            "REMOVE" => commands::remove(&client, &mut cache).await,
            "PRINT" => commands::print_report(&client).await,
            "EXIT" => {
                println!("Thank you for using StoreTrack!");
                break;
            }
            _ => {
                println!("Invalid selection! Please try again.");
                Ok(())
            }
        };

        // A failed command reports and returns to the menu; nothing is
        // retried automatically.
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }

    Ok(())
}
