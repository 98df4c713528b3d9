//! REPL command implementations.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use domain::models::issue::{IssuePayload, SUGGESTED_STATUSES};
use domain::models::store::StoreInfo;
use domain::models::Issue;

use crate::api::{ApiClient, SearchParams};
use crate::cache::StoreCache;
use crate::input::{prompt, prompt_nonempty, prompt_selection, prompt_yes_no};
use crate::render;

/// Fetch the store directory through the cache.
async fn load_stores(
    client: &ApiClient,
    cache: &mut StoreCache,
) -> Result<BTreeMap<String, StoreInfo>> {
    if let Some(stores) = cache.get() {
        return Ok(stores.clone());
    }
    let stores = client.get_stores().await?;
    cache.put(stores.clone());
    Ok(stores)
}

/// Prompt for a store number that exists in the directory. Returns the
/// store name and number, or None when the operator backs out.
async fn pick_store(
    client: &ApiClient,
    cache: &mut StoreCache,
) -> Result<Option<(String, i32)>> {
    let mut stores = load_stores(client, cache).await?;
    let mut refreshed = false;

    loop {
        let raw = prompt("Store number (or 'exit' to cancel): ")?;
        if raw.eq_ignore_ascii_case("exit") {
            return Ok(None);
        }
        let Ok(number) = raw.parse::<i32>() else {
            println!("Store number must be a number.");
            continue;
        };

        let found = stores
            .iter()
            .find(|(_, info)| info.store_number == number)
            .map(|(name, _)| name.clone());

        match found {
            Some(name) => return Ok(Some((name, number))),
            None if !refreshed => {
                // The cached directory may be stale; refetch once before
                // treating the number as wrong.
                println!("Store number not found; refreshing the store directory...");
                cache.invalidate();
                stores = load_stores(client, cache).await?;
                refreshed = true;

                let retry = stores
                    .iter()
                    .find(|(_, info)| info.store_number == number)
                    .map(|(name, _)| name.clone());
                match retry {
                    Some(name) => return Ok(Some((name, number))),
                    None => println!("Store number not found! Please enter a valid number."),
                }
            }
            None => println!("Store number not found! Please enter a valid number."),
        }
    }
}

/// Prompt for a store, list its issues, and pick one.
async fn pick_issue(client: &ApiClient, cache: &mut StoreCache) -> Result<Option<Issue>> {
    let Some((store_name, store_number)) = pick_store(client, cache).await? else {
        return Ok(None);
    };

    let issues = client.issues_by_store(Some(store_number), None).await?;
    if issues.is_empty() {
        println!("No issues for {}.", store_name);
        return Ok(None);
    }

    println!("\nIssues for {} (Store {}):", store_name, store_number);
    for (index, issue) in issues.iter().enumerate() {
        println!("{}", render::issue_line(index + 1, issue));
    }

    let selected = prompt_selection("\nSelect an issue number: ", issues.len())?;
    Ok(issues.into_iter().nth(selected - 1))
}

/// REPORT: create a new issue.
pub async fn report(client: &ApiClient, cache: &mut StoreCache) -> Result<()> {
    println!("\n***** Report a new issue *****");

    let Some((store_name, store_number)) = pick_store(client, cache).await? else {
        println!("Report cancelled.");
        return Ok(());
    };

    // Device inventory is a convenience; reporting proceeds without it.
    if let Ok(devices) = client.devices_by_store(store_number).await {
        if !devices.is_empty() {
            println!("\nDevices on file for this store:");
            for device in &devices {
                println!(
                    "  - {} {} ({})",
                    device.device_type.as_deref().unwrap_or("Device"),
                    device.device_number.as_deref().unwrap_or("-"),
                    device.device_uid
                );
            }
        }
    }

    let device = prompt_nonempty(
        "What type of device is experiencing the issue? (e.g., Phone, Computer): ",
    )?;

    let mut computer_number = "N/A".to_string();
    if device.to_lowercase().contains("computer") {
        computer_number = prompt_nonempty("Computer experiencing the issue: ")?;
    }

    let category = prompt_nonempty("Issue category (Hardware/Software/Network/etc.): ")?;
    let priority = loop {
        let value = prompt("Priority (1 - Critical, 2 - Functional, 3 - Cosmetic): ")?;
        if ["1", "2", "3"].contains(&value.as_str()) {
            break value;
        }
        println!("Please enter 1, 2, or 3.");
    };
    let description = prompt_nonempty("Describe the issue: ")?;
    let replicable = if prompt_yes_no("Has this issue been reproduced on any other systems? (Y/N): ")? {
        "Yes"
    } else {
        "No"
    };

    let global_issue = prompt_yes_no("Does this issue affect more than one device? (Y/N): ")?;
    let mut global_num = None;
    if global_issue {
        let raw = prompt("How many devices are affected? (blank if unknown): ")?;
        if !raw.is_empty() {
            match raw.parse::<i32>() {
                Ok(n) => global_num = Some(n),
                Err(_) => println!("Not a whole number; leaving the count unset."),
            }
        }
    }

    let issue_name = prompt_nonempty("Give this issue a name: ")?;

    let payload = IssuePayload {
        name: Some(issue_name.clone()),
        issue_name: Some(issue_name.clone()),
        priority: Some(priority),
        store_number: Some(store_number),
        computer_number: Some(computer_number),
        device_type: Some(device),
        category: Some(category),
        description: Some(description),
        narrative: Some(String::new()),
        replicable: Some(replicable.to_string()),
        global_issue: Some(global_issue),
        global_num,
        status: Some("Unresolved".to_string()),
        resolution: Some(String::new()),
        ..Default::default()
    };

    let created = client.add_issue(&store_name, &payload).await?;
    println!(
        "\nIssue '{}' added to {} (id {}).",
        issue_name, store_name, created.id
    );
    Ok(())
}

/// UPDATE: change the status of an existing issue.
pub async fn update_status(client: &ApiClient, cache: &mut StoreCache) -> Result<()> {
    println!("\n***** Update issue status *****");

    let Some(issue) = pick_issue(client, cache).await? else {
        return Ok(());
    };

    let status = prompt_nonempty(&format!(
        "New status ({}): ",
        SUGGESTED_STATUSES.join(", ")
    ))?;

    let mut payload = IssuePayload::from_issue(&issue);
    payload.status = Some(status.clone());

    if status.eq_ignore_ascii_case("resolved")
        && prompt_yes_no("Would you like to add a resolution for this issue? (Y/N): ")?
    {
        payload.resolution = Some(prompt_nonempty("Resolution: ")?);
    }

    client.update_issue(issue.id, &payload).await?;
    println!("Status updated for issue {}.", issue.id);
    Ok(())
}

/// EDIT: field-by-field editor for an existing issue.
pub async fn edit(client: &ApiClient, cache: &mut StoreCache) -> Result<()> {
    println!("\n***** Edit issue details *****");

    let Some(issue) = pick_issue(client, cache).await? else {
        return Ok(());
    };
    let mut payload = IssuePayload::from_issue(&issue);

    loop {
        println!("\nPlease choose what you wish to edit:");
        println!("  name / device / category / computer / description");
        println!("  narrative (append) / resolution / status / priority / done");

        let choice = prompt("Your choice: ")?.to_lowercase();
        match choice.as_str() {
            "name" => {
                let value = prompt_nonempty("New issue name: ")?;
                payload.issue_name = Some(value.clone());
                payload.name = Some(value);
            }
            "device" => {
                payload.device_type =
                    Some(prompt_nonempty("New device (e.g., Computer, Printer, Phone): ")?);
            }
            "category" | "cat" => {
                payload.category = Some(prompt_nonempty("New category: ")?);
            }
            "computer" | "comp" => {
                payload.computer_number = Some(prompt_nonempty("New computer number: ")?);
            }
            "description" | "desc" => {
                payload.description =
                    Some(prompt("New description (this will replace the old one): ")?);
            }
            "narrative" => {
                let addition = prompt_nonempty("Add your narrative (this will be appended): ")?;
                let combined = match payload.narrative.as_deref() {
                    Some(existing) if !existing.is_empty() => {
                        format!("{}\n\n{}", existing, addition)
                    }
                    _ => addition,
                };
                payload.narrative = Some(combined);
            }
            "resolution" | "res" => {
                payload.resolution = Some(prompt("New resolution (blank to clear): ")?);
            }
            "status" => {
                payload.status = Some(prompt_nonempty(&format!(
                    "New status ({}): ",
                    SUGGESTED_STATUSES.join(", ")
                ))?);
            }
            "priority" | "prio" => {
                payload.priority = Some(prompt_nonempty("New priority (1, 2, or 3): ")?);
            }
            "done" | "exit" | "x" => break,
            _ => println!("Invalid choice. Please type one of the menu options."),
        }
    }

    client.update_issue(issue.id, &payload).await?;
    println!("Changes saved for issue {}.", issue.id);
    Ok(())
}

/// VIEW: all issues, or all issues for one store.
pub async fn view(client: &ApiClient, cache: &mut StoreCache) -> Result<()> {
    let choice = prompt("View (a)ll issues or issues for a (s)pecific store? (A/S): ")?;

    let issues = match choice.to_lowercase().as_str() {
        "a" | "all" => client.all_issues().await?,
        "s" | "store" => {
            let Some((_, store_number)) = pick_store(client, cache).await? else {
                return Ok(());
            };
            client.issues_by_store(Some(store_number), None).await?
        }
        _ => {
            println!("Please enter A or S.");
            return Ok(());
        }
    };

    println!("\n{}", render::issue_list(&issues));
    Ok(())
}

/// SEARCH: one filter at a time, the way field staff actually look things
/// up.
pub async fn search(client: &ApiClient) -> Result<()> {
    println!("\n***** Search issues *****");
    println!("  1 - by store number");
    println!("  2 - by category");
    println!("  3 - by status");
    println!("  4 - by device");
    println!("  5 - by issue name");

    let mode = prompt_selection("Search mode: ", 5)?;
    let term = prompt_nonempty("Search term: ")?;

    let mut params = SearchParams::default();
    match mode {
        1 => match term.parse::<i32>() {
            Ok(n) => params.store_number = Some(n),
            Err(_) => {
                println!("Store number must be a number.");
                return Ok(());
            }
        },
        2 => params.category = Some(term),
        3 => params.status = Some(term),
        4 => params.device = Some(term),
        _ => params.name = Some(term),
    }

    let issues = client.search_issues(&params).await?;
    println!("\n{}", render::issue_list(&issues));
    Ok(())
}

/// REMOVE: delete an issue after confirmation.
pub async fn remove(client: &ApiClient, cache: &mut StoreCache) -> Result<()> {
    println!("\n***** Remove an issue *****");

    let Some(issue) = pick_issue(client, cache).await? else {
        return Ok(());
    };

    println!("\n{}", render::issue_block(&issue));
    if !prompt_yes_no("\nDelete this issue permanently? (Y/N): ")? {
        println!("Delete cancelled.");
        return Ok(());
    }

    let deleted = client.delete_issue(issue.id).await?;
    println!("Issue {} deleted.", deleted.id);
    Ok(())
}

/// PRINT: export every known issue to a text report.
pub async fn print_report(client: &ApiClient) -> Result<()> {
    println!("\nCreating report file...");
    let issues = client.all_issues().await?;
    let path = render::export_report(&issues, Path::new("."))?;
    println!("Known issues have been exported to {}.", path.display());
    Ok(())
}
