//! Interactive menu over an [`EntryStore`]
//!
//! The menu only gathers input and prints outcomes; validation and
//! verification happen in the store.

use std::io::{self, BufRead, Write};

use passbook_core::{EntryStore, StoreError};

use crate::console::Console;

const MENU: &str = "\nPassbook\n\
                    1. Add entry\n\
                    2. Display entries\n\
                    3. Search entries\n\
                    4. Modify entry\n\
                    5. Delete entry\n\
                    6. Exit";

/// Unwrap a prompt result, leaving the current action on EOF
macro_rules! prompt {
    ($console:expr, $method:ident, $prompt:expr) => {
        match $console.$method($prompt)? {
            Some(value) => value,
            None => return Ok(()),
        }
    };
}

/// Run the menu until the user exits or input ends
pub fn run<R: BufRead, W: Write>(
    store: &mut EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    loop {
        console.say(MENU)?;

        let Some(choice) = console.prompt_token("Choose an option: ")? else {
            tracing::debug!("Input closed, leaving menu");
            return Ok(());
        };

        match choice.as_str() {
            "1" => add_entry(store, console)?,
            "2" => display_entries(store, console)?,
            "3" => search_entries(store, console)?,
            "4" => modify_entry(store, console)?,
            "5" => delete_entry(store, console)?,
            "6" => {
                console.say("Exiting passbook.")?;
                return Ok(());
            }
            _ => console.say("Invalid choice. Please try again.")?,
        }
    }
}

/// Tell the user about anything that went wrong while loading the store
pub fn show_load_warnings<R: BufRead, W: Write>(
    store: &EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let report = store.load_report();
    if !report.has_warnings() {
        return Ok(());
    }

    if let Some(error) = &report.read_error {
        console.say(format!(
            "Warning: could not read the store file ({}); starting with no entries.",
            error
        ))?;
    }

    if let Some(truncation) = &report.truncated {
        console.say(format!(
            "Warning: store file is malformed at {}; only the first {} entries were loaded.",
            truncation, report.loaded
        ))?;
    }

    Ok(())
}

fn add_entry<R: BufRead, W: Write>(
    store: &mut EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let website = prompt!(console, prompt_token, "Enter website: ");
    let username = prompt!(console, prompt_token, "Enter username: ");

    if store.find(&website, &username).is_some() {
        return console.say("An entry for this website and username already exists.");
    }

    let password = prompt!(console, prompt_secret, "Enter password: ");
    let question = prompt!(console, prompt_line, "Enter a security question: ");
    let answer = prompt!(console, prompt_line, "Enter the answer to the security question: ");

    match store.add_entry(&website, &username, &password, &question, &answer) {
        Ok(()) => console.say("Entry added."),
        Err(e) => report_failure(console, e, "Entry not added"),
    }
}

fn display_entries<R: BufRead, W: Write>(
    store: &EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    if store.is_empty() {
        return console.say("No entries found.");
    }

    console.say("Stored entries:")?;
    for (website, username) in store.list_entries() {
        console.say(format!("Website: {}\nUsername: {}\n", website, username))?;
    }
    Ok(())
}

fn search_entries<R: BufRead, W: Write>(
    store: &EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let website = prompt!(console, prompt_token, "Enter website to search: ");

    let found = store.find_by_website(&website);
    if found.is_empty() {
        return console.say(format!("No entries found for website: {}", website));
    }

    console.say(format!("Entries for website: {}", website))?;
    for (number, entry) in found.iter().enumerate() {
        console.say(format!("{}. Username: {}", number + 1, entry.username()))?;
    }

    let choice = prompt!(console, prompt_token, "View a password? (yes/no): ");
    if !matches!(choice.as_str(), "yes" | "Yes") {
        return Ok(());
    }

    let selection = prompt!(console, prompt_token, "Enter the number of the entry: ");
    let entry = match selection.parse::<usize>() {
        Ok(number) if (1..=found.len()).contains(&number) => found[number - 1],
        _ => return console.say("Invalid selection."),
    };

    let answer = prompt!(console, prompt_line, &format!("{}: ", entry.verification_question()));
    match store.reveal_password(entry, &answer) {
        Ok(password) => console.say(format!("Password: {}", password.expose())),
        Err(e) => report_failure(console, e, "Password not shown"),
    }
}

fn modify_entry<R: BufRead, W: Write>(
    store: &mut EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let website = prompt!(console, prompt_token, "Enter website to modify: ");
    let username = prompt!(console, prompt_token, "Enter the username to modify: ");

    let Some(entry) = store.find(&website, &username) else {
        return console.say("No entry found for that website and username.");
    };

    let answer = prompt!(console, prompt_line, &format!("{}: ", entry.verification_question()));
    if !entry.answer_matches(&answer) {
        return console.say("Verification failed. Entry not modified.");
    }

    console.say("Verification successful.")?;
    let new_username = prompt!(console, prompt_token, "Enter new username: ");
    let new_password = prompt!(console, prompt_secret, "Enter new password: ");

    match store.modify_entry(&website, &username, &answer, &new_username, &new_password) {
        Ok(()) => console.say("Entry updated."),
        Err(e) => report_failure(console, e, "Entry not modified"),
    }
}

fn delete_entry<R: BufRead, W: Write>(
    store: &mut EntryStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    let website = prompt!(console, prompt_token, "Enter website to delete: ");
    let username = prompt!(console, prompt_token, "Enter username to delete: ");

    if store.find(&website, &username).is_none() {
        return console.say("No entry found for that website and username.");
    }

    let password = prompt!(console, prompt_secret, "Enter the password to confirm deletion: ");
    match store.delete_entry(&website, &username, &password) {
        Ok(()) => console.say("Entry deleted."),
        Err(e) => report_failure(console, e, "Entry not deleted"),
    }
}

/// Print a store failure; a failed write means the change is only in memory
fn report_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    error: StoreError,
    outcome: &str,
) -> io::Result<()> {
    match error {
        StoreError::IoError(e) => console.say(format!(
            "Warning: change kept in memory but not saved ({}). It will be retried on exit.",
            e
        )),
        StoreError::VerificationFailed => console.say(format!("Verification failed. {}.", outcome)),
        other => console.say(format!("{}. {}.", other, outcome)),
    }
}
