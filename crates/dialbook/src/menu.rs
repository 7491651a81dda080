//! Menu handler for the interactive phone book

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use dialdb::{AddOutcome, Contact, ContactTable, DeleteOutcome, UpdateOutcome};
use serde::Serialize;
use tracing::{debug, info};

use crate::validate::{is_valid_email, is_valid_phone};

const MENU: &str = "\nPhone Book Management System
1. Add Contact
2. Update Contact
3. Delete Contact
4. View All Contacts
5. Search Contact
6. View Search History
7. Exit";

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One listing line in `--json` mode
#[derive(Serialize)]
struct ContactRow<'a> {
    phone: u64,
    #[serde(flatten)]
    contact: &'a Contact,
}

/// One search result line in `--json` mode
#[derive(Serialize)]
struct SearchRow<'a> {
    position: usize,
    #[serde(flatten)]
    row: ContactRow<'a>,
}

pub struct MenuHandler<R, W> {
    table: ContactTable,
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> MenuHandler<R, W> {
    pub fn new(table: ContactTable, input: R, output: W) -> Self {
        Self {
            table,
            input,
            output,
            json: false,
        }
    }

    /// Print listings as JSON lines instead of text
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Show the menu and dispatch choices until exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                debug!("input closed");
                return Ok(());
            };

            if self.handle(choice.trim())? == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn handle(&mut self, choice: &str) -> Result<Flow> {
        let flow = match choice {
            "1" => self.handle_add()?,
            "2" => self.handle_update()?,
            "3" => self.handle_delete()?,
            "4" => self.handle_view_all()?,
            "5" => self.handle_search()?,
            "6" => self.handle_history()?,
            "7" => {
                writeln!(self.output, "Exiting the Phone Book Management System.")?;
                Flow::Exit
            }
            _ => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                Flow::Continue
            }
        };
        Ok(flow)
    }

    fn handle_add(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Enter Email: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.prompt("Enter Phone Number: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(key) = parse_phone(&phone).filter(|_| is_valid_email(&email)) else {
            writeln!(self.output, "Invalid phone number or email.")?;
            return Ok(Flow::Continue);
        };

        match self.table.add(key, Contact::new(name, email)) {
            AddOutcome::Added { name } => {
                info!(phone = key, "contact added");
                writeln!(self.output, "Contact {} has been added.", name)?;
            }
            AddOutcome::AlreadyExists => {
                writeln!(self.output, "Number Already Exists!")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_update(&mut self) -> Result<Flow> {
        let Some(old_phone) = self.prompt("Enter Old Phone Number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(new_phone) = self.prompt("Enter New Phone Number (Leave blank if no change): ")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(new_name) = self.prompt("Enter New Name (Leave blank if no change): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(new_email) = self.prompt("Enter New Email (Leave blank if no change): ")? else {
            return Ok(Flow::Exit);
        };

        let Some(old_key) = parse_phone(&old_phone) else {
            writeln!(self.output, "Invalid old phone number.")?;
            return Ok(Flow::Continue);
        };
        let new_key = if new_phone.is_empty() {
            old_key
        } else {
            match parse_phone(&new_phone) {
                Some(key) => key,
                None => {
                    writeln!(self.output, "Invalid new phone number.")?;
                    return Ok(Flow::Continue);
                }
            }
        };
        if !new_email.is_empty() && !is_valid_email(&new_email) {
            writeln!(self.output, "Invalid new email.")?;
            return Ok(Flow::Continue);
        }

        // Blank fields keep their current values; reading them counts as an access
        let current = if new_name.is_empty() || new_email.is_empty() {
            self.table.get(old_key).cloned()
        } else {
            None
        };
        let (current_name, current_email) = current
            .map(|contact| (contact.name, contact.email))
            .unwrap_or_default();
        let contact = Contact::new(
            if new_name.is_empty() { current_name } else { new_name },
            if new_email.is_empty() { current_email } else { new_email },
        );

        match self.table.update(old_key, new_key, contact) {
            UpdateOutcome::Updated => {
                info!(old_key, new_key, "contact updated");
                writeln!(self.output, "Contact Details Updated")?;
            }
            UpdateOutcome::NotFound => writeln!(self.output, "Contact Not Found!")?,
            UpdateOutcome::AlreadyExists => writeln!(self.output, "Number Already Exists!")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_delete(&mut self) -> Result<Flow> {
        let Some(phone) = self.prompt("Enter Phone Number to Delete: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(key) = parse_phone(&phone) else {
            writeln!(self.output, "Invalid phone number.")?;
            return Ok(Flow::Continue);
        };

        match self.table.delete(key) {
            DeleteOutcome::Deleted => {
                info!(phone = key, "contact deleted");
                writeln!(self.output, "Contact deleted successfully")?;
            }
            DeleteOutcome::NotFound => writeln!(self.output, "Contact Not Found!")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_view_all(&mut self) -> Result<Flow> {
        if self.table.is_empty() {
            writeln!(self.output, "No contacts found.")?;
            return Ok(Flow::Continue);
        }

        for (phone, contact) in self.table.iter() {
            if self.json {
                let row = serde_json::to_string(&ContactRow { phone, contact })?;
                writeln!(self.output, "{}", row)?;
            } else {
                writeln!(
                    self.output,
                    "Phone Number: {}, Name: {}, Email: {}",
                    phone, contact.name, contact.email
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Prefix search over names and emails. Only the contact the user
    /// picks goes into the history.
    fn handle_search(&mut self) -> Result<Flow> {
        let Some(prefix) = self.prompt("Please enter the name to search: ")? else {
            return Ok(Flow::Exit);
        };
        let prefix = prefix.to_lowercase();

        let results: Vec<(u64, Contact)> = self
            .table
            .iter()
            .filter(|(_, contact)| {
                contact.name.to_lowercase().starts_with(&prefix)
                    || contact.email.to_lowercase().starts_with(&prefix)
            })
            .map(|(phone, contact)| (phone, contact.clone()))
            .collect();

        if results.is_empty() {
            writeln!(self.output, "No contacts found with prefix '{}'.", prefix)?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "Contacts with prefix '{}':", prefix)?;
        for (position, (phone, contact)) in results.iter().enumerate() {
            if self.json {
                let row = SearchRow {
                    position: position + 1,
                    row: ContactRow {
                        phone: *phone,
                        contact,
                    },
                };
                writeln!(self.output, "{}", serde_json::to_string(&row)?)?;
            } else {
                writeln!(
                    self.output,
                    "{}. Phone Number: {}, Name: {}, Email: {}",
                    position + 1,
                    phone,
                    contact.name,
                    contact.email
                )?;
            }
        }

        let Some(selection) = self.prompt(
            "Select the number of the contact you want to store in history (enter the number): ",
        )?
        else {
            return Ok(Flow::Exit);
        };

        match selection.parse::<usize>() {
            Ok(position) if (1..=results.len()).contains(&position) => {
                let (phone, contact) = &results[position - 1];
                writeln!(
                    self.output,
                    "Contact selected: Phone Number: {}, Name: {}, Email: {}",
                    phone, contact.name, contact.email
                )?;
                self.table.touch(*phone);
                writeln!(self.output, "Contact added to history.")?;
            }
            Ok(_) => writeln!(
                self.output,
                "Invalid selection. Please enter a number from the list."
            )?,
            Err(_) => writeln!(self.output, "Invalid input. Please enter a number.")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_history(&mut self) -> Result<Flow> {
        let history: Vec<u64> = self.table.history().collect();

        if self.json {
            writeln!(self.output, "{}", serde_json::to_string(&history)?)?;
        } else {
            writeln!(self.output, "Search History (most recent first):")?;
            let line: Vec<String> = history.iter().map(u64::to_string).collect();
            writeln!(self.output, "{}", line.join(" "))?;

            let tracker = self.table.tracker();
            let stats = tracker.stats();
            writeln!(
                self.output,
                "Keeping {} of {} recent numbers",
                tracker.len(),
                tracker.capacity()
            )?;
            writeln!(
                self.output,
                "Touches: {}, new: {}, moved up: {}, already latest: {} ({:.0}%), dropped: {}",
                stats.promotions(),
                stats.inserts(),
                stats.moves(),
                stats.head_hits(),
                stats.head_hit_ratio() * 100.0,
                stats.evictions(),
            )?;
        }
        Ok(Flow::Continue)
    }

    /// Print `label` and read one line. `None` means the input is closed.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush().context("failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn parse_phone(input: &str) -> Option<u64> {
    if is_valid_phone(input) {
        input.parse().ok()
    } else {
        None
    }
}
