//! Contact manager menu.

use super::{exit_on_closed, Flow, Prompter, ShellResult, CLEAR_MARKER};
use crate::model::contact::{Contact, ContactPatch, NewContact};
use crate::store::{ContactStore, StoreError};
use log::info;
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 60;
const NOT_PROVIDED: &str = "Not provided";

const MENU: &str = "\nContact Management System
1. Add New Contact
2. View All Contacts (Brief)
3. View All Contacts (Detailed)
4. Search Contacts
5. Update Contact
6. Delete Contact
7. Exit";

/// Runs the contact menu until the exit choice or end of input.
pub fn run_contacts<R: BufRead, W: Write>(
    store: &mut ContactStore,
    input: R,
    output: W,
) -> ShellResult<()> {
    let mut shell = ContactShell {
        store,
        io: Prompter::new(input, output),
    };
    info!(
        "event=shell_start module=shell status=ok program=contacts count={}",
        shell.store.len()
    );

    loop {
        let flow = exit_on_closed(shell.step())?;
        if flow == Flow::Exit {
            break;
        }
    }

    info!("event=shell_exit module=shell status=ok program=contacts");
    Ok(())
}

struct ContactShell<'s, R, W> {
    store: &'s mut ContactStore,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> ContactShell<'_, R, W> {
    fn step(&mut self) -> ShellResult<Flow> {
        self.io.say(MENU)?;
        let choice = self.io.ask("\nEnter your choice (1-7): ")?;

        match choice.as_str() {
            "1" => self.add()?,
            "2" => self.view(false)?,
            "3" => self.view(true)?,
            "4" => self.search()?,
            "5" => self.update()?,
            "6" => self.delete()?,
            "7" => {
                self.io.say("\nGoodbye!")?;
                return Ok(Flow::Exit);
            }
            _ => self.io.say("\nInvalid choice. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> ShellResult<()> {
        self.io.say("\nAdd New Contact")?;
        self.io.say("-".repeat(30))?;
        let input = NewContact {
            name: self.io.required("Name: ")?,
            phone: self.io.required("Phone: ")?,
            email: self.io.optional("Email (optional): ")?,
            address: self.io.optional("Address (optional): ")?,
        };

        match self.store.add(input) {
            Ok(contact) => self.io.say(format_args!(
                "\nContact '{}' added successfully! (ID {})",
                contact.name, contact.id
            )),
            Err(err) => self.report(&err),
        }
    }

    fn view(&mut self, detailed: bool) -> ShellResult<()> {
        if self.store.is_empty() {
            return self.io.say("\nNo contacts found!");
        }

        let lines: Vec<String> = self
            .store
            .list()
            .iter()
            .map(|contact| {
                if detailed {
                    detailed_entry(contact)
                } else {
                    format!("{}. {}: {}", contact.id, contact.name, contact.phone)
                }
            })
            .collect();

        self.io.say("\nContact List:")?;
        self.io.say("=".repeat(RULE_WIDTH))?;
        for line in lines {
            self.io.say(line)?;
        }
        self.io.say("=".repeat(RULE_WIDTH))
    }

    fn search(&mut self) -> ShellResult<()> {
        let query = self.io.required("\nEnter name, phone, or email to search: ")?;
        let lines: Vec<String> = self
            .store
            .search(&query)
            .into_iter()
            .map(search_entry)
            .collect();

        if lines.is_empty() {
            return self.io.say("\nNo matching contacts found!");
        }

        self.io
            .say(format_args!("\nFound {} matching contact(s):", lines.len()))?;
        self.io.say("=".repeat(RULE_WIDTH))?;
        for line in lines {
            self.io.say(line)?;
        }
        Ok(())
    }

    fn update(&mut self) -> ShellResult<()> {
        let Some(id) = self.io.record_id("\nEnter contact ID to update: ")? else {
            return Ok(());
        };
        let lookup = self.store.find_by_id(id).map(|_| ());
        if let Err(err) = lookup {
            return self.report(&err);
        }

        self.io.say("\nLeave fields blank to keep current values.")?;
        self.io.say(format_args!(
            "Enter `{CLEAR_MARKER}` to remove an email or address; it is then shown as not provided."
        ))?;
        let patch = ContactPatch {
            name: self.io.optional("New name (optional): ")?,
            phone: self.io.optional("New phone (optional): ")?,
            email: self.io.change("New email (optional): ")?,
            address: self.io.change("New address (optional): ")?,
        };

        match self.store.update(id, patch) {
            Ok(_) => self
                .io
                .say(format_args!("\nContact ID {id} updated successfully!")),
            Err(err) => self.report(&err),
        }
    }

    fn delete(&mut self) -> ShellResult<()> {
        let Some(id) = self.io.record_id("\nEnter contact ID to delete: ")? else {
            return Ok(());
        };
        if !self
            .io
            .confirm("Are you sure you want to delete this contact? (y/n): ")?
        {
            return self.io.say("Delete operation cancelled.");
        }

        match self.store.delete(id) {
            Ok(contact) => self.io.say(format_args!(
                "\nContact '{}' deleted successfully!",
                contact.name
            )),
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &StoreError) -> ShellResult<()> {
        match err {
            StoreError::NotFound { id, .. } => {
                self.io.say(format_args!("\nContact ID {id} not found!"))
            }
            other => self.io.say(format_args!("\nError: {other}")),
        }
    }
}

fn detailed_entry(contact: &Contact) -> String {
    format!(
        "ID: {}\nName: {}\nPhone: {}\nEmail: {}\nAddress: {}\nCreated: {}\nLast Updated: {}\n{}",
        contact.id,
        contact.name,
        contact.phone,
        or_not_provided(contact.email.as_deref()),
        or_not_provided(contact.address.as_deref()),
        contact.created_at,
        contact.updated_at,
        "-".repeat(RULE_WIDTH)
    )
}

fn search_entry(contact: &Contact) -> String {
    format!(
        "ID: {}\nName: {}\nPhone: {}\nEmail: {}\n{}",
        contact.id,
        contact.name,
        contact.phone,
        or_not_provided(contact.email.as_deref()),
        "-".repeat(RULE_WIDTH)
    )
}

fn or_not_provided(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => NOT_PROVIDED,
    }
}

#[cfg(test)]
mod tests {
    use super::{or_not_provided, run_contacts};
    use crate::model::contact::NewContact;
    use crate::store::ContactStore;

    fn run(store: &mut ContactStore, script: &str) -> String {
        let mut output = Vec::new();
        run_contacts(store, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_then_brief_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();

        let out = run(&mut store, "1\nAlice\n555-1111\n\n\n2\n7\n");
        assert!(out.contains("Contact 'Alice' added successfully!"));
        assert!(out.contains("1. Alice: 555-1111"));
        assert!(out.contains("Goodbye!"));

        let alice = store.find_by_id(1).unwrap();
        assert_eq!(alice.email, None);
        assert_eq!(alice.address, None);
    }

    #[test]
    fn non_numeric_id_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();

        let out = run(&mut store, "5\nabc\n6\nxyz\n7\n");
        assert_eq!(out.matches("is not a valid numeric ID").count(), 2);
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn update_can_clear_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();
        store
            .add(
                NewContact::new("Alice", "555-1111")
                    .with_email("a@x.io")
                    .with_address("1 Elm"),
            )
            .unwrap();

        let out = run(&mut store, "5\n1\n\n555-2222\n-\n\n7\n");
        assert!(out.contains("Enter `-` to remove an email or address"));
        assert!(out.contains("Contact ID 1 updated successfully!"));

        let alice = store.find_by_id(1).unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.phone, "555-2222");
        assert_eq!(alice.email, None);
        assert_eq!(alice.address.as_deref(), Some("1 Elm"));
    }

    #[test]
    fn update_unknown_id_reports_not_found_without_prompting_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();

        let out = run(&mut store, "5\n42\n7\n");
        assert!(out.contains("Contact ID 42 not found!"));
        assert!(!out.contains("New name"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();
        store.add(NewContact::new("Bob", "555-2222")).unwrap();

        let out = run(&mut store, "6\n1\nn\n");
        assert!(out.contains("Delete operation cancelled."));
        assert_eq!(store.len(), 1);

        let out = run(&mut store, "6\n1\ny\n7\n");
        assert!(out.contains("Contact 'Bob' deleted successfully!"));
        assert!(store.is_empty());
    }

    #[test]
    fn search_and_detailed_view_render_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();
        store.add(NewContact::new("Carol", "555-3333")).unwrap();
        store
            .add(NewContact::new("Dave", "555-4444").with_email("dave@corp.io"))
            .unwrap();

        let out = run(&mut store, "4\nCORP\n3\n4\nzed\n");
        assert!(out.contains("Found 1 matching contact(s):"));
        assert!(out.contains("Email: dave@corp.io"));
        assert!(out.contains("Address: Not provided"));
        assert!(out.contains("No matching contacts found!"));
    }

    #[test]
    fn invalid_choice_loops_and_eof_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ContactStore::open(dir.path().join("contacts.json")).unwrap();

        let out = run(&mut store, "9\n");
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(!out.contains("Goodbye!"));
    }

    #[test]
    fn empty_text_renders_as_not_provided() {
        assert_eq!(or_not_provided(Some("")), "Not provided");
        assert_eq!(or_not_provided(None), "Not provided");
        assert_eq!(or_not_provided(Some("x")), "x");
    }
}
