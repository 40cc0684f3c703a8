//! To-do list menu.

use super::{exit_on_closed, Flow, Prompter, ShellResult, CLEAR_MARKER};
use crate::model::task::{
    priority_choices, NewTask, Task, TaskFilter, TaskPatch, DEFAULT_PRIORITY,
};
use crate::model::FieldChange;
use crate::store::{StoreError, TaskStore};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 50;

static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid due date regex"));

const MENU: &str = "\nTo-Do List Application
1. Add Task
2. List Tasks
3. Complete Task
4. Delete Task
5. Update Task
6. List Pending Tasks
7. Exit";

/// Runs the to-do menu until the exit choice or end of input.
pub fn run_todo<R: BufRead, W: Write>(
    store: &mut TaskStore,
    input: R,
    output: W,
) -> ShellResult<()> {
    let mut shell = TodoShell {
        store,
        io: Prompter::new(input, output),
    };
    info!(
        "event=shell_start module=shell status=ok program=todo count={}",
        shell.store.len()
    );

    loop {
        let flow = exit_on_closed(shell.step())?;
        if flow == Flow::Exit {
            break;
        }
    }

    info!("event=shell_exit module=shell status=ok program=todo");
    Ok(())
}

/// Whether `value` has the `YYYY-MM-DD` shape. Calendar validity is not checked.
pub fn looks_like_date(value: &str) -> bool {
    DUE_DATE_RE.is_match(value)
}

struct TodoShell<'s, R, W> {
    store: &'s mut TaskStore,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> TodoShell<'_, R, W> {
    fn step(&mut self) -> ShellResult<Flow> {
        self.io.say(MENU)?;
        let choice = self.io.ask("Enter your choice (1-7): ")?;

        match choice.as_str() {
            "1" => self.add()?,
            "2" => self.list(TaskFilter::All)?,
            "3" => self.complete()?,
            "4" => self.delete()?,
            "5" => self.update()?,
            "6" => self.list(TaskFilter::Pending)?,
            "7" => {
                self.io.say("Goodbye!")?;
                return Ok(Flow::Exit);
            }
            _ => self.io.say("Invalid choice. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> ShellResult<()> {
        let description = self.io.required("Enter task description: ")?;
        let due_date = self.io.optional("Enter due date (YYYY-MM-DD, optional): ")?;
        if let Some(date) = due_date.as_deref() {
            self.warn_on_odd_date(date)?;
        }
        let priority = self
            .io
            .ask(&format!(
                "Enter priority ({}, default {DEFAULT_PRIORITY}): ",
                priority_choices()
            ))?
            .to_lowercase();

        let input = NewTask {
            description,
            due_date,
            priority: if priority.is_empty() {
                DEFAULT_PRIORITY.to_string()
            } else {
                priority
            },
        };

        match self.store.add(input) {
            Ok(task) => self.io.say(format_args!(
                "Task added: {} (ID {})",
                task.description, task.id
            )),
            Err(err) => self.report(&err),
        }
    }

    fn list(&mut self, filter: TaskFilter) -> ShellResult<()> {
        let entries: Vec<String> = self
            .store
            .list_tasks(filter)
            .into_iter()
            .map(task_entry)
            .collect();

        if entries.is_empty() {
            return match filter {
                TaskFilter::Pending if !self.store.is_empty() => {
                    self.io.say("All tasks are completed!")
                }
                _ => self.io.say("No tasks in your to-do list!"),
            };
        }

        self.io.say("\nYour To-Do List:")?;
        self.io.say("-".repeat(RULE_WIDTH))?;
        for entry in entries {
            self.io.say(entry)?;
        }
        Ok(())
    }

    fn complete(&mut self) -> ShellResult<()> {
        let Some(id) = self.io.record_id("Enter task ID to mark as complete: ")? else {
            return Ok(());
        };
        match self.store.complete(id) {
            Ok(_) => self.io.say(format_args!("Task {id} marked as completed!")),
            Err(err) => self.report(&err),
        }
    }

    fn delete(&mut self) -> ShellResult<()> {
        let Some(id) = self.io.record_id("Enter task ID to delete: ")? else {
            return Ok(());
        };
        match self.store.delete(id) {
            Ok(_) => self.io.say(format_args!("Task {id} deleted!")),
            Err(err) => self.report(&err),
        }
    }

    fn update(&mut self) -> ShellResult<()> {
        let Some(id) = self.io.record_id("Enter task ID to update: ")? else {
            return Ok(());
        };
        let lookup = self.store.find_by_id(id).map(|_| ());
        if let Err(err) = lookup {
            return self.report(&err);
        }

        let description = self
            .io
            .optional("Enter new description (leave blank to keep current): ")?;
        let due_date = self.io.change(&format!(
            "Enter new due date (YYYY-MM-DD, leave blank to keep current, `{CLEAR_MARKER}` to clear): "
        ))?;
        if let FieldChange::Set(date) = &due_date {
            self.warn_on_odd_date(date)?;
        }
        let priority = self
            .io
            .optional(&format!(
                "Enter new priority ({}, leave blank to keep current): ",
                priority_choices()
            ))?
            .map(|value| value.to_lowercase());

        let patch = TaskPatch {
            description,
            due_date,
            priority,
        };
        match self.store.update(id, patch) {
            Ok(_) => self.io.say(format_args!("Task {id} updated!")),
            Err(err) => self.report(&err),
        }
    }

    fn warn_on_odd_date(&mut self, date: &str) -> ShellResult<()> {
        if looks_like_date(date) {
            return Ok(());
        }
        self.io.say(format_args!(
            "Note: `{date}` is not in YYYY-MM-DD form; saving it as entered."
        ))
    }

    fn report(&mut self, err: &StoreError) -> ShellResult<()> {
        match err {
            StoreError::NotFound { id, .. } => self.io.say(format_args!("Task {id} not found!")),
            other => self.io.say(format_args!("Error: {other}")),
        }
    }
}

fn task_entry(task: &Task) -> String {
    let status = if task.completed { "✓" } else { " " };
    format!(
        "{}. [{}] {}\n   Priority: {}, Due: {}\n   Created: {}\n{}",
        task.id,
        status,
        task.description,
        task.priority_label(),
        task.due_date.as_deref().unwrap_or("No deadline"),
        task.created_at,
        "-".repeat(RULE_WIDTH)
    )
}

#[cfg(test)]
mod tests {
    use super::{looks_like_date, run_todo};
    use crate::model::task::NewTask;
    use crate::store::TaskStore;

    fn run(store: &mut TaskStore, script: &str) -> String {
        let mut output = Vec::new();
        run_todo(store, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_uses_lowercased_priority_and_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();

        let out = run(&mut store, "1\nBuy milk\n\nHIGH\n1\nCall mom\n2024-05-01\n\n7\n");
        assert!(out.contains("Enter priority (low/medium/high, default medium): "));
        assert!(out.contains("Task added: Buy milk"));

        let first = store.find_by_id(1).unwrap();
        assert_eq!(first.priority, "high");
        assert_eq!(first.due_date, None);
        let second = store.find_by_id(2).unwrap();
        assert_eq!(second.priority, "medium");
        assert_eq!(second.due_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn list_renders_status_priority_and_deadline() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();
        store.add(NewTask::new("Read book")).unwrap();
        store
            .add(NewTask::new("Pay rent").with_due_date("2024-06-01"))
            .unwrap();
        store.complete(1).unwrap();

        let out = run(&mut store, "2\n");
        assert!(out.contains("1. [✓] Read book"));
        assert!(out.contains("Priority: Medium, Due: No deadline"));
        assert!(out.contains("2. [ ] Pay rent"));
        assert!(out.contains("Due: 2024-06-01"));
    }

    #[test]
    fn pending_list_hides_completed_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();
        store.add(NewTask::new("done already")).unwrap();
        store.complete(1).unwrap();

        let out = run(&mut store, "6\n");
        assert!(out.contains("All tasks are completed!"));
        assert!(!out.contains("done already"));
    }

    #[test]
    fn missing_ids_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();

        let out = run(&mut store, "3\n5\n4\n5\n5\n5\n7\n");
        assert_eq!(out.matches("Task 5 not found!").count(), 3);
    }

    #[test]
    fn update_keeps_blank_fields_and_warns_on_odd_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();
        store
            .add(NewTask::new("Gym").with_priority("low"))
            .unwrap();

        let out = run(&mut store, "5\n1\n\nnext friday\nHigh\n7\n");
        assert!(out.contains("Enter new priority (low/medium/high, leave blank to keep current): "));
        assert!(out.contains("Task 1 updated!"));
        assert!(out.contains("is not in YYYY-MM-DD form"));

        let task = store.find_by_id(1).unwrap();
        assert_eq!(task.description, "Gym");
        assert_eq!(task.due_date.as_deref(), Some("next friday"));
        assert_eq!(task.priority, "high");
    }

    #[test]
    fn non_numeric_task_id_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TaskStore::open(dir.path().join("todo.json")).unwrap();

        let out = run(&mut store, "3\nfirst\n7\n");
        assert!(out.contains("`first` is not a valid numeric ID"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn date_shape_check() {
        assert!(looks_like_date("2024-01-31"));
        assert!(!looks_like_date("31/01/2024"));
        assert!(!looks_like_date("2024-1-3"));
    }
}
