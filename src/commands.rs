use crate::calendar::{month_grid, Navigator};
use crate::model::TodoItem;
use crate::storage::locate_slot;
use crate::store::TodoStore;
use crate::ui;
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};

pub fn add(content: String, date: Option<String>) -> Result<()> {
    let date = parse_date_arg(date.as_deref())?;
    let mut store = load_store()?;
    store.set_draft(content);
    let id = store.add_todo(date)?;
    store.reset_draft();
    println!("Added todo {} on {}", id, date.format("%Y-%m-%d"));
    Ok(())
}

pub fn list(date: Option<String>, month: bool) -> Result<()> {
    let date = parse_date_arg(date.as_deref())?;
    let store = load_store()?;
    if store.items().is_empty() {
        println!("No todos yet");
        return Ok(());
    }
    if month {
        let mut any = false;
        for cell in month_grid(date).into_iter().filter(|c| c.in_current_month) {
            let items = store.items_for_date(cell.date);
            if items.is_empty() {
                continue;
            }
            any = true;
            println!("{}", cell.date.format("%Y-%m-%d"));
            for item in items {
                print_item(item);
            }
        }
        if !any {
            println!("No todos in {}", date.format("%B %Y"));
        }
    } else {
        let items = store.items_for_date(date);
        if items.is_empty() {
            println!("No todos on {}", date.format("%Y-%m-%d"));
        }
        for item in items {
            print_item(item);
        }
    }
    Ok(())
}

pub fn toggle(id: u64) -> Result<()> {
    let mut store = load_store()?;
    store.toggle_todo(id)?;
    let state = if store.items().get(id).map(|t| t.is_success).unwrap_or(false) {
        "done"
    } else {
        "open"
    };
    println!("Todo {} is now {}", id, state);
    Ok(())
}

pub fn remove(id: u64) -> Result<()> {
    let mut store = load_store()?;
    store.remove_todo(id)?;
    println!("Removed todo {}", id);
    Ok(())
}

pub fn tui() -> Result<()> {
    let store = load_store()?;
    let navigator = Navigator::new(Local::now().date_naive());
    ui::run(store, navigator)
}

fn load_store() -> Result<TodoStore> {
    let location = locate_slot()?;
    Ok(TodoStore::load(location)?)
}

fn parse_date_arg(input: Option<&str>) -> Result<NaiveDate> {
    let raw = match input {
        Some(r) => r.trim(),
        None => return Ok(Local::now().date_naive()),
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date format (use YYYY-MM-DD): {}", raw))
}

fn print_item(item: &TodoItem) {
    let mark = if item.is_success { "x" } else { " " };
    println!("  [{}] {}: {}", mark, item.id, item.content);
}
