use crate::model::TodoList;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const TODO_LIST_KEY: &str = "TODO_LIST_KEY";

#[derive(Debug, Clone)]
pub struct SlotLocation {
    pub path: PathBuf,
}

impl SlotLocation {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        SlotLocation {
            path: dir.into().join(format!("{}.yml", TODO_LIST_KEY)),
        }
    }
}

pub fn locate_slot() -> Result<SlotLocation> {
    if let Ok(dir) = env::var("DAYKEEP_DATA_DIR") {
        return Ok(SlotLocation::in_dir(dir));
    }
    let dirs = ProjectDirs::from("", "", "daykeep").context("locating data directory")?;
    Ok(SlotLocation::in_dir(dirs.data_dir()))
}

pub fn load_list(location: &SlotLocation) -> Result<TodoList> {
    if location.path.exists() {
        let data = fs::read_to_string(&location.path)
            .with_context(|| format!("reading {:?}", location.path))?;
        let list: TodoList = serde_yaml::from_str(&data).context("parsing todo list file")?;
        Ok(list)
    } else {
        Ok(TodoList::default())
    }
}

pub fn save_list(location: &SlotLocation, list: &TodoList) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(list).context("serializing todo list")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn absent_slot_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let location = SlotLocation::in_dir(dir.path());
        let list = load_list(&location).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let location = SlotLocation::in_dir(dir.path());
        for count in [0usize, 1, 50] {
            let mut list = TodoList::new();
            for n in 0..count {
                let id = list.add(format!("task {}", n), date(2024, 3, 1 + (n % 28) as u32));
                if n % 3 == 0 {
                    list.toggle(id).unwrap();
                }
            }
            save_list(&location, &list).unwrap();
            let reloaded = load_list(&location).unwrap();
            assert_eq!(reloaded, list);
        }
    }

    #[test]
    fn serialized_records_use_the_wire_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let location = SlotLocation::in_dir(dir.path());
        let mut list = TodoList::new();
        list.add("buy milk".into(), date(2024, 3, 15));
        save_list(&location, &list).unwrap();
        let raw = fs::read_to_string(&location.path).unwrap();
        assert!(raw.contains("isSuccess"));
        assert!(raw.contains("2024-03-15"));
    }

    #[test]
    fn slot_file_is_named_after_the_storage_key() {
        let location = SlotLocation::in_dir("/tmp/daykeep-test");
        assert_eq!(
            location.path.file_name().unwrap().to_str().unwrap(),
            "TODO_LIST_KEY.yml"
        );
    }
}
