use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;

pub fn run<B: StorageBackend>(store: &mut BlogStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if !store.backend().is_available() {
        result.add_message(CmdMessage::warning(
            "Storage is not available; nothing was initialized.",
        ));
        return Ok(result);
    }

    let had_themes = !store.all_themes().is_empty();
    let had_categories = !store.all_categories().is_empty();
    store.initialize()?;

    if !had_categories && !store.all_categories().is_empty() {
        result.add_message(CmdMessage::info("Added sample categories."));
    }
    if !had_themes && !store.all_themes().is_empty() {
        result.add_message(CmdMessage::info("Added default themes."));
    }
    result.add_message(CmdMessage::success("Blog store initialized."));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn seeds_fresh_store() {
        let mut store = BlogStore::new(MemBackend::new());
        let result = run(&mut store).unwrap();
        assert_eq!(result.messages.len(), 3);
        assert_eq!(store.all_categories().len(), 3);
        assert_eq!(store.active_theme().unwrap().id, "default-light");
    }

    #[test]
    fn second_run_only_confirms() {
        let mut store = BlogStore::new(MemBackend::new());
        run(&mut store).unwrap();
        let result = run(&mut store).unwrap();
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn warns_when_storage_is_missing() {
        let mut store = BlogStore::new(MemBackend::unavailable());
        let result = run(&mut store).unwrap();
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Warning
        ));
    }
}
