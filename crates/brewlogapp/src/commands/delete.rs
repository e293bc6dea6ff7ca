use crate::commands::helpers::{ensure_ready, resolve_batch};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::batch_store::BatchStore;

pub fn run(store: &BatchStore, selector: &str) -> Result<CmdResult> {
    ensure_ready(store)?;
    let mut result = CmdResult::default();

    let Some(batch) = resolve_batch(&store.batches(), selector) else {
        result.add_message(CmdMessage::warning(format!(
            "No batch matches '{}', nothing deleted",
            selector
        )));
        return Ok(result);
    };

    if store.delete(&batch.id)? {
        result.add_message(CmdMessage::success(format!("Batch deleted: {}", batch.name)));
        result.batches.push(batch);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ready_stores;

    #[tokio::test]
    async fn deletes_selected_batch() {
        let (_backend, store, _prefs) = ready_stores().await;
        let a = store.create("A", 1.0, None).unwrap();
        let b = store.create("B", 1.0, None).unwrap();

        let result = run(&store, &a.id).unwrap();
        assert_eq!(result.batches, vec![a.clone()]);
        assert_eq!(store.get_by_id(&a.id), None);
        assert_eq!(*store.batches(), vec![b]);
    }

    #[tokio::test]
    async fn deletes_by_position() {
        let (_backend, store, _prefs) = ready_stores().await;
        store.create("A", 1.0, None).unwrap();
        let b = store.create("B", 1.0, None).unwrap();

        run(&store, "2").unwrap();
        assert_eq!(store.get_by_id(&b.id), None);
        assert_eq!(store.batches().len(), 1);
    }

    #[tokio::test]
    async fn unknown_selector_is_a_warning_not_an_error() {
        let (_backend, store, _prefs) = ready_stores().await;
        store.create("A", 1.0, None).unwrap();

        let result = run(&store, "does-not-exist").unwrap();
        assert!(result.has_warnings());
        assert!(result.batches.is_empty());
        assert_eq!(store.batches().len(), 1);
    }
}
