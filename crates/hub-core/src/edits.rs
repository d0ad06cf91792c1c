//! Pure edit functions for optimistic updates
//!
//! Each function builds a new task vector from a snapshot; the input is
//! never mutated. Editing an id that is not present is a no-op: the
//! result equals the input, nothing is inserted, nothing panics. The
//! coordinator relies on that when two mutations race on the same key.

use hub_model::{Scope, Task, TaskId, ToggleField};

/// Flip one flag on the task matching `id`, preserving order
#[must_use]
pub fn toggle_task(tasks: &[Task], id: &TaskId, field: ToggleField) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| {
            if &t.id == id {
                t.clone().with_toggled(field)
            } else {
                t.clone()
            }
        })
        .collect()
}

/// Drop the task matching `id`, preserving the order of the rest
#[must_use]
pub fn remove_task(tasks: &[Task], id: &TaskId) -> Vec<Task> {
    tasks.iter().filter(|t| &t.id != id).cloned().collect()
}

/// Keep only the tasks a scope covers
#[must_use]
pub fn filter_scope(tasks: Vec<Task>, scope: &Scope) -> Vec<Task> {
    match scope {
        Scope::All => tasks,
        Scope::Category(cat) => tasks.into_iter().filter(|t| t.title == *cat).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_model::Category;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: format!("task {id}"),
            title: Category::Work,
            important: false,
            is_completed: completed,
        }
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let tasks = vec![task("t1", false), task("t2", false)];
        let edited = toggle_task(&tasks, &TaskId::from("t2"), ToggleField::Completed);
        assert!(!edited[0].is_completed);
        assert!(edited[1].is_completed);
    }

    #[test]
    fn toggle_missing_id_is_noop() {
        let tasks = vec![task("t1", false)];
        let edited = toggle_task(&tasks, &TaskId::from("gone"), ToggleField::Important);
        assert_eq!(edited, tasks);
    }

    #[test]
    fn remove_drops_only_the_target() {
        let tasks = vec![task("t1", false), task("t2", false), task("t3", false)];
        let edited = remove_task(&tasks, &TaskId::from("t2"));
        let ids: Vec<&str> = edited.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t3"]);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let tasks = vec![task("t1", false)];
        assert_eq!(remove_task(&tasks, &TaskId::from("gone")), tasks);
    }

    #[test]
    fn scope_all_keeps_everything() {
        let tasks = vec![task("t1", false), task("t2", true)];
        assert_eq!(filter_scope(tasks.clone(), &Scope::All), tasks);
    }

    #[test]
    fn scope_category_filters_by_tag() {
        let mut study = task("t2", false);
        study.title = Category::Study;
        let tasks = vec![task("t1", false), study.clone()];
        assert_eq!(
            filter_scope(tasks, &Scope::Category(Category::Study)),
            vec![study]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
            prop::collection::vec((any::<bool>(), any::<bool>()), 0..8).prop_map(|flags| {
                flags
                    .into_iter()
                    .enumerate()
                    .map(|(i, (important, completed))| Task {
                        id: TaskId::from(format!("t{i}").as_str()),
                        text: format!("task {i}"),
                        title: Category::Other,
                        important,
                        is_completed: completed,
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn double_toggle_is_identity(tasks in arb_tasks(), idx in 0usize..8) {
                let id = TaskId::from(format!("t{idx}").as_str());
                let twice = toggle_task(
                    &toggle_task(&tasks, &id, ToggleField::Completed),
                    &id,
                    ToggleField::Completed,
                );
                prop_assert_eq!(twice, tasks);
            }

            #[test]
            fn toggle_preserves_length_and_order(tasks in arb_tasks(), idx in 0usize..8) {
                let id = TaskId::from(format!("t{idx}").as_str());
                let edited = toggle_task(&tasks, &id, ToggleField::Important);
                prop_assert_eq!(edited.len(), tasks.len());
                let ids: Vec<_> = edited.iter().map(|t| t.id.clone()).collect();
                let expected: Vec<_> = tasks.iter().map(|t| t.id.clone()).collect();
                prop_assert_eq!(ids, expected);
            }

            #[test]
            fn missing_id_edits_change_nothing(tasks in arb_tasks()) {
                let id = TaskId::from("not-present");
                prop_assert_eq!(toggle_task(&tasks, &id, ToggleField::Completed), tasks.clone());
                prop_assert_eq!(remove_task(&tasks, &id), tasks);
            }

            #[test]
            fn pending_plus_completed_is_total(tasks in arb_tasks(), idx in 0usize..8) {
                let id = TaskId::from(format!("t{idx}").as_str());
                let edited = toggle_task(&tasks, &id, ToggleField::Completed);
                let completed = edited.iter().filter(|t| t.is_completed).count();
                let pending = edited.iter().filter(|t| !t.is_completed).count();
                prop_assert_eq!(pending + completed, edited.len());
            }
        }
    }
}
