//! Behavioural properties of the store, emitter and filtered view.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use todo_lattice_core::{
    filtered_todos, AppState, Filter, StoreEvent, ThemeStyles, TodoId,
};

fn setup() -> Arc<AppState> {
    Arc::new(AppState::new(ThemeStyles::default()))
}

fn count_events(state: &AppState, event: StoreEvent) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    state.events().on(event, move || {
        count_clone.fetch_add(1, Ordering::SeqCst);
    });
    count
}

fn visible_texts(state: &AppState) -> Vec<String> {
    filtered_todos(state).map(|(_, todo)| todo.text).collect()
}

#[test]
fn add_todo_length_and_order_match_calls() {
    for n in [0usize, 1, 7, 50] {
        let state = setup();
        let expected: Vec<String> = (0..n).map(|i| format!("todo {i}")).collect();
        for text in &expected {
            state.add_todo(text.as_str());
        }

        let texts: Vec<String> = state.todos().into_iter().map(|(_, t)| t.text).collect();
        assert_eq!(state.len(), n);
        assert_eq!(texts, expected);
    }
}

#[test]
fn delete_todo_on_non_member_leaves_sequence_and_notifies() {
    let state = setup();
    let removed: TodoId = state.add_todo("removed");
    state.delete_todo(removed);
    state.add_todo("a");
    state.add_todo("b");

    let before = state.todos();
    let changes = count_events(&state, StoreEvent::TodosChange);
    state.delete_todo(removed);

    assert_eq!(state.todos(), before);
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[test]
fn delete_todos_done_is_idempotent() {
    let state = setup();
    let ids: Vec<_> = (0..6).map(|i| state.add_todo(format!("t{i}"))).collect();
    state.set_todos_done(ids.iter().copied().step_by(2), true);

    state.delete_todos_done();
    let once = state.todos();
    state.delete_todos_done();

    assert_eq!(state.todos(), once);
    let texts: Vec<_> = once.into_iter().map(|(_, t)| t.text).collect();
    assert_eq!(texts, vec!["t1", "t3", "t5"]);
}

#[test]
fn set_todos_done_empty_changes_nothing_but_notifies() {
    let state = setup();
    state.add_todo("a");
    let before = state.todos();
    let changes = count_events(&state, StoreEvent::TodosChange);

    state.set_todos_done(std::iter::empty(), true);

    assert_eq!(state.todos(), before);
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[test]
fn filtering_abc() {
    let state = setup();
    state.add_todo("a");
    let b = state.add_todo("b");
    state.add_todo("c");
    state.set_todos_done([b], true);

    state.set_todos_filter(Filter::Active);
    assert_eq!(visible_texts(&state), vec!["a", "c"]);

    state.set_todos_filter(Filter::Completed);
    assert_eq!(visible_texts(&state), vec!["b"]);

    state.set_todos_filter(Filter::All);
    assert_eq!(visible_texts(&state), vec!["a", "b", "c"]);
}

#[test]
fn emitter_runs_l1_to_completion_before_l2() {
    let state = setup();
    let log = Arc::new(Mutex::new(Vec::new()));

    let log_clone = log.clone();
    state.events().on(StoreEvent::TodosChange, move || {
        log_clone.lock().push("l1 begin");
        log_clone.lock().push("l1 end");
    });
    let log_clone = log.clone();
    state.events().on(StoreEvent::TodosChange, move || {
        log_clone.lock().push("l2");
    });

    state.add_todo("x");
    assert_eq!(*log.lock(), vec!["l1 begin", "l1 end", "l2"]);
}

#[test]
fn completed_filter_scenario() {
    let state = setup();
    let x = state.add_todo("x");
    state.set_todos_filter(Filter::Completed);
    assert!(visible_texts(&state).is_empty());

    state.set_todos_done([x], true);
    assert_eq!(visible_texts(&state), vec!["x"]);
}

#[test]
fn each_mutator_emits_exactly_one_event() {
    let state = setup();
    let todos = count_events(&state, StoreEvent::TodosChange);
    let filters = count_events(&state, StoreEvent::FilterChange);
    let styles = count_events(&state, StoreEvent::GuiStyleChange);

    let id = state.add_todo("a");
    state.set_todo_editing(id);
    state.set_todo_text(id, "b");
    state.set_todos_done([id], true);
    state.delete_todos_done();
    state.delete_todo(id);
    assert_eq!(todos.load(Ordering::SeqCst), 6);

    state.set_todos_filter(Filter::Active);
    assert_eq!(filters.load(Ordering::SeqCst), 1);

    state.set_gui_style("dark").unwrap();
    assert_eq!(styles.load(Ordering::SeqCst), 1);
    assert_eq!(todos.load(Ordering::SeqCst), 6);
}

#[test]
fn scoped_view_subscription_ends_with_view() {
    let state = setup();
    let renders = Arc::new(AtomicUsize::new(0));

    {
        let renders_clone = renders.clone();
        let _view = state.events().on_scoped(StoreEvent::TodosChange, move || {
            renders_clone.fetch_add(1, Ordering::SeqCst);
        });
        state.add_todo("while mounted");
    }
    state.add_todo("after teardown");

    assert_eq!(renders.load(Ordering::SeqCst), 1);
    assert_eq!(state.events().listener_count(StoreEvent::TodosChange), 0);
}

#[test]
fn listener_chain_across_events_terminates() {
    let state = setup();
    let weak = Arc::downgrade(&state);

    // Adding a todo resets the filter so the new todo is visible.
    state.events().on(StoreEvent::TodosChange, move || {
        if let Some(state) = weak.upgrade() {
            if state.todos_filter() == Filter::Completed {
                state.set_todos_filter(Filter::All);
            }
        }
    });
    let filters = count_events(&state, StoreEvent::FilterChange);

    state.set_todos_filter(Filter::Completed);
    state.add_todo("new");

    assert_eq!(state.todos_filter(), Filter::All);
    assert_eq!(filters.load(Ordering::SeqCst), 2);
    assert_eq!(visible_texts(&state), vec!["new"]);
}
