//! End-to-end sprint summary flow through the public API.

use allyship_core::{
    apply_action, days_between, sprint_effective_window, sprint_progress, Action, DateWindow,
    ExportAdapter, History, SessionState, SprintWindow, SummaryKind, TextDocumentAdapter,
};
use allyship_core::dates::parse_iso;
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    parse_iso(s).unwrap()
}

#[test]
fn test_mid_sprint_summary_covers_days_so_far() {
    let mut state = SessionState::new(d("2025-03-03"));
    state = apply_action(state, Action::StartSprint(d("2025-03-03")));

    for (day, body) in [("2025-03-03", "Day one notes"), ("2025-03-05", "Day three notes")] {
        state = apply_action(state, Action::SetDate(d(day)));
        state = apply_action(state, Action::SetBody(body.to_string()));
        state = apply_action(state, Action::Save);
    }

    // The summary is requested on the 6th.
    state = apply_action(state, Action::SetToday(d("2025-03-06")));
    state = apply_action(state, Action::SetDate(d("2025-03-06")));

    let sprint = state.active_sprint().copied().unwrap();
    let window = sprint_effective_window(&sprint, state.today).unwrap();
    assert_eq!(window.start, d("2025-03-03"));
    assert_eq!(window.end, d("2025-03-06"), "window ends today, not on day 14");

    let entries = state.history.window_query(&window);
    let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d("2025-03-03"), d("2025-03-05")]);
    assert!(state.summary_enabled());

    let request = state.summary_request().unwrap();
    assert_eq!(request.kind, SummaryKind::Sprint);
    assert_eq!(request.entries.len(), 2);

    let artifact = TextDocumentAdapter.render_summary(&request).unwrap();
    assert_eq!(artifact.file_name, "Allyship_Sprint_2025-03-03_to_2025-03-06.txt");
    let text = String::from_utf8(artifact.bytes).unwrap();
    assert!(text.find("Day one notes").unwrap() < text.find("Day three notes").unwrap());
}

#[test]
fn test_sprint_progress_boundaries() {
    let sprint = SprintWindow::new(d("2025-01-01"));
    let on_last = sprint_progress(&sprint, d("2025-01-14"));
    assert_eq!((on_last.day_number, on_last.is_over), (14, false));
    let after = sprint_progress(&sprint, d("2025-01-15"));
    assert_eq!((after.day_number, after.is_over), (14, true));
    assert_eq!(days_between("2025-01-01", "2025-01-15").unwrap(), 14);
}

#[test]
fn test_finished_sprint_summary_uses_full_window() {
    let sprint = SprintWindow::new(d("2025-03-03"));
    let history = ["2025-03-02", "2025-03-03", "2025-03-16", "2025-03-17"]
        .into_iter()
        .fold(History::new(), |h, day| {
            h.upsert(allyship_core::Entry::new(
                d(day),
                Default::default(),
                None,
                "prompt",
                None,
                "text",
            ))
        });

    let window = sprint.effective_window(d("2025-04-01")).unwrap();
    assert_eq!(window, DateWindow::new(d("2025-03-03"), d("2025-03-16")));
    let dates: Vec<_> = history.window_query(&window).iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![d("2025-03-03"), d("2025-03-16")]);
}
