use super::*;

#[test]
fn skills_are_trimmed_and_empty_tokens_dropped() {
    assert_eq!(parse_skills("a, b,, b "), vec!["a", "b", "b"]);
    assert!(parse_skills("").is_empty());
    assert!(parse_skills(" , ,").is_empty());
    assert_eq!(parse_skills("first aid"), vec!["first aid"]);
}

#[test]
fn volunteer_form_builds_request_body() {
    let form = VolunteerForm {
        name: "Ana".into(),
        skills: "driving,  cooking ".into(),
    };
    let input = form.to_input();
    assert_eq!(input.name, "Ana");
    assert_eq!(input.skills, vec!["driving", "cooking"]);
}

#[test]
fn log_is_newest_first_and_single_line() {
    let mut log = LogBuffer::default();
    log.info("Donor created");
    log.error("Create donor failed: server returned 500:\n<html>\n  boom</html>");

    assert_eq!(log.len(), 2);
    let latest = log.latest().expect("entry");
    assert_eq!(latest.level, LogLevel::Error);
    assert_eq!(
        latest.message,
        "Create donor failed: server returned 500: <html> boom</html>"
    );
    let rendered = latest.to_string();
    assert!(rendered.ends_with(" - Create donor failed: server returned 500: <html> boom</html>"));
    assert_eq!(log.iter().nth(1).map(|e| e.message.as_str()), Some("Donor created"));
}

#[test]
fn token_gate_treats_empty_token_as_signed_out() {
    let mut state = ViewState::default();
    assert!(!state.has_token());
    assert_eq!(state.token_preview(), "(none)");

    state.token = Some(String::new());
    assert!(!state.has_token());

    state.token = Some("x".repeat(40));
    assert!(state.has_token());
    assert_eq!(state.token_preview(), format!("{}...", "x".repeat(30)));
}
