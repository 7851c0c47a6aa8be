// UI layer: provides the interactive dashboard using `dialoguer`.
// Prompts run on the main thread; every API action is spawned onto the
// tokio runtime so the menu comes back immediately while requests are in
// flight. Results show up in the lists and in the log.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::Runtime;

use crate::controller::{Action, ViewController};
use crate::models::{display_value, AidRequest, Donor, Volunteer, VolunteerTask};
use crate::state::{LogLevel, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Register,
    Login,
    SignOut,
    CreateAidRequest,
    RefreshAidRequests,
    AddDonor,
    RefreshDonors,
    AddVolunteer,
    LoadVolunteers,
    AddTask,
    LoadTasks,
    AssignTask,
    ShowLists,
    ShowLog,
    WaitForPending,
    Exit,
}

/// Entries offered in the current session. Aid request creation is only
/// listed once a token is held.
fn menu_items(has_token: bool) -> Vec<(&'static str, MenuItem)> {
    let mut items = vec![("Register", MenuItem::Register), ("Login", MenuItem::Login)];
    if has_token {
        items.push(("Sign out", MenuItem::SignOut));
        items.push(("Create aid request", MenuItem::CreateAidRequest));
    }
    items.extend([
        ("Refresh aid requests", MenuItem::RefreshAidRequests),
        ("Add donor", MenuItem::AddDonor),
        ("Refresh donors", MenuItem::RefreshDonors),
        ("Add volunteer", MenuItem::AddVolunteer),
        ("Load volunteers", MenuItem::LoadVolunteers),
        ("Add task", MenuItem::AddTask),
        ("Load tasks", MenuItem::LoadTasks),
        ("Assign task", MenuItem::AssignTask),
        ("Show lists", MenuItem::ShowLists),
        ("Show log", MenuItem::ShowLog),
        ("Wait for pending requests", MenuItem::WaitForPending),
        ("Exit", MenuItem::Exit),
    ]);
    items
}

/// Main interactive menu. Runs until the operator chooses "Exit".
pub fn main_menu(rt: &Runtime, controller: ViewController) -> Result<()> {
    loop {
        let state = rt.block_on(controller.snapshot());
        print_header(&controller, &state);

        let items = menu_items(state.has_token());
        let labels: Vec<&str> = items.iter().map(|(label, _)| *label).collect();
        let selection = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        let action = match items[selection].1 {
            MenuItem::Register => {
                edit_credentials(rt, &controller, &state)?;
                Some(Action::Register)
            }
            MenuItem::Login => {
                edit_credentials(rt, &controller, &state)?;
                Some(Action::Login)
            }
            MenuItem::SignOut => {
                rt.block_on(controller.sign_out());
                None
            }
            MenuItem::CreateAidRequest => {
                edit_aid_form(rt, &controller, &state)?;
                Some(Action::CreateAidRequest)
            }
            MenuItem::RefreshAidRequests => Some(Action::ListAidRequests),
            MenuItem::AddDonor => {
                edit_donor_form(rt, &controller, &state)?;
                Some(Action::CreateDonor)
            }
            MenuItem::RefreshDonors => Some(Action::ListDonors),
            MenuItem::AddVolunteer => {
                edit_volunteer_form(rt, &controller, &state)?;
                Some(Action::CreateVolunteer)
            }
            MenuItem::LoadVolunteers => Some(Action::ListVolunteers),
            MenuItem::AddTask => {
                let title = prompt_text("Task title", &state.task_title)?;
                rt.block_on(controller.update(|s| s.task_title = title));
                Some(Action::CreateTask)
            }
            MenuItem::LoadTasks => Some(Action::ListTasks),
            MenuItem::AssignTask => {
                let id = prompt_text("Task id to assign", &state.assign_task_id)?;
                rt.block_on(controller.update(|s| s.assign_task_id = id));
                Some(Action::AssignTask)
            }
            MenuItem::ShowLists => {
                print_lists(&state);
                None
            }
            MenuItem::ShowLog => {
                print_log(&state);
                None
            }
            MenuItem::WaitForPending => {
                wait_for_pending(&controller)?;
                None
            }
            MenuItem::Exit => break,
        };

        if let Some(action) = action {
            // Not awaited: the result lands in the view state on its own.
            drop(controller.spawn(rt.handle(), action));
        }
    }
    Ok(())
}

fn print_header(controller: &ViewController, state: &ViewState) {
    println!();
    println!("{}", "SmartRelief Admin Dashboard".bold());
    println!("API Base: {}", controller.api_base());
    println!("Token: {}", state.token_preview());
    let pending = controller.in_flight();
    if pending > 0 {
        println!("{}", format!("{pending} request(s) in flight").yellow());
    }
    if let Some(entry) = state.log.latest() {
        println!("Last: {}", styled_log_line(entry.level, entry.to_string()));
    }
}

/// Text prompt pre-filled with the current form value.
fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn prompt_optional(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let value = prompt_text(prompt, current.unwrap_or_default())?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

/// Both register and login read the same credential pair.
fn edit_credentials(rt: &Runtime, controller: &ViewController, state: &ViewState) -> Result<()> {
    let email = prompt_text("Email", &state.credentials.email)?;
    // `Password` hides input in terminal for passwords.
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;
    rt.block_on(controller.update(|s| {
        s.credentials.email = email;
        s.credentials.password = password;
    }));
    Ok(())
}

fn edit_aid_form(rt: &Runtime, controller: &ViewController, state: &ViewState) -> Result<()> {
    let form = &state.aid_form;
    let title = prompt_text("Title", &form.title)?;
    let description = prompt_optional("Description", form.description.as_deref())?;
    let category = prompt_optional("Category", form.category.as_deref())?;
    let urgency: String = Input::<String>::new()
        .with_prompt("Urgency (1-5)")
        .with_initial_text(form.urgency_level.map(|u| u.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &'static str> {
            parse_urgency(input).map(|_| ()).ok_or("enter a whole number or leave empty")
        })
        .interact_text()?;
    let urgency_level = parse_urgency(&urgency).flatten();
    rt.block_on(controller.update(|s| {
        s.aid_form.title = title;
        s.aid_form.description = description;
        s.aid_form.category = category;
        s.aid_form.urgency_level = urgency_level;
    }));
    Ok(())
}

/// `Some(None)` for an empty field, `None` when the text is not a number.
fn parse_urgency(input: &str) -> Option<Option<i64>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(None);
    }
    input.parse().ok().map(Some)
}

fn edit_donor_form(rt: &Runtime, controller: &ViewController, state: &ViewState) -> Result<()> {
    let name = prompt_text("Name", &state.donor_form.name)?;
    let email = prompt_text("Email", &state.donor_form.email)?;
    rt.block_on(controller.update(|s| {
        s.donor_form.name = name;
        s.donor_form.email = email;
    }));
    Ok(())
}

fn edit_volunteer_form(rt: &Runtime, controller: &ViewController, state: &ViewState) -> Result<()> {
    let name = prompt_text("Name", &state.volunteer_form.name)?;
    let skills = prompt_text("Skills (comma separated)", &state.volunteer_form.skills)?;
    rt.block_on(controller.update(|s| {
        s.volunteer_form.name = name;
        s.volunteer_form.skills = skills;
    }));
    Ok(())
}

fn aid_request_lines(items: &[AidRequest]) -> Vec<String> {
    items
        .iter()
        .map(|a| {
            let urgency = a.urgency_level.as_ref().map(display_value).unwrap_or_default();
            format!("{} ({})", a.title, urgency)
        })
        .collect()
}

fn donor_lines(items: &[Donor]) -> Vec<String> {
    items.iter().map(|d| d.name.clone()).collect()
}

fn volunteer_lines(items: &[Volunteer]) -> Vec<String> {
    items
        .iter()
        .map(|v| {
            if v.skills.is_empty() {
                v.name.clone()
            } else {
                format!("{} [{}]", v.name, v.skills.join(", "))
            }
        })
        .collect()
}

fn task_lines(items: &[VolunteerTask]) -> Vec<String> {
    items
        .iter()
        .map(|t| {
            let status = t.status.as_deref().unwrap_or_default();
            match t.volunteer_id.as_ref().map(display_value) {
                Some(v) if !v.is_empty() => format!("{} - {} -> {}", t.title, status, v),
                _ => format!("{} - {}", t.title, status),
            }
        })
        .collect()
}

fn print_section(title: &str, lines: Vec<String>) {
    println!("{}", title.bold());
    if lines.is_empty() {
        println!("  {}", "(empty)".dark_grey());
    }
    for line in lines {
        println!("  - {line}");
    }
}

fn print_lists(state: &ViewState) {
    print_section("Aid Requests", aid_request_lines(&state.aid_requests));
    print_section("Donors", donor_lines(&state.donors));
    print_section("Volunteers", volunteer_lines(&state.volunteers));
    print_section("Tasks", task_lines(&state.tasks));
}

fn styled_log_line(level: LogLevel, line: String) -> String {
    match level {
        LogLevel::Info => line,
        LogLevel::Error => line.red().to_string(),
    }
}

fn print_log(state: &ViewState) {
    println!("{}", "Logs".bold());
    if state.log.is_empty() {
        println!("  {}", "(empty)".dark_grey());
    }
    for entry in state.log.iter() {
        println!("{}", styled_log_line(entry.level, entry.to_string()));
    }
}

/// Show a spinner until every spawned action has finished.
fn wait_for_pending(controller: &ViewController) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    loop {
        let pending = controller.in_flight();
        if pending == 0 {
            break;
        }
        spinner.set_message(format!("{pending} request(s) in flight..."));
        thread::sleep(Duration::from_millis(50));
    }
    spinner.finish_and_clear();
    Ok(())
}

#[cfg(test)]
#[path = "tests/ui_tests.rs"]
mod tests;
