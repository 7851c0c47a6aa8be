use super::*;
use serde_json::json;

#[test]
fn create_aid_request_is_listed_only_with_a_token() {
    let signed_out: Vec<MenuItem> = menu_items(false).into_iter().map(|(_, m)| m).collect();
    assert!(!signed_out.contains(&MenuItem::CreateAidRequest));
    assert!(!signed_out.contains(&MenuItem::SignOut));
    assert_eq!(signed_out.last(), Some(&MenuItem::Exit));

    let signed_in: Vec<MenuItem> = menu_items(true).into_iter().map(|(_, m)| m).collect();
    assert!(signed_in.contains(&MenuItem::CreateAidRequest));
    assert_eq!(signed_in.len(), signed_out.len() + 2);
}

#[test]
fn urgency_accepts_blank_or_whole_numbers() {
    assert_eq!(parse_urgency(""), Some(None));
    assert_eq!(parse_urgency(" 3 "), Some(Some(3)));
    assert_eq!(parse_urgency("high"), None);
}

#[test]
fn list_lines_match_dashboard_layout() {
    let aid = vec![AidRequest {
        id: json!(1),
        title: "Water".into(),
        urgency_level: Some(json!(5)),
        ..Default::default()
    }];
    assert_eq!(aid_request_lines(&aid), vec!["Water (5)"]);

    let volunteers = vec![
        Volunteer {
            name: "Ana".into(),
            skills: vec!["driving".into(), "cooking".into()],
            ..Default::default()
        },
        Volunteer {
            name: "Ben".into(),
            ..Default::default()
        },
    ];
    assert_eq!(volunteer_lines(&volunteers), vec!["Ana [driving, cooking]", "Ben"]);

    let tasks = vec![
        VolunteerTask {
            title: "Sort boxes".into(),
            status: Some("assigned".into()),
            volunteer_id: Some(json!(7)),
            ..Default::default()
        },
        VolunteerTask {
            title: "Drive".into(),
            status: Some("open".into()),
            ..Default::default()
        },
    ];
    assert_eq!(
        task_lines(&tasks),
        vec!["Sort boxes - assigned -> 7", "Drive - open"]
    );

    let donors = vec![Donor {
        name: "Red Cross".into(),
        ..Default::default()
    }];
    assert_eq!(donor_lines(&donors), vec!["Red Cross"]);
}
