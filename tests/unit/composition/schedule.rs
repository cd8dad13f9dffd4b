use super::*;
use crate::elements::{Element, TextReveal};

fn leaf() -> Node {
    Node::leaf(Element::TextReveal(TextReveal::typewriter("x", 0)))
}

#[test]
fn json_keeps_declaration_order() {
    let s: Schedule = serde_json::from_str(
        r#"{
            "outro": { "start": 700, "duration": 140, "label": "Call to action" },
            "intro": { "start": 0, "duration": 90 }
        }"#,
    )
    .unwrap();
    let names: Vec<_> = s.iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["outro", "intro"]);
    assert_eq!(s.get("outro").unwrap().label.as_deref(), Some("Call to action"));
    assert_eq!(s.extent(), 840);
    assert_eq!(
        serde_json::to_string(&s).unwrap(),
        r#"{"outro":{"start":700,"duration":140,"label":"Call to action"},"intro":{"start":0,"duration":90}}"#
    );
}

#[test]
fn zero_length_entries_are_invalid() {
    let s = Schedule::new().with("a", 0, 10).with("b", 10, 0);
    let err = s.validate().unwrap_err();
    assert!(err.to_string().contains("'b' duration must be > 0"));
}

#[test]
fn overflow_is_reported_not_truncated() {
    let s = Schedule::new().with("a", 0, 90).with("b", 800, 60);
    s.check_fits(860).unwrap();
    let err = s.check_fits(840).unwrap_err();
    assert!(matches!(err, CadenceError::ScheduleOverflow(_)));
    assert!(err.to_string().contains("'b' ends at frame 860"));
}

#[test]
fn lint_finds_gaps_overlaps_and_tail() {
    let s = Schedule::new()
        .with("a", 0, 100)
        .with("b", 90, 60)
        .with("c", 200, 50);
    assert_eq!(
        s.lint(300),
        vec![
            ScheduleIssue::Overlap {
                first: "a".into(),
                second: "b".into(),
                start: 90,
                end: 100
            },
            ScheduleIssue::Gap {
                start: 150,
                end: 200
            },
            ScheduleIssue::UncoveredTail {
                start: 250,
                end: 300
            },
        ]
    );

    let tight = Schedule::new().with("a", 0, 50).with("b", 50, 50);
    assert!(tight.lint(100).is_empty());
}

#[test]
fn issues_display_readably() {
    let gap = ScheduleIssue::Gap { start: 3, end: 9 };
    assert_eq!(gap.to_string(), "gap: no scene covers frames 3..9");
}

#[test]
fn assemble_places_scenes_in_schedule_order() {
    let s = Schedule::new().with("one", 0, 30).with("two", 30, 30);
    let mut scenes = IndexMap::new();
    scenes.insert("two".to_owned(), leaf());
    scenes.insert("one".to_owned(), leaf().window(5, 10));
    let root = s.assemble(scenes).unwrap();

    let NodeKind::Group { children } = &root.kind else {
        panic!("expected group");
    };
    assert_eq!(children[0].name.as_deref(), Some("one"));
    assert_eq!((children[0].start, children[0].duration), (0, Some(30)));
    assert!(matches!(children[0].kind, NodeKind::Group { .. }));
    assert_eq!(children[1].name.as_deref(), Some("two"));
    assert_eq!((children[1].start, children[1].duration), (30, Some(30)));
    assert!(matches!(children[1].kind, NodeKind::Leaf { .. }));
}

#[test]
fn assemble_requires_matching_scenes() {
    let s = Schedule::new().with("one", 0, 30);
    let err = s.assemble(IndexMap::new()).unwrap_err();
    assert!(err.to_string().contains("'one' has no renderer"));

    let mut scenes = IndexMap::new();
    scenes.insert("one".to_owned(), leaf());
    scenes.insert("extra".to_owned(), leaf());
    let err = s.assemble(scenes).unwrap_err();
    assert!(err.to_string().contains("'extra' is not in the schedule"));
}
