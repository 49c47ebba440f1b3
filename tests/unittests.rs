use egui::Pos2;
use task_network::board::link_table::LinkTable;
use task_network::board::search::search_observations;
use task_network::board::task_board::TaskBoard;
use task_network::layout::circular::{circular_positions, connections, CircleLayout};
use task_network::persistence::export;

fn scratch_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("task-network-tests-{}", uuid::Uuid::now_v7()))
}

#[test]
fn board_add_and_remove_last_task() {
    let mut board = TaskBoard::new();
    assert!(board.remove_last_task().is_none(), "empty board is a no-op");

    let a = board.add_task("  Write report  ").expect("task should be created");
    let b = board.add_task("Call client").unwrap();
    assert_eq!(board.task_count(), 2);
    assert_eq!(board.get_task(a).unwrap().title, "Write report");

    let removed = board.remove_last_task().unwrap();
    assert_eq!(removed.id, b);
    assert_eq!(board.task_count(), 1);
    assert_eq!(board.index_of(a), Some(0));
}

#[test]
fn board_rejects_blank_input() {
    let mut board = TaskBoard::new();
    assert!(board.add_task("   ").is_none());
    assert!(board.is_empty());

    let id = board.add_task("Task").unwrap();
    assert!(!board.add_observation(id, "\t \n"));
    assert!(!board.rename_task(id, ""));
    assert!(board.get_task(id).unwrap().observations.is_empty());
}

#[test]
fn board_sample_seed_has_seven_tasks() {
    let board = TaskBoard::with_sample_tasks();
    assert_eq!(board.task_count(), 7);
    assert_eq!(board.task_at(0).unwrap().title, "Manage E-mails");
    assert_eq!(board.task_at(6).unwrap().title, "Monitor System");
}

#[test]
fn observations_add_remove_and_bounds() {
    let mut board = TaskBoard::new();
    let id = board.add_task("Maintenance").unwrap();
    assert!(board.add_observation(id, "replace filter"));
    assert!(board.add_observation(id, "check logs"));

    assert_eq!(board.remove_observation(id, 5), None);
    assert_eq!(board.remove_observation(id, 0).as_deref(), Some("replace filter"));
    assert_eq!(board.get_task(id).unwrap().observations, vec!["check logs".to_string()]);

    assert!(board.remove_task(id));
    assert!(!board.add_observation(id, "orphan"), "unknown task is rejected");
    assert!(board.remove_observation(id, 0).is_none());
}

#[test]
fn links_add_update_remove() {
    let mut links = LinkTable::with_sample_links();
    assert_eq!(links.len(), 2);

    assert!(links.add_link("Docs", "  ").is_none());
    assert!(links.add_link("", "https://example.com").is_none());
    let id = links.add_link(" Docs ", " https://docs.rs ").unwrap();
    assert_eq!(links.get_link(id).unwrap().url, "https://docs.rs");

    assert!(links.update_link(id, "Rust Docs", "https://doc.rust-lang.org"));
    assert!(!links.update_link(id, "Rust Docs", ""));
    assert_eq!(links.get_link(id).unwrap().name, "Rust Docs");

    assert!(links.remove_link(id));
    assert!(!links.remove_link(id));
    assert_eq!(links.len(), 2);
}

#[test]
fn search_tracks_current_observations() {
    let mut board = TaskBoard::with_sample_tasks();
    let mail = board.task_at(0).unwrap().id;
    let calls = board.task_at(5).unwrap().id;
    board.add_observation(mail, "Reply to Vendor");
    board.add_observation(calls, "vendor called twice");

    let hits = search_observations(&board, "VENDOR").unwrap();
    assert!(hits.is_task_highlighted(mail));
    assert!(hits.is_task_highlighted(calls));
    assert_eq!(hits.focus, Some(calls));

    board.remove_observation(calls, 0);
    let hits = search_observations(&board, "vendor").unwrap();
    assert_eq!(hits.matched_tasks, vec![mail]);
    assert_eq!(hits.focus, Some(mail));

    let none = search_observations(&board, "nothing-like-this").unwrap();
    assert!(none.is_empty());
    assert_eq!(none.focus, None);
}

#[test]
fn layout_respaces_when_task_count_changes() {
    let layout = CircleLayout::new(Pos2::new(300.0, 300.0), 200.0, 30.0);
    let mut board = TaskBoard::with_sample_tasks();

    let before = layout.positions(board.task_count());
    board.add_task("Extra").unwrap();
    let after = layout.positions(board.task_count());
    assert_eq!(after.len(), 8);
    assert_eq!(connections(after.len()).len(), 28);
    // First node is pinned at angle zero, the rest move
    assert_eq!(before[0], after[0]);
    assert_ne!(before[1], after[1]);

    for p in &after {
        let r = p.distance(layout.center);
        assert!((r - 200.0).abs() < 1e-3);
    }
}

#[test]
fn layout_click_hits_node_center() {
    let pts = circular_positions(Pos2::new(0.0, 0.0), 100.0, 3);
    let layout = CircleLayout::new(Pos2::new(0.0, 0.0), 100.0, 20.0);
    assert_eq!(layout.hit_test(&pts, pts[2] + egui::vec2(5.0, 5.0)), Some(2));
    assert_eq!(layout.hit_test(&pts, Pos2::new(0.0, 0.0)), None);
}

#[test]
fn export_writes_json_and_csv() {
    let dir = scratch_dir();
    let mut board = TaskBoard::new();
    let id = board.add_task("Team Meeting").unwrap();
    board.add_observation(id, "agenda, \"quarterly\"");
    let links = LinkTable::with_sample_links();

    let json_path = export::timestamped_export_path(&dir, "tasks", "json");
    export::export_board_json(&board, &json_path).expect("json export ok");
    let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v[0]["title"], "Team Meeting");
    assert_eq!(v[0]["observations"][0], "agenda, \"quarterly\"");

    let csv_path = dir.join("links.csv");
    export::export_links_csv(&links, &csv_path).expect("csv export ok");
    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][0], "GitHub");
    assert_eq!(&rows[1][1], "https://www.github.com");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn export_path_has_stem_and_extension() {
    let p = export::timestamped_export_path(std::path::Path::new("/tmp/x"), "links", "csv");
    let name = p.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("links_"));
    assert!(name.ends_with(".csv"));
    assert_eq!(name.len(), "links_".len() + 15 + ".csv".len());
}
