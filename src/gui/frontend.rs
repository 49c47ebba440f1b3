use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Stroke};

use crate::board::link_table::{LinkId, LinkTable};
use crate::board::search::{self, SearchOutcome};
use crate::board::task_board::{TaskBoard, TaskId};
use crate::layout::circular::{self, CircleLayout};
use crate::persistence::export;
use crate::persistence::settings::AppSettings;

const HEADER_GREEN: Color32 = Color32::from_rgb(40, 160, 60);
const NODE_STROKE: Color32 = Color32::from_rgb(40, 160, 60);
const HIGHLIGHT_RED: Color32 = Color32::from_rgb(220, 40, 40);
const SELECTED_BLUE: Color32 = Color32::from_rgb(80, 120, 255);
const STATUS_TTL: Duration = Duration::from_secs(4);

pub struct TaskNetworkApp {
    board: TaskBoard,
    links: LinkTable,
    selected_task: Option<TaskId>,
    selected_link: Option<LinkId>,
    // Bottom control bar
    new_task_title: String,
    search_text: String,
    // Query currently driving highlights; re-run every frame so edits never leave stale matches
    active_query: Option<String>,
    search_hits: Option<SearchOutcome>,
    // Observation panel
    new_observation: String,
    rename_title: String,
    // Link table form
    new_link_name: String,
    new_link_url: String,
    link_edit: Option<(LinkId, String, String)>,
    // Settings and Preferences UI state; `app_settings` is what the canvas uses,
    // `file_settings` is what settings.json holds (no CLI overrides)
    app_settings: AppSettings,
    file_settings: AppSettings,
    radius_override: Option<f32>,
    settings_path: PathBuf,
    show_prefs_window: bool,
    prefs_edit: AppSettings,
    prefs_status: Option<String>,
    // Transient info line (export results, errors)
    status: Option<(String, Instant)>,
}

impl TaskNetworkApp {
    pub fn new(board: TaskBoard, links: LinkTable, settings: AppSettings, settings_path: PathBuf) -> Self {
        Self {
            board,
            links,
            selected_task: None,
            selected_link: None,
            new_task_title: String::new(),
            search_text: String::new(),
            active_query: None,
            search_hits: None,
            new_observation: String::new(),
            rename_title: String::new(),
            new_link_name: String::new(),
            new_link_url: String::new(),
            link_edit: None,
            prefs_edit: settings.clone(),
            app_settings: settings.clone(),
            file_settings: settings,
            radius_override: None,
            settings_path,
            show_prefs_window: false,
            prefs_status: None,
            status: None,
        }
    }

    // Command-line radius applies to this run only and is never written back
    pub fn with_radius_override(mut self, radius: Option<f32>) -> Self {
        self.radius_override = radius.filter(|r| r.is_finite() && *r > 0.0);
        self.app_settings = self.effective_settings();
        self
    }

    fn effective_settings(&self) -> AppSettings {
        let mut s = self.file_settings.clone();
        if let Some(r) = self.radius_override {
            s.layout_radius = r;
        }
        s
    }

    // Drafts typed for one task must not land on another
    fn select_task(&mut self, id: Option<TaskId>) {
        if self.selected_task != id {
            self.new_observation.clear();
            self.rename_title.clear();
        }
        self.selected_task = id;
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some((msg.into(), Instant::now()));
    }

    fn submit_new_task(&mut self) {
        if let Some(id) = self.board.add_task(&self.new_task_title) {
            log::info!("added task {}", id);
            self.new_task_title.clear();
        }
    }

    fn remove_last_task(&mut self) {
        if let Some(task) = self.board.remove_last_task() {
            log::info!("removed last task '{}'", task.title);
            if self.selected_task == Some(task.id) {
                self.select_task(None);
            }
        }
    }

    fn delete_task(&mut self, id: TaskId) {
        if self.board.remove_task(id) {
            log::info!("deleted task {}", id);
            if self.selected_task == Some(id) {
                self.select_task(None);
            }
        }
    }

    fn run_search(&mut self) {
        let query = self.search_text.trim().to_string();
        if query.is_empty() {
            // Empty query resets highlighting
            self.active_query = None;
            self.search_hits = None;
            return;
        }
        self.active_query = Some(query.clone());
        self.refresh_search();
        let focus = self.search_hits.as_ref().and_then(|hits| {
            log::debug!("search '{}' matched {} task(s)", query, hits.matched_tasks.len());
            hits.focus
        });
        if focus.is_some() {
            self.select_task(focus);
        }
    }

    fn clear_search(&mut self) {
        self.search_text.clear();
        self.active_query = None;
        self.search_hits = None;
    }

    fn refresh_search(&mut self) {
        self.search_hits = self
            .active_query
            .as_deref()
            .and_then(|q| search::search_observations(&self.board, q));
    }

    fn submit_new_link(&mut self) {
        if let Some(id) = self.links.add_link(&self.new_link_name, &self.new_link_url) {
            log::info!("added link {}", id);
            self.new_link_name.clear();
            self.new_link_url.clear();
        }
    }

    fn remove_selected_link(&mut self) {
        if let Some(id) = self.selected_link.take() {
            if self.links.remove_link(id) {
                log::info!("removed link {}", id);
            }
            if matches!(self.link_edit, Some((eid, _, _)) if eid == id) {
                self.link_edit = None;
            }
        }
    }

    fn toggle_link_selection(&mut self, id: LinkId) {
        self.selected_link = if self.selected_link == Some(id) { None } else { Some(id) };
    }

    // The edited row stays selected
    fn begin_link_edit(&mut self, id: LinkId) {
        if let Some(l) = self.links.get_link(id) {
            self.link_edit = Some((id, l.name.clone(), l.url.clone()));
            self.selected_link = Some(id);
        }
    }

    pub fn menu_export_tasks(&mut self) {
        let path = export::timestamped_export_path(&self.app_settings.export_dir(), "tasks", "json");
        match export::export_board_json(&self.board, &path) {
            Ok(()) => {
                log::info!("exported tasks to {}", path.display());
                self.set_status(format!("Exported tasks to {}", path.display()));
            }
            Err(e) => {
                log::warn!("task export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    pub fn menu_export_links(&mut self) {
        let path = export::timestamped_export_path(&self.app_settings.export_dir(), "links", "csv");
        match export::export_links_csv(&self.links, &path) {
            Ok(()) => {
                log::info!("exported links to {}", path.display());
                self.set_status(format!("Exported links to {}", path.display()));
            }
            Err(e) => {
                log::warn!("link export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    pub fn menu_open_prefs(&mut self) {
        self.prefs_edit = self.file_settings.clone();
        self.prefs_status = None;
        self.show_prefs_window = true;
    }

    fn apply_prefs(&mut self) {
        // An explicit radius edit replaces the command-line one
        if self.prefs_edit.layout_radius != self.file_settings.layout_radius {
            self.radius_override = None;
        }
        self.file_settings = self.prefs_edit.clone();
        self.app_settings = self.effective_settings();
        match self.file_settings.save_to(&self.settings_path) {
            Ok(()) => self.prefs_status = Some(format!("Saved to {}", self.settings_path.display())),
            Err(e) => {
                log::warn!("saving settings failed: {}", e);
                self.prefs_status = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export Tasks (JSON)").clicked() {
                        self.menu_export_tasks();
                        ui.close();
                    }
                    if ui.button("Export Links (CSV)").clicked() {
                        self.menu_export_links();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.button("Preferences…").clicked() {
                        self.menu_open_prefs();
                        ui.close();
                    }
                });
                ui.small(format!("Tasks:{} Links:{}", self.board.task_count(), self.links.len()));
                if let Some((msg, at)) = &self.status {
                    if at.elapsed() < STATUS_TTL {
                        ui.separator();
                        ui.small(msg.clone());
                    }
                }
            });
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Task Network Hub").size(24.0).color(HEADER_GREEN));
            });
        });
    }

    fn controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let title_resp = ui.add(
                    egui::TextEdit::singleline(&mut self.new_task_title)
                        .hint_text("Task Title")
                        .desired_width(180.0),
                );
                let enter = title_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add Task").clicked() || enter {
                    self.submit_new_task();
                }
                if ui.button("Remove Last").clicked() {
                    self.remove_last_task();
                }
                ui.separator();
                let search_resp = ui.add(
                    egui::TextEdit::singleline(&mut self.search_text)
                        .hint_text("Search Observations")
                        .desired_width(180.0),
                );
                let enter = search_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Search").clicked() || enter {
                    self.run_search();
                }
                if ui.button("Clear").clicked() {
                    self.clear_search();
                }
                if let Some(hits) = &self.search_hits {
                    ui.small(format!("{} match(es)", hits.matched_observations.len()));
                }
            });
            ui.add_space(4.0);
        });
    }

    fn link_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("links")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                ui.heading("Links");
                ui.add(egui::TextEdit::singleline(&mut self.new_link_name).hint_text("Name"));
                ui.add(egui::TextEdit::singleline(&mut self.new_link_url).hint_text("Link"));
                if ui.button("Add Link").clicked() {
                    self.submit_new_link();
                }
                let can_remove = self.selected_link.is_some();
                if ui.add_enabled(can_remove, egui::Button::new("Remove Selected Link")).clicked() {
                    self.remove_selected_link();
                }
                ui.separator();

                let mut clicked: Option<LinkId> = None;
                let mut edit_request: Option<LinkId> = None;
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    egui::Grid::new("link_table").striped(true).num_columns(2).show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Link");
                        ui.end_row();
                        for link in self.links.iter() {
                            let sel = self.selected_link == Some(link.id);
                            let resp = ui.selectable_label(sel, &link.name);
                            // The second release of a double-click would undo the selection
                            if resp.clicked() && !resp.double_clicked() { clicked = Some(link.id); }
                            if resp.double_clicked() { edit_request = Some(link.id); }
                            ui.hyperlink_to(&link.url, &link.url);
                            ui.end_row();
                        }
                    });
                });
                if let Some(id) = clicked {
                    self.toggle_link_selection(id);
                }
                if let Some(id) = edit_request {
                    self.begin_link_edit(id);
                }

                // Inline editor for the double-clicked row
                let mut commit = false;
                let mut cancel = false;
                if let Some((_, name, url)) = &mut self.link_edit {
                    ui.separator();
                    ui.label("Edit link");
                    ui.text_edit_singleline(name);
                    ui.text_edit_singleline(url);
                    ui.horizontal(|ui| {
                        commit = ui.button("Save").clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                }
                if commit {
                    if let Some((id, name, url)) = self.link_edit.take() {
                        if !self.links.update_link(id, &name, &url) {
                            // Blank input: keep the editor open
                            self.link_edit = Some((id, name, url));
                        }
                    }
                }
                if cancel { self.link_edit = None; }
            });
    }

    fn observation_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("observations")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let Some(task_id) = self.selected_task else {
                    ui.label("Click a task to see its observations.");
                    return;
                };
                if self.board.get_task(task_id).is_none() {
                    self.select_task(None);
                    return;
                }
                let Some(task) = self.board.get_task(task_id) else { return };
                ui.label(RichText::new(format!("Task: {}", task.title)).size(16.0).strong());
                ui.add_space(6.0);

                let mut remove_idx: Option<usize> = None;
                egui::ScrollArea::vertical().max_height((ui.available_height() - 110.0).max(60.0)).show(ui, |ui| {
                    for (idx, obs) in task.observations.iter().enumerate() {
                        ui.horizontal_wrapped(|ui| {
                            let hit = self
                                .search_hits
                                .as_ref()
                                .is_some_and(|h| h.is_observation_highlighted(task_id, idx));
                            let text = RichText::new(format!("- {}", obs));
                            let text = if hit { text.color(HIGHLIGHT_RED).strong() } else { text };
                            ui.label(text);
                            if ui.small_button("Remove").clicked() {
                                remove_idx = Some(idx);
                            }
                        });
                    }
                });
                if let Some(idx) = remove_idx {
                    self.board.remove_observation(task_id, idx);
                }

                ui.separator();
                let resp = ui.add(egui::TextEdit::singleline(&mut self.new_observation).hint_text("New Observation"));
                let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add Observation").clicked() || enter {
                    if self.board.add_observation(task_id, &self.new_observation) {
                        self.new_observation.clear();
                    }
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.rename_title).hint_text("New title").desired_width(120.0));
                    if ui.button("Rename").clicked() && self.board.rename_task(task_id, &self.rename_title) {
                        self.rename_title.clear();
                    }
                });
                if ui.button(RichText::new("Delete Task").color(HIGHLIGHT_RED)).clicked() {
                    self.delete_task(task_id);
                }
            });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let resp = ui.allocate_rect(available, Sense::click());
            let painter = ui.painter_at(available);

            let layout = CircleLayout::new(
                available.center(),
                self.app_settings.layout_radius,
                self.app_settings.node_radius,
            );
            let positions = layout.positions(self.board.task_count());

            // Lines first so nodes cover their endpoints
            let line_stroke = Stroke::new(1.0, Color32::LIGHT_GRAY);
            for (i, j) in circular::connections(positions.len()) {
                painter.line_segment([positions[i], positions[j]], line_stroke);
            }

            let hover = resp.hover_pos().and_then(|p| layout.hit_test(&positions, p));
            for (idx, (task, pos)) in self.board.iter().zip(positions.iter()).enumerate() {
                let highlighted = self.search_hits.as_ref().is_some_and(|h| h.is_task_highlighted(task.id));
                let fill = if highlighted { HIGHLIGHT_RED } else { Color32::WHITE };
                let stroke = if self.selected_task == Some(task.id) {
                    Stroke::new(3.0, SELECTED_BLUE)
                } else if hover == Some(idx) {
                    Stroke::new(2.5, NODE_STROKE)
                } else {
                    Stroke::new(1.5, NODE_STROKE)
                };
                painter.circle_filled(*pos, layout.node_radius, fill);
                painter.circle_stroke(*pos, layout.node_radius, stroke);
                painter.text(
                    layout.label_anchor(*pos),
                    egui::Align2::CENTER_BOTTOM,
                    &task.title,
                    egui::FontId::proportional(14.0),
                    ui.visuals().strong_text_color(),
                );
            }
            if hover.is_some() {
                ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
            }

            if resp.clicked() {
                let hit = resp
                    .interact_pointer_pos()
                    .and_then(|p: Pos2| layout.hit_test(&positions, p));
                if let Some(id) = hit.and_then(|i| self.board.task_at(i)).map(|t| t.id) {
                    log::debug!("selected task {}", id);
                    self.select_task(Some(id));
                }
            }

            if self.board.is_empty() {
                painter.text(
                    available.center(),
                    egui::Align2::CENTER_CENTER,
                    "No tasks yet",
                    egui::FontId::proportional(16.0),
                    Color32::GRAY,
                );
            }
        });
    }

    fn prefs_window(&mut self, ctx: &egui::Context) {
        if !self.show_prefs_window { return; }
        let mut open = true;
        egui::Window::new("Preferences")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("prefs_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Layout radius");
                    ui.add(
                        egui::Slider::new(&mut self.prefs_edit.layout_radius, 60.0..=400.0)
                            .clamping(egui::SliderClamping::Edits),
                    );
                    ui.end_row();
                    ui.label("Node radius");
                    ui.add(
                        egui::Slider::new(&mut self.prefs_edit.node_radius, 10.0..=60.0)
                            .clamping(egui::SliderClamping::Edits),
                    );
                    ui.end_row();
                    ui.label("Sample data on start");
                    ui.checkbox(&mut self.prefs_edit.seed_sample_data, "");
                    ui.end_row();
                });
                if let Some(r) = self.radius_override {
                    ui.small(format!("--radius {} is active for this run", r));
                }
                ui.small(format!("Exports go to {}", self.prefs_edit.export_dir().display()));
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        self.apply_prefs();
                    }
                    if ui.button("Defaults").clicked() {
                        self.prefs_edit = AppSettings::default();
                    }
                });
                if let Some(msg) = &self.prefs_status { ui.small(msg.clone()); }
            });
        if !open { self.show_prefs_window = false; }
    }
}

impl eframe::App for TaskNetworkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Highlights always reflect current observations
        self.refresh_search();

        self.header(ctx);
        self.controls(ctx);
        self.link_panel(ctx);
        self.observation_panel(ctx);
        self.canvas(ctx);
        self.prefs_window(ctx);

        if let Some((_, at)) = &self.status {
            if at.elapsed() < STATUS_TTL {
                ctx.request_repaint_after(Duration::from_millis(250));
            } else {
                self.status = None;
            }
        }
    }
}
