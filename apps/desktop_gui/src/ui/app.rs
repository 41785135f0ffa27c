use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use navigation::{
    InputEvent, MemoryRouter, MoveOutcome, NavigationController, Router,
};
use server_api::SkillGroup;
use shared::{
    domain::ProfileSettings,
    protocol::{ContactFormRequest, Toast, ToastVariant},
    sections::label_for,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::input::{nav_key, pressed_nav_keys, suppress_key, wheel_event};

const IDLE_REPAINT: Duration = Duration::from_millis(100);

#[derive(Default)]
struct ContactDraft {
    name: String,
    email: String,
    message: String,
}

pub struct PortfolioApp {
    nav: NavigationController<MemoryRouter>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    profile: Option<ProfileSettings>,
    skills: Vec<SkillGroup>,
    contact: ContactDraft,
    toast: Option<Toast>,
}

impl PortfolioApp {
    pub fn new(
        nav: NavigationController<MemoryRouter>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            nav,
            cmd_tx,
            ui_rx,
            profile: None,
            skills: Vec::new(),
            contact: ContactDraft::default(),
            toast: None,
        };
        app.dispatch(BackendCommand::LoadProfile);
        app.dispatch(BackendCommand::LoadSkills);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        if let Some(status) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.toast = Some(Toast::error("Error", status));
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ProfileLoaded(profile) => self.profile = Some(profile),
                UiEvent::SkillsLoaded(groups) => self.skills = groups,
                UiEvent::Toast(toast) => {
                    if toast.variant == ToastVariant::Default {
                        self.contact = ContactDraft::default();
                    }
                    self.toast = Some(toast);
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    self.toast = Some(err.toast());
                }
            }
        }
    }

    /// Feeds this frame's wheel and paging keys to the controller and removes
    /// whatever it handled from egui's input.
    fn handle_navigation_input(&mut self, ctx: &egui::Context) {
        let typing = ctx.wants_keyboard_input();
        let (raw_scroll_y, keys) = ctx.input(|i| (i.raw_scroll_delta.y, pressed_nav_keys(&i.events)));

        if let Some(event) = wheel_event(raw_scroll_y) {
            let outcome = self.nav.handle_input(event);
            log_move(event, outcome.result);
            if outcome.prevent_default {
                ctx.input_mut(|i| {
                    i.raw_scroll_delta = egui::Vec2::ZERO;
                    i.smooth_scroll_delta = egui::Vec2::ZERO;
                });
            }
        }

        if typing {
            return;
        }
        for key in keys {
            let event = InputEvent::Key(nav_key(key));
            let outcome = self.nav.handle_input(event);
            log_move(event, outcome.result);
            if outcome.prevent_default {
                ctx.input_mut(|i| suppress_key(&mut i.events, key));
            }
        }
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        let active = self.nav.router().active_path();
        egui::TopBottomPanel::top("section_nav").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                let mut target = None;
                for path in self.nav.sequence().paths() {
                    let label = label_for(path).unwrap_or(path);
                    if ui.selectable_label(path == active, label).clicked() {
                        target = Some(path.to_string());
                    }
                }
                // Nav links go straight to the router, like a link click would.
                if let Some(path) = target {
                    self.nav.router().navigate(&path);
                }
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("section_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.nav.current_index() {
                    Some(index) => {
                        ui.monospace(format!("{} / {}", index + 1, self.nav.total_sections()));
                    }
                    None => {
                        ui.monospace("- / -");
                    }
                }
                if self.nav.is_transitioning() {
                    ui.spinner();
                }
                if let Some(toast) = &self.toast {
                    ui.separator();
                    let color = match toast.variant {
                        ToastVariant::Default => ui.visuals().text_color(),
                        ToastVariant::Destructive => ui.visuals().error_fg_color,
                    };
                    ui.colored_label(color, &toast.title);
                    if let Some(description) = &toast.description {
                        ui.label(description);
                    }
                }
            });
        });
    }

    fn show_section(&mut self, ctx: &egui::Context) {
        let active = self.nav.router().active_path();
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(label) = self
                .nav
                .sequence()
                .index_of(&active)
                .and_then(|_| label_for(&active))
            else {
                ui.vertical_centered(|ui| {
                    ui.heading("404");
                    ui.label(format!("Oops! Page not found: {active}"));
                    if ui.button("Return to Home").clicked() {
                        self.nav.router().navigate("/");
                    }
                });
                return;
            };

            ui.heading(label);
            ui.add_space(12.0);
            match active.as_str() {
                "/" => {
                    if let Some(profile) = &self.profile {
                        ui.label(egui::RichText::new(&profile.full_name).size(28.0));
                    }
                }
                "/about" => {
                    if let Some(bio) = self.profile.as_ref().and_then(|p| p.bio.as_deref()) {
                        ui.label(bio);
                    }
                }
                "/skills" => {
                    for group in &self.skills {
                        ui.strong(&group.category);
                        for skill in &group.skills {
                            ui.add(
                                egui::ProgressBar::new(f32::from(skill.proficiency) / 100.0)
                                    .text(&skill.name),
                            );
                        }
                        ui.add_space(8.0);
                    }
                }
                "/resume" => match self.profile.as_ref().and_then(|p| p.resume_url.as_deref()) {
                    Some(url) => {
                        ui.hyperlink_to("Download resume", url);
                    }
                    None => {
                        ui.label("Resume coming soon.");
                    }
                },
                "/contact" => self.show_contact_form(ui),
                _ => {}
            }
        });
    }

    fn show_contact_form(&mut self, ui: &mut egui::Ui) {
        ui.label("Name");
        ui.text_edit_singleline(&mut self.contact.name);
        ui.label("Email");
        ui.text_edit_singleline(&mut self.contact.email);
        ui.label("Message");
        ui.text_edit_multiline(&mut self.contact.message);
        if ui.button("Send").clicked() {
            let form = ContactFormRequest {
                name: self.contact.name.clone(),
                email: self.contact.email.clone(),
                message: self.contact.message.clone(),
            };
            self.dispatch(BackendCommand::SubmitContact(form));
        }
    }
}

fn log_move(event: InputEvent, result: Option<MoveOutcome>) {
    match result {
        Some(MoveOutcome::Moved { from, to }) => {
            tracing::debug!(?event, ?from, to, "section changed");
        }
        Some(other) => tracing::debug!(?event, outcome = ?other, "navigation ignored"),
        None => {}
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_navigation_input(ctx);

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);
        self.show_section(ctx);

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}
