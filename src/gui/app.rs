// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::{consts::APP_TITLE, state::AppState},
    core::HttpClient,
    data::{Phase, ViewCache},
    fetch::Background,
    store::{Outcome, ResultsStore, Ticket},
};

use super::{components, progress::GuiProgress};

pub fn run(options: eframe::NativeOptions, url: Option<String>) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            let mut app = App::new(AppState::default(), cc.egui_ctx.clone());
            if let Some(url) = url {
                app.state.gui.url_input = url;
                app.submit_url();
            }
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub store: ResultsStore,
    pub views: ViewCache,

    // fetch plumbing
    pub client: HttpClient,
    pub background: Background,
    ctx: egui::Context,

    // status line (workers write here)
    pub status: Arc<Mutex<String>>,
    pub config_error: Option<String>,

    // requests raised by widgets this frame, applied after drawing
    pub want_configure: bool,
    pub want_refetch: bool,
    pub want_reconfigure: bool,
}

impl App {
    pub fn new(state: AppState, ctx: egui::Context) -> Self {
        logf!("Init: {}", APP_TITLE);
        Self {
            state,
            store: ResultsStore::new(),
            views: ViewCache::new(),
            client: HttpClient::default(),
            background: Background::new(),
            ctx,
            status: Arc::new(Mutex::new(s!("Idle"))),
            config_error: None,
            want_configure: false,
            want_refetch: false,
            want_reconfigure: false,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn phase(&mut self) -> Phase {
        let view = self.views.refresh(self.store.generation(), self.store.entries(), &self.state.filters);
        Phase::of(&self.state.source, &self.store, view)
    }

    /* ---------- lifecycle ---------- */

    /// Configure screen → Configured, then kick off the first fetch.
    pub fn submit_url(&mut self) {
        match self.state.source.configure(&self.state.gui.url_input) {
            Ok(()) => {
                self.config_error = None;
                let url = s!(self.state.source.url());
                let ticket = self.store.begin(&url);
                self.spawn(ticket);
            }
            Err(e) => {
                logd!("UI: configure refused: {}", e);
                self.config_error = Some(e.to_string());
            }
        }
    }

    pub fn refetch(&mut self) {
        let ticket = self.store.refetch();
        if ticket.is_none() {
            logd!("UI: refresh ignored (idle or already loading)");
        }
        self.spawn(ticket);
    }

    /// Drop the source and every record; back to the configure screen.
    pub fn reconfigure(&mut self) {
        if let Err(e) = self.state.source.reconfigure() {
            logd!("UI: reconfigure refused: {}", e);
            return;
        }
        self.store.reset();
        self.views.invalidate();
        self.state.filters.clear();
        self.state.gui.url_input.clear();
        self.status("Idle");
    }

    fn spawn(&mut self, ticket: Option<Ticket>) {
        let Some(ticket) = ticket else { return };
        self.status("Loading results…");
        let ctx = self.ctx.clone();
        self.background.spawn(
            &self.client,
            ticket,
            GuiProgress::new(self.status.clone()),
            move || ctx.request_repaint(),
        );
    }

    /// Apply finished fetches; drop selectors the new data no longer offers.
    fn poll(&mut self) {
        let outcomes = self.background.drain_into(&mut self.store);
        if outcomes.is_empty() {
            return;
        }
        for o in &outcomes {
            match o {
                Outcome::Applied(n) => self.status(format!("Ready: {n} results")),
                Outcome::Failed(e) => self.status(format!("Error: {e}")),
                _ => {}
            }
        }
        if outcomes.iter().any(|o| matches!(o, Outcome::Applied(_))) {
            let vocab = Arc::clone(
                &self
                    .views
                    .refresh(self.store.generation(), self.store.entries(), &self.state.filters)
                    .vocabulary,
            );
            self.state.filters.retain_known(&vocab.categories, &vocab.teams);
        }
    }

    fn apply_requests(&mut self) {
        if std::mem::take(&mut self.want_configure) {
            self.submit_url();
        }
        if std::mem::take(&mut self.want_refetch) {
            self.refetch();
        }
        if std::mem::take(&mut self.want_reconfigure) {
            self.reconfigure();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        if self.state.source.is_configured() {
            egui::TopBottomPanel::top("header").show(ctx, |ui| {
                components::header::draw(ui, self);
            });
            egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
                ui.small(self.status_text());
            });
            egui::CentralPanel::default().show(ctx, |ui| {
                components::filter_bar::draw(ui, self);
                ui.separator();
                components::status::draw(ui, self);
                components::result_card::draw(ui, self);
            });
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                components::configure::draw(ui, self);
            });
        }

        self.apply_requests();

        if self.store.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
