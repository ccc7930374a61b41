//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui;
use shared::CanvasSize;

use crate::canvas::CanvasPanel;
use crate::image_loader::{self, ImageLoadJob};
use crate::session::container_with_fallback;
use crate::state::AppState;
use crate::ui::{control_panel, notifications, status_bar};

/// Main application
pub struct FloorScaleApp {
    state: AppState,
    canvas: CanvasPanel,
    /// Decode in flight
    load_job: Option<ImageLoadJob>,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Reset epoch the canvas was last synced to
    last_epoch: u64,
}

impl FloorScaleApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_image: Option<PathBuf>) -> Self {
        let state = AppState::default();
        crate::i18n::set_lang(state.settings.language);

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);
        styles::install_cjk_font(&cc.egui_ctx);

        let last_font_size = state.settings.ui.font_size;
        let last_epoch = state.session.epoch();
        let mut app = Self {
            state,
            canvas: CanvasPanel::new(),
            load_job: None,
            last_font_size,
            last_epoch,
        };

        if let Some(path) = initial_image {
            app.open_path(&path);
        }
        app
    }

    /// Validate a file on disk and start decoding it in the background
    fn open_path(&mut self, path: &Path) {
        let mime = image_loader::mime_for_path(path);
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        if !self.state.session.accept_file(&mime, size) {
            return;
        }
        match std::fs::read(path) {
            Ok(bytes) => {
                tracing::info!("Loading floor plan {}", path.display());
                self.load_job = Some(ImageLoadJob::spawn(bytes, mime));
            }
            Err(e) => {
                let container = self.container();
                self.state.session.finish_load(Err(e.into()), container);
            }
        }
    }

    fn open_bytes(&mut self, bytes: Vec<u8>, mime: String) {
        if self.state.session.accept_file(&mime, bytes.len() as u64) {
            self.load_job = Some(ImageLoadJob::spawn(bytes, mime));
        }
    }

    fn container(&self) -> CanvasSize {
        container_with_fallback(self.canvas.container(), self.canvas.window_height())
    }

    fn poll_load_job(&mut self, ctx: &egui::Context) {
        let Some(job) = self.load_job.as_mut() else {
            return;
        };
        match job.poll() {
            Some(result) => {
                self.load_job = None;
                let container = self.container();
                self.state.session.finish_load(result, container);
            }
            None => ctx.request_repaint_after(Duration::from_millis(50)),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(bytes) = file.bytes {
            let mime = if file.mime.is_empty() {
                image_loader::mime_for_path(Path::new(&file.name))
            } else {
                file.mime.clone()
            };
            self.open_bytes(bytes.to_vec(), mime);
        } else if let Some(path) = file.path {
            self.open_path(&path);
        }
    }
}

impl eframe::App for FloorScaleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        let now = ctx.input(|i| i.time);
        self.state.session.tick(now);

        // Reset fan-out: drop anything the canvas derived from the old image
        if self.state.session.epoch() != self.last_epoch {
            self.last_epoch = self.state.session.epoch();
            self.canvas.on_reset();
            if self.load_job.take().is_some() {
                tracing::debug!("Dropped in-flight image decode on reset");
            }
        }

        self.handle_dropped_files(ctx);
        self.poll_load_job(ctx);

        let actions = keyboard::handle_keyboard(ctx, &mut self.state);
        if actions.open_file {
            self.pick_file();
        }

        // ── Menu bar ──────────────────────────────────────────
        let mut pick = false;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                pick |= menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });
        if pick {
            self.pick_file();
        }

        // ── Settings window / reset confirmation ─────────────
        menus::settings_window(ctx, &mut self.state);
        menus::reset_confirmation(ctx, &mut self.state);

        // ── Status bar ───────────────────────────────────────
        if self.state.panels.status_bar {
            egui::TopBottomPanel::bottom("status_bar")
                .exact_height(22.0)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style())
                        .inner_margin(egui::Margin::symmetric(8, 2)),
                )
                .show(ctx, |ui| {
                    status_bar::show(ui, &self.state);
                });
        }

        // ── Right panel: area input and grid controls ────────
        if self.state.panels.controls {
            egui::SidePanel::right("controls")
                .default_width(260.0)
                .width_range(200.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(8)),
                )
                .show(ctx, |ui| {
                    control_panel::show(ui, &mut self.state);
                });
        }

        // ── Central panel: floor plan canvas ─────────────────
        let mut pick_from_canvas = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                pick_from_canvas = self.canvas.show(ui, &mut self.state);
            });
        if pick_from_canvas {
            self.pick_file();
        }

        notifications::show(ctx, &mut self.state.session);
        if let Some(remaining) = self.state.session.notifications().remaining() {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining.max(0.05)));
        }
    }
}

impl FloorScaleApp {
    fn pick_file(&mut self) {
        if self.state.session.is_loading() {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .set_title(crate::i18n::t("menu.open_title"))
            .add_filter("Image", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"])
            .pick_file()
        {
            self.open_path(&path);
        }
    }
}
