// ui.rs — 界面：菜单、状态栏、控制按钮、提示浮层、加载与错误提示

use crate::i18n::{tr, tr_with, LANGUAGES};
use crate::loader::LoadPhase;
use crate::session::ViewerSession;
use std::path::PathBuf;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// What the user asked for during one frame. Applied by the event loop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiActions {
    pub open_image: Option<PathBuf>,
    pub reset: bool,
    pub toggle_fullscreen: bool,
    pub toggle_help: bool,
    pub dismiss_error: bool,
    pub language: Option<String>,
    pub exit: bool,
}

pub fn pick_panorama_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(&tr("file.filter.images"), &IMAGE_EXTENSIONS)
        .pick_file()
}

pub fn draw_ui(ctx: &egui::Context, session: &ViewerSession, is_fullscreen: bool) -> UiActions {
    let mut actions = UiActions::default();

    menu_bar(ctx, is_fullscreen, &mut actions);
    status_bar(ctx, session);
    controls(ctx, is_fullscreen, &mut actions);

    if session.viewer.is_user_interacting() {
        ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::Grabbing);
    }

    egui::Area::new(egui::Id::new("drag_hint"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .interactable(false)
        .show(ctx, |ui| {
            dark_frame().show(ui, |ui| {
                ui.label(egui::RichText::new(tr("hint.drag")).small().color(egui::Color32::WHITE));
            });
        });

    if session.help.is_visible() {
        help_overlay(ctx);
    }

    if session.load.is_loading() {
        egui::Area::new(egui::Id::new("loading"))
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .interactable(false)
            .show(ctx, |ui| {
                ui.add(egui::Spinner::new().size(48.0));
            });
    }

    if session.show_error_banner() {
        error_banner(ctx, session.load.phase(), &mut actions);
    }

    actions
}

fn dark_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(egui::Color32::from_black_alpha(180))
        .rounding(6.0)
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
}

fn menu_bar(ctx: &egui::Context, is_fullscreen: bool, actions: &mut UiActions) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button(tr("menu.file"), |ui| {
                if ui.button(tr("menu.open_image")).clicked() {
                    ui.close_menu();
                    actions.open_image = pick_panorama_file();
                }
                if ui.button(tr("menu.exit")).clicked() {
                    actions.exit = true;
                }
            });

            ui.menu_button(tr("menu.view"), |ui| {
                if ui.button(tr("view.reset_zoom")).clicked() {
                    actions.reset = true;
                    ui.close_menu();
                }
                let fullscreen_label = if is_fullscreen {
                    tr("view.fullscreen.exit")
                } else {
                    tr("view.fullscreen.enter")
                };
                if ui.button(fullscreen_label).clicked() {
                    actions.toggle_fullscreen = true;
                    ui.close_menu();
                }
                if ui.button(tr("view.help")).clicked() {
                    actions.toggle_help = true;
                    ui.close_menu();
                }
            });

            ui.menu_button(tr("menu.language"), |ui| {
                let current = crate::i18n::current_lang();
                for (code, name) in LANGUAGES {
                    if ui.radio(current == code, name).clicked() {
                        actions.language = Some(code.to_string());
                        ui.close_menu();
                    }
                }
            });
        });
    });
}

fn status_bar(ctx: &egui::Context, session: &ViewerSession) {
    let viewer = &session.viewer;
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if session.load.is_loading() {
                ui.label(egui::RichText::new(tr("status.loading")).color(egui::Color32::YELLOW));
                ui.label("|");
            }
            ui.label(tr_with("status.fov", &[("fov", format!("{:.1}", viewer.fov))]));
            ui.label("|");
            ui.label(tr_with(
                "status.orientation",
                &[
                    ("lon", format!("{:.1}", viewer.orientation.lon.rem_euclid(360.0))),
                    ("lat", format!("{:.1}", viewer.orientation.lat)),
                ],
            ));
            if viewer.auto_rotate() {
                ui.label(egui::RichText::new("⟳").weak());
            }
            ui.label("|");
            ui.label(egui::RichText::new(session.source()).weak());
        });
    });
}

fn controls(ctx: &egui::Context, is_fullscreen: bool, actions: &mut UiActions) {
    egui::Area::new(egui::Id::new("controls"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if round_button(ui, "ℹ", &tr("controls.help")).clicked() {
                    actions.toggle_help = true;
                }
                if round_button(ui, "⟲", &tr("controls.reset")).clicked() {
                    actions.reset = true;
                }
                let (icon, hint) = if is_fullscreen {
                    ("🗗", tr("controls.fullscreen.exit"))
                } else {
                    ("⛶", tr("controls.fullscreen.enter"))
                };
                if round_button(ui, icon, &hint).clicked() {
                    actions.toggle_fullscreen = true;
                }
            });
        });
}

fn round_button(ui: &mut egui::Ui, icon: &str, hint: &str) -> egui::Response {
    ui.add(
        egui::Button::new(egui::RichText::new(icon).size(16.0))
            .rounding(16.0)
            .min_size(egui::vec2(32.0, 32.0)),
    )
    .on_hover_text(hint)
}

fn help_overlay(ctx: &egui::Context) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 40.0))
        .interactable(false)
        .show(ctx, |ui| {
            dark_frame().show(ui, |ui| {
                ui.set_max_width(420.0);
                ui.label(egui::RichText::new(tr("help.title")).strong().color(egui::Color32::WHITE));
                for key in ["help.drag", "help.zoom", "help.reset", "help.fullscreen"] {
                    ui.label(egui::RichText::new(format!("• {}", tr(key))).color(egui::Color32::WHITE));
                }
            });
        });
}

fn error_banner(ctx: &egui::Context, phase: LoadPhase, actions: &mut UiActions) {
    let (title, body, button) = match phase {
        LoadPhase::Unavailable => (
            tr("banner.unavailable.title"),
            tr("banner.unavailable.body"),
            tr("banner.dismiss"),
        ),
        _ => (
            tr("banner.fallback.title"),
            tr("banner.fallback.body"),
            tr("banner.fallback.continue"),
        ),
    };

    egui::Window::new("load_error")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_max_width(380.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).strong().color(egui::Color32::from_rgb(220, 38, 38)));
                ui.add_space(4.0);
                ui.label(body);
                ui.add_space(8.0);
                if ui.button(button).clicked() {
                    actions.dismiss_error = true;
                }
            });
        });
}
