use crate::prelude::*;
use bevy::color::{ColorToPacked, Srgba};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(0x10, 0x0a, 0x10)))
            .init_resource::<PanelState>()
            .add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system);
    }
}

#[derive(Resource, Default)]
struct PanelState {
    dirty: bool,
}

impl PanelState {
    /// Edits are held back while a pointer button is down, so dragging a
    /// slider or a color picker commits once on release
    fn take_commit(&mut self, pointer_down: bool) -> bool {
        if self.dirty && !pointer_down {
            self.dirty = false;
            true
        } else {
            false
        }
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

fn color_row(ui: &mut egui::Ui, color: &mut Srgba, label: &str) -> bool {
    let mut rgb = color.to_u8_array_no_alpha();
    let changed = ui
        .horizontal(|ui| {
            let changed = ui.color_edit_button_srgb(&mut rgb).changed();
            ui.label(label);
            changed
        })
        .inner;
    if changed {
        *color = Srgba::rgb_u8(rgb[0], rgb[1], rgb[2]);
    }
    changed
}

fn ui_system(
    mut contexts: EguiContexts,
    mut params: ResMut<GalaxyParameters>,
    mut panel: ResMut<PanelState>,
    mut clear_color: ResMut<ClearColor>,
    status: Res<RegenerationStatus>,
    mut commits: EventWriter<ParametersCommitted>,
) {
    let ctx = contexts.ctx_mut();

    let minval = GalaxyParameters::MIN;
    let maxval = GalaxyParameters::MAX;
    let mut regenerate = false;

    egui::SidePanel::left("side_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Configuration");

            // background is not a galaxy parameter, applied straight away
            let mut background = clear_color.0.to_srgba();
            if color_row(ui, &mut background, "Background") {
                clear_color.0 = background.into();
            }
            ui.separator();

            egui::CollapsingHeader::new("Galaxy Parameters")
                .default_open(true)
                .show(ui, |ui| {
                    let mut changed = false;
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                                .step_by(100.0)
                                .logarithmic(true)
                                .text("Count"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(
                                &mut params.point_size,
                                minval.point_size..=maxval.point_size,
                            )
                            .step_by(0.001)
                            .text("Size"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                                .step_by(0.01)
                                .text("Radius"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(
                                &mut params.branches,
                                minval.branches..=maxval.branches,
                            )
                            .text("Branches"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                                .step_by(0.001)
                                .text("Spin"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(
                                &mut params.randomness,
                                minval.randomness..=maxval.randomness,
                            )
                            .step_by(0.001)
                            .text("Randomness"),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(
                                &mut params.randomness_power,
                                minval.randomness_power..=maxval.randomness_power,
                            )
                            .step_by(0.001)
                            .text("Randomness Power"),
                        )
                        .changed();
                    changed |= color_row(ui, &mut params.inside_color, "Inside Color");
                    changed |= color_row(ui, &mut params.outside_color, "Outside Color");

                    panel.dirty |= changed;
                });
            ui.separator();

            regenerate = ui.button("Regenerate").clicked();
            ui.label(format!(
                "Generation {} ({} points)",
                status.generation, status.live_points
            ));
            if let Some(err) = &status.last_error {
                ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
            }
        });

    panel.dirty |= regenerate;
    let pointer_down = ctx.input(|i| i.pointer.any_down());
    if panel.take_commit(pointer_down) {
        commits.write(ParametersCommitted(params.clone()));
    }
}
