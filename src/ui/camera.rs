use crate::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control_system);
    }
}

fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(orbit.translation()).looking_at(orbit.target, Vec3::Y),
        orbit,
    ));
}

/// Orbits the galaxy centre. Drag with the left button, scroll to zoom.
#[derive(Component, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    smooth_zoom_buffer: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: GALAXY_TRANSLATION,
            yaw: 0.6,
            pitch: 0.45,
            distance: 90.0,
            smooth_zoom_buffer: 0.0,
        }
    }
}

impl OrbitCamera {
    const MIN_DISTANCE: f32 = 5.0;
    const MAX_DISTANCE: f32 = 400.0;
    const PITCH_LIMIT: f32 = 1.5;

    fn translation(&self) -> Vec3 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        self.target + rotation * Vec3::new(0.0, 0.0, self.distance)
    }

    fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * 0.005;
        self.pitch = (self.pitch + delta.y * 0.005).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    // scroll is cached to a buffer which is drained over a few frames for a smooth zoom
    fn drain_zoom(&mut self) {
        let smooth_zoom_min = 0.001f32;
        let smooth_zoom_factor = 0.2f32;

        let amount = if self.smooth_zoom_buffer < 0.0 {
            f32::min(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                (-smooth_zoom_min).max(self.smooth_zoom_buffer),
            )
        } else {
            f32::max(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                smooth_zoom_min.min(self.smooth_zoom_buffer),
            )
        };
        self.smooth_zoom_buffer -= amount;
        self.distance =
            (self.distance * (1.0 - amount)).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

fn camera_control_system(
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    // the control panel owns the pointer while it is hovered
    let ctx = contexts.ctx_mut();
    let egui_wants_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();

    let motion: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    if mouse_buttons.pressed(MouseButton::Left) && !egui_wants_pointer {
        orbit.rotate(motion);
    }

    for ev in scroll_evr.read() {
        if egui_wants_pointer {
            continue;
        }
        match ev.unit {
            MouseScrollUnit::Line => orbit.smooth_zoom_buffer += ev.y * 0.1,
            MouseScrollUnit::Pixel => orbit.smooth_zoom_buffer += ev.y * 0.005,
        }
    }
    orbit.drain_zoom();

    transform.translation = orbit.translation();
    transform.look_at(orbit.target, Vec3::Y);
}
