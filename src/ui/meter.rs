//! Shot meter presentation and UI nodes
//!
//! Gameplay writes `MeterPresentation` on each actor; the UI nodes only read it.

use bevy::prelude::*;

use crate::constants::*;
use crate::player::Player;
use crate::shooting::{AccuracyWindow, AccuracyWindows, ShotMeter, ShotMeterConfig};
use crate::tuning::GameplayTuning;

/// What the meter display shows for one actor
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MeterPresentation {
    /// Fill normalized to [0, 1] over the meter range
    pub fill: f32,
    pub visible: bool,
    pub windows: AccuracyWindows,
    /// Top-left-origin screen pixels, None when there's no camera
    pub screen_position: Option<Vec2>,
}

impl MeterPresentation {
    pub fn from_meter(meter: &ShotMeter, config: &ShotMeterConfig, screen_position: Option<Vec2>) -> Self {
        Self {
            fill: config.normalize(meter.fill),
            visible: meter.visible,
            windows: meter.windows,
            screen_position,
        }
    }
}

/// World to screen mapping
pub trait ScreenProjection {
    fn world_to_screen(&self, world: Vec2) -> Option<Vec2>;
}

/// Projection through a Bevy camera
pub struct CameraProjection<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl ScreenProjection for CameraProjection<'_> {
    fn world_to_screen(&self, world: Vec2) -> Option<Vec2> {
        self.camera
            .world_to_viewport(self.transform, world.extend(0.0))
            .ok()
    }
}

/// Screen anchor of an actor's meter: its projected position, pushed right
pub fn meter_anchor(projection: &impl ScreenProjection, world: Vec2, x_offset: f32) -> Option<Vec2> {
    projection
        .world_to_screen(world)
        .map(|screen| screen + Vec2::new(x_offset, 0.0))
}

/// Runs in Update after the meters are ticked
pub fn update_meter_presentation(
    tuning: Res<GameplayTuning>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut players: Query<
        (&Transform, &ShotMeter, &ShotMeterConfig, &mut MeterPresentation),
        With<Player>,
    >,
) {
    let camera = cameras.iter().find(|(camera, _)| camera.is_active);

    for (transform, meter, config, mut presentation) in &mut players {
        let screen_position = camera.and_then(|(camera, camera_transform)| {
            let projection = CameraProjection {
                camera,
                transform: camera_transform,
            };
            meter_anchor(&projection, transform.translation.truncate(), tuning.meter_x_offset)
        });
        *presentation = MeterPresentation::from_meter(meter, config, screen_position);
    }
}

/// Root node of one actor's meter
#[derive(Component)]
pub struct MeterWidget {
    pub owner: Entity,
}

/// Child nodes of a meter widget
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterPart {
    Yellow,
    Green,
    Fill,
}

/// Spawn the meter track and its window/fill children for `owner`
pub fn spawn_meter_ui(commands: &mut Commands, owner: Entity) {
    let part = |part: MeterPart, color: Color| {
        (
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(0.0),
                ..default()
            },
            BackgroundColor(color),
            part,
        )
    };

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(METER_WIDTH),
                height: Val::Px(METER_HEIGHT),
                display: Display::None,
                ..default()
            },
            BackgroundColor(METER_TRACK_COLOR),
            MeterWidget { owner },
        ))
        .with_children(|parent| {
            parent.spawn(part(MeterPart::Yellow, METER_YELLOW_COLOR));
            parent.spawn(part(MeterPart::Green, METER_GREEN_COLOR));
            parent.spawn(part(MeterPart::Fill, METER_FILL_COLOR));
        });
}

/// Top and height of a window, in percent of the track
fn window_span(window: &AccuracyWindow) -> (f32, f32) {
    let top = (0.5 - window.offset - window.height / 2.0).clamp(0.0, 1.0);
    let height = window.height.clamp(0.0, 1.0 - top);
    (top * 100.0, height * 100.0)
}

/// Copy presentation state onto the meter nodes
pub fn sync_meter_ui(
    presentations: Query<&MeterPresentation>,
    mut widgets: Query<(&MeterWidget, &Children, &mut Node), Without<MeterPart>>,
    mut parts: Query<(&MeterPart, &mut Node), Without<MeterWidget>>,
) {
    for (widget, children, mut node) in &mut widgets {
        let Ok(presentation) = presentations.get(widget.owner) else {
            continue;
        };
        let Some(anchor) = presentation.screen_position.filter(|_| presentation.visible) else {
            node.display = Display::None;
            continue;
        };

        node.display = Display::Flex;
        node.left = Val::Px(anchor.x);
        node.top = Val::Px(anchor.y - METER_HEIGHT / 2.0);

        for child in children.iter() {
            let Ok((part, mut part_node)) = parts.get_mut(child) else {
                continue;
            };
            let (top, height) = match part {
                MeterPart::Yellow => window_span(&presentation.windows.yellow),
                MeterPart::Green => window_span(&presentation.windows.green),
                MeterPart::Fill => {
                    let fill = presentation.fill.clamp(0.0, 1.0);
                    ((1.0 - fill) * 100.0, fill * 100.0)
                }
            };
            part_node.top = Val::Percent(top);
            part_node.height = Val::Percent(height);
        }
    }
}
