use bevy::picking::Pickable;
use bevy::picking::events::{Out, Over, Pointer};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use constants::palette::{HOVER_LABEL_ACTIVE, HOVER_LABEL_IDLE};

use super::router::Interactive;
use crate::engine::environment::bands::srgba_hex;
use crate::engine::scene::SceneRoot;
use crate::engine::scene::room::LabelRequest;
use crate::rpc::web_rpc::WebRpcInterface;

/// The prop under the pointer, if any. Cursor and labels derive from it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoveredObject(pub Option<Entity>);

impl HoveredObject {
    pub fn is_hovering(&self) -> bool {
        self.0.is_some()
    }

    /// Leaving an entity only clears the hover when it is still the one hovered.
    pub fn leave(&mut self, entity: Entity) {
        if self.0 == Some(entity) {
            self.0 = None;
        }
    }
}

pub fn cursor_for(hovered: &HoveredObject) -> SystemCursorIcon {
    if hovered.is_hovering() {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    }
}

pub fn label_color(is_hovered: bool) -> Color {
    let hex = if is_hovered {
        HOVER_LABEL_ACTIVE
    } else {
        HOVER_LABEL_IDLE
    };
    Color::Srgba(srgba_hex(hex))
}

/// Screen-space label pinned above a prop. `hover_only` labels appear
/// while their prop is hovered.
#[derive(Component, Debug, Clone, Copy)]
pub struct HoverLabel {
    pub anchor: Entity,
    pub offset: Vec3,
    pub hover_only: bool,
}

pub fn spawn_hover_labels(commands: &mut Commands, requests: Vec<LabelRequest>) {
    for request in requests {
        let (font_size, background) = if request.hover_only {
            (12.0, Color::BLACK)
        } else {
            (16.0, Color::NONE)
        };
        commands.spawn((
            Text::new(request.text),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(label_color(false)),
            BackgroundColor(background),
            Node {
                position_type: PositionType::Absolute,
                padding: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            Visibility::Hidden,
            Pickable::IGNORE,
            HoverLabel {
                anchor: request.anchor,
                offset: request.offset,
                hover_only: request.hover_only,
            },
            SceneRoot,
        ));
    }
}

pub fn on_interactive_over(
    mut trigger: Trigger<Pointer<Over>>,
    interactives: Query<(), With<Interactive>>,
    mut hovered: ResMut<HoveredObject>,
) {
    let entity = trigger.target();
    if interactives.contains(entity) {
        trigger.propagate(false);
        hovered.0 = Some(entity);
    }
}

pub fn on_interactive_out(
    mut trigger: Trigger<Pointer<Out>>,
    interactives: Query<(), With<Interactive>>,
    mut hovered: ResMut<HoveredObject>,
) {
    let entity = trigger.target();
    if interactives.contains(entity) {
        trigger.propagate(false);
        hovered.leave(entity);
    }
}

/// Props can vanish (room detail rebuild) while hovered.
pub fn forget_despawned_hover(
    mut hovered: ResMut<HoveredObject>,
    interactives: Query<(), With<Interactive>>,
) {
    if let Some(entity) = hovered.0 {
        if !interactives.contains(entity) {
            hovered.0 = None;
        }
    }
}

pub fn apply_hover_cursor(
    mut commands: Commands,
    hovered: Res<HoveredObject>,
    window: Query<Entity, With<PrimaryWindow>>,
) {
    if !hovered.is_changed() {
        return;
    }
    if let Ok(window) = window.single() {
        commands
            .entity(window)
            .insert(CursorIcon::from(cursor_for(&hovered)));
    }
}

/// Tell the host page what is under the pointer.
pub fn notify_hover_changes(
    hovered: Res<HoveredObject>,
    interactives: Query<&Interactive>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !hovered.is_changed() || hovered.is_added() {
        return;
    }
    let label = hovered
        .0
        .and_then(|entity| interactives.get(entity).ok())
        .and_then(Interactive::label);
    rpc_interface.send_notification(
        "hover_changed",
        serde_json::json!({
            "hovering": hovered.is_hovering(),
            "label": label,
        }),
    );
}

/// Project labels onto the viewport and colour the hovered one.
pub fn update_hover_labels(
    hovered: Res<HoveredObject>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    anchors: Query<&GlobalTransform, Without<HoverLabel>>,
    mut labels: Query<(&HoverLabel, &mut Node, &mut TextColor, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };

    for (label, mut node, mut color, mut visibility) in labels.iter_mut() {
        let Ok(anchor) = anchors.get(label.anchor) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let is_hovered = hovered.0 == Some(label.anchor);
        if label.hover_only && !is_hovered {
            *visibility = Visibility::Hidden;
            continue;
        }
        let world = anchor.translation() + label.offset;
        match camera.world_to_viewport(camera_transform, world) {
            Ok(screen) => {
                node.left = Val::Px(screen.x);
                node.top = Val::Px(screen.y);
                *visibility = Visibility::Inherited;
            }
            Err(_) => {
                *visibility = Visibility::Hidden;
            }
        }
        if !label.hover_only {
            color.0 = label_color(is_hovered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_hover() {
        let mut hovered = HoveredObject::default();
        assert_eq!(cursor_for(&hovered), SystemCursorIcon::Default);
        hovered.0 = Some(Entity::from_raw(7));
        assert_eq!(cursor_for(&hovered), SystemCursorIcon::Pointer);
    }

    #[test]
    fn stale_leave_keeps_new_hover() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let mut hovered = HoveredObject(Some(b));
        hovered.leave(a);
        assert_eq!(hovered.0, Some(b));
        hovered.leave(b);
        assert_eq!(hovered.0, None);
    }

    #[test]
    fn label_colours() {
        assert_eq!(
            label_color(true).to_srgba(),
            Srgba::rgb_u8(0xff, 0xcc, 0x66)
        );
        assert_eq!(label_color(false).to_srgba(), Srgba::WHITE);
    }

    #[test]
    fn despawned_prop_clears_hover() {
        let mut app = App::new();
        app.init_resource::<HoveredObject>()
            .add_systems(Update, forget_despawned_hover);
        let prop = app.world_mut().spawn(Interactive::Desk).id();
        app.world_mut().resource_mut::<HoveredObject>().0 = Some(prop);
        app.update();
        assert_eq!(app.world().resource::<HoveredObject>().0, Some(prop));
        app.world_mut().despawn(prop);
        app.update();
        assert_eq!(app.world().resource::<HoveredObject>().0, None);
    }
}
