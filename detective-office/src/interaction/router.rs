use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;
use constants::camera::{
    BOARD_FOCUS_LOOK_AT, BOARD_FOCUS_POSITION, CABINET_FOCUS_LOOK_AT, CABINET_FOCUS_POSITION,
    DESK_FOCUS_LOOK_AT, DESK_FOCUS_POSITION,
};
use rand::thread_rng;

use crate::content::case_files::CaseFileTable;
use crate::engine::audio::playback::SoundscapeDirector;
use crate::engine::camera::focus_camera::{CameraFocus, CameraRig};
use crate::engine::core::session::SessionConfig;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::ui::modals::registry::{ModalRegistry, ModalRequest, OpenOutcome};
use crate::ui::modals::presenter::ModalEffectQueue;

pub const DESK_NOTES_ID: &str = "desk_notes";
pub const SECRET_PHOTO_ID: &str = "secret_photo";

/// A clickable prop. Nested props (drawers inside the cabinet) stop the
/// click at the innermost one.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum Interactive {
    Desk,
    MagnifyingGlass,
    BulletinBoard,
    CryptoPhoto { id: String, title: String },
    FilingCabinet,
    FileDrawer { id: String, token: String },
    DeskPhone,
    WallPhone,
}

impl Interactive {
    /// Floating label text, when the prop has one.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Desk => Some("Examine Desk".into()),
            Self::BulletinBoard => Some("Examine Board".into()),
            Self::FilingCabinet => Some("Examine Files".into()),
            Self::FileDrawer { token, .. } => Some(token.clone()),
            Self::CryptoPhoto { title, .. } => Some(title.clone()),
            Self::DeskPhone => Some("SEC is calling...".into()),
            Self::WallPhone => Some("Answer Phone".into()),
            Self::MagnifyingGlass => None,
        }
    }
}

/// Everything a single activation asks for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutedActivation {
    pub modal: Option<ModalRequest>,
    pub focus: Option<CameraFocus>,
    pub desk_cue: bool,
}

pub fn route(target: &Interactive) -> RoutedActivation {
    match target {
        Interactive::Desk => RoutedActivation {
            modal: Some(ModalRequest::Evidence {
                id: DESK_NOTES_ID.into(),
            }),
            focus: Some(CameraFocus::new(DESK_FOCUS_POSITION, DESK_FOCUS_LOOK_AT)),
            desk_cue: true,
        },
        Interactive::MagnifyingGlass => RoutedActivation {
            modal: Some(ModalRequest::Evidence {
                id: SECRET_PHOTO_ID.into(),
            }),
            ..default()
        },
        Interactive::BulletinBoard => RoutedActivation {
            focus: Some(CameraFocus::new(BOARD_FOCUS_POSITION, BOARD_FOCUS_LOOK_AT)),
            ..default()
        },
        Interactive::CryptoPhoto { id, .. } => RoutedActivation {
            modal: Some(ModalRequest::CryptoEvidence { id: id.clone() }),
            ..default()
        },
        Interactive::FilingCabinet => RoutedActivation {
            focus: Some(CameraFocus::new(
                CABINET_FOCUS_POSITION,
                CABINET_FOCUS_LOOK_AT,
            )),
            ..default()
        },
        Interactive::FileDrawer { id, .. } => RoutedActivation {
            modal: Some(ModalRequest::FileDrawer { id: id.clone() }),
            ..default()
        },
        Interactive::DeskPhone | Interactive::WallPhone => RoutedActivation {
            modal: Some(ModalRequest::PhoneCall),
            ..default()
        },
    }
}

#[derive(Event, Debug, Clone)]
pub struct InteractionActivated {
    pub target: Interactive,
}

/// Entity observer attached to every interactive prop.
pub fn on_interactive_click(
    mut trigger: Trigger<Pointer<Click>>,
    interactives: Query<&Interactive>,
    mut activations: EventWriter<InteractionActivated>,
) {
    let Ok(target) = interactives.get(trigger.target()) else {
        return;
    };
    trigger.propagate(false);
    activations.write(InteractionActivated {
        target: target.clone(),
    });
}

/// Apply routed activations: open modals, move the camera, play the desk cue.
pub fn handle_interaction_activations(
    mut events: EventReader<InteractionActivated>,
    content: Option<Res<CaseFileTable>>,
    session: Res<SessionConfig>,
    mut registry: ResMut<ModalRegistry>,
    mut rig: ResMut<CameraRig>,
    mut director: ResMut<SoundscapeDirector>,
    mut effects: ResMut<ModalEffectQueue>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let routed = route(&event.target);
        info!("Activated {:?}", event.target);

        if let Some(focus) = routed.focus {
            rig.focus(focus);
        }
        if routed.desk_cue && session.desk_cue {
            director.cue();
        }

        let Some(request) = routed.modal else {
            continue;
        };
        let Some(content) = content.as_deref() else {
            warn!("Content table not ready, ignoring {:?}", request);
            continue;
        };

        match registry.open(&request, content, &mut thread_rng()) {
            Ok(OpenOutcome::Opened(opened)) => effects.extend(opened),
            Ok(OpenOutcome::AlreadyOpen) => {
                debug!("{:?} already open, request dropped", request.kind());
            }
            Err(err) => {
                warn!("Could not open modal: {}", err);
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({ "message": err.to_string() }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::modals::registry::ModalKind;

    #[test]
    fn desk_opens_notes_and_focuses() {
        let routed = route(&Interactive::Desk);
        assert_eq!(
            routed.modal,
            Some(ModalRequest::Evidence {
                id: "desk_notes".into()
            })
        );
        let focus = routed.focus.unwrap();
        assert_eq!(focus.position, Vec3::new(0.0, 1.2, -2.0));
        assert_eq!(focus.look_at, Vec3::new(0.0, 0.5, -3.0));
        assert!(routed.desk_cue);
    }

    #[test]
    fn board_and_cabinet_only_move_the_camera() {
        for target in [Interactive::BulletinBoard, Interactive::FilingCabinet] {
            let routed = route(&target);
            assert!(routed.modal.is_none());
            assert!(routed.focus.is_some());
            assert!(!routed.desk_cue);
        }
        assert_eq!(
            route(&Interactive::BulletinBoard).focus.unwrap().look_at,
            Vec3::new(-4.8, 2.0, 0.0)
        );
    }

    #[test]
    fn nested_props_open_their_own_modal_without_focus() {
        let drawer = route(&Interactive::FileDrawer {
            id: "drawer3".into(),
            token: "$SLERF".into(),
        });
        assert_eq!(
            drawer.modal,
            Some(ModalRequest::FileDrawer {
                id: "drawer3".into()
            })
        );
        assert!(drawer.focus.is_none());

        let photo = route(&Interactive::CryptoPhoto {
            id: "like".into(),
            title: "$LIKE".into(),
        });
        assert_eq!(photo.modal.unwrap().kind(), ModalKind::CryptoEvidence);

        let glass = route(&Interactive::MagnifyingGlass);
        assert_eq!(
            glass.modal,
            Some(ModalRequest::Evidence {
                id: "secret_photo".into()
            })
        );
    }

    #[test]
    fn both_phones_ring_the_same_call() {
        assert_eq!(
            route(&Interactive::DeskPhone).modal,
            Some(ModalRequest::PhoneCall)
        );
        assert_eq!(
            route(&Interactive::WallPhone).modal,
            Some(ModalRequest::PhoneCall)
        );
    }

    #[test]
    fn labels() {
        assert_eq!(Interactive::Desk.label().as_deref(), Some("Examine Desk"));
        assert_eq!(
            Interactive::FileDrawer {
                id: "drawer1".into(),
                token: "$GM.ai".into()
            }
            .label()
            .as_deref(),
            Some("$GM.ai")
        );
        assert_eq!(Interactive::MagnifyingGlass.label(), None);
    }

    #[test]
    fn clicking_a_drawer_twice_opens_one_modal() {
        let mut app = App::new();
        app.insert_resource(CaseFileTable::builtin().unwrap())
            .init_resource::<SessionConfig>()
            .init_resource::<ModalRegistry>()
            .init_resource::<CameraRig>()
            .insert_resource(SoundscapeDirector::new(22.0))
            .init_resource::<ModalEffectQueue>()
            .init_resource::<WebRpcInterface>()
            .add_event::<InteractionActivated>()
            .add_systems(Update, handle_interaction_activations);

        let drawer = Interactive::FileDrawer {
            id: "drawer3".into(),
            token: "$SLERF".into(),
        };
        app.world_mut().send_event(InteractionActivated {
            target: drawer.clone(),
        });
        app.update();
        app.world_mut()
            .send_event(InteractionActivated { target: drawer });
        app.update();

        let registry = app.world().resource::<ModalRegistry>();
        assert_eq!(registry.tracked_kinds(), vec![ModalKind::FileDrawer]);
        assert_eq!(
            registry.file_drawer.as_ref().unwrap().item().token,
            "$SLERF"
        );
        // Opened effect queued exactly once.
        assert_eq!(app.world().resource::<ModalEffectQueue>().len(), 1);
    }
}
