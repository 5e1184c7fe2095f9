use bevy::picking::Pickable;
use bevy::prelude::*;
use constants::modal::{ARTICLE_BUTTON_LABEL, EXTERNAL_LINK_FEATURES};

use super::evidence::{EvidencePresenter, NarrationState};
use super::phone_call::CallState;
use super::registry::{ModalEffect, ModalKind, ModalRegistry};
use crate::engine::audio::playback::{ModalSound, start_narration, start_ringtone, stop_modal_sound};
use crate::engine::core::app_state::AppState;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::ui::controls::{Control, ControlEvent, ControlSource};

const BACKDROP_ALPHA: f32 = 0.75;
const CARD_COLOR: Color = Color::srgb(0.122, 0.102, 0.090);
const ACCENT_COLOR: Color = Color::srgb(1.0, 0.8, 0.4);
const BUTTON_NORMAL: Color = Color::srgb(0.25, 0.2, 0.16);
const BUTTON_HOVERED: Color = Color::srgb(0.35, 0.28, 0.2);
const BUTTON_PRESSED: Color = Color::srgb(0.5, 0.4, 0.25);
const CARD_SCALE_HIDDEN: f32 = 0.85;

/// Effects produced by the modal registry, drained once per frame.
#[derive(Resource, Default, Debug, Deref, DerefMut)]
pub struct ModalEffectQueue(pub Vec<ModalEffect>);

/// Full-screen backdrop owning one modal's UI tree.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalRoot(pub ModalKind);

#[derive(Component, Debug, Clone, Copy)]
pub struct ModalCard(pub ModalKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalField {
    Heading,
    Subheading,
    Body,
    Footer,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ModalText {
    pub kind: ModalKind,
    pub field: ModalField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Narration,
    Article,
    Answer,
    /// Close, decline and hang up.
    Close,
}

impl ModalAction {
    const ALL: [ModalAction; 4] = [Self::Narration, Self::Article, Self::Answer, Self::Close];

    pub fn control(self, kind: ModalKind) -> Control {
        match self {
            Self::Narration => Control::ToggleNarration(kind),
            Self::Article => Control::OpenArticle(kind),
            Self::Answer => Control::AnswerCall,
            Self::Close => Control::CloseModal(kind),
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ModalButton {
    pub kind: ModalKind,
    pub action: ModalAction,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ModalButtonLabel {
    pub kind: ModalKind,
    pub action: ModalAction,
}

/// Everything a modal shows this frame, read off its presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub backdrop_visible: bool,
    pub card_zoomed: bool,
    pub heading: String,
    pub subheading: String,
    pub body: String,
    pub footer: String,
    pub image: Option<String>,
    pub actions: Vec<(ModalAction, String)>,
}

impl ModalView {
    pub fn field(&self, field: ModalField) -> &str {
        match field {
            ModalField::Heading => &self.heading,
            ModalField::Subheading => &self.subheading,
            ModalField::Body => &self.body,
            ModalField::Footer => &self.footer,
        }
    }

    pub fn action_label(&self, action: ModalAction) -> Option<&str> {
        self.actions
            .iter()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, label)| label.as_str())
    }
}

fn narration_label(state: NarrationState) -> &'static str {
    match state {
        NarrationState::Off => "Play Narration",
        NarrationState::Starting => "Starting...",
        NarrationState::Playing => "Pause Narration",
    }
}

fn evidence_view(presenter: &EvidencePresenter) -> ModalView {
    let card = presenter.card();
    let mut actions = vec![(
        ModalAction::Narration,
        narration_label(presenter.narration()).to_string(),
    )];
    if card.article_url.is_some() {
        actions.push((ModalAction::Article, ARTICLE_BUTTON_LABEL.to_string()));
    }
    actions.push((ModalAction::Close, "Close".to_string()));

    ModalView {
        backdrop_visible: presenter.lifecycle().backdrop_visible(),
        card_zoomed: presenter.lifecycle().card_zoomed(),
        heading: card.title.clone(),
        subheading: card.reference.clone().unwrap_or_default(),
        body: presenter.revealed_text().to_string(),
        footer: String::new(),
        image: (!card.image.is_empty()).then(|| card.image.clone()),
        actions,
    }
}

/// Snapshot of a tracked modal, or None when that kind is not on screen.
pub fn modal_view(registry: &ModalRegistry, kind: ModalKind) -> Option<ModalView> {
    match kind {
        ModalKind::Evidence => registry.evidence.as_ref().map(evidence_view),
        ModalKind::CryptoEvidence => registry.crypto_evidence.as_ref().map(evidence_view),
        ModalKind::FileDrawer => registry.file_drawer.as_ref().map(|drawer| ModalView {
            backdrop_visible: drawer.lifecycle().backdrop_visible(),
            card_zoomed: drawer.lifecycle().card_zoomed(),
            heading: drawer.heading(),
            subheading: drawer.item().title.clone(),
            body: drawer.item().summary(),
            footer: format!("Evidence #{}", drawer.evidence_reference()),
            image: None,
            actions: vec![
                (ModalAction::Article, ARTICLE_BUTTON_LABEL.to_string()),
                (ModalAction::Close, "Close".to_string()),
            ],
        }),
        ModalKind::PhoneCall => registry.phone_call.as_ref().map(|call| ModalView {
            backdrop_visible: call.lifecycle().backdrop_visible(),
            card_zoomed: call.lifecycle().card_zoomed(),
            heading: call.caller_label().to_string(),
            subheading: call.status_label().to_string(),
            body: call.transcript().to_string(),
            footer: String::new(),
            image: None,
            actions: match call.call_state() {
                CallState::Ringing => vec![
                    (ModalAction::Answer, "Answer".to_string()),
                    (ModalAction::Close, "Decline".to_string()),
                ],
                CallState::Answered => vec![(ModalAction::Close, "Hang Up".to_string())],
            },
        }),
    }
}

/// Advance every modal's timers.
pub fn step_modals(
    time: Res<Time>,
    mut registry: ResMut<ModalRegistry>,
    mut effects: ResMut<ModalEffectQueue>,
) {
    let stepped = registry.step(time.delta());
    effects.extend(stepped);
}

/// Carry out queued modal effects: UI, sounds and links.
pub fn execute_modal_effects(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    registry: Res<ModalRegistry>,
    mut effects: ResMut<ModalEffectQueue>,
    sounds: Query<(Entity, &ModalSound)>,
    roots: Query<(Entity, &ModalRoot)>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for effect in effects.drain(..) {
        match effect {
            ModalEffect::Opened(kind) => {
                despawn_modal_ui(&mut commands, &roots, kind);
                let Some(view) = modal_view(&registry, kind) else {
                    warn!("Modal {} opened without a presenter", kind);
                    continue;
                };
                spawn_modal_ui(&mut commands, &asset_server, kind, &view);
                info!("Modal opened: {}", kind);
                rpc_interface.send_notification(
                    "modal_opened",
                    serde_json::json!({ "kind": kind.label() }),
                );
            }
            ModalEffect::Unmounted(kind) => {
                despawn_modal_ui(&mut commands, &roots, kind);
                info!("Modal closed: {}", kind);
                rpc_interface.send_notification(
                    "modal_closed",
                    serde_json::json!({ "kind": kind.label() }),
                );
            }
            ModalEffect::PlayRingtone => start_ringtone(&mut commands, &asset_server),
            ModalEffect::StopRingtone => {
                stop_modal_sound(&mut commands, &sounds, ModalSound::Ringtone)
            }
            ModalEffect::PlayNarration(kind) => start_narration(&mut commands, &asset_server, kind),
            ModalEffect::PauseNarration(kind) => {
                stop_modal_sound(&mut commands, &sounds, ModalSound::Narration(kind))
            }
            ModalEffect::OpenExternalLink(url) => open_external_link(&url),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_external_link(url: &str) {
    let Some(window) = web_sys::window() else {
        warn!("No browser window to open {}", url);
        return;
    };
    if let Err(err) = window.open_with_url_and_target_and_features(url, "_blank", EXTERNAL_LINK_FEATURES)
    {
        warn!("Failed to open {}: {:?}", url, err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_external_link(url: &str) {
    info!("Open in browser ({}): {}", EXTERNAL_LINK_FEATURES, url);
}

fn despawn_modal_ui(commands: &mut Commands, roots: &Query<(Entity, &ModalRoot)>, kind: ModalKind) {
    for (entity, root) in roots.iter() {
        if root.0 == kind {
            commands.entity(entity).despawn();
        }
    }
}

fn text_block(kind: ModalKind, field: ModalField, size: f32, color: Color) -> impl Bundle {
    (
        ModalText { kind, field },
        Text::new(""),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(8.0)),
            ..default()
        },
    )
}

fn spawn_modal_ui(
    commands: &mut Commands,
    asset_server: &AssetServer,
    kind: ModalKind,
    view: &ModalView,
) {
    commands
        .spawn((
            ModalRoot(kind),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::NONE),
            GlobalZIndex(10),
        ))
        .observe(close_on_backdrop_click)
        .with_children(|backdrop| {
            backdrop
                .spawn((
                    ModalCard(kind),
                    Node {
                        width: Val::Px(480.0),
                        max_width: Val::Percent(90.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(20.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(CARD_COLOR),
                    BorderColor(ACCENT_COLOR),
                    Transform::from_scale(Vec3::splat(CARD_SCALE_HIDDEN)),
                ))
                .observe(swallow_card_click)
                .with_children(|card| {
                    if let Some(image) = &view.image {
                        card.spawn((
                            ImageNode::new(asset_server.load(image.clone())),
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Px(200.0),
                                margin: UiRect::bottom(Val::Px(12.0)),
                                ..default()
                            },
                            Pickable::IGNORE,
                        ));
                    }
                    card.spawn(text_block(kind, ModalField::Heading, 22.0, ACCENT_COLOR));
                    card.spawn(text_block(kind, ModalField::Subheading, 14.0, Color::srgb(0.7, 0.7, 0.7)));
                    card.spawn(text_block(kind, ModalField::Body, 16.0, Color::WHITE));
                    card.spawn(text_block(kind, ModalField::Footer, 12.0, Color::srgb(0.6, 0.6, 0.6)));

                    card.spawn(Node {
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::FlexEnd,
                        column_gap: Val::Px(8.0),
                        margin: UiRect::top(Val::Px(12.0)),
                        ..default()
                    })
                    .with_children(|row| {
                        for action in ModalAction::ALL {
                            row.spawn((
                                Button,
                                ModalButton { kind, action },
                                Node {
                                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                                    border: UiRect::all(Val::Px(1.0)),
                                    display: if view.action_label(action).is_some() {
                                        Display::Flex
                                    } else {
                                        Display::None
                                    },
                                    ..default()
                                },
                                BackgroundColor(BUTTON_NORMAL),
                                BorderColor(ACCENT_COLOR),
                            ))
                            .with_children(|button| {
                                button.spawn((
                                    ModalButtonLabel { kind, action },
                                    Text::new(view.action_label(action).unwrap_or_default()),
                                    TextFont {
                                        font_size: 14.0,
                                        ..default()
                                    },
                                    TextColor(Color::WHITE),
                                ));
                            });
                        }
                    });
                });
        });
}

/// Clicking the dimmed area outside the card closes that modal.
fn close_on_backdrop_click(
    trigger: Trigger<Pointer<Click>>,
    roots: Query<&ModalRoot>,
    mut controls: EventWriter<ControlEvent>,
) {
    if let Ok(root) = roots.get(trigger.target()) {
        controls.write(ControlEvent {
            control: Control::CloseModal(root.0),
            source: ControlSource::Ui,
        });
    }
}

fn swallow_card_click(mut trigger: Trigger<Pointer<Click>>) {
    trigger.propagate(false);
}

/// Push presenter state into the spawned UI every frame.
pub fn sync_modal_ui(
    registry: Res<ModalRegistry>,
    mut backdrops: Query<(&ModalRoot, &mut BackgroundColor)>,
    mut cards: Query<(&ModalCard, &mut Transform, &mut Visibility)>,
    mut texts: Query<(&ModalText, &mut Text), Without<ModalButtonLabel>>,
    mut buttons: Query<(&ModalButton, &mut Node)>,
    mut labels: Query<(&ModalButtonLabel, &mut Text), Without<ModalText>>,
) {
    let views: Vec<(ModalKind, ModalView)> = registry
        .tracked_kinds()
        .into_iter()
        .filter_map(|kind| modal_view(&registry, kind).map(|view| (kind, view)))
        .collect();
    let view_of = |kind: ModalKind| {
        views
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, view)| view)
    };

    for (root, mut background) in backdrops.iter_mut() {
        let alpha = match view_of(root.0) {
            Some(view) if view.backdrop_visible => BACKDROP_ALPHA,
            _ => 0.0,
        };
        background.0 = Color::srgba(0.0, 0.0, 0.0, alpha);
    }

    for (card, mut transform, mut visibility) in cards.iter_mut() {
        let Some(view) = view_of(card.0) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        *visibility = if view.backdrop_visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let scale = if view.card_zoomed {
            1.0
        } else {
            CARD_SCALE_HIDDEN
        };
        transform.scale = Vec3::splat(scale);
    }

    for (tag, mut text) in texts.iter_mut() {
        if let Some(view) = view_of(tag.kind) {
            let wanted = view.field(tag.field);
            if text.0 != wanted {
                text.0 = wanted.to_string();
            }
        }
    }

    for (button, mut node) in buttons.iter_mut() {
        if let Some(view) = view_of(button.kind) {
            node.display = if view.action_label(button.action).is_some() {
                Display::Flex
            } else {
                Display::None
            };
        }
    }

    for (tag, mut text) in labels.iter_mut() {
        if let Some(label) = view_of(tag.kind).and_then(|view| view.action_label(tag.action)) {
            if text.0 != label {
                text.0 = label.to_string();
            }
        }
    }
}

/// Handle modal button clicks.
pub fn handle_modal_buttons(
    mut interaction_query: Query<
        (&Interaction, &ModalButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut controls: EventWriter<ControlEvent>,
) {
    for (interaction, button, mut color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *color = BUTTON_PRESSED.into();
                controls.write(ControlEvent {
                    control: button.action.control(button.kind),
                    source: ControlSource::Ui,
                });
            }
            Interaction::Hovered => {
                *color = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                *color = BUTTON_NORMAL.into();
            }
        }
    }
}

/// Drop every modal and its sounds when the scene stops running.
pub fn clear_modals(
    mut commands: Commands,
    mut registry: ResMut<ModalRegistry>,
    mut effects: ResMut<ModalEffectQueue>,
    roots: Query<Entity, With<ModalRoot>>,
    sounds: Query<Entity, With<ModalSound>>,
) {
    *registry = ModalRegistry::default();
    effects.clear();
    for entity in roots.iter().chain(sounds.iter()) {
        commands.entity(entity).despawn();
    }
}

pub struct ModalPlugin;

impl Plugin for ModalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModalRegistry>()
            .init_resource::<ModalEffectQueue>()
            .add_systems(
                Update,
                (
                    step_modals,
                    handle_modal_buttons,
                    execute_modal_effects,
                    sync_modal_ui,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnExit(AppState::Running), clear_modals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::case_files::CaseFileTable;
    use crate::ui::modals::registry::{ModalRequest, OpenOutcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn open(registry: &mut ModalRegistry, request: ModalRequest) -> Vec<ModalEffect> {
        let table = CaseFileTable::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        match registry.open(&request, &table, &mut rng).unwrap() {
            OpenOutcome::Opened(effects) => effects,
            OpenOutcome::AlreadyOpen => panic!("modal already open"),
        }
    }

    #[test]
    fn phone_view_follows_the_call() {
        let mut registry = ModalRegistry::default();
        open(&mut registry, ModalRequest::PhoneCall);

        let ringing = modal_view(&registry, ModalKind::PhoneCall).unwrap();
        assert_eq!(ringing.action_label(ModalAction::Answer), Some("Answer"));
        assert_eq!(ringing.action_label(ModalAction::Close), Some("Decline"));
        assert!(ringing.body.is_empty());

        registry.step(Duration::from_millis(150));
        registry.answer_call();
        registry.step(Duration::from_millis(100));
        let answered = modal_view(&registry, ModalKind::PhoneCall).unwrap();
        assert!(answered.card_zoomed);
        assert_eq!(answered.action_label(ModalAction::Answer), None);
        assert_eq!(answered.action_label(ModalAction::Close), Some("Hang Up"));
        assert!(!answered.body.is_empty());
    }

    #[test]
    fn drawer_view_always_offers_the_article() {
        let mut registry = ModalRegistry::default();
        let table = CaseFileTable::builtin().unwrap();
        let id = table.drawers[0].id.clone();
        open(&mut registry, ModalRequest::FileDrawer { id });

        let view = modal_view(&registry, ModalKind::FileDrawer).unwrap();
        assert!(view.heading.starts_with("CASE FILE: "));
        assert!(view.footer.starts_with("Evidence #"));
        assert_eq!(view.action_label(ModalAction::Article), Some(ARTICLE_BUTTON_LABEL));
        assert_eq!(view.action_label(ModalAction::Narration), None);
    }

    #[test]
    fn narration_button_tracks_playback() {
        let mut registry = ModalRegistry::default();
        open(
            &mut registry,
            ModalRequest::Evidence {
                id: "desk_notes".into(),
            },
        );
        let label = |registry: &ModalRegistry| {
            modal_view(registry, ModalKind::Evidence)
                .unwrap()
                .action_label(ModalAction::Narration)
                .map(str::to_string)
        };
        assert_eq!(label(&registry).as_deref(), Some("Play Narration"));
        registry.toggle_narration(ModalKind::Evidence);
        assert_eq!(label(&registry).as_deref(), Some("Starting..."));
        registry.narration_started(ModalKind::Evidence, true);
        assert_eq!(label(&registry).as_deref(), Some("Pause Narration"));
    }

    #[test]
    fn untracked_kinds_have_no_view() {
        let registry = ModalRegistry::default();
        assert!(ModalKind::ALL
            .into_iter()
            .all(|kind| modal_view(&registry, kind).is_none()));
    }

    #[test]
    fn buttons_map_to_controls() {
        assert_eq!(
            ModalAction::Close.control(ModalKind::PhoneCall),
            Control::CloseModal(ModalKind::PhoneCall)
        );
        assert_eq!(
            ModalAction::Answer.control(ModalKind::PhoneCall),
            Control::AnswerCall
        );
        assert_eq!(
            ModalAction::Narration.control(ModalKind::CryptoEvidence),
            Control::ToggleNarration(ModalKind::CryptoEvidence)
        );
    }

    #[test]
    fn opened_and_unmounted_drive_the_ui_tree() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_resource::<ModalRegistry>()
            .init_resource::<ModalEffectQueue>()
            .init_resource::<WebRpcInterface>()
            .add_event::<ControlEvent>()
            .add_systems(Update, execute_modal_effects);

        let table = CaseFileTable::builtin().unwrap();
        let id = table.drawers[0].id.clone();
        let opened = {
            let mut registry = app.world_mut().resource_mut::<ModalRegistry>();
            open(&mut registry, ModalRequest::FileDrawer { id })
        };
        app.world_mut().resource_mut::<ModalEffectQueue>().extend(opened);
        app.update();

        let count_roots = |app: &mut App| {
            app.world_mut()
                .query::<&ModalRoot>()
                .iter(app.world())
                .count()
        };
        assert_eq!(count_roots(&mut app), 1);
        assert!(app.world().resource::<ModalEffectQueue>().is_empty());

        app.world_mut()
            .resource_mut::<ModalEffectQueue>()
            .push(ModalEffect::Unmounted(ModalKind::FileDrawer));
        app.update();
        assert_eq!(count_roots(&mut app), 0);
    }
}
