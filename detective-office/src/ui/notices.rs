use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::systems::fault::RendererWatchdog;

const NOTICE_BACKGROUND: Color = Color::srgb(0.08, 0.07, 0.06);
const NOTICE_ACCENT: Color = Color::srgb(1.0, 0.8, 0.4);
const RETRY_NORMAL: Color = Color::srgb(0.25, 0.2, 0.16);
const RETRY_HOVERED: Color = Color::srgb(0.35, 0.28, 0.2);

#[derive(Component)]
pub struct LoadingOverlay;

#[derive(Component)]
pub struct LoadingText;

#[derive(Component)]
pub struct FaultScreen;

#[derive(Component)]
pub struct RetryButton;

fn full_screen(background: Color) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            ..default()
        },
        BackgroundColor(background),
        GlobalZIndex(20),
    )
}

pub fn loading_label(progress: &LoadingProgress) -> String {
    format!("Opening the case files... {:.0}%", progress.fraction() * 100.0)
}

pub fn spawn_loading_overlay(mut commands: Commands) {
    commands
        .spawn((LoadingOverlay, full_screen(NOTICE_BACKGROUND)))
        .with_children(|parent| {
            parent.spawn((
                LoadingText,
                Text::new(loading_label(&LoadingProgress::default())),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(NOTICE_ACCENT),
            ));
        });
}

pub fn update_loading_overlay(
    progress: Res<LoadingProgress>,
    mut query: Query<&mut Text, With<LoadingText>>,
) {
    if !progress.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = loading_label(&progress);
    }
}

pub fn despawn_loading_overlay(mut commands: Commands, query: Query<Entity, With<LoadingOverlay>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn spawn_fault_screen(mut commands: Commands) {
    commands
        .spawn((FaultScreen, full_screen(NOTICE_BACKGROUND)))
        .with_children(|parent| {
            parent.spawn((
                Text::new("The office went dark."),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(NOTICE_ACCENT),
            ));
            parent.spawn((
                Text::new("The renderer stopped responding. Retry to rebuild the scene."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent
                .spawn((
                    Button,
                    RetryButton,
                    Node {
                        padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(RETRY_NORMAL),
                    BorderColor(NOTICE_ACCENT),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Retry"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

pub fn despawn_fault_screen(mut commands: Commands, query: Query<Entity, With<FaultScreen>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Manual recovery only; nothing retries on its own.
pub fn handle_retry_button(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<RetryButton>),
    >,
    mut watchdog: ResMut<RendererWatchdog>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for (interaction, mut color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                info!("Retry requested");
                watchdog.reset();
                retry(&mut next_state);
            }
            Interaction::Hovered => *color = RETRY_HOVERED.into(),
            Interaction::None => *color = RETRY_NORMAL.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn retry(_next_state: &mut NextState<AppState>) {
    let reloaded = web_sys::window().map(|window| window.location().reload());
    if !matches!(reloaded, Some(Ok(()))) {
        error!("Page reload failed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn retry(next_state: &mut NextState<AppState>) {
    println!("→ Transitioning to Loading state");
    next_state.set(AppState::Loading);
}

pub struct NoticePlugin;

impl Plugin for NoticePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Loading), spawn_loading_overlay)
            .add_systems(OnExit(AppState::Loading), despawn_loading_overlay)
            .add_systems(OnEnter(AppState::Faulted), spawn_fault_screen)
            .add_systems(OnExit(AppState::Faulted), despawn_fault_screen)
            .add_systems(
                Update,
                update_loading_overlay.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                handle_retry_button.run_if(in_state(AppState::Faulted)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn loading_label_shows_percentage() {
        let progress = LoadingProgress {
            content_ready: true,
            textures_processed: 3,
            textures_total: 7,
        };
        assert_eq!(loading_label(&progress), "Opening the case files... 50%");
    }

    #[test]
    fn overlay_follows_the_loading_state() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<RendererWatchdog>()
            .add_plugins(NoticePlugin);
        app.update();

        let overlays = |app: &mut App| {
            app.world_mut()
                .query::<&LoadingOverlay>()
                .iter(app.world())
                .count()
        };
        assert_eq!(overlays(&mut app), 1);

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Faulted);
        app.update();
        assert_eq!(overlays(&mut app), 0);
        let screens = app
            .world_mut()
            .query::<&FaultScreen>()
            .iter(app.world())
            .count();
        assert_eq!(screens, 1);
    }
}
