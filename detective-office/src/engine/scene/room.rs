use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use bevy::ecs::system::EntityCommands;
use bevy::picking::Pickable;
use bevy::prelude::*;
use constants::palette::{WINDOW_GLASS, WINDOW_GLASS_OPACITY};
use constants::render_settings::{
    CHAIR_SWAY_AMPLITUDE, CHAIR_SWAY_RATE, ROOM_SWAY_AMPLITUDE, ROOM_SWAY_RATE,
    SIMPLIFIED_SPIN_RATE,
};
use rand::Rng;

use super::SceneRoot;
use super::lighting::{InteriorLight, point_light, spot_light};
use super::materials::{RoomMaterials, SurfaceRole, prop_material};
use crate::content::case_files::CaseFileTable;
use crate::engine::environment::bands::srgba_hex;
use crate::engine::environment::snapshot::EnvironmentSnapshot;
use crate::interaction::hover::{on_interactive_out, on_interactive_over};
use crate::interaction::router::{Interactive, on_interactive_click};

pub const DESK_POSITION: Vec3 = Vec3::new(0.0, 0.5, -3.0);
pub const BOARD_POSITION: Vec3 = Vec3::new(-4.8, 2.0, -2.0);
pub const CABINET_POSITION: Vec3 = Vec3::new(3.0, 1.0, -4.0);
pub const WALL_PHONE_POSITION: Vec3 = Vec3::new(4.8, 2.5, -2.0);
pub const WINDOW_POSITION: Vec3 = Vec3::new(0.0, 2.0, -4.9);
const DRAWER_TOP: f32 = 0.9;
const DRAWER_SPACING: f32 = 0.3;

/// Root of the detailed room; sways gently.
#[derive(Component)]
pub struct OfficeRoom;

#[derive(Component)]
pub struct OfficeChair;

/// Root of the simplified room; spins slowly.
#[derive(Component)]
pub struct SimplifiedRoom;

/// A label to attach once the prop exists.
#[derive(Debug, Clone)]
pub struct LabelRequest {
    pub anchor: Entity,
    pub text: String,
    pub offset: Vec3,
    pub hover_only: bool,
}

/// Spawning context shared by the room builders.
pub struct RoomKit<'a> {
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub surfaces: &'a RoomMaterials,
    pub snapshot: &'a EnvironmentSnapshot,
}

fn make_interactive(entity: &mut EntityCommands, target: Interactive) {
    entity
        .insert((target, Visibility::default()))
        .observe(on_interactive_click)
        .observe(on_interactive_over)
        .observe(on_interactive_out);
}

fn label(
    labels: &mut Vec<LabelRequest>,
    anchor: Entity,
    target: &Interactive,
    offset: Vec3,
    hover_only: bool,
) {
    if let Some(text) = target.label() {
        labels.push(LabelRequest {
            anchor,
            text,
            offset,
            hover_only,
        });
    }
}

/// Detailed room with every interactive prop. Returns label requests for the
/// props that carry one.
pub fn spawn_full_room(
    commands: &mut Commands,
    kit: &mut RoomKit,
    content: Option<&CaseFileTable>,
    rng: &mut impl Rng,
) -> Vec<LabelRequest> {
    let mut labels = Vec::new();
    let wall = kit.meshes.add(Cuboid::new(10.0, 4.0, 0.2));
    let floor = kit.meshes.add(Plane3d::default().mesh().size(10.0, 10.0));
    let walls_material = kit.surfaces.get(SurfaceRole::Walls);
    let floor_material = kit.surfaces.get(SurfaceRole::Floor);

    let room = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            OfficeRoom,
            SceneRoot,
            Name::new("Office"),
        ))
        .id();

    commands.entity(room).with_children(|parent| {
        parent.spawn((
            Mesh3d(floor),
            MeshMaterial3d(floor_material),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(wall.clone()),
            MeshMaterial3d(walls_material.clone()),
            Transform::from_xyz(0.0, 2.0, -5.0),
        ));
        for x in [-5.0, 5.0] {
            parent.spawn((
                Mesh3d(wall.clone()),
                MeshMaterial3d(walls_material.clone()),
                Transform::from_xyz(x, 2.0, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
            ));
        }
    });

    spawn_desk(commands, kit, room, &mut labels);
    spawn_chair(commands, kit, room);
    spawn_bulletin_board(commands, kit, room, content, &mut labels);
    spawn_filing_cabinet(commands, kit, room, content, &mut labels);
    spawn_wall_phone(commands, kit, room, &mut labels);
    spawn_window(commands, kit, room, rng);

    labels
}

fn spawn_desk(
    commands: &mut Commands,
    kit: &mut RoomKit,
    room: Entity,
    labels: &mut Vec<LabelRequest>,
) {
    let desk_material = kit.surfaces.get(SurfaceRole::Desk);
    let metal = kit.surfaces.get(SurfaceRole::Metal);
    let paper = kit.surfaces.get(SurfaceRole::Paper);
    let top = kit.meshes.add(Cuboid::new(2.0, 0.1, 1.0));
    let leg = kit.meshes.add(Cuboid::new(0.1, 0.9, 0.1));
    let lamp_base = kit.meshes.add(Cuboid::new(0.4, 0.2, 0.3));
    let lamp_neck = kit.meshes.add(Cylinder::new(0.05, 0.1));
    let mug = kit.meshes.add(Cylinder::new(0.06, 0.15));
    let notes = kit.meshes.add(Cuboid::new(0.5, 0.01, 0.4));
    let lens = kit.meshes.add(Cylinder::new(0.07, 0.005));
    let rim = kit.meshes.add(Torus::new(0.07, 0.09));
    let handle = kit.meshes.add(Cylinder::new(0.01, 0.15));
    let mug_material = prop_material(kit.materials, 0x8b4513, 0.6, 0.0);
    let lens_material = kit.materials.add(StandardMaterial {
        base_color: Color::Srgba(srgba_hex(0xccccff).with_alpha(0.7)),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let lamp = point_light(InteriorLight::DeskLamp, kit.snapshot);

    let mut desk = commands.spawn((
        Transform::from_translation(DESK_POSITION),
        Name::new("Desk"),
    ));
    make_interactive(&mut desk, Interactive::Desk);
    let desk = desk.id();
    commands.entity(room).add_child(desk);
    label(labels, desk, &Interactive::Desk, Vec3::new(0.0, 0.7, 0.0), false);

    commands.entity(desk).with_children(|parent| {
        parent.spawn((
            Mesh3d(top),
            MeshMaterial3d(desk_material.clone()),
            Transform::default(),
        ));
        for (x, z) in [(0.9, 0.45), (-0.9, 0.45), (0.9, -0.45), (-0.9, -0.45)] {
            parent.spawn((
                Mesh3d(leg.clone()),
                MeshMaterial3d(desk_material.clone()),
                Transform::from_xyz(x, -0.45, z),
            ));
        }
        parent.spawn((
            Mesh3d(lamp_base),
            MeshMaterial3d(metal.clone()),
            Transform::from_xyz(0.5, 0.15, 0.0),
        ));
        parent.spawn((
            Mesh3d(lamp_neck),
            MeshMaterial3d(metal.clone()),
            Transform::from_xyz(0.5, 0.25, 0.0),
        ));
        parent.spawn((lamp, Transform::from_xyz(0.5, 0.6, 0.0), InteriorLight::DeskLamp));
        parent.spawn((
            Mesh3d(mug),
            MeshMaterial3d(mug_material),
            Transform::from_xyz(-0.5, 0.1, 0.0),
        ));
        parent.spawn((
            Mesh3d(notes),
            MeshMaterial3d(paper),
            Transform::from_xyz(0.0, 0.06, 0.0).with_rotation(Quat::from_rotation_y(0.2)),
        ));
    });

    // Magnifying glass: its own target, nested in the desk.
    let mut glass = commands.spawn((
        Transform::from_xyz(-0.7, 0.07, -0.3).with_rotation(Quat::from_rotation_y(0.5)),
        Name::new("Magnifying glass"),
    ));
    make_interactive(&mut glass, Interactive::MagnifyingGlass);
    let glass = glass.id();
    commands.entity(desk).add_child(glass);
    commands.entity(glass).with_children(|parent| {
        parent.spawn((
            Mesh3d(rim),
            MeshMaterial3d(metal.clone()),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(lens),
            MeshMaterial3d(lens_material),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(handle),
            MeshMaterial3d(metal.clone()),
            Transform::from_xyz(0.1, 0.0, 0.1)
                .with_rotation(Quat::from_euler(EulerRot::XYZ, FRAC_PI_2, 0.0, 0.5)),
        ));
    });

    spawn_desk_phone(commands, kit, desk, labels);
}

fn spawn_desk_phone(
    commands: &mut Commands,
    kit: &mut RoomKit,
    desk: Entity,
    labels: &mut Vec<LabelRequest>,
) {
    let black = prop_material(kit.materials, 0x111111, 0.7, 0.0);
    let body = kit.meshes.add(Cuboid::new(0.25, 0.1, 0.15));
    let bell = kit.meshes.add(Cylinder::new(0.08, 0.1));
    let receiver = kit.meshes.add(Cuboid::new(0.3, 0.05, 0.1));

    let mut phone = commands.spawn((
        Transform::from_xyz(-0.7, 0.1, 0.3),
        Name::new("Desk phone"),
    ));
    make_interactive(&mut phone, Interactive::DeskPhone);
    let phone = phone.id();
    commands.entity(desk).add_child(phone);
    label(labels, phone, &Interactive::DeskPhone, Vec3::new(0.0, 0.3, 0.0), true);

    commands.entity(phone).with_children(|parent| {
        parent.spawn((
            Mesh3d(body),
            MeshMaterial3d(black.clone()),
            Transform::default(),
        ));
        for x in [-0.1, 0.1] {
            parent.spawn((
                Mesh3d(bell.clone()),
                MeshMaterial3d(black.clone()),
                Transform::from_xyz(x, 0.1, 0.0),
            ));
        }
        parent.spawn((
            Mesh3d(receiver),
            MeshMaterial3d(black),
            Transform::from_xyz(0.0, 0.15, 0.0),
        ));
    });
}

fn spawn_chair(commands: &mut Commands, kit: &mut RoomKit, room: Entity) {
    let chair_material = kit.surfaces.get(SurfaceRole::Chair);
    let frame = kit.surfaces.get(SurfaceRole::Desk);
    let cushion = prop_material(kit.materials, 0x3e2723, 0.7, 0.0);
    let seat = kit.meshes.add(Cuboid::new(0.6, 0.1, 0.6));
    let back = kit.meshes.add(Cuboid::new(0.6, 1.0, 0.1));
    let leg = kit.meshes.add(Cylinder::new(0.05, 0.4));
    let rail = kit.meshes.add(Cylinder::new(0.03, 0.6));
    let pad = kit.meshes.add(Cuboid::new(0.55, 0.05, 0.55));

    commands.entity(room).with_children(|parent| {
        parent
            .spawn((
                Transform::from_xyz(0.0, 0.0, -3.8),
                Visibility::default(),
                OfficeChair,
                Name::new("Chair"),
            ))
            .with_children(|chair| {
                chair.spawn((
                    Mesh3d(seat),
                    MeshMaterial3d(chair_material.clone()),
                    Transform::from_xyz(0.0, 0.4, 0.0),
                ));
                chair.spawn((
                    Mesh3d(back),
                    MeshMaterial3d(chair_material.clone()),
                    Transform::from_xyz(0.0, 0.9, -0.25),
                ));
                for (x, z) in [(0.25, 0.25), (-0.25, 0.25), (0.25, -0.25), (-0.25, -0.25)] {
                    chair.spawn((
                        Mesh3d(leg.clone()),
                        MeshMaterial3d(frame.clone()),
                        Transform::from_xyz(x, 0.2, z),
                    ));
                }
                for y in [0.7, 0.9, 1.1] {
                    chair.spawn((
                        Mesh3d(rail.clone()),
                        MeshMaterial3d(frame.clone()),
                        Transform::from_xyz(0.0, y, -0.25)
                            .with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
                    ));
                }
                chair.spawn((
                    Mesh3d(pad),
                    MeshMaterial3d(cushion),
                    Transform::from_xyz(0.0, 0.45, 0.0),
                ));
            });
    });
}

fn spawn_bulletin_board(
    commands: &mut Commands,
    kit: &mut RoomKit,
    room: Entity,
    content: Option<&CaseFileTable>,
    labels: &mut Vec<LabelRequest>,
) {
    let frame = kit.surfaces.get(SurfaceRole::Bulletin);
    let cork = prop_material(kit.materials, 0xd2b48c, 0.9, 0.0);
    let photo_frame = prop_material(kit.materials, 0xffffff, 0.9, 0.0);
    let photo = prop_material(kit.materials, 0xcccccc, 0.9, 0.0);
    let red = prop_material(kit.materials, 0xff0000, 0.5, 0.0);
    let board_mesh = kit.meshes.add(Cuboid::new(2.0, 1.5, 0.05));
    let cork_mesh = kit.meshes.add(Cuboid::new(1.9, 1.4, 0.01));
    let photo_frame_mesh = kit.meshes.add(Cuboid::new(0.3, 0.3, 0.01));
    let photo_mesh = kit.meshes.add(Cuboid::new(0.28, 0.28, 0.002));
    let pin = kit.meshes.add(Sphere::new(0.02));
    let spot = spot_light(InteriorLight::BoardSpot, kit.snapshot, 0.5);

    let mut board = commands.spawn((
        Transform::from_translation(BOARD_POSITION)
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        Name::new("Bulletin board"),
    ));
    make_interactive(&mut board, Interactive::BulletinBoard);
    let board = board.id();
    commands.entity(room).add_child(board);
    label(
        labels,
        board,
        &Interactive::BulletinBoard,
        Vec3::new(0.0, 0.9, 0.0),
        false,
    );

    commands.entity(board).with_children(|parent| {
        parent.spawn((
            Mesh3d(board_mesh),
            MeshMaterial3d(frame),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(cork_mesh),
            MeshMaterial3d(cork),
            Transform::from_xyz(0.0, 0.0, 0.03),
        ));
        // Red string between the pins.
        for (x, y, length, angle) in [
            (-0.2, 0.05, 0.7, 0.0),
            (0.25, 0.1, 0.5, FRAC_PI_4),
            (0.1, 0.3, 0.6, FRAC_PI_2),
            (-0.3, -0.1, 0.8, FRAC_PI_6),
        ] {
            parent.spawn((
                Mesh3d(kit.meshes.add(Cuboid::new(length, 0.002, 0.002))),
                MeshMaterial3d(red.clone()),
                Transform::from_xyz(x, y, 0.05).with_rotation(Quat::from_rotation_z(angle)),
                Pickable::IGNORE,
            ));
        }
        parent.spawn((
            spot,
            Transform::from_xyz(0.0, 1.5, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
            InteriorLight::BoardSpot,
        ));
    });

    let Some(content) = content else {
        return;
    };
    for item in &content.crypto {
        let [x, y] = item.board_position;
        let target = Interactive::CryptoPhoto {
            id: item.id.clone(),
            title: item.title.clone(),
        };
        let mut photo_root = commands.spawn((
            Transform::from_xyz(x, y, 0.05),
            Name::new(format!("Photo {}", item.id)),
        ));
        make_interactive(&mut photo_root, target.clone());
        let photo_root = photo_root.id();
        commands.entity(board).add_child(photo_root);
        label(labels, photo_root, &target, Vec3::new(0.0, 0.25, 0.0), true);

        commands.entity(photo_root).with_children(|parent| {
            parent.spawn((
                Mesh3d(photo_frame_mesh.clone()),
                MeshMaterial3d(photo_frame.clone()),
                Transform::default(),
            ));
            parent.spawn((
                Mesh3d(photo_mesh.clone()),
                MeshMaterial3d(photo.clone()),
                Transform::from_xyz(0.0, 0.0, 0.01),
            ));
            parent.spawn((
                Mesh3d(pin.clone()),
                MeshMaterial3d(red.clone()),
                Transform::from_xyz(0.0, 0.15, 0.02),
            ));
        });
    }
}

fn spawn_filing_cabinet(
    commands: &mut Commands,
    kit: &mut RoomKit,
    room: Entity,
    content: Option<&CaseFileTable>,
    labels: &mut Vec<LabelRequest>,
) {
    let body_material = kit.surfaces.get(SurfaceRole::Cabinet);
    let drawer_material = prop_material(kit.materials, 0xa9a9a9, 0.4, 0.6);
    let handle_material = prop_material(kit.materials, 0xc0c0c0, 0.2, 0.8);
    let body = kit.meshes.add(Cuboid::new(1.0, 2.5, 0.8));
    let front = kit.meshes.add(Cuboid::new(0.9, 0.1, 0.02));
    let pull = kit.meshes.add(Cuboid::new(0.2, 0.05, 0.05));
    let spot = spot_light(InteriorLight::CabinetSpot, kit.snapshot, 0.6);

    let mut cabinet = commands.spawn((
        Transform::from_translation(CABINET_POSITION),
        Name::new("Filing cabinet"),
    ));
    make_interactive(&mut cabinet, Interactive::FilingCabinet);
    let cabinet = cabinet.id();
    commands.entity(room).add_child(cabinet);
    label(
        labels,
        cabinet,
        &Interactive::FilingCabinet,
        Vec3::new(0.0, 1.4, 0.0),
        false,
    );

    commands.entity(cabinet).with_children(|parent| {
        parent.spawn((
            Mesh3d(body),
            MeshMaterial3d(body_material),
            Transform::default(),
        ));
        parent.spawn((
            spot,
            Transform::from_xyz(1.0, 2.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
            InteriorLight::CabinetSpot,
        ));
    });

    let Some(content) = content else {
        return;
    };
    for (index, item) in content.drawers.iter().enumerate() {
        let target = Interactive::FileDrawer {
            id: item.id.clone(),
            token: item.token.clone(),
        };
        let mut drawer = commands.spawn((
            Transform::from_xyz(0.0, DRAWER_TOP - index as f32 * DRAWER_SPACING, 0.41),
            Name::new(format!("Drawer {}", item.id)),
        ));
        make_interactive(&mut drawer, target.clone());
        let drawer = drawer.id();
        commands.entity(cabinet).add_child(drawer);
        label(labels, drawer, &target, Vec3::new(0.0, 0.15, 0.1), true);

        commands.entity(drawer).with_children(|parent| {
            parent.spawn((
                Mesh3d(front.clone()),
                MeshMaterial3d(drawer_material.clone()),
                Transform::default(),
            ));
            parent.spawn((
                Mesh3d(pull.clone()),
                MeshMaterial3d(handle_material.clone()),
                Transform::from_xyz(0.0, 0.0, 0.01),
            ));
        });
    }
}

fn spawn_wall_phone(
    commands: &mut Commands,
    kit: &mut RoomKit,
    room: Entity,
    labels: &mut Vec<LabelRequest>,
) {
    let dark = prop_material(kit.materials, 0x222222, 0.7, 0.0);
    let body = kit.meshes.add(Cuboid::new(0.2, 0.4, 0.1));
    let bell = kit.meshes.add(Cylinder::new(0.1, 0.1));

    let mut phone = commands.spawn((
        Transform::from_translation(WALL_PHONE_POSITION)
            .with_rotation(Quat::from_rotation_y(-FRAC_PI_2)),
        Name::new("Wall phone"),
    ));
    make_interactive(&mut phone, Interactive::WallPhone);
    let phone = phone.id();
    commands.entity(room).add_child(phone);
    label(
        labels,
        phone,
        &Interactive::WallPhone,
        Vec3::new(0.0, 0.4, 0.0),
        false,
    );

    commands.entity(phone).with_children(|parent| {
        parent.spawn((
            Mesh3d(body),
            MeshMaterial3d(dark.clone()),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(bell),
            MeshMaterial3d(dark),
            Transform::from_xyz(0.0, -0.2, 0.0),
        ));
    });
}

fn spawn_window(commands: &mut Commands, kit: &mut RoomKit, room: Entity, rng: &mut impl Rng) {
    let frame_material = prop_material(kit.materials, 0x8b4513, 0.7, 0.0);
    let glass_material = kit.materials.add(StandardMaterial {
        base_color: Color::Srgba(srgba_hex(WINDOW_GLASS).with_alpha(WINDOW_GLASS_OPACITY)),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.1,
        metallic: 0.3,
        ..default()
    });
    let streak_material = kit.materials.add(StandardMaterial {
        base_color: Color::Srgba(srgba_hex(0xa0a0ff).with_alpha(0.3)),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.1,
        ..default()
    });
    let frame = kit.meshes.add(Cuboid::new(2.0, 1.5, 0.1));
    let glass = kit.meshes.add(Cuboid::new(1.8, 1.3, 0.05));
    let streaks: Vec<(Handle<Mesh>, f32, f32)> = (0..15)
        .map(|i| {
            let length = 0.8 + rng.gen_range(0.0..0.5);
            (
                kit.meshes.add(Cuboid::new(0.02, length, 0.01)),
                -0.8 + i as f32 * 0.12,
                (i as f32 * 0.5).sin() * 0.3,
            )
        })
        .collect();
    let light = point_light(InteriorLight::Window, kit.snapshot);

    commands.entity(room).with_children(|parent| {
        parent
            .spawn((
                Transform::from_translation(WINDOW_POSITION),
                Visibility::default(),
                Name::new("Window"),
            ))
            .with_children(|window| {
                window.spawn((
                    Mesh3d(frame),
                    MeshMaterial3d(frame_material),
                    Transform::default(),
                ));
                window.spawn((
                    Mesh3d(glass),
                    MeshMaterial3d(glass_material),
                    Transform::from_xyz(0.0, 0.0, 0.05),
                ));
                window.spawn((light, Transform::from_xyz(0.0, 0.0, 1.0), InteriorLight::Window));
                for (mesh, x, y) in streaks {
                    window.spawn((
                        Mesh3d(mesh),
                        MeshMaterial3d(streak_material.clone()),
                        Transform::from_xyz(x, y, 0.06),
                    ));
                }
            });
    });
}

/// Fallback room: bare geometry, one light, no interactions.
pub fn spawn_simplified_room(commands: &mut Commands, kit: &mut RoomKit) {
    let wall = kit.meshes.add(Cuboid::new(10.0, 4.0, 0.2));
    let floor_material = prop_material(kit.materials, 0x3d2c27, 0.8, 0.2);
    let wall_material = prop_material(kit.materials, 0x1c1c24, 0.7, 0.0);
    let desk_material = prop_material(kit.materials, 0x5b3513, 0.6, 0.1);
    let chair_material = prop_material(kit.materials, 0x3d2c27, 0.6, 0.0);
    let floor = kit.meshes.add(Plane3d::default().mesh().size(10.0, 10.0));
    let desk = kit.meshes.add(Cuboid::new(2.0, 0.1, 1.0));
    let seat = kit.meshes.add(Cuboid::new(0.6, 0.1, 0.6));
    let light = point_light(InteriorLight::Simplified, kit.snapshot);

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            SimplifiedRoom,
            SceneRoot,
            Name::new("Simplified office"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(floor),
                MeshMaterial3d(floor_material),
                Transform::default(),
            ));
            parent.spawn((
                Mesh3d(wall.clone()),
                MeshMaterial3d(wall_material.clone()),
                Transform::from_xyz(0.0, 2.0, -5.0),
            ));
            for x in [-5.0, 5.0] {
                parent.spawn((
                    Mesh3d(wall.clone()),
                    MeshMaterial3d(wall_material.clone()),
                    Transform::from_xyz(x, 2.0, 0.0)
                        .with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
                ));
            }
            parent.spawn((
                Mesh3d(desk),
                MeshMaterial3d(desk_material),
                Transform::from_translation(DESK_POSITION),
            ));
            parent.spawn((
                Mesh3d(seat),
                MeshMaterial3d(chair_material),
                Transform::from_xyz(0.0, 0.4, -3.8),
            ));
            parent.spawn((light, Transform::from_xyz(0.0, 3.0, 0.0), InteriorLight::Simplified));
        });
}

pub fn room_sway(elapsed_secs: f32) -> f32 {
    (elapsed_secs * ROOM_SWAY_RATE).sin() * ROOM_SWAY_AMPLITUDE
}

pub fn chair_sway(elapsed_secs: f32) -> f32 {
    (elapsed_secs * CHAIR_SWAY_RATE).sin() * CHAIR_SWAY_AMPLITUDE
}

pub fn animate_room(
    time: Res<Time>,
    mut rooms: Query<&mut Transform, (With<OfficeRoom>, Without<OfficeChair>)>,
    mut chairs: Query<&mut Transform, (With<OfficeChair>, Without<OfficeRoom>)>,
    mut simplified: Query<
        &mut Transform,
        (With<SimplifiedRoom>, Without<OfficeRoom>, Without<OfficeChair>),
    >,
) {
    let elapsed = time.elapsed_secs();
    for mut transform in rooms.iter_mut() {
        transform.rotation = Quat::from_rotation_y(room_sway(elapsed));
    }
    for mut transform in chairs.iter_mut() {
        transform.rotation = Quat::from_rotation_y(chair_sway(elapsed));
    }
    for mut transform in simplified.iter_mut() {
        transform.rotate_y(time.delta_secs() * SIMPLIFIED_SPIN_RATE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sway_stays_within_amplitude() {
        for step in 0..500 {
            let t = step as f32 * 0.7;
            assert!(room_sway(t).abs() <= ROOM_SWAY_AMPLITUDE);
            assert!(chair_sway(t).abs() <= CHAIR_SWAY_AMPLITUDE);
        }
        assert_eq!(room_sway(0.0), 0.0);
    }

    #[test]
    fn every_drawer_fits_on_the_cabinet() {
        let content = CaseFileTable::builtin().unwrap();
        let lowest = DRAWER_TOP - (content.drawers.len() - 1) as f32 * DRAWER_SPACING;
        // Cabinet body spans 2.5 units centred on its origin.
        assert!(lowest > -1.25);
    }
}
