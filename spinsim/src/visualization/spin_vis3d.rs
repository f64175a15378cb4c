use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy::math::primitives::Cuboid;

use crate::simulation::pointer::Ray as LatticeRay;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NMat4, NVec3};

/// Component tagging each arrow with its site index into the engine's lattice
#[derive(Component)]
struct SiteIndex(pub usize);

/// Camera used to project the cursor onto the lattice
#[derive(Component)]
struct LatticeCamera;

/// This frame's cursor hit on the lattice plane, in simulation units
#[derive(Resource, Default)]
struct PointerHit(Option<NVec3>);

/// Arrow size relative to the site spacing
const ARROW_LENGTH: f32 = 0.8;
const ARROW_WIDTH: f32 = 0.15;

const ALPHA_STEP: f64 = 0.05;
const ALPHA_RANGE: (f64, f64) = (0.01, 1.5);

/// Open a window and run the lattice until it is closed
pub fn run_3d(scenario: Scenario) {
    println!("run_3d: starting Bevy viewer with {} sites", scenario.engine.lattice().len());

    App::new()
        .insert_resource(scenario)
        .init_resource::<PointerHit>()
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
        })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (keyboard_controls, pointer_system, physics_step, sync_transforms).chain())
        .run();
}

/// Startup system: camera, light and one arrow per site
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    let distance = scenario.viewer.camera_distance;

    // Tilted view from -y so the out-of-plane component reads clearly
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.02, 0.02, 0.03)),
                ..Default::default()
            },
            transform: Transform::from_xyz(0.0, -0.6 * distance, distance)
                .looking_at(Vec3::ZERO, Vec3::Z),
            ..Default::default()
        },
        LatticeCamera,
    ));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2.0e7,
            range: 4.0 * distance,
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 0.0, 0.5 * distance),
        ..Default::default()
    });

    spawn_sites(&mut commands, &mut meshes, &mut materials, &scenario);
}

/// One elongated box per site; its local +z is the spin
fn spawn_sites(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scenario: &Scenario,
) {
    let lattice = scenario.engine.lattice();
    let unit = lattice.spacing as f32 * scenario.viewer.scale;
    let mesh = meshes.add(Cuboid::new(ARROW_WIDTH * unit, ARROW_WIDTH * unit, ARROW_LENGTH * unit));

    for (i, site) in lattice.sites.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: mesh.clone(),
                material: materials.add(StandardMaterial {
                    base_color: spin_to_color(site.direction.z as f32),
                    ..Default::default()
                }),
                transform: to_bevy_transform(&site.transform, scenario.viewer.scale),
                ..Default::default()
            },
            SiteIndex(i),
        ));
    }
}

/// Project the cursor through the camera onto z = 0
fn pointer_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<LatticeCamera>>,
    scenario: Res<Scenario>,
    mut hit: ResMut<PointerHit>,
) {
    hit.0 = None;

    let Ok(window) = windows.get_single() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    let Ok((camera, camera_transform)) = cameras.get_single() else { return };
    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else { return };

    // screen units -> simulation units; scaling the origin alone keeps the hit point consistent
    let scale = scenario.viewer.scale as f64;
    let origin = NVec3::new(ray.origin.x as f64, ray.origin.y as f64, ray.origin.z as f64) / scale;
    let direction = NVec3::new(ray.direction.x as f64, ray.direction.y as f64, ray.direction.z as f64);

    hit.0 = LatticeRay::new(origin, direction).intersect_lattice_plane();
}

/// Per-frame physics step driven by the render clock
fn physics_step(time: Res<Time>, hit: Res<PointerHit>, mut scenario: ResMut<Scenario>) {
    scenario.step(time.delta_seconds_f64(), hit.0);
}

/// Upload the transform batch and recolor by out-of-plane component
fn sync_transforms(
    mut scenario: ResMut<Scenario>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&SiteIndex, &mut Transform, &Handle<StandardMaterial>)>,
) {
    if !scenario.engine.transforms_dirty() {
        return;
    }

    {
        let scale = scenario.viewer.scale;
        let transforms = scenario.engine.transforms();
        let sites = &scenario.engine.lattice().sites;

        for (SiteIndex(i), mut transform, mat_handle) in &mut query {
            // stale entities from before a resize are despawned this frame
            let (Some(m), Some(site)) = (transforms.get(*i), sites.get(*i)) else { continue };
            *transform = to_bevy_transform(m, scale);

            if let Some(mat) = materials.get_mut(mat_handle) {
                mat.base_color = spin_to_color(site.direction.z as f32);
            }
        }
    }

    scenario.engine.mark_uploaded();
}

/// I: polarity, [ / ]: damping, Up / Down: grid size, P: log mean spin
fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut scenario: ResMut<Scenario>,
    sites: Query<Entity, With<SiteIndex>>,
) {
    if keys.just_pressed(KeyCode::KeyI) {
        let inverted = !scenario.parameters.is_field_inverted;
        scenario.parameters.is_field_inverted = inverted;
        info!("field inverted: {inverted}");
    }

    let mut alpha_change = 0.0;
    if keys.just_pressed(KeyCode::BracketLeft) {
        alpha_change -= ALPHA_STEP;
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        alpha_change += ALPHA_STEP;
    }
    if alpha_change != 0.0 {
        let alpha = (scenario.parameters.alpha + alpha_change).clamp(ALPHA_RANGE.0, ALPHA_RANGE.1);
        scenario.parameters.alpha = alpha;
        info!("alpha = {alpha:.2}");
    }

    if keys.just_pressed(KeyCode::KeyP) {
        let engine = &scenario.engine;
        info!("frame {}: mean spin {:?}", engine.frame(), engine.mean_direction());
    }

    let mut resize = 0;
    if keys.just_pressed(KeyCode::ArrowUp) {
        resize += 1;
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        resize -= 1;
    }
    if resize == 0 {
        return;
    }

    let target = scenario.engine.lattice().size as i64 + resize;
    match scenario.set_grid_size(target) {
        Ok(()) => {
            for entity in &sites {
                commands.entity(entity).despawn_recursive();
            }
            spawn_sites(&mut commands, &mut meshes, &mut materials, &scenario);
        }
        Err(e) => warn!("grid size {target} rejected: {e}"),
    }
}

/// Placement matrix (simulation units) -> Bevy transform (screen units)
fn to_bevy_transform(m: &NMat4, scale: f32) -> Transform {
    let mut transform = Transform::from_matrix(Mat4::from_cols_slice(m.cast::<f32>().as_slice()));
    transform.translation *= scale;
    transform
}

/// Spin z component in [-1, 1] -> blue (down) to red (up)
fn spin_to_color(mz: f32) -> Color {
    let t = (0.5 * (mz + 1.0)).clamp(0.0, 1.0);
    Color::srgb(t, 0.15, 1.0 - t)
}
