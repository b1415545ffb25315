//! 3D viewer for generated levels using kiss3d.

use kiss3d::prelude::*;
use tracing::warn;

use blox::footprint::Footprint;
use blox::grid::{Grid, Marker};
use blox::level::Level;

/// Returns the tile color for a marker, or `None` for a hole.
fn tile_color(marker: Marker) -> Option<Color> {
    match marker {
        Marker::Empty => None,
        Marker::Floor => Some(Color::new(0.6, 0.6, 0.6, 1.0)), // grey
        Marker::Start => Some(Color::new(0.2, 0.4, 1.0, 1.0)), // blue
        Marker::Goal => Some(Color::new(1.0, 0.2, 0.2, 1.0)),  // red
    }
}

fn block_color() -> Color {
    Color::new(1.0, 0.6, 0.2, 1.0) // orange
}

/// Size of each tile (slightly smaller than 1.0 for visible gaps).
const TILE_SIZE: f32 = 0.95;
const TILE_THICKNESS: f32 = 0.2;
/// Side of the block's square face.
const BLOCK_SIZE: f32 = 0.9;

/// Maps a board cell to world space.
///
/// Coordinate conventions:
/// - columns run along world X, rows along world Z, height is world Y
/// - the board is centered at the origin
fn cell_position(grid: &Grid, (row, col): (i32, i32), height: f32) -> Vec3 {
    Vec3::new(
        col as f32 - grid.cols() as f32 / 2.0,
        height,
        row as f32 - grid.rows() as f32 / 2.0,
    )
}

/// Adds one tile per non-empty cell.
fn build_board(scene: &mut SceneNode3d, grid: &Grid) -> Vec<SceneNode3d> {
    let mut tiles = Vec::new();
    for (row, markers) in grid.iter_rows().enumerate() {
        for (col, &marker) in markers.iter().enumerate() {
            let Some(color) = tile_color(marker) else {
                continue;
            };
            let node = scene
                .add_cube(TILE_SIZE, TILE_THICKNESS, TILE_SIZE)
                .set_color(color)
                .set_position(cell_position(grid, (row as i32, col as i32), 0.0));
            tiles.push(node);
        }
    }
    tiles
}

/// Adds the block resting on `footprint`.
///
/// A standing block is one tall cube; a lying block is one cube per cell.
fn build_block(scene: &mut SceneNode3d, grid: &Grid, footprint: &Footprint) -> Vec<SceneNode3d> {
    let resting_height = TILE_THICKNESS / 2.0;
    match footprint.cells() {
        [cell] => {
            let height = 2.0 * BLOCK_SIZE;
            let node = scene
                .add_cube(BLOCK_SIZE, height, BLOCK_SIZE)
                .set_color(block_color())
                .set_position(cell_position(grid, *cell, resting_height + height / 2.0));
            vec![node]
        }
        cells => cells
            .iter()
            .map(|&cell| {
                scene
                    .add_cube(BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE)
                    .set_color(block_color())
                    .set_position(cell_position(grid, cell, resting_height + BLOCK_SIZE / 2.0))
            })
            .collect(),
    }
}

fn remove_all(nodes: &mut Vec<SceneNode3d>) {
    for mut node in nodes.drain(..) {
        node.remove();
    }
}

/// Footprints along a level's solution; falls back to the origin if it does not replay.
fn replay_frames(level: &Level) -> Vec<Footprint> {
    match level.replay() {
        Ok(frames) => frames,
        Err(err) => {
            warn!("level does not replay: {err}");
            vec![Footprint::standing(level.origin())]
        }
    }
}

fn window_title(level_index: usize, num_levels: usize, step: usize, num_steps: usize) -> String {
    format!(
        "Level {}/{} - move {}/{} - [Left/Right] level, [Up/Down] step, [R] reset",
        level_index + 1,
        num_levels,
        step,
        num_steps
    )
}

/// Displays all levels in an interactive 3D viewer.
pub fn display(levels: Vec<Level>) {
    pollster::block_on(display_async(levels));
}

async fn display_async(levels: Vec<Level>) {
    if levels.is_empty() {
        println!("No levels to display");
        return;
    }

    let num_levels = levels.len();
    let mut current_level_index = 0;
    let mut frames = replay_frames(&levels[current_level_index]);
    let mut step = 0;

    let mut window = Window::new(&window_title(0, num_levels, 0, frames.len() - 1)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(30.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(10.0, 20.0, 10.0));

    let mut tiles = build_board(&mut scene, levels[current_level_index].grid());
    let mut block = build_block(&mut scene, levels[current_level_index].grid(), &frames[step]);

    // the board needs rebuilding after a level change, the block after any step
    let mut needs_board_rebuild = false;
    let mut needs_block_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up if step + 1 < frames.len() => {
                            step += 1;
                            needs_block_rebuild = true;
                        }
                        Key::Down if step > 0 => {
                            step -= 1;
                            needs_block_rebuild = true;
                        }
                        Key::R => {
                            step = 0;
                            needs_block_rebuild = true;
                        }
                        Key::Right => {
                            current_level_index = (current_level_index + 1) % num_levels;
                            needs_board_rebuild = true;
                        }
                        Key::Left => {
                            current_level_index = current_level_index
                                .checked_sub(1)
                                .unwrap_or(num_levels - 1);
                            needs_board_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        let level = &levels[current_level_index];

        if needs_board_rebuild {
            remove_all(&mut tiles);
            tiles = build_board(&mut scene, level.grid());
            frames = replay_frames(level);
            step = 0;
            needs_board_rebuild = false;
            needs_block_rebuild = true;
        }

        if needs_block_rebuild {
            remove_all(&mut block);
            block = build_block(&mut scene, level.grid(), &frames[step]);
            window.set_title(&window_title(
                current_level_index,
                num_levels,
                step,
                frames.len() - 1,
            ));
            needs_block_rebuild = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
