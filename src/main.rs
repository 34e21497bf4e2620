//! Path Cache demo - a headless fixed-step simulation
//!
//! Issues recurring path queries from a handful of units every tick, serves
//! them through per-category caches and reports the cache statistics.

use std::time::Duration;

use anyhow::Context;
use path_cache::cache::{CacheKey, Cell, Path, SearchResult, Waypoint};
use path_cache::{CacheConfig, PathManager, PathSearch};
use tokio::signal;
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Units issuing queries each tick.
const UNITS: u32 = 12;

/// Mover categories in play.
const MOVER_CATEGORIES: u32 = 3;

/// World units per grid cell.
const CELL_SIZE: f32 = 16.0;

// == Straight Line Search ==
/// Stand-in for a real grid search: walks the cells on the straight line
/// from start to goal.
#[derive(Debug)]
struct StraightLineSearch {
    blocks_x: i32,
    blocks_z: i32,
}

impl PathSearch for StraightLineSearch {
    fn search(&mut self, key: &CacheKey) -> (Path, SearchResult) {
        let in_bounds = |c: Cell| (0..self.blocks_x).contains(&c.x) && (0..self.blocks_z).contains(&c.y);
        if !in_bounds(key.start) {
            return (Path::default(), SearchResult::Error);
        }
        if !in_bounds(key.goal) {
            return (Path::default(), SearchResult::GoalOutOfRange);
        }

        let cells = line_cells(key.start, key.goal);
        let to_world = |c: &Cell| Waypoint::new(c.x as f32 * CELL_SIZE, 0.0, c.y as f32 * CELL_SIZE);

        // Waypoints run goal first
        let waypoints: Vec<Waypoint> = cells.iter().rev().map(to_world).collect();
        let path = Path {
            goal: to_world(&key.goal),
            goal_radius: key.goal_radius,
            cost: cells.len().saturating_sub(1) as f32,
            waypoints,
            cells,
        };
        (path, SearchResult::Ok)
    }
}

/// Bresenham line from `from` to `to`, inclusive.
fn line_cells(from: Cell, to: Cell) -> Vec<Cell> {
    let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
    let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let (mut x, mut y, mut err) = (from.x, from.y, dx + dy);
    let mut cells = vec![from];

    while (x, y) != (to.x, to.y) {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        cells.push(Cell::new(x, y));
    }
    cells
}

/// The query unit `unit` issues at `tick`. Units retarget every few
/// seconds, so most queries repeat within the cache window.
fn unit_query(unit: u32, tick: u64, config: &CacheConfig) -> CacheKey {
    let phase = (tick / 90) as i32;
    let spread = config.blocks_x.min(config.blocks_z) as i32;
    let start = Cell::new((unit as i32 * 7) % spread, (unit as i32 * 3) % spread);
    let goal = Cell::new(
        (start.x + 11 + phase * 5) % spread,
        (start.y + 17 + (unit as i32 % 4) * phase) % spread,
    );
    CacheKey::new(start, goal, 8.0, unit % MOVER_CATEGORIES)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "path_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: capacity={}, timeout_ticks={}, grid={}x{}, tick={}ms, ticks={}",
        config.capacity,
        config.timeout_ticks,
        config.blocks_x,
        config.blocks_z,
        config.tick_interval_ms,
        config.sim_ticks
    );

    let search = StraightLineSearch {
        blocks_x: config.blocks_x as i32,
        blocks_z: config.blocks_z as i32,
    };
    let mut manager = PathManager::new(search, config.clone());

    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    for tick in 0..config.sim_ticks {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                info!(tick, "Received Ctrl+C, stopping simulation");
                break;
            }
        }

        for unit in 0..UNITS {
            manager.find_path(unit_query(unit, tick, &config), tick);
        }
        manager.update(tick);
    }

    let stats = manager.total_stats();
    info!(
        "Simulation finished: hits={}, misses={}, hit-percentage={:.0}%, collisions={}",
        stats.hits,
        stats.misses,
        stats.hit_percentage(),
        stats.collisions
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "config": config,
            "stats": stats,
            "hit_percentage": stats.hit_percentage(),
        }))?
    );

    Ok(())
}
