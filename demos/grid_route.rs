//! Routes across an ASCII map with A*.
//!
//! `#` cells are walls, `S` is the start and `G` the goal. Run with
//! `RUST_LOG=trellis=debug cargo run --example grid_route` to see the search log.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trellis::graph::{AStar, HasNeighbors};

const MAP: &str = "\
S....#....
.##..#.##.
.#...#..#.
.#.###..#.
.#......#G";

type Cell = (usize, usize);

struct Map {
    rows: Vec<Vec<u8>>,
}

impl Map {
    fn parse(text: &str) -> Self {
        Self {
            rows: text.lines().map(|line| line.bytes().collect()).collect(),
        }
    }

    fn find(&self, marker: u8) -> Option<Cell> {
        self.rows.iter().enumerate().find_map(|(y, row)| {
            row.iter().position(|&b| b == marker).map(|x| (x, y))
        })
    }

    fn at(&self, (x, y): Cell) -> Option<u8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }
}

impl HasNeighbors for Map {
    type Node = Cell;
    type Neighbors<'a> = std::vec::IntoIter<Cell>;

    fn neighbors(&self, (x, y): Cell) -> Self::Neighbors<'_> {
        let mut cells = vec![(x + 1, y), (x, y + 1)];
        if x > 0 {
            cells.push((x - 1, y));
        }
        if y > 0 {
            cells.push((x, y - 1));
        }
        cells.retain(|&c| self.contains_node(c));
        cells.into_iter()
    }

    fn contains_node(&self, cell: Cell) -> bool {
        self.at(cell).is_some()
    }
}

fn manhattan(a: &Cell, b: &Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let map = Map::parse(MAP);
    let start = map.find(b'S').ok_or_else(|| anyhow::anyhow!("map has no start"))?;
    let goal = map.find(b'G').ok_or_else(|| anyhow::anyhow!("map has no goal"))?;

    let path = AStar::new(manhattan, manhattan, |a: usize, b: usize| a + b)
        .with_filter(|cell: &Cell| map.at(*cell) != Some(b'#'))
        .find_path(&map, start, goal)?;

    if path.is_empty() {
        tracing::warn!("no route from {start:?} to {goal:?}");
        return Ok(());
    }
    tracing::info!(steps = path.len() - 1, cost = *path.cost(), "route found");

    let mut canvas = map.rows.clone();
    for &(x, y) in path.iter().skip(1) {
        if (x, y) != goal {
            canvas[y][x] = b'*';
        }
    }
    for row in canvas {
        println!("{}", String::from_utf8_lossy(&row));
    }
    Ok(())
}
