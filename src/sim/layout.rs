//! Brick row layout

use glam::Vec2;

use super::state::BrickColor;
use crate::settings::GameConfig;

/// Where one brick goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickSlot {
    pub column: usize,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: BrickColor,
}

/// Single row evenly dividing the playfield width
pub fn brick_row(config: &GameConfig) -> Vec<BrickSlot> {
    let count = config.brick_count;
    let width = config.playfield_width / count as f32;
    let y = config.half_height() - config.brick_top_offset;

    (0..count)
        .map(|column| BrickSlot {
            column,
            pos: Vec2::new(
                column as f32 * width - config.half_width() + width / 2.0,
                y,
            ),
            size: Vec2::new(width, config.brick_height),
            color: BrickColor::for_column(column),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_bricks_over_300() {
        let config = GameConfig::with_playfield(300.0, 600.0);
        let row = brick_row(&config);
        assert_eq!(row.len(), 6);

        let xs: Vec<f32> = row.iter().map(|s| s.pos.x).collect();
        let expected = [-125.0, -75.0, -25.0, 25.0, 75.0, 125.0];
        for (x, e) in xs.iter().zip(expected) {
            assert!((x - e).abs() < 1e-4, "{x} != {e}");
        }
        for slot in &row {
            assert!((slot.size.x - 50.0).abs() < 1e-4);
            assert_eq!(slot.size.y, 25.0);
            assert_eq!(slot.pos.y, 200.0);
            assert_eq!(slot.color, BrickColor::for_column(slot.column));
        }
    }

    #[test]
    fn test_row_covers_playfield() {
        let config = GameConfig {
            brick_count: 5,
            ..GameConfig::default()
        };
        let row = brick_row(&config);
        let left = row[0].pos.x - row[0].size.x / 2.0;
        let right = row[4].pos.x + row[4].size.x / 2.0;
        assert!((left + config.half_width()).abs() < 1e-3);
        assert!((right - config.half_width()).abs() < 1e-3);
    }
}
