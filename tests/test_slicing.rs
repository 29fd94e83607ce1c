use swarascan::SliceConfig;
use swarascan::detection::slicing::{Tile, tile_grid};

#[test]
fn grid_covers_the_image_with_clamped_edges() {
    let tiles = tile_grid(150, 100, &SliceConfig::new(100, 100, 0.5));
    // x origins 0, 50, 100; y origins 0, 50; edge tiles clamped, not padded
    assert_eq!(tiles.len(), 6);
    assert!(tiles.contains(&Tile { x: 0, y: 0, width: 100, height: 100 }));
    assert!(tiles.contains(&Tile { x: 100, y: 0, width: 50, height: 100 }));
    assert!(tiles.contains(&Tile { x: 50, y: 50, width: 100, height: 50 }));
    assert!(tiles.iter().all(|t| t.width > 0 && t.height > 0));
    assert!(tiles.iter().all(|t| t.x + t.width <= 150 && t.y + t.height <= 100));
}

#[test]
fn zero_overlap_steps_by_the_slice_size() {
    let tiles = tile_grid(200, 100, &SliceConfig::new(100, 100, 0.0));
    assert_eq!(
        tiles,
        vec![
            Tile { x: 0, y: 0, width: 100, height: 100 },
            Tile { x: 100, y: 0, width: 100, height: 100 },
        ]
    );
}

#[test]
fn empty_image_yields_no_tiles() {
    assert!(tile_grid(0, 100, &SliceConfig::default()).is_empty());
    assert!(tile_grid(100, 0, &SliceConfig::default()).is_empty());
}

#[test]
fn slice_larger_than_the_image_gives_one_clamped_tile() {
    let tiles = tile_grid(80, 60, &SliceConfig::default());
    assert_eq!(tiles, vec![Tile { x: 0, y: 0, width: 80, height: 60 }]);
}
