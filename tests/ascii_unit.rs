//! Unit tests for the ASCII conversion module.
//!
//! These tests check properties of the core conversion steps across their
//! whole input range:
//! - Brightness quantization
//! - Glyph and color mapping
//! - Grid sizing
//! - Rendering to plain rows and markup

use asciify::ascii::*;
use asciify::config::Settings;
use asciify::session::render_image;
use image::{DynamicImage, Rgb, RgbImage};

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

// ==================== Brightness Tests ====================

#[test]
fn test_brightness_endpoints() {
    assert_eq!(Brightness::from_rgb(0, 0, 0), Brightness::BLACK);
    assert_eq!(Brightness::from_rgb(255, 255, 255), Brightness::WHITE);
    assert_eq!(Brightness::BLACK.value(), 0.0);
    assert_eq!(Brightness::WHITE.value(), 255.0);
}

#[test]
fn test_brightness_is_channel_average() {
    // Channels weigh equally, so permutations are the same brightness
    assert_eq!(
        Brightness::from_rgb(30, 60, 90),
        Brightness::from_rgb(90, 30, 60)
    );
    assert_eq!(Brightness::from_rgb(30, 60, 90), Brightness::from_gray(60));
}

#[test]
fn test_level_never_exceeds_range() {
    for levels in [1usize, 2, 3, 8, 10, 70] {
        for sum in (0..=Brightness::MAX_SUM).step_by(5) {
            let b = Brightness::from_rgb(
                (sum.min(255)) as u8,
                (sum.saturating_sub(255).min(255)) as u8,
                (sum.saturating_sub(510).min(255)) as u8,
            );
            assert!(b.level(levels) < levels.max(1), "sum {} levels {}", sum, levels);
        }
    }
}

// ==================== Mapping Tests ====================

#[test]
fn test_mapping_monotonic_over_all_grays() {
    let ramp = GlyphRamp::default();
    let palette = Palette::default();

    let mut previous_level = 0;
    let mut previous_tier = 0;
    for v in 0..=255u8 {
        let cell = map_brightness(Brightness::from_gray(v), &ramp, &palette);
        let level = ramp.glyphs().iter().position(|&g| g == cell.glyph).unwrap();
        let tier = palette.colors().iter().position(|&c| c == cell.color).unwrap();
        assert!(level >= previous_level, "glyph went backwards at {}", v);
        assert!(tier >= previous_tier, "color went backwards at {}", v);
        previous_level = level;
        previous_tier = tier;
    }
}

#[test]
fn test_mapping_endpoints_bright_is_dense() {
    let ramp = GlyphRamp::new(STANDARD_RAMP, RampOrder::BrightIsDense).unwrap();
    let palette = Palette::default();

    let black = map_brightness(Brightness::BLACK, &ramp, &palette);
    assert_eq!(black.glyph, ' ');
    assert_eq!(black.color, Color::new(0, 0, 0));

    let white = map_brightness(Brightness::WHITE, &ramp, &palette);
    assert_eq!(white.glyph, '@');
    assert_eq!(white.color, Color::new(255, 255, 255));
}

#[test]
fn test_mapping_endpoints_bright_is_sparse() {
    let ramp = GlyphRamp::new(STANDARD_RAMP, RampOrder::BrightIsSparse).unwrap();
    let palette = Palette::default();

    assert_eq!(map_brightness(Brightness::BLACK, &ramp, &palette).glyph, '@');
    assert_eq!(map_brightness(Brightness::WHITE, &ramp, &palette).glyph, ' ');
}

#[test]
fn test_mapping_every_glyph_reachable() {
    let ramp = GlyphRamp::default();
    let palette = Palette::default();
    let cells = map_all(
        &(0..=255u8).map(Brightness::from_gray).collect::<Vec<_>>(),
        &ramp,
        &palette,
    );

    for glyph in ramp.glyphs() {
        assert!(cells.iter().any(|c| c.glyph == *glyph), "{:?} unused", glyph);
    }
    for color in palette.colors() {
        assert!(cells.iter().any(|c| c.color == *color), "{} unused", color);
    }
}

#[test]
fn test_single_color_palette() {
    let ramp = GlyphRamp::default();
    let palette = Palette::parse(&["#0f0"]).unwrap();
    for v in [0u8, 64, 128, 255] {
        let cell = map_brightness(Brightness::from_gray(v), &ramp, &palette);
        assert_eq!(cell.color, Color::new(0, 255, 0));
    }
}

// ==================== Sizing Tests ====================

#[test]
fn test_max_columns_grid_matches_image_shape() {
    let policy = SizingPolicy::MaxColumns { columns: 80 };
    let cases = [
        ((160, 80), GridSize::new(80, 40)),
        ((80, 160), GridSize::new(80, 160)),
        ((33, 7), GridSize::new(33, 7)),
        ((1, 1), GridSize::new(1, 1)),
        // Rows never drop below one
        ((1000, 1), GridSize::new(80, 1)),
    ];
    for ((w, h), expected) in cases {
        assert_eq!(policy.grid_for(w, h, None, 1.0).unwrap(), expected, "{}x{}", w, h);
    }
}

#[test]
fn test_viewport_fraction_longer_side_gets_budget() {
    let policy = SizingPolicy::ViewportFraction { fraction: 0.5 };
    let viewport = Viewport {
        width: 100,
        height: 60,
    };
    // budget = 30
    assert_eq!(
        policy.grid_for(400, 200, Some(viewport), 1.0).unwrap(),
        GridSize::new(30, 15)
    );
    assert_eq!(
        policy.grid_for(200, 400, Some(viewport), 1.0).unwrap(),
        GridSize::new(15, 30)
    );
}

#[test]
fn test_char_aspect_halves_rows() {
    let policy = SizingPolicy::MaxColumns { columns: 40 };
    assert_eq!(
        policy.grid_for(400, 400, None, 2.0).unwrap(),
        GridSize::new(40, 20)
    );
}

#[test]
fn test_viewport_fraction_requires_viewport() {
    let policy = SizingPolicy::default();
    assert_eq!(
        policy.grid_for(10, 10, None, 1.0),
        Err(SizingError::MissingViewport)
    );
}

#[test]
fn test_every_policy_keeps_image_shape() {
    let policies = [
        SizingPolicy::ViewportFraction { fraction: 0.9 },
        SizingPolicy::MaxColumns { columns: 80 },
        SizingPolicy::FitBox {
            columns: 80,
            rows: 24,
        },
    ];
    let shapes = [
        (1u32, 1u32),
        (1, 500),
        (500, 1),
        (1, 10_000),
        (10_000, 1),
        (1000, 5),
        (5, 1000),
        (640, 480),
        (480, 640),
        (33, 7),
        (7, 33),
        (1920, 1080),
    ];
    let viewport = Viewport {
        width: 100,
        height: 50,
    };

    for policy in policies {
        for (w, h) in shapes {
            let grid = policy.grid_for(w, h, Some(viewport), 1.0).unwrap();
            assert!(grid.columns >= 1 && grid.rows >= 1, "{:?} {}x{}", policy, w, h);

            // One axis is the budget, the other is derived by rounding
            let aspect = w as f64 / h as f64;
            let rows_off = (grid.rows as f64 - grid.columns as f64 / aspect).abs();
            let columns_off = (grid.columns as f64 - grid.rows as f64 * aspect).abs();
            assert!(
                rows_off <= 1.0 || columns_off <= 1.0,
                "{:?} {}x{} -> {:?}",
                policy,
                w,
                h,
                grid
            );

            let settings = Settings {
                sizing: policy,
                ..Settings::default()
            };
            let art = render_image(&solid(w, h, [120; 3]), &settings, Some(viewport)).unwrap();
            assert_eq!(art.grid_size(), grid);
            assert_eq!(
                art.grid.cells().len(),
                grid.columns as usize * grid.rows as usize
            );
        }
    }
}

// ==================== Rendering Tests ====================

#[test]
fn test_rendered_grid_dimensions() {
    let ramp = GlyphRamp::default();
    let palette = Palette::default();
    for (columns, rows) in [(1u32, 1u32), (7, 3), (3, 7), (40, 20)] {
        let grid = GridSize::new(columns, rows);
        let brightness = sample(&solid(64, 64, [90, 90, 90]), grid, Resample::Bilinear).unwrap();
        let rendered = render(&brightness, &ramp, &palette);

        assert_eq!(rendered.columns(), columns);
        assert_eq!(rendered.rows(), rows);
        let plain = rendered.to_plain_rows();
        assert_eq!(plain.len(), rows as usize);
        assert!(plain.iter().all(|r| r.chars().count() == columns as usize));
        assert_eq!(rendered.to_markup().as_str().matches('\n').count(), rows as usize);
    }
}

#[test]
fn test_every_resample_filter_keeps_solid_color() {
    let ramp = GlyphRamp::default();
    let palette = Palette::default();
    for filter in [Resample::Nearest, Resample::Bilinear, Resample::BoxAverage] {
        let brightness = sample(&solid(30, 20, [255; 3]), GridSize::new(6, 4), filter).unwrap();
        let rendered = render(&brightness, &ramp, &palette);
        for row in rendered.to_plain_rows() {
            assert_eq!(row, "@@@@@@", "filter {}", filter.name());
        }
    }
}

#[test]
fn test_markup_escapes_glyphs() {
    let ramp = GlyphRamp::new("<&", RampOrder::BrightIsDense).unwrap();
    let palette = Palette::default();
    let brightness = sample(&solid(2, 1, [0; 3]), GridSize::new(2, 1), Resample::Nearest).unwrap();
    let markup = render(&brightness, &ramp, &palette).to_markup();

    assert!(markup.as_str().contains("&lt;"));
    assert!(!markup.as_str().contains("><<"));
}

#[test]
fn test_escape_helpers() {
    assert_eq!(escape_text("a<b>&c"), "a&lt;b&gt;&amp;c");
    assert_eq!(escape_attr("\"x\""), "&quot;x&quot;");
    assert_eq!(escape_text("plain"), "plain");
}
