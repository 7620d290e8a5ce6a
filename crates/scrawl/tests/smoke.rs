//! Round-trip smoke tests against a real typeface
//!
//! These need an actual font file to draw ink. A handful of well-known
//! system locations are probed; when none yields a TrueType font the tests
//! pass vacuously rather than fail on a fontless machine.

use std::path::PathBuf;

use scrawl::prelude::*;
use scrawl::layout;

const FONT_DIRS: [&str; 4] = [
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// First .ttf file found under the known directories
fn system_font() -> Option<PathBuf> {
    fn walk(dir: &PathBuf, depth: u32) -> Option<PathBuf> {
        if depth > 4 {
            return None;
        }
        let entries = std::fs::read_dir(dir).ok()?;
        let mut subdirs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                subdirs.push(path);
            } else if path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("ttf"))
                .unwrap_or(false)
            {
                return Some(path);
            }
        }
        subdirs.into_iter().find_map(|d| walk(&d, depth + 1))
    }

    FONT_DIRS
        .iter()
        .find_map(|dir| walk(&PathBuf::from(dir), 0))
}

fn config() -> RenderConfig {
    RenderConfig {
        size: 36.0,
        dpi: 72.0,
        hinting: Hinting::Full,
    }
}

#[test]
fn hello_world_renders_black_on_white() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let face = FontFace::from_file(&path).unwrap();

    let canvas = layout::render_text("Hello\nWorld", &face, &config()).unwrap();

    // Two rows of text, exactly
    assert_eq!(canvas.height(), 2 * layout::line_height(&config()));

    // Background corners stay pure white
    let (w, h) = (canvas.width(), canvas.height());
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert_eq!(canvas.get(x, y), Color::white(), "corner ({x},{y})");
    }

    // And somewhere there is real ink
    let has_ink = canvas
        .data()
        .chunks_exact(4)
        .any(|px| px[0] < 128 && px[3] == 255);
    assert!(has_ink, "no dark pixels drawn");
}

#[test]
fn text_block_is_horizontally_centered() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let face = FontFace::from_file(&path).unwrap();

    let canvas = layout::render_text("HOHOHO", &face, &config()).unwrap();

    // Find the ink bounding columns
    let (w, h) = (canvas.width(), canvas.height());
    let mut first = None;
    let mut last = None;
    for x in 0..w {
        let has_ink = (0..h).any(|y| canvas.get(x, y).r < 200);
        if has_ink {
            first.get_or_insert(x);
            last = Some(x);
        }
    }
    let (first, last) = (first.unwrap(), last.unwrap());

    // A single line is its own widest line, so the margins should be close
    // to symmetric; side bearings account for a few pixels of slack.
    let left = first as i64;
    let right = (w - 1 - last) as i64;
    assert!(
        (left - right).abs() <= w as i64 / 10,
        "margins {left} vs {right} on width {w}"
    );
}

#[test]
fn catalog_scan_and_pick_load_real_faces() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let dir = path.parent().unwrap();

    let catalog = FontCatalog::scan(dir).unwrap();
    assert!(catalog.len() >= 1);

    let mut rng = rand::rng();
    let face = catalog.pick(&mut rng).unwrap();
    assert!(face.units_per_em() > 0);
}

#[test]
fn full_generate_with_effects_produces_a_png() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let dir = path.parent().unwrap();

    let renderer = ChallengeRenderer::new(FontCatalog::scan(dir).unwrap(), config());
    let challenge = renderer.generate("Prove\nIt", true).unwrap();

    assert_eq!(&challenge.png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert!(challenge.effects.is_some());
    assert!(challenge.width > 0 && challenge.height > 0);
}
