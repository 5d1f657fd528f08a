use std::path::{Path, PathBuf};
use std::process::Command;

use hyprhue::app::{run, RunOptions};
use hyprhue::color::{config_lines, Color};
use hyprhue::config::Settings;
use hyprhue::pipeline::extract::{load_wallpaper, ColorHistogram, Wallpaper};
use hyprhue::pipeline::rank::{rank_colors, top_n};
use hyprhue::template::{Placeholders, Template};
use hyprhue::Error;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A fresh scratch directory per test so parallel tests never collide.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hyprhue-it-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("walls")).unwrap();
    dir
}

/// Eight flat color regions of unequal size.
fn create_blocks(path: &Path) {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let region = (x / 16) + (y / 16) * 4;
        match region % 8 {
            0 | 1 | 2 => image::Rgb([220, 50, 50]), // red
            3 | 4 => image::Rgb([50, 200, 50]),     // green
            5 => image::Rgb([50, 50, 220]),         // blue
            6 => image::Rgb([20, 20, 20]),          // black
            _ => image::Rgb([240, 240, 240]),       // white
        }
    });
    img.save(path).unwrap();
}

/// Smooth gradient, lossy-encoded.
fn create_gradient_jpeg(path: &Path) {
    let img = image::RgbImage::from_fn(64, 48, |x, y| {
        image::Rgb([(x * 4) as u8, (y * 5) as u8, ((x + y) * 2) as u8])
    });
    img.save(path).unwrap();
}

const TEMPLATE: &str = "\
# generated by hyprhue
{{TEMPLATE_COLOUR}}
{{TEMPLATE_COLOUR}}
{{TEMPLATE_COLOUR}}
{{TEMPLATE_COLOUR}}
{{TEMPLATE_COLOUR}}

{{TEMPLATE_WALLPAPER_FILEPATH}}
exec-once = swww img $wallpaper_path
";

fn settings_in(dir: &Path) -> Settings {
    Settings {
        wallpaper_dir: dir.join("walls"),
        template: dir.join("hyprland.conf.template"),
        generated: dir.join("hyprland.conf.gen"),
        user_config: dir.join("hypr").join("hyprland.conf"),
        backup: dir.join("hypr").join("hyprland.user.bak"),
        swatch: dir.join("palette.png"),
        ..Settings::default()
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba8(r, g, b, 255)
}

/// Validate the shape of a generated config made from `TEMPLATE`.
fn validate_generated(output: &str, wallpaper: &Path) {
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 9, "unexpected output:\n{output}");
    assert_eq!(lines[0], "# generated by hyprhue");

    let color_re = regex::Regex::new(r"^\$color([0-4]) = rgba\([0-9a-f]{8}\)$").unwrap();
    for (i, line) in lines[1..6].iter().enumerate() {
        let caps = color_re
            .captures(line)
            .unwrap_or_else(|| panic!("bad color line: '{line}'"));
        assert_eq!(caps[1].parse::<usize>().unwrap(), i);
    }

    assert_eq!(lines[6], "");
    assert_eq!(
        lines[7],
        format!("$wallpaper_path = {}", wallpaper.display())
    );
    assert_eq!(lines[8], "exec-once = swww img $wallpaper_path");
}

// ---------------------------------------------------------------------------
// Pipeline tests
// ---------------------------------------------------------------------------

#[test]
fn blocks_rank_by_area() {
    let dir = scratch_dir("blocks-rank");
    let path = dir.join("blocks.png");
    create_blocks(&path);

    let hist = ColorHistogram::from_image(&load_wallpaper(&path).unwrap());
    assert_eq!(hist.total(), 64 * 64);

    let top = top_n(&rank_colors(&hist), 5).unwrap();
    assert_eq!(top[0].color, rgb(220, 50, 50));
    assert_eq!(top[1].color, rgb(50, 200, 50));
    // blue, black and white all cover two regions
    for ranked in &top[2..] {
        assert_eq!(ranked.count, 2 * 16 * 16);
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn full_run_on_png() {
    let dir = scratch_dir("full-png");
    let settings = settings_in(&dir);
    create_blocks(&settings.wallpaper_dir.join("blocks.png"));
    std::fs::write(&settings.template, TEMPLATE).unwrap();

    let report = run(&settings, &RunOptions::default()).unwrap();
    let generated = std::fs::read_to_string(&settings.generated).unwrap();
    validate_generated(&generated, &report.wallpaper);
    assert!(generated.contains("$color0 = rgba(dc3232ff)"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn full_run_on_jpeg() {
    let dir = scratch_dir("full-jpeg");
    let settings = settings_in(&dir);
    create_gradient_jpeg(&settings.wallpaper_dir.join("gradient.jpg"));
    std::fs::write(&settings.template, TEMPLATE).unwrap();

    let report = run(&settings, &RunOptions::default()).unwrap();
    assert!(report.wallpaper.ends_with("gradient.jpg"));
    validate_generated(&report.generated, &report.wallpaper);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rerun_with_same_seed_is_identical() {
    let dir = scratch_dir("rerun");
    let settings = settings_in(&dir);
    for name in ["a.png", "b.png", "c.png"] {
        create_blocks(&settings.wallpaper_dir.join(name));
    }
    std::fs::write(&settings.template, TEMPLATE).unwrap();

    let options = RunOptions {
        seed: Some(3),
        ..RunOptions::default()
    };
    let first = run(&settings, &options).unwrap();
    let first_file = std::fs::read_to_string(&settings.generated).unwrap();
    let second = run(&settings, &options).unwrap();
    let second_file = std::fs::read_to_string(&settings.generated).unwrap();

    assert_eq!(first.wallpaper, second.wallpaper);
    // red and green have unique counts; the three-way tie below them may reorder
    let head = |text: &str| text.lines().take(3).map(String::from).collect::<Vec<_>>();
    assert_eq!(head(&first_file), head(&second_file));
    assert_eq!(first_file.lines().last(), second_file.lines().last());

    std::fs::remove_dir_all(&dir).unwrap();
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// 1x1 to 12x12 images drawn from a small palette so colors repeat.
    fn arb_image() -> impl Strategy<Value = Wallpaper> {
        (1u32..=12u32, 1u32..=12u32).prop_flat_map(|(w, h)| {
            proptest::collection::vec(0u8..6u8, (w * h) as usize).prop_map(move |idx| {
                Wallpaper::from_fn(w, h, |x, y| {
                    let v = idx[(y * w + x) as usize];
                    let c = Color::from_rgba8(v * 40, 255 - v * 40, v, 255);
                    image::Rgba([c.r, c.g, c.b, c.a])
                })
            })
        })
    }

    proptest! {
        #[test]
        fn histogram_counts_sum_to_area(img in arb_image()) {
            let hist = ColorHistogram::from_image(&img);
            prop_assert_eq!(hist.total(), img.width() as u64 * img.height() as u64);
        }

        #[test]
        fn ranking_is_sorted(img in arb_image()) {
            let ranked = rank_colors(&ColorHistogram::from_image(&img));
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }

        #[test]
        fn top_n_is_exact_or_fails(img in arb_image(), n in 1usize..=5) {
            let ranked = rank_colors(&ColorHistogram::from_image(&img));
            match top_n(&ranked, n) {
                Ok(top) => prop_assert_eq!(top.len(), n),
                Err(Error::InsufficientColors { required, found }) => {
                    prop_assert_eq!(required, n);
                    prop_assert!(found < n);
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
        }

        #[test]
        fn hex_round_trips_low_bytes(r: u16, g: u16, b: u16, a: u16) {
            let color = Color::new(r, g, b, a);
            let hex = color.to_hex();
            prop_assert_eq!(hex.len(), 8);
            let byte = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap();
            prop_assert_eq!([byte(0), byte(1), byte(2), byte(3)], color.low_bytes());
        }

        #[test]
        fn substitution_preserves_order(
            literals in proptest::collection::vec("[a-z =]{0,12}", 0..6),
            slots in 0usize..=5,
        ) {
            let colors: Vec<Color> = (0..5u8).map(|i| Color::from_rgba8(i, i, i, 255)).collect();
            let lines = config_lines(&colors);

            let mut text = String::new();
            for literal in &literals {
                text.push_str(literal);
                text.push('\n');
            }
            for _ in 0..slots {
                text.push_str("{{TEMPLATE_COLOUR}}\n");
            }

            let template = Template::parse(&text, &Placeholders::default());
            let out = template.render(&lines, Path::new("/w.png")).unwrap();
            let emitted: Vec<&str> = out
                .lines()
                .filter(|l| l.starts_with("$color"))
                .collect();
            let expected: Vec<&str> = lines[..slots].iter().map(String::as_str).collect();
            prop_assert_eq!(emitted, expected);
            prop_assert_eq!(out.lines().count(), literals.len() + slots);
        }
    }
}

// ---------------------------------------------------------------------------
// CLI integration tests (run the actual binary)
// ---------------------------------------------------------------------------

fn cargo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hyprhue"))
}

/// The binary with every path pointed into `dir` and a clean environment.
fn command_in(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin());
    cmd.env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("HYPRHUE_WALLPAPER_DIR", dir.join("walls"))
        .env("HYPRHUE_TEMPLATE", dir.join("hyprland.conf.template"))
        .env("HYPRHUE_OUTPUT", dir.join("hyprland.conf.gen"))
        .env("HYPRHUE_USER_CONFIG", dir.join("hypr").join("hyprland.conf"))
        .env("HYPRHUE_BACKUP", dir.join("hypr").join("hyprland.user.bak"))
        .env("HYPRHUE_SWATCH", dir.join("palette.png"));
    cmd
}

#[test]
fn cli_generates_config() {
    let dir = scratch_dir("cli-run");
    create_blocks(&dir.join("walls").join("blocks.png"));
    std::fs::write(dir.join("hyprland.conf.template"), TEMPLATE).unwrap();
    std::fs::create_dir_all(dir.join("hypr")).unwrap();
    std::fs::write(dir.join("hypr").join("hyprland.conf"), "input { kb_layout = us }\n").unwrap();

    let output = command_in(&dir).output().expect("failed to run binary");
    assert!(
        output.status.success(),
        "binary exited with error: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let generated = std::fs::read_to_string(dir.join("hyprland.conf.gen")).unwrap();
    validate_generated(&generated, &dir.join("walls").join("blocks.png"));
    let backup = std::fs::read_to_string(dir.join("hypr").join("hyprland.user.bak")).unwrap();
    assert_eq!(backup, "input { kb_layout = us }\n");
    assert!(dir.join("palette.png").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_dry_run_prints_to_stdout() {
    let dir = scratch_dir("cli-dry");
    let wallpaper = dir.join("elsewhere.png");
    create_blocks(&wallpaper);
    std::fs::write(dir.join("hyprland.conf.template"), TEMPLATE).unwrap();

    let output = command_in(&dir)
        .args(["--dry-run", "--wallpaper", wallpaper.to_str().unwrap()])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    validate_generated(&String::from_utf8_lossy(&output.stdout), &wallpaper);
    assert!(!dir.join("hyprland.conf.gen").exists());
    assert!(!dir.join("palette.png").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_flags_override_environment() {
    let dir = scratch_dir("cli-flags");
    create_blocks(&dir.join("walls").join("blocks.png"));
    std::fs::write(dir.join("short.template"), "{{TEMPLATE_COLOUR}}\n").unwrap();
    let out_path = dir.join("flag-out.conf");

    let output = command_in(&dir)
        .args([
            "-n",
            "1",
            "--template",
            dir.join("short.template").to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let content = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(content, "$color0 = rgba(dc3232ff)\n");
    assert!(!dir.join("hyprland.conf.gen").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_help_output() {
    let output = Command::new(cargo_bin())
        .arg("--help")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hyprhue"));
    assert!(stdout.contains("--wallpaper-dir"));
    assert!(stdout.contains("--template"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--preview"));
}

#[test]
fn cli_template_exhausted_fails_without_output() {
    let dir = scratch_dir("cli-exhausted");
    create_blocks(&dir.join("walls").join("blocks.png"));
    std::fs::write(
        dir.join("hyprland.conf.template"),
        "{{TEMPLATE_COLOUR}}\n{{TEMPLATE_COLOUR}}\n{{TEMPLATE_COLOUR}}\n",
    )
    .unwrap();

    let output = command_in(&dir)
        .args(["-n", "2"])
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("asks for a color"),
        "expected exhausted template error, got: {stderr}"
    );
    assert!(!dir.join("hyprland.conf.gen").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_missing_wallpaper_dir_error() {
    let dir = scratch_dir("cli-nodir");
    let output = command_in(&dir)
        .env("HYPRHUE_WALLPAPER_DIR", dir.join("does-not-exist"))
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to read wallpaper directory"),
        "expected directory error, got: {stderr}"
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_unsupported_image_error() {
    let dir = scratch_dir("cli-corrupt");
    std::fs::write(dir.join("walls").join("broken.png"), "this is not an image").unwrap();
    std::fs::write(dir.join("hyprland.conf.template"), TEMPLATE).unwrap();

    let output = command_in(&dir).output().expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unsupported or corrupt image"),
        "expected decode error, got: {stderr}"
    );

    std::fs::remove_dir_all(&dir).unwrap();
}
