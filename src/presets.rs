//! Built-in store asset sets.
//!
//! Each [`AssetSet`] pairs a [`Theme`] with the scenes for one visual style:
//! an app icon, a 1024x500 feature graphic and four device screenshots.

use serde::{Deserialize, Serialize};

use crate::geometry::{Corner, Point, Rect};
use crate::layer::{
    Anchor, BracketSpec, EllipseSpec, GridSpec, HexGridSpec, HexShieldSpec, LineSpec, PanelSpec,
    RectSpec, ScanlineSpec, TextSpec,
};
use crate::scene::SceneSpec;
use crate::style::{Color, Theme};

const CYAN: Color = Color::rgb(0, 240, 255);
const DARK_CYAN: Color = Color::rgb(0, 80, 90);
const GREEN: Color = Color::rgb(0, 255, 100);
const HUD_WHITE: Color = Color::rgb(240, 250, 255);

const DEBUG_GREEN: Color = Color::rgb(100, 255, 100);

/// A named collection of scenes sharing one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSet {
    /// Cyan-on-void HUD look with hexagon motifs.
    Futuristic,
    /// Grey debug placeholders with grids and resolution labels.
    Dev,
}

impl AssetSet {
    pub const ALL: [AssetSet; 2] = [AssetSet::Futuristic, AssetSet::Dev];

    pub fn name(self) -> &'static str {
        match self {
            Self::Futuristic => "futuristic",
            Self::Dev => "dev",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Self::Futuristic => Theme::futuristic(),
            Self::Dev => Theme::dev(),
        }
    }

    pub fn scenes(self) -> Vec<SceneSpec> {
        match self {
            Self::Futuristic => vec![
                futuristic_icon(),
                futuristic_feature_graphic(),
                futuristic_screen(
                    "futuristic_phone_1",
                    1080,
                    1920,
                    "Command Center",
                    vec![
                        panel(50.0, 150.0, 980.0, 300.0, "Repository Index", &[
                            ">> Android-App-Core [OK]",
                            ">> Backend-API-Node [WARN]",
                            ">> Web-Client-React [OK]",
                            ">> Auth-Service-GCP [OK]",
                        ]),
                        panel(50.0, 500.0, 980.0, 400.0, "Active Telemetry", &[
                            "Build #8849: COMPILING...",
                            "Cpu Load: 45%",
                            "Memory: 12GB / 32GB",
                            "Network: STABLE",
                        ]),
                        panel(50.0, 950.0, 980.0, 200.0, "Quick Actions", &[
                            "[ INITIATE BUILD ]",
                            "[ VIEW LOGS ]",
                        ]),
                    ],
                ),
                futuristic_screen(
                    "futuristic_phone_2",
                    1080,
                    1920,
                    "Data Node: Android-Core",
                    vec![
                        panel(50.0, 150.0, 980.0, 500.0, "Build Diagnostics", &[
                            "Status: SUCCESS",
                            "Version: 2.1.0-RC4",
                            "Branch: feature/cyber-ui",
                            "Commit: 8f3a21 (Verified)",
                            "Artifacts: APK, AAB",
                        ]),
                        panel(50.0, 700.0, 980.0, 300.0, "QA Protocol", &[
                            "Unit Tests: 142/142 PASSED",
                            "UI Tests: 50/50 PASSED",
                            "Security Scan: CLEAN",
                        ]),
                    ],
                ),
                futuristic_screen(
                    "futuristic_tablet_7",
                    1280,
                    800,
                    "Tactical Overview",
                    vec![
                        panel(50.0, 100.0, 500.0, 600.0, "Project List", &[
                            "> Alpha [OK]",
                            "> Beta [OK]",
                            "> Gamma [ERR]",
                        ]),
                        panel(600.0, 100.0, 630.0, 600.0, "Detail View", &[
                            "Select a node to view telemetry.",
                            "System awaiting input...",
                        ]),
                    ],
                ),
                futuristic_screen(
                    "futuristic_tablet_10",
                    1920,
                    1200,
                    "Global Overwatch",
                    vec![
                        panel(50.0, 150.0, 550.0, 400.0, "Server Health", &[
                            "US-East: OK",
                            "EU-West: OK",
                            "Asia-South: OK",
                        ]),
                        panel(650.0, 150.0, 550.0, 400.0, "Deployment Queue", &[
                            "Job 112: Pending",
                            "Job 113: Pending",
                        ]),
                        panel(1250.0, 150.0, 600.0, 900.0, "Live Log", &[
                            "10:00: Sys init",
                            "10:01: Connected",
                            "10:02: Data sync",
                        ]),
                        panel(50.0, 600.0, 1150.0, 450.0, "Build Matrix", &[
                            "Android: 98%",
                            "iOS: 95%",
                            "Web: 100%",
                        ]),
                    ],
                ),
            ],
            Self::Dev => vec![
                dev_icon(),
                dev_feature_graphic(),
                dev_mock_screen("phone_screenshot_1", 1080, 1920, "My Repositories", &[
                    "Repo: Android-App",
                    "Repo: Backend-API",
                    "Repo: Web-Client",
                    "Repo: Auth-Service",
                ]),
                dev_mock_screen("phone_screenshot_2", 1080, 1920, "Repo Details", &[
                    "Status: CONNECTED",
                    "Branch: main",
                    "Last Build: #4242",
                    "QA Status: PENDING",
                    "Tests: 45/50 Passing",
                ]),
                dev_mock_screen("tablet_7_screenshot", 1280, 800, "Dashboard (Tablet 7)", &[
                    "Project Alpha",
                    "Project Beta",
                    "Project Gamma",
                ]),
                dev_mock_screen(
                    "tablet_10_screenshot",
                    1920,
                    1200,
                    "Global Overview (Tablet 10)",
                    &[
                        "Service A [ONLINE]",
                        "Service B [OFFLINE]",
                        "Service C [MAINTENANCE]",
                        "Cluster Status: OK",
                    ],
                ),
            ],
        }
    }
}

impl std::str::FromStr for AssetSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|set| set.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown asset set {s:?} (expected futuristic or dev)"))
    }
}

// ============================================================================
// Futuristic
// ============================================================================

fn futuristic_icon() -> SceneSpec {
    let size = 512.0;
    let center = size / 2.0;
    let magenta = Color::rgb(255, 0, 85);
    let glow = Color::rgb(0, 100, 110);

    let dot = |c: Point| Rect::new(c.x - 5.0, c.y - 5.0, 10.0, 10.0);
    let inbound = Point::new(center - 50.0, center - 50.0);
    let outbound = Point::new(center + 50.0, center + 50.0);

    SceneSpec::new("futuristic_icon", 512, 512, Color::rgb(5, 5, 16))
        .layer(HexGridSpec::new(40.0, Color::rgb(20, 30, 50)).with_rotation(30.0))
        .layer(
            HexShieldSpec::new(180.0, CYAN)
                .with_rotation(30.0)
                .with_glow(10, glow)
                .with_inner_fill(10.0, Color::rgb(10, 20, 40)),
        )
        .layer(LineSpec::new(
            vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0), inbound],
            CYAN,
            3.0,
        ))
        .layer(EllipseSpec::filled(dot(inbound), CYAN))
        .layer(LineSpec::new(
            vec![
                Point::new(size, size),
                Point::new(size - 100.0, size - 100.0),
                outbound,
            ],
            magenta,
            3.0,
        ))
        .layer(EllipseSpec::filled(dot(outbound), magenta))
        .layer(BracketSpec {
            corners: vec![Corner::TopLeft, Corner::BottomRight],
            margin: 40.0,
            length: 60.0,
            thickness: 6.0,
            color: CYAN,
        })
        .layer(
            TextSpec::new("QA", 180.0, Color::WHITE, Anchor::centered(0.0, -20.0))
                .with_shadow(4.0, 4.0, glow),
        )
        .layer(ScanlineSpec::new(4.0, Color::BLACK))
}

fn futuristic_feature_graphic() -> SceneSpec {
    let (w, h) = (1024.0, 500.0);
    let cy = h / 2.0;

    SceneSpec::new("futuristic_feature_graphic", 1024, 500, Color::rgb(5, 5, 10))
        .layer(
            HexGridSpec::new(60.0, Color::rgb(20, 30, 50))
                .with_inset(2.0)
                .with_rotation(30.0),
        )
        .layer(HexShieldSpec::new(150.0, DARK_CYAN).with_outline_width(4.0))
        .layer(HexShieldSpec::new(130.0, CYAN).with_outline_width(2.0))
        .layer(TextSpec::new(
            "QA VERIFY & TRACK",
            70.0,
            HUD_WHITE,
            Anchor::center_x(cy - 40.0),
        ))
        .layer(TextSpec::new(
            "// ADVANCED BUILD TELEMETRY //",
            30.0,
            CYAN,
            Anchor::center_x(cy + 50.0),
        ))
        .layer(LineSpec::segment(Point::new(0.0, 50.0), Point::new(w, 50.0), CYAN, 2.0))
        .layer(LineSpec::segment(
            Point::new(0.0, h - 50.0),
            Point::new(w, h - 50.0),
            CYAN,
            2.0,
        ))
}

fn panel(x: f32, y: f32, w: f32, h: f32, title: &str, lines: &[&str]) -> PanelSpec {
    PanelSpec::new(Rect::new(x, y, w, h))
        .titled(title)
        .with_lines(lines.iter().copied())
}

fn futuristic_screen(
    name: &str,
    width: u32,
    height: u32,
    title: &str,
    panels: Vec<PanelSpec>,
) -> SceneSpec {
    let w = width as f32;

    let mut scene = SceneSpec::new(name, width, height, Color::rgb(5, 5, 10))
        .layer(
            HexGridSpec::new(50.0, Color::rgb(15, 25, 40))
                .with_inset(2.0)
                .with_rotation(30.0),
        )
        .layer(RectSpec::filled(Rect::new(0.0, 0.0, w, 80.0), Color::rgb(10, 15, 20)))
        .layer(LineSpec::segment(Point::new(0.0, 80.0), Point::new(w, 80.0), CYAN, 2.0))
        .layer(TextSpec::new(
            title.to_uppercase(),
            40.0,
            HUD_WHITE,
            Anchor::at(40.0, 20.0),
        ))
        .layer(TextSpec::new("SYS: ONLINE", 30.0, GREEN, Anchor::at(w - 200.0, 25.0)));

    for panel in panels {
        scene.push(panel);
    }
    scene
}

// ============================================================================
// Dev
// ============================================================================

/// Resolution label and green corner marks shared by the dev scenes.
fn debug_overlay(scene: SceneSpec) -> SceneSpec {
    let label = format!("{}x{} // DEV_ASSET", scene.width, scene.height);
    let h = scene.height as f32;

    scene
        .layer(BracketSpec {
            corners: vec![Corner::TopLeft, Corner::BottomRight],
            margin: 2.0,
            length: 40.0,
            thickness: 4.0,
            color: DEBUG_GREEN,
        })
        .layer(TextSpec::new(label, 30.0, DEBUG_GREEN, Anchor::at(20.0, h - 50.0)))
}

fn dev_icon() -> SceneSpec {
    let mid = 256.0;
    let accent = Color::rgb(0, 255, 0);

    SceneSpec::new("dev_style_icon", 512, 512, Color::rgb(32, 32, 32))
        .layer(GridSpec::new(64.0, Color::rgb(64, 64, 64)))
        .layer(RectSpec::outlined(
            Rect::new(4.0, 4.0, 504.0, 504.0),
            Color::rgb(255, 0, 255),
            8.0,
        ))
        .layer(LineSpec::segment(
            Point::new(mid - 20.0, mid),
            Point::new(mid + 20.0, mid),
            accent,
            2.0,
        ))
        .layer(LineSpec::segment(
            Point::new(mid, mid - 20.0),
            Point::new(mid, mid + 20.0),
            accent,
            2.0,
        ))
        .layer(TextSpec::new("DEV", 120.0, Color::WHITE, Anchor::centered(0.0, -20.0)))
        .layer(TextSpec::new("BUILD", 40.0, accent, Anchor::center_x(312.0)))
}

fn dev_feature_graphic() -> SceneSpec {
    let scene = SceneSpec::new("feature_graphic", 1024, 500, Color::rgb(10, 10, 15))
        .layer(GridSpec::new(64.0, Color::rgb(0, 40, 80)));

    debug_overlay(scene)
        .layer(TextSpec::new(
            "QA VERIFY & TRACK",
            80.0,
            Color::WHITE,
            Anchor::centered(0.0, -20.0),
        ))
        .layer(TextSpec::new(
            "[ FEATURE_GRAPHIC_PLACEHOLDER ]",
            40.0,
            Color::rgb(0, 255, 255),
            Anchor::centered(0.0, 70.0),
        ))
}

fn dev_mock_screen(name: &str, width: u32, height: u32, title: &str, items: &[&str]) -> SceneSpec {
    const CARD_TOP: f32 = 180.0;
    const CARD_HEIGHT: f32 = 150.0;
    const CARD_GAP: f32 = 20.0;

    let (w, h) = (width as f32, height as f32);
    let card_outline = Color::rgb(100, 100, 100);

    let mut scene = SceneSpec::new(name, width, height, Color::rgb(20, 20, 25))
        .layer(GridSpec::new(128.0, Color::rgb(40, 40, 50)))
        .layer(RectSpec::filled(Rect::new(0.0, 0.0, w, 40.0), Color::BLACK))
        .layer(RectSpec::outlined(
            Rect::new(0.0, 40.0, w, 120.0),
            Color::rgb(0, 200, 255),
            2.0,
        ))
        .layer(TextSpec::new(title, 40.0, Color::WHITE, Anchor::at(40.0, 70.0)));

    for (i, item) in items.iter().enumerate() {
        let y = CARD_TOP + i as f32 * (CARD_HEIGHT + CARD_GAP);
        if y + CARD_HEIGHT > h {
            break;
        }
        scene.push(RectSpec::outlined(
            Rect::new(40.0, y, w - 80.0, CARD_HEIGHT),
            card_outline,
            2.0,
        ));
        scene.push(EllipseSpec::outlined(
            Rect::new(60.0, y + 35.0, 80.0, 80.0),
            card_outline,
            2.0,
        ));
        scene.push(LineSpec::segment(
            Point::new(160.0, y + 50.0),
            Point::new(w - 100.0, y + 50.0),
            Color::rgb(150, 150, 150),
            20.0,
        ));
        scene.push(LineSpec::segment(
            Point::new(160.0, y + 100.0),
            Point::new(w - 200.0, y + 100.0),
            Color::rgb(80, 80, 80),
            15.0,
        ));
        scene.push(TextSpec::new(
            *item,
            40.0,
            Color::rgb(200, 200, 200),
            Anchor::at(160.0, y + 40.0),
        ));
    }

    debug_overlay(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;

    #[test]
    fn each_set_has_six_uniquely_named_scenes() {
        for set in AssetSet::ALL {
            let scenes = set.scenes();
            assert_eq!(scenes.len(), 6, "{set:?}");
            let mut names: Vec<_> = scenes.iter().map(|s| s.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), 6);
        }
    }

    #[test]
    fn store_dimensions() {
        for set in AssetSet::ALL {
            let dims: Vec<_> = set.scenes().iter().map(|s| (s.width, s.height)).collect();
            assert_eq!(
                dims,
                [(512, 512), (1024, 500), (1080, 1920), (1080, 1920), (1280, 800), (1920, 1200)]
            );
        }
    }

    #[test]
    fn mock_cards_stop_at_canvas_bottom() {
        let items = ["Item"; 10];
        let scene = dev_mock_screen("short", 400, 600, "Short", &items);
        let cards = scene
            .layers
            .iter()
            .filter(|l| matches!(l, Layer::Ellipse(_)))
            .count();
        // Cards at 180 and 350 fit; the one at 520 would end at 670
        assert_eq!(cards, 2);

        let scenes = AssetSet::Dev.scenes();
        let phone = scenes.iter().find(|s| s.name == "phone_screenshot_2").unwrap();
        let labels = phone
            .layers
            .iter()
            .filter(|l| matches!(l, Layer::Text(t) if t.anchor == Anchor::at(160.0, 900.0)))
            .count();
        assert_eq!(labels, 1);
    }

    #[test]
    fn asset_set_parses_by_name() {
        assert_eq!("Futuristic".parse::<AssetSet>(), Ok(AssetSet::Futuristic));
        assert_eq!("dev".parse::<AssetSet>(), Ok(AssetSet::Dev));
        assert!("neon".parse::<AssetSet>().is_err());
    }
}
