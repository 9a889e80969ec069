// File: crates/chart-core/src/theme.rs
// Summary: Report themes: surface colors plus the series palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    /// Series colors, cycled in series order.
    pub palette: [skia::Color; 8],
    /// Alpha applied to the palette color for area fills.
    pub area_alpha: u8,
}

fn rgb(r: u8, g: u8, b: u8) -> skia::Color {
    skia::Color::from_argb(255, r, g, b)
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: rgb(255, 255, 255),
            grid: rgb(228, 228, 232),
            axis_line: rgb(60, 60, 70),
            axis_label: rgb(20, 20, 30),
            tick: rgb(90, 90, 100),
            title: rgb(10, 10, 20),
            palette: [
                rgb(31, 119, 180),
                rgb(255, 127, 14),
                rgb(44, 160, 44),
                rgb(214, 39, 40),
                rgb(148, 103, 189),
                rgb(140, 86, 75),
                rgb(227, 119, 194),
                rgb(23, 190, 207),
            ],
            area_alpha: 96,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: rgb(18, 18, 20),
            grid: rgb(40, 40, 45),
            axis_line: rgb(180, 180, 190),
            axis_label: rgb(235, 235, 245),
            tick: rgb(150, 150, 160),
            title: rgb(245, 245, 250),
            palette: [
                rgb(64, 160, 255),
                rgb(255, 170, 60),
                rgb(40, 200, 120),
                rgb(220, 80, 80),
                rgb(180, 140, 255),
                rgb(255, 230, 70),
                rgb(255, 120, 200),
                rgb(80, 220, 220),
            ],
            area_alpha: 96,
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: rgb(0xfd, 0xf6, 0xe3), // base3
            grid: rgb(0xee, 0xe8, 0xd5),       // base2
            axis_line: rgb(0x65, 0x7b, 0x83),  // base00
            axis_label: rgb(0x00, 0x2b, 0x36), // base03
            tick: rgb(0x58, 0x6e, 0x75),       // base01
            title: rgb(0x00, 0x2b, 0x36),
            palette: [
                rgb(0x26, 0x8b, 0xd2), // blue
                rgb(0xcb, 0x4b, 0x16), // orange
                rgb(0x85, 0x99, 0x00), // green
                rgb(0xdc, 0x32, 0x2f), // red
                rgb(0x6c, 0x71, 0xc4), // violet
                rgb(0xb5, 0x89, 0x00), // yellow
                rgb(0xd3, 0x36, 0x82), // magenta
                rgb(0x2a, 0xa1, 0x98), // cyan
            ],
            area_alpha: 80,
        }
    }

    /// Color for the series at `index`.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::solarized_light()]
}

/// Find a theme by its `name`, ignoring case.
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
