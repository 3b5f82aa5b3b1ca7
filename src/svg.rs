use crate::reading::Reading;
use crate::state::AppState;

const START_Y: i32 = 40;
const LINE_HEIGHT: i32 = 28;
const CARD_WIDTH: f32 = 400.0;
const CARD_PADDING: f32 = 50.0;
const CHAR_WIDTH: f32 = 9.6;

const BIRTHDAY_ORANGE: &str = "#ff9800";
const COUNTDOWN_PURPLE: &str = "#673ab7";
const CELEBRATION_COLORS: [&str; 3] = [BIRTHDAY_ORANGE, "#e91e63", "#2196f3"];
const CELEBRATION_RADIUS: f32 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub label: &'static str,
    pub accent: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#1c1b1f",
                card: "#2b2930",
                text: "#e6e1e5",
                label: "#cac4d0",
                accent: "#d0bcff",
            },
            Theme::Light => ThemeColors {
                bg: "#fffbfe",
                card: "#f3edf7",
                text: "#1c1b1f",
                label: "#49454f",
                accent: COUNTDOWN_PURPLE,
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "age_card_dark.svg",
            Theme::Light => "age_card_light.svg",
        }
    }
}

// Utilities for building SVG content

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

enum Line {
    Title(String),
    Label(String),
    Big(String),
    Value(String),
    Countdown { text: String, color: &'static str },
    Blank,
}

impl Line {
    fn font_size(&self) -> u32 {
        match self {
            Line::Big(_) => 48,
            Line::Value(_) => 32,
            Line::Countdown { .. } | Line::Title(_) => 24,
            Line::Label(_) | Line::Blank => 16,
        }
    }

    fn height(&self) -> i32 {
        match self {
            Line::Big(_) => LINE_HEIGHT * 2,
            Line::Value(_) => LINE_HEIGHT + 12,
            _ => LINE_HEIGHT,
        }
    }
}

fn card_lines(reading: Option<&Reading>) -> Vec<Line> {
    let (date, years, months, days, countdown, color) = match reading {
        Some(r) => (
            r.formatted_birth_date(),
            r.age.years.to_string(),
            r.months_label(),
            r.days_label(),
            r.countdown_label(),
            if r.is_birthday() { BIRTHDAY_ORANGE } else { COUNTDOWN_PURPLE },
        ),
        None => (
            "Select your birth date".to_string(),
            "--".to_string(),
            "--".to_string(),
            "--".to_string(),
            "--".to_string(),
            COUNTDOWN_PURPLE,
        ),
    };

    vec![
        Line::Title("Age Calculator".to_string()),
        Line::Label(date),
        Line::Blank,
        Line::Label("AGE".to_string()),
        Line::Big(years),
        Line::Value(months),
        Line::Value(days),
        Line::Blank,
        Line::Label("Days until next birthday:".to_string()),
        Line::Countdown {
            text: countdown,
            color,
        },
    ]
}

fn build_celebration_row(y: f32) -> String {
    let center = CARD_WIDTH / 2.0;
    let spacing = 50.0;

    CELEBRATION_COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let cx = center + (i as f32 - 1.0) * spacing;
            format!(
                r#"<circle class="celebration" cx="{cx}" cy="{y}" r="{CELEBRATION_RADIUS}" fill="{color}"/>
"#
            )
        })
        .collect()
}

/// Main SVG generation function
pub fn generate_svg(state: &AppState, theme: Theme) -> String {
    let colors = theme.colors();
    let lines = card_lines(state.reading.as_ref());
    let center = CARD_WIDTH / 2.0;

    let mut text = String::new();
    let mut y = START_Y;
    for line in &lines {
        let size = line.font_size();
        match line {
            Line::Blank => {}
            Line::Title(s) | Line::Label(s) => {
                text.push_str(&format!(
                    r#"<text x="{center}" y="{y}" font-size="{size}px" fill="{}" text-anchor="middle">{}</text>
"#,
                    colors.label,
                    escape_xml(s)
                ));
            }
            Line::Big(s) | Line::Value(s) => {
                let weight = if matches!(line, Line::Big(_)) { "bold" } else { "normal" };
                text.push_str(&format!(
                    r#"<text x="{center}" y="{y}" font-size="{size}px" font-weight="{weight}" fill="{}" text-anchor="middle">{}</text>
"#,
                    colors.text,
                    escape_xml(s)
                ));
            }
            Line::Countdown { text: s, color } => {
                text.push_str(&format!(
                    r#"<text class="countdown" x="{center}" y="{y}" font-size="{size}px" fill="{color}" text-anchor="middle">{}</text>
"#,
                    escape_xml(s)
                ));
            }
        }
        y += line.height();
    }

    // The card starts under the birth date and ends half a padding below
    // the countdown; everything else is laid out from its edges.
    let card_y = START_Y as f32 + LINE_HEIGHT as f32 * 1.5;
    let card_bottom = y as f32 + CARD_PADDING / 2.0;
    let card_h = card_bottom - card_y;

    let (celebration, content_bottom) = if state.celebration_visible {
        let cy = card_bottom + LINE_HEIGHT as f32 + CELEBRATION_RADIUS;
        (build_celebration_row(cy), cy + CELEBRATION_RADIUS)
    } else {
        (String::new(), card_bottom)
    };

    // Widen the card if a label would overflow it
    let widest = lines
        .iter()
        .map(|l| match l {
            Line::Title(s) | Line::Label(s) | Line::Big(s) | Line::Value(s) => s.chars().count(),
            Line::Countdown { text, .. } => text.chars().count(),
            Line::Blank => 0,
        })
        .max()
        .unwrap_or(0);
    let w = CARD_WIDTH.max(widest as f32 * CHAR_WIDTH * 1.5 + CARD_PADDING);
    let h = content_bottom + CARD_PADDING / 2.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="Roboto,Helvetica,sans-serif">

<rect width="{w}px" height="{h}px" fill="{bg}"/>
<rect x="{card_x}" y="{card_y}" width="{card_w}px" height="{card_h}px" fill="{card}" stroke="{accent}" rx="15"/>

<!-- AGE CARD -->
{text}
<!-- CELEBRATION -->
{celebration}
</svg>
"#,
        bg = colors.bg,
        card = colors.card,
        accent = colors.accent,
        card_x = CARD_PADDING / 2.0,
        card_w = w - CARD_PADDING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Event, update};
    use chrono::NaiveDate;

    fn state_for(birth: (i32, u32, u32), today: (i32, u32, u32)) -> AppState {
        let event = Event::DatePicked {
            birth_date: NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2).unwrap(),
            today: NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap(),
        };
        update(AppState::default(), event).unwrap().0
    }

    #[test]
    fn empty_card_shows_placeholders() {
        let svg = generate_svg(&AppState::default(), Theme::Dark);
        assert!(svg.contains("Select your birth date"));
        assert!(svg.contains(">--</text>"));
        assert!(!svg.contains("class=\"celebration\""));
    }

    #[test]
    fn birthday_card_is_orange_and_celebrates() {
        let state = state_for((2000, 3, 15), (2024, 3, 15));
        let svg = generate_svg(&state, Theme::Light);
        assert!(svg.contains("March 15, 2000"));
        assert!(svg.contains("Happy Birthday!"));
        assert!(svg.contains(&format!("fill=\"{BIRTHDAY_ORANGE}\" text-anchor=\"middle\">0 days")));
        assert_eq!(svg.matches("class=\"celebration\"").count(), 3);
    }

    #[test]
    fn hidden_celebration_is_not_drawn() {
        let state = state_for((2000, 3, 15), (2024, 3, 15));
        let (state, _) = update(state, Event::CelebrationExpired).unwrap();
        let svg = generate_svg(&state, Theme::Dark);
        assert!(svg.contains("Happy Birthday!"));
        assert!(!svg.contains("class=\"celebration\""));
    }

    #[test]
    fn ordinary_day_uses_purple_countdown() {
        let state = state_for((2000, 3, 15), (2024, 3, 16));
        let svg = generate_svg(&state, Theme::Dark);
        assert!(svg.contains(&format!("fill=\"{COUNTDOWN_PURPLE}\" text-anchor=\"middle\">364 days")));
        assert!(svg.contains(">24</text>"));
        assert!(svg.contains(">0 months</text>"));
        assert!(svg.contains(">1 days</text>"));
    }

    fn number_after(haystack: &str, key: &str) -> f32 {
        let start = haystack.find(key).unwrap() + key.len();
        let rest = &haystack[start..];
        let end = rest.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap();
        rest[..end].parse().unwrap()
    }

    fn assert_fits(svg: &str) {
        let height = number_after(svg, "height=\"");
        let card = &svg[svg.find("<rect x=").unwrap()..];
        let card_bottom = number_after(card, " y=\"") + number_after(card, "height=\"");
        assert!(card_bottom <= height, "card bottom {card_bottom} exceeds svg height {height}");

        for (i, _) in svg.match_indices("<circle") {
            let circle = &svg[i..];
            let bottom = number_after(circle, "cy=\"") + number_after(circle, " r=\"");
            assert!(bottom <= height, "celebration bottom {bottom} exceeds svg height {height}");
            assert!(number_after(circle, "cy=\"") - CELEBRATION_RADIUS >= card_bottom);
        }
    }

    #[test]
    fn card_fits_inside_image() {
        assert_fits(&generate_svg(&AppState::default(), Theme::Light));
        assert_fits(&generate_svg(&state_for((2000, 3, 15), (2024, 3, 16)), Theme::Dark));
        assert_fits(&generate_svg(&state_for((2000, 3, 15), (2024, 3, 15)), Theme::Dark));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn themes_have_distinct_files() {
        assert_ne!(Theme::Dark.file_name(), Theme::Light.file_name());
    }
}
