//! Star rating breakdown for popularity scores

/// Highest possible score, and the number of star slots
pub const MAX_STARS: u8 = 5;

pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '⯪';
pub const EMPTY_STAR: char = '☆';

/// How a score splits into full, half and empty stars.
///
/// The three parts always add up to [`MAX_STARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl Stars {
    /// Break a score down into stars. Scores outside `[0, 5]` are clamped and
    /// non-finite scores count as 0.
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, MAX_STARS as f64)
        } else {
            0.0
        };

        let full = score.floor() as u8;
        let half = score.fract() >= 0.5;
        let empty = MAX_STARS - full - half as u8;

        Self { full, half, empty }
    }

    /// Glyphs split into the earned part (full and half stars) and the
    /// empty remainder, so each can be styled on its own
    pub fn split_glyphs(&self) -> (String, String) {
        let mut earned: String = std::iter::repeat(FULL_STAR).take(self.full as usize).collect();
        if self.half {
            earned.push(HALF_STAR);
        }
        let empty = std::iter::repeat(EMPTY_STAR).take(self.empty as usize).collect();
        (earned, empty)
    }

    /// Stars as a glyph string, full stars first
    pub fn glyphs(&self) -> String {
        let (earned, empty) = self.split_glyphs();
        earned + &empty
    }
}

/// Parse a formatted score from its leading number, so `"4.5/5"` reads as
/// 4.5. Absent or unparseable input reads as 0.
pub fn parse_score(raw: Option<&str>) -> f64 {
    raw.and_then(|s| leading_number(s.trim_start()).parse::<f64>().ok())
        .filter(|score| score.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of `s` shaped like a decimal number: optional sign,
/// digits, an optional fraction and an optional exponent
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut seen_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if seen_digits || frac_end > end + 1 {
            seen_digits = true;
            end = frac_end;
        }
    }

    if !seen_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}
