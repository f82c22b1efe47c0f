//! Die names and face labels.
//!
//! | name                   | kind                     | faces        |
//! |------------------------|--------------------------|--------------|
//! | `d0`                   | percentile, 1 digit      | 10           |
//! | `d%`, `d%%`, …         | percentile, n+1 digits   | 10^(n+1)     |
//! | `d00`, `d000`, …       | percentile, n digits     | 10^n         |
//! | `d66`, `d444`, …       | digit die                | d^n          |
//! | `dN`                   | linear                   | N            |
//!
//! Digit dice read one physical die per position. Percentile dice use the
//! digits 0-9 and the all-zero roll counts as the highest face.

use std::fmt;

use thiserror::Error;

pub const DICE_STANDARD: &[&str] = &["d4", "d6", "d8", "d10", "d12", "d20"];

pub const DICE_EXTENDED: &[&str] = &[
    "d3", "d4", "d5", "d6", "d7", "d8", "d10", "d12", "d14", "d16", "d20", "d24", "d30",
];

pub const DICE_ALL: &[&str] = &[
    "d3", "d4", "d5", "d6", "d7", "d8", "d9", "d10", "d11", "d12", "d13", "d14", "d15", "d16",
    "d18", "d20", "d22", "d24", "d30",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DieError {
    #[error("Die type not supported: {0}")]
    Unsupported(String),

    #[error("die {0} has more faces than supported")]
    TooLarge(String),
}

/// How faces of a die are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieSpec {
    Linear(u32),
    Digit { digit: u8, digits: u32 },
    Percentile { digits: u32 },
}

/// A parsed die: its name as given, its numbering, and its face count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Die {
    pub name: String,
    pub spec: DieSpec,
    pub size: u32,
}

impl Die {
    pub fn parse(name: &str) -> Result<Die, DieError> {
        let unsupported = || DieError::Unsupported(name.to_string());
        let too_large = || DieError::TooLarge(name.to_string());

        let rest = name.strip_prefix('d').ok_or_else(unsupported)?;
        if rest.is_empty() {
            return Err(unsupported());
        }

        let spec = if rest == "0" {
            DieSpec::Percentile { digits: 1 }
        } else if rest.bytes().all(|b| b == b'%') {
            let digits = u32::try_from(rest.len() + 1).map_err(|_| too_large())?;
            DieSpec::Percentile { digits }
        } else if rest.bytes().all(|b| b.is_ascii_digit()) {
            let first = rest.as_bytes()[0];
            if rest.len() > 1 && rest.bytes().all(|b| b == first) {
                let digits = u32::try_from(rest.len()).map_err(|_| too_large())?;
                match first - b'0' {
                    0 => DieSpec::Percentile { digits },
                    digit => DieSpec::Digit { digit, digits },
                }
            } else {
                DieSpec::Linear(rest.parse().map_err(|_| too_large())?)
            }
        } else {
            return Err(unsupported());
        };

        let size = spec.face_count().ok_or_else(too_large)?;
        Ok(Die { name: name.to_string(), spec, size })
    }

    /// Label printed for `face` (1-based, `1..=size`).
    pub fn face_label(&self, face: u32) -> String {
        match self.spec {
            DieSpec::Linear(_) => face.to_string(),
            DieSpec::Digit { digit, digits } => {
                positional(face - 1, u32::from(digit), digits, 1)
            }
            DieSpec::Percentile { digits } => positional(face % self.size, 10, digits, 0),
        }
    }
}

impl DieSpec {
    /// Number of faces, or `None` when it does not fit in `u32`.
    pub fn face_count(&self) -> Option<u32> {
        match *self {
            DieSpec::Linear(n) => Some(n),
            DieSpec::Digit { digit, digits } => u32::from(digit).checked_pow(digits),
            DieSpec::Percentile { digits } => 10u32.checked_pow(digits),
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// `index` written in `base` with exactly `width` digits, each shifted by `offset`.
fn positional(mut index: u32, base: u32, width: u32, offset: u32) -> String {
    let mut out = vec![b'0'; width as usize];
    for slot in out.iter_mut().rev() {
        // base ≤ 10 and offset ≤ 1, so every digit is a single ASCII char.
        *slot = b'0' + (index % base + offset) as u8;
        index /= base;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Replace `standard`, `extended` and `all` with their dice, keeping order.
pub fn expand_aliases<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        match name.as_ref() {
            "standard" => out.extend(DICE_STANDARD.iter().map(|s| s.to_string())),
            "extended" => out.extend(DICE_EXTENDED.iter().map(|s| s.to_string())),
            "all" => out.extend(DICE_ALL.iter().map(|s| s.to_string())),
            other => out.push(other.to_string()),
        }
    }
    out
}

/// Expand aliases and parse every name; the first bad name fails the lot.
pub fn parse_dice<S: AsRef<str>>(names: &[S]) -> Result<Vec<Die>, DieError> {
    expand_aliases(names).iter().map(|n| Die::parse(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> DieSpec {
        Die::parse(name).unwrap().spec
    }

    fn size(name: &str) -> u32 {
        Die::parse(name).unwrap().size
    }

    #[test]
    fn linear_dice() {
        assert_eq!(spec("d6"), DieSpec::Linear(6));
        assert_eq!(spec("d20"), DieSpec::Linear(20));
        assert_eq!(spec("d100"), DieSpec::Linear(100));
        assert_eq!(spec("d1"), DieSpec::Linear(1));
        assert_eq!(size("d12"), 12);
    }

    #[test]
    fn percentile_dice() {
        assert_eq!(spec("d0"), DieSpec::Percentile { digits: 1 });
        assert_eq!(spec("d%"), DieSpec::Percentile { digits: 2 });
        assert_eq!(spec("d%%"), DieSpec::Percentile { digits: 3 });
        assert_eq!(spec("d00"), DieSpec::Percentile { digits: 2 });
        assert_eq!(size("d0"), 10);
        assert_eq!(size("d%"), 100);
        assert_eq!(size("d000"), 1000);
    }

    #[test]
    fn digit_dice() {
        assert_eq!(spec("d66"), DieSpec::Digit { digit: 6, digits: 2 });
        assert_eq!(spec("d444"), DieSpec::Digit { digit: 4, digits: 3 });
        assert_eq!(size("d66"), 36);
        assert_eq!(size("d444"), 64);
        // Mixed digits are an ordinary linear die.
        assert_eq!(spec("d64"), DieSpec::Linear(64));
    }

    #[test]
    fn unsupported_and_oversized_names() {
        for bad in ["6", "d", "dx", "d6x", "D6", "d-4", "2d6", "d%6"] {
            assert_eq!(Die::parse(bad), Err(DieError::Unsupported(bad.to_string())), "{bad}");
        }
        assert!(matches!(Die::parse("d99999999999"), Err(DieError::TooLarge(_))));
        assert!(matches!(Die::parse("d%%%%%%%%%%"), Err(DieError::TooLarge(_))));
        assert!(matches!(Die::parse("d12345678901"), Err(DieError::TooLarge(_))));
    }

    #[test]
    fn digit_die_labels() {
        let d66 = Die::parse("d66").unwrap();
        assert_eq!(d66.face_label(1), "11");
        assert_eq!(d66.face_label(6), "16");
        assert_eq!(d66.face_label(7), "21");
        assert_eq!(d66.face_label(36), "66");
    }

    #[test]
    fn percentile_labels_put_zero_last() {
        let pct = Die::parse("d%").unwrap();
        assert_eq!(pct.face_label(1), "01");
        assert_eq!(pct.face_label(42), "42");
        assert_eq!(pct.face_label(99), "99");
        assert_eq!(pct.face_label(100), "00");

        let d0 = Die::parse("d0").unwrap();
        assert_eq!(d0.face_label(1), "1");
        assert_eq!(d0.face_label(10), "0");
    }

    #[test]
    fn linear_labels_are_face_numbers() {
        let d20 = Die::parse("d20").unwrap();
        assert_eq!(d20.face_label(1), "1");
        assert_eq!(d20.face_label(20), "20");
    }

    #[test]
    fn aliases_expand_in_place() {
        assert_eq!(expand_aliases(&["standard"]), vec!["d4", "d6", "d8", "d10", "d12", "d20"]);
        assert_eq!(expand_aliases(&["d66", "standard", "d%"]).len(), 8);
        assert_eq!(expand_aliases(&["extended"]).len(), 13);
        assert_eq!(expand_aliases(&["all"]).len(), 19);
    }

    #[test]
    fn parse_dice_fails_on_first_bad_name() {
        let dice = parse_dice(&["standard", "d66"]).unwrap();
        assert_eq!(dice.len(), 7);
        assert_eq!(dice[6].name, "d66");
        assert_eq!(
            parse_dice(&["d6", "bogus", "d8"]),
            Err(DieError::Unsupported("bogus".into()))
        );
    }
}
