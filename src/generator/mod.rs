//! Password generation and strength scoring.

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 12;

/// Which character classes a generated password draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub special: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            numbers: true,
            special: true,
        }
    }
}

impl GeneratorOptions {
    /// The pool of characters to draw from.
    ///
    /// Falls back to letters and digits when every class is disabled.
    fn charset(&self) -> Vec<char> {
        let mut pool = String::new();
        if self.lowercase {
            pool.push_str(LOWERCASE);
        }
        if self.uppercase {
            pool.push_str(UPPERCASE);
        }
        if self.numbers {
            pool.push_str(NUMBERS);
        }
        if self.special {
            pool.push_str(SPECIAL);
        }
        if pool.is_empty() {
            pool = format!("{LOWERCASE}{UPPERCASE}{NUMBERS}");
        }
        pool.chars().collect()
    }
}

/// Generate a random password.
pub fn generate_password(options: &GeneratorOptions) -> String {
    let charset = options.charset();
    let mut rng = rand::rng();
    (0..options.length)
        .map(|_| charset[rng.random_range(0..charset.len())])
        .collect()
}

/// Coarse strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthLabel::VeryWeak,
            2 => StrengthLabel::Weak,
            3 => StrengthLabel::Fair,
            4 => StrengthLabel::Strong,
            _ => StrengthLabel::VeryStrong,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrengthLabel::VeryWeak => "Very weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::VeryStrong => "Very strong",
        };
        f.write_str(s)
    }
}

/// Result of `evaluate_strength`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strength {
    /// 0 to 5.
    pub score: u8,
    pub label: StrengthLabel,
    /// Suggestions, one per missing property.
    pub feedback: Vec<String>,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if !self.feedback.is_empty() {
            write!(f, ": {}", self.feedback.join(" "))?;
        }
        Ok(())
    }
}

static HAS_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").expect("valid regex"));
static HAS_LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]").expect("valid regex"));
static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("valid regex"));
static HAS_OTHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("valid regex"));

/// Score a password from 0 to 5 on length and character variety.
///
/// Length earns 1 point at 8+ characters and 2 at 12+; each of
/// uppercase, lowercase, digits and other symbols earns 1.
pub fn evaluate_strength(password: &str) -> Strength {
    let mut score: u8 = 0;
    let mut feedback = Vec::new();

    let len = password.chars().count();
    if len < 8 {
        feedback.push("Password is too short.".to_string());
    } else if len >= 12 {
        score += 2;
    } else {
        score += 1;
    }

    let classes: [(&Regex, &str); 4] = [
        (&*HAS_UPPER, "Add uppercase letters."),
        (&*HAS_LOWER, "Add lowercase letters."),
        (&*HAS_DIGIT, "Add numbers."),
        (&*HAS_OTHER, "Add special characters."),
    ];
    for (pattern, hint) in classes {
        if pattern.is_match(password) {
            score += 1;
        } else {
            feedback.push(hint.to_string());
        }
    }

    let score = score.min(5);
    Strength {
        score,
        label: StrengthLabel::from_score(score),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_and_charset() {
        let pw = generate_password(&GeneratorOptions::default());
        assert_eq!(pw.chars().count(), DEFAULT_LENGTH);
    }

    #[test]
    fn respects_disabled_classes() {
        let opts = GeneratorOptions {
            length: 64,
            uppercase: false,
            lowercase: false,
            numbers: true,
            special: false,
        };
        let pw = generate_password(&opts);
        assert_eq!(pw.len(), 64);
        assert!(pw.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn all_classes_disabled_falls_back_to_alphanumeric() {
        let opts = GeneratorOptions {
            length: 32,
            uppercase: false,
            lowercase: false,
            numbers: false,
            special: false,
        };
        let pw = generate_password(&opts);
        assert_eq!(pw.len(), 32);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn zero_length_is_empty() {
        let opts = GeneratorOptions {
            length: 0,
            ..GeneratorOptions::default()
        };
        assert!(generate_password(&opts).is_empty());
    }

    #[test]
    fn strength_scores() {
        let weak = evaluate_strength("abc");
        assert_eq!(weak.score, 1);
        assert_eq!(weak.label, StrengthLabel::VeryWeak);
        assert!(weak.feedback.contains(&"Password is too short.".to_string()));

        let fair = evaluate_strength("abcdefgh1");
        assert_eq!(fair.score, 3);
        assert_eq!(fair.label, StrengthLabel::Fair);

        let strong = evaluate_strength("Abcdefgh1!");
        assert_eq!(strong.score, 5);
        assert_eq!(strong.label, StrengthLabel::VeryStrong);
        assert!(strong.feedback.is_empty());

        // Capped at 5 even with the long-length bonus.
        assert_eq!(evaluate_strength("Abcdefghijk1!").score, 5);
    }

    #[test]
    fn display_joins_feedback() {
        let s = evaluate_strength("password");
        assert_eq!(
            s.to_string(),
            "Weak: Add uppercase letters. Add numbers. Add special characters."
        );
    }
}
