//! Form Handler
//!
//! The Interactive Demo form: field values, the live preview echo and the
//! confirmation shown after an explicit submit. Values are coerced to their
//! field types but otherwise accepted as typed (no email format checks).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Age shown before the user moves the slider
pub const DEFAULT_AGE: u8 = 25;

/// Slider bounds
pub const MIN_AGE: u8 = 0;
pub const MAX_AGE: u8 = 100;

/// Options of the interests multi-select
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interest {
    Technology,
    Sports,
    Music,
    Art,
    Travel,
    Food,
}

impl Interest {
    pub fn all() -> &'static [Interest] {
        &[
            Interest::Technology,
            Interest::Sports,
            Interest::Music,
            Interest::Art,
            Interest::Travel,
            Interest::Food,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interest::Technology => "Technology",
            Interest::Sports => "Sports",
            Interest::Music => "Music",
            Interest::Art => "Art",
            Interest::Travel => "Travel",
            Interest::Food => "Food",
        }
    }
}

impl FromStr for Interest {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interest::all()
            .iter()
            .copied()
            .find(|i| i.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Current values of the demo form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSubmission {
    pub name: String,
    pub age: u8,
    pub email: String,
    /// Selected interests, in option order
    pub interests: Vec<Interest>,
    pub newsletter: bool,
    /// Whether the submit button triggered this pass
    pub submitted: bool,
}

impl Default for FormSubmission {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: DEFAULT_AGE,
            email: String::new(),
            interests: Vec::new(),
            newsletter: false,
            submitted: false,
        }
    }
}

/// One line of the live preview
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PreviewLine {
    pub label: &'static str,
    pub value: String,
}

impl PreviewLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl FormSubmission {
    /// Build from decoded form fields. Unknown keys and interests are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form = FormSubmission::default();

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "name" => form.name = value.trim().to_string(),
                "email" => form.email = value.trim().to_string(),
                "age" => form.age = coerce_age(value),
                "interests" => {
                    if let Ok(interest) = value.parse::<Interest>() {
                        if !form.interests.contains(&interest) {
                            form.interests.push(interest);
                        }
                    }
                }
                "newsletter" => form.newsletter = crate::nav::parse_flag(value).unwrap_or(true),
                "submit" => form.submitted = true,
                _ => {}
            }
        }

        form.interests.sort();
        form
    }

    /// Live echo of the current values.
    ///
    /// Name, email and interests only appear when non-empty; age and the
    /// newsletter flag always do.
    pub fn preview(&self) -> Vec<PreviewLine> {
        let mut lines = Vec::new();

        if !self.name.is_empty() {
            lines.push(PreviewLine::new("Name", &self.name));
        }
        lines.push(PreviewLine::new("Age", self.age.to_string()));
        if !self.email.is_empty() {
            lines.push(PreviewLine::new("Email", &self.email));
        }
        if !self.interests.is_empty() {
            let joined = self
                .interests
                .iter()
                .map(Interest::label)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(PreviewLine::new("Interests", joined));
        }
        lines.push(PreviewLine::new(
            "Newsletter",
            if self.newsletter { "Yes" } else { "No" },
        ));

        lines
    }

    /// Success message, present only after an explicit submit
    pub fn confirmation(&self) -> Option<String> {
        self.submitted.then(|| {
            format!(
                "Thank you {}! Your information has been submitted.",
                self.name
            )
        })
    }
}

/// Parse the slider value, clamping into range. Non-numbers give the default.
fn coerce_age(value: &str) -> u8 {
    match value.trim().parse::<f64>() {
        Ok(age) if age.is_finite() => age.round().clamp(MIN_AGE as f64, MAX_AGE as f64) as u8,
        _ => DEFAULT_AGE,
    }
}

/// Decode an `application/x-www-form-urlencoded` body, keeping repeated keys
pub fn parse_urlencoded(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
