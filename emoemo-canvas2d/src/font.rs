//! Structured font descriptors.
//!
//! Text drawing takes a [`FontDescriptor`] value instead of a CSS font
//! shorthand. The only string parsing left is splitting a CSS family list
//! such as `"'Noto Sans JP', sans-serif"` into its names.

/// Font used for text measurement and drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font families in order of preference.
    pub families: Vec<String>,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font weight (100-900).
    pub weight: u16,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            families: vec!["sans-serif".to_string()],
            size_px: 10.0,
            weight: 400,
        }
    }
}

impl FontDescriptor {
    /// Create a descriptor with normal weight.
    pub fn new<I, S>(families: I, size_px: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let families: Vec<String> = families.into_iter().map(Into::into).collect();
        Self {
            families: if families.is_empty() {
                vec!["sans-serif".to_string()]
            } else {
                families
            },
            size_px,
            weight: 400,
        }
    }

    /// Create a descriptor from a CSS family list string.
    pub fn from_family_list(family_list: &str, size_px: f32) -> Self {
        Self::new(parse_family_list(family_list), size_px)
    }

    /// Set the weight, clamped to the 100-900 range.
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight.clamp(100, 900);
        self
    }

    /// Same families and weight at a different size.
    pub fn with_size(&self, size_px: f32) -> Self {
        Self {
            families: self.families.clone(),
            size_px,
            weight: self.weight,
        }
    }
}

/// Parse a CSS font family list.
///
/// Quoted names keep their inner spaces; unquoted names are trimmed. An empty
/// list resolves to `sans-serif`.
pub fn parse_family_list(s: &str) -> Vec<String> {
    let mut families = Vec::new();
    let mut remaining = s.trim();

    while !remaining.is_empty() {
        let (family, rest) = parse_single_family(remaining);
        if !family.is_empty() {
            families.push(family);
        }
        remaining = rest.trim_start();
        if let Some(rest) = remaining.strip_prefix(',') {
            remaining = rest.trim_start();
        } else {
            break;
        }
    }

    if families.is_empty() {
        families.push("sans-serif".to_string());
    }

    families
}

/// Parse a single font family name.
fn parse_single_family(s: &str) -> (String, &str) {
    let s = s.trim_start();

    if let Some(quote) = s.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let body = &s[1..];
        return match body.find(quote) {
            Some(end) => (body[..end].trim().to_string(), &body[end + 1..]),
            // Unterminated quote: take the rest of the string.
            None => (body.trim().to_string(), ""),
        };
    }

    // Unquoted family name - ends at comma or end of string
    let end = s.find(',').unwrap_or(s.len());
    let family = s[..end].trim().to_string();
    (family, &s[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Arial", vec!["Arial"])]
    #[case("'Noto Sans JP'", vec!["Noto Sans JP"])]
    #[case("\"M PLUS Rounded 1c\", sans-serif", vec!["M PLUS Rounded 1c", "sans-serif"])]
    #[case("Arial, Helvetica, sans-serif", vec!["Arial", "Helvetica", "sans-serif"])]
    #[case("  'Hachi Maru Pop'  ,serif", vec!["Hachi Maru Pop", "serif"])]
    #[case("", vec!["sans-serif"])]
    #[case("'unterminated", vec!["unterminated"])]
    fn test_parse_family_list(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_family_list(input), expected);
    }

    #[test]
    fn test_descriptor_weight_clamped() {
        let font = FontDescriptor::new(["Arial"], 12.0).with_weight(1200);
        assert_eq!(font.weight, 900);
        let font = font.with_weight(0);
        assert_eq!(font.weight, 100);
    }

    #[test]
    fn test_with_size_keeps_families_and_weight() {
        let font = FontDescriptor::from_family_list("'Noto Sans JP'", 10.0).with_weight(700);
        let bigger = font.with_size(192.0);
        assert_eq!(bigger.families, vec!["Noto Sans JP"]);
        assert_eq!(bigger.weight, 700);
        assert_eq!(bigger.size_px, 192.0);
    }

    #[test]
    fn test_empty_families_default_to_sans_serif() {
        let font = FontDescriptor::new(Vec::<String>::new(), 12.0);
        assert_eq!(font.families, vec!["sans-serif"]);
    }
}
