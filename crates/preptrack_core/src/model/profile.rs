//! Profile domain model.
//!
//! The profile is display metadata only. It never influences progress and is
//! persisted independently from the catalog.

use serde::{Deserialize, Serialize};

/// Picture shown when the profile has no picture URL.
pub const PLACEHOLDER_PICTURE_URL: &str = "https://via.placeholder.com/80";

const DEFAULT_PROFILE_NAME: &str = "Srikar";

/// External profile links, all stored as free-form URL strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileLinks {
    pub github: String,
    pub linkedin: String,
    pub leetcode: String,
    pub gfg: String,
}

/// User identity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub picture: String,
    pub links: ProfileLinks,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            picture: String::new(),
            links: ProfileLinks::default(),
        }
    }
}

/// Editable top-level profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Picture,
}

/// Editable profile link slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Github,
    Linkedin,
    Leetcode,
    Gfg,
}

impl ProfileField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "picture" => Some(Self::Picture),
            _ => None,
        }
    }
}

impl LinkKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "github" => Some(Self::Github),
            "linkedin" => Some(Self::Linkedin),
            "leetcode" => Some(Self::Leetcode),
            "gfg" => Some(Self::Gfg),
            _ => None,
        }
    }
}

impl Profile {
    /// Returns a copy with one top-level field replaced verbatim.
    pub fn with_field(&self, field: ProfileField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        match field {
            ProfileField::Name => next.name = value.into(),
            ProfileField::Picture => next.picture = value.into(),
        }
        next
    }

    /// Returns a copy with one link replaced verbatim.
    pub fn with_link(&self, kind: LinkKind, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match kind {
            LinkKind::Github => &mut next.links.github,
            LinkKind::Linkedin => &mut next.links.linkedin,
            LinkKind::Leetcode => &mut next.links.leetcode,
            LinkKind::Gfg => &mut next.links.gfg,
        };
        *slot = value.into();
        next
    }

    /// Picture URL to render, falling back to a placeholder when unset.
    pub fn display_picture(&self) -> &str {
        if self.picture.trim().is_empty() {
            PLACEHOLDER_PICTURE_URL
        } else {
            self.picture.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkKind, Profile, ProfileField, PLACEHOLDER_PICTURE_URL};

    #[test]
    fn updates_leave_original_untouched() {
        let original = Profile::default();
        let renamed = original.with_field(ProfileField::Name, "Ada");
        let linked = renamed.with_link(LinkKind::Gfg, "https://gfg.example/ada");

        assert_eq!(original.name, "Srikar");
        assert_eq!(renamed.name, "Ada");
        assert_eq!(linked.links.gfg, "https://gfg.example/ada");
        assert!(renamed.links.gfg.is_empty());
    }

    #[test]
    fn display_picture_falls_back_to_placeholder() {
        let profile = Profile::default();
        assert_eq!(profile.display_picture(), PLACEHOLDER_PICTURE_URL);

        let with_picture = profile.with_field(ProfileField::Picture, "https://img/me.png");
        assert_eq!(with_picture.display_picture(), "https://img/me.png");
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!(ProfileField::parse(" Name "), Some(ProfileField::Name));
        assert_eq!(LinkKind::parse("LinkedIn"), Some(LinkKind::Linkedin));
        assert_eq!(LinkKind::parse("twitter"), None);
    }
}
