//! Closed registry of component tags the scanner can look for.
//!
//! Every tag has a stable string key. The keys are persisted in user prefs
//! and appear in scene documents, so they must never change across releases;
//! add new variants at the end of [`ComponentTag::ALL`] instead of renaming.

use phf::phf_map;

use crate::color::Color;
use crate::error::UnknownTag;

/// One class of attachable component, plus the [`LinkedRoot`](ComponentTag::LinkedRoot)
/// sentinel standing in for "root of an externally-linked sub-hierarchy".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentTag {
    AimConstraint,
    LookAtConstraint,
    ParentConstraint,
    PositionConstraint,
    RotationConstraint,
    ScaleConstraint,
    SkinnedMeshRenderer,
    AudioSource,
    PhysBoneCollider,
    PhysBone,
    ContactSender,
    ContactReceiver,
    Light,
    ParticleSystem,
    /// Sentinel: not a real component. Emitted for outermost linked-instance
    /// roots when a scan asks for them; never part of [`ComponentTag::ALL`].
    LinkedRoot,
}

/// Display metadata for one tag.
#[derive(Clone, Copy, Debug)]
pub struct TagInfo {
    pub label: &'static str,
    pub color: Color,
}

static TAG_INFO: phf::Map<&'static str, TagInfo> = phf_map! {
    "AimConstraint" => TagInfo { label: "Aim Constraint", color: Color::MAGENTA },
    "LookAtConstraint" => TagInfo { label: "LookAt Constraint", color: Color::MAGENTA },
    "ParentConstraint" => TagInfo { label: "Parent Constraint", color: Color::MAGENTA },
    "PositionConstraint" => TagInfo { label: "Position Constraint", color: Color::MAGENTA },
    "RotationConstraint" => TagInfo { label: "Rotation Constraint", color: Color::MAGENTA },
    "ScaleConstraint" => TagInfo { label: "Scale Constraint", color: Color::MAGENTA },
    "SkinnedMeshRenderer" => TagInfo { label: "Skinned Mesh Renderer", color: Color::BLUE },
    "AudioSource" => TagInfo { label: "Audio Source", color: Color::YELLOW },
    "PhysBoneCollider" => TagInfo { label: "PhysBone Collider", color: Color::CYAN },
    "PhysBone" => TagInfo { label: "PhysBone", color: Color::CYAN },
    "ContactSender" => TagInfo { label: "Contact Sender", color: Color::CYAN },
    "ContactReceiver" => TagInfo { label: "Contact Receiver", color: Color::CYAN },
    "Light" => TagInfo { label: "Light", color: Color::YELLOW },
    "ParticleSystem" => TagInfo { label: "Particle System", color: Color::CYAN },
    "LinkedRoot" => TagInfo { label: "Linked Root", color: Color::CYAN },
};

impl ComponentTag {
    /// Every real tag, in the fixed registry order scans iterate in.
    /// The sentinel is deliberately absent.
    pub const ALL: [ComponentTag; 14] = [
        ComponentTag::AimConstraint,
        ComponentTag::LookAtConstraint,
        ComponentTag::ParentConstraint,
        ComponentTag::PositionConstraint,
        ComponentTag::RotationConstraint,
        ComponentTag::ScaleConstraint,
        ComponentTag::SkinnedMeshRenderer,
        ComponentTag::AudioSource,
        ComponentTag::PhysBoneCollider,
        ComponentTag::PhysBone,
        ComponentTag::ContactSender,
        ComponentTag::ContactReceiver,
        ComponentTag::Light,
        ComponentTag::ParticleSystem,
    ];

    /// Stable identifier, used as the prefs/document key.
    pub const fn key(self) -> &'static str {
        match self {
            ComponentTag::AimConstraint => "AimConstraint",
            ComponentTag::LookAtConstraint => "LookAtConstraint",
            ComponentTag::ParentConstraint => "ParentConstraint",
            ComponentTag::PositionConstraint => "PositionConstraint",
            ComponentTag::RotationConstraint => "RotationConstraint",
            ComponentTag::ScaleConstraint => "ScaleConstraint",
            ComponentTag::SkinnedMeshRenderer => "SkinnedMeshRenderer",
            ComponentTag::AudioSource => "AudioSource",
            ComponentTag::PhysBoneCollider => "PhysBoneCollider",
            ComponentTag::PhysBone => "PhysBone",
            ComponentTag::ContactSender => "ContactSender",
            ComponentTag::ContactReceiver => "ContactReceiver",
            ComponentTag::Light => "Light",
            ComponentTag::ParticleSystem => "ParticleSystem",
            ComponentTag::LinkedRoot => "LinkedRoot",
        }
    }

    /// Resolve a stable key back to its tag.
    pub fn parse(key: &str) -> Result<ComponentTag, UnknownTag> {
        if key == ComponentTag::LinkedRoot.key() {
            return Ok(ComponentTag::LinkedRoot);
        }
        ComponentTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.key() == key)
            .ok_or_else(|| UnknownTag(key.to_string()))
    }

    pub const fn is_sentinel(self) -> bool {
        matches!(self, ComponentTag::LinkedRoot)
    }
}

/// Look up display metadata for a tag.
/// Succeeds for every tag in [`ComponentTag::ALL`] and the sentinel.
pub fn display_info(tag: ComponentTag) -> Result<&'static TagInfo, UnknownTag> {
    TAG_INFO
        .get(tag.key())
        .ok_or_else(|| UnknownTag(tag.key().to_string()))
}

/// Registry-level default selection: every real tag starts selected.
/// The sentinel is driven by the `include_linked_roots` flag, not per-tag state.
pub const fn default_selected(tag: ComponentTag) -> bool {
    !tag.is_sentinel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_has_display_info() {
        for tag in ComponentTag::ALL {
            let info = display_info(tag).unwrap();
            assert!(!info.label.is_empty(), "missing label for {:?}", tag);
        }
        assert!(display_info(ComponentTag::LinkedRoot).is_ok());
    }

    #[test]
    fn keys_roundtrip() {
        for tag in ComponentTag::ALL {
            assert_eq!(ComponentTag::parse(tag.key()).unwrap(), tag);
        }
        assert_eq!(
            ComponentTag::parse("LinkedRoot").unwrap(),
            ComponentTag::LinkedRoot
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ComponentTag::parse("Rigidbody").unwrap_err();
        assert_eq!(err.0, "Rigidbody");
    }

    #[test]
    fn sentinel_not_in_all() {
        assert!(!ComponentTag::ALL.contains(&ComponentTag::LinkedRoot));
        assert!(default_selected(ComponentTag::Light));
        assert!(!default_selected(ComponentTag::LinkedRoot));
    }

    #[test]
    fn constraint_tags_share_highlight_color() {
        let aim = display_info(ComponentTag::AimConstraint).unwrap();
        let scale = display_info(ComponentTag::ScaleConstraint).unwrap();
        assert_eq!(aim.color, scale.color);
    }
}
