//! Translucency rules for characters standing behind upper-layer tiles.
//!
//! Two effects cooperate:
//!
//! * [`BehindTileOpacity`] fades the whole upper tile layer so characters
//!   walking behind walls stay visible.
//! * [`HighLayerSprites`] draws a faint copy of each character above the
//!   upper layer. Characters opt out through event comments
//!   ([`HighLayerToggle`]) or the `HighLayerCharacterSprite` command
//!   ([`HighLayerCommand`]); [`HighLayerSwitches`] keeps the resulting state.

use std::collections::BTreeMap;

use crate::config::ParamValue;
use crate::env::{VariableId, VariableOracle};

/// Z index the host assigns to tiles drawn above characters.
pub const UPPER_TILE_Z: u8 = 4;

/// Opacity of the upper tile layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehindTileOpacity {
    /// How transparent the upper layer is, 0 (opaque) to 255 (invisible).
    pub default_opacity: u8,
    /// When set, the variable's value replaces `default_opacity` every frame.
    pub variable: Option<VariableId>,
}

impl BehindTileOpacity {
    pub const DEFAULT_OPACITY: u8 = 50;

    pub fn from_params(params: &TranslucencyParams) -> Self {
        let default_opacity = params
            .behind_tile_opacity
            .number("behind_tile_opacity")
            .map_or(0, clamp_opacity);
        Self {
            default_opacity,
            variable: params
                .behind_tile_opacity_variable_id
                .number("behind_tile_opacity_variable_id")
                .and_then(VariableId::configured),
        }
    }

    /// Transparency applied to the upper layer right now.
    pub fn behind_tile_opacity(&self, variables: &dyn VariableOracle) -> u8 {
        match self.variable {
            Some(id) => clamp_opacity(variables.value(id)),
            None => self.default_opacity,
        }
    }

    /// Alpha the host should give the upper tile layer.
    pub fn upper_layer_opacity(&self, variables: &dyn VariableOracle) -> u8 {
        u8::MAX - self.behind_tile_opacity(variables)
    }
}

impl Default for BehindTileOpacity {
    fn default() -> Self {
        Self {
            default_opacity: Self::DEFAULT_OPACITY,
            variable: None,
        }
    }
}

/// What the host knows about one character sprite in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterView {
    pub opacity: u8,
    pub visible: bool,
}

/// Render state for the faint copy drawn above the upper layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighLayerSprite {
    pub opacity: u8,
    pub visible: bool,
    pub z: u8,
}

/// Settings for the above-layer character copies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighLayerSprites {
    /// Fraction of the character's opacity given to the copy.
    pub default_rate: f64,
    /// When set, `value / 100` replaces `default_rate` every frame.
    pub variable: Option<VariableId>,
    /// Whether characters without a comment tag get a copy.
    pub enabled_by_default: bool,
}

impl HighLayerSprites {
    pub const DEFAULT_RATE: f64 = 0.2;

    pub fn from_params(params: &TranslucencyParams) -> Self {
        Self {
            default_rate: params
                .high_layer_opacity_rate
                .decimal("high_layer_opacity_rate")
                .unwrap_or(0.0),
            variable: params
                .high_layer_opacity_variable_id
                .number("high_layer_opacity_variable_id")
                .and_then(VariableId::configured),
            enabled_by_default: params
                .high_layer_enabled_by_default
                .flag("high_layer_enabled_by_default")
                .unwrap_or(true),
        }
    }

    pub fn rate(&self, variables: &dyn VariableOracle) -> f64 {
        match self.variable {
            Some(id) => variables.value(id) as f64 / 100.0,
            None => self.default_rate,
        }
    }

    /// Derives the copy's state from the character it mirrors.
    pub fn sprite(
        &self,
        character: CharacterView,
        enabled: bool,
        variables: &dyn VariableOracle,
    ) -> HighLayerSprite {
        let opacity = (f64::from(character.opacity) * self.rate(variables)).clamp(0.0, 255.0);
        HighLayerSprite {
            opacity: opacity as u8,
            visible: character.visible && enabled,
            z: UPPER_TILE_Z,
        }
    }
}

impl Default for HighLayerSprites {
    fn default() -> Self {
        Self {
            default_rate: Self::DEFAULT_RATE,
            variable: None,
            enabled_by_default: true,
        }
    }
}

/// Event comment tags that switch the above-layer copy for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighLayerToggle {
    Enable,
    Disable,
}

impl HighLayerToggle {
    pub const ENABLE_TAG: &'static str = "<enable high layer character sprite>";
    pub const DISABLE_TAG: &'static str = "<disable high layer character sprite>";

    /// Finds a tag in one comment line, ignoring case.
    pub fn from_comment(comment: &str) -> Option<Self> {
        let comment = comment.to_ascii_lowercase();
        if comment.contains(Self::DISABLE_TAG) {
            Some(Self::Disable)
        } else if comment.contains(Self::ENABLE_TAG) {
            Some(Self::Enable)
        } else {
            None
        }
    }

    /// Last tag found in an event page's comments, if any.
    pub fn resolve<'a>(comments: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        comments.into_iter().filter_map(Self::from_comment).last()
    }
}

/// Character a command refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterKey {
    Player,
    Follower(u16),
    Event(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandTarget {
    /// The player and every follower.
    Party,
    /// The event running the command.
    CurrentEvent,
    Event(u32),
}

/// Parsed `HighLayerCharacterSprite <target> <true|false>` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighLayerCommand {
    pub target: CommandTarget,
    pub enabled: bool,
}

impl HighLayerCommand {
    pub const NAME: &'static str = "HighLayerCharacterSprite";

    /// Parses a plugin command. Returns `None` for other commands and for
    /// malformed arguments.
    pub fn parse(command: &str, args: &[&str]) -> Option<Self> {
        if !command.eq_ignore_ascii_case(Self::NAME) {
            return None;
        }
        let [target, enabled, ..] = args else {
            tracing::warn!(?args, "{} needs a target and a switch", Self::NAME);
            return None;
        };
        let target = match target.trim().parse::<i64>() {
            Ok(id) if id < 0 => CommandTarget::Party,
            Ok(0) => CommandTarget::CurrentEvent,
            Ok(id) => CommandTarget::Event(u32::try_from(id).ok()?),
            Err(_) => {
                tracing::warn!(value = %target, "{} target is not a number", Self::NAME);
                return None;
            }
        };
        let enabled = ParamValue::text(*enabled).flag("enabled")?;
        Some(Self { target, enabled })
    }

    /// Applies the command. `followers` lists the party members walking
    /// behind the player; `current_event` is the event running the command.
    pub fn apply(
        &self,
        switches: &mut HighLayerSwitches,
        followers: &[u16],
        current_event: Option<u32>,
    ) {
        match self.target {
            CommandTarget::Party => {
                switches.set(CharacterKey::Player, self.enabled);
                for follower in followers {
                    switches.set(CharacterKey::Follower(*follower), self.enabled);
                }
            }
            CommandTarget::CurrentEvent => match current_event {
                Some(id) => switches.set(CharacterKey::Event(id), self.enabled),
                None => tracing::warn!("{} used outside an event", Self::NAME),
            },
            CommandTarget::Event(id) => switches.set(CharacterKey::Event(id), self.enabled),
        }
    }
}

/// Per-character above-layer copy state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighLayerSwitches {
    enabled_by_default: bool,
    overrides: BTreeMap<CharacterKey, bool>,
}

impl HighLayerSwitches {
    pub fn new(enabled_by_default: bool) -> Self {
        Self {
            enabled_by_default,
            overrides: BTreeMap::new(),
        }
    }

    pub fn is_enabled(&self, key: CharacterKey) -> bool {
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or(self.enabled_by_default)
    }

    pub fn set(&mut self, key: CharacterKey, enabled: bool) {
        self.overrides.insert(key, enabled);
    }

    /// Applies a new event page's comment tags. Pages without a tag keep
    /// the event's current state.
    pub fn load_event<'a>(&mut self, id: u32, comments: impl IntoIterator<Item = &'a str>) {
        if let Some(toggle) = HighLayerToggle::resolve(comments) {
            self.set(CharacterKey::Event(id), toggle == HighLayerToggle::Enable);
        }
    }
}

/// Raw translucency parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranslucencyParams {
    pub behind_tile_opacity: ParamValue,
    pub behind_tile_opacity_variable_id: ParamValue,
    pub high_layer_opacity_rate: ParamValue,
    pub high_layer_opacity_variable_id: ParamValue,
    pub high_layer_enabled_by_default: ParamValue,
}

impl Default for TranslucencyParams {
    fn default() -> Self {
        Self {
            behind_tile_opacity: ParamValue::Number(i64::from(BehindTileOpacity::DEFAULT_OPACITY)),
            behind_tile_opacity_variable_id: ParamValue::Number(0),
            high_layer_opacity_rate: ParamValue::Decimal(HighLayerSprites::DEFAULT_RATE),
            high_layer_opacity_variable_id: ParamValue::Number(0),
            high_layer_enabled_by_default: ParamValue::Flag(true),
        }
    }
}

/// Both translucency effects, parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslucencyConfig {
    pub behind_tile: BehindTileOpacity,
    pub high_layer: HighLayerSprites,
}

impl TranslucencyConfig {
    pub fn from_params(params: &TranslucencyParams) -> Self {
        let config = Self {
            behind_tile: BehindTileOpacity::from_params(params),
            high_layer: HighLayerSprites::from_params(params),
        };
        tracing::debug!(?config, "parsed translucency config");
        config
    }

    pub fn switches(&self) -> HighLayerSwitches {
        HighLayerSwitches::new(self.high_layer.enabled_by_default)
    }
}

fn clamp_opacity(value: i64) -> u8 {
    value.clamp(0, i64::from(u8::MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::VariableTable;

    #[test]
    fn defaults_fade_upper_layer() {
        let config = TranslucencyConfig::from_params(&TranslucencyParams::default());
        let variables = VariableTable::new();

        assert_eq!(config, TranslucencyConfig::default());
        assert_eq!(config.behind_tile.upper_layer_opacity(&variables), 205);
        assert!(config.switches().is_enabled(CharacterKey::Player));
    }

    #[test]
    fn variables_override_defaults() {
        let params = TranslucencyParams {
            behind_tile_opacity_variable_id: ParamValue::text("3"),
            high_layer_opacity_variable_id: ParamValue::Number(4),
            ..TranslucencyParams::default()
        };
        let config = TranslucencyConfig::from_params(&params);
        let variables = VariableTable::new().with(VariableId(3), 400).with(VariableId(4), 50);

        assert_eq!(config.behind_tile.upper_layer_opacity(&variables), 0);
        let sprite = config.high_layer.sprite(
            CharacterView {
                opacity: 200,
                visible: true,
            },
            true,
            &variables,
        );
        assert_eq!(
            sprite,
            HighLayerSprite {
                opacity: 100,
                visible: true,
                z: UPPER_TILE_Z,
            }
        );
    }

    #[test]
    fn blank_opacity_means_opaque() {
        let params = TranslucencyParams {
            behind_tile_opacity: ParamValue::text(""),
            high_layer_enabled_by_default: "FALSE".into(),
            ..TranslucencyParams::default()
        };
        let config = TranslucencyConfig::from_params(&params);

        assert_eq!(config.behind_tile.upper_layer_opacity(&VariableTable::new()), 255);
        assert!(!config.high_layer.enabled_by_default);
    }

    #[test]
    fn disabled_copy_is_hidden() {
        let sprites = HighLayerSprites::default();
        let view = CharacterView {
            opacity: 255,
            visible: true,
        };
        let sprite = sprites.sprite(view, false, &VariableTable::new());

        assert!(!sprite.visible);
        assert_eq!(sprite.opacity, 51);
    }

    #[test]
    fn comment_tags_last_one_wins() {
        assert_eq!(
            HighLayerToggle::from_comment("<Disable High Layer Character Sprite>"),
            Some(HighLayerToggle::Disable)
        );
        assert_eq!(HighLayerToggle::from_comment("just a note"), None);

        let comments = [
            "<disable high layer character sprite>",
            "text",
            "<ENABLE HIGH LAYER CHARACTER SPRITE>",
        ];
        assert_eq!(
            HighLayerToggle::resolve(comments),
            Some(HighLayerToggle::Enable)
        );
        assert_eq!(
            HighLayerToggle::resolve(comments[..2].iter().copied()),
            Some(HighLayerToggle::Disable)
        );
        assert_eq!(HighLayerToggle::resolve(["text"]), None);
    }

    #[test]
    fn command_parsing() {
        assert_eq!(
            HighLayerCommand::parse("HighLayerCharacterSprite", &["-1", "false"]),
            Some(HighLayerCommand {
                target: CommandTarget::Party,
                enabled: false,
            })
        );
        assert_eq!(
            HighLayerCommand::parse("HighLayerCharacterSprite", &["12", "TRUE"]),
            Some(HighLayerCommand {
                target: CommandTarget::Event(12),
                enabled: true,
            })
        );
        assert_eq!(
            HighLayerCommand::parse("HighLayerCharacterSprite", &["0", "on"]).map(|c| c.target),
            Some(CommandTarget::CurrentEvent)
        );
        assert_eq!(HighLayerCommand::parse("Other", &["1", "true"]), None);
        assert_eq!(HighLayerCommand::parse("HighLayerCharacterSprite", &["1"]), None);
        assert_eq!(
            HighLayerCommand::parse("HighLayerCharacterSprite", &["x", "true"]),
            None
        );
    }

    #[test]
    fn command_name_ignores_case() {
        for name in [
            "highlayercharactersprite",
            "HIGHLAYERCHARACTERSPRITE",
            "highLayerCharacterSprite",
        ] {
            assert_eq!(
                HighLayerCommand::parse(name, &["-1", "false"]),
                Some(HighLayerCommand {
                    target: CommandTarget::Party,
                    enabled: false,
                })
            );
        }
    }

    #[test]
    fn untagged_page_keeps_command_state() {
        let mut switches = HighLayerSwitches::new(true);
        let event_off = HighLayerCommand {
            target: CommandTarget::Event(5),
            enabled: false,
        };
        event_off.apply(&mut switches, &[], None);

        switches.load_event(5, ["just a note"]);
        assert!(!switches.is_enabled(CharacterKey::Event(5)));

        switches.load_event(5, ["<Enable High Layer Character Sprite>"]);
        assert!(switches.is_enabled(CharacterKey::Event(5)));

        switches.load_event(6, std::iter::empty());
        assert!(switches.is_enabled(CharacterKey::Event(6)));
    }

    #[test]
    fn enabled_by_default_switch_spellings() {
        for (value, expected) in [
            ("FALSE", false),
            ("off", false),
            ("true", true),
            ("ON", true),
            ("anything", true),
            ("", true),
        ] {
            let params = TranslucencyParams {
                high_layer_enabled_by_default: ParamValue::text(value),
                ..TranslucencyParams::default()
            };
            let sprites = HighLayerSprites::from_params(&params);
            assert_eq!(sprites.enabled_by_default, expected, "value {value:?}");
        }
    }

    #[test]
    fn commands_update_switches() {
        let mut switches = HighLayerSwitches::new(true);
        switches.load_event(7, ["<disable high layer character sprite>"]);
        assert!(!switches.is_enabled(CharacterKey::Event(7)));

        let party_off = HighLayerCommand {
            target: CommandTarget::Party,
            enabled: false,
        };
        party_off.apply(&mut switches, &[1, 2], None);
        assert!(!switches.is_enabled(CharacterKey::Player));
        assert!(!switches.is_enabled(CharacterKey::Follower(2)));
        assert!(switches.is_enabled(CharacterKey::Follower(3)));

        let this_on = HighLayerCommand {
            target: CommandTarget::CurrentEvent,
            enabled: true,
        };
        this_on.apply(&mut switches, &[], Some(7));
        assert!(switches.is_enabled(CharacterKey::Event(7)));
    }
}
