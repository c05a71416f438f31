//! Passage configuration and plugin-parameter parsing.
//!
//! Settings arrive as loosely typed parameters (numbers, comma separated ID
//! lists, or strings holding either). They are parsed exactly once into
//! [`PassageConfig`], which is then passed by reference to the classifier.
//! Malformed entries never fail the parse; they switch the affected feature
//! off and are reported through `tracing`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::env::RegionId;
use crate::tile::TerrainTag;

/// One raw plugin parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Flag(bool),
    Number(i64),
    Decimal(f64),
    List(Vec<i64>),
    Text(String),
}

impl ParamValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Reads the parameter as a single number. Blank text yields `None`
    /// without a warning.
    pub fn number(&self, name: &'static str) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Decimal(value) if value.fract() == 0.0 => Some(*value as i64),
            Self::List(values) if values.len() == 1 => Some(values[0]),
            Self::List(values) => {
                tracing::warn!(param = name, ?values, "expected a single number");
                None
            }
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<i64>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(param = name, value = %text, "unparseable number");
                        None
                    }
                }
            }
            other => {
                tracing::warn!(param = name, value = %other, "expected a whole number");
                None
            }
        }
    }

    /// Reads the parameter as a fractional number.
    pub fn decimal(&self, name: &'static str) -> Option<f64> {
        match self {
            Self::Decimal(value) => Some(*value),
            Self::Number(value) => Some(*value as f64),
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Some(value),
                _ => {
                    tracing::warn!(param = name, value = %text, "unparseable decimal");
                    None
                }
            },
            other => {
                tracing::warn!(param = name, value = %other, "expected a decimal");
                None
            }
        }
    }

    /// Reads the parameter as a switch. Accepts booleans and the strings
    /// `true`/`false`/`on`/`off` in any case.
    pub fn flag(&self, name: &'static str) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "" => None,
                "true" | "on" => Some(true),
                "false" | "off" => Some(false),
                _ => {
                    tracing::warn!(param = name, value = %text, "unparseable switch");
                    None
                }
            },
            other => {
                tracing::warn!(param = name, value = %other, "expected a switch");
                None
            }
        }
    }

    /// Reads the parameter as a list of IDs. Entries that fail to parse are
    /// dropped individually.
    pub fn id_list(&self, name: &'static str) -> Vec<i64> {
        match self {
            Self::Number(value) => vec![*value],
            Self::List(values) => values.clone(),
            Self::Flag(_) | Self::Decimal(_) => {
                tracing::warn!(param = name, value = %self, "expected region ids");
                Vec::new()
            }
            Self::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .filter_map(|entry| match entry.parse::<i64>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(param = name, entry, "dropping unparseable region id");
                        None
                    }
                })
                .collect(),
        }
    }
}

impl Default for ParamValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Raw passage parameters, as a host's plugin manager hands them over.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PassageParams {
    pub wall_top_tag: ParamValue,
    pub wall_front_tag: ParamValue,
    pub default_wall_height: ParamValue,
    pub star_tag: ParamValue,
    pub star_region_ids: ParamValue,
    pub higher_tile_region_ids: ParamValue,
    pub passable_region_ids: ParamValue,
    pub impassable_region_ids: ParamValue,
    pub wall_baseline: ParamValue,
}

impl Default for PassageParams {
    fn default() -> Self {
        Self {
            wall_top_tag: ParamValue::Number(PassageConfig::DEFAULT_WALL_TOP_TAG),
            wall_front_tag: ParamValue::Number(PassageConfig::DEFAULT_WALL_FRONT_TAG),
            default_wall_height: ParamValue::Number(PassageConfig::DEFAULT_WALL_HEIGHT as i64),
            star_tag: ParamValue::Number(PassageConfig::DEFAULT_STAR_TAG),
            star_region_ids: ParamValue::text("0"),
            higher_tile_region_ids: ParamValue::text("0"),
            passable_region_ids: ParamValue::text("0"),
            impassable_region_ids: ParamValue::text("0"),
            wall_baseline: ParamValue::text(WallBaseline::AllLayers.as_ref()),
        }
    }
}

/// Which layers the passage fallback consults for wall tiles.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WallBaseline {
    /// The stock check over every layer, wall tile included.
    #[default]
    AllLayers,
    /// Only the two highest layers; the wall tile itself is ignored.
    UpperLayers,
}

/// Set of region IDs that trigger one override.
///
/// Region 0 marks unpainted cells and is never a member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionSet(BTreeSet<RegionId>);

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u16>) -> Self {
        Self(
            ids.into_iter()
                .map(RegionId)
                .filter(|id| !id.is_none())
                .collect(),
        )
    }

    fn from_param(param: &ParamValue, name: &'static str) -> Self {
        Self::from_ids(param.id_list(name).into_iter().filter_map(|id| {
            let region = u16::try_from(id).ok();
            if region.is_none() {
                tracing::warn!(param = name, id, "dropping out-of-range region id");
            }
            region
        }))
    }

    #[inline]
    pub fn contains(&self, region: RegionId) -> bool {
        !region.is_none() && self.0.contains(&region)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u16> for RegionSet {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        Self::from_ids(iter)
    }
}

/// Immutable passage configuration consulted by the classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassageConfig {
    /// Terrain tag marking wall-top tiles. `None` disables wall geometry.
    pub wall_top_tag: Option<TerrainTag>,
    /// Terrain tag marking wall-front tiles.
    pub wall_front_tag: Option<TerrainTag>,
    /// Occlusion height assumed for wall tops with no front run below.
    /// Zero disables the fallback.
    pub default_wall_height: u32,
    /// Terrain tag forcing star passage.
    pub star_tag: Option<TerrainTag>,
    pub star_regions: RegionSet,
    pub higher_tile_regions: RegionSet,
    pub passable_regions: RegionSet,
    pub impassable_regions: RegionSet,
    pub wall_baseline: WallBaseline,
}

impl PassageConfig {
    pub const DEFAULT_WALL_TOP_TAG: i64 = 7;
    pub const DEFAULT_WALL_FRONT_TAG: i64 = 6;
    pub const DEFAULT_WALL_HEIGHT: u32 = 2;
    pub const DEFAULT_STAR_TAG: i64 = 99;

    pub fn new() -> Self {
        Self::from_params(&PassageParams::default())
    }

    /// Configuration with every tag and region feature switched off.
    pub fn disabled() -> Self {
        Self {
            wall_top_tag: None,
            wall_front_tag: None,
            default_wall_height: 0,
            star_tag: None,
            star_regions: RegionSet::new(),
            higher_tile_regions: RegionSet::new(),
            passable_regions: RegionSet::new(),
            impassable_regions: RegionSet::new(),
            wall_baseline: WallBaseline::default(),
        }
    }

    /// Parses raw parameters. Never fails: blank or malformed values disable
    /// the feature they configure.
    pub fn from_params(params: &PassageParams) -> Self {
        let tag = |param: &ParamValue, name: &'static str| {
            param.number(name).and_then(TerrainTag::configured)
        };

        let default_wall_height = params
            .default_wall_height
            .number("default_wall_height")
            .map(|height| {
                u32::try_from(height).unwrap_or_else(|_| {
                    tracing::warn!(height, "negative default wall height; disabling");
                    0
                })
            })
            .unwrap_or(0);

        let wall_baseline = match &params.wall_baseline {
            ParamValue::Text(text) if text.trim().is_empty() => WallBaseline::default(),
            ParamValue::Text(text) => WallBaseline::from_str(text.trim()).unwrap_or_else(|_| {
                tracing::warn!(value = %text, "unknown wall baseline; using all_layers");
                WallBaseline::default()
            }),
            other => {
                tracing::warn!(value = %other, "unknown wall baseline; using all_layers");
                WallBaseline::default()
            }
        };

        let config = Self {
            wall_top_tag: tag(&params.wall_top_tag, "wall_top_tag"),
            wall_front_tag: tag(&params.wall_front_tag, "wall_front_tag"),
            default_wall_height,
            star_tag: tag(&params.star_tag, "star_tag"),
            star_regions: RegionSet::from_param(&params.star_region_ids, "star_region_ids"),
            higher_tile_regions: RegionSet::from_param(
                &params.higher_tile_region_ids,
                "higher_tile_region_ids",
            ),
            passable_regions: RegionSet::from_param(
                &params.passable_region_ids,
                "passable_region_ids",
            ),
            impassable_regions: RegionSet::from_param(
                &params.impassable_region_ids,
                "impassable_region_ids",
            ),
            wall_baseline,
        };
        tracing::debug!(?config, "passage configuration parsed");
        config
    }

    pub fn with_wall_tags(mut self, top: Option<TerrainTag>, front: Option<TerrainTag>) -> Self {
        self.wall_top_tag = top;
        self.wall_front_tag = front;
        self
    }

    pub fn with_default_wall_height(mut self, height: u32) -> Self {
        self.default_wall_height = height;
        self
    }

    pub fn with_star_tag(mut self, tag: Option<TerrainTag>) -> Self {
        self.star_tag = tag;
        self
    }

    pub fn with_star_regions(mut self, regions: RegionSet) -> Self {
        self.star_regions = regions;
        self
    }

    pub fn with_higher_tile_regions(mut self, regions: RegionSet) -> Self {
        self.higher_tile_regions = regions;
        self
    }

    pub fn with_passable_regions(mut self, regions: RegionSet) -> Self {
        self.passable_regions = regions;
        self
    }

    pub fn with_impassable_regions(mut self, regions: RegionSet) -> Self {
        self.impassable_regions = regions;
        self
    }

    pub fn with_wall_baseline(mut self, baseline: WallBaseline) -> Self {
        self.wall_baseline = baseline;
        self
    }
}

impl Default for PassageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_defaults() {
        let config = PassageConfig::default();
        assert_eq!(config.wall_top_tag, Some(TerrainTag(7)));
        assert_eq!(config.wall_front_tag, Some(TerrainTag(6)));
        assert_eq!(config.default_wall_height, 2);
        assert_eq!(config.star_tag, None);
        assert!(config.star_regions.is_empty());
        assert!(config.impassable_regions.is_empty());
        assert_eq!(config.wall_baseline, WallBaseline::AllLayers);
    }

    #[test]
    fn region_lists_drop_zero_and_garbage() {
        let params = PassageParams {
            star_region_ids: ParamValue::text("3, 0,x, 12,,"),
            passable_region_ids: ParamValue::List(vec![4, -2, 70000]),
            impassable_region_ids: ParamValue::Number(9),
            ..PassageParams::default()
        };
        let config = PassageConfig::from_params(&params);

        let star: Vec<_> = config.star_regions.iter().collect();
        assert_eq!(star, vec![RegionId(3), RegionId(12)]);
        let passable: Vec<_> = config.passable_regions.iter().collect();
        assert_eq!(passable, vec![RegionId(4)]);
        assert!(config.impassable_regions.contains(RegionId(9)));
        assert!(!config.star_regions.contains(RegionId::NONE));
    }

    #[test]
    fn malformed_numbers_disable_features() {
        let params = PassageParams {
            wall_top_tag: ParamValue::text("seven"),
            wall_front_tag: ParamValue::text("99"),
            default_wall_height: ParamValue::text("tall"),
            star_tag: ParamValue::text(" 3 "),
            wall_baseline: ParamValue::text("Upper_Layers"),
            ..PassageParams::default()
        };
        let config = PassageConfig::from_params(&params);

        assert_eq!(config.wall_top_tag, None);
        assert_eq!(config.wall_front_tag, None);
        assert_eq!(config.default_wall_height, 0);
        assert_eq!(config.star_tag, Some(TerrainTag(3)));
        assert_eq!(config.wall_baseline, WallBaseline::UpperLayers);
    }

    #[test]
    fn blank_values_disable_features() {
        let params = PassageParams {
            wall_top_tag: ParamValue::text(""),
            star_tag: ParamValue::text("  "),
            default_wall_height: ParamValue::text(""),
            wall_baseline: ParamValue::text(""),
            ..PassageParams::default()
        };
        let config = PassageConfig::from_params(&params);

        assert_eq!(config.wall_top_tag, None);
        assert_eq!(config.wall_front_tag, Some(TerrainTag(6)));
        assert_eq!(config.star_tag, None);
        assert_eq!(config.default_wall_height, 0);
        assert_eq!(config.wall_baseline, WallBaseline::AllLayers);
    }

    #[test]
    fn param_value_readers() {
        assert_eq!(ParamValue::Decimal(3.0).number("n"), Some(3));
        assert_eq!(ParamValue::Decimal(3.5).number("n"), None);
        assert_eq!(ParamValue::text("0.25").decimal("d"), Some(0.25));
        assert_eq!(ParamValue::Number(1).decimal("d"), Some(1.0));
        assert_eq!(ParamValue::text(" OFF ").flag("f"), Some(false));
        assert_eq!(ParamValue::text("True").flag("f"), Some(true));
        assert_eq!(ParamValue::text("maybe").flag("f"), None);
        assert!(ParamValue::Flag(true).id_list("ids").is_empty());
    }

    #[test]
    fn param_value_display_round_trips_lists() {
        assert_eq!(ParamValue::List(vec![1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(ParamValue::Number(4).to_string(), "4");
    }
}
