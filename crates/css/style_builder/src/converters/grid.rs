//! CSS Grid Layout Module Level 1 — computed track lists.
//! Spec: <https://www.w3.org/TR/css-grid-1/#repeat-notation>

use super::convert_length_percentage;
use crate::resolver_state::StyleResolverState;
use crate::style_model::{GridTrackBreadth, GridTrackList, GridTrackSize, Length};
use css_parser::GRID_MAX_TRACKS;
use css_values_units::{CssValue, LengthConversionData, PrimitiveValue, ValueId, ValueList};
use log::debug;

#[allow(clippy::cast_possible_truncation, reason = "Computed numbers are f32")]
fn convert_breadth(primitive: &PrimitiveValue, conversion_data: &LengthConversionData) -> Option<GridTrackBreadth> {
    let length = match primitive.value_id() {
        Some(ValueId::Auto) => Length::Auto,
        Some(ValueId::MinContent) => Length::MinContent,
        Some(ValueId::MaxContent) => Length::MaxContent,
        Some(_) => return None,
        None if primitive.is_flex() => {
            return Some(GridTrackBreadth::Flex(primitive.double_value() as f32));
        }
        None => convert_length_percentage(primitive, conversion_data)?,
    };
    Some(GridTrackBreadth::Length(length))
}

fn convert_track_size(value: &CssValue, conversion_data: &LengthConversionData) -> Option<GridTrackSize> {
    match value {
        CssValue::Primitive(primitive) => convert_breadth(primitive, conversion_data).map(GridTrackSize::Breadth),
        CssValue::Function(function) if function.name == ValueId::Minmax => {
            let breadth = |index: usize| {
                function
                    .arguments
                    .item(index)
                    .and_then(CssValue::as_primitive)
                    .and_then(|primitive| convert_breadth(primitive, conversion_data))
            };
            Some(GridTrackSize::MinMax(breadth(0)?, breadth(1)?))
        }
        _ => None,
    }
}

/// Accumulates tracks and the line indices names were given at.
struct TrackListBuilder<'conversion> {
    list: GridTrackList,
    conversion_data: &'conversion LengthConversionData,
}

impl TrackListBuilder<'_> {
    fn add_names(&mut self, names: &[String]) {
        let line = self.list.tracks.len();
        for name in names {
            self.list.named_lines.entry(name.clone()).or_default().push(line);
        }
    }

    fn at_limit(&self) -> bool {
        self.list.tracks.len() >= GRID_MAX_TRACKS as usize
    }

    /// Add the tracks and names of `items`. Tracks beyond the grid limit are dropped.
    fn add_items(&mut self, items: &ValueList) -> Option<()> {
        for item in items {
            match item {
                CssValue::GridLineNames(names) => self.add_names(&names.names),
                CssValue::Function(function) if function.name == ValueId::Repeat => {
                    self.add_repeat(function.arguments.item(0)?, function.arguments.item(1)?.as_list()?)?;
                }
                _ => {
                    let track = convert_track_size(item, self.conversion_data)?;
                    if !self.at_limit() {
                        self.list.tracks.push(track);
                    }
                }
            }
        }
        Some(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "Clamped by the parser")]
    fn add_repeat(&mut self, count: &CssValue, tracks: &ValueList) -> Option<()> {
        let count = count.as_primitive()?.double_value().max(1.0) as usize;
        let tracks_per_repetition = tracks
            .iter()
            .filter(|item| !matches!(item, CssValue::GridLineNames(_)))
            .count()
            .max(1);
        let repetitions = count.min(GRID_MAX_TRACKS as usize / tracks_per_repetition);
        if repetitions < count {
            debug!(target: "css::parser", "clamping repeat({count}) to {repetitions} repetitions");
        }
        for _ in 0..repetitions {
            if self.at_limit() {
                break;
            }
            self.add_items(tracks)?;
        }
        Some(())
    }
}

/// `grid-template-columns` and `grid-template-rows`: `none` is an empty list.
pub fn convert_grid_track_list(value: &CssValue, state: &StyleResolverState<'_>) -> Option<GridTrackList> {
    if value.value_id() == Some(ValueId::None) {
        return Some(GridTrackList::default());
    }
    let mut builder = TrackListBuilder {
        list: GridTrackList::default(),
        conversion_data: state.conversion_data(),
    };
    builder.add_items(value.as_list()?)?;
    Some(builder.list)
}
