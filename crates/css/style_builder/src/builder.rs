//! CSS Cascading and Inheritance Level 4 — applying declared values to a computed style.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#value-stages>
//!
//! Declarations arrive already cascaded and in source order. Custom properties are
//! resolved first so `var()` references can be substituted, then `font-size`, then the
//! properties other values depend on, then everything else.

use crate::converters::colors::{convert_caret_color, convert_color, convert_paint, convert_style_color};
use crate::converters::effects::{convert_clip, convert_filter_operations, convert_image_list, convert_shadow_list};
use crate::converters::grid::convert_grid_track_list;
use crate::converters::lengths::{
    convert_border_spacing, convert_border_width, convert_computed_length, convert_gap, convert_perspective,
    convert_spacing, convert_vertical_align, convert_z_index,
};
use crate::converters::transforms::{
    convert_offset_path, convert_rotate, convert_scale, convert_transform_operations, convert_transform_origin,
    convert_translate,
};
use crate::converters::typography::{
    convert_font_size, convert_font_weight, convert_line_height, convert_text_decoration_line, convert_text_indent,
};
use crate::converters::{convert_length_or_keyword, convert_number};
use crate::resolver_state::StyleResolverState;
use crate::style_model::{ComputedStyle, Length, initial_keyword};
use css_parser::property_tables::is_color_property_id;
use css_parser::{CssProperty, ParserContext, parse_single_value, parse_value};
use css_syntax::{TokenRange, tokenize};
use css_values_units::{
    CssValue, LengthConversionData, PrimitiveValue, PropertyId, UnitType, ValueList, VariableData,
};
use css_variables::{ComputedCustomProperties, ComputedCustomProperty, CssVariableResolver, resolve_variable_references};
use log::{debug, trace};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// The style every property's initial value is read from.
pub static INITIAL_STYLE: Lazy<ComputedStyle> = Lazy::new(ComputedStyle::default);

/// Application pass of a property; lower passes run first.
const fn priority(property: PropertyId) -> u8 {
    match property {
        PropertyId::FontSize => 0,
        PropertyId::Color | PropertyId::FontWeight | PropertyId::LineHeight => 1,
        _ => 2,
    }
}

const PASSES: u8 = 3;

pub fn apply_initial(property: PropertyId, state: &mut StyleResolverState<'_>) {
    state.style_mut().copy_property_from(property, &INITIAL_STYLE);
}

/// Copy the parent's computed value, or the initial value at the root.
pub fn apply_inherit(property: PropertyId, state: &mut StyleResolverState<'_>) {
    match state.parent_style() {
        Some(parent) => state.style_mut().copy_property_from(property, parent),
        None => apply_initial(property, state),
    }
}

/// `color` resolves `currentcolor` against the inherited color.
fn apply_color_value(value: &CssValue, state: &mut StyleResolverState<'_>) -> Option<()> {
    let color = convert_color(value, state)?;
    state.style_mut().color = color;
    Some(())
}

/// `text-indent` sets the length and both modes together.
fn apply_text_indent_value(value: &CssValue, state: &mut StyleResolverState<'_>) -> Option<()> {
    let indent = convert_text_indent(value, state)?;
    state.style_mut().text_indent = indent;
    Some(())
}

/// `clip: auto` clears the rectangle.
fn apply_clip_value(value: &CssValue, state: &mut StyleResolverState<'_>) -> Option<()> {
    let clip = convert_clip(value, state)?;
    state.style_mut().clip = clip;
    Some(())
}

/// Write a converted length into `property`.
fn apply_length(property: PropertyId, length: Option<Length>, state: &mut StyleResolverState<'_>) -> Option<()> {
    state.style_mut().set_length(property, length?).then_some(())
}

#[allow(clippy::too_many_lines, reason = "One arm per property")]
fn apply_value(property: PropertyId, value: &CssValue, state: &mut StyleResolverState<'_>) -> Option<()> {
    if initial_keyword(property).is_some() {
        let keyword = value.value_id()?;
        state.style_mut().set_keyword(property, keyword);
        return Some(());
    }
    match property {
        PropertyId::Color => return apply_color_value(value, state),
        PropertyId::TextIndent => return apply_text_indent_value(value, state),
        PropertyId::Clip => return apply_clip_value(value, state),
        PropertyId::CaretColor => {
            let caret = convert_caret_color(value, state)?;
            state.style_mut().caret_color = caret;
        }
        PropertyId::Fill => {
            let paint = convert_paint(value, state)?;
            state.style_mut().fill = paint;
        }
        PropertyId::Stroke => {
            let paint = convert_paint(value, state)?;
            state.style_mut().stroke = paint;
        }
        _ if is_color_property_id(property) => {
            let color = convert_style_color(value.as_primitive()?, state)?;
            return state.style_mut().set_style_color(property, color).then_some(());
        }
        PropertyId::BackgroundImage => state.style_mut().background_images = convert_image_list(value)?,
        PropertyId::BorderTopWidth
        | PropertyId::BorderRightWidth
        | PropertyId::BorderBottomWidth
        | PropertyId::BorderLeftWidth
        | PropertyId::OutlineWidth => {
            let width = convert_border_width(value, state).map(Length::Fixed);
            return apply_length(property, width, state);
        }
        PropertyId::OutlineOffset => {
            let offset = convert_computed_length(value, state).map(Length::Fixed);
            return apply_length(property, offset, state);
        }
        PropertyId::LetterSpacing | PropertyId::WordSpacing => {
            let spacing = convert_spacing(value, state).map(Length::Fixed);
            return apply_length(property, spacing, state);
        }
        PropertyId::Width
        | PropertyId::Height
        | PropertyId::MinWidth
        | PropertyId::MinHeight
        | PropertyId::MaxWidth
        | PropertyId::MaxHeight
        | PropertyId::MarginTop
        | PropertyId::MarginRight
        | PropertyId::MarginBottom
        | PropertyId::MarginLeft
        | PropertyId::PaddingTop
        | PropertyId::PaddingRight
        | PropertyId::PaddingBottom
        | PropertyId::PaddingLeft
        | PropertyId::Top
        | PropertyId::Right
        | PropertyId::Bottom
        | PropertyId::Left => {
            let length = convert_length_or_keyword(value, state);
            return apply_length(property, length, state);
        }
        PropertyId::BorderSpacing => {
            let spacing = convert_border_spacing(value, state)?;
            state.style_mut().border_spacing = spacing;
        }
        PropertyId::BoxShadow => {
            let shadows = convert_shadow_list(value, state)?;
            state.style_mut().box_shadow = shadows;
        }
        PropertyId::TextShadow => {
            let shadows = convert_shadow_list(value, state)?;
            state.style_mut().text_shadow = shadows;
        }
        PropertyId::ZIndex => state.style_mut().z_index = convert_z_index(value)?,
        PropertyId::Order => state.style_mut().order = value.as_primitive()?.int_value(),
        PropertyId::VerticalAlign => {
            let align = convert_vertical_align(value, state)?;
            state.style_mut().vertical_align = align;
        }
        PropertyId::FontSize => {
            let size = convert_font_size(value, state)?;
            state.style_mut().font_size = size;
        }
        PropertyId::FontWeight => {
            let weight = convert_font_weight(value, state)?;
            state.style_mut().font_weight = weight;
        }
        PropertyId::LineHeight => {
            let line_height = convert_line_height(value, state)?;
            state.style_mut().line_height = line_height;
        }
        PropertyId::TextDecorationLine => {
            state.style_mut().text_decoration_line = convert_text_decoration_line(value)?;
        }
        PropertyId::FlexGrow => state.style_mut().flex_grow = convert_number(value)?.max(0.0),
        PropertyId::FlexShrink => state.style_mut().flex_shrink = convert_number(value)?.max(0.0),
        PropertyId::Opacity => state.style_mut().opacity = convert_number(value)?.clamp(0.0, 1.0),
        PropertyId::ColumnGap => {
            let gap = convert_gap(value, state)?;
            state.style_mut().column_gap = gap;
        }
        PropertyId::RowGap => {
            let gap = convert_gap(value, state)?;
            state.style_mut().row_gap = gap;
        }
        PropertyId::GridTemplateColumns => {
            let tracks = convert_grid_track_list(value, state)?;
            state.style_mut().grid_template_columns = tracks;
        }
        PropertyId::GridTemplateRows => {
            let tracks = convert_grid_track_list(value, state)?;
            state.style_mut().grid_template_rows = tracks;
        }
        PropertyId::Filter => {
            let filters = convert_filter_operations(value, state)?;
            state.style_mut().filter = filters;
        }
        PropertyId::Transform => {
            let operations = convert_transform_operations(value, state)?;
            state.style_mut().transform = operations;
        }
        PropertyId::TransformOrigin => {
            let origin = convert_transform_origin(value, state)?;
            state.style_mut().transform_origin = origin;
        }
        PropertyId::Perspective => {
            let perspective = convert_perspective(value, state)?;
            state.style_mut().perspective = perspective;
        }
        PropertyId::Scale => state.style_mut().scale = convert_scale(value)?,
        PropertyId::Rotate => state.style_mut().rotate = convert_rotate(value)?,
        PropertyId::Translate => {
            let translate = convert_translate(value, state)?;
            state.style_mut().translate = translate;
        }
        PropertyId::OffsetPath => state.style_mut().offset_path = convert_offset_path(value)?,
        _ => return None,
    }
    Some(())
}

/// Apply one resolved value, including the CSS-wide keywords.
///
/// Values that do not convert for `property` leave the style untouched.
pub fn apply_property(property: PropertyId, value: &CssValue, state: &mut StyleResolverState<'_>) {
    if property.is_shorthand() || property == PropertyId::Variable {
        return;
    }
    match value {
        CssValue::Initial => apply_initial(property, state),
        CssValue::Inherit => apply_inherit(property, state),
        CssValue::Unset if property.is_inherited() => apply_inherit(property, state),
        CssValue::Unset => apply_initial(property, state),
        _ => {
            if apply_value(property, value, state).is_none() {
                trace!(
                    target: "css::style",
                    "no computed value for {}: {}",
                    property.name(),
                    value.css_text()
                );
            }
        }
    }
    if property == PropertyId::FontSize {
        state.update_font_size();
    }
}

/// Substitute `var()` in a declaration and re-parse it. Longhands of a shorthand re-parse
/// the whole shorthand and keep their own component.
fn resolve_variable_reference(
    declaration: &CssProperty,
    data: &VariableData,
    state: &StyleResolverState<'_>,
) -> Option<CssValue> {
    let tokens = resolve_variable_references(data, &state.style().custom_properties)?;
    let range = TokenRange::new(&tokens);
    let context = ParserContext::new(state.mode());
    let Some(shorthand) = declaration.shorthand_id() else {
        return parse_single_value(declaration.id(), range, &context);
    };
    let mut longhands = Vec::new();
    if !parse_value(shorthand, declaration.is_important(), range, &context, &mut longhands) {
        return None;
    }
    longhands
        .into_iter()
        .find(|longhand| longhand.id() == declaration.id())
        .map(|longhand| longhand.value().clone())
}

/// Apply one declaration. A `var()` value that fails to substitute or re-parse is invalid
/// at computed-value time and behaves as `unset`.
pub fn apply_declaration(declaration: &CssProperty, state: &mut StyleResolverState<'_>) {
    let property = declaration.id();
    match declaration.value() {
        CssValue::CustomPropertyDeclaration(_) => {}
        CssValue::VariableReference(data) => match resolve_variable_reference(declaration, data, state) {
            Some(value) => apply_property(property, &value, state),
            None => {
                debug!(
                    target: "css::style",
                    "{} is invalid at computed-value time: {}",
                    property.name(),
                    data.serialize()
                );
                apply_property(property, &CssValue::Unset, state);
            }
        },
        value => apply_property(property, value, state),
    }
}

fn compute_custom_properties(declarations: &[&CssProperty], state: &mut StyleResolverState<'_>) {
    let empty = ComputedCustomProperties::default();
    let parent = state
        .parent_style()
        .map_or(&empty, |parent| &parent.custom_properties);
    let mut resolver = CssVariableResolver::new(parent, state.registry(), state.mode());
    for declaration in declarations {
        if let CssValue::CustomPropertyDeclaration(custom) = declaration.value() {
            resolver.apply_declaration(custom);
        }
    }
    state.style_mut().custom_properties = resolver.compute();
}

/// Lengths of a typed custom property value in pixels.
fn absolutize(value: &CssValue, conversion_data: &LengthConversionData) -> CssValue {
    match value {
        CssValue::Primitive(primitive) if primitive.is_length() && primitive.unit_type() != UnitType::Pixels => {
            CssValue::Primitive(PrimitiveValue::numeric(
                primitive.compute_length_px(conversion_data),
                UnitType::Pixels,
            ))
        }
        CssValue::ValueList(list) => CssValue::ValueList(ValueList::from_values(
            list.separator(),
            list.iter().map(|item| absolutize(item, conversion_data)).collect(),
        )),
        _ => value.clone(),
    }
}

/// Registered custom properties compute relative lengths to pixels once the element's font
/// size is known; their token streams follow.
fn absolutize_registered_values(state: &mut StyleResolverState<'_>) {
    let conversion_data = *state.conversion_data();
    let names: Vec<String> = state
        .style()
        .custom_properties
        .names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    for name in names {
        let Some(value) = state
            .style()
            .custom_properties
            .get(&name)
            .and_then(|property| property.value.as_ref())
        else {
            continue;
        };
        let absolute = absolutize(value, &conversion_data);
        if absolute == *value {
            continue;
        }
        let tokens = tokenize(&absolute.css_text());
        let computed = ComputedCustomProperty {
            tokens: Arc::new(VariableData::from_tokens(tokens)),
            value: Some(absolute),
        };
        state.style_mut().custom_properties.insert(name, computed);
    }
}

/// Apply an element's cascaded declarations: normal declarations in order, then important
/// ones in order.
pub fn apply_declarations<'declarations>(
    declarations: impl IntoIterator<Item = &'declarations CssProperty>,
    state: &mut StyleResolverState<'_>,
) {
    let (important, normal): (Vec<&CssProperty>, Vec<&CssProperty>) = declarations
        .into_iter()
        .partition(|declaration| declaration.is_important());
    let ordered: Vec<&CssProperty> = normal.into_iter().chain(important).collect();

    compute_custom_properties(&ordered, state);
    for pass in 0..PASSES {
        for declaration in ordered.iter().filter(|declaration| priority(declaration.id()) == pass) {
            apply_declaration(declaration, state);
        }
        if pass == 0 {
            absolutize_registered_values(state);
        }
    }
}

/// Compute the style of one element from its declarations.
pub fn resolve_style<'declarations>(
    declarations: impl IntoIterator<Item = &'declarations CssProperty>,
    mut state: StyleResolverState<'_>,
) -> ComputedStyle {
    apply_declarations(declarations, &mut state);
    state.take_style()
}
