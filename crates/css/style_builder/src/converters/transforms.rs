//! CSS Transforms Module Level 1 and 2 — transform lists and individual transforms.
//! Spec: <https://www.w3.org/TR/css-transforms-2/#individual-transforms>

use super::{compute_px, convert_length_percentage, convert_number};
use crate::resolver_state::StyleResolverState;
use crate::style_model::{
    Length, RotateTransform, ScaleTransform, TransformOperation, TransformOperations,
    TransformOrigin, TranslateTransform,
};
use css_values_units::{CssValue, FunctionValue, LengthConversionData, PrimitiveValue, ValueId};

#[allow(clippy::cast_possible_truncation, reason = "Computed angles are f32")]
fn degrees(value: &CssValue) -> Option<f32> {
    let primitive = value.as_primitive()?;
    primitive.is_angle().then(|| primitive.compute_degrees() as f32)
}

fn length(value: &CssValue, conversion_data: &LengthConversionData) -> Option<Length> {
    convert_length_percentage(value.as_primitive()?, conversion_data)
}

fn depth(value: &CssValue, conversion_data: &LengthConversionData) -> Option<f32> {
    let primitive = value.as_primitive()?;
    primitive.is_length().then(|| compute_px(primitive, conversion_data))
}

fn numbers<const COUNT: usize>(function: &FunctionValue) -> Option<[f64; COUNT]> {
    if function.arguments.len() != COUNT {
        return None;
    }
    let mut values = [0.0; COUNT];
    for (slot, argument) in values.iter_mut().zip(function.arguments.iter()) {
        let primitive = argument.as_primitive()?;
        if !primitive.is_number() {
            return None;
        }
        *slot = primitive.double_value();
    }
    Some(values)
}

fn convert_transform_function(
    function: &FunctionValue,
    conversion_data: &LengthConversionData,
) -> Option<TransformOperation> {
    let arguments = &function.arguments;
    let first = arguments.item(0);
    let second = arguments.item(1);
    Some(match function.name {
        ValueId::Translate => TransformOperation::Translate {
            x: length(first?, conversion_data)?,
            y: second.map_or(Some(Length::ZERO), |y| length(y, conversion_data))?,
            z: 0.0,
        },
        ValueId::TranslateX => TransformOperation::Translate {
            x: length(first?, conversion_data)?,
            y: Length::ZERO,
            z: 0.0,
        },
        ValueId::TranslateY => TransformOperation::Translate {
            x: Length::ZERO,
            y: length(first?, conversion_data)?,
            z: 0.0,
        },
        ValueId::TranslateZ => TransformOperation::Translate {
            x: Length::ZERO,
            y: Length::ZERO,
            z: depth(first?, conversion_data)?,
        },
        ValueId::Translate3d => TransformOperation::Translate {
            x: length(first?, conversion_data)?,
            y: length(second?, conversion_data)?,
            z: depth(arguments.item(2)?, conversion_data)?,
        },
        ValueId::Scale => {
            let x = convert_number(first?)?;
            let y = second.map_or(Some(x), convert_number)?;
            TransformOperation::Scale { x, y, z: 1.0 }
        }
        ValueId::ScaleX => TransformOperation::Scale {
            x: convert_number(first?)?,
            y: 1.0,
            z: 1.0,
        },
        ValueId::ScaleY => TransformOperation::Scale {
            x: 1.0,
            y: convert_number(first?)?,
            z: 1.0,
        },
        ValueId::ScaleZ => TransformOperation::Scale {
            x: 1.0,
            y: 1.0,
            z: convert_number(first?)?,
        },
        ValueId::Scale3d => TransformOperation::Scale {
            x: convert_number(first?)?,
            y: convert_number(second?)?,
            z: convert_number(arguments.item(2)?)?,
        },
        ValueId::Rotate | ValueId::RotateZ => TransformOperation::Rotate {
            x: 0.0,
            y: 0.0,
            z: 1.0,
            angle: degrees(first?)?,
        },
        ValueId::RotateX => TransformOperation::Rotate {
            x: 1.0,
            y: 0.0,
            z: 0.0,
            angle: degrees(first?)?,
        },
        ValueId::RotateY => TransformOperation::Rotate {
            x: 0.0,
            y: 1.0,
            z: 0.0,
            angle: degrees(first?)?,
        },
        ValueId::Rotate3d => TransformOperation::Rotate {
            x: convert_number(first?)?,
            y: convert_number(second?)?,
            z: convert_number(arguments.item(2)?)?,
            angle: degrees(arguments.item(3)?)?,
        },
        ValueId::Skew => TransformOperation::Skew {
            x: degrees(first?)?,
            y: second.map_or(Some(0.0), degrees)?,
        },
        ValueId::SkewX => TransformOperation::Skew {
            x: degrees(first?)?,
            y: 0.0,
        },
        ValueId::SkewY => TransformOperation::Skew {
            x: 0.0,
            y: degrees(first?)?,
        },
        ValueId::Matrix => TransformOperation::Matrix(numbers::<6>(function)?),
        ValueId::Matrix3d => TransformOperation::Matrix3d(numbers::<16>(function)?),
        ValueId::Perspective => TransformOperation::Perspective(depth(first?, conversion_data)?),
        _ => return None,
    })
}

/// `transform`: `none` is an empty list.
pub fn convert_transform_operations(
    value: &CssValue,
    state: &StyleResolverState<'_>,
) -> Option<TransformOperations> {
    if value.value_id() == Some(ValueId::None) {
        return Some(TransformOperations::new());
    }
    value
        .as_list()?
        .iter()
        .map(|function| convert_transform_function(function.as_function()?, state.conversion_data()))
        .collect()
}

/// One `transform-origin` component: `left`/`top` are 0%, `center` 50%, `right`/`bottom` 100%.
fn origin_component(primitive: &PrimitiveValue, conversion_data: &LengthConversionData) -> Option<Length> {
    match primitive.value_id() {
        Some(ValueId::Left | ValueId::Top) => Some(Length::Percent(0.0)),
        Some(ValueId::Center) => Some(Length::Percent(50.0)),
        Some(ValueId::Right | ValueId::Bottom) => Some(Length::Percent(100.0)),
        Some(_) => None,
        None => convert_length_percentage(primitive, conversion_data),
    }
}

pub fn convert_transform_origin(value: &CssValue, state: &StyleResolverState<'_>) -> Option<TransformOrigin> {
    let list = value.as_list()?;
    let conversion_data = state.conversion_data();
    Some(TransformOrigin {
        x: origin_component(list.item(0)?.as_primitive()?, conversion_data)?,
        y: origin_component(list.item(1)?.as_primitive()?, conversion_data)?,
        z: list.item(2).map_or(Some(0.0), |z| depth(z, conversion_data))?,
    })
}

/// `scale`: `None` for `none`; a missing y repeats x and a missing z is 1.
pub fn convert_scale(value: &CssValue) -> Option<Option<ScaleTransform>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(None);
    }
    let list = value.as_list()?;
    let x = convert_number(list.item(0)?)?;
    let y = list.item(1).map_or(Some(x), convert_number)?;
    let z = list.item(2).map_or(Some(1.0), convert_number)?;
    Some(Some(ScaleTransform { x, y, z }))
}

/// `rotate`: `None` for `none`; a bare angle rotates about z.
pub fn convert_rotate(value: &CssValue) -> Option<Option<RotateTransform>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(None);
    }
    let list = value.as_list()?;
    if list.len() == 1 {
        return Some(Some(RotateTransform {
            x: 0.0,
            y: 0.0,
            z: 1.0,
            angle: degrees(list.item(0)?)?,
        }));
    }
    Some(Some(RotateTransform {
        x: convert_number(list.item(0)?)?,
        y: convert_number(list.item(1)?)?,
        z: convert_number(list.item(2)?)?,
        angle: degrees(list.item(3)?)?,
    }))
}

/// `translate`: `None` for `none`; missing components are zero.
pub fn convert_translate(value: &CssValue, state: &StyleResolverState<'_>) -> Option<Option<TranslateTransform>> {
    if value.value_id() == Some(ValueId::None) {
        return Some(None);
    }
    let list = value.as_list()?;
    let conversion_data = state.conversion_data();
    Some(Some(TranslateTransform {
        x: length(list.item(0)?, conversion_data)?,
        y: list.item(1).map_or(Some(Length::ZERO), |y| length(y, conversion_data))?,
        z: list.item(2).map_or(Some(0.0), |z| depth(z, conversion_data))?,
    }))
}

/// `offset-path`: the SVG path data, or `None` for `none`.
pub fn convert_offset_path(value: &CssValue) -> Option<Option<String>> {
    match value {
        CssValue::Path(path) => Some(Some(path.path_data.clone())),
        _ if value.value_id() == Some(ValueId::None) => Some(None),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::{UnitType, ValueList, ValueListSeparator};

    fn numeric(value: f64, unit: UnitType) -> CssValue {
        CssValue::Primitive(PrimitiveValue::numeric(value, unit))
    }

    /// # Panics
    /// Panics if transform functions are not expanded to their full form.
    #[test]
    fn transform_functions() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let functions = vec![
            CssValue::Function(FunctionValue::with_arguments(
                ValueId::TranslateX,
                vec![numeric(50.0, UnitType::Percentage)],
            )),
            CssValue::Function(FunctionValue::with_arguments(
                ValueId::Scale,
                vec![numeric(2.0, UnitType::Number)],
            )),
            CssValue::Function(FunctionValue::with_arguments(
                ValueId::Rotate,
                vec![numeric(0.5, UnitType::Turns)],
            )),
        ];
        let list = CssValue::ValueList(ValueList::from_values(ValueListSeparator::Space, functions));
        let operations = convert_transform_operations(&list, &state).unwrap_or_default();
        assert_eq!(
            operations.as_slice(),
            [
                TransformOperation::Translate {
                    x: Length::Percent(50.0),
                    y: Length::ZERO,
                    z: 0.0
                },
                TransformOperation::Scale { x: 2.0, y: 2.0, z: 1.0 },
                TransformOperation::Rotate {
                    x: 0.0,
                    y: 0.0,
                    z: 1.0,
                    angle: 180.0
                },
            ]
        );
    }

    /// # Panics
    /// Panics if origin keywords are not mapped to percentages.
    #[test]
    fn transform_origin_keywords() {
        let state = StyleResolverState::new(None, LengthConversionData::default());
        let values = vec![
            CssValue::identifier(ValueId::Right),
            CssValue::identifier(ValueId::Top),
            numeric(4.0, UnitType::Pixels),
        ];
        let origin = convert_transform_origin(
            &CssValue::ValueList(ValueList::from_values(ValueListSeparator::Space, values)),
            &state,
        );
        assert_eq!(
            origin,
            Some(TransformOrigin {
                x: Length::Percent(100.0),
                y: Length::Percent(0.0),
                z: 4.0
            })
        );
    }

    /// # Panics
    /// Panics if individual transforms do not fill in their defaults.
    #[test]
    fn individual_transforms() {
        let scale = ValueList::from_values(ValueListSeparator::Space, vec![numeric(2.0, UnitType::Number)]);
        assert_eq!(
            convert_scale(&CssValue::ValueList(scale)),
            Some(Some(ScaleTransform { x: 2.0, y: 2.0, z: 1.0 }))
        );
        let rotate = ValueList::from_values(ValueListSeparator::Space, vec![numeric(90.0, UnitType::Degrees)]);
        assert_eq!(
            convert_rotate(&CssValue::ValueList(rotate)),
            Some(Some(RotateTransform {
                x: 0.0,
                y: 0.0,
                z: 1.0,
                angle: 90.0
            }))
        );
        assert_eq!(convert_scale(&CssValue::identifier(ValueId::None)), Some(None));
    }
}
