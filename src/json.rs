//! JSON Tree Format - Graphics as Documents
//!
//! Every node is an object tagged by `"type"`. The derived combinators
//! (`beside`, `above`, `overlay`) are accepted as input; serializing a graphic
//! always writes its stored form.
//!
//! ```json
//! {"type": "beside",
//!  "left_graphic": {"type": "rectangle", "width": 10, "height": 20,
//!                   "color": {"red": 255, "green": 0, "blue": 0, "opacity": 1}},
//!  "right_graphic": {"type": "empty"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::color::{rgba_color, Color};
use crate::error::GraphicError;
use crate::graphic::{Graphic, Kind, Shape};
use crate::operations::{above, beside, compose, overlay, pin, pin_at, rotate};
use crate::point::Point;
use crate::point_names::Anchor;
use crate::primitives::{
    circular_sector, ellipse, empty_graphic, rectangle, text_with, triangle,
};
use crate::text::{font_book, GlyphSource};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Graphic(#[from] GraphicError),

    #[error("Malformed graphic document: {0}")]
    Syntax(#[from] serde_json::Error),
}

/// Where a `pin` node puts the anchor: a point name or raw coordinates
/// (which must still be one of the nine named points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PinningPoint {
    Named(Anchor),
    Coordinates(Point),
}

/// One node of a graphic document. Operands are kept as raw JSON so that a
/// value which is not a graphic can be reported against its node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphicSpec {
    Empty,
    Rectangle {
        width: f64,
        height: f64,
        color: Color,
    },
    Ellipse {
        width: f64,
        height: f64,
        color: Color,
    },
    CircularSector {
        radius: f64,
        angle: f64,
        color: Color,
    },
    Triangle {
        side1: f64,
        side2: f64,
        angle: f64,
        color: Color,
    },
    Text {
        text: String,
        font_name: String,
        text_size: f64,
        color: Color,
    },
    Compose {
        foreground: Value,
        background: Value,
    },
    Pin {
        pinning_point: PinningPoint,
        graphic: Value,
    },
    Rotate {
        angle: f64,
        graphic: Value,
    },
    Beside {
        left_graphic: Value,
        right_graphic: Value,
    },
    Above {
        top_graphic: Value,
        bottom_graphic: Value,
    },
    Overlay {
        front_graphic: Value,
        back_graphic: Value,
    },
}

const NODE_TYPES: [&str; 12] = [
    "empty",
    "rectangle",
    "ellipse",
    "circular_sector",
    "triangle",
    "text",
    "compose",
    "pin",
    "rotate",
    "beside",
    "above",
    "overlay",
];

impl GraphicSpec {
    /// Builds the graphic, validating every parameter. Text uses the
    /// process-wide font book.
    pub fn build(&self) -> Result<Graphic, JsonError> {
        self.build_with(font_book())
    }

    pub fn build_with(&self, fonts: &dyn GlyphSource) -> Result<Graphic, JsonError> {
        let graphic = match self {
            GraphicSpec::Empty => empty_graphic(),
            GraphicSpec::Rectangle {
                width,
                height,
                color,
            } => rectangle(*width, *height, checked(color)?)?,
            GraphicSpec::Ellipse {
                width,
                height,
                color,
            } => ellipse(*width, *height, checked(color)?)?,
            GraphicSpec::CircularSector {
                radius,
                angle,
                color,
            } => circular_sector(*radius, *angle, checked(color)?)?,
            GraphicSpec::Triangle {
                side1,
                side2,
                angle,
                color,
            } => triangle(*side1, *side2, *angle, checked(color)?)?,
            GraphicSpec::Text {
                text,
                font_name,
                text_size,
                color,
            } => text_with(fonts, text, font_name, *text_size, checked(color)?)?,
            GraphicSpec::Compose {
                foreground,
                background,
            } => compose(
                &operand("compose", "foreground", foreground, fonts)?,
                &operand("compose", "background", background, fonts)?,
            ),
            GraphicSpec::Pin {
                pinning_point,
                graphic,
            } => {
                let graphic = operand("pin", "graphic", graphic, fonts)?;
                match pinning_point {
                    PinningPoint::Named(anchor) => pin_at(*anchor, &graphic),
                    PinningPoint::Coordinates(point) => pin(*point, &graphic)?,
                }
            }
            GraphicSpec::Rotate { angle, graphic } => {
                rotate(*angle, &operand("rotate", "graphic", graphic, fonts)?)?
            }
            GraphicSpec::Beside {
                left_graphic,
                right_graphic,
            } => beside(
                &operand("beside", "left_graphic", left_graphic, fonts)?,
                &operand("beside", "right_graphic", right_graphic, fonts)?,
            ),
            GraphicSpec::Above {
                top_graphic,
                bottom_graphic,
            } => above(
                &operand("above", "top_graphic", top_graphic, fonts)?,
                &operand("above", "bottom_graphic", bottom_graphic, fonts)?,
            ),
            GraphicSpec::Overlay {
                front_graphic,
                back_graphic,
            } => overlay(
                &operand("overlay", "front_graphic", front_graphic, fonts)?,
                &operand("overlay", "back_graphic", back_graphic, fonts)?,
            ),
        };
        Ok(graphic)
    }

    /// The document for `graphic`, in stored form. Children are converted
    /// bottom-up with an explicit stack, each one exactly once.
    pub fn from_graphic(graphic: &Graphic) -> Result<GraphicSpec, JsonError> {
        let mut steps = vec![Step::Enter(graphic)];
        let mut children: Vec<Value> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node) => {
                    steps.push(Step::Leave(node));
                    match node.kind() {
                        Kind::Compose {
                            foreground,
                            background,
                        } => {
                            steps.push(Step::Enter(background));
                            steps.push(Step::Enter(foreground));
                        }
                        Kind::Pin { graphic, .. } | Kind::Rotate { graphic, .. } => {
                            steps.push(Step::Enter(graphic))
                        }
                        Kind::Empty | Kind::Primitive(_) => {}
                    }
                }
                Step::Leave(node) => {
                    let spec = node_spec(node, &mut children);
                    if steps.is_empty() {
                        return Ok(spec);
                    }
                    children.push(spec.into_value()?);
                }
            }
        }
        Ok(GraphicSpec::Empty)
    }

    /// The JSON object for this node. Operands are moved, not re-serialized.
    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        let value = match self {
            GraphicSpec::Compose {
                foreground,
                background,
            } => tagged("compose", [("foreground", foreground), ("background", background)]),
            GraphicSpec::Pin {
                pinning_point,
                graphic,
            } => tagged(
                "pin",
                [
                    ("pinning_point", serde_json::to_value(pinning_point)?),
                    ("graphic", graphic),
                ],
            ),
            GraphicSpec::Rotate { angle, graphic } => {
                tagged("rotate", [("angle", Value::from(angle)), ("graphic", graphic)])
            }
            GraphicSpec::Beside {
                left_graphic,
                right_graphic,
            } => tagged(
                "beside",
                [("left_graphic", left_graphic), ("right_graphic", right_graphic)],
            ),
            GraphicSpec::Above {
                top_graphic,
                bottom_graphic,
            } => tagged(
                "above",
                [("top_graphic", top_graphic), ("bottom_graphic", bottom_graphic)],
            ),
            GraphicSpec::Overlay {
                front_graphic,
                back_graphic,
            } => tagged(
                "overlay",
                [("front_graphic", front_graphic), ("back_graphic", back_graphic)],
            ),
            leaf => serde_json::to_value(leaf)?,
        };
        Ok(value)
    }
}

enum Step<'a> {
    Enter(&'a Graphic),
    Leave(&'a Graphic),
}

/// Builds the node for `graphic`, taking its already converted operands
/// from the end of `children`.
fn node_spec(graphic: &Graphic, children: &mut Vec<Value>) -> GraphicSpec {
    let mut take = || children.pop().unwrap_or_default();
    match graphic.kind() {
        Kind::Empty => GraphicSpec::Empty,
        Kind::Primitive(primitive) => {
            let color = primitive.color;
            match &primitive.shape {
                Shape::Rectangle { width, height } => GraphicSpec::Rectangle {
                    width: *width,
                    height: *height,
                    color,
                },
                Shape::Ellipse { width, height } => GraphicSpec::Ellipse {
                    width: *width,
                    height: *height,
                    color,
                },
                Shape::CircularSector { radius, angle } => GraphicSpec::CircularSector {
                    radius: *radius,
                    angle: *angle,
                    color,
                },
                Shape::Triangle {
                    side1,
                    side2,
                    angle,
                } => GraphicSpec::Triangle {
                    side1: *side1,
                    side2: *side2,
                    angle: *angle,
                    color,
                },
                Shape::Text {
                    content,
                    font,
                    size,
                } => GraphicSpec::Text {
                    text: content.clone(),
                    font_name: font.clone(),
                    text_size: *size,
                    color,
                },
            }
        }
        Kind::Compose { .. } => {
            let background = take();
            let foreground = take();
            GraphicSpec::Compose {
                foreground,
                background,
            }
        }
        Kind::Pin { anchor, .. } => GraphicSpec::Pin {
            pinning_point: PinningPoint::Named(*anchor),
            graphic: take(),
        },
        Kind::Rotate { angle, .. } => GraphicSpec::Rotate {
            angle: *angle,
            graphic: take(),
        },
    }
}

fn tagged<const N: usize>(node_type: &str, fields: [(&str, Value); N]) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::from(node_type));
    for (name, value) in fields {
        map.insert(name.to_string(), value);
    }
    Value::Object(map)
}

/// Colors read from a document still go through the range checks.
fn checked(color: &Color) -> Result<Color, GraphicError> {
    rgba_color(color.red, color.green, color.blue, color.opacity)
}

fn operand(
    operation: &str,
    parameter: &str,
    value: &Value,
    fonts: &dyn GlyphSource,
) -> Result<Graphic, JsonError> {
    let is_graphic = value
        .get("type")
        .and_then(Value::as_str)
        .map(|tag| NODE_TYPES.contains(&tag))
        .unwrap_or(false);
    if !is_graphic {
        return Err(GraphicError::operand(operation, parameter).into());
    }
    GraphicSpec::deserialize(value)?.build_with(fonts)
}

/// Parses and builds a graphic document.
pub fn from_json_str(document: &str) -> Result<Graphic, JsonError> {
    serde_json::from_str::<GraphicSpec>(document)?.build()
}

pub fn to_json_string(graphic: &Graphic) -> Result<String, JsonError> {
    let value = GraphicSpec::from_graphic(graphic)?.into_value()?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::operations::graphic_size;
    use crate::outline::Outline;
    use serde_json::json;

    struct NoGlyphs;

    impl GlyphSource for NoGlyphs {
        fn text_outline(&self, _content: &str, _font: &str, _size: f64) -> Outline {
            Outline::new()
        }
    }

    fn build(value: Value) -> Result<Graphic, JsonError> {
        GraphicSpec::deserialize(&value)?.build_with(&NoGlyphs)
    }

    fn red() -> Value {
        json!({"red": 255, "green": 0, "blue": 0, "opacity": 1.0})
    }

    #[test]
    fn test_decode_every_kind() {
        let doc = json!({
            "type": "above",
            "top_graphic": {
                "type": "beside",
                "left_graphic": {"type": "rectangle", "width": 10, "height": 20, "color": red()},
                "right_graphic": {"type": "ellipse", "width": 20, "height": 20, "color": red()}
            },
            "bottom_graphic": {
                "type": "overlay",
                "front_graphic": {"type": "circular_sector", "radius": 5, "angle": 90, "color": red()},
                "back_graphic": {
                    "type": "compose",
                    "foreground": {"type": "triangle", "side1": 10, "side2": 10, "angle": 60, "color": red()},
                    "background": {
                        "type": "rotate",
                        "angle": 90,
                        "graphic": {
                            "type": "pin",
                            "pinning_point": "top_left",
                            "graphic": {"type": "text", "text": "hi", "font_name": "Any",
                                        "text_size": 12, "color": red()}
                        }
                    }
                }
            }
        });
        let graphic = build(doc).unwrap();
        assert_eq!(graphic_size(&graphic).0, 30);
    }

    #[test]
    fn test_non_graphic_operand() {
        let doc = json!({"type": "beside", "left_graphic": {"type": "empty"}, "right_graphic": 42});
        let err = build(doc).unwrap_err();
        match err {
            JsonError::Graphic(GraphicError::InvalidOperand {
                operation,
                parameter,
            }) => {
                assert_eq!(operation, "beside");
                assert_eq!(parameter, "right_graphic");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_node_type_is_not_a_graphic() {
        let doc = json!({"type": "rotate", "angle": 10, "graphic": {"type": "hexagon"}});
        assert!(matches!(
            build(doc),
            Err(JsonError::Graphic(GraphicError::InvalidOperand { .. }))
        ));
    }

    #[test]
    fn test_parameters_are_validated() {
        let doc = json!({"type": "rectangle", "width": -1, "height": 20, "color": red()});
        assert!(matches!(
            build(doc),
            Err(JsonError::Graphic(GraphicError::InvalidParameter { parameter: "width", .. }))
        ));
        let doc = json!({"type": "rectangle", "width": 1, "height": 1,
                         "color": {"red": 0, "green": 0, "blue": 0, "opacity": 2.0}});
        assert!(build(doc).is_err());
    }

    #[test]
    fn test_pin_by_coordinates() {
        let inner = json!({"type": "rectangle", "width": 10, "height": 10, "color": red()});
        let ok = json!({"type": "pin", "pinning_point": {"x": -1.0, "y": 1.0}, "graphic": inner.clone()});
        assert_eq!(build(ok).unwrap().anchor(), Point::new(0.0, 0.0));
        let bad = json!({"type": "pin", "pinning_point": {"x": 0.3, "y": 1.0}, "graphic": inner});
        assert!(matches!(
            build(bad),
            Err(JsonError::Graphic(GraphicError::UnknownAnchor { .. }))
        ));
    }

    #[test]
    fn test_serialize_then_rebuild() {
        let graphic = beside(
            &rectangle(10.0, 20.0, RED).unwrap(),
            &rotate(30.0, &ellipse(8.0, 4.0, BLUE).unwrap()).unwrap(),
        );
        let value = GraphicSpec::from_graphic(&graphic)
            .unwrap()
            .into_value()
            .unwrap();
        assert_eq!(value["type"], "pin");
        assert_eq!(value["pinning_point"], "center");
        let rebuilt = build(value).unwrap();
        assert_eq!(rebuilt, graphic);
        assert_eq!(rebuilt.to_string(), graphic.to_string());
    }

    #[test]
    fn test_operands_match_derived_serialization() {
        let graphic = compose(
            &pin_at(Anchor::TopLeft, &rectangle(4.0, 2.0, RED).unwrap()),
            &rotate(90.0, &empty_graphic()).unwrap(),
        );
        let spec = GraphicSpec::from_graphic(&graphic).unwrap();
        let derived = serde_json::to_value(&spec).unwrap();
        assert_eq!(spec.into_value().unwrap(), derived);
        assert_eq!(derived["foreground"]["pinning_point"], "top_left");
        assert_eq!(derived["background"]["graphic"]["type"], "empty");
    }

    #[test]
    fn test_long_chain_serializes() {
        let block = rectangle(1.0, 1.0, RED).unwrap();
        let mut row = block.clone();
        for _ in 0..20 {
            row = beside(&row, &block);
        }
        let text = to_json_string(&row).unwrap();
        assert_eq!(from_json_str(&text).unwrap(), row);
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            from_json_str("{\"type\": \"rectangle\"}"),
            Err(JsonError::Syntax(_))
        ));
    }
}
