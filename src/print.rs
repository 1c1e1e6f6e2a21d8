//! Printer - Graphics as Localized Expressions
//!
//! A graphic prints as the nested calls that would build it, with the
//! function, point and color names of the chosen language. Derived
//! combinators print in their stored form (pins and compositions).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{Color, NAMED_COLORS};
use crate::graphic::{Graphic, Kind, Shape};
use crate::point_names::Anchor;

/// Language of the printed names. Passed explicitly; there is no global
/// language setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    It,
    De,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::It, Locale::De, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::It => "it",
            Locale::De => "de",
            Locale::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }
}

struct Vocabulary {
    rectangle: &'static str,
    empty_graphic: &'static str,
    ellipse: &'static str,
    circular_sector: &'static str,
    triangle: &'static str,
    text: &'static str,
    compose: &'static str,
    pin: &'static str,
    rotate: &'static str,
    rgb_color: &'static str,
    /// Same order as `Anchor::ALL`.
    points: [&'static str; 9],
    /// Same order as `NAMED_COLORS`.
    colors: [&'static str; 9],
}

const ENGLISH: Vocabulary = Vocabulary {
    rectangle: "rectangle",
    empty_graphic: "empty_graphic",
    ellipse: "ellipse",
    circular_sector: "circular_sector",
    triangle: "triangle",
    text: "text",
    compose: "compose",
    pin: "pin",
    rotate: "rotate",
    rgb_color: "rgb_color",
    points: [
        "top_left",
        "top_center",
        "top_right",
        "center_left",
        "center",
        "center_right",
        "bottom_left",
        "bottom_center",
        "bottom_right",
    ],
    colors: [
        "black",
        "red",
        "green",
        "blue",
        "yellow",
        "magenta",
        "cyan",
        "white",
        "transparent",
    ],
};

const ITALIAN: Vocabulary = Vocabulary {
    rectangle: "rettangolo",
    empty_graphic: "grafica_vuota",
    ellipse: "ellisse",
    circular_sector: "settore_circolare",
    triangle: "triangolo",
    text: "testo",
    compose: "componi",
    pin: "fissa",
    rotate: "ruota",
    rgb_color: "colore_rgb",
    points: [
        "alto_sinistra",
        "alto_centro",
        "alto_destra",
        "centro_sinistra",
        "centro",
        "centro_destra",
        "basso_sinistra",
        "basso_centro",
        "basso_destra",
    ],
    colors: [
        "nero",
        "rosso",
        "verde",
        "blu",
        "giallo",
        "magenta",
        "ciano",
        "bianco",
        "trasparente",
    ],
};

const GERMAN: Vocabulary = Vocabulary {
    rectangle: "rechteck",
    empty_graphic: "leere_grafik",
    ellipse: "ellipse",
    circular_sector: "kreis_sektor",
    triangle: "dreieck",
    text: "text",
    compose: "kombiniere",
    pin: "fixiere",
    rotate: "drehe",
    rgb_color: "rgb_farbe",
    points: [
        "oben_links",
        "oben_mitte",
        "oben_rechts",
        "mitte_links",
        "mitte",
        "mitte_rechts",
        "unten_links",
        "unten_mitte",
        "unten_rechts",
    ],
    colors: [
        "schwarz",
        "rot",
        "gruen",
        "blau",
        "gelb",
        "magenta",
        "cyan",
        "weiss",
        "transparent",
    ],
};

const FRENCH: Vocabulary = Vocabulary {
    rectangle: "rectangle",
    empty_graphic: "graphique_vide",
    ellipse: "ellipse",
    circular_sector: "secteur_circulaire",
    triangle: "triangle",
    text: "texte",
    compose: "compose",
    pin: "ancre",
    rotate: "pivote",
    rgb_color: "couleur_rgb",
    points: [
        "haut_gauche",
        "haut_centre",
        "haut_droite",
        "centre_gauche",
        "centre",
        "centre_droite",
        "bas_gauche",
        "bas_centre",
        "bas_droite",
    ],
    colors: [
        "noir",
        "rouge",
        "vert",
        "bleu",
        "jaune",
        "magenta",
        "cyan",
        "blanc",
        "transparent",
    ],
};

fn vocabulary(locale: Locale) -> &'static Vocabulary {
    match locale {
        Locale::En => &ENGLISH,
        Locale::It => &ITALIAN,
        Locale::De => &GERMAN,
        Locale::Fr => &FRENCH,
    }
}

impl Vocabulary {
    fn point(&self, anchor: Anchor) -> &'static str {
        let index = Anchor::ALL.iter().position(|a| *a == anchor).unwrap_or(0);
        self.points[index]
    }

    fn color(&self, color: &Color) -> String {
        if let Some(index) = NAMED_COLORS.iter().position(|(_, named)| named == color) {
            return self.colors[index].to_string();
        }
        if color.opacity == 1.0 {
            format!("{}({}, {}, {})", self.rgb_color, color.red, color.green, color.blue)
        } else {
            format!(
                "{}({}, {}, {}, {})",
                self.rgb_color, color.red, color.green, color.blue, color.opacity
            )
        }
    }
}

enum Piece<'a> {
    Node(&'a Graphic),
    Literal(String),
}

/// The expression building `graphic`, with names in `locale`.
pub fn print_expression(graphic: &Graphic, locale: Locale) -> String {
    let words = vocabulary(locale);
    let mut out = String::new();
    let mut pending = vec![Piece::Node(graphic)];
    while let Some(piece) = pending.pop() {
        let node = match piece {
            Piece::Literal(text) => {
                out.push_str(&text);
                continue;
            }
            Piece::Node(node) => node,
        };
        match node.kind() {
            Kind::Empty => {
                out.push_str(words.empty_graphic);
                out.push_str("()");
            }
            Kind::Primitive(primitive) => {
                let color = words.color(&primitive.color);
                let call = match &primitive.shape {
                    Shape::Rectangle { width, height } => {
                        format!("{}({}, {}, {})", words.rectangle, width, height, color)
                    }
                    Shape::Ellipse { width, height } => {
                        format!("{}({}, {}, {})", words.ellipse, width, height, color)
                    }
                    Shape::CircularSector { radius, angle } => {
                        format!("{}({}, {}, {})", words.circular_sector, radius, angle, color)
                    }
                    Shape::Triangle {
                        side1,
                        side2,
                        angle,
                    } => format!(
                        "{}({}, {}, {}, {})",
                        words.triangle, side1, side2, angle, color
                    ),
                    Shape::Text {
                        content,
                        font,
                        size,
                    } => format!("{}({:?}, {:?}, {}, {})", words.text, content, font, size, color),
                };
                out.push_str(&call);
            }
            Kind::Compose {
                foreground,
                background,
            } => {
                out.push_str(words.compose);
                out.push('(');
                pending.push(Piece::Literal(")".to_string()));
                pending.push(Piece::Node(background));
                pending.push(Piece::Literal(", ".to_string()));
                pending.push(Piece::Node(foreground));
            }
            Kind::Pin { graphic, anchor } => {
                out.push_str(&format!("{}({}, ", words.pin, words.point(*anchor)));
                pending.push(Piece::Literal(")".to_string()));
                pending.push(Piece::Node(graphic));
            }
            Kind::Rotate { graphic, angle } => {
                out.push_str(&format!("{}({}, ", words.rotate, angle));
                pending.push(Piece::Literal(")".to_string()));
                pending.push(Piece::Node(graphic));
            }
        }
    }
    out
}

impl fmt::Display for Graphic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_expression(self, Locale::En))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{rgb_color, rgba_color, BLUE, RED};
    use crate::operations::{beside, compose, pin_at, rotate};
    use crate::primitives::{ellipse, empty_graphic, rectangle, triangle};

    fn sample() -> Graphic {
        compose(
            &rectangle(10.0, 20.0, RED).unwrap(),
            &rotate(45.0, &ellipse(5.0, 5.0, BLUE).unwrap()).unwrap(),
        )
    }

    #[test]
    fn test_english_expression() {
        assert_eq!(
            print_expression(&sample(), Locale::En),
            "compose(rectangle(10, 20, red), rotate(45, ellipse(5, 5, blue)))"
        );
        assert_eq!(sample().to_string(), print_expression(&sample(), Locale::En));
    }

    #[test]
    fn test_localized_expressions() {
        assert_eq!(
            print_expression(&sample(), Locale::It),
            "componi(rettangolo(10, 20, rosso), ruota(45, ellisse(5, 5, blu)))"
        );
        assert_eq!(
            print_expression(&sample(), Locale::De),
            "kombiniere(rechteck(10, 20, rot), drehe(45, ellipse(5, 5, blau)))"
        );
        assert_eq!(
            print_expression(&sample(), Locale::Fr),
            "compose(rectangle(10, 20, rouge), pivote(45, ellipse(5, 5, bleu)))"
        );
    }

    #[test]
    fn test_pins_print_point_names() {
        let r = rectangle(1.5, 2.0, rgb_color(1, 2, 3)).unwrap();
        let pinned = pin_at(Anchor::BottomLeft, &r);
        assert_eq!(
            print_expression(&pinned, Locale::En),
            "pin(bottom_left, rectangle(1.5, 2, rgb_color(1, 2, 3)))"
        );
        assert_eq!(
            print_expression(&pinned, Locale::It),
            "fissa(basso_sinistra, rettangolo(1.5, 2, colore_rgb(1, 2, 3)))"
        );
    }

    #[test]
    fn test_translucent_color_prints_opacity() {
        let t = triangle(3.0, 4.0, 90.0, rgba_color(10, 20, 30, 0.5).unwrap()).unwrap();
        assert_eq!(
            print_expression(&t, Locale::Fr),
            "triangle(3, 4, 90, couleur_rgb(10, 20, 30, 0.5))"
        );
    }

    #[test]
    fn test_derived_combinators_print_stored_form() {
        let e = empty_graphic();
        assert_eq!(
            print_expression(&beside(&e, &e), Locale::En),
            "pin(center, compose(pin(center_right, empty_graphic()), pin(center_left, empty_graphic())))"
        );
    }

    #[test]
    fn test_locale_codes() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
        assert_eq!(Locale::from_code("es"), None);
    }

    #[test]
    fn test_deep_tree_prints_iteratively() {
        let mut g = rectangle(1.0, 1.0, RED).unwrap();
        for _ in 0..100_000 {
            g = pin_at(Anchor::Center, &g);
        }
        assert!(print_expression(&g, Locale::En).ends_with(")"));
    }
}
