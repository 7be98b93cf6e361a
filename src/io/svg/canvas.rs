//! In-memory drawing surface.
//!
//! Renderers push elements in paint order; nothing is written until the canvas is
//! serialized, so tests can inspect exactly what each view drew.

use std::io::Write;

use anyhow::{Ok, Result};

use super::{escape, Rgb};

/// A single drawable element with a CSS class and an optional inline fill.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Path { class: String, d: String, fill: Option<Rgb> },
    Rect { class: String, x: f64, y: f64, width: f64, height: f64, fill: Option<Rgb> },
    Line { class: String, x1: f64, y1: f64, x2: f64, y2: f64 },
    Text { class: String, x: f64, y: f64, anchor: Option<&'static str>, content: String },
}

impl Element {
    pub fn class(&self) -> &str {
        match self {
            Element::Path { class, .. }
            | Element::Rect { class, .. }
            | Element::Line { class, .. }
            | Element::Text { class, .. } => class,
        }
    }

    pub fn fill(&self) -> Option<Rgb> {
        match self {
            Element::Path { fill, .. } | Element::Rect { fill, .. } => *fill,
            _ => None,
        }
    }

    /// True if `name` is one of the space-separated class tokens.
    pub fn has_class(&self, name: &str) -> bool {
        self.class().split_whitespace().any(|token| token == name)
    }

    fn write_svg(&self, writer: &mut impl Write) -> Result<()> {
        let style = |fill: &Option<Rgb>| fill.map(|c| format!(r#" style="fill:{c}""#)).unwrap_or_default();
        match self {
            Element::Path { class, d, fill } => {
                writeln!(writer, r#"<path class="{}" d="{d}"{}/>"#, escape(class), style(fill))?;
            }
            Element::Rect { class, x, y, width, height, fill } => {
                writeln!(writer, r#"<rect class="{}" x="{x:.3}" y="{y:.3}" width="{width:.3}" height="{height:.3}"{}/>"#,
                    escape(class), style(fill))?;
            }
            Element::Line { class, x1, y1, x2, y2 } => {
                writeln!(writer, r#"<line class="{}" x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}"/>"#, escape(class))?;
            }
            Element::Text { class, x, y, anchor, content } => {
                let anchor = anchor.map(|a| format!(r#" text-anchor="{a}""#)).unwrap_or_default();
                writeln!(writer, r#"<text class="{}" x="{x:.3}" y="{y:.3}"{anchor}>{}</text>"#, escape(class), escape(content))?;
            }
        }
        Ok(())
    }
}

/// A fixed-size canvas collecting elements in paint order.
#[derive(Clone, Debug)]
pub struct SvgCanvas {
    class: String,
    width: f64,
    height: f64,
    styles: &'static str,
    elements: Vec<Element>,
}

impl SvgCanvas {
    pub fn new(class: &str, width: f64, height: f64) -> Self {
        Self { class: class.to_string(), width, height, styles: "", elements: Vec::new() }
    }

    /// Attach the stylesheet emitted in `<defs>`.
    pub fn with_styles(mut self, styles: &'static str) -> Self {
        self.styles = styles;
        self
    }

    #[inline] pub fn elements(&self) -> &[Element] { &self.elements }

    /// Elements carrying the given class token, in paint order.
    pub fn elements_with_class<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |element| element.has_class(name))
    }

    pub fn path(&mut self, class: impl Into<String>, d: impl Into<String>, fill: Option<Rgb>) {
        self.elements.push(Element::Path { class: class.into(), d: d.into(), fill });
    }

    pub fn rect(&mut self, class: impl Into<String>, x: f64, y: f64, width: f64, height: f64, fill: Option<Rgb>) {
        self.elements.push(Element::Rect { class: class.into(), x, y, width, height, fill });
    }

    pub fn line(&mut self, class: impl Into<String>, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) {
        self.elements.push(Element::Line { class: class.into(), x1, y1, x2, y2 });
    }

    pub fn text(&mut self, class: impl Into<String>, x: f64, y: f64, anchor: Option<&'static str>, content: impl Into<String>) {
        self.elements.push(Element::Text { class: class.into(), x, y, anchor, content: content.into() });
    }

    /// Serialize as a standalone SVG document.
    pub fn write_svg(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" class="{}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##,
            escape(&self.class), w = self.width, h = self.height)?;
        if !self.styles.is_empty() {
            writeln!(writer, "<defs>\n<style>{}</style>\n</defs>", self.styles)?;
        }
        for element in &self.elements {
            element.write_svg(writer)?;
        }
        writeln!(writer, "</svg>")?;
        Ok(())
    }

    pub fn to_svg_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_svg(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
