//! Plain vector shapes and corner brackets.

use serde::{Deserialize, Serialize};

use super::{LayerEffect, RenderContext, default_width};
use crate::error::RenderResult;
use crate::geometry::{Corner, Point, Rect, corner_bracket};
use crate::style::Color;

/// A polyline through two or more points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub points: Vec<Point>,
    pub color: Color,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl LineSpec {
    pub fn new(points: impl Into<Vec<Point>>, color: Color, width: f32) -> Self {
        Self {
            points: points.into(),
            color,
            width,
        }
    }

    /// A single straight segment.
    pub fn segment(start: Point, end: Point, color: Color, width: f32) -> Self {
        Self::new(vec![start, end], color, width)
    }
}

impl LayerEffect for LineSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        ctx.canvas.polyline(&self.points, self.color, self.width);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub rect: Rect,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub outline: Option<Color>,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl RectSpec {
    pub fn filled(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            fill: Some(color),
            outline: None,
            width: 1.0,
        }
    }

    pub fn outlined(rect: Rect, color: Color, width: f32) -> Self {
        Self {
            rect,
            fill: None,
            outline: Some(color),
            width,
        }
    }

    pub fn with_outline(mut self, color: Color, width: f32) -> Self {
        self.outline = Some(color);
        self.width = width;
        self
    }
}

impl LayerEffect for RectSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        ctx.canvas
            .rectangle(self.rect, self.fill, self.outline, self.width);
        Ok(())
    }
}

/// The ellipse inscribed in `bounds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseSpec {
    pub bounds: Rect,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub outline: Option<Color>,
    #[serde(default = "default_width")]
    pub width: f32,
}

impl EllipseSpec {
    pub fn filled(bounds: Rect, color: Color) -> Self {
        Self {
            bounds,
            fill: Some(color),
            outline: None,
            width: 1.0,
        }
    }

    pub fn outlined(bounds: Rect, color: Color, width: f32) -> Self {
        Self {
            bounds,
            fill: None,
            outline: Some(color),
            width,
        }
    }
}

impl LayerEffect for EllipseSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        ctx.canvas
            .ellipse(self.bounds, self.fill, self.outline, self.width);
        Ok(())
    }
}

/// L-shaped brackets in selected corners of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSpec {
    pub corners: Vec<Corner>,
    /// Distance of each bracket's elbow from the canvas edges.
    pub margin: f32,
    /// Length of each arm.
    pub length: f32,
    pub thickness: f32,
    pub color: Color,
}

impl LayerEffect for BracketSpec {
    fn draw(&self, ctx: &mut RenderContext<'_>) -> RenderResult<()> {
        let bounds = ctx.bounds();
        for &corner in &self.corners {
            for arm in corner_bracket(corner, bounds, self.margin, self.length) {
                ctx.canvas
                    .line(arm.start, arm.end, self.color, self.thickness);
            }
        }
        Ok(())
    }
}
