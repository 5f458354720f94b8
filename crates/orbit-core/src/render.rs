use crate::geometry::Point;
use palette::Srgba;

pub type Color = Srgba<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleStrip,
    LineStrip,
}

/// The drawing surface the menu renders onto. Coordinates are screen-space pixels.
pub trait DrawContext {
    fn draw_primitives(&mut self, topology: Topology, points: &[Point], color: Color);

    fn draw_line(&mut self, from: Point, to: Point, color: Color);
}

/// Multiplies every point by the display scale before forwarding it.
pub struct Scaled<'a, D: DrawContext + ?Sized> {
    inner: &'a mut D,
    scale: f64,
}

impl<'a, D: DrawContext + ?Sized> Scaled<'a, D> {
    pub fn new(inner: &'a mut D, scale: f64) -> Self {
        Self { inner, scale }
    }
}

impl<D: DrawContext + ?Sized> DrawContext for Scaled<'_, D> {
    fn draw_primitives(&mut self, topology: Topology, points: &[Point], color: Color) {
        let scaled: Vec<Point> = points.iter().map(|p| p.scale(self.scale)).collect();
        self.inner.draw_primitives(topology, &scaled, color);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.inner
            .draw_line(from.scale(self.scale), to.scale(self.scale), color);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Primitives {
        topology: Topology,
        points: Vec<Point>,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
}

/// Records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn primitives(&self, topology: Topology) -> impl Iterator<Item = &[Point]> + '_ {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Primitives {
                topology: t,
                points,
                ..
            } if *t == topology => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl DrawContext for DrawList {
    fn draw_primitives(&mut self, topology: Topology, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Primitives {
            topology,
            points: points.to_vec(),
            color,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}
