use super::model::MenuModel;
use super::{CENTER_GLYPH_SIZE, LABEL_FONT_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use orbit_core::{Color, DrawContext, Hover, Point, Scaled, Topology};

/// Cairo-backed drawing surface. Cairo errors don't fit the infallible
/// `DrawContext` calls, so the first one is kept and reported by [`draw`].
struct CairoCanvas<'a> {
    cr: &'a Context,
    error: Option<cairo::Error>,
}

impl<'a> CairoCanvas<'a> {
    fn new(cr: &'a Context) -> Self {
        Self { cr, error: None }
    }

    fn record(&mut self, result: Result<(), cairo::Error>) {
        if let Err(e) = result
            && self.error.is_none()
        {
            self.error = Some(e);
        }
    }

    fn set_color(&self, color: Color) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn finish(self) -> Result<(), cairo::Error> {
        self.error.map_or(Ok(()), Err)
    }
}

impl DrawContext for CairoCanvas<'_> {
    fn draw_primitives(&mut self, topology: Topology, points: &[Point], color: Color) {
        if points.len() < 2 {
            return;
        }
        self.set_color(color);
        match topology {
            Topology::TriangleStrip => {
                // the strip's boundary: even points forward, odd points back
                let boundary = points
                    .iter()
                    .step_by(2)
                    .chain(points.iter().skip(1).step_by(2).rev());
                for (i, p) in boundary.enumerate() {
                    if i == 0 {
                        self.cr.move_to(p.x, p.y);
                    } else {
                        self.cr.line_to(p.x, p.y);
                    }
                }
                self.cr.close_path();
                let result = self.cr.fill();
                self.record(result);
            }
            Topology::LineStrip => {
                self.cr.move_to(points[0].x, points[0].y);
                for p in &points[1..] {
                    self.cr.line_to(p.x, p.y);
                }
                let result = self.cr.stroke();
                self.record(result);
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.set_color(color);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        let result = self.cr.stroke();
        self.record(result);
    }
}

fn draw_text(
    cr: &Context,
    at: Point,
    text: &str,
    size: f64,
    color: Color,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(at.x - ext.width() / 2.0, at.y + ext.height() / 2.0);
        cr.show_text(text)?;
    }
    Ok(())
}

pub fn draw(cr: &Context, model: &MenuModel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let menu = &model.menu;
    let Some(layer) = menu.active_layer() else {
        return Ok(());
    };
    let scale = model.scale_factor;

    cr.set_line_width(1.5 * scale);
    let mut canvas = CairoCanvas::new(cr);
    let center_color = if menu.hover() == Hover::Center {
        colors.center_hover
    } else {
        colors.center
    };
    menu.draw(
        &mut Scaled::new(&mut canvas, scale),
        &colors.sectors,
        center_color,
    );
    canvas.finish()?;

    for item in layer.items().iter().filter(|i| i.visible()) {
        draw_text(
            cr,
            item.anchor().scale(scale),
            &item.label,
            LABEL_FONT_SIZE * scale,
            colors.label,
        )?;
    }

    if let Some(glyph) = colors.center_glyph(menu.center_style()) {
        draw_text(
            cr,
            menu.center().scale(scale),
            glyph,
            CENTER_GLYPH_SIZE * scale,
            colors.label,
        )?;
    }
    Ok(())
}
