//! `Surface` over an HTML `<canvas>` and its 2D context.

use scribble_core::{
    BufferSize, DisplayBox, EncodedImage, Error, Result, Segment, StrokeStyle, Surface,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> std::result::Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }
}

/// The element's padding box in client coordinates: the border-box corner
/// moved in by the border widths, sized by `clientWidth`/`clientHeight`.
/// `offsetX`/`offsetY` are measured from this box.
fn padding_box(border_origin: (f64, f64), border: (i32, i32), client: (i32, i32)) -> DisplayBox {
    DisplayBox::new(
        border_origin.0 + f64::from(border.0),
        border_origin.1 + f64::from(border.1),
        f64::from(client.0),
        f64::from(client.1),
    )
}

fn js_error(context: &str, err: JsValue) -> Error {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    Error::Surface(format!("{context}: {detail}"))
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn buffer_size(&self) -> BufferSize {
        BufferSize::new(self.canvas.width(), self.canvas.height())
    }

    fn display_box(&self) -> DisplayBox {
        let rect = self.canvas.get_bounding_client_rect();
        padding_box(
            (rect.x(), rect.y()),
            (self.canvas.client_left(), self.canvas.client_top()),
            (self.canvas.client_width(), self.canvas.client_height()),
        )
    }

    fn resize_buffer(&mut self, size: BufferSize) {
        // Assigning either dimension resets the bitmap and context state.
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn stroke_segment(&mut self, segment: Segment, style: &StrokeStyle) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(segment.from.x as f64, segment.from.y as f64);
        ctx.line_to(segment.to.x as f64, segment.to.y as f64);
        ctx.set_stroke_style_str(&style.color.to_css());
        ctx.set_line_cap(StrokeStyle::LINE_CAP);
        ctx.set_line_width(style.width);
        ctx.stroke();
    }

    fn encode(&self) -> Result<EncodedImage> {
        let url = self
            .canvas
            .to_data_url()
            .map_err(|e| js_error("toDataURL", e))?;
        EncodedImage::from_stored(&url)
    }

    fn draw_image(&mut self, image: &HtmlImageElement) -> Result<()> {
        self.ctx
            .draw_image_with_html_image_element(image, 0.0, 0.0)
            .map_err(|e| js_error("drawImage", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scribble_core::Point;

    #[test]
    fn padding_box_excludes_the_border() {
        // 3px border around a 400x200 content+padding area at (10, 20).
        let display = padding_box((10.0, 20.0), (3, 3), (400, 200));
        assert_eq!(display.origin(), Point::new(13.0, 23.0));
        assert_eq!(display.width(), 400.0);
        assert_eq!(display.height(), 200.0);
        assert_eq!(display.buffer_size(), BufferSize::new(400, 200));
    }

    #[test]
    fn unstyled_canvas_matches_its_bounding_box() {
        let display = padding_box((0.5, 8.0), (0, 0), (300, 150));
        assert_eq!(display, DisplayBox::new(0.5, 8.0, 300.0, 150.0));
    }
}
