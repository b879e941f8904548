//! WebAssembly bindings for umlcanvas
//!
//! An [`Editor`] owns a `<canvas>` element and the current diagram session.
//! JavaScript reads a user-chosen file with [`read_file`], hands the text to
//! [`Editor::import_text`], and can switch themes or download the canvas as
//! a PNG.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, File, HtmlAnchorElement, HtmlCanvasElement, HtmlElement,
};

use crate::core::{Marker, Palette, Point, Surface, TextAlign, Theme};
use crate::diagram::Diagram;
use crate::render::{class_rect, draw_diagram};
use crate::xmi::XmiImporter;

const FONT: &str = "13px monospace";
const CANVAS_MARGIN: f64 = 20.0;
const DOWNLOAD_NAME: &str = "diagram.png";
const EXPORT_THEME: Theme = Theme::Default;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| js_error("no document available"))
}

/// Read a user-selected file as text
#[wasm_bindgen]
pub async fn read_file(file: File) -> Result<String, JsValue> {
    let text = JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or_else(|| js_error(format!("{} could not be read as text", file.name())))
}

/// Draws onto a 2D canvas context
struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
    palette: Palette,
}

impl CanvasSurface<'_> {
    fn set_dash(&self, dashed: bool) {
        let pattern = if dashed {
            Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0))
        } else {
            Array::new()
        };
        let _ = self.context.set_line_dash(&pattern);
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, palette: &Palette) {
        self.palette = *palette;
        self.context.set_fill_style_str(palette.background);
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
        self.context.set_line_width(1.0);
        self.context.set_font(FONT);
        self.context.set_text_baseline("top");
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.set_stroke_style_str(self.palette.line);
        self.context.stroke_rect(x, y, width, height);
    }

    fn stroke_line(&mut self, from: Point, to: Point, dashed: bool) {
        self.context.set_stroke_style_str(self.palette.line);
        self.set_dash(dashed);
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
        self.set_dash(false);
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign) {
        self.context.set_fill_style_str(self.palette.text);
        self.context.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self.context.fill_text(text, x, y);
    }

    fn marker(&mut self, tip: Point, from: Point, marker: Marker) {
        let Some(points) = marker.outline(tip, from) else {
            return;
        };
        self.context.begin_path();
        self.context.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            self.context.line_to(p.x, p.y);
        }
        self.context.close_path();
        self.context.set_fill_style_str(if marker.is_filled() {
            self.palette.line
        } else {
            self.palette.background
        });
        self.context.fill();
        self.context.set_stroke_style_str(self.palette.line);
        self.context.stroke();
    }
}

/// The browser-side editor: one canvas, one diagram session, one theme
#[wasm_bindgen]
pub struct Editor {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    diagram: Diagram,
    theme: Theme,
}

#[wasm_bindgen]
impl Editor {
    /// Attach to the `<canvas>` element with the given id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<Editor, JsValue> {
        let canvas: HtmlCanvasElement = document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("no element with id '{}'", canvas_id)))?
            .dyn_into()
            .map_err(|_| js_error(format!("'{}' is not a canvas", canvas_id)))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into()
            .map_err(|_| js_error("unexpected canvas context type"))?;

        Ok(Editor {
            canvas,
            context,
            diagram: Diagram::new(),
            theme: Theme::default(),
        })
    }

    /// Replace the session with a new import and repaint
    ///
    /// On failure the previous session stays on screen.
    pub fn import_text(&mut self, text: &str) -> Result<(), JsValue> {
        let diagram = XmiImporter::new().import(text).map_err(js_error)?;
        self.diagram = diagram;
        self.repaint()
    }

    /// Switch theme by name and repaint
    pub fn apply_theme(&mut self, name: &str) -> Result<(), JsValue> {
        self.theme = name.parse().map_err(js_error)?;

        let palette = self.theme.palette();
        if let Some(body) = document()?.body() {
            let style = body.style();
            style.set_property("background-color", palette.background)?;
            style.set_property("color", palette.text)?;
        }
        self.repaint()
    }

    /// Redraw the whole session, growing the canvas to fit it
    pub fn repaint(&self) -> Result<(), JsValue> {
        self.paint(self.theme);
        Ok(())
    }

    /// Download the session as `diagram.png`
    ///
    /// The image is always drawn in the default theme; the screen goes back
    /// to the current theme afterwards.
    pub fn export_png(&self) -> Result<(), JsValue> {
        self.paint(EXPORT_THEME);
        let url = self.canvas.to_data_url_with_type("image/png");
        self.paint(self.theme);
        let url = url?;
        let document = document()?;
        let body: HtmlElement = document
            .body()
            .ok_or_else(|| js_error("document has no body"))?;

        let link: HtmlAnchorElement = document
            .create_element("a")?
            .dyn_into()
            .map_err(|_| js_error("could not create a link element"))?;
        link.set_href(&url);
        link.set_download(DOWNLOAD_NAME);
        body.append_child(&link)?;
        link.click();
        body.remove_child(&link)?;
        Ok(())
    }

    /// The current session (classes, relationships, warnings) as JSON
    pub fn summary_json(&self) -> Result<String, JsValue> {
        self.diagram.to_json().map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.theme.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn class_count(&self) -> usize {
        self.diagram.class_count()
    }
}

impl Editor {
    fn paint(&self, theme: Theme) {
        self.fit_canvas();
        let mut surface = CanvasSurface {
            context: &self.context,
            width: self.canvas.width() as f64,
            height: self.canvas.height() as f64,
            palette: theme.palette(),
        };
        let summary = draw_diagram(&self.diagram, &mut surface, theme);
        if summary.skipped > 0 {
            tracing::warn!(skipped = summary.skipped, "Some elements were not drawn");
        }
    }

    fn fit_canvas(&self) {
        let (right, bottom) = self
            .diagram
            .classes()
            .iter()
            .map(class_rect)
            .fold((0.0f64, 0.0f64), |(r, b), rect| {
                (r.max(rect.x + rect.width), b.max(rect.y + rect.height))
            });
        let width = (right + CANVAS_MARGIN).ceil() as u32;
        let height = (bottom + CANVAS_MARGIN).ceil() as u32;
        if width > self.canvas.width() {
            self.canvas.set_width(width);
        }
        if height > self.canvas.height() {
            self.canvas.set_height(height);
        }
    }
}
