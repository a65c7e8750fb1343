use crate::browser;
use anyhow::{anyhow, Error, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - because we control the closure creation and specify the expected type,
    // in principle this should be generally safe (unsafe) code
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub use self::input::KeyState;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `now` is the wall clock in milliseconds, sampled once per frame
    fn update(&mut self, keystate: &KeyState, now: f64);
    fn draw(&self, renderer: &Renderer);
    fn resize(&mut self, _size: Size) {}
}

// length of a frame in milliseconds
const FRAME_SIZE: f64 = 1.0 / 60.0 * 1000.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f64,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut keyevent_receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer {
            // moving this outside of request_animation_frame closure no longer
            // requires us to use the expect() syntax ... nice
            context: browser::context()?,
        };
        let mut keystate = KeyState::new();
        let mut canvas_size = browser::canvas_size()?;
        game.resize(canvas_size);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            input::process_input(&mut keystate, &mut keyevent_receiver);

            // resize is polled, the canvas follows the window
            if let Ok(window_size) = browser::window_size() {
                if window_size != canvas_size {
                    match browser::resize_canvas(window_size) {
                        Ok(()) => {
                            canvas_size = window_size;
                            game.resize(window_size);
                        }
                        Err(err) => log::error!("could not resize canvas: {:#}", err),
                    }
                }
            }

            game_loop.accumulated_delta += perf - game_loop.last_frame;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(&keystate, perf);
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);
            if let Some(closure) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(closure) {
                    log::error!("game loop stopped: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Size {
        Size {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Axis aligned rectangle, origin top left
#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Rect::new(position.x, position.y, size.width, size.height)
    }

    /// Rectangle of `size` whose center is `center`
    pub fn centered_on(center: Point, size: Size) -> Self {
        Rect::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlap on both axes, touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive on all four edges
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[derive(Debug, Copy, Clone)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn fill(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn outline(&self, rect: &Rect, color: &str, line_width: f64) {
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(line_width);
        self.context
            .stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    /// Pixel art, images are drawn without smoothing
    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) {
        self.context.set_image_smoothing_enabled(false);
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.x,
                destination.y,
                destination.width,
                destination.height,
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    pub fn draw_entire_image(&self, image: &HtmlImageElement, position: Point) {
        self.draw_image(image, &Rect::from_parts(position, image_size(image)));
    }

    pub fn draw_text(&self, text: &str, position: Point, font_size: f64, color: &str, align: TextAlign) {
        self.context.set_font(&format!("{}px monospace", font_size));
        self.context.set_fill_style_str(color);
        self.context.set_text_align(align.as_str());
        self.context.set_text_baseline("middle");
        if let Err(err) = self.context.fill_text(text, position.x, position.y) {
            log::warn!("could not draw text {:?}: {:#?}", text, err);
        }
    }

    pub fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        self.context.set_font(&format!("{}px monospace", font_size));
        self.context
            .measure_text(text)
            .map(|metrics| metrics.width())
            // monospace fallback
            .unwrap_or(text.chars().count() as f64 * font_size * 0.6)
    }
}

pub fn image_size(image: &HtmlImageElement) -> Size {
    Size::new(image.width() as f64, image.height() as f64)
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let source_name = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image {}: {:#?}",
                source_name,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // ?? - double unwrap because Result<Result<(), Error>, oneshot::Canceled>
    // - first unwrap yields channel result : Result<(), Error>
    // - second unwrap yields image load result : () or propagating Error
    rx.await??;

    Ok(image)
}

/// Keyboard and pointer events are collected by browser callbacks into an
/// unbounded channel, the game loop drains it once per frame into KeyState
/// so the game only ever polls a snapshot
pub mod input {
    use super::Point;
    use crate::browser;
    use anyhow::Result;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;

    pub enum InputEvent {
        KeyDown(String),
        KeyUp(String),
        PointerMoved(Point),
    }

    #[derive(Debug, Default)]
    pub struct KeyState {
        pressed_keys: HashSet<String>,
        pointer: Option<Point>,
    }

    impl KeyState {
        pub fn new() -> Self {
            KeyState::default()
        }

        /// `code` is a KeyboardEvent.code, e.g. "ArrowLeft", "KeyE", "Space"
        pub fn is_pressed(&self, code: &str) -> bool {
            self.pressed_keys.contains(code)
        }

        pub fn pointer(&self) -> Option<Point> {
            self.pointer
        }

        pub fn set_pressed(&mut self, code: &str) {
            self.pressed_keys.insert(code.to_string());
        }

        pub fn set_released(&mut self, code: &str) {
            self.pressed_keys.remove(code);
        }

        fn set_pointer(&mut self, point: Point) {
            self.pointer = Some(point);
        }
    }

    pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
        let (keydown_sender, receiver) = unbounded();
        let keydown_sender = Rc::new(RefCell::new(keydown_sender));
        let keyup_sender = Rc::clone(&keydown_sender);
        let pointer_sender = Rc::clone(&keydown_sender);

        let onkeydown = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let _ = keydown_sender
                .borrow_mut()
                .start_send(InputEvent::KeyDown(event.code()));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        let onkeyup = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let _ = keyup_sender
                .borrow_mut()
                .start_send(InputEvent::KeyUp(event.code()));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        let onmousemove = browser::closure_wrap(Box::new(move |event: web_sys::MouseEvent| {
            let point = Point::new(event.offset_x() as f64, event.offset_y() as f64);
            let _ = pointer_sender
                .borrow_mut()
                .start_send(InputEvent::PointerMoved(point));
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);

        let window = browser::window()?;
        window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
        window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        browser::canvas()?.set_onmousemove(Some(onmousemove.as_ref().unchecked_ref()));

        // listeners live for the whole page
        onkeydown.forget();
        onkeyup.forget();
        onmousemove.forget();

        Ok(receiver)
    }

    pub fn process_input(state: &mut KeyState, receiver: &mut UnboundedReceiver<InputEvent>) {
        loop {
            match receiver.try_next() {
                Ok(None) => break,
                Err(_err) => break,
                Ok(Some(InputEvent::KeyDown(code))) => state.set_pressed(&code),
                Ok(Some(InputEvent::KeyUp(code))) => state.set_released(&code),
                Ok(Some(InputEvent::PointerMoved(point))) => state.set_pointer(point),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
            Rect::new(-3.0, 2.0, 4.0, 40.0),
            Rect::new(100.0, 100.0, 1.0, 1.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.intersects(b), b.intersects(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 5.0, 5.0)));
        assert!(a.intersects(&Rect::new(9.9, 9.9, 5.0, 5.0)));
    }

    #[test]
    fn overlap_on_one_axis_only_is_not_a_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(2.0, 20.0, 4.0, 4.0)));
        assert!(!a.intersects(&Rect::new(20.0, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn contains_is_inclusive() {
        let bay = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(bay.contains(Point::new(10.0, 10.0)));
        assert!(bay.contains(Point::new(30.0, 30.0)));
        assert!(!bay.contains(Point::new(30.01, 20.0)));
        assert!(!bay.contains(Point::new(20.0, 9.99)));
    }

    #[test]
    fn center_and_translate() {
        let rect = Rect::new(2.0, 4.0, 10.0, 6.0);
        assert_eq!(rect.center(), Point::new(7.0, 7.0));
        assert_eq!(rect.translated(1.0, -1.0), Rect::new(3.0, 3.0, 10.0, 6.0));
        assert_eq!(Rect::centered_on(rect.center(), rect.size()), rect);
    }

    #[test]
    fn key_state_tracks_press_and_release() {
        let mut keys = KeyState::new();
        keys.set_pressed("KeyE");
        assert!(keys.is_pressed("KeyE"));
        keys.set_released("KeyE");
        assert!(!keys.is_pressed("KeyE"));
        assert_eq!(keys.pointer(), None);
    }
}
