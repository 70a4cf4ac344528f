use crate::browser;
use anyhow::{anyhow, Error, Result};
// wasm is single threaded, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::mpsc::UnboundedReceiver;
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    closure::Closure,
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we create the closures ourselves and know their signature
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub mod input;

use self::input::KeyPress;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `delta` is the raw time since the previous frame in milliseconds
    fn update(&mut self, delta: f64, keys: &[KeyPress]);
    fn draw(&self, renderer: &Renderer) -> Result<()>;
    /// Once true the loop stops requesting animation frames
    fn is_halted(&self) -> bool;
    fn restart(&mut self);
}

pub struct GameLoop {
    last_frame: f64,
}

/// Everything one animation frame needs, shared between the
/// requestAnimationFrame closure and the restart button handler
struct LoopState {
    game: Box<dyn Game>,
    game_loop: GameLoop,
    renderer: Renderer,
    keyevent_receiver: UnboundedReceiver<KeyPress>,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;
type SharedLoopState = Rc<RefCell<LoopState>>;

impl LoopState {
    /// Runs a single frame, returns whether the game halted
    fn frame(&mut self, perf: f64) -> bool {
        let delta = perf - self.game_loop.last_frame;
        self.game_loop.last_frame = perf;

        let keys = input::drain(&mut self.keyevent_receiver);
        self.game.update(delta, &keys);
        if let Err(err) = self.game.draw(&self.renderer) {
            log::error!("GameLoop: draw failed : {:#?}", err);
        }

        self.game.is_halted()
    }
}

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let keyevent_receiver = input::prepare_input()?;
        let game = game.initialize().await?;
        let state: SharedLoopState = Rc::new(RefCell::new(LoopState {
            game,
            game_loop: GameLoop {
                last_frame: browser::now()?,
            },
            renderer: Renderer {
                context: browser::context()?,
            },
            keyevent_receiver,
        }));

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let halted = state.borrow_mut().frame(perf);
            let scheduled = if halted {
                log::info!("GameLoop: halted, waiting for restart");
                GameLoop::await_restart(state.clone(), f.clone())
            } else {
                GameLoop::schedule(&f)
            };
            if let Err(err) = scheduled {
                log::error!("GameLoop: could not schedule next frame : {:#?}", err);
            }
        }));

        GameLoop::schedule(&g)?;
        Ok(())
    }

    fn schedule(f: &SharedLoopClosure) -> Result<()> {
        let callback = f.borrow();
        browser::request_animation_frame(
            callback
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;
        Ok(())
    }

    /// Shows the restart button, clicking it resumes the frame chain
    fn await_restart(state: SharedLoopState, f: SharedLoopClosure) -> Result<()> {
        browser::draw_ui(browser::html::RESTART_BUTTON)?;
        let button = browser::find_html_element_by_id(browser::html::RESTART_ID)?;

        let on_click: Closure<dyn FnMut()> = Closure::once(move || {
            if let Err(err) = GameLoop::resume(&state, &f) {
                log::error!("GameLoop: restart failed : {:#?}", err);
            }
        });
        button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
        // the button is removed on click, so the handler only ever fires once
        on_click.forget();

        Ok(())
    }

    fn resume(state: &SharedLoopState, f: &SharedLoopClosure) -> Result<()> {
        browser::hide_ui()?;
        {
            let mut state = state.borrow_mut();
            state.game.restart();
            // time spent on the game over screen is not a frame delta
            state.game_loop.last_frame = browser::now()?;
        }
        GameLoop::schedule(f)
    }
}

// ==================== Geometry ====================
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub const fn new_from_x_y(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x() + self.width() * 0.5,
            y: self.y() + self.height() * 0.5,
        }
    }

    /// Circle approximation: each rect becomes a circle of half its width
    /// around its center. Touching circles do not overlap.
    pub fn circle_overlaps(&self, other: &Rect) -> bool {
        let combined_radius = self.width() / 2.0 + other.width() / 2.0;
        self.center().distance(&other.center()) < combined_radius
    }
}

// ==================== Rendering ====================
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: &'static str,
    pub align: TextAlign,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x(), rect.y(), rect.width(), rect.height());
    }

    /// Blits the `frame` region of a sprite sheet into `destination`
    pub fn draw_image(
        &self,
        image: &HtmlImageElement,
        frame: &Rect,
        destination: &Rect,
    ) -> Result<()> {
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                frame.x(),
                frame.y(),
                frame.width(),
                frame.height(),
                destination.x(),
                destination.y(),
                destination.width(),
                destination.height(),
            )
            .map_err(|err| anyhow!("Error drawing image : {:#?}", err))
    }

    /// Stretches the whole image over `destination`
    pub fn draw_entire_image(&self, image: &HtmlImageElement, destination: &Rect) -> Result<()> {
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.x(),
                destination.y(),
                destination.width(),
                destination.height(),
            )
            .map_err(|err| anyhow!("Error drawing image : {:#?}", err))
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(rect.x(), rect.y(), rect.width(), rect.height());
    }

    pub fn fill_text(&self, text: &str, position: &Point, style: &TextStyle) -> Result<()> {
        self.context.set_font(style.font);
        self.context.set_text_align(style.align.as_str());
        self.context.set_fill_style_str(style.color);
        self.context
            .fill_text(text, position.x, position.y)
            .map_err(|err| anyhow!("Error filling text : {:#?}", err))
    }
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

    let success_callback: Closure<dyn FnMut()> = Closure::once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback: Closure<dyn FnMut(JsValue)> = Closure::once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!("Error loading image: {:#?}", err)));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - first ? : channel result
    // - second ? : image load result
    rx.await??;

    log::debug!("loaded image {}", source);
    Ok(image)
}
